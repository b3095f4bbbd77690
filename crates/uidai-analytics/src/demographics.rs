use uidai_core::models::AgeCounts;

use crate::models::{AgeDistribution, AgeGroupShare};

/// Tenths of a percent in a whole
const TENTHS: u64 = 1000;

/// Percentage breakdown of enrollments per age bucket.
///
/// Shares are apportioned in whole tenths of a percent with the largest-remainder
/// method, so the tenths always sum to 1000. Each `percentage` is its tenths
/// divided by ten; summing those floats can land a rounding step off 100.0
/// (33.4 + 33.3 + 33.3), so compare sums in tenths. An empty total gives an
/// empty distribution.
pub fn age_distribution(totals: &AgeCounts) -> AgeDistribution {
    let total = totals.total();
    if total == 0 {
        return AgeDistribution {
            age_distribution: Vec::new(),
            total: 0,
        };
    }

    let counts: Vec<u64> = totals.iter().map(|(_, count)| count).collect();
    let tenths = largest_remainder(&counts, TENTHS);

    let age_distribution = totals
        .iter()
        .zip(tenths)
        .map(|((bucket, count), share)| AgeGroupShare {
            group: bucket.label().to_string(),
            count,
            percentage: share as f64 / 10.0,
        })
        .collect();

    AgeDistribution {
        age_distribution,
        total,
    }
}

/// Apportion `scale` units across `counts` proportionally.
///
/// Each entry gets the floor of its exact share; leftover units go to the largest
/// remainders, earlier entries first on ties. The result sums to `scale` whenever
/// the counts are not all zero.
pub fn largest_remainder(counts: &[u64], scale: u64) -> Vec<u64> {
    let total: u128 = counts.iter().map(|&c| c as u128).sum();
    if total == 0 {
        return vec![0; counts.len()];
    }

    let mut shares = Vec::with_capacity(counts.len());
    let mut remainders = Vec::with_capacity(counts.len());
    for (index, &count) in counts.iter().enumerate() {
        let exact = count as u128 * scale as u128;
        shares.push((exact / total) as u64);
        remainders.push((exact % total, index));
    }

    let assigned: u64 = shares.iter().sum();
    remainders.sort_by(|a, b| b.0.cmp(&a.0).then(a.1.cmp(&b.1)));

    for &(_, index) in remainders.iter().take((scale - assigned) as usize) {
        shares[index] += 1;
    }

    shares
}
