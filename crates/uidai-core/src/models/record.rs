use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::ops::AddAssign;
use std::str::FromStr;

use super::state::IndianState;
use crate::error::{Result, UidaiError};

/// Six-digit Indian postal code
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct Pincode(String);

impl Pincode {
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl FromStr for Pincode {
    type Err = UidaiError;

    fn from_str(s: &str) -> Result<Self> {
        let trimmed = s.trim();
        if trimmed.len() == 6 && trimmed.bytes().all(|b| b.is_ascii_digit()) {
            Ok(Self(trimmed.to_string()))
        } else {
            Err(UidaiError::InvalidPincode {
                value: s.to_string(),
            })
        }
    }
}

impl TryFrom<String> for Pincode {
    type Error = UidaiError;

    fn try_from(value: String) -> Result<Self> {
        value.parse()
    }
}

impl From<Pincode> for String {
    fn from(pincode: Pincode) -> Self {
        pincode.0
    }
}

impl fmt::Display for Pincode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// Age bucket of an enrollment or update count
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum AgeBucket {
    /// Children up to five years old
    Age0To5,
    /// Children between five and seventeen
    Age5To17,
    /// Adults; the update datasets cut this bucket at 17+
    Adult,
}

impl AgeBucket {
    /// Buckets in display order
    pub const ALL: [AgeBucket; 3] = [Self::Age0To5, Self::Age5To17, Self::Adult];

    pub fn label(&self) -> &'static str {
        match self {
            Self::Age0To5 => "Age 0-5",
            Self::Age5To17 => "Age 5-17",
            Self::Adult => "Age 18+",
        }
    }

    fn index(&self) -> usize {
        match self {
            Self::Age0To5 => 0,
            Self::Age5To17 => 1,
            Self::Adult => 2,
        }
    }
}

/// Per-bucket counts of a single record
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct AgeCounts([u64; 3]);

impl AgeCounts {
    pub fn new(age_0_5: u64, age_5_17: u64, adult: u64) -> Self {
        Self([age_0_5, age_5_17, adult])
    }

    /// Counts for update datasets, which carry no 0-5 bucket
    pub fn updates(age_5_17: u64, adult: u64) -> Self {
        Self([0, age_5_17, adult])
    }

    pub fn get(&self, bucket: AgeBucket) -> u64 {
        self.0[bucket.index()]
    }

    pub fn total(&self) -> u64 {
        self.0.iter().sum()
    }

    /// Iterate `(bucket, count)` pairs in display order
    pub fn iter(&self) -> impl Iterator<Item = (AgeBucket, u64)> + '_ {
        AgeBucket::ALL.iter().map(move |bucket| (*bucket, self.get(*bucket)))
    }
}

impl AddAssign for AgeCounts {
    fn add_assign(&mut self, other: Self) {
        for (count, extra) in self.0.iter_mut().zip(other.0) {
            *count += extra;
        }
    }
}

/// One row of cleaned source data
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Record {
    pub date: NaiveDate,
    pub state: IndianState,
    pub district: String,
    pub pincode: Pincode,
    pub counts: AgeCounts,
}

impl Record {
    pub fn new(
        date: NaiveDate,
        state: IndianState,
        district: impl Into<String>,
        pincode: Pincode,
        counts: AgeCounts,
    ) -> Self {
        Self {
            date,
            state,
            district: district.into(),
            pincode,
            counts,
        }
    }

    /// Build a record from raw text fields, validating state and pincode
    pub fn parse(
        date: NaiveDate,
        state: &str,
        district: &str,
        pincode: &str,
        counts: AgeCounts,
    ) -> Result<Self> {
        Ok(Self::new(date, state.parse()?, district.trim(), pincode.parse()?, counts))
    }

    /// Sum of all age buckets
    pub fn total(&self) -> u64 {
        self.counts.total()
    }
}
