pub mod cleaning;
pub mod dataset;
pub mod record;
pub mod state;

pub use cleaning::{CleaningDatasets, CleaningReport, CleaningStats};
pub use dataset::{DataContext, Dataset, DatasetKind};
pub use record::{AgeBucket, AgeCounts, Pincode, Record};
pub use state::IndianState;
