mod request;
mod response;

pub use request::{StatesQuery, TrendsQuery};
pub use response::{HealthResponse, RootResponse};
