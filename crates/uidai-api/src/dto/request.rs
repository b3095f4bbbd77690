use serde::Deserialize;

/// Query string for `GET /trends`
#[derive(Debug, Deserialize)]
pub struct TrendsQuery {
    #[serde(default = "default_days")]
    pub days: i64,
}

fn default_days() -> i64 {
    30
}

/// Query string for `GET /states`
#[derive(Debug, Deserialize)]
pub struct StatesQuery {
    #[serde(default = "default_top_n")]
    pub top_n: i64,
}

fn default_top_n() -> i64 {
    10
}
