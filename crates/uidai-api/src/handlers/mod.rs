mod analytics;
mod health;

pub use analytics::{
    get_all_states, get_anomalies, get_demographics, get_insights, get_metrics, get_top_states,
    get_trends,
};
pub use health::{health_check, root};
