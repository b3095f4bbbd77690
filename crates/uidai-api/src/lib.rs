pub mod bootstrap;
pub mod config;
pub mod dto;
pub mod error;
pub mod handlers;
pub mod router;
pub mod state;

pub use bootstrap::build_engine;
pub use config::ApiConfig;
pub use router::create_router;
pub use state::AppState;
