pub mod routes;
pub mod sse;

pub use crate::infrastructure::app_state::AppState;
