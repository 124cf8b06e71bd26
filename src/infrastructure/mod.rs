pub mod app_state;
pub mod match_store;
pub mod timers;
