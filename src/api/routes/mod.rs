pub mod health;
pub mod matches;

use std::sync::Arc;

use axum::{
    routing::{get, post},
    Router,
};

use crate::api::AppState;

/// Create the main API router
pub fn create_api_router(state: Arc<AppState>) -> Router<Arc<AppState>> {
    Router::new()
        .nest("/matches", create_match_router())
        .route("/health", get(health::health_handler))
        .with_state(state)
}

/// Create match command router; one route per engine command.
fn create_match_router() -> Router<Arc<AppState>> {
    Router::new()
        .route("/", post(matches::create_match))
        .route("/:matchId/state", get(matches::get_state))
        .route("/:matchId/hand/:playerId", get(matches::get_hand))
        .route("/:matchId/start", post(matches::start_match))
        .route(
            "/:matchId/preparation/vote",
            post(matches::vote_skip_preparation),
        )
        .route(
            "/:matchId/preparation/unvote",
            post(matches::unvote_skip_preparation),
        )
        .route("/:matchId/play", post(matches::play_cards))
        .route("/:matchId/draw", post(matches::draw_card))
        .route("/:matchId/pass", post(matches::pass_turn))
        .route("/:matchId/playAgain/vote", post(matches::vote_play_again))
        .route(
            "/:matchId/playAgain/unvote",
            post(matches::unvote_play_again),
        )
        .route("/:matchId/reset", post(matches::reset_for_new_game))
        .route("/:matchId/connection", post(matches::mark_connected))
}
