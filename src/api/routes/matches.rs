use std::sync::Arc;

use axum::{
    extract::{Path, State},
    http::StatusCode,
    response::Json,
};
use serde::{Deserialize, Serialize};

use crate::api::AppState;
use crate::application::game::{
    CreateMatch, CreateMatchInput, DrawCard, DrawCardInput, GetHand, GetHandInput, GetState,
    GetStateInput, MarkConnected, MarkConnectedInput, MatchCommandError, PassTurn, PassTurnInput,
    PlayAgainVoteInput, PlayCards, PlayCardsInput, PrepVoteInput, ResetForNewGame,
    ResetForNewGameInput, StartMatch, StartMatchInput, UnvotePlayAgain, UnvoteSkipPreparation,
    VotePlayAgain, VoteSkipPreparation,
};
use crate::domain::errors::GameError;
use crate::domain::value_objects::{Card, MatchSnapshot, Suit};
use crate::infrastructure::timers;

// ============================================================================
// Request/Response DTOs
// ============================================================================

#[derive(Debug, Deserialize)]
pub struct SeatRequest {
    pub id: String,
    pub name: String,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CreateMatchRequest {
    pub players: Vec<SeatRequest>,
    pub seed: Option<u64>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PlayerActionRequest {
    pub player_id: String,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PlayCardsRequest {
    pub player_id: String,
    /// Canonical card strings, e.g. "Jack of Hearts".
    pub cards: Vec<Card>,
    pub declared_suit: Option<Suit>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ConnectionRequest {
    pub player_id: String,
    pub connected: bool,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SnapshotResponse {
    pub success: bool,
    pub snapshot: MatchSnapshot,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CreateMatchResponse {
    pub success: bool,
    pub match_id: String,
    pub snapshot: MatchSnapshot,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct PlayCardsResponse {
    pub success: bool,
    pub went_safe: bool,
    pub remaining_cards: usize,
    pub snapshot: MatchSnapshot,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct DrawCardResponse {
    pub success: bool,
    pub cards_drawn: usize,
    pub penalty: bool,
    pub pending_pass: bool,
    pub snapshot: MatchSnapshot,
}

#[derive(Debug, Serialize)]
pub struct HandResponse {
    pub success: bool,
    pub hand: Vec<Card>,
}

#[derive(Debug, Serialize)]
pub struct ErrorResponse {
    pub error: String,
    pub code: String,
}

type ApiError = (StatusCode, Json<ErrorResponse>);

fn command_error(err: MatchCommandError) -> ApiError {
    let status = match &err {
        MatchCommandError::MatchNotFound => StatusCode::NOT_FOUND,
        MatchCommandError::Game(game) => match game {
            GameError::PlayerState | GameError::NotYourTurn | GameError::NotCreator => {
                StatusCode::FORBIDDEN
            }
            GameError::DeckExhausted => StatusCode::INTERNAL_SERVER_ERROR,
            _ => StatusCode::BAD_REQUEST,
        },
    };
    (
        status,
        Json(ErrorResponse {
            error: err.to_string(),
            code: err.code().to_string(),
        }),
    )
}

// ============================================================================
// Route Handlers
// ============================================================================

/// POST /api/matches - Create a match
pub async fn create_match(
    State(state): State<Arc<AppState>>,
    Json(body): Json<CreateMatchRequest>,
) -> Result<(StatusCode, Json<CreateMatchResponse>), ApiError> {
    let use_case = CreateMatch::new(state.store.clone(), state.settings.clone());
    let result = use_case
        .execute(CreateMatchInput {
            seats: body.players.into_iter().map(|s| (s.id, s.name)).collect(),
            seed: body.seed,
        })
        .await
        .map_err(command_error)?;

    Ok((
        StatusCode::CREATED,
        Json(CreateMatchResponse {
            success: true,
            match_id: result.match_id,
            snapshot: result.snapshot,
        }),
    ))
}

/// GET /api/matches/:matchId/state - Public snapshot
pub async fn get_state(
    State(state): State<Arc<AppState>>,
    Path(match_id): Path<String>,
) -> Result<Json<SnapshotResponse>, ApiError> {
    let use_case = GetState::new(state.store.clone());
    let snapshot = use_case
        .execute(GetStateInput { match_id })
        .await
        .map_err(command_error)?;

    Ok(Json(SnapshotResponse {
        success: true,
        snapshot,
    }))
}

/// GET /api/matches/:matchId/hand/:playerId - Private hand view
pub async fn get_hand(
    State(state): State<Arc<AppState>>,
    Path((match_id, player_id)): Path<(String, String)>,
) -> Result<Json<HandResponse>, ApiError> {
    let use_case = GetHand::new(state.store.clone());
    let hand = use_case
        .execute(GetHandInput {
            match_id,
            player_id,
        })
        .await
        .map_err(command_error)?;

    Ok(Json(HandResponse {
        success: true,
        hand,
    }))
}

/// POST /api/matches/:matchId/start - Begin the preparation phase
pub async fn start_match(
    State(state): State<Arc<AppState>>,
    Path(match_id): Path<String>,
    Json(body): Json<PlayerActionRequest>,
) -> Result<Json<SnapshotResponse>, ApiError> {
    let use_case = StartMatch::new(state.store.clone(), state.events.clone());
    let result = use_case
        .execute(StartMatchInput {
            match_id: match_id.clone(),
            player_id: body.player_id,
        })
        .await
        .map_err(command_error)?;

    timers::schedule_preparation_timeout(state, match_id, result.preparation_seconds).await;

    Ok(Json(SnapshotResponse {
        success: true,
        snapshot: result.snapshot,
    }))
}

/// POST /api/matches/:matchId/preparation/vote - Vote to skip preparation
pub async fn vote_skip_preparation(
    State(state): State<Arc<AppState>>,
    Path(match_id): Path<String>,
    Json(body): Json<PlayerActionRequest>,
) -> Result<Json<SnapshotResponse>, ApiError> {
    let use_case = VoteSkipPreparation::new(state.store.clone(), state.events.clone());
    let result = use_case
        .execute(PrepVoteInput {
            match_id,
            player_id: body.player_id,
        })
        .await
        .map_err(command_error)?;

    Ok(Json(SnapshotResponse {
        success: true,
        snapshot: result.snapshot,
    }))
}

/// POST /api/matches/:matchId/preparation/unvote - Withdraw a skip vote
pub async fn unvote_skip_preparation(
    State(state): State<Arc<AppState>>,
    Path(match_id): Path<String>,
    Json(body): Json<PlayerActionRequest>,
) -> Result<Json<SnapshotResponse>, ApiError> {
    let use_case = UnvoteSkipPreparation::new(state.store.clone(), state.events.clone());
    let result = use_case
        .execute(PrepVoteInput {
            match_id,
            player_id: body.player_id,
        })
        .await
        .map_err(command_error)?;

    Ok(Json(SnapshotResponse {
        success: true,
        snapshot: result.snapshot,
    }))
}

/// POST /api/matches/:matchId/play - Play one card or a stack
pub async fn play_cards(
    State(state): State<Arc<AppState>>,
    Path(match_id): Path<String>,
    Json(body): Json<PlayCardsRequest>,
) -> Result<Json<PlayCardsResponse>, ApiError> {
    let use_case = PlayCards::new(state.store.clone(), state.events.clone());
    let result = use_case
        .execute(PlayCardsInput {
            match_id,
            player_id: body.player_id,
            cards: body.cards,
            declared_suit: body.declared_suit,
        })
        .await
        .map_err(command_error)?;

    Ok(Json(PlayCardsResponse {
        success: true,
        went_safe: result.went_safe,
        remaining_cards: result.remaining_cards,
        snapshot: result.snapshot,
    }))
}

/// POST /api/matches/:matchId/draw - Draw the penalty or one card
pub async fn draw_card(
    State(state): State<Arc<AppState>>,
    Path(match_id): Path<String>,
    Json(body): Json<PlayerActionRequest>,
) -> Result<Json<DrawCardResponse>, ApiError> {
    let player_id = body.player_id.clone();
    let use_case = DrawCard::new(state.store.clone(), state.events.clone());
    let result = use_case
        .execute(DrawCardInput {
            match_id: match_id.clone(),
            player_id: player_id.clone(),
        })
        .await
        .map_err(command_error)?;

    if result.pending_pass {
        timers::schedule_auto_pass(state, match_id, player_id, result.auto_pass_seconds).await;
    }

    Ok(Json(DrawCardResponse {
        success: true,
        cards_drawn: result.cards_drawn,
        penalty: result.penalty,
        pending_pass: result.pending_pass,
        snapshot: result.snapshot,
    }))
}

/// POST /api/matches/:matchId/pass - Close an open pending pass
pub async fn pass_turn(
    State(state): State<Arc<AppState>>,
    Path(match_id): Path<String>,
    Json(body): Json<PlayerActionRequest>,
) -> Result<Json<SnapshotResponse>, ApiError> {
    let use_case = PassTurn::new(state.store.clone(), state.events.clone());
    let snapshot = use_case
        .execute(PassTurnInput {
            match_id,
            player_id: body.player_id,
        })
        .await
        .map_err(command_error)?;

    Ok(Json(SnapshotResponse {
        success: true,
        snapshot,
    }))
}

/// POST /api/matches/:matchId/playAgain/vote - Vote for another game
pub async fn vote_play_again(
    State(state): State<Arc<AppState>>,
    Path(match_id): Path<String>,
    Json(body): Json<PlayerActionRequest>,
) -> Result<Json<SnapshotResponse>, ApiError> {
    let use_case = VotePlayAgain::new(state.store.clone(), state.events.clone());
    let snapshot = use_case
        .execute(PlayAgainVoteInput {
            match_id,
            player_id: body.player_id,
        })
        .await
        .map_err(command_error)?;

    Ok(Json(SnapshotResponse {
        success: true,
        snapshot,
    }))
}

/// POST /api/matches/:matchId/playAgain/unvote - Withdraw a play-again vote
pub async fn unvote_play_again(
    State(state): State<Arc<AppState>>,
    Path(match_id): Path<String>,
    Json(body): Json<PlayerActionRequest>,
) -> Result<Json<SnapshotResponse>, ApiError> {
    let use_case = UnvotePlayAgain::new(state.store.clone(), state.events.clone());
    let snapshot = use_case
        .execute(PlayAgainVoteInput {
            match_id,
            player_id: body.player_id,
        })
        .await
        .map_err(command_error)?;

    Ok(Json(SnapshotResponse {
        success: true,
        snapshot,
    }))
}

/// POST /api/matches/:matchId/reset - Creator restarts the tournament
pub async fn reset_for_new_game(
    State(state): State<Arc<AppState>>,
    Path(match_id): Path<String>,
    Json(body): Json<PlayerActionRequest>,
) -> Result<Json<SnapshotResponse>, ApiError> {
    let use_case = ResetForNewGame::new(state.store.clone(), state.events.clone());
    let snapshot = use_case
        .execute(ResetForNewGameInput {
            match_id,
            player_id: body.player_id,
        })
        .await
        .map_err(command_error)?;

    Ok(Json(SnapshotResponse {
        success: true,
        snapshot,
    }))
}

/// POST /api/matches/:matchId/connection - Connectivity hint from transport
pub async fn mark_connected(
    State(state): State<Arc<AppState>>,
    Path(match_id): Path<String>,
    Json(body): Json<ConnectionRequest>,
) -> Result<Json<SnapshotResponse>, ApiError> {
    let use_case = MarkConnected::new(state.store.clone(), state.events.clone());
    let snapshot = use_case
        .execute(MarkConnectedInput {
            match_id,
            player_id: body.player_id,
            connected: body.connected,
        })
        .await
        .map_err(command_error)?;

    Ok(Json(SnapshotResponse {
        success: true,
        snapshot,
    }))
}
