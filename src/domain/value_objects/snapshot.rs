//! Egress state snapshot. Hands never appear here; per-player hand views go
//! through the dedicated hand query.

use serde::Serialize;

use crate::domain::value_objects::Suit;

/// Public view of a match after a command.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct MatchSnapshot {
    pub match_id: String,
    pub phase: String,
    pub round_number: u32,
    pub current_player_id: Option<String>,
    pub current_player_name: Option<String>,
    pub top_discard: Option<String>,
    pub declared_suit: Option<Suit>,
    /// +1 or -1
    pub direction: i8,
    pub draw_stack: u32,
    pub pending_pass_player_id: Option<String>,
    pub drew_this_turn: Vec<String>,
    pub draw_pile_size: usize,
    pub discard_pile_size: usize,
    pub players: Vec<PlayerSnapshot>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub preparation: Option<PreparationSnapshot>,
}

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct PlayerSnapshot {
    pub id: String,
    pub name: String,
    pub hand_size: usize,
    pub is_safe: bool,
    pub is_eliminated: bool,
    pub is_connected: bool,
    pub is_current: bool,
}

/// Extra block present only while the match is in preparation.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct PreparationSnapshot {
    pub votes: usize,
    pub total_connected: usize,
    pub voted_player_ids: Vec<String>,
    pub can_skip: bool,
}
