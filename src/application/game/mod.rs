mod connection;
mod create_match;
mod draw_card;
mod pass_turn;
mod play_again;
mod play_cards;
mod preparation;
mod queries;
mod start_match;

pub use connection::{MarkConnected, MarkConnectedInput};
pub use create_match::{CreateMatch, CreateMatchInput, CreateMatchOutput};
pub use draw_card::{DrawCard, DrawCardInput, DrawCardOutput};
pub use pass_turn::{PassTurn, PassTurnInput};
pub use play_again::{
    ResetForNewGame, ResetForNewGameInput, UnvotePlayAgain, VotePlayAgain, PlayAgainVoteInput,
};
pub use play_cards::{PlayCards, PlayCardsInput, PlayCardsOutput};
pub use preparation::{
    preparation_deadline, PrepVoteInput, PrepVoteOutput, UnvoteSkipPreparation,
    VoteSkipPreparation,
};
pub use queries::{GetHand, GetHandInput, GetState, GetStateInput};
pub use start_match::{StartMatch, StartMatchInput, StartMatchOutput};

use crate::domain::errors::GameError;

/// Failure of a match command: either the registry misses the match or the
/// rules refused the action.
#[derive(Debug, thiserror::Error)]
pub enum MatchCommandError {
    #[error("Match not found")]
    MatchNotFound,
    #[error(transparent)]
    Game(#[from] GameError),
}

impl MatchCommandError {
    /// Stable machine-readable code for the API boundary.
    pub fn code(&self) -> &'static str {
        match self {
            MatchCommandError::MatchNotFound => "MATCH_NOT_FOUND",
            MatchCommandError::Game(e) => e.code(),
        }
    }
}
