//! Categorised rule errors. Every public engine operation returns one of
//! these; nothing panics across the engine boundary, and a failing command
//! leaves the match untouched.

use serde::Serialize;

/// Why a stack of cards is internally illegal.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub enum StackReason {
    /// Adjacent cards match by neither rank, cross, nor suit.
    RankMismatch,
    /// Suit-only continuation without retaining turn control.
    TurnControlBreak,
    /// Ace/2 cross with mismatched suits, or a suit continuation off a
    /// draw or wild card.
    SuitRestrictedStacking,
}

impl StackReason {
    pub fn as_str(&self) -> &'static str {
        match self {
            StackReason::RankMismatch => "rank mismatch",
            StackReason::TurnControlBreak => "turn control break",
            StackReason::SuitRestrictedStacking => "suit-restricted stacking",
        }
    }
}

/// Rule-level failure kinds.
#[derive(Debug, Clone, Copy, PartialEq, Eq, thiserror::Error)]
pub enum GameError {
    #[error("action is not valid in the current phase")]
    GamePhase,
    #[error("player is unknown, eliminated, or already safe")]
    PlayerState,
    #[error("not your turn")]
    NotYourTurn,
    #[error("no cards were supplied")]
    NoCards,
    #[error("one or more cards are not in your hand")]
    NotInHand,
    #[error("illegal card stack: {0}")]
    StackInvalid(StackReason),
    #[error("an eight needs a declared suit")]
    SuitNotDeclared,
    #[error("a draw stack is active and this card cannot counter it")]
    CounterRequired,
    #[error("card matches neither the suit nor the rank of the top card")]
    CardMismatch,
    #[error("already drew a card this turn")]
    AlreadyDrew,
    #[error("no pass is pending for this player")]
    NoPendingPass,
    #[error("only the match creator may do this")]
    NotCreator,
    #[error("not all connected players have voted")]
    NotAllVoted,
    #[error("a match needs 2 to 4 players")]
    InsufficientPlayers,
    #[error("draw and discard piles are exhausted")]
    DeckExhausted,
}

impl std::fmt::Display for StackReason {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

impl GameError {
    /// Stable machine-readable code for the API boundary.
    pub fn code(&self) -> &'static str {
        match self {
            GameError::GamePhase => "GAME_PHASE",
            GameError::PlayerState => "PLAYER_STATE",
            GameError::NotYourTurn => "NOT_YOUR_TURN",
            GameError::NoCards => "NO_CARDS",
            GameError::NotInHand => "NOT_IN_HAND",
            GameError::StackInvalid(_) => "STACK_INVALID",
            GameError::SuitNotDeclared => "SUIT_NOT_DECLARED",
            GameError::CounterRequired => "COUNTER_REQUIRED",
            GameError::CardMismatch => "CARD_MISMATCH",
            GameError::AlreadyDrew => "ALREADY_DREW",
            GameError::NoPendingPass => "NO_PENDING_PASS",
            GameError::NotCreator => "NOT_CREATOR",
            GameError::NotAllVoted => "NOT_ALL_VOTED",
            GameError::InsufficientPlayers => "INSUFFICIENT_PLAYERS",
            GameError::DeckExhausted => "DECK_EXHAUSTED",
        }
    }
}
