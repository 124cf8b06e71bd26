//! One-way event port. The engine emits state deltas through here and never
//! retries; delivery guarantees are the sink's concern.

/// Why the preparation phase ended.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PrepEndReason {
    AllVoted,
    Timeout,
}

impl PrepEndReason {
    pub fn as_str(&self) -> &'static str {
        match self {
            PrepEndReason::AllVoted => "allVoted",
            PrepEndReason::Timeout => "timeout",
        }
    }
}

/// State delta emitted after a command.
#[derive(Debug, Clone)]
pub enum MatchEvent {
    PreparationPhaseStarted {
        seconds: u64,
    },
    PreparationPhaseUpdated {
        votes: usize,
        total_connected: usize,
    },
    PreparationPhaseEnded {
        reason: PrepEndReason,
    },
    StateUpdated,
    RoundEnded {
        eliminated_id: String,
        eliminated_name: String,
    },
    GameFinished {
        winner_id: String,
        winner_name: String,
    },
}

impl MatchEvent {
    pub fn kind(&self) -> &'static str {
        match self {
            MatchEvent::PreparationPhaseStarted { .. } => "preparationPhaseStarted",
            MatchEvent::PreparationPhaseUpdated { .. } => "preparationPhaseUpdated",
            MatchEvent::PreparationPhaseEnded { .. } => "preparationPhaseEnded",
            MatchEvent::StateUpdated => "stateUpdated",
            MatchEvent::RoundEnded { .. } => "roundEnded",
            MatchEvent::GameFinished { .. } => "gameFinished",
        }
    }
}

/// Port for broadcasting match events; implemented outside the domain.
pub trait EventSink: Send + Sync {
    fn emit(&self, match_id: &str, event: MatchEvent);
}
