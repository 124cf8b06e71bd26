mod game_match;
mod player;

pub use game_match::{Direction, GameMatch, MatchPhase, MAX_PLAYERS, MIN_PLAYERS};
pub use player::{Hand, Player};
