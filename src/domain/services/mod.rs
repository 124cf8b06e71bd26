pub mod drawing;
pub mod effects;
pub mod play;
pub mod preparation;
pub mod rounds;
pub mod validator;

pub use drawing::{auto_pass_due, execute_draw, execute_pass, DrawOutcome};
pub use effects::{keeps_turn, resolve, stack_effect, Resolution, StackEffect};
pub use play::{execute_play, PlayOutcome};
pub use preparation::{preparation_expired, refresh_quorum, unvote_skip, vote_skip, PrepTally};
pub use rounds::{
    deal_round, finish_round, handle_player_out, reset_for_new_game, start_match,
    start_new_round, unvote_play_again, vote_play_again, RoundEndOutcome,
};
pub use validator::{is_counter, validate_play};
