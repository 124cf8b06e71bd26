//! Applying a validated play to the match.

use crate::domain::entities::GameMatch;
use crate::domain::errors::GameError;
use crate::domain::services::{effects, rounds, validator};
use crate::domain::value_objects::{Card, Suit};

/// What a successful play did beyond moving cards.
#[derive(Debug, Clone)]
pub struct PlayOutcome {
    /// The originator emptied their hand.
    pub went_safe: bool,
    /// Set when the play ended the round (and possibly the tournament).
    pub round_end: Option<rounds::RoundEndOutcome>,
}

/// Validate and apply a play. On error nothing is mutated.
pub fn execute_play(
    game: &mut GameMatch,
    player_id: &str,
    cards: &[Card],
    declared_suit: Option<Suit>,
) -> Result<PlayOutcome, GameError> {
    validator::validate_play(game, player_id, cards, declared_suit)?;

    let active_count = game.active_count();
    let origin = game.current_index;

    if let Some(player) = game.player_mut(player_id) {
        for card in cards {
            player.remove_card(card);
        }
    }
    game.discard_pile.extend_from_slice(cards);

    let effect = effects::stack_effect(cards);
    let resolution = effects::resolve(cards, active_count);

    if resolution.flip_direction {
        game.direction = game.direction.flipped();
    }
    game.draw_stack += effect.draw_add;
    game.declared_suit = if effect.wild { declared_suit } else { None };

    let hand_empty = game
        .player(player_id)
        .map(|p| p.hand.is_empty())
        .unwrap_or(false);

    if hand_empty {
        game.end_turn_state(player_id);
        let round_end = rounds::handle_player_out(game, player_id, origin, resolution.steps);
        Ok(PlayOutcome {
            went_safe: true,
            round_end,
        })
    } else {
        game.advance_turn(resolution.steps);
        Ok(PlayOutcome {
            went_safe: false,
            round_end: None,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::entities::{Direction, MatchPhase};
    use crate::domain::value_objects::{MatchSettings, Rank};

    fn card(rank: Rank, suit: Suit) -> Card {
        Card::new(rank, suit)
    }

    /// A playing match with controlled hands and top discard. Pads the
    /// draw pile so card conservation stays checkable.
    fn fixture(player_count: usize, top: Card, hands: &[&[Card]]) -> GameMatch {
        let seats = ["a", "b", "c", "d"]
            .iter()
            .take(player_count)
            .map(|id| (id.to_string(), id.to_uppercase()))
            .collect();
        let mut game =
            GameMatch::new("m".into(), seats, MatchSettings::default(), Some(42)).unwrap();
        game.phase = MatchPhase::Playing;
        game.decks_in_play = 1;
        for (player, hand) in game.players.iter_mut().zip(hands) {
            player.hand.extend(hand.iter().copied());
        }
        let dealt: Vec<Card> = hands.iter().flat_map(|h| h.iter().copied()).collect();
        game.draw_pile = crate::domain::value_objects::deck::standard_deck()
            .into_iter()
            .filter(|c| *c != top && !dealt.contains(c))
            .collect();
        game.discard_pile.push(top);
        game.rebuild_active_order();
        game
    }

    #[test]
    fn test_jack_keeps_turn_in_two_player_match() {
        let top = card(Rank::Seven, Suit::Hearts);
        let jack = card(Rank::Jack, Suit::Hearts);
        let filler = card(Rank::Nine, Suit::Clubs);
        let mut game = fixture(2, top, &[&[jack, filler], &[filler]]);

        let outcome = execute_play(&mut game, "a", &[jack], None).unwrap();
        assert!(!outcome.went_safe);
        assert_eq!(game.current_player_id(), Some("a"));
        assert_eq!(game.direction, Direction::Forward);
        assert_eq!(game.draw_stack, 0);
        assert!(game.declared_suit.is_none());
        assert_eq!(game.top_discard(), Some(jack));
    }

    #[test]
    fn test_queen_reverses_in_three_player_match() {
        let top = card(Rank::Five, Suit::Clubs);
        let queen = card(Rank::Queen, Suit::Clubs);
        let filler = card(Rank::Nine, Suit::Diamonds);
        let mut game = fixture(3, top, &[&[queen, filler], &[filler], &[filler]]);

        execute_play(&mut game, "a", &[queen], None).unwrap();
        assert_eq!(game.direction, Direction::Backward);
        assert_eq!(game.current_player_id(), Some("c"));
    }

    #[test]
    fn test_ace_builds_a_draw_stack_for_the_next_player() {
        let top = card(Rank::Five, Suit::Diamonds);
        let ace = card(Rank::Ace, Suit::Diamonds);
        let filler = card(Rank::Nine, Suit::Clubs);
        let mut game = fixture(3, top, &[&[ace, filler], &[filler], &[filler]]);

        execute_play(&mut game, "a", &[ace], None).unwrap();
        assert_eq!(game.draw_stack, 4);
        assert_eq!(game.current_player_id(), Some("b"));
        assert_eq!(game.top_discard(), Some(ace));
    }

    #[test]
    fn test_counter_transfers_the_stack_onward() {
        let top = card(Rank::Five, Suit::Diamonds);
        let ace_d = card(Rank::Ace, Suit::Diamonds);
        let ace_s = card(Rank::Ace, Suit::Spades);
        let filler = card(Rank::Nine, Suit::Clubs);
        let mut game = fixture(3, top, &[&[ace_d, filler], &[ace_s, filler], &[filler]]);

        execute_play(&mut game, "a", &[ace_d], None).unwrap();
        execute_play(&mut game, "b", &[ace_s], None).unwrap();
        assert_eq!(game.draw_stack, 8);
        assert_eq!(game.current_player_id(), Some("c"));
    }

    #[test]
    fn test_stacked_eights_set_the_declared_suit() {
        let top = card(Rank::Five, Suit::Spades);
        let eight_s = card(Rank::Eight, Suit::Spades);
        let eight_h = card(Rank::Eight, Suit::Hearts);
        let four = card(Rank::Four, Suit::Clubs);
        let filler = card(Rank::Nine, Suit::Diamonds);
        let mut game = fixture(3, top, &[&[eight_s, eight_h, four], &[filler], &[filler]]);

        execute_play(&mut game, "a", &[eight_s, eight_h], Some(Suit::Clubs)).unwrap();
        assert_eq!(game.top_discard(), Some(eight_h));
        assert_eq!(game.declared_suit, Some(Suit::Clubs));
        assert_eq!(game.draw_stack, 0);
        assert_eq!(game.current_player_id(), Some("b"));
    }

    #[test]
    fn test_wild_declaration_is_cleared_by_the_next_resolution() {
        let top = card(Rank::Five, Suit::Spades);
        let eight = card(Rank::Eight, Suit::Spades);
        let nine_c = card(Rank::Nine, Suit::Clubs);
        let filler = card(Rank::King, Suit::Diamonds);
        let mut game = fixture(2, top, &[&[eight, filler], &[nine_c, filler]]);

        execute_play(&mut game, "a", &[eight], Some(Suit::Clubs)).unwrap();
        assert_eq!(game.declared_suit, Some(Suit::Clubs));

        // Nine of Clubs matches the declared suit and clears it.
        execute_play(&mut game, "b", &[nine_c], None).unwrap();
        assert!(game.declared_suit.is_none());
    }

    #[test]
    fn test_playing_the_last_card_goes_safe_and_ends_the_round() {
        let top = card(Rank::Five, Suit::Diamonds);
        let five_c = card(Rank::Five, Suit::Clubs);
        let filler = card(Rank::Nine, Suit::Hearts);
        let mut game = fixture(2, top, &[&[five_c], &[filler]]);

        let outcome = execute_play(&mut game, "a", &[five_c], None).unwrap();
        assert!(outcome.went_safe);
        let round_end = outcome.round_end.expect("two-player round must end");
        assert_eq!(round_end.eliminated.as_ref().unwrap().0, "b");
        assert_eq!(round_end.winner.as_ref().unwrap().0, "a");
        assert_eq!(game.phase, MatchPhase::Finished);
    }

    #[test]
    fn test_card_conservation_across_plays() {
        let top = card(Rank::Five, Suit::Diamonds);
        let ace = card(Rank::Ace, Suit::Diamonds);
        let mut game = fixture(
            3,
            top,
            &[
                &[ace, card(Rank::Nine, Suit::Clubs)],
                &[card(Rank::Nine, Suit::Hearts)],
                &[card(Rank::Nine, Suit::Spades)],
            ],
        );

        let before = game.total_cards();
        assert_eq!(before, 52);
        execute_play(&mut game, "a", &[ace], None).unwrap();
        assert_eq!(game.total_cards(), before);
    }

    #[test]
    fn test_failed_play_mutates_nothing() {
        let top = card(Rank::Five, Suit::Diamonds);
        let king = card(Rank::King, Suit::Clubs);
        let filler = card(Rank::Nine, Suit::Clubs);
        let mut game = fixture(2, top, &[&[king, filler], &[filler]]);

        let before_snapshot = format!("{:?}", game.snapshot());
        let before_hand = game.hand("a").unwrap();
        assert!(execute_play(&mut game, "a", &[king], None).is_err());
        assert_eq!(game.hand("a").unwrap(), before_hand);
        assert_eq!(format!("{:?}", game.snapshot()), before_snapshot);
    }
}
