//! Play validation pipeline.
//!
//! Checks run in a fixed order (phase, player state, turn, ownership, stack
//! legality, lead legality) and never mutate the match, so a rejected
//! command leaves no trace.

use crate::domain::entities::{GameMatch, MatchPhase};
use crate::domain::errors::{GameError, StackReason};
use crate::domain::services::effects;
use crate::domain::value_objects::{Card, Rank, Suit};

/// Validate a single or stacked play for `player_id`.
pub fn validate_play(
    game: &GameMatch,
    player_id: &str,
    cards: &[Card],
    declared_suit: Option<Suit>,
) -> Result<(), GameError> {
    if game.phase != MatchPhase::Playing {
        return Err(GameError::GamePhase);
    }
    let player = game.player(player_id).ok_or(GameError::PlayerState)?;
    if player.eliminated || player.safe {
        return Err(GameError::PlayerState);
    }
    if game.current_player_id() != Some(player_id) {
        return Err(GameError::NotYourTurn);
    }
    if cards.is_empty() {
        return Err(GameError::NoCards);
    }
    if !player.owns_all(cards) {
        return Err(GameError::NotInHand);
    }

    if cards.len() > 1 {
        validate_stack(game, cards)?;
    }

    let bottom = &cards[0];
    if game.draw_stack > 0 {
        let top = game.top_discard().ok_or(GameError::GamePhase)?;
        if !is_counter(bottom, &top) {
            return Err(GameError::CounterRequired);
        }
    } else if !bottom.is_wild() && !game.is_playable(bottom) {
        return Err(GameError::CardMismatch);
    }

    // Any stack that ends on an eight needs a suit to carry forward.
    if cards[cards.len() - 1].is_wild() && declared_suit.is_none() {
        return Err(GameError::SuitNotDeclared);
    }

    Ok(())
}

/// Internal legality of a stack of two or more cards.
///
/// Adjacent cards chain by identical rank, by an Ace/2 cross in the same
/// suit, or by suit alone. A suit-only transition stands only when the
/// originator would still hold the turn after the preceding cards, or when
/// the next card could itself have been led against the pre-stack top; and
/// never off the back of a draw card or an eight, whose effects must resolve
/// before anything else lands on them.
fn validate_stack(game: &GameMatch, cards: &[Card]) -> Result<(), GameError> {
    let active_count = game.active_count();
    for i in 1..cards.len() {
        let prev = &cards[i - 1];
        let next = &cards[i];

        if prev.rank == next.rank {
            continue;
        }

        if prev.is_draw_card() && next.is_draw_card() {
            // Ace onto 2 or 2 onto Ace, only within one suit.
            if prev.suit == next.suit {
                continue;
            }
            return Err(GameError::StackInvalid(StackReason::SuitRestrictedStacking));
        }

        if prev.suit == next.suit {
            if prev.is_draw_card() || prev.is_wild() {
                return Err(GameError::StackInvalid(StackReason::SuitRestrictedStacking));
            }
            if effects::keeps_turn(&cards[..i], active_count) || leads_fresh(game, next) {
                continue;
            }
            return Err(GameError::StackInvalid(StackReason::TurnControlBreak));
        }

        return Err(GameError::StackInvalid(StackReason::RankMismatch));
    }
    Ok(())
}

/// Whether `card` would be a legal first card in the current match context.
fn leads_fresh(game: &GameMatch, card: &Card) -> bool {
    if game.draw_stack > 0 {
        return game
            .top_discard()
            .map(|top| is_counter(card, &top))
            .unwrap_or(false);
    }
    game.is_playable(card)
}

/// Counter table for an active draw stack: Ace answers Ace in any suit and
/// 2 in the same suit; 2 answers 2 in any suit and Ace in the same suit.
/// An eight is never a counter.
pub fn is_counter(card: &Card, top: &Card) -> bool {
    match (card.rank, top.rank) {
        (Rank::Ace, Rank::Ace) => true,
        (Rank::Ace, Rank::Two) => card.suit == top.suit,
        (Rank::Two, Rank::Two) => true,
        (Rank::Two, Rank::Ace) => card.suit == top.suit,
        _ => false,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::value_objects::MatchSettings;

    fn card(rank: Rank, suit: Suit) -> Card {
        Card::new(rank, suit)
    }

    /// A playing match with controlled hands and top discard.
    fn fixture(player_count: usize, top: Card, hands: &[&[Card]]) -> GameMatch {
        let seats = ["a", "b", "c", "d"]
            .iter()
            .take(player_count)
            .map(|id| (id.to_string(), id.to_uppercase()))
            .collect();
        let mut game =
            GameMatch::new("m".into(), seats, MatchSettings::default(), Some(42)).unwrap();
        game.phase = MatchPhase::Playing;
        game.discard_pile.push(top);
        game.decks_in_play = 1;
        game.rebuild_active_order();
        for (player, hand) in game.players.iter_mut().zip(hands) {
            player.hand.extend(hand.iter().copied());
        }
        game
    }

    #[test]
    fn test_turn_and_ownership_checks_run_in_order() {
        let top = card(Rank::Seven, Suit::Hearts);
        let hand = [card(Rank::Seven, Suit::Clubs)];
        let game = fixture(2, top, &[&hand, &hand]);

        assert_eq!(
            validate_play(&game, "b", &hand, None).unwrap_err(),
            GameError::NotYourTurn
        );
        assert_eq!(
            validate_play(&game, "a", &[], None).unwrap_err(),
            GameError::NoCards
        );
        assert_eq!(
            validate_play(&game, "a", &[card(Rank::Seven, Suit::Spades)], None).unwrap_err(),
            GameError::NotInHand
        );
        assert_eq!(
            validate_play(&game, "ghost", &hand, None).unwrap_err(),
            GameError::PlayerState
        );
    }

    #[test]
    fn test_rank_and_suit_leads() {
        let top = card(Rank::Seven, Suit::Hearts);
        let hand = [
            card(Rank::Seven, Suit::Clubs),
            card(Rank::Two, Suit::Hearts),
            card(Rank::King, Suit::Spades),
        ];
        let game = fixture(2, top, &[&hand, &[]]);

        assert!(validate_play(&game, "a", &hand[0..1], None).is_ok());
        assert!(validate_play(&game, "a", &hand[1..2], None).is_ok());
        assert_eq!(
            validate_play(&game, "a", &hand[2..3], None).unwrap_err(),
            GameError::CardMismatch
        );
    }

    #[test]
    fn test_declared_suit_overrides_physical_suit() {
        let mut game = fixture(
            2,
            card(Rank::Eight, Suit::Spades),
            &[&[card(Rank::Five, Suit::Hearts)], &[]],
        );
        game.declared_suit = Some(Suit::Hearts);

        assert!(validate_play(&game, "a", &[card(Rank::Five, Suit::Hearts)], None).is_ok());
    }

    #[test]
    fn test_eight_requires_declared_suit() {
        let top = card(Rank::Seven, Suit::Hearts);
        let hand = [card(Rank::Eight, Suit::Spades)];
        let game = fixture(2, top, &[&hand, &[]]);

        assert_eq!(
            validate_play(&game, "a", &hand, None).unwrap_err(),
            GameError::SuitNotDeclared
        );
        assert!(validate_play(&game, "a", &hand, Some(Suit::Clubs)).is_ok());
    }

    #[test]
    fn test_counter_table() {
        let ace_d = card(Rank::Ace, Suit::Diamonds);
        assert!(is_counter(&card(Rank::Ace, Suit::Clubs), &ace_d));
        assert!(is_counter(&card(Rank::Two, Suit::Diamonds), &ace_d));
        assert!(!is_counter(&card(Rank::Two, Suit::Clubs), &ace_d));

        let two_s = card(Rank::Two, Suit::Spades);
        assert!(is_counter(&card(Rank::Two, Suit::Hearts), &two_s));
        assert!(is_counter(&card(Rank::Ace, Suit::Spades), &two_s));
        assert!(!is_counter(&card(Rank::Ace, Suit::Hearts), &two_s));
        assert!(!is_counter(&card(Rank::Eight, Suit::Spades), &two_s));
    }

    #[test]
    fn test_mismatched_suit_counter_is_rejected_without_state_change() {
        let mut game = fixture(
            3,
            card(Rank::Ace, Suit::Diamonds),
            &[&[], &[card(Rank::Two, Suit::Clubs)], &[]],
        );
        game.draw_stack = 4;
        game.current_index = 1;

        let before_hand = game.hand("b").unwrap();
        assert_eq!(
            validate_play(&game, "b", &[card(Rank::Two, Suit::Clubs)], None).unwrap_err(),
            GameError::CounterRequired
        );
        assert_eq!(game.hand("b").unwrap(), before_hand);
        assert_eq!(game.draw_stack, 4);
    }

    #[test]
    fn test_rank_then_suit_stack_is_legal_when_tail_could_lead() {
        // Top 3H: [3H 4H 4C] chains rank, suit (4H could lead on 3H), rank.
        let top = card(Rank::Three, Suit::Hearts);
        let stack = [
            card(Rank::Three, Suit::Hearts),
            card(Rank::Four, Suit::Hearts),
            card(Rank::Four, Suit::Clubs),
        ];
        let game = fixture(4, top, &[&stack, &[], &[], &[]]);
        assert!(validate_play(&game, "a", &stack, None).is_ok());

        // [3H 4C] has no chain at all between the two cards.
        let broken = [
            card(Rank::Three, Suit::Hearts),
            card(Rank::Four, Suit::Clubs),
        ];
        let game = fixture(4, top, &[&broken, &[], &[], &[]]);
        assert_eq!(
            validate_play(&game, "a", &broken, None).unwrap_err(),
            GameError::StackInvalid(StackReason::RankMismatch)
        );
    }

    #[test]
    fn test_suit_continuation_needs_turn_control_or_fresh_lead() {
        // Top JC: JH rank-matches it, 5H continues by suit. Legal with two
        // players (pure Jack keeps the turn), illegal with four.
        let top = card(Rank::Jack, Suit::Clubs);
        let stack = [card(Rank::Jack, Suit::Hearts), card(Rank::Five, Suit::Hearts)];

        let game = fixture(2, top, &[&stack, &[]]);
        assert!(validate_play(&game, "a", &stack, None).is_ok());

        let game = fixture(4, top, &[&stack, &[], &[], &[]]);
        assert_eq!(
            validate_play(&game, "a", &stack, None).unwrap_err(),
            GameError::StackInvalid(StackReason::TurnControlBreak)
        );
    }

    #[test]
    fn test_draw_cards_and_eights_block_suit_continuation() {
        let top = card(Rank::Five, Suit::Hearts);

        // Ace of Hearts may not carry a plain heart on its back.
        let ace_tail = [card(Rank::Ace, Suit::Hearts), card(Rank::Nine, Suit::Hearts)];
        let game = fixture(2, top, &[&ace_tail, &[]]);
        assert_eq!(
            validate_play(&game, "a", &ace_tail, None).unwrap_err(),
            GameError::StackInvalid(StackReason::SuitRestrictedStacking)
        );

        // Same for an eight.
        let eight_tail = [
            card(Rank::Eight, Suit::Hearts),
            card(Rank::Nine, Suit::Hearts),
        ];
        let game = fixture(2, top, &[&eight_tail, &[]]);
        assert_eq!(
            validate_play(&game, "a", &eight_tail, Some(Suit::Hearts)).unwrap_err(),
            GameError::StackInvalid(StackReason::SuitRestrictedStacking)
        );

        // Cross-stacking Ace/2 demands one suit.
        let cross = [card(Rank::Ace, Suit::Hearts), card(Rank::Two, Suit::Spades)];
        let game = fixture(2, top, &[&cross, &[]]);
        assert_eq!(
            validate_play(&game, "a", &cross, None).unwrap_err(),
            GameError::StackInvalid(StackReason::SuitRestrictedStacking)
        );

        let cross_ok = [card(Rank::Ace, Suit::Hearts), card(Rank::Two, Suit::Hearts)];
        let game = fixture(2, top, &[&cross_ok, &[]]);
        assert!(validate_play(&game, "a", &cross_ok, None).is_ok());
    }
}
