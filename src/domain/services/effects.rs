//! Effect resolution for card stacks.
//!
//! A stack is folded once into a `StackEffect`, and `resolve` turns that into
//! a single final rotation delta. Turn-control simulation for stack prefixes
//! reuses the same resolution, so the validator and the applier can never
//! disagree.

use crate::domain::value_objects::{Card, CardEffect, Rank};

/// Aggregate effect of an ordered card stack.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct StackEffect {
    pub skips: u32,
    pub reverses: u32,
    pub draw_add: u32,
    pub wild: bool,
    pub all_jacks: bool,
    /// Effect of the final card, which decides whether the stack can keep
    /// the turn at all.
    pub last: CardEffect,
}

/// Fold a non-empty stack into its aggregate effect.
pub fn stack_effect(cards: &[Card]) -> StackEffect {
    debug_assert!(!cards.is_empty());
    let mut effect = StackEffect {
        skips: 0,
        reverses: 0,
        draw_add: 0,
        wild: false,
        all_jacks: true,
        last: CardEffect::Normal,
    };
    for card in cards {
        match card.effect() {
            CardEffect::Skip => effect.skips += 1,
            CardEffect::Reverse => effect.reverses += 1,
            CardEffect::Draw(n) => effect.draw_add += n as u32,
            CardEffect::Wild => effect.wild = true,
            CardEffect::Normal => {}
        }
        if card.rank != Rank::Jack {
            effect.all_jacks = false;
        }
    }
    effect.last = cards[cards.len() - 1].effect();
    effect
}

/// Net rotation outcome of a fully-played stack.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Resolution {
    /// Odd number of Queens flips the direction before stepping.
    pub flip_direction: bool,
    /// Positions to advance from the originator in the (possibly flipped)
    /// direction; 0 means the originator keeps the turn.
    pub steps: usize,
}

/// Compute the final rotation delta for a stack among `active_count`
/// players.
///
/// Two players: a pure-Jack stack always keeps the turn; otherwise a stack
/// ending in Jack or Queen keeps it iff Jack and Queen counts have equal
/// parity. Three or more: Jacks advance by skips + 1, anything else by one
/// step. A stack ending on a draw card never keeps the turn: the penalty
/// always lands on the next player.
pub fn resolve(cards: &[Card], active_count: usize) -> Resolution {
    debug_assert!(active_count >= 2);
    let effect = stack_effect(cards);
    let flip_direction = effect.reverses % 2 == 1;
    let ends_with_rotation = matches!(effect.last, CardEffect::Skip | CardEffect::Reverse);

    let mut steps = if active_count == 2 {
        if effect.all_jacks {
            0
        } else if ends_with_rotation && effect.skips % 2 == effect.reverses % 2 {
            0
        } else {
            1
        }
    } else if effect.skips > 0 {
        (effect.skips as usize + 1) % active_count
    } else {
        1
    };

    if matches!(effect.last, CardEffect::Draw(_)) && steps == 0 {
        steps = 1;
    }

    Resolution {
        flip_direction,
        steps,
    }
}

/// Whether the originator still holds the turn after playing `prefix`.
/// Used by the validator to judge suit-only transitions inside a stack.
pub fn keeps_turn(prefix: &[Card], active_count: usize) -> bool {
    resolve(prefix, active_count).steps == 0
}
