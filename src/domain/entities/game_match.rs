//! Match aggregate - authoritative state of one game in progress.
//!
//! All rule services operate on this struct; public operations are
//! serialised per match by the session layer, so nothing here locks.

use std::collections::HashSet;

use rand_chacha::ChaCha8Rng;
use serde::{Deserialize, Serialize};

use crate::domain::entities::Player;
use crate::domain::errors::GameError;
use crate::domain::value_objects::{
    deck, Card, MatchSettings, MatchSnapshot, PlayerSnapshot, PreparationSnapshot, Rank, Suit,
};

pub const MIN_PLAYERS: usize = 2;
pub const MAX_PLAYERS: usize = 4;

/// Match lifecycle phase
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum MatchPhase {
    Waiting,
    Preparation,
    Playing,
    Finished,
}

impl MatchPhase {
    pub fn as_str(&self) -> &'static str {
        match self {
            MatchPhase::Waiting => "waiting",
            MatchPhase::Preparation => "preparation",
            MatchPhase::Playing => "playing",
            MatchPhase::Finished => "finished",
        }
    }
}

/// Turn rotation direction
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Direction {
    Forward,
    Backward,
}

impl Direction {
    pub fn step(&self) -> isize {
        match self {
            Direction::Forward => 1,
            Direction::Backward => -1,
        }
    }

    pub fn flipped(&self) -> Direction {
        match self {
            Direction::Forward => Direction::Backward,
            Direction::Backward => Direction::Forward,
        }
    }

    pub fn as_i8(&self) -> i8 {
        self.step() as i8
    }
}

/// Aggregate state of a match.
#[derive(Debug, Clone)]
pub struct GameMatch {
    pub id: String,
    pub creator_id: String,
    /// Original seating; owns the hands.
    pub players: Vec<Player>,
    /// Turn rotation: ids of non-eliminated, non-safe players in seating
    /// order. Turn arithmetic is modulo its length.
    pub active_order: Vec<String>,
    /// Top of pile = last element.
    pub draw_pile: Vec<Card>,
    /// Top of pile = last element; never empty while playing.
    pub discard_pile: Vec<Card>,
    pub current_index: usize,
    pub direction: Direction,
    /// Suit declared by a wild; cleared by the next non-wild resolution.
    pub declared_suit: Option<Suit>,
    /// Accumulated penalty the next player must pay or counter.
    pub draw_stack: u32,
    pub phase: MatchPhase,
    pub round_number: u32,
    /// Set after a voluntary draw until the player plays or passes.
    pub pending_pass: Option<String>,
    pub drew_this_turn: HashSet<String>,
    pub prep_votes: HashSet<String>,
    pub play_again_votes: HashSet<String>,
    pub settings: MatchSettings,
    /// Decks dealt into the current round, for conservation checks.
    pub decks_in_play: u32,
    pub(crate) rng: ChaCha8Rng,
}

impl GameMatch {
    /// Create a match in `waiting`. The first seat is the creator.
    pub fn new(
        id: String,
        seats: Vec<(String, String)>,
        settings: MatchSettings,
        seed: Option<u64>,
    ) -> Result<Self, GameError> {
        if seats.len() < MIN_PLAYERS || seats.len() > MAX_PLAYERS {
            return Err(GameError::InsufficientPlayers);
        }
        let mut ids = HashSet::new();
        for (pid, _) in &seats {
            if !ids.insert(pid.clone()) {
                return Err(GameError::InsufficientPlayers);
            }
        }

        let creator_id = seats[0].0.clone();
        let players: Vec<Player> = seats
            .into_iter()
            .map(|(pid, name)| Player::new(pid, name))
            .collect();

        Ok(Self {
            id,
            creator_id,
            players,
            active_order: Vec::new(),
            draw_pile: Vec::new(),
            discard_pile: Vec::new(),
            current_index: 0,
            direction: Direction::Forward,
            declared_suit: None,
            draw_stack: 0,
            phase: MatchPhase::Waiting,
            round_number: 1,
            pending_pass: None,
            drew_this_turn: HashSet::new(),
            prep_votes: HashSet::new(),
            play_again_votes: HashSet::new(),
            settings,
            decks_in_play: 0,
            rng: deck::match_rng(seed),
        })
    }

    // ========== Lookups ==========

    pub fn player(&self, player_id: &str) -> Option<&Player> {
        self.players.iter().find(|p| p.id == player_id)
    }

    pub fn player_mut(&mut self, player_id: &str) -> Option<&mut Player> {
        self.players.iter_mut().find(|p| p.id == player_id)
    }

    pub fn current_player_id(&self) -> Option<&str> {
        self.active_order.get(self.current_index).map(String::as_str)
    }

    pub fn current_player(&self) -> Option<&Player> {
        self.current_player_id()
            .and_then(|pid| self.players.iter().find(|p| p.id == pid))
    }

    pub fn active_count(&self) -> usize {
        self.active_order.len()
    }

    pub fn top_discard(&self) -> Option<Card> {
        self.discard_pile.last().copied()
    }

    /// The suit plays must match: the declared suit if a wild set one,
    /// otherwise the physical suit of the top discard.
    pub fn effective_suit(&self) -> Option<Suit> {
        self.declared_suit
            .or_else(|| self.top_discard().map(|c| c.suit))
    }

    /// Derived view of players who went safe this round.
    pub fn safe_this_round(&self) -> Vec<&Player> {
        self.players.iter().filter(|p| p.safe && !p.eliminated).collect()
    }

    /// Derived view of eliminated players.
    pub fn eliminated_players(&self) -> Vec<&Player> {
        self.players.iter().filter(|p| p.eliminated).collect()
    }

    pub fn connected_ids(&self) -> Vec<String> {
        self.players
            .iter()
            .filter(|p| p.connected)
            .map(|p| p.id.clone())
            .collect()
    }

    /// Flip the liveness hint. Nothing else changes on disconnect; the
    /// player stays seated and can reconnect.
    pub fn set_connected(&mut self, player_id: &str, connected: bool) -> Result<(), GameError> {
        let player = self.player_mut(player_id).ok_or(GameError::PlayerState)?;
        player.connected = connected;
        Ok(())
    }

    // ========== Playability ==========

    /// Whether a card could be led against the current top, ignoring any
    /// active draw stack. Eights always qualify.
    pub fn is_playable(&self, card: &Card) -> bool {
        if card.rank == Rank::Eight {
            return true;
        }
        let Some(top) = self.top_discard() else {
            return false;
        };
        card.rank == top.rank || Some(card.suit) == self.effective_suit()
    }

    pub fn has_playable_card(&self, player_id: &str) -> bool {
        self.player(player_id)
            .map(|p| p.hand.iter().any(|c| self.is_playable(c)))
            .unwrap_or(false)
    }

    // ========== Turn arithmetic ==========

    /// Index reached from `origin` after `steps` in the current direction.
    pub fn index_from(&self, origin: usize, steps: usize) -> usize {
        let len = self.active_order.len() as isize;
        debug_assert!(len > 0);
        let raw = origin as isize + self.direction.step() * steps as isize;
        (raw.rem_euclid(len)) as usize
    }

    /// Advance the turn by `steps` and clear the leaving player's
    /// turn-scoped state.
    pub fn advance_turn(&mut self, steps: usize) {
        if let Some(pid) = self.current_player_id().map(str::to_owned) {
            self.end_turn_state(&pid);
        }
        self.current_index = self.index_from(self.current_index, steps);
    }

    /// Clear the per-turn bookkeeping for a player (voluntary-draw flag and
    /// pending pass).
    pub fn end_turn_state(&mut self, player_id: &str) {
        self.drew_this_turn.remove(player_id);
        if self.pending_pass.as_deref() == Some(player_id) {
            self.pending_pass = None;
        }
    }

    /// Rebuild the rotation from seating order: everyone still in the
    /// tournament who has not gone safe.
    pub fn rebuild_active_order(&mut self) {
        self.active_order = self
            .players
            .iter()
            .filter(|p| !p.eliminated && !p.safe)
            .map(|p| p.id.clone())
            .collect();
    }

    /// Drop one player from the rotation, keeping `current_index` pointing
    /// at the same seat where possible.
    pub fn remove_from_rotation(&mut self, player_id: &str) {
        if let Some(pos) = self.active_order.iter().position(|id| id == player_id) {
            self.active_order.remove(pos);
            if pos < self.current_index && self.current_index > 0 {
                self.current_index -= 1;
            }
            if !self.active_order.is_empty() {
                self.current_index %= self.active_order.len();
            } else {
                self.current_index = 0;
            }
        }
    }

    // ========== Piles ==========

    /// Cards obtainable without injecting a fresh deck: the draw pile plus
    /// the discard pile minus its protected top.
    pub fn available_without_injection(&self) -> usize {
        self.draw_pile.len() + self.discard_pile.len().saturating_sub(1)
    }

    /// Pop the top of the draw pile, reshuffling the discard pile (minus its
    /// top) first and injecting a fresh deck as a last resort.
    pub fn draw_one(&mut self) -> Result<Card, GameError> {
        if self.draw_pile.is_empty() {
            self.reshuffle_discard_into_draw();
        }
        if self.draw_pile.is_empty() {
            self.inject_fresh_deck();
        }
        self.draw_pile.pop().ok_or(GameError::DeckExhausted)
    }

    /// Shuffle everything but the top discard back under the draw pile.
    pub fn reshuffle_discard_into_draw(&mut self) {
        if self.discard_pile.len() <= 1 {
            return;
        }
        let top = self.discard_pile.pop();
        let mut recycled: Vec<Card> = self.discard_pile.drain(..).collect();
        if let Some(top) = top {
            self.discard_pile.push(top);
        }
        use rand::seq::SliceRandom;
        recycled.shuffle(&mut self.rng);
        self.draw_pile.append(&mut recycled);
    }

    /// Shuffle a brand-new 52-card deck under the draw pile.
    pub fn inject_fresh_deck(&mut self) {
        let mut fresh = deck::shuffled_deck(&mut self.rng);
        self.draw_pile.append(&mut fresh);
        self.decks_in_play += 1;
    }

    /// Total cards across both piles and every hand; must equal
    /// `52 * decks_in_play` after every public operation.
    pub fn total_cards(&self) -> usize {
        self.draw_pile.len()
            + self.discard_pile.len()
            + self.players.iter().map(|p| p.hand.len()).sum::<usize>()
    }

    // ========== Snapshot ==========

    pub fn snapshot(&self) -> MatchSnapshot {
        let current_id = self.current_player_id().map(str::to_owned);
        let current_name = self.current_player().map(|p| p.name.clone());
        let mut drew: Vec<String> = self.drew_this_turn.iter().cloned().collect();
        drew.sort();

        let players = self
            .players
            .iter()
            .map(|p| PlayerSnapshot {
                id: p.id.clone(),
                name: p.name.clone(),
                hand_size: p.hand.len(),
                is_safe: p.safe,
                is_eliminated: p.eliminated,
                is_connected: p.connected,
                is_current: current_id.as_deref() == Some(p.id.as_str()),
            })
            .collect();

        let preparation = (self.phase == MatchPhase::Preparation).then(|| {
            let total_connected = self.players.iter().filter(|p| p.connected).count();
            let mut voted: Vec<String> = self.prep_votes.iter().cloned().collect();
            voted.sort();
            PreparationSnapshot {
                votes: self.prep_votes.len(),
                total_connected,
                voted_player_ids: voted,
                can_skip: total_connected > 0,
            }
        });

        MatchSnapshot {
            match_id: self.id.clone(),
            phase: self.phase.as_str().to_string(),
            round_number: self.round_number,
            current_player_id: current_id,
            current_player_name: current_name,
            top_discard: self.top_discard().map(|c| c.to_string()),
            declared_suit: self.declared_suit,
            direction: self.direction.as_i8(),
            draw_stack: self.draw_stack,
            pending_pass_player_id: self.pending_pass.clone(),
            drew_this_turn: drew,
            draw_pile_size: self.draw_pile.len(),
            discard_pile_size: self.discard_pile.len(),
            players,
            preparation,
        }
    }

    /// Hand view for one player, in insertion order.
    pub fn hand(&self, player_id: &str) -> Result<Vec<Card>, GameError> {
        self.player(player_id)
            .map(|p| p.hand.to_vec())
            .ok_or(GameError::PlayerState)
    }
}
