//! Duel state machine: slot-keyed move submission, memoized round
//! resolution, and best-of-N progression.

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::{Move, Participant};

/// Round wins needed to take a match (best-of-three).
pub const WIN_THRESHOLD: u8 = 2;

/// Positional identity within a duel. Per-round state is keyed by slot,
/// never by participant id, so one player may occupy both slots.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Slot {
    A,
    B,
}

impl Slot {
    pub fn index(self) -> usize {
        match self {
            Slot::A => 0,
            Slot::B => 1,
        }
    }

    pub fn other(self) -> Slot {
        match self {
            Slot::A => Slot::B,
            Slot::B => Slot::A,
        }
    }
}

/// Contract violations surfaced to the caller. None of these are retried;
/// a well-behaved transport layer never produces `MatchComplete` or
/// `RoundIncomplete`, while `DuplicateSubmission` covers an ordinary
/// double-click and leaves the recorded move untouched.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum DuelError {
    #[error("match is already complete")]
    MatchComplete,
    #[error("slot {} already locked in a move this round", .0.index())]
    DuplicateSubmission(Slot),
    #[error("round is not complete")]
    RoundIncomplete,
}

/// Result of resolving one round.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RoundOutcome {
    /// Both slots threw the same move; beat counters are untouched.
    Tie(Move),
    Win {
        winner: Slot,
        loser: Slot,
        winner_move: Move,
        loser_move: Move,
    },
}

impl RoundOutcome {
    pub fn is_tie(&self) -> bool {
        matches!(self, RoundOutcome::Tie(_))
    }

    pub fn winner(&self) -> Option<Slot> {
        match self {
            RoundOutcome::Tie(_) => None,
            RoundOutcome::Win { winner, .. } => Some(*winner),
        }
    }

    pub fn loser(&self) -> Option<Slot> {
        match self {
            RoundOutcome::Tie(_) => None,
            RoundOutcome::Win { loser, .. } => Some(*loser),
        }
    }
}

/// Terminal outcome of a duel, shaped for the stats store. Winner and loser
/// are the originally bound participants of the winning/losing slots.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MatchSummary {
    pub participants: [Participant; 2],
    pub is_tie: bool,
    pub winner: Option<Participant>,
    pub loser: Option<Participant>,
}

/// One duel between two participant slots.
///
/// Lifecycle: moves are submitted per slot, `resolve_round` settles the
/// round (scoring the winner's beat counter exactly once), and
/// `begin_next_round` clears the board until some slot reaches the win
/// threshold. After that every mutation is rejected; only queries remain.
#[derive(Debug, Clone)]
pub struct Duel {
    participants: [Participant; 2],
    moves: [Option<Move>; 2],
    beat_counts: [u8; 2],
    round: u32,
    outcome: Option<RoundOutcome>,
    win_threshold: u8,
}

impl Duel {
    /// Best-of-three duel between `a` (slot A) and `b` (slot B).
    pub fn new(a: Participant, b: Participant) -> Self {
        Self::with_threshold(a, b, WIN_THRESHOLD)
    }

    /// `threshold` round wins take the match; 1 gives the single-round
    /// variant.
    pub fn with_threshold(a: Participant, b: Participant, threshold: u8) -> Self {
        Self {
            participants: [a, b],
            moves: [None; 2],
            beat_counts: [0; 2],
            round: 1,
            outcome: None,
            win_threshold: threshold.max(1),
        }
    }

    pub fn participant(&self, slot: Slot) -> &Participant {
        &self.participants[slot.index()]
    }

    /// Current round number, starting at 1.
    pub fn round(&self) -> u32 {
        self.round
    }

    /// Rounds the slot has won this match.
    pub fn beat_count(&self, slot: Slot) -> u8 {
        self.beat_counts[slot.index()]
    }

    /// The slot's locked-in move for the current round, if any.
    pub fn move_of(&self, slot: Slot) -> Option<Move> {
        self.moves[slot.index()]
    }

    pub fn win_threshold(&self) -> u8 {
        self.win_threshold
    }

    /// Lock in a move for a slot. Only the first submission per slot per
    /// round is accepted; a repeat fails without altering the stored move.
    pub fn submit_move(&mut self, slot: Slot, mv: Move) -> Result<(), DuelError> {
        if self.is_match_complete() {
            return Err(DuelError::MatchComplete);
        }
        if self.moves[slot.index()].is_some() {
            return Err(DuelError::DuplicateSubmission(slot));
        }
        self.moves[slot.index()] = Some(mv);
        Ok(())
    }

    pub fn is_round_complete(&self) -> bool {
        self.moves.iter().all(Option::is_some)
    }

    /// Settle the current round. The outcome is memoized: repeated calls
    /// return the same value and the winner's beat counter moves exactly
    /// once per round.
    pub fn resolve_round(&mut self) -> Result<RoundOutcome, DuelError> {
        if let Some(outcome) = self.outcome {
            return Ok(outcome);
        }
        let (a, b) = match (self.moves[0], self.moves[1]) {
            (Some(a), Some(b)) => (a, b),
            _ => return Err(DuelError::RoundIncomplete),
        };
        let outcome = if a == b {
            RoundOutcome::Tie(a)
        } else {
            let (winner, winner_move, loser_move) = if a.beats(b) {
                (Slot::A, a, b)
            } else {
                (Slot::B, b, a)
            };
            self.beat_counts[winner.index()] += 1;
            RoundOutcome::Win {
                winner,
                loser: winner.other(),
                winner_move,
                loser_move,
            }
        };
        self.outcome = Some(outcome);
        Ok(outcome)
    }

    /// True once some slot's beat count reaches the win threshold. No
    /// further mutation is accepted past this point.
    pub fn is_match_complete(&self) -> bool {
        self.beat_counts.iter().any(|&c| c >= self.win_threshold)
    }

    /// Clear both slots' moves and the round's memoized outcome, keeping
    /// beat counters. Safe to call even if the round was never resolved.
    pub fn begin_next_round(&mut self) -> Result<(), DuelError> {
        if self.is_match_complete() {
            return Err(DuelError::MatchComplete);
        }
        self.moves = [None; 2];
        self.outcome = None;
        self.round += 1;
        Ok(())
    }

    /// Winner of the current round, once resolved decisively.
    pub fn round_winner(&self) -> Option<Slot> {
        self.outcome.and_then(|o| o.winner())
    }

    pub fn round_loser(&self) -> Option<Slot> {
        self.outcome.and_then(|o| o.loser())
    }

    /// Slot that took the match, once complete.
    pub fn match_winner(&self) -> Option<Slot> {
        [Slot::A, Slot::B]
            .into_iter()
            .find(|s| self.beat_counts[s.index()] >= self.win_threshold)
    }

    pub fn match_loser(&self) -> Option<Slot> {
        self.match_winner().map(Slot::other)
    }

    /// Terminal summary for the stats store. Valid once the match is
    /// complete, or once the only round of a threshold-1 duel resolves in a
    /// tie (the one way a duel ends without a winner).
    pub fn summary(&self) -> Result<MatchSummary, DuelError> {
        if let Some(winner) = self.match_winner() {
            return Ok(MatchSummary {
                participants: self.participants.clone(),
                is_tie: false,
                winner: Some(self.participants[winner.index()].clone()),
                loser: Some(self.participants[winner.other().index()].clone()),
            });
        }
        match self.outcome {
            Some(RoundOutcome::Tie(_)) if self.win_threshold == 1 => Ok(MatchSummary {
                participants: self.participants.clone(),
                is_tie: true,
                winner: None,
                loser: None,
            }),
            _ => Err(DuelError::RoundIncomplete),
        }
    }
}
