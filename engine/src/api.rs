//! Scripted duels: drive the whole state machine from a declarative move
//! list, producing a text log and the terminal summary.

use anyhow::{Context, Result, bail};
use serde::{Deserialize, Serialize};

use crate::duel::{Duel, MatchSummary, RoundOutcome, Slot, WIN_THRESHOLD};
use crate::{Move, Participant};

#[derive(Debug, Clone, Deserialize)]
pub struct ScriptPlayer {
    pub id: u64,
    pub name: String,
}

/// Declarative duel: two named players and one `[a, b]` move pair per round,
/// in order. Rounds past the match's natural end are ignored.
#[derive(Debug, Clone, Deserialize)]
pub struct DuelScript {
    pub player_a: ScriptPlayer,
    pub player_b: ScriptPlayer,
    pub rounds: Vec<[Move; 2]>,
    /// Round wins needed to take the match; defaults to best-of-three.
    #[serde(default)]
    pub win_threshold: Option<u8>,
}

#[derive(Debug, Clone, Serialize)]
pub struct DuelReport {
    pub winner: Option<String>,
    pub loser: Option<String>,
    pub rounds: u32,
    pub beat_counts: [u8; 2],
    pub summary: MatchSummary,
    pub log: Vec<String>,
}

/// Run a duel to its terminal state from a script. Errors if the move list
/// runs out before the match is decided.
pub fn run_scripted_duel(script: &DuelScript) -> Result<DuelReport> {
    if script.rounds.is_empty() {
        bail!("script has no rounds");
    }
    let threshold = script.win_threshold.unwrap_or(WIN_THRESHOLD);
    let mut duel = Duel::with_threshold(
        Participant::new(script.player_a.id, &script.player_a.name),
        Participant::new(script.player_b.id, &script.player_b.name),
        threshold,
    );

    let mut log = Vec::new();
    log.push(format!(
        "[START] {} vs {} (first to {})",
        duel.participant(Slot::A).name,
        duel.participant(Slot::B).name,
        duel.win_threshold(),
    ));

    for (i, pair) in script.rounds.iter().enumerate() {
        if i > 0 {
            duel.begin_next_round()
                .context("script continues past a completed match")?;
        }
        log.push(format!("[ROUND] {}", duel.round()));
        for (slot, mv) in [(Slot::A, pair[0]), (Slot::B, pair[1])] {
            duel.submit_move(slot, mv)?;
            log.push(format!(
                "[MOVE] {} locks in {}",
                duel.participant(slot).name,
                mv
            ));
        }
        match duel.resolve_round()? {
            RoundOutcome::Tie(mv) => {
                log.push(format!("[RESULT] both play {mv}; tie, no beats scored"));
            }
            RoundOutcome::Win {
                winner,
                loser,
                winner_move,
                loser_move,
            } => {
                log.push(format!(
                    "[RESULT] {} plays {} and beats {}'s {}",
                    duel.participant(winner).name,
                    winner_move,
                    duel.participant(loser).name,
                    loser_move,
                ));
                log.push(format!(
                    "[SCORE] {} {} – {} {}",
                    duel.participant(Slot::A).name,
                    duel.beat_count(Slot::A),
                    duel.participant(Slot::B).name,
                    duel.beat_count(Slot::B),
                ));
            }
        }
        if duel.is_match_complete() || duel.win_threshold() == 1 {
            break;
        }
    }

    let summary = duel.summary().map_err(|_| {
        anyhow::anyhow!(
            "script exhausted after {} round(s) without a decisive result",
            duel.round()
        )
    })?;
    match &summary.winner {
        Some(winner) => log.push(format!("[MATCH] {} wins the duel", winner.name)),
        None => log.push("[MATCH] tie, no XP earned".to_string()),
    }

    Ok(DuelReport {
        winner: summary.winner.as_ref().map(|p| p.name.clone()),
        loser: summary.loser.as_ref().map(|p| p.name.clone()),
        rounds: duel.round(),
        beat_counts: [duel.beat_count(Slot::A), duel.beat_count(Slot::B)],
        summary,
        log,
    })
}
