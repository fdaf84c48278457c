//! Durable per-player statistics, keyed by participant id.

use std::fs;
use std::path::PathBuf;

use anyhow::{Context, Result};
use indexmap::IndexMap;
use serde::{Deserialize, Serialize};

use crate::ParticipantId;
use crate::duel::MatchSummary;

/// XP granted to a match winner. Ties award nothing.
pub const XP_REWARD: u64 = 20;

/// Aggregate record for one player. All counters only ever go up.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct PlayerStats {
    pub username: String,
    pub xp: u64,
    pub wins: u64,
    pub losses: u64,
    pub ties: u64,
    pub games: u64,
}

/// JSON-file-backed store of player records. Records materialize zeroed on
/// first reference; writes replace the file atomically so a failed save
/// never corrupts what was already durable.
#[derive(Debug)]
pub struct StatsStore {
    path: PathBuf,
    players: IndexMap<ParticipantId, PlayerStats>,
}

impl StatsStore {
    /// Open the store at `path`, reading existing records if the file is
    /// there and starting empty otherwise.
    pub fn load(path: impl Into<PathBuf>) -> Result<Self> {
        let path = path.into();
        let players = if path.exists() {
            let json = fs::read_to_string(&path)
                .with_context(|| format!("reading stats file {}", path.display()))?;
            let players = serde_json::from_str(&json)
                .with_context(|| format!("parsing stats file {}", path.display()))?;
            tracing::info!(path = %path.display(), "player stats loaded");
            players
        } else {
            tracing::info!(path = %path.display(), "no stats file yet, starting empty");
            IndexMap::new()
        };
        Ok(Self { path, players })
    }

    /// Persist all records: serialize to a sibling tmp file, then rename it
    /// over the target. A write failure leaves the old file intact.
    pub fn save(&self) -> Result<()> {
        let json = serde_json::to_string_pretty(&self.players)?;
        let tmp = self.path.with_extension("tmp");
        fs::write(&tmp, json).with_context(|| format!("writing {}", tmp.display()))?;
        fs::rename(&tmp, &self.path)
            .with_context(|| format!("replacing {}", self.path.display()))?;
        Ok(())
    }

    fn ensure_player(&mut self, id: ParticipantId, username: &str) -> &mut PlayerStats {
        self.players.entry(id).or_insert_with(|| PlayerStats {
            username: username.to_string(),
            ..PlayerStats::default()
        })
    }

    /// Apply one terminal match outcome. Both participants' `games` advance;
    /// a decisive result moves wins/losses and grants the winner
    /// [`XP_REWARD`]; a tie bumps both tie counters and awards nothing.
    ///
    /// Self-play duels list the same id in both slots, so that one record
    /// absorbs both sides of the result.
    pub fn record_result(&mut self, summary: &MatchSummary) {
        for p in &summary.participants {
            self.ensure_player(p.id, &p.name).games += 1;
        }
        if summary.is_tie {
            for p in &summary.participants {
                self.ensure_player(p.id, &p.name).ties += 1;
            }
            return;
        }
        if let (Some(winner), Some(loser)) = (&summary.winner, &summary.loser) {
            let record = self.ensure_player(winner.id, &winner.name);
            record.wins += 1;
            record.xp += XP_REWARD;
            self.ensure_player(loser.id, &loser.name).losses += 1;
        }
    }

    /// Look up a player's record, materializing a zeroed one if absent.
    pub fn stats(&mut self, id: ParticipantId, username: &str) -> &PlayerStats {
        self.ensure_player(id, username)
    }

    /// Read-only lookup; `None` if the player has never been referenced.
    pub fn get(&self, id: ParticipantId) -> Option<&PlayerStats> {
        self.players.get(&id)
    }

    pub fn len(&self) -> usize {
        self.players.len()
    }

    pub fn is_empty(&self) -> bool {
        self.players.is_empty()
    }
}
