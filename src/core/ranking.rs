use crate::core::tv_rating::ScoreResult;
use crate::domain::model::same_name;
use std::cmp::Ordering;
use std::collections::HashMap;

/// Number of wrestlers that count as "star power".
pub const STAR_POWER_SLOTS: usize = 5;

/// Aggregated win/loss record of one wrestler.
#[derive(Debug, Clone, PartialEq)]
pub struct WrestlerRecord {
    pub name: String,
    pub wins: u32,
    pub losses: u32,
}

impl WrestlerRecord {
    pub fn new(name: impl Into<String>, wins: u32, losses: u32) -> Self {
        Self {
            name: name.into(),
            wins,
            losses,
        }
    }

    pub fn matches(&self) -> u32 {
        self.wins + self.losses
    }

    /// Fraction in [0, 1]; `None` without matches.
    pub fn win_rate(&self) -> Option<f64> {
        match self.matches() {
            0 => None,
            total => Some(self.wins as f64 / total as f64),
        }
    }

    /// winRate(%) × 0.7 + min(matches, 20) × 1.5
    pub fn individual_score(&self) -> f64 {
        let win_rate_pct = self.win_rate().unwrap_or(0.0) * 100.0;
        win_rate_pct * 0.7 + self.matches().min(20) as f64 * 1.5
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct RankedWrestler {
    pub rank: usize,
    pub record: WrestlerRecord,
    pub score: f64,
}

/// Every tracked wrestler ordered by individual score, plus a by-name lookup
/// of their records. Wrestlers without a match are looked up but not ranked.
#[derive(Debug, Clone, Default)]
pub struct WrestlerRanking {
    ranked: Vec<RankedWrestler>,
    records: HashMap<String, WrestlerRecord>,
}

impl WrestlerRanking {
    pub fn compute(all_wrestlers: &[WrestlerRecord]) -> Self {
        let records: HashMap<String, WrestlerRecord> = all_wrestlers
            .iter()
            .map(|record| (record.name.to_lowercase(), record.clone()))
            .collect();

        let mut scored: Vec<(f64, &WrestlerRecord)> = records
            .values()
            .filter(|record| record.matches() > 0)
            .map(|record| (record.individual_score(), record))
            .collect();

        // 同分時依名字排序，保持結果穩定
        scored.sort_by(|(score_a, a), (score_b, b)| {
            score_b
                .partial_cmp(score_a)
                .unwrap_or(Ordering::Equal)
                .then_with(|| a.name.to_lowercase().cmp(&b.name.to_lowercase()))
        });

        let ranked = scored
            .into_iter()
            .enumerate()
            .map(|(idx, (score, record))| RankedWrestler {
                rank: idx + 1,
                record: record.clone(),
                score,
            })
            .collect();

        Self { ranked, records }
    }

    pub fn ranked(&self) -> &[RankedWrestler] {
        &self.ranked
    }

    pub fn top(&self, n: usize) -> &[RankedWrestler] {
        &self.ranked[..n.min(self.ranked.len())]
    }

    pub fn is_star(&self, name: &str) -> bool {
        self.top(STAR_POWER_SLOTS)
            .iter()
            .any(|entry| same_name(&entry.record.name, name))
    }

    pub fn record(&self, name: &str) -> Option<&WrestlerRecord> {
        self.records.get(&name.to_lowercase())
    }

    pub fn win_rate(&self, name: &str) -> Option<f64> {
        self.record(name).and_then(WrestlerRecord::win_rate)
    }
}

/// Splits ranking out of the scorer so it never reaches across promotions itself.
pub fn compute_global_wrestler_ranking(all_wrestlers: &[WrestlerRecord]) -> WrestlerRanking {
    WrestlerRanking::compute(all_wrestlers)
}

#[derive(Debug, Clone, PartialEq)]
pub struct RankedPromotion {
    pub rank: usize,
    pub federation_name: String,
    pub owner_id: String,
    pub result: ScoreResult,
}

/// Orders promotions by TV rating, highest first; ties break on name.
pub fn rank_promotions(entries: Vec<(String, String, ScoreResult)>) -> Vec<RankedPromotion> {
    let mut entries = entries;
    entries.sort_by(|(name_a, _, a), (name_b, _, b)| {
        b.value
            .partial_cmp(&a.value)
            .unwrap_or(Ordering::Equal)
            .then_with(|| name_a.to_lowercase().cmp(&name_b.to_lowercase()))
    });

    entries
        .into_iter()
        .enumerate()
        .map(|(idx, (federation_name, owner_id, result))| RankedPromotion {
            rank: idx + 1,
            federation_name,
            owner_id,
            result,
        })
        .collect()
}
