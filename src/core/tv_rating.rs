//! TV Rating: a promotion's overall "watchability" on a 0–10 scale.
//!
//! Five independently capped sub-scores are summed and clamped:
//!
//! | component             | max |
//! |-----------------------|-----|
//! | event quality         | 4.0 |
//! | roster quality        | 3.0 |
//! | championship prestige | 1.5 |
//! | momentum              | 1.0 |
//! | engagement            | 0.5 |
//!
//! The scorer is pure: callers hand in a materialized [`ScoringInput`], the
//! precomputed [`WrestlerRanking`] and an explicit `now`.

use crate::core::ranking::{WrestlerRanking, WrestlerRecord};
use crate::domain::model::{same_name, team_members, ShowKind};
use crate::utils::error::{BookingError, Result};
use crate::utils::validation::{validate_range, Validate};
use chrono::{DateTime, Utc};

pub const MAX_SCORE: f64 = 10.0;

pub const EVENT_QUALITY_CAP: f64 = 4.0;
pub const ROSTER_QUALITY_CAP: f64 = 3.0;
pub const CHAMPIONSHIP_CAP: f64 = 1.5;
pub const MOMENTUM_CAP: f64 = 1.0;
pub const ENGAGEMENT_CAP: f64 = 0.5;

const SECONDS_PER_DAY: f64 = 86_400.0;

const REGULARITY_WINDOW_DAYS: f64 = 30.0;
const REGULARITY_MIN_EVENTS: usize = 4;
const REGULARITY_BONUS: f64 = 0.3;
const INACTIVITY_GRACE_WEEKS: f64 = 2.0;
const INACTIVITY_PENALTY_PER_WEEK: f64 = 0.5;

const SMALL_ROSTER: usize = 8;
const LARGE_ROSTER: usize = 50;
const STAR_POWER_BONUS: f64 = 0.24;

const DOMINANT_WIN_RATE: f64 = 0.7;
const VACANCY_GRACE_DAYS: f64 = 14.0;
const VACANCY_PENALTY: f64 = 0.3;

const MOMENTUM_WINDOW: usize = 3;
const RECENCY_WINDOW_DAYS: f64 = 7.0;
const RECENCY_BONUS: f64 = 0.2;

const OPTIMAL_VOTES_PER_EVENT: f64 = 5.0;

/// A finalized show as seen by the scorer.
#[derive(Debug, Clone, PartialEq)]
pub struct RatedEvent {
    pub rating: f64,
    pub occurred_at: DateTime<Utc>,
    pub kind: ShowKind,
    pub vote_count: u32,
}

#[derive(Debug, Clone, PartialEq)]
pub struct TitleReign {
    pub champion_name: String,
    pub won_at: DateTime<Utc>,
    pub lost_at: Option<DateTime<Utc>>,
    pub defense_count: u32,
}

impl TitleReign {
    pub fn is_open(&self) -> bool {
        self.lost_at.is_none()
    }
}

/// Reign history of one belt.
#[derive(Debug, Clone, PartialEq)]
pub struct BeltHistory {
    pub belt_name: String,
    pub reigns: Vec<TitleReign>,
}

impl BeltHistory {
    /// The open reign if there is one, otherwise the latest won.
    pub fn most_recent_reign(&self) -> Option<&TitleReign> {
        self.reigns
            .iter()
            .find(|reign| reign.is_open())
            .or_else(|| self.reigns.iter().max_by_key(|reign| reign.won_at))
    }
}

/// One promotion's snapshot.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ScoringInput {
    pub events: Vec<RatedEvent>,
    pub roster: Vec<WrestlerRecord>,
    pub belts: Vec<BeltHistory>,
}

impl Validate for ScoringInput {
    fn validate(&self) -> Result<()> {
        for event in &self.events {
            validate_range("event.rating", event.rating, 0.0, 5.0)?;
        }

        for (idx, entry) in self.roster.iter().enumerate() {
            if self.roster[..idx]
                .iter()
                .any(|other| same_name(&other.name, &entry.name))
            {
                return Err(BookingError::ValidationError {
                    message: format!("duplicate roster entry: {}", entry.name),
                });
            }
        }

        for belt in &self.belts {
            let open = belt.reigns.iter().filter(|reign| reign.is_open()).count();
            if open > 1 {
                return Err(BookingError::ValidationError {
                    message: format!("belt '{}' has {} open reigns", belt.belt_name, open),
                });
            }
        }

        Ok(())
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Grade {
    OnFire,
    PrimeTime,
    Solid,
    Struggling,
    InCrisis,
}

impl Grade {
    pub fn from_value(value: f64) -> Self {
        if value >= 9.0 {
            Grade::OnFire
        } else if value >= 7.5 {
            Grade::PrimeTime
        } else if value >= 6.0 {
            Grade::Solid
        } else if value >= 4.5 {
            Grade::Struggling
        } else {
            Grade::InCrisis
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            Grade::OnFire => "on fire",
            Grade::PrimeTime => "prime time",
            Grade::Solid => "solid",
            Grade::Struggling => "struggling",
            Grade::InCrisis => "in crisis",
        }
    }

    pub fn emoji(&self) -> &'static str {
        match self {
            Grade::OnFire => "🔥",
            Grade::PrimeTime => "📺",
            Grade::Solid => "👍",
            Grade::Struggling => "📉",
            Grade::InCrisis => "🚨",
        }
    }
}

impl std::fmt::Display for Grade {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.label())
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct ScoreBreakdown {
    pub event_quality: f64,
    pub roster_quality: f64,
    pub championship_prestige: f64,
    pub momentum: f64,
    pub engagement: f64,
}

impl ScoreBreakdown {
    pub fn total(&self) -> f64 {
        self.event_quality
            + self.roster_quality
            + self.championship_prestige
            + self.momentum
            + self.engagement
    }
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ScoreResult {
    pub value: f64,
    pub grade: Grade,
    pub breakdown: ScoreBreakdown,
}

pub fn compute_tv_rating(
    input: &ScoringInput,
    ranking: &WrestlerRanking,
    now: DateTime<Utc>,
) -> ScoreResult {
    debug_assert!(
        input.validate().is_ok(),
        "scoring input violates its contract: {:?}",
        input.validate().err()
    );

    let breakdown = ScoreBreakdown {
        event_quality: event_quality(&input.events, now),
        roster_quality: roster_quality(&input.roster, ranking),
        championship_prestige: championship_prestige(&input.belts, ranking, now),
        momentum: momentum(&input.events, now),
        engagement: engagement(&input.events),
    };

    let value = breakdown.total().clamp(0.0, MAX_SCORE);

    ScoreResult {
        value,
        grade: Grade::from_value(value),
        breakdown,
    }
}

fn days_between(earlier: DateTime<Utc>, later: DateTime<Utc>) -> f64 {
    (later - earlier).num_milliseconds() as f64 / 1000.0 / SECONDS_PER_DAY
}

fn kind_weight(kind: ShowKind) -> f64 {
    match kind {
        ShowKind::Ordinary => 1.0,
        ShowKind::Premium => 2.0,
    }
}

fn ordinary_events(events: &[RatedEvent]) -> Vec<&RatedEvent> {
    events
        .iter()
        .filter(|event| event.kind == ShowKind::Ordinary)
        .collect()
}

pub fn event_quality(events: &[RatedEvent], now: DateTime<Utc>) -> f64 {
    let Some(last_event) = events.iter().map(|event| event.occurred_at).max() else {
        return 0.0;
    };

    let (weighted_sum, total_weight) = events.iter().fold((0.0, 0.0), |(sum, weight), event| {
        let w = kind_weight(event.kind);
        (sum + event.rating * w, weight + w)
    });
    let average = weighted_sum / total_weight;
    let mut score = (average / 5.0) * 3.5;

    let recent = events
        .iter()
        .filter(|event| days_between(event.occurred_at, now) <= REGULARITY_WINDOW_DAYS)
        .count();
    if recent >= REGULARITY_MIN_EVENTS {
        score += REGULARITY_BONUS;
    }

    let days_since_last = days_between(last_event, now);
    if days_since_last > INACTIVITY_GRACE_WEEKS * 7.0 {
        let idle_weeks = (days_since_last / 7.0 - INACTIVITY_GRACE_WEEKS).floor();
        if idle_weeks > 0.0 {
            score -= idle_weeks * INACTIVITY_PENALTY_PER_WEEK;
        }
    }

    score.clamp(0.0, EVENT_QUALITY_CAP)
}

pub fn roster_quality(roster: &[WrestlerRecord], ranking: &WrestlerRanking) -> f64 {
    // 沒有比賽紀錄的選手只算進陣容人數
    let qualifying: Vec<&WrestlerRecord> = roster.iter().filter(|r| r.matches() > 0).collect();
    if qualifying.is_empty() {
        return 0.0;
    }

    let wins: u32 = qualifying.iter().map(|r| r.wins).sum();
    let matches: u32 = qualifying.iter().map(|r| r.matches()).sum();
    let win_rate_part = wins as f64 / matches as f64 * 1.8;

    let stars = qualifying
        .iter()
        .filter(|r| ranking.is_star(&r.name))
        .count();
    let star_part = stars as f64 * STAR_POWER_BONUS;

    let size_factor = if roster.len() < SMALL_ROSTER {
        0.7
    } else if roster.len() > LARGE_ROSTER {
        0.8
    } else {
        1.0
    };

    ((win_rate_part + star_part) * size_factor).clamp(0.0, ROSTER_QUALITY_CAP)
}

fn reign_score(reign: &TitleReign, ranking: &WrestlerRanking, now: DateTime<Utc>) -> f64 {
    let age_days = days_between(reign.won_at, now);
    let mut score = if age_days < 30.0 {
        0.3
    } else if age_days < 90.0 {
        0.6
    } else {
        1.0
    };

    score += (reign.defense_count as f64 * 0.1).min(0.5);

    // Tag teams split the dominance bonus evenly between members.
    let members = team_members(&reign.champion_name);
    if !members.is_empty() {
        let dominant = members
            .iter()
            .filter(|member| {
                ranking
                    .win_rate(member)
                    .is_some_and(|rate| rate >= DOMINANT_WIN_RATE)
            })
            .count();
        score += 0.3 * dominant as f64 / members.len() as f64;
    }

    score
}

pub fn championship_prestige(
    belts: &[BeltHistory],
    ranking: &WrestlerRanking,
    now: DateTime<Utc>,
) -> f64 {
    let open_reigns: Vec<&TitleReign> = belts
        .iter()
        .flat_map(|belt| belt.reigns.iter().filter(|reign| reign.is_open()))
        .collect();

    let base = if open_reigns.is_empty() {
        0.0
    } else {
        open_reigns
            .iter()
            .map(|reign| reign_score(reign, ranking, now))
            .sum::<f64>()
            / open_reigns.len() as f64
    };

    let long_vacancies = belts
        .iter()
        .filter(|belt| match belt.most_recent_reign().and_then(|r| r.lost_at) {
            Some(lost_at) => days_between(lost_at, now) > VACANCY_GRACE_DAYS,
            None => false,
        })
        .count();

    (base - long_vacancies as f64 * VACANCY_PENALTY).clamp(0.0, CHAMPIONSHIP_CAP)
}

fn mean_rating(events: &[&RatedEvent]) -> f64 {
    events.iter().map(|event| event.rating).sum::<f64>() / events.len() as f64
}

pub fn momentum(events: &[RatedEvent], now: DateTime<Utc>) -> f64 {
    let mut ordinary = ordinary_events(events);
    ordinary.sort_by(|a, b| b.occurred_at.cmp(&a.occurred_at));

    let mut score = 0.0;

    if ordinary.len() >= MOMENTUM_WINDOW * 2 {
        let latest = mean_rating(&ordinary[..MOMENTUM_WINDOW]);
        let previous = mean_rating(&ordinary[MOMENTUM_WINDOW..MOMENTUM_WINDOW * 2]);
        score += (latest - previous).clamp(-0.5, 0.5);
    }

    if let Some(most_recent) = ordinary.first() {
        if days_between(most_recent.occurred_at, now) <= RECENCY_WINDOW_DAYS {
            score += RECENCY_BONUS;
        }
    }

    score.clamp(0.0, MOMENTUM_CAP)
}

pub fn engagement(events: &[RatedEvent]) -> f64 {
    let ordinary = ordinary_events(events);
    if ordinary.is_empty() {
        return 0.0;
    }

    let votes: u32 = ordinary.iter().map(|event| event.vote_count).sum();
    let avg_votes = votes as f64 / ordinary.len() as f64;

    (avg_votes / OPTIMAL_VOTES_PER_EVENT).min(1.0) * ENGAGEMENT_CAP
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::ranking::compute_global_wrestler_ranking;
    use chrono::{Duration, TimeZone};

    fn now() -> DateTime<Utc> {
        Utc.with_ymd_and_hms(2026, 10, 1, 20, 0, 0).unwrap()
    }

    fn days_ago(days: i64) -> DateTime<Utc> {
        now() - Duration::days(days)
    }

    fn show(rating: f64, days: i64, votes: u32) -> RatedEvent {
        RatedEvent {
            rating,
            occurred_at: days_ago(days),
            kind: ShowKind::Ordinary,
            vote_count: votes,
        }
    }

    fn ple(rating: f64, days: i64, votes: u32) -> RatedEvent {
        RatedEvent {
            kind: ShowKind::Premium,
            ..show(rating, days, votes)
        }
    }

    fn open_reign(champion: &str, days: i64, defenses: u32) -> TitleReign {
        TitleReign {
            champion_name: champion.to_string(),
            won_at: days_ago(days),
            lost_at: None,
            defense_count: defenses,
        }
    }

    fn closed_reign(champion: &str, won: i64, lost: i64) -> TitleReign {
        TitleReign {
            champion_name: champion.to_string(),
            won_at: days_ago(won),
            lost_at: Some(days_ago(lost)),
            defense_count: 0,
        }
    }

    fn belt(name: &str, reigns: Vec<TitleReign>) -> BeltHistory {
        BeltHistory {
            belt_name: name.to_string(),
            reigns,
        }
    }

    fn approx(actual: f64, expected: f64) {
        assert!(
            (actual - expected).abs() < 1e-9,
            "expected {}, got {}",
            expected,
            actual
        );
    }

    #[test]
    fn test_empty_promotion_is_in_crisis() {
        let result = compute_tv_rating(&ScoringInput::default(), &WrestlerRanking::default(), now());
        assert_eq!(result.value, 0.0);
        assert_eq!(result.grade, Grade::InCrisis);
        assert_eq!(result.breakdown, ScoreBreakdown::default());
    }

    #[test]
    fn test_five_perfect_weekly_shows() {
        let input = ScoringInput {
            events: (0..5).map(|d| show(5.0, d, 5)).collect(),
            ..Default::default()
        };

        let result = compute_tv_rating(&input, &WrestlerRanking::default(), now());

        approx(result.breakdown.event_quality, 3.8);
        approx(result.breakdown.momentum, 0.2);
        approx(result.breakdown.engagement, 0.5);
        approx(result.breakdown.roster_quality, 0.0);
        approx(result.breakdown.championship_prestige, 0.0);
        approx(result.value, 4.5);
        assert_eq!(result.grade, Grade::Struggling);
    }

    #[test]
    fn test_grade_boundaries() {
        assert_eq!(Grade::from_value(10.0), Grade::OnFire);
        assert_eq!(Grade::from_value(9.0), Grade::OnFire);
        assert_eq!(Grade::from_value(8.9999), Grade::PrimeTime);
        assert_eq!(Grade::from_value(7.5), Grade::PrimeTime);
        assert_eq!(Grade::from_value(6.0), Grade::Solid);
        assert_eq!(Grade::from_value(4.5), Grade::Struggling);
        assert_eq!(Grade::from_value(4.4999), Grade::InCrisis);
        assert_eq!(Grade::from_value(0.0), Grade::InCrisis);
        assert_eq!(Grade::PrimeTime.to_string(), "prime time");
    }

    #[test]
    fn test_premium_events_weigh_double() {
        let events = vec![show(2.0, 1, 0), ple(5.0, 2, 0)];
        // (2 + 5×2) / 3 = 4 → 4/5 × 3.5
        approx(event_quality(&events, now()), 2.8);
    }

    #[test]
    fn test_regularity_bonus_needs_four_recent_events() {
        let three = vec![show(5.0, 1, 0), show(5.0, 8, 0), show(5.0, 15, 0)];
        approx(event_quality(&three, now()), 3.5);

        let mut four = three.clone();
        four.push(show(5.0, 29, 0));
        approx(event_quality(&four, now()), 3.8);

        let mut stale = three.clone();
        stale.push(show(5.0, 31, 0));
        approx(event_quality(&stale, now()), 3.5);

        // exactly 30 days old still counts
        let mut edge = three;
        edge.push(show(5.0, 30, 0));
        approx(event_quality(&edge, now()), 3.8);
    }

    #[test]
    fn test_inactivity_penalty_per_full_week() {
        // 20 days: floor(20/7 − 2) = 0, no penalty
        approx(event_quality(&[show(5.0, 20, 0)], now()), 3.5);
        // 21 days: one full week over the grace period
        approx(event_quality(&[show(5.0, 21, 0)], now()), 3.0);
        // 35 days: three weeks over
        approx(event_quality(&[show(5.0, 35, 0)], now()), 2.0);
        // long hiatus floors at zero
        approx(event_quality(&[show(5.0, 400, 0)], now()), 0.0);
    }

    #[test]
    fn test_event_quality_is_monotonic_in_rating() {
        let base: Vec<RatedEvent> = vec![show(2.0, 1, 0), show(3.0, 3, 0), ple(3.5, 10, 0)];
        let mut previous = event_quality(&base, now());

        for bump in [2.5, 3.0, 4.0, 5.0] {
            let mut events = base.clone();
            events[0].rating = bump;
            let current = event_quality(&events, now());
            assert!(current >= previous);
            previous = current;
        }
    }

    #[test]
    fn test_event_quality_respects_cap() {
        let events: Vec<RatedEvent> = (0..12).map(|d| ple(5.0, d, 10)).collect();
        let score = event_quality(&events, now());
        assert!(score <= EVENT_QUALITY_CAP);
        approx(score, 3.8);
    }

    #[test]
    fn test_roster_quality_win_rate_and_size_penalty() {
        let roster: Vec<WrestlerRecord> = (0..8)
            .map(|i| WrestlerRecord::new(format!("W{}", i), 3, 1))
            .collect();
        // 0.75 × 1.8, full size, nobody ranked
        approx(roster_quality(&roster, &WrestlerRanking::default()), 1.35);

        let small = &roster[..4];
        approx(roster_quality(small, &WrestlerRanking::default()), 1.35 * 0.7);

        let large: Vec<WrestlerRecord> = (0..51)
            .map(|i| WrestlerRecord::new(format!("W{}", i), 1, 1))
            .collect();
        approx(roster_quality(&large, &WrestlerRanking::default()), 0.9 * 0.8);
    }

    #[test]
    fn test_roster_entries_without_matches_only_count_for_size() {
        let mut roster = vec![WrestlerRecord::new("Worker", 1, 1)];
        roster.extend((0..7).map(|i| WrestlerRecord::new(format!("Rookie{}", i), 0, 0)));

        // size 8 → no penalty, win rate from "Worker" alone
        approx(roster_quality(&roster, &WrestlerRanking::default()), 0.9);

        let idle: Vec<WrestlerRecord> = (0..3)
            .map(|i| WrestlerRecord::new(format!("Idle{}", i), 0, 0))
            .collect();
        approx(roster_quality(&idle, &WrestlerRanking::default()), 0.0);
    }

    #[test]
    fn test_star_power_counts_global_top_five() {
        let population = vec![
            WrestlerRecord::new("Ace", 10, 0),
            WrestlerRecord::new("Bolt", 9, 1),
            WrestlerRecord::new("Other1", 8, 2),
            WrestlerRecord::new("Other2", 7, 3),
            WrestlerRecord::new("Other3", 6, 4),
            WrestlerRecord::new("Jobber", 0, 10),
        ];
        let ranking = compute_global_wrestler_ranking(&population);

        let mut roster = vec![
            WrestlerRecord::new("Ace", 10, 0),
            WrestlerRecord::new("Bolt", 9, 1),
            WrestlerRecord::new("Jobber", 0, 10),
        ];
        roster.extend((0..5).map(|i| WrestlerRecord::new(format!("Extra{}", i), 0, 0)));

        // win rate 19/30 × 1.8 + 2 × 0.24
        approx(roster_quality(&roster, &ranking), 19.0 / 30.0 * 1.8 + 0.48);
    }

    #[test]
    fn test_roster_quality_respects_cap() {
        let population: Vec<WrestlerRecord> = (0..5)
            .map(|i| WrestlerRecord::new(format!("Star{}", i), 20, 0))
            .collect();
        let ranking = compute_global_wrestler_ranking(&population);
        let mut roster = population.clone();
        roster.extend((0..5).map(|i| WrestlerRecord::new(format!("Extra{}", i), 0, 0)));

        approx(roster_quality(&roster, &ranking), ROSTER_QUALITY_CAP);
    }

    #[test]
    fn test_championship_reign_age_defenses_and_dominance() {
        let ranking = compute_global_wrestler_ranking(&[
            WrestlerRecord::new("Champ", 8, 2),
            WrestlerRecord::new("Midcarder", 5, 5),
        ]);

        let fresh = vec![belt("World", vec![open_reign("Midcarder", 10, 0)])];
        approx(championship_prestige(&fresh, &ranking, now()), 0.3);

        let established = vec![belt("World", vec![open_reign("Midcarder", 45, 2)])];
        approx(championship_prestige(&established, &ranking, now()), 0.8);

        // 1.0 + 0.5 (capped defenses) + 0.3 dominance → capped at 1.5
        let legendary = vec![belt("World", vec![open_reign("Champ", 200, 9)])];
        approx(championship_prestige(&legendary, &ranking, now()), 1.5);

        // averaged: (0.3 + 0.3 dominance) and (1.0) → 0.8
        let mixed = vec![
            belt("World", vec![open_reign("Champ", 5, 0)]),
            belt("Tag", vec![open_reign("Midcarder", 120, 0)]),
        ];
        approx(championship_prestige(&mixed, &ranking, now()), 0.8);
    }

    #[test]
    fn test_tag_team_champions_split_dominance() {
        let ranking = compute_global_wrestler_ranking(&[
            WrestlerRecord::new("Edge", 9, 1),
            WrestlerRecord::new("Christian", 4, 6),
        ]);
        let belts = vec![belt("Tag", vec![open_reign("Edge & Christian", 1, 0)])];
        approx(championship_prestige(&belts, &ranking, now()), 0.3 + 0.15);
    }

    #[test]
    fn test_vacancy_penalty_per_belt() {
        let ranking = WrestlerRanking::default();
        let belts = vec![
            belt("World", vec![open_reign("Champ", 100, 5)]),
            belt("Tag", vec![closed_reign("Gone", 60, 20)]),
            belt("Women", vec![closed_reign("Recent", 60, 10)]),
            belt("Never Held", vec![]),
        ];
        // 1.0 + 0.5 − one long vacancy
        approx(championship_prestige(&belts, &ranking, now()), 1.2);

        let only_vacant = vec![belt("Tag", vec![closed_reign("Gone", 60, 20)])];
        approx(championship_prestige(&only_vacant, &ranking, now()), 0.0);
    }

    #[test]
    fn test_vacancy_uses_most_recent_reign() {
        let belts = vec![belt(
            "World",
            vec![closed_reign("Old", 300, 200), open_reign("New", 100, 0)],
        )];
        approx(
            championship_prestige(&belts, &WrestlerRanking::default(), now()),
            1.0,
        );
    }

    #[test]
    fn test_momentum_improvement_is_clamped() {
        // newest first: last 3 avg 4.5, previous 3 avg 2.0 → +0.5 (clamped)
        let rising = vec![
            show(4.5, 1, 0),
            show(4.5, 8, 0),
            show(4.5, 15, 0),
            show(2.0, 22, 0),
            show(2.0, 29, 0),
            show(2.0, 36, 0),
        ];
        approx(momentum(&rising, now()), 0.7);

        let mut slight = rising.clone();
        for event in slight.iter_mut().take(3) {
            event.rating = 2.25;
        }
        approx(momentum(&slight, now()), 0.25 + 0.2);
    }

    #[test]
    fn test_momentum_decline_can_zero_out() {
        let falling = vec![
            show(1.0, 20, 0),
            show(1.0, 27, 0),
            show(1.0, 34, 0),
            show(4.0, 41, 0),
            show(4.0, 48, 0),
            show(4.0, 55, 0),
        ];
        approx(momentum(&falling, now()), 0.0);
    }

    #[test]
    fn test_momentum_ignores_premium_events() {
        let events = vec![ple(5.0, 0, 0), show(3.0, 10, 0)];
        // most recent ordinary show is 10 days old
        approx(momentum(&events, now()), 0.0);

        let events = vec![ple(5.0, 0, 0), show(3.0, 6, 0)];
        approx(momentum(&events, now()), 0.2);

        // exactly one week old still earns the recency bonus
        let events = vec![ple(5.0, 0, 0), show(3.0, 7, 0)];
        approx(momentum(&events, now()), 0.2);
    }

    #[test]
    fn test_engagement_against_five_votes() {
        approx(engagement(&[]), 0.0);
        approx(engagement(&[show(3.0, 1, 2), show(3.0, 2, 3)]), 0.25);
        approx(engagement(&[show(3.0, 1, 12)]), 0.5);
        // premium events carry no engagement weight
        approx(engagement(&[ple(3.0, 1, 50)]), 0.0);
    }

    #[test]
    fn test_components_are_independent() {
        let ranking = compute_global_wrestler_ranking(&[WrestlerRecord::new("Champ", 8, 2)]);
        let with_belts = ScoringInput {
            belts: vec![belt("World", vec![open_reign("Champ", 100, 0)])],
            ..Default::default()
        };

        let result = compute_tv_rating(&with_belts, &ranking, now());
        approx(result.breakdown.event_quality, 0.0);
        approx(result.breakdown.roster_quality, 0.0);
        approx(result.breakdown.momentum, 0.0);
        approx(result.breakdown.engagement, 0.0);
        approx(result.breakdown.championship_prestige, 1.3);
        approx(result.value, 1.3);
    }

    #[test]
    fn test_full_promotion_stays_in_bounds_and_is_idempotent() {
        let population: Vec<WrestlerRecord> = (0..10)
            .map(|i| WrestlerRecord::new(format!("W{}", i), 20 - i, i))
            .collect();
        let ranking = compute_global_wrestler_ranking(&population);

        let input = ScoringInput {
            events: (0..10)
                .map(|i| if i % 4 == 0 { ple(5.0, i, 9) } else { show(4.75, i, 9) })
                .collect(),
            roster: population.clone(),
            belts: vec![
                belt("World", vec![open_reign("W0", 150, 7)]),
                belt("Tag", vec![open_reign("W1 & W2", 95, 6)]),
            ],
        };

        let first = compute_tv_rating(&input, &ranking, now());
        let second = compute_tv_rating(&input, &ranking, now());

        assert!(first.value >= 0.0 && first.value <= MAX_SCORE);
        assert_eq!(first.value.to_bits(), second.value.to_bits());
        assert_eq!(first, second);
        assert!(first.value >= 7.5);
    }

    #[test]
    fn test_validation_rejects_out_of_range_ratings() {
        let bad = ScoringInput {
            events: vec![show(5.5, 0, 1)],
            ..Default::default()
        };
        assert!(bad.validate().is_err());

        let negative = ScoringInput {
            events: vec![show(-1.0, 0, 1)],
            ..Default::default()
        };
        assert!(negative.validate().is_err());

        let duplicate = ScoringInput {
            roster: vec![
                WrestlerRecord::new("Sting", 1, 0),
                WrestlerRecord::new("sting", 0, 1),
            ],
            ..Default::default()
        };
        assert!(duplicate.validate().is_err());
    }

    #[test]
    fn test_validation_rejects_two_open_reigns() {
        let input = ScoringInput {
            belts: vec![belt(
                "World",
                vec![open_reign("A", 10, 0), open_reign("B", 5, 0)],
            )],
            ..Default::default()
        };
        assert!(input.validate().is_err());
    }
}
