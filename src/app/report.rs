use crate::core::ranking::RankedPromotion;
use crate::utils::error::Result;
use serde::Serialize;
use std::io::Write;

/// One CSV line of the ratings export.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct RatingRow {
    pub guild: String,
    pub rank: usize,
    pub federation: String,
    pub owner: String,
    pub rating: f64,
    pub grade: String,
    pub event_quality: f64,
    pub roster_quality: f64,
    pub championship_prestige: f64,
    pub momentum: f64,
    pub engagement: f64,
}

fn round2(value: f64) -> f64 {
    (value * 100.0).round() / 100.0
}

impl RatingRow {
    pub fn new(guild: &str, entry: &RankedPromotion) -> Self {
        let breakdown = &entry.result.breakdown;
        Self {
            guild: guild.to_string(),
            rank: entry.rank,
            federation: entry.federation_name.clone(),
            owner: entry.owner_id.clone(),
            rating: round2(entry.result.value),
            grade: entry.result.grade.to_string(),
            event_quality: round2(breakdown.event_quality),
            roster_quality: round2(breakdown.roster_quality),
            championship_prestige: round2(breakdown.championship_prestige),
            momentum: round2(breakdown.momentum),
            engagement: round2(breakdown.engagement),
        }
    }
}

/// Console table for one guild, breakdown under each line.
pub fn format_rankings(guild: &str, ranked: &[RankedPromotion]) -> String {
    let mut out = format!("📺 TV Ratings - {}\n", guild);
    for entry in ranked {
        let b = &entry.result.breakdown;
        out.push_str(&format!(
            "{:>3}. {:<30} {:>5.2}/10 {} {}\n",
            entry.rank,
            entry.federation_name,
            entry.result.value,
            entry.result.grade.emoji(),
            entry.result.grade
        ));
        out.push_str(&format!(
            "     events {:.2} | roster {:.2} | titles {:.2} | momentum {:.2} | engagement {:.2}\n",
            b.event_quality, b.roster_quality, b.championship_prestige, b.momentum, b.engagement
        ));
    }
    out
}

pub fn write_csv<W: Write>(writer: W, rows: &[RatingRow]) -> Result<()> {
    let mut csv_writer = csv::Writer::from_writer(writer);
    for row in rows {
        csv_writer.serialize(row)?;
    }
    csv_writer.flush()?;
    Ok(())
}
