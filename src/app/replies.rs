use crate::app::commands::COMMAND_HELP;
use crate::core::booking::{
    ChampionChange, FederationRating, FederationStats, MatchOutcome, PickOutcome, ResetSummary,
    TitleUpdate, VoteOutcome,
};
use crate::core::ranking::{RankedPromotion, RankedWrestler};
use crate::core::tv_rating::ScoreBreakdown;
use crate::domain::model::{Belt, Federation, Show, ShowKind, EMOJI_NUMBERS, STAR_VALUES};
use chrono::{DateTime, Utc};

pub const GOLD: u32 = 0xFFD700;
pub const GREEN: u32 = 0x2ECC71;
pub const BLUE: u32 = 0x3498DB;
pub const ORANGE: u32 = 0xE67E22;
pub const PURPLE: u32 = 0x9B59B6;

#[derive(Debug, Clone, PartialEq)]
pub struct EmbedField {
    pub name: String,
    pub value: String,
    pub inline: bool,
}

/// Rich message card, modelled on Discord embeds.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct Embed {
    pub title: String,
    pub description: Option<String>,
    pub fields: Vec<EmbedField>,
    pub color: u32,
    pub footer: Option<String>,
    pub thumbnail: Option<String>,
}

impl Embed {
    pub fn new(title: impl Into<String>) -> Self {
        Self {
            title: title.into(),
            ..Default::default()
        }
    }

    pub fn description(mut self, text: impl Into<String>) -> Self {
        self.description = Some(text.into());
        self
    }

    pub fn field(mut self, name: impl Into<String>, value: impl Into<String>) -> Self {
        self.fields.push(EmbedField {
            name: name.into(),
            value: value.into(),
            inline: false,
        });
        self
    }

    pub fn inline_field(mut self, name: impl Into<String>, value: impl Into<String>) -> Self {
        self.fields.push(EmbedField {
            name: name.into(),
            value: value.into(),
            inline: true,
        });
        self
    }

    pub fn color(mut self, color: u32) -> Self {
        self.color = color;
        self
    }

    pub fn footer(mut self, text: impl Into<String>) -> Self {
        self.footer = Some(text.into());
        self
    }

    pub fn thumbnail(mut self, path: Option<String>) -> Self {
        self.thumbnail = path;
        self
    }
}

#[derive(Debug, Clone, PartialEq)]
pub enum Reply {
    Text(String),
    Embed {
        content: Option<String>,
        embed: Embed,
    },
}

impl Reply {
    pub fn text(text: impl Into<String>) -> Self {
        Reply::Text(text.into())
    }

    pub fn embed(embed: Embed) -> Self {
        Reply::Embed {
            content: None,
            embed,
        }
    }

    pub fn as_embed(&self) -> Option<&Embed> {
        match self {
            Reply::Embed { embed, .. } => Some(embed),
            Reply::Text(_) => None,
        }
    }

    /// Plain-text rendering for terminals.
    pub fn render(&self) -> String {
        match self {
            Reply::Text(text) => text.clone(),
            Reply::Embed { content, embed } => {
                let mut lines = Vec::new();
                if let Some(content) = content {
                    lines.push(content.clone());
                }
                lines.push(format!("┃ {}", embed.title));
                if let Some(description) = &embed.description {
                    lines.extend(description.lines().map(|l| format!("┃ {}", l)));
                }
                for field in &embed.fields {
                    lines.push(format!("┃ {}:", field.name));
                    lines.extend(field.value.lines().map(|l| format!("┃   {}", l)));
                }
                if let Some(thumbnail) = &embed.thumbnail {
                    lines.push(format!("┃ [logo: {}]", thumbnail));
                }
                if let Some(footer) = &embed.footer {
                    lines.push(format!("┃ — {}", footer));
                }
                lines.join("\n")
            }
        }
    }
}

fn date(at: DateTime<Utc>) -> String {
    at.format("%d/%m/%Y").to_string()
}

fn plural(count: usize, word: &str) -> String {
    if count == 1 {
        format!("{} {}", count, word)
    } else {
        format!("{} {}s", count, word)
    }
}

/// ⭐ per whole star, ✨ for a half or more.
pub fn stars_display(rating: f64) -> String {
    let mut stars = "⭐".repeat(rating.floor() as usize);
    if rating % 1.0 >= 0.5 {
        stars.push('✨');
    }
    stars
}

pub fn star_legend() -> String {
    let entries: Vec<String> = EMOJI_NUMBERS
        .iter()
        .zip(STAR_VALUES.iter())
        .map(|(emoji, stars)| format!("{}={}⭐", emoji, stars))
        .collect();
    format!("**Legend:** {}", entries.join(" | "))
}

pub fn federation_created(federation: &Federation) -> Reply {
    Reply::embed(
        Embed::new("🏆 Federation Created!")
            .description(format!("**{}**", federation.name))
            .field("Roster", "0 wrestlers")
            .field("Status", "✅ Ready to draft")
            .color(GOLD)
            .thumbnail(federation.logo_path.clone()),
    )
}

pub fn federation_reset(summary: &ResetSummary, target: &str) -> Reply {
    Reply::text(format!(
        "✅ {}'s federation **{}** deleted and {} released.",
        target,
        summary.federation_name,
        plural(summary.freed_wrestlers, "wrestler")
    ))
}

pub fn wrestler_drafted(outcome: &PickOutcome) -> Reply {
    Reply::embed(
        Embed::new("✅ Wrestler Drafted!")
            .description(format!(
                "**{}** joined **{}**!",
                outcome.wrestler, outcome.federation
            ))
            .inline_field("Wrestler", outcome.wrestler.clone())
            .inline_field("Status", "🔒 Exclusive")
            .field("Roster Total", plural(outcome.roster_size, "wrestler"))
            .color(GREEN),
    )
}

pub fn roster(federation: &Federation) -> Reply {
    if federation.roster.is_empty() {
        return Reply::text("Your roster is empty.");
    }

    let lines: Vec<String> = federation
        .roster
        .iter()
        .enumerate()
        .map(|(i, slot)| {
            format!(
                "**{}.** {} - 🔒 Exclusive (signed {})",
                i + 1,
                slot.wrestler_name,
                date(slot.signed_at)
            )
        })
        .collect();

    Reply::embed(
        Embed::new(format!("🤼 Roster - {}", federation.name))
            .description(lines.join("\n"))
            .field("Total", plural(federation.roster.len(), "wrestler"))
            .color(BLUE)
            .thumbnail(federation.logo_path.clone()),
    )
}

/// Announcement card plus the legend, mentioning the booker role if any.
pub fn show_opened(show: &Show, booker_role: Option<&str>) -> Vec<Reply> {
    let title = match (&show.kind, &show.title) {
        (ShowKind::Premium, Some(name)) => format!("🎆 End of {} (Show #{})", name, show.show_number),
        (ShowKind::Premium, None) => format!("🎆 End of Premium Live Event #{}", show.show_number),
        (ShowKind::Ordinary, _) => format!("🎬 End of Show #{}", show.show_number),
    };

    let embed = Embed::new(title)
        .description(format!(
            "**{}**\n\nReact with stars to rate the show!",
            show.federation_name
        ))
        .field("Status", "⏳ Waiting for votes...")
        .color(ORANGE);

    vec![
        Reply::Embed {
            content: booker_role.map(|role| format!("@{} New show to rate!", role)),
            embed,
        },
        Reply::text(format!(
            "{}\nVote with `!vote @{} {} <1-10>`",
            star_legend(),
            show.user_id,
            show.show_number
        )),
    ]
}

pub fn vote_recorded(outcome: &VoteOutcome) -> Reply {
    Reply::text(format!(
        "🗳️ {}⭐ recorded for show #{} ({} so far)",
        outcome.stars,
        outcome.show_number,
        plural(outcome.total_votes, "vote")
    ))
}

pub fn show_finalized(show: &Show) -> Reply {
    Reply::embed(
        Embed::new(format!("📊 Results - Show #{}", show.show_number))
            .description(format!("**{}**", show.federation_name))
            .inline_field(
                "Final Rating",
                format!(
                    "{} **{:.2}/5**",
                    stars_display(show.average_rating),
                    show.average_rating
                ),
            )
            .inline_field("Votes", plural(show.ratings.len(), "person"))
            .color(PURPLE),
    )
}

pub fn belt_created(belt: &Belt) -> Reply {
    Reply::embed(
        Embed::new("🏆 Title Created!")
            .field("Federation", belt.federation_name.clone())
            .field("Title", belt.name.clone())
            .field("Current Champion", "Vacant")
            .color(GOLD),
    )
}

pub fn champion_set(change: &ChampionChange) -> Reply {
    if change.unchanged {
        return Reply::text(format!(
            "{} already holds the {}.",
            change.champion, change.belt
        ));
    }

    let mut embed = Embed::new("👑 New Champion!")
        .field("Title", change.belt.clone())
        .field("Champion", change.champion.clone())
        .field("Federation", change.federation.clone())
        .color(GOLD);
    if let Some(previous) = &change.previous {
        embed = embed.field("Previous Champion", previous.clone());
    }
    Reply::embed(embed)
}

pub fn title_vacated(update: &TitleUpdate) -> Reply {
    Reply::text(format!(
        "🏳️ The {} is now vacant ({} held it for {} days).",
        update.belt,
        update.reign.champion,
        update
            .reign
            .lost_at
            .map(|lost| (lost - update.reign.won_at).num_days())
            .unwrap_or(0)
    ))
}

pub fn title_defended(update: &TitleUpdate) -> Reply {
    Reply::text(format!(
        "🛡️ {} retains the {}! ({})",
        update.reign.champion,
        update.belt,
        plural(update.reign.defenses as usize, "successful defense")
    ))
}

pub fn match_recorded(outcome: &MatchOutcome) -> Reply {
    Reply::text(format!(
        "🤼 **{}** def. **{}**",
        outcome.winners.join(" & "),
        outcome.losers.join(" & ")
    ))
}

pub fn federation_stats(stats: &FederationStats, owner_name: &str) -> Reply {
    let champions = if stats.champions.is_empty() {
        "No titles created".to_string()
    } else {
        stats
            .champions
            .iter()
            .map(|(belt, champion)| {
                format!("🏆 **{}**: {}", belt, champion.as_deref().unwrap_or("Vacant"))
            })
            .collect::<Vec<_>>()
            .join("\n")
    };

    let average = match stats.average_rating {
        Some(avg) if avg > 0.0 => format!("⭐ {:.2}/5", avg),
        _ => "N/A".to_string(),
    };

    Reply::embed(
        Embed::new(format!("📈 {}", stats.federation.name))
            .description("Your federation's statistics")
            .inline_field("Roster", plural(stats.federation.roster.len(), "wrestler"))
            .inline_field("Completed Shows", stats.finalized_shows.to_string())
            .inline_field("Average Rating", average)
            .inline_field("Created", date(stats.federation.created_at))
            .field("👑 Champions", champions)
            .color(PURPLE)
            .footer(format!("Owner: {}", owner_name))
            .thumbnail(stats.federation.logo_path.clone()),
    )
}

fn breakdown_lines(breakdown: &ScoreBreakdown) -> String {
    [
        ("Event quality", breakdown.event_quality, 4.0),
        ("Roster quality", breakdown.roster_quality, 3.0),
        ("Championship prestige", breakdown.championship_prestige, 1.5),
        ("Momentum", breakdown.momentum, 1.0),
        ("Engagement", breakdown.engagement, 0.5),
    ]
    .iter()
    .map(|(name, value, max)| format!("{}: {:.2}/{}", name, value, max))
    .collect::<Vec<_>>()
    .join("\n")
}

pub fn tv_rating(rating: &FederationRating) -> Reply {
    let result = &rating.result;
    Reply::embed(
        Embed::new(format!("📺 TV Rating - {}", rating.federation_name))
            .description(format!(
                "{} **{:.2}/10** - {}",
                result.grade.emoji(),
                result.value,
                result.grade
            ))
            .field("Breakdown", breakdown_lines(&result.breakdown))
            .color(BLUE),
    )
}

pub fn rankings(ranked: &[RankedPromotion]) -> Reply {
    if ranked.is_empty() {
        return Reply::text("No federations on this server yet.");
    }

    let lines: Vec<String> = ranked
        .iter()
        .map(|entry| {
            format!(
                "**{}.** {} - {:.2}/10 {} {}",
                entry.rank,
                entry.federation_name,
                entry.result.value,
                entry.result.grade.emoji(),
                entry.result.grade
            )
        })
        .collect();

    Reply::embed(
        Embed::new("📺 TV Ratings")
            .description(lines.join("\n"))
            .color(GOLD),
    )
}

pub fn top_wrestlers(top: &[RankedWrestler]) -> Reply {
    if top.is_empty() {
        return Reply::text("No matches recorded yet.");
    }

    let lines: Vec<String> = top
        .iter()
        .map(|entry| {
            format!(
                "**{}.** {} - {}W/{}L ({:.1} pts)",
                entry.rank, entry.record.name, entry.record.wins, entry.record.losses, entry.score
            )
        })
        .collect();

    Reply::embed(
        Embed::new("🌟 Top Wrestlers")
            .description(lines.join("\n"))
            .color(GOLD),
    )
}

pub fn help() -> Reply {
    let embed = COMMAND_HELP
        .iter()
        .fold(
            Embed::new("📖 Fantasy Booking Commands").description("Available commands"),
            |embed, (usage, description)| embed.field(*usage, *description),
        )
        .color(BLUE)
        .footer("Drafted wrestlers are exclusive to your federation");
    Reply::embed(embed)
}

pub fn error(message: String) -> Reply {
    Reply::text(message)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_stars_display() {
        assert_eq!(stars_display(4.25), "⭐⭐⭐⭐");
        assert_eq!(stars_display(3.5), "⭐⭐⭐✨");
        assert_eq!(stars_display(0.5), "✨");
        assert_eq!(stars_display(5.0), "⭐⭐⭐⭐⭐");
    }

    #[test]
    fn test_legend_lists_every_reaction() {
        let legend = star_legend();
        assert!(legend.starts_with("**Legend:** 1️⃣=0.5⭐"));
        assert!(legend.ends_with("🔟=5⭐"));
        assert_eq!(legend.matches('|').count(), 9);
    }

    #[test]
    fn test_embed_render() {
        let reply = Reply::Embed {
            content: Some("@Bookeur New show to rate!".to_string()),
            embed: Embed::new("Title")
                .description("line one\nline two")
                .inline_field("Votes", "3 persons")
                .footer("Owner: alice"),
        };

        let rendered = reply.render();
        assert!(rendered.starts_with("@Bookeur"));
        assert!(rendered.contains("┃ line two"));
        assert!(rendered.contains("┃ Votes:\n┃   3 persons"));
        assert!(rendered.ends_with("┃ — Owner: alice"));
        let field = &reply.as_embed().unwrap().fields[0];
        assert_eq!((field.name.as_str(), field.value.as_str()), ("Votes", "3 persons"));
        assert!(field.inline);
    }

    #[test]
    fn test_help_lists_all_commands() {
        let reply = help();
        let embed = reply.as_embed().unwrap();
        assert_eq!(embed.fields.len(), COMMAND_HELP.len());
    }
}
