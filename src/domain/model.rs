use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// 星等對照表：第 i 個表情符號 = STAR_VALUES[i] 顆星
pub const STAR_VALUES: [f64; 10] = [0.5, 1.0, 1.5, 2.0, 2.5, 3.0, 3.5, 4.0, 4.5, 5.0];

pub const EMOJI_NUMBERS: [&str; 10] = [
    "1️⃣", "2️⃣", "3️⃣", "4️⃣", "5️⃣", "6️⃣", "7️⃣", "8️⃣", "9️⃣", "🔟",
];

/// Separator used for tag-team names, e.g. `"Edge & Christian"`.
pub const TAG_TEAM_SEPARATOR: &str = " & ";

/// Splits a champion or match side into its members.
pub fn team_members(name: &str) -> Vec<&str> {
    name.split('&')
        .map(str::trim)
        .filter(|member| !member.is_empty())
        .collect()
}

pub fn same_name(a: &str, b: &str) -> bool {
    a.to_lowercase() == b.to_lowercase()
}

/// Belt names typed as one token use `_` for spaces: `WWE_Championship`.
pub fn same_title(a: &str, b: &str) -> bool {
    same_name(&a.replace('_', " "), &b.replace('_', " "))
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct RosterSlot {
    pub wrestler_name: String,
    pub signed_at: DateTime<Utc>,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Federation {
    pub user_id: String,
    pub guild_id: String,
    pub name: String,
    pub logo_path: Option<String>,
    pub roster: Vec<RosterSlot>,
    pub created_at: DateTime<Utc>,
}

impl Federation {
    pub fn roster_slot(&self, wrestler_name: &str) -> Option<&RosterSlot> {
        self.roster
            .iter()
            .find(|slot| same_name(&slot.wrestler_name, wrestler_name))
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Wrestler {
    pub name: String,
    pub guild_id: String,
    pub drafted: bool,
    pub owner_id: Option<String>,
    pub owner_fed_name: Option<String>,
    #[serde(default)]
    pub wins: u32,
    #[serde(default)]
    pub losses: u32,
    pub created_at: DateTime<Utc>,
}

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Default)]
#[serde(rename_all = "snake_case")]
pub enum ShowKind {
    /// Weekly show.
    #[default]
    Ordinary,
    /// Premium live event.
    Premium,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Vote {
    pub user_id: String,
    pub stars: f64,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Show {
    pub show_number: u32,
    pub user_id: String,
    pub guild_id: String,
    pub federation_name: String,
    #[serde(default)]
    pub kind: ShowKind,
    pub title: Option<String>,
    pub ratings: Vec<Vote>,
    pub average_rating: f64,
    pub finalized: bool,
    pub created_at: DateTime<Utc>,
    pub finalized_at: Option<DateTime<Utc>>,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Reign {
    pub champion: String,
    pub won_at: DateTime<Utc>,
    pub lost_at: Option<DateTime<Utc>>,
    pub defenses: u32,
}

impl Reign {
    pub fn is_open(&self) -> bool {
        self.lost_at.is_none()
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Belt {
    pub user_id: String,
    pub guild_id: String,
    pub federation_name: String,
    pub name: String,
    pub reigns: Vec<Reign>,
    pub created_at: DateTime<Utc>,
}

impl Belt {
    /// 最多只有一個未結束的 reign
    pub fn current_reign(&self) -> Option<&Reign> {
        self.reigns.iter().rev().find(|reign| reign.is_open())
    }

    pub fn current_reign_mut(&mut self) -> Option<&mut Reign> {
        self.reigns.iter_mut().rev().find(|reign| reign.is_open())
    }

    pub fn current_champion(&self) -> Option<&str> {
        self.current_reign().map(|reign| reign.champion.as_str())
    }
}

/// Everything the bot persists, written as one JSON document.
#[derive(Debug, Clone, Serialize, Deserialize, Default, PartialEq)]
pub struct BookingState {
    #[serde(default)]
    pub federations: Vec<Federation>,
    #[serde(default)]
    pub wrestlers: Vec<Wrestler>,
    #[serde(default)]
    pub shows: Vec<Show>,
    #[serde(default)]
    pub belts: Vec<Belt>,
}

impl BookingState {
    pub fn federation(&self, guild_id: &str, user_id: &str) -> Option<&Federation> {
        self.federations
            .iter()
            .find(|fed| fed.guild_id == guild_id && fed.user_id == user_id)
    }

    pub fn federation_mut(&mut self, guild_id: &str, user_id: &str) -> Option<&mut Federation> {
        self.federations
            .iter_mut()
            .find(|fed| fed.guild_id == guild_id && fed.user_id == user_id)
    }

    pub fn wrestler(&self, guild_id: &str, name: &str) -> Option<&Wrestler> {
        self.wrestlers
            .iter()
            .find(|w| w.guild_id == guild_id && same_name(&w.name, name))
    }

    pub fn wrestler_mut(&mut self, guild_id: &str, name: &str) -> Option<&mut Wrestler> {
        self.wrestlers
            .iter_mut()
            .find(|w| w.guild_id == guild_id && same_name(&w.name, name))
    }

    pub fn guild_wrestlers<'a>(&'a self, guild_id: &'a str) -> impl Iterator<Item = &'a Wrestler> {
        self.wrestlers.iter().filter(move |w| w.guild_id == guild_id)
    }

    pub fn shows_of<'a>(
        &'a self,
        guild_id: &'a str,
        user_id: &'a str,
    ) -> impl Iterator<Item = &'a Show> {
        self.shows
            .iter()
            .filter(move |s| s.guild_id == guild_id && s.user_id == user_id)
    }

    pub fn belts_of<'a>(
        &'a self,
        guild_id: &'a str,
        user_id: &'a str,
    ) -> impl Iterator<Item = &'a Belt> {
        self.belts
            .iter()
            .filter(move |b| b.guild_id == guild_id && b.user_id == user_id)
    }

    pub fn belt_mut(&mut self, guild_id: &str, user_id: &str, name: &str) -> Option<&mut Belt> {
        self.belts.iter_mut().find(|b| {
            b.guild_id == guild_id && b.user_id == user_id && same_title(&b.name, name)
        })
    }
}
