use crate::core::ranking::{rank_promotions, RankedPromotion, RankedWrestler};
use crate::core::snapshot::{guild_ranking, scoring_input};
use crate::core::tv_rating::{compute_tv_rating, ScoreResult};
use crate::domain::model::{
    same_name, same_title, team_members, Belt, BookingState, Federation, Reign, RosterSlot, Show,
    ShowKind, Vote, Wrestler, STAR_VALUES, TAG_TEAM_SEPARATOR,
};
use crate::domain::ports::{Clock, Storage};
use crate::utils::error::{BookingError, Result};
use crate::utils::validation::{validate_range, Validate};
use tokio::sync::Mutex;

/// 狀態檔名稱 (相對於 Storage 的根目錄)
pub const STATE_FILE: &str = "booking.json";

/// Who issued a command, and where.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Actor {
    pub guild_id: String,
    pub user_id: String,
    pub is_admin: bool,
}

impl Actor {
    pub fn new(guild_id: impl Into<String>, user_id: impl Into<String>) -> Self {
        Self {
            guild_id: guild_id.into(),
            user_id: user_id.into(),
            is_admin: false,
        }
    }

    pub fn admin(mut self) -> Self {
        self.is_admin = true;
        self
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct ResetSummary {
    pub federation_name: String,
    pub freed_wrestlers: usize,
    pub deleted_belts: usize,
    pub deleted_shows: usize,
}

#[derive(Debug, Clone, PartialEq)]
pub struct PickOutcome {
    pub wrestler: String,
    pub federation: String,
    pub roster_size: usize,
}

#[derive(Debug, Clone, PartialEq)]
pub struct VoteOutcome {
    pub show_number: u32,
    pub stars: f64,
    pub total_votes: usize,
}

#[derive(Debug, Clone, PartialEq)]
pub struct ChampionChange {
    pub belt: String,
    pub champion: String,
    pub federation: String,
    pub previous: Option<String>,
    /// The champion already held the belt; nothing changed.
    pub unchanged: bool,
}

#[derive(Debug, Clone, PartialEq)]
pub struct TitleUpdate {
    pub belt: String,
    pub reign: Reign,
}

#[derive(Debug, Clone, PartialEq)]
pub struct MatchOutcome {
    pub winners: Vec<String>,
    pub losers: Vec<String>,
}

#[derive(Debug, Clone, PartialEq)]
pub struct FederationStats {
    pub federation: Federation,
    pub finalized_shows: usize,
    pub average_rating: Option<f64>,
    pub champions: Vec<(String, Option<String>)>,
}

#[derive(Debug, Clone, PartialEq)]
pub struct FederationRating {
    pub federation_name: String,
    pub result: ScoreResult,
}

pub struct BookingEngine<S: Storage, C: Clock> {
    storage: S,
    clock: C,
    state: Mutex<BookingState>,
}

impl<S: Storage, C: Clock> BookingEngine<S, C> {
    /// 載入既有狀態；找不到檔案時從空白開始
    pub async fn open(storage: S, clock: C) -> Result<Self> {
        let state = match storage.read_file(STATE_FILE).await {
            Ok(bytes) => {
                let state: BookingState = serde_json::from_slice(&bytes)?;
                tracing::info!(
                    "📂 Loaded state: {} federations, {} wrestlers, {} shows, {} belts",
                    state.federations.len(),
                    state.wrestlers.len(),
                    state.shows.len(),
                    state.belts.len()
                );
                state
            }
            Err(BookingError::IoError(e)) if e.kind() == std::io::ErrorKind::NotFound => {
                tracing::info!("No saved state found, starting fresh");
                BookingState::default()
            }
            Err(e) => return Err(e),
        };

        Ok(Self {
            storage,
            clock,
            state: Mutex::new(state),
        })
    }

    pub fn clock(&self) -> &C {
        &self.clock
    }

    pub async fn snapshot(&self) -> BookingState {
        self.state.lock().await.clone()
    }

    async fn persist(&self, state: &BookingState) -> Result<()> {
        let data = serde_json::to_vec_pretty(state)?;
        tracing::debug!("Writing state ({} bytes)", data.len());
        self.storage.write_file(STATE_FILE, &data).await
    }

    pub async fn create_federation(
        &self,
        actor: &Actor,
        name: &str,
        logo_path: Option<String>,
    ) -> Result<Federation> {
        let mut state = self.state.lock().await;

        if state.federation(&actor.guild_id, &actor.user_id).is_some() {
            return Err(BookingError::FederationExists {
                user_id: actor.user_id.clone(),
            });
        }

        let federation = Federation {
            user_id: actor.user_id.clone(),
            guild_id: actor.guild_id.clone(),
            name: name.to_string(),
            logo_path,
            roster: Vec::new(),
            created_at: self.clock.now(),
        };
        state.federations.push(federation.clone());
        self.persist(&state).await?;

        tracing::info!(guild = %actor.guild_id, user = %actor.user_id, "🏆 Federation created: {}", name);
        Ok(federation)
    }

    pub async fn reset_federation(&self, actor: &Actor, target_user: &str) -> Result<ResetSummary> {
        if !actor.is_admin {
            return Err(BookingError::PermissionDenied {
                action: "resetfed".to_string(),
            });
        }

        let mut state = self.state.lock().await;
        let guild = actor.guild_id.as_str();

        let Some(federation_name) = state.federation(guild, target_user).map(|f| f.name.clone())
        else {
            return Err(BookingError::FederationNotFound {
                user_id: target_user.to_string(),
            });
        };

        let mut freed_wrestlers = 0;
        for wrestler in state
            .wrestlers
            .iter_mut()
            .filter(|w| w.guild_id == guild && w.owner_id.as_deref() == Some(target_user))
        {
            wrestler.drafted = false;
            wrestler.owner_id = None;
            wrestler.owner_fed_name = None;
            freed_wrestlers += 1;
        }

        let belts_before = state.belts.len();
        state
            .belts
            .retain(|b| !(b.guild_id == guild && b.user_id == target_user));
        let shows_before = state.shows.len();
        state
            .shows
            .retain(|s| !(s.guild_id == guild && s.user_id == target_user));
        state
            .federations
            .retain(|f| !(f.guild_id == guild && f.user_id == target_user));

        let summary = ResetSummary {
            federation_name,
            freed_wrestlers,
            deleted_belts: belts_before - state.belts.len(),
            deleted_shows: shows_before - state.shows.len(),
        };
        self.persist(&state).await?;

        tracing::info!(
            guild = %guild,
            admin = %actor.user_id,
            target = %target_user,
            "🗑️ Federation reset: {:?}",
            summary
        );
        Ok(summary)
    }

    pub async fn pick(&self, actor: &Actor, wrestler_name: &str) -> Result<PickOutcome> {
        // `&` 保留給雙打隊伍
        if wrestler_name.contains('&') {
            return Err(BookingError::ValidationError {
                message: format!(
                    "\"{}\" contains '&', which is reserved for tag teams. Draft each member on their own.",
                    wrestler_name
                ),
            });
        }

        let mut state = self.state.lock().await;
        let guild = actor.guild_id.as_str();
        let now = self.clock.now();

        let federation = state
            .federation(guild, &actor.user_id)
            .cloned()
            .ok_or_else(|| BookingError::FederationNotFound {
                user_id: actor.user_id.clone(),
            })?;

        if let Some(existing) = state.wrestler(guild, wrestler_name) {
            if existing.drafted && existing.owner_id.as_deref() != Some(actor.user_id.as_str()) {
                return Err(BookingError::WrestlerTaken {
                    wrestler: existing.name.clone(),
                    federation: existing.owner_fed_name.clone().unwrap_or_default(),
                });
            }
        } else {
            state.wrestlers.push(Wrestler {
                name: wrestler_name.to_string(),
                guild_id: guild.to_string(),
                drafted: false,
                owner_id: None,
                owner_fed_name: None,
                wins: 0,
                losses: 0,
                created_at: now,
            });
            tracing::debug!("New wrestler tracked: {}", wrestler_name);
        }

        let canonical = state
            .wrestler(guild, wrestler_name)
            .map(|w| w.name.clone())
            .unwrap_or_else(|| wrestler_name.to_string());

        if federation.roster_slot(&canonical).is_some() {
            return Err(BookingError::AlreadyInRoster {
                wrestler: canonical,
            });
        }

        let roster_size = match state.federation_mut(guild, &actor.user_id) {
            Some(fed) => {
                fed.roster.push(RosterSlot {
                    wrestler_name: canonical.clone(),
                    signed_at: now,
                });
                fed.roster.len()
            }
            None => 0,
        };

        if let Some(wrestler) = state.wrestler_mut(guild, &canonical) {
            wrestler.drafted = true;
            wrestler.owner_id = Some(actor.user_id.clone());
            wrestler.owner_fed_name = Some(federation.name.clone());
        }

        self.persist(&state).await?;

        tracing::info!(guild = %guild, user = %actor.user_id, "✅ {} signed with {}", canonical, federation.name);
        Ok(PickOutcome {
            wrestler: canonical,
            federation: federation.name,
            roster_size,
        })
    }

    pub async fn federation(&self, actor: &Actor) -> Result<Federation> {
        let state = self.state.lock().await;
        state
            .federation(&actor.guild_id, &actor.user_id)
            .cloned()
            .ok_or_else(|| BookingError::FederationNotFound {
                user_id: actor.user_id.clone(),
            })
    }

    /// Opens the next show of the caller's federation.
    pub async fn open_show(
        &self,
        actor: &Actor,
        kind: ShowKind,
        title: Option<String>,
    ) -> Result<Show> {
        let mut state = self.state.lock().await;

        let federation_name = state
            .federation(&actor.guild_id, &actor.user_id)
            .map(|f| f.name.clone())
            .ok_or_else(|| BookingError::FederationNotFound {
                user_id: actor.user_id.clone(),
            })?;

        let show_number = state
            .shows_of(&actor.guild_id, &actor.user_id)
            .map(|s| s.show_number)
            .max()
            .map_or(1, |last| last + 1);

        let show = Show {
            show_number,
            user_id: actor.user_id.clone(),
            guild_id: actor.guild_id.clone(),
            federation_name,
            kind,
            title,
            ratings: Vec::new(),
            average_rating: 0.0,
            finalized: false,
            created_at: self.clock.now(),
            finalized_at: None,
        };
        state.shows.push(show.clone());
        self.persist(&state).await?;

        tracing::info!(guild = %actor.guild_id, user = %actor.user_id, "🎬 Show #{} opened ({:?})", show_number, kind);
        Ok(show)
    }

    /// `choice` is the 1-based reaction index into [`STAR_VALUES`].
    pub async fn vote(
        &self,
        voter: &Actor,
        owner_id: &str,
        show_number: u32,
        choice: usize,
    ) -> Result<VoteOutcome> {
        if !(1..=STAR_VALUES.len()).contains(&choice) {
            return Err(BookingError::InvalidVote {
                reason: format!("Pick a reaction between 1 and {}", STAR_VALUES.len()),
            });
        }
        let stars = STAR_VALUES[choice - 1];

        let mut state = self.state.lock().await;

        let show = state
            .shows
            .iter_mut()
            .find(|s| {
                s.guild_id == voter.guild_id && s.user_id == owner_id && s.show_number == show_number
            })
            .filter(|s| !s.finalized)
            .ok_or(BookingError::ShowNotFound { show_number })?;

        if show.ratings.iter().any(|v| v.user_id == voter.user_id) {
            return Err(BookingError::InvalidVote {
                reason: format!("You already voted on show #{}", show_number),
            });
        }

        show.ratings.push(Vote {
            user_id: voter.user_id.clone(),
            stars,
        });
        let outcome = VoteOutcome {
            show_number,
            stars,
            total_votes: show.ratings.len(),
        };
        self.persist(&state).await?;

        tracing::debug!(voter = %voter.user_id, owner = %owner_id, "⭐ Vote {} on show #{}", stars, show_number);
        Ok(outcome)
    }

    pub async fn finalize(&self, actor: &Actor, show_number: u32) -> Result<Show> {
        let mut state = self.state.lock().await;
        let now = self.clock.now();

        let show = state
            .shows
            .iter_mut()
            .find(|s| {
                s.guild_id == actor.guild_id
                    && s.user_id == actor.user_id
                    && s.show_number == show_number
                    && !s.finalized
            })
            .ok_or(BookingError::ShowNotFound { show_number })?;

        if show.ratings.is_empty() {
            return Err(BookingError::NoVotes { show_number });
        }

        let average = show.ratings.iter().map(|v| v.stars).sum::<f64>() / show.ratings.len() as f64;
        validate_range("show.average_rating", average, 0.0, 5.0)?;

        show.average_rating = average;
        show.finalized = true;
        show.finalized_at = Some(now);
        let finalized = show.clone();
        self.persist(&state).await?;

        tracing::info!(
            guild = %actor.guild_id,
            user = %actor.user_id,
            "📊 Show #{} finalized at {:.2}/5 from {} votes",
            show_number,
            average,
            finalized.ratings.len()
        );
        Ok(finalized)
    }

    pub async fn create_belt(&self, actor: &Actor, name: &str) -> Result<Belt> {
        let mut state = self.state.lock().await;

        let federation_name = state
            .federation(&actor.guild_id, &actor.user_id)
            .map(|f| f.name.clone())
            .ok_or_else(|| BookingError::FederationNotFound {
                user_id: actor.user_id.clone(),
            })?;

        if state
            .belts_of(&actor.guild_id, &actor.user_id)
            .any(|b| same_title(&b.name, name))
        {
            return Err(BookingError::BeltExists {
                belt: name.to_string(),
            });
        }

        let belt = Belt {
            user_id: actor.user_id.clone(),
            guild_id: actor.guild_id.clone(),
            federation_name,
            name: name.to_string(),
            reigns: Vec::new(),
            created_at: self.clock.now(),
        };
        state.belts.push(belt.clone());
        self.persist(&state).await?;

        tracing::info!(guild = %actor.guild_id, user = %actor.user_id, "🏆 Belt created: {}", name);
        Ok(belt)
    }

    /// Resolves every member of `name` (single or `A & B`) to the roster's spelling.
    fn roster_names(federation: &Federation, name: &str) -> Result<Vec<String>> {
        let members = team_members(name);
        if members.is_empty() {
            return Err(BookingError::NotInRoster {
                wrestler: name.to_string(),
            });
        }

        members
            .into_iter()
            .map(|member| {
                federation
                    .roster_slot(member)
                    .map(|slot| slot.wrestler_name.clone())
                    .ok_or_else(|| BookingError::NotInRoster {
                        wrestler: member.to_string(),
                    })
            })
            .collect()
    }

    pub async fn set_champion(
        &self,
        actor: &Actor,
        belt_name: &str,
        champion: &str,
    ) -> Result<ChampionChange> {
        let mut state = self.state.lock().await;
        let now = self.clock.now();

        let federation = state
            .federation(&actor.guild_id, &actor.user_id)
            .cloned()
            .ok_or_else(|| BookingError::FederationNotFound {
                user_id: actor.user_id.clone(),
            })?;

        let champion = Self::roster_names(&federation, champion)?.join(TAG_TEAM_SEPARATOR);

        let belt = state
            .belt_mut(&actor.guild_id, &actor.user_id, belt_name)
            .ok_or_else(|| BookingError::BeltNotFound {
                belt: belt_name.to_string(),
            })?;

        let previous = belt.current_champion().map(str::to_string);
        if previous.as_deref().is_some_and(|p| same_name(p, &champion)) {
            return Ok(ChampionChange {
                belt: belt.name.clone(),
                champion,
                federation: federation.name,
                previous,
                unchanged: true,
            });
        }

        if let Some(reign) = belt.current_reign_mut() {
            reign.lost_at = Some(now);
        }
        belt.reigns.push(Reign {
            champion: champion.clone(),
            won_at: now,
            lost_at: None,
            defenses: 0,
        });

        let change = ChampionChange {
            belt: belt.name.clone(),
            champion,
            federation: federation.name,
            previous,
            unchanged: false,
        };
        self.persist(&state).await?;

        tracing::info!(
            guild = %actor.guild_id,
            user = %actor.user_id,
            "👑 New {} champion: {} (was {:?})",
            change.belt,
            change.champion,
            change.previous
        );
        Ok(change)
    }

    pub async fn vacate(&self, actor: &Actor, belt_name: &str) -> Result<TitleUpdate> {
        let mut state = self.state.lock().await;
        let now = self.clock.now();

        if state.federation(&actor.guild_id, &actor.user_id).is_none() {
            return Err(BookingError::FederationNotFound {
                user_id: actor.user_id.clone(),
            });
        }

        let belt = state
            .belt_mut(&actor.guild_id, &actor.user_id, belt_name)
            .ok_or_else(|| BookingError::BeltNotFound {
                belt: belt_name.to_string(),
            })?;
        let belt_display = belt.name.clone();

        let reign = belt
            .current_reign_mut()
            .ok_or_else(|| BookingError::BeltVacant {
                belt: belt_display.clone(),
            })?;
        reign.lost_at = Some(now);
        let update = TitleUpdate {
            belt: belt_display,
            reign: reign.clone(),
        };
        self.persist(&state).await?;

        tracing::info!(guild = %actor.guild_id, user = %actor.user_id, "{} vacated by {}", update.belt, update.reign.champion);
        Ok(update)
    }

    pub async fn defend(&self, actor: &Actor, belt_name: &str) -> Result<TitleUpdate> {
        let mut state = self.state.lock().await;

        if state.federation(&actor.guild_id, &actor.user_id).is_none() {
            return Err(BookingError::FederationNotFound {
                user_id: actor.user_id.clone(),
            });
        }

        let belt = state
            .belt_mut(&actor.guild_id, &actor.user_id, belt_name)
            .ok_or_else(|| BookingError::BeltNotFound {
                belt: belt_name.to_string(),
            })?;
        let belt_display = belt.name.clone();

        let reign = belt
            .current_reign_mut()
            .ok_or_else(|| BookingError::BeltVacant {
                belt: belt_display.clone(),
            })?;
        reign.defenses += 1;
        let update = TitleUpdate {
            belt: belt_display,
            reign: reign.clone(),
        };
        self.persist(&state).await?;

        tracing::info!(
            guild = %actor.guild_id,
            user = %actor.user_id,
            "🛡️ {} retains the {} ({} defenses)",
            update.reign.champion,
            update.belt,
            update.reign.defenses
        );
        Ok(update)
    }

    /// Records a result; each side may be a tag team (`A & B`).
    pub async fn record_match(
        &self,
        actor: &Actor,
        winners: &str,
        losers: &str,
    ) -> Result<MatchOutcome> {
        let mut state = self.state.lock().await;
        let guild = actor.guild_id.as_str();

        let federation = state
            .federation(guild, &actor.user_id)
            .cloned()
            .ok_or_else(|| BookingError::FederationNotFound {
                user_id: actor.user_id.clone(),
            })?;

        let winners = Self::roster_names(&federation, winners)?;
        let losers = Self::roster_names(&federation, losers)?;

        if let Some(both) = winners
            .iter()
            .find(|w| losers.iter().any(|l| same_name(w, l)))
        {
            return Err(BookingError::ValidationError {
                message: format!("{} cannot be on both sides of a match", both),
            });
        }

        for name in &winners {
            if let Some(wrestler) = state.wrestler_mut(guild, name) {
                wrestler.wins += 1;
            }
        }
        for name in &losers {
            if let Some(wrestler) = state.wrestler_mut(guild, name) {
                wrestler.losses += 1;
            }
        }
        self.persist(&state).await?;

        tracing::info!(guild = %guild, user = %actor.user_id, "🤼 {:?} def. {:?}", winners, losers);
        Ok(MatchOutcome { winners, losers })
    }

    pub async fn federation_stats(&self, actor: &Actor) -> Result<FederationStats> {
        let state = self.state.lock().await;

        let federation = state
            .federation(&actor.guild_id, &actor.user_id)
            .cloned()
            .ok_or_else(|| BookingError::FederationNotFound {
                user_id: actor.user_id.clone(),
            })?;

        let ratings: Vec<f64> = state
            .shows_of(&actor.guild_id, &actor.user_id)
            .filter(|s| s.finalized)
            .map(|s| s.average_rating)
            .collect();
        let average_rating = if ratings.is_empty() {
            None
        } else {
            Some(ratings.iter().sum::<f64>() / ratings.len() as f64)
        };

        let champions = state
            .belts_of(&actor.guild_id, &actor.user_id)
            .map(|b| (b.name.clone(), b.current_champion().map(str::to_string)))
            .collect();

        Ok(FederationStats {
            federation,
            finalized_shows: ratings.len(),
            average_rating,
            champions,
        })
    }

    fn rate(&self, state: &BookingState, federation: &Federation) -> Result<ScoreResult> {
        let input = scoring_input(state, federation);
        input.validate()?;
        let ranking = guild_ranking(state, &federation.guild_id);
        Ok(compute_tv_rating(&input, &ranking, self.clock.now()))
    }

    pub async fn tv_rating(&self, actor: &Actor) -> Result<FederationRating> {
        let state = self.state.lock().await;

        let federation = state
            .federation(&actor.guild_id, &actor.user_id)
            .ok_or_else(|| BookingError::FederationNotFound {
                user_id: actor.user_id.clone(),
            })?;

        let result = self.rate(&state, federation)?;
        tracing::debug!("📺 {} rated {:.2} ({})", federation.name, result.value, result.grade);

        Ok(FederationRating {
            federation_name: federation.name.clone(),
            result,
        })
    }

    /// All federations of a guild ranked by TV rating.
    pub async fn rankings(&self, guild_id: &str) -> Result<Vec<RankedPromotion>> {
        let state = self.state.lock().await;

        let entries = state
            .federations
            .iter()
            .filter(|f| f.guild_id == guild_id)
            .map(|f| Ok((f.name.clone(), f.user_id.clone(), self.rate(&state, f)?)))
            .collect::<Result<Vec<_>>>()?;

        Ok(rank_promotions(entries))
    }

    pub async fn top_wrestlers(&self, guild_id: &str, n: usize) -> Vec<RankedWrestler> {
        let state = self.state.lock().await;
        guild_ranking(&state, guild_id).top(n).to_vec()
    }

    /// Guild ids that have at least one federation.
    pub async fn guilds(&self) -> Vec<String> {
        let state = self.state.lock().await;
        let mut guilds: Vec<String> = state.federations.iter().map(|f| f.guild_id.clone()).collect();
        guilds.sort();
        guilds.dedup();
        guilds
    }
}
