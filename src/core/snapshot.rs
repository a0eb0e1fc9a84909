use crate::core::ranking::{compute_global_wrestler_ranking, WrestlerRanking, WrestlerRecord};
use crate::core::tv_rating::{BeltHistory, RatedEvent, ScoringInput, TitleReign};
use crate::domain::model::{Belt, BookingState, Federation, Show};

impl From<&Show> for RatedEvent {
    fn from(show: &Show) -> Self {
        Self {
            rating: show.average_rating,
            occurred_at: show.created_at,
            kind: show.kind,
            vote_count: show.ratings.len() as u32,
        }
    }
}

impl From<&Belt> for BeltHistory {
    fn from(belt: &Belt) -> Self {
        Self {
            belt_name: belt.name.clone(),
            reigns: belt
                .reigns
                .iter()
                .map(|reign| TitleReign {
                    champion_name: reign.champion.clone(),
                    won_at: reign.won_at,
                    lost_at: reign.lost_at,
                    defense_count: reign.defenses,
                })
                .collect(),
        }
    }
}

/// Every wrestler tracked in the guild: the population for star power and
/// champion dominance.
pub fn guild_population(state: &BookingState, guild_id: &str) -> Vec<WrestlerRecord> {
    state
        .guild_wrestlers(guild_id)
        .map(|w| WrestlerRecord::new(w.name.clone(), w.wins, w.losses))
        .collect()
}

pub fn guild_ranking(state: &BookingState, guild_id: &str) -> WrestlerRanking {
    compute_global_wrestler_ranking(&guild_population(state, guild_id))
}

/// Materializes one federation's scorer input from persisted state.
pub fn scoring_input(state: &BookingState, federation: &Federation) -> ScoringInput {
    let events = state
        .shows_of(&federation.guild_id, &federation.user_id)
        .filter(|show| show.finalized)
        .map(RatedEvent::from)
        .collect();

    let roster = federation
        .roster
        .iter()
        .map(|slot| match state.wrestler(&federation.guild_id, &slot.wrestler_name) {
            Some(w) => WrestlerRecord::new(slot.wrestler_name.clone(), w.wins, w.losses),
            None => WrestlerRecord::new(slot.wrestler_name.clone(), 0, 0),
        })
        .collect();

    let belts = state
        .belts_of(&federation.guild_id, &federation.user_id)
        .map(BeltHistory::from)
        .collect();

    ScoringInput {
        events,
        roster,
        belts,
    }
}
