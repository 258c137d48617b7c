//! Normalization of raw standings records into per-team snapshot state.

use rustc_hash::FxHashMap;
use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::league::{LeagueStructure, Team, UnknownTeam};
use crate::rank::RankKey;

/// One row of the current standings, as supplied by the upstream data source.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct StandingsRecord {
    pub team: Team,
    pub wins: u16,
    pub losses: u16,
    pub ot: u16,
    pub points: u16,
    pub regulation_wins: u16,
}

/// Snapshot state for one team, immutable once produced. `max_possible_points`
/// assumes the team wins out: two points for each remaining game.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct TeamState {
    pub team: Team,
    pub points: u16,
    pub regulation_wins: u16,
    pub games_played: u16,
    pub games_remaining: u16,
    pub max_possible_points: u16,
}
impl TeamState {
    pub fn rank_key(&self) -> RankKey {
        RankKey::new(self.points, self.regulation_wins)
    }
}

#[derive(Debug, Error, PartialEq, Eq)]
pub enum NormalizeError {
    #[error("{0}")]
    UnknownTeam(#[from] UnknownTeam),

    #[error("{team} has played {games_played} games of a {schedule_length}-game schedule")]
    ExcessGames {
        team: Team,
        games_played: u16,
        schedule_length: u16,
    },

    #[error("{team} has {points} points from {games_played} games; at most {max} are attainable")]
    ExcessPoints {
        team: Team,
        points: u16,
        games_played: u16,
        max: u16,
    },

    #[error("duplicate standings record for {0}")]
    DuplicateTeam(Team),
}

/// Converts raw standings records into a uniform per-team state. Fails on the
/// first inconsistent record; clinch and probability outputs are only meaningful
/// over a fully consistent snapshot.
pub fn normalize(
    records: &[StandingsRecord],
    league: &LeagueStructure,
) -> Result<FxHashMap<Team, TeamState>, NormalizeError> {
    let mut states = FxHashMap::with_capacity_and_hasher(records.len(), Default::default());
    for record in records {
        league.division_of(&record.team)?;

        let games_played = record.wins + record.losses + record.ot;
        if games_played > league.schedule_length {
            return Err(NormalizeError::ExcessGames {
                team: record.team.clone(),
                games_played,
                schedule_length: league.schedule_length,
            });
        }
        // points are 2W + OTL, so twice the games played is a hard ceiling
        let max = 2 * games_played;
        if record.points > max {
            return Err(NormalizeError::ExcessPoints {
                team: record.team.clone(),
                points: record.points,
                games_played,
                max,
            });
        }

        let games_remaining = league.schedule_length - games_played;
        let state = TeamState {
            team: record.team.clone(),
            points: record.points,
            regulation_wins: record.regulation_wins,
            games_played,
            games_remaining,
            max_possible_points: record.points + 2 * games_remaining,
        };
        if states.insert(record.team.clone(), state).is_some() {
            return Err(NormalizeError::DuplicateTeam(record.team.clone()));
        }
    }
    Ok(states)
}
