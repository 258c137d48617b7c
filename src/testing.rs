//! Testing fixtures.

use rustc_hash::FxHashMap;

use crate::league::{LeagueStructure, Team};
use crate::sim::SimulationSet;
use crate::standings::{StandingsRecord, TeamState};

/// Two conferences of two divisions each, NHL-shaped but smaller.
pub(crate) fn fixture_league() -> LeagueStructure {
    let mut divisions = FxHashMap::default();
    for team in ["Boston", "Toronto", "Tampa", "Florida", "Detroit"] {
        divisions.insert(team.into(), "Atlantic".into());
    }
    for team in ["Rangers", "Carolina", "Jersey", "Pittsburgh"] {
        divisions.insert(team.into(), "Metropolitan".into());
    }
    for team in ["Colorado", "Dallas", "Winnipeg", "Nashville"] {
        divisions.insert(team.into(), "Central".into());
    }
    for team in ["Vegas", "Edmonton", "Kings", "Vancouver"] {
        divisions.insert(team.into(), "Pacific".into());
    }
    let mut conferences = FxHashMap::default();
    conferences.insert("Atlantic".into(), "East".into());
    conferences.insert("Metropolitan".into(), "East".into());
    conferences.insert("Central".into(), "West".into());
    conferences.insert("Pacific".into(), "West".into());
    LeagueStructure::new(divisions, conferences)
}

/// A league of one division in one conference, for isolating the ranking rules.
/// Teams A1 through A8 are pre-registered.
pub(crate) fn solo_division_league() -> LeagueStructure {
    let mut divisions = FxHashMap::default();
    for team in ["A1", "A2", "A3", "A4", "A5", "A6", "A7", "A8"] {
        divisions.insert(team.into(), "Alpha".into());
    }
    let mut conferences = FxHashMap::default();
    conferences.insert("Alpha".into(), "Omega".into());
    LeagueStructure::new(divisions, conferences)
}

pub(crate) fn record(
    team: &str,
    wins: u16,
    losses: u16,
    ot: u16,
    points: u16,
    regulation_wins: u16,
) -> StandingsRecord {
    StandingsRecord {
        team: team.into(),
        wins,
        losses,
        ot,
        points,
        regulation_wins,
    }
}

/// Builds a snapshot state directly, assuming an 82-game schedule.
pub(crate) fn state(team: &str, points: u16, regulation_wins: u16, games_played: u16) -> TeamState {
    let games_remaining = 82 - games_played;
    TeamState {
        team: team.into(),
        points,
        regulation_wins,
        games_played,
        games_remaining,
        max_possible_points: points + 2 * games_remaining,
    }
}

pub(crate) fn states_of(states: Vec<TeamState>) -> FxHashMap<Team, TeamState> {
    states
        .into_iter()
        .map(|state| (state.team.clone(), state))
        .collect()
}

pub(crate) fn sims_of(sequences: Vec<(&str, Vec<u16>)>) -> SimulationSet {
    let points: FxHashMap<Team, Vec<u16>> = sequences
        .into_iter()
        .map(|(team, outcomes)| (team.into(), outcomes))
        .collect();
    SimulationSet::new(points).unwrap()
}
