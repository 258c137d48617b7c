//! Reading snapshot and league files. Retrieval from a backend is a separate
//! collaborator; the engine only sees already-parsed inputs.

use std::fs::File;
use std::io;
use std::path::Path;

use chrono::NaiveDate;
use rustc_hash::FxHashMap;
use serde::de::DeserializeOwned;
use serde::Deserialize;
use serde_json::from_reader;

use crate::league::{LeagueStructure, Team};
use crate::standings::StandingsRecord;

/// One day's inputs: the standings as of `date` plus the simulated final point
/// totals for the rest of the season.
#[derive(Clone, Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SnapshotData {
    #[serde(default)]
    pub date: Option<NaiveDate>,
    pub standings: Vec<StandingsRecord>,
    pub simulations: FxHashMap<Team, Vec<u16>>,
}

/// Reads a JSON-encoded type from a given file `path`.
pub fn read_json<D: DeserializeOwned>(path: impl AsRef<Path>) -> Result<D, io::Error> {
    let file = File::open(path)?;
    Ok(from_reader(file)?)
}

pub fn read_snapshot(path: impl AsRef<Path>) -> anyhow::Result<SnapshotData> {
    Ok(read_json(path)?)
}

pub fn read_league(path: impl AsRef<Path>) -> anyhow::Result<LeagueStructure> {
    let league: LeagueStructure = read_json(path)?;
    league.validate()?;
    Ok(league)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parse_snapshot_json() {
        let json = r#"{
            "date": "2026-03-14",
            "standings": [
                {"team": "Boston", "wins": 40, "losses": 20, "ot": 10, "points": 90, "regulationWins": 30}
            ],
            "simulations": {"Boston": [100, 104, 98]}
        }"#;
        let snapshot: SnapshotData = serde_json::from_str(json).unwrap();
        assert_eq!(
            Some(NaiveDate::from_ymd_opt(2026, 3, 14).unwrap()),
            snapshot.date
        );
        assert_eq!(1, snapshot.standings.len());
        assert_eq!(30, snapshot.standings[0].regulation_wins);
        assert_eq!(vec![100, 104, 98], snapshot.simulations[&Team::from("Boston")]);
    }

    #[test]
    fn parse_snapshot_without_date() {
        let json = r#"{"standings": [], "simulations": {}}"#;
        let snapshot: SnapshotData = serde_json::from_str(json).unwrap();
        assert_eq!(None, snapshot.date);
    }

    #[test]
    fn parse_league_with_defaults() {
        let json = r#"{
            "divisions": {"Boston": "Atlantic"},
            "conferences": {"Atlantic": "East"}
        }"#;
        let league: LeagueStructure = serde_json::from_str(json).unwrap();
        assert_eq!(82, league.schedule_length);
        assert_eq!(3, league.division_spots);
        assert_eq!(2, league.wildcard_spots);
    }

    #[test]
    fn parse_league_with_overrides() {
        let json = r#"{
            "divisions": {"Boston": "Atlantic"},
            "conferences": {"Atlantic": "East"},
            "scheduleLength": 56,
            "divisionSpots": 4,
            "wildcardSpots": 1
        }"#;
        let league: LeagueStructure = serde_json::from_str(json).unwrap();
        assert_eq!(56, league.schedule_length);
        assert_eq!(4, league.division_spots);
        assert_eq!(1, league.wildcard_spots);
    }

    #[test]
    fn missing_standings_field_rejected() {
        let json = r#"{
            "standings": [{"team": "Boston", "wins": 40, "losses": 20, "ot": 10, "points": 90}],
            "simulations": {}
        }"#;
        assert!(serde_json::from_str::<SnapshotData>(json).is_err());
    }
}
