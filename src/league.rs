//! Static league structure: which division a team plays in, which conference a
//! division belongs to, and the berth counts that govern qualification.

use std::error::Error;
use std::fmt::{Display, Formatter};

use anyhow::anyhow;
use rustc_hash::FxHashMap;
use serde::{Deserialize, Serialize};
use thiserror::Error;

pub const DEFAULT_SCHEDULE_LENGTH: u16 = 82;
pub const DEFAULT_DIVISION_SPOTS: usize = 3;
pub const DEFAULT_WILDCARD_SPOTS: usize = 2;

#[derive(Clone, Debug, Hash, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Team(pub String);
impl Team {
    pub fn name(&self) -> &str {
        &self.0
    }
}
impl Display for Team {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}
impl From<&str> for Team {
    fn from(name: &str) -> Self {
        Self(name.into())
    }
}

#[derive(Clone, Debug, Hash, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Division(pub String);
impl Display for Division {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}
impl From<&str> for Division {
    fn from(name: &str) -> Self {
        Self(name.into())
    }
}

#[derive(Clone, Debug, Hash, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Conference(pub String);
impl Display for Conference {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}
impl From<&str> for Conference {
    fn from(name: &str) -> Self {
        Self(name.into())
    }
}

#[derive(Debug, Clone, Error, PartialEq, Eq)]
#[error("unknown team {0}")]
pub struct UnknownTeam(pub Team);

#[derive(Debug, Error)]
#[error("{0}")]
pub struct ValidationError(#[from] pub Box<dyn Error + Send + Sync>);

impl From<anyhow::Error> for ValidationError {
    fn from(value: anyhow::Error) -> Self {
        ValidationError(value.into())
    }
}

/// The full structural description of a league: membership maps plus the season
/// format. The engine carries no hardcoded league facts; everything comes from
/// here.
#[derive(Clone, Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LeagueStructure {
    /// Maps every team to its division.
    pub divisions: FxHashMap<Team, Division>,

    /// Maps every division to its conference.
    pub conferences: FxHashMap<Division, Conference>,

    /// Games each team plays over a full season.
    #[serde(default = "default_schedule_length")]
    pub schedule_length: u16,

    /// Direct qualification spots per division.
    #[serde(default = "default_division_spots")]
    pub division_spots: usize,

    /// Wildcard spots per conference.
    #[serde(default = "default_wildcard_spots")]
    pub wildcard_spots: usize,
}

fn default_schedule_length() -> u16 {
    DEFAULT_SCHEDULE_LENGTH
}
fn default_division_spots() -> usize {
    DEFAULT_DIVISION_SPOTS
}
fn default_wildcard_spots() -> usize {
    DEFAULT_WILDCARD_SPOTS
}

impl LeagueStructure {
    pub fn new(
        divisions: FxHashMap<Team, Division>,
        conferences: FxHashMap<Division, Conference>,
    ) -> Self {
        Self {
            divisions,
            conferences,
            schedule_length: DEFAULT_SCHEDULE_LENGTH,
            division_spots: DEFAULT_DIVISION_SPOTS,
            wildcard_spots: DEFAULT_WILDCARD_SPOTS,
        }
    }

    pub fn validate(&self) -> Result<(), ValidationError> {
        if self.schedule_length == 0 {
            return Err(anyhow!("schedule length cannot be zero").into());
        }
        if self.division_spots == 0 {
            return Err(anyhow!("number of division spots cannot be zero").into());
        }
        if self.wildcard_spots == 0 {
            return Err(anyhow!("number of wildcard spots cannot be zero").into());
        }
        for division in self.divisions.values() {
            if !self.conferences.contains_key(division) {
                return Err(anyhow!("division {division} is not mapped to a conference").into());
            }
        }
        Ok(())
    }

    pub fn division_of(&self, team: &Team) -> Result<&Division, UnknownTeam> {
        self.divisions
            .get(team)
            .ok_or_else(|| UnknownTeam(team.clone()))
    }

    pub fn conference_of(&self, team: &Team) -> Result<&Conference, UnknownTeam> {
        let division = self.division_of(team)?;
        self.conferences
            .get(division)
            .ok_or_else(|| UnknownTeam(team.clone()))
    }

    /// All conferences, deduplicated, in lexicographic order.
    pub fn conference_list(&self) -> Vec<&Conference> {
        let mut conferences: Vec<_> = self.conferences.values().collect();
        conferences.sort();
        conferences.dedup();
        conferences
    }

    /// Divisions belonging to the given conference, in lexicographic order.
    pub fn divisions_of(&self, conference: &Conference) -> Vec<&Division> {
        let mut divisions: Vec<_> = self
            .conferences
            .iter()
            .filter(|(_, c)| *c == conference)
            .map(|(d, _)| d)
            .collect();
        divisions.sort();
        divisions
    }

    /// Buckets an arbitrary roster of teams by division. Teams within a bucket are
    /// sorted by name, giving a deterministic base order for the stable ranking
    /// sorts downstream.
    pub fn group_by_division<'a, 'b>(
        &'a self,
        teams: impl IntoIterator<Item = &'b Team>,
    ) -> Result<FxHashMap<&'a Division, Vec<&'b Team>>, UnknownTeam> {
        let mut groups: FxHashMap<&'a Division, Vec<&'b Team>> = FxHashMap::default();
        for team in teams {
            let division = self.division_of(team)?;
            groups.entry(division).or_default().push(team);
        }
        for members in groups.values_mut() {
            members.sort();
        }
        Ok(groups)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::testing::fixture_league;

    #[test]
    fn validate_fixture() {
        assert!(fixture_league().validate().is_ok());
    }

    #[test]
    fn validate_zero_spots() {
        let mut league = fixture_league();
        league.division_spots = 0;
        assert_eq!(
            "number of division spots cannot be zero",
            league.validate().unwrap_err().to_string()
        );
    }

    #[test]
    fn validate_unmapped_division() {
        let mut league = fixture_league();
        league
            .divisions
            .insert("Drifters".into(), "Orphan".into());
        assert_eq!(
            "division Orphan is not mapped to a conference",
            league.validate().unwrap_err().to_string()
        );
    }

    #[test]
    fn resolve_division_and_conference() {
        let league = fixture_league();
        assert_eq!(
            &Division::from("Atlantic"),
            league.division_of(&"Boston".into()).unwrap()
        );
        assert_eq!(
            &Conference::from("East"),
            league.conference_of(&"Boston".into()).unwrap()
        );
        assert_eq!(
            UnknownTeam("Nomads".into()),
            league.division_of(&"Nomads".into()).unwrap_err()
        );
    }

    #[test]
    fn conference_list_deduplicated() {
        let league = fixture_league();
        let conferences = league.conference_list();
        assert_eq!(
            vec![&Conference::from("East"), &Conference::from("West")],
            conferences
        );
    }

    #[test]
    fn divisions_of_conference_sorted() {
        let league = fixture_league();
        assert_eq!(
            vec![&Division::from("Atlantic"), &Division::from("Metropolitan")],
            league.divisions_of(&"East".into())
        );
    }

    #[test]
    fn group_by_division_sorted_buckets() {
        let league = fixture_league();
        let teams: Vec<Team> = vec!["Toronto".into(), "Boston".into(), "Dallas".into()];
        let groups = league.group_by_division(teams.iter()).unwrap();
        assert_eq!(
            vec![&Team::from("Boston"), &Team::from("Toronto")],
            groups[&Division::from("Atlantic")]
        );
        assert_eq!(vec![&Team::from("Dallas")], groups[&Division::from("Central")]);
    }
}
