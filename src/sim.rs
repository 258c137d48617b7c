//! Replays each simulated season outcome against the qualification rules and
//! tallies per-team qualification counts, yielding playoff probabilities.
//!
//! The critical input invariant: index `i` across all teams' simulated point
//! sequences must represent the same simulated universe. Sequence lengths are
//! validated up front; index alignment itself is a caller contract — feeding
//! independently shuffled draws silently produces statistically meaningless
//! probabilities.

use rayon::prelude::*;
use rustc_hash::FxHashMap;
use serde::Serialize;
use thiserror::Error;

use crate::clinch::ClinchStatus;
use crate::league::{LeagueStructure, Team, UnknownTeam};
use crate::rank::{self, RankKey};
use crate::standings::TeamState;


/// A batch of simulated season outcomes: for every team, one final point total
/// per simulated universe. Construction enforces equal sequence lengths.
#[derive(Clone, Debug)]
pub struct SimulationSet {
    runs: usize,
    points: FxHashMap<Team, Vec<u16>>,
}

#[derive(Debug, Error, PartialEq, Eq)]
pub enum SimError {
    #[error("no simulation runs supplied")]
    NoRuns,

    #[error("{team} has {actual} simulated outcomes where {expected} were expected")]
    LengthMismatch {
        team: Team,
        expected: usize,
        actual: usize,
    },
}

impl SimulationSet {
    pub fn new(points: FxHashMap<Team, Vec<u16>>) -> Result<Self, SimError> {
        let mut teams: Vec<&Team> = points.keys().collect();
        teams.sort();
        let runs = match teams.first() {
            None => 0,
            Some(team) => points[*team].len(),
        };
        if runs == 0 {
            return Err(SimError::NoRuns);
        }
        for team in teams {
            let actual = points[team].len();
            if actual != runs {
                return Err(SimError::LengthMismatch {
                    team: team.clone(),
                    expected: runs,
                    actual,
                });
            }
        }
        Ok(Self { runs, points })
    }

    /// Number of simulated universes `S`.
    pub fn runs(&self) -> usize {
        self.runs
    }

    pub fn teams(&self) -> impl Iterator<Item = &Team> {
        self.points.keys()
    }

    pub fn points_for(&self, team: &Team) -> Option<&[u16]> {
        self.points.get(team).map(Vec::as_slice)
    }

    /// Mean projected points per team, for display ordering.
    pub fn mean_points(&self) -> FxHashMap<Team, f64> {
        self.points
            .iter()
            .map(|(team, outcomes)| {
                let sum: u64 = outcomes.iter().map(|&p| p as u64).sum();
                (team.clone(), sum as f64 / outcomes.len() as f64)
            })
            .collect()
    }
}

/// Monte Carlo qualification probabilities for one team. The two categories are
/// mutually exclusive per universe, so `total` is their sum.
#[derive(Clone, Copy, Debug, Default, PartialEq, Serialize)]
pub struct QualificationProb {
    pub division: f64,
    pub wildcard: f64,
    pub total: f64,
}

#[derive(Debug, Error, PartialEq, Eq)]
pub enum AggregateError {
    #[error("{0}")]
    UnknownTeam(#[from] UnknownTeam),

    #[error("no standings record for simulated team {0}")]
    MissingStandings(Team),

    #[error("no simulated outcomes for {0}")]
    MissingSimulation(Team),
}

#[derive(Clone, Copy, Debug, Default)]
struct Tally {
    division: u64,
    wildcard: u64,
}
impl Tally {
    fn merge(&mut self, other: &Tally) {
        self.division += other.division;
        self.wildcard += other.wildcard;
    }
}

struct DivisionGroup {
    members: Vec<usize>,
    clinched_division: usize,
}

struct ConferenceGroup {
    divisions: Vec<usize>,
    members: Vec<usize>,
    clinched_wildcard: usize,
}

/// Immutable per-aggregation context shared across workers. Team indices follow
/// the lexicographic roster order.
struct Context<'a> {
    division_spots: usize,
    wildcard_spots: usize,
    regulation_wins: Vec<u16>,
    clinch: Vec<ClinchStatus>,
    sim_points: Vec<&'a [u16]>,
    divisions: Vec<DivisionGroup>,
    conferences: Vec<ConferenceGroup>,
}

/// Derives qualification probabilities by replaying every simulated universe.
/// Already-clinched teams are pinned at probability one in their category and
/// occupy fixed spots in the exclusion logic.
pub fn aggregate(
    states: &FxHashMap<Team, TeamState>,
    clinch: &FxHashMap<Team, ClinchStatus>,
    league: &LeagueStructure,
    sims: &SimulationSet,
) -> Result<FxHashMap<Team, QualificationProb>, AggregateError> {
    for team in states.keys() {
        if sims.points_for(team).is_none() {
            return Err(AggregateError::MissingSimulation(team.clone()));
        }
    }

    let mut roster: Vec<&Team> = sims.teams().collect();
    roster.sort();

    let mut index_of: FxHashMap<&Team, usize> = FxHashMap::default();
    let mut regulation_wins = Vec::with_capacity(roster.len());
    let mut clinch_by_index = Vec::with_capacity(roster.len());
    let mut sim_points = Vec::with_capacity(roster.len());
    for (index, team) in roster.iter().enumerate() {
        let state = states
            .get(*team)
            .ok_or_else(|| AggregateError::MissingStandings((*team).clone()))?;
        index_of.insert(*team, index);
        regulation_wins.push(state.regulation_wins);
        clinch_by_index.push(clinch.get(*team).copied().unwrap_or_default());
        sim_points.push(sims.points_for(team).unwrap());
    }

    let by_division = league.group_by_division(roster.iter().copied())?;
    let mut divisions = vec![];
    let mut conferences = vec![];
    for conference in league.conference_list() {
        let mut group = ConferenceGroup {
            divisions: vec![],
            members: vec![],
            clinched_wildcard: 0,
        };
        for division in league.divisions_of(conference) {
            let Some(members) = by_division.get(division) else {
                continue;
            };
            let members: Vec<usize> = members.iter().map(|team| index_of[team]).collect();
            let clinched_division = members
                .iter()
                .filter(|&&m| clinch_by_index[m] == ClinchStatus::Division)
                .count();
            group.divisions.push(divisions.len());
            group.members.extend(&members);
            divisions.push(DivisionGroup {
                members,
                clinched_division,
            });
        }
        group.clinched_wildcard = group
            .members
            .iter()
            .filter(|&&m| clinch_by_index[m] == ClinchStatus::Wildcard)
            .count();
        conferences.push(group);
    }

    let context = Context {
        division_spots: league.division_spots,
        wildcard_spots: league.wildcard_spots,
        regulation_wins,
        clinch: clinch_by_index,
        sim_points,
        divisions,
        conferences,
    };

    // each worker folds a disjoint slice of universes into a local tally; the
    // merge is an integer sum, so the outcome is independent of partitioning
    let tallies = (0..sims.runs())
        .into_par_iter()
        .fold(
            || vec![Tally::default(); roster.len()],
            |mut local, universe| {
                tally_universe(&context, universe, &mut local);
                local
            },
        )
        .reduce(
            || vec![Tally::default(); roster.len()],
            |mut left, right| {
                for (l, r) in left.iter_mut().zip(right.iter()) {
                    l.merge(r);
                }
                left
            },
        );

    let runs = sims.runs() as u64;
    let mut probabilities = FxHashMap::default();
    for (index, team) in roster.iter().enumerate() {
        let (division_count, wildcard_count) = match context.clinch[index] {
            ClinchStatus::Division => (runs, 0),
            ClinchStatus::Wildcard => (0, runs),
            ClinchStatus::None => (tallies[index].division, tallies[index].wildcard),
        };
        let division = division_count as f64 / runs as f64;
        let wildcard = wildcard_count as f64 / runs as f64;
        probabilities.insert(
            (*team).clone(),
            QualificationProb {
                division,
                wildcard,
                total: division + wildcard,
            },
        );
    }
    Ok(probabilities)
}

/// Applies one simulated universe to the tally: per-division top-N ranking, then
/// conference wildcards over the remaining contenders.
fn tally_universe(context: &Context, universe: usize, tally: &mut [Tally]) {
    let key = |member: usize| {
        RankKey::new(
            context.sim_points[member][universe],
            context.regulation_wins[member],
        )
    };

    for conference in &context.conferences {
        let mut qualifiers: Vec<usize> = vec![];
        for &division_index in &conference.divisions {
            let division = &context.divisions[division_index];

            // division-clinched teams occupy fixed spots
            let mut candidates: Vec<usize> = division
                .members
                .iter()
                .copied()
                .filter(|&m| context.clinch[m] != ClinchStatus::Division)
                .collect();
            rank::sort_desc(&mut candidates, |&m| key(m));

            let available = context.division_spots.saturating_sub(division.clinched_division);
            let taken = available.min(candidates.len());
            for &member in &candidates[..taken] {
                if context.clinch[member] == ClinchStatus::None {
                    tally[member].division += 1;
                }
                qualifiers.push(member);
            }
            qualifiers.extend(
                division
                    .members
                    .iter()
                    .copied()
                    .filter(|&m| context.clinch[m] == ClinchStatus::Division),
            );
        }

        let mut contenders: Vec<usize> = conference
            .members
            .iter()
            .copied()
            .filter(|&m| {
                context.clinch[m] != ClinchStatus::Wildcard && !qualifiers.contains(&m)
            })
            .collect();
        rank::sort_desc(&mut contenders, |&m| key(m));

        let available = context.wildcard_spots.saturating_sub(conference.clinched_wildcard);
        let taken = available.min(contenders.len());
        for &member in &contenders[..taken] {
            tally[member].wildcard += 1;
        }
    }
}
