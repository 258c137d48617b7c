//! Average cutoff-point estimators: the simulated points of the last direct
//! qualifier in each division and the last wildcard holder in each conference,
//! averaged over the batch. Display annotations only; nothing here feeds back
//! into clinch or probability computation.

use rustc_hash::FxHashMap;
use serde::Serialize;
use thiserror::Error;

use crate::league::{Conference, Division, LeagueStructure, Team, UnknownTeam};
use crate::rank::{self, RankKey};
use crate::sim::SimulationSet;
use crate::standings::TeamState;

/// Estimated cutoffs; `None` where a division or conference lacks the teams to
/// produce one.
#[derive(Clone, Debug, Default, PartialEq, Serialize)]
pub struct Thresholds {
    pub divisions: FxHashMap<Division, Option<f64>>,
    pub conferences: FxHashMap<Conference, Option<f64>>,
}

#[derive(Debug, Error, PartialEq, Eq)]
pub enum ThresholdError {
    #[error("{0}")]
    UnknownTeam(#[from] UnknownTeam),

    #[error("no standings record for simulated team {0}")]
    MissingStandings(Team),
}

/// Estimates cutoffs from the simulated outcomes. Unlike the aggregator, this
/// deliberately ignores clinch status throughout: the estimate is a pure
/// statistical illustration of where the cut lands.
pub fn estimate(
    states: &FxHashMap<Team, TeamState>,
    league: &LeagueStructure,
    sims: &SimulationSet,
) -> Result<Thresholds, ThresholdError> {
    let mut roster: Vec<&Team> = sims.teams().collect();
    roster.sort();

    let mut regulation_wins: FxHashMap<&Team, u16> = FxHashMap::default();
    for team in &roster {
        let state = states
            .get(*team)
            .ok_or_else(|| ThresholdError::MissingStandings((*team).clone()))?;
        regulation_wins.insert(*team, state.regulation_wins);
    }

    let by_division = league.group_by_division(roster.iter().copied())?;
    let runs = sims.runs();
    let key = |team: &Team, universe: usize| {
        RankKey::new(
            sims.points_for(team).unwrap()[universe],
            regulation_wins[team],
        )
    };

    let mut thresholds = Thresholds::default();
    for (division, members) in &by_division {
        let cutoff_rank = league.division_spots; // zero-based: first team out
        let estimate = if members.len() <= cutoff_rank {
            None
        } else {
            let mut sum = 0.0;
            let mut ranked = members.clone();
            for universe in 0..runs {
                rank::sort_desc(&mut ranked, |team| key(team, universe));
                sum += sims.points_for(ranked[cutoff_rank]).unwrap()[universe] as f64;
            }
            Some(sum / runs as f64)
        };
        thresholds
            .divisions
            .insert((*division).clone(), estimate);
    }

    for conference in league.conference_list() {
        let divisions: Vec<&Vec<&Team>> = league
            .divisions_of(conference)
            .into_iter()
            .filter_map(|division| by_division.get(division))
            .collect();

        let mut sum = 0.0;
        let mut estimate = Some(0.0);
        for universe in 0..runs {
            let mut qualifiers: Vec<&Team> = vec![];
            for members in &divisions {
                let mut ranked = (*members).clone();
                rank::sort_desc(&mut ranked, |team| key(team, universe));
                let top = ranked.len().min(league.division_spots);
                qualifiers.extend(&ranked[..top]);
            }
            let mut contenders: Vec<&Team> = divisions
                .iter()
                .flat_map(|members| members.iter().copied())
                .filter(|team| !qualifiers.contains(team))
                .collect();
            if contenders.len() < league.wildcard_spots {
                estimate = None;
                break;
            }
            contenders.sort();
            rank::sort_desc(&mut contenders, |team| key(team, universe));
            let last = contenders[league.wildcard_spots - 1];
            sum += sims.points_for(last).unwrap()[universe] as f64;
        }
        thresholds.conferences.insert(
            conference.clone(),
            estimate.map(|_| sum / runs as f64),
        );
    }

    Ok(thresholds)
}
