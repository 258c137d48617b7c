//! Ties the stages together: normalize the standings, resolve clinches, replay
//! the simulation batch and estimate cutoffs, all over one immutable snapshot.

use std::time::Instant;

use rustc_hash::FxHashMap;
use thiserror::Error;
use tracing::debug;

use crate::clinch::{self, ClinchStatus};
use crate::league::{LeagueStructure, Team, UnknownTeam, ValidationError};
use crate::sim::{self, AggregateError, QualificationProb, SimulationSet};
use crate::standings::{self, NormalizeError, StandingsRecord, TeamState};
use crate::threshold::{self, ThresholdError, Thresholds};

#[derive(Debug, Error)]
pub enum EngineError {
    #[error("{0}")]
    Validation(#[from] ValidationError),

    #[error("{0}")]
    Normalize(#[from] NormalizeError),

    #[error("{0}")]
    UnknownTeam(#[from] UnknownTeam),

    #[error("{0}")]
    Aggregate(#[from] AggregateError),

    #[error("{0}")]
    Threshold(#[from] ThresholdError),
}

/// Everything derived from one snapshot. Recomputed from scratch on every call;
/// nothing here outlives the evaluation that produced it.
#[derive(Clone, Debug)]
pub struct Evaluation {
    pub states: FxHashMap<Team, TeamState>,
    pub clinch: FxHashMap<Team, ClinchStatus>,
    pub probabilities: FxHashMap<Team, QualificationProb>,
    pub thresholds: Thresholds,
}

#[derive(Debug)]
pub struct Engine {
    pub league: LeagueStructure,
}
impl Engine {
    pub fn new(league: LeagueStructure) -> Result<Self, ValidationError> {
        league.validate()?;
        Ok(Self { league })
    }

    pub fn evaluate(
        &self,
        records: &[StandingsRecord],
        sims: &SimulationSet,
    ) -> Result<Evaluation, EngineError> {
        let start = Instant::now();
        let states = standings::normalize(records, &self.league)?;
        let clinch = clinch::evaluate(&states, &self.league)?;
        let probabilities = sim::aggregate(&states, &clinch, &self.league, sims)?;
        let thresholds = threshold::estimate(&states, &self.league, sims)?;
        debug!(
            "evaluated {} teams over {} universes in {:?}",
            states.len(),
            sims.runs(),
            start.elapsed()
        );
        Ok(Evaluation {
            states,
            clinch,
            probabilities,
            thresholds,
        })
    }
}

impl TryFrom<LeagueStructure> for Engine {
    type Error = ValidationError;

    fn try_from(league: LeagueStructure) -> Result<Self, Self::Error> {
        Engine::new(league)
    }
}
