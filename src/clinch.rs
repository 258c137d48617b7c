//! Mathematical clinch evaluation from current-state data alone. A berth is
//! clinched once no remaining outcome can deny it, judged from worst-case point
//! bounds; simulations play no part here.

use rustc_hash::{FxHashMap, FxHashSet};
use serde::Serialize;

use crate::league::{LeagueStructure, Team, UnknownTeam};
use crate::rank;
use crate::standings::TeamState;

/// Clinch determination for one team. Mutually exclusive: a division clinch is
/// never downgraded or doubled up as a wildcard clinch.
#[derive(Clone, Copy, Debug, Default, Hash, PartialEq, Eq, Serialize, strum_macros::Display)]
#[serde(rename_all = "lowercase")]
#[strum(serialize_all = "lowercase")]
pub enum ClinchStatus {
    #[default]
    None,
    Division,
    Wildcard,
}

/// Determines which teams have mathematically secured a berth. Division clinches
/// are resolved first; wildcard clinches are then evaluated over the remaining
/// conference contenders.
pub fn evaluate(
    states: &FxHashMap<Team, TeamState>,
    league: &LeagueStructure,
) -> Result<FxHashMap<Team, ClinchStatus>, UnknownTeam> {
    let by_division = league.group_by_division(states.keys())?;
    let mut status: FxHashMap<Team, ClinchStatus> = states
        .keys()
        .map(|team| (team.clone(), ClinchStatus::None))
        .collect();

    // per-division leader sets are retained for the wildcard pass
    let mut leaders: FxHashSet<&Team> = FxHashSet::default();
    for members in by_division.values() {
        let mut ranked = members.clone();
        rank::sort_desc(&mut ranked, |team| states[*team].rank_key());
        let top = ranked.len().min(league.division_spots);
        let (leaders_slice, pool) = ranked.split_at(top);

        for candidate in leaders_slice {
            // vacuously clinched when the cutoff pool is empty
            let clinched = pool
                .iter()
                .all(|rival| states[*rival].max_possible_points < states[*candidate].points);
            if clinched {
                status.insert((*candidate).clone(), ClinchStatus::Division);
            }
            leaders.insert(*candidate);
        }
    }

    for conference in league.conference_list() {
        let mut leader_set: FxHashSet<&Team> = FxHashSet::default();
        let mut conference_teams: Vec<&Team> = vec![];
        for division in league.divisions_of(conference) {
            if let Some(members) = by_division.get(division) {
                conference_teams.extend(members);
                for member in members {
                    let leads =
                        leaders.contains(member) || status[*member] == ClinchStatus::Division;
                    if leads {
                        leader_set.insert(*member);
                    }
                }
            }
        }

        let mut contenders: Vec<&Team> = conference_teams
            .into_iter()
            .filter(|team| !leader_set.contains(*team))
            .collect();
        contenders.sort();
        rank::sort_desc(&mut contenders, |team| states[*team].rank_key());

        let top = contenders.len().min(league.wildcard_spots);
        let (holders, pool) = contenders.split_at(top);
        for candidate in holders {
            if status[*candidate] == ClinchStatus::Division {
                continue;
            }
            let clinched = pool
                .iter()
                .all(|rival| states[*rival].max_possible_points < states[*candidate].points);
            if clinched {
                status.insert((*candidate).clone(), ClinchStatus::Wildcard);
            }
        }
    }

    Ok(status)
}
