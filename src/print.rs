//! Console table rendering for the CLI. Presentation only; no qualification
//! logic lives here.

use rustc_hash::FxHashMap;
use stanza::style::{HAlign, Header, MinWidth, Separator, Styles};
use stanza::table::{Col, Row, Table};

use crate::engine::Evaluation;
use crate::league::{LeagueStructure, Team};
use crate::threshold::Thresholds;

/// Tabulates per-team clinch status and qualification probabilities, grouped by
/// division and ordered by mean projected points within each group.
pub fn tabulate_probabilities(
    league: &LeagueStructure,
    evaluation: &Evaluation,
    mean_points: &FxHashMap<Team, f64>,
) -> Table {
    let mut table = Table::default()
        .with_cols(vec![
            Col::new(Styles::default().with(MinWidth(12)).with(HAlign::Left)),
            Col::new(Styles::default().with(MinWidth(14)).with(HAlign::Left)),
            Col::new(Styles::default().with(MinWidth(10)).with(HAlign::Left)),
            Col::new(
                Styles::default()
                    .with(Separator(true))
                    .with(MinWidth(10))
                    .with(HAlign::Right),
            ),
            Col::new(Styles::default().with(MinWidth(10)).with(HAlign::Right)),
            Col::new(Styles::default().with(MinWidth(10)).with(HAlign::Right)),
            Col::new(Styles::default().with(MinWidth(10)).with(HAlign::Right)),
        ])
        .with_row(Row::new(
            Styles::default().with(Header(true)).with(Separator(true)),
            vec![
                "Team".into(),
                "Division".into(),
                "Clinched".into(),
                "Mean pts".into(),
                "Division".into(),
                "Wildcard".into(),
                "Total".into(),
            ],
        ));

    let roster: Vec<&Team> = evaluation.states.keys().collect();
    let by_division = league
        .group_by_division(roster.into_iter())
        .expect("normalized states contain only known teams");

    let mut divisions: Vec<_> = by_division.keys().collect();
    divisions.sort();
    for division in divisions {
        let mut members = by_division[division].clone();
        members.sort_by(|a, b| {
            let mean_a = mean_points.get(*a).copied().unwrap_or_default();
            let mean_b = mean_points.get(*b).copied().unwrap_or_default();
            mean_b.total_cmp(&mean_a)
        });
        for team in members {
            let prob = &evaluation.probabilities[team];
            let mean = mean_points.get(team).copied().unwrap_or_default();
            table.push_row(Row::new(
                Styles::default(),
                vec![
                    team.to_string().into(),
                    division.to_string().into(),
                    evaluation.clinch[team].to_string().into(),
                    format!("{mean:.1}").into(),
                    format!("{:.3}", prob.division).into(),
                    format!("{:.3}", prob.wildcard).into(),
                    format!("{:.3}", prob.total).into(),
                ],
            ));
        }
    }
    table
}

/// Tabulates the estimated cutoff points per division and conference.
pub fn tabulate_thresholds(thresholds: &Thresholds) -> Table {
    let mut table = Table::default()
        .with_cols(vec![
            Col::new(Styles::default().with(MinWidth(12)).with(HAlign::Left)),
            Col::new(Styles::default().with(MinWidth(14)).with(HAlign::Left)),
            Col::new(Styles::default().with(MinWidth(10)).with(HAlign::Right)),
        ])
        .with_row(Row::new(
            Styles::default().with(Header(true)).with(Separator(true)),
            vec!["Scope".into(), "Group".into(), "Cutoff".into()],
        ));

    let mut divisions: Vec<_> = thresholds.divisions.iter().collect();
    divisions.sort_by(|a, b| a.0.cmp(b.0));
    for (division, cutoff) in divisions {
        table.push_row(Row::new(
            Styles::default(),
            vec![
                "division".into(),
                division.to_string().into(),
                format_cutoff(cutoff).into(),
            ],
        ));
    }

    let mut conferences: Vec<_> = thresholds.conferences.iter().collect();
    conferences.sort_by(|a, b| a.0.cmp(b.0));
    for (conference, cutoff) in conferences {
        table.push_row(Row::new(
            Styles::default(),
            vec![
                "wildcard".into(),
                conference.to_string().into(),
                format_cutoff(cutoff).into(),
            ],
        ));
    }
    table
}

fn format_cutoff(cutoff: &Option<f64>) -> String {
    match cutoff {
        Some(points) => format!("{points:.1}"),
        None => "n/a".into(),
    }
}
