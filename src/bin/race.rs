use std::env;
use std::error::Error;
use std::path::PathBuf;

use clap::Parser;
use stanza::renderer::console::Console;
use stanza::renderer::Renderer;
use tracing::{debug, info};

use bubble::data;
use bubble::engine::Engine;
use bubble::print;
use bubble::sim::SimulationSet;

#[derive(Debug, clap::Parser, Clone)]
struct Args {
    /// file to source the snapshot (standings + simulations) from
    #[clap(short = 'f', long)]
    file: PathBuf,

    /// file to source the league structure from
    #[clap(short = 'l', long)]
    league: PathBuf,

    /// emit results as JSON instead of tables
    #[clap(short = 'j', long)]
    json: bool,
}

#[derive(Debug, serde::Serialize)]
struct JsonOutput<'a> {
    clinch: &'a rustc_hash::FxHashMap<bubble::league::Team, bubble::clinch::ClinchStatus>,
    probabilities:
        &'a rustc_hash::FxHashMap<bubble::league::Team, bubble::sim::QualificationProb>,
    thresholds: &'a bubble::threshold::Thresholds,
}

fn main() -> Result<(), Box<dyn Error>> {
    if env::var("RUST_BACKTRACE").is_err() {
        env::set_var("RUST_BACKTRACE", "full")
    }
    if env::var("RUST_LOG").is_err() {
        env::set_var("RUST_LOG", "info")
    }
    tracing_subscriber::fmt::init();

    let args = Args::parse();
    debug!("args: {args:?}");

    let league = data::read_league(&args.league)?;
    let snapshot = data::read_snapshot(&args.file)?;
    if let Some(date) = snapshot.date {
        info!("snapshot dated {date}");
    }

    let sims = SimulationSet::new(snapshot.simulations)?;
    info!(
        "{} teams, {} simulated universes",
        snapshot.standings.len(),
        sims.runs()
    );

    let engine = Engine::new(league)?;
    let evaluation = engine.evaluate(&snapshot.standings, &sims)?;

    if args.json {
        let output = JsonOutput {
            clinch: &evaluation.clinch,
            probabilities: &evaluation.probabilities,
            thresholds: &evaluation.thresholds,
        };
        println!("{}", serde_json::to_string_pretty(&output)?);
    } else {
        let means = sims.mean_points();
        let table = print::tabulate_probabilities(&engine.league, &evaluation, &means);
        println!("{}", Console::default().render(&table));
        let table = print::tabulate_thresholds(&evaluation.thresholds);
        println!("{}", Console::default().render(&table));
    }
    Ok(())
}
