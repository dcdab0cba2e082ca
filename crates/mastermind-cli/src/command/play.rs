use std::{io, path::PathBuf};

use anyhow::Context as _;
use mastermind_agent::training;
use mastermind_engine::Seed;
use rand::Rng as _;

use crate::{render, util};

#[derive(Debug, Clone, clap::Args)]
pub(crate) struct PlayArg {
    /// Agent snapshot to play with
    model: PathBuf,
    /// Number of games to play
    #[arg(long, default_value_t = 100)]
    games: usize,
    /// Hex seed (32 characters) for the hidden codes and tie-breaking
    #[arg(long)]
    seed: Option<Seed>,
    /// Print every game
    #[arg(long)]
    render: bool,
    /// Evaluation output file path (stdout if omitted)
    #[arg(long)]
    report: Option<PathBuf>,
}

pub(crate) fn run(arg: &PlayArg) -> anyhow::Result<()> {
    let PlayArg {
        model,
        games,
        seed,
        render,
        report,
    } = arg;
    let mut agent = util::read_agent_file(model, None)?;
    let seed = seed.unwrap_or_else(|| rand::rng().random());
    let mut seeds = seed.rng();
    agent.reseed(seeds.random());

    let config = *agent.config();
    eprintln!("Playing {games} games ({config}) with {}", model.display());
    eprintln!("  Seed: {seed}");

    let mut stdout = io::stdout().lock();
    if *render {
        render::write_legend(&mut stdout, config.n_colors()).context("Failed to render legend")?;
    }
    let mut render_result = Ok(());
    let evaluation = training::evaluate(&mut agent, *games, seeds.random(), |session| {
        if *render && render_result.is_ok() {
            render_result = render::write_session(&mut stdout, session);
        }
    })?;
    render_result.context("Failed to render game")?;
    drop(stdout);

    eprintln!("Evaluation completed.");
    eprintln!(
        "  Wins:     {} / {} ({:.3})",
        evaluation.wins,
        evaluation.games,
        evaluation.win_rate()
    );
    if let Some(mean_turns) = evaluation.mean_turns_to_win {
        eprintln!("  Mean turns to win: {mean_turns:.2}");
    }

    if report.is_some() || !*render {
        util::save_json(&evaluation, report.as_deref())?;
    }
    Ok(())
}
