use std::{io, path::PathBuf};

use anyhow::Context as _;
use chrono::Utc;
use mastermind_agent::{
    MastermindEnv, QLearningAgent,
    training::{Checkpoint, Trainer},
};
use mastermind_engine::Seed;
use rand::Rng as _;

use crate::{
    command::{GameArg, LearnerArg},
    model::training_report::{CurvePoint, TrainingReport},
    render, util,
};

const CURVE_POINTS: usize = 100;

#[derive(Debug, Clone, clap::Args)]
pub(crate) struct TrainArg {
    #[command(flatten)]
    game: GameArg,
    #[command(flatten)]
    learner: LearnerArg,
    /// Number of games to train for
    #[arg(long, default_value_t = 10_000)]
    games: usize,
    /// Name recorded in the report
    #[arg(long, default_value = "run")]
    name: String,
    /// Hex seed (32 characters) for reproducible runs
    #[arg(long)]
    seed: Option<Seed>,
    /// Agent snapshot to write during training
    #[arg(long)]
    checkpoint: Option<PathBuf>,
    /// Save the snapshot after every N games (0: only at the end)
    #[arg(long, default_value_t = 1000)]
    checkpoint_every: usize,
    /// Continue training the agent of this snapshot, keeping its learning parameters
    #[arg(long)]
    resume: Option<PathBuf>,
    /// Report output file path (stdout if omitted)
    #[arg(long)]
    report: Option<PathBuf>,
    /// Print every game to stderr
    #[arg(long)]
    render: bool,
    /// Print progress every N games
    #[arg(long, default_value_t = 1000)]
    log_every: usize,
}

pub(crate) fn run(arg: &TrainArg) -> anyhow::Result<()> {
    let TrainArg {
        game,
        learner,
        games,
        name,
        seed,
        checkpoint,
        checkpoint_every,
        resume,
        report,
        render,
        log_every,
    } = arg;
    let config = game.to_config()?;
    let seed = seed.unwrap_or_else(|| rand::rng().random());
    let mut seeds = seed.rng();
    let agent_seed: Seed = seeds.random();
    let env_seed: Seed = seeds.random();

    let agent = match resume {
        Some(path) => {
            let mut agent = util::read_agent_file(path, Some(&config))?;
            agent.reseed(agent_seed);
            eprintln!(
                "Resuming {} ({} states)",
                path.display(),
                agent.q_table().state_count()
            );
            agent
        }
        None => QLearningAgent::with_seed(config, learner.to_params(), agent_seed),
    };
    let params = *agent.params();

    eprintln!("Training {name}:");
    eprintln!("  Game:   {config}");
    eprintln!(
        "  Params: alpha={} epsilon={} discount={}",
        params.alpha, params.epsilon, params.discount
    );
    eprintln!("  Seed:   {seed}");
    eprintln!("  Games:  {games}");

    let mut trainer = Trainer::new(*games);
    if let Some(path) = checkpoint {
        trainer = trainer.with_checkpoint(Checkpoint {
            path: path.clone(),
            every: *checkpoint_every,
        });
    }

    let mut env = MastermindEnv::with_seed(agent, env_seed);
    let mut render_error = None;
    let history = trainer.train(&mut env, |_, running, trained| {
        if *render {
            if let Err(err) = render::write_session(&mut io::stderr().lock(), trained.session()) {
                if render_error.is_none() {
                    render_error = Some(err);
                }
            }
        }
        let played = running.games();
        if *log_every > 0 && (played % *log_every == 0 || played == *games) {
            let window = match played % *log_every {
                0 => *log_every,
                rest => rest,
            };
            eprintln!(
                "Game #{played}: win rate {:.3} (last {window}: {:.3}), {} states",
                running.win_rate().unwrap_or_default(),
                running.recent_win_rate(window).unwrap_or_default(),
                trained.agent().q_table().state_count(),
            );
        }
    })?;
    if let Some(err) = render_error {
        return Err(err).context("Failed to render game");
    }

    let agent = env.into_agent();
    eprintln!("Training completed.");
    eprintln!("  Wins:   {} / {}", history.wins(), history.games());
    if let Some(win_rate) = history.win_rate() {
        eprintln!("  Win rate: {win_rate:.3}");
    }
    eprintln!(
        "  Table:  {} states, {} entries",
        agent.q_table().state_count(),
        agent.q_table().entry_count()
    );
    if let Some(path) = checkpoint {
        eprintln!("  Snapshot: {}", path.display());
    }

    let report_data = TrainingReport {
        name: name.clone(),
        trained_at: Utc::now(),
        config,
        params,
        seed,
        resumed_from: resume.as_ref().map(|path| path.display().to_string()),
        games: history.games(),
        wins: history.wins(),
        win_rate: history.win_rate(),
        state_count: agent.q_table().state_count(),
        curve: history
            .sampled_curve(CURVE_POINTS)
            .into_iter()
            .map(|(games, win_rate)| CurvePoint { games, win_rate })
            .collect(),
    };
    util::save_json(&report_data, report.as_deref())?;

    Ok(())
}
