use clap::{Parser, Subcommand};
use mastermind_agent::LearnerParams;
use mastermind_engine::GameConfig;

use self::{inspect::InspectArg, play::PlayArg, train::TrainArg};

mod inspect;
mod play;
mod train;

#[derive(Debug, Clone, Parser)]
#[command(author, version, about, long_about = None)]
pub struct CommandArgs {
    /// What mode to run the program in
    #[command(subcommand)]
    mode: Mode,
}

#[derive(Debug, Clone, Subcommand)]
enum Mode {
    /// Train a Q-learning agent, optionally resuming from a snapshot
    Train(#[clap(flatten)] TrainArg),
    /// Play greedy games with a trained agent and report its win rate
    Play(#[clap(flatten)] PlayArg),
    /// Summarize the Q-table of a snapshot
    Inspect(#[clap(flatten)] InspectArg),
}

pub fn run() -> anyhow::Result<()> {
    let args = CommandArgs::parse();
    match args.mode {
        Mode::Train(arg) => train::run(&arg)?,
        Mode::Play(arg) => play::run(&arg)?,
        Mode::Inspect(arg) => inspect::run(&arg)?,
    }
    Ok(())
}

/// Board dimensions shared by the subcommands.
#[derive(Debug, Clone, Copy, clap::Args)]
pub(crate) struct GameArg {
    /// Number of colors a peg can take
    #[arg(long, default_value_t = 6)]
    colors: u8,
    /// Number of guesses allowed per game
    #[arg(long, default_value_t = 5)]
    turns: usize,
    /// Number of pegs in the code
    #[arg(long, default_value_t = 4)]
    length: u8,
}

impl GameArg {
    pub(crate) fn to_config(self) -> anyhow::Result<GameConfig> {
        let config = GameConfig::new(self.colors, self.turns, self.length)?;
        Ok(config)
    }
}

#[derive(Debug, Clone, Copy, clap::Args)]
pub(crate) struct LearnerArg {
    /// Learning rate
    #[arg(long, default_value_t = LearnerParams::default().alpha)]
    alpha: f64,
    /// Probability of a random exploratory guess
    #[arg(long, default_value_t = LearnerParams::default().epsilon)]
    epsilon: f64,
    /// Discount factor of future rewards
    #[arg(long, default_value_t = LearnerParams::default().discount)]
    discount: f64,
}

impl LearnerArg {
    pub(crate) fn to_params(self) -> LearnerParams {
        let Self {
            alpha,
            epsilon,
            discount,
        } = self;
        LearnerParams {
            alpha,
            epsilon,
            discount,
        }
    }
}
