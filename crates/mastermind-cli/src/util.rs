use std::{
    fs::File,
    io::{self, BufWriter, Write},
    path::Path,
};

use anyhow::Context;
use mastermind_agent::QLearningAgent;
use mastermind_engine::GameConfig;
use serde::Serialize;

/// Writes `value` as pretty JSON to `output_path`, or to stdout if `None`.
pub fn save_json<T>(value: &T, output_path: Option<&Path>) -> anyhow::Result<()>
where
    T: Serialize,
{
    match output_path {
        Some(path) => {
            let file = File::create(path)
                .with_context(|| format!("Failed to create output file: {}", path.display()))?;
            write_json(BufWriter::new(file), value)
                .with_context(|| format!("Failed to write JSON to {}", path.display()))
        }
        None => write_json(io::stdout().lock(), value).context("Failed to write JSON to stdout"),
    }
}

fn write_json<W, T>(mut writer: W, value: &T) -> io::Result<()>
where
    W: Write,
    T: Serialize,
{
    serde_json::to_writer_pretty(&mut writer, value)?;
    writeln!(writer)?;
    writer.flush()
}

/// Loads an agent snapshot, checking its configuration when `config` is given.
pub fn read_agent_file<P>(path: P, config: Option<&GameConfig>) -> anyhow::Result<QLearningAgent>
where
    P: AsRef<Path>,
{
    let path = path.as_ref();
    let agent = match config {
        Some(config) => QLearningAgent::load_for(path, config),
        None => QLearningAgent::load(path),
    }
    .with_context(|| format!("Failed to load agent snapshot: {}", path.display()))?;
    Ok(agent)
}
