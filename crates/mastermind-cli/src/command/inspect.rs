use std::path::PathBuf;

use mastermind_engine::Observation;

use crate::util;

#[derive(Debug, Clone, clap::Args)]
pub(crate) struct InspectArg {
    /// Agent snapshot to inspect
    model: PathBuf,
    /// Number of opening guesses to list
    #[arg(long, default_value_t = 10)]
    top: usize,
}

pub(crate) fn run(arg: &InspectArg) -> anyhow::Result<()> {
    let InspectArg { model, top } = arg;
    let agent = util::read_agent_file(model, None)?;
    let config = agent.config();
    let params = agent.params();
    let q_table = agent.q_table();

    println!("Snapshot: {}", model.display());
    println!("  Game:    {config}");
    println!(
        "  Params:  alpha={} epsilon={} discount={}",
        params.alpha, params.epsilon, params.discount
    );
    println!("  States:  {}", q_table.state_count());
    println!("  Entries: {}", q_table.entry_count());

    let openings = q_table.action_values(&Observation::empty(config));
    if openings.is_empty() {
        println!("No opening guess has been learned yet.");
        return Ok(());
    }
    println!("Best opening guesses ({} learned):", openings.len());
    for (i, (guess, value)) in openings.iter().take(*top).enumerate() {
        println!("  {:2}: {guess} => {value:.4}", i + 1);
    }
    Ok(())
}
