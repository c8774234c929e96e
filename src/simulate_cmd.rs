//! Simulate command: draw sequences from the chain model.

use anyhow::Result;
use rand::SeedableRng;
use rand::rngs::StdRng;
use tracing::{info, info_span};

use knockoff_chain::simulate;

use crate::cli::SimulateArgs;
use crate::config;
use crate::convert;
use crate::sequences;

/// Run the simulation pipeline.
pub fn run(args: SimulateArgs) -> Result<()> {
    let _cmd = info_span!("simulate").entered();

    let cfg = config::load(&args.config)?;
    let model = convert::build_model(&cfg.model)?;

    let mut rng = match args.seed.or(cfg.seed) {
        Some(s) => StdRng::seed_from_u64(s),
        None => StdRng::from_os_rng(),
    };

    let rows: Vec<Vec<usize>> = (0..args.count)
        .map(|_| simulate(&model, &mut rng))
        .collect();
    info!(n_rows = rows.len(), n_positions = model.n_positions(), "simulated");

    sequences::write_output(args.output.as_deref(), &rows)
}
