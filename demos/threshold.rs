//! Encodes an integer `x` in binary and minimizes a QUBO that pushes `x` up
//! to a threshold, then decodes the optimal `x`.

use clap::Parser;

use qubo_logic::bqm::BinaryQuadraticModel;
use qubo_logic::solver::{ExactSolver, Sampler};
use qubo_logic::types::Var;

#[derive(Debug, Parser)]
#[command(author, version)]
struct Cli {
    /// Number of bits used to represent `x`.
    #[clap(long, value_name = "INT", default_value = "10")]
    bits: usize,

    /// Threshold for `x`.
    #[clap(long, value_name = "INT", default_value = "50")]
    constraint: u64,
}

fn bit(i: usize) -> Var {
    Var::new(format!("x_{}", i))
}

fn main() -> color_eyre::Result<()> {
    color_eyre::install()?;

    simplelog::TermLogger::init(
        simplelog::LevelFilter::Info,
        simplelog::Config::default(),
        simplelog::TerminalMode::Mixed,
        simplelog::ColorChoice::Auto,
    )?;

    let time_total = std::time::Instant::now();

    let args = Cli::parse();
    println!("args = {:?}", args);

    let solver = ExactSolver::default();
    if args.bits > solver.max_variables {
        color_eyre::eyre::bail!("--bits {} exceeds the solver limit of {}", args.bits, solver.max_variables);
    }

    // Unit cost on every bit, rewarded by its weight when the threshold has it set.
    let mut qubo = Vec::new();
    for i in 0..args.bits {
        let mut bias = 1.0;
        if args.constraint & (1 << i) != 0 {
            bias -= (1u64 << i) as f64;
        }
        qubo.push(((bit(i), bit(i)), bias));
    }
    let bqm = BinaryQuadraticModel::from_qubo(qubo, 0.0);
    println!("bqm with {} variables", bqm.num_variables());

    let sampleset = solver.sample(&bqm)?;
    let solution = &sampleset.first().ok_or_else(|| color_eyre::eyre::eyre!("no samples"))?.sample;

    let x: u64 = (0..args.bits).filter(|&i| solution[&bit(i)]).map(|i| 1u64 << i).sum();
    println!("Optimal x: {}", x);

    let time_total = time_total.elapsed();
    println!("Done in {:.3} s", time_total.as_secs_f64());

    Ok(())
}
