//! Minimizes a small QUBO given by index-keyed linear and quadratic terms.

use qubo_logic::bqm::BinaryQuadraticModel;
use qubo_logic::solver::{ExactSolver, Sampler};
use qubo_logic::types::Var;

fn x(i: usize) -> Var {
    Var::new(format!("x{}", i))
}

fn main() -> color_eyre::Result<()> {
    color_eyre::install()?;

    simplelog::TermLogger::init(
        simplelog::LevelFilter::Debug,
        simplelog::Config::default(),
        simplelog::TerminalMode::Mixed,
        simplelog::ColorChoice::Auto,
    )?;

    let linear = [(0, -1.0), (1, -1.0), (2, 0.0), (3, 0.0)];
    let quadratic = [((0, 1), 2.0), ((0, 2), 2.0), ((1, 3), 2.0), ((2, 3), -2.0)];

    let qubo = linear
        .iter()
        .map(|&(i, bias)| ((x(i), x(i)), bias))
        .chain(quadratic.iter().map(|&((i, j), bias)| ((x(i), x(j)), bias)));
    let mut bqm = BinaryQuadraticModel::from_qubo(qubo, 0.0);
    for (i, _) in linear {
        bqm.add_variable(x(i));
    }
    println!("bqm = {:?}", bqm);

    let sampleset = ExactSolver::default().sample(&bqm)?;
    for record in sampleset.lowest() {
        let bits: Vec<u8> = record.sample.values().map(|&v| v as u8).collect();
        println!("Solution: {:?}, energy: {}", bits, record.energy);
    }

    Ok(())
}
