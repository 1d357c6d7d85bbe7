use clap::Parser;

use qubo_logic::dot::DotConfig;
use qubo_logic::expr::Expr;
use qubo_logic::gate::GateKind;
use qubo_logic::poly::Polynomial;
use qubo_logic::types::{all_samples, Var};

#[derive(Debug, Parser)]
#[command(author, version)]
struct Cli {
    /// Print the DOT graph of each gate.
    #[clap(long)]
    dot: bool,

    /// Render gate bodies instead of gate boxes in DOT output.
    #[clap(long)]
    expand: bool,
}

fn main() -> color_eyre::Result<()> {
    color_eyre::install()?;

    simplelog::TermLogger::init(
        simplelog::LevelFilter::Info,
        simplelog::Config::default(),
        simplelog::TerminalMode::Mixed,
        simplelog::ColorChoice::Auto,
    )?;

    let args = Cli::parse();
    println!("args = {:?}", args);

    let a = Expr::binary("a");
    let b = Expr::binary("b");

    for kind in GateKind::ALL {
        let inputs = [a.clone(), b.clone()];
        let f = kind.build(&inputs[..kind.arity()]);
        let model = f.compile()?;
        let vars: Vec<Var> = f.variables().into_iter().collect();

        println!("{} = {}", f, Polynomial::from_expr(&f));
        for s in all_samples(&vars) {
            let bits: Vec<u8> = s.values().map(|&v| v as u8).collect();
            let value = f.eval(&s)?;
            let energy = model.energy(&s)?;
            println!("  {:?} -> value {} energy {}", bits, value, energy);
        }

        if args.dot {
            let config = DotConfig {
                expand_gates: args.expand,
                ..DotConfig::default()
            };
            println!("{}", f.to_dot_with_config(&config)?);
        }
    }

    Ok(())
}
