use alan::{ConfigLoader, Halt, Machine, MachineError, RandomChooser, Step};
use clap::Parser;
use std::fs;
use std::path::PathBuf;
use std::process::ExitCode;
use tracing_subscriber::{fmt, prelude::*, EnvFilter};

#[derive(Parser)]
#[clap(author, version, about, long_about = None, arg_required_else_help = true)]
struct Cli {
    /// The machine configuration file (.json)
    #[clap(short, long)]
    config: PathBuf,

    /// A program file, replacing the program of the configuration
    #[clap(short, long)]
    program: Option<PathBuf>,

    /// Stop after this many steps
    #[clap(short, long)]
    max_steps: Option<usize>,

    /// Seed for choosing between ambiguous rules
    #[clap(short, long)]
    seed: Option<u64>,

    /// Print each step of the execution
    #[clap(short = 'd', long)]
    debug: bool,
}

fn init_tracing() {
    let env_filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn"));

    tracing_subscriber::registry()
        .with(fmt::layer().with_writer(std::io::stderr))
        .with(env_filter)
        .init();
}

fn main() -> ExitCode {
    init_tracing();

    match run(Cli::parse()) {
        Ok(_) => ExitCode::SUCCESS,
        Err(e) => {
            eprintln!("{e}");
            ExitCode::FAILURE
        }
    }
}

fn run(cli: Cli) -> Result<Option<Halt>, MachineError> {
    let mut config = ConfigLoader::load_config(&cli.config)?;

    if let Some(path) = &cli.program {
        let text = fs::read_to_string(path).map_err(|e| {
            MachineError::File(format!("Failed to read file {}: {}", path.display(), e))
        })?;
        config.program = Some(text);
    }

    let chooser = cli.seed.map(RandomChooser::seeded).unwrap_or_default();
    let mut machine = Machine::with_chooser(&config, chooser)?;

    let outcome = if cli.debug {
        run_verbose(&mut machine, cli.max_steps)?
    } else {
        match cli.max_steps {
            Some(max_steps) => machine.run_for(max_steps)?,
            None => Some(machine.run()?),
        }
    };

    match outcome {
        Some(Halt::Accepted) => println!("Accepted in state {}", machine.state()),
        Some(Halt::Stuck) => println!("Stuck in state {}", machine.state()),
        None => println!(
            "Stopped after {} steps in state {}",
            machine.step_count(),
            machine.state()
        ),
    }

    for tape in machine.tapes() {
        println!("{tape}");
    }

    Ok(outcome)
}

/// Runs step by step, printing the machine after every step.
fn run_verbose(
    machine: &mut Machine,
    max_steps: Option<usize>,
) -> Result<Option<Halt>, MachineError> {
    print_machine(machine);

    loop {
        if max_steps.is_some_and(|max| machine.step_count() >= max) {
            return Ok(None);
        }

        match machine.tick()? {
            Step::Continue => print_machine(machine),
            Step::Halt(halt) => {
                println!();
                return Ok(Some(halt));
            }
        }
    }
}

fn print_machine(machine: &Machine) {
    let tapes = machine
        .tapes()
        .iter()
        .map(|tape| tape.to_string())
        .collect::<Vec<String>>()
        .join(" | ");

    println!(
        "Step: {}, State: {}, Tapes: {}",
        machine.step_count(),
        machine.state(),
        tapes
    );
}
