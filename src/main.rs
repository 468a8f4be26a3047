//! dcpu16: run a DCPU-16 binary image and print the final machine state.

use std::path::PathBuf;
use std::process::ExitCode;

use anyhow::{Context, Result};
use clap::Parser;
use dcpu16::{Endianness, ExecutionError, FlatMemory, HaltReason, Image, LogTracer, CPU};

#[derive(Parser, Debug)]
#[command(name = "dcpu16", version, about = "Run a DCPU-16 binary image")]
struct Args {
    /// Image to load at address 0
    #[arg(value_name = "IMAGE")]
    image: PathBuf,

    /// Read image words as little-endian instead of big-endian
    #[arg(long)]
    little_endian: bool,

    /// Log every instruction fetch and location access
    #[arg(long)]
    trace: bool,

    /// Stop after this many instructions
    #[arg(long, value_name = "N")]
    max_steps: Option<u64>,

    /// Do not print the final machine state
    #[arg(short, long)]
    quiet: bool,
}

fn main() -> ExitCode {
    let args = match Args::try_parse() {
        Ok(args) => args,
        Err(err) => {
            let _ = err.print();
            return if err.use_stderr() {
                ExitCode::FAILURE
            } else {
                ExitCode::SUCCESS
            };
        }
    };

    init_logging(args.trace);

    match run(&args) {
        Ok(code) => code,
        Err(err) => {
            eprintln!("error: {:#}", err);
            ExitCode::FAILURE
        }
    }
}

fn init_logging(trace: bool) {
    let mut builder = env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("warn"));
    if trace {
        builder.filter_module("dcpu16", log::LevelFilter::Trace);
    }
    builder.init();
}

fn run(args: &Args) -> Result<ExitCode> {
    let endianness = if args.little_endian {
        Endianness::Little
    } else {
        Endianness::Big
    };

    let image = Image::from_file(&args.image, endianness)
        .with_context(|| format!("failed to load {}", args.image.display()))?;
    log::info!("loaded {} words from {}", image.len(), args.image.display());

    let mut cpu = CPU::new(FlatMemory::new());
    cpu.load_image(&image);
    if args.trace {
        cpu.set_tracer(Box::new(LogTracer));
    }

    let outcome = match args.max_steps {
        Some(budget) => cpu.run_for_steps(budget).map(|executed| {
            log::info!("stopped after {} steps", executed);
        }),
        None => cpu.run().map(|reason| {
            log::info!("halted: {}", reason);
        }),
    };

    if !args.quiet {
        println!("{}", cpu.dump());
    }

    Ok(exit_code(outcome))
}

fn exit_code(outcome: Result<(), ExecutionError>) -> ExitCode {
    match outcome {
        Ok(()) => ExitCode::SUCCESS,
        Err(err) if HaltReason::from_error(err).is_some() => ExitCode::SUCCESS,
        Err(err) => {
            log::warn!("execution fault: {}", err);
            eprintln!("fault: {}", err);
            ExitCode::FAILURE
        }
    }
}
