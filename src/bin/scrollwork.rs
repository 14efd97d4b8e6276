use std::path::PathBuf;

use anyhow::Context as _;
use clap::{Parser, Subcommand};

#[derive(Parser, Debug)]
#[command(name = "scrollwork", version)]
struct Cli {
    #[command(subcommand)]
    cmd: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Replay a script and print a snapshot after every event.
    Run(RunArgs),
    /// Replay a script up to a point in time and print one snapshot.
    Step(StepArgs),
    /// List the routes of the built-in site.
    Routes,
}

#[derive(Parser, Debug)]
struct RunArgs {
    /// Input script JSON.
    #[arg(long = "in")]
    in_path: PathBuf,
}

#[derive(Parser, Debug)]
struct StepArgs {
    /// Input script JSON.
    #[arg(long = "in")]
    in_path: PathBuf,

    /// Time to sample, seconds on the engine clock.
    #[arg(long)]
    at: f64,
}

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();
    match cli.cmd {
        Command::Run(args) => cmd_run(args),
        Command::Step(args) => cmd_step(args),
        Command::Routes => cmd_routes(),
    }
}

fn cmd_run(args: RunArgs) -> anyhow::Result<()> {
    let script = scrollwork::Script::from_path(&args.in_path)?;
    let frames = script.replay()?;
    for frame in &frames {
        let line = serde_json::to_string(frame).with_context(|| "serialize snapshot")?;
        println!("{line}");
    }
    eprintln!("replayed {} events", frames.len());
    Ok(())
}

fn cmd_step(args: StepArgs) -> anyhow::Result<()> {
    let script = scrollwork::Script::from_path(&args.in_path)?;
    let at = scrollwork::TimePoint::new(args.at)?;
    let frame = script.replay_until(at)?;
    let out = serde_json::to_string_pretty(&frame).with_context(|| "serialize snapshot")?;
    println!("{out}");
    Ok(())
}

fn cmd_routes() -> anyhow::Result<()> {
    let registry = scrollwork::ViewRegistry::site();
    for path in registry.paths() {
        println!("{path}");
    }
    Ok(())
}
