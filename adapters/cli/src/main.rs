#![deny(
    unsafe_code,
    missing_docs,
    dead_code,
    unused_results,
    non_snake_case,
    unreachable_pub
)]

//! Command-line adapter that drives a single rover through one command batch.

mod scenario;

use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::Parser;
use mars_rover_core::{CommandOutcome, Heading, Pose, Position, Status};
use mars_rover_system_controller::Rover;
use tracing::warn;
use tracing_subscriber::EnvFilter;

use crate::scenario::Scenario;

const DEFAULT_LOG_FILTER: &str = "mars_rover=warn";
const DEFAULT_HEADING: &str = "N";

/// Drive a rover across a Martian terrain grid and print the outcome as JSON.
#[derive(Debug, Parser)]
#[command(name = "mars-rover", version)]
struct Cli {
    /// TOML scenario file describing the world and the rover start.
    #[arg(long, value_name = "PATH")]
    scenario: Option<PathBuf>,
    /// Starting column; overrides the scenario.
    #[arg(long, allow_negative_numbers = true)]
    x: Option<i64>,
    /// Starting row; overrides the scenario.
    #[arg(long, allow_negative_numbers = true)]
    y: Option<i64>,
    /// Starting heading (N, E, S or W); overrides the scenario.
    #[arg(long)]
    heading: Option<String>,
    /// Print every per-command event before the outcome.
    #[arg(long)]
    trace: bool,
    /// Command symbols (L, R, F, B). `FFRF`, `F,F,R,F` and `F F R F` are equivalent.
    commands: Vec<String>,
}

/// Entry point for the Mars rover command-line interface.
fn main() -> Result<()> {
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(DEFAULT_LOG_FILTER));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();
    for line in run(cli)? {
        println!("{line}");
    }
    Ok(())
}

/// Executes the requested batch and renders the output lines.
fn run(cli: Cli) -> Result<Vec<String>> {
    let scenario = match &cli.scenario {
        Some(path) => Scenario::from_path(path)?,
        None => Scenario::default(),
    };
    let world = scenario.world()?;

    let x = cli.x.or(scenario.rover.x).unwrap_or(0);
    let y = cli.y.or(scenario.rover.y).unwrap_or(0);
    let heading = cli
        .heading
        .or_else(|| scenario.rover.heading.clone())
        .unwrap_or_else(|| DEFAULT_HEADING.to_owned());

    let symbols = if cli.commands.is_empty() {
        scenario.rover.commands
    } else {
        split_symbols(&cli.commands)
    };

    let mut lines = Vec::new();
    let outcome = match Rover::from_symbols(world, (x, y), &heading) {
        Ok(mut rover) => {
            let mut events = Vec::new();
            let outcome = rover.execute(&symbols, &mut events);
            if cli.trace {
                for event in &events {
                    lines.push(serde_json::to_string(event).context("failed to encode event")?);
                }
            }
            outcome
        }
        Err(error) => {
            warn!(%error, x, y, %heading, "rover could not be placed");
            rejected_start()
        }
    };

    lines.push(serde_json::to_string(&outcome).context("failed to encode outcome")?);
    Ok(lines)
}

/// Outcome reported when the start pose is unusable; the rover stays at the origin.
fn rejected_start() -> CommandOutcome {
    CommandOutcome::new(
        Status::InvalidCommand,
        Pose::new(Position::new(0, 0), Heading::North),
    )
}

/// Splits positional arguments into single command symbols.
///
/// Arguments are separated on whitespace and commas, then each remaining
/// piece is split into characters so that `FFRF` reads as four commands.
fn split_symbols(arguments: &[String]) -> Vec<String> {
    arguments
        .iter()
        .flat_map(|argument| argument.split(|c: char| c.is_whitespace() || c == ','))
        .flat_map(str::chars)
        .map(String::from)
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn cli(arguments: &[&str]) -> Cli {
        Cli::try_parse_from(std::iter::once("mars-rover").chain(arguments.iter().copied()))
            .expect("arguments parse")
    }

    fn strings(values: &[&str]) -> Vec<String> {
        values.iter().map(|value| (*value).to_owned()).collect()
    }

    #[test]
    fn split_symbols_accepts_compact_and_separated_forms() {
        let expected = strings(&["F", "F", "R", "F"]);

        assert_eq!(split_symbols(&strings(&["FFRF"])), expected);
        assert_eq!(split_symbols(&strings(&["F,F,R,F"])), expected);
        assert_eq!(split_symbols(&strings(&["F F", "R", "F"])), expected);
        assert!(split_symbols(&strings(&[" , "])).is_empty());
    }

    #[test]
    fn default_log_filter_parses() {
        assert!(EnvFilter::try_new(DEFAULT_LOG_FILTER).is_ok());
    }

    #[test]
    fn run_reports_obstacle_from_default_world() {
        let lines = run(cli(&["--x", "2", "--y", "2", "FFRF"])).expect("run succeeds");

        assert_eq!(lines, vec![r#"{"status":"OBSTACLE","loc":[2,0],"dir":"E"}"#]);
    }

    #[test]
    fn run_reports_invalid_start_heading() {
        let lines = run(cli(&["--x", "2", "--y", "2", "--heading", "Q", "F"]))
            .expect("run succeeds");

        assert_eq!(
            lines,
            vec![r#"{"status":"INVALID_COMMAND","loc":[0,0],"dir":"N"}"#]
        );
    }

    #[test]
    fn run_rejects_negative_start() {
        let lines = run(cli(&["--x", "-1", "F"])).expect("run succeeds");

        assert_eq!(
            lines,
            vec![r#"{"status":"INVALID_COMMAND","loc":[0,0],"dir":"N"}"#]
        );
    }

    #[test]
    fn trace_prints_events_before_outcome() {
        let lines =
            run(cli(&["--x", "2", "--y", "2", "--trace", "L", "F"])).expect("run succeeds");

        assert_eq!(
            lines,
            vec![
                r#"{"event":"turned","from":"N","to":"W"}"#,
                r#"{"event":"blocked","from":[2,2],"toward":"W","reason":{"terrain":"mountain"}}"#,
                r#"{"status":"OBSTACLE","loc":[2,2],"dir":"W"}"#,
            ]
        );
    }
}
