use anyhow::{anyhow, bail, Context};
use mole_core::{GameConfig, ModeKind};
use std::fs::File;
use std::io::{self, BufReader};
use std::path::PathBuf;

mod sim;
mod trace;

#[derive(Debug)]
struct Cli {
    mode: ModeKind,
    threshold: Option<f64>,
    tail_ms: f64,
    trace: Option<PathBuf>,
    help: bool,
}

impl Default for Cli {
    fn default() -> Self {
        Self {
            mode: ModeKind::Classic,
            threshold: None,
            tail_ms: 0.0,
            trace: None,
            help: false,
        }
    }
}

fn print_help() {
    println!(
        r#"mole-sim: replay an accelerometer trace through a game mode

Usage: mole-sim [OPTIONS] [TRACE]

  TRACE              CSV file of `t_ms,x,y,z` lines (`#` comments allowed).
                     Reads stdin when omitted.
  --mode MODE        classic (default) or regular.
  --threshold N      Shake threshold in m/s² (default 25).
  --tail MS          Keep ticking frames for MS after the last sample.
  --help, -h         Show this help.

Set RUST_LOG=debug to follow every score change."#
    );
}

fn parse_cli(args: impl IntoIterator<Item = String>) -> anyhow::Result<Cli> {
    let mut cli = Cli::default();
    let mut args = args.into_iter();
    while let Some(arg) = args.next() {
        match arg.as_str() {
            "--help" | "-h" => cli.help = true,
            "--mode" => {
                let value = args.next().ok_or_else(|| anyhow!("--mode requires a value"))?;
                cli.mode = value.parse()?;
            }
            "--threshold" => {
                let value = args
                    .next()
                    .ok_or_else(|| anyhow!("--threshold requires a value"))?;
                cli.threshold = Some(
                    value
                        .parse()
                        .with_context(|| format!("bad threshold {:?}", value))?,
                );
            }
            "--tail" => {
                let value = args.next().ok_or_else(|| anyhow!("--tail requires a value"))?;
                cli.tail_ms = value
                    .parse()
                    .with_context(|| format!("bad tail {:?}", value))?;
            }
            other if other.starts_with("--") => {
                bail!("unknown argument: {} (try --help)", other)
            }
            path => {
                if cli.trace.is_some() {
                    bail!("only one trace file may be given");
                }
                cli.trace = Some(PathBuf::from(path));
            }
        }
    }
    Ok(cli)
}

fn main() -> anyhow::Result<()> {
    env_logger::builder()
        .filter_level(log::LevelFilter::Info)
        .parse_default_env()
        .init();

    let cli = parse_cli(std::env::args().skip(1))?;
    if cli.help {
        print_help();
        return Ok(());
    }

    let mut config = GameConfig::default();
    if let Some(threshold) = cli.threshold {
        config.shake_threshold = threshold;
    }
    config.validate()?;

    let samples = match &cli.trace {
        Some(path) => {
            let file =
                File::open(path).with_context(|| format!("opening {}", path.display()))?;
            trace::read_trace(BufReader::new(file))?
        }
        None => trace::read_trace(io::stdin().lock())?,
    };
    log::info!(
        "replaying {} samples in {} mode, threshold {}",
        samples.len(),
        cli.mode,
        config.shake_threshold
    );

    let summary = sim::run(config, cli.mode, &samples, cli.tail_ms);
    log::info!(
        "{} frames, {} shakes, {} fever(s)",
        summary.frames,
        summary.shakes,
        summary.fevers
    );
    if summary.round_ended {
        println!("{} (round over)", summary.last_score_text);
    }
    println!("mode={} shakes={} score={}", summary.mode, summary.shakes, summary.score);
    Ok(())
}
