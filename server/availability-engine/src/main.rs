//! Binary entrypoint: read a response log file, write the availability report.
//!
//! Usage:
//!   availability-engine --input <log> [-N <runs>] [-t <threshold>] [-m <window>] [--json]
//!
//! `-N` is the minimum consecutive-failure run length, `-t` the overload
//! moving-average threshold, `-m` the trailing window size in valid samples
//! (0 leaves overload detection off). `--json` emits the report as a JSON
//! object instead of text.

use availability_engine::{analyze, log, report, Config};
use std::env;
use std::io::{self, Write};

const USAGE: &str =
  "usage: availability-engine --input <log> [-N <runs>] [-t <threshold>] [-m <window>] [--json]";

fn main() {
  if let Err(e) = run_binary() {
    let _ = writeln!(io::stderr(), "availability-engine: {}", e);
    std::process::exit(1);
  }
}

fn run_binary() -> Result<(), Box<dyn std::error::Error>> {
  let args: Vec<String> = env::args().skip(1).collect();

  let mut input: Option<String> = None;
  let mut config = Config::default();
  let mut json = false;

  let mut i = 0;
  while i < args.len() {
    match args[i].as_str() {
      "--input" | "-i" => {
        i += 1;
        input = Some(arg_value(&args, i, "--input")?.to_string());
      }
      "-N" => {
        i += 1;
        config.min_failure_run = arg_value(&args, i, "-N")?.parse()?;
      }
      "-t" => {
        i += 1;
        config.overload_threshold = arg_value(&args, i, "-t")?.parse()?;
      }
      "-m" => {
        i += 1;
        config.overload_window = arg_value(&args, i, "-m")?.parse()?;
      }
      "--json" => json = true,
      other => return Err(format!("unknown argument: {}\n{}", other, USAGE).into()),
    }
    i += 1;
  }

  let input = input.ok_or(USAGE)?;
  let mut servers = log::load_path(&input)?;
  let result = analyze(&mut servers, &config)?;

  let stdout = io::stdout();
  let mut out = io::BufWriter::new(stdout.lock());
  if json {
    serde_json::to_writer(&mut out, &result)?;
    writeln!(out)?;
  } else {
    out.write_all(report::render(&result).as_bytes())?;
  }
  out.flush()?;
  Ok(())
}

fn arg_value<'a>(args: &'a [String], i: usize, flag: &str) -> Result<&'a str, String> {
  args
    .get(i)
    .map(|s| s.as_str())
    .ok_or_else(|| format!("{} needs a value", flag))
}
