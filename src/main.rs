//! Binary entrypoint: read a commit window from a repository, write the
//! profile to stdout as JSON or plain text.
//!
//! Exit codes: 1 = not a git repository, 2 = no commit history,
//! 3 = analysis failed.

use std::io::{self, Write};
use std::path::PathBuf;

use clap::{Parser, ValueEnum};

use history_engine::{read_commits, render, Config, Engine, EngineError};

#[derive(Debug, Parser)]
#[command(
  name = "history-engine",
  about = "Learn a project's commit-message conventions from its git history"
)]
struct Args {
  /// Number of commits to analyze.
  #[arg(long, default_value_t = 50)]
  count: usize,

  /// Branch or ref to read.
  #[arg(long, default_value = "HEAD")]
  branch: String,

  /// Output rendering.
  #[arg(long, value_enum, default_value = "text")]
  format: Format,

  /// Suppress scopes used fewer than this many times.
  #[arg(long = "min-frequency", default_value_t = 2)]
  min_frequency: u32,

  /// Repository path (any directory inside the working tree).
  #[arg(long, default_value = ".")]
  path: PathBuf,
}

#[derive(Debug, Clone, Copy, ValueEnum)]
enum Format {
  Json,
  Text,
}

fn main() {
  let args = Args::parse();
  if let Err(e) = run(&args) {
    let _ = writeln!(io::stderr(), "history-engine: {}", e);
    std::process::exit(e.exit_code());
  }
}

fn run(args: &Args) -> Result<(), EngineError> {
  let config = Config {
    min_scope_frequency: args.min_frequency,
    ..Config::default()
  };

  let window = read_commits(&args.path, &args.branch, args.count)?;
  let profile = Engine::new(config).analyze(&window.records, &window.branch)?;

  match args.format {
    Format::Json => {
      let stdout = io::stdout();
      let mut out = stdout.lock();
      serde_json::to_writer_pretty(&mut out, &profile)?;
      let _ = writeln!(out);
    }
    Format::Text => {
      print!("{}", render::render_text(&profile));
    }
  }
  Ok(())
}
