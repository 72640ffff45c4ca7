//! Structured error types for the history engine.

use thiserror::Error;

/// Fatal pipeline errors. Malformed individual commits are never errors —
/// they are counted and skipped.
#[derive(Debug, Error)]
pub enum EngineError {
  #[error("not a git repository")]
  NoRepository,

  #[error("no commit history found")]
  NoCommits,

  #[error("git: {0}")]
  Git(#[from] git2::Error),

  #[error("json: {0}")]
  Json(#[from] serde_json::Error),
}

impl EngineError {
  /// Process exit code for the CLI (matches the documented contract:
  /// 1 = not a repository, 2 = no history, 3 = analysis failed).
  pub fn exit_code(&self) -> i32 {
    match self {
      Self::NoRepository => 1,
      Self::NoCommits => 2,
      _ => 3,
    }
  }
}
