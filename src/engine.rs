//! Profile aggregator: runs the analyzers over one immutable commit window
//! and merges their outputs into a ProjectProfile.

use crate::config::Config;
use crate::error::EngineError;
use crate::pattern;
use crate::recommend;
use crate::scope;
use crate::style;
use crate::types::{Confidence, CommitRecord, ProjectProfile};

/// The analysis pipeline. Stateless across runs: the same commit window
/// always yields an identical profile.
pub struct Engine {
  config: Config,
}

impl Engine {
  pub fn new(config: Config) -> Self {
    Self { config }
  }

  pub fn with_defaults() -> Self {
    Self::new(Config::default())
  }

  /// Run all four analyzers over the window and assemble the profile.
  ///
  /// The three mid-pipeline analyzers only read the shared immutable commit
  /// list; they run sequentially here for deterministic output. The
  /// recommender is the synchronization point either way.
  pub fn analyze(&self, commits: &[CommitRecord], branch: &str) -> Result<ProjectProfile, EngineError> {
    if commits.is_empty() {
      return Err(EngineError::NoCommits);
    }

    let (features, summary) = style::analyze(commits, &self.config);
    let scopes = scope::extract(&features, commits.len(), &self.config);
    let patterns = pattern::detect(&features);

    let consistency_score = recommend::consistency_score(&summary.stats, &patterns);
    let recommendations = recommend::recommend(
      commits,
      &features,
      &summary.stats,
      &patterns,
      &scopes,
      &self.config,
    );

    // Small windows still produce output; downstream consumers show a
    // caveat instead of suppressing it.
    let confidence = if commits.len() < self.config.low_confidence_below {
      Confidence::Low
    } else if commits.len() < self.config.medium_confidence_below {
      Confidence::Medium
    } else {
      Confidence::High
    };

    Ok(ProjectProfile {
      commits_analyzed: summary.commits_analyzed,
      branch: branch.to_string(),
      confidence,
      commits_skipped: summary.commits_skipped,
      consistency_score,
      style: summary.stats,
      scopes: scopes.entries,
      patterns,
      recommendations,
    })
  }
}
