//! Convention recommender: weighted consistency score + prioritized,
//! actionable recommendations with projected score impact.

use std::cmp::Ordering;
use std::collections::BTreeMap;

use crate::config::Config;
use crate::pattern;
use crate::types::{
  round1, CommitFeatures, CommitRecord, Effort, FormatKind, PatternBucket, Priority,
  Recommendation, ScopeSummary, StyleStats,
};

/// Fixed consistency-score weights. Must sum to exactly 1.00.
pub const WEIGHT_CONVENTIONAL: f64 = 0.30;
pub const WEIGHT_IMPERATIVE: f64 = 0.25;
pub const WEIGHT_CAPITALIZED: f64 = 0.15;
pub const WEIGHT_NO_PERIOD: f64 = 0.15;
pub const WEIGHT_HAS_BODY: f64 = 0.10;
pub const WEIGHT_REFERENCES_ISSUES: f64 = 0.05;

fn bucket_pct(patterns: &BTreeMap<String, PatternBucket>, id: &str) -> f64 {
  patterns.get(id).map_or(0.0, |b| b.percentage)
}

/// Weighted sum over the dominant conventions, rounded to the nearest
/// integer and clamped to [0, 100].
pub fn consistency_score(style: &StyleStats, patterns: &BTreeMap<String, PatternBucket>) -> f64 {
  let raw = WEIGHT_CONVENTIONAL * bucket_pct(patterns, pattern::CONVENTIONAL_COMMITS)
    + WEIGHT_IMPERATIVE * bucket_pct(patterns, pattern::IMPERATIVE_MOOD)
    + WEIGHT_CAPITALIZED * bucket_pct(patterns, pattern::CAPITALIZED_SUBJECT)
    + WEIGHT_NO_PERIOD * bucket_pct(patterns, pattern::NO_PERIOD_END)
    + WEIGHT_HAS_BODY * style.has_body_percentage
    + WEIGHT_REFERENCES_ISSUES * style.references_issues_percentage;
  raw.round().clamp(0.0, 100.0)
}

/// Generate recommendations. Rules are evaluated independently; output is
/// sorted by priority, then projected score impact descending (stable, so
/// ties keep rule order).
pub fn recommend(
  commits: &[CommitRecord],
  features: &[CommitFeatures],
  style: &StyleStats,
  patterns: &BTreeMap<String, PatternBucket>,
  scopes: &ScopeSummary,
  config: &Config,
) -> Vec<Recommendation> {
  let mut out = Vec::new();

  let subjects_where = |pred: &dyn Fn(&CommitFeatures) -> bool| -> Vec<String> {
    features
      .iter()
      .zip(commits)
      .filter(|(f, _)| pred(f))
      .map(|(_, c)| c.subject.clone())
      .take(config.max_examples)
      .collect()
  };

  let conv_pct = bucket_pct(patterns, pattern::CONVENTIONAL_COMMITS);
  if conv_pct < config.conventional_adopt_below {
    out.push(Recommendation {
      title: "Adopt Conventional Commits".to_string(),
      priority: Priority::High,
      current_value: conv_pct,
      target_value: config.conventional_target,
      score_impact: round1((config.conventional_target - conv_pct) * WEIGHT_CONVENTIONAL),
      effort: Effort::Medium,
      examples: subjects_where(&|f| f.format_kind == FormatKind::Conventional),
    });
  } else if conv_pct < config.conventional_increase_below {
    out.push(Recommendation {
      title: "Increase Conventional Commits usage".to_string(),
      priority: Priority::Medium,
      current_value: conv_pct,
      target_value: config.conventional_target,
      score_impact: round1((config.conventional_target - conv_pct) * WEIGHT_CONVENTIONAL),
      effort: Effort::Low,
      examples: subjects_where(&|f| f.format_kind != FormatKind::Conventional),
    });
  }

  if style.average_subject_length > config.subject_length_warn {
    out.push(Recommendation {
      title: "Reduce subject line length".to_string(),
      priority: Priority::High,
      current_value: style.average_subject_length,
      target_value: config.subject_length_target,
      // Subject length is not score-weighted; no direct score gain.
      score_impact: 0.0,
      effort: Effort::Low,
      examples: subjects_where(&|f| f.subject_length as f64 > config.subject_length_warn),
    });
  }

  let imperative_pct = bucket_pct(patterns, pattern::IMPERATIVE_MOOD);
  if imperative_pct < config.imperative_below {
    out.push(Recommendation {
      title: "Use imperative mood consistently".to_string(),
      priority: Priority::High,
      current_value: imperative_pct,
      target_value: config.imperative_target,
      score_impact: round1((config.imperative_target - imperative_pct) * WEIGHT_IMPERATIVE),
      effort: Effort::Low,
      examples: subjects_where(&|f| !f.is_imperative),
    });
  }

  let has_multi_file = commits.iter().any(|c| c.files_changed > 1);
  if style.has_body_percentage < config.body_usage_below && has_multi_file {
    out.push(Recommendation {
      title: "Increase body usage for complex changes".to_string(),
      priority: Priority::Medium,
      current_value: style.has_body_percentage,
      target_value: config.body_usage_below,
      score_impact: round1(
        (config.body_usage_below - style.has_body_percentage) * WEIGHT_HAS_BODY,
      ),
      effort: Effort::Medium,
      examples: Vec::new(),
    });
  }

  for entry in scopes.entries.iter().filter(|e| e.deprecated) {
    let name = entry.name.clone();
    out.push(Recommendation {
      title: format!("Retire deprecated scope `{}`", name),
      priority: Priority::Low,
      current_value: entry.count as f64,
      target_value: 0.0,
      score_impact: 0.0,
      effort: Effort::Low,
      examples: subjects_where(&|f| f.scopes.iter().any(|s| s == &name)),
    });
  }

  out.sort_by(|a, b| {
    a.priority
      .rank()
      .cmp(&b.priority.rank())
      .then(b.score_impact.partial_cmp(&a.score_impact).unwrap_or(Ordering::Equal))
  });
  out
}
