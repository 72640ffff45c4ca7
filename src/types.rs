//! Core types for the history engine (JSON contracts + internal models).

use chrono::{DateTime, Utc};
use serde::Serialize;
use std::collections::BTreeMap;

/// Round to one decimal place (all contract percentages use this).
pub(crate) fn round1(x: f64) -> f64 {
  (x * 10.0).round() / 10.0
}

// ---------------------------------------------------------------------------
// Input types (what the source hands the pipeline)
// ---------------------------------------------------------------------------

/// One commit from the analysis window. Immutable; `index` 0 = most recent.
#[derive(Debug, Clone)]
pub struct CommitRecord {
  pub index: usize,
  pub subject: String,
  /// Body paragraphs joined with blank lines; empty when the commit has none.
  pub body: String,
  /// Trailing trailer paragraph (Closes/Fixes/Co-authored-by/...), or empty.
  pub footer: String,
  pub date: DateTime<Utc>,
  /// Was the line right after the subject blank (or absent)?
  pub blank_line_after_subject: bool,
  /// Files touched by this commit (tree diff vs first parent).
  pub files_changed: usize,
}

// ---------------------------------------------------------------------------
// Per-commit features (Style Analyzer output)
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum FormatKind {
  Conventional,
  Simple,
  Prefixed,
  Other,
}

/// Lexical features derived from one commit, index-aligned with the input.
#[derive(Debug, Clone)]
pub struct CommitFeatures {
  pub format_kind: FormatKind,
  /// Conventional type (`feat`, `fix`, ...); only for conventional commits.
  pub commit_type: Option<String>,
  /// Raw text between the parentheses, before splitting. Handed to the
  /// scope extractor as-is.
  pub scope_token: Option<String>,
  pub scopes: Vec<String>,
  pub subject_length: usize,
  pub is_imperative: bool,
  pub is_capitalized: bool,
  pub ends_without_period: bool,
  pub has_body: bool,
  pub blank_line_before_body: bool,
  pub body_wrapped_72: bool,
  pub has_footer: bool,
  pub references_issue: bool,
  pub mentions_breaking: bool,
  pub has_co_author: bool,
  pub is_signed_off: bool,
}

/// Per-conventional-type frequency (for the learned style guide).
#[derive(Debug, Clone, Serialize)]
pub struct TypeCount {
  pub name: String,
  pub count: u32,
  pub percentage: f64,
}

/// Aggregate subject/body stats emitted under `style` in the profile.
#[derive(Debug, Clone, Serialize)]
pub struct StyleStats {
  pub conventional_commits_percentage: f64,
  pub average_subject_length: f64,
  pub subject_length_stddev: f64,
  pub has_body_percentage: f64,
  pub references_issues_percentage: f64,
  pub common_types: Vec<TypeCount>,
}

/// Style Analyzer output: the serialized stats plus run-level counters.
#[derive(Debug, Clone)]
pub struct StyleSummary {
  pub commits_analyzed: usize,
  /// Commits whose subject could not be parsed (empty/whitespace).
  pub commits_skipped: usize,
  pub stats: StyleStats,
}

// ---------------------------------------------------------------------------
// Scope taxonomy
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum ScopeCategory {
  Feature,
  Backend,
  Ui,
  Infrastructure,
  Documentation,
  Testing,
  Configuration,
  Core,
  Other,
}

/// Parent/child pair for scopes containing exactly one `/`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ScopeHierarchy {
  pub parent: String,
  pub child: String,
}

/// One unique scope discovered across the window.
#[derive(Debug, Clone, Serialize)]
pub struct ScopeEntry {
  pub name: String,
  pub count: u32,
  pub percentage: f64,
  pub category: ScopeCategory,
  pub hierarchy: Option<ScopeHierarchy>,
  /// Occurrences within the most recent 10 commits.
  pub recent_usage: u32,
  pub active: bool,
  pub deprecated: bool,
}

/// Scope Extractor output: display-ordered entries plus parent rollups.
#[derive(Debug, Clone)]
pub struct ScopeSummary {
  pub entries: Vec<ScopeEntry>,
  /// Aggregate counts for hierarchical parents (parent's own occurrences
  /// plus all `parent/child` occurrences). Reporting only; `entries` counts
  /// stay un-doubled.
  pub parent_totals: BTreeMap<String, u32>,
}

// ---------------------------------------------------------------------------
// Pattern buckets
// ---------------------------------------------------------------------------

/// Discrete label for a pattern's aggregate frequency.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Strength {
  Perfect,
  Strong,
  Dominant,
  Common,
  Moderate,
  Occasional,
  Rare,
  Absent,
}

impl Strength {
  /// Fixed threshold table; bands are inclusive on their lower bound.
  pub fn from_percentage(pct: f64) -> Self {
    if pct >= 95.0 {
      Self::Perfect
    } else if pct >= 80.0 {
      Self::Strong
    } else if pct >= 65.0 {
      Self::Dominant
    } else if pct >= 45.0 {
      Self::Common
    } else if pct >= 25.0 {
      Self::Moderate
    } else if pct >= 10.0 {
      Self::Occasional
    } else if pct >= 1.0 {
      Self::Rare
    } else {
      Self::Absent
    }
  }
}

#[derive(Debug, Clone, Serialize)]
pub struct PatternBucket {
  pub count: u32,
  pub percentage: f64,
  pub strength: Strength,
}

// ---------------------------------------------------------------------------
// Recommendations
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Priority {
  High,
  Medium,
  Low,
}

impl Priority {
  pub fn rank(self) -> u8 {
    match self {
      Self::High => 0,
      Self::Medium => 1,
      Self::Low => 2,
    }
  }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Effort {
  Low,
  Medium,
  High,
}

#[derive(Debug, Clone, Serialize)]
pub struct Recommendation {
  pub title: String,
  pub priority: Priority,
  pub current_value: f64,
  pub target_value: f64,
  /// Consistency-score points gained if fully adopted.
  pub score_impact: f64,
  pub effort: Effort,
  /// Verbatim subjects from matching commits.
  pub examples: Vec<String>,
}

// ---------------------------------------------------------------------------
// Project profile (the terminal artifact)
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Confidence {
  High,
  Medium,
  Low,
}

/// The sole externally consumed artifact. Recomputed fresh every run.
#[derive(Debug, Clone, Serialize)]
pub struct ProjectProfile {
  pub commits_analyzed: usize,
  pub branch: String,
  pub confidence: Confidence,
  /// Malformed commits (unparseable subject) seen in the window.
  pub commits_skipped: usize,
  pub consistency_score: f64,
  pub style: StyleStats,
  pub scopes: Vec<ScopeEntry>,
  pub patterns: BTreeMap<String, PatternBucket>,
  pub recommendations: Vec<Recommendation>,
}
