//! Style analyzer: per-commit lexical features + aggregate subject/body stats.

use lazy_static::lazy_static;
use regex::Regex;
use std::collections::BTreeMap;

use crate::config::Config;
use crate::types::{round1, CommitFeatures, CommitRecord, FormatKind, StyleStats, StyleSummary, TypeCount};

lazy_static! {
  /// Conventional-commit grammar: `type(scope): description`.
  static ref CONVENTIONAL_RE: Regex = Regex::new(r"^([a-z]+)(\(([^)]+)\))?: .+").unwrap();
  /// Bracketed prefix format: `[PREFIX] description`.
  static ref PREFIXED_RE: Regex = Regex::new(r"^\[[^\]]+\]").unwrap();
  /// Issue references in body + footer.
  static ref ISSUE_RE: Regex = Regex::new(r"#\d+|[Cc]loses|[Ff]ixes|[Rr]efs").unwrap();
}

/// Imperative-verb whitelist. Intentionally coarse: verbs outside this list
/// are not recognized, and no grammatical mood detection is attempted.
const IMPERATIVE_VERBS: &[&str] = &[
  "add", "fix", "update", "remove", "delete", "create", "implement", "change", "improve",
  "optimize", "refactor", "enhance", "correct", "resolve", "merge", "bump", "revert", "document",
  "upgrade", "downgrade", "rename", "move", "replace", "extract", "simplify",
];

/// Known non-imperative forms checked first (so "added" never passes).
const NON_IMPERATIVE_FORMS: &[&str] = &[
  "added", "fixed", "updated", "removed", "deleted", "created", "implemented", "changed",
  "improved", "adding", "fixing", "updating",
];

/// Analyze the window. Precondition: `commits` is non-empty (the aggregator
/// raises `NoCommits` before calling in here).
pub fn analyze(commits: &[CommitRecord], config: &Config) -> (Vec<CommitFeatures>, StyleSummary) {
  let mut features = Vec::with_capacity(commits.len());
  let mut commits_skipped = 0usize;
  let mut type_counts: BTreeMap<String, u32> = BTreeMap::new();

  for record in commits {
    let f = extract_features(record, config);
    if record.subject.trim().is_empty() {
      commits_skipped += 1;
    }
    if let Some(t) = &f.commit_type {
      *type_counts.entry(t.clone()).or_insert(0) += 1;
    }
    features.push(f);
  }

  let total = commits.len();
  let lengths: Vec<f64> = features.iter().map(|f| f.subject_length as f64).collect();
  let mean = lengths.iter().sum::<f64>() / total as f64;
  // Population standard deviation over all commits, conventional or not.
  let variance = lengths.iter().map(|l| (l - mean).powi(2)).sum::<f64>() / total as f64;

  let pct = |count: usize| round1(count as f64 / total as f64 * 100.0);
  let conventional = features
    .iter()
    .filter(|f| f.format_kind == FormatKind::Conventional)
    .count();
  let with_body = features.iter().filter(|f| f.has_body).count();
  let with_issues = features.iter().filter(|f| f.references_issue).count();

  let mut common_types: Vec<TypeCount> = type_counts
    .into_iter()
    .map(|(name, count)| TypeCount {
      name,
      count,
      percentage: round1(count as f64 / total as f64 * 100.0),
    })
    .collect();
  common_types.sort_by(|a, b| b.count.cmp(&a.count).then(a.name.cmp(&b.name)));

  let summary = StyleSummary {
    commits_analyzed: total,
    commits_skipped,
    stats: StyleStats {
      conventional_commits_percentage: pct(conventional),
      average_subject_length: round1(mean),
      subject_length_stddev: round1(variance.sqrt()),
      has_body_percentage: pct(with_body),
      references_issues_percentage: pct(with_issues),
      common_types,
    },
  };

  (features, summary)
}

fn extract_features(record: &CommitRecord, config: &Config) -> CommitFeatures {
  let subject = record.subject.as_str();

  let (format_kind, commit_type, scope_token) = classify_format(subject);
  let scopes = scope_token
    .as_deref()
    .map(crate::scope::split_scope_token)
    .unwrap_or_default();

  let desc = description(subject);
  let body_and_footer = format!("{}\n{}", record.body, record.footer);
  let full = format!("{}\n{}", subject, body_and_footer);

  CommitFeatures {
    format_kind,
    commit_type,
    scope_token,
    scopes,
    subject_length: subject.chars().count(),
    is_imperative: is_imperative(desc),
    is_capitalized: desc.chars().next().map_or(false, |c| c.is_uppercase()),
    ends_without_period: !subject.ends_with('.'),
    has_body: !record.body.trim().is_empty(),
    blank_line_before_body: record.blank_line_after_subject,
    body_wrapped_72: is_body_wrapped(&record.body, config.body_wrap_width),
    has_footer: !record.footer.is_empty(),
    references_issue: ISSUE_RE.is_match(&body_and_footer),
    mentions_breaking: full.contains("BREAKING CHANGE:") || full.contains("BREAKING-CHANGE:"),
    has_co_author: full.contains("Co-authored-by:"),
    is_signed_off: full.contains("Signed-off-by:"),
  }
}

fn classify_format(subject: &str) -> (FormatKind, Option<String>, Option<String>) {
  if let Some(caps) = CONVENTIONAL_RE.captures(subject) {
    let commit_type = caps.get(1).map(|m| m.as_str().to_string());
    let scope_token = caps.get(3).map(|m| m.as_str().to_string());
    return (FormatKind::Conventional, commit_type, scope_token);
  }
  if PREFIXED_RE.is_match(subject) {
    return (FormatKind::Prefixed, None, None);
  }
  // Tag-style and unparseable subjects contribute to no positive bucket.
  if subject.trim().is_empty() || subject.starts_with('#') {
    return (FormatKind::Other, None, None);
  }
  (FormatKind::Simple, None, None)
}

/// The description part: text after `type(scope): ` when a colon is present,
/// the whole subject otherwise.
fn description(subject: &str) -> &str {
  match subject.split_once(':') {
    Some((_, rest)) => rest.trim_start(),
    None => subject,
  }
}

fn is_imperative(desc: &str) -> bool {
  let first = match desc.split_whitespace().next() {
    Some(w) => w.to_lowercase(),
    None => return false,
  };
  if NON_IMPERATIVE_FORMS.contains(&first.as_str()) {
    return false;
  }
  IMPERATIVE_VERBS.contains(&first.as_str())
}

/// Body lines must stay within `max_width`; bullets and URLs are exempt.
fn is_body_wrapped(body: &str, max_width: usize) -> bool {
  body.lines().all(|line| {
    let trimmed = line.trim_start();
    if trimmed.starts_with('-')
      || trimmed.starts_with('*')
      || trimmed.starts_with('•')
      || trimmed.starts_with("http://")
      || trimmed.starts_with("https://")
    {
      return true;
    }
    line.chars().count() <= max_width
  })
}

#[cfg(test)]
mod tests {
  use super::*;
  use chrono::{TimeZone, Utc};

  fn make_commit(index: usize, subject: &str, body: &str, footer: &str) -> CommitRecord {
    CommitRecord {
      index,
      subject: subject.to_string(),
      body: body.to_string(),
      footer: footer.to_string(),
      date: Utc.with_ymd_and_hms(2025, 6, 1, 12, 0, 0).unwrap(),
      blank_line_after_subject: true,
      files_changed: 1,
    }
  }

  fn features_of(subject: &str) -> CommitFeatures {
    let config = Config::default();
    let commits = vec![make_commit(0, subject, "", "")];
    let (features, _) = analyze(&commits, &config);
    features.into_iter().next().unwrap()
  }

  #[test]
  fn conventional_subject_with_scope() {
    let f = features_of("feat(auth): add login");
    assert_eq!(f.format_kind, FormatKind::Conventional);
    assert_eq!(f.commit_type.as_deref(), Some("feat"));
    assert_eq!(f.scope_token.as_deref(), Some("auth"));
    assert_eq!(f.scopes, vec!["auth".to_string()]);
    assert!(f.is_imperative);
    assert!(!f.is_capitalized);
    assert!(f.ends_without_period);
  }

  #[test]
  fn conventional_subject_without_scope() {
    let f = features_of("docs: update readme");
    assert_eq!(f.format_kind, FormatKind::Conventional);
    assert_eq!(f.commit_type.as_deref(), Some("docs"));
    assert!(f.scope_token.is_none());
    assert!(f.scopes.is_empty());
  }

  #[test]
  fn past_tense_capitalized_with_period() {
    // Past tense, capitalized, trailing period: three conventions broken at once.
    let f = features_of("Added new feature.");
    assert_eq!(f.format_kind, FormatKind::Simple);
    assert!(!f.is_imperative);
    assert!(f.is_capitalized);
    assert!(!f.ends_without_period);
  }

  #[test]
  fn prefixed_subject() {
    let f = features_of("[JIRA-123] Fix the thing");
    assert_eq!(f.format_kind, FormatKind::Prefixed);
  }

  #[test]
  fn tag_style_subject_is_other() {
    let f = features_of("#hotfix broken build");
    assert_eq!(f.format_kind, FormatKind::Other);
  }

  #[test]
  fn uppercase_type_is_not_conventional() {
    let f = features_of("Feat(auth): add login");
    assert_ne!(f.format_kind, FormatKind::Conventional);
  }

  #[test]
  fn gerund_is_not_imperative() {
    let f = features_of("fixing the build");
    assert!(!f.is_imperative);
  }

  #[test]
  fn unknown_verb_is_not_imperative() {
    // Known approximation: imperative verbs outside the whitelist miss.
    let f = features_of("teach the parser about scopes");
    assert!(!f.is_imperative);
  }

  #[test]
  fn capitalization_checked_after_type_prefix() {
    assert!(features_of("feat: Add login").is_capitalized);
    assert!(!features_of("feat: add login").is_capitalized);
  }

  #[test]
  fn issue_references_in_body_and_footer_only() {
    let config = Config::default();
    let commits = vec![
      make_commit(0, "fix: timeout", "", "Closes #42"),
      make_commit(1, "fix #42 directly in subject", "", ""),
    ];
    let (features, _) = analyze(&commits, &config);
    assert!(features[0].references_issue);
    assert!(!features[1].references_issue);
  }

  #[test]
  fn breaking_and_attribution_flags() {
    let config = Config::default();
    let commits = vec![make_commit(
      0,
      "feat(api): new tokens",
      "BREAKING CHANGE: tokens required",
      "Co-authored-by: Jane <j@example.com>\nSigned-off-by: Jane <j@example.com>",
    )];
    let (features, _) = analyze(&commits, &config);
    assert!(features[0].mentions_breaking);
    assert!(features[0].has_co_author);
    assert!(features[0].is_signed_off);
    assert!(features[0].has_footer);
  }

  #[test]
  fn body_wrap_allows_bullets_and_urls() {
    let long_bullet = format!("- {}", "x".repeat(90));
    let long_url = format!("https://example.com/{}", "y".repeat(90));
    assert!(is_body_wrapped(&format!("{}\n{}", long_bullet, long_url), 72));
    assert!(!is_body_wrapped(&"z".repeat(80), 72));
    assert!(is_body_wrapped("", 72));
  }

  #[test]
  fn aggregate_percentages_and_lengths() {
    let config = Config::default();
    let commits = vec![
      make_commit(0, "feat(auth): add login", "", ""),
      make_commit(1, "fix(auth): handle timeout", "The retry loop was unbounded.", ""),
      make_commit(2, "WIP stuff", "", ""),
    ];
    let (_, summary) = analyze(&commits, &config);
    assert_eq!(summary.commits_analyzed, 3);
    assert_eq!(summary.commits_skipped, 0);
    assert_eq!(summary.stats.conventional_commits_percentage, 66.7);
    assert_eq!(summary.stats.has_body_percentage, 33.3);
    let expected_mean = (21.0 + 25.0 + 9.0) / 3.0;
    assert!((summary.stats.average_subject_length - round1(expected_mean)).abs() < 1e-9);
    assert!(summary.stats.subject_length_stddev > 0.0);
  }

  #[test]
  fn common_types_sorted_by_count_then_name() {
    let config = Config::default();
    let commits = vec![
      make_commit(0, "feat: a", "", ""),
      make_commit(1, "feat: b", "", ""),
      make_commit(2, "fix: c", "", ""),
      make_commit(3, "docs: d", "", ""),
    ];
    let (_, summary) = analyze(&commits, &config);
    let names: Vec<&str> = summary.stats.common_types.iter().map(|t| t.name.as_str()).collect();
    assert_eq!(names, vec!["feat", "docs", "fix"]);
    assert_eq!(summary.stats.common_types[0].count, 2);
  }

  #[test]
  fn empty_subject_counts_as_skipped() {
    let config = Config::default();
    let commits = vec![make_commit(0, "", "", ""), make_commit(1, "fix: x", "", "")];
    let (features, summary) = analyze(&commits, &config);
    assert_eq!(summary.commits_skipped, 1);
    assert_eq!(features[0].format_kind, FormatKind::Other);
  }
}
