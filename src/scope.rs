//! Scope extractor: taxonomy of conventional-commit scopes (frequency,
//! hierarchy, category, activity, deprecation).

use std::collections::BTreeMap;

use crate::config::Config;
use crate::types::{
  round1, CommitFeatures, ScopeCategory, ScopeEntry, ScopeHierarchy, ScopeSummary,
};

/// A scope name, parsed once at extraction time.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ScopeName {
  Flat(String),
  Hierarchical { parent: String, child: String },
}

impl ScopeName {
  /// Exactly one `/` with non-empty halves makes a scope hierarchical;
  /// zero or more than one never does.
  pub fn parse(name: &str) -> Self {
    let parts: Vec<&str> = name.split('/').collect();
    if parts.len() == 2 && !parts[0].is_empty() && !parts[1].is_empty() {
      Self::Hierarchical {
        parent: parts[0].to_string(),
        child: parts[1].to_string(),
      }
    } else {
      Self::Flat(name.to_string())
    }
  }

  pub fn hierarchy(&self) -> Option<ScopeHierarchy> {
    match self {
      Self::Flat(_) => None,
      Self::Hierarchical { parent, child } => Some(ScopeHierarchy {
        parent: parent.clone(),
        child: child.clone(),
      }),
    }
  }
}

/// Ordered keyword table; the first rule whose keyword occurs in the
/// lowercased name wins.
const CATEGORY_RULES: &[(&[&str], ScopeCategory)] = &[
  (&["auth", "security", "login", "oauth"], ScopeCategory::Feature),
  (&["api", "endpoint", "backend", "server", "middleware"], ScopeCategory::Backend),
  (&["ui", "component", "style", "frontend"], ScopeCategory::Ui),
  (&["db", "database", "schema", "migration"], ScopeCategory::Backend),
  (&["docs", "readme", "changelog"], ScopeCategory::Documentation),
  (&["test", "e2e", "unit", "spec"], ScopeCategory::Testing),
  (&["ci", "cd", "deploy", "docker", "k8s"], ScopeCategory::Infrastructure),
  (&["config", "settings", "env"], ScopeCategory::Configuration),
  (&["core", "utils", "lib", "common"], ScopeCategory::Core),
];

pub fn categorize(name: &str) -> ScopeCategory {
  let lower = name.to_lowercase();
  for (keywords, category) in CATEGORY_RULES {
    if keywords.iter().any(|kw| lower.contains(kw)) {
      return *category;
    }
  }
  ScopeCategory::Other
}

/// Split a raw scope token on commas and whitespace (multi-scope commits:
/// `feat(api,docs): ...` → ["api", "docs"]).
pub fn split_scope_token(token: &str) -> Vec<String> {
  token
    .split(|c: char| c == ',' || c.is_whitespace())
    .filter(|s| !s.is_empty())
    .map(|s| s.to_string())
    .collect()
}

fn is_deprecated_name(name: &str) -> bool {
  let lower = name.to_lowercase();
  lower.contains("legacy") || lower.ends_with("-v1") || lower.ends_with("-old")
}

/// Build the scope taxonomy over the window. `features` is index-aligned
/// with the commit list (position 0 = most recent commit).
pub fn extract(features: &[CommitFeatures], commits_analyzed: usize, config: &Config) -> ScopeSummary {
  let mut counts: BTreeMap<String, u32> = BTreeMap::new();
  let mut recent: BTreeMap<String, u32> = BTreeMap::new();

  for (index, f) in features.iter().enumerate() {
    for name in &f.scopes {
      *counts.entry(name.clone()).or_insert(0) += 1;
      if index < config.recent_window {
        *recent.entry(name.clone()).or_insert(0) += 1;
      }
    }
  }

  // Rollup: every hierarchical occurrence also contributes to its parent's
  // aggregate. Kept separate from entry counts so those stay un-doubled.
  let mut parent_totals: BTreeMap<String, u32> = BTreeMap::new();
  for (name, count) in &counts {
    if let ScopeName::Hierarchical { parent, .. } = ScopeName::parse(name) {
      *parent_totals.entry(parent).or_insert(0) += count;
    }
  }
  for (name, count) in &counts {
    if let ScopeName::Flat(flat) = ScopeName::parse(name) {
      if let Some(total) = parent_totals.get_mut(&flat) {
        *total += count;
      }
    }
  }

  let mut entries: Vec<ScopeEntry> = counts
    .iter()
    .filter(|(_, &count)| count >= config.min_scope_frequency)
    .map(|(name, &count)| {
      let recent_usage = recent.get(name).copied().unwrap_or(0);
      let active = recent_usage > 0;
      ScopeEntry {
        name: name.clone(),
        count,
        percentage: round1(count as f64 / commits_analyzed as f64 * 100.0),
        category: categorize(name),
        hierarchy: ScopeName::parse(name).hierarchy(),
        recent_usage,
        active,
        deprecated: !active && is_deprecated_name(name),
      }
    })
    .collect();

  entries.sort_by(|a, b| b.count.cmp(&a.count).then(a.name.cmp(&b.name)));

  ScopeSummary {
    entries,
    parent_totals,
  }
}

#[cfg(test)]
mod tests {
  use super::*;
  use crate::types::FormatKind;

  fn scoped(scopes: &[&str]) -> CommitFeatures {
    CommitFeatures {
      format_kind: FormatKind::Conventional,
      commit_type: Some("feat".to_string()),
      scope_token: Some(scopes.join(",")),
      scopes: scopes.iter().map(|s| s.to_string()).collect(),
      subject_length: 20,
      is_imperative: true,
      is_capitalized: false,
      ends_without_period: true,
      has_body: false,
      blank_line_before_body: true,
      body_wrapped_72: true,
      has_footer: false,
      references_issue: false,
      mentions_breaking: false,
      has_co_author: false,
      is_signed_off: false,
    }
  }

  fn unscoped() -> CommitFeatures {
    let mut f = scoped(&[]);
    f.scope_token = None;
    f
  }

  #[test]
  fn single_slash_is_hierarchical() {
    let name = ScopeName::parse("api/endpoints");
    assert_eq!(
      name.hierarchy(),
      Some(ScopeHierarchy {
        parent: "api".to_string(),
        child: "endpoints".to_string(),
      })
    );
  }

  #[test]
  fn zero_or_many_slashes_stay_flat() {
    assert!(ScopeName::parse("auth").hierarchy().is_none());
    assert!(ScopeName::parse("a/b/c").hierarchy().is_none());
    assert!(ScopeName::parse("/child").hierarchy().is_none());
    assert!(ScopeName::parse("parent/").hierarchy().is_none());
  }

  #[test]
  fn multi_scope_token_splits_on_comma_and_space() {
    assert_eq!(split_scope_token("api,docs"), vec!["api", "docs"]);
    assert_eq!(split_scope_token("api, docs"), vec!["api", "docs"]);
    assert_eq!(split_scope_token("api docs"), vec!["api", "docs"]);
    assert!(split_scope_token(" , ").is_empty());
  }

  #[test]
  fn category_table_first_match_wins() {
    assert_eq!(categorize("auth"), ScopeCategory::Feature);
    assert_eq!(categorize("api/endpoints"), ScopeCategory::Backend);
    assert_eq!(categorize("database"), ScopeCategory::Backend);
    assert_eq!(categorize("frontend"), ScopeCategory::Ui);
    assert_eq!(categorize("docs"), ScopeCategory::Documentation);
    assert_eq!(categorize("e2e"), ScopeCategory::Testing);
    assert_eq!(categorize("docker"), ScopeCategory::Infrastructure);
    assert_eq!(categorize("settings"), ScopeCategory::Configuration);
    assert_eq!(categorize("utils"), ScopeCategory::Core);
    assert_eq!(categorize("weird-thing"), ScopeCategory::Other);
  }

  #[test]
  fn counts_activity_and_ordering() {
    let config = Config::default();
    let mut features = vec![scoped(&["auth"]), scoped(&["auth"]), unscoped()];
    features.push(scoped(&["api"]));
    features.push(scoped(&["api"]));
    features.push(scoped(&["api"]));
    let summary = extract(&features, features.len(), &config);

    assert_eq!(summary.entries.len(), 2);
    // api (3) sorts before auth (2).
    assert_eq!(summary.entries[0].name, "api");
    assert_eq!(summary.entries[0].count, 3);
    assert_eq!(summary.entries[1].name, "auth");
    assert_eq!(summary.entries[1].count, 2);
    assert!(summary.entries.iter().all(|e| e.active));
    assert_eq!(summary.entries[1].category, ScopeCategory::Feature);
  }

  #[test]
  fn equal_counts_break_ties_by_name() {
    let config = Config::default();
    let features = vec![
      scoped(&["zeta"]),
      scoped(&["zeta"]),
      scoped(&["alpha"]),
      scoped(&["alpha"]),
    ];
    let summary = extract(&features, 4, &config);
    assert_eq!(summary.entries[0].name, "alpha");
    assert_eq!(summary.entries[1].name, "zeta");
  }

  #[test]
  fn min_frequency_suppresses_rare_scopes() {
    let config = Config::default();
    let features = vec![scoped(&["auth"]), scoped(&["auth"]), scoped(&["oneoff"])];
    let summary = extract(&features, 3, &config);
    assert_eq!(summary.entries.len(), 1);
    assert_eq!(summary.entries[0].name, "auth");
  }

  #[test]
  fn scope_outside_recent_window_is_inactive() {
    let config = Config::default();
    let mut features: Vec<CommitFeatures> = (0..10).map(|_| unscoped()).collect();
    features.push(scoped(&["stale"]));
    features.push(scoped(&["stale"]));
    let summary = extract(&features, features.len(), &config);
    let entry = &summary.entries[0];
    assert_eq!(entry.name, "stale");
    assert_eq!(entry.recent_usage, 0);
    assert!(!entry.active);
    assert!(!entry.deprecated, "no legacy naming, so inactive only");
  }

  #[test]
  fn inactive_legacy_names_are_deprecated() {
    let config = Config::default();
    let mut features: Vec<CommitFeatures> = (0..10).map(|_| unscoped()).collect();
    features.push(scoped(&["api-v1"]));
    features.push(scoped(&["api-v1"]));
    features.push(scoped(&["legacy-auth"]));
    features.push(scoped(&["legacy-auth"]));
    let summary = extract(&features, features.len(), &config);
    assert!(summary.entries.iter().all(|e| e.deprecated));
  }

  #[test]
  fn active_legacy_name_is_not_deprecated() {
    let config = Config::default();
    let features = vec![scoped(&["legacy-auth"]), scoped(&["legacy-auth"])];
    let summary = extract(&features, 2, &config);
    assert!(summary.entries[0].active);
    assert!(!summary.entries[0].deprecated);
  }

  #[test]
  fn hierarchical_scopes_roll_up_into_parent_totals() {
    let config = Config::default();
    let features = vec![
      scoped(&["api/endpoints"]),
      scoped(&["api/endpoints"]),
      scoped(&["api/auth"]),
      scoped(&["api/auth"]),
      scoped(&["api"]),
      scoped(&["api"]),
    ];
    let summary = extract(&features, 6, &config);

    // Entry counts stay un-doubled: sum equals scoped-commit count.
    let total: u32 = summary.entries.iter().map(|e| e.count).sum();
    assert_eq!(total, 6);
    assert_eq!(summary.parent_totals.get("api"), Some(&6));
  }

  #[test]
  fn multi_scope_commits_count_each_scope() {
    let config = Config::default();
    let features = vec![scoped(&["api", "docs"]), scoped(&["api", "docs"])];
    let summary = extract(&features, 2, &config);
    let total: u32 = summary.entries.iter().map(|e| e.count).sum();
    assert_eq!(total, 4);
    assert_eq!(summary.entries[0].percentage, 100.0);
  }
}
