//! Plain-text rendering of a profile for terminal use (`--format text`).

use std::fmt::Write;

use crate::types::{Confidence, ProjectProfile};

fn confidence_label(c: Confidence) -> &'static str {
  match c {
    Confidence::High => "high",
    Confidence::Medium => "medium",
    Confidence::Low => "low",
  }
}

pub fn render_text(profile: &ProjectProfile) -> String {
  let mut out = String::new();

  let _ = writeln!(
    out,
    "Commit history profile — {} ({} commits, confidence {})",
    profile.branch,
    profile.commits_analyzed,
    confidence_label(profile.confidence)
  );
  if profile.confidence == Confidence::Low {
    let _ = writeln!(
      out,
      "note: fewer than 10 commits analyzed; treat results as indicative only"
    );
  }
  if profile.commits_skipped > 0 {
    let _ = writeln!(out, "note: {} malformed commit(s) skipped", profile.commits_skipped);
  }
  let _ = writeln!(out, "Consistency score: {}/100", profile.consistency_score);

  let _ = writeln!(out, "\nStyle");
  let s = &profile.style;
  let _ = writeln!(out, "  conventional commits: {}%", s.conventional_commits_percentage);
  let _ = writeln!(
    out,
    "  avg subject length: {} (stddev {})",
    s.average_subject_length, s.subject_length_stddev
  );
  let _ = writeln!(out, "  commits with body: {}%", s.has_body_percentage);
  let _ = writeln!(out, "  references issues: {}%", s.references_issues_percentage);
  if !s.common_types.is_empty() {
    let types: Vec<String> = s
      .common_types
      .iter()
      .map(|t| format!("{} ({})", t.name, t.count))
      .collect();
    let _ = writeln!(out, "  common types: {}", types.join(", "));
  }

  if !profile.scopes.is_empty() {
    let _ = writeln!(out, "\nScopes");
    for entry in &profile.scopes {
      let mut flags = Vec::new();
      if entry.active {
        flags.push("active");
      }
      if entry.deprecated {
        flags.push("deprecated");
      }
      let _ = writeln!(
        out,
        "  {:<20} {:>4}  {:?}{}",
        entry.name,
        entry.count,
        entry.category,
        if flags.is_empty() {
          String::new()
        } else {
          format!("  [{}]", flags.join(", "))
        }
      );
    }
  }

  let _ = writeln!(out, "\nPatterns");
  for (id, bucket) in &profile.patterns {
    let _ = writeln!(
      out,
      "  {:<24} {:>6}%  {:?}",
      id, bucket.percentage, bucket.strength
    );
  }

  if !profile.recommendations.is_empty() {
    let _ = writeln!(out, "\nRecommendations");
    for rec in &profile.recommendations {
      let _ = writeln!(
        out,
        "  [{:?}] {} (impact +{})",
        rec.priority, rec.title, rec.score_impact
      );
      for example in &rec.examples {
        let _ = writeln!(out, "      e.g. {}", example);
      }
    }
  }

  out
}
