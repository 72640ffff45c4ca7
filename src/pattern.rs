//! Pattern detector: classifies commit features into format/convention/content
//! buckets and labels each bucket's frequency with a strength band.

use std::collections::BTreeMap;

use crate::types::{round1, CommitFeatures, FormatKind, PatternBucket, Strength};

// Format family.
pub const CONVENTIONAL_COMMITS: &str = "conventional_commits";
pub const SIMPLE_SUBJECT: &str = "simple_subject";
pub const PREFIXED: &str = "prefixed";

// Convention family.
pub const IMPERATIVE_MOOD: &str = "imperative_mood";
pub const CAPITALIZED_SUBJECT: &str = "capitalized_subject";
pub const NO_PERIOD_END: &str = "no_period_end";
pub const BLANK_LINE_BEFORE_BODY: &str = "blank_line_before_body";
pub const WRAPPED_BODY_72: &str = "wrapped_body_72";
pub const HAS_FOOTER: &str = "has_footer";

// Content family.
pub const REFERENCES_ISSUES: &str = "references_issues";
pub const MENTIONS_BREAKING: &str = "mentions_breaking";
pub const HAS_CO_AUTHORS: &str = "has_co_authors";
pub const SIGNED_OFF: &str = "signed_off";

/// Detect all tracked patterns. Every pattern id is always present in the
/// returned map (count 0 classifies as `absent`), so the output shape is
/// stable across windows.
pub fn detect(features: &[CommitFeatures]) -> BTreeMap<String, PatternBucket> {
  let total = features.len();
  // Body-only conventions are measured against the commits that have a body,
  // not the full window.
  let with_body = features.iter().filter(|f| f.has_body).count();

  let count = |pred: fn(&CommitFeatures) -> bool| features.iter().filter(|f| pred(f)).count();

  let mut patterns = BTreeMap::new();
  let mut insert = |id: &str, count: usize, denominator: usize| {
    let percentage = if denominator > 0 {
      round1(count as f64 / denominator as f64 * 100.0)
    } else {
      0.0
    };
    patterns.insert(
      id.to_string(),
      PatternBucket {
        count: count as u32,
        percentage,
        strength: Strength::from_percentage(percentage),
      },
    );
  };

  insert(
    CONVENTIONAL_COMMITS,
    count(|f| f.format_kind == FormatKind::Conventional),
    total,
  );
  insert(SIMPLE_SUBJECT, count(|f| f.format_kind == FormatKind::Simple), total);
  insert(PREFIXED, count(|f| f.format_kind == FormatKind::Prefixed), total);

  insert(IMPERATIVE_MOOD, count(|f| f.is_imperative), total);
  insert(CAPITALIZED_SUBJECT, count(|f| f.is_capitalized), total);
  insert(NO_PERIOD_END, count(|f| f.ends_without_period), total);
  insert(
    BLANK_LINE_BEFORE_BODY,
    count(|f| f.has_body && f.blank_line_before_body),
    with_body,
  );
  insert(
    WRAPPED_BODY_72,
    count(|f| f.has_body && f.body_wrapped_72),
    with_body,
  );
  insert(HAS_FOOTER, count(|f| f.has_footer), total);

  insert(REFERENCES_ISSUES, count(|f| f.references_issue), total);
  insert(MENTIONS_BREAKING, count(|f| f.mentions_breaking), total);
  insert(HAS_CO_AUTHORS, count(|f| f.has_co_author), total);
  insert(SIGNED_OFF, count(|f| f.is_signed_off), total);

  patterns
}
