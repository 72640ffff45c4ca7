//! Pipeline configuration with sane defaults.

/// Tunable thresholds and window sizes for the analysis pipeline.
#[derive(Debug, Clone)]
pub struct Config {
  /// How many most-recent commits count toward scope "activity".
  pub recent_window: usize,
  /// Suppress scopes used fewer than this many times.
  pub min_scope_frequency: u32,
  /// Body lines longer than this break the wrapped-body convention.
  pub body_wrap_width: usize,
  /// Average subject length above this triggers a recommendation.
  pub subject_length_warn: f64,
  /// Recommended subject length ceiling.
  pub subject_length_target: f64,
  /// Conventional-commit usage below this gets a high-priority adoption nudge.
  pub conventional_adopt_below: f64,
  /// ... and below this (but above adopt) a medium-priority one.
  pub conventional_increase_below: f64,
  /// Target conventional-commit percentage used for score-impact projection.
  pub conventional_target: f64,
  /// Imperative-mood usage below this triggers a recommendation.
  pub imperative_below: f64,
  pub imperative_target: f64,
  /// Body usage below this (with multi-file commits present) triggers one.
  pub body_usage_below: f64,
  /// Windows smaller than this are tagged `confidence = low`.
  pub low_confidence_below: usize,
  pub medium_confidence_below: usize,
  /// Max verbatim example subjects per recommendation.
  pub max_examples: usize,
}

impl Default for Config {
  fn default() -> Self {
    Self {
      recent_window: 10,
      min_scope_frequency: 2,
      body_wrap_width: 72,
      subject_length_warn: 60.0,
      subject_length_target: 50.0,
      conventional_adopt_below: 50.0,
      conventional_increase_below: 80.0,
      conventional_target: 90.0,
      imperative_below: 80.0,
      imperative_target: 90.0,
      body_usage_below: 50.0,
      low_confidence_below: 10,
      medium_confidence_below: 50,
      max_examples: 3,
    }
  }
}
