//! History Engine — learns a project's commit-message conventions from its
//! git history; deterministic, rule-based.
//!
//! Reads an immutable window of commits, derives per-commit lexical
//! features, builds a scope taxonomy, classifies pattern frequencies into
//! strength bands, and emits a ProjectProfile JSON with a weighted
//! consistency score and prioritized recommendations.
//!
//! No AI, no DB, no network; pure computation over an already-materialized
//! commit list. Repeated runs over the same window yield byte-identical
//! output.

pub mod config;
pub mod engine;
pub mod error;
pub mod pattern;
pub mod recommend;
pub mod render;
pub mod scope;
pub mod source;
pub mod style;
pub mod types;

pub use config::Config;
pub use engine::Engine;
pub use error::EngineError;
pub use source::{read_commits, CommitWindow};
pub use types::{CommitRecord, ProjectProfile};
