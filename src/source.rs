//! Version control log provider: reads a commit window via libgit2.
//!
//! The rest of the pipeline never touches the repository; it only sees the
//! immutable `CommitRecord` list materialized here.

use std::path::Path;

use chrono::{DateTime, TimeZone, Utc};
use git2::Repository;
use lazy_static::lazy_static;
use regex::Regex;

use crate::error::EngineError;
use crate::types::CommitRecord;

lazy_static! {
  /// Lines that mark a trailing paragraph as a footer.
  static ref TRAILER_RE: Regex = Regex::new(
    r"^(BREAKING[- ]CHANGE:|Closes #\d+|Fixes #\d+|Refs #\d+|Co-authored-by:|Signed-off-by:)"
  )
  .unwrap();
}

/// A materialized, immutable commit window for one `(branch, count)` read.
#[derive(Debug)]
pub struct CommitWindow {
  pub branch: String,
  pub head_id: String,
  pub records: Vec<CommitRecord>,
}

impl CommitWindow {
  /// Stable cache key for this window. The pipeline is deterministic, so the
  /// same key always maps to an identical profile.
  pub fn cache_key(&self) -> String {
    let mut hasher = blake3::Hasher::new();
    hasher.update(self.branch.as_bytes());
    hasher.update(b"|");
    hasher.update(self.head_id.as_bytes());
    hasher.update(b"|");
    hasher.update(self.records.len().to_string().as_bytes());
    let hex = hasher.finalize().to_hex();
    format!("profile-{}", &hex[..16])
  }
}

/// Read up to `count` commits from `branch` (or `HEAD`), most recent first.
pub fn read_commits(path: &Path, branch: &str, count: usize) -> Result<CommitWindow, EngineError> {
  let repo = Repository::discover(path).map_err(|_| EngineError::NoRepository)?;

  let head = if branch == "HEAD" {
    // An unborn HEAD (fresh `git init`) means no history, not a git failure.
    let head_ref = repo.head().map_err(|_| EngineError::NoCommits)?;
    head_ref.peel_to_commit().map_err(|_| EngineError::NoCommits)?
  } else {
    repo
      .revparse_single(branch)?
      .peel(git2::ObjectType::Commit)?
      .into_commit()
      .map_err(|_| EngineError::NoCommits)?
  };
  let head_id = head.id().to_string();

  let mut revwalk = repo.revwalk()?;
  revwalk.push(head.id())?;

  let mut records = Vec::new();
  for (index, oid) in revwalk.take(count).enumerate() {
    let oid = oid?;
    let commit = repo.find_commit(oid)?;
    let split = split_message(commit.message().unwrap_or(""));

    let date: DateTime<Utc> = Utc
      .timestamp_opt(commit.time().seconds(), 0)
      .single()
      .unwrap_or(DateTime::<Utc>::UNIX_EPOCH);

    // Changed-file count: tree diff against the first parent (root commits
    // diff against the empty tree).
    let tree = commit.tree()?;
    let parent_tree = match commit.parents().next() {
      Some(parent) => Some(parent.tree()?),
      None => None,
    };
    let diff = repo.diff_tree_to_tree(parent_tree.as_ref(), Some(&tree), None)?;
    let files_changed = diff.stats()?.files_changed();

    records.push(CommitRecord {
      index,
      subject: split.subject,
      body: split.body,
      footer: split.footer,
      date,
      blank_line_after_subject: split.blank_line_after_subject,
      files_changed,
    });
  }

  if records.is_empty() {
    return Err(EngineError::NoCommits);
  }

  Ok(CommitWindow {
    branch: branch.to_string(),
    head_id,
    records,
  })
}

pub(crate) struct SplitMessage {
  pub subject: String,
  pub body: String,
  pub footer: String,
  pub blank_line_after_subject: bool,
}

/// Split a raw commit message into subject / body / footer.
///
/// The footer is the last paragraph, if any of its lines matches a trailer
/// pattern (issue refs, co-authors, sign-offs, breaking-change markers).
pub(crate) fn split_message(message: &str) -> SplitMessage {
  let mut lines = message.lines();
  let subject = lines.next().unwrap_or("").trim_end().to_string();
  let rest: Vec<&str> = lines.collect();

  let blank_line_after_subject = rest.first().map_or(true, |l| l.trim().is_empty());

  let mut paragraphs: Vec<Vec<String>> = Vec::new();
  let mut current: Vec<String> = Vec::new();
  for line in &rest {
    if line.trim().is_empty() {
      if !current.is_empty() {
        paragraphs.push(std::mem::take(&mut current));
      }
    } else {
      current.push((*line).to_string());
    }
  }
  if !current.is_empty() {
    paragraphs.push(current);
  }

  let mut footer = String::new();
  if let Some(last) = paragraphs.last() {
    if last.iter().any(|l| TRAILER_RE.is_match(l)) {
      footer = paragraphs
        .pop()
        .map(|p| p.join("\n"))
        .unwrap_or_default();
    }
  }

  let body = paragraphs
    .iter()
    .map(|p| p.join("\n"))
    .collect::<Vec<_>>()
    .join("\n\n");

  SplitMessage {
    subject,
    body,
    footer,
    blank_line_after_subject,
  }
}
