pub mod types;

pub use types::{FileChange, Hunk, LineChange, LineKind};

use thiserror::Error;

#[derive(Debug, Error)]
pub enum DiffError {
    #[error("failed to parse diff: {0}")]
    Malformed(String),
}

/// Parse a unified diff string into a vector of FileChange structs.
///
/// The input is the raw text from GitHub's diff media type. Each file section
/// starts with `diff --git a/{path} b/{path}`; the paths themselves are taken
/// from the `---`/`+++` lines that follow, so new files end up with an absent
/// source path and deleted files keep the literal `/dev/null` destination.
/// Hunks start with `@@ -{old_start},{old_count} +{new_start},{new_count} @@`
/// and their lines are prefixed with `+`, `-`, or a space.
pub fn parse_diff(raw_diff: &str) -> Result<Vec<FileChange>, DiffError> {
    if raw_diff.trim().is_empty() {
        return Ok(Vec::new());
    }

    let mut files = Vec::new();
    let mut current_file: Option<FileChange> = None;
    let mut current_hunk: Option<Hunk> = None;

    let finish_hunk = |file: &mut Option<FileChange>, hunk: &mut Option<Hunk>| {
        if let (Some(file), Some(hunk)) = (file.as_mut(), hunk.take()) {
            file.hunks.push(hunk);
        }
    };

    let finish_file =
        |files: &mut Vec<FileChange>, file: &mut Option<FileChange>, hunk: &mut Option<Hunk>| {
            finish_hunk(file, hunk);
            if let Some(file) = file.take() {
                files.push(file);
            }
        };

    for line in raw_diff.lines() {
        if line.starts_with("diff --git ") {
            finish_file(&mut files, &mut current_file, &mut current_hunk);
            current_file = Some(FileChange::default());
            continue;
        }

        if line.starts_with("@@") {
            finish_hunk(&mut current_file, &mut current_hunk);
            let (old_start, old_count, new_start, new_count) = parse_hunk_header(line)?;
            current_hunk = Some(Hunk {
                old_start,
                old_count,
                new_start,
                new_count,
                changes: Vec::new(),
            });
            continue;
        }

        // Before the first hunk of a file, `---`/`+++` carry the file paths.
        // Once a hunk is open the same prefixes are ordinary content lines.
        if current_hunk.is_none() {
            if let Some(file) = current_file.as_mut() {
                if let Some(rest) = line.strip_prefix("--- ") {
                    file.source_path = parse_old_path(rest);
                } else if let Some(rest) = line.strip_prefix("+++ ") {
                    file.dest_path = parse_new_path(rest);
                }
            }
            continue;
        }

        if let (Some(_), Some(hunk)) = (current_file.as_mut(), current_hunk.as_mut()) {
            if let Some(rest) = line.strip_prefix('+') {
                hunk.changes.push(LineChange {
                    kind: LineKind::Addition,
                    content: rest.to_string(),
                });
            } else if let Some(rest) = line.strip_prefix('-') {
                hunk.changes.push(LineChange {
                    kind: LineKind::Deletion,
                    content: rest.to_string(),
                });
            } else if let Some(rest) = line.strip_prefix(' ') {
                hunk.changes.push(LineChange {
                    kind: LineKind::Context,
                    content: rest.to_string(),
                });
            }
        }
    }

    finish_file(&mut files, &mut current_file, &mut current_hunk);
    Ok(files)
}

/// Old-side path from a `--- ` line. `/dev/null` means the file is new and
/// the source path is absent.
fn parse_old_path(rest: &str) -> Option<String> {
    let path = rest.trim();
    if path == "/dev/null" {
        return None;
    }
    Some(path.strip_prefix("a/").unwrap_or(path).to_string())
}

/// New-side path from a `+++ ` line. `/dev/null` is kept verbatim so deleted
/// files can be recognized by sentinel equality.
fn parse_new_path(rest: &str) -> Option<String> {
    let path = rest.trim();
    if path == "/dev/null" {
        return Some(path.to_string());
    }
    Some(path.strip_prefix("b/").unwrap_or(path).to_string())
}

fn parse_hunk_header(line: &str) -> Result<(usize, usize, usize, usize), DiffError> {
    let header = line
        .trim()
        .strip_prefix("@@")
        .ok_or_else(|| DiffError::Malformed("invalid hunk header".to_string()))?
        .trim();
    let header = header.trim_end_matches("@@").trim();
    let mut parts = header.split_whitespace();
    let old_part = parts
        .next()
        .ok_or_else(|| DiffError::Malformed("missing old range".to_string()))?;
    let new_part = parts
        .next()
        .ok_or_else(|| DiffError::Malformed("missing new range".to_string()))?;

    let (old_start, old_count) = parse_range(old_part, '-')?;
    let (new_start, new_count) = parse_range(new_part, '+')?;

    Ok((old_start, old_count, new_start, new_count))
}

fn parse_range(part: &str, prefix: char) -> Result<(usize, usize), DiffError> {
    let range = part
        .strip_prefix(prefix)
        .ok_or_else(|| DiffError::Malformed("invalid range prefix".to_string()))?;
    let (start_str, count_str) = match range.split_once(',') {
        Some((start, count)) => (start, count),
        None => (range, "1"),
    };
    let start = start_str
        .parse::<usize>()
        .map_err(|_| DiffError::Malformed(format!("invalid range start in {}", part)))?;
    let count = count_str
        .parse::<usize>()
        .map_err(|_| DiffError::Malformed(format!("invalid range count in {}", part)))?;
    Ok((start, count))
}
