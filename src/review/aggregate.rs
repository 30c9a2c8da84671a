use crate::diff::{FileChange, LineKind};

/// Destination path git writes for a file that no longer exists after the
/// change. Such files have nothing reviewable and are skipped.
pub const DELETED_FILE_SENTINEL: &str = "/dev/null";

/// Placeholder rendered into the synthetic header when a path is absent.
/// The header is a cosmetic separator for the model, never machine-parsed.
const ABSENT_PATH: &str = "null";

/// Flatten the added lines of every surviving file into one text artifact.
///
/// Files appear in input order, each preceded by a synthetic
/// `diff --git a/<source> b/<dest>` header; within a file only addition
/// lines are emitted, as `+ <content>` with one trailing line ending
/// stripped. If no file contributes a single addition the result is the
/// empty string, which tells the caller to skip the review entirely.
pub fn aggregate(files: &[FileChange]) -> String {
    let mut lines = Vec::new();
    let mut additions = 0usize;

    for file in files {
        if file.dest_path.as_deref() == Some(DELETED_FILE_SENTINEL) {
            continue;
        }

        lines.push(format!(
            "diff --git a/{} b/{}",
            file.source_path.as_deref().unwrap_or(ABSENT_PATH),
            file.dest_path.as_deref().unwrap_or(ABSENT_PATH),
        ));

        for hunk in &file.hunks {
            for change in &hunk.changes {
                if change.kind == LineKind::Addition {
                    lines.push(format!("+ {}", strip_line_ending(&change.content)));
                    additions += 1;
                }
            }
        }
    }

    if additions == 0 {
        return String::new();
    }
    lines.join("\n")
}

/// Strip one trailing `\n` (with optional preceding `\r`) and nothing else.
fn strip_line_ending(content: &str) -> &str {
    match content.strip_suffix('\n') {
        Some(rest) => rest.strip_suffix('\r').unwrap_or(rest),
        None => content,
    }
}
