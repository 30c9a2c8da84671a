/// A single file within a unified diff.
///
/// Path convention, matching what git writes into the `---`/`+++` lines:
/// a `--- /dev/null` old side means the file is newly added and the source
/// path is absent (`None`); a `+++ /dev/null` new side is kept verbatim as
/// `Some("/dev/null")` so downstream consumers can recognize deletions by
/// comparing against the sentinel.
#[derive(Debug, Clone, Default)]
pub struct FileChange {
    /// Path on the old side of the diff, absent for newly added files
    pub source_path: Option<String>,
    /// Path on the new side of the diff; `"/dev/null"` for deleted files
    pub dest_path: Option<String>,
    /// Hunks (contiguous changed regions), in diff order
    pub hunks: Vec<Hunk>,
}

/// A contiguous region of changes within a file.
#[derive(Debug, Clone)]
#[allow(dead_code)] // Range fields populated by the parser, consumed as the API grows
pub struct Hunk {
    /// Starting line number in the old file
    pub old_start: usize,
    /// Number of lines in the old file
    pub old_count: usize,
    /// Starting line number in the new file
    pub new_start: usize,
    /// Number of lines in the new file
    pub new_count: usize,
    /// Line changes in diff order (not file line order)
    pub changes: Vec<LineChange>,
}

/// One changed or context line within a hunk. `content` excludes the
/// one-character diff marker.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LineChange {
    pub kind: LineKind,
    pub content: String,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LineKind {
    Addition,
    Deletion,
    Context,
}
