use glob::Pattern;
use tracing::warn;

use crate::diff::FileChange;

/// Split a comma-separated exclusion string into compiled glob patterns.
/// Entries are trimmed and empty entries dropped; a pattern that fails to
/// compile is skipped with a warning rather than failing the run.
pub fn parse_patterns(raw: &str) -> Vec<Pattern> {
    raw.split(',')
        .map(str::trim)
        .filter(|entry| !entry.is_empty())
        .filter_map(|entry| match Pattern::new(entry) {
            Ok(pattern) => Some(pattern),
            Err(err) => {
                warn!(pattern = %entry, error = %err, "skipping invalid exclude pattern");
                None
            }
        })
        .collect()
}

/// Drop every file whose destination path matches any exclusion pattern.
/// Pure; preserves the relative order of surviving files. An empty pattern
/// list passes everything through unchanged.
pub fn apply(files: Vec<FileChange>, patterns: &[Pattern]) -> Vec<FileChange> {
    if patterns.is_empty() {
        return files;
    }
    files
        .into_iter()
        .filter(|file| {
            let dest = file.dest_path.as_deref().unwrap_or("");
            !patterns.iter().any(|pattern| pattern.matches(dest))
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn file(dest: &str) -> FileChange {
        FileChange {
            source_path: Some(dest.to_string()),
            dest_path: Some(dest.to_string()),
            hunks: vec![],
        }
    }

    #[test]
    fn test_parse_patterns_trims_and_drops_empties() {
        let patterns = parse_patterns(" secrets/** , , *.lock ,");
        let rendered: Vec<&str> = patterns.iter().map(|p| p.as_str()).collect();
        assert_eq!(rendered, vec!["secrets/**", "*.lock"]);
    }

    #[test]
    fn test_parse_patterns_empty_input() {
        assert!(parse_patterns("").is_empty());
        assert!(parse_patterns("  ,  ,").is_empty());
    }

    #[test]
    fn test_parse_patterns_skips_invalid() {
        let patterns = parse_patterns("a[,src/**");
        assert_eq!(patterns.len(), 1);
        assert_eq!(patterns[0].as_str(), "src/**");
    }

    #[test]
    fn test_empty_pattern_list_passes_everything() {
        let files = vec![file("src/a.ts"), file("secrets/b.env")];
        let kept = apply(files, &[]);
        assert_eq!(kept.len(), 2);
    }

    #[test]
    fn test_exact_literal_pattern_always_drops() {
        let patterns = parse_patterns("src/a.ts");
        let kept = apply(vec![file("src/a.ts"), file("src/b.ts")], &patterns);
        assert_eq!(kept.len(), 1);
        assert_eq!(kept[0].dest_path.as_deref(), Some("src/b.ts"));
    }

    #[test]
    fn test_glob_pattern_drops_whole_directory() {
        let patterns = parse_patterns("secrets/**");
        let kept = apply(
            vec![file("src/a.ts"), file("secrets/b.env"), file("secrets/deep/c.pem")],
            &patterns,
        );
        let paths: Vec<&str> = kept.iter().filter_map(|f| f.dest_path.as_deref()).collect();
        assert_eq!(paths, vec!["src/a.ts"]);
    }

    #[test]
    fn test_disjoint_paths_survive() {
        let patterns = parse_patterns("secrets/**,*.lock");
        let kept = apply(vec![file("src/main.rs"), file("docs/readme.md")], &patterns);
        assert_eq!(kept.len(), 2);
    }

    #[test]
    fn test_order_preserved() {
        let patterns = parse_patterns("b.txt");
        let kept = apply(
            vec![file("a.txt"), file("b.txt"), file("c.txt"), file("d.txt")],
            &patterns,
        );
        let paths: Vec<&str> = kept.iter().filter_map(|f| f.dest_path.as_deref()).collect();
        assert_eq!(paths, vec!["a.txt", "c.txt", "d.txt"]);
    }

    #[test]
    fn test_absent_destination_matches_as_empty_string() {
        let mut no_dest = file("x");
        no_dest.dest_path = None;
        let patterns = parse_patterns("secrets/**");
        let kept = apply(vec![no_dest], &patterns);
        assert_eq!(kept.len(), 1);
    }
}
