use regex::Regex;

/// Strip fenced code-block delimiters from the model output, then trim.
///
/// The prompt forbids wrapping the whole answer in a fence, but models still
/// do it; this removes every triple-backtick token (with or without a
/// language tag) as a best-effort cleanup. It is lossy for fences the
/// template legitimately asks for inside before/after examples — an accepted
/// tradeoff, kept from the original behavior.
pub fn sanitize(raw: &str) -> String {
    let fence = Regex::new(r"```\w*").unwrap();
    fence.replace_all(raw, "").trim().to_string()
}
