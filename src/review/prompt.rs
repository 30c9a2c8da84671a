use crate::github::PullRequestDetails;

/// Build the single instruction message sent to the completion model.
///
/// The template text is identical for every invocation; only the pull
/// request title, description, and aggregated diff vary, and they are
/// interpolated verbatim with no truncation, escaping, or size cap.
pub fn build(aggregated_diff: &str, pr: &PullRequestDetails) -> String {
    format!(
        "You are an automated code review assistant. Your review output **must** follow the structure below **exactly**:

[AI Review]

**1. Overview**
(Briefly summarize this pull request and its main changes)

**2. Analysis**

2.1 Runtime error check
(Potential runtime errors, null dereferences, index errors, and similar)

2.2 Performance
(Inefficient loops, redundant work, wasted resources, database call patterns)

2.3 Code style and readability
(Readability, naming, dead code, formatting, class/method decomposition)

2.4 Security vulnerabilities
- Broken access control
- Cryptographic failures
- Injection
- Insecure design
- Security misconfiguration
- Vulnerable and outdated components
- Identification and authentication failures
- Software and data integrity failures
- Security logging and monitoring failures
- Server-side request forgery (SSRF)
- Use of deprecated or unsafe modules
- Unvalidated input handling
- Improper handling of sensitive data
- Exposure of sensitive information (for example, hardcoded credentials)

(If any of the items above apply, describe the vulnerability or the improvement; otherwise write 'Result: no vulnerabilities found')

**3. Overall opinion**
(Final summary and verdict)

##Important##:
- Never output the answer as a code block (```) or as JSON; reproduce **the text structure above** exactly.
- **Do not write positive comments or praise**; comment only where there is something to improve.
- If there is nothing at all to improve, write \"Not found\" under each section of part 2 and close part 3 without further suggestions.
- **When commenting on a part 2 section, include code blocks in the following form** **(example):

Before:
```java
original java code block
```

After:
```java
improved java code block
```

Pull request title: {title}
Pull request description:
---
{description}
---

The full diff of the code changed in this pull request follows:
(diff start)
{diff}
(diff end)

Write your analysis following the structure above.",
        title = pr.title,
        description = pr.description,
        diff = aggregated_diff,
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    fn details() -> PullRequestDetails {
        PullRequestDetails {
            title: "Add OAuth2 login flow".to_string(),
            description: "Replaces the password check with hashed verification.".to_string(),
        }
    }

    #[test]
    fn test_interpolated_fields_appear_verbatim() {
        let diff = "diff --git a/x.rs b/x.rs\n+ let token = issue();";
        let prompt = build(diff, &details());
        assert!(prompt.contains("Pull request title: Add OAuth2 login flow"));
        assert!(prompt.contains("Replaces the password check with hashed verification."));
        assert!(prompt.contains("(diff start)\ndiff --git a/x.rs b/x.rs\n+ let token = issue();\n(diff end)"));
    }

    #[test]
    fn test_fixed_sections_present() {
        let prompt = build("", &details());
        assert!(prompt.starts_with("You are an automated code review assistant."));
        assert!(prompt.contains("[AI Review]"));
        assert!(prompt.contains("**1. Overview**"));
        assert!(prompt.contains("2.1 Runtime error check"));
        assert!(prompt.contains("2.2 Performance"));
        assert!(prompt.contains("2.3 Code style and readability"));
        assert!(prompt.contains("2.4 Security vulnerabilities"));
        assert!(prompt.contains("**3. Overall opinion**"));
        assert!(prompt.contains("##Important##"));
    }

    #[test]
    fn test_security_checklist_has_fourteen_items() {
        let prompt = build("", &details());
        let section = prompt
            .split("2.4 Security vulnerabilities")
            .nth(1)
            .unwrap()
            .split("(If any of the items above apply")
            .next()
            .unwrap();
        assert_eq!(section.lines().filter(|l| l.starts_with("- ")).count(), 14);
    }

    #[test]
    fn test_deterministic() {
        let a = build("+ x", &details());
        let b = build("+ x", &details());
        assert_eq!(a, b);
    }

    #[test]
    fn test_large_diff_not_truncated() {
        let big = "+ line\n".repeat(50_000);
        let prompt = build(&big, &details());
        assert!(prompt.contains(&big));
    }
}
