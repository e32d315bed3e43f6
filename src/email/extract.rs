use crate::email::rules::{is_valid_email, rejection};
use once_cell::sync::Lazy;
use regex::Regex;
use std::collections::BTreeSet;

// A dot inside an obfuscated domain is either bare (`example.com`) or spaced on
// both sides (`example . com`); a sentence-ending `. ` never joins two labels.
// A label after a spaced dot must start in lowercase, so `example . com . Next`
// stops before `Next`.
const SPACED_DOMAIN: &str = concat!(
    r"[a-z0-9-]+",
    r"(?:\.[a-z0-9-]+|\s+\.\s+(?-i:[a-z0-9])[a-z0-9-]*)*",
    r"(?:\.[a-z]{2,}|\s+\.\s+(?-i:[a-z])[a-z]+)\b",
);

/// Extraction patterns, each applied independently to the raw page text
static EMAIL_PATTERNS: Lazy<Vec<Regex>> = Lazy::new(|| {
    vec![
        // Standard address
        Regex::new(r"(?i)\b[a-z0-9][a-z0-9._%+-]*@[a-z0-9.-]+\.[a-z]{2,}\b").unwrap(),
        // Bracketed: john [at] example.com, john (at) example . com
        Regex::new(&format!(
            r"(?i)\b[a-z0-9][a-z0-9._%+-]*\s*[\[(]\s*at\s*[\])]\s*{}",
            SPACED_DOMAIN
        ))
        .unwrap(),
        // Worded: john at example.com
        Regex::new(r"(?i)\b[a-z0-9][a-z0-9._%+-]*\s+at\s+[a-z0-9.-]+\.[a-z]{2,}\b").unwrap(),
        // Spaced: john @ example . com
        Regex::new(&format!(
            r"(?i)\b[a-z0-9][a-z0-9._%+-]*\s*@\s*{}",
            SPACED_DOMAIN
        ))
        .unwrap(),
    ]
});

static BRACKETED_AT: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"(?i)\s*[\[(]\s*at\s*[\])]\s*").unwrap());

static WORDED_AT: Lazy<Regex> = Lazy::new(|| Regex::new(r"(?i)\s+at\s+").unwrap());

static WHITESPACE: Lazy<Regex> = Lazy::new(|| Regex::new(r"\s+").unwrap());

/// Folds an obfuscated match into a plain lowercase `local@domain` string
///
/// `[at]` and `(at)` become `@`; a worded ` at ` becomes `@` when the match has
/// no `@` yet; all remaining whitespace is dropped.
///
/// # Examples
///
/// ```
/// use email_harvester::email::normalize_candidate;
///
/// assert_eq!(normalize_candidate("John [at] Example . com"), "john@example.com");
/// assert_eq!(normalize_candidate("sales at example.org"), "sales@example.org");
/// ```
pub fn normalize_candidate(raw: &str) -> String {
    let mut folded = BRACKETED_AT.replace_all(raw.trim(), "@").into_owned();
    if !folded.contains('@') {
        folded = WORDED_AT.replacen(&folded, 1, "@").into_owned();
    }

    WHITESPACE
        .replace_all(&folded, "")
        .trim()
        .to_lowercase()
}

/// Returns every normalized email-like string found in `text`, unvalidated
pub fn extract_candidates(text: &str) -> BTreeSet<String> {
    EMAIL_PATTERNS
        .iter()
        .flat_map(|pattern| pattern.find_iter(text))
        .map(|found| normalize_candidate(found.as_str()))
        .collect()
}

/// Extracts and validates email addresses from raw page text
///
/// # Examples
///
/// ```
/// use email_harvester::extract_emails;
///
/// let emails = extract_emails("reach john [at] example . com now");
/// assert!(emails.contains("john@example.com"));
/// ```
pub fn extract_emails(text: &str) -> BTreeSet<String> {
    extract_candidates(text)
        .into_iter()
        .filter(|candidate| {
            if is_valid_email(candidate) {
                return true;
            }
            if let Some(rule) = rejection(candidate) {
                tracing::trace!("Rejected {}: {}", candidate, rule.reason);
            }
            false
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_extract_standard_address() {
        let emails = extract_emails("Write to info@example.com for details.");
        assert_eq!(emails.len(), 1);
        assert!(emails.contains("info@example.com"));
    }

    #[test]
    fn test_extract_from_mailto_href() {
        let html = r#"<a href="mailto:Sales@Example.COM">Sales</a>"#;
        let emails = extract_emails(html);
        assert!(emails.contains("sales@example.com"));
    }

    #[test]
    fn test_extract_bracketed_spaced_dot() {
        let candidates = extract_candidates("reach john [at] example . com now");
        assert!(candidates.contains("john@example.com"));
        assert!(is_valid_email("john@example.com"));
    }

    #[test]
    fn test_extract_parenthesized() {
        let emails = extract_emails("press (at) example.org");
        assert!(emails.contains("press@example.org"));
    }

    #[test]
    fn test_extract_worded() {
        let emails = extract_emails("Contact jane at example.net today");
        assert!(emails.contains("jane@example.net"));
    }

    #[test]
    fn test_extract_spaced_at() {
        let emails = extract_emails("hr @ example . com");
        assert!(emails.contains("hr@example.com"));
    }

    #[test]
    fn test_sentence_period_not_joined() {
        let emails = extract_emails("Mail bob [at] example.com. Then wait.");
        assert!(emails.contains("bob@example.com"));
        assert!(!emails.iter().any(|e| e.contains("then")));
    }

    #[test]
    fn test_spaced_domain_stops_at_next_sentence() {
        let emails = extract_emails("john @ example . com . Next we meet");
        assert_eq!(
            emails.into_iter().collect::<Vec<_>>(),
            vec!["john@example.com".to_string()]
        );

        let emails = extract_emails("jo [at] mail . example . org . Thanks");
        assert!(emails.contains("jo@mail.example.org"));
        assert!(!emails.iter().any(|e| e.ends_with(".thanks")));
    }

    #[test]
    fn test_bare_subdomains_kept() {
        let emails = extract_emails("ops [at] mail.example.co.uk");
        assert!(emails.contains("ops@mail.example.co.uk"));
    }

    #[test]
    fn test_image_names_filtered() {
        let html = r#"<img src="/img/hero@2x.png"><img srcset="team-768x960@example.com">"#;
        let emails = extract_emails(html);
        assert!(emails.is_empty());
    }

    #[test]
    fn test_duplicates_collapse() {
        let text = "info@example.com, INFO@example.com, info [at] example.com";
        let emails = extract_emails(text);
        assert_eq!(emails.len(), 1);
    }

    #[test]
    fn test_no_emails() {
        assert!(extract_emails("<html><body>Nothing here</body></html>").is_empty());
    }

    #[test]
    fn test_normalize_trims_and_lowercases() {
        assert_eq!(normalize_candidate("  Team@Example.com "), "team@example.com");
        assert_eq!(normalize_candidate("a (AT) b.io"), "a@b.io");
    }
}
