//! Ordered rejection rules for email candidates
//!
//! Each rule is an independent predicate that returns true when a candidate
//! must be rejected. Rules are evaluated in table order and the first match
//! wins, so [`rejection`] can tell exactly why a string was dropped.

use once_cell::sync::Lazy;
use regex::Regex;

const MIN_LENGTH: usize = 5;
const MAX_LENGTH: usize = 254;

/// Domains with an uncommon TLD longer than this are rejected
const MAX_UNCOMMON_DOMAIN_LENGTH: usize = 50;

const IMAGE_EXTENSIONS: &[&str] = &[".jpg", ".jpeg", ".png", ".gif", ".bmp", ".webp"];

const COMMON_TLDS: &[&str] = &[
    ".com", ".org", ".net", ".edu", ".gov", ".mil", ".biz", ".info",
];

static DIMENSION: Lazy<Regex> = Lazy::new(|| Regex::new(r"\d+x\d+").unwrap());

static SCALE_SUFFIX: Lazy<Regex> = Lazy::new(|| Regex::new(r"@\d+x").unwrap());

static FILE_NAMING: Lazy<Vec<Regex>> = Lazy::new(|| {
    [
        r"-\d+x\d+",
        r"_\d+x\d+",
        r"[\w-]+shot",
        r"head-shot",
        r"thumbnail",
        r"avatar",
        r"profile-pic",
    ]
    .iter()
    .map(|pattern| Regex::new(pattern).unwrap())
    .collect()
});

static STRUCTURE: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"^[a-zA-Z0-9][a-zA-Z0-9._%+-]*@[a-zA-Z0-9.-]+\.[a-zA-Z]{2,}$").unwrap()
});

static CONSECUTIVE_SPECIALS: Lazy<Regex> = Lazy::new(|| Regex::new(r"[._%+-]{2,}").unwrap());

/// A single validation rule
pub struct ValidationRule {
    /// Short identifier used in logs
    pub name: &'static str,

    /// Human readable rejection reason
    pub reason: &'static str,

    /// Returns true if the candidate must be rejected
    pub rejects: fn(&str) -> bool,
}

impl std::fmt::Debug for ValidationRule {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ValidationRule")
            .field("name", &self.name)
            .field("reason", &self.reason)
            .finish()
    }
}

/// All rules, in evaluation order
pub static RULES: &[ValidationRule] = &[
    ValidationRule {
        name: "length",
        reason: "length outside 5..=254 characters",
        rejects: bad_length,
    },
    ValidationRule {
        name: "image-extension",
        reason: "contains an image file extension",
        rejects: has_image_extension,
    },
    ValidationRule {
        name: "dimension",
        reason: "contains a dimension marker such as 768x960",
        rejects: has_dimension,
    },
    ValidationRule {
        name: "scale-suffix",
        reason: "contains a density marker such as @2x",
        rejects: has_scale_suffix,
    },
    ValidationRule {
        name: "file-naming",
        reason: "looks like an image file name (screenshot, avatar, thumbnail...)",
        rejects: has_file_naming,
    },
    ValidationRule {
        name: "structure",
        reason: "does not look like local@domain.tld",
        rejects: bad_structure,
    },
    ValidationRule {
        name: "single-at",
        reason: "does not contain exactly one @",
        rejects: not_single_at,
    },
    ValidationRule {
        name: "domain-labels",
        reason: "domain has a label that is neither alphanumeric nor a lone hyphen",
        rejects: bad_domain_labels,
    },
    ValidationRule {
        name: "consecutive-specials",
        reason: "local part has consecutive special characters",
        rejects: has_consecutive_specials,
    },
    ValidationRule {
        name: "uncommon-long-domain",
        reason: "domain with an uncommon TLD is unusually long",
        rejects: uncommon_long_domain,
    },
];

/// Returns the first rule that rejects `email`, or None if it is valid
pub fn rejection(email: &str) -> Option<&'static ValidationRule> {
    RULES.iter().find(|rule| (rule.rejects)(email))
}

/// Returns true if `email` passes every validation rule
///
/// # Examples
///
/// ```
/// use email_harvester::is_valid_email;
///
/// assert!(is_valid_email("contact@example.org"));
/// assert!(!is_valid_email("photo768x960@example.com"));
/// assert!(!is_valid_email("logo@2x.png"));
/// ```
pub fn is_valid_email(email: &str) -> bool {
    rejection(email).is_none()
}

fn bad_length(email: &str) -> bool {
    !(MIN_LENGTH..=MAX_LENGTH).contains(&email.len())
}

fn has_image_extension(email: &str) -> bool {
    let lower = email.to_lowercase();
    IMAGE_EXTENSIONS.iter().any(|ext| lower.contains(ext))
}

fn has_dimension(email: &str) -> bool {
    DIMENSION.is_match(email)
}

fn has_scale_suffix(email: &str) -> bool {
    SCALE_SUFFIX.is_match(email)
}

fn has_file_naming(email: &str) -> bool {
    let lower = email.to_lowercase();
    FILE_NAMING.iter().any(|pattern| pattern.is_match(&lower))
}

fn bad_structure(email: &str) -> bool {
    !STRUCTURE.is_match(email)
}

fn not_single_at(email: &str) -> bool {
    email.split('@').count() != 2
}

fn split_parts(email: &str) -> Option<(&str, &str)> {
    let (local, domain) = email.split_once('@')?;
    if domain.contains('@') {
        return None;
    }
    Some((local, domain))
}

/// Every label must be plain alphanumeric, or a lone `-`
fn bad_domain_labels(email: &str) -> bool {
    match split_parts(email) {
        Some((_, domain)) => domain.split('.').any(|label| {
            let alphanumeric =
                !label.is_empty() && label.chars().all(|c| c.is_ascii_alphanumeric());
            !alphanumeric && label != "-"
        }),
        None => true,
    }
}

fn has_consecutive_specials(email: &str) -> bool {
    match split_parts(email) {
        Some((local, _)) => CONSECUTIVE_SPECIALS.is_match(local),
        None => true,
    }
}

fn uncommon_long_domain(email: &str) -> bool {
    match split_parts(email) {
        Some((_, domain)) => {
            let lower = domain.to_lowercase();
            !COMMON_TLDS.iter().any(|tld| lower.ends_with(tld))
                && domain.len() > MAX_UNCOMMON_DOMAIN_LENGTH
        }
        None => true,
    }
}
