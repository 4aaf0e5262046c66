use std::sync::LazyLock;

use regex::Regex;

static RE_NOT_SLUG_CHAR: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"[^\w\s-]").unwrap());
static RE_SEPARATOR: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"[\s_]+").unwrap());
static RE_URL_SAFE: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"^[a-z0-9-]+$").unwrap());

/// Derives a URL slug from a display name: lowercase, punctuation dropped,
/// whitespace and underscores collapsed into single hyphens.
pub fn create_slug(name: &str) -> String {
    let lower = name.to_lowercase();
    let stripped = RE_NOT_SLUG_CHAR.replace_all(&lower, "");
    let hyphenated = RE_SEPARATOR.replace_all(&stripped, "-");

    hyphenated.trim_matches('-').to_owned()
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SlugIssue {
    Empty,
    Uppercase,
    NotUrlSafe,
    EdgeHyphen,
    ConsecutiveHyphens,
}

impl SlugIssue {
    /// Consecutive hyphens still route, everything else does not.
    pub fn is_error(&self) -> bool {
        !matches!(self, Self::ConsecutiveHyphens)
    }

    pub fn message(&self) -> &'static str {
        match self {
            Self::Empty => "slug is empty",
            Self::Uppercase => "slug contains uppercase characters",
            Self::NotUrlSafe => "slug contains characters other than a-z, 0-9 and '-'",
            Self::EdgeHyphen => "slug starts or ends with '-'",
            Self::ConsecutiveHyphens => "slug contains '--'",
        }
    }
}

pub fn validate_slug(slug: &str) -> Vec<SlugIssue> {
    if slug.is_empty() {
        return vec![SlugIssue::Empty];
    }

    let mut issues = Vec::new();

    if slug.chars().any(char::is_uppercase) {
        issues.push(SlugIssue::Uppercase);
    }

    if !RE_URL_SAFE.is_match(slug) {
        issues.push(SlugIssue::NotUrlSafe);
    }

    if slug.starts_with('-') || slug.ends_with('-') {
        issues.push(SlugIssue::EdgeHyphen);
    }

    if slug.contains("--") {
        issues.push(SlugIssue::ConsecutiveHyphens);
    }

    issues
}
