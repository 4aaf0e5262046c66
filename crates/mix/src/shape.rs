use std::sync::LazyLock;

use regex::Regex;

static RE_UUID: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(?i)^[0-9a-f]{8}-[0-9a-f]{4}-[0-9a-f]{4}-[0-9a-f]{4}-[0-9a-f]{12}$").unwrap()
});

/// Prefix carried by identifiers from the first catalog export.
pub const LEGACY_PREFIX: &str = "ingredient-";

/// The shape of a raw ingredient identifier, in resolution precedence order.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum IdentifierShape<'a> {
    /// Already canonical: 8-4-4-4-12 hex, any case.
    Uuid(&'a str),
    /// All digits, with the legacy prefix already stripped.
    Numeric(&'a str),
    /// Legacy-prefixed key whose remainder is not numeric.
    Legacy(&'a str),
    /// Free text, usually the ingredient name.
    Name(&'a str),
}

pub fn is_uuid_shaped(value: &str) -> bool {
    RE_UUID.is_match(value)
}

pub(crate) fn is_all_digits(value: &str) -> bool {
    !value.is_empty() && value.bytes().all(|b| b.is_ascii_digit())
}

/// Classifies a raw identifier. Precedence is UUID, then prefixed, then
/// numeric, then name.
pub fn parse_identifier_shape(raw: &str) -> IdentifierShape<'_> {
    if is_uuid_shaped(raw) {
        return IdentifierShape::Uuid(raw);
    }

    if let Some(rest) = raw.strip_prefix(LEGACY_PREFIX) {
        if is_all_digits(rest) {
            return IdentifierShape::Numeric(rest);
        }

        return IdentifierShape::Legacy(rest);
    }

    if is_all_digits(raw) {
        return IdentifierShape::Numeric(raw);
    }

    IdentifierShape::Name(raw)
}
