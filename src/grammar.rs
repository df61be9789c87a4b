//! The locator string grammar: field extraction from raw reference strings.
//!
//! Each function takes a candidate string and returns its captured fields,
//! or `None` when the string does not match the shape. Callers decide how a
//! failed match is surfaced; nothing here constructs errors. The regexes are
//! hardcoded and compile once on first use (a compile-time invariant).

use std::sync::LazyLock;

use regex::Regex;

/// Scheme prefix of every canonical locator URL.
pub const URL_SCHEME: &str = "edx://";

/// Everything after the scheme. The scheme match is case-insensitive.
static URL_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?i)^edx://(.+)$").expect("valid regex"));

/// A hex guid with an optional trailing block coordinate.
static GUID_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^(?P<version_guid>[A-Fa-f0-9]+)(#(?P<block>\w+))?$").expect("valid regex")
});

/// A dotted course name with optional `;revision` and `#block` suffixes.
static COURSE_ID_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^(?P<id>\w+(\.\w+)*)(;(?P<revision>\w+))?(#(?P<block>\w+))?$")
        .expect("valid regex")
});

/// A bare block coordinate.
static BLOCK_RE: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"^\w+$").expect("valid regex"));

/// Fields captured from a course-id string (`name[;revision][#block]`).
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CourseFields {
    /// Trailing block coordinate, when the string embeds one.
    pub block: Option<String>,
    /// The course name.
    pub id: String,
    /// Embedded revision, when present.
    pub revision: Option<String>,
}

/// Fields captured from a version-addressed tail (`guid[#block]`).
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct VersionFields {
    /// Trailing block coordinate, when the string embeds one.
    pub block: Option<String>,
    /// Raw guid text. Validation into a `VersionId` is left to the caller so
    /// a malformed guid surfaces as an identifier error, not a silent
    /// mismatch.
    pub version_guid: String,
}

/// A URL tail addresses a course by name or by content version.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum UrlFields {
    /// Name-addressed: `edx://name[;revision][#block]`.
    Course(CourseFields),
    /// Version-addressed: `edx://@guid[#block]`.
    Version(VersionFields),
}

impl UrlFields {
    /// The block coordinate, whichever addressing axis carried it.
    #[must_use]
    pub fn block(&self) -> Option<&str> {
        match self {
            UrlFields::Course(fields) => fields.block.as_deref(),
            UrlFields::Version(fields) => fields.block.as_deref(),
        }
    }
}

/// Extract the fields of a canonical locator URL.
///
/// The string must begin with `edx://` (case-insensitive); the tail is
/// either `@` + guid or a course id, each with an optional block suffix.
#[must_use]
pub fn parse_url(string: &str) -> Option<UrlFields> {
    let captures = URL_RE.captures(string)?;
    let tail = captures.get(1)?.as_str();
    if let Some(guid_tail) = tail.strip_prefix('@') {
        parse_guid(guid_tail).map(UrlFields::Version)
    } else {
        parse_course_id(tail).map(UrlFields::Course)
    }
}

/// Extract the fields of a version-addressed tail (no leading `@`).
#[must_use]
pub fn parse_guid(string: &str) -> Option<VersionFields> {
    let captures = GUID_RE.captures(string)?;
    Some(VersionFields {
        block: captures.name("block").map(|m| m.as_str().to_string()),
        version_guid: captures.name("version_guid")?.as_str().to_string(),
    })
}

/// Extract the fields of a course-id string.
#[must_use]
pub fn parse_course_id(string: &str) -> Option<CourseFields> {
    let captures = COURSE_ID_RE.captures(string)?;
    Some(CourseFields {
        block: captures.name("block").map(|m| m.as_str().to_string()),
        id: captures.name("id")?.as_str().to_string(),
        revision: captures.name("revision").map(|m| m.as_str().to_string()),
    })
}

/// Validate a bare block coordinate.
#[must_use]
pub fn parse_block_ref(string: &str) -> Option<String> {
    BLOCK_RE.is_match(string).then(|| string.to_string())
}
