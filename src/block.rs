//! Block-usage locators: a course coordinate plus the occurrence of one
//! defined element within the course.

use std::fmt;
use std::str::FromStr;

use serde::de::Error as _;
use serde::{Deserialize, Deserializer, Serialize, Serializer};

use crate::course::{CourseLocator, CourseSources, NEED_ONE_OF};
use crate::error::LocatorError;
use crate::grammar;
use crate::locator::{set_once, Locator};
use crate::version::VersionId;

/// Sentinel rendered for a block locator whose usage id is not yet set.
const UNINITIALIZED_BLOCK: &str = "NONE";

/// The raw inputs a block locator can be folded from: the course-level
/// sources plus an explicit block reference.
#[derive(Debug, Clone, Copy, Default)]
pub struct BlockSources<'a> {
    /// Course name, optionally carrying `;revision` and `#block` suffixes.
    pub course_id: Option<&'a str>,
    /// Named revision pointer, e.g. `draft` or `published`.
    pub revision: Option<&'a str>,
    /// Canonical locator URL (`edx://...`).
    pub url: Option<&'a str>,
    /// Bare block coordinate, e.g. `HW3`.
    pub usage_id: Option<&'a str>,
    /// An already-validated content version.
    pub version_guid: Option<VersionId>,
}

impl<'a> BlockSources<'a> {
    /// The course-level slice of these sources.
    fn as_course_sources(&self) -> CourseSources<'a> {
        CourseSources {
            course_id: self.course_id,
            revision: self.revision,
            url: self.url,
            version_guid: self.version_guid,
        }
    }
}

/// Addresses one block (module) situated in a course: the course coordinate
/// plus the occurrence of the defined element within it.
///
/// The usage id may be supplied explicitly or embedded in the url or
/// course-id string. When omitted the locator is valid but uninitialized:
/// it addresses the course and renders with a `#NONE` sentinel until a
/// block is chosen.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BlockUsageLocator {
    course: CourseLocator,
    usage_id: Option<String>,
}

impl BlockUsageLocator {
    /// Fold a block locator together from whichever sources were supplied.
    ///
    /// The block coordinate is extracted from each source first; the
    /// embedded course locator is then constructed from the same sources.
    /// The course-level fields re-derive inside that delegation, which is a
    /// safe no-op under the set-once fold.
    ///
    /// # Errors
    ///
    /// Returns the same errors as [`CourseLocator::new`], plus
    /// `OverSpecification` on `usage_id` when two sources carry different
    /// block coordinates and `UnparsableReference` when the explicit
    /// `usage_id` is not a bare block reference.
    pub fn new(sources: &BlockSources<'_>) -> Result<Self, LocatorError> {
        if !sources.as_course_sources().has_specifier() {
            return Err(LocatorError::InsufficientSpecification { needed: NEED_ONE_OF });
        }
        let mut usage_id = None;
        if let Some(url) = sources.url {
            let fields =
                grammar::parse_url(url).ok_or_else(|| LocatorError::UnparsableReference {
                    expected: "locator url",
                    raw: url.to_string(),
                })?;
            if let Some(block) = fields.block() {
                set_once(&mut usage_id, "usage_id", block)?;
            }
        }
        if let Some(course_id) = sources.course_id {
            let fields = grammar::parse_course_id(course_id).ok_or_else(|| {
                LocatorError::UnparsableReference {
                    expected: "course id",
                    raw: course_id.to_string(),
                }
            })?;
            if let Some(block) = &fields.block {
                set_once(&mut usage_id, "usage_id", block)?;
            }
        }
        if let Some(block_ref) = sources.usage_id {
            let block = grammar::parse_block_ref(block_ref).ok_or_else(|| {
                LocatorError::UnparsableReference {
                    expected: "block reference",
                    raw: block_ref.to_string(),
                }
            })?;
            set_once(&mut usage_id, "usage_id", &block)?;
        }
        let course = CourseLocator::new(&sources.as_course_sources())?;
        Ok(Self { course, usage_id })
    }

    /// Construct from a canonical URL alone.
    ///
    /// # Errors
    ///
    /// Returns `UnparsableReference` when the string is not a locator URL,
    /// or `InvalidIdentifier` when its version guid is malformed.
    pub fn from_url(url: &str) -> Result<Self, LocatorError> {
        Self::new(&BlockSources {
            url: Some(url),
            ..BlockSources::default()
        })
    }

    /// Whether a block coordinate has been set. An uninitialized locator
    /// addresses the course but not yet a specific block.
    #[must_use]
    pub const fn is_initialized(&self) -> bool {
        self.usage_id.is_some()
    }

    /// The block coordinate, when set.
    #[must_use]
    pub fn usage_id(&self) -> Option<&str> {
        self.usage_id.as_deref()
    }

    /// The human-meaningful course name, when set.
    #[must_use]
    pub fn course_id(&self) -> Option<&str> {
        self.course.course_id()
    }

    /// The named revision pointer, when set.
    #[must_use]
    pub fn revision(&self) -> Option<&str> {
        self.course.revision()
    }

    /// The content version, when set.
    #[must_use]
    pub const fn version_guid(&self) -> Option<VersionId> {
        self.course.version_guid()
    }

    /// A copy with the same course information and no usage id.
    #[must_use]
    pub fn as_course_locator(&self) -> CourseLocator {
        self.course.clone()
    }

    /// A copy that cannot conflict with the course's current head.
    ///
    /// Preserves the usage id and revision. When both the named course and
    /// a fixed version are known, the copy keeps only the version: a pinned
    /// snapshot makes the mutable coordinate redundant, and carrying both
    /// risks a consistency conflict at the storage layer.
    #[must_use]
    pub fn version_agnostic(&self) -> Self {
        Self {
            course: self.course.version_agnostic(),
            usage_id: self.usage_id.clone(),
        }
    }
}

impl fmt::Display for BlockUsageLocator {
    /// The course rendering plus `#usage_id`, or `#NONE` before
    /// initialization.
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{}#{}",
            self.course,
            self.usage_id.as_deref().unwrap_or(UNINITIALIZED_BLOCK)
        )
    }
}

impl Locator for BlockUsageLocator {
    fn url(&self) -> String {
        format!("{}{self}", grammar::URL_SCHEME)
    }

    fn version(&self) -> Result<VersionId, LocatorError> {
        self.course.version()
    }
}

impl FromStr for BlockUsageLocator {
    type Err = LocatorError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::from_url(s)
    }
}

impl Serialize for BlockUsageLocator {
    /// Serializes as the canonical URL, the form other subsystems persist.
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(&self.url())
    }
}

impl<'de> Deserialize<'de> for BlockUsageLocator {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let raw = String::deserialize(deserializer)?;
        raw.parse().map_err(D::Error::custom)
    }
}

// ── Tests ─────────────────────────────────────────────────────────────
