//! Course-level locators: a named course, a fixed content version, or both.

use std::fmt;
use std::str::FromStr;

use serde::de::Error as _;
use serde::{Deserialize, Deserializer, Serialize, Serializer};

use crate::error::LocatorError;
use crate::grammar::{self, UrlFields};
use crate::locator::{set_once, set_once_version, Locator};
use crate::version::VersionId;

/// What the caller must supply for a course-level locator to be
/// constructible.
pub(crate) const NEED_ONE_OF: &str = "one of url, version_guid, course_id";

/// Rendered when a locator somehow carries neither addressing axis.
/// Construction always leaves at least one axis set, but `Display` must not
/// fail, so the impossible state renders as a diagnostic instead.
const UNSPECIFIED_PLACEHOLDER: &str = "<missing course_id or version_guid>";

/// The raw inputs a course locator can be folded from. All optional, but
/// validation requires at least one of `url`, `version_guid`, `course_id`.
#[derive(Debug, Clone, Copy, Default)]
pub struct CourseSources<'a> {
    /// Course name, optionally carrying `;revision` and `#block` suffixes.
    /// Another locator's `course_id()` accessor also fits here.
    pub course_id: Option<&'a str>,
    /// Named revision pointer, e.g. `draft` or `published`.
    pub revision: Option<&'a str>,
    /// Canonical locator URL (`edx://...`).
    pub url: Option<&'a str>,
    /// An already-validated content version.
    pub version_guid: Option<VersionId>,
}

impl CourseSources<'_> {
    /// Whether any argument that can specify a course was supplied.
    pub(crate) fn has_specifier(&self) -> bool {
        self.url.is_some() || self.version_guid.is_some() || self.course_id.is_some()
    }
}

/// Identifies a course by name (with optional revision pointer), by content
/// version, or both. When both axes are present the persistence layer may
/// reject the pair if the named revision no longer points at that version.
///
/// ```
/// use courseloc::{CourseLocator, CourseSources};
///
/// # fn main() -> Result<(), courseloc::LocatorError> {
/// CourseLocator::from_course_id("edu.mit.eecs.6002x;published")?;
/// CourseLocator::from_url("edx://@519665f6223ebd6980884f2b")?;
/// CourseLocator::new(&CourseSources {
///     course_id: Some("edu.mit.eecs.6002x"),
///     revision: Some("published"),
///     ..CourseSources::default()
/// })?;
/// # Ok(())
/// # }
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CourseLocator {
    course_id: Option<String>,
    revision: Option<String>,
    version_guid: Option<VersionId>,
}

impl CourseLocator {
    /// Fold a locator together from whichever sources were supplied.
    ///
    /// Each supplied source is parsed and folded field-by-field in a fixed
    /// order: url, then version guid, then course id and explicit revision.
    ///
    /// # Errors
    ///
    /// Returns `InsufficientSpecification` when no specifying source was
    /// given, `UnparsableReference` when a string input does not match the
    /// grammar, `InvalidIdentifier` for a malformed version guid inside a
    /// url, and `OverSpecification` when two sources disagree on a field.
    pub fn new(sources: &CourseSources<'_>) -> Result<Self, LocatorError> {
        if !sources.has_specifier() {
            return Err(LocatorError::InsufficientSpecification { needed: NEED_ONE_OF });
        }
        let mut locator = Self {
            course_id: None,
            revision: None,
            version_guid: None,
        };
        if let Some(url) = sources.url {
            locator.fold_url(url)?;
        }
        if let Some(version_guid) = sources.version_guid {
            set_once_version(&mut locator.version_guid, "version_guid", version_guid)?;
        }
        if sources.course_id.is_some() || sources.revision.is_some() {
            locator.fold_course_id(sources.course_id, sources.revision)?;
        }
        debug_assert!(
            locator.version_guid.is_some() || locator.course_id.is_some(),
            "either version_guid or course_id should be set"
        );
        Ok(locator)
    }

    /// Construct from a canonical URL alone.
    ///
    /// # Errors
    ///
    /// Returns `UnparsableReference` when the string is not a locator URL,
    /// or `InvalidIdentifier` when its version guid is malformed.
    pub fn from_url(url: &str) -> Result<Self, LocatorError> {
        Self::new(&CourseSources {
            url: Some(url),
            ..CourseSources::default()
        })
    }

    /// Construct from a course-id string alone (`name` or `name;revision`).
    ///
    /// # Errors
    ///
    /// Returns `UnparsableReference` when the string is not a course id.
    pub fn from_course_id(course_id: &str) -> Result<Self, LocatorError> {
        Self::new(&CourseSources {
            course_id: Some(course_id),
            ..CourseSources::default()
        })
    }

    /// Construct from a content version alone.
    #[must_use]
    pub const fn from_version(version_guid: VersionId) -> Self {
        Self {
            course_id: None,
            revision: None,
            version_guid: Some(version_guid),
        }
    }

    /// The human-meaningful course name, when set.
    #[must_use]
    pub fn course_id(&self) -> Option<&str> {
        self.course_id.as_deref()
    }

    /// The named revision pointer, when set.
    #[must_use]
    pub fn revision(&self) -> Option<&str> {
        self.revision.as_deref()
    }

    /// The content version, when set.
    #[must_use]
    pub const fn version_guid(&self) -> Option<VersionId> {
        self.version_guid
    }

    /// Copy that keeps only the version axis when both axes are set.
    /// A known version makes the mutable course coordinate redundant.
    pub(crate) fn version_agnostic(&self) -> Self {
        if self.course_id.is_some() && self.version_guid.is_some() {
            Self {
                course_id: None,
                revision: self.revision.clone(),
                version_guid: self.version_guid,
            }
        } else {
            self.clone()
        }
    }

    /// Fold the fields of a canonical URL into this locator.
    /// A `#block` coordinate in the URL is ignored at course level.
    fn fold_url(&mut self, url: &str) -> Result<(), LocatorError> {
        let fields = grammar::parse_url(url).ok_or_else(|| LocatorError::UnparsableReference {
            expected: "locator url",
            raw: url.to_string(),
        })?;
        match fields {
            UrlFields::Version(version) => {
                let guid: VersionId = version.version_guid.parse()?;
                set_once_version(&mut self.version_guid, "version_guid", guid)
            },
            UrlFields::Course(course) => {
                set_once(&mut self.course_id, "course_id", &course.id)?;
                if let Some(revision) = &course.revision {
                    set_once(&mut self.revision, "revision", revision)?;
                }
                Ok(())
            },
        }
    }

    /// Fold a course-id string and/or an explicit revision into this
    /// locator. A revision may arrive embedded (`name;published`),
    /// explicitly, or both; both is fine as long as they agree. A trailing
    /// `#block` is ignored at course level.
    fn fold_course_id(
        &mut self,
        course_id: Option<&str>,
        explicit_revision: Option<&str>,
    ) -> Result<(), LocatorError> {
        if let Some(course_id) = course_id {
            let fields = grammar::parse_course_id(course_id).ok_or_else(|| {
                LocatorError::UnparsableReference {
                    expected: "course id",
                    raw: course_id.to_string(),
                }
            })?;
            set_once(&mut self.course_id, "course_id", &fields.id)?;
            if let Some(revision) = &fields.revision {
                set_once(&mut self.revision, "revision", revision)?;
            }
        }
        if let Some(revision) = explicit_revision {
            set_once(&mut self.revision, "revision", revision)?;
        }
        Ok(())
    }
}

impl fmt::Display for CourseLocator {
    /// `course_id[;revision]`, or `@` + the version hex.
    ///
    /// Never fails: a locator carrying neither axis (unreachable through the
    /// public constructors) renders a diagnostic placeholder instead.
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if let Some(course_id) = &self.course_id {
            f.write_str(course_id)?;
            if let Some(revision) = &self.revision {
                write!(f, ";{revision}")?;
            }
            Ok(())
        } else if let Some(version_guid) = &self.version_guid {
            write!(f, "@{version_guid}")
        } else {
            f.write_str(UNSPECIFIED_PLACEHOLDER)
        }
    }
}

impl Locator for CourseLocator {
    fn url(&self) -> String {
        format!("{}{self}", grammar::URL_SCHEME)
    }

    fn version(&self) -> Result<VersionId, LocatorError> {
        self.version_guid
            .ok_or(LocatorError::InsufficientSpecification { needed: "a version_guid" })
    }
}

impl FromStr for CourseLocator {
    type Err = LocatorError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::from_url(s)
    }
}

impl Serialize for CourseLocator {
    /// Serializes as the canonical URL, the form other subsystems persist.
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(&self.url())
    }
}

impl<'de> Deserialize<'de> for CourseLocator {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let raw = String::deserialize(deserializer)?;
        raw.parse().map_err(D::Error::custom)
    }
}

// ── Tests ─────────────────────────────────────────────────────────────
