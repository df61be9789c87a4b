//! Stand-alone content-definition locators.

use std::fmt;
use std::str::FromStr;

use serde::de::Error as _;
use serde::{Deserialize, Deserializer, Serialize, Serializer};

use crate::error::LocatorError;
use crate::grammar::{self, UrlFields};
use crate::locator::Locator;
use crate::version::VersionId;

/// Identifies a content definition independent of any course.
///
/// Single-field and single-path: there is nothing to reconcile, so none of
/// the multi-source fold machinery applies. Rendering and construction use
/// the same `definition_id` field.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DescriptionLocator {
    definition_id: VersionId,
}

impl DescriptionLocator {
    /// Wrap a definition's version id.
    #[must_use]
    pub const fn new(definition_id: VersionId) -> Self {
        Self { definition_id }
    }

    /// The identified definition's version id.
    #[must_use]
    pub const fn definition_id(&self) -> VersionId {
        self.definition_id
    }
}

impl fmt::Display for DescriptionLocator {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "@{}", self.definition_id)
    }
}

impl Locator for DescriptionLocator {
    fn url(&self) -> String {
        format!("{}{self}", grammar::URL_SCHEME)
    }

    fn version(&self) -> Result<VersionId, LocatorError> {
        Ok(self.definition_id)
    }
}

impl FromStr for DescriptionLocator {
    type Err = LocatorError;

    /// Parse the URL form, `edx://@` + the definition's version hex.
    ///
    /// # Errors
    ///
    /// Returns `UnparsableReference` for anything that is not a plain
    /// version-addressed URL, and `InvalidIdentifier` when the hex is the
    /// wrong width.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match grammar::parse_url(s) {
            Some(UrlFields::Version(fields)) if fields.block.is_none() => {
                fields.version_guid.parse().map(Self::new)
            },
            _ => Err(LocatorError::UnparsableReference {
                expected: "definition url",
                raw: s.to_string(),
            }),
        }
    }
}

impl Serialize for DescriptionLocator {
    /// Serializes as the canonical URL, the form other subsystems persist.
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(&self.url())
    }
}

impl<'de> Deserialize<'de> for DescriptionLocator {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let raw = String::deserialize(deserializer)?;
        raw.parse().map_err(D::Error::custom)
    }
}

#[cfg(test)]
#[allow(clippy::missing_panics_doc)]
mod tests {
    use super::DescriptionLocator;
    use crate::error::LocatorError;
    use crate::locator::Locator as _;
    use crate::version::VersionId;

    fn sample_id() -> VersionId {
        "519665f6223ebd6980884f2b".parse().unwrap()
    }

    #[test]
    fn renders_from_the_stored_field() {
        // Construction and rendering share one field; pinned because the
        // two are easy to drift apart.
        let locator = DescriptionLocator::new(sample_id());
        assert_eq!(locator.to_string(), "@519665f6223ebd6980884f2b");
        assert_eq!(locator.url(), "edx://@519665f6223ebd6980884f2b");
        assert_eq!(locator.definition_id(), sample_id());
    }

    #[test]
    fn version_is_always_available() {
        let locator = DescriptionLocator::new(sample_id());
        assert_eq!(locator.version().unwrap(), sample_id());
    }

    #[test]
    fn url_round_trips() {
        let locator = DescriptionLocator::new(sample_id());
        let reparsed: DescriptionLocator = locator.url().parse().unwrap();
        assert_eq!(reparsed, locator);
    }

    #[test]
    fn rejects_name_addressed_urls() {
        let result = "edx://edu.mit.eecs.6002x".parse::<DescriptionLocator>();
        assert!(matches!(
            result,
            Err(LocatorError::UnparsableReference { expected: "definition url", .. })
        ));
    }

    #[test]
    fn rejects_block_suffixes() {
        let result = "edx://@519665f6223ebd6980884f2b#HW3".parse::<DescriptionLocator>();
        assert!(matches!(result, Err(LocatorError::UnparsableReference { .. })));
    }
}
