//! The shared locator capability and the construction-time fold discipline.

use std::fmt;

use percent_encoding::{utf8_percent_encode, AsciiSet, NON_ALPHANUMERIC};

use crate::error::LocatorError;
use crate::version::VersionId;

/// Characters left unescaped by `quoted_url`: the unreserved set plus the
/// structural delimiters of the locator grammar (`@`, `;`, `#`).
const QUOTED_URL_KEEP: &AsciiSet = &NON_ALPHANUMERIC
    .remove(b'_')
    .remove(b'.')
    .remove(b'-')
    .remove(b'~')
    .remove(b'@')
    .remove(b';')
    .remove(b'#');

/// A locator is like a URL: it refers to a resource in a versioned course
/// repository.
///
/// Every concrete identifier variant satisfies this contract. Equality is
/// per-type structural equality over the full field set; cross-variant
/// comparison is unrepresentable because each variant is its own type.
pub trait Locator: fmt::Display {
    /// The canonical URL for this location, the wire form other subsystems
    /// persist and exchange.
    fn url(&self) -> String;

    /// The content version this locator addresses.
    ///
    /// # Errors
    ///
    /// Returns `LocatorError::InsufficientSpecification` when the locator is
    /// only name-addressed.
    fn version(&self) -> Result<VersionId, LocatorError>;

    /// `url()` with a minimal percent-encoding pass. The grammar's
    /// structural delimiters stay unescaped so an encoded locator remains
    /// recognizable.
    fn quoted_url(&self) -> String {
        utf8_percent_encode(&self.url(), QUOTED_URL_KEEP).to_string()
    }
}

/// Fold a value into a set-once field.
///
/// An empty value is a no-op, as is re-writing the value already present.
/// Every construction path funnels through this single point, which is what
/// makes multi-source construction safe: sources that agree overlap
/// harmlessly, sources that disagree fail loudly.
///
/// # Errors
///
/// Returns `LocatorError::OverSpecification` naming the field and both
/// values when a different non-empty value is already present.
pub(crate) fn set_once(
    slot: &mut Option<String>,
    field: &'static str,
    proposed: &str,
) -> Result<(), LocatorError> {
    if proposed.is_empty() {
        return Ok(());
    }
    match slot {
        Some(current) if current != proposed => Err(LocatorError::OverSpecification {
            current: current.clone(),
            field,
            proposed: proposed.to_string(),
        }),
        Some(_) => Ok(()),
        None => {
            *slot = Some(proposed.to_string());
            Ok(())
        },
    }
}

/// `set_once` for the version axis.
///
/// # Errors
///
/// Returns `LocatorError::OverSpecification` when a different version is
/// already present.
pub(crate) fn set_once_version(
    slot: &mut Option<VersionId>,
    field: &'static str,
    proposed: VersionId,
) -> Result<(), LocatorError> {
    match slot {
        Some(current) if *current != proposed => Err(LocatorError::OverSpecification {
            current: current.to_string(),
            field,
            proposed: proposed.to_string(),
        }),
        Some(_) => Ok(()),
        None => {
            *slot = Some(proposed);
            Ok(())
        },
    }
}

#[cfg(test)]
#[allow(clippy::missing_panics_doc)]
mod tests {
    use super::{set_once, set_once_version};
    use crate::error::LocatorError;
    use crate::version::VersionId;

    #[test]
    fn first_write_sets() {
        let mut slot = None;
        set_once(&mut slot, "course_id", "a").unwrap();
        assert_eq!(slot.as_deref(), Some("a"));
    }

    #[test]
    fn equal_rewrite_is_a_noop() {
        let mut slot = Some("a".to_string());
        set_once(&mut slot, "course_id", "a").unwrap();
        assert_eq!(slot.as_deref(), Some("a"));
    }

    #[test]
    fn conflicting_rewrite_fails() {
        let mut slot = Some("a".to_string());
        let result = set_once(&mut slot, "course_id", "b");
        assert!(matches!(
            result,
            Err(LocatorError::OverSpecification { field: "course_id", .. })
        ));
        assert_eq!(slot.as_deref(), Some("a"));
    }

    #[test]
    fn empty_write_is_a_noop() {
        let mut slot = Some("a".to_string());
        set_once(&mut slot, "course_id", "").unwrap();
        assert_eq!(slot.as_deref(), Some("a"));

        let mut unset = None;
        set_once(&mut unset, "course_id", "").unwrap();
        assert_eq!(unset, None);
    }

    #[test]
    fn version_fold_detects_conflict() {
        let first: VersionId = "519665f6223ebd6980884f2b".parse().unwrap();
        let second: VersionId = "deadbeefdeadbeefdeadbeef".parse().unwrap();
        let mut slot = Some(first);
        let result = set_once_version(&mut slot, "version_guid", second);
        assert!(matches!(result, Err(LocatorError::OverSpecification { .. })));
        set_once_version(&mut slot, "version_guid", first).unwrap();
    }
}
