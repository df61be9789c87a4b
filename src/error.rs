/// Crate-level error types for locator construction and use.
use crate::version::VersionId;

/// All errors carry enough context to produce a useful diagnostic without a
/// debugger: the offending input, the contested field, or the cyclic chain.
#[derive(Debug, thiserror::Error)]
pub enum LocatorError {
    /// Too little information was supplied for the requested operation.
    /// Always recoverable by the caller supplying more.
    #[error("insufficient specification: must provide {needed}")]
    InsufficientSpecification {
        /// What the caller must supply, e.g. `one of url, version_guid, course_id`.
        needed: &'static str,
    },

    /// A string that should encode a version id does not.
    #[error("`{raw}` is not a valid version id")]
    InvalidIdentifier {
        /// The rejected input.
        raw: String,
    },

    /// A version participates in its own ancestry in a version-history map.
    #[error("version graph cycle detected: {}", chain.iter().map(|v| return v.to_string()).collect::<Vec<_>>().join(" -> "))]
    MalformedVersionGraph {
        /// Versions on the ancestor path, root first, ending at the repeat.
        chain: Vec<VersionId>,
    },

    /// Two construction inputs disagree on a set-once field's value.
    /// Never auto-resolved; the caller's inputs are contradictory.
    #[error("{field} cannot be both `{current}` and `{proposed}`")]
    OverSpecification {
        /// The value the field already holds.
        current: String,
        /// The contested field name.
        field: &'static str,
        /// The conflicting second value.
        proposed: String,
    },

    /// A supplied string does not match the grammar shape the constructor
    /// required.
    #[error("cannot parse `{raw}` as a {expected}")]
    UnparsableReference {
        /// The grammar shape that was expected, e.g. `locator url`.
        expected: &'static str,
        /// The rejected input.
        raw: String,
    },
}
