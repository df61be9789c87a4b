//! Structured locators for versioned course content.
//!
//! A locator is like a URL: it addresses a resource in a versioned course
//! repository. Three concrete forms share the [`Locator`] capability:
//!
//! - [`CourseLocator`]: a whole course, by name (with an optional revision
//!   pointer such as `draft` or `published`), by content version, or both.
//! - [`BlockUsageLocator`]: one content block situated in a course.
//! - [`DescriptionLocator`]: a stand-alone content definition.
//!
//! The canonical URL grammar, byte-for-byte stable across round trips:
//!
//! ```text
//! edx://course_id[;revision][#usage_id]
//! edx://@version_guid[#usage_id]
//! ```
//!
//! Locators are constructible from several partial representations at once
//! (a URL, a raw version id, a course-name string, an explicit block
//! reference). Construction reconciles the sources field-by-field under a
//! set-once rule: sources that agree overlap harmlessly, sources that
//! disagree fail with an over-specification error, and nothing is ever
//! silently dropped. A constructed locator is an immutable value.
//!
//! [`VersionTree`] threads version-addressed locators into parent/child
//! version histories built from an adjacency map.

pub mod block;
pub mod course;
pub mod definition;
pub mod error;
pub mod grammar;
pub mod history;
pub mod locator;
pub mod version;

pub use block::{BlockSources, BlockUsageLocator};
pub use course::{CourseLocator, CourseSources};
pub use definition::DescriptionLocator;
pub use error::LocatorError;
pub use history::VersionTree;
pub use locator::Locator;
pub use version::VersionId;
