//! Version-history trees threading locators into parent/child graphs.

use std::collections::HashMap;

use crate::error::LocatorError;
use crate::locator::Locator;
use crate::version::VersionId;

/// A node in a version history: one version-addressed locator and the
/// ordered locators derived from it.
///
/// Built top-down from a caller-supplied adjacency map and never mutated
/// afterwards. The tree exclusively owns its children; no back-references.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct VersionTree<L> {
    children: Vec<VersionTree<L>>,
    locator: L,
}

impl<L: Locator + Clone> VersionTree<L> {
    /// Build the tree rooted at `locator` from a version-to-children map.
    ///
    /// Recursion stops at versions absent from the map. Every locator the
    /// build reaches must be version-addressed, root included; a
    /// name-addressed locator cannot anchor a node in a version history.
    ///
    /// # Errors
    ///
    /// Returns `InsufficientSpecification` when any reached locator cannot
    /// report a version, and `MalformedVersionGraph` when a version turns
    /// up in its own ancestry (the map encodes a cycle, which would
    /// otherwise recurse without bound).
    pub fn new(locator: L, history: &HashMap<VersionId, Vec<L>>) -> Result<Self, LocatorError> {
        let mut ancestry = Vec::new();
        Self::build(locator, history, &mut ancestry)
    }

    fn build(
        locator: L,
        history: &HashMap<VersionId, Vec<L>>,
        ancestry: &mut Vec<VersionId>,
    ) -> Result<Self, LocatorError> {
        let version = locator.version()?;
        if ancestry.contains(&version) {
            let mut chain = ancestry.clone();
            chain.push(version);
            return Err(LocatorError::MalformedVersionGraph { chain });
        }
        ancestry.push(version);
        let mut children = Vec::new();
        if let Some(child_locators) = history.get(&version) {
            for child in child_locators {
                children.push(Self::build(child.clone(), history, ancestry)?);
            }
        }
        ancestry.pop();
        Ok(Self { children, locator })
    }

    /// The locator at this node.
    pub fn locator(&self) -> &L {
        &self.locator
    }

    /// The ordered child subtrees.
    #[must_use]
    pub fn children(&self) -> &[VersionTree<L>] {
        &self.children
    }
}

#[cfg(test)]
#[allow(clippy::missing_panics_doc)]
mod tests {
    use std::collections::HashMap;

    use super::VersionTree;
    use crate::course::CourseLocator;
    use crate::error::LocatorError;
    use crate::version::VersionId;

    fn version(hex: &str) -> VersionId {
        hex.parse().unwrap()
    }

    fn versioned(hex: &str) -> CourseLocator {
        CourseLocator::from_version(version(hex))
    }

    #[test]
    fn absent_versions_are_leaves() {
        let root = versioned("aaaaaaaaaaaaaaaaaaaaaaaa");
        let history = HashMap::from([(
            version("aaaaaaaaaaaaaaaaaaaaaaaa"),
            vec![
                versioned("bbbbbbbbbbbbbbbbbbbbbbbb"),
                versioned("cccccccccccccccccccccccc"),
            ],
        )]);

        let tree = VersionTree::new(root, &history).unwrap();
        assert_eq!(tree.children().len(), 2);
        assert!(tree.children().iter().all(|child| child.children().is_empty()));
        assert_eq!(
            tree.children()[1].locator().version_guid(),
            Some(version("cccccccccccccccccccccccc"))
        );
    }

    #[test]
    fn empty_history_yields_a_lone_root() {
        let root = versioned("aaaaaaaaaaaaaaaaaaaaaaaa");
        let tree = VersionTree::new(root.clone(), &HashMap::new()).unwrap();
        assert_eq!(tree.locator(), &root);
        assert!(tree.children().is_empty());
    }

    #[test]
    fn name_addressed_root_violates_the_contract() {
        let root = CourseLocator::from_course_id("edu.mit.eecs.6002x").unwrap();
        let result = VersionTree::new(root, &HashMap::new());
        assert!(matches!(
            result,
            Err(LocatorError::InsufficientSpecification { .. })
        ));
    }

    #[test]
    fn cyclic_history_is_malformed() {
        let history = HashMap::from([
            (
                version("aaaaaaaaaaaaaaaaaaaaaaaa"),
                vec![versioned("bbbbbbbbbbbbbbbbbbbbbbbb")],
            ),
            (
                version("bbbbbbbbbbbbbbbbbbbbbbbb"),
                vec![versioned("aaaaaaaaaaaaaaaaaaaaaaaa")],
            ),
        ]);

        let result = VersionTree::new(versioned("aaaaaaaaaaaaaaaaaaaaaaaa"), &history);
        let Err(LocatorError::MalformedVersionGraph { chain }) = result else {
            panic!("expected a malformed-graph error");
        };
        assert_eq!(chain.first(), chain.last());
        assert_eq!(chain.len(), 3);
    }

    #[test]
    fn repeated_version_across_siblings_is_allowed() {
        // Only a version on its own ancestor path is a cycle; the same
        // child appearing under two branches is an ordinary merge shape.
        let history = HashMap::from([(
            version("aaaaaaaaaaaaaaaaaaaaaaaa"),
            vec![
                versioned("bbbbbbbbbbbbbbbbbbbbbbbb"),
                versioned("bbbbbbbbbbbbbbbbbbbbbbbb"),
            ],
        )]);

        let tree = VersionTree::new(versioned("aaaaaaaaaaaaaaaaaaaaaaaa"), &history).unwrap();
        assert_eq!(tree.children().len(), 2);
    }
}
