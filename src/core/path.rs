//! Component paths.
//!
//! A `ComponentPath` addresses a component by the sequence of child indices
//! leading to it from the table. The tabletop itself is the root path
//! `ComponentPath(None, 0)`; its children are `ComponentPath(root, i)`, and
//! so on.
//!
//! Paths are snapshots: any later change to the tree may invalidate them.
//! Resolve them immediately (under the environment lock if the tree may be
//! changing concurrently) and do not keep them across mutations.
//!
//! ```
//! use rust_tabletop::core::ComponentPath;
//!
//! let path = ComponentPath::root().child(0).child(1);
//! assert_eq!(path.indices().as_slice(), &[0, 0, 1]);
//! assert_eq!(path.to_string(), "0/0/1");
//! assert_eq!(path.parent(), Some(&ComponentPath::root().child(0)));
//! ```

use std::sync::Arc;

use smallvec::SmallVec;

/// Immutable address of a component relative to its table.
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub struct ComponentPath {
    parent: Option<Arc<ComponentPath>>,
    index: usize,
}

impl ComponentPath {
    /// Create a path from a parent path and a child index.
    #[must_use]
    pub fn new(parent: Option<ComponentPath>, index: usize) -> Self {
        Self {
            parent: parent.map(Arc::new),
            index,
        }
    }

    /// The path of a table's tabletop.
    #[must_use]
    pub fn root() -> Self {
        Self::new(None, 0)
    }

    /// Extend this path by one child index.
    #[must_use]
    pub fn child(&self, index: usize) -> Self {
        Self {
            parent: Some(Arc::new(self.clone())),
            index,
        }
    }

    /// Build a path from root-first indices. Returns `None` for an empty slice.
    #[must_use]
    pub fn from_indices(indices: &[usize]) -> Option<Self> {
        let (&first, rest) = indices.split_first()?;
        let mut path = Self::new(None, first);
        for &index in rest {
            path = path.child(index);
        }
        Some(path)
    }

    /// The enclosing path, or `None` for a root path.
    #[must_use]
    pub fn parent(&self) -> Option<&ComponentPath> {
        self.parent.as_deref()
    }

    /// Index of the addressed component within its parent.
    #[must_use]
    pub const fn index(&self) -> usize {
        self.index
    }

    /// Number of segments in this path (a root path has depth 1).
    #[must_use]
    pub fn depth(&self) -> usize {
        self.parent.as_ref().map_or(1, |p| p.depth() + 1)
    }

    /// Every prefix of this path, root first, ending with `self`.
    #[must_use]
    pub fn to_list(&self) -> Vec<ComponentPath> {
        let mut list = Vec::with_capacity(self.depth());
        let mut current = Some(self);
        while let Some(path) = current {
            list.push(path.clone());
            current = path.parent();
        }
        list.reverse();
        list
    }

    /// Child indices, root first.
    #[must_use]
    pub fn indices(&self) -> SmallVec<[usize; 8]> {
        let mut indices = SmallVec::new();
        let mut current = Some(self);
        while let Some(path) = current {
            indices.push(path.index);
            current = path.parent();
        }
        indices.reverse();
        indices
    }
}

impl std::fmt::Display for ComponentPath {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        for (i, index) in self.indices().iter().enumerate() {
            if i > 0 {
                f.write_str("/")?;
            }
            write!(f, "{}", index)?;
        }
        Ok(())
    }
}
