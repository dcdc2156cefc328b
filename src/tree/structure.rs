// Copyright (c) 2025 Steve Wagner (ciroque@live.com)
// SPDX-License-Identifier: MIT

use serde::de::{Deserializer, Error as _};
use serde::ser::{SerializeMap, Serializer};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::ops::Range;

use super::Path;

/// Ordered mapping from [`Path`] to a branch of items.
///
/// `Tree` is both the input and the output container of a conversion run.
/// Branches are kept in ascending path order and items keep their insertion
/// order within a branch. A branch may be empty; empty branches are part of the
/// topology and survive a conversion.
///
/// Trees are write-once per run: there is no removal operation.
///
/// ```
/// use the_grafter::tree::{Path, Tree};
///
/// let mut tree = Tree::new();
/// tree.append(Path::from([1]), "c");
/// tree.append(Path::from([0]), "a");
/// tree.append(Path::from([0]), "b");
/// tree.ensure_branch(Path::from([2]));
///
/// let paths: Vec<String> = tree.paths().map(|p| p.to_string()).collect();
/// assert_eq!(paths, vec!["{0}", "{1}", "{2}"]);
/// assert_eq!(tree.count(), 3);
/// ```
#[derive(Debug, Clone, PartialEq)]
pub struct Tree<T> {
    branches: BTreeMap<Path, Vec<T>>,
}

impl<T> Default for Tree<T> {
    fn default() -> Self {
        Self {
            branches: BTreeMap::new(),
        }
    }
}

impl<T> Tree<T> {
    pub fn new() -> Self {
        Self::default()
    }

    /// Appends `item` to the branch at `path`, creating the branch if needed.
    ///
    /// Locating the branch is `O(log b)` in the number of branches; the push
    /// itself is amortized `O(1)`.
    pub fn append(&mut self, path: Path, item: T) {
        self.branches.entry(path).or_default().push(item);
    }

    /// Makes sure a (possibly empty) branch exists at `path`.
    pub fn ensure_branch(&mut self, path: Path) {
        self.branches.entry(path).or_default();
    }

    /// Appends every item of `items` to the branch at `path`.
    pub fn extend_branch<I: IntoIterator<Item = T>>(&mut self, path: Path, items: I) {
        self.branches.entry(path).or_default().extend(items);
    }

    /// Branches in ascending path order.
    ///
    /// The returned iterator borrows the tree and can be restarted by calling
    /// `branches()` again.
    pub fn branches(&self) -> impl Iterator<Item = (&Path, &[T])> + Clone + '_ {
        self.branches
            .iter()
            .map(|(path, items)| (path, items.as_slice()))
    }

    /// Branches whose ordinal position falls inside `range`.
    pub fn branches_in(
        &self,
        range: Range<usize>,
    ) -> impl Iterator<Item = (&Path, &[T])> + Clone + '_ {
        self.branches()
            .skip(range.start)
            .take(range.end.saturating_sub(range.start))
    }

    pub fn paths(&self) -> impl Iterator<Item = &Path> + '_ {
        self.branches.keys()
    }

    pub fn branch(&self, path: &Path) -> Option<&[T]> {
        self.branches.get(path).map(|items| items.as_slice())
    }

    /// Total number of items across every branch.
    pub fn count(&self) -> usize {
        self.branches.values().map(Vec::len).sum()
    }

    pub fn branch_count(&self) -> usize {
        self.branches.len()
    }

    /// A tree with no branches at all. A tree holding only empty branches is
    /// not empty.
    pub fn is_empty(&self) -> bool {
        self.branches.is_empty()
    }

    /// True when both trees have the same paths and the same item count per
    /// path. Item values are not compared.
    pub fn same_topology<U>(&self, other: &Tree<U>) -> bool {
        self.branch_count() == other.branch_count()
            && self
                .branches()
                .zip(other.branches())
                .all(|((pa, a), (pb, b))| pa == pb && a.len() == b.len())
    }

    /// Moves every branch of `other` into this tree.
    ///
    /// Branches present in both trees are concatenated, `self` first.
    pub fn merge(&mut self, other: Tree<T>) {
        for (path, items) in other.branches {
            self.branches.entry(path).or_default().extend(items);
        }
    }

    /// Splits branch positions into at most `parts` contiguous ranges holding
    /// roughly equal item counts.
    ///
    /// Ranges never split a branch, always cover every branch in order, and
    /// are never empty. An empty tree yields no ranges.
    pub fn partition_ranges(&self, parts: usize) -> Vec<Range<usize>> {
        let branch_count = self.branch_count();
        if branch_count == 0 {
            return Vec::new();
        }

        let parts = parts.clamp(1, branch_count);
        // Empty branches still cost a slot so they get assigned somewhere.
        let weights: Vec<usize> = self.branches.values().map(|b| b.len().max(1)).collect();
        let total: usize = weights.iter().sum();
        let target = total.div_ceil(parts);

        let mut ranges = Vec::with_capacity(parts);
        let mut start = 0;
        let mut accumulated = 0;
        for (index, weight) in weights.iter().enumerate() {
            accumulated += weight;
            let remaining_branches = branch_count - index - 1;
            let remaining_parts = parts - ranges.len() - 1;
            let must_cut = remaining_branches == remaining_parts && remaining_parts > 0;
            if (accumulated >= target && remaining_parts > 0) || must_cut {
                ranges.push(start..index + 1);
                start = index + 1;
                accumulated = 0;
            }
        }
        if start < branch_count {
            ranges.push(start..branch_count);
        }
        ranges
    }
}

impl<T> FromIterator<(Path, Vec<T>)> for Tree<T> {
    fn from_iter<I: IntoIterator<Item = (Path, Vec<T>)>>(iter: I) -> Self {
        let mut tree = Tree::new();
        for (path, items) in iter {
            tree.extend_branch(path, items);
        }
        tree
    }
}

impl<T> IntoIterator for Tree<T> {
    type Item = (Path, Vec<T>);
    type IntoIter = std::collections::btree_map::IntoIter<Path, Vec<T>>;

    fn into_iter(self) -> Self::IntoIter {
        self.branches.into_iter()
    }
}

// Serialized as a map keyed by path literal, e.g. `{"{0;1}": [...]}`.
impl<T: Serialize> Serialize for Tree<T> {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut map = serializer.serialize_map(Some(self.branches.len()))?;
        for (path, items) in &self.branches {
            map.serialize_entry(&path.to_string(), items)?;
        }
        map.end()
    }
}

impl<'de, T: Deserialize<'de>> Deserialize<'de> for Tree<T> {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let raw: BTreeMap<String, Vec<T>> = BTreeMap::deserialize(deserializer)?;
        let mut tree = Tree::new();
        for (literal, items) in raw {
            let path: Path = literal.parse().map_err(D::Error::custom)?;
            tree.extend_branch(path, items);
        }
        Ok(tree)
    }
}
