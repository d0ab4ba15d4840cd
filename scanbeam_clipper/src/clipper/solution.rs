use crate::core::math::{area, Path, Paths};

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

#[cfg_attr(
    feature = "serde",
    derive(Serialize, Deserialize),
    serde(rename_all = "camelCase")
)]
/// One output loop (or polyline) of a clip operation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SolutionPath {
    /// Vertexes of the loop, implicitly closed unless `is_open` is set.
    pub points: Path,
    /// True if the loop bounds a hole of its parent.
    pub is_hole: bool,
    /// True if the path is a clipped open polyline.
    pub is_open: bool,
    /// Index (into the same [Solution]) of the nearest enclosing loop of opposite hole state.
    pub parent: Option<usize>,
}

impl SolutionPath {
    /// Signed area of the loop, zero for open paths.
    pub fn area(&self) -> f64 {
        if self.is_open {
            0.0
        } else {
            area(&self.points)
        }
    }
}

/// Result of a successful clip operation.
///
/// Outer loops have positive [area] and holes negative (the reverse when the
/// `reverse_solution` option is set).
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Solution {
    paths: Vec<SolutionPath>,
}

impl Solution {
    pub(crate) fn from_paths(paths: Vec<SolutionPath>) -> Self {
        Self { paths }
    }

    #[inline]
    pub fn len(&self) -> usize {
        self.paths.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.paths.is_empty()
    }

    #[inline]
    pub fn iter(&self) -> impl Iterator<Item = &SolutionPath> {
        self.paths.iter()
    }

    #[inline]
    pub fn get(&self, index: usize) -> Option<&SolutionPath> {
        self.paths.get(index)
    }

    /// All output point sequences, hole information discarded.
    pub fn paths(&self) -> Paths {
        self.paths.iter().map(|p| p.points.clone()).collect()
    }

    pub fn into_paths(self) -> Paths {
        self.paths.into_iter().map(|p| p.points).collect()
    }

    /// Indexes of closed loops that have no parent.
    pub fn outer_indexes(&self) -> Vec<usize> {
        self.paths
            .iter()
            .enumerate()
            .filter(|(_, p)| !p.is_open && p.parent.is_none())
            .map(|(i, _)| i)
            .collect()
    }

    /// Indexes of the loops directly nested in loop `index`.
    pub fn children_of(&self, index: usize) -> Vec<usize> {
        self.paths
            .iter()
            .enumerate()
            .filter(|(_, p)| p.parent == Some(index))
            .map(|(i, _)| i)
            .collect()
    }

    /// Sum of the signed areas of all closed loops (net filled area).
    pub fn total_area(&self) -> f64 {
        self.paths.iter().map(SolutionPath::area).sum()
    }
}

impl std::ops::Index<usize> for Solution {
    type Output = SolutionPath;

    #[inline]
    fn index(&self, index: usize) -> &Self::Output {
        &self.paths[index]
    }
}

impl IntoIterator for Solution {
    type Item = SolutionPath;
    type IntoIter = std::vec::IntoIter<SolutionPath>;

    fn into_iter(self) -> Self::IntoIter {
        self.paths.into_iter()
    }
}

impl<'a> IntoIterator for &'a Solution {
    type Item = &'a SolutionPath;
    type IntoIter = std::slice::Iter<'a, SolutionPath>;

    fn into_iter(self) -> Self::IntoIter {
        self.paths.iter()
    }
}
