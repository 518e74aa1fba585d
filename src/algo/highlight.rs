//! Remapping edit runs to per-view block indices.
//!
//! A view only highlights its own blocks: the left view marks what was
//! removed from it, the right view marks what was added to it. Walking the
//! runs with one cursor per side recovers those positions from run lengths.

use super::lcs::{EditKind, EditRun};

/// Block indices touched by a diff, one set per side.
#[derive(Debug, Default, Clone, PartialEq, Eq)]
pub struct DiffResult {
    /// Positions in sequence `a` covered by removed runs
    pub removed: Vec<usize>,
    /// Positions in sequence `b` covered by added runs
    pub added: Vec<usize>,
}

impl DiffResult {
    /// Walk `runs` left to right and collect the touched indices.
    ///
    /// ```
    /// use docsync::algo::{DiffResult, EditKind, EditRun};
    ///
    /// let runs = [EditRun::new(EditKind::Kept, 2), EditRun::new(EditKind::Added, 1)];
    /// let result = DiffResult::from_runs(&runs);
    /// assert!(result.removed.is_empty());
    /// assert_eq!(result.added, [2]);
    /// ```
    pub fn from_runs(runs: &[EditRun]) -> Self {
        let mut result = Self::default();
        let mut a_cursor = 0;
        let mut b_cursor = 0;

        for run in runs {
            match run.kind {
                EditKind::Removed => {
                    result.removed.extend(a_cursor..a_cursor + run.len);
                    a_cursor += run.len;
                }
                EditKind::Added => {
                    result.added.extend(b_cursor..b_cursor + run.len);
                    b_cursor += run.len;
                }
                EditKind::Kept => {
                    a_cursor += run.len;
                    b_cursor += run.len;
                }
            }
        }
        result
    }

    /// Check if neither side has changes
    pub fn is_empty(&self) -> bool {
        self.removed.is_empty() && self.added.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::algo::diff_sequences;

    #[test]
    fn test_empty_runs() {
        assert!(DiffResult::from_runs(&[]).is_empty());
    }

    #[test]
    fn test_cursors_advance_independently() {
        let runs = [
            EditRun::new(EditKind::Kept, 1),
            EditRun::new(EditKind::Removed, 2),
            EditRun::new(EditKind::Added, 3),
            EditRun::new(EditKind::Kept, 1),
            EditRun::new(EditKind::Removed, 1),
        ];
        let result = DiffResult::from_runs(&runs);
        assert_eq!(result.removed, [1, 2, 4]);
        assert_eq!(result.added, [1, 2, 3]);
    }

    #[test]
    fn test_from_swapped_blocks() {
        let runs = diff_sequences(&["a", "b"], &["b", "a"]);
        let result = DiffResult::from_runs(&runs);
        assert_eq!(result.removed, [0]);
        assert_eq!(result.added, [1]);
    }

    #[test]
    fn test_indices_point_at_changed_blocks() {
        let a = ["Intro", "Old", "Body", "Outro"];
        let b = ["Intro", "Body", "Fresh", "Outro", "Appendix"];
        let result = DiffResult::from_runs(&diff_sequences(&a, &b));
        let removed: Vec<_> = result.removed.iter().map(|&i| a[i]).collect();
        let added: Vec<_> = result.added.iter().map(|&i| b[i]).collect();
        assert_eq!(removed, ["Old"]);
        assert_eq!(added, ["Fresh", "Appendix"]);
    }
}
