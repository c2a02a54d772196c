//! Character-level edit scripts and label projection.
//!
//! The edit script between two flat texts is the minimal sequence of
//! single-character insert/delete/replace operations (unit costs) turning the
//! source into the target. Applying the script to a label array in reverse
//! position order re-expresses per-character labels in the target's
//! coordinate frame, which is what lets two drifting texts be compared
//! character-for-character.

use crate::flatten::LabelArray;

/// A single edit operation. Positions index into the source string; applying
/// operations from the highest position down keeps earlier indices valid.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EditOp {
    /// Remove the source character at `pos`.
    Delete { pos: usize },
    /// Insert one target character before source position `pos`.
    Insert { pos: usize },
    /// Substitute the source character at `pos`.
    Replace { pos: usize },
}

impl EditOp {
    pub fn pos(&self) -> usize {
        match *self {
            EditOp::Delete { pos } | EditOp::Insert { pos } | EditOp::Replace { pos } => pos,
        }
    }
}

/// Minimal edit script between two character slices, in ascending position
/// order. The edit distance equals the number of operations.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct EditScript {
    ops: Vec<EditOp>,
}

impl EditScript {
    pub fn ops(&self) -> &[EditOp] {
        &self.ops
    }

    /// Total edit cost (operations carry unit cost).
    pub fn cost(&self) -> usize {
        self.ops.len()
    }

    pub fn is_empty(&self) -> bool {
        self.ops.is_empty()
    }
}

/// Compute the minimal edit script turning `source` into `target`.
///
/// Classic Levenshtein recurrence over the full cost matrix, with ties broken
/// in a fixed preference order during backtracking: replace, then delete,
/// then insert. An empty input yields an all-insert or all-delete script.
pub fn edit_script(source: &[char], target: &[char]) -> EditScript {
    let n = source.len();
    let m = target.len();
    let width = m + 1;

    // Full (n+1) x (m+1) cost matrix, row-major, kept for backtracking.
    let mut costs = vec![0u32; (n + 1) * width];
    for (j, cell) in costs[..width].iter_mut().enumerate() {
        *cell = j as u32;
    }
    for i in 1..=n {
        costs[i * width] = i as u32;
        for j in 1..=m {
            let substitution = costs[(i - 1) * width + (j - 1)]
                + u32::from(source[i - 1] != target[j - 1]);
            let deletion = costs[(i - 1) * width + j] + 1;
            let insertion = costs[i * width + (j - 1)] + 1;
            costs[i * width + j] = substitution.min(deletion).min(insertion);
        }
    }

    // Backtrack from the bottom-right corner; operations come out in
    // descending position order and are reversed at the end.
    let mut ops = Vec::with_capacity(costs[n * width + m] as usize);
    let (mut i, mut j) = (n, m);
    while i > 0 || j > 0 {
        let here = costs[i * width + j];
        if i > 0 && j > 0 && source[i - 1] == target[j - 1] && here == costs[(i - 1) * width + (j - 1)]
        {
            i -= 1;
            j -= 1;
        } else if i > 0 && j > 0 && here == costs[(i - 1) * width + (j - 1)] + 1 {
            ops.push(EditOp::Replace { pos: i - 1 });
            i -= 1;
            j -= 1;
        } else if i > 0 && here == costs[(i - 1) * width + j] + 1 {
            ops.push(EditOp::Delete { pos: i - 1 });
            i -= 1;
        } else {
            ops.push(EditOp::Insert { pos: i });
            j -= 1;
        }
    }
    ops.reverse();

    EditScript { ops }
}

/// Compute only the edit distance between two character slices.
///
/// Two-row variant of the recurrence; used where the script itself is not
/// needed (seam search over overlap windows).
pub fn edit_distance(source: &[char], target: &[char]) -> usize {
    let (shorter, longer) = if source.len() <= target.len() {
        (source, target)
    } else {
        (target, source)
    };
    if shorter.is_empty() {
        return longer.len();
    }

    let mut previous: Vec<u32> = (0..=shorter.len() as u32).collect();
    let mut current = vec![0u32; shorter.len() + 1];

    for (i, &lc) in longer.iter().enumerate() {
        current[0] = i as u32 + 1;
        for (j, &sc) in shorter.iter().enumerate() {
            let substitution = previous[j] + u32::from(lc != sc);
            let deletion = previous[j + 1] + 1;
            let insertion = current[j] + 1;
            current[j + 1] = substitution.min(deletion).min(insertion);
        }
        std::mem::swap(&mut previous, &mut current);
    }

    previous[shorter.len()] as usize
}

/// Re-express `labels` (one per source character) in the target's coordinate
/// frame by applying `script` in reverse position order.
///
/// A delete removes the label at its position, an insert adds a 0 (unowned)
/// placeholder, and a replace leaves ownership untouched. The result is a
/// freshly allocated array whose length equals the target's length.
pub fn project_labels(labels: &[u32], script: &EditScript) -> LabelArray {
    let mut projected: LabelArray = labels.to_vec();
    for op in script.ops().iter().rev() {
        match *op {
            EditOp::Delete { pos } => {
                projected.remove(pos);
            }
            EditOp::Insert { pos } => {
                projected.insert(pos, 0);
            }
            EditOp::Replace { .. } => {}
        }
    }
    projected
}

#[cfg(test)]
mod tests {
    use super::*;

    fn chars(s: &str) -> Vec<char> {
        s.chars().collect()
    }

    #[test]
    fn identical_strings_have_empty_script() {
        let a = chars("hello world");
        let script = edit_script(&a, &a);
        assert!(script.is_empty());
        assert_eq!(script.cost(), 0);
        assert_eq!(edit_distance(&a, &a), 0);
    }

    #[test]
    fn empty_source_is_all_inserts() {
        let script = edit_script(&[], &chars("abc"));
        assert_eq!(script.cost(), 3);
        assert!(script
            .ops()
            .iter()
            .all(|op| matches!(op, EditOp::Insert { pos: 0 })));
        assert_eq!(edit_distance(&[], &chars("abc")), 3);
    }

    #[test]
    fn empty_target_is_all_deletes() {
        let script = edit_script(&chars("abc"), &[]);
        assert_eq!(script.cost(), 3);
        assert!(script
            .ops()
            .iter()
            .all(|op| matches!(op, EditOp::Delete { .. })));
        assert_eq!(edit_distance(&chars("abc"), &[]), 3);
    }

    #[test]
    fn single_substitution_is_a_replace() {
        let script = edit_script(&chars("kitten"), &chars("mitten"));
        assert_eq!(script.cost(), 1);
        assert_eq!(script.ops(), &[EditOp::Replace { pos: 0 }]);
    }

    #[test]
    fn classic_kitten_sitting_distance() {
        let a = chars("kitten");
        let b = chars("sitting");
        assert_eq!(edit_script(&a, &b).cost(), 3);
        assert_eq!(edit_distance(&a, &b), 3);
    }

    #[test]
    fn script_cost_matches_two_row_distance() {
        let cases = [
            ("", ""),
            ("a", ""),
            ("", "a"),
            ("abcdef", "azced"),
            ("sunday", "saturday"),
            ("double  space", "double space"),
            ("Hello, world!", "Hello world"),
        ];
        for (a, b) in cases {
            let a = chars(a);
            let b = chars(b);
            assert_eq!(
                edit_script(&a, &b).cost(),
                edit_distance(&a, &b),
                "cost mismatch for {:?} -> {:?}",
                a,
                b
            );
        }
    }

    #[test]
    fn projection_round_trip_on_identical_strings() {
        let a = chars("some labeled text");
        let labels: Vec<u32> = (1..=a.len() as u32).collect();
        let script = edit_script(&a, &a);
        assert_eq!(project_labels(&labels, &script), labels);
    }

    #[test]
    fn projection_result_has_target_length() {
        let cases = [
            ("He said  hi.", "He said hi."),
            ("short", "a much longer string"),
            ("a much longer string", "short"),
            ("", "xyz"),
            ("xyz", ""),
        ];
        for (a, b) in cases {
            let a = chars(a);
            let b = chars(b);
            let labels = vec![7u32; a.len()];
            let script = edit_script(&a, &b);
            assert_eq!(
                project_labels(&labels, &script).len(),
                b.len(),
                "length mismatch for {:?} -> {:?}",
                a,
                b
            );
        }
    }

    #[test]
    fn deletion_drops_the_owning_label() {
        // "ab" -> "b": the label of 'a' disappears.
        let script = edit_script(&chars("ab"), &chars("b"));
        let projected = project_labels(&[1, 2], &script);
        assert_eq!(projected, vec![2]);
    }

    #[test]
    fn insertion_adds_unowned_placeholder() {
        // "ac" -> "abc": the new character belongs to no segment.
        let script = edit_script(&chars("ac"), &chars("abc"));
        let projected = project_labels(&[1, 2], &script);
        assert_eq!(projected.len(), 3);
        assert_eq!(projected[0], 1);
        assert!(projected.contains(&0));
        assert_eq!(projected[2], 2);
    }

    #[test]
    fn replace_preserves_ownership_labels() {
        // Same length, different characters: every op is a replace and the
        // label array must come through unchanged.
        let a = chars("aaaa");
        let b = chars("abba");
        let script = edit_script(&a, &b);
        assert!(script
            .ops()
            .iter()
            .all(|op| matches!(op, EditOp::Replace { .. })));
        let labels = vec![1, 1, 2, 2];
        assert_eq!(project_labels(&labels, &script), labels);
    }

    #[test]
    fn replace_preserves_labels_at_segment_boundary() {
        // A replace exactly on a segment boundary must not shift ownership.
        let a = chars("xy");
        let b = chars("xz");
        let script = edit_script(&a, &b);
        assert_eq!(script.ops(), &[EditOp::Replace { pos: 1 }]);
        assert_eq!(project_labels(&[1, 2], &script), vec![1, 2]);
    }

    #[test]
    fn whitespace_drift_projection() {
        // Predicted text has a doubled space; projecting its labels into the
        // single-space frame drops one label.
        let a = chars("He said  hi");
        let b = chars("He said hi");
        let labels = vec![1, 1, 1, 1, 1, 1, 1, 1, 2, 2, 2];
        let script = edit_script(&a, &b);
        assert_eq!(script.cost(), 1);
        let projected = project_labels(&labels, &script);
        assert_eq!(projected.len(), b.len());
        assert_eq!(&projected[8..], &[2, 2]);
    }

    #[test]
    fn ops_are_in_ascending_position_order() {
        let a = chars("abcdefgh");
        let b = chars("xbcdyfgz");
        let script = edit_script(&a, &b);
        let positions: Vec<usize> = script.ops().iter().map(EditOp::pos).collect();
        let mut sorted = positions.clone();
        sorted.sort_unstable();
        assert_eq!(positions, sorted);
    }
}
