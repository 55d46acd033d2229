use buffer_diff::TextRange;

/// A single replacement: the chars in `start..old_end` become `new_len` new chars.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Edit {
    pub start: usize,
    pub old_end: usize,
    pub new_len: usize,
}

impl Edit {
    /// Describe replacing `range` with `new_len` chars
    pub fn new(range: TextRange, new_len: usize) -> Self {
        Self {
            start: range.start,
            old_end: range.end,
            new_len,
        }
    }

    /// Signed change in document length.
    fn delta(&self) -> isize {
        self.new_len as isize - (self.old_end - self.start) as isize
    }

    /// Check if this edit inserts without deleting anything.
    fn is_insertion_only(&self) -> bool {
        self.start == self.old_end
    }
}

/// Map a live range through an edit.
///
/// Returns `None` when the edit crosses one of the range's boundaries or
/// swallows it entirely, in which case the range cannot be preserved.
///
/// - Insertions at the start offset push the range along; insertions at the
///   end offset stay outside of it.
/// - Edits entirely before the range shift it, edits entirely after leave it
///   alone, and edits inside it move only its end.
pub fn adjust_range(range: TextRange, edit: &Edit) -> Option<TextRange> {
    let delta = edit.delta();

    if edit.is_insertion_only() {
        return Some(if edit.start <= range.start {
            range.shifted(delta)
        } else if edit.start < range.end {
            TextRange::new(range.start, range.end + edit.new_len)
        } else {
            range
        });
    }

    if edit.old_end <= range.start {
        Some(range.shifted(delta))
    } else if edit.start >= range.end {
        Some(range)
    } else if range.start <= edit.start && edit.old_end <= range.end {
        Some(TextRange::new(
            range.start,
            range.end.saturating_add_signed(delta),
        ))
    } else {
        None
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn replace(start: usize, end: usize, new_len: usize) -> Edit {
        Edit::new(TextRange::new(start, end), new_len)
    }

    #[test]
    fn edit_before_shifts_range() {
        let range = TextRange::new(10, 20);
        assert_eq!(adjust_range(range, &replace(2, 5, 0)), Some(TextRange::new(7, 17)));
        assert_eq!(adjust_range(range, &replace(2, 10, 1)), Some(TextRange::new(3, 13)));
    }

    #[test]
    fn edit_after_leaves_range_alone() {
        let range = TextRange::new(10, 20);
        assert_eq!(adjust_range(range, &replace(20, 25, 0)), Some(range));
        assert_eq!(adjust_range(range, &replace(30, 30, 4)), Some(range));
    }

    #[test]
    fn insertion_at_start_pushes_range() {
        let range = TextRange::new(10, 20);
        assert_eq!(adjust_range(range, &replace(10, 10, 3)), Some(TextRange::new(13, 23)));
    }

    #[test]
    fn insertion_at_end_stays_outside() {
        let range = TextRange::new(10, 20);
        assert_eq!(adjust_range(range, &replace(20, 20, 3)), Some(range));
    }

    #[test]
    fn edit_inside_moves_end() {
        let range = TextRange::new(10, 20);
        assert_eq!(adjust_range(range, &replace(12, 15, 1)), Some(TextRange::new(10, 18)));
        assert_eq!(adjust_range(range, &replace(15, 15, 2)), Some(TextRange::new(10, 22)));
        // Replacing exactly the covered text keeps the range
        assert_eq!(adjust_range(range, &replace(10, 20, 4)), Some(TextRange::new(10, 14)));
    }

    #[test]
    fn edit_crossing_start_invalidates() {
        assert_eq!(adjust_range(TextRange::new(10, 20), &replace(5, 12, 0)), None);
    }

    #[test]
    fn edit_crossing_end_invalidates() {
        assert_eq!(adjust_range(TextRange::new(10, 20), &replace(18, 25, 2)), None);
    }

    #[test]
    fn edit_swallowing_range_invalidates() {
        assert_eq!(adjust_range(TextRange::new(10, 20), &replace(9, 21, 0)), None);
    }

    #[test]
    fn empty_range_follows_surrounding_edits() {
        let range = TextRange::empty(5);
        assert_eq!(adjust_range(range, &replace(5, 5, 2)), Some(TextRange::empty(7)));
        assert_eq!(adjust_range(range, &replace(1, 5, 0)), Some(TextRange::empty(1)));
        assert_eq!(adjust_range(range, &replace(5, 8, 0)), Some(range));
        assert_eq!(adjust_range(range, &replace(4, 6, 0)), None);
    }
}
