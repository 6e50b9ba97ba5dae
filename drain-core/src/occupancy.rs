use std::ops::Range;

use crate::types::DrainId;

/// Per-position record of which drain occupies each x-index of the wall.
///
/// The layout validator sweeps drains top to bottom and claims each
/// drain's span here. A position holds `None` while it is free, or the
/// [`DrainId`] of the drain that claimed it. Keeping the owner (rather
/// than a plain flag) lets a conflict name the drain it collided with.
#[derive(Debug)]
pub struct OccupancyBuffer {
    owner: Vec<Option<DrainId>>,
}

impl OccupancyBuffer {
    /// Creates a new [`OccupancyBuffer`] with every position free.
    ///
    /// ### Parameters
    /// - `len` - Wall width in normalized positions.
    pub fn with_len(len: usize) -> Self {
        Self {
            owner: vec![None; len],
        }
    }

    /// Reinitializes the buffer to `len` positions, all free.
    ///
    /// The allocation is reused when the length is unchanged.
    pub fn reset(&mut self, len: usize) {
        self.owner.clear();
        self.owner.resize(len, None);
    }

    pub fn len(&self) -> usize {
        self.owner.len()
    }

    pub fn is_empty(&self) -> bool {
        self.owner.is_empty()
    }

    /// Returns `true` if every position in `span` is free.
    ///
    /// ### Panics
    /// Panics if `span` reaches past the end of the buffer.
    pub fn span_is_clear(&self, span: Range<usize>) -> bool {
        self.owner[span].iter().all(Option::is_none)
    }

    /// Returns the first drain occupying a position in `span`, if any.
    pub fn first_owner(&self, span: Range<usize>) -> Option<DrainId> {
        self.owner[span].iter().find_map(|o| *o)
    }

    /// Marks every position in `span` as occupied by `id`.
    ///
    /// The span is only claimed if it is completely free; otherwise the
    /// buffer is left untouched.
    ///
    /// ### Returns
    /// - `Ok(())` if the span was claimed.
    /// - `Err(other)` with the drain already holding part of the span.
    ///
    /// ### Panics
    /// Panics if `span` reaches past the end of the buffer.
    pub fn claim(&mut self, span: Range<usize>, id: DrainId) -> Result<(), DrainId> {
        if let Some(other) = self.first_owner(span.clone()) {
            return Err(other);
        }
        for slot in &mut self.owner[span] {
            *slot = Some(id);
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn with_len_starts_fully_clear() {
        let buf = OccupancyBuffer::with_len(6);
        assert_eq!(buf.len(), 6);
        assert!(buf.span_is_clear(0..6));
        assert_eq!(buf.first_owner(0..6), None);
    }

    #[test]
    fn claim_marks_span_and_rejects_overlap() {
        let mut buf = OccupancyBuffer::with_len(10);

        assert_eq!(buf.claim(2..5, 7), Ok(()));
        assert!(!buf.span_is_clear(0..3));
        assert!(buf.span_is_clear(5..10));

        // Overlaps position 4 only.
        assert_eq!(buf.claim(4..8, 9), Err(7));
        // A rejected claim leaves the buffer untouched.
        assert!(buf.span_is_clear(5..8));
    }

    #[test]
    fn adjacent_spans_do_not_conflict() {
        let mut buf = OccupancyBuffer::with_len(10);
        assert_eq!(buf.claim(0..5, 0), Ok(()));
        assert_eq!(buf.claim(5..10, 1), Ok(()));
        assert_eq!(buf.first_owner(4..6), Some(0));
    }

    #[test]
    fn reset_frees_every_position_and_resizes() {
        let mut buf = OccupancyBuffer::with_len(4);
        buf.claim(0..4, 3).unwrap();

        buf.reset(4);
        assert!(buf.span_is_clear(0..4));

        buf.reset(8);
        assert_eq!(buf.len(), 8);
        assert!(buf.span_is_clear(0..8));
    }

    #[test]
    #[should_panic]
    fn span_past_end_panics() {
        let buf = OccupancyBuffer::with_len(3);
        buf.span_is_clear(1..4);
    }
}
