use std::ops::Range;

/// Water pending above each x-index of the wall during the accumulation sweep.
///
/// Every position starts seeded with the rain falling from the top edge.
/// As drains are processed top to bottom, each one empties the positions
/// it covers and hands the collected water to the position just past its
/// right edge. Water handed past the last position has left the wall and
/// is tallied in [`FlowBuffer::lost`].
#[derive(Debug)]
pub struct FlowBuffer {
    amount: Vec<f64>,
    lost: f64,
}

impl FlowBuffer {
    /// Creates a buffer of `len` positions, each holding `value`.
    pub fn seeded(len: usize, value: f64) -> Self {
        Self {
            amount: vec![value; len],
            lost: 0.0,
        }
    }

    /// Reinitializes the buffer to `len` positions holding `value` and
    /// forgets any water lost so far.
    pub fn reset(&mut self, len: usize, value: f64) {
        self.amount.clear();
        self.amount.resize(len, value);
        self.lost = 0.0;
    }

    pub fn len(&self) -> usize {
        self.amount.len()
    }

    pub fn is_empty(&self) -> bool {
        self.amount.is_empty()
    }

    #[inline]
    pub fn get(&self, index: usize) -> Option<f64> {
        self.amount.get(index).copied()
    }

    /// Total water currently pending over `span`.
    ///
    /// ### Panics
    /// Panics if `span` reaches past the end of the buffer.
    pub fn drain_sum(&self, span: Range<usize>) -> f64 {
        self.amount[span].iter().sum()
    }

    /// Empties `span` and moves its water to `carry_index`.
    ///
    /// If `carry_index` is past the end of the buffer the water leaves the
    /// wall and is added to [`FlowBuffer::lost`] instead.
    ///
    /// ### Returns
    /// The amount that was moved, i.e. the [`FlowBuffer::drain_sum`] of
    /// `span` before it was cleared.
    pub fn clear_and_carry(&mut self, span: Range<usize>, carry_index: usize) -> f64 {
        let moved = self.drain_sum(span.clone());
        for v in &mut self.amount[span] {
            *v = 0.0;
        }
        match self.amount.get_mut(carry_index) {
            Some(slot) => *slot += moved,
            None => self.lost += moved,
        }
        moved
    }

    /// Water that has been carried past the right boundary of the wall.
    pub fn lost(&self) -> f64 {
        self.lost
    }

    /// Water still sitting on the buffer.
    pub fn pending_total(&self) -> f64 {
        self.amount.iter().sum()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn seeded_fills_every_position() {
        let buf = FlowBuffer::seeded(4, 1.5);
        assert_eq!(buf.len(), 4);
        assert_eq!(buf.drain_sum(0..4), 6.0);
        assert_eq!(buf.lost(), 0.0);
    }

    #[test]
    fn clear_and_carry_moves_water_to_the_right_edge() {
        let mut buf = FlowBuffer::seeded(6, 1.0);

        let moved = buf.clear_and_carry(1..3, 3);

        assert_eq!(moved, 2.0);
        assert_eq!(buf.get(1), Some(0.0));
        assert_eq!(buf.get(2), Some(0.0));
        assert_eq!(buf.get(3), Some(3.0));
        assert_eq!(buf.pending_total(), 6.0);
    }

    #[test]
    fn carry_past_the_wall_is_lost() {
        let mut buf = FlowBuffer::seeded(4, 1.0);

        let moved = buf.clear_and_carry(2..4, 4);

        assert_eq!(moved, 2.0);
        assert_eq!(buf.lost(), 2.0);
        assert_eq!(buf.pending_total(), 2.0);
    }

    #[test]
    fn covered_positions_contribute_nothing_on_a_second_pass() {
        let mut buf = FlowBuffer::seeded(5, 1.0);
        buf.clear_and_carry(0..2, 2);

        // Position 2 now holds its own rain plus the carried 2.0.
        assert_eq!(buf.drain_sum(0..3), 3.0);
    }

    #[test]
    fn reset_reseeds_and_forgets_lost_water() {
        let mut buf = FlowBuffer::seeded(2, 1.0);
        buf.clear_and_carry(0..2, 2);
        assert_eq!(buf.lost(), 2.0);

        buf.reset(3, 0.5);
        assert_eq!(buf.len(), 3);
        assert_eq!(buf.pending_total(), 1.5);
        assert_eq!(buf.lost(), 0.0);
    }
}
