/// Identifier for a drain in a caller-supplied drain slice.
///
/// This is the drain's index in the order the caller provided, and is
/// preserved by every phase regardless of the internal sweep order.
pub type DrainId = usize;

/// Integer wall coordinate (heights and x-positions).
pub type Coord = i32;
