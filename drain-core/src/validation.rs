//! Layout validation: input preconditions and the overlap sweep.
//!
//! Validation must succeed before [`crate::phases`] is run; the
//! accumulation sweep assumes a layout where no two drains of the same
//! band share an x-position.

use log::debug;

use crate::{
    drain::{self, Drain, DrainSet},
    error::DrainError,
    occupancy::OccupancyBuffer,
    types::Coord,
    wall::{MAX_WALL_WIDTH, Wall},
};

/// Validates a drain layout given as a record slice.
///
/// Checks, in order: the layout is non-empty, the water density is a
/// finite positive float, every drain has `right_x > left_x`, the wall is
/// at most [`MAX_WALL_WIDTH`] units wide, and no two drains of the same
/// band overlap (see [`overlap_sweep`]).
///
/// The sweeps allocate one slot per unit of wall width, hence the width
/// bound.
///
/// ### Errors
/// The first failing check, as [`DrainError::EmptyLayout`],
/// [`DrainError::NonFiniteDensity`], [`DrainError::InvalidDensity`],
/// [`DrainError::InvalidSpan`], [`DrainError::WallTooWide`] or
/// [`DrainError::OverlapConflict`].
pub fn validate(drains: &[Drain], water_amount_per_unit_of_length: f64) -> Result<(), DrainError> {
    if drains.is_empty() {
        return Err(DrainError::EmptyLayout);
    }
    check_density(water_amount_per_unit_of_length)?;
    check_spans(drains)?;
    check_wall_width(drains)?;
    overlap_sweep(drains)
}

/// Validates a layout given as three parallel columns plus the expected
/// drain count `n`.
///
/// This is [`validate`] with an additional shape check: each column must
/// hold exactly `n` values.
pub fn validate_columns(
    n: usize,
    height: &[Coord],
    left_x: &[Coord],
    right_x: &[Coord],
    water_amount_per_unit_of_length: f64,
) -> Result<(), DrainError> {
    if n == 0 {
        return Err(DrainError::EmptyLayout);
    }
    check_density(water_amount_per_unit_of_length)?;
    let set = DrainSet::from_columns(n, height, left_x, right_x)?;
    validate(&set.drains, water_amount_per_unit_of_length)
}

pub(crate) fn check_density(water_amount_per_unit_of_length: f64) -> Result<(), DrainError> {
    if !water_amount_per_unit_of_length.is_finite() {
        return Err(DrainError::NonFiniteDensity(water_amount_per_unit_of_length));
    }
    if water_amount_per_unit_of_length <= 0.0 {
        return Err(DrainError::InvalidDensity(water_amount_per_unit_of_length));
    }
    Ok(())
}

fn check_spans(drains: &[Drain]) -> Result<(), DrainError> {
    match drains.iter().position(|d| d.right_x <= d.left_x) {
        Some(index) => Err(DrainError::InvalidSpan {
            index,
            left_x: drains[index].left_x,
            right_x: drains[index].right_x,
        }),
        None => Ok(()),
    }
}

fn check_wall_width(drains: &[Drain]) -> Result<(), DrainError> {
    match Wall::enclosing(drains) {
        Some(wall) if wall.width > MAX_WALL_WIDTH => Err(DrainError::WallTooWide {
            width: wall.width,
            max: MAX_WALL_WIDTH,
        }),
        _ => Ok(()),
    }
}

/// Sweeps drains top to bottom and rejects the first overlap.
///
/// Drains are visited in [`drain::sweep_order`]. The occupancy buffer is
/// reset to fully free whenever the sweep moves to a strictly lower height
/// than the last claimed drain, so a drain only conflicts with drains
/// already claimed at its own height.
///
/// Expects every span to be non-degenerate.
pub fn overlap_sweep(drains: &[Drain]) -> Result<(), DrainError> {
    let (Some(wall), Some(min_height)) = (Wall::enclosing(drains), drain::min_height(drains))
    else {
        return Ok(());
    };

    let mut occupancy = OccupancyBuffer::with_len(wall.width);
    let mut previous_height = min_height;

    for id in drain::sweep_order(drains) {
        let d = &drains[id];
        if d.height < previous_height {
            occupancy.reset(wall.width);
        }

        let span = wall.span(d);
        match occupancy.claim(span.clone(), id) {
            Ok(()) => {
                debug!("drain {id} claims [{}, {}) at height {}", span.start, span.end, d.height);
                previous_height = d.height;
            }
            Err(other) => {
                return Err(DrainError::OverlapConflict { index: id, other });
            }
        }
    }

    Ok(())
}
