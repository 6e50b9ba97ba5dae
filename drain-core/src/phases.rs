//! Sweep phases that turn a validated drain layout into outflows.
//!
//! The typical pipeline looks like:
//! 1. [`crate::validation::validate`] - reject malformed or overlapping layouts.
//! 2. [`accumulation_phase`] - sweep drains top to bottom through a
//!    [`FlowBuffer`], collecting each drain's `drain_amount`.
//! 3. [`resolve_targets`] - find where each drain's outflow lands.
//!
//! [`solve`] runs all three. Every public entry point returns drains in
//! the caller's input order; the sweep order is internal.

use glam::Vec2;
use log::{debug, info, warn};

use crate::{
    drain::{self, Drain},
    error::DrainError,
    flow_buffer::FlowBuffer,
    types::DrainId,
    validation,
    wall::Wall,
};

/// Result of an accumulation sweep, with its water balance.
///
/// Water is conserved across the sweep:
/// `water_amount_per_unit_of_length * wall_width == lost + pending`.
#[derive(Clone, Debug, PartialEq)]
pub struct FlowReport {
    /// Drains in input order with `drain_amount` set.
    pub drains: Vec<Drain>,
    /// Water carried past the right boundary of the wall.
    pub lost: f64,
    /// Water left on the flow buffer after the last drain.
    pub pending: f64,
    /// Total rain seeded on the top edge.
    pub seeded: f64,
}

/// Collects each drain's outflow by sweeping through the flow buffer.
///
/// Drains are visited in `order`, which must be [`drain::sweep_order`]
/// for the result to be meaningful. For each drain:
///
/// 1. Sum the water pending over its span. This is rain from the top
///    edge plus any outflow of higher drains that landed inside the span.
/// 2. Clear the span and carry the sum to the position just past the
///    drain's right edge (see [`FlowBuffer::clear_and_carry`]).
///
/// ### Parameters
/// - `drains` - Validated drains, indexed by [`DrainId`].
/// - `order` - Sweep order over `drains`.
/// - `wall` - Wall enclosing `drains`, used to normalize spans.
/// - `flow` - Buffer seeded with the rain density; mutated in place.
///
/// ### Returns
/// Drain amounts indexed by [`DrainId`].
pub fn accumulation_phase(
    drains: &[Drain],
    order: &[DrainId],
    wall: &Wall,
    flow: &mut FlowBuffer,
) -> Vec<f64> {
    let mut amounts = vec![0.0; drains.len()];

    for &id in order {
        let span = wall.span(&drains[id]);
        let carry_index = span.end;
        let amount = flow.clear_and_carry(span, carry_index);
        debug!(
            "drain {id} at height {} collects {amount}",
            drains[id].height
        );
        amounts[id] = amount;
    }

    if flow.lost() > 0.0 {
        warn!(
            "{} units of water drained past the right edge of the wall",
            flow.lost()
        );
    }

    amounts
}

/// Runs the accumulation sweep and reports the water balance.
///
/// The input must already have passed [`validation::validate`]. An empty
/// slice yields an empty report.
pub fn compute_flow_report(drains: &[Drain], water_amount_per_unit_of_length: f64) -> FlowReport {
    let Some(wall) = Wall::enclosing(drains) else {
        return FlowReport {
            drains: Vec::new(),
            lost: 0.0,
            pending: 0.0,
            seeded: 0.0,
        };
    };

    let order = drain::sweep_order(drains);
    let mut flow = FlowBuffer::seeded(wall.width, water_amount_per_unit_of_length);
    let amounts = accumulation_phase(drains, &order, &wall, &mut flow);

    let drains = drains
        .iter()
        .zip(amounts)
        .map(|(d, drain_amount)| Drain { drain_amount, ..*d })
        .collect();

    FlowReport {
        drains,
        lost: flow.lost(),
        pending: flow.pending_total(),
        seeded: water_amount_per_unit_of_length * wall.width as f64,
    }
}

/// Returns `drains` in input order with `drain_amount` set.
///
/// The input must already have passed [`validation::validate`].
pub fn compute_drain_amounts(drains: &[Drain], water_amount_per_unit_of_length: f64) -> Vec<Drain> {
    compute_flow_report(drains, water_amount_per_unit_of_length).drains
}

/// Finds the drain (or the wall base) that intercepts each drain's outflow.
///
/// The stream leaves drain `i` just past its right edge. Scanning the
/// drains after `i` in sweep order, the first drain `j` with
/// `left_x[j] <= right_x[i] < right_x[j]` catches it, and `to_height[i]`
/// becomes `height[j]`. Without such a drain the stream reaches the wall
/// base, the lowest drain height.
///
/// This is a quadratic scan, fine for layouts of a few thousand drains.
///
/// ### Returns
/// `drains` in input order with `to_height` set.
pub fn resolve_targets(drains: &[Drain]) -> Vec<Drain> {
    let Some(base) = drain::min_height(drains) else {
        return Vec::new();
    };

    let order = drain::sweep_order(drains);
    let mut resolved = drains.to_vec();

    for (pos, &i) in order.iter().enumerate() {
        let stream_x = drains[i].right_x;
        let target = order[pos + 1..].iter().find(|&&j| {
            let below = &drains[j];
            below.left_x <= stream_x && stream_x < below.right_x
        });

        resolved[i].to_height = target.map_or(base, |&j| drains[j].height);
    }

    resolved
}

/// Removes points hidden underneath a drain.
///
/// A point is dropped when it lies within some drain's closed x-extent
/// `[left_x, right_x]` and at or below that drain's height; rain cannot
/// reach those positions.
pub fn cull_points(drains: &[Drain], points: &[Vec2]) -> Vec<Vec2> {
    points
        .iter()
        .copied()
        .filter(|p| !drains.iter().any(|d| shelters(d, *p)))
        .collect()
}

#[inline]
fn shelters(d: &Drain, p: Vec2) -> bool {
    p.x >= d.left_x as f32 && p.x <= d.right_x as f32 && p.y <= d.height as f32
}

/// Validates a layout, then computes amounts and landing heights.
///
/// ### Errors
/// Any [`DrainError`] from [`validation::validate`]; nothing is computed
/// for an invalid layout.
pub fn solve(
    drains: &[Drain],
    water_amount_per_unit_of_length: f64,
) -> Result<Vec<Drain>, DrainError> {
    validation::validate(drains, water_amount_per_unit_of_length)?;

    let report = compute_flow_report(drains, water_amount_per_unit_of_length);
    let solved = resolve_targets(&report.drains);

    info!(
        "solved {} drains: seeded {}, lost {}, pending {}",
        solved.len(),
        report.seeded,
        report.lost,
        report.pending
    );

    Ok(solved)
}
