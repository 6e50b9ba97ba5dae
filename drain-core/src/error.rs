use std::fmt;

use thiserror::Error;

use crate::types::{Coord, DrainId};

/// One of the three parallel input columns describing a drain layout.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Column {
    Height,
    LeftX,
    RightX,
}

impl fmt::Display for Column {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Column::Height => "height",
            Column::LeftX => "left_x",
            Column::RightX => "right_x",
        };
        f.write_str(name)
    }
}

/// Errors raised while building, validating or generating a drain layout.
///
/// All of them are terminal for the computation that raised them.
#[derive(Debug, Error, PartialEq)]
pub enum DrainError {
    #[error("the drain count must be a positive integer")]
    EmptyLayout,
    #[error("the {column} input column has {found} elements instead of {expected}")]
    InvalidCount {
        column: Column,
        found: usize,
        expected: usize,
    },
    #[error(
        "the {column} input column has the non-integer value {value} at location {index}"
    )]
    InvalidType {
        column: Column,
        index: DrainId,
        value: f64,
    },
    #[error("the water amount per unit of length must be a finite float, got {0}")]
    NonFiniteDensity(f64),
    #[error("the water amount per unit of length must be positive, got {0}")]
    InvalidDensity(f64),
    #[error(
        "the drain at location {index} has right_x {right_x} not greater than left_x {left_x}"
    )]
    InvalidSpan {
        index: DrainId,
        left_x: Coord,
        right_x: Coord,
    },
    #[error("the wall is {width} units wide, more than the supported {max}")]
    WallTooWide { width: usize, max: usize },
    #[error("the drain at location {index} overlaps the drain at location {other}")]
    OverlapConflict { index: DrainId, other: DrainId },
    #[error("invalid generator configuration: {0}")]
    InvalidGenerator(&'static str),
    #[error("too many drains to fit in the wall: requested {requested}, placed {placed}")]
    CapacityExceeded { requested: usize, placed: usize },
}
