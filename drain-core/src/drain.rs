use crate::{
    error::{Column, DrainError},
    types::{Coord, DrainId},
};

/// A horizontal rain drain mounted on the wall.
///
/// `height`, `left_x` and `right_x` describe the segment; the drain
/// covers the half-open interval `[left_x, right_x)`. `drain_amount` and
/// `to_height` are derived by [`crate::phases`] and start out as `0.0`
/// and `height` respectively.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Drain {
    pub height: Coord,
    pub left_x: Coord,
    pub right_x: Coord,
    pub drain_amount: f64,
    pub to_height: Coord,
}

impl Drain {
    pub fn new(height: Coord, left_x: Coord, right_x: Coord) -> Self {
        Self {
            height,
            left_x,
            right_x,
            drain_amount: 0.0,
            to_height: height,
        }
    }

    #[inline]
    pub fn width(&self) -> Coord {
        self.right_x - self.left_x
    }
}

/// An ordered collection of drains, indexed by [`DrainId`].
#[derive(Clone, Debug, Default, PartialEq)]
pub struct DrainSet {
    pub drains: Vec<Drain>,
}

impl DrainSet {
    pub fn from_drains(drains: Vec<Drain>) -> Self {
        Self { drains }
    }

    /// Builds a set from three parallel integer columns.
    ///
    /// Only the shape of the input is checked here: `n` must be positive
    /// and every column must hold exactly `n` values. Span and overlap
    /// checks belong to [`crate::validation::validate`].
    ///
    /// ### Errors
    /// - [`DrainError::EmptyLayout`] if `n == 0`.
    /// - [`DrainError::InvalidCount`] naming the first column whose length
    ///   differs from `n`.
    pub fn from_columns(
        n: usize,
        height: &[Coord],
        left_x: &[Coord],
        right_x: &[Coord],
    ) -> Result<Self, DrainError> {
        check_column_lengths(n, height.len(), left_x.len(), right_x.len())?;

        let drains = height
            .iter()
            .zip(left_x)
            .zip(right_x)
            .map(|((&h, &l), &r)| Drain::new(h, l, r))
            .collect();

        Ok(Self { drains })
    }

    /// Builds a set from floating-point columns, e.g. UI drag values.
    ///
    /// Every value must be a finite integer that fits a [`Coord`].
    ///
    /// ### Errors
    /// Same as [`DrainSet::from_columns`], plus [`DrainError::InvalidType`]
    /// for the first non-integral value, scanning drain by drain.
    pub fn from_f64_columns(
        n: usize,
        height: &[f64],
        left_x: &[f64],
        right_x: &[f64],
    ) -> Result<Self, DrainError> {
        check_column_lengths(n, height.len(), left_x.len(), right_x.len())?;

        let mut drains = Vec::with_capacity(n);
        for index in 0..n {
            let h = integral(Column::Height, index, height[index])?;
            let l = integral(Column::LeftX, index, left_x[index])?;
            let r = integral(Column::RightX, index, right_x[index])?;
            drains.push(Drain::new(h, l, r));
        }

        Ok(Self { drains })
    }

    /// The fixed 22-drain layout used by the viewer's "Demo" button.
    pub fn demo() -> Self {
        const HEIGHT: [Coord; 22] = [
            18, 90, 86, 17, 12, 81, 33, 77, 57, 89, 33, 60, 18, 6, 68, 23, 65, 62, 72, 5, 91, 86,
        ];
        const LEFT_X: [Coord; 22] = [
            28, 9, 63, 37, 15, 76, 36, 12, 53, 53, 48, 57, 23, 11, 13, 52, 25, 18, 30, 21, 5, 12,
        ];
        const RIGHT_X: [Coord; 22] = [
            46, 18, 76, 39, 32, 89, 47, 44, 67, 57, 54, 58, 27, 24, 31, 70, 38, 31, 43, 36, 18, 62,
        ];

        let drains = (0..HEIGHT.len())
            .map(|i| Drain::new(HEIGHT[i], LEFT_X[i], RIGHT_X[i]))
            .collect();
        Self { drains }
    }

    pub fn len(&self) -> usize {
        self.drains.len()
    }

    pub fn is_empty(&self) -> bool {
        self.drains.is_empty()
    }

    /// Lowest drain height, i.e. the wall base streams fall onto.
    pub fn min_height(&self) -> Option<Coord> {
        min_height(&self.drains)
    }
}

pub(crate) fn min_height(drains: &[Drain]) -> Option<Coord> {
    drains.iter().map(|d| d.height).min()
}

/// Returns drain ids in sweep order: `height` descending, then `left_x`
/// ascending.
///
/// The sort is stable, so drains with identical keys keep their input
/// order.
pub fn sweep_order(drains: &[Drain]) -> Vec<DrainId> {
    let mut order: Vec<DrainId> = (0..drains.len()).collect();
    order.sort_by(|&a, &b| {
        let (da, db) = (&drains[a], &drains[b]);
        db.height.cmp(&da.height).then(da.left_x.cmp(&db.left_x))
    });
    order
}

pub(crate) fn check_column_lengths(
    n: usize,
    height: usize,
    left_x: usize,
    right_x: usize,
) -> Result<(), DrainError> {
    if n == 0 {
        return Err(DrainError::EmptyLayout);
    }
    for (column, found) in [
        (Column::Height, height),
        (Column::LeftX, left_x),
        (Column::RightX, right_x),
    ] {
        if found != n {
            return Err(DrainError::InvalidCount {
                column,
                found,
                expected: n,
            });
        }
    }
    Ok(())
}

fn integral(column: Column, index: DrainId, value: f64) -> Result<Coord, DrainError> {
    let fits = value.is_finite()
        && value.fract() == 0.0
        && value >= Coord::MIN as f64
        && value <= Coord::MAX as f64;
    if fits {
        Ok(value as Coord)
    } else {
        Err(DrainError::InvalidType {
            column,
            index,
            value,
        })
    }
}
