use crate::regression::error::{Error, Result};

#[derive(Debug, Copy, Clone, PartialEq)]
pub struct Point {
    pub x: f64,
    pub y: f64,
}

/// Validated training set: non-empty, with finite coordinates only.
#[derive(Debug, Clone)]
pub struct Dataset {
    points: Vec<Point>,
}

impl Dataset {
    pub fn new(x_values: &[f64], y_values: &[f64]) -> Result<Self> {
        if x_values.len() != y_values.len() {
            return Err(Error::invalid_input(format!(
                "X and Y must have the same length, got {} and {}",
                x_values.len(),
                y_values.len(),
            )));
        }
        if x_values.is_empty() {
            return Err(Error::invalid_input("X and Y cannot be empty"));
        }
        let points = x_values
            .iter()
            .zip(y_values)
            .enumerate()
            .map(|(i, (&x, &y))| match x.is_finite() && y.is_finite() {
                true => Ok(Point { x, y }),
                false => Err(Error::invalid_input(format!("point #{i} ({x}, {y}) is not finite"))),
            })
            .collect::<Result<_>>()?;
        Ok(Self { points })
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.points.len()
    }

    #[must_use]
    pub fn points(&self) -> &[Point] {
        &self.points
    }

    /// Endless sequence of mini-batches.
    ///
    /// The points are split into consecutive chunks of `batch_size`, the last one may be shorter.
    /// The chunks are then repeated in the same order. A `batch_size` not less than the dataset
    /// length yields the entire dataset on every step.
    pub fn batches(&self, batch_size: usize) -> impl Iterator<Item = &[Point]> {
        debug_assert!(batch_size != 0);
        self.points.chunks(batch_size).cycle()
    }
}
