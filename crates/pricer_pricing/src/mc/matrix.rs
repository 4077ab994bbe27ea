//! Simulated path storage.
//!
//! # Memory Layout
//!
//! Paths are stored in row-major order: `values[row * n_points + step]`
//! where `step = 0` contains the trajectory's initial price. One row is one
//! trajectory.

use pricer_core::types::{PricingError, PricingResult};

/// Immutable matrix of simulated trajectories.
///
/// # Examples
///
/// ```rust
/// use pricer_pricing::mc::PathMatrix;
///
/// let matrix = PathMatrix::from_rows(vec![
///     vec![100.0, 101.0, 102.0],
///     vec![100.0, 99.0, 98.5],
/// ])
/// .unwrap();
///
/// assert_eq!(matrix.n_trajectories(), 2);
/// assert_eq!(matrix.n_points(), 3);
/// assert_eq!(matrix.trajectory(1), &[100.0, 99.0, 98.5]);
/// assert_eq!(matrix.reference_price(), Some(100.0));
/// ```
#[derive(Clone, Debug, PartialEq)]
pub struct PathMatrix {
    values: Vec<f64>,
    n_trajectories: usize,
    n_points: usize,
}

impl PathMatrix {
    /// Wraps a row-major buffer of `n_trajectories × n_points` values.
    ///
    /// # Errors
    ///
    /// [`PricingError::InvalidParameter`] if the buffer length does not match
    /// the shape, if rows are non-empty but `n_points` is zero, or if any value
    /// is non-finite.
    pub fn from_row_major(
        values: Vec<f64>,
        n_trajectories: usize,
        n_points: usize,
    ) -> PricingResult<Self> {
        if n_trajectories > 0 && n_points == 0 {
            return Err(PricingError::invalid(
                "path_matrix",
                "trajectories must contain at least one time point",
            ));
        }
        if values.len() != n_trajectories * n_points {
            return Err(PricingError::invalid(
                "path_matrix",
                format!(
                    "buffer of {} values does not match shape {} × {}",
                    values.len(),
                    n_trajectories,
                    n_points
                ),
            ));
        }
        if let Some(pos) = values.iter().position(|v| !v.is_finite()) {
            return Err(PricingError::invalid(
                "path_matrix",
                format!(
                    "non-finite value {} in trajectory {} at step {}",
                    values[pos],
                    pos / n_points,
                    pos % n_points
                ),
            ));
        }
        Ok(Self {
            values,
            n_trajectories,
            n_points,
        })
    }

    /// Builds a matrix from one vector per trajectory.
    ///
    /// # Errors
    ///
    /// [`PricingError::InvalidParameter`] for ragged rows or non-finite values.
    pub fn from_rows(rows: Vec<Vec<f64>>) -> PricingResult<Self> {
        let n_trajectories = rows.len();
        let n_points = rows.first().map_or(0, Vec::len);
        if let Some(idx) = rows.iter().position(|r| r.len() != n_points) {
            return Err(PricingError::invalid(
                "path_matrix",
                format!(
                    "trajectory {} has {} points, expected {}",
                    idx,
                    rows[idx].len(),
                    n_points
                ),
            ));
        }
        let values = rows.into_iter().flatten().collect();
        Self::from_row_major(values, n_trajectories, n_points)
    }

    /// Matrix with no trajectories.
    pub fn empty(n_points: usize) -> Self {
        Self {
            values: Vec::new(),
            n_trajectories: 0,
            n_points,
        }
    }

    /// Number of trajectories (rows).
    #[inline]
    pub fn n_trajectories(&self) -> usize {
        self.n_trajectories
    }

    /// Number of time points per trajectory, `t = 0` included.
    #[inline]
    pub fn n_points(&self) -> usize {
        self.n_points
    }

    /// `true` when the matrix holds no trajectories.
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.n_trajectories == 0
    }

    /// Trajectory `row`.
    ///
    /// # Panics
    ///
    /// Panics if `row >= n_trajectories()`.
    #[inline]
    pub fn trajectory(&self, row: usize) -> &[f64] {
        let offset = row * self.n_points;
        &self.values[offset..offset + self.n_points]
    }

    /// Iterator over trajectories in row order.
    pub fn trajectories(&self) -> impl ExactSizeIterator<Item = &[f64]> + '_ {
        // chunks_exact panics on a zero chunk size
        let chunk = self.n_points.max(1);
        self.values.chunks_exact(chunk).take(self.n_trajectories)
    }

    /// Initial price of trajectory `row`.
    #[inline]
    pub fn initial_price(&self, row: usize) -> f64 {
        self.values[row * self.n_points]
    }

    /// Terminal price of trajectory `row`.
    #[inline]
    pub fn terminal_price(&self, row: usize) -> f64 {
        self.values[row * self.n_points + self.n_points - 1]
    }

    /// Initial price of the first trajectory, the batch-level strike anchor.
    #[inline]
    pub fn reference_price(&self) -> Option<f64> {
        if self.is_empty() {
            None
        } else {
            Some(self.values[0])
        }
    }

    /// Price of every trajectory at time `step`.
    pub fn column(&self, step: usize) -> Vec<f64> {
        self.trajectories().map(|path| path[step]).collect()
    }

    /// Row-major backing buffer.
    #[inline]
    pub fn as_slice(&self) -> &[f64] {
        &self.values
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_from_row_major_shape_mismatch() {
        let err = PathMatrix::from_row_major(vec![1.0; 5], 2, 3).unwrap_err();
        assert!(err.to_string().contains("does not match shape"));
    }

    #[test]
    fn test_ragged_rows_rejected() {
        let err = PathMatrix::from_rows(vec![vec![1.0, 2.0], vec![1.0]]).unwrap_err();
        assert!(err.to_string().contains("trajectory 1"));
    }

    #[test]
    fn test_non_finite_rejected() {
        let err = PathMatrix::from_rows(vec![vec![1.0, f64::NAN]]).unwrap_err();
        assert!(err.to_string().contains("step 1"));
    }

    #[test]
    fn test_accessors() {
        let matrix =
            PathMatrix::from_rows(vec![vec![10.0, 11.0, 12.0], vec![20.0, 19.0, 18.0]]).unwrap();
        assert_eq!(matrix.initial_price(1), 20.0);
        assert_eq!(matrix.terminal_price(0), 12.0);
        assert_eq!(matrix.column(1), vec![11.0, 19.0]);
        assert_eq!(matrix.trajectories().len(), 2);
        assert_eq!(matrix.as_slice().len(), 6);
    }

    #[test]
    fn test_empty_matrix() {
        let matrix = PathMatrix::empty(5);
        assert!(matrix.is_empty());
        assert_eq!(matrix.reference_price(), None);
        assert_eq!(matrix.trajectories().count(), 0);

        let from_rows = PathMatrix::from_rows(Vec::new()).unwrap();
        assert!(from_rows.is_empty());
    }
}
