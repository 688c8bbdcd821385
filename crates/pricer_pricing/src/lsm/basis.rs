//! Regression basis and least-squares normal equations for continuation values.

use nalgebra::{DMatrix, DVector};
use pricer_core::types::PricingError;
use serde::{Deserialize, Serialize};

/// Highest supported polynomial degree.
pub const MAX_DEGREE: usize = 3;

/// Basis functions used to fit the continuation value at an exercise date.
///
/// Polynomials are evaluated in moneyness `x = F_t / K` so the normal
/// equations stay well scaled regardless of the price level.
///
/// # Examples
/// ```
/// use pricer_pricing::lsm::RegressionBasis;
///
/// let basis = RegressionBasis::default();
/// assert_eq!(basis.dim(), 3);
///
/// let mut row = [0.0; 3];
/// basis.evaluate(1.5, &mut row);
/// assert_eq!(row, [1.0, 1.5, 2.25]);
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "lowercase")]
pub enum RegressionBasis {
    /// Monomials `1, x, ..., x^degree`.
    Polynomial {
        /// Highest power (1..=3)
        degree: usize,
    },
}

impl Default for RegressionBasis {
    fn default() -> Self {
        RegressionBasis::Polynomial { degree: 2 }
    }
}

impl RegressionBasis {
    /// Validated polynomial basis.
    ///
    /// # Errors
    /// `PricingError::Config` unless `1 <= degree <= 3`.
    pub fn polynomial(degree: usize) -> Result<Self, PricingError> {
        let basis = RegressionBasis::Polynomial { degree };
        basis.validate()?;
        Ok(basis)
    }

    /// Checks the basis parameters.
    pub fn validate(&self) -> Result<(), PricingError> {
        match *self {
            RegressionBasis::Polynomial { degree } if (1..=MAX_DEGREE).contains(&degree) => Ok(()),
            RegressionBasis::Polynomial { degree } => Err(PricingError::Config(format!(
                "polynomial degree {} outside 1..={}",
                degree, MAX_DEGREE
            ))),
        }
    }

    /// Number of basis functions (regression degrees of freedom).
    #[inline]
    pub fn dim(&self) -> usize {
        match *self {
            RegressionBasis::Polynomial { degree } => degree + 1,
        }
    }

    /// Writes the basis values at `x` into `out[..dim]`.
    #[inline]
    pub fn evaluate(&self, x: f64, out: &mut [f64]) {
        let mut power = 1.0;
        for value in out.iter_mut().take(self.dim()) {
            *value = power;
            power *= x;
        }
    }

    /// Fitted value `Σ βᵢ·xⁱ` by Horner's rule.
    #[inline]
    pub fn fitted(&self, coefficients: &[f64], x: f64) -> f64 {
        coefficients
            .iter()
            .take(self.dim())
            .rev()
            .fold(0.0, |acc, &beta| acc * x + beta)
    }
}

/// Accumulated `XᵀX`, `Xᵀy` and response totals for one exercise date.
///
/// Partial sums from independent path blocks are combined with
/// [`merge`](Self::merge) in block order, so the fitted coefficients do not
/// depend on how blocks were scheduled across threads.
#[derive(Debug, Clone, PartialEq)]
pub struct NormalEquations {
    dim: usize,
    xtx: Vec<f64>,
    xty: Vec<f64>,
    sum_y: f64,
    count: usize,
}

impl NormalEquations {
    /// Empty system for `dim` basis functions.
    pub fn new(dim: usize) -> Self {
        Self {
            dim,
            xtx: vec![0.0; dim * dim],
            xty: vec![0.0; dim],
            sum_y: 0.0,
            count: 0,
        }
    }

    /// Adds one observation with basis row `row` and response `y`.
    #[inline]
    pub fn add(&mut self, row: &[f64], y: f64) {
        for i in 0..self.dim {
            self.xty[i] += row[i] * y;
            for j in 0..self.dim {
                self.xtx[i * self.dim + j] += row[i] * row[j];
            }
        }
        self.sum_y += y;
        self.count += 1;
    }

    /// Adds another block's sums.
    pub fn merge(mut self, other: &NormalEquations) -> Self {
        for (a, b) in self.xtx.iter_mut().zip(&other.xtx) {
            *a += b;
        }
        for (a, b) in self.xty.iter_mut().zip(&other.xty) {
            *a += b;
        }
        self.sum_y += other.sum_y;
        self.count += other.count;
        self
    }

    /// Number of observations.
    #[inline]
    pub fn count(&self) -> usize {
        self.count
    }

    /// Mean response, `None` without observations.
    #[inline]
    pub fn mean_response(&self) -> Option<f64> {
        (self.count > 0).then(|| self.sum_y / self.count as f64)
    }

    /// Solves `XᵀX β = Xᵀy` by LU decomposition.
    ///
    /// Returns `None` when there are fewer observations than unknowns, the
    /// system is singular, or the solution is not finite.
    pub fn solve(&self) -> Option<Vec<f64>> {
        if self.count < self.dim {
            return None;
        }
        let xtx = DMatrix::from_row_slice(self.dim, self.dim, &self.xtx);
        let xty = DVector::from_column_slice(&self.xty);
        let beta = xtx.lu().solve(&xty)?;
        beta.iter()
            .all(|b| b.is_finite())
            .then(|| beta.iter().copied().collect())
    }
}
