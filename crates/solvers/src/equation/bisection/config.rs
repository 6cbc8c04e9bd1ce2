use thiserror::Error;

/// Configuration for the bisection solver.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Config {
    max_iters: usize,
    x_abs_tol: f64,
}

/// Errors that can occur when validating a bisection solver config.
#[derive(Debug, Error, Clone, Copy, PartialEq, Eq)]
pub enum ConfigError {
    #[error("x_abs_tol must be finite and positive")]
    XAbs,

    #[error("max_iters must be at least 1")]
    MaxIters,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            max_iters: 200,
            x_abs_tol: 1e-6,
        }
    }
}

impl Config {
    /// Creates a new validated config.
    ///
    /// The solver converges once the bracket is narrower than `x_abs_tol`,
    /// so the tolerance must be strictly positive.
    ///
    /// # Errors
    ///
    /// Returns an error if `max_iters` is zero or if the tolerance is
    /// non-positive or non-finite.
    pub fn new(max_iters: usize, x_abs_tol: f64) -> Result<Self, ConfigError> {
        if max_iters == 0 {
            return Err(ConfigError::MaxIters);
        }
        if !x_abs_tol.is_finite() || x_abs_tol <= 0.0 {
            return Err(ConfigError::XAbs);
        }

        Ok(Self {
            max_iters,
            x_abs_tol,
        })
    }

    /// Returns the maximum number of midpoint evaluations.
    #[must_use]
    pub fn max_iters(&self) -> usize {
        self.max_iters
    }

    /// Returns the absolute tolerance on the bracket width.
    #[must_use]
    pub fn x_abs_tol(&self) -> f64 {
        self.x_abs_tol
    }
}
