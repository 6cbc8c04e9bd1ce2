//! Numerical solvers for logph.
//!
//! - [`equation`]: root finding for [`EquationProblem`]s
//!
//! [`EquationProblem`]: logph_core::EquationProblem

pub mod equation;
