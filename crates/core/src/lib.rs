//! Core traits shared by the logph crates.
//!
//! This crate defines the abstractions that the solvers and the acid-base
//! model build on:
//!
//! - [`Model`]: a callable that maps a typed input to a typed output
//! - [`Snapshot`]: a captured input/output pair from a model call
//! - [`Observer`]: receives solver events and optionally returns control actions
//! - [`EquationProblem`]: adapts the scalar solver variable to a model input
//!   and computes a residual from the model output
//!
//! Every problem in logph has a single free variable (the pH), so the
//! problem traits work with a plain `f64` rather than a vector of unknowns.

mod model;
mod observer;
mod problem;

pub use model::{Model, Snapshot};
pub use observer::Observer;
pub use problem::EquationProblem;
