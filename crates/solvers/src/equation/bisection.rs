//! Bisection root finding on a bracketed interval.
//!
//! The solver requires the residual to change sign between the two ends of
//! the bracket. Each iteration evaluates the midpoint and keeps the half that
//! still contains the sign change. Convergence is judged on the bracket
//! width, not on the residual magnitude, because residuals in logph span
//! many orders of magnitude.

mod action;
mod bracket;
mod config;
mod error;
mod event;
mod solution;

pub use action::Action;
pub use bracket::{Bracket, BracketError, Sign};
pub use config::{Config, ConfigError};
pub use error::Error;
pub use event::Event;
pub use solution::{Solution, Status};

use log::trace;
use logph_core::{EquationProblem, Model, Observer};

use crate::equation::{Evaluation, evaluate};

use self::bracket::Bounds;

/// Finds a root of the equation using the bisection method.
/// Observers see each midpoint evaluation and the bracket it was taken from.
///
/// An endpoint with an exactly zero residual is returned immediately.
/// Otherwise the endpoints must have opposite signs.
///
/// # Errors
///
/// Returns an error if the bracket is invalid or does not contain a sign
/// change, if a residual is not finite, if the model or problem fails, or if
/// the bracket is still wider than the tolerance after `max_iters` midpoints.
pub fn solve<M, P, Obs>(
    model: &M,
    problem: &P,
    bracket: [f64; 2],
    config: &Config,
    mut observer: Obs,
) -> Result<Solution<M::Input, M::Output>, Error>
where
    M: Model,
    P: EquationProblem<Input = M::Input, Output = M::Output>,
    Obs: for<'a> Observer<Event<'a, M::Input, M::Output>, Action>,
{
    let bounds = Bounds::new(bracket)?;
    let [left, right] = bounds.as_array();

    let left_eval = finite(evaluate(model, problem, left)?)?;
    if is_root(&left_eval) {
        return Ok(Solution::from_eval(left_eval, Status::Converged, 0));
    }

    let right_eval = finite(evaluate(model, problem, right)?)?;
    if is_root(&right_eval) {
        return Ok(Solution::from_eval(right_eval, Status::Converged, 0));
    }

    let mut bracket = Bracket::new(
        bounds,
        Sign::of(left_eval.residual),
        Sign::of(right_eval.residual),
    )
    .ok_or(Error::NoSignChange {
        left,
        right,
        left_residual: left_eval.residual,
        right_residual: right_eval.residual,
    })?;

    for iter in 1..=config.max_iters() {
        let mid = bracket.midpoint();
        let mid_eval = evaluate(model, problem, mid)?;
        let [left, right] = bracket.as_array();
        // A midpoint equal to an end means the bracket spans adjacent floats.
        let converged = bracket.width() < config.x_abs_tol() || mid <= left || mid >= right;

        let event = Event {
            iter,
            bracket: bracket.as_array(),
            eval: &mid_eval,
        };
        if let Some(Action::StopEarly) = observer.observe(&event) {
            return Ok(Solution::from_eval(
                mid_eval,
                Status::StoppedByObserver,
                iter,
            ));
        }

        if converged {
            return Ok(Solution::from_eval(mid_eval, Status::Converged, iter));
        }

        let mid_eval = finite(mid_eval)?;
        if is_root(&mid_eval) {
            return Ok(Solution::from_eval(mid_eval, Status::Converged, iter));
        }

        trace!(
            "bisection iter {iter}: x = {mid}, residual = {:e}, width = {:e}",
            mid_eval.residual,
            bracket.width()
        );
        bracket.shrink(mid, Sign::of(mid_eval.residual));
    }

    let [left, right] = bracket.as_array();
    Err(Error::MaxIters {
        iters: config.max_iters(),
        left,
        right,
    })
}

/// Runs bisection without observation.
///
/// # Errors
///
/// See [`solve`].
pub fn solve_unobserved<M, P>(
    model: &M,
    problem: &P,
    bracket: [f64; 2],
    config: &Config,
) -> Result<Solution<M::Input, M::Output>, Error>
where
    M: Model,
    P: EquationProblem<Input = M::Input, Output = M::Output>,
{
    solve(model, problem, bracket, config, ())
}

/// Rejects evaluations with a NaN or infinite residual.
fn finite<I, O>(eval: Evaluation<I, O>) -> Result<Evaluation<I, O>, Error> {
    if eval.residual.is_finite() {
        Ok(eval)
    } else {
        Err(Error::NonFiniteResidual {
            x: eval.x,
            residual: eval.residual,
        })
    }
}

#[allow(clippy::float_cmp)]
fn is_root<I, O>(eval: &Evaluation<I, O>) -> bool {
    eval.residual == 0.0
}
