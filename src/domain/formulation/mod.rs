//! Problem formulators and result interpreters.
//!
//! Each problem family is a validated, typed input that knows how to turn
//! itself into an [`OptimizationProblem`] and how to read a [`Solution`] of
//! that problem back into domain terms. Inputs are checked once, in their
//! constructors, so formulation itself cannot fail.

pub mod assignment;
pub mod graphical;
pub mod linear;
pub mod transportation;

pub use assignment::{Assignment, AssignmentProblem, AssignmentReport, WorkerEfficiency};
pub use graphical::{GraphicalProblem, GraphicalReport};
pub use linear::{ConstraintAnalysis, LinearConstraint, LinearProgram, LinearReport};
pub use transportation::{
    Allocation, DemandSatisfaction, SupplyUsage, TransportationProblem, TransportationReport,
};

use super::models::{OptimizationProblem, Solution};

/// Values at or below this are treated as zero when reading solver output
pub(crate) const EPSILON: f64 = 1e-9;

/// Input shape errors, raised before the solver is ever invoked
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum FormulationError {
    #[error("{field} must not be empty")]
    Empty { field: String },

    #[error("{field} has {found} entries, expected {expected}")]
    LengthMismatch {
        field: String,
        expected: usize,
        found: usize,
    },

    #[error("{field} must be finite, got {value}")]
    NonFinite { field: String, value: f64 },

    #[error("{field} must be non-negative, got {value}")]
    Negative { field: String, value: f64 },
}

/// Post-solve invariant violations
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum InterpretationError {
    #[error("solver returned {found} variable values for a model with {expected} variables")]
    MissingValues { expected: usize, found: usize },

    #[error("{label} is assigned {count} times, expected exactly once")]
    AssignmentCount { label: String, count: usize },
}

/// A problem family that can be formulated as a canonical model and whose
/// solutions can be interpreted back into a domain report.
pub trait Formulation {
    type Report;

    /// Build the canonical model for this input
    fn formulate(&self) -> OptimizationProblem;

    /// Translate a solution of [`Formulation::formulate`]'s model into a report
    fn interpret(&self, solution: &Solution) -> Result<Self::Report, InterpretationError>;
}

/// `part / whole` as a percentage; zero when there is nothing to divide by
pub fn percentage(part: f64, whole: f64) -> f64 {
    if whole > 0.0 {
        part / whole * 100.0
    } else {
        0.0
    }
}

pub(crate) fn ensure_non_empty<T>(field: &str, items: &[T]) -> Result<(), FormulationError> {
    if items.is_empty() {
        return Err(FormulationError::Empty {
            field: field.to_string(),
        });
    }
    Ok(())
}

pub(crate) fn ensure_len<T>(field: &str, items: &[T], expected: usize) -> Result<(), FormulationError> {
    if items.len() != expected {
        return Err(FormulationError::LengthMismatch {
            field: field.to_string(),
            expected,
            found: items.len(),
        });
    }
    Ok(())
}

pub(crate) fn ensure_finite(field: &str, values: &[f64]) -> Result<(), FormulationError> {
    match values.iter().find(|v| !v.is_finite()) {
        Some(&value) => Err(FormulationError::NonFinite {
            field: field.to_string(),
            value,
        }),
        None => Ok(()),
    }
}

pub(crate) fn ensure_non_negative(field: &str, values: &[f64]) -> Result<(), FormulationError> {
    ensure_finite(field, values)?;
    match values.iter().find(|v| **v < 0.0) {
        Some(&value) => Err(FormulationError::Negative {
            field: field.to_string(),
            value,
        }),
        None => Ok(()),
    }
}

/// Variable values of an optimal solution, checked against the model size
pub(crate) fn optimal_values(
    solution: &Solution,
    expected: usize,
) -> Result<&[f64], InterpretationError> {
    if solution.variable_values.len() != expected {
        return Err(InterpretationError::MissingValues {
            expected,
            found: solution.variable_values.len(),
        });
    }
    Ok(&solution.variable_values)
}
