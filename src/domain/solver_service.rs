// Domain service interface for solving optimization problems
// Defines the contract that any solver implementation must follow (Dependency Inversion Principle)

use std::collections::HashSet;

use super::models::{OptimizationProblem, Solution};

/// Error types for the solver service
#[derive(Debug, thiserror::Error)]
pub enum SolverError {
    #[error("Invalid problem: {0}")]
    InvalidProblem(String),

    #[error("Solver not available: {0}")]
    SolverNotAvailable(String),

    #[error("Solver execution failed: {0}")]
    ExecutionFailed(String),
}

pub type Result<T> = std::result::Result<T, SolverError>;

/// Domain service interface for optimization solvers
///
/// This trait defines the contract that all solver implementations must follow.
/// It allows us to swap solver backends without changing business logic (Open/Closed Principle).
/// Non-optimal outcomes (infeasible, unbounded, undefined) are reported through
/// [`Solution::status`]; `Err` is reserved for problems the solver could not process.
pub trait SolverService: Send + Sync {
    /// Solve an optimization problem
    fn solve(&self, problem: &OptimizationProblem) -> Result<Solution>;

    /// Validate a problem without solving it
    fn validate(&self, problem: &OptimizationProblem) -> Result<()> {
        let mut errors = Vec::new();

        // Check objective has coefficients
        if problem.objective.coefficients.is_empty() {
            errors.push("Objective must have at least one coefficient".to_string());
        }

        let num_vars = problem.num_variables();

        // Check variables match objective
        if problem.variables.len() != num_vars {
            errors.push(format!(
                "Number of variables ({}) doesn't match objective coefficients ({})",
                problem.variables.len(),
                num_vars
            ));
        }

        let mut names = HashSet::new();
        for var in &problem.variables {
            if !names.insert(var.name.as_str()) {
                errors.push(format!("Variable name '{}' is not unique", var.name));
            }
        }

        // Check constraints
        let mut constraint_names = HashSet::new();
        for (i, constraint) in problem.constraints.iter().enumerate() {
            let mut seen = HashSet::with_capacity(constraint.terms.len());
            for &(index, _) in &constraint.terms {
                if index >= num_vars {
                    errors.push(format!(
                        "Constraint {} references variable {} but problem has {} variables",
                        i, index, num_vars
                    ));
                } else if !seen.insert(index) {
                    errors.push(format!(
                        "Constraint {} lists variable {} more than once",
                        i, index
                    ));
                }
            }
            if !constraint.name.is_empty() && !constraint_names.insert(constraint.name.as_str()) {
                errors.push(format!("Constraint name '{}' is not unique", constraint.name));
            }
        }

        // Check variable bounds
        for (i, var) in problem.variables.iter().enumerate() {
            if let Some(upper) = var.upper_bound {
                if var.lower_bound > upper {
                    errors.push(format!(
                        "Variable {} '{}' has lower bound ({}) > upper bound ({})",
                        i, var.name, var.lower_bound, upper
                    ));
                }
            }
        }

        if errors.is_empty() {
            Ok(())
        } else {
            Err(SolverError::InvalidProblem(errors.join("; ")))
        }
    }

    /// Get the name of this solver backend
    fn name(&self) -> &str;

    /// Check if this solver supports mixed-integer programming
    fn supports_mip(&self) -> bool;

    /// Check if this solver reports row dual values for continuous models
    fn supports_duals(&self) -> bool {
        false
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::{
        Constraint, ConstraintType, ObjectiveFunction, OptimizationType, SolutionStatus, Variable,
    };

    struct NullSolver;

    impl SolverService for NullSolver {
        fn solve(&self, _problem: &OptimizationProblem) -> Result<Solution> {
            Ok(Solution::new(SolutionStatus::Undefined, "not solved"))
        }

        fn name(&self) -> &str {
            "null"
        }

        fn supports_mip(&self) -> bool {
            false
        }
    }

    fn two_var_problem() -> OptimizationProblem {
        OptimizationProblem::new(ObjectiveFunction::new(
            OptimizationType::Maximize,
            vec![3.0, 2.0],
        ))
        .with_variables(vec![Variable::continuous("x1"), Variable::continuous("x2")])
    }

    #[test]
    fn accepts_well_formed_problem() {
        let problem = two_var_problem().add_constraint(
            Constraint::new(ConstraintType::LessThanOrEqual, vec![(0, 1.0), (1, 1.0)], 4.0)
                .with_name("c1"),
        );
        assert!(NullSolver.validate(&problem).is_ok());
    }

    #[test]
    fn rejects_out_of_range_variable() {
        let problem = two_var_problem().add_constraint(Constraint::new(
            ConstraintType::LessThanOrEqual,
            vec![(2, 1.0)],
            4.0,
        ));
        let err = NullSolver.validate(&problem).unwrap_err();
        assert!(err.to_string().contains("Constraint 0 references variable 2"));
    }

    #[test]
    fn rejects_repeated_term() {
        let problem = two_var_problem().add_constraint(Constraint::new(
            ConstraintType::Equal,
            vec![(0, 1.0), (0, 2.0)],
            1.0,
        ));
        let err = NullSolver.validate(&problem).unwrap_err();
        assert!(err.to_string().contains("lists variable 0 more than once"));
    }

    #[test]
    fn rejects_duplicate_names() {
        let problem = OptimizationProblem::new(ObjectiveFunction::new(
            OptimizationType::Minimize,
            vec![1.0, 1.0],
        ))
        .with_variables(vec![Variable::continuous("x"), Variable::continuous("x")]);
        let err = NullSolver.validate(&problem).unwrap_err();
        assert!(err.to_string().contains("'x' is not unique"));
    }

    #[test]
    fn rejects_inverted_bounds() {
        let problem = OptimizationProblem::new(ObjectiveFunction::new(
            OptimizationType::Minimize,
            vec![1.0],
        ))
        .with_variables(vec![Variable::continuous("x").with_bounds(5.0, Some(1.0))]);
        assert!(matches!(
            NullSolver.validate(&problem),
            Err(SolverError::InvalidProblem(_))
        ));
    }
}
