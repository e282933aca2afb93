//! Generic linear program: `var_count` non-negative continuous variables,
//! one objective row and one row per constraint, in input order.

use super::{ensure_finite, ensure_len, optimal_values, Formulation, InterpretationError};
use super::FormulationError;
use crate::domain::{
    Constraint, ConstraintType, ObjectiveFunction, OptimizationProblem, OptimizationType,
    Solution, SolutionStatus, Variable,
};

#[derive(Debug, Clone, PartialEq)]
pub struct LinearConstraint {
    pub coefficients: Vec<f64>,
    pub relation: ConstraintType,
    pub rhs: f64,
}

#[derive(Debug, Clone, PartialEq)]
pub struct LinearProgram {
    sense: OptimizationType,
    objective: Vec<f64>,
    constraints: Vec<LinearConstraint>,
}

impl LinearProgram {
    pub fn new(
        sense: OptimizationType,
        var_count: usize,
        objective: Vec<f64>,
        constraints: Vec<LinearConstraint>,
    ) -> Result<Self, FormulationError> {
        if var_count == 0 {
            return Err(FormulationError::Empty {
                field: "var_count".to_string(),
            });
        }
        ensure_len("objective coefficients", &objective, var_count)?;
        ensure_finite("objective coefficients", &objective)?;

        for (k, constraint) in constraints.iter().enumerate() {
            let field = format!("constraint {} coefficients", k + 1);
            ensure_len(&field, &constraint.coefficients, var_count)?;
            ensure_finite(&field, &constraint.coefficients)?;
            ensure_finite(&format!("constraint {} rhs", k + 1), &[constraint.rhs])?;
        }

        Ok(Self {
            sense,
            objective,
            constraints,
        })
    }

    pub fn var_count(&self) -> usize {
        self.objective.len()
    }

    pub fn variable_name(index: usize) -> String {
        format!("x{}", index + 1)
    }

    pub fn constraint_name(index: usize) -> String {
        format!("Constraint_{}", index + 1)
    }
}

/// Per-constraint sensitivity and resource usage
#[derive(Debug, Clone, PartialEq)]
pub struct ConstraintAnalysis {
    pub name: String,
    pub slack: f64,
    /// Absent when the solver reported no duals
    pub shadow_price: Option<f64>,
    pub used: f64,
    pub available: f64,
}

#[derive(Debug, Clone, PartialEq)]
pub struct LinearReport {
    pub status: SolutionStatus,
    pub objective_value: Option<f64>,
    /// Variable values by name; `None` unless optimal
    pub variables: Vec<(String, Option<f64>)>,
    /// Empty unless optimal
    pub constraints: Vec<ConstraintAnalysis>,
}

impl Formulation for LinearProgram {
    type Report = LinearReport;

    fn formulate(&self) -> OptimizationProblem {
        let variables = (0..self.var_count())
            .map(|i| Variable::continuous(Self::variable_name(i)))
            .collect();

        let constraints = self.constraints.iter().enumerate().map(|(k, c)| {
            Constraint::from_dense(c.relation, &c.coefficients, c.rhs)
                .with_name(Self::constraint_name(k))
        });

        OptimizationProblem::new(ObjectiveFunction::new(self.sense, self.objective.clone()))
            .with_name("custom_linear_program")
            .with_variables(variables)
            .with_constraints(constraints)
    }

    fn interpret(&self, solution: &Solution) -> Result<LinearReport, InterpretationError> {
        if !solution.is_optimal() {
            return Ok(LinearReport {
                status: solution.status,
                objective_value: None,
                variables: (0..self.var_count())
                    .map(|i| (Self::variable_name(i), None))
                    .collect(),
                constraints: Vec::new(),
            });
        }

        let values = optimal_values(solution, self.var_count())?;

        let variables = values
            .iter()
            .enumerate()
            .map(|(i, &v)| (Self::variable_name(i), Some(v)))
            .collect();

        let constraints = self
            .constraints
            .iter()
            .enumerate()
            .map(|(k, c)| {
                let used: f64 = c.coefficients.iter().zip(values).map(|(a, x)| a * x).sum();
                ConstraintAnalysis {
                    name: Self::constraint_name(k),
                    slack: solution.slack(k).unwrap_or(c.rhs - used),
                    shadow_price: solution.dual(k),
                    used,
                    available: c.rhs,
                }
            })
            .collect();

        Ok(LinearReport {
            status: solution.status,
            objective_value: solution.optimal_value,
            variables,
            constraints,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::formulation::test_support::{assert_close, non_optimal, optimal_at};

    fn production_plan() -> LinearProgram {
        // maximize 3x1 + 2x2 s.t. x1 + x2 <= 4, x1 <= 2
        LinearProgram::new(
            OptimizationType::Maximize,
            2,
            vec![3.0, 2.0],
            vec![
                LinearConstraint {
                    coefficients: vec![1.0, 1.0],
                    relation: ConstraintType::LessThanOrEqual,
                    rhs: 4.0,
                },
                LinearConstraint {
                    coefficients: vec![1.0, 0.0],
                    relation: ConstraintType::LessThanOrEqual,
                    rhs: 2.0,
                },
            ],
        )
        .unwrap()
    }

    #[test]
    fn formulates_one_row_per_constraint_in_order() {
        let problem = production_plan().formulate();

        assert_eq!(problem.objective.optimization_type, OptimizationType::Maximize);
        let names: Vec<_> = problem.variables.iter().map(|v| v.name.as_str()).collect();
        assert_eq!(names, ["x1", "x2"]);
        assert!(problem.variables.iter().all(|v| v.lower_bound == 0.0 && !v.is_integer()));
        assert_eq!(problem.constraints[0].name, "Constraint_1");
        assert_eq!(problem.constraints[1].terms, vec![(0, 1.0)]);
        assert_eq!(problem.constraints[1].bound, 2.0);
    }

    #[test]
    fn rejects_coefficient_count_mismatch() {
        let err = LinearProgram::new(
            OptimizationType::Minimize,
            2,
            vec![1.0, 1.0],
            vec![LinearConstraint {
                coefficients: vec![1.0, 1.0, 1.0],
                relation: ConstraintType::GreaterThanOrEqual,
                rhs: 1.0,
            }],
        )
        .unwrap_err();

        assert_eq!(
            err,
            FormulationError::LengthMismatch {
                field: "constraint 1 coefficients".into(),
                expected: 2,
                found: 3
            }
        );
    }

    #[test]
    fn rejects_zero_variables() {
        assert!(LinearProgram::new(OptimizationType::Minimize, 0, vec![], vec![]).is_err());
    }

    #[test]
    fn usage_is_dot_product_with_solution() {
        let program = production_plan();
        let problem = program.formulate();
        let solution = optimal_at(&problem, vec![2.0, 2.0]).with_duals(vec![2.0, 1.0]);

        let report = program.interpret(&solution).unwrap();

        assert_eq!(report.objective_value, Some(10.0));
        assert_eq!(report.variables[0], ("x1".to_string(), Some(2.0)));
        let first = &report.constraints[0];
        assert_close(first.used, 4.0);
        assert_close(first.slack, 0.0);
        assert_eq!(first.available, 4.0);
        assert_eq!(first.shadow_price, Some(2.0));
        assert_close(report.constraints[1].used, 2.0);
    }

    #[test]
    fn missing_duals_are_reported_as_absent() {
        let program = production_plan();
        let problem = program.formulate();
        let report = program.interpret(&optimal_at(&problem, vec![1.0, 1.0])).unwrap();

        assert_eq!(report.constraints[0].shadow_price, None);
        assert_close(report.constraints[0].slack, 2.0);
    }

    #[test]
    fn non_optimal_status_omits_numbers() {
        let report = production_plan()
            .interpret(&non_optimal(SolutionStatus::Infeasible))
            .unwrap();

        assert_eq!(report.status, SolutionStatus::Infeasible);
        assert_eq!(report.objective_value, None);
        assert_eq!(report.variables[1], ("x2".to_string(), None));
        assert!(report.constraints.is_empty());
    }

    #[test]
    fn short_value_vector_is_a_fault() {
        let err = production_plan()
            .interpret(&Solution::optimal(0.0, vec![1.0]))
            .unwrap_err();
        assert_eq!(
            err,
            InterpretationError::MissingValues {
                expected: 2,
                found: 1
            }
        );
    }
}
