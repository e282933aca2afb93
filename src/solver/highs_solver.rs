// HiGHS Solver Adapter
// Implements the SolverService interface for HiGHS
// This is an adapter pattern - translates our domain models to HiGHS API

use crate::domain::{
    models::{OptimizationProblem, Solution as DomainSolution, SolverStatistics},
    solver_service::{Result, SolverError, SolverService},
    value_objects::{
        ConstraintType, OptimizationType, SolutionStatus as DomainSolutionStatus, VariableType,
    },
};
use highs::{HighsModelStatus, RowProblem, Sense, SolvedModel};
use std::time::Instant;
use tracing::debug;

#[derive(Debug, Clone, Default)]
pub struct HighsSolver {
    verbose: bool,
}

impl HighsSolver {
    pub fn new() -> Self {
        Self::default()
    }

    /// Let HiGHS print its own progress log to stdout
    pub fn with_verbose(mut self, verbose: bool) -> Self {
        self.verbose = verbose;
        self
    }
}

impl HighsSolver {
    fn build(problem: &OptimizationProblem) -> RowProblem {
        // Use HiGHS RowProblem (add variables first, then constraints)
        let mut pb = RowProblem::default();
        let mut vars = Vec::with_capacity(problem.variables.len());

        for (var_def, &obj_coeff) in problem
            .variables
            .iter()
            .zip(&problem.objective.coefficients)
        {
            let lower = var_def.lower_bound;
            let upper = var_def.upper_bound.unwrap_or(f64::INFINITY);

            let col = match var_def.variable_type {
                VariableType::Binary => pb.add_integer_column(obj_coeff, lower..=upper),
                VariableType::Continuous => pb.add_column(obj_coeff, lower..=upper),
            };
            vars.push(col);
        }

        for constraint in &problem.constraints {
            let terms: Vec<_> = constraint
                .terms
                .iter()
                .filter(|(_, coeff)| *coeff != 0.0)
                .map(|&(index, coeff)| (vars[index], coeff))
                .collect();

            match constraint.constraint_type {
                ConstraintType::LessThanOrEqual => {
                    pb.add_row(..=constraint.bound, &terms);
                }
                ConstraintType::Equal => {
                    pb.add_row(constraint.bound..=constraint.bound, &terms);
                }
                ConstraintType::GreaterThanOrEqual => {
                    pb.add_row(constraint.bound.., &terms);
                }
            }
        }

        pb
    }

    fn run(&self, problem: &OptimizationProblem, presolve: bool) -> Result<SolvedModel> {
        let sense = if problem.objective.optimization_type == OptimizationType::Maximize {
            Sense::Maximise
        } else {
            Sense::Minimise
        };

        let mut model = Self::build(problem).optimise(sense);
        model.set_option("output_flag", self.verbose);
        if !presolve {
            model.set_option("presolve", "off");
        }

        model.try_solve().map_err(|status| {
            SolverError::ExecutionFailed(format!("HiGHS rejected the model: {:?}", status))
        })
    }
}

impl SolverService for HighsSolver {
    fn solve(&self, problem: &OptimizationProblem) -> Result<DomainSolution> {
        // Validate first
        self.validate(problem)?;

        let start_time = Instant::now();

        let mut solved = self.run(problem, true)?;
        // Presolve may stop without telling infeasible and unbounded apart
        if matches!(solved.status(), HighsModelStatus::UnboundedOrInfeasible) {
            debug!(problem = %problem.name, "re-solving without presolve");
            solved = self.run(problem, false)?;
        }

        let solve_time = start_time.elapsed().as_secs_f64() * 1000.0;
        let statistics = SolverStatistics::for_problem(problem, solve_time);

        let solution = match solved.status() {
            HighsModelStatus::Optimal => {
                let solution_data = solved.get_solution();
                let variable_values = solution_data.columns().to_vec();

                let slack_values = problem
                    .constraints
                    .iter()
                    .zip(solution_data.rows())
                    .map(|(constraint, &activity)| constraint.bound - activity)
                    .collect();

                // Row duals of a MIP come from the fixed LP and carry no meaning here
                let dual_values = if problem.is_mixed_integer() {
                    Vec::new()
                } else {
                    solution_data.dual_rows().to_vec()
                };

                let actual_obj = problem.objective.evaluate(&variable_values);

                let mut solution = DomainSolution::optimal(actual_obj, variable_values)
                    .with_slacks(slack_values)
                    .with_duals(dual_values);
                solution.message = format!("Optimal solution found for '{}'", problem.name);
                solution
            }
            HighsModelStatus::Infeasible => DomainSolution::new(
                DomainSolutionStatus::Infeasible,
                "Problem is infeasible: no solution satisfies all constraints",
            ),
            HighsModelStatus::Unbounded => DomainSolution::new(
                DomainSolutionStatus::Unbounded,
                "Problem is unbounded: objective can be improved infinitely",
            ),
            status => DomainSolution::new(
                DomainSolutionStatus::Undefined,
                format!("HiGHS stopped with status {:?}", status),
            ),
        };

        Ok(solution.with_statistics(statistics))
    }

    fn name(&self) -> &str {
        "HiGHS"
    }

    fn supports_mip(&self) -> bool {
        true
    }

    fn supports_duals(&self) -> bool {
        true
    }
}
