//! Square assignment problem solved as a binary program.

use super::{
    ensure_finite, ensure_len, ensure_non_empty, optimal_values, Formulation, FormulationError,
    InterpretationError,
};
use crate::domain::{
    Constraint, ConstraintType, ObjectiveFunction, OptimizationProblem, OptimizationType,
    Solution, SolutionStatus, Variable,
};

/// Binary values at or above this count as "assigned"
const ASSIGNED_THRESHOLD: f64 = 0.5;

#[derive(Debug, Clone, PartialEq)]
pub struct AssignmentProblem {
    costs: Vec<Vec<f64>>,
}

impl AssignmentProblem {
    pub fn new(costs: Vec<Vec<f64>>) -> Result<Self, FormulationError> {
        ensure_non_empty("cost_matrix", &costs)?;
        let n = costs.len();
        for (i, row) in costs.iter().enumerate() {
            let field = format!("cost_matrix row {}", i + 1);
            ensure_len(&field, row, n)?;
            ensure_finite(&field, row)?;
        }
        Ok(Self { costs })
    }

    pub fn size(&self) -> usize {
        self.costs.len()
    }

    pub fn worker_label(index: usize) -> String {
        format!("Worker {}", index + 1)
    }

    pub fn task_label(index: usize) -> String {
        format!("Task {}", index + 1)
    }

    fn cell(&self, worker: usize, task: usize) -> usize {
        worker * self.size() + task
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct Assignment {
    pub worker: String,
    pub task: String,
    pub cost: f64,
}

#[derive(Debug, Clone, PartialEq)]
pub struct WorkerEfficiency {
    pub worker: String,
    pub assigned_cost: f64,
    pub min_possible: f64,
    pub max_possible: f64,
    /// 100 for the cheapest option in the worker's row, 0 for the dearest
    pub efficiency: f64,
}

impl WorkerEfficiency {
    fn new(worker: String, row: &[f64], assigned_cost: f64) -> Self {
        let min = row.iter().copied().fold(f64::INFINITY, f64::min);
        let max = row.iter().copied().fold(f64::NEG_INFINITY, f64::max);
        let efficiency = if max > min {
            (max - assigned_cost) / (max - min) * 100.0
        } else {
            100.0
        };

        Self {
            worker,
            assigned_cost,
            min_possible: min,
            max_possible: max,
            efficiency,
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct AssignmentReport {
    pub status: SolutionStatus,
    pub total_cost: Option<f64>,
    pub assignments: Vec<Assignment>,
    pub efficiency_analysis: Vec<WorkerEfficiency>,
}

impl Formulation for AssignmentProblem {
    type Report = AssignmentReport;

    fn formulate(&self) -> OptimizationProblem {
        let n = self.size();

        let variables = (0..n)
            .flat_map(|i| (0..n).map(move |j| Variable::binary(format!("assign_{}_{}", i + 1, j + 1))))
            .collect();
        let objective = self.costs.iter().flatten().copied().collect();

        let worker_rows = (0..n).map(|i| {
            let terms = (0..n).map(|j| (self.cell(i, j), 1.0)).collect();
            Constraint::new(ConstraintType::Equal, terms, 1.0)
                .with_name(format!("worker_{}", i + 1))
        });

        let task_rows = (0..n).map(|j| {
            let terms = (0..n).map(|i| (self.cell(i, j), 1.0)).collect();
            Constraint::new(ConstraintType::Equal, terms, 1.0)
                .with_name(format!("task_{}", j + 1))
        });

        OptimizationProblem::new(ObjectiveFunction::new(OptimizationType::Minimize, objective))
            .with_name("assignment")
            .with_variables(variables)
            .with_constraints(worker_rows)
            .with_constraints(task_rows)
    }

    fn interpret(&self, solution: &Solution) -> Result<AssignmentReport, InterpretationError> {
        if !solution.is_optimal() {
            return Ok(AssignmentReport {
                status: solution.status,
                total_cost: None,
                assignments: Vec::new(),
                efficiency_analysis: Vec::new(),
            });
        }

        let n = self.size();
        let values = optimal_values(solution, n * n)?;
        let assigned = |i: usize, j: usize| values[self.cell(i, j)] >= ASSIGNED_THRESHOLD;

        for j in 0..n {
            let count = (0..n).filter(|&i| assigned(i, j)).count();
            if count != 1 {
                return Err(InterpretationError::AssignmentCount {
                    label: Self::task_label(j),
                    count,
                });
            }
        }

        let mut assignments = Vec::with_capacity(n);
        let mut efficiency_analysis = Vec::with_capacity(n);
        for (i, row) in self.costs.iter().enumerate() {
            let tasks: Vec<usize> = (0..n).filter(|&j| assigned(i, j)).collect();
            let task = match tasks.as_slice() {
                [task] => *task,
                _ => {
                    return Err(InterpretationError::AssignmentCount {
                        label: Self::worker_label(i),
                        count: tasks.len(),
                    })
                }
            };

            let cost = row[task];
            assignments.push(Assignment {
                worker: Self::worker_label(i),
                task: Self::task_label(task),
                cost,
            });
            efficiency_analysis.push(WorkerEfficiency::new(Self::worker_label(i), row, cost));
        }

        Ok(AssignmentReport {
            status: solution.status,
            total_cost: solution.optimal_value,
            assignments,
            efficiency_analysis,
        })
    }
}
