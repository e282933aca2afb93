//! Two-variable LP solved for plotting with the graphical method.

use super::linear::LinearConstraint;
use super::{
    ensure_finite, ensure_len, optimal_values, Formulation, FormulationError, InterpretationError,
};
use crate::domain::geometry::{self, PlanarConstraint, PlotGeometry, Point};
use crate::domain::{
    Constraint, ObjectiveFunction, OptimizationProblem, OptimizationType, Solution,
    SolutionStatus, Variable,
};

#[derive(Debug, Clone, PartialEq)]
pub struct GraphicalProblem {
    sense: OptimizationType,
    objective: [f64; 2],
    constraints: Vec<PlanarConstraint>,
}

impl GraphicalProblem {
    /// Every row must carry exactly two coefficients; degenerate rows are
    /// rejected so that the solved model and the drawn region always agree.
    pub fn new(
        sense: OptimizationType,
        objective: &[f64],
        constraints: Vec<LinearConstraint>,
    ) -> Result<Self, FormulationError> {
        ensure_len("objective coefficients", objective, 2)?;
        ensure_finite("objective coefficients", objective)?;

        let constraints = constraints
            .into_iter()
            .enumerate()
            .map(|(k, c)| {
                let field = format!("constraint {} coefficients", k + 1);
                ensure_len(&field, &c.coefficients, 2)?;
                ensure_finite(&field, &c.coefficients)?;
                ensure_finite(&format!("constraint {} rhs", k + 1), &[c.rhs])?;
                Ok(PlanarConstraint {
                    a: c.coefficients[0],
                    b: c.coefficients[1],
                    relation: c.relation,
                    rhs: c.rhs,
                })
            })
            .collect::<Result<Vec<_>, FormulationError>>()?;

        Ok(Self {
            sense,
            objective: [objective[0], objective[1]],
            constraints,
        })
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct GraphicalReport {
    pub status: SolutionStatus,
    pub objective_value: Option<f64>,
    pub x1: Option<f64>,
    pub x2: Option<f64>,
    pub plot: PlotGeometry,
}

impl Formulation for GraphicalProblem {
    type Report = GraphicalReport;

    fn formulate(&self) -> OptimizationProblem {
        let constraints = self.constraints.iter().enumerate().map(|(k, c)| {
            Constraint::from_dense(c.relation, &[c.a, c.b], c.rhs)
                .with_name(format!("Constraint_{}", k + 1))
        });

        OptimizationProblem::new(ObjectiveFunction::new(self.sense, self.objective.to_vec()))
            .with_name("graphical")
            .with_variables(vec![Variable::continuous("x1"), Variable::continuous("x2")])
            .with_constraints(constraints)
    }

    fn interpret(&self, solution: &Solution) -> Result<GraphicalReport, InterpretationError> {
        let optimum = match (solution.is_optimal(), solution.optimal_value) {
            (true, Some(value)) => {
                let values = optimal_values(solution, 2)?;
                Some((
                    Point {
                        x1: values[0],
                        x2: values[1],
                    },
                    value,
                ))
            }
            _ => None,
        };

        Ok(GraphicalReport {
            status: solution.status,
            objective_value: optimum.map(|(_, value)| value),
            x1: optimum.map(|(point, _)| point.x1),
            x2: optimum.map(|(point, _)| point.x2),
            plot: geometry::generate(&self.constraints, self.objective, optimum),
        })
    }
}
