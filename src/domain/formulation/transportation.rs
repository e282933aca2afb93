//! Balanced-or-surplus transportation problem.
//!
//! One flow variable per (origin, destination) route, minimizing total
//! shipping cost. Origins may ship at most their supply and destinations must
//! receive at least their demand. No dummy nodes are added: if total supply is
//! short of total demand the solver reports the model infeasible.

use super::{
    ensure_finite, ensure_len, ensure_non_empty, ensure_non_negative, optimal_values, percentage,
    Formulation, FormulationError, InterpretationError, EPSILON,
};
use crate::domain::{
    Constraint, ConstraintType, ObjectiveFunction, OptimizationProblem, OptimizationType,
    Solution, SolutionStatus, Variable,
};

#[derive(Debug, Clone, PartialEq)]
pub struct TransportationProblem {
    supply: Vec<f64>,
    demand: Vec<f64>,
    costs: Vec<Vec<f64>>,
}

impl TransportationProblem {
    pub fn new(
        supply: Vec<f64>,
        demand: Vec<f64>,
        costs: Vec<Vec<f64>>,
    ) -> Result<Self, FormulationError> {
        ensure_non_empty("supply", &supply)?;
        ensure_non_empty("demand", &demand)?;
        ensure_non_negative("supply", &supply)?;
        ensure_non_negative("demand", &demand)?;
        ensure_len("costs", &costs, supply.len())?;
        for (i, row) in costs.iter().enumerate() {
            let field = format!("costs row {}", i + 1);
            ensure_len(&field, row, demand.len())?;
            ensure_finite(&field, row)?;
        }

        Ok(Self {
            supply,
            demand,
            costs,
        })
    }

    pub fn origins(&self) -> usize {
        self.supply.len()
    }

    pub fn destinations(&self) -> usize {
        self.demand.len()
    }

    pub fn origin_label(index: usize) -> String {
        format!("Origin {}", index + 1)
    }

    pub fn destination_label(index: usize) -> String {
        format!("Destination {}", index + 1)
    }

    /// Variable index of the route from origin `i` to destination `j`
    fn route(&self, i: usize, j: usize) -> usize {
        i * self.destinations() + j
    }

    fn num_routes(&self) -> usize {
        self.origins() * self.destinations()
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct Allocation {
    pub from: String,
    pub to: String,
    pub quantity: f64,
    pub cost: f64,
}

#[derive(Debug, Clone, PartialEq)]
pub struct SupplyUsage {
    pub supplier: String,
    pub used: f64,
    pub available: f64,
    pub percentage: f64,
}

#[derive(Debug, Clone, PartialEq)]
pub struct DemandSatisfaction {
    pub customer: String,
    pub received: f64,
    pub demanded: f64,
    pub percentage: f64,
}

#[derive(Debug, Clone, PartialEq)]
pub struct TransportationReport {
    pub status: SolutionStatus,
    pub total_cost: Option<f64>,
    pub allocations: Vec<Allocation>,
    pub supply_usage: Vec<SupplyUsage>,
    pub demand_satisfaction: Vec<DemandSatisfaction>,
}

impl Formulation for TransportationProblem {
    type Report = TransportationReport;

    fn formulate(&self) -> OptimizationProblem {
        let (m, n) = (self.origins(), self.destinations());

        let mut variables = Vec::with_capacity(self.num_routes());
        let mut objective = Vec::with_capacity(self.num_routes());
        for (i, row) in self.costs.iter().enumerate() {
            for (j, &cost) in row.iter().enumerate() {
                variables.push(Variable::continuous(format!("route_{}_{}", i + 1, j + 1)));
                objective.push(cost);
            }
        }

        let supply_rows = self.supply.iter().enumerate().map(|(i, &available)| {
            let terms = (0..n).map(|j| (self.route(i, j), 1.0)).collect();
            Constraint::new(ConstraintType::LessThanOrEqual, terms, available)
                .with_name(format!("supply_{}", i + 1))
        });

        let demand_rows = self.demand.iter().enumerate().map(|(j, &required)| {
            let terms = (0..m).map(|i| (self.route(i, j), 1.0)).collect();
            Constraint::new(ConstraintType::GreaterThanOrEqual, terms, required)
                .with_name(format!("demand_{}", j + 1))
        });

        OptimizationProblem::new(ObjectiveFunction::new(OptimizationType::Minimize, objective))
            .with_name("transportation")
            .with_variables(variables)
            .with_constraints(supply_rows)
            .with_constraints(demand_rows)
    }

    fn interpret(&self, solution: &Solution) -> Result<TransportationReport, InterpretationError> {
        if !solution.is_optimal() {
            return Ok(TransportationReport {
                status: solution.status,
                total_cost: None,
                allocations: Vec::new(),
                supply_usage: Vec::new(),
                demand_satisfaction: Vec::new(),
            });
        }

        let flows = optimal_values(solution, self.num_routes())?;
        let flow = |i: usize, j: usize| flows[self.route(i, j)];

        let mut allocations = Vec::new();
        for (i, row) in self.costs.iter().enumerate() {
            for (j, &unit_cost) in row.iter().enumerate() {
                let quantity = flow(i, j);
                if quantity > EPSILON {
                    allocations.push(Allocation {
                        from: Self::origin_label(i),
                        to: Self::destination_label(j),
                        quantity,
                        cost: unit_cost * quantity,
                    });
                }
            }
        }

        let supply_usage = self
            .supply
            .iter()
            .enumerate()
            .map(|(i, &available)| {
                let used: f64 = (0..self.destinations()).map(|j| flow(i, j)).sum();
                SupplyUsage {
                    supplier: Self::origin_label(i),
                    used,
                    available,
                    percentage: percentage(used, available),
                }
            })
            .collect();

        let demand_satisfaction = self
            .demand
            .iter()
            .enumerate()
            .map(|(j, &demanded)| {
                let received: f64 = (0..self.origins()).map(|i| flow(i, j)).sum();
                DemandSatisfaction {
                    customer: Self::destination_label(j),
                    received,
                    demanded,
                    percentage: percentage(received, demanded),
                }
            })
            .collect();

        Ok(TransportationReport {
            status: solution.status,
            total_cost: solution.optimal_value,
            allocations,
            supply_usage,
            demand_satisfaction,
        })
    }
}
