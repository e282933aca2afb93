//! End-to-end solves through the optimization service with HiGHS.

#![cfg(feature = "server")]

use std::sync::Arc;

use opsolve::application::dto::{
    AssignmentRequest, ConstraintRequest, CustomProblemRequest, GraphicalRequest,
    ObjectiveRequest, ObjectiveSense, Relation, SimplexProblemRequest, TransportRequest,
};
use opsolve::{HighsSolver, OptimizationService};

const TOLERANCE: f64 = 1e-6;

fn service() -> OptimizationService {
    OptimizationService::new(Arc::new(HighsSolver::new()))
}

fn assert_close(actual: f64, expected: f64) {
    assert!(
        (actual - expected).abs() < TOLERANCE,
        "expected {expected}, got {actual}"
    );
}

fn row(coefficients: &[f64], relation: Relation, rhs: f64) -> ConstraintRequest {
    ConstraintRequest {
        coefficients: coefficients.to_vec(),
        relation,
        rhs,
    }
}

fn production_plan() -> CustomProblemRequest {
    CustomProblemRequest {
        objective_type: ObjectiveSense::Maximize,
        var_count: 2,
        objective_coeffs: vec![3.0, 2.0],
        constraints: vec![
            row(&[1.0, 1.0], Relation::LessEqual, 4.0),
            row(&[1.0, 0.0], Relation::LessEqual, 2.0),
        ],
    }
}

fn two_by_two_transport() -> TransportRequest {
    TransportRequest {
        supply: vec![20.0, 30.0],
        demand: vec![25.0, 25.0],
        costs: vec![vec![4.0, 6.0], vec![5.0, 3.0]],
    }
}

#[test]
fn custom_lp_reaches_known_optimum() {
    let response = service().solve_custom(production_plan()).unwrap();

    assert_eq!(response.status, "Optimal");
    assert_close(response.objective_value.unwrap(), 10.0);

    let values: Vec<f64> = response.variables.0.iter().map(|(_, v)| v.unwrap()).collect();
    assert_eq!(response.variables.0[0].0, "x1");
    assert_close(values[0], 2.0);
    assert_close(values[1], 2.0);

    let shadow: Vec<f64> = response
        .constraints
        .0
        .iter()
        .map(|(_, c)| c.shadow_price.unwrap())
        .collect();
    assert_close(shadow[0], 2.0);
    assert_close(shadow[1], 1.0);
}

#[test]
fn constraint_usage_is_row_activity() {
    let request = production_plan();
    let response = service().solve_custom(request.clone()).unwrap();
    let values: Vec<f64> = response.variables.0.iter().map(|(_, v)| v.unwrap()).collect();

    for ((name, usage), constraint) in response.constraint_usage.0.iter().zip(&request.constraints) {
        let activity: f64 = constraint
            .coefficients
            .iter()
            .zip(&values)
            .map(|(a, x)| a * x)
            .sum();
        assert_close(usage.used, activity);
        assert_close(usage.available, constraint.rhs);

        let slack = response
            .constraints
            .0
            .iter()
            .find(|(n, _)| n == name)
            .map(|(_, c)| c.slack)
            .unwrap();
        assert_close(slack, constraint.rhs - activity);
    }
}

#[test]
fn simplex_form_matches_custom_form() {
    let custom = service().solve_custom(production_plan()).unwrap();
    let simplex = service()
        .solve_simplex(SimplexProblemRequest {
            objective: ObjectiveRequest {
                sense: ObjectiveSense::Maximize,
                coefficients: vec![3.0, 2.0],
            },
            var_count: 2,
            constraints: production_plan().constraints,
        })
        .unwrap();

    assert_eq!(simplex.status, custom.status);
    assert_close(simplex.objective_value.unwrap(), custom.objective_value.unwrap());
    assert_eq!(simplex.constraints.0.len(), 2);
}

#[test]
fn minimisation_shadow_price_is_objective_gain_per_unit() {
    let response = service()
        .solve_custom(CustomProblemRequest {
            objective_type: ObjectiveSense::Minimize,
            var_count: 2,
            objective_coeffs: vec![2.0, 3.0],
            constraints: vec![row(&[1.0, 1.0], Relation::GreaterEqual, 4.0)],
        })
        .unwrap();

    assert_eq!(response.status, "Optimal");
    assert_close(response.objective_value.unwrap(), 8.0);
    let (name, sensitivity) = &response.constraints.0[0];
    assert_eq!(name, "Constraint_1");
    assert_close(sensitivity.shadow_price.unwrap(), 2.0);
    assert_close(sensitivity.slack, 0.0);
}

#[test]
fn infeasible_lp_reports_status_without_values() {
    let response = service()
        .solve_custom(CustomProblemRequest {
            objective_type: ObjectiveSense::Minimize,
            var_count: 1,
            objective_coeffs: vec![1.0],
            constraints: vec![
                row(&[1.0], Relation::GreaterEqual, 5.0),
                row(&[1.0], Relation::LessEqual, 2.0),
            ],
        })
        .unwrap();

    assert_eq!(response.status, "Infeasible");
    assert_eq!(response.objective_value, None);
    assert!(response.variables.0.iter().all(|(_, v)| v.is_none()));
    assert!(response.constraints.0.is_empty());
}

#[test]
fn unbounded_lp_is_reported() {
    let response = service()
        .solve_custom(CustomProblemRequest {
            objective_type: ObjectiveSense::Maximize,
            var_count: 2,
            objective_coeffs: vec![1.0, 1.0],
            constraints: vec![row(&[1.0, -1.0], Relation::LessEqual, 1.0)],
        })
        .unwrap();

    assert_eq!(response.status, "Unbounded");
    assert_eq!(response.objective_value, None);
}

#[test]
fn transport_respects_supply_and_demand() {
    let request = two_by_two_transport();
    let response = service().solve_transport(request.clone()).unwrap();

    assert_eq!(response.status, "Optimal");
    assert_close(response.total_cost.unwrap(), 180.0);
    assert_eq!(response.allocations.len(), 3);

    let cost: f64 = response.allocations.iter().map(|a| a.cost).sum();
    assert_close(cost, 180.0);

    for (usage, available) in response.supply_usage.iter().zip(&request.supply) {
        assert!(usage.used <= available + TOLERANCE);
        assert!((0.0..=100.0 + TOLERANCE).contains(&usage.percentage));
    }
    for (satisfaction, demanded) in response.demand_satisfaction.iter().zip(&request.demand) {
        assert!(satisfaction.received >= demanded - TOLERANCE);
        assert_close(satisfaction.percentage, 100.0);
    }
}

#[test]
fn transport_allocations_follow_cheapest_routes() {
    let response = service().solve_transport(two_by_two_transport()).unwrap();
    let find = |from: &str, to: &str| {
        response
            .allocations
            .iter()
            .find(|a| a.from == from && a.to == to)
            .map(|a| a.quantity)
    };

    assert_close(find("Origin 1", "Destination 1").unwrap(), 20.0);
    assert_close(find("Origin 2", "Destination 1").unwrap(), 5.0);
    assert_close(find("Origin 2", "Destination 2").unwrap(), 25.0);
    assert_eq!(find("Origin 1", "Destination 2"), None);
}

#[test]
fn short_supply_is_not_optimal() {
    let response = service()
        .solve_transport(TransportRequest {
            supply: vec![10.0],
            demand: vec![15.0],
            costs: vec![vec![1.0]],
        })
        .unwrap();

    assert_eq!(response.status, "Infeasible");
    assert_eq!(response.total_cost, None);
    assert!(response.allocations.is_empty());
}

#[test]
fn idle_origin_reports_zero_utilization() {
    let response = service()
        .solve_transport(TransportRequest {
            supply: vec![0.0, 10.0],
            demand: vec![5.0],
            costs: vec![vec![1.0], vec![2.0]],
        })
        .unwrap();

    assert_eq!(response.status, "Optimal");
    assert_close(response.supply_usage[0].percentage, 0.0);
    assert_close(response.supply_usage[1].percentage, 50.0);
}

#[test]
fn assignment_is_a_bijection() {
    let response = service()
        .solve_assignment(AssignmentRequest {
            cost_matrix: vec![
                vec![9.0, 2.0, 7.0],
                vec![6.0, 4.0, 3.0],
                vec![5.0, 8.0, 1.0],
            ],
        })
        .unwrap();

    assert_eq!(response.status, "Optimal");
    assert_close(response.total_cost.unwrap(), 9.0);
    assert_eq!(response.assignments.len(), 3);

    let mut workers: Vec<&str> = response.assignments.iter().map(|a| a.worker.as_str()).collect();
    let mut tasks: Vec<&str> = response.assignments.iter().map(|a| a.task.as_str()).collect();
    workers.sort_unstable();
    workers.dedup();
    tasks.sort_unstable();
    tasks.dedup();
    assert_eq!(workers.len(), 3);
    assert_eq!(tasks.len(), 3);

    for entry in &response.efficiency_analysis {
        assert!((0.0..=100.0).contains(&entry.efficiency));
        assert!(entry.min_possible <= entry.assigned_cost);
        assert!(entry.assigned_cost <= entry.max_possible);
    }
}

#[test]
fn two_by_two_assignment() {
    let response = service()
        .solve_assignment(AssignmentRequest {
            cost_matrix: vec![vec![4.0, 1.0], vec![2.0, 3.0]],
        })
        .unwrap();

    assert_close(response.total_cost.unwrap(), 3.0);
    assert_eq!(response.assignments[0].worker, "Worker 1");
    assert_eq!(response.assignments[0].task, "Task 2");
    assert!(response
        .efficiency_analysis
        .iter()
        .all(|e| (e.efficiency - 100.0).abs() < TOLERANCE));
}

#[test]
fn graphical_solution_carries_plot() {
    let response = service()
        .solve_graphical(GraphicalRequest {
            objective: ObjectiveRequest {
                sense: ObjectiveSense::Maximize,
                coefficients: vec![3.0, 2.0],
            },
            constraints: production_plan().constraints,
        })
        .unwrap();

    assert_eq!(response.status, "Optimal");
    assert_close(response.objective_value.unwrap(), 10.0);
    assert_close(response.variables.x1.unwrap(), 2.0);
    assert_close(response.variables.x2.unwrap(), 2.0);

    let plot = response.plot;
    assert_eq!(plot.constraints.len(), 2);
    let point = plot.optimal_point.unwrap();
    assert_close(point.x1, 2.0);
    assert_close(point.x2, 2.0);
    assert_eq!(plot.objective_line.unwrap().label, "Z = 10.0");
}

#[test]
fn repeated_solves_agree() {
    let service = service();
    let first = service.solve_transport(two_by_two_transport()).unwrap();
    let second = service.solve_transport(two_by_two_transport()).unwrap();

    assert_eq!(first.status, second.status);
    assert_close(first.total_cost.unwrap(), second.total_cost.unwrap());
    assert_eq!(first.allocations.len(), second.allocations.len());
}
