// Mappers: Convert between HTTP wire types and domain models
// This keeps serde dependencies isolated from business logic (Dependency Inversion)

use super::dto::{
    AllocationDto, AssignmentDto, AssignmentRequest, AssignmentResponse, BoundaryDto,
    ConstraintPlotDto, ConstraintRequest, ConstraintSensitivity, ConstraintUsage,
    CustomProblemRequest, CustomProblemResponse, DemandSatisfactionDto, EfficiencyDto,
    GraphicalRequest, GraphicalResponse, GraphicalVariables, ObjectiveLineDto, ObjectiveSense,
    PlotDto, PointDto, Relation, ShadingDto, SimplexProblemRequest, SimplexProblemResponse,
    SupplyUsageDto, TransportRequest, TransportResponse, WindowDto,
};
use crate::domain::{
    formulation::{
        AssignmentProblem, AssignmentReport, GraphicalProblem, GraphicalReport, LinearConstraint,
        LinearProgram, LinearReport, TransportationProblem, TransportationReport,
    },
    geometry::{Boundary, ConstraintPlot, ObjectiveLine, PlotGeometry, Point, Shading},
    ConstraintType, FormulationError, OptimizationType,
};

pub fn sense_to_domain(sense: ObjectiveSense) -> OptimizationType {
    match sense {
        ObjectiveSense::Maximize => OptimizationType::Maximize,
        ObjectiveSense::Minimize => OptimizationType::Minimize,
    }
}

pub fn relation_to_domain(relation: Relation) -> ConstraintType {
    match relation {
        Relation::LessEqual => ConstraintType::LessThanOrEqual,
        Relation::GreaterEqual => ConstraintType::GreaterThanOrEqual,
        Relation::Equal => ConstraintType::Equal,
    }
}

pub fn relation_from_domain(constraint_type: ConstraintType) -> Relation {
    match constraint_type {
        ConstraintType::LessThanOrEqual => Relation::LessEqual,
        ConstraintType::GreaterThanOrEqual => Relation::GreaterEqual,
        ConstraintType::Equal => Relation::Equal,
    }
}

fn constraints_to_domain(constraints: Vec<ConstraintRequest>) -> Vec<LinearConstraint> {
    constraints
        .into_iter()
        .map(|c| LinearConstraint {
            coefficients: c.coefficients,
            relation: relation_to_domain(c.relation),
            rhs: c.rhs,
        })
        .collect()
}

/// Validate a custom LP request into a typed program
pub fn custom_request_to_program(
    request: CustomProblemRequest,
) -> Result<LinearProgram, FormulationError> {
    LinearProgram::new(
        sense_to_domain(request.objective_type),
        request.var_count,
        request.objective_coeffs,
        constraints_to_domain(request.constraints),
    )
}

/// Validate a simplex request into a typed program
pub fn simplex_request_to_program(
    request: SimplexProblemRequest,
) -> Result<LinearProgram, FormulationError> {
    LinearProgram::new(
        sense_to_domain(request.objective.sense),
        request.var_count,
        request.objective.coefficients,
        constraints_to_domain(request.constraints),
    )
}

pub fn transport_request_to_problem(
    request: TransportRequest,
) -> Result<TransportationProblem, FormulationError> {
    TransportationProblem::new(request.supply, request.demand, request.costs)
}

pub fn assignment_request_to_problem(
    request: AssignmentRequest,
) -> Result<AssignmentProblem, FormulationError> {
    AssignmentProblem::new(request.cost_matrix)
}

pub fn graphical_request_to_problem(
    request: GraphicalRequest,
) -> Result<GraphicalProblem, FormulationError> {
    GraphicalProblem::new(
        sense_to_domain(request.objective.sense),
        &request.objective.coefficients,
        constraints_to_domain(request.constraints),
    )
}

/// Convert a linear report to the custom LP response
pub fn linear_report_to_custom_response(report: LinearReport) -> CustomProblemResponse {
    let constraint_usage = report
        .constraints
        .iter()
        .map(|c| {
            (
                c.name.clone(),
                ConstraintUsage {
                    used: c.used,
                    available: c.available,
                },
            )
        })
        .collect();
    let simplex = linear_report_to_simplex_response(report);

    CustomProblemResponse {
        status: simplex.status,
        objective_value: simplex.objective_value,
        variables: simplex.variables,
        constraints: simplex.constraints,
        constraint_usage,
    }
}

/// Convert a linear report to the simplex response (sensitivity only)
pub fn linear_report_to_simplex_response(report: LinearReport) -> SimplexProblemResponse {
    SimplexProblemResponse {
        status: report.status.to_string(),
        objective_value: report.objective_value,
        variables: report.variables.into_iter().collect(),
        constraints: report
            .constraints
            .into_iter()
            .map(|c| {
                (
                    c.name,
                    ConstraintSensitivity {
                        slack: c.slack,
                        shadow_price: c.shadow_price,
                    },
                )
            })
            .collect(),
    }
}

pub fn transport_report_to_response(report: TransportationReport) -> TransportResponse {
    TransportResponse {
        status: report.status.to_string(),
        total_cost: report.total_cost,
        allocations: report
            .allocations
            .into_iter()
            .map(|a| AllocationDto {
                from: a.from,
                to: a.to,
                quantity: a.quantity,
                cost: a.cost,
            })
            .collect(),
        supply_usage: report
            .supply_usage
            .into_iter()
            .map(|s| SupplyUsageDto {
                supplier: s.supplier,
                used: s.used,
                available: s.available,
                percentage: s.percentage,
            })
            .collect(),
        demand_satisfaction: report
            .demand_satisfaction
            .into_iter()
            .map(|d| DemandSatisfactionDto {
                customer: d.customer,
                received: d.received,
                demanded: d.demanded,
                percentage: d.percentage,
            })
            .collect(),
    }
}

pub fn assignment_report_to_response(report: AssignmentReport) -> AssignmentResponse {
    AssignmentResponse {
        status: report.status.to_string(),
        total_cost: report.total_cost,
        assignments: report
            .assignments
            .into_iter()
            .map(|a| AssignmentDto {
                worker: a.worker,
                task: a.task,
                cost: a.cost,
            })
            .collect(),
        efficiency_analysis: report
            .efficiency_analysis
            .into_iter()
            .map(|e| EfficiencyDto {
                worker: e.worker,
                assigned_cost: e.assigned_cost,
                min_possible: e.min_possible,
                max_possible: e.max_possible,
                efficiency: e.efficiency,
            })
            .collect(),
    }
}

pub fn graphical_report_to_response(report: GraphicalReport) -> GraphicalResponse {
    GraphicalResponse {
        status: report.status.to_string(),
        objective_value: report.objective_value,
        variables: GraphicalVariables {
            x1: report.x1,
            x2: report.x2,
        },
        plot: plot_to_dto(report.plot),
    }
}

fn point_to_dto(point: Point) -> PointDto {
    PointDto {
        x1: point.x1,
        x2: point.x2,
    }
}

fn points_to_dto(points: Vec<Point>) -> Vec<PointDto> {
    points.into_iter().map(point_to_dto).collect()
}

fn constraint_plot_to_dto(plot: ConstraintPlot) -> ConstraintPlotDto {
    let boundary = match plot.boundary {
        Boundary::Line {
            slope,
            intercept,
            points,
        } => BoundaryDto::Line {
            slope,
            intercept,
            points: points_to_dto(points),
        },
        Boundary::Vertical { x1 } => BoundaryDto::Vertical { x1 },
    };

    let shading = plot.shading.map(|shading| match shading {
        Shading::TowardX2 { limit } => ShadingDto { axis: "x2", limit },
        Shading::TowardX1 { limit } => ShadingDto { axis: "x1", limit },
    });

    ConstraintPlotDto {
        label: plot.label,
        color: plot.color,
        relation: relation_from_domain(plot.relation),
        boundary,
        shading,
    }
}

fn objective_line_to_dto(line: ObjectiveLine) -> ObjectiveLineDto {
    ObjectiveLineDto {
        value: line.value,
        label: line.label,
        points: points_to_dto(line.points),
    }
}

fn plot_to_dto(plot: PlotGeometry) -> PlotDto {
    PlotDto {
        window: WindowDto {
            x1_min: plot.window.x1_min,
            x1_max: plot.window.x1_max,
            x2_min: plot.window.x2_min,
            x2_max: plot.window.x2_max,
        },
        constraints: plot
            .constraints
            .into_iter()
            .map(constraint_plot_to_dto)
            .collect(),
        optimal_point: plot.optimal_point.map(point_to_dto),
        objective_line: plot.objective_line.map(objective_line_to_dto),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::formulation::ConstraintAnalysis;
    use crate::domain::SolutionStatus;
    use serde_json::json;

    #[test]
    fn custom_request_validation_catches_objective_length() {
        let request: CustomProblemRequest = serde_json::from_value(json!({
            "objective_type": "minimize",
            "var_count": 3,
            "objective_coeffs": [1, 2],
            "constraints": []
        }))
        .unwrap();

        let err = custom_request_to_program(request).unwrap_err();
        assert_eq!(err.to_string(), "objective coefficients has 2 entries, expected 3");
    }

    #[test]
    fn graphical_request_rejects_short_rows() {
        let request: GraphicalRequest = serde_json::from_value(json!({
            "objective": {"type": "maximize", "coefficients": [1, 1]},
            "constraints": [{"coefficients": [1], "type": "<=", "rhs": 3}]
        }))
        .unwrap();
        assert!(graphical_request_to_problem(request).is_err());
    }

    #[test]
    fn custom_response_splits_sensitivity_and_usage() {
        let report = LinearReport {
            status: SolutionStatus::Optimal,
            objective_value: Some(10.0),
            variables: vec![("x1".into(), Some(2.0)), ("x2".into(), Some(2.0))],
            constraints: vec![ConstraintAnalysis {
                name: "Constraint_1".into(),
                slack: 0.0,
                shadow_price: Some(2.0),
                used: 4.0,
                available: 4.0,
            }],
        };

        let value = serde_json::to_value(linear_report_to_custom_response(report)).unwrap();

        assert_eq!(value["status"], "Optimal");
        assert_eq!(value["variables"], json!({"x1": 2.0, "x2": 2.0}));
        assert_eq!(
            value["constraints"]["Constraint_1"],
            json!({"slack": 0.0, "shadow_price": 2.0})
        );
        assert_eq!(
            value["constraint_usage"]["Constraint_1"],
            json!({"used": 4.0, "available": 4.0})
        );
    }

    #[test]
    fn simplex_response_has_no_usage_block() {
        let report = LinearReport {
            status: SolutionStatus::Unbounded,
            objective_value: None,
            variables: vec![("x1".into(), None)],
            constraints: vec![],
        };

        let value = serde_json::to_value(linear_report_to_simplex_response(report)).unwrap();

        assert_eq!(value["status"], "Unbounded");
        assert_eq!(value["objective_value"], serde_json::Value::Null);
        assert_eq!(value["variables"], json!({"x1": null}));
        assert!(value.get("constraint_usage").is_none());
    }
}
