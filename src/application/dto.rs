// Wire types: JSON request and response bodies for the HTTP API
// Kept apart from the domain so serde attributes never leak into business logic

use serde::{Deserialize, Serialize, Serializer};

/// Objective direction as written by clients
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize, Serialize)]
pub enum ObjectiveSense {
    #[serde(rename = "maximize", alias = "max")]
    Maximize,
    #[serde(rename = "minimize", alias = "min")]
    Minimize,
}

/// Constraint relation as written by clients
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize, Serialize)]
pub enum Relation {
    #[serde(rename = "<=", alias = "≤")]
    LessEqual,
    #[serde(rename = ">=", alias = "≥")]
    GreaterEqual,
    #[serde(rename = "=", alias = "==")]
    Equal,
}

#[derive(Debug, Clone, PartialEq, Deserialize, Serialize)]
pub struct ConstraintRequest {
    pub coefficients: Vec<f64>,
    #[serde(rename = "type")]
    pub relation: Relation,
    pub rhs: f64,
}

#[derive(Debug, Clone, PartialEq, Deserialize, Serialize)]
pub struct ObjectiveRequest {
    #[serde(rename = "type")]
    pub sense: ObjectiveSense,
    pub coefficients: Vec<f64>,
}

/// Body of `POST /api/solve_custom`
#[derive(Debug, Clone, PartialEq, Deserialize, Serialize)]
pub struct CustomProblemRequest {
    pub objective_type: ObjectiveSense,
    pub var_count: usize,
    pub objective_coeffs: Vec<f64>,
    #[serde(default)]
    pub constraints: Vec<ConstraintRequest>,
}

/// Body of `POST /api/solve_simplex`
#[derive(Debug, Clone, PartialEq, Deserialize, Serialize)]
pub struct SimplexProblemRequest {
    pub objective: ObjectiveRequest,
    pub var_count: usize,
    #[serde(default)]
    pub constraints: Vec<ConstraintRequest>,
}

/// Body of `POST /api/solve_transport`
#[derive(Debug, Clone, PartialEq, Deserialize, Serialize)]
pub struct TransportRequest {
    pub supply: Vec<f64>,
    pub demand: Vec<f64>,
    pub costs: Vec<Vec<f64>>,
}

/// Body of `POST /api/solve_assignment`
#[derive(Debug, Clone, PartialEq, Deserialize, Serialize)]
pub struct AssignmentRequest {
    pub cost_matrix: Vec<Vec<f64>>,
}

/// Body of `POST /api/solve_graphical`
#[derive(Debug, Clone, PartialEq, Deserialize, Serialize)]
pub struct GraphicalRequest {
    pub objective: ObjectiveRequest,
    #[serde(default)]
    pub constraints: Vec<ConstraintRequest>,
}

/// Name → value pairs serialized as a JSON object in insertion order
#[derive(Debug, Clone, PartialEq, Default)]
pub struct NamedValues<V>(pub Vec<(String, V)>);

impl<V: Serialize> Serialize for NamedValues<V> {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_map(self.0.iter().map(|(name, value)| (name, value)))
    }
}

impl<V> FromIterator<(String, V)> for NamedValues<V> {
    fn from_iter<I: IntoIterator<Item = (String, V)>>(iter: I) -> Self {
        Self(iter.into_iter().collect())
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ConstraintSensitivity {
    pub slack: f64,
    pub shadow_price: Option<f64>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ConstraintUsage {
    pub used: f64,
    pub available: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct CustomProblemResponse {
    pub status: String,
    pub objective_value: Option<f64>,
    pub variables: NamedValues<Option<f64>>,
    pub constraints: NamedValues<ConstraintSensitivity>,
    pub constraint_usage: NamedValues<ConstraintUsage>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SimplexProblemResponse {
    pub status: String,
    pub objective_value: Option<f64>,
    pub variables: NamedValues<Option<f64>>,
    pub constraints: NamedValues<ConstraintSensitivity>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct AllocationDto {
    pub from: String,
    pub to: String,
    pub quantity: f64,
    pub cost: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SupplyUsageDto {
    pub supplier: String,
    pub used: f64,
    pub available: f64,
    pub percentage: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct DemandSatisfactionDto {
    pub customer: String,
    pub received: f64,
    pub demanded: f64,
    pub percentage: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct TransportResponse {
    pub status: String,
    pub total_cost: Option<f64>,
    pub allocations: Vec<AllocationDto>,
    pub supply_usage: Vec<SupplyUsageDto>,
    pub demand_satisfaction: Vec<DemandSatisfactionDto>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct AssignmentDto {
    pub worker: String,
    pub task: String,
    pub cost: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct EfficiencyDto {
    pub worker: String,
    pub assigned_cost: f64,
    pub min_possible: f64,
    pub max_possible: f64,
    pub efficiency: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct AssignmentResponse {
    pub status: String,
    pub total_cost: Option<f64>,
    pub assignments: Vec<AssignmentDto>,
    pub efficiency_analysis: Vec<EfficiencyDto>,
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct PointDto {
    pub x1: f64,
    pub x2: f64,
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct WindowDto {
    pub x1_min: f64,
    pub x1_max: f64,
    pub x2_min: f64,
    pub x2_max: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum BoundaryDto {
    Line {
        slope: f64,
        intercept: f64,
        points: Vec<PointDto>,
    },
    Vertical {
        x1: f64,
    },
}

/// Fill the area between the boundary and the line `axis = limit`
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct ShadingDto {
    pub axis: &'static str,
    pub limit: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ConstraintPlotDto {
    pub label: String,
    pub color: &'static str,
    #[serde(rename = "type")]
    pub relation: Relation,
    pub boundary: BoundaryDto,
    pub shading: Option<ShadingDto>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ObjectiveLineDto {
    pub value: f64,
    pub label: String,
    pub points: Vec<PointDto>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct PlotDto {
    pub window: WindowDto,
    pub constraints: Vec<ConstraintPlotDto>,
    pub optimal_point: Option<PointDto>,
    pub objective_line: Option<ObjectiveLineDto>,
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct GraphicalVariables {
    pub x1: Option<f64>,
    pub x2: Option<f64>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct GraphicalResponse {
    pub status: String,
    pub objective_value: Option<f64>,
    pub variables: GraphicalVariables,
    pub plot: PlotDto,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SolverInfoDto {
    pub name: String,
    pub active: bool,
    pub supports_mip: bool,
    pub supports_duals: bool,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct AvailableSolversResponse {
    pub solvers: Vec<SolverInfoDto>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ErrorResponse {
    pub error: String,
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn named_values_keep_insertion_order() {
        let values: NamedValues<f64> = vec![("x2".to_string(), 1.0), ("x10".to_string(), 2.0)]
            .into_iter()
            .collect();
        assert_eq!(serde_json::to_string(&values).unwrap(), r#"{"x2":1.0,"x10":2.0}"#);
    }

    #[test]
    fn relation_accepts_symbols_and_aliases() {
        let parsed: Vec<Relation> = serde_json::from_value(json!(["<=", "≥", "==", "="])).unwrap();
        assert_eq!(
            parsed,
            vec![
                Relation::LessEqual,
                Relation::GreaterEqual,
                Relation::Equal,
                Relation::Equal
            ]
        );
        assert!(serde_json::from_value::<Relation>(json!("<")).is_err());
    }

    #[test]
    fn custom_request_parses_flat_shape() {
        let request: CustomProblemRequest = serde_json::from_value(json!({
            "objective_type": "maximize",
            "var_count": 2,
            "objective_coeffs": [3, 2],
            "constraints": [{"coefficients": [1, 1], "type": "<=", "rhs": 4}]
        }))
        .unwrap();
        assert_eq!(request.objective_type, ObjectiveSense::Maximize);
        assert_eq!(request.constraints[0].relation, Relation::LessEqual);
        assert_eq!(request.constraints[0].rhs, 4.0);
    }

    #[test]
    fn boundary_is_tagged_by_kind() {
        let value = serde_json::to_value(BoundaryDto::Vertical { x1: 3.0 }).unwrap();
        assert_eq!(value, json!({"kind": "vertical", "x1": 3.0}));
    }
}
