//! Plot geometry for two-variable linear programs.
//!
//! Produces everything a chart needs to draw the feasible region: boundary
//! lines for each constraint, which side of each line to shade, the optimal
//! vertex and the objective iso-line through it. Rendering is left to the
//! client.

use super::formulation::EPSILON;
use super::value_objects::ConstraintType;

/// Horizontal range the boundary lines are sampled over
pub const SAMPLE_RANGE: (f64, f64) = (0.0, 20.0);
/// Number of evenly spaced samples, end points included
pub const SAMPLE_COUNT: usize = 400;

const PALETTE: [&str; 5] = ["red", "blue", "green", "orange", "purple"];

/// Visible area of the chart
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ViewWindow {
    pub x1_min: f64,
    pub x1_max: f64,
    pub x2_min: f64,
    pub x2_max: f64,
}

impl Default for ViewWindow {
    fn default() -> Self {
        Self {
            x1_min: 0.0,
            x1_max: 15.0,
            x2_min: 0.0,
            x2_max: 10.0,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Point {
    pub x1: f64,
    pub x2: f64,
}

/// A constraint `a·x1 + b·x2 (relation) rhs`
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PlanarConstraint {
    pub a: f64,
    pub b: f64,
    pub relation: ConstraintType,
    pub rhs: f64,
}

impl PlanarConstraint {
    pub fn label(&self) -> String {
        format!(
            "{}x₁ {} {}x₂ {} {}",
            self.a,
            if self.b < 0.0 { "-" } else { "+" },
            self.b.abs(),
            self.relation.symbol(),
            self.rhs
        )
    }
}

#[derive(Debug, Clone, PartialEq)]
pub enum Boundary {
    /// `x2 = slope·x1 + intercept`, sampled over [`SAMPLE_RANGE`]
    Line {
        slope: f64,
        intercept: f64,
        points: Vec<Point>,
    },
    /// `x1 = x1`, for constraints without an x2 term
    Vertical { x1: f64 },
}

/// Area between the boundary and a reference line to fill
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Shading {
    /// Fill between the boundary and `x2 = limit`
    TowardX2 { limit: f64 },
    /// Fill between the boundary and `x1 = limit`
    TowardX1 { limit: f64 },
}

#[derive(Debug, Clone, PartialEq)]
pub struct ConstraintPlot {
    pub label: String,
    pub color: &'static str,
    pub relation: ConstraintType,
    pub boundary: Boundary,
    /// `None` for equalities, which are drawn as a bare line
    pub shading: Option<Shading>,
}

#[derive(Debug, Clone, PartialEq)]
pub struct ObjectiveLine {
    pub value: f64,
    pub label: String,
    pub points: Vec<Point>,
}

#[derive(Debug, Clone, PartialEq)]
pub struct PlotGeometry {
    pub window: ViewWindow,
    pub constraints: Vec<ConstraintPlot>,
    pub optimal_point: Option<Point>,
    pub objective_line: Option<ObjectiveLine>,
}

/// Evenly spaced sample positions over [`SAMPLE_RANGE`]
pub fn sample_x1() -> impl Iterator<Item = f64> {
    let (start, end) = SAMPLE_RANGE;
    let step = (end - start) / (SAMPLE_COUNT - 1) as f64;
    (0..SAMPLE_COUNT).map(move |k| start + step * k as f64)
}

fn sample_line(slope: f64, intercept: f64) -> Vec<Point> {
    sample_x1()
        .map(|x1| Point {
            x1,
            x2: slope * x1 + intercept,
        })
        .filter(|point| point.x2.is_finite())
        .collect()
}

/// `(slope, intercept)` of `a·x1 + b·x2 = rhs` solved for x2, if representable
fn solve_for_x2(a: f64, b: f64, rhs: f64) -> Option<(f64, f64)> {
    if b.abs() <= EPSILON {
        return None;
    }
    let (slope, intercept) = (-a / b, rhs / b);
    (slope.is_finite() && intercept.is_finite()).then_some((slope, intercept))
}

/// Boundary and shading for one constraint; `None` when it has no line to draw
pub fn plot_constraint(
    index: usize,
    constraint: &PlanarConstraint,
    window: &ViewWindow,
) -> Option<ConstraintPlot> {
    let PlanarConstraint { a, b, relation, rhs } = *constraint;

    let vertical = (a.abs() > EPSILON)
        .then(|| rhs / a)
        .filter(|x1| x1.is_finite());

    // Dividing by a negative coefficient flips which side is feasible.
    let (boundary, shading) = if let Some((slope, intercept)) = solve_for_x2(a, b, rhs) {
        let shading = match effective_relation(relation, b) {
            ConstraintType::LessThanOrEqual => Some(Shading::TowardX2 { limit: window.x2_min }),
            ConstraintType::GreaterThanOrEqual => Some(Shading::TowardX2 { limit: window.x2_max }),
            ConstraintType::Equal => None,
        };
        (
            Boundary::Line {
                slope,
                intercept,
                points: sample_line(slope, intercept),
            },
            shading,
        )
    } else if let Some(x1) = vertical {
        let shading = match effective_relation(relation, a) {
            ConstraintType::LessThanOrEqual => Some(Shading::TowardX1 { limit: window.x1_min }),
            ConstraintType::GreaterThanOrEqual => Some(Shading::TowardX1 { limit: window.x1_max }),
            ConstraintType::Equal => None,
        };
        (Boundary::Vertical { x1 }, shading)
    } else {
        return None;
    };

    Some(ConstraintPlot {
        label: constraint.label(),
        color: PALETTE[index % PALETTE.len()],
        relation,
        boundary,
        shading,
    })
}

fn effective_relation(relation: ConstraintType, divisor: f64) -> ConstraintType {
    match (relation, divisor < 0.0) {
        (ConstraintType::LessThanOrEqual, true) => ConstraintType::GreaterThanOrEqual,
        (ConstraintType::GreaterThanOrEqual, true) => ConstraintType::LessThanOrEqual,
        (relation, _) => relation,
    }
}

/// Iso-line `a·x1 + b·x2 = value` of the objective; `None` when `b` is zero
pub fn objective_line(coefficients: [f64; 2], value: f64) -> Option<ObjectiveLine> {
    let [a, b] = coefficients;
    let (slope, intercept) = solve_for_x2(a, b, value)?;
    Some(ObjectiveLine {
        value,
        label: format!("Z = {:.1}", value),
        points: sample_line(slope, intercept),
    })
}

/// Full plot description. `optimum` is the optimal vertex and objective value,
/// when the solve was optimal.
pub fn generate(
    constraints: &[PlanarConstraint],
    objective: [f64; 2],
    optimum: Option<(Point, f64)>,
) -> PlotGeometry {
    let window = ViewWindow::default();

    let constraints = constraints
        .iter()
        .enumerate()
        .filter_map(|(i, c)| plot_constraint(i, c, &window))
        .collect();

    PlotGeometry {
        window,
        constraints,
        optimal_point: optimum.map(|(point, _)| point),
        objective_line: optimum.and_then(|(_, value)| objective_line(objective, value)),
    }
}
