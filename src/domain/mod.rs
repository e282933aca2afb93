// Domain module: Business logic and models

pub mod formulation;
pub mod geometry;
pub mod models;
pub mod solver_service;
pub mod value_objects;

pub use formulation::{Formulation, FormulationError, InterpretationError};
pub use models::*;
pub use solver_service::*;
pub use value_objects::*;
