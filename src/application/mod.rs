// Application layer: request validation, use-case orchestration and wire types

pub mod dto;
pub mod mappers;
pub mod optimization_service;

pub use optimization_service::{OptimizationService, ServiceError};
