// Application layer: solve orchestration and backend comparison

pub mod service;

pub use service::OptimizationService;
