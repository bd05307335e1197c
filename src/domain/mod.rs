// Domain module: constraint model, dataset, lowering and solver contract

pub mod compiler;
pub mod dataset;
pub mod model;
pub mod outcome;
pub mod program;
pub mod value_objects;

pub use compiler::*;
pub use dataset::*;
pub use model::*;
pub use outcome::*;
pub use program::*;
pub use value_objects::*;
