//! Domain models for the fertilizer calculator

mod climate;
mod fertilizer;
mod recommendation;
mod selection;
mod soil;
mod yield_class;

pub use climate::*;
pub use fertilizer::*;
pub use recommendation::*;
pub use selection::*;
pub use soil::*;
pub use yield_class::*;
