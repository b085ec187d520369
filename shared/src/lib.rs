//! Shared domain for the wheat fertilizer calculator
//!
//! This crate holds everything that is pure computation: the nutrient lookup
//! tables, recommendation resolution, fertilizer allocation and input
//! validation. It is used by the host-side calculator service and compiled to
//! WebAssembly for the browser.

pub mod allocation;
pub mod calculation;
pub mod error;
pub mod models;
pub mod resolver;
pub mod store;
pub mod tables;
pub mod types;
pub mod validation;

pub use allocation::*;
pub use calculation::*;
pub use error::*;
pub use models::*;
pub use resolver::*;
pub use store::*;
pub use types::*;
pub use validation::*;
