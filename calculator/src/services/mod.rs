//! Request-level services

pub mod recommendation;

pub use recommendation::RecommendationService;
