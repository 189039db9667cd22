// Engine library root: the funnel model, persistence, the scenario planner
// and the settings that tie them together.
pub mod config;
pub mod data;
pub mod error;
pub mod funnel;
pub mod planner;
pub mod render;
pub mod validation;

pub use error::EngineError;
