pub mod engine;
pub mod region;
pub mod season;
pub mod soil;
pub mod temperature;
pub mod varieties;

pub use engine::AdvisorEngine;

use crate::models::{AdvisorRequest, PaddyAdvice};

/// Trait for advisor passes. Each pass owns one slice of the advice
/// record and writes nothing outside it.
pub trait AdvicePass: Send + Sync {
    /// Unique identifier for this pass
    fn id(&self) -> &'static str;

    /// Human-readable name
    fn name(&self) -> &'static str;

    /// Apply the pass, filling in its portion of the advice
    fn apply(&self, request: &AdvisorRequest, advice: &mut PaddyAdvice);
}
