// Optimization Engine — maps (profile, job target, tuning parameters) to an
// optimized profile plus a match score and improvement notes.
// Pure in its declared inputs; no module here touches workflow state.

pub mod engine;
pub mod keywords;
pub mod params;

pub use engine::{KeywordEngine, OptimizationResult, OptimizeEngine};
pub use params::{OptimizationParameters, ParameterUpdate};
