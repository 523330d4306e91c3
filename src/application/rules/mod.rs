mod recommendation;
mod threshold;

pub use recommendation::RecommendationRule;
pub use threshold::ThresholdRule;
