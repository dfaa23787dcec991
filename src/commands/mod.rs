// Provider configuration
pub mod configure;
pub mod validate;

// State normalization
pub mod normalize;
pub mod plan;

pub mod schema;
