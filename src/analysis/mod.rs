// Spread-path synthesis for visualization
pub mod spread_path;

// Re-export commonly used types
pub use spread_path::{SynthError, SyntheticSeries, stationary_sigma, synthesize_spread_path};
