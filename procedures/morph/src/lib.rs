pub mod config;
pub mod dataset;
pub mod error;
pub mod pose;
pub mod progress;
pub mod sampler;
pub mod sink;
pub mod tree;

pub use config::{ConePlacement, DatasetConfig, Easing, RotationStyle, TreeConfig};
pub use dataset::{Dataset, DatasetBuilder, DatasetId, ParticleRecord};
pub use error::ConfigError;
pub use pose::{FrameSample, Orientation, PoseEvaluator};
pub use progress::{smoothstep, AnimationState, Mode};
pub use sink::{InstanceTransforms, TransformSink};
pub use tree::MorphingTree;

// Typical frame loop:
// - build a MorphingTree once from a validated TreeConfig
// - keep one AnimationState for the session
// - each frame call MorphingTree::frame with the current Mode and delta
//   and a TransformSink that hands transforms to the renderer
