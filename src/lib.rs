// Export main modules
pub mod body;
pub mod config;
mod error;
mod export;
pub mod field;
mod mesh;
pub mod ocean;
pub mod sim;
pub mod wave;

// Re-export everything for public use
pub use body::{
    BodyTransform, FloatingBody, HullBounds, LocalToWorld, Marker, Markers, OrientationUpdate,
    SmoothingMode,
};
pub use config::SceneConfig;
pub use error::{OceanError, Result};
pub use export::export_scene;
pub use field::{Surface, WaveField};
pub use mesh::{Face, Mesh, Vertex};
pub use ocean::Ocean;
pub use sim::{Pose, Simulation};
pub use wave::{Swell, WaveTrain};

pub mod prelude {
    pub use crate::body::{BodyTransform, FloatingBody, HullBounds, LocalToWorld, SmoothingMode};
    pub use crate::config::SceneConfig;
    pub use crate::error::{OceanError, Result};
    pub use crate::export::export_scene;
    pub use crate::field::{Surface, WaveField};
    pub use crate::mesh::{Face, Mesh, Vertex};
    pub use crate::ocean::Ocean;
    pub use crate::sim::{Pose, Simulation};
    pub use crate::wave::{Swell, WaveTrain};
}
