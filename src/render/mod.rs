pub mod scene;
pub mod viewport;

pub use scene::{DirectionalLight, SceneRig};
pub use viewport::Viewport;
