pub mod gltf;
pub mod worker;

pub use gltf::{load_gltf_mesh, load_gltf_mesh_from_slice, MeshData};
pub use worker::{AssetLoader, AssetRequester, LoadOutcome, LoadSink};
