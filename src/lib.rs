pub mod app;
pub mod camera;
pub mod catalog;
pub mod cli;
pub mod config;
pub mod controller;
pub mod core;
pub mod error;
pub mod loaders;
pub mod math;
pub mod placement;
pub mod render;
pub mod session;
pub mod types;
pub mod ui;

pub use catalog::{AssetRef, Catalog, CatalogEntry};
pub use controller::{Generation, LoadRequest, LoadState, Notification, Transition, ViewerController, ViewerState};
pub use error::ViewerError;
pub use session::{Session, ViewerAction};
