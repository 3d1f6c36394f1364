use std::path::PathBuf;
use std::sync::mpsc::Sender;
use std::thread;
use std::time::Instant;

use anyhow::Result;
use log::{info, warn};
use winit::event_loop::EventLoopProxy;

use super::gltf::{load_gltf_mesh, MeshData};
use crate::catalog::CatalogEntry;
use crate::controller::LoadRequest;

/// Decoded asset (or the reason it could not be decoded) for one request
#[derive(Debug)]
pub struct LoadOutcome {
    pub request: LoadRequest,
    pub result: Result<MeshData>,
}

/// Where finished decodes are delivered
pub trait LoadSink: Send + 'static {
    /// Returns false when the receiving side is gone
    fn deliver(&self, outcome: LoadOutcome) -> bool;
}

impl LoadSink for EventLoopProxy<LoadOutcome> {
    fn deliver(&self, outcome: LoadOutcome) -> bool {
        self.send_event(outcome).is_ok()
    }
}

impl LoadSink for Sender<LoadOutcome> {
    fn deliver(&self, outcome: LoadOutcome) -> bool {
        self.send(outcome).is_ok()
    }
}

/// Deliver `outcome`, warning when nobody is listening any more
fn hand_off(sink: &impl LoadSink, outcome: LoadOutcome, name: &str) -> bool {
    let generation = outcome.request.generation;
    let delivered = sink.deliver(outcome);
    if !delivered {
        warn!("Dropping outcome for {:?} ({}): receiver closed", name, generation);
    }
    delivered
}

/// Starts decoding the asset of a catalog entry for a given generation
pub trait AssetRequester {
    fn request(&mut self, entry: &CatalogEntry, request: LoadRequest);
}

/// Decodes each requested asset on its own background thread.
///
/// There is no cancellation; a decode for an abandoned generation runs to
/// completion and its outcome is dropped by the receiver.
pub struct AssetLoader<S> {
    sink: S,
}

impl<S: LoadSink + Clone> AssetLoader<S> {
    pub fn new(sink: S) -> Self {
        Self { sink }
    }
}

impl<S: LoadSink + Clone> AssetRequester for AssetLoader<S> {
    fn request(&mut self, entry: &CatalogEntry, request: LoadRequest) {
        let path: PathBuf = entry.asset.path().to_path_buf();
        let name = entry.name.clone();
        let sink = self.sink.clone();

        info!("Requesting {:?} ({}) for {}", name, entry.asset, request.generation);

        let spawned = thread::Builder::new()
            .name(format!("asset-loader-{}", request.generation.0))
            .spawn(move || {
                let started = Instant::now();
                let result = load_gltf_mesh(&path);
                match &result {
                    Ok(mesh) => info!(
                        "Decoded {:?}: {} triangles in {:.0?}",
                        name,
                        mesh.triangle_count(),
                        started.elapsed()
                    ),
                    Err(e) => warn!("Failed to decode {:?}: {:#}", name, e),
                }
                hand_off(&sink, LoadOutcome { request, result }, &name);
            });

        if let Err(e) = spawned {
            let outcome = LoadOutcome {
                request,
                result: Err(anyhow::Error::new(e).context("Failed to spawn asset loader thread")),
            };
            hand_off(&self.sink, outcome, &entry.name);
        }
    }
}
