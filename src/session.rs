use log::{debug, info, warn};

use crate::camera::OrbitCamera;
use crate::config::CameraConfig;
use crate::controller::{LoadRequest, LoadState, Notification, Transition, ViewerController, ViewerState};
use crate::loaders::{AssetRequester, LoadOutcome, MeshData};
use crate::ui::CarouselView;

/// User intent produced by the UI and keyboard shortcuts
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ViewerAction {
    Next,
    Previous,
    Select(usize),
    Retry,
    ResetCamera,
}

/// Wires the controller to the camera and the asset loader
pub struct Session<R> {
    controller: ViewerController,
    camera: OrbitCamera,
    requester: R,
}

impl<R: AssetRequester> Session<R> {
    pub fn new(controller: ViewerController, camera: &CameraConfig, requester: R) -> Self {
        let position = controller.active_entry().initial_camera_position;
        let camera = OrbitCamera::from_config(camera, position);

        Self {
            controller,
            camera,
            requester,
        }
    }

    /// Issue the load for the initial entry
    pub fn start(&mut self) {
        let request = self.controller.initial_request();
        self.dispatch(request);
    }

    pub fn controller(&self) -> &ViewerController {
        &self.controller
    }

    pub fn state(&self) -> ViewerState {
        self.controller.state()
    }

    pub fn camera(&self) -> &OrbitCamera {
        &self.camera
    }

    pub fn camera_mut(&mut self) -> &mut OrbitCamera {
        &mut self.camera
    }

    pub fn requester(&self) -> &R {
        &self.requester
    }

    /// Returns true when the action changed the active selection
    pub fn apply(&mut self, action: ViewerAction) -> bool {
        let transition = match action {
            ViewerAction::Next => self.controller.select_next(),
            ViewerAction::Previous => self.controller.select_previous(),
            ViewerAction::Retry => self.controller.retry(),
            ViewerAction::Select(index) => match self.controller.select_index(index) {
                Ok(transition) => transition,
                Err(e) => {
                    warn!("Ignoring selection: {}", e);
                    Transition::Unchanged
                }
            },
            ViewerAction::ResetCamera => {
                self.reset_camera();
                return false;
            }
        };

        match transition {
            Transition::Changed(request) => {
                self.reset_camera();
                self.dispatch(request);
                true
            }
            Transition::Unchanged => {
                debug!("{:?} rejected in state {:?}", action, self.controller.state());
                false
            }
        }
    }

    /// Feed a finished decode back into the controller. Returns the mesh
    /// only when the outcome belongs to the current generation.
    pub fn on_load_outcome(&mut self, outcome: LoadOutcome) -> Option<MeshData> {
        let generation = outcome.request.generation;
        match outcome.result {
            Ok(mesh) => match self.controller.notify_asset_loaded(generation) {
                Notification::Accepted => {
                    info!("{:?} ready ({})", self.controller.active_entry().name, generation);
                    Some(mesh)
                }
                verdict => {
                    debug!("Discarding decoded mesh for {}: {:?}", generation, verdict);
                    None
                }
            },
            Err(e) => {
                let reason = format!("{:#}", e);
                if self.controller.notify_asset_failed(generation, reason.clone()) == Notification::Accepted {
                    warn!("{:?} failed to load: {}", self.controller.active_entry().name, reason);
                }
                None
            }
        }
    }

    /// Snapshot of everything the presentation layer draws
    pub fn view(&self, fps: Option<f32>) -> CarouselView {
        let state = self.controller.state();
        CarouselView {
            names: self.controller.catalog().names().map(str::to_owned).collect(),
            active_index: state.active_index,
            loading: state.load == LoadState::Loading,
            failure: self.controller.failure().map(str::to_owned),
            fps,
        }
    }

    fn reset_camera(&mut self) {
        let position = self.controller.active_entry().initial_camera_position;
        self.camera.reset(position);
    }

    fn dispatch(&mut self, request: LoadRequest) {
        self.requester.request(self.controller.active_entry(), request);
    }
}
