pub mod clock;
pub mod controller;
pub mod gpu_context;
pub mod input_adapter;

pub use clock::{Clock, FpsCounter};
pub use controller::{Button, Controller};
pub use gpu_context::GpuContext;
pub use input_adapter::{action_for, WinitController};
