//! Input handling module
//!
//! Provides raw device state, data-driven action maps and the per-session
//! action layer with its mutually exclusive contexts.

mod bindings;
mod manager;
mod snapshot;
mod state;

pub use bindings::{
    ActionDef, ActionKind, ActionMapDef, Binding, BindingError, InputActionAsset, Trigger,
};
pub use manager::{InputAction, InputContext, InputManager};
pub use snapshot::InputSnapshot;
pub use state::{Input, InputSource};
