//! Entity Component System module
//!
//! Built on top of the hecs ECS library

mod components;
mod hierarchy;
mod world;

pub use components::{Name, Transform};
pub use hierarchy::{Children, Parent};
pub use world::World;
