//! Game flow
//!
//! The Menu / Playing / Paused state machine, the mapping from input edges to
//! commands, and the session that wires everything together.

mod dispatch;
mod session;
mod state;

pub use dispatch::{GameCommand, command_for};
pub use session::GameSession;
pub use state::{GameContext, GameManager, GameState};
