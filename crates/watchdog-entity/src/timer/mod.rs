//! Timer domain entities.

pub mod event;
pub mod model;
pub mod state;

pub use event::TimerEvent;
pub use model::Timer;
pub use state::TimerState;
