//! Repository implementations for all Watchdog entities.

pub mod timer;
pub mod user;

pub use timer::TimerRepository;
pub use user::UserRepository;
