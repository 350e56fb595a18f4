//! Deterministic simulation module
//!
//! All gameplay logic lives here. This module must be pure and deterministic:
//! - Caller-supplied monotonic clock (milliseconds) and frame inputs only
//! - Seeded RNG only
//! - No rendering, file or platform dependencies on the per-frame path

pub mod camera;
pub mod hammer;
pub mod ray;
pub mod round;
pub mod scheduler;
pub mod slots;
pub mod state;
pub mod tick;

pub use camera::Camera;
pub use hammer::{Hammer, HammerPhase, SwingImpact};
pub use ray::{Ray, Viewport};
pub use round::RoundTimer;
pub use scheduler::MoleScheduler;
pub use slots::{Slot, SlotLoadError, SlotRegistry};
pub use state::{GameEvent, GameState};
pub use tick::{ClickRay, TickInput, tick};
