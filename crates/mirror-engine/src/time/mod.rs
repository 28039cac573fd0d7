//! Time subsystem.
//!
//! Provides stable, testable frame timing utilities without coupling to the runtime.
//! Intended usage:
//! - one `FrameClock` per window; call `tick()` once per redraw to obtain `FrameTime`
//! - one `FramePacer` in the runtime to decide when the next redraw is due
//! - one `FrameScheduler` per animated widget to throttle its own repaints

mod frame_clock;
mod pacer;
mod scheduler;

pub use frame_clock::{FrameClock, FrameTime};
pub use pacer::FramePacer;
pub use scheduler::{AnimationState, FrameScheduler, FrameVerdict, DEFAULT_FRAME_INTERVAL};
