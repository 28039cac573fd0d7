//! Mirror engine crate.
//!
//! Platform + GPU runtime pieces used by the dashboard: a paced redraw loop,
//! a renderer-agnostic draw list, and the wgpu pipelines that consume it.

pub mod device;
pub mod window;
pub mod input;
pub mod time;
pub mod core;

pub mod logging;
pub mod coords;
pub mod render;
pub mod paint;
pub mod scene;
pub mod text;
