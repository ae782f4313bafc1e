//! CPU scene rendering
//!
//! The whole scene is drawn into an RGBA framebuffer the host blits however
//! it likes. Rendering is a pure function of simulation state; nothing here
//! mutates the grid or the narrative.

pub mod font;
pub mod framebuffer;
pub mod scene;

pub use framebuffer::{Color, Framebuffer, PxRect};
pub use scene::{SceneRenderer, Theme};
