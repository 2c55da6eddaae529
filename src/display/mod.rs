// Display module - Frame buffer and NES palette
//
// This module provides:
// - NES color palette (52 unique colors)
// - Frame buffer (256x240 pixels)
//
// Blitting the frame buffer to a screen is a host-loop concern and lives
// outside this crate.

pub mod framebuffer;
pub mod palette;

pub use framebuffer::{FrameBuffer, SCREEN_HEIGHT, SCREEN_WIDTH};
pub use palette::{palette_to_rgb, palette_to_rgba, NES_PALETTE};
