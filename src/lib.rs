//! ST7305 / ST7306 reflective memory-LCD driver
//!
//! Framebuffer-based driver for the two Sitronix ultra-low-power LCD
//! controllers, generic over the host platform through [`embedded-hal`]
//! traits (`SpiDevice`, `OutputPin`, `DelayNs`).
//!
//! ### Usage
//! The driver keeps the panel's packed pixel memory mirrored in RAM. To
//! display something you:
//!
//! 1. draw into the buffer, either with the native primitives
//!    ([`graphics::Primitives`] and [`font::FontRenderer`]) or through the
//!    [`embedded_graphics`](https://github.com/embedded-graphics/embedded-graphics)
//!    `DrawTarget` implementation,
//! 1. then flush the whole frame to the panel with
//!    [`st7305::St7305::display`] / [`st7306::St7306::display`].
//!
//! Pixel writes outside the panel are silently dropped, matching the
//! controller's address-window clipping. Transport failures surface as
//! [`DisplayError`].
//!
//! [`embedded-hal`]: https://github.com/rust-embedded/embedded-hal
#![cfg_attr(not(test), no_std)]
#![deny(missing_docs)]
#![allow(clippy::cast_possible_truncation)]
#![allow(clippy::cast_sign_loss)]
#![allow(clippy::must_use_candidate)]
#![allow(clippy::missing_errors_doc)]

pub mod command;
pub mod font;
pub mod framebuffer;
pub mod graphics;
pub mod interface;
pub mod power;
pub mod rotation;
pub mod st7305;
pub mod st7306;

#[cfg(test)]
pub(crate) mod test_support;

pub use display_interface::DisplayError;

pub use font::{Font, FontLayout, FontRenderer};
pub use graphics::{PixelSink, Primitives};
pub use power::PowerState;
pub use rotation::Rotation;
pub use st7305::St7305;
pub use st7306::St7306;
