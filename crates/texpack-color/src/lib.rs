//! texpack Color - Transfer curves and solid colors
//!
//! - **Gamma** ([`gamma`]): the linear to sRGB encode curve applied by the
//!   unpack path, per sample and as an 8-bit lookup table
//! - **Solid colors** ([`solid`]): hex color parsing and the uniform images
//!   used when a channel is assigned a flat color

pub mod error;
pub mod gamma;
pub mod solid;

pub use error::{ColorError, ColorResult};
pub use gamma::{apply_gamma, linear_to_srgb, linear_to_srgb_lut, linear_to_srgb_u8};
pub use solid::{Rgb, solid_raster};
