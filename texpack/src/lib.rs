//! texpack - Texture channel packing for Rust
//!
//! Packs grayscale maps (ambient occlusion, roughness, metalness, masks)
//! into the channels of one RGBA texture and splits packed textures back
//! into their channels.
//!
//! # Overview
//!
//! - Size reconciliation across channel sources
//! - Channel synthesis with white fill for empty channels
//! - Channel extraction with optional linear to sRGB gamma
//! - Output conversion to 8, 16, 24 or 32 bits per pixel
//! - Batch unpacking with per-item error isolation
//! - A per-channel assignment model with single-level undo
//!
//! # Example
//!
//! ```
//! use texpack::{ChannelId, Raster, color};
//! use texpack::pack::{ChannelInput, PackOptions, pack_channels};
//!
//! let gray = Raster::new_filled(4, 4, color::compose_rgba(90, 90, 90, 255)).unwrap();
//! let inputs = [None, Some(ChannelInput::new("rough.png", gray)), None, None];
//! let packed = pack_channels(&inputs, &PackOptions::default()).unwrap();
//! assert_eq!(packed.get_rgba(0, 0), Some((255, 90, 255, 255)));
//! ```

// Re-export core types (primary data structures used everywhere)
pub use texpack_core::*;

// Re-export domain crates as modules to avoid name conflicts
pub use texpack_color as colors;
pub use texpack_io as io;
pub use texpack_pack as pack;
pub use texpack_transform as transform;
