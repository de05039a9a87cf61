//! texpack-pack - Channel packing engine
//!
//! Packs up to four grayscale sources into the Red, Green, Blue and Alpha
//! channels of one image, and splits packed images back into their planes.
//!
//! # Modules
//!
//! - [`reconcile`]: size checks across channel sources
//! - [`synth`]: channel synthesis and packing
//! - [`extract`]: channel extraction with optional sRGB gamma
//! - [`batch`]: multi-file unpacking with per-item isolation
//! - [`model`]: per-channel assignments with single-level undo
//! - [`session`]: single-image unpacking workflow
//! - [`observer`]: change notification
//!
//! # Example
//!
//! ```no_run
//! use texpack_pack::{PackOptions, pack_files};
//!
//! let sources = [Some("ao.png"), Some("rough.png"), Some("metal.png"), None];
//! let packed = pack_files(&sources, &PackOptions::default()).unwrap();
//! let rgb = packed.convert_to_bits(24).unwrap();
//! texpack_io::write_converted(&rgb, "orm.png").unwrap();
//! ```

pub mod batch;
pub mod error;
pub mod extract;
pub mod model;
pub mod observer;
pub mod reconcile;
pub mod session;
pub mod synth;

pub use batch::{BatchEvent, BatchItem, BatchReport, BatchRunner, ProgressFn};
pub use error::{PackError, PackResult};
pub use extract::{
    DEFAULT_BASE_NAME, UnpackOptions, base_name, channel_file_name, save_planes, unpack_channels,
    unpack_raster,
};
pub use model::{AssignmentModel, ChannelSource, ModelConfig, ModelEvent};
pub use observer::{Observer, Observers};
pub use reconcile::{SourceInfo, reconcile_paths, reconcile_sizes};
pub use session::{SessionEvent, UnpackSession};
pub use synth::{
    ChannelInput, EMPTY_CHANNEL_VALUE, PackOptions, pack_channels, pack_files, source_plane,
    synthesize_planes, synthesize_planes_at,
};
