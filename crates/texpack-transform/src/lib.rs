//! texpack Transform - Resampling
//!
//! Sources that disagree in size are brought to a common resolution with
//! separable bicubic resampling ([`scale`]).

pub mod error;
pub mod scale;

pub use error::{TransformError, TransformResult};
pub use scale::{scale_plane_to_size, scale_to_size};
