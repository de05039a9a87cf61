//! Per-channel source descriptors

use std::fmt;
use std::path::{Path, PathBuf};
use texpack_color::Rgb;
use texpack_core::ChannelId;

/// Where a channel's image came from.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub enum ChannelSource {
    /// Nothing assigned
    #[default]
    Empty,
    /// Decoded from a file
    FromFile(PathBuf),
    /// Synthesized uniform color, persisted at `path`
    SolidColor { color: Rgb, path: PathBuf },
    /// Copied from another channel
    ///
    /// `channel` is always a channel whose own source is not a borrow.
    BorrowedFrom { channel: ChannelId, path: PathBuf },
}

impl ChannelSource {
    /// File backing the channel's image, if any.
    pub fn path(&self) -> Option<&Path> {
        match self {
            ChannelSource::Empty => None,
            ChannelSource::FromFile(path)
            | ChannelSource::SolidColor { path, .. }
            | ChannelSource::BorrowedFrom { path, .. } => Some(path),
        }
    }

    pub fn is_empty(&self) -> bool {
        matches!(self, ChannelSource::Empty)
    }

    /// Descriptor for a channel that copies `self`, which is held by `owner`.
    ///
    /// Borrowing a borrow resolves to the owning channel so borrows never
    /// chain. Returns `None` for an empty source.
    pub(crate) fn borrowed_by(&self, owner: ChannelId) -> Option<ChannelSource> {
        match self {
            ChannelSource::Empty => None,
            ChannelSource::BorrowedFrom { .. } => Some(self.clone()),
            ChannelSource::FromFile(path) | ChannelSource::SolidColor { path, .. } => {
                Some(ChannelSource::BorrowedFrom {
                    channel: owner,
                    path: path.clone(),
                })
            }
        }
    }
}

impl fmt::Display for ChannelSource {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ChannelSource::Empty => f.write_str("empty"),
            ChannelSource::FromFile(path) => write!(f, "file {}", path.display()),
            ChannelSource::SolidColor { color, .. } => write!(f, "color {color}"),
            ChannelSource::BorrowedFrom { channel, .. } => write!(f, "borrowed from {channel}"),
        }
    }
}
