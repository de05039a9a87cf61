//! Size reconciliation
//!
//! All present channel sources must share one resolution. The reference is
//! the source with the largest pixel count; on a tie the first in slot
//! order wins. Any present source of a different size is an error naming
//! the first such source in slot order.

use crate::{PackError, PackResult};
use std::path::Path;

/// Name and resolution of one channel source.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SourceInfo {
    /// Display name used in error messages (usually the file name)
    pub name: String,
    pub width: u32,
    pub height: u32,
}

impl SourceInfo {
    pub fn new(name: impl Into<String>, (width, height): (u32, u32)) -> Self {
        SourceInfo {
            name: name.into(),
            width,
            height,
        }
    }

    /// Probe a file's header for its resolution without decoding pixels.
    ///
    /// # Errors
    ///
    /// Returns [`PackError::SourceLoad`] if the header cannot be read.
    pub fn from_path(path: &Path) -> PackResult<Self> {
        let header =
            texpack_io::read_image_header(path).map_err(|cause| PackError::SourceLoad {
                path: path.to_path_buf(),
                cause,
            })?;
        Ok(SourceInfo::new(display_name(path), header.dimensions()))
    }

    /// `(width, height)`
    pub fn size(&self) -> (u32, u32) {
        (self.width, self.height)
    }

    /// `width * height`
    pub fn pixel_count(&self) -> u64 {
        u64::from(self.width) * u64::from(self.height)
    }
}

/// File name of `path`, or the whole path if it has none.
pub(crate) fn display_name(path: &Path) -> String {
    path.file_name()
        .map(|n| n.to_string_lossy().into_owned())
        .unwrap_or_else(|| path.display().to_string())
}

/// Find the common resolution of the present sources.
///
/// Returns `Ok(None)` if every slot is absent.
///
/// # Errors
///
/// Returns [`PackError::SizeMismatch`] if any present source differs from
/// the largest one.
pub fn reconcile_sizes(sources: &[Option<SourceInfo>]) -> PackResult<Option<(u32, u32)>> {
    let mut reference: Option<&SourceInfo> = None;
    for info in sources.iter().flatten() {
        if reference.is_none_or(|r| info.pixel_count() > r.pixel_count()) {
            reference = Some(info);
        }
    }
    let Some(reference) = reference else {
        return Ok(None);
    };

    let expected = reference.size();
    if let Some(odd) = sources.iter().flatten().find(|s| s.size() != expected) {
        return Err(PackError::SizeMismatch {
            offending_name: odd.name.clone(),
            offending_size: odd.size(),
            expected_size: expected,
            reference_name: reference.name.clone(),
        });
    }

    tracing::debug!(width = expected.0, height = expected.1, reference = %reference.name, "sizes reconciled");
    Ok(Some(expected))
}

/// Reconcile sources given as optional file paths, probing headers only.
///
/// # Errors
///
/// Returns [`PackError::SourceLoad`] for an unreadable header, otherwise as
/// [`reconcile_sizes`].
pub fn reconcile_paths<P: AsRef<Path>>(paths: &[Option<P>]) -> PackResult<Option<(u32, u32)>> {
    let infos = paths
        .iter()
        .map(|p| p.as_ref().map(|p| SourceInfo::from_path(p.as_ref())).transpose())
        .collect::<PackResult<Vec<_>>>()?;
    reconcile_sizes(&infos)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn info(name: &str, w: u32, h: u32) -> Option<SourceInfo> {
        Some(SourceInfo::new(name, (w, h)))
    }

    #[test]
    fn test_all_absent() {
        assert_eq!(reconcile_sizes(&[None, None, None, None]).unwrap(), None);
        assert_eq!(reconcile_sizes(&[]).unwrap(), None);
    }

    #[test]
    fn test_common_size() {
        let sources = [info("r", 64, 32), None, info("b", 64, 32), None];
        assert_eq!(reconcile_sizes(&sources).unwrap(), Some((64, 32)));
    }

    #[test]
    fn test_mismatch_names_odd_one_out() {
        let sources = [
            info("rough.png", 100, 100),
            info("metal.png", 50, 50),
            None,
            info("mask.png", 100, 100),
        ];
        match reconcile_sizes(&sources) {
            Err(PackError::SizeMismatch {
                offending_name,
                offending_size,
                expected_size,
                reference_name,
            }) => {
                assert_eq!(offending_name, "metal.png");
                assert_eq!(offending_size, (50, 50));
                assert_eq!(expected_size, (100, 100));
                assert_eq!(reference_name, "rough.png");
            }
            other => panic!("unexpected result {other:?}"),
        }
    }

    #[test]
    fn test_largest_is_reference_even_if_later() {
        let sources = [info("small", 10, 10), None, None, info("big", 20, 20)];
        match reconcile_sizes(&sources) {
            Err(PackError::SizeMismatch {
                offending_name,
                reference_name,
                ..
            }) => {
                assert_eq!(offending_name, "small");
                assert_eq!(reference_name, "big");
            }
            other => panic!("unexpected result {other:?}"),
        }
    }

    #[test]
    fn test_tie_first_in_slot_order_is_reference() {
        // Same pixel count, different shape
        let sources = [None, info("wide", 20, 10), info("tall", 10, 20), None];
        match reconcile_sizes(&sources) {
            Err(PackError::SizeMismatch {
                offending_name,
                expected_size,
                reference_name,
                ..
            }) => {
                assert_eq!(reference_name, "wide");
                assert_eq!(expected_size, (20, 10));
                assert_eq!(offending_name, "tall");
            }
            other => panic!("unexpected result {other:?}"),
        }
    }

    #[test]
    fn test_display_name() {
        assert_eq!(display_name(Path::new("a/b/rough.png")), "rough.png");
    }
}
