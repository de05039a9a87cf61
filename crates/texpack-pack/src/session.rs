//! Single-image unpacking session
//!
//! Load one packed image, split it, then save the planes. Each step
//! publishes a [`SessionEvent`].

use crate::extract::{UnpackOptions, base_name, save_planes, unpack_raster};
use crate::observer::{Observer, Observers};
use crate::{PackError, PackResult};
use std::path::{Path, PathBuf};
use texpack_core::{Plane, Raster};

/// Notifications published by [`UnpackSession`].
#[derive(Debug, Clone)]
pub enum SessionEvent {
    ImageLoaded { path: PathBuf, image: Raster },
    ChannelsUnpacked { planes: [Plane; 4] },
    ChannelsSaved { files: Vec<PathBuf> },
}

/// Holds one loaded image and its unpacked planes.
#[derive(Debug, Default)]
pub struct UnpackSession {
    options: UnpackOptions,
    path: Option<PathBuf>,
    image: Option<Raster>,
    planes: Option<[Plane; 4]>,
    observers: Observers<SessionEvent>,
}

impl UnpackSession {
    pub fn new(options: UnpackOptions) -> Self {
        UnpackSession {
            options,
            ..Default::default()
        }
    }

    pub fn subscribe(&mut self, observer: impl Observer<SessionEvent> + 'static) {
        self.observers.subscribe(observer);
    }

    pub fn set_gamma_correction(&mut self, enabled: bool) {
        self.options.gamma_correction = enabled;
    }

    pub fn options(&self) -> &UnpackOptions {
        &self.options
    }

    pub fn image(&self) -> Option<&Raster> {
        self.image.as_ref()
    }

    pub fn planes(&self) -> Option<&[Plane; 4]> {
        self.planes.as_ref()
    }

    /// Decode `path`, dropping any previously unpacked planes.
    ///
    /// # Errors
    ///
    /// Returns [`PackError::SourceLoad`] if decoding fails.
    pub fn load<P: AsRef<Path>>(&mut self, path: P) -> PackResult<()> {
        let path = path.as_ref();
        let image = texpack_io::read_image(path).map_err(|cause| PackError::SourceLoad {
            path: path.to_path_buf(),
            cause,
        })?;
        self.path = Some(path.to_path_buf());
        self.image = Some(image.clone());
        self.planes = None;
        self.observers.publish(SessionEvent::ImageLoaded {
            path: path.to_path_buf(),
            image,
        });
        Ok(())
    }

    /// Split the loaded image with the current options.
    ///
    /// # Errors
    ///
    /// Returns [`PackError::NothingLoaded`] if no image is loaded.
    pub fn unpack(&mut self) -> PackResult<&[Plane; 4]> {
        let image = self.image.as_ref().ok_or(PackError::NothingLoaded)?;
        let planes = unpack_raster(image, &self.options);
        self.observers.publish(SessionEvent::ChannelsUnpacked {
            planes: planes.clone(),
        });
        let planes: &[Plane; 4] = self.planes.insert(planes);
        Ok(planes)
    }

    /// Write the unpacked planes as `{base}_{letter}.png` into `output_dir`.
    ///
    /// `base` is the loaded file's stem.
    ///
    /// # Errors
    ///
    /// Returns [`PackError::NothingUnpacked`] before [`unpack`](Self::unpack),
    /// otherwise as [`save_planes`].
    pub fn save_channels<P: AsRef<Path>>(&mut self, output_dir: P) -> PackResult<Vec<PathBuf>> {
        let planes = self.planes.as_ref().ok_or(PackError::NothingUnpacked)?;
        let base = self
            .path
            .as_deref()
            .map_or_else(|| crate::DEFAULT_BASE_NAME.to_string(), base_name);
        let files = save_planes(planes, output_dir.as_ref(), &base)?;
        tracing::info!(count = files.len(), dir = %output_dir.as_ref().display(), "channels saved");
        self.observers.publish(SessionEvent::ChannelsSaved {
            files: files.clone(),
        });
        Ok(files)
    }
}
