//! Channel assignment model
//!
//! Holds what each of the four output channels is currently sourced from,
//! with a single-level undo per channel, and publishes a [`ModelEvent`] to
//! subscribers after every change.
//!
//! # Backup rule
//!
//! Overriding a channel with a solid color or a borrow saves the previous
//! assignment, but only if the channel held something and no backup is
//! already held. After two overrides a restore returns to the state from
//! before the first one; the intermediate override is lost. Assigning a
//! file or clearing discards the backup.
//!
//! # Example
//!
//! ```no_run
//! use texpack_core::ChannelId;
//! use texpack_pack::{AssignmentModel, PackOptions};
//!
//! let mut model = AssignmentModel::new();
//! model.assign(ChannelId::Red, "rough.png").unwrap();
//! model.assign_color(ChannelId::Green, "#000000").unwrap();
//! model.create_merged_image(32, &PackOptions::default()).unwrap();
//! model.save_merged_image("packed.png").unwrap();
//! ```

mod source;

pub use source::ChannelSource;

use crate::observer::{Observer, Observers};
use crate::reconcile::display_name;
use crate::synth::{ChannelInput, PackOptions, pack_channels};
use crate::{PackError, PackResult, UnpackOptions, unpack_channels};
use std::fs;
use std::mem;
use std::path::{Path, PathBuf};
use texpack_color::{Rgb, solid_raster};
use texpack_core::{BitDepth, ChannelId, ConvertedImage, Raster};

/// Notifications published by [`AssignmentModel`].
#[derive(Debug, Clone)]
pub enum ModelEvent {
    /// A channel now holds `image`, sourced from `source`
    ChannelUpdated {
        channel: ChannelId,
        image: Raster,
        source: ChannelSource,
    },
    /// A channel was reset to empty
    ChannelCleared { channel: ChannelId },
    /// All channels were populated from one packed image
    ImageLoaded { path: PathBuf },
    /// A merged image was composed and converted
    ImageMerged {
        bit_depth: BitDepth,
        image: ConvertedImage,
    },
    /// The merged image was written
    ImageSaved { path: PathBuf },
}

/// Model configuration
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ModelConfig {
    /// Directory receiving synthesized solid-color images
    pub scratch_dir: PathBuf,
    /// Size of a solid color when no channel holds an image
    pub default_color_size: (u32, u32),
}

impl Default for ModelConfig {
    fn default() -> Self {
        ModelConfig {
            scratch_dir: std::env::temp_dir().join("texpack_channels"),
            default_color_size: (256, 256),
        }
    }
}

#[derive(Debug, Clone, Default)]
struct Assignment {
    source: ChannelSource,
    image: Option<Raster>,
}

#[derive(Debug, Clone, Default)]
struct Slot {
    current: Assignment,
    backup: Option<Assignment>,
}

/// Per-channel sources plus the most recent merged image.
#[derive(Debug, Default)]
pub struct AssignmentModel {
    config: ModelConfig,
    slots: [Slot; 4],
    merged: Option<ConvertedImage>,
    observers: Observers<ModelEvent>,
}

impl AssignmentModel {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_config(config: ModelConfig) -> Self {
        AssignmentModel {
            config,
            ..Default::default()
        }
    }

    pub fn config(&self) -> &ModelConfig {
        &self.config
    }

    pub fn subscribe(&mut self, observer: impl Observer<ModelEvent> + 'static) {
        self.observers.subscribe(observer);
    }

    /// Current source of `channel`.
    pub fn source(&self, channel: ChannelId) -> &ChannelSource {
        &self.slots[channel.index()].current.source
    }

    /// Decoded image cached for `channel`.
    pub fn image(&self, channel: ChannelId) -> Option<&Raster> {
        self.slots[channel.index()].current.image.as_ref()
    }

    pub fn has_backup(&self, channel: ChannelId) -> bool {
        self.slots[channel.index()].backup.is_some()
    }

    /// Result of the last [`create_merged_image`](Self::create_merged_image)
    /// since channels last changed.
    pub fn merged_image(&self) -> Option<&ConvertedImage> {
        self.merged.as_ref()
    }

    /// Assign a file to `channel`, discarding any backup.
    ///
    /// # Errors
    ///
    /// Returns [`PackError::UnsupportedFormat`] for an extension outside the
    /// allow-list and [`PackError::SourceLoad`] if decoding fails.
    pub fn assign<P: AsRef<Path>>(&mut self, channel: ChannelId, path: P) -> PackResult<()> {
        let path = path.as_ref();
        if !texpack_io::is_supported_path(path) {
            return Err(PackError::UnsupportedFormat {
                path: path.to_path_buf(),
            });
        }
        let input = ChannelInput::load(path)?;
        let slot = &mut self.slots[channel.index()];
        slot.backup = None;
        slot.current = Assignment {
            source: ChannelSource::FromFile(path.to_path_buf()),
            image: Some(input.raster),
        };
        tracing::debug!(%channel, path = %path.display(), "file assigned");
        self.channel_updated(channel);
        Ok(())
    }

    /// Fill `channel` with a solid color given as `#rrggbb`.
    ///
    /// # Errors
    ///
    /// Returns [`PackError::Color`] for a malformed color, otherwise as
    /// [`assign_rgb`](Self::assign_rgb).
    pub fn assign_color(&mut self, channel: ChannelId, hex: &str) -> PackResult<()> {
        let rgb = Rgb::from_hex(hex)?;
        self.assign_rgb(channel, rgb)
    }

    /// Fill `channel` with a solid color.
    ///
    /// The image takes the size of the largest channel currently holding an
    /// image, or the configured default. It is written to the scratch
    /// directory so the channel stays file-backed.
    ///
    /// # Errors
    ///
    /// Returns [`PackError::Io`] if the scratch directory cannot be created
    /// and [`PackError::Write`] if the image cannot be written.
    pub fn assign_rgb(&mut self, channel: ChannelId, rgb: Rgb) -> PackResult<()> {
        let (width, height) = self.working_size();
        let image = solid_raster(rgb, channel, width, height)?;

        fs::create_dir_all(&self.config.scratch_dir)?;
        let path = self.config.scratch_dir.join(format!(
            "solid_color_{}_{}.png",
            rgb.to_hex(),
            channel.letter()
        ));
        texpack_io::write_raster(&image, &path).map_err(|cause| PackError::Write {
            path: path.clone(),
            cause,
        })?;

        tracing::debug!(%channel, color = %rgb, width, height, "solid color assigned");
        self.override_channel(
            channel,
            Assignment {
                source: ChannelSource::SolidColor { color: rgb, path },
                image: Some(image),
            },
        );
        Ok(())
    }

    /// Copy `from`'s image into `channel`.
    ///
    /// Borrowing a channel from itself restores its backup instead; that is
    /// a no-op when no backup is held.
    ///
    /// # Errors
    ///
    /// Returns [`PackError::EmptyChannel`] if `from` holds no image.
    pub fn borrow(&mut self, channel: ChannelId, from: ChannelId) -> PackResult<()> {
        if channel == from {
            self.restore(channel);
            return Ok(());
        }

        let donor = &self.slots[from.index()].current;
        let (Some(image), Some(source)) = (donor.image.clone(), donor.source.borrowed_by(from))
        else {
            return Err(PackError::EmptyChannel { channel: from });
        };

        tracing::debug!(%channel, %from, "channel borrowed");
        self.override_channel(
            channel,
            Assignment {
                source,
                image: Some(image),
            },
        );
        Ok(())
    }

    /// Reset `channel` to empty. The backup is discarded, so this cannot be
    /// undone.
    pub fn clear(&mut self, channel: ChannelId) {
        self.slots[channel.index()] = Slot::default();
        self.merged = None;
        tracing::debug!(%channel, "channel cleared");
        self.observers.publish(ModelEvent::ChannelCleared { channel });
    }

    /// Re-apply the backup of `channel` and drop it.
    ///
    /// Returns `false` if no backup was held.
    pub fn restore(&mut self, channel: ChannelId) -> bool {
        let slot = &mut self.slots[channel.index()];
        let Some(backup) = slot.backup.take() else {
            return false;
        };
        slot.current = backup;
        tracing::debug!(%channel, source = %slot.current.source, "channel restored");
        self.channel_updated(channel);
        true
    }

    /// Populate every channel from the planes of one packed image.
    ///
    /// Channel *k* receives plane *k* as a gray image, described as
    /// `FromFile("{path}_{letter}")`. Backups are discarded.
    ///
    /// # Errors
    ///
    /// Returns [`PackError::SourceLoad`] if the image cannot be decoded.
    pub fn load_packed<P: AsRef<Path>>(&mut self, path: P) -> PackResult<()> {
        let path = path.as_ref();
        let planes = unpack_channels(path, &UnpackOptions::default())?;
        for (channel, plane) in ChannelId::ALL.into_iter().zip(&planes) {
            self.slots[channel.index()] = Slot {
                current: Assignment {
                    source: ChannelSource::FromFile(PathBuf::from(format!(
                        "{}_{}",
                        path.display(),
                        channel.letter()
                    ))),
                    image: Some(Raster::from_gray(plane)),
                },
                backup: None,
            };
            self.channel_updated(channel);
        }
        tracing::info!(path = %path.display(), "packed image loaded");
        self.observers.publish(ModelEvent::ImageLoaded {
            path: path.to_path_buf(),
        });
        Ok(())
    }

    /// Pack the cached channel images into one raster.
    ///
    /// # Errors
    ///
    /// As [`pack_channels`].
    pub fn compose(&self, options: &PackOptions) -> PackResult<Raster> {
        let inputs = ChannelId::ALL.map(|channel| {
            let current = &self.slots[channel.index()].current;
            current.image.as_ref().map(|image| {
                let name = current
                    .source
                    .path()
                    .map(display_name)
                    .unwrap_or_else(|| channel.to_string());
                ChannelInput::new(name, image.clone())
            })
        });
        pack_channels(&inputs, options)
    }

    /// Compose and convert to `bits` (8, 16, 24 or 32), keeping the result.
    ///
    /// # Errors
    ///
    /// Returns [`PackError::UnsupportedBitDepth`] for other values, otherwise
    /// as [`compose`](Self::compose).
    pub fn create_merged_image(
        &mut self,
        bits: u32,
        options: &PackOptions,
    ) -> PackResult<&ConvertedImage> {
        let bit_depth = BitDepth::from_bits(bits)?;
        let composed = self.compose(options)?;
        if bit_depth.channels() < 4 && !composed.is_opaque() {
            tracing::warn!(bits, "alpha channel dropped by conversion");
        }
        let image = composed.convert_to_bit_depth(bit_depth);
        self.observers.publish(ModelEvent::ImageMerged {
            bit_depth,
            image: image.clone(),
        });
        let merged: &ConvertedImage = self.merged.insert(image);
        Ok(merged)
    }

    /// Write the merged image as PNG.
    ///
    /// # Errors
    ///
    /// Returns [`PackError::NothingComposed`] if no merged image exists and
    /// [`PackError::Write`] if writing fails.
    pub fn save_merged_image<P: AsRef<Path>>(&mut self, path: P) -> PackResult<()> {
        let path = path.as_ref();
        let image = self.merged.as_ref().ok_or(PackError::NothingComposed)?;
        texpack_io::write_converted(image, path).map_err(|cause| PackError::Write {
            path: path.to_path_buf(),
            cause,
        })?;
        tracing::info!(path = %path.display(), bits = image.bits_per_pixel(), "merged image saved");
        self.observers.publish(ModelEvent::ImageSaved {
            path: path.to_path_buf(),
        });
        Ok(())
    }

    /// Largest cached image size by pixel count, first in slot order on a
    /// tie.
    fn working_size(&self) -> (u32, u32) {
        let mut largest: Option<&Raster> = None;
        for image in self.slots.iter().filter_map(|s| s.current.image.as_ref()) {
            if largest.is_none_or(|l| image.pixel_count() > l.pixel_count()) {
                largest = Some(image);
            }
        }
        largest.map_or(self.config.default_color_size, Raster::dimensions)
    }

    fn override_channel(&mut self, channel: ChannelId, next: Assignment) {
        let slot = &mut self.slots[channel.index()];
        let previous = mem::replace(&mut slot.current, next);
        if slot.backup.is_none() && !previous.source.is_empty() {
            tracing::debug!(%channel, source = %previous.source, "backup saved");
            slot.backup = Some(previous);
        }
        self.channel_updated(channel);
    }

    fn channel_updated(&mut self, channel: ChannelId) {
        self.merged = None;
        let current = &self.slots[channel.index()].current;
        let event = match &current.image {
            Some(image) => ModelEvent::ChannelUpdated {
                channel,
                image: image.clone(),
                source: current.source.clone(),
            },
            None => ModelEvent::ChannelCleared { channel },
        };
        self.observers.publish(event);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::cell::RefCell;
    use std::rc::Rc;

    fn model(name: &str) -> (AssignmentModel, PathBuf) {
        let dir = texpack_test::scratch_dir(name).unwrap();
        let model = AssignmentModel::with_config(ModelConfig {
            scratch_dir: dir.join("scratch"),
            default_color_size: (8, 4),
        });
        (model, dir)
    }

    #[test]
    fn test_color_without_images_uses_default_size() {
        let (mut model, _) = model("model_default_size");
        model.assign_color(ChannelId::Blue, "#ff0000").unwrap();
        let image = model.image(ChannelId::Blue).unwrap();
        assert_eq!(image.dimensions(), (8, 4));
        assert_eq!(image.get_rgba(0, 0), Some((255, 0, 0, 255)));
        assert!(!model.has_backup(ChannelId::Blue));

        let path = model.source(ChannelId::Blue).path().unwrap();
        assert!(path.ends_with("solid_color_ff0000_B.png"));
        assert!(path.exists());
    }

    #[test]
    fn test_color_takes_largest_assigned_size() {
        let (mut model, dir) = model("model_working_size");
        let small = texpack_test::write_solid_png(&dir, "small.png", 4, 4, (1, 1, 1, 255)).unwrap();
        let big = texpack_test::write_solid_png(&dir, "big.png", 6, 5, (2, 2, 2, 255)).unwrap();
        model.assign(ChannelId::Red, &small).unwrap();
        model.assign(ChannelId::Green, &big).unwrap();
        model.assign_color(ChannelId::Alpha, "#808080").unwrap();
        assert_eq!(model.image(ChannelId::Alpha).unwrap().dimensions(), (6, 5));
    }

    #[test]
    fn test_borrow_from_empty_channel() {
        let (mut model, _) = model("model_borrow_empty");
        assert!(matches!(
            model.borrow(ChannelId::Red, ChannelId::Green),
            Err(PackError::EmptyChannel {
                channel: ChannelId::Green
            })
        ));
    }

    #[test]
    fn test_borrow_flattens_and_shares_image() {
        let (mut model, _) = model("model_borrow_flatten");
        model.assign_color(ChannelId::Red, "#102030").unwrap();
        model.borrow(ChannelId::Green, ChannelId::Red).unwrap();
        model.borrow(ChannelId::Blue, ChannelId::Green).unwrap();

        match model.source(ChannelId::Blue) {
            ChannelSource::BorrowedFrom { channel, .. } => assert_eq!(*channel, ChannelId::Red),
            other => panic!("unexpected source {other:?}"),
        }
        let red = model.image(ChannelId::Red).unwrap();
        assert!(red.ptr_eq(model.image(ChannelId::Blue).unwrap()));
    }

    #[test]
    fn test_clear_discards_backup() {
        let (mut model, _) = model("model_clear");
        model.assign_color(ChannelId::Red, "#000000").unwrap();
        model.assign_color(ChannelId::Red, "#ffffff").unwrap();
        assert!(model.has_backup(ChannelId::Red));

        model.clear(ChannelId::Red);
        assert!(model.source(ChannelId::Red).is_empty());
        assert!(!model.has_backup(ChannelId::Red));
        assert!(!model.restore(ChannelId::Red));
        assert!(model.source(ChannelId::Red).is_empty());
    }

    #[test]
    fn test_self_borrow_without_backup_is_noop() {
        let (mut model, _) = model("model_self_borrow_noop");
        model.assign_color(ChannelId::Green, "#00ff00").unwrap();
        let before = model.source(ChannelId::Green).clone();
        model.borrow(ChannelId::Green, ChannelId::Green).unwrap();
        assert_eq!(model.source(ChannelId::Green), &before);
    }

    #[test]
    fn test_events_in_order() {
        let (mut model, _) = model("model_events");
        let log = Rc::new(RefCell::new(Vec::new()));
        let sink = Rc::clone(&log);
        model.subscribe(move |e: &ModelEvent| {
            let name = match e {
                ModelEvent::ChannelUpdated { channel, .. } => format!("updated {channel}"),
                ModelEvent::ChannelCleared { channel } => format!("cleared {channel}"),
                ModelEvent::ImageLoaded { .. } => "loaded".to_string(),
                ModelEvent::ImageMerged { bit_depth, .. } => format!("merged {}", bit_depth.bits()),
                ModelEvent::ImageSaved { .. } => "saved".to_string(),
            };
            sink.borrow_mut().push(name);
        });

        model.assign_color(ChannelId::Red, "#ffffff").unwrap();
        model.borrow(ChannelId::Alpha, ChannelId::Red).unwrap();
        model.clear(ChannelId::Alpha);
        model
            .create_merged_image(24, &PackOptions::default())
            .unwrap();
        assert_eq!(
            *log.borrow(),
            vec!["updated R", "updated A", "cleared A", "merged 24"]
        );
    }

    #[test]
    fn test_merge_and_save() {
        let (mut model, dir) = model("model_merge");
        assert!(matches!(
            model.save_merged_image(dir.join("none.png")),
            Err(PackError::NothingComposed)
        ));
        assert!(matches!(
            model.create_merged_image(32, &PackOptions::default()),
            Err(PackError::NoSourcesProvided)
        ));

        model.assign_color(ChannelId::Green, "#7f7f7f").unwrap();
        assert!(matches!(
            model.create_merged_image(12, &PackOptions::default()),
            Err(PackError::UnsupportedBitDepth { value: 12 })
        ));
        let merged = model
            .create_merged_image(32, &PackOptions::default())
            .unwrap();
        assert_eq!(merged.channels(), 4);

        let out = dir.join("merged.png");
        model.save_merged_image(&out).unwrap();
        let back = texpack_io::read_image(&out).unwrap();
        assert_eq!(back.get_rgba(0, 0), Some((255, 0x7f, 255, 255)));

        // Any channel change invalidates the merged image
        model.clear(ChannelId::Green);
        assert!(model.merged_image().is_none());
    }

    #[test]
    fn test_load_packed() {
        let (mut model, dir) = model("model_load_packed");
        let packed =
            texpack_test::write_solid_png(&dir, "orm.png", 3, 2, (10, 20, 30, 40)).unwrap();
        model.assign_color(ChannelId::Red, "#000000").unwrap();
        model.assign_color(ChannelId::Red, "#ffffff").unwrap();
        model.load_packed(&packed).unwrap();

        assert!(!model.has_backup(ChannelId::Red));
        let expected = PathBuf::from(format!("{}_B", packed.display()));
        assert_eq!(
            model.source(ChannelId::Blue),
            &ChannelSource::FromFile(expected)
        );
        let composed = model.compose(&PackOptions::default()).unwrap();
        assert_eq!(composed.get_rgba(2, 1), Some((10, 20, 30, 40)));
    }
}
