//! Batch unpacking
//!
//! Runs the channel extractor over many inputs in order. A failing item is
//! recorded and the batch moves on; it never stops early. For input
//! `dir/rock.png` the planes land in `<output>/rock/rock_{R,G,B,A}.png`.

use crate::extract::{UnpackOptions, base_name, save_planes, unpack_channels};
use crate::observer::{Observer, Observers};
use crate::{PackError, PackResult};
use std::fs;
use std::path::{Path, PathBuf};

/// Per-item lifecycle notifications.
#[derive(Debug, Clone)]
pub enum BatchEvent {
    /// Item `index` of `total` is about to be processed
    Started {
        index: usize,
        total: usize,
        path: PathBuf,
    },
    /// Item was unpacked into `files`
    ItemUnpacked {
        index: usize,
        total: usize,
        path: PathBuf,
        files: Vec<PathBuf>,
    },
    /// Item failed with `error`
    ItemFailed {
        index: usize,
        total: usize,
        path: PathBuf,
        error: String,
    },
    /// Every item has been attempted
    Completed { report: BatchReport },
}

/// Result of one batch item.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BatchItem {
    pub path: PathBuf,
    /// Written files on success, error text on failure
    pub outcome: Result<Vec<PathBuf>, String>,
}

impl BatchItem {
    pub fn is_success(&self) -> bool {
        self.outcome.is_ok()
    }
}

/// Results of a whole batch, in input order.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct BatchReport {
    items: Vec<BatchItem>,
}

impl BatchReport {
    /// Number of inputs attempted
    pub fn total(&self) -> usize {
        self.items.len()
    }

    pub fn items(&self) -> &[BatchItem] {
        &self.items
    }

    pub fn succeeded(&self) -> impl Iterator<Item = &BatchItem> {
        self.items.iter().filter(|i| i.is_success())
    }

    pub fn failed(&self) -> impl Iterator<Item = &BatchItem> {
        self.items.iter().filter(|i| !i.is_success())
    }

    /// True if no item failed.
    pub fn is_success(&self) -> bool {
        self.items.iter().all(BatchItem::is_success)
    }
}

/// Progress callback: `(index, total, path)`, called before each item.
pub type ProgressFn<'a> = &'a mut dyn FnMut(usize, usize, &Path);

/// Unpacks a list of images one at a time.
#[derive(Debug, Default)]
pub struct BatchRunner {
    options: UnpackOptions,
    observers: Observers<BatchEvent>,
}

impl BatchRunner {
    pub fn new(options: UnpackOptions) -> Self {
        BatchRunner {
            options,
            observers: Observers::new(),
        }
    }

    pub fn options(&self) -> &UnpackOptions {
        &self.options
    }

    pub fn set_gamma_correction(&mut self, enabled: bool) {
        self.options.gamma_correction = enabled;
    }

    pub fn subscribe(&mut self, observer: impl Observer<BatchEvent> + 'static) {
        self.observers.subscribe(observer);
    }

    /// Unpack every input into its own subdirectory of `output_dir`.
    ///
    /// Per-item failures (unsupported extension, undecodable file, write
    /// error) are recorded in the report rather than returned.
    ///
    /// # Errors
    ///
    /// Returns [`PackError::NoInputs`] for an empty list and
    /// [`PackError::Io`] if `output_dir` cannot be created.
    pub fn run<P: AsRef<Path>>(
        &mut self,
        inputs: &[P],
        output_dir: &Path,
        mut progress: Option<ProgressFn<'_>>,
    ) -> PackResult<BatchReport> {
        if inputs.is_empty() {
            return Err(PackError::NoInputs);
        }
        fs::create_dir_all(output_dir)?;

        let total = inputs.len();
        let mut report = BatchReport::default();
        tracing::info!(total, output = %output_dir.display(), "batch unpack started");

        for (index, input) in inputs.iter().enumerate() {
            let path = input.as_ref();
            if let Some(report_progress) = progress.as_deref_mut() {
                report_progress(index, total, path);
            }
            self.observers.publish(BatchEvent::Started {
                index,
                total,
                path: path.to_path_buf(),
            });

            let outcome = match self.process_item(path, output_dir) {
                Ok(files) => {
                    tracing::info!("[{}/{}] {}", index + 1, total, path.display());
                    self.observers.publish(BatchEvent::ItemUnpacked {
                        index,
                        total,
                        path: path.to_path_buf(),
                        files: files.clone(),
                    });
                    Ok(files)
                }
                Err(e) => {
                    let error = format!("error processing {}: {}", path.display(), e);
                    tracing::warn!("[{}/{}] {}", index + 1, total, error);
                    self.observers.publish(BatchEvent::ItemFailed {
                        index,
                        total,
                        path: path.to_path_buf(),
                        error: error.clone(),
                    });
                    Err(error)
                }
            };
            report.items.push(BatchItem {
                path: path.to_path_buf(),
                outcome,
            });
        }

        tracing::info!(
            total,
            succeeded = report.succeeded().count(),
            failed = report.failed().count(),
            "batch unpack finished"
        );
        self.observers.publish(BatchEvent::Completed {
            report: report.clone(),
        });
        Ok(report)
    }

    fn process_item(&self, path: &Path, output_dir: &Path) -> PackResult<Vec<PathBuf>> {
        if !texpack_io::is_supported_path(path) {
            return Err(PackError::UnsupportedFormat {
                path: path.to_path_buf(),
            });
        }
        let planes = unpack_channels(path, &self.options)?;
        let base = base_name(path);
        save_planes(&planes, &output_dir.join(&base), &base)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_empty_input_list() {
        let mut runner = BatchRunner::default();
        let inputs: [&str; 0] = [];
        assert!(matches!(
            runner.run(&inputs, Path::new("unused"), None),
            Err(PackError::NoInputs)
        ));
    }

    #[test]
    fn test_report_partitions() {
        let report = BatchReport {
            items: vec![
                BatchItem {
                    path: "a.png".into(),
                    outcome: Ok(vec!["a/a_R.png".into()]),
                },
                BatchItem {
                    path: "b.png".into(),
                    outcome: Err("bad".into()),
                },
            ],
        };
        assert_eq!(report.total(), 2);
        assert_eq!(report.succeeded().count(), 1);
        assert_eq!(report.failed().next().map(|i| i.path.clone()), Some("b.png".into()));
        assert!(!report.is_success());
    }
}
