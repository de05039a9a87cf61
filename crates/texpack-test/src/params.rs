//! Regression check accumulator

use crate::error::{TestError, TestResult};
use crate::regout_dir;
use std::fs;
use texpack_core::{Plane, Raster};

/// What a regression run does besides comparing
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum RegTestMode {
    /// Compare only
    #[default]
    Compare,
    /// Compare, and write intermediate planes to `regout`
    Display,
}

impl RegTestMode {
    /// Read `REGTEST_MODE`; anything but `display` means compare.
    pub fn from_env() -> Self {
        match std::env::var("REGTEST_MODE") {
            Ok(v) if v.eq_ignore_ascii_case("display") => Self::Display,
            _ => Self::Compare,
        }
    }
}

/// Accumulates numbered checks for one regression test.
///
/// Checks never panic; failures are collected and reported together by
/// [`cleanup`](Self::cleanup), so one run shows every broken check.
pub struct RegParams {
    /// Name of the test (e.g., "pack")
    pub test_name: String,
    pub mode: RegTestMode,
    /// Number of checks performed so far
    index: usize,
    failures: Vec<String>,
}

impl RegParams {
    /// Start a run named `test_name`, mode taken from `REGTEST_MODE`.
    pub fn new(test_name: &str) -> Self {
        let mode = RegTestMode::from_env();
        eprintln!("\n==== {test_name}_reg ({mode:?}) ====");
        Self {
            test_name: test_name.to_string(),
            mode,
            index: 0,
            failures: Vec::new(),
        }
    }

    /// Number of checks performed so far
    pub fn index(&self) -> usize {
        self.index
    }

    pub fn display(&self) -> bool {
        self.mode == RegTestMode::Display
    }

    /// Count a check; record `detail` as its failure when `ok` is false.
    fn record(&mut self, ok: bool, detail: impl FnOnce() -> String) -> bool {
        self.index += 1;
        if !ok {
            let msg = format!("{}_reg #{}: {}", self.test_name, self.index, detail());
            eprintln!("  FAIL {msg}");
            self.failures.push(msg);
        }
        ok
    }

    /// `actual` within `delta` of `expected`.
    pub fn compare_values(&mut self, expected: f64, actual: f64, delta: f64) -> bool {
        let diff = (expected - actual).abs();
        self.record(diff <= delta, || {
            format!("expected {expected}, got {actual} (diff {diff} > {delta})")
        })
    }

    /// An arbitrary condition, described by `what`.
    pub fn check(&mut self, condition: bool, what: &str) -> bool {
        self.record(condition, || what.to_string())
    }

    /// Two planes with identical size and samples.
    pub fn compare_planes(&mut self, plane1: &Plane, plane2: &Plane) -> bool {
        let detail = if plane1.dimensions() != plane2.dimensions() {
            Some(format!(
                "plane size {:?} vs {:?}",
                plane1.dimensions(),
                plane2.dimensions()
            ))
        } else {
            first_difference(plane1.data(), plane2.data(), plane1.width()).map(|(x, y)| {
                format!(
                    "plane sample at ({x}, {y}): {} vs {}",
                    plane1.get_unchecked(x, y),
                    plane2.get_unchecked(x, y)
                )
            })
        };
        self.record(detail.is_none(), || detail.unwrap_or_default())
    }

    /// Every sample of `plane` equals `value`.
    pub fn compare_uniform(&mut self, plane: &Plane, value: u8) -> bool {
        let found = plane
            .data()
            .iter()
            .position(|&v| v != value)
            .map(|pos| (pos, plane.data()[pos]));
        let w = plane.width() as usize;
        self.record(found.is_none(), || match found {
            Some((pos, v)) => format!(
                "expected uniform {value}, found {v} at ({}, {})",
                pos % w,
                pos / w
            ),
            None => String::new(),
        })
    }

    /// Two rasters with identical size and pixels.
    pub fn compare_rasters(&mut self, raster1: &Raster, raster2: &Raster) -> bool {
        let detail = if raster1.dimensions() != raster2.dimensions() {
            Some(format!(
                "raster size {:?} vs {:?}",
                raster1.dimensions(),
                raster2.dimensions()
            ))
        } else {
            first_difference(raster1.data(), raster2.data(), raster1.width()).map(|(x, y)| {
                format!(
                    "raster pixel at ({x}, {y}): {:08x} vs {:08x}",
                    raster1.get_pixel_unchecked(x, y),
                    raster2.get_pixel_unchecked(x, y)
                )
            })
        };
        self.record(detail.is_none(), || detail.unwrap_or_default())
    }

    /// In display mode, write `plane` to `regout/{test}.{label}.png`.
    pub fn display_plane(&self, plane: &Plane, label: &str) -> TestResult<()> {
        if !self.display() {
            return Ok(());
        }
        let dir = regout_dir();
        fs::create_dir_all(&dir)?;
        let path = dir.join(format!("{}.{}.png", self.test_name, label));
        texpack_io::write_plane(plane, &path).map_err(|e| TestError::ImageWrite {
            path: path.display().to_string(),
            message: e.to_string(),
        })?;
        eprintln!("  wrote {}", path.display());
        Ok(())
    }

    /// Print the summary. Returns `true` if every check passed.
    pub fn cleanup(self) -> bool {
        if self.failures.is_empty() {
            eprintln!("{}_reg: {} checks passed\n", self.test_name, self.index);
            return true;
        }
        eprintln!(
            "{}_reg: {} of {} checks failed",
            self.test_name,
            self.failures.len(),
            self.index
        );
        for failure in &self.failures {
            eprintln!("  {failure}");
        }
        eprintln!();
        false
    }

    pub fn is_success(&self) -> bool {
        self.failures.is_empty()
    }

    pub fn failures(&self) -> &[String] {
        &self.failures
    }
}

/// `(x, y)` of the first differing element of two row-major buffers.
fn first_difference<T: PartialEq>(a: &[T], b: &[T], width: u32) -> Option<(u32, u32)> {
    let width = width.max(1) as usize;
    a.iter()
        .zip(b)
        .position(|(p, q)| p != q)
        .map(|pos| ((pos % width) as u32, (pos / width) as u32))
}
