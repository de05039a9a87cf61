// ============================================================================
// texpack CLI: headless channel packing via command-line arguments
// ============================================================================
//
// Usage examples:
//   texpack pack --red ao.png --green rough.png --blue metal.png -o orm.png
//   texpack pack --red ao.png --alpha '#ffffff' --bit-depth 32 -o out.png
//   texpack unpack orm.png --output-dir channels/ --gamma
//   texpack batch a.png b.dds c.png --output-dir unpacked/
//   texpack info orm.png

use std::path::{Path, PathBuf};
use std::process::ExitCode;

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};

use texpack::ChannelId;
use texpack::pack::{AssignmentModel, BatchRunner, PackOptions, UnpackOptions, UnpackSession};

/// Pack grayscale maps into texture channels and split them again.
#[derive(Parser, Debug)]
#[command(name = "texpack")]
#[command(version, about, long_about = None)]
pub struct Args {
    #[command(subcommand)]
    pub command: Command,

    /// Enable verbose output.
    #[arg(short, long, global = true)]
    pub verbose: bool,
}

#[derive(Subcommand, Debug)]
pub enum Command {
    /// Pack up to four sources into one image.
    ///
    /// Each channel takes an image path or a `#rrggbb` color. Channels left
    /// out are filled with white.
    Pack {
        /// Red channel source.
        #[arg(long, value_name = "PATH|#RRGGBB")]
        red: Option<String>,

        /// Green channel source.
        #[arg(long, value_name = "PATH|#RRGGBB")]
        green: Option<String>,

        /// Blue channel source.
        #[arg(long, value_name = "PATH|#RRGGBB")]
        blue: Option<String>,

        /// Alpha channel source.
        #[arg(long, value_name = "PATH|#RRGGBB")]
        alpha: Option<String>,

        /// Output PNG path.
        #[arg(short, long, value_name = "FILE")]
        output: PathBuf,

        /// Output bits per pixel: 8, 16, 24 or 32.
        #[arg(short, long, default_value_t = 32, value_name = "BITS")]
        bit_depth: u32,

        /// Force fully transparent source pixels to white.
        #[arg(long)]
        flatten_transparent: bool,
    },

    /// Split one packed image into per-channel grayscale PNGs.
    Unpack {
        /// Packed image (.png or .dds).
        #[arg(value_name = "INPUT")]
        input: PathBuf,

        /// Directory receiving `{name}_{R,G,B,A}.png`.
        #[arg(long, default_value = ".", value_name = "DIR")]
        output_dir: PathBuf,

        /// Apply the linear to sRGB curve to every channel.
        #[arg(long)]
        gamma: bool,
    },

    /// Unpack many images, each into its own subdirectory.
    Batch {
        /// Packed images (.png or .dds).
        #[arg(value_name = "INPUTS", required = true, num_args = 1..)]
        inputs: Vec<PathBuf>,

        /// Root output directory.
        #[arg(long, value_name = "DIR")]
        output_dir: PathBuf,

        /// Apply the linear to sRGB curve to every channel.
        #[arg(long)]
        gamma: bool,
    },

    /// Print dimensions and bit depth of an image.
    Info {
        #[arg(value_name = "INPUT")]
        input: PathBuf,
    },
}

/// Run one subcommand. `Ok(FAILURE)` reports a batch with failed items.
pub fn run(args: Args) -> Result<ExitCode> {
    match args.command {
        Command::Pack {
            red,
            green,
            blue,
            alpha,
            output,
            bit_depth,
            flatten_transparent,
        } => {
            let sources = [red, green, blue, alpha];
            let options = PackOptions {
                preserve_transparent_colors: !flatten_transparent,
            };
            pack(&sources, &output, bit_depth, &options)?;
        }
        Command::Unpack {
            input,
            output_dir,
            gamma,
        } => unpack(&input, &output_dir, gamma)?,
        Command::Batch {
            inputs,
            output_dir,
            gamma,
        } => return batch(&inputs, &output_dir, gamma),
        Command::Info { input } => info(&input)?,
    }
    Ok(ExitCode::SUCCESS)
}

fn pack(
    sources: &[Option<String>; 4],
    output: &Path,
    bit_depth: u32,
    options: &PackOptions,
) -> Result<()> {
    let mut model = AssignmentModel::new();
    let (colors, paths): (Vec<_>, Vec<_>) = ChannelId::ALL
        .into_iter()
        .zip(sources)
        .filter_map(|(channel, source)| source.as_deref().map(|s| (channel, s)))
        .partition(|(_, source)| source.starts_with('#'));

    // Colors take the size of the largest loaded file, so files go first
    for (channel, path) in paths {
        model
            .assign(channel, path)
            .with_context(|| format!("Failed to load channel {channel}"))?;
    }
    for (channel, hex) in colors {
        model
            .assign_color(channel, hex)
            .with_context(|| format!("Invalid color for channel {channel}"))?;
    }

    let merged = model
        .create_merged_image(bit_depth, options)
        .context("Failed to pack channels")?;
    let (width, height) = merged.dimensions();
    model
        .save_merged_image(output)
        .context("Failed to save packed image")?;

    println!(
        "Packed {}x{} ({} bit) -> {}",
        width,
        height,
        bit_depth,
        output.display()
    );
    Ok(())
}

fn unpack(input: &Path, output_dir: &Path, gamma: bool) -> Result<()> {
    let mut session = UnpackSession::new(UnpackOptions {
        gamma_correction: gamma,
    });
    session.load(input).context("Failed to load image")?;
    session.unpack()?;
    let files = session
        .save_channels(output_dir)
        .context("Failed to save channels")?;
    for file in &files {
        println!("  -> {}", file.display());
    }
    Ok(())
}

fn batch(inputs: &[PathBuf], output_dir: &Path, gamma: bool) -> Result<ExitCode> {
    let mut runner = BatchRunner::new(UnpackOptions {
        gamma_correction: gamma,
    });
    let mut progress = |index: usize, total: usize, path: &Path| {
        println!("[{}/{}] {}", index + 1, total, path.display());
    };
    let report = runner
        .run(inputs, output_dir, Some(&mut progress))
        .context("Batch unpack failed")?;

    for item in report.failed() {
        if let Err(error) = &item.outcome {
            eprintln!("  error: {error}");
        }
    }
    println!(
        "{} of {} images unpacked into {}",
        report.succeeded().count(),
        report.total(),
        output_dir.display()
    );

    if report.is_success() {
        Ok(ExitCode::SUCCESS)
    } else {
        Ok(ExitCode::FAILURE)
    }
}

fn info(input: &Path) -> Result<()> {
    let header = texpack::io::read_image_header(input)
        .with_context(|| format!("Failed to read {}", input.display()))?;
    println!("{}", input.display());
    println!("  format:     {:?}", header.format);
    println!("  size:       {}x{}", header.width, header.height);
    println!("  channels:   {}", header.channels);
    println!(
        "  bit depth:  {} bits per channel, {} bits per pixel",
        header.bits_per_channel,
        header.bits_per_pixel()
    );
    Ok(())
}
