use std::path::{Path, PathBuf};
use std::time::Instant;

use anyhow::{anyhow, Context, Result};
use clap::Parser;
use clap_verbosity_flag::{InfoLevel, Verbosity};
use image_convolution as ic;
use image_convolution::{ConvolveOptions, Convolver, DynamicImageBuffer, FilterKernel};
use log::{debug, error, info};

mod structs;

#[derive(Parser)]
#[clap(version, about, long_about = None)]
#[clap(disable_help_flag = true)]
struct Cli {
    #[clap(long, action = clap::ArgAction::HelpLong)]
    help: Option<bool>,

    /// Paths to source image files
    #[clap(value_parser, required = true)]
    sources: Vec<PathBuf>,

    /// Directory for result images. Result file has the same name as the source one.
    #[clap(short, long, value_parser, default_value = ".")]
    destination: PathBuf,

    /// Suffix added to the name of result file, e.g. "_blur"
    #[clap(long, value_parser, default_value = "")]
    suffix: String,

    /// Filter applied to images if a custom kernel is not given
    #[clap(short, long, value_enum, default_value_t = structs::Preset::GaussianBlur5)]
    preset: structs::Preset,

    /// Weights of a custom square kernel separated by commas, e.g. "0,-1,0,-1,5,-1,0,-1,0"
    #[clap(short, long, value_parser, allow_hyphen_values = true)]
    kernel: Option<structs::KernelWeights>,

    /// Divide every weight of the kernel by the sum of weights
    #[clap(short, long, action)]
    normalize: bool,

    /// Order in which weights of the custom kernel are listed
    #[clap(long, value_enum, default_value_t = structs::KernelOrder::RowMajor)]
    kernel_order: structs::KernelOrder,

    /// Type of samples used while convolving
    #[clap(short, long, value_enum, default_value_t = structs::Samples::U8)]
    samples: structs::Samples,

    /// Quality of result JPEG files
    #[clap(
        long,
        value_parser = clap::value_parser!(u8).range(1..=100),
        default_value_t = ic::DEFAULT_JPEG_QUALITY
    )]
    quality: u8,

    /// Overwrite destination files
    #[clap(short, long, action)]
    overwrite: bool,

    /// Stop processing of the rest images after the first failure
    #[clap(long, action)]
    fail_fast: bool,

    #[clap(flatten)]
    verbose: Verbosity<InfoLevel>,
}

fn main() -> Result<()> {
    let cli: Cli = Cli::parse();
    env_logger::Builder::new()
        .filter_level(cli.verbose.log_level_filter())
        .init();
    run(&cli)
}

fn run(cli: &Cli) -> Result<()> {
    let kernel = create_kernel(cli)?;
    let options = ConvolveOptions::new().kernel_order(cli.kernel_order.into());

    std::fs::create_dir_all(&cli.destination).with_context(|| {
        format!(
            "Failed to create destination directory {:?}",
            cli.destination
        )
    })?;

    let mut failed = 0;
    for source_path in &cli.sources {
        match convolve_file(cli, source_path, &kernel, &options) {
            Ok(result_path) => info!("Image saved to {:?}", result_path),
            Err(err) if cli.fail_fast => return Err(err),
            Err(err) => {
                error!("{:#}", err);
                failed += 1;
            }
        }
    }

    if failed > 0 {
        return Err(anyhow!(
            "Failed to process {} of {} images",
            failed,
            cli.sources.len()
        ));
    }
    Ok(())
}

fn create_kernel(cli: &Cli) -> Result<FilterKernel> {
    let kernel = match &cli.kernel {
        Some(weights) => FilterKernel::from_weights(weights.0.clone())
            .with_context(|| "Invalid custom kernel")?,
        None => ic::FilterPreset::from(cli.preset).kernel(),
    };
    debug!("Kernel {}x{}: {:?}", kernel.size(), kernel.size(), kernel.weights());
    if cli.normalize {
        Ok(kernel.normalized())
    } else {
        Ok(kernel)
    }
}

fn convolve_file(
    cli: &Cli,
    source_path: &Path,
    kernel: &FilterKernel,
    options: &ConvolveOptions,
) -> Result<PathBuf> {
    let result_path = result_path(cli, source_path)?;
    if result_path.exists() && !cli.overwrite {
        return Err(anyhow!(
            "Destination path {:?} already exists.",
            result_path
        ));
    }

    debug!("Opening the source image {:?}", source_path);
    let src_image = ic::decode_file(source_path)?;
    info!(
        "Loaded {:?} ({}x{}, {} channels)",
        source_path,
        src_image.width(),
        src_image.height(),
        src_image.channels().count()
    );

    let src_image: DynamicImageBuffer = match cli.samples {
        structs::Samples::U8 => src_image.into(),
        structs::Samples::F32 => src_image.to_f32().into(),
    };

    let start = Instant::now();
    let dst_image = Convolver::new()
        .convolve_dynamic(&src_image, kernel, options)
        .with_context(|| "Failed to convolve image")?;
    info!(
        "Total convolution time: {:.3} ms",
        start.elapsed().as_secs_f64() * 1000.
    );

    debug!("Save the result image into the file {:?}", result_path);
    ic::encode_file(&dst_image.into_u8(), &result_path, cli.quality)?;
    Ok(result_path)
}

fn result_path(cli: &Cli, source_path: &Path) -> Result<PathBuf> {
    let stem = source_path
        .file_stem()
        .ok_or_else(|| anyhow!("Source path {:?} has no file name", source_path))?;
    let mut file_name = stem.to_os_string();
    file_name.push(&cli.suffix);
    if let Some(ext) = source_path.extension() {
        file_name.push(".");
        file_name.push(ext);
    }
    Ok(cli.destination.join(file_name))
}
