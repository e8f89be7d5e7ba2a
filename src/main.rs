use anyhow::{Context, Result};
use clap::{Parser, Subcommand, ValueEnum};
use rectcover::binarize::Binarizer;
use rectcover::capture::{self, ImageSequence};
use rectcover::decompose::{self, Algorithm, BinaryMask, ScanOrder};
use rectcover::orchestrate::Orchestrator;
use rectcover::output::{self, FrameSink, PngDump, Summary};
use std::path::PathBuf;
use std::time::Instant;

#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
struct Args {
    /// Enable debug logging
    #[arg(long, global = true)]
    debug: bool,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Convert extracted video frames into box files
    Convert(ConvertArgs),

    /// Re-encode an existing boxes JSON file as the binary format
    Pack(PackArgs),
}

#[derive(clap::Args, Debug)]
struct ConvertArgs {
    /// Frame image, or directory of frame images in name order
    #[arg(short, long)]
    input: PathBuf,

    /// Width frames are resized to before thresholding
    #[arg(long, default_value_t = 64, value_parser = clap::value_parser!(u32).range(1..))]
    max_width: u32,

    /// Binarization threshold as a fraction of full brightness
    #[arg(long, default_value_t = 0.4)]
    threshold: f32,

    /// Decomposition algorithm; unknown names fall back to bruteforce
    #[arg(long, default_value = "bruteforce")]
    algorithm: String,

    /// Pixel scan order, which decides ties between equal-area boxes
    #[arg(long, value_enum, default_value_t = Order::RowMajor)]
    scan_order: Order,

    /// Worker threads (defaults to one per CPU)
    #[arg(long)]
    workers: Option<usize>,

    /// Output path for the JSON box list
    #[arg(long, default_value = "boxes.json")]
    boxes_json: PathBuf,

    /// Output path for the binary box stream
    #[arg(long, default_value = "boxes.bin")]
    boxes_bin: PathBuf,

    /// Write a colour-coded PNG of every frame's boxes into this directory
    #[arg(long)]
    debug_dir: Option<PathBuf>,
}

#[derive(clap::Args, Debug)]
struct PackArgs {
    /// Boxes JSON file to read
    #[arg(long, default_value = "boxes.json")]
    boxes_json: PathBuf,

    /// Binary file to write
    #[arg(long, default_value = "boxes.bin")]
    boxes_bin: PathBuf,
}

#[derive(ValueEnum, Clone, Copy, Debug)]
enum Order {
    RowMajor,
    ColumnMajor,
}

impl From<Order> for ScanOrder {
    fn from(order: Order) -> Self {
        match order {
            Order::RowMajor => ScanOrder::RowMajor,
            Order::ColumnMajor => ScanOrder::ColumnMajor,
        }
    }
}

fn main() -> Result<()> {
    let args = Args::parse();

    // Initialize logging
    let log_level = if args.debug {
        tracing::Level::DEBUG
    } else {
        tracing::Level::INFO
    };

    tracing_subscriber::fmt()
        .with_max_level(log_level)
        .with_target(false)
        .init();

    match args.command {
        Command::Convert(convert) => run_convert(convert),
        Command::Pack(pack) => run_pack(pack),
    }
}

fn run_convert(args: ConvertArgs) -> Result<()> {
    tracing::info!("rectcover starting");
    tracing::info!("Input: {}", args.input.display());

    let binarizer =
        Binarizer::new(args.max_width, args.threshold).context("Invalid binarization settings")?;
    tracing::info!(
        "Width: {}, threshold: {}",
        binarizer.target_width(),
        binarizer.threshold()
    );

    let mut source = ImageSequence::open(&args.input).context("Failed to open frame source")?;
    let load_start = Instant::now();
    let masks: Vec<BinaryMask> = capture::map_frames(&mut source, |frame| {
        binarizer.binarize(&frame)
    })
    .context("Failed to read frames")?;
    tracing::info!(
        "Binarized {} frames in {:.1}ms",
        masks.len(),
        load_start.elapsed().as_secs_f64() * 1000.0
    );

    let algorithm = Algorithm::from_name(&args.algorithm);
    let decomposer = decompose::create_decomposer(algorithm, args.scan_order.into());
    let orchestrator =
        Orchestrator::new(decomposer, args.workers).context("Failed to start workers")?;
    tracing::info!("Decomposing with {} workers", orchestrator.workers());

    // Masks are only needed after decomposition for the debug dump.
    let debug_masks = args.debug_dir.as_ref().map(|_| masks.clone());
    let batch = orchestrator.process(masks);
    if !batch.is_clean() {
        tracing::warn!("{} frames were left empty", batch.failures.len());
    }

    if let (Some(dir), Some(masks)) = (&args.debug_dir, &debug_masks) {
        let mut sink = PngDump::new(dir)?;
        for (index, (mask, boxes)) in masks.iter().zip(&batch.frames).enumerate() {
            sink.write_frame(index, mask, boxes)?;
        }
        tracing::info!("Wrote {} debug frames to {}", masks.len(), dir.display());
    }

    tracing::info!("{}", Summary::from_frames(&batch.frames));
    output::write_box_files(&args.boxes_json, &args.boxes_bin, &batch.frames)
}

fn run_pack(args: PackArgs) -> Result<()> {
    let frames = output::pack_box_file(&args.boxes_json, &args.boxes_bin)?;
    tracing::info!("{}", Summary::from_frames(&frames));
    Ok(())
}
