use std::process::ExitCode;
use std::time::Instant;

use clap::Parser as Clap_parser;
use nlmeans::config::DEFAULT_JPEG_QUALITY;
use nlmeans::{file_helpers, pixels};
use tracing::{error, info};

#[derive(Clap_parser, Debug, Clone)]
#[command(author, version, about = "Converts an image to grayscale luma", long_about = None)]
struct Args {
    #[arg(name = "input path", value_name = "input_path")]
    input_path: String,

    #[arg(name = "output path", value_name = "output_path")]
    output_path: String,

    #[arg(short, long, default_value_t = DEFAULT_JPEG_QUALITY)]
    quality: u8,
}

fn run(args: &Args) -> nlmeans::error::Result<()> {
    let now = Instant::now();
    let (rgb, width, height) = file_helpers::read_rgb(&args.input_path)?;
    let luma = pixels::to_luma(&rgb, width, height)?;
    file_helpers::save_gray_jpeg(&args.output_path, &luma, width, height, args.quality)?;
    info!("grayscale image saved to {} in {:.2?}", args.output_path, now.elapsed());
    Ok(())
}

fn main() -> ExitCode {
    nlmeans::init_logging();
    let args = Args::parse();

    match run(&args) {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            error!("{e}");
            ExitCode::FAILURE
        }
    }
}
