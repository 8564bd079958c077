#![warn(unused_extern_crates)]
use std::path::Path;
use std::process::ExitCode;
use std::time::Instant;

use clap::Parser as Clap_parser;
use nlmeans::{config, file_helpers, nl_means, Settings};
use tracing::{error, info};

#[derive(Clap_parser, Debug, Clone)]
#[command(author, version, about = "Non-local means denoising of an image", long_about = None)]
struct Args {
    #[arg(name = "input path", value_name = "input_path")]
    input_path: String,

    /// created if missing
    #[arg(name = "output folder", value_name = "output_folder")]
    output_folder: String,

    #[arg(name = "output filename", value_name = "output_filename")]
    output_filename: String,

    #[arg(
        short,
        name = "config path",
        default_value = "nlmconfig.toml",
        value_name = "config_path"
    )]
    config_path: String,
}

fn load_settings(config_path: &str) -> nlmeans::error::Result<Settings> {
    if Path::new(config_path).exists() {
        config::parse_config(config_path)
    } else {
        info!(config_path, "no config file, using defaults");
        Ok(Settings::default())
    }
}

fn run(args: &Args) -> nlmeans::error::Result<()> {
    let settings = load_settings(&args.config_path)?;

    let decode = Instant::now();
    let (pixels, width, height) = file_helpers::read_rgb(&args.input_path)?;
    info!("decode file: {:.2?}", decode.elapsed());

    let now = Instant::now();
    let denoised = nl_means::denoise(&pixels, width, height, &settings.denoise)?;
    info!("denoise time: {:.2?}", now.elapsed());

    let now = Instant::now();
    let output_path = file_helpers::output_path(&args.output_folder, &args.output_filename)?;
    file_helpers::save_jpeg(&output_path, &denoised, width, height, settings.output.jpeg_quality)?;
    info!("jpeg save: {:.2?}", now.elapsed());
    info!("total time: {:.2?}", decode.elapsed());
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
