//! REST API Detector CLI - find a WordPress site's REST API endpoint

use clap::{Parser, ValueEnum};
use std::process::ExitCode;

use rest_api_detector::{
    Detector, SiteInfo, StaticSiteInfo,
    output::{OutputFormat, output_detection},
};

/// Detects a WordPress site's REST API endpoint and metadata
#[derive(Parser, Debug)]
#[command(name = "rest-api-detector")]
#[command(version, about, long_about = None)]
struct Args {
    /// URL or domain of the site to detect (e.g. example.com)
    site: String,

    /// Output format
    #[arg(short = 'o', long = "output", default_value = "human", value_enum)]
    output_format: OutputFormatArg,
}

/// Output format argument
#[derive(Clone, Copy, Debug, ValueEnum)]
enum OutputFormatArg {
    Human,
    Json,
    None,
}

impl From<OutputFormatArg> for OutputFormat {
    fn from(arg: OutputFormatArg) -> Self {
        match arg {
            OutputFormatArg::Human => OutputFormat::Human,
            OutputFormatArg::Json => OutputFormat::Json,
            OutputFormatArg::None => OutputFormat::None,
        }
    }
}

#[tokio::main]
async fn main() -> ExitCode {
    let args = Args::parse();

    match run_detect(&args.site, args.output_format.into()).await {
        Ok(_) => ExitCode::SUCCESS,
        Err(e) => {
            eprintln!("Error: {}", e);
            ExitCode::FAILURE
        }
    }
}

async fn run_detect(site: &str, format: OutputFormat) -> rest_api_detector::Result<()> {
    // A standalone binary has no ambient "current site"; the local branch of
    // the detector is for embedders, so the CLI always queries a remote site.
    let local = StaticSiteInfo::new(SiteInfo {
        name: String::new(),
        description: String::new(),
        site_url: String::new(),
        rest_api_url: String::new(),
    });
    let detector = Detector::new(local)?;
    let detection = detector.detect(Some(site)).await?;

    let stdout = std::io::stdout();
    let mut writer = stdout.lock();
    output_detection(&detection, format, &mut writer)?;

    Ok(())
}
