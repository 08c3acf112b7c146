use clap::Parser;
use std::path::PathBuf;

#[derive(Parser, Debug)]
#[command(name = "plant-health")]
#[command(version)]
#[command(about = "Relative vegetation health from an infrablue photograph")]
#[command(long_about = "Computes NDVI from the infrared (red channel) and blue channels of an \
infrablue PNG, separates vegetation with Otsu's threshold and prints the summed NDVI of the \
vegetation pixels.")]
pub struct Cli {
    /// Infrablue input image (PNG)
    pub input: PathBuf,

    /// Verbose diagnostics on stderr
    #[arg(short, long)]
    pub debug: bool,

    /// Export the binary vegetation mask instead of the scaled NDVI
    #[arg(short, long)]
    pub mask: bool,

    /// Write the visualization to this PNG file
    #[arg(short, long)]
    pub output: Option<PathBuf>,

    /// JSON run configuration; command-line flags take precedence
    #[arg(long)]
    pub config: Option<PathBuf>,

    /// Worker threads (default: number of CPUs)
    #[arg(long)]
    pub threads: Option<usize>,

    /// Fail instead of clamping scaled samples outside 0-255
    #[arg(long)]
    pub strict_histogram: bool,

    /// Print a JSON report instead of the bare score
    #[arg(long)]
    pub json: bool,
}
