//! Command line interface for csig.

use std::io;
use std::path::PathBuf;

use clap::Parser;
use libcsig::Csig;

#[derive(Parser)]
#[command(author, version, about, long_about = None)]
struct Cli {
    /// C header to inspect
    header: PathBuf,

    /// File to write the listing to; defaults to the header with a .sig extension
    #[arg(short, long)]
    output: Option<PathBuf>,

    /// Marker tag emitted ahead of every signature line
    #[arg(long, default_value = "extern")]
    marker: String,

    /// Preprocessor command used to expand the header
    #[arg(long, default_value = "cc -E", env = "CSIG_CPP")]
    cpp: String,

    /// Add a directory to the preprocessor include search path
    #[arg(short = 'I', long = "include", value_name = "DIR")]
    include: Vec<PathBuf>,

    /// Define a preprocessor macro, as NAME or NAME=VALUE
    #[arg(short = 'D', long = "define", value_name = "DEF")]
    define: Vec<String>,

    /// Parse the header as-is instead of running the preprocessor
    #[arg(long, default_value_t = false)]
    no_cpp: bool,

    /// Print the parsed declarations as JSON instead of writing a listing
    #[arg(long, default_value_t = false)]
    raw: bool,

    /// Write the listing to stdout instead of a file
    #[arg(long, default_value_t = false)]
    stdout: bool,
}

fn run(cli: &Cli) -> Result<(), Box<dyn std::error::Error>> {
    let mut csig = Csig::new()
        .with_cpp_command(cli.cpp.clone())
        .with_marker(cli.marker.clone())
        .with_preprocess(!cli.no_cpp);
    for dir in &cli.include {
        csig = csig.with_include_dir(dir);
    }
    for define in &cli.define {
        csig = csig.with_define(define.as_str());
    }

    if cli.raw {
        println!("{}", csig.raw_json(&cli.header)?);
        return Ok(());
    }

    let mut diagnostics = io::stderr();
    if cli.stdout {
        let listing = csig.render(&cli.header, &mut diagnostics)?;
        print!("{listing}");
    } else {
        let output = cli
            .output
            .clone()
            .unwrap_or_else(|| cli.header.with_extension("sig"));
        csig.write_interface(&cli.header, &output, &mut diagnostics)?;
    }

    Ok(())
}

fn main() {
    // Only initialize tracing if RUST_LOG is set
    if std::env::var("RUST_LOG").is_ok() {
        tracing_subscriber::fmt()
            .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
            .with_writer(io::stderr)
            .init();
    }

    let cli = Cli::parse();
    if let Err(e) = run(&cli) {
        eprintln!("{e}");
        std::process::exit(1);
    }
}
