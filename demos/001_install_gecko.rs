//! Geckodriver installation.
//!
//! Demonstrates:
//! - Installing the latest geckodriver release
//! - Pinning an explicit version
//! - Inspecting the version marker written next to the binary
//!
//! Usage:
//!   cargo run --example 001_install_gecko
//!   cargo run --example 001_install_gecko -- --version 0.36.0
//!   cargo run --example 001_install_gecko -- --dir /tmp/drivers --debug

mod common;

// ============================================================================
// Imports
// ============================================================================

use common::Args;
use webdriver_provision::{
    DownloaderConfig, DriverDownloader, GeckoDownloader, Result, VERSION_MARKER_FILENAME,
};

// ============================================================================
// Main
// ============================================================================

#[tokio::main]
async fn main() {
    let args = Args::parse();
    common::init_logging(args.debug);

    if let Err(e) = run(args).await {
        eprintln!("\n[ERROR] {e}");
        std::process::exit(1);
    }
}

async fn run(args: Args) -> Result<()> {
    println!("=== 001: Install geckodriver ===\n");

    // ========================================================================
    // Configure
    // ========================================================================

    println!("[1] Configuring...");
    println!("    Directory: {}", args.dir.display());

    let mut config = DownloaderConfig::new().with_directory(&args.dir);
    match &args.version {
        Some(version) => {
            println!("    Version: {version} (pinned)");
            config = config.with_version(version);
        }
        None => println!("    Version: latest"),
    }
    println!();

    // ========================================================================
    // Install
    // ========================================================================

    println!("[2] Installing...");

    let mut downloader = GeckoDownloader::new()?;
    downloader.configure(config);
    downloader.install().await?;

    println!(
        "    ✓ Installed {} {}\n",
        downloader.family(),
        downloader.config().version
    );

    // ========================================================================
    // Inspect Marker
    // ========================================================================

    println!("[3] Reading version marker...");

    let marker = args.dir.join(VERSION_MARKER_FILENAME);
    let contents = std::fs::read_to_string(&marker)?;
    println!("    {} -> {}", marker.display(), contents.trim());

    println!("\n=== Done ===");
    Ok(())
}
