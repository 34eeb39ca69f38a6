//! Chromedriver installation.
//!
//! Demonstrates:
//! - Probing the locally installed browser for its version
//! - Resolving the matching chromedriver release
//! - Installing into a target directory
//!
//! Requires a local Chromium/Chrome installation (`chromium-browser` on
//! Linux, the Chrome registry beacon on Windows). Without one the install
//! fails with a version-resolution error.
//!
//! Usage:
//!   cargo run --example 002_install_chrome
//!   cargo run --example 002_install_chrome -- --dir /tmp/drivers --debug

mod common;

// ============================================================================
// Imports
// ============================================================================

use common::Args;
use webdriver_provision::{ChromeDownloader, DownloaderConfig, DriverDownloader, Result};

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
    println!("=== 002: Install chromedriver ===\n");

    // ========================================================================
    // Configure
    // ========================================================================

    println!("[1] Configuring...");
    println!("    Directory: {}", args.dir.display());
    println!("    Version: probed from the local browser\n");

    let mut downloader = ChromeDownloader::new()?;
    downloader.configure(DownloaderConfig::new().with_directory(&args.dir));

    // ========================================================================
    // Install
    // ========================================================================

    println!("[2] Probing browser and installing...");

    downloader.install().await?;

    println!("    ✓ Installed {}", downloader.family());
    println!("    Artifact: {}\n", downloader.basename()?);

    println!("=== Done ===");
    Ok(())
}
