//! Workspace maintenance with the fsutil module.
//!
//! Demonstrates:
//! - Building a scratch tree littered with build artifacts
//! - Discovering artifacts with `find_glob`
//! - Removing them with `recursive_remove` under a filter
//! - Locating the enclosing repository with a memoized cache
//!
//! Usage:
//!   cargo run --example 003_workspace_cleanup
//!   cargo run --example 003_workspace_cleanup -- --keep --debug

mod common;

// ============================================================================
// Imports
// ============================================================================

use std::fs;
use std::path::Path;

use common::Args;
use webdriver_provision::Result;
use webdriver_provision::fsutil::{RepoRootCache, find_glob, recursive_remove};

// ============================================================================
// Constants
// ============================================================================

const SCRATCH_NAME: &str = "webdriver-provision-demo";

// ============================================================================
// Main
// ============================================================================

fn main() {
    let args = Args::parse();
    common::init_logging(args.debug);

    if let Err(e) = run(args) {
        eprintln!("\n[ERROR] {e}");
        std::process::exit(1);
    }
}

fn run(args: Args) -> Result<()> {
    println!("=== 003: Workspace cleanup ===\n");

    // ========================================================================
    // Build Scratch Tree
    // ========================================================================

    println!("[1] Building scratch tree...");

    let scratch = std::env::temp_dir().join(SCRATCH_NAME);
    if scratch.exists() {
        fs::remove_dir_all(&scratch)?;
    }
    build_scratch_tree(&scratch)?;
    println!("    ✓ Created at {}\n", scratch.display());

    // ========================================================================
    // Discover Artifacts
    // ========================================================================

    println!("[2] Discovering *.pyc files...");

    for rel in find_glob(&scratch, "**/*.pyc", |_| true)? {
        println!("    {rel}");
    }
    println!();

    // ========================================================================
    // Remove Cache Directories
    // ========================================================================

    println!("[3] Removing __pycache__ directories (keeping vendor/)...");

    recursive_remove(&scratch, "**/__pycache__", |entry| {
        entry.is_dir() && !entry.rel().starts_with("vendor")
    })?;

    let survivors = find_glob(&scratch, "**/__pycache__", |_| true)?.count();
    println!("    ✓ {survivors} cache directory left (under vendor/)\n");

    // ========================================================================
    // Locate Repository Root
    // ========================================================================

    println!("[4] Locating repository root...");

    let cache = RepoRootCache::new();
    match cache.resolve(".") {
        Ok(root) => println!("    ✓ {} ({} entry cached)", root.display(), cache.len()),
        Err(e) => println!("    Not inside a repository: {e}"),
    }

    // ========================================================================
    // Cleanup
    // ========================================================================

    if args.keep {
        println!("\n[--keep] Leaving scratch tree at {}", scratch.display());
    } else {
        fs::remove_dir_all(&scratch)?;
        println!("\n[Cleanup] Scratch tree removed");
    }

    println!("\n=== Done ===");
    Ok(())
}

// ============================================================================
// Helper Functions
// ============================================================================

/// Lay out a tree mixing sources, bytecode, and cache directories.
fn build_scratch_tree(root: &Path) -> std::io::Result<()> {
    for dir in ["src/__pycache__", "tests/__pycache__", "vendor/__pycache__"] {
        fs::create_dir_all(root.join(dir))?;
    }
    fs::write(root.join("src/app.py"), b"print('hi')\n")?;
    fs::write(root.join("src/app.pyc"), b"\x00")?;
    fs::write(root.join("src/__pycache__/app.cpython-311.pyc"), b"\x00")?;
    fs::write(root.join("tests/test_app.pyc"), b"\x00")?;
    Ok(())
}
