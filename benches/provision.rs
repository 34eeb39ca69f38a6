//! Provisioning benchmark suite.
//!
//! Benchmarks the hot paths at different scales:
//! - Glob discovery: 100, 1000 files
//! - Repo root walks: depth 4, 16, 64
//! - Archive extraction: 64-entry zip
//! - Buffered downloads: 256 KiB over loopback
//!
//! Run with: cargo bench --bench provision
//! Results saved to: target/criterion/

use std::fs;
use std::hint::black_box;
use std::io::Write;
use std::path::{Path, PathBuf};

use criterion::{BenchmarkId, Criterion, criterion_group, criterion_main};
use tempfile::TempDir;
use tokio::runtime::Runtime;

use webdriver_provision::Fetcher;
use webdriver_provision::fsutil::{RepoRootCache, find_glob, find_repo_root};
use webdriver_provision::unarchive;

// ============================================================================
// Benchmark Parameters
// ============================================================================

const FILE_COUNTS: &[usize] = &[100, 1000];
const CHAIN_DEPTHS: &[usize] = &[4, 16, 64];
const ZIP_ENTRIES: usize = 64;

// ============================================================================
// Benchmark: Glob Discovery
// ============================================================================

fn bench_glob_discovery(c: &mut Criterion) {
    let mut group = c.benchmark_group("glob_discovery");

    for &count in FILE_COUNTS {
        let dir = TempDir::new().unwrap();
        populate_tree(dir.path(), count);

        group.bench_with_input(BenchmarkId::new("find_glob", count), &count, |b, _| {
            b.iter(|| {
                let matched = find_glob(dir.path(), "**/*.tmp", |_| true)
                    .unwrap()
                    .count();
                black_box(matched)
            });
        });
    }

    group.finish();
}

// ============================================================================
// Benchmark: Repo Root Discovery
// ============================================================================

fn bench_repo_root(c: &mut Criterion) {
    let mut group = c.benchmark_group("repo_root");

    for &depth in CHAIN_DEPTHS {
        let dir = TempDir::new().unwrap();
        let start = build_chain(dir.path(), depth);

        group.bench_with_input(BenchmarkId::new("walk", depth), &depth, |b, _| {
            b.iter(|| black_box(find_repo_root(&start).unwrap()));
        });

        let cache = RepoRootCache::new();
        cache.resolve(&start).unwrap();
        group.bench_with_input(BenchmarkId::new("cached", depth), &depth, |b, _| {
            b.iter(|| black_box(cache.resolve(&start).unwrap()));
        });
    }

    group.finish();
}

// ============================================================================
// Benchmark: Archive Extraction
// ============================================================================

fn bench_unarchive(c: &mut Criterion) {
    let mut group = c.benchmark_group("unarchive");
    group.sample_size(30); // Each iteration rewrites every entry on disk

    let dir = TempDir::new().unwrap();
    let archive_path = build_zip(dir.path(), ZIP_ENTRIES);

    group.bench_function("zip_64_entries", |b| {
        b.iter(|| unarchive(black_box(&archive_path)).unwrap());
    });

    group.finish();
}

// ============================================================================
// Benchmark: Buffered Download
// ============================================================================

fn bench_download(c: &mut Criterion) {
    let rt = Runtime::new().unwrap();
    let mut group = c.benchmark_group("download");
    group.sample_size(20);

    let (_server, _mock, url) = rt.block_on(async {
        let mut server = mockito::Server::new_async().await;
        let mock = server
            .mock("GET", "/artifact.bin")
            .with_body(vec![0u8; 256 * 1024])
            .create_async()
            .await;
        let url = format!("{}/artifact.bin", server.url());
        (server, mock, url)
    });

    let dir = TempDir::new().unwrap();
    let dest = dir.path().join("artifact.bin");
    let fetcher = Fetcher::new().unwrap();

    group.bench_function("256_kib_loopback", |b| {
        b.to_async(&rt).iter(|| async {
            fetcher.download(&url, &dest).await.unwrap();
        });
    });

    group.finish();
}

// ============================================================================
// Helper Functions
// ============================================================================

/// Builds a three-level tree with `count` files, half of them `.tmp`.
fn populate_tree(root: &Path, count: usize) {
    for i in 0..count {
        let subdir = root.join(format!("dir{}", i % 10)).join(format!("sub{}", i % 3));
        fs::create_dir_all(&subdir).unwrap();
        let ext = if i % 2 == 0 { "tmp" } else { "txt" };
        fs::write(subdir.join(format!("file{i}.{ext}")), b"x").unwrap();
    }
}

/// Builds a directory chain `depth` levels deep with `.git` at the top,
/// returning the deepest directory.
fn build_chain(root: &Path, depth: usize) -> PathBuf {
    fs::create_dir_all(root.join(".git")).unwrap();
    let mut current = root.to_path_buf();
    for i in 0..depth {
        current = current.join(format!("level{i}"));
    }
    fs::create_dir_all(&current).unwrap();
    current
}

/// Builds a zip archive with `entries` small files.
fn build_zip(dir: &Path, entries: usize) -> PathBuf {
    let archive_path = dir.join("fixture.zip");
    let file = fs::File::create(&archive_path).unwrap();
    let mut writer = zip::ZipWriter::new(file);
    let options = zip::write::SimpleFileOptions::default();

    for i in 0..entries {
        writer.start_file(format!("entry-{i}.txt"), options).unwrap();
        writer.write_all(b"payload bytes for extraction\n").unwrap();
    }
    writer.finish().unwrap();
    archive_path
}

// ============================================================================
// Criterion Setup
// ============================================================================

criterion_group!(
    benches,
    bench_glob_discovery,
    bench_repo_root,
    bench_unarchive,
    bench_download
);
criterion_main!(benches);
