//! Throughput checks for the link service
//!
//! Every mutation rewrites the whole data file, so these numbers mostly show
//! how save cost grows with store size.
//!
//! Run with: cargo test --release bench -- --ignored --nocapture

use std::sync::Arc;
use std::thread;
use std::time::Instant;

use tempfile::TempDir;

use shortlink::persistence::Persistence;
use shortlink::service::LinkService;

/// Benchmark helper to measure execution time
fn benchmark<F>(name: &str, iterations: usize, mut f: F)
where
    F: FnMut(usize),
{
    let start = Instant::now();

    for i in 0..iterations {
        f(i);
    }

    let duration = start.elapsed();
    let avg_ms = duration.as_millis() as f64 / iterations as f64;
    let ops_per_sec = (iterations as f64 / duration.as_secs_f64()) as u64;

    println!("  {} ({} iterations)", name, iterations);
    println!("    Total time: {:?}", duration);
    println!("    Avg time: {:.3}ms", avg_ms);
    println!("    Throughput: {} ops/sec\n", ops_per_sec);
}

fn open(dir: &TempDir) -> LinkService {
    LinkService::open(Persistence::new(dir.path().join("links.json")), "http://sho.rt")
}

#[test]
#[ignore]
fn bench_create_and_resolve() {
    println!("\n=== Benchmark: Create / Resolve ===\n");

    let dir = TempDir::new().unwrap();
    let links = open(&dir);

    let mut ids = Vec::new();
    benchmark("Create", 1000, |i| {
        let created = links
            .create(&format!("https://example.com/bench/{i}"), Some("bench-user"))
            .unwrap();
        ids.push(created.record.id);
    });

    benchmark("Resolve", 1000, |i| {
        links.resolve(&ids[i % ids.len()]).unwrap();
    });

    benchmark("List by owner", 1000, |_| {
        links.list(Some("bench-user"), 1, 10);
    });
}

#[test]
#[ignore]
fn bench_store_scaling() {
    println!("\n=== Benchmark: Store Scaling ===\n");

    let dir = TempDir::new().unwrap();
    let links = open(&dir);
    let mut filled = 0;

    for size in [100, 1000, 5000] {
        println!("  Testing with {} links in store...", size);

        let start = Instant::now();
        while filled < size {
            links
                .create(&format!("https://example.com/scale/{filled}"), None)
                .unwrap();
            filled += 1;
        }
        println!("    Fill time: {:?}", start.elapsed());

        let id = links.list(None, 1, 1).pop().unwrap().id;
        let start = Instant::now();
        links.resolve(&id).unwrap();
        println!("    Single resolve (incl. full save): {:?}\n", start.elapsed());
    }
}

#[test]
#[ignore]
fn bench_concurrent_operations() {
    println!("\n=== Benchmark: Concurrent Operations ===\n");

    let dir = TempDir::new().unwrap();
    let links = Arc::new(open(&dir));
    let id = links.create("https://example.com/hot", None).unwrap().record.id;

    let threads = 8;
    let ops_per_thread = 100;

    let start = Instant::now();
    thread::scope(|scope| {
        for _ in 0..threads {
            let links = Arc::clone(&links);
            let id = id.clone();
            scope.spawn(move || {
                for _ in 0..ops_per_thread {
                    links.resolve(&id).unwrap();
                }
            });
        }
    });
    let duration = start.elapsed();

    let total_ops = threads * ops_per_thread;
    assert_eq!(links.stats(&id).unwrap().access_count, total_ops as u64);

    println!("  Total operations: {}", total_ops);
    println!("  Total time: {:?}", duration);
    println!(
        "  Throughput: {:.0} ops/sec\n",
        total_ops as f64 / duration.as_secs_f64()
    );
}
