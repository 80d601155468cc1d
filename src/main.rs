use clap::Parser;
use rand::prelude::*;
use rand_distr::StandardNormal;
use serde::Serialize;
use shortlist::{fs::PointSet, points::Point, search::k_nearest, statistics::Stats};
use std::{
    hint::black_box,
    sync::{Arc, atomic::AtomicUsize},
    thread,
};
use tqdm::tqdm;
use tracing::info;

/// Exact nearest-neighbor scanner built on a bounded candidate queue
#[derive(Parser, Debug)]
#[command(name = "shortlist")]
#[command(about = "An exact nearest-neighbor scanner built on a bounded candidate queue", long_about = None)]
struct Args {
    /// Path to the point set file (numpy format); points are generated when omitted
    #[arg(short, long)]
    points: Option<String>,

    /// Number of points to generate when no file is given
    #[arg(long, default_value_t = 100_000)]
    num_points: usize,

    /// Dimension of generated points
    #[arg(long, default_value_t = 16)]
    dim: usize,

    /// Number of queries to run per job
    #[arg(long, default_value_t = 1_000)]
    num_queries: usize,

    /// Seed for point and query generation
    #[arg(long, default_value_t = 42)]
    seed: u64,

    /// Number of threads to use for parallel search (comma-separated list, e.g., "1,2,4,8")
    #[arg(short, long, value_delimiter = ',', default_value = "1")]
    threads: Vec<usize>,

    /// Number of neighbors to keep per query (comma-separated list, e.g., "1,10,100")
    #[arg(long, value_delimiter = ',', default_value = "10")]
    num_neighbors: Vec<usize>,

    /// Print one JSON summary line per job instead of the text report
    #[arg(long)]
    json: bool,
}

/// Per-job summary for the `--json` output mode.
#[derive(Serialize)]
struct JobSummary<'a> {
    num_threads: usize,
    num_neighbors: usize,
    queries: usize,
    seconds: f64,
    qps: f64,
    checksum: Option<usize>,
    stats: &'a Stats,
}

fn generate_points(count: usize, dim: usize, seed: u64) -> Vec<Point> {
    let mut rng = StdRng::seed_from_u64(seed);
    tqdm(0..count)
        .map(|id| {
            let coords: Vec<f64> = (&mut rng).sample_iter(StandardNormal).take(dim).collect();
            Point::new(id, coords)
        })
        .collect()
}

fn run_search_job(
    points: Arc<Vec<Point>>,
    queries: Arc<Vec<Point>>,
    num_threads: usize,
    num_neighbors: usize,
    json_output: bool,
) {
    let num_queries = queries.len();
    if !json_output {
        println!("\n==========");
        println!("Running with threads={num_threads}, num_neighbors={num_neighbors}");
        println!("==========");
    }

    let start_time = std::time::Instant::now();

    let batch_size = 64;
    let next_batch = Arc::new(AtomicUsize::new(0));
    let handles: Vec<_> = (0..num_threads)
        .map(|_thread_id| {
            let points_clone = Arc::clone(&points);
            let queries_clone = Arc::clone(&queries);
            let next_batch_clone = Arc::clone(&next_batch);

            thread::spawn(move || {
                let mut local_results = Vec::new();
                let mut local_stats = Stats::new();

                loop {
                    // Atomically grab the next batch of work
                    let batch_start = next_batch_clone
                        .fetch_add(batch_size, std::sync::atomic::Ordering::Relaxed);

                    if batch_start >= num_queries {
                        break;
                    }

                    let batch_end = std::cmp::min(batch_start + batch_size, num_queries);

                    // Process this batch
                    for query in &queries_clone[batch_start..batch_end] {
                        let result = black_box(
                            k_nearest(&points_clone, query, num_neighbors, &mut local_stats)
                                .expect("Search ran out of memory"),
                        );
                        if let Some(best) = result.first() {
                            local_results.push(best.id);
                        }
                    }
                }

                (local_results, local_stats)
            })
        })
        .collect();

    let mut reses = Vec::with_capacity(num_queries);
    let mut combined_stats = Stats::new();
    for handle in handles {
        let (local_results, local_stats) = handle.join().expect("Thread panicked");
        reses.extend(local_results);
        combined_stats = combined_stats.merge(&local_stats)
    }

    let elapsed = start_time.elapsed();
    let total_qps = num_queries as f64 / elapsed.as_secs_f64();
    let checksum = reses.into_iter().reduce(|a, b| a.wrapping_add(b));

    if json_output {
        let summary = JobSummary {
            num_threads,
            num_neighbors,
            queries: num_queries,
            seconds: elapsed.as_secs_f64(),
            qps: total_qps,
            checksum,
            stats: &combined_stats,
        };
        println!(
            "{}",
            serde_json::to_string(&summary).expect("Summary serialization failed")
        );
    } else {
        let avg_scored = combined_stats.get_points_scored() as f64 / num_queries as f64;
        let avg_evictions = combined_stats.get_evictions() as f64 / num_queries as f64;
        println!("Avg per search: {avg_scored:.2} points scored, {avg_evictions:.2} evictions");
        println!("Checksum: {checksum:?}");
        println!(
            "Completed {} searches in {:.2}s ({:.2} QPS)",
            num_queries,
            elapsed.as_secs_f64(),
            total_qps
        );
    }
}

fn main() {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::from_default_env()
                .add_directive(tracing::Level::INFO.into()),
        )
        .init();

    let args = Args::parse();

    let points = match &args.points {
        Some(path) => {
            info!("Loading point set from {path}");
            Vec::<Point>::load_from_npy(path)
        }
        None => {
            info!(
                "Generating {} points of dimension {} (seed {})",
                args.num_points, args.dim, args.seed
            );
            generate_points(args.num_points, args.dim, args.seed)
        }
    };
    assert!(!points.is_empty(), "Point set is empty");

    let dim = points[0].dim();
    info!("Point set ready: {} points, dimension {dim}", points.len());

    // Queries share the point distribution but never the seed, so a query
    // is close to some points without being one of them.
    let queries = generate_points(args.num_queries, dim, args.seed.wrapping_add(1));

    let points = Arc::new(points);
    let queries = Arc::new(queries);

    if !args.json {
        println!("\nStarting cartesian product sweep:");
        println!("  Threads: {:?}", args.threads);
        println!("  Num neighbors: {:?}", args.num_neighbors);
        println!(
            "  Total jobs: {}",
            args.threads.len() * args.num_neighbors.len()
        );
    }

    // Run cartesian product of threads and num_neighbors
    for &num_threads in &args.threads {
        for &num_neighbors in &args.num_neighbors {
            run_search_job(
                Arc::clone(&points),
                Arc::clone(&queries),
                num_threads,
                num_neighbors,
                args.json,
            );
        }
    }

    if !args.json {
        println!("\n==========");
        println!("All jobs completed!");
        println!("==========");
    }
}
