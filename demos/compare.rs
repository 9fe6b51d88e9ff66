use clap::{Parser, ValueEnum};

use avlrb::compare::{self, Comparison, Workload, WorkloadKind};

/// Runs the same random workload against an AVL and a red-black tree.
#[derive(Debug, Parser)]
struct Args {
    /// Workloads to run
    #[arg(long, value_enum, default_values_t = [Kind::Insert, Kind::Mixed])]
    workload: Vec<Kind>,
    /// Number of operations per repetition
    #[arg(long, short = 'n', default_value_t = Workload::DEFAULT_SIZE)]
    size: usize,
    /// Number of repetitions to average over
    #[arg(long, short, default_value_t = Workload::DEFAULT_REPETITIONS)]
    repetitions: usize,
    /// Keys are drawn from 0..max-key
    #[arg(long, default_value_t = Workload::DEFAULT_KEY_RANGE.end)]
    max_key: u32,
    #[arg(long, default_value_t = 0)]
    seed: u64,
}

#[derive(Debug, Clone, Copy, ValueEnum)]
enum Kind {
    Insert,
    Mixed,
}

impl From<Kind> for WorkloadKind {
    fn from(kind: Kind) -> Self {
        match kind {
            Kind::Insert => WorkloadKind::Insert,
            Kind::Mixed => WorkloadKind::Mixed,
        }
    }
}

fn main() -> Result<(), compare::Error> {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    let args = Args::parse();
    for kind in &args.workload {
        let workload = Workload::new((*kind).into())
            .size(args.size)
            .repetitions(args.repetitions)
            .key_range(0..args.max_key)
            .seed(args.seed);
        print(&compare::compare(&workload)?);
    }
    Ok(())
}

fn print(comparison: &Comparison) {
    let workload = &comparison.workload;
    println!(
        "{:?} workload, {} operations, {} repetitions",
        workload.kind, workload.size, workload.repetitions
    );
    println!("{:<10} {:>14} {:>12} {:>8}", "engine", "time", "rotations", "height");
    for (name, stats) in [("avl", &comparison.avl), ("red-black", &comparison.rb)] {
        println!(
            "{:<10} {:>14.3?} {:>12.1} {:>8.1}",
            name, stats.mean_duration, stats.mean_rotations, stats.mean_height
        );
    }
    println!("avl/red-black time ratio: {:.3}\n", comparison.time_ratio());
}
