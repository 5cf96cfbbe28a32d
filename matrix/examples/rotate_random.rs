use std::fmt::Debug;
use std::time::Instant;

use clap::{Parser, ValueEnum};
use rand::SeedableRng;
use rand::rngs::SmallRng;
use snail_matrix::RotateError;
use snail_matrix::dense::BitMatrix;
use tracing::{info, warn};
use tracing_forest::ForestLayer;
use tracing_forest::util::LevelFilter;
use tracing_subscriber::layer::SubscriberExt;
use tracing_subscriber::util::SubscriberInitExt;
use tracing_subscriber::{EnvFilter, Registry};

#[derive(Debug, Copy, Clone, PartialEq, Eq, ValueEnum)]
enum Strategy {
    /// 4-cycle block relocation followed by SWAR block rotation.
    Blocked,
    /// Bit-by-bit reference rotation.
    Naive,
}

#[derive(Parser, Debug)]
#[command(version, about = "Rotate a random bit matrix and report timings", long_about = None)]
struct Args {
    /// Width and height of the matrix in bits. Must be a multiple of 64.
    #[arg(short = 'n', long, default_value_t = 1024)]
    size: usize,

    /// Number of quarter turns to apply.
    #[arg(short, long, default_value_t = 4)]
    rounds: usize,

    /// Seed for the random matrix.
    #[arg(short, long, default_value_t = 0)]
    seed: u64,

    /// The rotation routine to time.
    #[arg(long, ignore_case = true, value_enum, default_value_t = Strategy::Blocked)]
    strategy: Strategy,

    /// Compare every blocked round against the naive rotation.
    #[arg(long)]
    verify: bool,
}

fn main() -> Result<(), impl Debug> {
    let env_filter = EnvFilter::builder()
        .with_default_directive(LevelFilter::INFO.into())
        .from_env_lossy();

    Registry::default()
        .with(env_filter)
        .with(ForestLayer::default())
        .init();

    let args = Args::parse();
    run(&args)
}

fn run(args: &Args) -> Result<(), RotateError> {
    let mut rng = SmallRng::seed_from_u64(args.seed);
    let original = BitMatrix::rand(&mut rng, args.size)?;
    info!(
        n = original.n(),
        bytes = original.as_bytes().len(),
        "generated random matrix"
    );

    let mut matrix = original.clone();
    for round in 1..=args.rounds {
        let expected = args.verify.then(|| matrix.rotated_naive());

        let start = Instant::now();
        match args.strategy {
            Strategy::Blocked => matrix.rotate(),
            Strategy::Naive => matrix = matrix.rotated_naive(),
        }
        info!(round, strategy = ?args.strategy, elapsed = ?start.elapsed(), "rotated");

        if let Some(expected) = expected {
            if matrix == expected {
                info!(round, "matches naive rotation");
            } else {
                warn!(round, "differs from naive rotation");
            }
        }
    }

    if args.rounds % 4 == 0 {
        if matrix == original {
            info!(rounds = args.rounds, "back to the original matrix");
        } else {
            warn!(rounds = args.rounds, "full turns did not restore the matrix");
        }
    }
    Ok(())
}
