use std::time::Instant;

use anyhow::{ensure, Result};
use clap::Parser;
use lehmer::{
    cycles::Cycles,
    factoradic, lehmer as codec, naive,
    rand::{random_perm, TinyRng},
};
use log::info;
use rand_core::SeedableRng;

/// Above this length the quadratic algorithms take minutes.
const MAX_NAIVE_LEN: usize = 100_000;
/// Above this length the factoradic rank has millions of digits.
const MAX_RANK_LEN: usize = 10_000;

#[derive(Parser, Debug)]
#[command(about = "Times Lehmer code conversions of a random permutation.", long_about = None)]
struct Args {
    /// Length of the permutation.
    #[arg(short = 'n', long, default_value_t = 10_000_000)]
    len: usize,
    /// Seed for the shuffle.
    #[arg(short, long, default_value_t = 123456)]
    seed: u64,
    /// Decode the Lehmer code and check that the permutation is recovered.
    #[arg(long, default_value_t = false)]
    check: bool,
    /// Also time the quadratic reference algorithms.
    #[arg(long, default_value_t = false)]
    naive: bool,
    /// Also compute the parity from the cycle decomposition.
    #[arg(long, default_value_t = false)]
    cycles: bool,
    /// Print the lexicographic rank of the permutation.
    #[arg(long, default_value_t = false)]
    rank: bool,
}

fn timed<T>(what: &str, f: impl FnOnce() -> T) -> T {
    let start = Instant::now();
    let result = f();
    info!("{what}: {} ms", start.elapsed().as_millis());
    result
}

fn main() -> Result<()> {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    let args = Args::parse();
    ensure!(
        args.len <= u32::MAX as usize,
        "length {} does not fit 32-bit points",
        args.len
    );
    ensure!(
        !args.naive || args.len <= MAX_NAIVE_LEN,
        "--naive is limited to lengths up to {MAX_NAIVE_LEN}"
    );
    ensure!(
        !args.rank || args.len <= MAX_RANK_LEN,
        "--rank is limited to lengths up to {MAX_RANK_LEN}"
    );

    info!("Creating a permutation of {} elements", args.len);
    let mut rng = TinyRng::seed_from_u64(args.seed);
    let perm: Vec<u32> = timed("Creation and shuffle", || random_perm(args.len, &mut rng));

    let code = timed("Lehmer encoding", || codec::encode(&perm))?;
    info!(
        "Permutation has {} inversions and is {}",
        codec::inversions(&code),
        if codec::is_even(&code) { "even" } else { "odd" }
    );

    if args.check {
        let decoded = timed("Lehmer decoding", || codec::decode(&code))?;
        ensure!(decoded == perm, "decoded permutation differs from the input");
        info!("Round trip verified");
    }

    if args.naive {
        let naive_code = timed("Quadratic encoding", || naive::encode(&perm))?;
        ensure!(naive_code == code, "quadratic encoding disagrees");
        let naive_perm = timed("Quadratic decoding", || naive::decode(&code))?;
        ensure!(naive_perm == perm, "quadratic decoding disagrees");
    }

    if args.cycles {
        let cycles = timed("Cycle decomposition", || Cycles::of(&perm))?;
        ensure!(
            cycles.is_even() == codec::is_even(&code),
            "cycle parity disagrees with the Lehmer code"
        );
        info!("Permutation has {} non-trivial cycles", cycles.len());
    }

    if args.rank {
        let rank = timed("Factoradic rank", || factoradic::to_factoradic(&code));
        println!("{rank}");
    }

    info!("Done");
    Ok(())
}
