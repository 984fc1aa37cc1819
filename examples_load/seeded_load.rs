use std::collections::BTreeMap;
use std::time::Instant;

use kafka_log_synth::generator::generate_event;
use rand::rngs::StdRng;
use rand::SeedableRng;

/// Generates a large seeded sample and prints the level and service mix,
/// which should sit close to the catalog weights.
fn main() {
    let seed: u64 = std::env::args()
        .nth(1)
        .and_then(|s| s.parse().ok())
        .unwrap_or(42);
    let mut rng = StdRng::seed_from_u64(seed);

    let n: u64 = 100_000;
    let mut levels: BTreeMap<String, u64> = BTreeMap::new();
    let mut services: BTreeMap<String, u64> = BTreeMap::new();

    let start = Instant::now();
    for _ in 0..n {
        let event = generate_event(&mut rng);
        *levels.entry(event.level.to_string()).or_default() += 1;
        *services.entry(event.service).or_default() += 1;
    }
    let elapsed = start.elapsed();

    println!("seed {seed}: generated {n} events in {elapsed:?}");
    for (level, count) in &levels {
        println!("  {level:<6} {:>6.2}%", *count as f64 * 100.0 / n as f64);
    }
    for (service, count) in &services {
        println!("  {service:<22} {count}");
    }
}
