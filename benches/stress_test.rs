use ndarray::Array2;
use rand::Rng;
use std::time::Instant;
use swn_fwp::fwp::{transactions_from_matrix, FwpStream, PruningBound};
use swn_fwp::{WeightTable, WindowConfig};

fn generate_transactions(
    num_transactions: usize,
    num_items: usize,
    avg_transaction_size: usize,
    density: f64,
) -> Array2<i32> {
    let mut rng = rand::thread_rng();
    let mut data = vec![0i32; num_transactions * num_items];

    for tx_idx in 0..num_transactions {
        let random_factor: f64 = rng.r#gen();
        let num_items_in_tx = (avg_transaction_size as f64 * (0.5 + random_factor)).round() as usize;
        let num_items_in_tx = num_items_in_tx.min(num_items);

        for _ in 0..num_items_in_tx {
            let density_check: f64 = rng.r#gen();
            if density_check < density {
                let item = rng.gen_range(0..num_items);
                data[tx_idx * num_items + item] = 1;
            }
        }
    }

    Array2::from_shape_vec((num_transactions, num_items), data).unwrap()
}

fn generate_weights(num_items: usize) -> WeightTable {
    let mut rng = rand::thread_rng();
    let weights: Vec<f64> = (0..num_items).map(|_| rng.gen_range(0.1..1.0)).collect();
    WeightTable::from_dense(&weights)
}

fn print_memory_stats() {
    #[cfg(target_os = "linux")]
    {
        if let Ok(status) = std::fs::read_to_string("/proc/self/status") {
            if let Some(line) = status.lines().find(|line| line.starts_with("VmRSS:")) {
                println!("  Memory: {}", line.trim_start_matches("VmRSS:").trim());
            }
        }
    }
}

struct RunStats {
    reports: usize,
    patterns: usize,
    largest: usize,
    live_slots: usize,
}

fn run_stream(
    table: &WeightTable,
    matrix: &Array2<i32>,
    config: WindowConfig,
) -> RunStats {
    let mut stream = FwpStream::new(table.clone(), config).unwrap();
    let mut stats = RunStats {
        reports: 0,
        patterns: 0,
        largest: 0,
        live_slots: 0,
    };

    for row in transactions_from_matrix(matrix.view()) {
        if let Some(report) = stream.push_ids(&row).unwrap() {
            stats.reports += 1;
            stats.patterns += report.patterns.len();
            stats.largest = stats.largest.max(report.patterns.levels().len());
        }
    }
    if let Some(window) = stream.window() {
        stats.live_slots = window.tree().live_slots();
    }
    stats
}

fn stress_test_long_stream() {
    println!("\n=== Long Stream Test ===");

    let configs = vec![
        ("5K tx, W=50", 5_000, 50, 40),
        ("20K tx, W=100", 20_000, 100, 60),
        ("50K tx, W=200", 50_000, 200, 80),
    ];

    for (name, num_tx, window_size, num_items) in configs {
        println!("\nTesting: {}", name);
        let table = generate_weights(num_items);
        let transactions = generate_transactions(num_tx, num_items, 8, 0.7);
        print_memory_stats();

        let config = WindowConfig::new(window_size, 0.2).with_pruning(PruningBound::Normalized);
        let start = Instant::now();
        let stats = run_stream(&table, &transactions, config);
        let elapsed = start.elapsed();

        println!("  Time: {:?}", elapsed);
        println!("  Reports: {}", stats.reports);
        println!("  Patterns (summed over reports): {}", stats.patterns);
        println!("  Largest itemset size: {}", stats.largest);
        // Arena slots should track the window, not the stream length
        println!("  Live tree slots at end: {}", stats.live_slots);
        print_memory_stats();
    }
}

fn stress_test_pruning_bounds() {
    println!("\n=== Raw vs Normalized Bound ===");

    let table = generate_weights(50);
    let transactions = generate_transactions(2_000, 50, 10, 0.8);

    for (name, pruning) in [("raw_weight", PruningBound::RawWeight), ("normalized", PruningBound::Normalized)] {
        let config = WindowConfig::new(100, 0.1).with_pruning(pruning);
        let start = Instant::now();
        let stats = run_stream(&table, &transactions, config);
        println!("\n  {}:", name);
        println!("    Time: {:?}", start.elapsed());
        println!("    Patterns: {}", stats.patterns);
        println!("    Largest itemset size: {}", stats.largest);
    }
}

fn stress_test_low_support() {
    println!("\n=== Low Support Test ===");

    let table = generate_weights(40);
    let transactions = generate_transactions(1_000, 40, 12, 0.8);

    for &min_support in &[0.3, 0.2, 0.1, 0.05, 0.02] {
        println!("\nTesting min_weighted_support = {}", min_support);
        let config = WindowConfig::new(100, min_support).with_pruning(PruningBound::Normalized);
        let start = Instant::now();
        let stats = run_stream(&table, &transactions, config);

        println!("  Time: {:?}", start.elapsed());
        println!("  Patterns: {}", stats.patterns);
        println!("  Largest itemset size: {}", stats.largest);
        if stats.patterns > 1_000_000 {
            println!("  Pattern explosion detected!");
        }
    }
}

fn main() {
    println!("=== Sliding Window FWP Stress Testing Suite ===");
    println!("Testing throughput, arena growth, and pattern counts over long streams\n");

    stress_test_long_stream();
    stress_test_pruning_bounds();
    stress_test_low_support();

    println!("\n=== Stress Testing Complete ===");
}
