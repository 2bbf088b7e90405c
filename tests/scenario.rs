use ndarray::Array2;
use swn_fwp::fwp::{transactions_from_matrix, FrequentPattern, FwpStream};
use swn_fwp::{mine_stream, PruningBound, WeightTable, WindowConfig};

fn table() -> WeightTable {
    let mut table = WeightTable::new();
    table.insert("A", 2.0);
    table.insert("B", 4.0);
    table.insert("C", 6.0);
    table
}

#[test]
fn test_config_from_json_fills_defaults() {
    let config: WindowConfig = serde_json::from_str(r#"{"window_size": 3, "pruning": "normalized"}"#).unwrap();
    assert_eq!(config.window_size, 3);
    assert_eq!(config.min_weighted_support, 0.3);
    assert_eq!(config.pruning, PruningBound::Normalized);

    let round: WindowConfig = serde_json::from_str(&serde_json::to_string(&config).unwrap()).unwrap();
    assert_eq!(round, config);
}

#[test]
fn test_named_stream_reports() {
    let rows = vec![
        vec!["A", "B"],
        vec!["B", "C"],
        vec!["A", "C"],
        vec!["A", "B", "C"],
        vec!["C"],
    ];
    let reports = mine_stream(table(), WindowConfig::new(3, 0.3), rows).unwrap();

    assert_eq!(reports.len(), 3);
    assert_eq!(
        reports.iter().map(|r| r.first_transaction).collect::<Vec<_>>(),
        vec![0, 1, 2]
    );
    for report in &reports {
        assert!(!report.patterns.is_empty());
        for pattern in report.patterns.patterns() {
            assert!(pattern.weighted_support >= 0.3);
            assert!(pattern.weighted_support <= 1.0 + 1e-12);
        }
    }
}

#[test]
fn test_matrix_stream_with_dense_weights() {
    let matrix = Array2::from_shape_vec(
        (5, 3),
        vec![
            1, 1, 0, //
            0, 1, 1, //
            1, 0, 1, //
            1, 1, 1, //
            0, 0, 1, //
        ],
    )
    .unwrap();
    let mut stream = FwpStream::new(WeightTable::from_dense(&[2.0, 4.0, 6.0]), WindowConfig::new(3, 0.3)).unwrap();

    let mut reports = Vec::new();
    for row in transactions_from_matrix(matrix.view()) {
        if let Some(report) = stream.push_ids(&row).unwrap() {
            reports.push(report);
        }
    }

    // Same stream as the named one above, item ids in column order.
    let named = mine_stream(table(), WindowConfig::new(3, 0.3), vec![
        vec!["A", "B"],
        vec!["B", "C"],
        vec!["A", "C"],
        vec!["A", "B", "C"],
        vec!["C"],
    ])
    .unwrap();
    assert_eq!(reports, named);
}

#[test]
fn test_patterns_serialize_with_names() {
    let table = table();
    let reports = mine_stream(
        table.clone(),
        WindowConfig::new(3, 0.3),
        vec![vec!["A", "B"], vec!["B", "C"], vec!["A", "C"]],
    )
    .unwrap();

    let mut patterns: Vec<FrequentPattern> = reports[0].patterns.patterns().collect();
    patterns.sort_by(|a, b| a.items.cmp(&b.items));
    let names: Vec<Vec<String>> = patterns.iter().map(|p| table.describe(&p.items)).collect();
    assert_eq!(names, vec![vec!["A"], vec!["B"], vec!["C"]]);

    let json = serde_json::to_value(&patterns[2]).unwrap();
    assert_eq!(json["items"], serde_json::json!([2]));
    assert_eq!(json["weighted_support"], serde_json::json!(0.75));
}
