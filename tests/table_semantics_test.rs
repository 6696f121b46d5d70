use datatable::labels::{canonical_labels, padded_eq};
use datatable::{DataTable, DataTableError};

fn stored_labels(table: &DataTable) -> Vec<Vec<String>> {
    table.get_columns(&[]).collect()
}

#[test]
fn test_canonical_labels_are_stable() {
    let inputs: Vec<Vec<Option<&str>>> = vec![
        vec![Some("a"), Some(""), Some("")],
        vec![None, None],
        vec![Some("a"), None, Some("b")],
        vec![Some(""), Some("b"), None, Some("")],
    ];
    for input in inputs {
        let canonical = canonical_labels(input);
        assert_eq!(canonical_labels(canonical.clone()), canonical);
    }
}

#[test]
fn test_padding_equality_matches_explicit_padding() {
    let keys: Vec<Vec<&str>> = vec![
        vec![],
        vec!["a"],
        vec!["a", ""],
        vec!["a", "b"],
        vec!["", "b"],
        vec!["A"],
    ];
    for a in &keys {
        for b in &keys {
            let n = a.len().max(b.len()) + 2;
            let pad = |key: &Vec<&str>| {
                let mut padded: Vec<String> = key.iter().map(|s| s.to_string()).collect();
                padded.resize(n, String::new());
                padded
            };
            assert_eq!(padded_eq(a, b), pad(a) == pad(b), "{:?} vs {:?}", a, b);
        }
    }
}

#[test]
fn test_padded_keys_are_found_by_get() {
    let mut table = DataTable::new();
    table.add(7.0, ["a", "b"]);
    assert_eq!(table.get(["a", "b", "", ""]).unwrap(), 7.0);
    assert_eq!(table.get([Some("a"), Some("b"), None]).unwrap(), 7.0);
}

#[test]
fn test_inc_merge_law() {
    let mut table = DataTable::new();
    table.inc(5.0, ["x"]);
    table.inc(3.0, ["x"]);
    assert_eq!(table.len(), 1);
    assert_eq!(table.get(["x"]).unwrap(), 8.0);

    let mut table = DataTable::new();
    table.inc(5.0, ["x", "y"]);
    table.inc(3.0, ["x"]);
    assert_eq!(table.len(), 2);
}

#[test]
fn test_trailing_empty_labels_are_trimmed_on_add() {
    let mut table = DataTable::new();
    table.add(1.0, ["a", "", ""]);
    table.add(1.0, ["a"]);
    let labels = stored_labels(&table);
    assert_eq!(labels[0], vec!["a"]);
    assert_eq!(labels[0], labels[1]);
}

#[test]
fn test_missing_label_becomes_empty() {
    let mut table = DataTable::new();
    table.add(1.0, [Some("a"), None, Some("b")]);
    table.add(1.0, [Some("c"), None, None]);
    assert_eq!(stored_labels(&table), vec![vec!["a", "", "b"], vec!["c"]]);
}

#[test]
fn test_distinct_orders_ignoring_case_but_keeps_case_variants() {
    let mut table = DataTable::new();
    table.add(1.0, ["B"]);
    table.add(1.0, ["a"]);
    table.add(1.0, ["A"]);

    let distinct = table.get_distinct(0);
    assert_eq!(distinct.len(), 3);
    assert_eq!(distinct.last().unwrap(), "B");
    assert!(distinct[..2].contains(&"a".to_string()));
    assert!(distinct[..2].contains(&"A".to_string()));
}

#[test]
fn test_sum_distinct_groups_rows() {
    let mut table = DataTable::new();
    table.add(2.0, ["x", "p"]);
    table.add(3.0, ["x", "q"]);
    table.add(4.0, ["y"]);

    let grouped = table.sum_distinct(&[0]);
    assert_eq!(stored_labels(&grouped), vec![vec!["x"], vec!["y"]]);
    assert_eq!(grouped.get(["x"]).unwrap(), 5.0);
    assert_eq!(grouped.get(["y"]).unwrap(), 4.0);
    assert_eq!(grouped.sum(), table.sum());
}

#[test]
fn test_sum_distinct_with_several_columns() {
    let mut table = DataTable::new();
    table.add(1.0, ["x", "p", "1"]);
    table.add(2.0, ["y", "p", "2"]);
    table.add(3.0, ["x", "q", "1"]);
    table.add(4.0, ["x", "r"]);

    let grouped = table.sum_distinct(&[0, 2]);
    assert_eq!(grouped.len(), 3);
    assert_eq!(grouped.get(["x", "1"]).unwrap(), 4.0);
    assert_eq!(grouped.get(["y", "2"]).unwrap(), 2.0);
    assert_eq!(grouped.get(["x"]).unwrap(), 4.0);
}

#[test]
fn test_filter_column_is_exact() {
    let mut table = DataTable::new();
    table.add(1.0, ["x", "p"]);
    table.add(2.0, ["X", "q"]);
    table.add(3.0, ["y"]);

    let filtered = table.filter_column(0, "x");
    assert_eq!(stored_labels(&filtered), vec![vec!["x", "p"]]);
}

#[test]
fn test_map_past_end_with_empty_value_is_noop() {
    let mut table = DataTable::new();
    table.add(1.0, ["a"]);
    let mapped = table.map(2, |_| String::new());
    assert_eq!(stored_labels(&mapped), vec![vec!["a"]]);
}

#[test]
fn test_get_errors() {
    let mut table = DataTable::new();
    assert!(matches!(table.get(["a"]), Err(DataTableError::NotFound(_))));

    table.add(1.0, ["a"]);
    table.add(2.0, ["a", ""]);
    assert!(matches!(table.get(["a"]), Err(DataTableError::Ambiguous(_))));
    assert!(matches!(table.get(["b"]), Err(DataTableError::NotFound(_))));
}

#[test]
fn test_transforms_never_mutate_source() {
    let mut table = DataTable::new();
    table.add(1.0, ["a", "b"]);
    table.add(2.0, ["c"]);
    let before = table.clone();

    let _ = table.filter(["a"]);
    let _ = table.filter_column(1, "b");
    let _ = table.map(0, |label| format!("{}!", label));
    let _ = table.sum_distinct(&[1]);
    let _ = table.get_distinct_columns(&[0, 1]);

    assert_eq!(table, before);
}

#[test]
fn test_chained_queries() {
    let mut table = DataTable::new();
    table.inc(10.0, ["2024", "eu", "fr"]);
    table.inc(5.0, ["2024", "eu", "de"]);
    table.inc(7.0, ["2024", "us"]);
    table.inc(1.0, ["2023", "eu", "fr"]);
    table.inc(2.0, ["2024", "eu", "fr"]);

    let eu_2024 = table.filter(["2024", "eu"]);
    assert_eq!(eu_2024.sum(), 17.0);
    assert_eq!(eu_2024.get_distinct(2), vec!["de", "fr"]);

    let by_region = table
        .map(1, |region| region.to_uppercase())
        .sum_distinct(&[1]);
    assert_eq!(by_region.get(["EU"]).unwrap(), 18.0);
    assert_eq!(by_region.get(["US"]).unwrap(), 7.0);
}
