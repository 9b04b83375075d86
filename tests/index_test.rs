use tabrs::index::{Label, LabelIndex};

#[test]
fn test_default_range_index() {
    let index = LabelIndex::from_range(3);
    assert_eq!(index.len(), 3);
    assert!(index.is_default());
    assert_eq!(index.get_locs(&Label::Int(0)), Some(&[0][..]));
    assert_eq!(index.get_locs(&Label::Int(2)), Some(&[2][..]));
    assert_eq!(index.get_locs(&Label::Int(3)), None);
}

#[test]
fn test_duplicate_label_buckets() {
    let labels = vec![
        Label::from("x"),
        Label::from("y"),
        Label::from("x"),
        Label::from("x"),
    ];
    let index = LabelIndex::from_labels(labels);
    assert!(!index.is_default());
    // Bucket positions keep insertion order
    assert_eq!(index.get_locs(&Label::from("x")), Some(&[0, 2, 3][..]));
    assert_eq!(index.get_locs(&Label::from("y")), Some(&[1][..]));
}

#[test]
fn test_label_at_and_contains() {
    let index = LabelIndex::from_labels(vec![Label::from("a"), Label::from("b")]);
    assert_eq!(index.label_at(1), Some(&Label::from("b")));
    assert_eq!(index.label_at(2), None);
    assert!(index.contains(&Label::from("a")));
    assert!(!index.contains(&Label::from("q")));
}

#[test]
fn test_buckets_partition_positions() {
    let labels = vec![
        Label::from("a"),
        Label::from("b"),
        Label::from("a"),
        Label::from("c"),
    ];
    let index = LabelIndex::from_labels(labels);

    let mut seen: Vec<usize> = index
        .buckets()
        .flat_map(|(_, positions)| positions.iter().copied())
        .collect();
    seen.sort_unstable();
    assert_eq!(seen, vec![0, 1, 2, 3]);
}

#[test]
fn test_label_natural_order_integers() {
    let mut labels = vec![Label::Int(10), Label::Int(2), Label::Int(-1)];
    labels.sort();
    assert_eq!(labels, vec![Label::Int(-1), Label::Int(2), Label::Int(10)]);
}

#[test]
fn test_label_natural_order_numeric_strings() {
    // Numeric strings compare by value, not lexicographically
    let mut labels = vec![Label::from("10"), Label::from("9"), Label::from("2")];
    labels.sort();
    assert_eq!(
        labels,
        vec![Label::from("2"), Label::from("9"), Label::from("10")]
    );
}

#[test]
fn test_label_natural_order_mixed() {
    let mut labels = vec![
        Label::from("banana"),
        Label::Int(3),
        Label::from("10"),
        Label::from("apple"),
    ];
    labels.sort();
    // Numeric-valued labels sort before non-numeric strings
    assert_eq!(
        labels,
        vec![
            Label::Int(3),
            Label::from("10"),
            Label::from("apple"),
            Label::from("banana"),
        ]
    );
}

#[test]
fn test_label_order_consistent_with_eq() {
    // Int(7) and "7" share a numeric value but are distinct labels
    let a = Label::Int(7);
    let b = Label::from("7");
    assert_ne!(a, b);
    assert!(a < b);
    assert_eq!(a.cmp(&a), std::cmp::Ordering::Equal);
}

#[test]
fn test_label_display() {
    assert_eq!(Label::Int(5).to_string(), "5");
    assert_eq!(Label::from("abc").to_string(), "abc");
}
