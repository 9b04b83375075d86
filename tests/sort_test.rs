use tabrs::error::Error;
use tabrs::index::Label;
use tabrs::sort::{sort_by_label, sort_by_value};

fn labels_of(names: &[&str]) -> Vec<Label> {
    names.iter().map(|&n| Label::from(n)).collect()
}

#[test]
fn test_sort_by_value_ascending() {
    let mut values = vec![3, 1, 2];
    let mut labels = labels_of(&["a", "b", "c"]);

    sort_by_value(&mut values, &mut labels, true).unwrap();
    assert_eq!(values, vec![1, 2, 3]);
    // Labels travel with their values
    assert_eq!(labels, labels_of(&["b", "c", "a"]));
}

#[test]
fn test_sort_by_value_descending() {
    let mut values = vec![3, 1, 2];
    let mut labels = labels_of(&["a", "b", "c"]);

    sort_by_value(&mut values, &mut labels, false).unwrap();
    assert_eq!(values, vec![3, 2, 1]);
    assert_eq!(labels, labels_of(&["a", "c", "b"]));
}

#[test]
fn test_sort_stability_on_equal_keys() {
    let mut values = vec![2, 1, 2, 1];
    let mut labels = labels_of(&["first2", "first1", "second2", "second1"]);

    sort_by_value(&mut values, &mut labels, true).unwrap();
    assert_eq!(values, vec![1, 1, 2, 2]);
    // Equal keys retain original relative order
    assert_eq!(
        labels,
        labels_of(&["first1", "second1", "first2", "second2"])
    );
}

#[test]
fn test_sort_descending_keeps_tie_order() {
    let mut values = vec![1, 2, 1, 2];
    let mut labels = labels_of(&["a", "b", "c", "d"]);

    sort_by_value(&mut values, &mut labels, false).unwrap();
    assert_eq!(values, vec![2, 2, 1, 1]);
    // Ties are not reversed
    assert_eq!(labels, labels_of(&["b", "d", "a", "c"]));
}

#[test]
fn test_sort_preserves_pair_multiset() {
    let mut values = vec![5, 3, 5, 1];
    let mut labels = labels_of(&["a", "b", "c", "d"]);
    let mut before: Vec<(i32, Label)> = values
        .iter()
        .cloned()
        .zip(labels.iter().cloned())
        .collect();

    sort_by_value(&mut values, &mut labels, true).unwrap();

    let mut after: Vec<(i32, Label)> = values
        .iter()
        .cloned()
        .zip(labels.iter().cloned())
        .collect();
    before.sort_by(|a, b| a.0.cmp(&b.0).then_with(|| a.1.cmp(&b.1)));
    after.sort_by(|a, b| a.0.cmp(&b.0).then_with(|| a.1.cmp(&b.1)));
    assert_eq!(before, after);
}

#[test]
fn test_sort_idempotent() {
    let mut values = vec![4, 2, 4, 1];
    let mut labels = labels_of(&["a", "b", "c", "d"]);
    sort_by_value(&mut values, &mut labels, true).unwrap();
    let (values_once, labels_once) = (values.clone(), labels.clone());

    sort_by_value(&mut values, &mut labels, true).unwrap();
    assert_eq!(values, values_once);
    assert_eq!(labels, labels_once);
}

#[test]
fn test_sort_by_label_numeric_string_aware() {
    let mut values = vec![1, 2, 3];
    let mut labels = labels_of(&["10", "9", "2"]);

    sort_by_label(&mut values, &mut labels, true).unwrap();
    assert_eq!(labels, labels_of(&["2", "9", "10"]));
    assert_eq!(values, vec![3, 2, 1]);
}

#[test]
fn test_sort_by_label_descending() {
    let mut values = vec![1, 2, 3];
    let mut labels = vec![Label::Int(2), Label::Int(9), Label::Int(5)];

    sort_by_label(&mut values, &mut labels, false).unwrap();
    assert_eq!(labels, vec![Label::Int(9), Label::Int(5), Label::Int(2)]);
    assert_eq!(values, vec![2, 3, 1]);
}

#[test]
fn test_sort_empty_and_single_are_noops() {
    let mut values: Vec<i32> = vec![];
    let mut labels: Vec<Label> = vec![];
    sort_by_value(&mut values, &mut labels, true).unwrap();
    assert!(values.is_empty());

    let mut values = vec![42];
    let mut labels = vec![Label::Int(0)];
    sort_by_value(&mut values, &mut labels, false).unwrap();
    assert_eq!(values, vec![42]);
}

#[test]
fn test_sort_length_mismatch() {
    let mut values = vec![1, 2, 3];
    let mut labels = vec![Label::Int(0)];
    let result = sort_by_value(&mut values, &mut labels, true);
    assert!(matches!(result, Err(Error::InvalidArgument(_))));
}

#[test]
fn test_sort_nan_falls_back_to_original_order() {
    let mut values = vec![2.0, f64::NAN, 1.0];
    let mut labels = labels_of(&["a", "nan", "b"]);
    sort_by_value(&mut values, &mut labels, true).unwrap();
    // No panic and all three elements survive
    assert_eq!(values.len(), 3);
    assert_eq!(labels.len(), 3);
}
