use tabrs::error::Error;
use tabrs::index::Label;
use tabrs::series::Series;

#[test]
fn test_series_creation() {
    let series = Series::new(vec![1, 2, 3, 4, 5], Some("test".to_string())).unwrap();
    assert_eq!(series.len(), 5);
    assert_eq!(series.name(), Some(&"test".to_string()));
    assert_eq!(series.get(0), Some(&1));
    assert_eq!(series.get(4), Some(&5));
    assert_eq!(series.get(5), None);
    assert!(series.index().is_default());
}

#[test]
fn test_series_with_labels() {
    let labels = vec![Label::from("a"), Label::from("b"), Label::from("a")];
    let series = Series::with_labels(vec![10, 20, 30], labels, None).unwrap();
    assert_eq!(series.len(), 3);
    assert!(!series.index().is_default());
    assert_eq!(series.index().get_locs(&Label::from("a")), Some(&[0, 2][..]));
    assert_eq!(series.index().get_locs(&Label::from("b")), Some(&[1][..]));
}

#[test]
fn test_series_label_length_mismatch() {
    let result = Series::with_labels(vec![1, 2, 3], vec![Label::from("a")], None);
    assert!(matches!(result, Err(Error::InvalidArgument(_))));
}

#[test]
fn test_push_default_labeling() {
    let mut series = Series::new(vec![1, 2], None).unwrap();
    series.push(3).unwrap();
    assert_eq!(series.len(), 3);
    assert!(series.index().is_default());
    assert_eq!(series.index().get_locs(&Label::Int(2)), Some(&[2][..]));
}

#[test]
fn test_push_labeled_is_one_way() {
    let mut series = Series::new(vec![1, 2], None).unwrap();
    series.push_labeled(3, Label::from("x"));
    assert!(!series.index().is_default());
    assert_eq!(series.index().get_locs(&Label::from("x")), Some(&[2][..]));

    // Unlabeled append is rejected once labeling turned explicit
    let result = series.push(4);
    assert!(matches!(result, Err(Error::InvalidState(_))));
    assert_eq!(series.len(), 3);
}

#[test]
fn test_update_values_broadcast() {
    let labels = vec![Label::from("a"), Label::from("b"), Label::from("a")];
    let mut series = Series::with_labels(vec![1, 2, 3], labels, None).unwrap();

    series.update_values(&Label::from("a"), &[99]).unwrap();
    assert_eq!(series.values(), &[99, 2, 99]);
}

#[test]
fn test_update_values_positional() {
    let labels = vec![Label::from("a"), Label::from("b"), Label::from("a")];
    let mut series = Series::with_labels(vec![1, 2, 3], labels, None).unwrap();

    series.update_values(&Label::from("a"), &[7, 8]).unwrap();
    assert_eq!(series.values(), &[7, 2, 8]);
}

#[test]
fn test_update_values_single_bucket_readback() {
    let labels = vec![Label::from("a"), Label::from("b")];
    let mut series = Series::with_labels(vec![1, 2], labels, None).unwrap();

    series.update_values(&Label::from("b"), &[42]).unwrap();
    let positions = series.index().get_locs(&Label::from("b")).unwrap().to_vec();
    let read_back: Vec<i32> = positions.iter().map(|&p| *series.get(p).unwrap()).collect();
    assert_eq!(read_back, vec![42]);
    // Other positions unchanged
    assert_eq!(series.get(0), Some(&1));
}

#[test]
fn test_update_values_errors() {
    let labels = vec![Label::from("a"), Label::from("b"), Label::from("a")];
    let mut series = Series::with_labels(vec![1, 2, 3], labels, None).unwrap();

    let missing = series.update_values(&Label::from("zzz"), &[1]);
    assert!(matches!(missing, Err(Error::NotFound(_))));

    // Bucket "a" has 2 positions; 3 replacement values fit neither rule
    let mismatched = series.update_values(&Label::from("a"), &[1, 2, 3]);
    assert!(matches!(mismatched, Err(Error::InvalidArgument(_))));
    assert_eq!(series.values(), &[1, 2, 3]);
}

#[test]
fn test_remove_across_all_buckets() {
    // The value 5 occurs under two different labels; both occurrences go
    let labels = vec![
        Label::from("a"),
        Label::from("b"),
        Label::from("a"),
        Label::from("c"),
    ];
    let mut series = Series::with_labels(vec![5, 2, 5, 4], labels, None).unwrap();

    assert!(series.remove(&5, true));
    assert_eq!(series.values(), &[2, 4]);
    // Bucket "a" became empty and was dropped; survivors were compacted
    assert!(!series.index().contains(&Label::from("a")));
    assert_eq!(series.index().get_locs(&Label::from("b")), Some(&[0][..]));
    assert_eq!(series.index().get_locs(&Label::from("c")), Some(&[1][..]));
}

#[test]
fn test_remove_keep_empty_bucket() {
    let labels = vec![Label::from("a"), Label::from("b")];
    let mut series = Series::with_labels(vec![1, 2], labels, None).unwrap();

    assert!(series.remove(&1, false));
    assert_eq!(series.values(), &[2]);
    assert!(series.index().contains(&Label::from("a")));
    assert_eq!(series.index().get_locs(&Label::from("a")), Some(&[][..]));
}

#[test]
fn test_remove_renumbers_default_labels() {
    let mut series = Series::new(vec![10, 20, 30], None).unwrap();

    assert!(series.remove(&20, true));
    assert_eq!(series.values(), &[10, 30]);
    // Default labels stay the dense range after compaction
    assert!(series.index().is_default());
    assert_eq!(series.labels(), &[Label::Int(0), Label::Int(1)]);

    // The next push lands on a fresh label, not a duplicate bucket
    series.push(40).unwrap();
    assert_eq!(series.values(), &[10, 30, 40]);
    assert_eq!(series.index().get_locs(&Label::Int(2)), Some(&[2][..]));
}

#[test]
fn test_remove_missing_value_is_noop() {
    let labels = vec![Label::from("a"), Label::from("b")];
    let mut series = Series::with_labels(vec![1, 2], labels.clone(), None).unwrap();

    assert!(!series.remove(&99, true));
    assert_eq!(series.values(), &[1, 2]);
    assert_eq!(series.labels(), &labels[..]);
}

#[test]
fn test_clear() {
    let mut series = Series::new(vec![1, 2, 3], None).unwrap();
    series.clear();
    assert_eq!(series.len(), 0);
    assert!(series.is_empty());
    assert!(series.index().is_empty());
}

#[test]
fn test_get_slice_full_sequence() {
    let series = Series::new(vec![1, 2, 3, 4, 5], None).unwrap();
    let slice = series.get_slice(0, 4, 1).unwrap();
    assert_eq!(slice, vec![1, 2, 3, 4, 5]);
}

#[test]
fn test_get_slice_stride_and_direction() {
    let series = Series::new(vec![10, 20, 30, 40, 50], None).unwrap();

    assert_eq!(series.get_slice(0, 4, 2).unwrap(), vec![10, 30, 50]);
    assert_eq!(series.get_slice(4, 0, -1).unwrap(), vec![50, 40, 30, 20, 10]);
    assert_eq!(series.get_slice(4, 0, -2).unwrap(), vec![50, 30, 10]);
    // `to` included only when the stride lands on it exactly
    assert_eq!(series.get_slice(0, 3, 2).unwrap(), vec![10, 30]);
}

#[test]
fn test_get_slice_equal_endpoints_empty() {
    let series = Series::new(vec![10, 20, 30], None).unwrap();
    assert_eq!(series.get_slice(1, 1, 1).unwrap(), Vec::<i32>::new());
    assert_eq!(series.get_slice(1, 1, -1).unwrap(), Vec::<i32>::new());
}

#[test]
fn test_get_slice_errors() {
    let series = Series::new(vec![10, 20, 30], None).unwrap();

    assert!(matches!(
        series.get_slice(0, 3, 1),
        Err(Error::OutOfRange { index: 3, size: 3 })
    ));
    assert!(matches!(
        series.get_slice(5, 1, 1),
        Err(Error::OutOfRange { .. })
    ));
    assert!(matches!(
        series.get_slice(0, 2, 0),
        Err(Error::InvalidArgument(_))
    ));
    // Direction must follow the step sign
    assert!(matches!(
        series.get_slice(2, 0, 1),
        Err(Error::InvalidArgument(_))
    ));
    assert!(matches!(
        series.get_slice(0, 2, -1),
        Err(Error::InvalidArgument(_))
    ));
    // Stride magnitude bounded by element count
    assert!(matches!(
        series.get_slice(0, 2, 4),
        Err(Error::InvalidArgument(_))
    ));
}

#[test]
fn test_head_and_tail() {
    let labels = vec![
        Label::from("a"),
        Label::from("b"),
        Label::from("c"),
        Label::from("d"),
    ];
    let series = Series::with_labels(vec![1, 2, 3, 4], labels, Some("s".to_string())).unwrap();

    let head = series.head(2).unwrap();
    assert_eq!(head.values(), &[1, 2]);
    assert_eq!(head.labels(), &[Label::from("a"), Label::from("b")]);

    let tail = series.tail(2).unwrap();
    assert_eq!(tail.values(), &[3, 4]);
    assert_eq!(tail.labels(), &[Label::from("c"), Label::from("d")]);

    assert!(matches!(series.head(5), Err(Error::OutOfRange { .. })));
    assert!(matches!(series.tail(5), Err(Error::OutOfRange { .. })));
}

#[test]
fn test_tail_renumbers_default_labels() {
    let series = Series::new(vec![1, 2, 3, 4, 5], None).unwrap();

    let tail = series.tail(2).unwrap();
    assert_eq!(tail.values(), &[4, 5]);
    // A default-labeled subset starts its own dense range
    assert!(tail.index().is_default());
    assert_eq!(tail.labels(), &[Label::Int(0), Label::Int(1)]);
}

#[test]
fn test_head_is_independent() {
    let mut series = Series::new(vec![1, 2, 3], None).unwrap();
    let head = series.head(2).unwrap();
    series.update_values(&Label::Int(0), &[99]).unwrap();
    assert_eq!(head.get(0), Some(&1));
}

#[test]
fn test_find() {
    let series = Series::new(vec![5, 1, 5, 2, 5], None).unwrap();
    assert_eq!(series.find(&5), vec![0, 2, 4]);
    assert_eq!(series.find(&99), Vec::<usize>::new());
}

#[test]
fn test_filter() {
    let series = Series::new(vec![1, 2, 3, 4, 5], None).unwrap();
    assert_eq!(series.filter(|&v| v % 2 == 0), vec![2, 4]);
}

#[test]
fn test_series_numeric_operations() {
    let series = Series::new(vec![10, 20, 30, 40, 50], Some("numbers".to_string())).unwrap();

    assert_eq!(series.sum(), 150);
    assert_eq!(series.mean().unwrap(), 30);
    assert_eq!(series.min().unwrap(), 10);
    assert_eq!(series.max().unwrap(), 50);
}

#[test]
fn test_empty_series_numeric_operations() {
    let empty: Series<i32> = Series::new(vec![], Some("empty".to_string())).unwrap();

    assert_eq!(empty.sum(), 0);
    assert!(empty.mean().is_err());
    assert!(empty.min().is_err());
    assert!(empty.max().is_err());
}
