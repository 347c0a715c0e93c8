use super::*;

#[test]
fn test_in_memory_dataset_get() {
    let features = vec![0.0, 1.0, 2.0, 3.0, 4.0, 5.0];
    let dataset = InMemoryDataset::new(features, vec![7, 8], 3).unwrap();

    assert_eq!(dataset.len(), 2);
    assert!(!dataset.is_empty());
    assert_eq!(dataset.feature_dim(), 3);

    let (row, label) = dataset.get(1).unwrap();
    assert_eq!(row, vec![3.0, 4.0, 5.0]);
    assert_eq!(label, 8);
    assert_eq!(dataset.label(0).unwrap(), 7);
}

#[test]
fn test_in_memory_dataset_get_out_of_bounds() {
    let dataset = InMemoryDataset::new(vec![0.0; 4], vec![0, 1], 2).unwrap();
    let err = dataset.get(2).unwrap_err();
    assert_eq!(err, PerceptraError::IndexOutOfBounds { index: 2, len: 2 });
    assert!(dataset.label(5).is_err());
}

#[test]
fn test_in_memory_dataset_rejects_bad_stride() {
    // Seven values cannot form two rows of three.
    let err = InMemoryDataset::new(vec![0.0; 7], vec![0, 1], 3).unwrap_err();
    assert!(matches!(err, PerceptraError::ShapeMismatch { .. }));
}

#[test]
fn test_in_memory_dataset_rejects_zero_feature_dim() {
    let err = InMemoryDataset::new(Vec::new(), vec![0], 0).unwrap_err();
    assert!(matches!(err, PerceptraError::InvalidConfig { .. }));
}

#[test]
fn test_in_memory_dataset_may_be_empty() {
    let dataset = InMemoryDataset::new(Vec::new(), Vec::new(), 4).unwrap();
    assert_eq!(dataset.len(), 0);
    assert!(dataset.is_empty());
}
