use super::*;
use crate::tensor::create;

#[test]
fn test_new_validates_length() {
    let t = Tensor::new(vec![1.0, 2.0, 3.0, 4.0, 5.0, 6.0], vec![2, 3]).unwrap();
    assert_eq!(t.shape(), &[2, 3]);
    assert_eq!(t.numel(), 6);

    let err = Tensor::new(vec![1.0, 2.0], vec![2, 3]).unwrap_err();
    assert_eq!(
        err,
        PerceptraError::TensorCreation {
            data_len: 2,
            shape: vec![2, 3]
        }
    );
}

#[test]
fn test_row_access() {
    let t = Tensor::new(vec![1.0, 2.0, 3.0, 4.0, 5.0, 6.0], vec![2, 3]).unwrap();
    assert_eq!(t.row(0), &[1.0, 2.0, 3.0]);
    assert_eq!(t.row(1), &[4.0, 5.0, 6.0]);
}

#[test]
fn test_matmul_values() {
    // [1, 2; 3, 4] . [5, 6; 7, 8] = [19, 22; 43, 50]
    let a = Tensor::new(vec![1.0, 2.0, 3.0, 4.0], vec![2, 2]).unwrap();
    let b = Tensor::new(vec![5.0, 6.0, 7.0, 8.0], vec![2, 2]).unwrap();
    let c = a.matmul(&b).unwrap();
    assert_eq!(c.shape(), &[2, 2]);
    assert_eq!(c.data(), &[19.0, 22.0, 43.0, 50.0]);
}

#[test]
fn test_matmul_rectangular() {
    // [1, 2, 3] (1x3) . [[1], [2], [3]] (3x1) = [14] (1x1)
    let a = Tensor::new(vec![1.0, 2.0, 3.0], vec![1, 3]).unwrap();
    let b = Tensor::new(vec![1.0, 2.0, 3.0], vec![3, 1]).unwrap();
    let c = a.matmul(&b).unwrap();
    assert_eq!(c.shape(), &[1, 1]);
    assert_eq!(c.data(), &[14.0]);
}

#[test]
fn test_matmul_inner_dim_mismatch() {
    let a = Tensor::new(vec![0.0; 6], vec![2, 3]).unwrap();
    let b = Tensor::new(vec![0.0; 8], vec![4, 2]).unwrap();
    let err = a.matmul(&b).unwrap_err();
    assert!(matches!(err, PerceptraError::ShapeMismatch { .. }));
}

#[test]
fn test_matmul_rejects_vectors() {
    let a = Tensor::new(vec![0.0; 3], vec![3]).unwrap();
    let b = Tensor::new(vec![0.0; 6], vec![3, 2]).unwrap();
    let err = a.matmul(&b).unwrap_err();
    assert!(matches!(err, PerceptraError::RankMismatch { .. }));
}

#[test]
fn test_transpose() {
    let t = Tensor::new(vec![1.0, 2.0, 3.0, 4.0, 5.0, 6.0], vec![2, 3]).unwrap();
    let tt = t.transpose().unwrap();
    assert_eq!(tt.shape(), &[3, 2]);
    assert_eq!(tt.data(), &[1.0, 4.0, 2.0, 5.0, 3.0, 6.0]);
}

#[test]
fn test_sum_rows() {
    let t = Tensor::new(vec![1.0, 2.0, 3.0, 4.0, 5.0, 6.0], vec![2, 3]).unwrap();
    let summed = t.sum_rows().unwrap();
    assert_eq!(summed.shape(), &[3]);
    assert_eq!(summed.data(), &[5.0, 7.0, 9.0]);
}

#[test]
fn test_all_finite() {
    let ok = create::ones(&[2, 2]);
    assert!(ok.all_finite());

    let mut bad = create::ones(&[2, 2]);
    bad.data_mut()[3] = f32::NAN;
    assert!(!bad.all_finite());

    let mut inf = create::ones(&[2, 2]);
    inf.data_mut()[0] = f32::INFINITY;
    assert!(!inf.all_finite());
}
