use super::*;
use approx::assert_relative_eq;
use rand::rngs::StdRng;
use rand::SeedableRng;

fn fixed_linear(weight: Vec<f32>, bias: Option<Vec<f32>>, in_f: usize, out_f: usize) -> Linear {
    let mut linear = Linear::zeroed(in_f, out_f, bias.is_some()).unwrap();
    linear
        .weight
        .value_mut()
        .data_mut()
        .copy_from_slice(&weight);
    if let Some(bias_data) = bias {
        linear
            .bias
            .as_mut()
            .unwrap()
            .value_mut()
            .data_mut()
            .copy_from_slice(&bias_data);
    }
    linear
}

#[test]
fn test_linear_creation() {
    let mut rng = StdRng::seed_from_u64(0);
    let linear = Linear::new(10, 5, true, &mut rng).unwrap();
    assert_eq!(linear.weight.shape(), &[5, 10]);
    assert!(linear.bias.is_some());
    assert_eq!(linear.bias.as_ref().unwrap().shape(), &[5]);
    assert_eq!(linear.in_features(), 10);
    assert_eq!(linear.out_features(), 5);

    let no_bias = Linear::new(20, 30, false, &mut rng).unwrap();
    assert_eq!(no_bias.weight.shape(), &[30, 20]);
    assert!(no_bias.bias.is_none());
}

#[test]
fn test_linear_rejects_zero_features() {
    let mut rng = StdRng::seed_from_u64(0);
    assert!(matches!(
        Linear::new(0, 5, true, &mut rng),
        Err(PerceptraError::InvalidConfig { .. })
    ));
    assert!(matches!(
        Linear::zeroed(5, 0, true),
        Err(PerceptraError::InvalidConfig { .. })
    ));
}

#[test]
fn test_linear_parameters() {
    let mut rng = StdRng::seed_from_u64(1);
    let linear = Linear::new(3, 2, true, &mut rng).unwrap();
    let params = linear.parameters();
    assert_eq!(params.len(), 2);
    assert_eq!(params[0].shape(), &[2, 3]); // Weight
    assert_eq!(params[1].shape(), &[2]); // Bias

    let named = linear.named_parameters();
    assert_eq!(named[0].0, "weight");
    assert_eq!(named[1].0, "bias");

    let no_bias = Linear::new(5, 4, false, &mut rng).unwrap();
    assert_eq!(no_bias.parameters().len(), 1);
}

#[test]
fn test_linear_forward_no_bias() {
    let mut linear = fixed_linear(vec![1.0, 2.0, 3.0, 4.0, 5.0, 6.0], None, 3, 2);
    let input = Tensor::new(vec![10.0, 20.0, 30.0], vec![1, 3]).unwrap();
    let output = linear.forward(&input).unwrap();

    // input @ weight.T = [10, 20, 30] @ [[1, 4], [2, 5], [3, 6]] = [140, 320]
    assert_eq!(output.shape(), &[1, 2]);
    assert_eq!(output.data(), &[140.0, 320.0]);
}

#[test]
fn test_linear_forward_with_bias_batch() {
    let mut linear = fixed_linear(
        vec![1.0, 0.0, 0.0, 0.0, 1.0, 0.0],
        Some(vec![0.1, 0.2]),
        3,
        2,
    );
    let input = Tensor::new(vec![10.0, 20.0, 30.0, 1.0, 2.0, 3.0], vec![2, 3]).unwrap();
    let output = linear.forward(&input).unwrap();

    // matmul picks out the first two features; bias broadcasts per row.
    assert_eq!(output.shape(), &[2, 2]);
    let expected = [10.1f32, 20.2, 1.1, 2.2];
    for (o, e) in output.data().iter().zip(expected.iter()) {
        assert_relative_eq!(o, e, epsilon = 1e-6);
    }
}

#[test]
fn test_linear_forward_shape_errors() {
    let mut linear = Linear::zeroed(3, 2, true).unwrap();

    let wrong_width = Tensor::new(vec![0.0; 8], vec![2, 4]).unwrap();
    assert!(matches!(
        linear.forward(&wrong_width),
        Err(PerceptraError::ShapeMismatch { .. })
    ));

    let wrong_rank = Tensor::new(vec![0.0; 3], vec![3]).unwrap();
    assert!(matches!(
        linear.forward(&wrong_rank),
        Err(PerceptraError::RankMismatch { .. })
    ));
}

#[test]
fn test_linear_backward_simple() {
    let mut linear = fixed_linear(vec![3.0, 4.0], Some(vec![0.1]), 2, 1);
    let input = Tensor::new(vec![10.0, 20.0], vec![1, 2]).unwrap();

    let output = linear.forward(&input).unwrap();
    assert_relative_eq!(output.data()[0], 110.1, epsilon = 1e-4);

    let upstream = Tensor::new(vec![1.0], vec![1, 1]).unwrap();
    let grad_input = linear.backward(&upstream).unwrap();

    assert_eq!(grad_input.shape(), &[1, 2]);
    assert_relative_eq!(grad_input.data()[0], 3.0, epsilon = 1e-6);
    assert_relative_eq!(grad_input.data()[1], 4.0, epsilon = 1e-6);

    let grad_weight = linear.weight.grad();
    assert_relative_eq!(grad_weight.data()[0], 10.0, epsilon = 1e-6);
    assert_relative_eq!(grad_weight.data()[1], 20.0, epsilon = 1e-6);

    let grad_bias = linear.bias.as_ref().unwrap().grad();
    assert_relative_eq!(grad_bias.data()[0], 1.0, epsilon = 1e-6);
}

#[test]
fn test_linear_backward_sums_bias_over_batch() {
    let mut linear = fixed_linear(vec![0.0; 12], Some(vec![0.0; 4]), 3, 4);
    let input = Tensor::new((1..=6).map(|x| x as f32).collect(), vec![2, 3]).unwrap();
    let _ = linear.forward(&input).unwrap();

    let upstream = create::ones(&[2, 4]);
    let _ = linear.backward(&upstream).unwrap();

    // Upstream is all ones over a batch of two, so each bias grad is 2.
    let grad_bias = linear.bias.as_ref().unwrap().grad();
    assert_eq!(grad_bias.shape(), &[4]);
    assert!(grad_bias.data().iter().all(|&g| g == 2.0));

    // grad_weight[o, i] = sum_b upstream[b, o] * input[b, i] = input col sums.
    let grad_weight = linear.weight.grad();
    assert_eq!(grad_weight.shape(), &[4, 3]);
    assert_eq!(&grad_weight.data()[0..3], &[5.0, 7.0, 9.0]);
}

#[test]
fn test_linear_backward_requires_forward() {
    let mut linear = Linear::zeroed(2, 2, true).unwrap();
    let upstream = create::ones(&[1, 2]);
    let err = linear.backward(&upstream).unwrap_err();
    assert_eq!(
        err,
        PerceptraError::BackwardBeforeForward {
            layer: "Linear".to_string()
        }
    );
}

#[test]
fn test_linear_backward_accumulates_until_reset() {
    let mut linear = fixed_linear(vec![1.0, 1.0], Some(vec![0.0]), 2, 1);
    let input = Tensor::new(vec![1.0, 2.0], vec![1, 2]).unwrap();
    let upstream = create::ones(&[1, 1]);

    let _ = linear.forward(&input).unwrap();
    let _ = linear.backward(&upstream).unwrap();
    let _ = linear.forward(&input).unwrap();
    let _ = linear.backward(&upstream).unwrap();

    // Two backward passes without a reset double the gradient.
    assert_eq!(linear.weight.grad().data(), &[2.0, 4.0]);

    for param in linear.parameters_mut() {
        param.reset_grad();
    }
    assert!(linear.weight.grad().data().iter().all(|&g| g == 0.0));
}
