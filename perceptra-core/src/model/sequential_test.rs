use super::*;
use approx::assert_relative_eq;
use crate::nn::NllLoss;
use crate::tensor::create;
use crate::utils::grad_check::check_model_gradients;

#[test]
fn test_feed_forward_structure() {
    let model = feed_forward(&[8, 6, 4], 42).unwrap();
    // fc1, relu1, fc2, log_softmax
    assert_eq!(model.len(), 4);

    let named = model.named_parameters();
    let names: Vec<&str> = named.iter().map(|(n, _)| n.as_str()).collect();
    assert_eq!(
        names,
        vec!["fc1.weight", "fc1.bias", "fc2.weight", "fc2.bias"]
    );
    assert_eq!(named[0].1.shape(), &[6, 8]);
    assert_eq!(named[2].1.shape(), &[4, 6]);
}

#[test]
fn test_feed_forward_rejects_bad_widths() {
    assert!(matches!(
        feed_forward(&[784], 0),
        Err(PerceptraError::InvalidConfig { .. })
    ));
    assert!(matches!(
        feed_forward(&[784, 0, 10], 0),
        Err(PerceptraError::InvalidConfig { .. })
    ));
}

#[test]
fn test_feed_forward_is_seed_deterministic() {
    let model_a = feed_forward(&[5, 4, 3], 7).unwrap();
    let model_b = feed_forward(&[5, 4, 3], 7).unwrap();
    for (a, b) in model_a.parameters().iter().zip(model_b.parameters()) {
        assert_eq!(a.value().data(), b.value().data());
    }

    let model_c = feed_forward(&[5, 4, 3], 8).unwrap();
    let first_a = model_a.parameters()[0].value().data().to_vec();
    let first_c = model_c.parameters()[0].value().data().to_vec();
    assert_ne!(first_a, first_c);
}

#[test]
fn test_forward_is_pure_between_updates() {
    let mut model = feed_forward(&[6, 5, 4], 21).unwrap();
    let input = create::ones(&[3, 6]);

    let first = model.forward(&input).unwrap();
    let second = model.forward(&input).unwrap();
    assert_eq!(first.data(), second.data());
}

#[test]
fn test_output_rows_are_log_probabilities() {
    let mut model = feed_forward(&[10, 8, 5], 3).unwrap();
    let mut rng = rand::rngs::StdRng::seed_from_u64(99);
    let input = create::randn(&[4, 10], &mut rng);

    let output = model.forward(&input).unwrap();
    assert_eq!(output.shape(), &[4, 5]);
    for b in 0..4 {
        let total: f32 = output.row(b).iter().map(|v| v.exp()).sum();
        assert_relative_eq!(total, 1.0, epsilon = 1e-5);
    }
}

#[test]
fn test_backward_propagates_to_parameters() {
    let mut model = feed_forward(&[4, 3, 2], 11).unwrap();
    let mut rng = rand::rngs::StdRng::seed_from_u64(23);
    let input = create::randn(&[2, 4], &mut rng);
    let output = model.forward(&input).unwrap();

    let upstream = NllLoss::new().gradient(&output, &[0, 1]).unwrap();
    let grad_input = model.backward(&upstream).unwrap();
    assert_eq!(grad_input.shape(), input.shape());

    // The output layer's bias gradient is (softmax - onehot) summed over
    // the batch, which cannot vanish for a finite output.
    let named = model.named_parameters();
    let fc2_bias = named
        .iter()
        .find(|(name, _)| name == "fc2.bias")
        .map(|(_, p)| *p)
        .unwrap();
    assert!(fc2_bias.grad().data().iter().any(|&g| g != 0.0));
}

#[test]
fn test_backward_without_forward_fails() {
    let mut model = feed_forward(&[4, 3, 2], 11).unwrap();
    let upstream = create::zeros(&[2, 2]);
    let err = model.backward(&upstream).unwrap_err();
    assert!(matches!(err, PerceptraError::BackwardBeforeForward { .. }));
}

#[test]
fn test_model_gradients_match_finite_differences() {
    // A smooth (ReLU-free) stack so the central difference is reliable.
    let mut rng = rand::rngs::StdRng::seed_from_u64(13);
    let mut model = Sequential::new();
    model.add_layer("fc1", Box::new(Linear::new(5, 4, true, &mut rng).unwrap()));
    model.add_layer("fc2", Box::new(Linear::new(4, 3, true, &mut rng).unwrap()));
    model.add_layer("log_softmax", Box::new(LogSoftmax::new()));

    let inputs = create::randn(&[2, 5], &mut rng);
    let labels = [0i64, 2];
    check_model_gradients(&mut model, &NllLoss::new(), &inputs, &labels, 1e-2, 1e-2)
        .unwrap();
}
