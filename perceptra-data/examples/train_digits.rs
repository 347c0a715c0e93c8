//! # Training a Digit Classifier on Synthetic Data
//!
//! This example walks through the full Perceptra loop:
//!
//! 1. **Configuration** (`TrainingConfig`): epochs, learning rate, batch
//!    size and the layer widths of the feed-forward network.
//! 2. **Data**: a seeded synthetic digit dataset (one noisy template per
//!    class), shuffled per epoch by a `RandomSampler` and collated by the
//!    `DataLoader` with MNIST-style normalization.
//! 3. **Training** (`Trainer::fit`): per batch — reset gradients, forward,
//!    negative log-likelihood loss, backward, SGD step.
//! 4. **Evaluation** (`Trainer::evaluate`): mean loss and accuracy over
//!    one pass of the data.
//! 5. **Rendering**: a few samples are drawn as ASCII rasters next to the
//!    predicted per-class probability bars.
//!
//! ## Running
//! `RUST_LOG=info cargo run --example train_digits`

use std::error::Error;

use perceptra_core::train::{Trainer, TrainingConfig};
use perceptra_core::nn::Layer;
use perceptra_core::Tensor;
use perceptra_data::dataset::Dataset;
use perceptra_data::{synthetic_digits, DataLoader, Normalize, RandomSampler};

const IMAGE_SIDE: usize = 28;
const NUM_CLASSES: usize = 10;
const SAMPLES: usize = 640;

fn main() -> Result<(), Box<dyn Error>> {
    env_logger::init();

    let config = TrainingConfig {
        epochs: 5,
        ..TrainingConfig::default()
    };

    let dataset = synthetic_digits(
        SAMPLES,
        IMAGE_SIDE * IMAGE_SIDE,
        NUM_CLASSES,
        0.1,
        7,
    )?;
    let normalize = Normalize::mnist();
    let mut loader = DataLoader::new(
        dataset,
        config.batch_size,
        RandomSampler::with_seed(7),
        false,
    )?
    .with_normalize(normalize);

    let mut trainer = Trainer::from_config(&config)?;
    let report = trainer.fit(&mut loader)?;
    for (epoch, loss) in report.epoch_losses.iter().enumerate() {
        println!("epoch {:>2}: running average loss {:.4}", epoch + 1, loss);
    }

    let eval = trainer.evaluate(&mut loader)?;
    println!(
        "\nevaluation: mean loss {:.4}, accuracy {:.1}%\n",
        eval.mean_loss,
        eval.accuracy * 100.0
    );

    // Render a handful of predictions.
    for index in [0usize, 1, 2] {
        let (pixels, label) = loader.dataset().get(index)?;
        let normalized: Vec<f32> = pixels.iter().map(|&v| normalize.apply(v)).collect();
        let input = Tensor::new(normalized, vec![1, IMAGE_SIDE * IMAGE_SIDE])?;
        let log_probs = trainer.network_mut().forward(&input)?;
        let probs: Vec<f32> = log_probs.row(0).iter().map(|lp| lp.exp()).collect();

        println!("sample {} (true class {}):", index, label);
        render_prediction(&pixels, &probs);
    }

    Ok(())
}

/// Prints one image as an ASCII raster with a probability bar per class.
fn render_prediction(pixels: &[f32], probs: &[f32]) {
    const RAMP: &[u8] = b" .:-=+*#%@";

    for row in pixels.chunks(IMAGE_SIDE) {
        let line: String = row
            .iter()
            .map(|&v| {
                let shade = (v.clamp(0.0, 1.0) * (RAMP.len() - 1) as f32).round() as usize;
                RAMP[shade] as char
            })
            .collect();
        println!("  {}", line);
    }

    for (class, &p) in probs.iter().enumerate() {
        let bar = "#".repeat((p * 40.0).round() as usize);
        println!("  {:>2}: {:>5.1}% {}", class, p * 100.0, bar);
    }
    println!();
}
