//! Generator configuration format.

use crate::{common::*, error::*};

/// Construction-time options shared by the 2D and 3D generators.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GeneratorConfig {
    /// Number of examples per batch.
    pub batch_size: usize,
    /// Model input shape, spatial dims plus channel count: `[h, w, channels]`.
    pub input_shape: [usize; 3],
    /// Number of label classes; 1 means a binary task with no expansion.
    #[serde(default = "default_n_classes")]
    pub n_classes: usize,
    /// Number of positively sampled slices per batch.
    #[serde(default = "default_n_pos")]
    pub n_pos: usize,
    /// Drop the background channel when expanding labels.
    #[serde(default)]
    pub remove_background: bool,
    /// Batches per epoch, configured independently of the dataset size.
    #[serde(default = "default_steps_per_epoch")]
    pub steps_per_epoch: usize,
    /// Reshuffle the case order at each epoch boundary.
    #[serde(default = "default_shuffle")]
    pub shuffle: bool,
    /// Seed for the generator-owned RNGs. Unset means seeded from entropy,
    /// which makes batches non-reproducible across runs.
    #[serde(default)]
    pub seed: Option<u64>,
}

fn default_n_classes() -> usize {
    1
}

fn default_n_pos() -> usize {
    1
}

fn default_steps_per_epoch() -> usize {
    1000
}

fn default_shuffle() -> bool {
    true
}

impl GeneratorConfig {
    pub fn open<P>(path: P) -> Result<Self>
    where
        P: AsRef<Path>,
    {
        let text = std::fs::read_to_string(path)?;
        let config: Self = json5::from_str(&text)?;
        config.validate()?;
        Ok(config)
    }

    pub fn validate(&self) -> Result<()> {
        if self.batch_size == 0 {
            return Err(GeneratorError::InvalidConfig(
                "batch_size must be positive".into(),
            ));
        }
        if self.n_classes == 0 {
            return Err(GeneratorError::InvalidConfig(
                "n_classes must be at least 1".into(),
            ));
        }
        if self.n_pos > self.batch_size {
            return Err(GeneratorError::InvalidConfig(format!(
                "n_pos ({}) cannot exceed batch_size ({})",
                self.n_pos, self.batch_size
            )));
        }
        if self.steps_per_epoch == 0 {
            return Err(GeneratorError::InvalidConfig(
                "steps_per_epoch must be positive".into(),
            ));
        }
        if self.input_shape.iter().any(|&d| d == 0) {
            return Err(GeneratorError::InvalidConfig(format!(
                "input_shape {:?} contains a zero dimension",
                self.input_shape
            )));
        }
        Ok(())
    }

    /// Label channel count after optional background removal.
    pub fn label_channels(&self) -> usize {
        if self.n_classes > 1 && self.remove_background {
            self.n_classes - 1
        } else {
            self.n_classes
        }
    }

    pub fn spatial_shape(&self) -> (usize, usize) {
        (self.input_shape[0], self.input_shape[1])
    }

    pub fn input_channels(&self) -> usize {
        self.input_shape[2]
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn base() -> GeneratorConfig {
        GeneratorConfig {
            batch_size: 2,
            input_shape: [64, 64, 1],
            n_classes: 1,
            n_pos: 1,
            remove_background: false,
            steps_per_epoch: 10,
            shuffle: true,
            seed: Some(0),
        }
    }

    #[test]
    fn validate_accepts_reasonable_config() {
        assert!(base().validate().is_ok());
    }

    #[test]
    fn validate_rejects_n_pos_above_batch_size() {
        let config = GeneratorConfig { n_pos: 3, ..base() };
        assert!(matches!(
            config.validate(),
            Err(GeneratorError::InvalidConfig(_))
        ));
    }

    #[test]
    fn parses_json5_with_defaults() {
        let config: GeneratorConfig =
            json5::from_str("{ batch_size: 4, input_shape: [128, 128, 1], n_pos: 2 }").unwrap();
        assert_eq!(config.steps_per_epoch, 1000);
        assert!(config.shuffle);
        assert_eq!(config.n_classes, 1);
        assert_eq!(config.label_channels(), 1);
    }

    #[test]
    fn label_channels_accounts_for_background_removal() {
        let config = GeneratorConfig {
            n_classes: 3,
            remove_background: true,
            ..base()
        };
        assert_eq!(config.label_channels(), 2);
    }
}
