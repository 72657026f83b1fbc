//! Log Record - one epoch's measurements

use serde::{Deserialize, Serialize};

/// A single epoch parsed from a training log block.
///
/// Records are immutable once built; the table keys them by `epoch`.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq)]
pub struct LogRecord {
    epoch: u64,
    train_loss: f64,
    lr: f64,
    dice: f64,
}

impl LogRecord {
    /// Create a new log record.
    ///
    /// # Arguments
    ///
    /// * `epoch` - Epoch number (unique key within a table)
    /// * `train_loss` - Mean training loss for the epoch
    /// * `lr` - Learning rate in effect for the epoch
    /// * `dice` - Validation Dice coefficient
    #[must_use]
    pub const fn new(epoch: u64, train_loss: f64, lr: f64, dice: f64) -> Self {
        Self {
            epoch,
            train_loss,
            lr,
            dice,
        }
    }

    /// Get the epoch number.
    #[must_use]
    pub const fn epoch(&self) -> u64 {
        self.epoch
    }

    /// Get the training loss.
    #[must_use]
    pub const fn train_loss(&self) -> f64 {
        self.train_loss
    }

    /// Get the learning rate.
    #[must_use]
    pub const fn lr(&self) -> f64 {
        self.lr
    }

    /// Get the Dice coefficient.
    #[must_use]
    pub const fn dice(&self) -> f64 {
        self.dice
    }

    /// Check that loss, learning rate and Dice are all finite.
    #[must_use]
    pub fn is_finite(&self) -> bool {
        self.train_loss.is_finite() && self.lr.is_finite() && self.dice.is_finite()
    }
}
