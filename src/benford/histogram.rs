//! Digit histograms and probability vectors

use super::{bucket, sample_digit, DIGITS, DIGIT_COUNT};
use crate::config::Domain;
use crate::error::{BenfordError, BenfordResult};
use serde::{Deserialize, Serialize};

/// Occurrence counts of leading digits 1..=9.
///
/// `zeros` counts samples that coerced to zero and were excluded, so
/// `total() + zeros` equals the number of samples inspected.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct DigitHistogram {
    pub counts: [u64; DIGIT_COUNT],
    #[serde(default)]
    pub zeros: u64,
}

impl DigitHistogram {
    /// Count a sequence of digits. Any digit outside 1..=9 is rejected.
    pub fn from_digits<I>(digits: I) -> BenfordResult<Self>
    where
        I: IntoIterator<Item = u8>,
    {
        let mut hist = Self::default();
        for digit in digits {
            let idx = bucket(digit).ok_or(BenfordError::InvalidDigit {
                value: f64::from(digit),
            })?;
            hist.counts[idx] += 1;
        }
        Ok(hist)
    }

    /// Coerce and count raw samples for a domain (zero samples go to `zeros`)
    pub fn from_samples<I>(samples: I, domain: Domain) -> BenfordResult<Self>
    where
        I: IntoIterator<Item = f64>,
    {
        let mut hist = Self::default();
        for value in samples {
            match sample_digit(value, domain)? {
                Some(digit) => hist.counts[usize::from(digit - 1)] += 1,
                None => hist.zeros += 1,
            }
        }
        Ok(hist)
    }

    /// Count for a single digit (0 outside 1..=9)
    pub fn count(&self, digit: u8) -> u64 {
        bucket(digit).map(|i| self.counts[i]).unwrap_or(0)
    }

    /// Number of counted samples (excludes zeros)
    pub fn total(&self) -> u64 {
        self.counts.iter().sum()
    }

    /// Normalize counts into fractions of the total
    pub fn to_probabilities(&self) -> BenfordResult<ProbabilityVector> {
        let total = self.total();
        if total == 0 {
            return Err(BenfordError::EmptyHistogram);
        }
        let total = total as f64;
        let mut probs = [0.0; DIGIT_COUNT];
        for (p, &c) in probs.iter_mut().zip(self.counts.iter()) {
            *p = c as f64 / total;
        }
        Ok(ProbabilityVector(probs))
    }

    /// (digit, count) pairs in digit order
    pub fn iter(&self) -> impl Iterator<Item = (u8, u64)> + '_ {
        DIGITS.iter().copied().zip(self.counts.iter().copied())
    }
}

/// Fraction of samples per leading digit. Values lie in [0, 1] and sum to ~1.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ProbabilityVector(pub [f64; DIGIT_COUNT]);

impl ProbabilityVector {
    /// Probability for a digit (0.0 outside 1..=9)
    pub fn get(&self, digit: u8) -> f64 {
        bucket(digit).map(|i| self.0[i]).unwrap_or(0.0)
    }

    pub fn sum(&self) -> f64 {
        self.0.iter().sum()
    }

    /// The same distribution in percent
    pub fn percentages(&self) -> [f64; DIGIT_COUNT] {
        self.0.map(|p| p * 100.0)
    }

    /// (digit, probability) pairs in digit order
    pub fn iter(&self) -> impl Iterator<Item = (u8, f64)> + '_ {
        DIGITS.iter().copied().zip(self.0.iter().copied())
    }
}
