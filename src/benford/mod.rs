//! Leading-digit statistics and Benford scoring
//!
//! The scoring pipeline is:
//!
//! 1. [`leading_digit`] maps each positive sample to a digit in `1..=9`
//! 2. [`DigitHistogram`] counts digits (zero samples are excluded and counted apart)
//! 3. [`DigitHistogram::to_probabilities`] normalizes counts to a [`ProbabilityVector`]
//! 4. [`divergence`] compares the observed vector against [`benford_reference`]

mod digit;
mod divergence;
mod histogram;

pub use digit::{leading_digit, sample_digit, FREQUENCY_EPSILON};
pub use divergence::{benford_reference, divergence, Divergence};
pub use histogram::{DigitHistogram, ProbabilityVector};

/// Number of digit buckets (1 through 9)
pub const DIGIT_COUNT: usize = 9;

/// The leading digits, in bucket order
pub const DIGITS: [u8; DIGIT_COUNT] = [1, 2, 3, 4, 5, 6, 7, 8, 9];

/// Bucket index for a digit, `None` outside `1..=9`
pub(crate) fn bucket(digit: u8) -> Option<usize> {
    if (1..=9).contains(&digit) {
        Some(usize::from(digit - 1))
    } else {
        None
    }
}
