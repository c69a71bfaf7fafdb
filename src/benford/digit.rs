//! Leading significant digit extraction

use crate::config::Domain;
use crate::error::{BenfordError, BenfordResult};
use std::io::Write;

/// DCT coefficients smaller than this in magnitude are treated as zero.
///
/// An exactly flat block still produces round-off noise around 1e-13 in the
/// AC terms, which would otherwise show up as spurious digits.
pub const FREQUENCY_EPSILON: f64 = 1e-9;

/// Leading significant digit of a positive finite value.
///
/// Uses the first character of the shortest scientific representation, so
/// `128 -> "1.28e2" -> 1` and `0.034 -> "3.4e-2" -> 3`. Formatting avoids the
/// off-by-one that `x / 10^floor(log10 x)` produces at values like `0.3`.
pub fn leading_digit(value: f64) -> BenfordResult<u8> {
    if !value.is_finite() || value <= 0.0 {
        return Err(BenfordError::InvalidDigit { value });
    }

    // "-1.7976931348623157e308" is the longest f64 in this notation
    let mut buf = [0u8; 32];
    let mut cursor = &mut buf[..];
    write!(cursor, "{value:e}").map_err(|_| BenfordError::InvalidDigit { value })?;

    match buf[0] {
        b @ b'1'..=b'9' => Ok(b - b'0'),
        _ => Err(BenfordError::InvalidDigit { value }),
    }
}

/// Coerce a raw sample for the given domain and extract its digit.
///
/// Returns `Ok(None)` when the sample coerces to zero; zero has no leading
/// digit and is excluded from the distribution.
pub fn sample_digit(value: f64, domain: Domain) -> BenfordResult<Option<u8>> {
    let coerced = match domain {
        Domain::Spatial => value.round(),
        Domain::Frequency => {
            let magnitude = value.abs();
            if magnitude < FREQUENCY_EPSILON {
                0.0
            } else {
                magnitude
            }
        }
    };

    if coerced == 0.0 {
        return Ok(None);
    }
    leading_digit(coerced).map(Some)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_integers() {
        assert_eq!(leading_digit(1.0).unwrap(), 1);
        assert_eq!(leading_digit(9.0).unwrap(), 9);
        assert_eq!(leading_digit(128.0).unwrap(), 1);
        assert_eq!(leading_digit(255.0).unwrap(), 2);
        assert_eq!(leading_digit(999.0).unwrap(), 9);
        assert_eq!(leading_digit(1000.0).unwrap(), 1);
    }

    #[test]
    fn test_fractions() {
        assert_eq!(leading_digit(0.3).unwrap(), 3);
        assert_eq!(leading_digit(0.034).unwrap(), 3);
        assert_eq!(leading_digit(7.5e-12).unwrap(), 7);
        assert_eq!(leading_digit(f64::MIN_POSITIVE).unwrap(), 2);
    }

    #[test]
    fn test_rejects_non_positive() {
        assert!(matches!(
            leading_digit(0.0),
            Err(BenfordError::InvalidDigit { .. })
        ));
        assert!(leading_digit(-3.0).is_err());
        assert!(leading_digit(f64::NAN).is_err());
        assert!(leading_digit(f64::INFINITY).is_err());
    }

    #[test]
    fn test_spatial_rounds_to_integer() {
        assert_eq!(sample_digit(127.6, Domain::Spatial).unwrap(), Some(1));
        assert_eq!(sample_digit(0.4, Domain::Spatial).unwrap(), None);
        assert_eq!(sample_digit(0.0, Domain::Spatial).unwrap(), None);
        assert_eq!(sample_digit(0.6, Domain::Spatial).unwrap(), Some(1));
    }

    #[test]
    fn test_frequency_uses_magnitude() {
        assert_eq!(sample_digit(-0.25, Domain::Frequency).unwrap(), Some(2));
        assert_eq!(sample_digit(-4.0e-14, Domain::Frequency).unwrap(), None);
        assert_eq!(sample_digit(613.2, Domain::Frequency).unwrap(), Some(6));
    }
}
