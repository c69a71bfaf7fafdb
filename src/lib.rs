//! benstats - Benford's Law statistics for images
//!
//! Computes first-significant-digit distributions over pixel intensities (or
//! their DCT coefficients) for batches of images and scores each image by its
//! sum of squared deviations from the Benford distribution.
//!
//! # Example
//!
//! ```rust,no_run
//! use benstats::config::AnalysisConfig;
//! use benstats::pipeline::{analyze_batch, list_images};
//!
//! let files = list_images("data".as_ref())?;
//! for outcome in analyze_batch(files, &AnalysisConfig::default())? {
//!     match outcome {
//!         Ok(analysis) => println!("{}: {:.3}", analysis.file_name, analysis.score()),
//!         Err(skipped) => eprintln!("skipped {}", skipped.path.display()),
//!     }
//! }
//! # Ok::<(), benstats::error::BenfordError>(())
//! ```

pub mod benford;
pub mod config;
pub mod error;
pub mod imaging;
pub mod models;
pub mod pipeline;
pub mod reporters;

pub use error::{BenfordError, BenfordResult};
