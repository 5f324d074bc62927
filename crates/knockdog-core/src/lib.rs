//! knockdog-core — streaming detector for door knocks and doorbell rings.
//!
//! Consumes a mono 16 kHz PCM stream one block at a time and reports, for
//! each block, whether a deliberate three-knuckle knock or a bell ring was
//! detected. The pipeline is a compact, branch-predictable chain of DSP
//! stages:
//!
//! 1. [`decorrelator`] — adaptive first-order predictor that flattens LF tilt
//! 2. [`agc`] — slow exponential magnitude average used as a gain reference
//! 3. [`normalizer`] — divides by the AGC reference to fix the signal scale
//! 4. [`window`] — 256-sample sliding energy sum; yields a signed transient score
//! 5. [`bell`] — narrow bandpass tuned to the doorbell fundamental
//! 6. [`peak`] / [`peak_buffer`] / [`decision`] — peak extraction, a bounded
//!    FIFO of recent peaks, and the knock/ring decision rules, run every
//!    100 ms
//!
//! [`Analyzer`] wires all six stages together. It is the only type most
//! callers need.
//!
//! # no_std support
//!
//! This crate is `no_std` compatible for embedded targets. Disable the
//! default `std` feature:
//!
//! ```toml
//! [dependencies]
//! knockdog-core = { version = "0.1", default-features = false }
//! ```
//!
//! Without `std`, [`Analyzer::process`] still runs to completion; only the
//! `String`-returning [`time_format`] helper and the `alloc`-free
//! [`DiagnosticSink`] text formatting it feeds are unavailable.
//!
//! # Example
//!
//! ```rust
//! use knockdog_core::{Analyzer, Detections, Flags};
//!
//! let mut analyzer = Analyzer::new();
//! let silence = [0i16; 1600];
//! let detections = analyzer.process(&silence, None, Flags::empty(), None);
//! assert_eq!(detections, Detections::empty());
//! ```
//!
//! # Design principles
//!
//! - **Real-time safe**: no allocation after [`Analyzer::new`], no dynamic
//!   dispatch in the hot path.
//! - **Deterministic**: identical input streams produce identical detection
//!   masks and diagnostic output (no wall-clock, no randomness).
//! - **Self-calibrating**: the peak acceptance threshold adapts toward one
//!   accepted peak per second regardless of ambient noise level.

#![cfg_attr(not(feature = "std"), no_std)]

pub mod agc;
pub mod analyzer;
pub mod bell;
pub mod biquad;
pub mod decision;
pub mod decorrelator;
pub mod diagnostics;
pub mod flags;
pub mod normalizer;
pub mod peak;
pub mod peak_buffer;
pub mod threshold;
pub mod window;

pub use agc::MagnitudeTracker;
pub use analyzer::Analyzer;
pub use bell::{BellResonator, BellTuning};
pub use biquad::Biquad;
pub use decision::Sensitivity;
pub use decorrelator::Decorrelator;
pub use diagnostics::DiagnosticSink;
pub use flags::{Detections, Flags};
pub use peak::{PeakExtractor, PeakRecord};
pub use peak_buffer::PeakBuffer;
pub use threshold::PeakThreshold;
pub use window::WindowEnergy;

#[cfg(feature = "std")]
pub use diagnostics::time_format;

/// Sample rate the analyzer is tuned for. The core algorithm is not
/// parameterized over sample rate (`spec.md` Non-goals); all constants
/// below assume 16 kHz mono input.
pub const SAMPLE_RATE: u32 = 16_000;

/// Size of the sliding window used by [`window::WindowEnergy`], in samples.
pub const WINDOW_SIZE: usize = 256;

/// Normalization target for the windowed energy sum (`spec.md` §4.3/§4.4).
pub const NORMALIZATION_LEVEL: i32 = 128;

/// Maximum number of peaks retained in [`peak_buffer::PeakBuffer`].
pub const MAX_NUM_PEAKS: usize = 16;

/// Minimum span (in samples) between the first and third peak of a
/// qualifying knock triplet — exclusive lower bound (`spec.md` §4.8).
pub const KNOCK_MIN_SPAN: i32 = 4_000;

/// Maximum span (in samples) between the first and third peak of a
/// qualifying knock triplet — exclusive upper bound (`spec.md` §4.8).
pub const KNOCK_MAX_SPAN: i32 = 12_000;

/// Interval, in samples, between decision passes (100 ms at 16 kHz).
pub const ANALYSIS_INTERVAL: u32 = SAMPLE_RATE / 10;

/// Sample index domain: wraps every 24 hours of continuous streaming.
pub const SAMPLE_INDEX_WRAP: u32 = SAMPLE_RATE * 3600 * 24;
