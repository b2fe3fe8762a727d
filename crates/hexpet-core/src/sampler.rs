//! Identifier sampling with a power-law skew.
//!
//! Identifiers follow a Zipf-like law, P(k) ∝ (offset + k)^(-exponent) for
//! k in `[0, max]`. Low identifiers are common and high identifiers are rare,
//! which gives a rarity curve without a lookup table.
//!
//! The sampler is an explicit value owned by its caller. Drawing needs
//! `&mut self`; share one across threads behind a mutex.

use chrono::Utc;
use rand::distributions::Distribution;
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

use crate::error::PetError;
use crate::types::PetId;

/// Default skew exponent.
pub const DEFAULT_EXPONENT: f64 = 2.0;

/// Default minimum-value offset.
///
/// An offset of 15 keeps the low four bits of a draw close to uniform even
/// inside the most common bucket.
pub const DEFAULT_OFFSET: f64 = 15.0;

/// Sampler configuration.
#[derive(Debug, Clone, PartialEq)]
pub struct SamplerConfig {
    /// Skew exponent, must be greater than 1.
    pub exponent: f64,
    /// Minimum-value offset, must be at least 1.
    pub offset: f64,
    /// Largest identifier that can be drawn.
    pub max: u16,
    /// Fixed seed. `None` seeds from the clock, so runs are not reproducible.
    pub seed: Option<u64>,
}

impl Default for SamplerConfig {
    fn default() -> Self {
        Self {
            exponent: DEFAULT_EXPONENT,
            offset: DEFAULT_OFFSET,
            max: u16::MAX,
            seed: None,
        }
    }
}

impl SamplerConfig {
    /// Default parameters with a fixed seed.
    pub fn seeded(seed: u64) -> Self {
        Self {
            seed: Some(seed),
            ..Self::default()
        }
    }

    /// Check the distribution parameters.
    pub fn validate(&self) -> Result<(), PetError> {
        check_params(self.exponent, self.offset)
    }
}

fn check_params(exponent: f64, offset: f64) -> Result<(), PetError> {
    if !(exponent.is_finite() && exponent > 1.0) {
        return Err(PetError::SamplingFailure(format!(
            "exponent must be finite and > 1, got {exponent}"
        )));
    }
    if !(offset.is_finite() && offset >= 1.0) {
        return Err(PetError::SamplingFailure(format!(
            "offset must be finite and >= 1, got {offset}"
        )));
    }
    Ok(())
}

/// Zipf distribution over `[0, max]` using rejection-inversion
/// (Hörmann & Derflinger, 1996).
///
/// Constant memory; the expected number of uniform draws per sample is
/// close to one.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Zipf {
    exponent: f64,
    offset: f64,
    imax: f64,
    one_minus_q: f64,
    one_minus_q_inv: f64,
    hxm: f64,
    hx0_minus_hxm: f64,
    s: f64,
}

impl Zipf {
    /// Build the distribution. Fails if `exponent <= 1` or `offset < 1`.
    pub fn new(exponent: f64, offset: f64, max: u64) -> Result<Self, PetError> {
        check_params(exponent, offset)?;
        Ok(Self::build(exponent, offset, max))
    }

    /// Parameters must already satisfy [`check_params`].
    fn build(exponent: f64, offset: f64, max: u64) -> Self {
        let one_minus_q = 1.0 - exponent;
        let mut zipf = Self {
            exponent,
            offset,
            imax: max as f64,
            one_minus_q,
            one_minus_q_inv: 1.0 / one_minus_q,
            hxm: 0.0,
            hx0_minus_hxm: 0.0,
            s: 0.0,
        };

        zipf.hxm = zipf.h(zipf.imax + 0.5);
        zipf.hx0_minus_hxm = zipf.h(0.5) - (offset.ln() * -exponent).exp() - zipf.hxm;
        zipf.s = 1.0 - zipf.hinv(zipf.h(1.5) - (-exponent * (offset + 1.0).ln()).exp());
        zipf
    }

    /// Largest value this distribution can produce.
    pub fn max(&self) -> u64 {
        self.imax as u64
    }

    fn h(&self, x: f64) -> f64 {
        (self.one_minus_q * (self.offset + x).ln()).exp() * self.one_minus_q_inv
    }

    fn hinv(&self, x: f64) -> f64 {
        (self.one_minus_q_inv * (self.one_minus_q * x).ln()).exp() - self.offset
    }
}

impl Distribution<u64> for Zipf {
    fn sample<R: Rng + ?Sized>(&self, rng: &mut R) -> u64 {
        loop {
            let r: f64 = rng.gen();
            let ur = self.hxm + r * self.hx0_minus_hxm;
            let x = self.hinv(ur);
            let k = (x + 0.5).floor();

            if k - x <= self.s
                || ur >= self.h(k + 0.5) - (-(k + self.offset).ln() * self.exponent).exp()
            {
                return k.clamp(0.0, self.imax) as u64;
            }
        }
    }
}

/// Stateful generator of skewed pet identifiers.
#[derive(Debug, Clone)]
pub struct Sampler {
    rng: StdRng,
    zipf: Zipf,
    seed: u64,
}

impl Sampler {
    /// Build a sampler from configuration.
    pub fn new(config: SamplerConfig) -> Result<Self, PetError> {
        let zipf = Zipf::new(config.exponent, config.offset, u64::from(config.max))?;
        let seed = config.seed.unwrap_or_else(clock_seed);
        Ok(Self {
            rng: StdRng::seed_from_u64(seed),
            zipf,
            seed,
        })
    }

    /// Default parameters with a fixed seed. Reproducible.
    pub fn from_seed(seed: u64) -> Self {
        Self::with_default_params(seed)
    }

    /// Default parameters seeded from the clock. Not reproducible.
    pub fn time_seeded() -> Self {
        Self::with_default_params(clock_seed())
    }

    fn with_default_params(seed: u64) -> Self {
        Self {
            rng: StdRng::seed_from_u64(seed),
            zipf: Zipf::build(DEFAULT_EXPONENT, DEFAULT_OFFSET, u64::from(u16::MAX)),
            seed,
        }
    }

    /// Draw the next identifier. Advances the generator state.
    pub fn next_id(&mut self) -> PetId {
        let raw = self.zipf.sample(&mut self.rng);
        PetId(u16::try_from(raw).unwrap_or(u16::MAX))
    }

    /// The seed this sampler started from.
    pub fn seed(&self) -> u64 {
        self.seed
    }

    /// The distribution being sampled.
    pub fn distribution(&self) -> &Zipf {
        &self.zipf
    }
}

impl Default for Sampler {
    fn default() -> Self {
        Self::time_seeded()
    }
}

impl Iterator for Sampler {
    type Item = PetId;

    fn next(&mut self) -> Option<PetId> {
        Some(self.next_id())
    }
}

fn clock_seed() -> u64 {
    let now = Utc::now();
    now.timestamp_nanos_opt()
        .unwrap_or_else(|| now.timestamp_micros()) as u64
}
