//! Procedural ground profile.
//!
//! The terrain is a window of height samples, one every `STEP` units, that
//! scrolls left by one unit per tick.  Whenever a full step has scrolled out
//! of view the oldest sample is dropped and a fresh one is appended, so the
//! strip is endless while only one screen's worth is stored.

use std::collections::VecDeque;

use rand::Rng;

/// Horizontal distance between two samples.
pub const STEP: f32 = 10.0;

/// Scroll distance per tick.
pub const SCROLL_SPEED: f32 = 1.0;

/// Share of the field height used for the first sample.
const START_RATIO: f32 = 0.4;
const MIN_RATIO: f32 = 0.1;
const MAX_RATIO: f32 = 0.7;

/// Largest rise or fall between neighbouring samples: a 60° slope over one
/// step.
pub fn max_slope_delta() -> f32 {
    STEP * std::f32::consts::FRAC_PI_3.tan()
}

/// Lowest and highest allowed sample for a field of `height`.
pub fn sample_bounds(height: f32) -> (f32, f32) {
    (height * MIN_RATIO, height * MAX_RATIO)
}

/// Number of samples needed to cover a field of `width`.
pub fn sample_count(width: f32) -> usize {
    (width / STEP).ceil() as usize + 1
}

/// Draw the sample that follows `last`.
///
/// The delta is a uniform integer within the slope cap, so neighbouring
/// samples never differ by more than `max_slope_delta()`.  Clamping only ever
/// pulls the value back toward `last`, which keeps that guarantee.
pub fn next_sample(last: f32, height: f32, rng: &mut impl Rng) -> f32 {
    let cap = max_slope_delta();
    let delta = rng.gen_range((-cap).ceil() as i32..=cap.floor() as i32) as f32;
    let (lo, hi) = sample_bounds(height);
    (last + delta).clamp(lo, hi)
}

#[derive(Clone, Debug, PartialEq)]
pub struct Terrain {
    samples: VecDeque<f32>,
    /// Sub-step shift in `(-STEP, 0]`.
    offset: f32,
}

impl Terrain {
    /// Fill a fresh window for a `width` x `height` field.
    pub fn generate(width: f32, height: f32, rng: &mut impl Rng) -> Self {
        let count = sample_count(width);
        let mut samples = VecDeque::with_capacity(count);
        let mut last = height * START_RATIO;
        samples.push_back(last);
        while samples.len() < count {
            last = next_sample(last, height, rng);
            samples.push_back(last);
        }
        Self {
            samples,
            offset: 0.0,
        }
    }

    /// Build a terrain from known samples, offset 0.
    pub fn from_samples(samples: impl IntoIterator<Item = f32>) -> Self {
        Self {
            samples: samples.into_iter().collect(),
            offset: 0.0,
        }
    }

    pub fn samples(&self) -> impl ExactSizeIterator<Item = f32> + '_ {
        self.samples.iter().copied()
    }

    pub fn sample(&self, index: usize) -> Option<f32> {
        self.samples.get(index).copied()
    }

    pub fn len(&self) -> usize {
        self.samples.len()
    }

    pub fn is_empty(&self) -> bool {
        self.samples.is_empty()
    }

    pub fn offset(&self) -> f32 {
        self.offset
    }

    /// Advance by one tick.  Returns `true` when a segment was recycled.
    pub fn scroll(&mut self, height: f32, rng: &mut impl Rng) -> bool {
        self.offset -= SCROLL_SPEED;
        if self.offset > -STEP {
            return false;
        }

        let last = self
            .samples
            .back()
            .copied()
            .unwrap_or(height * START_RATIO);
        self.samples.pop_front();
        self.samples.push_back(next_sample(last, height, rng));
        self.offset = 0.0;
        true
    }

    /// Closed outline of the ground for a `width` x `height` field, starting
    /// and ending on the bottom edge.
    pub fn silhouette(&self, width: f32, height: f32) -> Vec<(f32, f32)> {
        let mut points = Vec::with_capacity(self.samples.len() + 2);
        points.push((0.0, height));
        for (i, sample) in self.samples.iter().enumerate() {
            points.push((i as f32 * STEP + self.offset, height - sample));
        }
        points.push((width, height));
        points
    }
}
