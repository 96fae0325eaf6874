#![forbid(unsafe_code)]

//! Non-overlapping random placement of letters.
//!
//! Rejection sampling: for each letter in order, draw uniform integer
//! positions inside the [`Bounds`] until one is at least `min_distance`
//! from every letter already placed in this pass.
//!
//! # Invariants
//!
//! 1. Output length and order equal the input; `placements[i].letter` is
//!    the text of letter `i`.
//! 2. Every placement satisfies `bounds.contains(left, top)`.
//! 3. Unless a placement was relaxed (see [`OverflowPolicy::BestCandidate`]),
//!    every pair of placements is at least `min_distance` apart.
//!
//! # Failure Modes
//!
//! - Bounds with no integer position: [`PlacementError::EmptyBounds`].
//! - Two or more letters on an integer grid whose diagonal is shorter than
//!   `min_distance`: no draw can ever succeed, so the pass fails with
//!   [`PlacementError::Unsatisfiable`] before sampling. The only exception
//!   is `BestCandidate` with a finite attempt cap, which degrades to relaxed
//!   placements instead.
//! - Crowded but satisfiable bounds: each letter gets `max_attempts` draws,
//!   then the overflow policy decides. With `max_attempts = None` the loop
//!   retries until it succeeds.

use rand::Rng;
use serde::{Deserialize, Serialize};

use crate::config::ScatterConfig;
use crate::error::PlacementError;
use crate::geometry::{Bounds, distance};

/// Target position of one letter for one shuffle pass.
#[derive(Debug, Clone, PartialEq)]
pub struct Placement {
    pub letter: String,
    pub left: f64,
    pub top: f64,
}

/// What to do when a letter exhausts its attempts.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum OverflowPolicy {
    /// Abort the pass with [`PlacementError::Exhausted`].
    Fail,
    /// Keep the draw that was farthest from its nearest neighbour.
    #[default]
    BestCandidate,
}

/// Result of one placement pass.
#[derive(Debug, Clone, PartialEq)]
pub struct PlacementPass {
    pub placements: Vec<Placement>,
    /// Total candidate draws across all letters.
    pub attempts: u64,
    /// Letters accepted below `min_distance` by the overflow policy.
    pub relaxed: usize,
}

#[derive(Debug, Clone, PartialEq)]
pub struct PlacementGenerator {
    min_distance: f64,
    max_attempts: Option<u32>,
    overflow: OverflowPolicy,
}

impl PlacementGenerator {
    /// Unbounded generator keeping letter origins `min_distance` apart.
    #[must_use]
    pub fn new(min_distance: f64) -> Self {
        Self {
            min_distance,
            max_attempts: None,
            overflow: OverflowPolicy::default(),
        }
    }

    #[must_use]
    pub fn from_config(config: &ScatterConfig) -> Self {
        Self::new(config.min_distance())
            .max_attempts(config.max_attempts)
            .overflow(config.overflow)
    }

    /// Cap on draws per letter (builder pattern). `None` retries forever.
    #[must_use]
    pub fn max_attempts(mut self, max_attempts: Option<u32>) -> Self {
        self.max_attempts = max_attempts.map(|n| n.max(1));
        self
    }

    #[must_use]
    pub fn overflow(mut self, overflow: OverflowPolicy) -> Self {
        self.overflow = overflow;
        self
    }

    #[inline]
    #[must_use]
    pub fn min_distance(&self) -> f64 {
        self.min_distance
    }

    /// Place every letter inside `bounds`.
    pub fn generate<R, S>(
        &self,
        letters: &[S],
        bounds: &Bounds,
        rng: &mut R,
    ) -> Result<PlacementPass, PlacementError>
    where
        R: Rng + ?Sized,
        S: AsRef<str>,
    {
        let mut pass = PlacementPass {
            placements: Vec::with_capacity(letters.len()),
            attempts: 0,
            relaxed: 0,
        };
        if letters.is_empty() {
            return Ok(pass);
        }

        let (xs, ys) = bounds.integer_ranges().ok_or(PlacementError::EmptyBounds)?;

        // Draws land on the integer grid, which can be narrower than the
        // fractional bounds by up to one pixel per axis.
        let diagonal = ((xs.end() - xs.start()) as f64).hypot((ys.end() - ys.start()) as f64);
        let degrades = self.overflow == OverflowPolicy::BestCandidate && self.max_attempts.is_some();
        if letters.len() >= 2 && diagonal < self.min_distance && !degrades {
            return Err(PlacementError::Unsatisfiable {
                count: letters.len(),
                min_distance: self.min_distance,
                diagonal,
            });
        }

        for (index, letter) in letters.iter().enumerate() {
            // (nearest-neighbour distance, left, top) of the best rejected draw.
            let mut best: Option<(f64, f64, f64)> = None;
            let mut tries: u32 = 0;
            let (left, top) = loop {
                tries = tries.saturating_add(1);
                pass.attempts += 1;
                let left = rng.random_range(xs.clone()) as f64;
                let top = rng.random_range(ys.clone()) as f64;

                let nearest = pass
                    .placements
                    .iter()
                    .map(|p| distance(left, top, p.left, p.top))
                    .fold(f64::INFINITY, f64::min);
                if nearest >= self.min_distance {
                    break (left, top);
                }
                if best.is_none_or(|(d, _, _)| nearest > d) {
                    best = Some((nearest, left, top));
                }

                if let Some(cap) = self.max_attempts
                    && tries >= cap
                {
                    match self.overflow {
                        OverflowPolicy::Fail => {
                            return Err(PlacementError::Exhausted {
                                index,
                                attempts: tries,
                            });
                        }
                        OverflowPolicy::BestCandidate => {
                            let (nearest, left, top) = best.unwrap_or((nearest, left, top));
                            tracing::warn!(
                                index,
                                attempts = tries,
                                nearest,
                                min_distance = self.min_distance,
                                "placement relaxed"
                            );
                            pass.relaxed += 1;
                            break (left, top);
                        }
                    }
                }
            };

            pass.placements.push(Placement {
                letter: letter.as_ref().to_string(),
                left,
                top,
            });
        }

        Ok(pass)
    }
}
