#![forbid(unsafe_code)]

//! The state machine sequencing the whole effect.
//!
//! ```text
//!  Dormant ──start──▶ Intro ──IntroFinished──▶ Shuffling ──ShuffleFinished──▶ Live
//!     │                 │ ContainerResized:                ▲                    │
//!     │                 │ measure bounds                   └──click on shaking──┘
//!     ▼                                                        letter
//!  Aborted (no container / no letters)          any phase ──teardown──▶ TornDown
//! ```
//!
//! The director never waits. It issues [`Stage`] operations and advances
//! when the host feeds back the matching [`Signal`].
//!
//! # Invariants
//!
//! 1. Bounds are measured on `ContainerResized` (or, failing that, on
//!    `IntroFinished`) and never again.
//! 2. At most one shake is running; it is killed before the reshuffle that
//!    precedes the next one.
//! 3. Every click on the shaking letter triggers exactly one shuffle pass.
//!    Clicks elsewhere, or while a pass is in flight, are ignored.

use rand::Rng;
use tracing::{debug, trace, warn};

use crate::choreography::{intro_timeline, shake_tween, shuffle_timeline};
use crate::config::ScatterConfig;
use crate::geometry::Bounds;
use crate::placement::{Placement, PlacementGenerator};
use crate::shake::ShakeMachine;
use crate::stage::{Signal, Stage};
use crate::timeline::Cue;

/// Transform origin applied to the letter before it shakes.
pub const SHAKE_ORIGIN: &str = "center center";

/// Lifecycle phase of the effect.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Phase {
    /// Created, not started.
    Dormant,
    /// Guard failed at start; nothing was touched.
    Aborted,
    /// Intro timeline playing.
    Intro,
    /// A shuffle pass is playing; no letter is clickable.
    Shuffling,
    /// One letter shakes and listens for clicks.
    Live,
    /// Shake killed and listener removed by the host.
    TornDown,
}

pub struct Director<S: Stage, R: Rng> {
    stage: S,
    rng: R,
    config: ScatterConfig,
    generator: PlacementGenerator,
    letters: Vec<String>,
    bounds: Option<Bounds>,
    placements: Vec<Placement>,
    shake: ShakeMachine<S::Shake>,
    phase: Phase,
    shuffles: u64,
}

impl<S: Stage, R: Rng> std::fmt::Debug for Director<S, R> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Director")
            .field("phase", &self.phase)
            .field("letters", &self.letters.len())
            .field("bounds", &self.bounds)
            .field("shaking", &self.shake.target())
            .field("shuffles", &self.shuffles)
            .finish_non_exhaustive()
    }
}

impl<S: Stage, R: Rng> Director<S, R> {
    #[must_use]
    pub fn new(stage: S, config: ScatterConfig, rng: R) -> Self {
        let generator = PlacementGenerator::from_config(&config);
        Self {
            stage,
            rng,
            config,
            generator,
            letters: Vec::new(),
            bounds: None,
            placements: Vec::new(),
            shake: ShakeMachine::new(),
            phase: Phase::Dormant,
            shuffles: 0,
        }
    }

    /// Check the page, split the heading and play the intro.
    ///
    /// Returns `false` without touching the page when the container is
    /// missing, and `false` after splitting when there are no letters.
    /// Only the first call has any effect.
    pub fn start(&mut self) -> bool {
        if self.phase != Phase::Dormant {
            return false;
        }
        if self.stage.container_rect().is_none() {
            debug!("no layout container; effect disabled");
            self.phase = Phase::Aborted;
            return false;
        }
        let letters = self.stage.split_letters();
        if letters.is_empty() {
            debug!("heading produced no letters; effect disabled");
            self.phase = Phase::Aborted;
            return false;
        }

        debug!(letters = letters.len(), "starting intro");
        self.letters = letters;
        self.phase = Phase::Intro;
        let intro = intro_timeline(&self.config, self.letters.len());
        self.stage.play(intro);
        true
    }

    /// Feed one host signal into the state machine.
    pub fn handle(&mut self, signal: Signal) {
        match signal {
            Signal::Cue(cue) => self.on_cue(cue),
            Signal::Clicked(index) => self.on_click(index),
        }
    }

    /// Kill the shake and detach its listener. Terminal.
    pub fn teardown(&mut self) {
        if let Some(index) = self.shake.release() {
            self.stage.unlisten_click(index);
        }
        debug!(from = ?self.phase, "teardown");
        self.phase = Phase::TornDown;
    }

    fn on_cue(&mut self, cue: Cue) {
        match (self.phase, cue) {
            (Phase::Intro, Cue::ContainerResized) => {
                self.measure();
            }
            (Phase::Intro, Cue::IntroFinished) => {
                self.phase = Phase::Shuffling;
                self.shuffle();
            }
            (Phase::Shuffling, Cue::ShuffleFinished) => self.begin_shake(),
            (phase, cue) => trace!(?phase, ?cue, "stale cue ignored"),
        }
    }

    fn on_click(&mut self, index: usize) {
        if self.phase != Phase::Live || self.shake.target() != Some(index) {
            trace!(index, phase = ?self.phase, "click ignored");
            return;
        }
        if let Some(previous) = self.shake.release() {
            self.stage.unlisten_click(previous);
        }
        self.phase = Phase::Shuffling;
        self.shuffle();
    }

    fn measure(&mut self) -> Option<Bounds> {
        if let Some(bounds) = self.bounds {
            return Some(bounds);
        }
        let rect = self.stage.container_rect()?;
        let bounds = Bounds::from_container(&rect, self.config.padding, self.config.letter_size);
        debug!(
            min_x = bounds.min_x,
            min_y = bounds.min_y,
            max_x = bounds.max_x,
            max_y = bounds.max_y,
            "layout bounds"
        );
        self.bounds = Some(bounds);
        Some(bounds)
    }

    fn shuffle(&mut self) {
        let Some(bounds) = self.measure() else {
            warn!("layout container disappeared; shuffle skipped");
            self.begin_shake();
            return;
        };

        match self
            .generator
            .generate(&self.letters, &bounds, &mut self.rng)
        {
            Ok(pass) => {
                self.shuffles += 1;
                debug!(
                    pass = self.shuffles,
                    attempts = pass.attempts,
                    relaxed = pass.relaxed,
                    "shuffle"
                );
                let timeline = shuffle_timeline(&self.config, &pass.placements, &mut self.rng);
                self.placements = pass.placements;
                self.stage.play(timeline);
            }
            Err(err) => {
                warn!(%err, "shuffle skipped");
                self.begin_shake();
            }
        }
    }

    fn begin_shake(&mut self) {
        let index = self.rng.random_range(0..self.letters.len());
        self.stage.set_transform_origin(index, SHAKE_ORIGIN);
        let handle = self.stage.start_shake(shake_tween(&self.config, index));
        self.shake.engage(index, handle);
        self.stage.listen_click(index);
        self.phase = Phase::Live;
        trace!(index, "shaking");
    }
}

// ---------------------------------------------------------------------------
// Accessors
// ---------------------------------------------------------------------------

impl<S: Stage, R: Rng> Director<S, R> {
    #[inline]
    #[must_use]
    pub fn phase(&self) -> Phase {
        self.phase
    }

    #[inline]
    #[must_use]
    pub fn bounds(&self) -> Option<Bounds> {
        self.bounds
    }

    /// Letter text, in split order.
    #[inline]
    #[must_use]
    pub fn letters(&self) -> &[String] {
        &self.letters
    }

    /// Placements of the latest shuffle pass.
    #[inline]
    #[must_use]
    pub fn placements(&self) -> &[Placement] {
        &self.placements
    }

    /// Number of shuffle passes played.
    #[inline]
    #[must_use]
    pub fn shuffle_count(&self) -> u64 {
        self.shuffles
    }

    /// Index of the letter currently shaking.
    #[inline]
    #[must_use]
    pub fn shaking(&self) -> Option<usize> {
        self.shake.target()
    }

    #[inline]
    #[must_use]
    pub fn config(&self) -> &ScatterConfig {
        &self.config
    }

    #[inline]
    #[must_use]
    pub fn stage(&self) -> &S {
        &self.stage
    }

    #[inline]
    pub fn stage_mut(&mut self) -> &mut S {
        &mut self.stage
    }
}
