#![forbid(unsafe_code)]

//! Timeline: declarative multi-step animation descriptions.
//!
//! A [`Timeline`] sequences [`Tween`] steps the way the host's timeline
//! service does: each step is appended at the current end of the timeline
//! unless it is marked [`Position::WithPrevious`], in which case it starts
//! together with the step before it. Interpolation is the host's job; this
//! module only describes what to play and computes when each step starts.
//!
//! # Usage
//!
//! ```ignore
//! use std::time::Duration;
//! use jostle_core::timeline::{Property, Target, Timeline, Tween, Value};
//!
//! let timeline = Timeline::new()
//!     .then(Tween::to(Target::Section).prop(Property::Padding, Value::css("1rem")))
//!     .with_previous(Tween::to(Target::Container).prop(Property::Height, Value::css("60dvh")));
//!
//! // Both steps start at 0 and last the default 0.5s.
//! assert_eq!(timeline.total_duration(), Some(Duration::from_millis(500)));
//! ```
//!
//! # Invariants
//!
//! 1. Steps keep insertion order; offsets are resolved on demand.
//! 2. `AfterPrevious` starts at the running end of the timeline (the max end
//!    of all earlier steps), `WithPrevious` at the previous step's start.
//! 3. A step with infinite repeat has no span; it makes the timeline
//!    endless but does not move the end for later steps.
//!
//! # Failure Modes
//!
//! - `WithPrevious` on the first step: starts at zero.
//! - Per-index values shorter than the target count: the host falls back
//!   to the property's current value for the missing indices.

use std::time::Duration;

/// Default tween duration of the timeline service.
pub const DEFAULT_DURATION: Duration = Duration::from_millis(500);

/// Completion notifications the director waits on.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Cue {
    /// The layout container reached its final size.
    ContainerResized,
    /// The whole intro timeline finished.
    IntroFinished,
    /// All letters arrived at their placements.
    ShuffleFinished,
}

/// What a tween animates.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Target {
    /// Every split letter; `count` drives stagger and per-index values.
    Letters { count: usize },
    /// A single letter by index.
    Letter(usize),
    /// The layout container.
    Container,
    /// The heading holding the letters.
    Heading,
    /// The enclosing section.
    Section,
}

impl Target {
    /// Number of elements the target resolves to.
    #[inline]
    #[must_use]
    pub fn count(&self) -> usize {
        match self {
            Self::Letters { count } => *count,
            _ => 1,
        }
    }
}

/// Animatable properties.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Property {
    YPercent,
    Left,
    Top,
    Rotation,
    Scale,
    Padding,
    Width,
    Height,
    BorderRadius,
}

/// Value of one property in a tween.
#[derive(Debug, Clone, PartialEq)]
pub enum Value {
    Number(f64),
    /// A CSS length or keyword such as `"60dvh"`.
    Css(String),
    /// Offset from the current value (`"+=n"`).
    Relative(f64),
    /// One value per target element, by index.
    PerIndex(Vec<f64>),
}

impl Value {
    #[must_use]
    pub fn css(value: impl Into<String>) -> Self {
        Self::Css(value.into())
    }

    /// Sample a pure `index -> value` function for `count` elements.
    #[must_use]
    pub fn per_index(count: usize, f: impl FnMut(usize) -> f64) -> Self {
        Self::PerIndex((0..count).map(f).collect())
    }
}

/// Direction a tween animates in.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Mode {
    /// From the current values to the given ones.
    #[default]
    To,
    /// From the given values to the current ones.
    From,
    /// Apply immediately (zero duration).
    Set,
}

/// Easing curves used by the effect.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub enum Ease {
    /// Linear.
    None,
    /// The service's default ease-out.
    #[default]
    Power1Out,
    /// Overshoot then settle; the parameter is the overshoot amount.
    BackOut(f64),
}

/// How many times to play a tween.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Repeat {
    /// Play once (no repeat).
    #[default]
    Once,
    /// Repeat a fixed number of times (total plays = times + 1).
    Times(u32),
    /// Repeat forever.
    Infinite,
}

/// Where a step starts relative to the steps before it.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Position {
    /// At the current end of the timeline.
    #[default]
    AfterPrevious,
    /// Together with the previous step (`"<"`).
    WithPrevious,
}

/// One animation step.
#[derive(Debug, Clone, PartialEq)]
pub struct Tween {
    pub target: Target,
    pub mode: Mode,
    pub props: Vec<(Property, Value)>,
    pub duration: Duration,
    pub ease: Ease,
    /// Start delay between successive target elements.
    pub stagger: Duration,
    pub repeat: Repeat,
    pub repeat_delay: Duration,
    /// Alternate direction on every repeat.
    pub yoyo: bool,
    /// Delivered when this step completes.
    pub cue: Option<Cue>,
}

impl Tween {
    fn new(target: Target, mode: Mode) -> Self {
        Self {
            target,
            mode,
            props: Vec::new(),
            duration: if mode == Mode::Set {
                Duration::ZERO
            } else {
                DEFAULT_DURATION
            },
            ease: Ease::default(),
            stagger: Duration::ZERO,
            repeat: Repeat::Once,
            repeat_delay: Duration::ZERO,
            yoyo: false,
            cue: None,
        }
    }

    #[must_use]
    pub fn to(target: Target) -> Self {
        Self::new(target, Mode::To)
    }

    #[must_use]
    pub fn from(target: Target) -> Self {
        Self::new(target, Mode::From)
    }

    #[must_use]
    pub fn set(target: Target) -> Self {
        Self::new(target, Mode::Set)
    }

    #[must_use]
    pub fn prop(mut self, property: Property, value: Value) -> Self {
        self.props.push((property, value));
        self
    }

    #[must_use]
    pub fn duration(mut self, duration: Duration) -> Self {
        self.duration = duration;
        self
    }

    #[must_use]
    pub fn ease(mut self, ease: Ease) -> Self {
        self.ease = ease;
        self
    }

    #[must_use]
    pub fn stagger(mut self, stagger: Duration) -> Self {
        self.stagger = stagger;
        self
    }

    #[must_use]
    pub fn repeat(mut self, repeat: Repeat) -> Self {
        self.repeat = repeat;
        self
    }

    #[must_use]
    pub fn repeat_delay(mut self, delay: Duration) -> Self {
        self.repeat_delay = delay;
        self
    }

    #[must_use]
    pub fn yoyo(mut self, yoyo: bool) -> Self {
        self.yoyo = yoyo;
        self
    }

    #[must_use]
    pub fn on_complete(mut self, cue: Cue) -> Self {
        self.cue = Some(cue);
        self
    }

    /// Value given for `property`, if any.
    #[must_use]
    pub fn value_of(&self, property: Property) -> Option<&Value> {
        self.props
            .iter()
            .find(|(p, _)| *p == property)
            .map(|(_, v)| v)
    }

    /// Wall time from the first element starting to the last one finishing.
    ///
    /// `None` for infinitely repeating tweens.
    #[must_use]
    pub fn span(&self) -> Option<Duration> {
        let repeats = match self.repeat {
            Repeat::Once => 0,
            Repeat::Times(n) => n,
            Repeat::Infinite => return None,
        };
        let one_element = self
            .duration
            .saturating_mul(repeats.saturating_add(1))
            .saturating_add(self.repeat_delay.saturating_mul(repeats));
        let spread = self
            .stagger
            .saturating_mul(self.target.count().saturating_sub(1) as u32);
        Some(one_element.saturating_add(spread))
    }
}

/// A step placed in a timeline.
#[derive(Debug, Clone, PartialEq)]
pub struct Step {
    pub tween: Tween,
    pub position: Position,
}

/// An ordered sequence of tweens with relative start positions.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct Timeline {
    steps: Vec<Step>,
    cue: Option<Cue>,
}

// ---------------------------------------------------------------------------
// Construction
// ---------------------------------------------------------------------------

impl Timeline {
    /// Create an empty timeline.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Append a step at the current end of the timeline (builder pattern).
    #[must_use]
    pub fn then(mut self, tween: Tween) -> Self {
        self.push(tween, Position::AfterPrevious);
        self
    }

    /// Add a step starting together with the previous one (builder pattern).
    #[must_use]
    pub fn with_previous(mut self, tween: Tween) -> Self {
        self.push(tween, Position::WithPrevious);
        self
    }

    /// Cue delivered when the whole timeline completes (builder pattern).
    #[must_use]
    pub fn on_complete(mut self, cue: Cue) -> Self {
        self.cue = Some(cue);
        self
    }

    fn push(&mut self, tween: Tween, position: Position) {
        self.steps.push(Step { tween, position });
    }
}

// ---------------------------------------------------------------------------
// Queries
// ---------------------------------------------------------------------------

impl Timeline {
    #[inline]
    #[must_use]
    pub fn steps(&self) -> &[Step] {
        &self.steps
    }

    #[inline]
    #[must_use]
    pub fn step_count(&self) -> usize {
        self.steps.len()
    }

    #[inline]
    #[must_use]
    pub fn cue(&self) -> Option<Cue> {
        self.cue
    }

    /// Every cue this timeline will deliver, in step order, timeline cue last.
    #[must_use]
    pub fn cues(&self) -> Vec<Cue> {
        self.steps
            .iter()
            .filter_map(|s| s.tween.cue)
            .chain(self.cue)
            .collect()
    }

    /// Start offset of every step.
    #[must_use]
    pub fn offsets(&self) -> Vec<Duration> {
        let mut offsets = Vec::with_capacity(self.steps.len());
        let mut end = Duration::ZERO;
        let mut previous_start = Duration::ZERO;
        for step in &self.steps {
            let start = match step.position {
                Position::AfterPrevious => end,
                Position::WithPrevious => previous_start,
            };
            if let Some(span) = step.tween.span() {
                end = end.max(start.saturating_add(span));
            }
            offsets.push(start);
            previous_start = start;
        }
        offsets
    }

    /// Time until every step has finished; `None` if any step repeats forever.
    #[must_use]
    pub fn total_duration(&self) -> Option<Duration> {
        let mut total = Duration::ZERO;
        for (step, start) in self.steps.iter().zip(self.offsets()) {
            total = total.max(start.saturating_add(step.tween.span()?));
        }
        Some(total)
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
