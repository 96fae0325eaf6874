#![forbid(unsafe_code)]

//! Core: placement, timeline descriptions, and the interaction state machine.
//!
//! # Role in jostle
//! `jostle-core` is everything about the heading effect that does not need a
//! browser. It decides where letters go, what each animation looks like,
//! and in what order things happen. The page itself sits behind the
//! [`stage::Stage`] trait, which `jostle-web` implements over the DOM.
//!
//! # Primary responsibilities
//! - **PlacementGenerator**: random, non-overlapping letter positions.
//! - **Timeline / Tween**: declarative steps for the host's timeline service.
//! - **Director**: split → intro → bounds → shuffle → shake loop.
//! - **ShakeMachine**: exclusive ownership of the one running shake.
//!
//! # How it fits in the system
//! The web crate owns the DOM handles and the timeline service. It feeds
//! completion cues and clicks into [`director::Director::handle`] and
//! carries out whatever the director asks of the stage. All randomness
//! flows through an injected [`rand::Rng`], so a seeded generator replays
//! the exact same effect.

pub mod choreography;
pub mod config;
pub mod director;
pub mod error;
pub mod geometry;
pub mod placement;
pub mod shake;
pub mod stage;
pub mod timeline;

pub use config::ScatterConfig;
pub use director::{Director, Phase};
pub use error::{JostleError, PlacementError, Result};
pub use geometry::{Bounds, Rect};
pub use placement::{OverflowPolicy, Placement, PlacementGenerator, PlacementPass};
pub use stage::{ShakeHandle, Signal, Stage};
pub use timeline::{Cue, Timeline, Tween};
