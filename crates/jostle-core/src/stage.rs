#![forbid(unsafe_code)]

//! The seam between the director and the page.
//!
//! A [`Stage`] owns the rendered letters, the text splitter and the
//! timeline service. The director only ever addresses letters by index.
//! Completion of anything started through [`Stage::play`] comes back
//! later as a [`Signal::Cue`]. Clicks on a listened letter come back as
//! [`Signal::Clicked`].

use crate::geometry::Rect;
use crate::timeline::{Cue, Timeline, Tween};

/// Input the host feeds into the director.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Signal {
    Cue(Cue),
    Clicked(usize),
}

impl From<Cue> for Signal {
    fn from(cue: Cue) -> Self {
        Signal::Cue(cue)
    }
}

/// A running, cancellable animation.
pub trait ShakeHandle {
    /// Stop the animation where it is. Must be idempotent.
    fn kill(&mut self);
}

/// Everything the effect needs from the page.
pub trait Stage {
    type Shake: ShakeHandle;

    /// Current bounding rectangle of the layout container, or `None` when
    /// the page has no container. Must not mutate the page.
    fn container_rect(&self) -> Option<Rect>;

    /// Split the heading into letter elements and return their text in
    /// order. An empty result means there is nothing to animate.
    fn split_letters(&mut self) -> Vec<String>;

    /// Start a timeline. Its cues are delivered asynchronously.
    fn play(&mut self, timeline: Timeline);

    fn set_transform_origin(&mut self, index: usize, origin: &str);

    /// Start an endless tween and hand back its handle.
    fn start_shake(&mut self, tween: Tween) -> Self::Shake;

    fn listen_click(&mut self, index: usize);

    fn unlisten_click(&mut self, index: usize);
}
