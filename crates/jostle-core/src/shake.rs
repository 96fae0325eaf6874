#![forbid(unsafe_code)]

//! Ownership of the single active shake animation.
//!
//! # Invariants
//!
//! 1. At most one handle is held at any time.
//! 2. A held handle is killed before it is replaced or released.

use crate::stage::ShakeHandle;

#[derive(Debug)]
enum ShakeState<H> {
    Idle,
    Shaking {
        index: usize,
        handle: H,
    },
}

impl<H> Default for ShakeState<H> {
    fn default() -> Self {
        Self::Idle
    }
}

#[derive(Debug)]
pub struct ShakeMachine<H: ShakeHandle> {
    state: ShakeState<H>,
}

impl<H: ShakeHandle> Default for ShakeMachine<H> {
    fn default() -> Self {
        Self::new()
    }
}

impl<H: ShakeHandle> ShakeMachine<H> {
    #[must_use]
    pub fn new() -> Self {
        Self {
            state: ShakeState::Idle,
        }
    }

    /// Take ownership of a freshly started shake on `index`.
    ///
    /// Any shake still held is killed first.
    pub fn engage(&mut self, index: usize, handle: H) {
        self.release();
        self.state = ShakeState::Shaking { index, handle };
    }

    /// Kill the held shake, if any, and return the index it was on.
    pub fn release(&mut self) -> Option<usize> {
        match std::mem::take(&mut self.state) {
            ShakeState::Idle => None,
            ShakeState::Shaking { index, mut handle } => {
                handle.kill();
                Some(index)
            }
        }
    }

    /// Index of the shaking letter.
    #[inline]
    #[must_use]
    pub fn target(&self) -> Option<usize> {
        match &self.state {
            ShakeState::Idle => None,
            ShakeState::Shaking { index, .. } => Some(*index),
        }
    }

    #[inline]
    #[must_use]
    pub fn is_shaking(&self) -> bool {
        matches!(self.state, ShakeState::Shaking { .. })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::cell::Cell;
    use std::rc::Rc;

    #[derive(Debug)]
    struct Wobble {
        live: Rc<Cell<i32>>,
        killed: bool,
    }

    impl Wobble {
        fn start(live: &Rc<Cell<i32>>) -> Self {
            live.set(live.get() + 1);
            Self {
                live: Rc::clone(live),
                killed: false,
            }
        }
    }

    impl ShakeHandle for Wobble {
        fn kill(&mut self) {
            if !self.killed {
                self.killed = true;
                self.live.set(self.live.get() - 1);
            }
        }
    }

    #[test]
    fn starts_idle() {
        let machine: ShakeMachine<Wobble> = ShakeMachine::new();
        assert!(!machine.is_shaking());
        assert_eq!(machine.target(), None);
    }

    #[test]
    fn engage_replaces_and_kills_previous() {
        let live = Rc::new(Cell::new(0));
        let mut machine = ShakeMachine::new();

        machine.engage(2, Wobble::start(&live));
        assert_eq!(live.get(), 1);
        assert_eq!(machine.target(), Some(2));

        machine.engage(5, Wobble::start(&live));
        assert_eq!(live.get(), 1, "previous shake must be killed");
        assert_eq!(machine.target(), Some(5));
    }

    #[test]
    fn release_returns_index_and_goes_idle() {
        let live = Rc::new(Cell::new(0));
        let mut machine = ShakeMachine::new();
        machine.engage(1, Wobble::start(&live));

        assert_eq!(machine.release(), Some(1));
        assert_eq!(live.get(), 0);
        assert!(!machine.is_shaking());
        assert_eq!(machine.release(), None);
    }

    #[test]
    fn many_engagements_never_overlap() {
        let live = Rc::new(Cell::new(0));
        let mut machine = ShakeMachine::new();
        for i in 0..50 {
            machine.engage(i % 7, Wobble::start(&live));
            assert_eq!(live.get(), 1);
        }
    }
}
