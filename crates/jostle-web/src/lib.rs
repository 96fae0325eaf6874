#![forbid(unsafe_code)]

//! Browser binding for the jostle heading effect.
//!
//! Implements [`jostle_core::Stage`] over the DOM, the page's `gsap`
//! timeline service and its `SplitType` splitter, and exports `start` /
//! `onReady` / `Effect.destroy` to JavaScript.
//!
//! Only [`gsap_vars`] and [`logging`] build on native targets; everything
//! touching `web-sys` is `wasm32`-only.

pub mod gsap_vars;
pub mod logging;

#[cfg(target_arch = "wasm32")]
mod bindings;
#[cfg(target_arch = "wasm32")]
pub mod dom_stage;
#[cfg(target_arch = "wasm32")]
pub mod wasm;
