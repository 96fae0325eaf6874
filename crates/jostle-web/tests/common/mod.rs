//! Page fixtures and stand-ins for the `gsap` and `SplitType` globals.
//!
//! The stand-ins count `gsap.to()` tweens and their `kill()` calls, and
//! queue every `onComplete` they are handed until [`flush`] runs them.

#![allow(dead_code)]

use js_sys::{Promise, Reflect};
use jostle_core::ScatterConfig;
use wasm_bindgen::JsCast;
use wasm_bindgen::prelude::*;
use wasm_bindgen_futures::JsFuture;
use web_sys::{Document, Element, HtmlElement};

pub const LETTERS: [&str; 5] = ["H", "e", "l", "l", "o"];

const GLOBALS: &str = r#"
(() => {
  const state = { tweens: 0, kills: 0, pending: [] };
  const track = (vars) => {
    if (vars && typeof vars.onComplete === "function") state.pending.push(vars.onComplete);
  };
  globalThis.__jostle = state;
  globalThis.__jostleFlush = () => {
    const due = state.pending.splice(0);
    due.forEach((f) => f());
    return due.length;
  };
  globalThis.gsap = {
    timeline(vars) {
      track(vars);
      const tl = {
        to(targets, vars) { track(vars); return tl; },
        from(targets, vars) { track(vars); return tl; },
        set(targets, vars) { track(vars); return tl; },
      };
      return tl;
    },
    to(targets, vars) {
      state.tweens += 1;
      return { kill() { state.kills += 1; } };
    },
  };
  globalThis.SplitType = class {
    constructor(selector) {
      this.chars = Array.from(document.querySelectorAll(selector + " span"));
    }
  };
})();
"#;

/// Install fresh globals; counters start at zero.
pub fn install_globals() {
    js_sys::eval(GLOBALS).unwrap();
}

pub fn counter(name: &str) -> u32 {
    let state = Reflect::get(&js_sys::global(), &JsValue::from_str("__jostle")).unwrap();
    Reflect::get(&state, &JsValue::from_str(name))
        .unwrap()
        .as_f64()
        .unwrap() as u32
}

/// Run every queued `onComplete`; returns how many ran.
pub fn flush() -> u32 {
    js_sys::eval("__jostleFlush()").unwrap().as_f64().unwrap() as u32
}

/// Let spawned tasks and their microtasks run.
pub async fn next_task() {
    let promise = Promise::new(&mut |resolve, _reject| {
        web_sys::window()
            .unwrap()
            .set_timeout_with_callback_and_timeout_and_arguments_0(&resolve, 0)
            .unwrap();
    });
    JsFuture::from(promise).await.unwrap();
}

pub fn document() -> Document {
    web_sys::window().unwrap().document().unwrap()
}

pub fn body_html() -> String {
    document().body().unwrap().inner_html()
}

/// Section, 800x600 layout box and a five-letter heading, all with
/// `jt-` class names. Remove it with `Element::remove` when done.
pub fn mount_page() -> Element {
    let document = document();
    let section = document.create_element("section").unwrap();
    section.set_class_name("jt-section");
    let spans: String = LETTERS.iter().map(|l| format!("<span>{l}</span>")).collect();
    section.set_inner_html(&format!(
        r#"<div class="jt-layout" style="position: relative; width: 800px; height: 600px">
             <h1 class="jt-heading">{spans}</h1>
           </div>"#
    ));
    document.body().unwrap().append_child(&section).unwrap();
    section
}

pub fn fixture_config() -> ScatterConfig {
    ScatterConfig {
        container_selector: ".jt-layout".to_string(),
        heading_selector: ".jt-heading".to_string(),
        section_selector: ".jt-section".to_string(),
        seed: Some(7),
        ..ScatterConfig::default()
    }
}

pub fn fixture_json() -> String {
    serde_json::to_string(&fixture_config()).unwrap()
}

/// The `n`th letter of the fixture heading, zero-based.
pub fn letter(n: usize) -> HtmlElement {
    document()
        .query_selector(&format!(".jt-heading span:nth-child({})", n + 1))
        .unwrap()
        .unwrap()
        .dyn_into()
        .unwrap()
}

/// Letters that had a transform origin assigned.
pub fn letters_with_origin() -> Vec<usize> {
    (0..LETTERS.len())
        .filter(|&n| {
            !letter(n)
                .style()
                .get_property_value("transform-origin")
                .unwrap()
                .is_empty()
        })
        .collect()
}
