//! [`Stage`] over the live page.
//!
//! Letters are the `HtmlElement`s `SplitType` produced, addressed by
//! index. Timelines go to `gsap.timeline()`, the shake to `gsap.to()`.
//! Every completion and click is posted through the [`Dispatch`] the
//! owner supplied; the stage never calls back into the director itself.

use std::collections::HashMap;
use std::rc::Rc;

use js_sys::{Array, JSON, Object, Reflect};
use jostle_core::ScatterConfig;
use jostle_core::geometry::Rect;
use jostle_core::stage::{ShakeHandle, Signal, Stage};
use jostle_core::timeline::{Cue, Target, Timeline, Tween};
use tracing::{debug, warn};
use wasm_bindgen::JsCast;
use wasm_bindgen::prelude::*;
use web_sys::{Document, Element, Event, HtmlElement};

use crate::bindings::{GsapTween, SplitType, gsap_timeline, gsap_to};
use crate::gsap_vars::{Method, TweenVars, encode_step, encode_tween};

/// Posts a signal to the director some time after the current callback.
pub type Dispatch = Rc<dyn Fn(Signal)>;

type ClickListener = Closure<dyn FnMut(Event)>;

pub struct DomStage {
    document: Document,
    container_selector: String,
    heading_selector: String,
    section_selector: String,
    letters: Vec<HtmlElement>,
    clicks: HashMap<usize, ClickListener>,
    dispatch: Dispatch,
}

impl DomStage {
    pub fn new(document: Document, config: &ScatterConfig, dispatch: Dispatch) -> Self {
        Self {
            document,
            container_selector: config.container_selector.clone(),
            heading_selector: config.heading_selector.clone(),
            section_selector: config.section_selector.clone(),
            letters: Vec::new(),
            clicks: HashMap::new(),
            dispatch,
        }
    }

    fn query(&self, selector: &str) -> Option<Element> {
        self.document.query_selector(selector).ok().flatten()
    }

    /// GSAP targets for `target`. Missing elements resolve to an empty
    /// array so the step keeps its slot in the timeline.
    fn targets(&self, target: Target) -> JsValue {
        let element: Option<Element> = match target {
            Target::Letters { .. } => {
                return self.letters.iter().collect::<Array>().into();
            }
            Target::Letter(index) => self.letters.get(index).map(|el| el.clone().into()),
            Target::Container => self.query(&self.container_selector),
            Target::Heading => self.query(&self.heading_selector),
            Target::Section => self.query(&self.section_selector),
        };
        match element {
            Some(element) => element.into(),
            None => {
                debug!(?target, "tween target missing");
                Array::new().into()
            }
        }
    }

    /// Build the vars object: JSON part, function-based values and the
    /// completion callback.
    fn vars(&self, encoded: &TweenVars, cue: Option<Cue>) -> JsValue {
        let vars = serde_json::to_string(&encoded.vars)
            .ok()
            .and_then(|json| JSON::parse(&json).ok())
            .unwrap_or_else(|| Object::new().into());

        for (name, values) in &encoded.per_index {
            let values = values.clone();
            let by_index = Closure::wrap(Box::new(move |index: u32| {
                values.get(index as usize).copied().unwrap_or_default()
            }) as Box<dyn Fn(u32) -> f64>);
            set_js(&vars, name, &by_index.into_js_value());
        }
        if let Some(cue) = cue {
            set_js(&vars, "onComplete", &self.on_complete(cue));
        }
        vars
    }

    fn on_complete(&self, cue: Cue) -> JsValue {
        let dispatch = Rc::clone(&self.dispatch);
        Closure::once_into_js(move || dispatch(Signal::Cue(cue)))
    }
}

fn set_js(obj: &JsValue, key: &str, value: &JsValue) {
    let _ = Reflect::set(obj, &JsValue::from_str(key), value);
}

fn split_options() -> JsValue {
    let options = Object::new();
    set_js(&options, "absolute", &JsValue::TRUE);
    set_js(&options, "types", &JsValue::from_str("chars"));
    options.into()
}

impl Stage for DomStage {
    type Shake = DomShake;

    fn container_rect(&self) -> Option<Rect> {
        let rect = self.query(&self.container_selector)?.get_bounding_client_rect();
        Some(Rect::from_edges(
            rect.left(),
            rect.top(),
            rect.right(),
            rect.bottom(),
        ))
    }

    fn split_letters(&mut self) -> Vec<String> {
        let split = match SplitType::new(&self.heading_selector, &split_options()) {
            Ok(split) => split,
            Err(err) => {
                warn!(?err, "SplitType unavailable");
                return Vec::new();
            }
        };
        let Ok(chars) = split.chars().dyn_into::<Array>() else {
            return Vec::new();
        };
        self.letters = chars
            .iter()
            .filter_map(|value| value.dyn_into::<HtmlElement>().ok())
            .collect();
        self.letters
            .iter()
            .map(|el| el.text_content().unwrap_or_default())
            .collect()
    }

    fn play(&mut self, timeline: Timeline) {
        let tl_vars = Object::new();
        if let Some(cue) = timeline.cue() {
            set_js(&tl_vars, "onComplete", &self.on_complete(cue));
        }
        let tl = match gsap_timeline(&tl_vars) {
            Ok(tl) => tl,
            Err(err) => {
                warn!(?err, "gsap unavailable; timeline dropped");
                return;
            }
        };

        for step in timeline.steps() {
            let encoded = encode_step(step);
            let targets = self.targets(step.tween.target);
            let vars = self.vars(&encoded, step.tween.cue);
            let position = encoded.position.map_or(JsValue::UNDEFINED, JsValue::from_str);
            match encoded.method {
                Method::To => tl.to(&targets, &vars, &position),
                Method::From => tl.from(&targets, &vars, &position),
                Method::Set => tl.set(&targets, &vars, &position),
            }
        }
    }

    fn set_transform_origin(&mut self, index: usize, origin: &str) {
        if let Some(letter) = self.letters.get(index)
            && let Err(err) = letter.style().set_property("transform-origin", origin)
        {
            debug!(?err, index, "transform-origin not applied");
        }
    }

    fn start_shake(&mut self, tween: Tween) -> DomShake {
        let encoded = encode_tween(&tween);
        let targets = self.targets(tween.target);
        let vars = self.vars(&encoded, tween.cue);
        match gsap_to(&targets, &vars) {
            Ok(tween) => DomShake { tween: Some(tween) },
            Err(err) => {
                warn!(?err, "gsap unavailable; shake skipped");
                DomShake { tween: None }
            }
        }
    }

    fn listen_click(&mut self, index: usize) {
        self.unlisten_click(index);
        let Some(letter) = self.letters.get(index) else {
            return;
        };
        let dispatch = Rc::clone(&self.dispatch);
        let listener = Closure::wrap(Box::new(move |_event: Event| {
            dispatch(Signal::Clicked(index));
        }) as Box<dyn FnMut(Event)>);
        if letter
            .add_event_listener_with_callback("click", listener.as_ref().unchecked_ref())
            .is_ok()
        {
            self.clicks.insert(index, listener);
        }
    }

    fn unlisten_click(&mut self, index: usize) {
        let Some(listener) = self.clicks.remove(&index) else {
            return;
        };
        if let Some(letter) = self.letters.get(index)
            && let Err(err) = letter
                .remove_event_listener_with_callback("click", listener.as_ref().unchecked_ref())
        {
            debug!(?err, index, "click listener not removed");
        }
    }
}

impl Drop for DomStage {
    fn drop(&mut self) {
        let indices: Vec<usize> = self.clicks.keys().copied().collect();
        for index in indices {
            self.unlisten_click(index);
        }
    }
}

/// The running `gsap.to()` shake. Killed on drop.
pub struct DomShake {
    tween: Option<GsapTween>,
}

impl ShakeHandle for DomShake {
    fn kill(&mut self) {
        if let Some(tween) = self.tween.take() {
            tween.kill();
        }
    }
}

impl Drop for DomShake {
    fn drop(&mut self) {
        self.kill();
    }
}
