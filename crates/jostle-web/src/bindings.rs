//! Extern bindings to the page's `gsap` and `SplitType` globals.

use wasm_bindgen::prelude::*;

#[wasm_bindgen]
extern "C" {
    /// A `gsap.core.Timeline`.
    pub type GsapTimeline;

    /// A `gsap.core.Tween`.
    pub type GsapTween;

    #[wasm_bindgen(catch, js_namespace = gsap, js_name = timeline)]
    pub fn gsap_timeline(vars: &JsValue) -> Result<GsapTimeline, JsValue>;

    #[wasm_bindgen(catch, js_namespace = gsap, js_name = to)]
    pub fn gsap_to(targets: &JsValue, vars: &JsValue) -> Result<GsapTween, JsValue>;

    #[wasm_bindgen(method, js_name = to)]
    pub fn to(this: &GsapTimeline, targets: &JsValue, vars: &JsValue, position: &JsValue);

    #[wasm_bindgen(method, js_name = from)]
    pub fn from(this: &GsapTimeline, targets: &JsValue, vars: &JsValue, position: &JsValue);

    #[wasm_bindgen(method, js_name = set)]
    pub fn set(this: &GsapTimeline, targets: &JsValue, vars: &JsValue, position: &JsValue);

    #[wasm_bindgen(method)]
    pub fn kill(this: &GsapTween);

    /// `split-type`'s splitter.
    pub type SplitType;

    #[wasm_bindgen(catch, constructor)]
    pub fn new(target: &str, options: &JsValue) -> Result<SplitType, JsValue>;

    /// Character elements, or `null` when nothing was split.
    #[wasm_bindgen(method, getter)]
    pub fn chars(this: &SplitType) -> JsValue;
}
