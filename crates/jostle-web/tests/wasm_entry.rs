#![cfg(target_arch = "wasm32")]
#![forbid(unsafe_code)]

//! The JS exports driven end to end: `start`, `onReady` and `Effect`.

mod common;

use jostle_web::wasm::{on_ready, start};
use pretty_assertions::assert_eq;
use wasm_bindgen_test::{wasm_bindgen_test, wasm_bindgen_test_configure};

use common::{
    body_html, counter, document, fixture_json, flush, install_globals, letter,
    letters_with_origin, mount_page, next_task,
};

wasm_bindgen_test_configure!(run_in_browser);

#[wasm_bindgen_test]
fn start_without_layout_leaves_page_alone() {
    install_globals();
    assert!(document().query_selector(".layout").unwrap().is_none());
    let before = body_html();

    assert!(start(None).is_none());
    assert!(start(Some("   ".to_string())).is_none());
    assert_eq!(body_html(), before);
    assert_eq!(counter("tweens"), 0);
    assert_eq!(flush(), 0);
}

#[wasm_bindgen_test]
fn invalid_config_disables_effect() {
    install_globals();
    let page = mount_page();
    let before = body_html();

    assert!(start(Some("{ nope".to_string())).is_none());
    assert!(start(Some(r#"{ "padding": -1 }"#.to_string())).is_none());
    assert!(start(Some(r#"{ "letterSize": 80 }"#.to_string())).is_none());
    assert_eq!(body_html(), before);
    assert_eq!(flush(), 0);
    page.remove();
}

#[wasm_bindgen_test]
fn empty_heading_disables_effect() {
    install_globals();
    let page = mount_page();
    document()
        .query_selector(".jt-heading")
        .unwrap()
        .unwrap()
        .set_inner_html("");

    assert!(start(Some(fixture_json())).is_none());
    assert_eq!(flush(), 0);
    page.remove();
}

#[wasm_bindgen_test]
async fn intro_shuffle_shake_click_destroy() {
    install_globals();
    let page = mount_page();

    let effect = start(Some(fixture_json())).unwrap();
    assert_eq!(effect.phase(), "Intro");
    assert_eq!(effect.shuffle_count(), 0);

    // Resize and intro completions.
    assert_eq!(flush(), 2);
    next_task().await;
    assert_eq!(effect.phase(), "Shuffling");
    assert_eq!(effect.shuffle_count(), 1);

    assert_eq!(flush(), 1);
    next_task().await;
    assert_eq!(effect.phase(), "Live");
    assert_eq!(counter("tweens"), 1);
    let shaking = letters_with_origin();
    assert_eq!(shaking.len(), 1);

    letter(shaking[0]).click();
    next_task().await;
    assert_eq!(effect.phase(), "Shuffling");
    assert_eq!(effect.shuffle_count(), 2);
    assert_eq!(counter("kills"), 1);

    // The listener went with the shake.
    letter(shaking[0]).click();
    next_task().await;
    assert_eq!(effect.shuffle_count(), 2);

    assert_eq!(flush(), 1);
    next_task().await;
    assert_eq!(effect.phase(), "Live");
    assert_eq!(counter("tweens"), 2);

    effect.destroy();
    assert_eq!(counter("kills"), 2);
    page.remove();
}

#[wasm_bindgen_test]
async fn dropping_an_effect_stops_its_shake() {
    install_globals();
    let page = mount_page();

    let effect = start(Some(fixture_json())).unwrap();
    flush();
    next_task().await;
    flush();
    next_task().await;
    assert_eq!(effect.phase(), "Live");
    assert_eq!(counter("kills"), 0);

    drop(effect);
    assert_eq!(counter("kills"), 1);

    let shaking = letters_with_origin();
    letter(shaking[0]).click();
    next_task().await;
    assert_eq!(counter("tweens"), 1);
    page.remove();
}

#[wasm_bindgen_test]
async fn on_ready_defers_start_until_called() {
    install_globals();
    let page = mount_page();
    let register = js_sys::Function::new_with_args("cb", "globalThis.__jostleReady = cb;");

    on_ready(&register, Some(fixture_json()));
    assert_eq!(flush(), 0);

    js_sys::eval("__jostleReady()").unwrap();
    assert_eq!(flush(), 2);
    // The page keeps the effect alive; its first shuffle is now queued.
    next_task().await;
    assert_eq!(flush(), 1);
    next_task().await;
    assert_eq!(counter("tweens"), 1);
    page.remove();
}

#[wasm_bindgen_test]
fn on_ready_survives_a_failing_register() {
    install_globals();
    let register = js_sys::Function::new_with_args("cb", "throw new Error('no queue');");
    on_ready(&register, None);
    assert_eq!(flush(), 0);
}
