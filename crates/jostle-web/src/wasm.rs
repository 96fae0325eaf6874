//! `wasm-bindgen` exports: `start`, `onReady` and the [`Effect`] handle.

use std::cell::RefCell;
use std::rc::{Rc, Weak};

use jostle_core::stage::Signal;
use jostle_core::{Director, ScatterConfig};
use rand::SeedableRng;
use rand::rngs::SmallRng;
use tracing::level_filters::LevelFilter;
use tracing::{debug, warn};
use wasm_bindgen::prelude::*;

use crate::dom_stage::{Dispatch, DomStage};
use crate::logging;

type SharedDirector = Rc<RefCell<Director<DomStage, SmallRng>>>;

thread_local! {
    /// Effects started through `onReady`; they live as long as the page.
    static PAGE_EFFECTS: RefCell<Vec<SharedDirector>> = const { RefCell::new(Vec::new()) };
}

fn install_panic_hook() {
    use std::sync::Once;
    static ONCE: Once = Once::new();
    ONCE.call_once(|| {
        std::panic::set_hook(Box::new(|info| {
            web_sys::console::error_1(&JsValue::from_str(&format!("{info}")));
        }));
    });
}

/// Parse the optional JSON config and bring up logging at its level.
///
/// Invalid config is logged at `warn` and disables the effect.
fn load_config(config_json: Option<String>) -> Option<ScatterConfig> {
    let json = config_json.as_deref().map(str::trim).unwrap_or_default();
    let config = if json.is_empty() {
        ScatterConfig::default()
    } else {
        match ScatterConfig::from_json(json) {
            Ok(config) => config,
            Err(err) => {
                logging::init(LevelFilter::WARN);
                warn!(%err, "invalid config; effect disabled");
                return None;
            }
        }
    };
    logging::init(config.level_filter().unwrap_or(LevelFilter::WARN));
    Some(config)
}

/// 64 random bits from two `Math.random()` draws.
fn entropy_seed() -> u64 {
    let half = || (js_sys::Math::random() * f64::from(u32::MAX)) as u64;
    (half() << 32) | half()
}

/// Signals are delivered on a later microtask, after whatever callback
/// produced them has returned and released the director.
fn dispatcher(director: Weak<RefCell<Director<DomStage, SmallRng>>>) -> Dispatch {
    Rc::new(move |signal: Signal| {
        let director = director.clone();
        wasm_bindgen_futures::spawn_local(async move {
            let Some(director) = director.upgrade() else {
                return;
            };
            match director.try_borrow_mut() {
                Ok(mut director) => director.handle(signal),
                Err(_) => warn!(?signal, "director busy; signal dropped"),
            };
        });
    })
}

fn launch(config: ScatterConfig) -> Option<SharedDirector> {
    let document = web_sys::window()?.document()?;
    let seed = config.seed.unwrap_or_else(entropy_seed);
    debug!(seed, "launching");
    let rng = SmallRng::seed_from_u64(seed);

    let director = Rc::new_cyclic(|weak| {
        let stage = DomStage::new(document, &config, dispatcher(weak.clone()));
        RefCell::new(Director::new(stage, config, rng))
    });
    let started = director.borrow_mut().start();
    started.then_some(director)
}

/// A running heading effect.
#[wasm_bindgen]
pub struct Effect {
    director: SharedDirector,
}

#[wasm_bindgen]
impl Effect {
    /// Current phase, for debugging.
    #[wasm_bindgen(getter)]
    pub fn phase(&self) -> String {
        self.director
            .try_borrow()
            .map(|director| format!("{:?}", director.phase()))
            .unwrap_or_default()
    }

    /// Number of shuffle passes played so far.
    #[wasm_bindgen(getter, js_name = shuffleCount)]
    pub fn shuffle_count(&self) -> u32 {
        self.director
            .try_borrow()
            .map(|director| u32::try_from(director.shuffle_count()).unwrap_or(u32::MAX))
            .unwrap_or_default()
    }

    /// Kill the shake, detach the click listener and release the page.
    pub fn destroy(self) {
        match self.director.try_borrow_mut() {
            Ok(mut director) => director.teardown(),
            Err(_) => warn!("director busy; destroy ignored"),
        }
    }
}

/// Start the effect now.
///
/// Returns `undefined` when the config is invalid or the page has nothing
/// to animate; the page is left untouched in both cases.
#[wasm_bindgen]
pub fn start(config_json: Option<String>) -> Option<Effect> {
    install_panic_hook();
    let config = load_config(config_json)?;
    launch(config).map(|director| Effect { director })
}

/// Hand `register` a callback that starts the effect, e.g.
/// `onReady(cb => (window.Webflow ||= []).push(cb))`.
#[wasm_bindgen(js_name = onReady)]
pub fn on_ready(register: &js_sys::Function, config_json: Option<String>) {
    install_panic_hook();
    let callback = Closure::once_into_js(move || {
        let Some(config) = load_config(config_json) else {
            return;
        };
        if let Some(director) = launch(config) {
            PAGE_EFFECTS.with(|effects| effects.borrow_mut().push(director));
        }
    });
    if let Err(err) = register.call1(&JsValue::NULL, &callback) {
        logging::init(LevelFilter::WARN);
        warn!(?err, "page-ready registration failed");
    }
}
