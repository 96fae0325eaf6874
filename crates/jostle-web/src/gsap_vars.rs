#![forbid(unsafe_code)]

//! Encoding of [`Tween`]s as GSAP vars objects.
//!
//! Everything expressible as JSON lands in [`TweenVars::vars`]. Per-index
//! values become GSAP function-based values on the JS side, so they are
//! kept apart in [`TweenVars::per_index`]. Completion callbacks are also
//! attached by the caller.
//!
//! | Core | GSAP |
//! |------|------|
//! | `Repeat::Infinite` | `repeat: -1` |
//! | `Value::Relative(5.0)` | `"+=5"` |
//! | `Ease::BackOut(1.7)` | `"back.out(1.7)"` |
//! | `Position::WithPrevious` | position parameter `"<"` |

use std::time::Duration;

use jostle_core::timeline::{Ease, Mode, Position, Property, Repeat, Step, Tween, Value};
use serde_json::{Map, Value as Json};

/// Timeline method a tween is added with.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Method {
    To,
    From,
    Set,
}

impl From<Mode> for Method {
    fn from(mode: Mode) -> Self {
        match mode {
            Mode::To => Self::To,
            Mode::From => Self::From,
            Mode::Set => Self::Set,
        }
    }
}

/// One tween, ready to hand to GSAP.
#[derive(Debug, Clone, PartialEq)]
pub struct TweenVars {
    pub method: Method,
    pub vars: Map<String, Json>,
    /// Properties whose value depends on the element index.
    pub per_index: Vec<(&'static str, Vec<f64>)>,
    /// Position parameter, `None` to append at the timeline end.
    pub position: Option<&'static str>,
}

/// GSAP name of a property.
#[must_use]
pub const fn property_name(property: Property) -> &'static str {
    match property {
        Property::YPercent => "yPercent",
        Property::Left => "left",
        Property::Top => "top",
        Property::Rotation => "rotate",
        Property::Scale => "scale",
        Property::Padding => "padding",
        Property::Width => "width",
        Property::Height => "height",
        Property::BorderRadius => "borderRadius",
    }
}

#[must_use]
pub fn ease_name(ease: Ease) -> String {
    match ease {
        Ease::None => "none".to_string(),
        Ease::Power1Out => "power1.out".to_string(),
        Ease::BackOut(overshoot) => format!("back.out({overshoot})"),
    }
}

/// `"+=n"` / `"-=n"`.
#[must_use]
pub fn relative(offset: f64) -> String {
    if offset < 0.0 {
        format!("-={}", -offset)
    } else {
        format!("+={offset}")
    }
}

fn seconds(duration: Duration) -> Json {
    Json::from(duration.as_secs_f64())
}

/// Encode a standalone tween.
#[must_use]
pub fn encode_tween(tween: &Tween) -> TweenVars {
    let method = Method::from(tween.mode);
    let mut vars = Map::new();
    let mut per_index = Vec::new();

    for (property, value) in &tween.props {
        let name = property_name(*property);
        match value {
            Value::Number(n) => {
                vars.insert(name.to_string(), Json::from(*n));
            }
            Value::Css(css) => {
                vars.insert(name.to_string(), Json::from(css.as_str()));
            }
            Value::Relative(offset) => {
                vars.insert(name.to_string(), Json::from(relative(*offset)));
            }
            Value::PerIndex(values) => per_index.push((name, values.clone())),
        }
    }

    if method != Method::Set {
        vars.insert("duration".into(), seconds(tween.duration));
        vars.insert("ease".into(), Json::from(ease_name(tween.ease)));
    }
    if !tween.stagger.is_zero() {
        vars.insert("stagger".into(), seconds(tween.stagger));
    }
    match tween.repeat {
        Repeat::Once => {}
        Repeat::Times(n) => {
            vars.insert("repeat".into(), Json::from(n));
        }
        Repeat::Infinite => {
            vars.insert("repeat".into(), Json::from(-1));
        }
    }
    if !tween.repeat_delay.is_zero() {
        vars.insert("repeatDelay".into(), seconds(tween.repeat_delay));
    }
    if tween.yoyo {
        vars.insert("yoyo".into(), Json::Bool(true));
    }

    TweenVars {
        method,
        vars,
        per_index,
        position: None,
    }
}

/// Encode a timeline step, including its position parameter.
#[must_use]
pub fn encode_step(step: &Step) -> TweenVars {
    let mut encoded = encode_tween(&step.tween);
    encoded.position = match step.position {
        Position::AfterPrevious => None,
        Position::WithPrevious => Some("<"),
    };
    encoded
}
