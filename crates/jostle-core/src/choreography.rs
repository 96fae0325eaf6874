#![forbid(unsafe_code)]

//! The three animations the effect plays, built from [`ScatterConfig`].
//!
//! | Builder | Plays |
//! |---------|-------|
//! | [`intro_timeline`] | letter rise-in, section padding, container resize |
//! | [`shuffle_timeline`] | every letter to its placement, random spin, 2x scale |
//! | [`shake_tween`] | endless small wobble on one letter |

use rand::Rng;

use crate::config::{ScatterConfig, secs};
use crate::placement::Placement;
use crate::timeline::{Cue, Ease, Property, Repeat, Target, Timeline, Tween, Value};

/// Intro sequence for `count` split letters.
///
/// The container resize carries [`Cue::ContainerResized`]; bounds must be
/// measured on that cue and not earlier. The timeline ends with
/// [`Cue::IntroFinished`].
#[must_use]
pub fn intro_timeline(config: &ScatterConfig, count: usize) -> Timeline {
    let intro = &config.intro;
    Timeline::new()
        .then(
            Tween::from(Target::Letters { count })
                .prop(Property::YPercent, Value::Number(100.0))
                .duration(secs(intro.rise_secs))
                .stagger(secs(intro.stagger_secs))
                .ease(Ease::BackOut(intro.back_overshoot)),
        )
        .then(
            Tween::to(Target::Section)
                .prop(Property::Padding, Value::css(&intro.section_padding)),
        )
        .with_previous(
            Tween::to(Target::Container)
                .prop(Property::Height, Value::css(&intro.container_height))
                .prop(Property::BorderRadius, Value::css(&intro.corner_radius))
                .on_complete(Cue::ContainerResized),
        )
        .with_previous(
            Tween::set(Target::Heading)
                .prop(Property::Width, Value::css("100%"))
                .prop(Property::Height, Value::css("100%")),
        )
        .on_complete(Cue::IntroFinished)
}

/// One scatter pass moving every letter to its placement.
///
/// Rotations are drawn here, one per letter, uniformly from
/// `[-max_rotation_deg, max_rotation_deg)`.
pub fn shuffle_timeline<R: Rng + ?Sized>(
    config: &ScatterConfig,
    placements: &[Placement],
    rng: &mut R,
) -> Timeline {
    let count = placements.len();
    let max = config.shuffle.max_rotation_deg;
    let tween = Tween::to(Target::Letters { count })
        .prop(
            Property::Left,
            Value::per_index(count, |i| placements[i].left),
        )
        .prop(Property::Top, Value::per_index(count, |i| placements[i].top))
        .prop(
            Property::Rotation,
            Value::per_index(count, |_| rng.random::<f64>() * 2.0 * max - max),
        )
        .prop(Property::Scale, Value::Number(config.shuffle.scale))
        .duration(secs(config.shuffle.duration_secs));
    Timeline::new()
        .then(tween)
        .on_complete(Cue::ShuffleFinished)
}

/// Endless wobble on letter `index`.
#[must_use]
pub fn shake_tween(config: &ScatterConfig, index: usize) -> Tween {
    let shake = &config.shake;
    Tween::to(Target::Letter(index))
        .prop(Property::Rotation, Value::Relative(shake.step_deg))
        .duration(secs(shake.duration_secs))
        .repeat(Repeat::Infinite)
        .repeat_delay(secs(shake.repeat_delay_secs))
        .yoyo(true)
        .ease(Ease::None)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::timeline::{Mode, Position};
    use pretty_assertions::assert_eq;
    use rand::SeedableRng;
    use rand::rngs::SmallRng;
    use std::time::Duration;

    fn placements() -> Vec<Placement> {
        ["a", "b", "c"]
            .iter()
            .enumerate()
            .map(|(i, l)| Placement {
                letter: l.to_string(),
                left: 100.0 * i as f64,
                top: 50.0 + i as f64,
            })
            .collect()
    }

    #[test]
    fn intro_structure() {
        let tl = intro_timeline(&ScatterConfig::default(), 6);
        let steps = tl.steps();
        assert_eq!(steps.len(), 4);

        let rise = &steps[0].tween;
        assert_eq!(rise.mode, Mode::From);
        assert_eq!(rise.target, Target::Letters { count: 6 });
        assert_eq!(rise.value_of(Property::YPercent), Some(&Value::Number(100.0)));
        assert_eq!(rise.duration, Duration::from_millis(400));
        assert_eq!(rise.ease, Ease::BackOut(1.7));

        assert_eq!(steps[1].tween.target, Target::Section);
        assert_eq!(steps[1].position, Position::AfterPrevious);

        let resize = &steps[2].tween;
        assert_eq!(steps[2].position, Position::WithPrevious);
        assert_eq!(resize.target, Target::Container);
        assert_eq!(resize.value_of(Property::Height), Some(&Value::css("60dvh")));
        assert_eq!(resize.cue, Some(Cue::ContainerResized));

        assert_eq!(steps[3].tween.mode, Mode::Set);
        assert_eq!(steps[3].position, Position::WithPrevious);
        assert_eq!(tl.cues(), vec![Cue::ContainerResized, Cue::IntroFinished]);
    }

    #[test]
    fn intro_resize_starts_after_rise_in() {
        // 0.4s + 5 * 0.05s stagger
        let tl = intro_timeline(&ScatterConfig::default(), 6);
        let offsets = tl.offsets();
        assert_eq!(offsets[1], Duration::from_millis(650));
        assert_eq!(offsets[2], offsets[1]);
        assert_eq!(offsets[3], offsets[1]);
        assert_eq!(tl.total_duration(), Some(Duration::from_millis(1150)));
    }

    #[test]
    fn shuffle_targets_placements() {
        let mut rng = SmallRng::seed_from_u64(11);
        let tl = shuffle_timeline(&ScatterConfig::default(), &placements(), &mut rng);
        assert_eq!(tl.step_count(), 1);
        assert_eq!(tl.cue(), Some(Cue::ShuffleFinished));

        let tween = &tl.steps()[0].tween;
        assert_eq!(tween.target, Target::Letters { count: 3 });
        assert_eq!(
            tween.value_of(Property::Left),
            Some(&Value::PerIndex(vec![0.0, 100.0, 200.0]))
        );
        assert_eq!(
            tween.value_of(Property::Top),
            Some(&Value::PerIndex(vec![50.0, 51.0, 52.0]))
        );
        assert_eq!(tween.value_of(Property::Scale), Some(&Value::Number(2.0)));
        assert_eq!(tween.duration, Duration::from_millis(500));
    }

    #[test]
    fn shuffle_rotations_in_half_open_range() {
        let mut rng = SmallRng::seed_from_u64(2);
        let many: Vec<Placement> = (0..500)
            .map(|i| Placement {
                letter: "x".into(),
                left: i as f64,
                top: 0.0,
            })
            .collect();
        let tl = shuffle_timeline(&ScatterConfig::default(), &many, &mut rng);
        let Some(Value::PerIndex(rotations)) = tl.steps()[0].tween.value_of(Property::Rotation)
        else {
            panic!("rotation should be per-index");
        };
        assert_eq!(rotations.len(), 500);
        assert!(rotations.iter().all(|r| (-180.0..180.0).contains(r)));
        assert!(rotations.iter().any(|r| *r < 0.0));
        assert!(rotations.iter().any(|r| *r > 0.0));
    }

    #[test]
    fn shake_is_endless_linear_yoyo() {
        let tween = shake_tween(&ScatterConfig::default(), 4);
        assert_eq!(tween.target, Target::Letter(4));
        assert_eq!(tween.value_of(Property::Rotation), Some(&Value::Relative(5.0)));
        assert_eq!(tween.repeat, Repeat::Infinite);
        assert!(tween.yoyo);
        assert_eq!(tween.ease, Ease::None);
        assert_eq!(tween.duration, Duration::from_millis(50));
        assert_eq!(tween.repeat_delay, Duration::from_millis(50));
        assert_eq!(tween.span(), None);
    }
}
