#![no_main]

use arbitrary::Arbitrary;
use jostle_core::geometry::{Bounds, distance};
use jostle_core::placement::{OverflowPolicy, PlacementGenerator};
use libfuzzer_sys::fuzz_target;
use rand::SeedableRng;
use rand::rngs::SmallRng;

#[derive(Debug, Arbitrary)]
struct Input {
    letters: u8,
    min_x: i16,
    min_y: i16,
    width: u16,
    height: u16,
    min_distance: u8,
    cap: u8,
    relax: bool,
    seed: u64,
}

fuzz_target!(|input: Input| {
    let count = usize::from(input.letters % 12);
    let letters = vec!["x"; count];
    let min_x = f64::from(input.min_x);
    let min_y = f64::from(input.min_y);
    let bounds = Bounds::new(
        min_x,
        min_y,
        min_x + f64::from(input.width % 2048),
        min_y + f64::from(input.height % 2048),
    );
    let min_distance = f64::from(input.min_distance);
    let overflow = if input.relax {
        OverflowPolicy::BestCandidate
    } else {
        OverflowPolicy::Fail
    };
    // Always capped: an uncapped crowded pass may legitimately spin.
    let generator = PlacementGenerator::new(min_distance)
        .max_attempts(Some(u32::from(input.cap) + 1))
        .overflow(overflow);

    let mut rng = SmallRng::seed_from_u64(input.seed);
    let Ok(pass) = generator.generate(&letters, &bounds, &mut rng) else {
        // A capped best-candidate pass only fails on bounds with no point.
        assert!(!input.relax || bounds.integer_ranges().is_none());
        return;
    };

    assert_eq!(pass.placements.len(), count);
    for p in &pass.placements {
        assert!(bounds.contains(p.left, p.top), "{p:?} outside {bounds:?}");
    }
    if pass.relaxed == 0 {
        for (i, a) in pass.placements.iter().enumerate() {
            for b in &pass.placements[i + 1..] {
                assert!(distance(a.left, a.top, b.left, b.top) >= min_distance);
            }
        }
    }
});
