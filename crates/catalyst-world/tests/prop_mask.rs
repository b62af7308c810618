use catalyst_world::layers::LayerTable;
use catalyst_world::mask::{BoundaryNoise, LayerMask, LayerMaskOptions, MaskMode, MaskStack};
use proptest::prelude::*;

const NAMES: [&str; 6] = ["space", "surface", "underground", "cavern", "underworld", "bogus"];

fn arb_names() -> impl Strategy<Value = Vec<&'static str>> {
    proptest::sample::subsequence(NAMES.to_vec(), 0..=NAMES.len())
}

fn arb_opts() -> impl Strategy<Value = LayerMaskOptions> {
    (
        proptest::option::of((any::<i32>(), 0.0f32..0.2, 0.0f32..0.2, 0.0f32..0.1)),
        proptest::option::of(0u32..16),
    )
        .prop_map(|(b, feather_rows)| LayerMaskOptions {
            boundary: b.map(|(seed, s, e, f)| BoundaryNoise {
                seed,
                start_amplitude: s,
                end_amplitude: e,
                frequency: f,
            }),
            feather_rows,
        })
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(64))]

    #[test]
    fn values_stay_in_unit_range(names in arb_names(), opts in arb_opts(), allow in any::<bool>()) {
        let mode = if allow { MaskMode::Allow } else { MaskMode::Block };
        let m = LayerMask::with_options(12, 80, &LayerTable::standard(), names.as_slice(), mode, opts);
        for x in -1..13 {
            for y in -1..81 {
                let v = m.value(x, y);
                prop_assert!((0.0..=1.0).contains(&v));
                prop_assert_eq!(m.is_allowed(x, y), v > 0.0);
            }
        }
    }

    #[test]
    fn allow_and_block_are_complements(names in arb_names(), seed in any::<i32>()) {
        let table = LayerTable::standard();
        let opts = LayerMaskOptions { boundary: Some(BoundaryNoise::new(seed)), feather_rows: None };
        let a = LayerMask::with_options(12, 80, &table, names.as_slice(), MaskMode::Allow, opts);
        let b = LayerMask::with_options(12, 80, &table, names.as_slice(), MaskMode::Block, opts);
        for x in 0..12 {
            for y in 0..80 {
                prop_assert_ne!(a.is_allowed(x, y), b.is_allowed(x, y));
            }
        }
    }

    #[test]
    fn stack_allows_only_where_every_mask_does(a in arb_names(), b in arb_names()) {
        let table = LayerTable::standard();
        let ma = LayerMask::new(6, 50, &table, a.as_slice(), MaskMode::Allow);
        let mb = LayerMask::new(6, 50, &table, b.as_slice(), MaskMode::Block);
        let mut stack = MaskStack::new(6, 50);
        stack.push(ma.clone());
        stack.push(mb.clone());
        for x in 0..6 {
            for y in 0..50 {
                let expect = ma.is_allowed(x, y) && mb.is_allowed(x, y);
                prop_assert_eq!(stack.is_allowed(x, y), expect);
                if let Some(v) = stack.combined(x, y) {
                    prop_assert_eq!(v, ma.value(x, y) * mb.value(x, y));
                }
            }
        }
    }
}
