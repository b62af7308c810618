use catalyst_tiles::config::{TileDef, TilesConfig};
use catalyst_tiles::{RegistryError, Tile, TileRegistry, TileTypeId, Wall};
use proptest::prelude::*;
use rand::SeedableRng;
use rand_chacha::ChaCha8Rng;

fn def(key: &str, solid: bool, glow: f32) -> TileDef {
    TileDef {
        key: key.into(),
        name: None,
        description: String::new(),
        max_health: 10,
        solid,
        glow,
        map_color: [0, 0, 0, 255],
        sprites: vec!["a".into(), "b".into(), "c".into()],
    }
}

#[test]
fn empty_is_always_id_zero() {
    let reg = TileRegistry::new();
    assert_eq!(reg.id_by_key("EMPTY"), Some(TileTypeId::EMPTY));
    let empty = reg.get(TileTypeId::EMPTY).unwrap();
    assert!(!empty.solid);
    assert_eq!(empty.glow, 0.0);
    assert_eq!(Tile::default(), Tile::EMPTY);
}

#[test]
fn builtin_set_resolves() {
    let reg = TileRegistry::builtin().expect("builtin tiles");
    for key in ["DIRT", "GRASS", "STONE", "RED_CLAY", "SLATE", "OAK_LOG", "TORCH"] {
        assert!(reg.lookup(key).is_ok(), "missing {key}");
    }
    let torch = reg.require("TORCH");
    assert!(!reg.is_solid(torch));
    assert!(reg.glow(torch) > 0.0);
    assert!(reg.is_solid(reg.require("STONE")));
    assert!(reg.max_glow() >= 1.0);
}

#[test]
fn duplicate_keys_rejected() {
    let mut reg = TileRegistry::new();
    reg.register(def("A", true, 0.0)).unwrap();
    assert_eq!(
        reg.register(def("A", false, 0.0)),
        Err(RegistryError::DuplicateKey("A".into()))
    );
    assert_eq!(
        reg.register(def("EMPTY", false, 0.0)),
        Err(RegistryError::DuplicateKey("EMPTY".into()))
    );
}

#[test]
fn invalid_glow_rejected() {
    let mut reg = TileRegistry::new();
    assert!(matches!(
        reg.register(def("NEG", false, -0.5)),
        Err(RegistryError::InvalidGlow { .. })
    ));
    assert!(matches!(
        reg.register(def("NAN", false, f32::NAN)),
        Err(RegistryError::InvalidGlow { .. })
    ));
}

#[test]
fn unknown_lookup_is_an_error() {
    let reg = TileRegistry::new();
    assert_eq!(
        reg.lookup("NOPE"),
        Err(RegistryError::UnknownKey("NOPE".into()))
    );
}

#[test]
#[should_panic(expected = "unknown tile type 'NOPE'")]
fn require_unknown_panics() {
    TileRegistry::new().require("NOPE");
}

#[test]
fn wall_solidity_follows_type() {
    let mut reg = TileRegistry::new();
    let stone = reg.register(def("STONE", true, 0.0)).unwrap();
    let glass = reg.register(def("GLASS", false, 0.0)).unwrap();
    assert!(reg.is_wall_solid(Wall::Tile(stone)));
    assert!(!reg.is_wall_solid(Wall::Tile(glass)));
    assert!(!reg.is_wall_solid(Wall::None));
    assert_eq!(Wall::from(Some(stone)), Wall::Tile(stone));
    assert_eq!(Wall::from(None), Wall::None);
}

#[test]
fn toml_defaults_apply() {
    let reg = TileRegistry::from_toml_str(
        r#"
        [[tiles]]
        key = "ROCK"
    "#,
    )
    .unwrap();
    let rock = reg.get(reg.require("ROCK")).unwrap();
    assert!(rock.solid);
    assert_eq!(rock.name, "ROCK");
    assert_eq!(rock.glow, 0.0);
    assert_eq!(rock.random_variant(&mut ChaCha8Rng::seed_from_u64(1)), 0);
}

proptest! {
    #[test]
    fn ids_are_dense_and_stable(keys in proptest::collection::hash_set("[A-Z]{1,8}", 1..40)) {
        prop_assume!(!keys.contains("EMPTY"));
        let keys: Vec<String> = keys.into_iter().collect();
        let cfg = TilesConfig { tiles: keys.iter().map(|k| def(k, true, 0.0)).collect() };
        let reg = TileRegistry::from_config(cfg).unwrap();
        prop_assert_eq!(reg.len(), keys.len() + 1);
        for (i, k) in keys.iter().enumerate() {
            let id = reg.require(k);
            prop_assert_eq!(id, TileTypeId(i as u16 + 1));
            prop_assert_eq!(&reg.get(id).unwrap().key, k);
        }
    }

    #[test]
    fn random_variant_in_range(seed in any::<u64>()) {
        let mut reg = TileRegistry::new();
        let id = reg.register(def("V", true, 0.0)).unwrap();
        let ty = reg.get(id).unwrap();
        let mut rng = ChaCha8Rng::seed_from_u64(seed);
        for _ in 0..16 {
            prop_assert!((ty.random_variant(&mut rng) as usize) < ty.variant_count());
        }
    }
}
