//! Fuzz target: `HeroPatch` parsing and application.
//!
//! Any patch that parses must apply without touching the identifier and
//! report a written field for every supplied one.

#![no_main]

use heroes_core::{Hero, HeroAttributes, HeroId, HeroPatch};
use libfuzzer_sys::fuzz_target;

fuzz_target!(|data: &[u8]| {
    let Ok(patch) = serde_json::from_slice::<HeroPatch>(data) else {
        return;
    };
    let _ = patch.validate();
    let was_empty = patch.is_empty();
    let mut hero = Hero { id: HeroId(1), attributes: HeroAttributes::default() };
    let written = patch.apply_to(&mut hero);
    assert_eq!(hero.id, HeroId(1));
    assert_eq!(written.is_empty(), was_empty);
});
