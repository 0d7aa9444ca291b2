//! Fuzz target: JSON deserialization and validation of `NewHero`.
//!
//! Arbitrary bytes must never panic the create-body parser or validator.

#![no_main]

use heroes_core::NewHero;
use libfuzzer_sys::fuzz_target;

fuzz_target!(|data: &[u8]| {
    if let Ok(hero) = serde_json::from_slice::<NewHero>(data) {
        let _ = hero.validate();
    }
});
