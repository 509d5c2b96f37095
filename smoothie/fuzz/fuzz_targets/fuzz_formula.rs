#![no_main]

use libfuzzer_sys::fuzz_target;
use smoothie::{Engine, EngineConfig, ParseMode};

fuzz_target!(|data: &[u8]| {
    if let Ok(text) = std::str::from_utf8(data) {
        let _ = smoothie::parse(text);

        if let Ok(engine) = Engine::with_config(EngineConfig::new().with_parse_mode(ParseMode::Strict)) {
            let _ = engine.parse_formula(text);
        }
    }
});
