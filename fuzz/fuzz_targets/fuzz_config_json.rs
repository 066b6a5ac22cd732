#![no_main]

use libfuzzer_sys::fuzz_target;
use scrollfx_runtime::{ConfigError, EngineConfig};

fuzz_target!(|data: &[u8]| {
    let Ok(text) = std::str::from_utf8(data) else {
        return;
    };
    if text.len() > 8192 {
        return;
    }

    match EngineConfig::from_json_str(text) {
        Ok(config) => {
            // Anything accepted validates cleanly and serializes again.
            assert!(config.validate().is_empty());
            assert!(config.to_json_pretty().is_ok());
        }
        Err(ConfigError::Validation(errors)) => assert!(!errors.is_empty()),
        Err(_) => {}
    }
});
