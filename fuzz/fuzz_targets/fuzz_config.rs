#![no_main]

use jostle_core::ScatterConfig;
use libfuzzer_sys::fuzz_target;

fuzz_target!(|data: &[u8]| {
    let Ok(json) = std::str::from_utf8(data) else {
        return;
    };
    // Anything accepted must be usable as-is.
    if let Ok(config) = ScatterConfig::from_json(json) {
        assert!(config.validate().is_ok());
        assert!(config.min_distance().is_finite());
        assert!(config.level_filter().is_ok());
    }
});
