//! Fuzz target: `ControllerConfig::from_json`
//!
//! Feeds arbitrary bytes to the configuration parser and verifies:
//! - No panics on malformed UTF-8 or JSON
//! - Any accepted document also passes `validate`
//! - An accepted configuration builds a `Controller`
//!
//! cargo fuzz run fuzz_config_json

#![no_main]

use barnclimate::app::service::Controller;
use barnclimate::config::ControllerConfig;
use libfuzzer_sys::fuzz_target;

fuzz_target!(|data: &[u8]| {
    let Ok(json) = core::str::from_utf8(data) else {
        return;
    };
    if let Ok(config) = ControllerConfig::from_json(json) {
        assert!(config.validate().is_ok());
        assert!(Controller::new(config).is_ok());
    }
});
