//! Fuzzes the profile document loader.
//!
//! Feeds arbitrary bytes to the JSON loader. Must never panic, and a refused
//! document must always leave the built-in profile in place.
//!
//! Run with:
//!   cargo +nightly fuzz run fuzz_profile_load
#![no_main]
use libfuzzer_sys::fuzz_target;
use openframe_profile::{Profile, load_or_builtin};

fuzz_target!(|data: &[u8]| {
    let _ = Profile::from_slice(data);

    if let Ok(text) = std::str::from_utf8(data) {
        let load = load_or_builtin(text);
        if load.used_fallback() {
            assert!(load.profile.is_builtin());
        }
    }
});
