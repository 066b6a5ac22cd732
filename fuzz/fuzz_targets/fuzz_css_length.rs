#![no_main]

use libfuzzer_sys::fuzz_target;
use scrollfx_core::{CssLength, Viewport};

fuzz_target!(|data: &[u8]| {
    let Ok(text) = std::str::from_utf8(data) else {
        return;
    };
    if text.len() > 256 {
        return;
    }

    // Parsing must never panic; accepted lengths are finite.
    let Ok(length) = CssLength::parse(text) else {
        // Lenient resolution falls back instead of failing.
        let px = CssLength::resolve_or(Some(text), CssLength::Vh(120.0), Viewport::new(1000.0, 800.0));
        assert_eq!(px, 960.0);
        return;
    };

    // Display output parses back to the same length.
    let reparsed = CssLength::parse(&length.to_string()).expect("display output must parse");
    assert_eq!(reparsed, length);

    let px = length.resolve(Viewport::new(1440.0, 900.0));
    assert!(!px.is_nan(), "resolved length is NaN for {text:?}");
});
