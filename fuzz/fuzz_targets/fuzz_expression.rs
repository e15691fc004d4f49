#![no_main]

use libfuzzer_sys::fuzz_target;

fuzz_target!(|data: &[u8]| {
    if let Ok(text) = std::str::from_utf8(data) {
        // Darf nie paniken; endliches Ergebnis oder Fehler
        if let Ok(value) = cad_construct::shared::evaluate(text) {
            assert!(value.is_finite());
        }
    }
});
