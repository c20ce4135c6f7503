#![no_main]
use libfuzzer_sys::fuzz_target;
use mathseek_core::{SolveEnvelope, decode_str, render, render_outcome};

fuzz_target!(|data: &[u8]| {
    let s = String::from_utf8_lossy(data);
    if let Some(doc) = decode_str(&s) {
        let _ = render(&doc).to_string();
    }
    if let Ok(envelope) = SolveEnvelope::from_json(&s) {
        let _ = render_outcome(&envelope.outcome());
    }
});
