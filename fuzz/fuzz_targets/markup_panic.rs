#![no_main]
use libfuzzer_sys::fuzz_target;
use mathseek_markup::{join, sanitize, split, strip_delimiters};

fuzz_target!(|data: &[u8]| {
    let s = String::from_utf8_lossy(data);
    let cleaned = sanitize(&s);
    assert_eq!(sanitize(&cleaned), cleaned);
    let _ = strip_delimiters(&s);
    let _ = join(&split(&s));
});
