#![no_main]
use libfuzzer_sys::fuzz_target;
use templatemaker::clean::PlainCleaner;
use templatemaker::template::Template;

fuzz_target!(|data: &[u8]| {
    // Any bytes may act as a template; extraction must not panic.
    let split = data.len() / 2;
    let (template, text) = data.split_at(split);
    let template = Template::from_bytes(template.to_vec());
    let _ = template.extract(text, &PlainCleaner);
});
