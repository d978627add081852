#![no_main]
use libfuzzer_sys::fuzz_target;
use texdiag_log::{ParseOptions, parse_latex_log};

fuzz_target!(|data: &[u8]| {
    // Logs are not guaranteed to be UTF-8; lossy conversion keeps near-text inputs.
    let s = String::from_utf8_lossy(data);
    for ignore_duplicates in [false, true] {
        let options = ParseOptions::default().ignoring_duplicates(ignore_duplicates);
        let result = parse_latex_log(&s, &options);
        assert_eq!(
            result.all.len(),
            result.errors.len() + result.warnings.len() + result.typesetting.len()
        );
    }
});
