#![no_main]

use libfuzzer_sys::fuzz_target;
use sqlaccess_core::redact_sql;

fuzz_target!(|data: &[u8]| {
    if let Ok(sql) = std::str::from_utf8(data) {
        // A redacted query must redact to itself.
        if let Ok(once) = redact_sql(sql) {
            if let Ok(twice) = redact_sql(&once) {
                assert_eq!(once, twice);
            }
        }
    }
});
