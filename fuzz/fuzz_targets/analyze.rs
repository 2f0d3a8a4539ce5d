#![no_main]

use libfuzzer_sys::fuzz_target;
use sqlaccess_core::{analyze, AnalyzeRequest, Dialect};

const DIALECTS: [Dialect; 5] = [
    Dialect::Generic,
    Dialect::Postgres,
    Dialect::Mysql,
    Dialect::Snowflake,
    Dialect::Bigquery,
];

fuzz_target!(|data: &[u8]| {
    let Some((selector, rest)) = data.split_first() else {
        return;
    };
    if let Ok(sql) = std::str::from_utf8(rest) {
        let dialect = DIALECTS[usize::from(*selector) % DIALECTS.len()];
        let _ = analyze(&AnalyzeRequest::new(sql).with_dialect(dialect));
    }
});
