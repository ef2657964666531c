#![no_main]

use libfuzzer_sys::fuzz_target;
use pytircy::frontend::{lexer, parser};

fuzz_target!(|data: &[u8]| {
    // Convert bytes to UTF-8 string (ignore invalid UTF-8)
    if let Ok(s) = std::str::from_utf8(data) {
        // Every stage must fail with an error rather than panic
        if let Ok(tokens) = lexer::lex(s) {
            if let Ok(module) = parser::parse(&tokens) {
                let _ = pytircy::emit_module(&module);
            }
        }
    }
});
