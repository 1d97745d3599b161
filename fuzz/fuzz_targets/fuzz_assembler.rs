//! Fuzz target for the assembler.
//!
//! Feeds arbitrary text through `assemble` to find panics. Errors are
//! expected and fine; crashing is not.

#![no_main]

use libfuzzer_sys::fuzz_target;
use sim6502::assembler::assemble;

fuzz_target!(|source: &str| {
    // Any outcome but a panic is acceptable
    if let Ok(output) = assemble(source) {
        // Successful assemblies must be internally consistent
        assert_eq!(output.origin, 0x0600);
        assert!(output.bytes.len() <= 0x10000);
    }
});
