//! Fuzz target for the disassembler.
//!
//! Decodes arbitrary byte sequences; every byte must be consumed exactly
//! once and rendering must never panic.

#![no_main]

use libfuzzer_sys::fuzz_target;
use sim6502::disassembler::disassemble;

fuzz_target!(|bytes: &[u8]| {
    let listing = disassemble(bytes, 0x0600);

    let total: usize = listing.iter().map(|i| i.size_bytes as usize).sum();
    assert_eq!(total, bytes.len());

    for instruction in &listing {
        let _ = instruction.to_source();
    }
});
