//! Property-based tests for the assembler.

use proptest::prelude::*;
use sim6502::assembler::assemble;

proptest! {
    /// Property: immediate operands round-trip byte-exactly.
    #[test]
    fn prop_immediate_round_trips(value in 0u8..=255u8) {
        let source = format!("LDA #${value:02X}");
        let output = assemble(&source).unwrap();
        prop_assert_eq!(output.bytes, vec![0xA9, value]);
    }

    /// Property: address operands pick zero page exactly when the value
    /// fits in 8 bits.
    #[test]
    fn prop_address_mode_by_magnitude(addr in 0u16..=0xFFFF) {
        let source = format!("LDA ${addr:04X}");
        let output = assemble(&source).unwrap();

        if addr <= 0xFF {
            prop_assert_eq!(output.bytes, vec![0xA5, addr as u8]);
        } else {
            prop_assert_eq!(
                output.bytes,
                vec![0xAD, (addr & 0xFF) as u8, (addr >> 8) as u8]
            );
        }
    }

    /// Property: forward branches encode the padding distance as the
    /// offset, for every reachable distance.
    #[test]
    fn prop_forward_branch_offset(padding in 0usize..=127) {
        let mut source = String::from("BEQ target\n");
        for _ in 0..padding {
            source.push_str("NOP\n");
        }
        source.push_str("target:\nBRK");

        let output = assemble(&source).unwrap();
        prop_assert_eq!(output.bytes[0], 0xF0);
        prop_assert_eq!(output.bytes[1], padding as u8);
    }

    /// Property: backward branches reach up to 126 bytes of padding
    /// (offset -2 - padding >= -128).
    #[test]
    fn prop_backward_branch_offset(padding in 0usize..=126) {
        let mut source = String::from("target:\n");
        for _ in 0..padding {
            source.push_str("NOP\n");
        }
        source.push_str("BEQ target\nBRK");

        let output = assemble(&source).unwrap();
        let offset = output.bytes[padding + 1] as i8;
        prop_assert_eq!(offset as i32, -(padding as i32) - 2);
    }

    /// Property: the label table records the address each label
    /// assembles to.
    #[test]
    fn prop_label_addresses_track_sizes(nops in 0usize..=40, loads in 0usize..=40) {
        let mut source = String::new();
        for _ in 0..nops {
            source.push_str("NOP\n");
        }
        for _ in 0..loads {
            source.push_str("LDA #$01\n");
        }
        source.push_str("end:\nBRK");

        let output = assemble(&source).unwrap();
        let expected = 0x0600 + nops as u16 + 2 * loads as u16;
        prop_assert_eq!(output.lookup_symbol_addr("end"), Some(expected));
        prop_assert_eq!(output.bytes.len(), nops + 2 * loads + 1);
    }
}
