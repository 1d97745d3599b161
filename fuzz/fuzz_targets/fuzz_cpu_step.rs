//! Fuzz target for CPU step execution.
//!
//! This target creates arbitrary CPU states and memory contents, then
//! executes a handful of instructions to find edge cases and crashes.

#![no_main]

use arbitrary::Arbitrary;
use libfuzzer_sys::fuzz_target;
use sim6502::{CPU, FlatMemory, MemoryBus, PROGRAM_START};

/// Arbitrary CPU initial state for fuzzing
#[derive(Debug, Arbitrary)]
struct FuzzCpuState {
    /// Accumulator register
    a: u8,
    /// X index register
    x: u8,
    /// Y index register
    y: u8,
    /// Stack pointer
    sp: u8,
    /// Packed status byte
    status: u8,
}

/// Complete fuzz input
#[derive(Debug, Arbitrary)]
struct FuzzInput {
    cpu_state: FuzzCpuState,
    /// Instruction bytes at the program start
    program: [u8; 16],
    /// Zero page contents
    zero_page: [u8; 256],
    /// Stack page contents
    stack_page: [u8; 256],
}

fuzz_target!(|input: FuzzInput| {
    let mut cpu = CPU::new(FlatMemory::new());
    cpu.load_program(&input.program, PROGRAM_START);

    for (i, &byte) in input.zero_page.iter().enumerate() {
        cpu.memory_mut().write(i as u16, byte);
    }
    for (i, &byte) in input.stack_page.iter().enumerate() {
        cpu.memory_mut().write(0x0100 + i as u16, byte);
    }

    cpu.set_a(input.cpu_state.a);
    cpu.set_x(input.cpu_state.x);
    cpu.set_y(input.cpu_state.y);
    cpu.set_sp(input.cpu_state.sp);
    cpu.set_status(input.cpu_state.status);
    cpu.set_running(true);

    // Execute a few instructions; halting early is fine, panicking is not
    for _ in 0..8 {
        if !cpu.step() {
            break;
        }
        // Bit 5 of the status byte must survive every instruction
        assert_eq!(cpu.status() & 0x20, 0x20);
    }
});
