//! # Stack Operations
//!
//! This module implements stack manipulation instructions:
//! - PHA: Push Accumulator
//! - PLA: Pull Accumulator
//! - PHP: Push Processor Status
//! - PLP: Pull Processor Status
//!
//! The stack lives at memory addresses 0x0100-0x01FF and grows downward.
//! A push writes at 0x0100 + SP and then decrements SP; a pull increments
//! SP first and then reads at 0x0100 + SP. Both wrap mod 256. JSR and RTS
//! rely on the same discipline.

use crate::{MemoryBus, CPU, OPCODE_TABLE, STACK_BASE};

/// Executes the PHA (Push Accumulator) instruction.
///
/// Writes the accumulator at 0x0100 + SP, then decrements SP.
///
/// Flags affected: None
///
/// # Examples
///
/// ```
/// use sim6502::{CPU, FlatMemory, MemoryBus, PROGRAM_START};
///
/// let mut cpu = CPU::new(FlatMemory::new());
/// cpu.load_program(&[0x48], PROGRAM_START); // PHA
/// cpu.set_a(0x42);
/// cpu.set_running(true);
///
/// cpu.step();
///
/// assert_eq!(cpu.memory().read(0x01FF), 0x42);
/// assert_eq!(cpu.sp(), 0xFE);
/// assert_eq!(cpu.cycles(), 3);
/// ```
pub(crate) fn execute_pha<M: MemoryBus>(cpu: &mut CPU<M>, opcode: u8) {
    let metadata = &OPCODE_TABLE[opcode as usize];

    let stack_addr = STACK_BASE | (cpu.sp as u16);
    cpu.memory.write(stack_addr, cpu.a);
    cpu.sp = cpu.sp.wrapping_sub(1);

    cpu.cycles += metadata.base_cycles as u64;
    cpu.pc = cpu.pc.wrapping_add(metadata.size_bytes as u16);
}

/// Executes the PLA (Pull Accumulator) instruction.
///
/// Increments SP, then reads the accumulator from 0x0100 + SP. Sets Z and
/// N from the pulled value.
pub(crate) fn execute_pla<M: MemoryBus>(cpu: &mut CPU<M>, opcode: u8) {
    let metadata = &OPCODE_TABLE[opcode as usize];

    cpu.sp = cpu.sp.wrapping_add(1);
    let value = cpu.memory.read(STACK_BASE | (cpu.sp as u16));

    cpu.a = value;
    cpu.flag_z = value == 0;
    cpu.flag_n = (value & 0x80) != 0;

    cpu.cycles += metadata.base_cycles as u64;
    cpu.pc = cpu.pc.wrapping_add(metadata.size_bytes as u16);
}

/// Executes the PHP (Push Processor Status) instruction.
///
/// Pushes the status byte with the Break flag forced set on the pushed
/// copy only; the live flags are unchanged.
pub(crate) fn execute_php<M: MemoryBus>(cpu: &mut CPU<M>, opcode: u8) {
    let metadata = &OPCODE_TABLE[opcode as usize];

    // Break set in the pushed byte, not in the live flags
    let status = cpu.status() | 0b0001_0000;

    let stack_addr = STACK_BASE | (cpu.sp as u16);
    cpu.memory.write(stack_addr, status);
    cpu.sp = cpu.sp.wrapping_sub(1);

    cpu.cycles += metadata.base_cycles as u64;
    cpu.pc = cpu.pc.wrapping_add(metadata.size_bytes as u16);
}

/// Executes the PLP (Pull Processor Status) instruction.
///
/// Pulls the status byte into the live flags, except that the Break flag
/// is cleared and the unused bit continues to read as 1.
pub(crate) fn execute_plp<M: MemoryBus>(cpu: &mut CPU<M>, opcode: u8) {
    let metadata = &OPCODE_TABLE[opcode as usize];

    cpu.sp = cpu.sp.wrapping_add(1);
    let value = cpu.memory.read(STACK_BASE | (cpu.sp as u16));

    cpu.set_status(value);
    cpu.flag_b = false;

    cpu.cycles += metadata.base_cycles as u64;
    cpu.pc = cpu.pc.wrapping_add(metadata.size_bytes as u16);
}
