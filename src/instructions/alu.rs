//! # ALU (Arithmetic Logic Unit) Instructions
//!
//! This module implements arithmetic, logical, and compare operations:
//! - ADC: Add with Carry
//! - SBC: Subtract with Carry
//! - AND, ORA, EOR: Bitwise logic on the accumulator
//! - BIT: Bit test
//! - CMP, CPX, CPY: Register/memory compares
//!
//! Decimal mode is modeled as a flag only; ADC/SBC are always binary.

use crate::{MemoryBus, CPU, OPCODE_TABLE};

/// Executes the ADC (Add with Carry) instruction.
///
/// Adds the operand plus the carry flag to the accumulator.
///
/// # Flag Behavior
///
/// - Carry (C): Set if the unsigned result exceeds 0xFF
/// - Zero (Z): Set if the 8-bit result is 0
/// - Overflow (V): Set if both operands share a sign and the result's sign
///   differs (signed overflow)
/// - Negative (N): Set if bit 7 of the result is set
pub(crate) fn execute_adc<M: MemoryBus>(cpu: &mut CPU<M>, opcode: u8) {
    let metadata = &OPCODE_TABLE[opcode as usize];

    let value = cpu.operand_value(metadata.addressing_mode);

    let a = cpu.a;
    let carry_in: u16 = if cpu.flag_c { 1 } else { 0 };

    let result16 = a as u16 + value as u16 + carry_in;
    let result = result16 as u8;

    cpu.flag_c = result16 > 0xFF;
    cpu.flag_z = result == 0;
    cpu.flag_n = (result & 0x80) != 0;

    // Signed overflow: both operands had the same sign, result differs.
    // V = (A ^ result) & (operand ^ result) & 0x80
    cpu.flag_v = ((a ^ result) & (value ^ result) & 0x80) != 0;

    cpu.a = result;

    cpu.cycles += metadata.base_cycles as u64;
    cpu.pc = cpu.pc.wrapping_add(metadata.size_bytes as u16);
}

/// Executes the SBC (Subtract with Carry) instruction.
///
/// Subtracts the operand and the borrow (inverted carry) from the
/// accumulator: `A - operand - (1 - C)`.
///
/// # Flag Behavior
///
/// - Carry (C): Set if no borrow was needed (result >= 0)
/// - Zero (Z): Set if the 8-bit result is 0
/// - Overflow (V): Set on signed overflow,
///   `(A ^ operand) & (A ^ result) & 0x80`
/// - Negative (N): Set if bit 7 of the result is set
pub(crate) fn execute_sbc<M: MemoryBus>(cpu: &mut CPU<M>, opcode: u8) {
    let metadata = &OPCODE_TABLE[opcode as usize];

    let value = cpu.operand_value(metadata.addressing_mode);

    let a = cpu.a;
    let borrow: i16 = if cpu.flag_c { 0 } else { 1 };

    let result16 = a as i16 - value as i16 - borrow;
    let result = result16 as u8;

    cpu.flag_c = result16 >= 0;
    cpu.flag_z = result == 0;
    cpu.flag_n = (result & 0x80) != 0;

    // Signed overflow: A and operand have different signs, and the result's
    // sign differs from A's.
    cpu.flag_v = ((a ^ value) & (a ^ result) & 0x80) != 0;

    cpu.a = result;

    cpu.cycles += metadata.base_cycles as u64;
    cpu.pc = cpu.pc.wrapping_add(metadata.size_bytes as u16);
}

/// Executes the AND (Logical AND) instruction.
///
/// Bitwise AND between the accumulator and the operand. Updates Z and N.
pub(crate) fn execute_and<M: MemoryBus>(cpu: &mut CPU<M>, opcode: u8) {
    let metadata = &OPCODE_TABLE[opcode as usize];

    let value = cpu.operand_value(metadata.addressing_mode);
    let result = cpu.a & value;

    cpu.flag_z = result == 0;
    cpu.flag_n = (result & 0x80) != 0;
    cpu.a = result;

    cpu.cycles += metadata.base_cycles as u64;
    cpu.pc = cpu.pc.wrapping_add(metadata.size_bytes as u16);
}

/// Executes the ORA (Logical Inclusive OR) instruction.
///
/// Bitwise OR between the accumulator and the operand. Updates Z and N.
pub(crate) fn execute_ora<M: MemoryBus>(cpu: &mut CPU<M>, opcode: u8) {
    let metadata = &OPCODE_TABLE[opcode as usize];

    let value = cpu.operand_value(metadata.addressing_mode);
    let result = cpu.a | value;

    cpu.flag_z = result == 0;
    cpu.flag_n = (result & 0x80) != 0;
    cpu.a = result;

    cpu.cycles += metadata.base_cycles as u64;
    cpu.pc = cpu.pc.wrapping_add(metadata.size_bytes as u16);
}

/// Executes the EOR (Exclusive OR) instruction.
///
/// Bitwise XOR between the accumulator and the operand. Updates Z and N.
pub(crate) fn execute_eor<M: MemoryBus>(cpu: &mut CPU<M>, opcode: u8) {
    let metadata = &OPCODE_TABLE[opcode as usize];

    let value = cpu.operand_value(metadata.addressing_mode);
    let result = cpu.a ^ value;

    cpu.flag_z = result == 0;
    cpu.flag_n = (result & 0x80) != 0;
    cpu.a = result;

    cpu.cycles += metadata.base_cycles as u64;
    cpu.pc = cpu.pc.wrapping_add(metadata.size_bytes as u16);
}

/// Executes the BIT (Bit Test) instruction.
///
/// ANDs the accumulator with the operand to set Z, and copies bits 7 and 6
/// of the operand into N and V. The accumulator is not modified.
pub(crate) fn execute_bit<M: MemoryBus>(cpu: &mut CPU<M>, opcode: u8) {
    let metadata = &OPCODE_TABLE[opcode as usize];

    let value = cpu.operand_value(metadata.addressing_mode);

    cpu.flag_z = (cpu.a & value) == 0;
    cpu.flag_n = (value & 0x80) != 0;
    cpu.flag_v = (value & 0x40) != 0;

    cpu.cycles += metadata.base_cycles as u64;
    cpu.pc = cpu.pc.wrapping_add(metadata.size_bytes as u16);
}

/// Compare helper shared by CMP/CPX/CPY.
///
/// Computes `register - operand` without storing it:
/// - Carry (C): Set if register >= operand (unsigned)
/// - Zero (Z): Set if register == operand
/// - Negative (N): Set from bit 7 of the 8-bit difference
fn compare<M: MemoryBus>(cpu: &mut CPU<M>, opcode: u8, register: u8) {
    let metadata = &OPCODE_TABLE[opcode as usize];

    let value = cpu.operand_value(metadata.addressing_mode);
    let result = register.wrapping_sub(value);

    cpu.flag_c = register >= value;
    cpu.flag_z = result == 0;
    cpu.flag_n = (result & 0x80) != 0;

    cpu.cycles += metadata.base_cycles as u64;
    cpu.pc = cpu.pc.wrapping_add(metadata.size_bytes as u16);
}

/// Executes the CMP (Compare Accumulator) instruction.
pub(crate) fn execute_cmp<M: MemoryBus>(cpu: &mut CPU<M>, opcode: u8) {
    let register = cpu.a;
    compare(cpu, opcode, register);
}

/// Executes the CPX (Compare X Register) instruction.
pub(crate) fn execute_cpx<M: MemoryBus>(cpu: &mut CPU<M>, opcode: u8) {
    let register = cpu.x;
    compare(cpu, opcode, register);
}

/// Executes the CPY (Compare Y Register) instruction.
pub(crate) fn execute_cpy<M: MemoryBus>(cpu: &mut CPU<M>, opcode: u8) {
    let register = cpu.y;
    compare(cpu, opcode, register);
}
