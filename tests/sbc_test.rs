//! Tests for the SBC (Subtract with Carry) instruction.
//!
//! SBC computes A - operand - (1 - C); carry set means no borrow was
//! needed.

use sim6502::{CPU, FlatMemory, MemoryBus, PROGRAM_START};

fn setup_cpu(program: &[u8]) -> CPU<FlatMemory> {
    let mut cpu = CPU::new(FlatMemory::new());
    cpu.load_program(program, PROGRAM_START);
    cpu.set_running(true);
    cpu
}

#[test]
fn test_sbc_immediate_basic() {
    let mut cpu = setup_cpu(&[0xE9, 0x03]); // SBC #$03
    cpu.set_a(0x10);
    cpu.set_flag_c(true); // no pending borrow

    cpu.step();

    assert_eq!(cpu.a(), 0x0D);
    assert!(cpu.flag_c()); // no borrow
    assert!(!cpu.flag_z());
    assert!(!cpu.flag_n());
    assert!(!cpu.flag_v());
    assert_eq!(cpu.cycles(), 2);
}

#[test]
fn test_sbc_with_borrow_in() {
    let mut cpu = setup_cpu(&[0xE9, 0x03]); // SBC #$03
    cpu.set_a(0x10);
    cpu.set_flag_c(false); // borrow pending

    cpu.step();

    assert_eq!(cpu.a(), 0x0C); // 0x10 - 0x03 - 1
}

#[test]
fn test_sbc_underflow_sets_borrow() {
    let mut cpu = setup_cpu(&[0xE9, 0x01]); // SBC #$01
    cpu.set_a(0x00);
    cpu.set_flag_c(true);

    cpu.step();

    assert_eq!(cpu.a(), 0xFF);
    assert!(!cpu.flag_c()); // borrow occurred
    assert!(cpu.flag_n());
    assert!(!cpu.flag_z());
}

#[test]
fn test_sbc_zero_result() {
    let mut cpu = setup_cpu(&[0xE9, 0x42]); // SBC #$42
    cpu.set_a(0x42);
    cpu.set_flag_c(true);

    cpu.step();

    assert_eq!(cpu.a(), 0x00);
    assert!(cpu.flag_z());
    assert!(cpu.flag_c());
}

#[test]
fn test_sbc_signed_overflow() {
    // -128 - 1 overflows to +127
    let mut cpu = setup_cpu(&[0xE9, 0x01]); // SBC #$01
    cpu.set_a(0x80);
    cpu.set_flag_c(true);

    cpu.step();

    assert_eq!(cpu.a(), 0x7F);
    assert!(cpu.flag_v());
    assert!(!cpu.flag_n());
    assert!(cpu.flag_c());
}

#[test]
fn test_sbc_positive_minus_negative_overflow() {
    // 127 - (-1) overflows to -128
    let mut cpu = setup_cpu(&[0xE9, 0xFF]); // SBC #$FF
    cpu.set_a(0x7F);
    cpu.set_flag_c(true);

    cpu.step();

    assert_eq!(cpu.a(), 0x80);
    assert!(cpu.flag_v());
    assert!(cpu.flag_n());
    assert!(!cpu.flag_c()); // 0x7F < 0xFF unsigned, so borrow
}

#[test]
fn test_sbc_zero_page_and_absolute() {
    let mut cpu = setup_cpu(&[0xE5, 0x10, 0xED, 0x00, 0x03]); // SBC $10, SBC $0300
    cpu.memory_mut().write(0x0010, 0x01);
    cpu.memory_mut().write(0x0300, 0x02);
    cpu.set_a(0x0A);
    cpu.set_flag_c(true);

    cpu.step();
    assert_eq!(cpu.a(), 0x09);
    assert_eq!(cpu.cycles(), 3);

    cpu.step();
    assert_eq!(cpu.a(), 0x07);
    assert_eq!(cpu.cycles(), 7);
}
