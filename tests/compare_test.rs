//! Tests for the CMP, CPX and CPY (Compare) instructions.
//!
//! Compares subtract the operand from the register without storing the
//! result: C means register >= operand, Z means equal, N is bit 7 of the
//! difference.

use sim6502::{CPU, FlatMemory, MemoryBus, PROGRAM_START};

fn setup_cpu(program: &[u8]) -> CPU<FlatMemory> {
    let mut cpu = CPU::new(FlatMemory::new());
    cpu.load_program(program, PROGRAM_START);
    cpu.set_running(true);
    cpu
}

#[test]
fn test_cmp_equal() {
    let mut cpu = setup_cpu(&[0xC9, 0x42]); // CMP #$42
    cpu.set_a(0x42);

    cpu.step();

    assert!(cpu.flag_c());
    assert!(cpu.flag_z());
    assert!(!cpu.flag_n());
    assert_eq!(cpu.a(), 0x42); // register unchanged
    assert_eq!(cpu.cycles(), 2);
}

#[test]
fn test_cmp_greater() {
    let mut cpu = setup_cpu(&[0xC9, 0x10]); // CMP #$10
    cpu.set_a(0x20);

    cpu.step();

    assert!(cpu.flag_c());
    assert!(!cpu.flag_z());
    assert!(!cpu.flag_n());
}

#[test]
fn test_cmp_less() {
    let mut cpu = setup_cpu(&[0xC9, 0x20]); // CMP #$20
    cpu.set_a(0x10);

    cpu.step();

    assert!(!cpu.flag_c());
    assert!(!cpu.flag_z());
    assert!(cpu.flag_n()); // 0x10 - 0x20 = 0xF0
}

#[test]
fn test_cmp_zero_page_and_absolute() {
    let mut cpu = setup_cpu(&[0xC5, 0x10, 0xCD, 0x00, 0x03]); // CMP $10, CMP $0300
    cpu.memory_mut().write(0x0010, 0x05);
    cpu.memory_mut().write(0x0300, 0xFF);
    cpu.set_a(0x05);

    cpu.step();
    assert!(cpu.flag_z());
    assert_eq!(cpu.cycles(), 3);

    cpu.step();
    assert!(!cpu.flag_c()); // 0x05 < 0xFF
    assert_eq!(cpu.cycles(), 7);
}

#[test]
fn test_cpx_immediate_and_zero_page() {
    let mut cpu = setup_cpu(&[0xE0, 0x05, 0xE4, 0x10]); // CPX #$05, CPX $10
    cpu.memory_mut().write(0x0010, 0x06);
    cpu.set_x(0x05);

    cpu.step();
    assert!(cpu.flag_z());
    assert!(cpu.flag_c());

    cpu.step();
    assert!(!cpu.flag_c()); // 0x05 < 0x06
    assert!(!cpu.flag_z());
}

#[test]
fn test_cpy_immediate_and_zero_page() {
    let mut cpu = setup_cpu(&[0xC0, 0x00, 0xC4, 0x10]); // CPY #$00, CPY $10
    cpu.memory_mut().write(0x0010, 0x80);
    cpu.set_y(0x00);

    cpu.step();
    assert!(cpu.flag_z());
    assert!(cpu.flag_c());

    cpu.step();
    assert!(!cpu.flag_c());
    assert!(cpu.flag_n()); // 0x00 - 0x80 = 0x80
}

#[test]
fn test_compare_does_not_modify_registers() {
    let mut cpu = setup_cpu(&[0xC9, 0xFF, 0xE0, 0xFF, 0xC0, 0xFF]);
    cpu.set_a(0x01);
    cpu.set_x(0x02);
    cpu.set_y(0x03);

    cpu.step();
    cpu.step();
    cpu.step();

    assert_eq!(cpu.a(), 0x01);
    assert_eq!(cpu.x(), 0x02);
    assert_eq!(cpu.y(), 0x03);
}
