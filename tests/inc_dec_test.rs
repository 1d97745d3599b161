//! Tests for the INX, INY, DEX and DEY (Increment/Decrement) instructions.

use sim6502::{CPU, FlatMemory, PROGRAM_START};

fn setup_cpu(program: &[u8]) -> CPU<FlatMemory> {
    let mut cpu = CPU::new(FlatMemory::new());
    cpu.load_program(program, PROGRAM_START);
    cpu.set_running(true);
    cpu
}

#[test]
fn test_inx_basic() {
    let mut cpu = setup_cpu(&[0xE8]); // INX
    cpu.set_x(0x10);

    cpu.step();

    assert_eq!(cpu.x(), 0x11);
    assert!(!cpu.flag_z());
    assert!(!cpu.flag_n());
    assert_eq!(cpu.cycles(), 2);
}

#[test]
fn test_inx_wraps_to_zero() {
    let mut cpu = setup_cpu(&[0xE8]); // INX
    cpu.set_x(0xFF);

    cpu.step();

    assert_eq!(cpu.x(), 0x00);
    assert!(cpu.flag_z());
    assert!(!cpu.flag_n());
}

#[test]
fn test_iny_sets_negative() {
    let mut cpu = setup_cpu(&[0xC8]); // INY
    cpu.set_y(0x7F);

    cpu.step();

    assert_eq!(cpu.y(), 0x80);
    assert!(cpu.flag_n());
    assert!(!cpu.flag_z());
}

#[test]
fn test_dex_wraps_to_ff() {
    let mut cpu = setup_cpu(&[0xCA]); // DEX
    cpu.set_x(0x00);

    cpu.step();

    assert_eq!(cpu.x(), 0xFF);
    assert!(!cpu.flag_z());
    assert!(cpu.flag_n());
}

#[test]
fn test_dex_to_zero() {
    let mut cpu = setup_cpu(&[0xCA]); // DEX
    cpu.set_x(0x01);

    cpu.step();

    assert_eq!(cpu.x(), 0x00);
    assert!(cpu.flag_z());
}

#[test]
fn test_dey_basic() {
    let mut cpu = setup_cpu(&[0x88]); // DEY
    cpu.set_y(0x05);

    cpu.step();

    assert_eq!(cpu.y(), 0x04);
    assert!(!cpu.flag_z());
    assert!(!cpu.flag_n());
    assert_eq!(cpu.cycles(), 2);
}

#[test]
fn test_inc_dec_round_trip() {
    let mut cpu = setup_cpu(&[0xE8, 0xCA]); // INX, DEX
    cpu.set_x(0x42);

    cpu.step();
    cpu.step();

    assert_eq!(cpu.x(), 0x42);
}
