//! Tests for the CLC, SEC, CLV, SEI and CLI (Flag) instructions, plus NOP.

use sim6502::{CPU, FlatMemory, PROGRAM_START};

fn setup_cpu(program: &[u8]) -> CPU<FlatMemory> {
    let mut cpu = CPU::new(FlatMemory::new());
    cpu.load_program(program, PROGRAM_START);
    cpu.set_running(true);
    cpu
}

#[test]
fn test_clc() {
    let mut cpu = setup_cpu(&[0x18]); // CLC
    cpu.set_flag_c(true);

    cpu.step();

    assert!(!cpu.flag_c());
    assert_eq!(cpu.pc(), 0x0601);
    assert_eq!(cpu.cycles(), 2);
}

#[test]
fn test_sec() {
    let mut cpu = setup_cpu(&[0x38]); // SEC

    cpu.step();

    assert!(cpu.flag_c());
}

#[test]
fn test_clv() {
    let mut cpu = setup_cpu(&[0xB8]); // CLV
    cpu.set_flag_v(true);

    cpu.step();

    assert!(!cpu.flag_v());
}

#[test]
fn test_sei_and_cli() {
    let mut cpu = setup_cpu(&[0x78, 0x58]); // SEI, CLI

    cpu.step();
    assert!(cpu.flag_i());

    cpu.step();
    assert!(!cpu.flag_i());
}

#[test]
fn test_flag_ops_touch_only_their_flag() {
    let mut cpu = setup_cpu(&[0x38]); // SEC
    cpu.set_flag_n(true);
    cpu.set_flag_z(true);
    cpu.set_flag_v(true);

    cpu.step();

    assert!(cpu.flag_n());
    assert!(cpu.flag_z());
    assert!(cpu.flag_v());
    assert!(cpu.flag_c());
}

#[test]
fn test_nop_changes_only_pc_and_cycles() {
    let mut cpu = setup_cpu(&[0xEA]); // NOP
    let status_before = cpu.status();

    cpu.step();

    assert_eq!(cpu.status(), status_before);
    assert_eq!(cpu.a(), 0x00);
    assert_eq!(cpu.pc(), 0x0601);
    assert_eq!(cpu.cycles(), 2);
}
