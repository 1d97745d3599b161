//! Tests for the AND, ORA and EOR (Logical) instructions.

use sim6502::{CPU, FlatMemory, MemoryBus, PROGRAM_START};

fn setup_cpu(program: &[u8]) -> CPU<FlatMemory> {
    let mut cpu = CPU::new(FlatMemory::new());
    cpu.load_program(program, PROGRAM_START);
    cpu.set_running(true);
    cpu
}

#[test]
fn test_and_immediate() {
    let mut cpu = setup_cpu(&[0x29, 0x0F]); // AND #$0F
    cpu.set_a(0x5A);

    cpu.step();

    assert_eq!(cpu.a(), 0x0A);
    assert!(!cpu.flag_z());
    assert!(!cpu.flag_n());
    assert_eq!(cpu.cycles(), 2);
}

#[test]
fn test_and_zero_result() {
    let mut cpu = setup_cpu(&[0x29, 0x0F]); // AND #$0F
    cpu.set_a(0xF0);

    cpu.step();

    assert_eq!(cpu.a(), 0x00);
    assert!(cpu.flag_z());
}

#[test]
fn test_and_zero_page() {
    let mut cpu = setup_cpu(&[0x25, 0x10]); // AND $10
    cpu.memory_mut().write(0x0010, 0xFF);
    cpu.set_a(0x81);

    cpu.step();

    assert_eq!(cpu.a(), 0x81);
    assert!(cpu.flag_n());
    assert_eq!(cpu.cycles(), 3);
}

#[test]
fn test_ora_immediate() {
    let mut cpu = setup_cpu(&[0x09, 0x0F]); // ORA #$0F
    cpu.set_a(0x80);

    cpu.step();

    assert_eq!(cpu.a(), 0x8F);
    assert!(cpu.flag_n());
}

#[test]
fn test_ora_absolute() {
    let mut cpu = setup_cpu(&[0x0D, 0x00, 0x03]); // ORA $0300
    cpu.memory_mut().write(0x0300, 0x01);
    cpu.set_a(0x02);

    cpu.step();

    assert_eq!(cpu.a(), 0x03);
    assert_eq!(cpu.cycles(), 4);
}

#[test]
fn test_ora_zero_stays_zero() {
    let mut cpu = setup_cpu(&[0x09, 0x00]); // ORA #$00

    cpu.step();

    assert_eq!(cpu.a(), 0x00);
    assert!(cpu.flag_z());
}

#[test]
fn test_eor_immediate() {
    let mut cpu = setup_cpu(&[0x49, 0xFF]); // EOR #$FF
    cpu.set_a(0x0F);

    cpu.step();

    assert_eq!(cpu.a(), 0xF0);
    assert!(cpu.flag_n());
}

#[test]
fn test_eor_self_inverse() {
    // LDA #x, EOR #$FF, EOR #$FF leaves A = x
    let mut cpu = setup_cpu(&[0xA9, 0x3C, 0x49, 0xFF, 0x49, 0xFF]);

    cpu.step();
    cpu.step();
    cpu.step();

    assert_eq!(cpu.a(), 0x3C);
}

#[test]
fn test_eor_with_itself_is_zero() {
    let mut cpu = setup_cpu(&[0x49, 0x42]); // EOR #$42
    cpu.set_a(0x42);

    cpu.step();

    assert_eq!(cpu.a(), 0x00);
    assert!(cpu.flag_z());
}
