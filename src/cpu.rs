//! # CPU State and Execution
//!
//! This module contains the CPU struct representing the processor state and
//! the fetch-decode-execute loop.
//!
//! ## CPU State
//!
//! The CPU maintains:
//! - **Registers**: Accumulator (A), index registers (X, Y)
//! - **Program counter** (PC): 16-bit address of next instruction
//! - **Stack pointer** (SP): 8-bit offset into stack page (0x0100-0x01FF)
//! - **Status flags**: N, V, B, D, I, Z, C (individual bool fields)
//! - **Cycle counter**: u64 monotonically increasing cycle count
//! - **Lifecycle flags**: `running` and `assembled`
//!
//! ## Execution Model
//!
//! Programs enter memory through [`CPU::load_program`] (or
//! [`CPU::assemble_and_load`]), which zero-fills all 64 KiB, copies the
//! machine code to its start address, and points PC at it. Execution then
//! proceeds via:
//! - `step()`: Execute one instruction, returning whether it ran
//! - `run()`: Execute until a halt or the step limit
//!
//! A `BRK`, an illegal opcode, or the step limit halts the CPU; a halted CPU
//! stays halted until `reset()` and a fresh load.

use crate::{AddressingMode, MemoryBus, OPCODE_TABLE};

/// Address where assembled programs are loaded and PC starts.
pub const PROGRAM_START: u16 = 0x0600;

/// Base address of the stack page. The live stack address is
/// `STACK_BASE + SP`.
pub const STACK_BASE: u16 = 0x0100;

/// Maximum number of instructions a single [`CPU::run`] call will execute
/// before forcing a halt. Safety net against unterminated loops.
pub const RUN_STEP_LIMIT: u32 = 10_000;

/// CPU state and execution context.
///
/// The CPU struct contains all processor state including registers, flags,
/// program counter, stack pointer, cycle counter, and the 64 KiB memory it
/// owns. It is generic over the memory implementation via the `MemoryBus`
/// trait.
///
/// # Type Parameters
///
/// * `M` - Memory bus implementation (must implement `MemoryBus` trait)
///
/// # Examples
///
/// ```
/// use sim6502::{CPU, FlatMemory, PROGRAM_START};
///
/// let mut cpu = CPU::new(FlatMemory::new());
///
/// // Inspect initial state
/// assert_eq!(cpu.pc(), PROGRAM_START);
/// assert_eq!(cpu.sp(), 0xFF);
/// assert_eq!(cpu.status(), 0x20); // Only the unused bit is set
///
/// cpu.assemble_and_load("LDA #$42\nBRK").unwrap();
/// cpu.run();
///
/// assert_eq!(cpu.a(), 0x42);
/// assert!(!cpu.running());
/// ```
pub struct CPU<M: MemoryBus> {
    /// Accumulator register
    pub(crate) a: u8,

    /// X index register
    pub(crate) x: u8,

    /// Y index register
    pub(crate) y: u8,

    /// Program counter (address of next instruction)
    pub(crate) pc: u16,

    /// Stack pointer (0x0100 + sp gives full stack address)
    pub(crate) sp: u8,

    /// Negative flag (set if bit 7 of result is 1)
    pub(crate) flag_n: bool,

    /// Overflow flag (set on signed overflow)
    pub(crate) flag_v: bool,

    /// Break flag (set when BRK instruction executed)
    pub(crate) flag_b: bool,

    /// Decimal mode flag (modeled but unused arithmetically)
    pub(crate) flag_d: bool,

    /// Interrupt disable flag
    pub(crate) flag_i: bool,

    /// Zero flag (set if result is zero)
    pub(crate) flag_z: bool,

    /// Carry flag (set on unsigned overflow/underflow)
    pub(crate) flag_c: bool,

    /// Total CPU cycles executed
    pub(crate) cycles: u64,

    /// True between the start of `run` and the first halt event
    pub(crate) running: bool,

    /// True once a program has been successfully loaded
    pub(crate) assembled: bool,

    /// Latched by BRK, an illegal opcode, or the step limit; cleared only
    /// by `reset` or a fresh load
    pub(crate) halted: bool,

    /// Memory bus implementation
    pub(crate) memory: M,
}

impl<M: MemoryBus> CPU<M> {
    /// Creates a new CPU with the given memory bus.
    ///
    /// The CPU is initialized to its power-on state:
    /// - A, X, Y zeroed
    /// - PC at [`PROGRAM_START`]
    /// - SP at 0xFF (empty stack)
    /// - All status flags clear (status byte reads 0x20)
    /// - Cycle counter at 0, `running` and `assembled` false
    ///
    /// # Examples
    ///
    /// ```
    /// use sim6502::{CPU, FlatMemory};
    ///
    /// let cpu = CPU::new(FlatMemory::new());
    /// assert_eq!(cpu.pc(), 0x0600);
    /// assert_eq!(cpu.cycles(), 0);
    /// ```
    pub fn new(memory: M) -> Self {
        Self {
            a: 0x00,
            x: 0x00,
            y: 0x00,
            pc: PROGRAM_START,
            sp: 0xFF,
            flag_n: false,
            flag_v: false,
            flag_b: false,
            flag_d: false,
            flag_i: false,
            flag_z: false,
            flag_c: false,
            cycles: 0,
            running: false,
            assembled: false,
            halted: false,
            memory,
        }
    }

    /// Restores the register file to its initial values and clears the
    /// lifecycle flags and cycle counter.
    ///
    /// Memory is **not** cleared; it is zero-filled by the next
    /// [`CPU::load_program`] call instead.
    ///
    /// # Examples
    ///
    /// ```
    /// use sim6502::{CPU, FlatMemory, MemoryBus};
    ///
    /// let mut cpu = CPU::new(FlatMemory::new());
    /// cpu.assemble_and_load("LDA #$42\nSTA $0200\nBRK").unwrap();
    /// cpu.run();
    /// cpu.reset();
    ///
    /// assert_eq!(cpu.a(), 0x00);
    /// assert!(!cpu.assembled());
    /// // The program's output survives the reset
    /// assert_eq!(cpu.memory().read(0x0200), 0x42);
    /// ```
    pub fn reset(&mut self) {
        self.a = 0x00;
        self.x = 0x00;
        self.y = 0x00;
        self.pc = PROGRAM_START;
        self.sp = 0xFF;
        self.flag_n = false;
        self.flag_v = false;
        self.flag_b = false;
        self.flag_d = false;
        self.flag_i = false;
        self.flag_z = false;
        self.flag_c = false;
        self.cycles = 0;
        self.running = false;
        self.assembled = false;
        self.halted = false;
    }

    /// Loads a machine-code program into memory.
    ///
    /// Zero-fills the entire 64 KiB address space, copies `program` to
    /// `start`, sets `PC = start`, and marks the CPU `assembled`. Any
    /// previous halt state is cleared.
    ///
    /// # Arguments
    ///
    /// * `program` - Machine code bytes to load
    /// * `start` - Address the program is copied to and PC is set to
    pub fn load_program(&mut self, program: &[u8], start: u16) {
        for addr in 0..=0xFFFFu16 {
            self.memory.write(addr, 0x00);
        }
        for (i, &byte) in program.iter().enumerate() {
            self.memory.write(start.wrapping_add(i as u16), byte);
        }
        self.pc = start;
        self.assembled = true;
        self.running = false;
        self.halted = false;
    }

    /// Assembles `source` and loads the resulting machine code.
    ///
    /// On success the program is in memory at its origin (see
    /// [`PROGRAM_START`]) and the CPU is ready to `run`. On failure the
    /// error is returned and no memory or CPU state changes.
    ///
    /// # Examples
    ///
    /// ```
    /// use sim6502::{CPU, FlatMemory, MemoryBus};
    ///
    /// let mut cpu = CPU::new(FlatMemory::new());
    /// cpu.assemble_and_load("LDA #$01\nBRK").unwrap();
    ///
    /// assert!(cpu.assembled());
    /// assert_eq!(cpu.memory().read(0x0600), 0xA9); // LDA immediate
    /// ```
    pub fn assemble_and_load(
        &mut self,
        source: &str,
    ) -> Result<(), crate::assembler::AssemblerError> {
        let output = crate::assembler::assemble(source)?;
        self.load_program(&output.bytes, output.origin);
        Ok(())
    }

    /// Executes one instruction and advances the CPU state.
    ///
    /// Performs the fetch-decode-execute cycle:
    /// 1. If the CPU is not both `running` and `assembled`, return `false`
    ///    without side effects
    /// 2. Fetch the opcode byte at PC and look it up in the opcode table
    /// 3. If the byte is illegal, log it, halt, and return `false` (PC and
    ///    cycle counter are untouched)
    /// 4. Otherwise execute the instruction, advance PC past its bytes, add
    ///    its base cycle cost, and return `true`
    ///
    /// # Examples
    ///
    /// ```
    /// use sim6502::{CPU, FlatMemory};
    ///
    /// let mut cpu = CPU::new(FlatMemory::new());
    /// cpu.assemble_and_load("LDA #$05\nBRK").unwrap();
    ///
    /// // Not running yet: step refuses
    /// assert!(!cpu.step());
    ///
    /// cpu.set_running(true);
    /// assert!(cpu.step());
    /// assert_eq!(cpu.a(), 0x05);
    /// assert_eq!(cpu.cycles(), 2);
    /// ```
    pub fn step(&mut self) -> bool {
        if !self.running || !self.assembled {
            return false;
        }

        // Fetch and decode
        let opcode = self.memory.read(self.pc);
        let metadata = &OPCODE_TABLE[opcode as usize];

        if !metadata.is_legal() {
            log::error!(
                "unknown opcode 0x{:02X} at 0x{:04X}, halting",
                opcode,
                self.pc
            );
            self.running = false;
            self.halted = true;
            return false;
        }

        // Execute based on mnemonic
        match metadata.mnemonic {
            "ADC" => crate::instructions::alu::execute_adc(self, opcode),
            "AND" => crate::instructions::alu::execute_and(self, opcode),
            "BCC" => crate::instructions::branches::execute_bcc(self, opcode),
            "BCS" => crate::instructions::branches::execute_bcs(self, opcode),
            "BEQ" => crate::instructions::branches::execute_beq(self, opcode),
            "BIT" => crate::instructions::alu::execute_bit(self, opcode),
            "BMI" => crate::instructions::branches::execute_bmi(self, opcode),
            "BNE" => crate::instructions::branches::execute_bne(self, opcode),
            "BPL" => crate::instructions::branches::execute_bpl(self, opcode),
            "BRK" => crate::instructions::control::execute_brk(self, opcode),
            "BVC" => crate::instructions::branches::execute_bvc(self, opcode),
            "BVS" => crate::instructions::branches::execute_bvs(self, opcode),
            "CLC" => crate::instructions::flags::execute_clc(self, opcode),
            "CLI" => crate::instructions::flags::execute_cli(self, opcode),
            "CLV" => crate::instructions::flags::execute_clv(self, opcode),
            "CMP" => crate::instructions::alu::execute_cmp(self, opcode),
            "CPX" => crate::instructions::alu::execute_cpx(self, opcode),
            "CPY" => crate::instructions::alu::execute_cpy(self, opcode),
            "DEX" => crate::instructions::inc_dec::execute_dex(self, opcode),
            "DEY" => crate::instructions::inc_dec::execute_dey(self, opcode),
            "EOR" => crate::instructions::alu::execute_eor(self, opcode),
            "INX" => crate::instructions::inc_dec::execute_inx(self, opcode),
            "INY" => crate::instructions::inc_dec::execute_iny(self, opcode),
            "JMP" => crate::instructions::control::execute_jmp(self, opcode),
            "JSR" => crate::instructions::control::execute_jsr(self, opcode),
            "LDA" => crate::instructions::load_store::execute_lda(self, opcode),
            "LDX" => crate::instructions::load_store::execute_ldx(self, opcode),
            "LDY" => crate::instructions::load_store::execute_ldy(self, opcode),
            "NOP" => crate::instructions::control::execute_nop(self, opcode),
            "ORA" => crate::instructions::alu::execute_ora(self, opcode),
            "PHA" => crate::instructions::stack::execute_pha(self, opcode),
            "PHP" => crate::instructions::stack::execute_php(self, opcode),
            "PLA" => crate::instructions::stack::execute_pla(self, opcode),
            "PLP" => crate::instructions::stack::execute_plp(self, opcode),
            "RTS" => crate::instructions::control::execute_rts(self, opcode),
            "SBC" => crate::instructions::alu::execute_sbc(self, opcode),
            "SEC" => crate::instructions::flags::execute_sec(self, opcode),
            "SEI" => crate::instructions::flags::execute_sei(self, opcode),
            "STA" => crate::instructions::load_store::execute_sta(self, opcode),
            "STX" => crate::instructions::load_store::execute_stx(self, opcode),
            "STY" => crate::instructions::load_store::execute_sty(self, opcode),
            "TAX" => crate::instructions::transfer::execute_tax(self, opcode),
            "TAY" => crate::instructions::transfer::execute_tay(self, opcode),
            "TXA" => crate::instructions::transfer::execute_txa(self, opcode),
            "TYA" => crate::instructions::transfer::execute_tya(self, opcode),
            other => unreachable!("opcode table lists unhandled mnemonic {other}"),
        }

        true
    }

    /// Runs the loaded program until it halts or the step limit trips.
    ///
    /// Sets `running` and loops [`CPU::step`] until it returns `false` (a
    /// `BRK` or illegal opcode halted the CPU) or [`RUN_STEP_LIMIT`]
    /// iterations have executed, in which case the CPU is forcibly halted
    /// with a warning. A CPU that has already halted stays halted; call
    /// [`CPU::reset`] and reload to execute again.
    ///
    /// # Examples
    ///
    /// ```
    /// use sim6502::{CPU, FlatMemory};
    ///
    /// let mut cpu = CPU::new(FlatMemory::new());
    /// cpu.assemble_and_load("LDX #$03\nBRK").unwrap();
    /// cpu.run();
    ///
    /// assert_eq!(cpu.x(), 0x03);
    /// assert!(!cpu.running());
    /// ```
    pub fn run(&mut self) {
        if !self.assembled || self.halted {
            return;
        }

        self.running = true;
        for _ in 0..RUN_STEP_LIMIT {
            if !self.step() {
                return;
            }
        }

        log::warn!(
            "program exceeded {} instructions without halting, stopping",
            RUN_STEP_LIMIT
        );
        self.running = false;
        self.halted = true;
    }

    // ========== Register Getters ==========

    /// Returns the accumulator register value.
    pub fn a(&self) -> u8 {
        self.a
    }

    /// Returns the X index register value.
    pub fn x(&self) -> u8 {
        self.x
    }

    /// Returns the Y index register value.
    pub fn y(&self) -> u8 {
        self.y
    }

    /// Returns the program counter value.
    pub fn pc(&self) -> u16 {
        self.pc
    }

    /// Returns the stack pointer value.
    ///
    /// Note: The full stack address is 0x0100 + SP. The stack grows
    /// downward from 0x01FF.
    pub fn sp(&self) -> u8 {
        self.sp
    }

    /// Returns the status register as a packed byte.
    ///
    /// Bit layout (NV-BDIZC):
    /// - Bit 7: N (Negative)
    /// - Bit 6: V (Overflow)
    /// - Bit 5: (unused, always 1)
    /// - Bit 4: B (Break)
    /// - Bit 3: D (Decimal)
    /// - Bit 2: I (Interrupt Disable)
    /// - Bit 1: Z (Zero)
    /// - Bit 0: C (Carry)
    ///
    /// # Examples
    ///
    /// ```
    /// use sim6502::{CPU, FlatMemory};
    ///
    /// let cpu = CPU::new(FlatMemory::new());
    /// assert_eq!(cpu.status(), 0b0010_0000);
    /// ```
    pub fn status(&self) -> u8 {
        let mut status: u8 = 0b0010_0000; // Bit 5 always 1

        if self.flag_n {
            status |= 0b1000_0000;
        }
        if self.flag_v {
            status |= 0b0100_0000;
        }
        if self.flag_b {
            status |= 0b0001_0000;
        }
        if self.flag_d {
            status |= 0b0000_1000;
        }
        if self.flag_i {
            status |= 0b0000_0100;
        }
        if self.flag_z {
            status |= 0b0000_0010;
        }
        if self.flag_c {
            status |= 0b0000_0001;
        }

        status
    }

    /// Unpacks a status byte into the individual flag fields.
    ///
    /// Bit 5 is ignored; it always reads back as 1 from [`CPU::status`].
    pub fn set_status(&mut self, value: u8) {
        self.flag_n = (value & 0b1000_0000) != 0;
        self.flag_v = (value & 0b0100_0000) != 0;
        self.flag_b = (value & 0b0001_0000) != 0;
        self.flag_d = (value & 0b0000_1000) != 0;
        self.flag_i = (value & 0b0000_0100) != 0;
        self.flag_z = (value & 0b0000_0010) != 0;
        self.flag_c = (value & 0b0000_0001) != 0;
    }

    /// Returns the total number of CPU cycles executed since the last reset.
    pub fn cycles(&self) -> u64 {
        self.cycles
    }

    /// True between the start of `run` and the first halt event.
    pub fn running(&self) -> bool {
        self.running
    }

    /// True once a program has been successfully assembled and loaded.
    pub fn assembled(&self) -> bool {
        self.assembled
    }

    // ========== Status Flag Getters ==========

    /// Returns true if the Negative flag is set.
    pub fn flag_n(&self) -> bool {
        self.flag_n
    }

    /// Returns true if the Overflow flag is set.
    pub fn flag_v(&self) -> bool {
        self.flag_v
    }

    /// Returns true if the Break flag is set.
    pub fn flag_b(&self) -> bool {
        self.flag_b
    }

    /// Returns true if the Decimal mode flag is set.
    pub fn flag_d(&self) -> bool {
        self.flag_d
    }

    /// Returns true if the Interrupt Disable flag is set.
    pub fn flag_i(&self) -> bool {
        self.flag_i
    }

    /// Returns true if the Zero flag is set.
    pub fn flag_z(&self) -> bool {
        self.flag_z
    }

    /// Returns true if the Carry flag is set.
    pub fn flag_c(&self) -> bool {
        self.flag_c
    }

    // ========== Register Setters (for hosts and testing) ==========

    /// Sets the accumulator register value.
    pub fn set_a(&mut self, value: u8) {
        self.a = value;
    }

    /// Sets the X index register value.
    pub fn set_x(&mut self, value: u8) {
        self.x = value;
    }

    /// Sets the Y index register value.
    pub fn set_y(&mut self, value: u8) {
        self.y = value;
    }

    /// Sets the program counter value.
    pub fn set_pc(&mut self, value: u16) {
        self.pc = value;
    }

    /// Sets the stack pointer value.
    pub fn set_sp(&mut self, value: u8) {
        self.sp = value;
    }

    /// Sets the `running` flag directly.
    ///
    /// Hosts that single-step without calling [`CPU::run`] use this to arm
    /// the CPU first.
    pub fn set_running(&mut self, value: bool) {
        self.running = value;
    }

    /// Sets the Carry flag.
    pub fn set_flag_c(&mut self, value: bool) {
        self.flag_c = value;
    }

    /// Sets the Zero flag.
    pub fn set_flag_z(&mut self, value: bool) {
        self.flag_z = value;
    }

    /// Sets the Interrupt Disable flag.
    pub fn set_flag_i(&mut self, value: bool) {
        self.flag_i = value;
    }

    /// Sets the Decimal mode flag.
    pub fn set_flag_d(&mut self, value: bool) {
        self.flag_d = value;
    }

    /// Sets the Break flag.
    pub fn set_flag_b(&mut self, value: bool) {
        self.flag_b = value;
    }

    /// Sets the Overflow flag.
    pub fn set_flag_v(&mut self, value: bool) {
        self.flag_v = value;
    }

    /// Sets the Negative flag.
    pub fn set_flag_n(&mut self, value: bool) {
        self.flag_n = value;
    }

    /// Returns a shared reference to the memory bus.
    pub fn memory(&self) -> &M {
        &self.memory
    }

    /// Returns a mutable reference to the memory bus.
    ///
    /// This allows tests and host code to poke memory directly.
    ///
    /// # Examples
    ///
    /// ```
    /// use sim6502::{CPU, FlatMemory, MemoryBus};
    ///
    /// let mut cpu = CPU::new(FlatMemory::new());
    /// cpu.memory_mut().write(0x0600, 0xEA); // NOP
    /// assert_eq!(cpu.memory().read(0x0600), 0xEA);
    /// ```
    pub fn memory_mut(&mut self) -> &mut M {
        &mut self.memory
    }

    // ========== Helper Methods for Instruction Implementations ==========

    /// Gets the operand value for an instruction based on its addressing
    /// mode.
    ///
    /// Used by load, logical, arithmetic and compare instructions, which
    /// consume the value the mode produces.
    pub(crate) fn operand_value(&self, mode: AddressingMode) -> u8 {
        match mode {
            AddressingMode::Immediate => {
                // Value is the byte immediately after the opcode
                self.memory.read(self.pc.wrapping_add(1))
            }
            AddressingMode::ZeroPage => {
                // Address is in zero page (0x00XX)
                let addr = self.memory.read(self.pc.wrapping_add(1)) as u16;
                self.memory.read(addr)
            }
            AddressingMode::Absolute => {
                // Full 16-bit address, little-endian
                let addr_lo = self.memory.read(self.pc.wrapping_add(1)) as u16;
                let addr_hi = self.memory.read(self.pc.wrapping_add(2)) as u16;
                self.memory.read((addr_hi << 8) | addr_lo)
            }
            AddressingMode::Implied | AddressingMode::Relative => {
                panic!("addressing mode {mode:?} produces no operand value")
            }
        }
    }

    /// Gets the effective address for an instruction based on its
    /// addressing mode.
    ///
    /// Used by store instructions and JMP/JSR, which act on an address
    /// rather than a value.
    pub(crate) fn effective_address(&self, mode: AddressingMode) -> u16 {
        match mode {
            AddressingMode::ZeroPage => self.memory.read(self.pc.wrapping_add(1)) as u16,
            AddressingMode::Absolute => {
                let addr_lo = self.memory.read(self.pc.wrapping_add(1)) as u16;
                let addr_hi = self.memory.read(self.pc.wrapping_add(2)) as u16;
                (addr_hi << 8) | addr_lo
            }
            AddressingMode::Implied | AddressingMode::Immediate | AddressingMode::Relative => {
                panic!("addressing mode {mode:?} produces no effective address")
            }
        }
    }
}
