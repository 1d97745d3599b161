//! # 6502 Emulator Core
//!
//! A headless 6502 emulator core: a two-pass symbolic assembler and a
//! cycle-counted interpreter executing against 64 KiB of flat memory.
//!
//! This crate provides the CPU state structures, a trait-based memory bus
//! abstraction, a table-driven opcode metadata system shared by the
//! assembler, interpreter and disassembler, and the assembler itself.
//!
//! ## Quick Start
//!
//! ```rust
//! use sim6502::{CPU, FlatMemory, MemoryBus};
//!
//! let mut cpu = CPU::new(FlatMemory::new());
//!
//! cpu.assemble_and_load(
//!     "LDA #$48\n\
//!      STA $0200\n\
//!      BRK",
//! )
//! .unwrap();
//!
//! cpu.run();
//!
//! assert_eq!(cpu.a(), 0x48);
//! assert_eq!(cpu.memory().read(0x0200), 0x48);
//! assert!(!cpu.running());
//! ```
//!
//! ## Architecture
//!
//! - **Modularity**: CPU state is separated from memory implementation via
//!   the `MemoryBus` trait
//! - **Determinism**: No I/O, no clocks; `step()` and `run()` execute to
//!   completion before returning, and `run()` is bounded by
//!   [`RUN_STEP_LIMIT`]
//! - **Table-Driven Design**: All opcode metadata in a single source of
//!   truth read by the CPU, assembler, and disassembler alike
//!
//! ## Modules
//!
//! - `cpu` - CPU state, lifecycle, and execution logic
//! - `memory` - MemoryBus trait and the flat 64 KiB implementation
//! - `opcodes` - Opcode metadata table
//! - `addressing` - Addressing mode enumeration
//! - `assembler` - Two-pass source-to-bytes translation
//! - `disassembler` - Bytes-to-source translation
//!
//! The core is strictly single-threaded; embed it behind external
//! synchronization if a host needs to share it across threads. Errors are
//! reported as structured values ([`assembler::AssemblerError`]) or, for
//! runtime halts, through the `log` facade plus the observable
//! `running`/`assembled` flags.

pub mod addressing;
pub mod assembler;
pub mod cpu;
pub mod disassembler;
pub mod memory;
pub mod opcodes;

// Internal instruction implementations (not part of public API)
mod instructions;

// Re-export public API
pub use addressing::AddressingMode;
pub use cpu::{CPU, PROGRAM_START, RUN_STEP_LIMIT, STACK_BASE};
pub use memory::{FlatMemory, MemoryBus};
pub use opcodes::{OpcodeMetadata, ILLEGAL_MNEMONIC, OPCODE_TABLE};
