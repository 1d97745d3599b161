//! # Two-Pass Assembler
//!
//! Converts assembly language source code into binary machine code.
//!
//! ## Source syntax
//!
//! - Comments begin with `;` and run to end of line
//! - Hex literals use `$` for addresses and `#$` for immediates (no
//!   decimal form)
//! - A line ending in `:` defines a label; label references appear as the
//!   bare identifier as operand to `JMP`, `JSR`, or a branch mnemonic
//!
//! ## Two passes
//!
//! Pass 1 walks the lines assigning addresses (starting at
//! [`PROGRAM_START`](crate::PROGRAM_START)) and records each label in the
//! symbol table. Pass 2 walks them again, resolving labels and emitting
//! bytes. An operand that cannot be classified fails pass 1 rather than
//! guessing a size, so label addresses can never silently misalign.
//!
//! Both passes derive encodings by scanning
//! [`OPCODE_TABLE`](crate::OPCODE_TABLE), the same table the CPU decodes
//! from.
//!
//! # Examples
//!
//! ```
//! use sim6502::assembler::assemble;
//!
//! let output = assemble("LDA #$48\nSTA $0200\nBRK").unwrap();
//! assert_eq!(output.origin, 0x0600);
//! assert_eq!(output.bytes, vec![0xA9, 0x48, 0x8D, 0x00, 0x02, 0x00]);
//! ```

pub mod encoder;
pub mod parser;
pub mod symbol_table;

use crate::cpu::PROGRAM_START;

// Addressing mode value range constants
const ZERO_PAGE_MAX: u16 = 0xFF;
const BRANCH_OFFSET_MIN: i32 = -128;
const BRANCH_OFFSET_MAX: i32 = 127;
const BRANCH_INSTRUCTION_SIZE: u16 = 2;

/// Complete output from assembling source code
#[derive(Debug, Clone)]
pub struct AssemblerOutput {
    /// Assembled machine code bytes
    pub bytes: Vec<u8>,

    /// Address the program is assembled for; the loader copies `bytes`
    /// here and points PC at it
    pub origin: u16,

    /// Symbol table with all defined labels
    pub symbols: Vec<Symbol>,
}

impl AssemblerOutput {
    /// Look up a symbol by name
    pub fn lookup_symbol(&self, name: &str) -> Option<&Symbol> {
        self.symbols.iter().find(|s| s.name == name)
    }

    /// Get a symbol's address by name
    ///
    /// # Examples
    ///
    /// ```
    /// use sim6502::assembler::assemble;
    ///
    /// let output = assemble("start:\nLDA #$42").unwrap();
    /// assert_eq!(output.lookup_symbol_addr("start"), Some(0x0600));
    /// ```
    pub fn lookup_symbol_addr(&self, name: &str) -> Option<u16> {
        self.lookup_symbol(name).map(|symbol| symbol.address)
    }
}

/// A symbol table entry mapping a label name to its address
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Symbol {
    /// Label name as written in the source
    pub name: String,

    /// Memory address the label resolves to
    pub address: u16,

    /// Source line where the label was defined (1-indexed)
    pub defined_at: usize,
}

/// Classification of assembly errors
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorKind {
    /// Mnemonic not in the opcode table
    UnknownInstruction,

    /// Mnemonic does not support the operand's implied addressing mode
    /// (e.g., `STA #$42`)
    InvalidMode,

    /// Operand parses to none of the recognized forms
    InvalidOperand,

    /// Computed relative branch offset outside -128..=127
    BranchRange,

    /// Label defined more than once
    DuplicateLabel,

    /// Label referenced but never defined
    UndefinedLabel,

    /// Label name is malformed (must start with a letter; letters, digits
    /// and underscores only)
    InvalidLabel,
}

impl ErrorKind {
    fn describe(self) -> &'static str {
        match self {
            ErrorKind::UnknownInstruction => "unknown instruction",
            ErrorKind::InvalidMode => "invalid addressing mode",
            ErrorKind::InvalidOperand => "invalid operand",
            ErrorKind::BranchRange => "branch out of range",
            ErrorKind::DuplicateLabel => "duplicate label",
            ErrorKind::UndefinedLabel => "undefined label",
            ErrorKind::InvalidLabel => "invalid label",
        }
    }
}

/// An error encountered during assembly.
///
/// Assembly errors are fatal to the current assembly; no bytes are
/// produced and nothing is loaded.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AssemblerError {
    /// Error type classification
    pub kind: ErrorKind,

    /// Source line where the error occurred (1-indexed)
    pub line: usize,

    /// Human-readable error message naming the offending mnemonic or
    /// operand
    pub message: String,
}

impl AssemblerError {
    pub(crate) fn new(kind: ErrorKind, line: usize, message: impl Into<String>) -> Self {
        Self {
            kind,
            line,
            message: message.into(),
        }
    }
}

impl std::fmt::Display for AssemblerError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "line {}: {}: {}",
            self.line,
            self.kind.describe(),
            self.message
        )
    }
}

impl std::error::Error for AssemblerError {}

/// Helper to detect if a mnemonic is a branch instruction
pub(crate) fn is_branch_mnemonic(mnemonic: &str) -> bool {
    matches!(
        mnemonic,
        "BCC" | "BCS" | "BEQ" | "BMI" | "BNE" | "BPL" | "BVC" | "BVS"
    )
}

/// Validate a label name.
///
/// Labels must start with a letter and contain only alphanumeric
/// characters and underscores.
pub fn validate_label(name: &str) -> Result<(), String> {
    let mut chars = name.chars();

    match chars.next() {
        None => return Err("label name cannot be empty".to_string()),
        Some(first) if !first.is_ascii_alphabetic() => {
            return Err(format!("label must start with a letter, not '{first}'"));
        }
        Some(_) => {}
    }

    for ch in chars {
        if !ch.is_ascii_alphanumeric() && ch != '_' {
            return Err(format!(
                "label contains invalid character '{ch}' (only letters, digits, and underscores allowed)"
            ));
        }
    }

    Ok(())
}

/// Assemble source code into machine code.
///
/// # Arguments
///
/// * `source` - The assembly source code text
///
/// # Returns
///
/// `Ok(AssemblerOutput)` on success, `Err(AssemblerError)` on the first
/// error. Deterministic; performs no I/O.
///
/// # Examples
///
/// ```
/// use sim6502::assembler::{assemble, ErrorKind};
///
/// // Stores have no immediate form
/// let err = assemble("STA #$42").unwrap_err();
/// assert_eq!(err.kind, ErrorKind::InvalidMode);
/// ```
pub fn assemble(source: &str) -> Result<AssemblerOutput, AssemblerError> {
    let lines: Vec<parser::AssemblyLine> = source
        .lines()
        .enumerate()
        .filter_map(|(idx, raw)| parser::parse_line(raw, idx + 1))
        .collect();

    // Pass 1: assign addresses and build the symbol table
    let mut symbols = symbol_table::SymbolTable::new();
    let mut current_address = PROGRAM_START;

    for line in &lines {
        if let Some(ref label) = line.label {
            validate_label(label)
                .map_err(|msg| AssemblerError::new(ErrorKind::InvalidLabel, line.line_number, msg))?;

            if let Err(existing) =
                symbols.add_symbol(label.clone(), current_address, line.line_number)
            {
                return Err(AssemblerError::new(
                    ErrorKind::DuplicateLabel,
                    line.line_number,
                    format!(
                        "duplicate label '{}' (previously defined at line {})",
                        label, existing.defined_at
                    ),
                ));
            }
            continue;
        }

        // Instruction lines always carry a mnemonic
        let mnemonic = line.mnemonic.as_deref().unwrap_or_default();
        let size = encoder::instruction_size(mnemonic, line.operand.as_deref())
            .map_err(|mut e| {
                e.line = line.line_number;
                e
            })?;
        current_address = current_address.wrapping_add(size as u16);
    }

    // Pass 2: resolve labels and emit bytes
    let mut bytes = Vec::new();
    let mut current_address = PROGRAM_START;

    for line in &lines {
        if line.label.is_some() {
            continue;
        }

        let mnemonic = line.mnemonic.as_deref().unwrap_or_default();
        let encoded = encoder::encode_instruction(
            mnemonic,
            line.operand.as_deref(),
            &symbols,
            current_address,
        )
        .map_err(|mut e| {
            e.line = line.line_number;
            e
        })?;

        current_address = current_address.wrapping_add(encoded.len() as u16);
        bytes.extend(encoded);
    }

    Ok(AssemblerOutput {
        bytes,
        origin: PROGRAM_START,
        symbols: symbols.into_symbols(),
    })
}
