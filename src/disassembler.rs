//! # Disassembler
//!
//! Converts binary machine code back into assembly mnemonics by re-reading
//! [`OPCODE_TABLE`](crate::OPCODE_TABLE). Because the assembler derives its
//! encodings from the same table, disassembling assembler output and
//! re-assembling the rendered text reproduces the identical byte vector.

use crate::addressing::AddressingMode;
use crate::opcodes::OPCODE_TABLE;

/// A single disassembled instruction with full metadata
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Instruction {
    /// Memory address where this instruction starts
    pub address: u16,

    /// The opcode byte value
    pub opcode: u8,

    /// Instruction mnemonic (e.g., "LDA", "JMP"), or ".byte" for data
    /// that does not decode
    pub mnemonic: &'static str,

    /// Addressing mode used by this instruction
    pub addressing_mode: AddressingMode,

    /// Operand bytes (0-2 bytes depending on addressing mode)
    pub operand_bytes: Vec<u8>,

    /// Total size in bytes (opcode + operands)
    pub size_bytes: u8,
}

impl Instruction {
    /// Render this instruction as source text the assembler accepts.
    ///
    /// Branch targets are rendered as the resolved absolute address; the
    /// assembler re-encodes them relatively.
    ///
    /// # Examples
    ///
    /// ```
    /// use sim6502::disassembler::disassemble;
    ///
    /// let listing = disassemble(&[0xA9, 0x42, 0xD0, 0xFC], 0x0600);
    /// assert_eq!(listing[0].to_source(), "LDA #$42");
    /// assert_eq!(listing[1].to_source(), "BNE $0600");
    /// ```
    pub fn to_source(&self) -> String {
        if self.mnemonic == ".byte" {
            return format!(".byte ${:02X}", self.operand_bytes[0]);
        }

        match self.addressing_mode {
            AddressingMode::Implied => self.mnemonic.to_string(),
            AddressingMode::Immediate => {
                format!("{} #${:02X}", self.mnemonic, self.operand_bytes[0])
            }
            AddressingMode::ZeroPage => {
                format!("{} ${:02X}", self.mnemonic, self.operand_bytes[0])
            }
            AddressingMode::Absolute => {
                let addr =
                    ((self.operand_bytes[1] as u16) << 8) | self.operand_bytes[0] as u16;
                format!("{} ${:04X}", self.mnemonic, addr)
            }
            AddressingMode::Relative => {
                let offset = self.operand_bytes[0] as i8;
                let target = self
                    .address
                    .wrapping_add(self.size_bytes as u16)
                    .wrapping_add_signed(offset as i16);
                format!("{} ${:04X}", self.mnemonic, target)
            }
        }
    }
}

/// Decode one instruction from the front of `bytes`.
///
/// Returns `None` if the first byte is an illegal opcode or the slice is
/// too short to hold the instruction's operands.
pub fn decode_instruction(bytes: &[u8], address: u16) -> Option<Instruction> {
    let opcode = *bytes.first()?;
    let metadata = &OPCODE_TABLE[opcode as usize];

    if !metadata.is_legal() {
        return None;
    }

    let size = metadata.size_bytes as usize;
    if bytes.len() < size {
        return None;
    }

    Some(Instruction {
        address,
        opcode,
        mnemonic: metadata.mnemonic,
        addressing_mode: metadata.addressing_mode,
        operand_bytes: bytes[1..size].to_vec(),
        size_bytes: metadata.size_bytes,
    })
}

/// Disassemble a byte slice into a vector of instructions.
///
/// `start_address` is the address of the first byte; it determines the
/// `address` field of each instruction and the rendered branch targets.
/// Bytes that do not decode become one-byte `.byte` placeholders.
pub fn disassemble(bytes: &[u8], start_address: u16) -> Vec<Instruction> {
    let mut instructions = Vec::new();
    let mut pos = 0;
    let mut address = start_address;

    while pos < bytes.len() {
        match decode_instruction(&bytes[pos..], address) {
            Some(instr) => {
                pos += instr.size_bytes as usize;
                address = address.wrapping_add(instr.size_bytes as u16);
                instructions.push(instr);
            }
            None => {
                // Data or an illegal opcode; emit a placeholder
                instructions.push(Instruction {
                    address,
                    opcode: bytes[pos],
                    mnemonic: ".byte",
                    addressing_mode: AddressingMode::Implied,
                    operand_bytes: vec![bytes[pos]],
                    size_bytes: 1,
                });
                pos += 1;
                address = address.wrapping_add(1);
            }
        }
    }

    instructions
}
