//! Instruction encoder for the assembler
//!
//! Encodes parsed instructions into their binary representation by
//! scanning [`OPCODE_TABLE`](crate::OPCODE_TABLE). The table is the single
//! source of truth: every encoding the assembler emits is an encoding the
//! CPU decodes, byte for byte.

use crate::assembler::parser::{classify_operand, OperandForm};
use crate::assembler::symbol_table::SymbolTable;
use crate::assembler::{
    is_branch_mnemonic, AssemblerError, ErrorKind, BRANCH_INSTRUCTION_SIZE, BRANCH_OFFSET_MAX,
    BRANCH_OFFSET_MIN, ZERO_PAGE_MAX,
};
use crate::{AddressingMode, OPCODE_TABLE};

/// Find the opcode byte for a (mnemonic, addressing mode) pair.
///
/// # Examples
///
/// ```
/// use sim6502::assembler::encoder::find_opcode;
/// use sim6502::AddressingMode;
///
/// assert_eq!(find_opcode("LDA", AddressingMode::Immediate), Some(0xA9));
/// assert_eq!(find_opcode("STA", AddressingMode::Immediate), None);
/// ```
pub fn find_opcode(mnemonic: &str, mode: AddressingMode) -> Option<u8> {
    OPCODE_TABLE
        .iter()
        .position(|meta| {
            meta.is_legal() && meta.mnemonic == mnemonic && meta.addressing_mode == mode
        })
        .map(|opcode| opcode as u8)
}

/// True if the mnemonic exists in the opcode table in any addressing mode.
pub fn mnemonic_exists(mnemonic: &str) -> bool {
    OPCODE_TABLE
        .iter()
        .any(|meta| meta.is_legal() && meta.mnemonic == mnemonic)
}

/// Compute the encoded size of an instruction without resolving labels.
///
/// Used by pass 1 to assign addresses. Label references contribute 3
/// bytes for `JMP`/`JSR` and 2 for branches; a label operand on any other
/// mnemonic, or an operand that cannot be classified at all, is an error
/// here rather than a misaligned guess.
pub fn instruction_size(mnemonic: &str, operand: Option<&str>) -> Result<u8, AssemblerError> {
    if !mnemonic_exists(mnemonic) {
        return Err(AssemblerError::new(
            ErrorKind::UnknownInstruction,
            0,
            format!("unknown instruction '{mnemonic}'"),
        ));
    }

    let operand = match operand {
        None => return Ok(1),
        Some(text) => text,
    };

    let form = classify_operand(operand)
        .map_err(|msg| AssemblerError::new(ErrorKind::InvalidOperand, 0, msg))?;

    match form {
        OperandForm::Immediate(_) => Ok(2),
        OperandForm::Address(value) => {
            if is_branch_mnemonic(mnemonic) {
                Ok(2)
            } else if value <= ZERO_PAGE_MAX
                && find_opcode(mnemonic, AddressingMode::ZeroPage).is_some()
            {
                Ok(2)
            } else {
                Ok(3)
            }
        }
        OperandForm::LabelRef(_) => {
            if matches!(mnemonic, "JMP" | "JSR") {
                Ok(3)
            } else if is_branch_mnemonic(mnemonic) {
                Ok(2)
            } else {
                Err(AssemblerError::new(
                    ErrorKind::InvalidOperand,
                    0,
                    format!("'{mnemonic}' does not take a label operand"),
                ))
            }
        }
    }
}

/// Encode one instruction into bytes, resolving labels.
///
/// `current_address` is the address this instruction assembles to; branch
/// offsets are computed relative to the byte that follows the branch.
pub fn encode_instruction(
    mnemonic: &str,
    operand: Option<&str>,
    symbols: &SymbolTable,
    current_address: u16,
) -> Result<Vec<u8>, AssemblerError> {
    if !mnemonic_exists(mnemonic) {
        return Err(AssemblerError::new(
            ErrorKind::UnknownInstruction,
            0,
            format!("unknown instruction '{mnemonic}'"),
        ));
    }

    let operand = match operand {
        None => {
            let opcode = find_opcode(mnemonic, AddressingMode::Implied).ok_or_else(|| {
                AssemblerError::new(
                    ErrorKind::InvalidMode,
                    0,
                    format!("'{mnemonic}' requires an operand"),
                )
            })?;
            return Ok(vec![opcode]);
        }
        Some(text) => text,
    };

    let form = classify_operand(operand)
        .map_err(|msg| AssemblerError::new(ErrorKind::InvalidOperand, 0, msg))?;

    match form {
        OperandForm::Immediate(value) => {
            let opcode = find_opcode(mnemonic, AddressingMode::Immediate).ok_or_else(|| {
                AssemblerError::new(
                    ErrorKind::InvalidMode,
                    0,
                    format!("'{mnemonic}' has no immediate form"),
                )
            })?;
            Ok(vec![opcode, value])
        }
        OperandForm::Address(value) => {
            // Branches take a target address and encode it relatively
            if is_branch_mnemonic(mnemonic) {
                encode_relative(mnemonic, operand, value, current_address)
            } else {
                encode_address(mnemonic, value)
            }
        }
        OperandForm::LabelRef(name) => {
            let symbol = symbols.lookup_symbol(&name).ok_or_else(|| {
                AssemblerError::new(
                    ErrorKind::UndefinedLabel,
                    0,
                    format!("undefined label '{name}'"),
                )
            })?;
            encode_label_ref(mnemonic, &name, symbol.address, current_address)
        }
    }
}

/// Encode a `$hhhh` address operand, preferring the zero-page form when
/// the value fits in 8 bits and the mnemonic has one.
fn encode_address(mnemonic: &str, value: u16) -> Result<Vec<u8>, AssemblerError> {
    if value <= ZERO_PAGE_MAX {
        if let Some(opcode) = find_opcode(mnemonic, AddressingMode::ZeroPage) {
            return Ok(vec![opcode, value as u8]);
        }
    }

    let opcode = find_opcode(mnemonic, AddressingMode::Absolute).ok_or_else(|| {
        AssemblerError::new(
            ErrorKind::InvalidMode,
            0,
            format!("'{mnemonic}' has no absolute form"),
        )
    })?;
    Ok(vec![opcode, (value & 0xFF) as u8, (value >> 8) as u8])
}

/// Encode a label reference: absolute for JMP/JSR, relative for branches.
fn encode_label_ref(
    mnemonic: &str,
    name: &str,
    target_address: u16,
    current_address: u16,
) -> Result<Vec<u8>, AssemblerError> {
    if matches!(mnemonic, "JMP" | "JSR") {
        // find_opcode cannot fail here; both have absolute forms
        let opcode = find_opcode(mnemonic, AddressingMode::Absolute).expect("JMP/JSR absolute");
        return Ok(vec![
            opcode,
            (target_address & 0xFF) as u8,
            (target_address >> 8) as u8,
        ]);
    }

    if is_branch_mnemonic(mnemonic) {
        return encode_relative(mnemonic, name, target_address, current_address);
    }

    Err(AssemblerError::new(
        ErrorKind::InvalidOperand,
        0,
        format!("'{mnemonic}' does not take a label operand"),
    ))
}

/// Encode a branch to `target_address` as a signed 8-bit offset.
///
/// `display` is the operand as written (label name or address literal),
/// used in the range error message.
fn encode_relative(
    mnemonic: &str,
    display: &str,
    target_address: u16,
    current_address: u16,
) -> Result<Vec<u8>, AssemblerError> {
    let opcode = find_opcode(mnemonic, AddressingMode::Relative).expect("branch relative");

    // Offset is measured from the byte after the branch instruction
    let next_instruction_address = current_address.wrapping_add(BRANCH_INSTRUCTION_SIZE);
    let offset = target_address as i32 - next_instruction_address as i32;

    if !(BRANCH_OFFSET_MIN..=BRANCH_OFFSET_MAX).contains(&offset) {
        return Err(AssemblerError::new(
            ErrorKind::BranchRange,
            0,
            format!(
                "branch to '{display}' is out of range (offset {offset}, expected {BRANCH_OFFSET_MIN} to {BRANCH_OFFSET_MAX})"
            ),
        ));
    }

    Ok(vec![opcode, (offset as i8) as u8])
}
