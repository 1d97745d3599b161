//! Line parsing for assembly source
//!
//! The grammar is line-oriented: each source line is at most one label
//! definition or one instruction. This module strips comments, classifies
//! lines, and classifies operand text into the recognized forms. It never
//! resolves labels or computes addresses; that is the assembler driver's
//! job.

/// A parsed source line: either a label definition or an instruction.
///
/// Exactly one of `label` and `mnemonic` is `Some`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AssemblyLine {
    /// Label name, for lines of the form `name:`
    pub label: Option<String>,

    /// Instruction mnemonic, upper-cased
    pub mnemonic: Option<String>,

    /// Operand text, trimmed and whitespace-normalized; `None` for implied
    /// instructions
    pub operand: Option<String>,

    /// Source line number (1-indexed)
    pub line_number: usize,
}

/// The syntactic forms an operand can take.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum OperandForm {
    /// `#$hh` - 8-bit immediate value
    Immediate(u8),

    /// `$hh` / `$hhhh` - zero-page or absolute address
    Address(u16),

    /// Bare identifier referencing a label
    LabelRef(String),
}

/// Parse one source line.
///
/// Strips the comment (everything from the first `;`), trims whitespace,
/// and classifies what remains. Returns `None` for lines that are empty
/// after stripping.
///
/// # Examples
///
/// ```
/// use sim6502::assembler::parser::parse_line;
///
/// let line = parse_line("  lda #$42 ; load a", 3).unwrap();
/// assert_eq!(line.mnemonic.as_deref(), Some("LDA"));
/// assert_eq!(line.operand.as_deref(), Some("#$42"));
/// assert_eq!(line.line_number, 3);
///
/// let label = parse_line("loop:", 4).unwrap();
/// assert_eq!(label.label.as_deref(), Some("loop"));
///
/// assert!(parse_line("; whole-line comment", 5).is_none());
/// ```
pub fn parse_line(raw: &str, line_number: usize) -> Option<AssemblyLine> {
    let text = match raw.find(';') {
        Some(idx) => &raw[..idx],
        None => raw,
    };
    let text = text.trim();

    if text.is_empty() {
        return None;
    }

    if let Some(name) = text.strip_suffix(':') {
        return Some(AssemblyLine {
            label: Some(name.trim().to_string()),
            mnemonic: None,
            operand: None,
            line_number,
        });
    }

    let mut tokens = text.split_whitespace();
    let mnemonic = tokens.next()?.to_uppercase();
    let operand = tokens.collect::<Vec<_>>().join(" ");

    Some(AssemblyLine {
        label: None,
        mnemonic: Some(mnemonic),
        operand: if operand.is_empty() {
            None
        } else {
            Some(operand)
        },
        line_number,
    })
}

/// Classify operand text into one of the recognized forms.
///
/// Recognized forms are `#$hh` (immediate), `$hh…` (address), and a bare
/// identifier (label reference). Hex digits only; there is no decimal
/// literal form.
pub fn classify_operand(operand: &str) -> Result<OperandForm, String> {
    if let Some(digits) = operand.strip_prefix("#$") {
        let value = parse_hex(digits)?;
        if value > 0xFF {
            return Err(format!(
                "immediate value ${value:04X} exceeds 8-bit range (max $FF)"
            ));
        }
        return Ok(OperandForm::Immediate(value as u8));
    }

    if let Some(digits) = operand.strip_prefix('$') {
        return Ok(OperandForm::Address(parse_hex(digits)?));
    }

    if crate::assembler::validate_label(operand).is_ok() {
        return Ok(OperandForm::LabelRef(operand.to_string()));
    }

    Err(format!("unrecognized operand '{operand}'"))
}

/// Parse a hex digit string into a 16-bit value.
fn parse_hex(digits: &str) -> Result<u16, String> {
    if digits.is_empty() {
        return Err("expected hex digits after '$'".to_string());
    }
    u16::from_str_radix(digits, 16)
        .map_err(|_| format!("invalid hex number '${digits}' (expected $00-$FFFF)"))
}
