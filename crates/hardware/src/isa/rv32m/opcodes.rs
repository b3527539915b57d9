//! RISC-V Multiply/Divide Extension (M) Opcodes.

/// M-Extension selector in the funct7 field of an `OP_REG` instruction.
pub const M_EXTENSION: u32 = 0b0000001;
