use thiserror::Error;

/// Fatal machine faults. None of these are recoverable; the host should
/// drop the interpreter and start again with a fresh one.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum Chip8Error {
    /// program image doesn't fit between 0x200 and the end of RAM
    #[error("ROM is {0} bytes; at most 3584 fit above 0x200")]
    RomTooLarge(usize),

    /// fetched a word that decodes to none of the 35 instructions
    #[error("unknown opcode {0:#06x}")]
    UnknownOpcode(u16),

    /// more than 16 nested subroutine calls
    #[error("call stack overflow at {0:#05x}")]
    StackOverflow(u16),

    /// subroutine return with no call outstanding
    #[error("call stack underflow at {0:#05x}")]
    StackUnderflow(u16),
}
