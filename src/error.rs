// Crate-wide error type for the fallible boundary: loading a ROM.
//
// Once a cartridge is loaded, the running core has no fallible operations —
// out-of-range reads return 0 and writes to read-only regions are ignored,
// matching hardware. Nothing past `load_rom` returns a `Result`.

use thiserror::Error;

use crate::cartridge::{INesError, MapperError};

#[derive(Debug, Error)]
pub enum EmulatorError {
    #[error("invalid iNES ROM: {0}")]
    InvalidRom(#[from] INesError),

    #[error(transparent)]
    UnsupportedMapper(#[from] MapperError),

    #[error("unsupported mirroring mode")]
    UnsupportedMirroring,

    #[error("failed to read ROM file: {0}")]
    Io(#[from] std::io::Error),
}
