// Mappers module - the mapper factory and individual mapper implementations.
//
// Each mapper owns the cartridge's PRG/CHR data and handles address decoding
// and banking for its own scheme. The factory here is the only place that
// knows the full set of supported mapper numbers.

mod mapper0;
mod mapper1;

use super::{Cartridge, Mapper};
use mapper0::Mapper0;
use mapper1::Mapper1;
use thiserror::Error;

/// Error constructing a mapper for a given cartridge.
#[derive(Debug, Error)]
pub enum MapperError {
    #[error("mapper {0} is not supported")]
    UnsupportedMapper(u8),
}

/// Create a mapper instance based on the mapper number in the cartridge.
///
/// Only iNES mappers 0 (NROM) and 1 (MMC1) are supported; any other mapper
/// number is rejected rather than guessed at.
pub fn create_mapper(cartridge: Cartridge) -> Result<Box<dyn Mapper>, MapperError> {
    match cartridge.mapper {
        0 => Ok(Box::new(Mapper0::new(cartridge))),
        1 => Ok(Box::new(Mapper1::new(cartridge))),
        mapper_num => Err(MapperError::UnsupportedMapper(mapper_num)),
    }
}
