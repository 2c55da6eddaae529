// Bus module - Memory bus implementation
//
// This module implements the main memory bus that connects the CPU to all memory-mapped
// components in the NES system. It handles address routing, memory mirroring, OAM DMA,
// and owns every device reachable from CPU address space.
//
// # NES Memory Map (CPU Address Space)
//
// ```text
// $0000-$07FF: 2KB Internal RAM
// $0800-$1FFF: Mirrors of RAM (3 times)
// $2000-$2007: PPU Registers
// $2008-$3FFF: Mirrors of PPU Registers (repeating every 8 bytes)
// $4000-$4017: APU and I/O Registers
// $4018-$401F: APU and I/O test functionality (usually disabled)
// $4020-$5FFF: Expansion area (unused by mappers 0 and 1)
// $6000-$FFFF: Cartridge space (PRG-RAM, PRG-ROM, and mapper registers)
// ```

use std::cell::RefCell;
use std::rc::Rc;

use crate::apu::Apu;
use crate::cartridge::Mapper;
use crate::input::{Controller, ControllerIO};
use crate::ppu::Ppu;
use crate::ram::Ram;

/// Trait for memory-mapped components
///
/// This trait defines the interface for components that can be mapped into the
/// CPU's address space. Reads take `&mut self` because several registers have
/// read side effects (PPUSTATUS clears VBlank, PPUDATA advances the VRAM
/// address, the controller shift registers advance their bit index).
pub trait MemoryMappedDevice {
    /// Read a byte from the device
    fn read(&mut self, addr: u16) -> u8;

    /// Write a byte to the device
    fn write(&mut self, addr: u16, data: u8);
}

/// Main memory bus structure
///
/// The Bus connects the CPU to every other component in the NES system: internal
/// RAM, the PPU, the APU, the two controller ports, and the cartridge mapper. It
/// is the only thing the CPU ever talks to; all MMIO side effects happen here.
pub struct Bus {
    /// Internal RAM: 2KB, mirrored through $0000-$1FFF.
    ram: Ram,

    /// Picture Processing Unit.
    ppu: Ppu,

    /// Audio Processing Unit.
    apu: Apu,

    /// Controller ports ($4016/$4017 read side).
    controller_io: ControllerIO,

    /// Cartridge mapper. Shared with the PPU so both CPU and PPU address
    /// space can reach CHR and PRG banking through the same mapper instance.
    mapper: Option<Rc<RefCell<Box<dyn Mapper>>>>,
}

impl Bus {
    /// Create a new bus instance with zero-initialized RAM and no cartridge attached.
    pub fn new() -> Self {
        Bus {
            ram: Ram::with_zeros(),
            ppu: Ppu::new(),
            apu: Apu::new(),
            controller_io: ControllerIO::new(),
            mapper: None,
        }
    }

    /// Attach a cartridge's mapper to the bus and PPU.
    ///
    /// Also pushes the mapper's mirroring mode into the PPU, since nametable
    /// mirroring is a cartridge property (MMC1 can change it at runtime).
    pub fn attach_mapper(&mut self, mapper: Box<dyn Mapper>) {
        let mirroring = mapper.mirroring();
        let shared = Rc::new(RefCell::new(mapper));
        self.ppu.set_mirroring(mirroring);
        self.ppu.set_mapper(Rc::clone(&shared));
        self.mapper = Some(shared);
    }

    /// Reset RAM, PPU, APU and controller state to power-on values, leaving
    /// the attached mapper untouched (mirrors a console reset, not a power cycle).
    pub fn reset(&mut self) {
        self.ram.reset();
        self.ppu.reset();
        self.apu.reset();
        self.controller_io.reset();
    }

    /// Reference to the PPU, for frame output and debug tooling.
    pub fn ppu(&self) -> &Ppu {
        &self.ppu
    }

    /// Mutable reference to the PPU.
    pub fn ppu_mut(&mut self) -> &mut Ppu {
        &mut self.ppu
    }

    /// Reference to the APU, for audio sample draining.
    pub fn apu(&self) -> &Apu {
        &self.apu
    }

    /// Mutable reference to the APU.
    pub fn apu_mut(&mut self) -> &mut Apu {
        &mut self.apu
    }

    /// Set controller 1's button state, as read from the host's input layer.
    pub fn set_controller1(&mut self, controller: Controller) {
        self.controller_io.set_controller1(controller);
    }

    /// Set controller 2's button state, as read from the host's input layer.
    pub fn set_controller2(&mut self, controller: Controller) {
        self.controller_io.set_controller2(controller);
    }

    /// Read a byte from the bus
    ///
    /// Routes the read operation to the appropriate memory region or device
    /// based on the address. Handles mirroring for RAM and PPU registers.
    pub fn read(&mut self, addr: u16) -> u8 {
        match addr {
            // Internal RAM: $0000-$07FF (2KB), mirrored through $1FFF.
            0x0000..=0x1FFF => self.ram.read(addr),

            // PPU Registers: $2000-$2007, mirrored every 8 bytes through $3FFF.
            0x2000..=0x3FFF => self.ppu.read(addr),

            // APU channel registers and status; frame counter and OAMDMA are write-only.
            0x4000..=0x4013 | 0x4015 => self.apu.read(addr),

            // $4014: OAM DMA trigger, write-only.
            0x4014 => 0,

            // $4016: Controller 1 data.
            0x4016 => self.controller_io.read(addr),

            // $4017: Controller 2 data on read (the APU frame counter shares
            // this address but is write-only).
            0x4017 => self.controller_io.read(addr),

            // APU/IO test mode: $4018-$401F, disabled on retail hardware.
            0x4018..=0x401F => 0,

            // Expansion area, unused by mappers 0 and 1.
            0x4020..=0x5FFF => 0,

            // Cartridge space: PRG-RAM/PRG-ROM via the mapper.
            0x6000..=0xFFFF => self
                .mapper
                .as_ref()
                .map(|mapper| mapper.borrow().cpu_read(addr))
                .unwrap_or(0),
        }
    }

    /// Write a byte to the bus
    ///
    /// Routes the write operation to the appropriate memory region or device
    /// based on the address. Handles mirroring for RAM and PPU registers.
    pub fn write(&mut self, addr: u16, data: u8) {
        match addr {
            0x0000..=0x1FFF => self.ram.write(addr, data),

            0x2000..=0x3FFF => self.ppu.write(addr, data),

            0x4000..=0x4013 | 0x4015 | 0x4017 => self.apu.write(addr, data),

            // $4014: OAM DMA - copy 256 bytes from page (data << 8) into PPU OAM.
            0x4014 => self.oam_dma(data),

            0x4016 => self.controller_io.write(addr, data),

            0x4018..=0x401F => {}

            0x4020..=0x5FFF => {}

            0x6000..=0xFFFF => {
                if let Some(mapper) = &self.mapper {
                    mapper.borrow_mut().cpu_write(addr, data);
                }
            }
        }
    }

    /// Perform OAM DMA: copy 256 bytes starting at `page << 8` into OAM,
    /// starting at the PPU's current OAM address and wrapping.
    ///
    /// Bus time for this transfer is ignored at this emulator's granularity
    /// (real hardware stalls the CPU for 513 or 514 cycles).
    fn oam_dma(&mut self, page: u8) {
        let base = (page as u16) << 8;
        let start = self.ppu.oam_addr;
        for i in 0..256u16 {
            let byte = self.read(base + i);
            let oam_addr = start.wrapping_add(i as u8);
            self.ppu.write_oam(oam_addr, byte);
        }
    }

    /// Read a 16-bit word from the bus (little-endian)
    pub fn read_u16(&mut self, addr: u16) -> u16 {
        let lo = self.read(addr) as u16;
        let hi = self.read(addr.wrapping_add(1)) as u16;
        (hi << 8) | lo
    }

    /// Write a 16-bit word to the bus (little-endian)
    pub fn write_u16(&mut self, addr: u16, data: u16) {
        let lo = (data & 0xFF) as u8;
        let hi = (data >> 8) as u8;
        self.write(addr, lo);
        self.write(addr.wrapping_add(1), hi);
    }
}

impl Default for Bus {
    fn default() -> Self {
        Self::new()
    }
}
