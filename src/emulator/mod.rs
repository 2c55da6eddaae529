// Emulator module - Main emulator coordinator
//
// Coordinates the CPU, PPU, APU and Bus into a single stepping surface:
// load a ROM, advance one rendered frame at a time, feed in controller
// input, and pull out rendered audio samples.

mod config;

pub use config::{EmulatorConfig, SpeedMode};

use crate::bus::Bus;
use crate::cartridge::{create_mapper, Cartridge};
use crate::cpu::Cpu;
use crate::input::Controller;
use std::path::{Path, PathBuf};

/// CPU cycles the PPU runs ahead by, per NTSC timing (3 PPU dots per CPU cycle).
const PPU_DOTS_PER_CPU_CYCLE: u32 = 3;

/// Main emulator structure
///
/// Coordinates all NES components and provides the stepping surface used
/// by a host loop: load a cartridge, run to the next rendered frame, push
/// controller state in, pull rendered audio samples out.
pub struct Emulator {
    /// CPU (6502 processor)
    cpu: Cpu,

    /// Bus (connects all components)
    bus: Bus,

    /// Currently loaded cartridge, kept for inspection (header, mirroring).
    cartridge: Option<Cartridge>,

    /// Configuration
    config: EmulatorConfig,

    /// Currently loaded ROM path
    rom_path: Option<PathBuf>,

    /// Paused state
    paused: bool,

    /// Speed mode
    speed_mode: SpeedMode,
}

impl Emulator {
    /// Create a new emulator instance
    ///
    /// Initializes all components to their power-on state. No cartridge is
    /// attached until [`Emulator::load_rom`] is called.
    ///
    /// # Example
    ///
    /// ```
    /// use nes_rs::emulator::Emulator;
    ///
    /// let mut emulator = Emulator::new();
    /// ```
    pub fn new() -> Self {
        Emulator {
            cpu: Cpu::new(),
            bus: Bus::new(),
            cartridge: None,
            config: EmulatorConfig::load_or_default(),
            rom_path: None,
            paused: false,
            speed_mode: SpeedMode::Normal,
        }
    }

    /// Load a ROM file
    ///
    /// Parses the iNES image, builds the mapper for its declared mapper
    /// number, attaches it to the bus, and resets the CPU/PPU/APU to their
    /// power-on state.
    ///
    /// # Arguments
    ///
    /// * `path` - Path to the ROM file (.nes)
    ///
    /// # Example
    ///
    /// ```no_run
    /// use nes_rs::emulator::Emulator;
    ///
    /// let mut emulator = Emulator::new();
    /// emulator.load_rom("game.nes").expect("Failed to load ROM");
    /// ```
    pub fn load_rom<P: AsRef<Path>>(&mut self, path: P) -> Result<(), crate::EmulatorError> {
        let path = path.as_ref();
        let cartridge = Cartridge::from_ines_file(path)?;
        self.attach_cartridge(cartridge)?;
        self.rom_path = Some(path.to_path_buf());
        Ok(())
    }

    /// Load a ROM already read into memory
    ///
    /// The in-memory counterpart to [`Emulator::load_rom`]: parses an iNES
    /// image held in `bytes`, builds its mapper, and resets the machine to
    /// power-on state. Leaves [`Emulator::rom_path`] unset since no file was
    /// involved.
    ///
    /// # Example
    ///
    /// ```no_run
    /// use nes_rs::emulator::Emulator;
    ///
    /// let rom_bytes = std::fs::read("game.nes").unwrap();
    /// let mut emulator = Emulator::new();
    /// emulator.load_rom_bytes(&rom_bytes).expect("Failed to load ROM");
    /// ```
    pub fn load_rom_bytes(&mut self, bytes: &[u8]) -> Result<(), crate::EmulatorError> {
        let cartridge = Cartridge::from_ines_bytes(bytes)?;
        self.attach_cartridge(cartridge)?;
        self.rom_path = None;
        Ok(())
    }

    fn attach_cartridge(&mut self, cartridge: Cartridge) -> Result<(), crate::EmulatorError> {
        let mapper = create_mapper(cartridge.clone())?;
        self.bus.attach_mapper(mapper);
        self.cartridge = Some(cartridge);
        self.reset();
        Ok(())
    }

    /// Reset the emulator
    ///
    /// Resets all components to their power-on state, as if pressing the
    /// reset button.
    ///
    /// # Example
    ///
    /// ```
    /// use nes_rs::emulator::Emulator;
    ///
    /// let mut emulator = Emulator::new();
    /// emulator.reset();
    /// ```
    pub fn reset(&mut self) {
        self.bus.reset();
        self.cpu.reset(&mut self.bus);
        self.paused = false;
    }

    /// Run the emulator until the next rendered frame is complete
    ///
    /// Steps the CPU one instruction at a time, advancing the PPU three
    /// dots and the APU one cycle per CPU cycle consumed, dispatching NMI
    /// and IRQ between instructions, until the PPU reports a completed
    /// frame.
    ///
    /// # Returns
    ///
    /// The rendered frame buffer, 256x240 RGBA pixels.
    pub fn tick_to_frame(&mut self) -> &[u8] {
        loop {
            let cpu_cycles = self.cpu.step(&mut self.bus);

            let mut frame_ready = false;
            for _ in 0..cpu_cycles {
                for _ in 0..PPU_DOTS_PER_CPU_CYCLE {
                    if self.bus.ppu_mut().step() {
                        frame_ready = true;
                    }
                }
                if self.bus.apu_mut().clock() {
                    self.cpu.irq(&mut self.bus);
                }
            }

            if self.bus.ppu_mut().nmi_pending() {
                self.bus.ppu_mut().clear_nmi();
                self.cpu.nmi(&mut self.bus);
            }

            if frame_ready {
                break;
            }
        }

        self.bus.ppu().frame()
    }

    /// Set the button state for a controller
    ///
    /// # Arguments
    ///
    /// * `player_index` - 0 for controller 1, 1 for controller 2
    /// * `mask` - Button bitmask, bit 7 = A, bit 6 = B, bit 5 = Select,
    ///   bit 4 = Start, bit 3 = Up, bit 2 = Down, bit 1 = Left, bit 0 = Right.
    pub fn set_buttons(&mut self, player_index: u8, mask: u8) {
        let mut controller = Controller::new();
        controller.button_a = mask & 0x80 != 0;
        controller.button_b = mask & 0x40 != 0;
        controller.select = mask & 0x20 != 0;
        controller.start = mask & 0x10 != 0;
        controller.up = mask & 0x08 != 0;
        controller.down = mask & 0x04 != 0;
        controller.left = mask & 0x02 != 0;
        controller.right = mask & 0x01 != 0;

        match player_index {
            0 => self.bus.set_controller1(controller),
            _ => self.bus.set_controller2(controller),
        }
    }

    /// Pull rendered audio samples out of the APU's sample buffer
    ///
    /// Fills `buf` with as many queued samples as are available, padding
    /// the remainder with silence (0x80, the midpoint of an unsigned byte
    /// waveform).
    ///
    /// # Returns
    ///
    /// The number of samples actually drained from the buffer.
    pub fn audio_pull(&mut self, buf: &mut [u8]) -> usize {
        self.bus.apu_mut().audio_pull(buf)
    }

    /// Set speed mode
    ///
    /// Controls emulation speed (normal, fast forward, slow motion). This
    /// is a host-loop hint: it does not change how many cycles
    /// [`Emulator::tick_to_frame`] advances per call, only how often a host
    /// should call it.
    ///
    /// # Example
    ///
    /// ```
    /// use nes_rs::emulator::{Emulator, SpeedMode};
    ///
    /// let mut emulator = Emulator::new();
    /// emulator.set_speed_mode(SpeedMode::FastForward2x);
    /// ```
    pub fn set_speed_mode(&mut self, mode: SpeedMode) {
        self.speed_mode = mode;
    }

    /// Get current speed mode
    pub fn speed_mode(&self) -> SpeedMode {
        self.speed_mode
    }

    /// Pause the emulator
    pub fn pause(&mut self) {
        self.paused = true;
    }

    /// Resume the emulator
    pub fn resume(&mut self) {
        self.paused = false;
    }

    /// Toggle pause state
    pub fn toggle_pause(&mut self) {
        self.paused = !self.paused;
    }

    /// Check if emulator is paused
    pub fn is_paused(&self) -> bool {
        self.paused
    }

    /// Get reference to CPU
    pub fn cpu(&self) -> &Cpu {
        &self.cpu
    }

    /// Get mutable reference to CPU
    pub fn cpu_mut(&mut self) -> &mut Cpu {
        &mut self.cpu
    }

    /// Get reference to Bus
    pub fn bus(&self) -> &Bus {
        &self.bus
    }

    /// Get mutable reference to Bus
    pub fn bus_mut(&mut self) -> &mut Bus {
        &mut self.bus
    }

    /// Get reference to configuration
    pub fn config(&self) -> &EmulatorConfig {
        &self.config
    }

    /// Get mutable reference to configuration
    pub fn config_mut(&mut self) -> &mut EmulatorConfig {
        &mut self.config
    }

    /// Get the currently loaded ROM path
    pub fn rom_path(&self) -> Option<&Path> {
        self.rom_path.as_deref()
    }

    /// Get the currently loaded cartridge, if any
    pub fn cartridge(&self) -> Option<&Cartridge> {
        self.cartridge.as_ref()
    }
}

impl Default for Emulator {
    fn default() -> Self {
        Self::new()
    }
}
