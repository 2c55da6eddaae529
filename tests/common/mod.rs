// Common test utilities for ROM-based integration tests
//
// This module provides shared functionality for running and validating
// test ROMs across different test suites (CPU, PPU, APU, etc.)

#![allow(dead_code)]

use nes_rs::bus::Bus;
use nes_rs::cartridge::{create_mapper, Cartridge};
use nes_rs::cpu::Cpu;
use std::fs;
use std::path::Path;

/// Maximum number of frames to run a test ROM before timing out
pub const MAX_TEST_FRAMES: u32 = 600; // ~10 seconds at 60 FPS

/// Maximum number of CPU cycles to run before timing out
pub const MAX_TEST_CYCLES: u64 = 100_000_000; // 100 million cycles

/// Result of running a test ROM
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TestResult {
    /// Test passed
    Passed,
    /// Test failed with an error code
    Failed(u8),
    /// Test timed out
    Timeout,
    /// Test result unknown (could not determine pass/fail)
    Unknown,
}

/// Test ROM runner configuration
pub struct TestConfig {
    /// Maximum number of cycles to run
    pub max_cycles: u64,
    /// Starting PC address (None = use reset vector)
    pub start_pc: Option<u16>,
    /// Starting cycle count
    pub start_cycles: u64,
}

impl Default for TestConfig {
    fn default() -> Self {
        TestConfig {
            max_cycles: MAX_TEST_CYCLES,
            start_pc: None,
            start_cycles: 0,
        }
    }
}

/// Build a Bus with a cartridge loaded from an iNES file and its mapper attached.
///
/// # Arguments
///
/// * `rom_path` - Path to the .nes ROM file
pub fn bus_from_rom_file(rom_path: &Path) -> Result<Bus, String> {
    let bytes =
        fs::read(rom_path).map_err(|e| format!("Failed to load ROM from {}: {}", rom_path.display(), e))?;
    let cartridge =
        Cartridge::from_ines_bytes(&bytes).map_err(|e| format!("Invalid iNES ROM: {e}"))?;
    let mapper = create_mapper(cartridge).map_err(|e| format!("Unsupported mapper: {e}"))?;

    let mut bus = Bus::new();
    bus.attach_mapper(mapper);
    Ok(bus)
}

/// Check if a test ROM has completed by examining result registers
///
/// Blargg-style test ROMs write a status protocol starting at $6000:
/// - $6000: 0x80 while running, 0x81 requests a soft reset, any other value
///   means the test is done (0 = passed, non-zero = error code).
/// - $6001-$6003: magic bytes 0xDE, 0xB0, 0x61 confirming the protocol.
/// - $6004+: zero-terminated ASCII status message.
///
/// # Arguments
///
/// * `bus` - The bus to check
pub fn check_test_result(bus: &mut Bus) -> TestResult {
    let status = bus.read(0x6000);

    if status == 0x80 {
        return TestResult::Unknown;
    }

    if bus.read(0x6001) != 0xDE || bus.read(0x6002) != 0xB0 || bus.read(0x6003) != 0x61 {
        return TestResult::Unknown;
    }

    if status == 0 {
        TestResult::Passed
    } else {
        TestResult::Failed(status)
    }
}

/// Read null-terminated string from memory
///
/// # Arguments
///
/// * `bus` - The bus to read from
/// * `addr` - Starting address
/// * `max_len` - Maximum length to read
pub fn read_string(bus: &mut Bus, addr: u16, max_len: usize) -> String {
    let mut result = String::new();
    let mut current_addr = addr;

    for _ in 0..max_len {
        let byte = bus.read(current_addr);
        if byte == 0 {
            break;
        }
        if (0x20..=0x7E).contains(&byte) {
            result.push(byte as char);
        }
        current_addr = current_addr.wrapping_add(1);
    }

    result
}

/// Run a test ROM from a file path and return the result
///
/// # Arguments
///
/// * `rom_path` - Path to the ROM file
/// * `config` - Test configuration
pub fn run_test_rom(rom_path: &Path, config: &TestConfig) -> Result<TestResult, String> {
    let mut bus = bus_from_rom_file(rom_path)?;
    let mut cpu = Cpu::new();

    if let Some(pc) = config.start_pc {
        cpu.pc = pc;
    } else {
        let pc_low = bus.read(0xFFFC);
        let pc_high = bus.read(0xFFFD);
        cpu.pc = u16::from_le_bytes([pc_low, pc_high]);
    }

    cpu.cycles = config.start_cycles;

    let mut total_cycles = 0u64;

    while total_cycles < config.max_cycles {
        cpu.step(&mut bus);
        total_cycles = cpu.cycles;

        match check_test_result(&mut bus) {
            TestResult::Passed | TestResult::Failed(_) => {
                return Ok(check_test_result(&mut bus));
            }
            TestResult::Unknown => {}
            TestResult::Timeout => return Ok(TestResult::Timeout),
        }
    }

    Ok(TestResult::Timeout)
}

/// Run a Blargg-protocol test ROM to completion and report its outcome
///
/// Loads the ROM, runs the CPU from the reset vector until the $6000
/// status protocol reports completion (or the cycle budget is exhausted),
/// and returns whether the embedded message contains `PASSED`.
///
/// # Arguments
///
/// * `rom_path` - Path to the ROM file
/// * `max_cycles` - Maximum CPU cycles to run before timing out
///
/// # Returns
///
/// `(passed, message)` where `message` is the zero-terminated status text
/// at $6004, or an error if the ROM could not be loaded.
pub fn run_blargg_style_test(rom_path: &str, max_cycles: u64) -> Result<(bool, String), String> {
    let config = TestConfig {
        max_cycles,
        ..TestConfig::default()
    };

    let mut bus = bus_from_rom_file(Path::new(rom_path))?;
    let mut cpu = Cpu::new();
    cpu.reset(&mut bus);

    let mut total_cycles = 0u64;
    let result = loop {
        if total_cycles >= config.max_cycles {
            break TestResult::Timeout;
        }
        cpu.step(&mut bus);
        total_cycles = cpu.cycles;

        match check_test_result(&mut bus) {
            TestResult::Unknown => continue,
            other => break other,
        }
    };

    let message = read_string(&mut bus, 0x6004, 512);

    match result {
        TestResult::Passed => Ok((true, message)),
        TestResult::Failed(code) => Ok((
            false,
            format!("error code ${code:02X}: {message}"),
        )),
        TestResult::Timeout => Err(format!(
            "test timed out after {max_cycles} cycles; last message: {message}"
        )),
        TestResult::Unknown => Err("test protocol never initialized".to_string()),
    }
}

/// Format test result for display
pub fn format_result(result: &TestResult) -> String {
    match result {
        TestResult::Passed => "✓ PASSED".to_string(),
        TestResult::Failed(code) => format!("✗ FAILED (error code: ${:02X})", code),
        TestResult::Timeout => "✗ TIMEOUT".to_string(),
        TestResult::Unknown => "? UNKNOWN".to_string(),
    }
}
