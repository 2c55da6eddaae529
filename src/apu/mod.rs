// APU module - Audio Processing Unit implementation (Ricoh 2A03)
//
// Implements the two pulse channels, the triangle channel, the frame
// sequencer, and the non-linear mixer that together produce the NES's
// audio signal. The noise and DMC channels are out of scope: their
// registers are latched (so writes do not corrupt adjacent state and the
// bus's MMIO contract holds) but they never contribute to the mix.
//
// # Register Map
//
// | Address       | Channel   | Purpose                                |
// |---------------|-----------|-----------------------------------------|
// | $4000-$4003   | Pulse 1   | Duty/envelope, sweep, timer, length     |
// | $4004-$4007   | Pulse 2   | Duty/envelope, sweep, timer, length     |
// | $4008-$400B   | Triangle  | Linear counter, timer, length           |
// | $400C-$400F   | Noise     | Latched only, not mixed                 |
// | $4010-$4013   | DMC       | Latched only, not mixed                 |
// | $4015         | Status    | R: channel active flags. W: enable mask |
// | $4017         | Frame seq | Mode (4/5-step), IRQ inhibit            |

pub mod channels;
pub mod components;
pub mod constants;

use crate::bus::MemoryMappedDevice;
use channels::{PulseChannel, TriangleChannel};
use components::{FrameCounter, FrameEvent};

/// Number of recent output samples kept to average into one `audio_pull` byte.
const SAMPLE_BUFFER_CAPACITY: usize = 4096;

/// Build the pulse mixer lookup table: `pulse_table[n] = 95.52 / (8128/n + 100)`.
fn build_pulse_table() -> [f32; 31] {
    let mut table = [0.0f32; 31];
    for (n, slot) in table.iter_mut().enumerate().skip(1) {
        *slot = 95.52 / (8128.0 / n as f32 + 100.0);
    }
    table
}

/// Build the triangle/noise/DMC mixer lookup table:
/// `tnd_table[n] = 163.67 / (24329/n + 100)`.
fn build_tnd_table() -> [f32; 203] {
    let mut table = [0.0f32; 203];
    for (n, slot) in table.iter_mut().enumerate().skip(1) {
        *slot = 163.67 / (24329.0 / n as f32 + 100.0);
    }
    table
}

/// APU structure representing the Audio Processing Unit state.
pub struct Apu {
    pulse1: PulseChannel,
    pulse2: PulseChannel,
    triangle: TriangleChannel,

    frame_counter: FrameCounter,

    /// True on odd CPU cycles; pulse/noise timers clock at half the CPU rate.
    half_cycle: bool,

    /// $400C-$400F, latched but never read back through the mix.
    noise_regs: [u8; 4],
    /// $4010-$4013, latched but never read back through the mix.
    dmc_regs: [u8; 4],

    /// Mirrors the last value written to $4015 (enable mask, bits 0-4).
    enable_mask: u8,

    pulse_table: [f32; 31],
    tnd_table: [f32; 203],

    /// Running accumulator for the current output sample window.
    sample_accumulator: f32,
    sample_accumulator_count: u32,
    /// CPU cycles since the last emitted sample.
    cycles_since_sample: f32,
    /// CPU cycles per output sample at the configured output rate.
    cycles_per_sample: f32,

    /// Drained by `audio_pull`.
    sample_buffer: std::collections::VecDeque<u8>,
}

impl Apu {
    /// NES CPU clock rate in Hz (NTSC).
    pub const CPU_CLOCK_HZ: f64 = 1_789_773.0;
    /// Default output sample rate handed to `audio_pull` consumers.
    pub const DEFAULT_SAMPLE_RATE_HZ: f64 = 48_000.0;

    /// Create a new APU instance with default (power-on) state.
    pub fn new() -> Self {
        Self::with_sample_rate(Self::DEFAULT_SAMPLE_RATE_HZ)
    }

    /// Create a new APU instance sampling at a specific output rate.
    pub fn with_sample_rate(sample_rate_hz: f64) -> Self {
        let cycles_per_sample = (Self::CPU_CLOCK_HZ / sample_rate_hz) as f32;
        Apu {
            pulse1: PulseChannel::new(1),
            pulse2: PulseChannel::new(2),
            triangle: TriangleChannel::new(),
            frame_counter: FrameCounter::new(),
            half_cycle: false,
            noise_regs: [0; 4],
            dmc_regs: [0; 4],
            enable_mask: 0,
            pulse_table: build_pulse_table(),
            tnd_table: build_tnd_table(),
            sample_accumulator: 0.0,
            sample_accumulator_count: 0,
            cycles_since_sample: 0.0,
            cycles_per_sample,
            sample_buffer: std::collections::VecDeque::with_capacity(SAMPLE_BUFFER_CAPACITY),
        }
    }

    /// Reset APU to power-on state, keeping the configured output rate.
    pub fn reset(&mut self) {
        let cycles_per_sample = self.cycles_per_sample;
        *self = Self::with_sample_rate(Self::DEFAULT_SAMPLE_RATE_HZ);
        self.cycles_per_sample = cycles_per_sample;
    }

    /// Advance the APU by one CPU cycle.
    ///
    /// Clocks the triangle timer every cycle, the pulse timers every other
    /// cycle, and the frame sequencer every cycle. Returns `true` if the
    /// frame sequencer raised an IRQ this cycle (4-step mode only).
    pub fn clock(&mut self) -> bool {
        self.triangle.clock_timer();

        self.half_cycle = !self.half_cycle;
        if self.half_cycle {
            self.pulse1.clock_timer();
            self.pulse2.clock_timer();
        }

        let mut irq = false;
        for event in self.frame_counter.clock() {
            match event {
                FrameEvent::QuarterFrame => self.clock_quarter_frame(),
                FrameEvent::HalfFrame => self.clock_half_frame(),
                FrameEvent::SetIrq => irq = true,
            }
        }

        self.mix_and_sample();
        irq
    }

    /// Clock envelopes and the triangle linear counter (quarter frame).
    fn clock_quarter_frame(&mut self) {
        self.pulse1.clock_envelope();
        self.pulse2.clock_envelope();
        self.triangle.clock_linear_counter();
    }

    /// Clock length counters and sweep units (half frame; also clocks
    /// envelopes and the linear counter, since a half frame is a superset).
    fn clock_half_frame(&mut self) {
        self.clock_quarter_frame();
        self.pulse1.clock_length_counter();
        self.pulse1.clock_sweep();
        self.pulse2.clock_length_counter();
        self.pulse2.clock_sweep();
        self.triangle.clock_length_counter();
    }

    /// Mix the current channel outputs and, once enough CPU cycles have
    /// elapsed for one output sample, push an averaged byte into the buffer.
    fn mix_and_sample(&mut self) {
        let p1 = self.pulse1.output() as usize;
        let p2 = self.pulse2.output() as usize;
        let tri = self.triangle.output() as usize;

        let pulse_out = self.pulse_table[p1 + p2];
        let tnd_out = self.tnd_table[3 * tri];
        let sample = pulse_out + tnd_out;

        self.sample_accumulator += sample;
        self.sample_accumulator_count += 1;
        self.cycles_since_sample += 1.0;

        if self.cycles_since_sample >= self.cycles_per_sample {
            self.cycles_since_sample -= self.cycles_per_sample;
            let average = if self.sample_accumulator_count > 0 {
                self.sample_accumulator / self.sample_accumulator_count as f32
            } else {
                0.0
            };
            let byte = (average.clamp(0.0, 1.0) * 255.0) as u8;
            if self.sample_buffer.len() == SAMPLE_BUFFER_CAPACITY {
                self.sample_buffer.pop_front();
            }
            self.sample_buffer.push_back(byte);
            self.sample_accumulator = 0.0;
            self.sample_accumulator_count = 0;
        }
    }

    /// Drain accumulated audio samples into `buf`. Returns the number of
    /// bytes written; fills any remainder of `buf` with silence (0x80,
    /// the DC midpoint of an unsigned 8-bit PCM stream) if the buffer runs dry.
    pub fn audio_pull(&mut self, buf: &mut [u8]) -> usize {
        let available = self.sample_buffer.len().min(buf.len());
        for slot in buf.iter_mut().take(available) {
            *slot = self.sample_buffer.pop_front().unwrap();
        }
        for slot in buf.iter_mut().skip(available) {
            *slot = 0x80;
        }
        available
    }

    /// Number of samples currently queued for `audio_pull`.
    pub fn queued_samples(&self) -> usize {
        self.sample_buffer.len()
    }

    fn read_register(&mut self, addr: u16) -> u8 {
        match addr {
            0x4000..=0x400B => 0,
            0x400C..=0x4013 => 0,
            0x4015 => {
                let mut status = 0u8;
                if self.pulse1.is_active() {
                    status |= 0x01;
                }
                if self.pulse2.is_active() {
                    status |= 0x02;
                }
                if self.triangle.is_active() {
                    status |= 0x04;
                }
                if self.frame_counter.irq_pending() {
                    status |= 0x40;
                }
                // Reading $4015 clears the frame IRQ flag.
                self.frame_counter.clear_irq();
                status
            }
            _ => 0,
        }
    }

    fn write_register(&mut self, addr: u16, data: u8) {
        match addr {
            0x4000 => self.pulse1.write_register_0(data),
            0x4001 => self.pulse1.write_register_1(data),
            0x4002 => self.pulse1.write_register_2(data),
            0x4003 => self.pulse1.write_register_3(data),

            0x4004 => self.pulse2.write_register_0(data),
            0x4005 => self.pulse2.write_register_1(data),
            0x4006 => self.pulse2.write_register_2(data),
            0x4007 => self.pulse2.write_register_3(data),

            0x4008 => self.triangle.write_register_0(data),
            0x4009 => self.triangle.write_register_1(data),
            0x400A => self.triangle.write_register_2(data),
            0x400B => self.triangle.write_register_3(data),

            0x400C..=0x400F => self.noise_regs[(addr - 0x400C) as usize] = data,
            0x4010..=0x4013 => self.dmc_regs[(addr - 0x4010) as usize] = data,

            0x4015 => {
                self.enable_mask = data;
                self.pulse1.set_enabled((data & 0x01) != 0);
                self.pulse2.set_enabled((data & 0x02) != 0);
                self.triangle.set_enabled((data & 0x04) != 0);
            }

            0x4017 => {
                for event in self.frame_counter.write_control(data) {
                    match event {
                        FrameEvent::QuarterFrame => self.clock_quarter_frame(),
                        FrameEvent::HalfFrame => self.clock_half_frame(),
                        FrameEvent::SetIrq => {}
                    }
                }
            }

            _ => {}
        }
    }

    /// Whether the frame sequencer has a pending IRQ (4-step mode only).
    pub fn irq_pending(&self) -> bool {
        self.frame_counter.irq_pending()
    }
}

impl MemoryMappedDevice for Apu {
    fn read(&mut self, addr: u16) -> u8 {
        self.read_register(addr)
    }

    fn write(&mut self, addr: u16, data: u8) {
        self.write_register(addr, data);
    }
}

impl Default for Apu {
    fn default() -> Self {
        Self::new()
    }
}
