// Undocumented ("illegal") 6502 opcodes.
//
// These fold two of the documented read-modify-write operations into a
// single opcode. Several commercial NES titles and most CPU test ROMs
// (including nestest) rely on the ones implemented here; the remaining
// unstable undocumented opcodes (XAA, AHX, TAS, SHX, SHY, LAS, LXA) are
// not reproduced and fall back to the NOP-equivalent default in `execute`.

use crate::bus::Bus;
use crate::cpu::addressing::AddressingResult;
use crate::cpu::Cpu;

impl Cpu {
    /// LAX - Load Accumulator and X from memory in one operation.
    ///
    /// Flags affected: Z, N
    pub fn lax(&mut self, bus: &mut Bus, addr_result: &AddressingResult) {
        let value = self.read_operand(bus, addr_result);
        self.a = value;
        self.x = value;
        self.update_zero_and_negative_flags(value);
    }

    /// SAX - Store the bitwise AND of A and X. Flags are not affected.
    pub fn sax(&self, bus: &mut Bus, addr_result: &AddressingResult) {
        bus.write(addr_result.address, self.a & self.x);
    }

    /// DCP - Decrement memory, then compare the result against A.
    ///
    /// Flags affected: C, Z, N
    pub fn dcp(&mut self, bus: &mut Bus, addr_result: &AddressingResult) {
        let value = bus.read(addr_result.address).wrapping_sub(1);
        bus.write(addr_result.address, value);

        self.set_carry(self.a >= value);
        self.set_zero(self.a == value);
        self.set_negative(self.a.wrapping_sub(value) & 0x80 != 0);
    }

    /// ISC (ISB/INS) - Increment memory, then subtract the result from A with borrow.
    ///
    /// Flags affected: C, V, Z, N
    pub fn isc(&mut self, bus: &mut Bus, addr_result: &AddressingResult) {
        let value = bus.read(addr_result.address).wrapping_add(1);
        bus.write(addr_result.address, value);

        let inverted = !value;
        let carry = u16::from(self.get_carry());
        let sum = self.a as u16 + inverted as u16 + carry;

        self.set_carry(sum > 0xFF);
        let result = sum as u8;
        self.set_overflow((self.a ^ result) & (inverted ^ result) & 0x80 != 0);
        self.a = result;
        self.update_zero_and_negative_flags(result);
    }

    /// SLO - Arithmetic shift left memory, then OR the result into A.
    ///
    /// Flags affected: C, Z, N
    pub fn slo(&mut self, bus: &mut Bus, addr_result: &AddressingResult) {
        let value = bus.read(addr_result.address);
        self.set_carry(value & 0x80 != 0);
        let shifted = value << 1;
        bus.write(addr_result.address, shifted);

        self.a |= shifted;
        self.update_zero_and_negative_flags(self.a);
    }

    /// RLA - Rotate memory left, then AND the result into A.
    ///
    /// Flags affected: C, Z, N
    pub fn rla(&mut self, bus: &mut Bus, addr_result: &AddressingResult) {
        let value = bus.read(addr_result.address);
        let carry_in = u8::from(self.get_carry());
        self.set_carry(value & 0x80 != 0);
        let rotated = (value << 1) | carry_in;
        bus.write(addr_result.address, rotated);

        self.a &= rotated;
        self.update_zero_and_negative_flags(self.a);
    }

    /// SRE - Logical shift right memory, then EOR the result into A.
    ///
    /// Flags affected: C, Z, N
    pub fn sre(&mut self, bus: &mut Bus, addr_result: &AddressingResult) {
        let value = bus.read(addr_result.address);
        self.set_carry(value & 0x01 != 0);
        let shifted = value >> 1;
        bus.write(addr_result.address, shifted);

        self.a ^= shifted;
        self.update_zero_and_negative_flags(self.a);
    }

    /// RRA - Rotate memory right, then add the result into A with carry.
    ///
    /// Flags affected: C, V, Z, N
    pub fn rra(&mut self, bus: &mut Bus, addr_result: &AddressingResult) {
        let value = bus.read(addr_result.address);
        let carry_in = if self.get_carry() { 0x80 } else { 0 };
        self.set_carry(value & 0x01 != 0);
        let rotated = (value >> 1) | carry_in;
        bus.write(addr_result.address, rotated);

        let carry = u16::from(self.get_carry());
        let sum = self.a as u16 + rotated as u16 + carry;
        self.set_carry(sum > 0xFF);
        let result = sum as u8;
        self.set_overflow((self.a ^ result) & (rotated ^ result) & 0x80 != 0);
        self.a = result;
        self.update_zero_and_negative_flags(result);
    }

    /// ANC - AND A with an immediate value, then copy the result's sign bit into C.
    ///
    /// Flags affected: C, Z, N
    pub fn anc(&mut self, bus: &mut Bus, addr_result: &AddressingResult) {
        let value = self.read_operand(bus, addr_result);
        self.a &= value;
        self.update_zero_and_negative_flags(self.a);
        self.set_carry(self.a & 0x80 != 0);
    }

    /// ALR (ASR) - AND A with an immediate value, then shift the result right one bit.
    ///
    /// Flags affected: C, Z, N
    pub fn alr(&mut self, bus: &mut Bus, addr_result: &AddressingResult) {
        let value = self.read_operand(bus, addr_result);
        self.a &= value;
        self.set_carry(self.a & 0x01 != 0);
        self.a >>= 1;
        self.update_zero_and_negative_flags(self.a);
    }

    /// ARR - AND A with an immediate value, then rotate the result right one bit.
    ///
    /// C and V come from bits 6 and 5 of the rotated result rather than the shift itself.
    ///
    /// Flags affected: C, V, Z, N
    pub fn arr(&mut self, bus: &mut Bus, addr_result: &AddressingResult) {
        let value = self.read_operand(bus, addr_result);
        self.a &= value;
        let carry_in = if self.get_carry() { 0x80 } else { 0 };
        self.a = (self.a >> 1) | carry_in;
        self.update_zero_and_negative_flags(self.a);

        let bit6 = self.a & 0x40 != 0;
        let bit5 = self.a & 0x20 != 0;
        self.set_carry(bit6);
        self.set_overflow(bit6 ^ bit5);
    }

    /// AXS (SBX) - X := (A & X) - immediate, without consuming the carry flag.
    ///
    /// Flags affected: C, Z, N
    pub fn axs(&mut self, bus: &mut Bus, addr_result: &AddressingResult) {
        let value = self.read_operand(bus, addr_result);
        let and_result = self.a & self.x;
        self.set_carry(and_result >= value);
        self.x = and_result.wrapping_sub(value);
        self.update_zero_and_negative_flags(self.x);
    }
}
