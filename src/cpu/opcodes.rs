// Static instruction table for the 6502.
//
// Every one of the 256 possible opcode bytes maps to a fixed mnemonic,
// addressing mode, instruction length, and base cycle count. This table
// never changes at runtime; `execute::step` indexes into it once per
// instruction to drive both addressing-mode resolution and the cycle
// counter. Unassigned bytes and the unstable undocumented opcodes this
// core does not implement (XAA, AHX, TAS, SHX, SHY, LAS, the JAM/KIL
// family) still get a correct length and cycle count here, so `step`
// degrades to a NOP of matching width rather than desyncing the CPU.

use crate::cpu::addressing::AddressingMode;

/// One row of the instruction table.
#[derive(Debug, Clone, Copy)]
pub struct OpcodeInfo {
    /// Mnemonic, used only for disassembly/tracing.
    pub mnemonic: &'static str,
    /// Addressing mode used to resolve the operand.
    pub mode: AddressingMode,
    /// Total instruction length in bytes, including the opcode.
    pub bytes: u8,
    /// Base cycle count, excluding branch-taken and page-cross penalties.
    pub cycles: u8,
    /// Whether crossing a page boundary while resolving the address adds one cycle.
    pub page_cycle: bool,
}

const fn op(
    mnemonic: &'static str,
    mode: AddressingMode,
    bytes: u8,
    cycles: u8,
    page_cycle: bool,
) -> OpcodeInfo {
    OpcodeInfo {
        mnemonic,
        mode,
        bytes,
        cycles,
        page_cycle,
    }
}

use AddressingMode::{
    Absolute as ABS, AbsoluteX as ABX, AbsoluteY as ABY, Accumulator as ACC, Immediate as IMM,
    Implied as IMP, IndexedIndirect as IZX, Indirect as IND, IndirectIndexed as IZY,
    Relative as REL, ZeroPage as ZP, ZeroPageX as ZPX, ZeroPageY as ZPY,
};

/// The 256-entry opcode table, indexed directly by opcode byte.
pub static OPCODE_TABLE: [OpcodeInfo; 256] = [
    // 0x00-0x0F
    op("BRK", IMP, 1, 7, false),
    op("ORA", IZX, 2, 6, false),
    op("JAM", IMP, 1, 2, false),
    op("SLO", IZX, 2, 8, false),
    op("NOP", ZP, 2, 3, false),
    op("ORA", ZP, 2, 3, false),
    op("ASL", ZP, 2, 5, false),
    op("SLO", ZP, 2, 5, false),
    op("PHP", IMP, 1, 3, false),
    op("ORA", IMM, 2, 2, false),
    op("ASL", ACC, 1, 2, false),
    op("ANC", IMM, 2, 2, false),
    op("NOP", ABS, 3, 4, false),
    op("ORA", ABS, 3, 4, false),
    op("ASL", ABS, 3, 6, false),
    op("SLO", ABS, 3, 6, false),
    // 0x10-0x1F
    op("BPL", REL, 2, 2, false),
    op("ORA", IZY, 2, 5, true),
    op("JAM", IMP, 1, 2, false),
    op("SLO", IZY, 2, 8, false),
    op("NOP", ZPX, 2, 4, false),
    op("ORA", ZPX, 2, 4, false),
    op("ASL", ZPX, 2, 6, false),
    op("SLO", ZPX, 2, 6, false),
    op("CLC", IMP, 1, 2, false),
    op("ORA", ABY, 3, 4, true),
    op("NOP", IMP, 1, 2, false),
    op("SLO", ABY, 3, 7, false),
    op("NOP", ABX, 3, 4, true),
    op("ORA", ABX, 3, 4, true),
    op("ASL", ABX, 3, 7, false),
    op("SLO", ABX, 3, 7, false),
    // 0x20-0x2F
    op("JSR", ABS, 3, 6, false),
    op("AND", IZX, 2, 6, false),
    op("JAM", IMP, 1, 2, false),
    op("RLA", IZX, 2, 8, false),
    op("BIT", ZP, 2, 3, false),
    op("AND", ZP, 2, 3, false),
    op("ROL", ZP, 2, 5, false),
    op("RLA", ZP, 2, 5, false),
    op("PLP", IMP, 1, 4, false),
    op("AND", IMM, 2, 2, false),
    op("ROL", ACC, 1, 2, false),
    op("ANC", IMM, 2, 2, false),
    op("BIT", ABS, 3, 4, false),
    op("AND", ABS, 3, 4, false),
    op("ROL", ABS, 3, 6, false),
    op("RLA", ABS, 3, 6, false),
    // 0x30-0x3F
    op("BMI", REL, 2, 2, false),
    op("AND", IZY, 2, 5, true),
    op("JAM", IMP, 1, 2, false),
    op("RLA", IZY, 2, 8, false),
    op("NOP", ZPX, 2, 4, false),
    op("AND", ZPX, 2, 4, false),
    op("ROL", ZPX, 2, 6, false),
    op("RLA", ZPX, 2, 6, false),
    op("SEC", IMP, 1, 2, false),
    op("AND", ABY, 3, 4, true),
    op("NOP", IMP, 1, 2, false),
    op("RLA", ABY, 3, 7, false),
    op("NOP", ABX, 3, 4, true),
    op("AND", ABX, 3, 4, true),
    op("ROL", ABX, 3, 7, false),
    op("RLA", ABX, 3, 7, false),
    // 0x40-0x4F
    op("RTI", IMP, 1, 6, false),
    op("EOR", IZX, 2, 6, false),
    op("JAM", IMP, 1, 2, false),
    op("SRE", IZX, 2, 8, false),
    op("NOP", ZP, 2, 3, false),
    op("EOR", ZP, 2, 3, false),
    op("LSR", ZP, 2, 5, false),
    op("SRE", ZP, 2, 5, false),
    op("PHA", IMP, 1, 3, false),
    op("EOR", IMM, 2, 2, false),
    op("LSR", ACC, 1, 2, false),
    op("ALR", IMM, 2, 2, false),
    op("JMP", ABS, 3, 3, false),
    op("EOR", ABS, 3, 4, false),
    op("LSR", ABS, 3, 6, false),
    op("SRE", ABS, 3, 6, false),
    // 0x50-0x5F
    op("BVC", REL, 2, 2, false),
    op("EOR", IZY, 2, 5, true),
    op("JAM", IMP, 1, 2, false),
    op("SRE", IZY, 2, 8, false),
    op("NOP", ZPX, 2, 4, false),
    op("EOR", ZPX, 2, 4, false),
    op("LSR", ZPX, 2, 6, false),
    op("SRE", ZPX, 2, 6, false),
    op("CLI", IMP, 1, 2, false),
    op("EOR", ABY, 3, 4, true),
    op("NOP", IMP, 1, 2, false),
    op("SRE", ABY, 3, 7, false),
    op("NOP", ABX, 3, 4, true),
    op("EOR", ABX, 3, 4, true),
    op("LSR", ABX, 3, 7, false),
    op("SRE", ABX, 3, 7, false),
    // 0x60-0x6F
    op("RTS", IMP, 1, 6, false),
    op("ADC", IZX, 2, 6, false),
    op("JAM", IMP, 1, 2, false),
    op("RRA", IZX, 2, 8, false),
    op("NOP", ZP, 2, 3, false),
    op("ADC", ZP, 2, 3, false),
    op("ROR", ZP, 2, 5, false),
    op("RRA", ZP, 2, 5, false),
    op("PLA", IMP, 1, 4, false),
    op("ADC", IMM, 2, 2, false),
    op("ROR", ACC, 1, 2, false),
    op("ARR", IMM, 2, 2, false),
    op("JMP", IND, 3, 5, false),
    op("ADC", ABS, 3, 4, false),
    op("ROR", ABS, 3, 6, false),
    op("RRA", ABS, 3, 6, false),
    // 0x70-0x7F
    op("BVS", REL, 2, 2, false),
    op("ADC", IZY, 2, 5, true),
    op("JAM", IMP, 1, 2, false),
    op("RRA", IZY, 2, 8, false),
    op("NOP", ZPX, 2, 4, false),
    op("ADC", ZPX, 2, 4, false),
    op("ROR", ZPX, 2, 6, false),
    op("RRA", ZPX, 2, 6, false),
    op("SEI", IMP, 1, 2, false),
    op("ADC", ABY, 3, 4, true),
    op("NOP", IMP, 1, 2, false),
    op("RRA", ABY, 3, 7, false),
    op("NOP", ABX, 3, 4, true),
    op("ADC", ABX, 3, 4, true),
    op("ROR", ABX, 3, 7, false),
    op("RRA", ABX, 3, 7, false),
    // 0x80-0x8F
    op("NOP", IMM, 2, 2, false),
    op("STA", IZX, 2, 6, false),
    op("NOP", IMM, 2, 2, false),
    op("SAX", IZX, 2, 6, false),
    op("STY", ZP, 2, 3, false),
    op("STA", ZP, 2, 3, false),
    op("STX", ZP, 2, 3, false),
    op("SAX", ZP, 2, 3, false),
    op("DEY", IMP, 1, 2, false),
    op("NOP", IMM, 2, 2, false),
    op("TXA", IMP, 1, 2, false),
    op("XAA", IMM, 2, 2, false),
    op("STY", ABS, 3, 4, false),
    op("STA", ABS, 3, 4, false),
    op("STX", ABS, 3, 4, false),
    op("SAX", ABS, 3, 4, false),
    // 0x90-0x9F
    op("BCC", REL, 2, 2, false),
    op("STA", IZY, 2, 6, false),
    op("JAM", IMP, 1, 2, false),
    op("AHX", IZY, 2, 6, false),
    op("STY", ZPX, 2, 4, false),
    op("STA", ZPX, 2, 4, false),
    op("STX", ZPY, 2, 4, false),
    op("SAX", ZPY, 2, 4, false),
    op("TYA", IMP, 1, 2, false),
    op("STA", ABY, 3, 5, false),
    op("TXS", IMP, 1, 2, false),
    op("TAS", ABY, 3, 5, false),
    op("SHY", ABX, 3, 5, false),
    op("STA", ABX, 3, 5, false),
    op("SHX", ABY, 3, 5, false),
    op("AHX", ABY, 3, 5, false),
    // 0xA0-0xAF
    op("LDY", IMM, 2, 2, false),
    op("LDA", IZX, 2, 6, false),
    op("LDX", IMM, 2, 2, false),
    op("LAX", IZX, 2, 6, false),
    op("LDY", ZP, 2, 3, false),
    op("LDA", ZP, 2, 3, false),
    op("LDX", ZP, 2, 3, false),
    op("LAX", ZP, 2, 3, false),
    op("TAY", IMP, 1, 2, false),
    op("LDA", IMM, 2, 2, false),
    op("TAX", IMP, 1, 2, false),
    op("LAX", IMM, 2, 2, false),
    op("LDY", ABS, 3, 4, false),
    op("LDA", ABS, 3, 4, false),
    op("LDX", ABS, 3, 4, false),
    op("LAX", ABS, 3, 4, false),
    // 0xB0-0xBF
    op("BCS", REL, 2, 2, false),
    op("LDA", IZY, 2, 5, true),
    op("JAM", IMP, 1, 2, false),
    op("LAX", IZY, 2, 5, true),
    op("LDY", ZPX, 2, 4, false),
    op("LDA", ZPX, 2, 4, false),
    op("LDX", ZPY, 2, 4, false),
    op("LAX", ZPY, 2, 4, false),
    op("CLV", IMP, 1, 2, false),
    op("LDA", ABY, 3, 4, true),
    op("TSX", IMP, 1, 2, false),
    op("LAS", ABY, 3, 4, true),
    op("LDY", ABX, 3, 4, true),
    op("LDA", ABX, 3, 4, true),
    op("LDX", ABY, 3, 4, true),
    op("LAX", ABY, 3, 4, true),
    // 0xC0-0xCF
    op("CPY", IMM, 2, 2, false),
    op("CMP", IZX, 2, 6, false),
    op("NOP", IMM, 2, 2, false),
    op("DCP", IZX, 2, 8, false),
    op("CPY", ZP, 2, 3, false),
    op("CMP", ZP, 2, 3, false),
    op("DEC", ZP, 2, 5, false),
    op("DCP", ZP, 2, 5, false),
    op("INY", IMP, 1, 2, false),
    op("CMP", IMM, 2, 2, false),
    op("DEX", IMP, 1, 2, false),
    op("AXS", IMM, 2, 2, false),
    op("CPY", ABS, 3, 4, false),
    op("CMP", ABS, 3, 4, false),
    op("DEC", ABS, 3, 6, false),
    op("DCP", ABS, 3, 6, false),
    // 0xD0-0xDF
    op("BNE", REL, 2, 2, false),
    op("CMP", IZY, 2, 5, true),
    op("JAM", IMP, 1, 2, false),
    op("DCP", IZY, 2, 8, false),
    op("NOP", ZPX, 2, 4, false),
    op("CMP", ZPX, 2, 4, false),
    op("DEC", ZPX, 2, 6, false),
    op("DCP", ZPX, 2, 6, false),
    op("CLD", IMP, 1, 2, false),
    op("CMP", ABY, 3, 4, true),
    op("NOP", IMP, 1, 2, false),
    op("DCP", ABY, 3, 7, false),
    op("NOP", ABX, 3, 4, true),
    op("CMP", ABX, 3, 4, true),
    op("DEC", ABX, 3, 7, false),
    op("DCP", ABX, 3, 7, false),
    // 0xE0-0xEF
    op("CPX", IMM, 2, 2, false),
    op("SBC", IZX, 2, 6, false),
    op("NOP", IMM, 2, 2, false),
    op("ISC", IZX, 2, 8, false),
    op("CPX", ZP, 2, 3, false),
    op("SBC", ZP, 2, 3, false),
    op("INC", ZP, 2, 5, false),
    op("ISC", ZP, 2, 5, false),
    op("INX", IMP, 1, 2, false),
    op("SBC", IMM, 2, 2, false),
    op("NOP", IMP, 1, 2, false),
    op("SBC", IMM, 2, 2, false),
    op("CPX", ABS, 3, 4, false),
    op("SBC", ABS, 3, 4, false),
    op("INC", ABS, 3, 6, false),
    op("ISC", ABS, 3, 6, false),
    // 0xF0-0xFF
    op("BEQ", REL, 2, 2, false),
    op("SBC", IZY, 2, 5, true),
    op("JAM", IMP, 1, 2, false),
    op("ISC", IZY, 2, 8, false),
    op("NOP", ZPX, 2, 4, false),
    op("SBC", ZPX, 2, 4, false),
    op("INC", ZPX, 2, 6, false),
    op("ISC", ZPX, 2, 6, false),
    op("SED", IMP, 1, 2, false),
    op("SBC", ABY, 3, 4, true),
    op("NOP", IMP, 1, 2, false),
    op("ISC", ABY, 3, 7, false),
    op("NOP", ABX, 3, 4, true),
    op("SBC", ABX, 3, 4, true),
    op("INC", ABX, 3, 7, false),
    op("ISC", ABX, 3, 7, false),
];
