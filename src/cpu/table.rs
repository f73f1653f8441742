/*!
table.rs - the frozen 256-entry opcode dispatch table.

An immutable array of `(mnemonic, mode, op, base_cycles)` rows covering all
256 opcode values, built once as a `static`. Dispatch is a single indexed
lookup plus a mode-resolution call and an operation call — no reflection,
no per-opcode branch tree.

Unimplemented/undocumented opcodes default to `("NOP", Imp, nop, 2)`,
except the six documented illegal NOPs (`0x1C/3C/5C/7C/DC/FC`), which use
absolute,X addressing and authorize the page-cross penalty like their
documented cousins.
*/

use super::addressing::AddrMode;
use super::execute::{self, OpFn};

#[derive(Clone, Copy)]
pub(crate) struct OpEntry {
    pub mnemonic: &'static str,
    pub mode: AddrMode,
    pub op: OpFn,
    pub cycles: u8,
}

impl OpEntry {
    const fn new(mnemonic: &'static str, mode: AddrMode, op: OpFn, cycles: u8) -> Self {
        Self {
            mnemonic,
            mode,
            op,
            cycles,
        }
    }

    const fn fallback() -> Self {
        Self::new("NOP", AddrMode::Imp, execute::nop, 2)
    }
}

pub(crate) static OPCODE_TABLE: [OpEntry; 256] = build_table();

const fn build_table() -> [OpEntry; 256] {
    use AddrMode::*;

    let mut t = [OpEntry::fallback(); 256];

    t[0x00] = OpEntry::new("BRK", Imm, execute::brk, 7);
    t[0x01] = OpEntry::new("ORA", IzX, execute::ora, 6);
    t[0x05] = OpEntry::new("ORA", Zp0, execute::ora, 3);
    t[0x06] = OpEntry::new("ASL", Zp0, execute::asl, 5);
    t[0x08] = OpEntry::new("PHP", Imp, execute::php, 3);
    t[0x09] = OpEntry::new("ORA", Imm, execute::ora, 2);
    t[0x0A] = OpEntry::new("ASL", Imp, execute::asl, 2);
    t[0x0D] = OpEntry::new("ORA", Abs, execute::ora, 4);
    t[0x0E] = OpEntry::new("ASL", Abs, execute::asl, 6);

    t[0x10] = OpEntry::new("BPL", Rel, execute::bpl, 2);
    t[0x11] = OpEntry::new("ORA", IzY, execute::ora, 5);
    t[0x15] = OpEntry::new("ORA", ZpX, execute::ora, 4);
    t[0x16] = OpEntry::new("ASL", ZpX, execute::asl, 6);
    t[0x18] = OpEntry::new("CLC", Imp, execute::clc, 2);
    t[0x19] = OpEntry::new("ORA", AbY, execute::ora, 4);
    t[0x1C] = OpEntry::new("NOP", AbX, execute::nop_penalized, 4);
    t[0x1D] = OpEntry::new("ORA", AbX, execute::ora, 4);
    t[0x1E] = OpEntry::new("ASL", AbX, execute::asl, 7);

    t[0x20] = OpEntry::new("JSR", Abs, execute::jsr, 6);
    t[0x21] = OpEntry::new("AND", IzX, execute::and, 6);
    t[0x24] = OpEntry::new("BIT", Zp0, execute::bit, 3);
    t[0x25] = OpEntry::new("AND", Zp0, execute::and, 3);
    t[0x26] = OpEntry::new("ROL", Zp0, execute::rol, 5);
    t[0x28] = OpEntry::new("PLP", Imp, execute::plp, 4);
    t[0x29] = OpEntry::new("AND", Imm, execute::and, 2);
    t[0x2A] = OpEntry::new("ROL", Imp, execute::rol, 2);
    t[0x2C] = OpEntry::new("BIT", Abs, execute::bit, 4);
    t[0x2D] = OpEntry::new("AND", Abs, execute::and, 4);
    t[0x2E] = OpEntry::new("ROL", Abs, execute::rol, 6);

    t[0x30] = OpEntry::new("BMI", Rel, execute::bmi, 2);
    t[0x31] = OpEntry::new("AND", IzY, execute::and, 5);
    t[0x35] = OpEntry::new("AND", ZpX, execute::and, 4);
    t[0x36] = OpEntry::new("ROL", ZpX, execute::rol, 6);
    t[0x38] = OpEntry::new("SEC", Imp, execute::sec, 2);
    t[0x39] = OpEntry::new("AND", AbY, execute::and, 4);
    t[0x3C] = OpEntry::new("NOP", AbX, execute::nop_penalized, 4);
    t[0x3D] = OpEntry::new("AND", AbX, execute::and, 4);
    t[0x3E] = OpEntry::new("ROL", AbX, execute::rol, 7);

    t[0x40] = OpEntry::new("RTI", Imp, execute::rti, 6);
    t[0x41] = OpEntry::new("EOR", IzX, execute::eor, 6);
    t[0x45] = OpEntry::new("EOR", Zp0, execute::eor, 3);
    t[0x46] = OpEntry::new("LSR", Zp0, execute::lsr, 5);
    t[0x48] = OpEntry::new("PHA", Imp, execute::pha, 3);
    t[0x49] = OpEntry::new("EOR", Imm, execute::eor, 2);
    t[0x4A] = OpEntry::new("LSR", Imp, execute::lsr, 2);
    t[0x4C] = OpEntry::new("JMP", Abs, execute::jmp, 3);
    t[0x4D] = OpEntry::new("EOR", Abs, execute::eor, 4);
    t[0x4E] = OpEntry::new("LSR", Abs, execute::lsr, 6);

    t[0x50] = OpEntry::new("BVC", Rel, execute::bvc, 2);
    t[0x51] = OpEntry::new("EOR", IzY, execute::eor, 5);
    t[0x55] = OpEntry::new("EOR", ZpX, execute::eor, 4);
    t[0x56] = OpEntry::new("LSR", ZpX, execute::lsr, 6);
    t[0x58] = OpEntry::new("CLI", Imp, execute::cli, 2);
    t[0x59] = OpEntry::new("EOR", AbY, execute::eor, 4);
    t[0x5C] = OpEntry::new("NOP", AbX, execute::nop_penalized, 4);
    t[0x5D] = OpEntry::new("EOR", AbX, execute::eor, 4);
    t[0x5E] = OpEntry::new("LSR", AbX, execute::lsr, 7);

    t[0x60] = OpEntry::new("RTS", Imp, execute::rts, 6);
    t[0x61] = OpEntry::new("ADC", IzX, execute::adc, 6);
    t[0x65] = OpEntry::new("ADC", Zp0, execute::adc, 3);
    t[0x66] = OpEntry::new("ROR", Zp0, execute::ror, 5);
    t[0x68] = OpEntry::new("PLA", Imp, execute::pla, 4);
    t[0x69] = OpEntry::new("ADC", Imm, execute::adc, 2);
    t[0x6A] = OpEntry::new("ROR", Imp, execute::ror, 2);
    t[0x6C] = OpEntry::new("JMP", Ind, execute::jmp, 5);
    t[0x6D] = OpEntry::new("ADC", Abs, execute::adc, 4);
    t[0x6E] = OpEntry::new("ROR", Abs, execute::ror, 6);

    t[0x70] = OpEntry::new("BVS", Rel, execute::bvs, 2);
    t[0x71] = OpEntry::new("ADC", IzY, execute::adc, 5);
    t[0x75] = OpEntry::new("ADC", ZpX, execute::adc, 4);
    t[0x76] = OpEntry::new("ROR", ZpX, execute::ror, 6);
    t[0x78] = OpEntry::new("SEI", Imp, execute::sei, 2);
    t[0x79] = OpEntry::new("ADC", AbY, execute::adc, 4);
    t[0x7C] = OpEntry::new("NOP", AbX, execute::nop_penalized, 4);
    t[0x7D] = OpEntry::new("ADC", AbX, execute::adc, 4);
    t[0x7E] = OpEntry::new("ROR", AbX, execute::ror, 7);

    t[0x81] = OpEntry::new("STA", IzX, execute::sta, 6);
    t[0x84] = OpEntry::new("STY", Zp0, execute::sty, 3);
    t[0x85] = OpEntry::new("STA", Zp0, execute::sta, 3);
    t[0x86] = OpEntry::new("STX", Zp0, execute::stx, 3);
    t[0x88] = OpEntry::new("DEY", Imp, execute::dey, 2);
    t[0x8A] = OpEntry::new("TXA", Imp, execute::txa, 2);
    t[0x8C] = OpEntry::new("STY", Abs, execute::sty, 4);
    t[0x8D] = OpEntry::new("STA", Abs, execute::sta, 4);
    t[0x8E] = OpEntry::new("STX", Abs, execute::stx, 4);

    t[0x90] = OpEntry::new("BCC", Rel, execute::bcc, 2);
    t[0x91] = OpEntry::new("STA", IzY, execute::sta, 6);
    t[0x94] = OpEntry::new("STY", ZpX, execute::sty, 4);
    t[0x95] = OpEntry::new("STA", ZpX, execute::sta, 4);
    t[0x96] = OpEntry::new("STX", ZpY, execute::stx, 4);
    t[0x98] = OpEntry::new("TYA", Imp, execute::tya, 2);
    t[0x99] = OpEntry::new("STA", AbY, execute::sta, 5);
    t[0x9A] = OpEntry::new("TXS", Imp, execute::txs, 2);
    t[0x9D] = OpEntry::new("STA", AbX, execute::sta, 5);

    t[0xA0] = OpEntry::new("LDY", Imm, execute::ldy, 2);
    t[0xA1] = OpEntry::new("LDA", IzX, execute::lda, 6);
    t[0xA2] = OpEntry::new("LDX", Imm, execute::ldx, 2);
    t[0xA4] = OpEntry::new("LDY", Zp0, execute::ldy, 3);
    t[0xA5] = OpEntry::new("LDA", Zp0, execute::lda, 3);
    t[0xA6] = OpEntry::new("LDX", Zp0, execute::ldx, 3);
    t[0xA8] = OpEntry::new("TAY", Imp, execute::tay, 2);
    t[0xA9] = OpEntry::new("LDA", Imm, execute::lda, 2);
    t[0xAA] = OpEntry::new("TAX", Imp, execute::tax, 2);
    t[0xAC] = OpEntry::new("LDY", Abs, execute::ldy, 4);
    t[0xAD] = OpEntry::new("LDA", Abs, execute::lda, 4);
    t[0xAE] = OpEntry::new("LDX", Abs, execute::ldx, 4);

    t[0xB0] = OpEntry::new("BCS", Rel, execute::bcs, 2);
    t[0xB1] = OpEntry::new("LDA", IzY, execute::lda, 5);
    t[0xB4] = OpEntry::new("LDY", ZpX, execute::ldy, 4);
    t[0xB5] = OpEntry::new("LDA", ZpX, execute::lda, 4);
    t[0xB6] = OpEntry::new("LDX", ZpY, execute::ldx, 4);
    t[0xB8] = OpEntry::new("CLV", Imp, execute::clv, 2);
    t[0xB9] = OpEntry::new("LDA", AbY, execute::lda, 4);
    t[0xBA] = OpEntry::new("TSX", Imp, execute::tsx, 2);
    t[0xBC] = OpEntry::new("LDY", AbX, execute::ldy, 4);
    t[0xBD] = OpEntry::new("LDA", AbX, execute::lda, 4);
    t[0xBE] = OpEntry::new("LDX", AbY, execute::ldx, 4);

    t[0xC0] = OpEntry::new("CPY", Imm, execute::cpy, 2);
    t[0xC1] = OpEntry::new("CMP", IzX, execute::cmp, 6);
    t[0xC4] = OpEntry::new("CPY", Zp0, execute::cpy, 3);
    t[0xC5] = OpEntry::new("CMP", Zp0, execute::cmp, 3);
    t[0xC6] = OpEntry::new("DEC", Zp0, execute::dec, 5);
    t[0xC8] = OpEntry::new("INY", Imp, execute::iny, 2);
    t[0xC9] = OpEntry::new("CMP", Imm, execute::cmp, 2);
    t[0xCA] = OpEntry::new("DEX", Imp, execute::dex, 2);
    t[0xCC] = OpEntry::new("CPY", Abs, execute::cpy, 4);
    t[0xCD] = OpEntry::new("CMP", Abs, execute::cmp, 4);
    t[0xCE] = OpEntry::new("DEC", Abs, execute::dec, 6);

    t[0xD0] = OpEntry::new("BNE", Rel, execute::bne, 2);
    t[0xD1] = OpEntry::new("CMP", IzY, execute::cmp, 5);
    t[0xD5] = OpEntry::new("CMP", ZpX, execute::cmp, 4);
    t[0xD6] = OpEntry::new("DEC", ZpX, execute::dec, 6);
    t[0xD8] = OpEntry::new("CLD", Imp, execute::cld, 2);
    t[0xD9] = OpEntry::new("CMP", AbY, execute::cmp, 4);
    t[0xDC] = OpEntry::new("NOP", AbX, execute::nop_penalized, 4);
    t[0xDD] = OpEntry::new("CMP", AbX, execute::cmp, 4);
    t[0xDE] = OpEntry::new("DEC", AbX, execute::dec, 7);

    t[0xE0] = OpEntry::new("CPX", Imm, execute::cpx, 2);
    t[0xE1] = OpEntry::new("SBC", IzX, execute::sbc, 6);
    t[0xE4] = OpEntry::new("CPX", Zp0, execute::cpx, 3);
    t[0xE5] = OpEntry::new("SBC", Zp0, execute::sbc, 3);
    t[0xE6] = OpEntry::new("INC", Zp0, execute::inc, 5);
    t[0xE8] = OpEntry::new("INX", Imp, execute::inx, 2);
    t[0xE9] = OpEntry::new("SBC", Imm, execute::sbc, 2);
    t[0xEA] = OpEntry::new("NOP", Imp, execute::nop, 2);
    t[0xEC] = OpEntry::new("CPX", Abs, execute::cpx, 4);
    t[0xED] = OpEntry::new("SBC", Abs, execute::sbc, 4);
    t[0xEE] = OpEntry::new("INC", Abs, execute::inc, 6);

    t[0xF0] = OpEntry::new("BEQ", Rel, execute::beq, 2);
    t[0xF1] = OpEntry::new("SBC", IzY, execute::sbc, 5);
    t[0xF5] = OpEntry::new("SBC", ZpX, execute::sbc, 4);
    t[0xF6] = OpEntry::new("INC", ZpX, execute::inc, 6);
    t[0xF8] = OpEntry::new("SED", Imp, execute::sed, 2);
    t[0xF9] = OpEntry::new("SBC", AbY, execute::sbc, 4);
    t[0xFC] = OpEntry::new("NOP", AbX, execute::nop_penalized, 4);
    t[0xFD] = OpEntry::new("SBC", AbX, execute::sbc, 4);
    t[0xFE] = OpEntry::new("INC", AbX, execute::inc, 7);

    t
}
