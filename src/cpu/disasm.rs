/*!
disasm.rs - pure opcode-table-driven disassembler.

Built atop [`super::table::OPCODE_TABLE`] rather than a parallel match
statement, so the disassembler and the dispatcher can never disagree about
an opcode's mode or length. Reads go through [`crate::bus::Bus::peek`]
exclusively; nothing here ever calls `Bus::read` or touches a
[`super::state::CpuState`].
*/

use super::addressing::AddrMode;
use super::table::OPCODE_TABLE;
use crate::bus::Bus;

/// Operand byte count for a mode, i.e. how far to advance past an opcode.
fn operand_len(mode: AddrMode) -> u16 {
    match mode {
        AddrMode::Imp => 0,
        AddrMode::Imm
        | AddrMode::Zp0
        | AddrMode::ZpX
        | AddrMode::ZpY
        | AddrMode::IzX
        | AddrMode::IzY
        | AddrMode::Rel => 1,
        AddrMode::Abs | AddrMode::AbX | AddrMode::AbY | AddrMode::Ind => 2,
    }
}

fn render_operand(bus: &Bus, mode: AddrMode, operand_addr: u16, next_instr_addr: u16) -> String {
    match mode {
        AddrMode::Imp => String::new(),
        AddrMode::Imm => format!(" #${:02X}", bus.peek(operand_addr)),
        AddrMode::Zp0 => format!(" ${:02X}", bus.peek(operand_addr)),
        AddrMode::ZpX => format!(" ${:02X},X", bus.peek(operand_addr)),
        AddrMode::ZpY => format!(" ${:02X},Y", bus.peek(operand_addr)),
        AddrMode::Abs => format!(" ${:04X}", bus.peek_word(operand_addr)),
        AddrMode::AbX => format!(" ${:04X},X", bus.peek_word(operand_addr)),
        AddrMode::AbY => format!(" ${:04X},Y", bus.peek_word(operand_addr)),
        AddrMode::Ind => format!(" (${:04X})", bus.peek_word(operand_addr)),
        AddrMode::IzX => format!(" (${:02X},X)", bus.peek(operand_addr)),
        AddrMode::IzY => format!(" (${:02X}),Y", bus.peek(operand_addr)),
        AddrMode::Rel => {
            let raw = bus.peek(operand_addr) as u16;
            let signed = if raw & 0x80 != 0 { raw | 0xFF00 } else { raw };
            let target = next_instr_addr.wrapping_add(signed);
            format!(" ${:04X}", target)
        }
    }
}

/// Disassemble the half-open-by-convention window `[start, stop]`, producing
/// one entry per instruction boundary encountered. Pure over bus memory:
/// never mutates CPU state, never advances via `Bus::read`.
pub fn disassemble(bus: &Bus, start: u16, stop: u16) -> Vec<(u16, String)> {
    let mut out = Vec::new();
    let mut addr = start;
    loop {
        let instr_addr = addr;
        let opcode = bus.peek(addr);
        let entry = OPCODE_TABLE[opcode as usize];
        let operand_addr = addr.wrapping_add(1);
        let len = operand_len(entry.mode);
        let next_instr_addr = addr.wrapping_add(1 + len);

        let mnemonic = if entry.mnemonic == "NOP" && opcode != 0xEA && entry.mode == AddrMode::Imp
        {
            "???"
        } else {
            entry.mnemonic
        };
        let operand = if mnemonic == "???" {
            String::new()
        } else {
            render_operand(bus, entry.mode, operand_addr, next_instr_addr)
        };

        out.push((instr_addr, format!("${:04X}: {}{}", instr_addr, mnemonic, operand)));

        if next_instr_addr <= addr || addr >= stop {
            break;
        }
        addr = next_instr_addr;
        if addr > stop {
            break;
        }
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::bus::{AddressRange, Rom};

    fn bus_with(prg: &[u8]) -> Bus {
        let mut bus = Bus::new();
        let mut rom = vec![0xEAu8; 0x8000];
        rom[..prg.len()].copy_from_slice(prg);
        bus.register(AddressRange::new(0x8000, 0xFFFF), Box::new(Rom::new(rom)))
            .unwrap();
        bus
    }

    #[test]
    fn renders_immediate_load() {
        let bus = bus_with(&[0xA9, 0x42]);
        let lines = disassemble(&bus, 0x8000, 0x8001);
        assert_eq!(lines[0].1, "$8000: LDA #$42");
    }

    #[test]
    fn renders_absolute_indexed_store() {
        let bus = bus_with(&[0x9D, 0x00, 0x02]);
        let lines = disassemble(&bus, 0x8000, 0x8002);
        assert_eq!(lines[0].1, "$8000: STA $0200,X");
    }

    #[test]
    fn renders_indexed_indirect_and_indirect_indexed() {
        let bus = bus_with(&[0xA1, 0x10, 0xB1, 0x20]);
        let lines = disassemble(&bus, 0x8000, 0x8003);
        assert_eq!(lines[0].1, "$8000: LDA ($10,X)");
        assert_eq!(lines[1].1, "$8002: LDA ($20),Y");
    }

    #[test]
    fn renders_relative_branch_as_computed_target() {
        // BNE -6, two bytes starting at $8000; next instr addr = $8002; target = $7FFC.
        let bus = bus_with(&[0xD0, 0xFA]);
        let lines = disassemble(&bus, 0x8000, 0x8001);
        assert_eq!(lines[0].1, "$8000: BNE $7FFC");
    }

    #[test]
    fn unofficial_opcode_renders_as_placeholder() {
        let bus = bus_with(&[0x02]);
        let lines = disassemble(&bus, 0x8000, 0x8000);
        assert_eq!(lines[0].1, "$8000: ???");
    }

    #[test]
    fn disassembling_is_pure_and_does_not_touch_a_cpu() {
        let bus = bus_with(&[0xA9, 0x10, 0xEA]);
        let before = bus.peek(0x8000);
        let _ = disassemble(&bus, 0x8000, 0x8002);
        assert_eq!(bus.peek(0x8000), before);
    }
}
