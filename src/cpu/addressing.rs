/*!
addressing.rs - the thirteen 6502 addressing modes.

Each mode function writes its result into `CpuState`'s
`addr_abs`/`addr_rel`/`fetched` scratch and returns the page-cross signal
directly, matching the opcode table's dispatch contract:
`fn(&mut CpuState, &mut Bus) -> bool`.

The zero-page-indirect modes (IZX/IZY) always mask pointer arithmetic to 8
bits on both the base byte and its +1 neighbor — real 6502 hardware wraps
within page zero rather than carrying into page one.
*/

use super::state::CpuState;
use crate::bus::Bus;

/// Which of the thirteen 6502 addressing modes an opcode uses. `Imp` also
/// stands in for the "accumulator" mode variant (e.g. `ASL A`): both leave
/// `addr_abs` untouched and prime `fetched` from `a`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AddrMode {
    Imp,
    Imm,
    Zp0,
    ZpX,
    ZpY,
    Abs,
    AbX,
    AbY,
    Ind,
    IzX,
    IzY,
    Rel,
}

/// IMP (implied/accumulator): no operand bytes; `fetched <- a`.
pub(crate) fn am_imp(cpu: &mut CpuState, _bus: &mut Bus) -> bool {
    cpu.fetched = cpu.a;
    false
}

/// IMM (immediate): operand is the next byte; `addr_abs` points at it.
pub(crate) fn am_imm(cpu: &mut CpuState, _bus: &mut Bus) -> bool {
    cpu.addr_abs = cpu.pc;
    cpu.advance_pc(1);
    false
}

/// ZP0 (zero page): one operand byte, used directly as the low byte.
pub(crate) fn am_zp0(cpu: &mut CpuState, bus: &mut Bus) -> bool {
    cpu.addr_abs = cpu.fetch_byte(bus) as u16 & 0x00FF;
    false
}

/// ZPX (zero page, X): one operand byte + X, wrapped within page zero.
pub(crate) fn am_zpx(cpu: &mut CpuState, bus: &mut Bus) -> bool {
    let operand = cpu.fetch_byte(bus);
    cpu.addr_abs = operand.wrapping_add(cpu.x) as u16 & 0x00FF;
    false
}

/// ZPY (zero page, Y): one operand byte + Y, wrapped within page zero.
pub(crate) fn am_zpy(cpu: &mut CpuState, bus: &mut Bus) -> bool {
    let operand = cpu.fetch_byte(bus);
    cpu.addr_abs = operand.wrapping_add(cpu.y) as u16 & 0x00FF;
    false
}

/// ABS (absolute): two operand bytes, little-endian.
pub(crate) fn am_abs(cpu: &mut CpuState, bus: &mut Bus) -> bool {
    cpu.addr_abs = cpu.fetch_word(bus);
    false
}

/// ABX (absolute, X): absolute base + X; signals a page cross.
pub(crate) fn am_abx(cpu: &mut CpuState, bus: &mut Bus) -> bool {
    let base = cpu.fetch_word(bus);
    let addr = base.wrapping_add(cpu.x as u16);
    cpu.addr_abs = addr;
    (addr & 0xFF00) != (base & 0xFF00)
}

/// ABY (absolute, Y): absolute base + Y; signals a page cross.
pub(crate) fn am_aby(cpu: &mut CpuState, bus: &mut Bus) -> bool {
    let base = cpu.fetch_word(bus);
    let addr = base.wrapping_add(cpu.y as u16);
    cpu.addr_abs = addr;
    (addr & 0xFF00) != (base & 0xFF00)
}

/// IND (indirect, JMP only): reads a 16-bit pointer and follows it, with the
/// documented hardware bug — if the pointer's low byte is `0xFF`, the high
/// byte is read from the *same* page instead of crossing into the next one.
pub(crate) fn am_ind(cpu: &mut CpuState, bus: &mut Bus) -> bool {
    let ptr = cpu.fetch_word(bus);
    let hi_addr = if ptr & 0x00FF == 0x00FF {
        ptr & 0xFF00
    } else {
        ptr.wrapping_add(1)
    };
    let lo = bus.read(ptr) as u16;
    let hi = bus.read(hi_addr) as u16;
    cpu.addr_abs = (hi << 8) | lo;
    false
}

/// IZX (indexed indirect, `(zp,X)`): zero-page pointer at `(operand + X)`,
/// always wrapped to 8 bits on both bytes of the pointer.
pub(crate) fn am_izx(cpu: &mut CpuState, bus: &mut Bus) -> bool {
    let operand = cpu.fetch_byte(bus);
    let zp = operand.wrapping_add(cpu.x);
    let lo = bus.read(zp as u16) as u16;
    let hi = bus.read(zp.wrapping_add(1) as u16) as u16;
    cpu.addr_abs = (hi << 8) | lo;
    false
}

/// IZY (indirect indexed, `(zp),Y`): zero-page pointer at `operand`, then +Y;
/// signals a page cross. Pointer arithmetic is always wrapped to 8 bits.
pub(crate) fn am_izy(cpu: &mut CpuState, bus: &mut Bus) -> bool {
    let zp = cpu.fetch_byte(bus);
    let lo = bus.read(zp as u16) as u16;
    let hi = bus.read(zp.wrapping_add(1) as u16) as u16;
    let base = (hi << 8) | lo;
    let addr = base.wrapping_add(cpu.y as u16);
    cpu.addr_abs = addr;
    (addr & 0xFF00) != (base & 0xFF00)
}

/// REL (relative, branches only): sign-extends the operand byte into
/// `addr_rel`; the branch operation combines it with `pc` itself.
pub(crate) fn am_rel(cpu: &mut CpuState, bus: &mut Bus) -> bool {
    let operand = cpu.fetch_byte(bus) as u16;
    cpu.addr_rel = if operand & 0x80 != 0 {
        operand | 0xFF00
    } else {
        operand
    };
    false
}

/// Dispatch an [`AddrMode`] to its addressing function. Used by the opcode
/// table so each row only needs to carry the mode tag, not a function
/// pointer duplicating this match.
pub(crate) fn resolve(mode: AddrMode, cpu: &mut CpuState, bus: &mut Bus) -> bool {
    match mode {
        AddrMode::Imp => am_imp(cpu, bus),
        AddrMode::Imm => am_imm(cpu, bus),
        AddrMode::Zp0 => am_zp0(cpu, bus),
        AddrMode::ZpX => am_zpx(cpu, bus),
        AddrMode::ZpY => am_zpy(cpu, bus),
        AddrMode::Abs => am_abs(cpu, bus),
        AddrMode::AbX => am_abx(cpu, bus),
        AddrMode::AbY => am_aby(cpu, bus),
        AddrMode::Ind => am_ind(cpu, bus),
        AddrMode::IzX => am_izx(cpu, bus),
        AddrMode::IzY => am_izy(cpu, bus),
        AddrMode::Rel => am_rel(cpu, bus),
    }
}
