/*!
execute.rs - the 56 documented 6502 operation kernels.

Every operation here reads `cpu.fetched` (already primed by
[`super::state::CpuState::fetch`]) and returns a "this operation authorizes
the mode's page-cross penalty" signal; the table applies
`mode_signal & op_signal` itself.

Read-modify-write operations (ASL/LSR/ROL/ROR/INC/DEC) need to know whether
they are targeting the accumulator (implied mode) or a memory cell, so their
signature carries the resolved [`AddrMode`] alongside state and bus.
*/

use super::addressing::AddrMode;
use super::state::{
    CpuState, BREAK, CARRY, DECIMAL, IRQ_DISABLE, NEGATIVE, OVERFLOW, UNUSED, ZERO,
};
use crate::bus::Bus;

/// Signature shared by every operation kernel in the opcode table.
pub(crate) type OpFn = fn(&mut CpuState, &mut Bus, AddrMode) -> bool;

// -----------------------------------------------------------------------
// Loads / stores
// -----------------------------------------------------------------------

pub(crate) fn lda(cpu: &mut CpuState, bus: &mut Bus, mode: AddrMode) -> bool {
    cpu.fetch(bus, mode);
    cpu.a = cpu.fetched;
    cpu.update_zn(cpu.a);
    true
}

pub(crate) fn ldx(cpu: &mut CpuState, bus: &mut Bus, mode: AddrMode) -> bool {
    cpu.fetch(bus, mode);
    cpu.x = cpu.fetched;
    cpu.update_zn(cpu.x);
    true
}

pub(crate) fn ldy(cpu: &mut CpuState, bus: &mut Bus, mode: AddrMode) -> bool {
    cpu.fetch(bus, mode);
    cpu.y = cpu.fetched;
    cpu.update_zn(cpu.y);
    true
}

pub(crate) fn sta(cpu: &mut CpuState, bus: &mut Bus, _mode: AddrMode) -> bool {
    bus.write(cpu.addr_abs, cpu.a);
    false
}

pub(crate) fn stx(cpu: &mut CpuState, bus: &mut Bus, _mode: AddrMode) -> bool {
    bus.write(cpu.addr_abs, cpu.x);
    false
}

pub(crate) fn sty(cpu: &mut CpuState, bus: &mut Bus, _mode: AddrMode) -> bool {
    bus.write(cpu.addr_abs, cpu.y);
    false
}

// -----------------------------------------------------------------------
// Arithmetic
// -----------------------------------------------------------------------

pub(crate) fn adc(cpu: &mut CpuState, bus: &mut Bus, mode: AddrMode) -> bool {
    cpu.fetch(bus, mode);
    let a = cpu.a as u16;
    let m = cpu.fetched as u16;
    let c = cpu.is_flag_set(CARRY) as u16;
    let t = a + m + c;
    cpu.assign_flag(CARRY, t > 0xFF);
    cpu.assign_flag(ZERO, (t & 0x00FF) == 0);
    cpu.assign_flag(NEGATIVE, (t & 0x80) != 0);
    let overflow = !(a ^ m) & (a ^ t) & 0x0080;
    cpu.assign_flag(OVERFLOW, overflow != 0);
    cpu.a = (t & 0x00FF) as u8;
    true
}

pub(crate) fn sbc(cpu: &mut CpuState, bus: &mut Bus, mode: AddrMode) -> bool {
    cpu.fetch(bus, mode);
    let a = cpu.a as u16;
    let m = (cpu.fetched as u16) ^ 0x00FF;
    let c = cpu.is_flag_set(CARRY) as u16;
    let t = a + m + c;
    cpu.assign_flag(CARRY, t > 0xFF);
    cpu.assign_flag(ZERO, (t & 0x00FF) == 0);
    cpu.assign_flag(NEGATIVE, (t & 0x80) != 0);
    let overflow = (a ^ t) & (m ^ t) & 0x0080;
    cpu.assign_flag(OVERFLOW, overflow != 0);
    cpu.a = (t & 0x00FF) as u8;
    true
}

// -----------------------------------------------------------------------
// Logical
// -----------------------------------------------------------------------

pub(crate) fn and(cpu: &mut CpuState, bus: &mut Bus, mode: AddrMode) -> bool {
    cpu.fetch(bus, mode);
    cpu.a &= cpu.fetched;
    cpu.update_zn(cpu.a);
    true
}

pub(crate) fn ora(cpu: &mut CpuState, bus: &mut Bus, mode: AddrMode) -> bool {
    cpu.fetch(bus, mode);
    cpu.a |= cpu.fetched;
    cpu.update_zn(cpu.a);
    true
}

pub(crate) fn eor(cpu: &mut CpuState, bus: &mut Bus, mode: AddrMode) -> bool {
    cpu.fetch(bus, mode);
    cpu.a ^= cpu.fetched;
    cpu.update_zn(cpu.a);
    true
}

pub(crate) fn bit(cpu: &mut CpuState, bus: &mut Bus, mode: AddrMode) -> bool {
    cpu.fetch(bus, mode);
    let result = cpu.a & cpu.fetched;
    cpu.assign_flag(ZERO, result == 0);
    cpu.assign_flag(NEGATIVE, (cpu.fetched & 0x80) != 0);
    cpu.assign_flag(OVERFLOW, (cpu.fetched & 0x40) != 0);
    false
}

// -----------------------------------------------------------------------
// Compares
// -----------------------------------------------------------------------

fn compare(cpu: &mut CpuState, reg: u8) {
    let t = (reg as u16).wrapping_sub(cpu.fetched as u16);
    cpu.assign_flag(CARRY, reg >= cpu.fetched);
    cpu.assign_flag(ZERO, (t & 0x00FF) == 0);
    cpu.assign_flag(NEGATIVE, (t & 0x0080) != 0);
}

pub(crate) fn cmp(cpu: &mut CpuState, bus: &mut Bus, mode: AddrMode) -> bool {
    cpu.fetch(bus, mode);
    compare(cpu, cpu.a);
    true
}

pub(crate) fn cpx(cpu: &mut CpuState, bus: &mut Bus, mode: AddrMode) -> bool {
    cpu.fetch(bus, mode);
    compare(cpu, cpu.x);
    false
}

pub(crate) fn cpy(cpu: &mut CpuState, bus: &mut Bus, mode: AddrMode) -> bool {
    cpu.fetch(bus, mode);
    compare(cpu, cpu.y);
    false
}

// -----------------------------------------------------------------------
// Shifts and rotates
// -----------------------------------------------------------------------

pub(crate) fn asl(cpu: &mut CpuState, bus: &mut Bus, mode: AddrMode) -> bool {
    cpu.fetch(bus, mode);
    let result = (cpu.fetched as u16) << 1;
    cpu.assign_flag(CARRY, (result & 0xFF00) != 0);
    let result = result as u8;
    cpu.update_zn(result);
    write_shift_result(cpu, bus, mode, result);
    false
}

pub(crate) fn lsr(cpu: &mut CpuState, bus: &mut Bus, mode: AddrMode) -> bool {
    cpu.fetch(bus, mode);
    cpu.assign_flag(CARRY, (cpu.fetched & 0x01) != 0);
    let result = cpu.fetched >> 1;
    cpu.update_zn(result);
    write_shift_result(cpu, bus, mode, result);
    false
}

pub(crate) fn rol(cpu: &mut CpuState, bus: &mut Bus, mode: AddrMode) -> bool {
    cpu.fetch(bus, mode);
    let carry_in = cpu.is_flag_set(CARRY) as u16;
    let result = ((cpu.fetched as u16) << 1) | carry_in;
    cpu.assign_flag(CARRY, (result & 0xFF00) != 0);
    let result = result as u8;
    cpu.update_zn(result);
    write_shift_result(cpu, bus, mode, result);
    false
}

pub(crate) fn ror(cpu: &mut CpuState, bus: &mut Bus, mode: AddrMode) -> bool {
    cpu.fetch(bus, mode);
    let carry_in = cpu.is_flag_set(CARRY) as u8;
    let result = (cpu.fetched >> 1) | (carry_in << 7);
    cpu.assign_flag(CARRY, (cpu.fetched & 0x01) != 0);
    cpu.update_zn(result);
    write_shift_result(cpu, bus, mode, result);
    false
}

#[inline]
fn write_shift_result(cpu: &mut CpuState, bus: &mut Bus, mode: AddrMode, result: u8) {
    if mode == AddrMode::Imp {
        cpu.a = result;
    } else {
        bus.write(cpu.addr_abs, result);
    }
}

// -----------------------------------------------------------------------
// Increments / decrements
// -----------------------------------------------------------------------

pub(crate) fn inc(cpu: &mut CpuState, bus: &mut Bus, mode: AddrMode) -> bool {
    cpu.fetch(bus, mode);
    let result = cpu.fetched.wrapping_add(1);
    cpu.update_zn(result);
    bus.write(cpu.addr_abs, result);
    false
}

pub(crate) fn dec(cpu: &mut CpuState, bus: &mut Bus, mode: AddrMode) -> bool {
    cpu.fetch(bus, mode);
    let result = cpu.fetched.wrapping_sub(1);
    cpu.update_zn(result);
    bus.write(cpu.addr_abs, result);
    false
}

pub(crate) fn inx(cpu: &mut CpuState, _bus: &mut Bus, _mode: AddrMode) -> bool {
    cpu.x = cpu.x.wrapping_add(1);
    cpu.update_zn(cpu.x);
    false
}

pub(crate) fn dex(cpu: &mut CpuState, _bus: &mut Bus, _mode: AddrMode) -> bool {
    cpu.x = cpu.x.wrapping_sub(1);
    cpu.update_zn(cpu.x);
    false
}

pub(crate) fn iny(cpu: &mut CpuState, _bus: &mut Bus, _mode: AddrMode) -> bool {
    cpu.y = cpu.y.wrapping_add(1);
    cpu.update_zn(cpu.y);
    false
}

pub(crate) fn dey(cpu: &mut CpuState, _bus: &mut Bus, _mode: AddrMode) -> bool {
    cpu.y = cpu.y.wrapping_sub(1);
    cpu.update_zn(cpu.y);
    false
}

// -----------------------------------------------------------------------
// Branches
// -----------------------------------------------------------------------

#[inline]
fn branch_if(cpu: &mut CpuState, condition: bool) -> bool {
    if !condition {
        return false;
    }
    cpu.cycles += 1;
    let target = cpu.pc.wrapping_add(cpu.addr_rel);
    if (target & 0xFF00) != (cpu.pc & 0xFF00) {
        cpu.cycles += 1;
    }
    cpu.pc = target;
    false
}

pub(crate) fn bcc(cpu: &mut CpuState, _bus: &mut Bus, _mode: AddrMode) -> bool {
    branch_if(cpu, !cpu.is_flag_set(CARRY))
}

pub(crate) fn bcs(cpu: &mut CpuState, _bus: &mut Bus, _mode: AddrMode) -> bool {
    branch_if(cpu, cpu.is_flag_set(CARRY))
}

pub(crate) fn beq(cpu: &mut CpuState, _bus: &mut Bus, _mode: AddrMode) -> bool {
    branch_if(cpu, cpu.is_flag_set(ZERO))
}

pub(crate) fn bne(cpu: &mut CpuState, _bus: &mut Bus, _mode: AddrMode) -> bool {
    branch_if(cpu, !cpu.is_flag_set(ZERO))
}

pub(crate) fn bmi(cpu: &mut CpuState, _bus: &mut Bus, _mode: AddrMode) -> bool {
    branch_if(cpu, cpu.is_flag_set(NEGATIVE))
}

pub(crate) fn bpl(cpu: &mut CpuState, _bus: &mut Bus, _mode: AddrMode) -> bool {
    branch_if(cpu, !cpu.is_flag_set(NEGATIVE))
}

pub(crate) fn bvc(cpu: &mut CpuState, _bus: &mut Bus, _mode: AddrMode) -> bool {
    branch_if(cpu, !cpu.is_flag_set(OVERFLOW))
}

pub(crate) fn bvs(cpu: &mut CpuState, _bus: &mut Bus, _mode: AddrMode) -> bool {
    branch_if(cpu, cpu.is_flag_set(OVERFLOW))
}

// -----------------------------------------------------------------------
// Jumps and calls
// -----------------------------------------------------------------------

pub(crate) fn jmp(cpu: &mut CpuState, _bus: &mut Bus, _mode: AddrMode) -> bool {
    cpu.pc = cpu.addr_abs;
    false
}

pub(crate) fn jsr(cpu: &mut CpuState, bus: &mut Bus, _mode: AddrMode) -> bool {
    let return_to = cpu.pc.wrapping_sub(1);
    cpu.push_u16(bus, return_to);
    cpu.pc = cpu.addr_abs;
    false
}

pub(crate) fn rts(cpu: &mut CpuState, bus: &mut Bus, _mode: AddrMode) -> bool {
    let pulled = cpu.pop_u16(bus);
    cpu.pc = pulled.wrapping_add(1);
    false
}

pub(crate) fn brk(cpu: &mut CpuState, bus: &mut Bus, _mode: AddrMode) -> bool {
    // The IMM addressing mode already advanced pc past BRK's padding byte.
    cpu.push_u16(bus, cpu.pc);
    let status = cpu.compose_status_for_push(true);
    cpu.push_u8(bus, status);
    cpu.set_flag_bit(IRQ_DISABLE);
    cpu.pc = bus.read_word(0xFFFE);
    false
}

pub(crate) fn rti(cpu: &mut CpuState, bus: &mut Bus, _mode: AddrMode) -> bool {
    let pulled_status = cpu.pop_u8(bus);
    cpu.status = (pulled_status & !(BREAK | UNUSED)) | UNUSED;
    cpu.pc = cpu.pop_u16(bus);
    false
}

// -----------------------------------------------------------------------
// Stack ops
// -----------------------------------------------------------------------

pub(crate) fn pha(cpu: &mut CpuState, bus: &mut Bus, _mode: AddrMode) -> bool {
    cpu.push_u8(bus, cpu.a);
    false
}

pub(crate) fn php(cpu: &mut CpuState, bus: &mut Bus, _mode: AddrMode) -> bool {
    let status = cpu.compose_status_for_push(true);
    cpu.push_u8(bus, status);
    false
}

pub(crate) fn pla(cpu: &mut CpuState, bus: &mut Bus, _mode: AddrMode) -> bool {
    cpu.a = cpu.pop_u8(bus);
    cpu.update_zn(cpu.a);
    false
}

pub(crate) fn plp(cpu: &mut CpuState, bus: &mut Bus, _mode: AddrMode) -> bool {
    let pulled = cpu.pop_u8(bus);
    cpu.status = pulled | UNUSED;
    false
}

// -----------------------------------------------------------------------
// Flag ops
// -----------------------------------------------------------------------

pub(crate) fn clc(cpu: &mut CpuState, _bus: &mut Bus, _mode: AddrMode) -> bool {
    cpu.clear_flag_bit(CARRY);
    false
}

pub(crate) fn cld(cpu: &mut CpuState, _bus: &mut Bus, _mode: AddrMode) -> bool {
    cpu.clear_flag_bit(DECIMAL);
    false
}

pub(crate) fn cli(cpu: &mut CpuState, _bus: &mut Bus, _mode: AddrMode) -> bool {
    cpu.clear_flag_bit(IRQ_DISABLE);
    false
}

pub(crate) fn clv(cpu: &mut CpuState, _bus: &mut Bus, _mode: AddrMode) -> bool {
    cpu.clear_flag_bit(OVERFLOW);
    false
}

pub(crate) fn sec(cpu: &mut CpuState, _bus: &mut Bus, _mode: AddrMode) -> bool {
    cpu.set_flag_bit(CARRY);
    false
}

pub(crate) fn sed(cpu: &mut CpuState, _bus: &mut Bus, _mode: AddrMode) -> bool {
    cpu.set_flag_bit(DECIMAL);
    false
}

pub(crate) fn sei(cpu: &mut CpuState, _bus: &mut Bus, _mode: AddrMode) -> bool {
    cpu.set_flag_bit(IRQ_DISABLE);
    false
}

// -----------------------------------------------------------------------
// Transfers
// -----------------------------------------------------------------------

pub(crate) fn tax(cpu: &mut CpuState, _bus: &mut Bus, _mode: AddrMode) -> bool {
    cpu.x = cpu.a;
    cpu.update_zn(cpu.x);
    false
}

pub(crate) fn tay(cpu: &mut CpuState, _bus: &mut Bus, _mode: AddrMode) -> bool {
    cpu.y = cpu.a;
    cpu.update_zn(cpu.y);
    false
}

pub(crate) fn tsx(cpu: &mut CpuState, _bus: &mut Bus, _mode: AddrMode) -> bool {
    cpu.x = cpu.sp;
    cpu.update_zn(cpu.x);
    false
}

pub(crate) fn txa(cpu: &mut CpuState, _bus: &mut Bus, _mode: AddrMode) -> bool {
    cpu.a = cpu.x;
    cpu.update_zn(cpu.a);
    false
}

pub(crate) fn tya(cpu: &mut CpuState, _bus: &mut Bus, _mode: AddrMode) -> bool {
    cpu.a = cpu.y;
    cpu.update_zn(cpu.a);
    false
}

pub(crate) fn txs(cpu: &mut CpuState, _bus: &mut Bus, _mode: AddrMode) -> bool {
    cpu.sp = cpu.x;
    false
}

// -----------------------------------------------------------------------
// NOP (documented illegal NOPs authorize the page-cross penalty; the rest
// of the undocumented opcode space in table.rs reuses this same kernel)
// -----------------------------------------------------------------------

pub(crate) fn nop(_cpu: &mut CpuState, _bus: &mut Bus, _mode: AddrMode) -> bool {
    false
}

/// The five documented illegal absolute,X NOPs (`0x1C/3C/5C/7C/DC/FC`)
/// authorize the mode's page-cross penalty where plain NOP does not.
pub(crate) fn nop_penalized(_cpu: &mut CpuState, _bus: &mut Bus, _mode: AddrMode) -> bool {
    true
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::bus::{AddressRange, Ram};

    fn ram_bus() -> Bus {
        let mut bus = Bus::new();
        bus.register(AddressRange::new(0x0000, 0xFFFF), Box::new(Ram::new(0x10000)))
            .unwrap();
        bus
    }

    #[test]
    fn adc_sets_carry_and_overflow_on_signed_overflow() {
        let mut bus = ram_bus();
        let mut cpu = CpuState::new();
        cpu.a = 0x7F;
        cpu.fetched = 0x01;
        cpu.addr_abs = 0x0000;
        bus.write(0x0000, 0x01);
        adc(&mut cpu, &mut bus, AddrMode::Imm);
        assert_eq!(cpu.a, 0x80);
        assert!(cpu.is_flag_set(OVERFLOW));
        assert!(cpu.is_flag_set(NEGATIVE));
        assert!(!cpu.is_flag_set(CARRY));
    }

    #[test]
    fn adc_then_sbc_round_trips_a_with_same_operand_and_carry() {
        let mut bus = ram_bus();
        bus.write(0x0000, 0x37);
        let mut cpu = CpuState::new();
        cpu.a = 0x10;
        cpu.set_flag_bit(CARRY);
        cpu.addr_abs = 0x0000;
        adc(&mut cpu, &mut bus, AddrMode::Abs);
        sbc(&mut cpu, &mut bus, AddrMode::Abs);
        assert_eq!(cpu.a, 0x10);
    }

    #[test]
    fn asl_implied_targets_accumulator_and_sets_carry() {
        let mut bus = ram_bus();
        let mut cpu = CpuState::new();
        cpu.a = 0x80;
        asl(&mut cpu, &mut bus, AddrMode::Imp);
        assert_eq!(cpu.a, 0x00);
        assert!(cpu.is_flag_set(CARRY));
        assert!(cpu.is_flag_set(ZERO));
    }

    #[test]
    fn asl_memory_mode_writes_back_to_addr_abs() {
        let mut bus = ram_bus();
        bus.write(0x0042, 0x40);
        let mut cpu = CpuState::new();
        cpu.addr_abs = 0x0042;
        asl(&mut cpu, &mut bus, AddrMode::Zp0);
        assert_eq!(bus.read(0x0042), 0x80);
    }

    #[test]
    fn branch_taken_charges_extra_cycle_and_another_on_page_cross() {
        let mut cpu = CpuState::new();
        cpu.pc = 0x80F0;
        cpu.addr_rel = 0x0020; // crosses from page $80 into $81
        cpu.set_flag_bit(CARRY);
        let before = cpu.cycles;
        bcs(&mut cpu, &mut ram_bus(), AddrMode::Rel);
        assert_eq!(cpu.pc, 0x8110);
        assert_eq!(cpu.cycles, before + 2);
    }

    #[test]
    fn branch_not_taken_leaves_pc_and_cycles_untouched() {
        let mut cpu = CpuState::new();
        cpu.pc = 0x8000;
        cpu.addr_rel = 0x0010;
        let before = cpu.cycles;
        bcs(&mut cpu, &mut ram_bus(), AddrMode::Rel);
        assert_eq!(cpu.pc, 0x8000);
        assert_eq!(cpu.cycles, before);
    }

    #[test]
    fn jsr_pushes_return_address_minus_one_high_byte_first() {
        let mut bus = ram_bus();
        let mut cpu = CpuState::new();
        cpu.sp = 0xFD;
        cpu.pc = 0x8005;
        cpu.addr_abs = 0x1234;
        jsr(&mut cpu, &mut bus, AddrMode::Abs);
        assert_eq!(cpu.pc, 0x1234);
        assert_eq!(cpu.sp, 0xFB);
        assert_eq!(bus.read(0x01FD), 0x80);
        assert_eq!(bus.read(0x01FC), 0x04);
    }

    #[test]
    fn jsr_then_rts_restores_pc_after_the_call_instruction() {
        let mut bus = ram_bus();
        let mut cpu = CpuState::new();
        cpu.sp = 0xFD;
        cpu.pc = 0x8003;
        cpu.addr_abs = 0x1234;
        jsr(&mut cpu, &mut bus, AddrMode::Abs);
        rts(&mut cpu, &mut bus, AddrMode::Imp);
        assert_eq!(cpu.pc, 0x8003);
        assert_eq!(cpu.sp, 0xFD);
    }

    #[test]
    fn php_sets_break_and_unused_plp_clears_break_but_keeps_unused() {
        let mut bus = ram_bus();
        let mut cpu = CpuState::new();
        cpu.sp = 0xFD;
        cpu.status = CARRY;
        php(&mut cpu, &mut bus, AddrMode::Imp);
        assert_eq!(bus.read(0x01FD), CARRY | BREAK | UNUSED);
        cpu.status = 0;
        plp(&mut cpu, &mut bus, AddrMode::Imp);
        assert_eq!(cpu.status, CARRY | UNUSED);
    }

    #[test]
    fn pha_then_pla_round_trips_accumulator_and_stack_pointer() {
        let mut bus = ram_bus();
        let mut cpu = CpuState::new();
        cpu.sp = 0xFD;
        cpu.a = 0x99;
        let sp0 = cpu.sp;
        pha(&mut cpu, &mut bus, AddrMode::Imp);
        cpu.a = 0x00;
        pla(&mut cpu, &mut bus, AddrMode::Imp);
        assert_eq!(cpu.a, 0x99);
        assert_eq!(cpu.sp, sp0);
    }

    #[test]
    fn cmp_sets_carry_when_register_greater_or_equal() {
        let mut bus = ram_bus();
        bus.write(0x0000, 0x10);
        let mut cpu = CpuState::new();
        cpu.a = 0x10;
        cpu.addr_abs = 0x0000;
        cmp(&mut cpu, &mut bus, AddrMode::Imm);
        assert!(cpu.is_flag_set(CARRY));
        assert!(cpu.is_flag_set(ZERO));
    }

    #[test]
    fn txs_does_not_touch_flags() {
        let mut cpu = CpuState::new();
        cpu.status = 0;
        cpu.x = 0x80;
        txs(&mut cpu, &mut ram_bus(), AddrMode::Imp);
        assert_eq!(cpu.sp, 0x80);
        assert_eq!(cpu.status, 0);
    }
}
