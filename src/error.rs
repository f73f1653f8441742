//! Crate error types.
//!
//! Plain enums and hand-written `Display`/`Error` impls rather than a
//! derive macro: the bus's two real failure modes (open bus, duplicate
//! device) get actual variants instead of strings, since callers need to
//! match on them.

use std::fmt;

/// Errors surfaced by [`crate::bus::Bus`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BusError {
    /// No registered device claims this address.
    NoOwner(u16),
    /// `Bus::register` was given a device whose range overlaps an existing one.
    DuplicateDevice(&'static str),
}

impl fmt::Display for BusError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            BusError::NoOwner(addr) => write!(f, "no device owns address ${addr:04X}"),
            BusError::DuplicateDevice(name) => {
                write!(f, "device \"{name}\" overlaps an already-registered range")
            }
        }
    }
}

impl std::error::Error for BusError {}

/// Programmer error from [`crate::cpu::Cpu::get_flag`] / `set_flag` with an
/// unrecognized flag character. Never surfaced to end users; kept as a typed
/// value so the panic message is constructed in one place and is testable.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FlagError(pub char);

impl fmt::Display for FlagError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "invalid status flag '{}'", self.0)
    }
}

impl std::error::Error for FlagError {}
