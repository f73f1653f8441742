/*!
bus/mod.rs - generic memory-mapped device registry and address router.

A registry of `Box<dyn Device>` behind `AddressRange`s, so RAM/ROM/
register-window devices are attached at runtime rather than hard-coded into
a fixed struct, and overlapping registrations are rejected instead of
silently shadowing one another.

Ownership is one-way: the `Bus` owns every device; the CPU is handed a
`&mut Bus` per call and never stores one, so there is no cyclic
Device-holds-Bus / Bus-holds-Device graph to reason about.
*/

pub mod device;
pub mod ram;
pub mod rom;
pub mod stub;

pub use device::{AddressRange, Device};
pub use ram::Ram;
pub use rom::Rom;
pub use stub::StubRegisters;

use crate::error::BusError;

struct Mounted {
    range: AddressRange,
    device: Box<dyn Device>,
}

/// Address router: owns a set of memory-mapped [`Device`]s with disjoint
/// [`AddressRange`]s and forwards CPU reads/writes to whichever one claims
/// a given 16-bit address.
#[derive(Default)]
pub struct Bus {
    devices: Vec<Mounted>,
    /// Count of reads that fell through to open bus, for test assertions.
    /// Not part of the public contract; exposed read-only for diagnostics.
    open_bus_reads: u64,
}

impl Bus {
    pub fn new() -> Self {
        Self {
            devices: Vec::new(),
            open_bus_reads: 0,
        }
    }

    /// Register a device to own `range`. Fails if `range` overlaps any
    /// already-registered device's range.
    pub fn register(
        &mut self,
        range: AddressRange,
        device: Box<dyn Device>,
    ) -> Result<(), BusError> {
        if let Some(existing) = self.devices.iter().find(|m| m.range.overlaps(&range)) {
            return Err(BusError::DuplicateDevice(existing.device.name()));
        }
        self.devices.push(Mounted { range, device });
        Ok(())
    }

    fn find(&self, addr: u16) -> Option<usize> {
        self.devices.iter().position(|m| m.range.contains(addr))
    }

    /// Read a byte, routing to the owning device. Unowned addresses return
    /// `0x00` (open bus), matching hardware; this never panics.
    pub fn read(&mut self, addr: u16) -> u8 {
        match self.find(addr) {
            Some(idx) => {
                let mounted = &mut self.devices[idx];
                let local = mounted.range.local(addr);
                mounted.device.read(local)
            }
            None => {
                self.open_bus_reads += 1;
                0x00
            }
        }
    }

    /// Write a byte, routing to the owning device. Writes to an unowned
    /// address, or to a read-only device's range, are silently dropped.
    pub fn write(&mut self, addr: u16, value: u8) {
        if let Some(idx) = self.find(addr) {
            let mounted = &mut self.devices[idx];
            let local = mounted.range.local(addr);
            mounted.device.write(local, value);
        }
    }

    /// Read-only variant used by the disassembler; never triggers a
    /// device's side-effecting read path.
    pub fn peek(&self, addr: u16) -> u8 {
        match self.devices.iter().find(|m| m.range.contains(addr)) {
            Some(mounted) => mounted.device.peek(mounted.range.local(addr)),
            None => 0x00,
        }
    }

    /// Read a 16-bit little-endian word via [`Bus::peek`] (non side-effecting).
    pub fn peek_word(&self, addr: u16) -> u16 {
        let lo = self.peek(addr) as u16;
        let hi = self.peek(addr.wrapping_add(1)) as u16;
        (hi << 8) | lo
    }

    /// Read a 16-bit little-endian word via [`Bus::read`].
    pub fn read_word(&mut self, addr: u16) -> u16 {
        let lo = self.read(addr) as u16;
        let hi = self.read(addr.wrapping_add(1)) as u16;
        (hi << 8) | lo
    }

    /// Number of reads that fell through to open bus since construction.
    pub fn open_bus_reads(&self) -> u64 {
        self.open_bus_reads
    }
}
