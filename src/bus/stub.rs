/*!
stub.rs - placeholder register window for an unimplemented peripheral.

A PPU, APU, or other memory-mapped peripheral the bus should be able to
mount a port for without this crate implementing its internals.
`StubRegisters` is that port: a fixed-size register block that records the
last byte written to each offset (so a test or a future real device can
inspect what the CPU tried to do) and otherwise behaves like open bus on
read.
*/

use super::device::Device;

pub struct StubRegisters {
    name: &'static str,
    last_write: Vec<u8>,
}

impl StubRegisters {
    pub fn new(name: &'static str, size: u16) -> Self {
        assert!(size > 0, "StubRegisters requires a non-zero size");
        Self {
            name,
            last_write: vec![0; size as usize],
        }
    }

    /// Last byte written to a given local offset, for test assertions.
    pub fn last_write_at(&self, local_addr: u16) -> u8 {
        self.last_write[(local_addr as usize) % self.last_write.len()]
    }
}

impl Device for StubRegisters {
    fn name(&self) -> &'static str {
        self.name
    }

    fn read(&mut self, _local_addr: u16) -> u8 {
        0x00
    }

    fn peek(&self, _local_addr: u16) -> u8 {
        0x00
    }

    fn write(&mut self, local_addr: u16, value: u8) {
        let len = self.last_write.len();
        self.last_write[(local_addr as usize) % len] = value;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn reads_are_open_bus_zero() {
        let mut stub = StubRegisters::new("ppu-registers", 8);
        assert_eq!(stub.read(0), 0x00);
    }

    #[test]
    fn writes_are_recorded_not_applied_to_reads() {
        let mut stub = StubRegisters::new("apu-registers", 0x20);
        stub.write(0x05, 0x7F);
        assert_eq!(stub.last_write_at(0x05), 0x7F);
        assert_eq!(stub.read(0x05), 0x00);
    }
}
