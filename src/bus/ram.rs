/*!
ram.rs - generic mirrored RAM device.

An arbitrary backing size and mirror period, so the same device works for
a console's `0x0000..=0x1FFF` CPU RAM window (2 KiB of storage mirrored
every 2 KiB) or any other mirrored RAM layout.
*/

use super::device::Device;

/// RAM with a fixed backing store that repeats (mirrors) every
/// `mirror_size` bytes across a larger address window.
pub struct Ram {
    data: Vec<u8>,
    mirror_mask: u16,
}

impl Ram {
    /// `mirror_size` must be a power of two; it is the size of the backing
    /// store and the period at which addresses within the device's window
    /// wrap back to offset 0.
    pub fn new(mirror_size: u16) -> Self {
        assert!(
            mirror_size.is_power_of_two(),
            "Ram mirror_size must be a power of two"
        );
        Self {
            data: vec![0; mirror_size as usize],
            mirror_mask: mirror_size - 1,
        }
    }

    #[inline]
    fn index(&self, local_addr: u16) -> usize {
        (local_addr & self.mirror_mask) as usize
    }
}

impl Device for Ram {
    fn name(&self) -> &'static str {
        "ram"
    }

    fn read(&mut self, local_addr: u16) -> u8 {
        self.data[self.index(local_addr)]
    }

    fn peek(&self, local_addr: u16) -> u8 {
        self.data[self.index(local_addr)]
    }

    fn write(&mut self, local_addr: u16, value: u8) {
        let idx = self.index(local_addr);
        self.data[idx] = value;
    }
}
