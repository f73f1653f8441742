#![doc = r#"
mos6502 library crate.

A standalone MOS 6502 CPU core, a generic memory-mapped bus/device
registry, and a pure disassembler.

Modules:
- bus: address router with a registry of `Device`s behind non-overlapping
  `AddressRange`s; `Ram`, `Rom`, and `StubRegisters` are the bundled devices
- cpu: the `Cpu` facade, its register/flag state, the thirteen addressing
  modes, the 56 operation kernels, the frozen 256-entry opcode table, and
  the pure disassembler
- error: `BusError` and `FlagError`, the only error types the core exposes
"#]

pub mod bus;
pub mod cpu;
pub mod error;

pub use bus::Bus;
pub use cpu::Cpu;
pub use error::{BusError, FlagError};
