use crate::cpu::Cpu;

use super::cartridge::{Cartridge, LoadError};
use super::joypad::Button;
use super::SystemBus;

/// High-level Game Boy machine.
///
/// Owns the CPU core and the system bus; all other subsystems (cartridge,
/// timer, PPU, joypad, APU stub) live behind the bus. This is the entry
/// point a host drives.
pub struct GameBoy {
    pub cpu: Cpu,
    pub(crate) bus: SystemBus,
}

impl Default for GameBoy {
    fn default() -> Self {
        Self::new()
    }
}

impl GameBoy {
    pub fn new() -> Self {
        Self {
            cpu: Cpu::new(),
            bus: SystemBus::new(),
        }
    }

    /// Load a ROM image and reset every subsystem.
    ///
    /// Fails on an empty or sub-bank-sized image; anything else is accepted
    /// with header fields falling back to sensible defaults.
    pub fn load(&mut self, image: &[u8]) -> Result<(), LoadError> {
        let cartridge = Cartridge::from_bytes(image)?;
        self.bus.insert_cartridge(cartridge);
        self.reset();
        Ok(())
    }

    /// Reset the machine: clear all RAM regions, restore MBC bank registers
    /// and the CPU initial state. The loaded cartridge ROM is kept.
    pub fn reset(&mut self) {
        self.cpu.reset();
        self.bus.reset();
    }

    /// Execute one CPU instruction, advance the peripherals by its cost and
    /// return the number of T-cycles consumed.
    ///
    /// Interrupt requests raised by the timer or PPU while catching up are
    /// observed by the CPU at the next instruction boundary.
    pub fn step_instruction(&mut self) -> u32 {
        let cycles = self.cpu.step(&mut self.bus);
        self.bus.tick(cycles);
        cycles
    }

    /// Latch a joypad button state.
    pub fn set_button(&mut self, button: Button, pressed: bool) {
        self.bus.set_button(button, pressed);
    }

    /// Debug read through the bus, outside of any instruction.
    pub fn read_byte(&self, addr: u16) -> u8 {
        self.bus.read8_mmio(addr)
    }

    /// Debug write through the bus, outside of any instruction.
    pub fn write_byte(&mut self, addr: u16, value: u8) {
        self.bus.write8_mmio(addr, value);
    }

    /// Snapshot of the battery-backed external RAM, if the loaded cartridge
    /// has any. The byte layout is the raw RAM image.
    pub fn battery_ram(&self) -> Option<&[u8]> {
        self.bus
            .cartridge()
            .filter(|cart| cart.battery_backed())
            .map(|cart| cart.ram())
    }

    /// Restore a battery RAM snapshot taken with [`Self::battery_ram`].
    pub fn restore_battery_ram(&mut self, data: &[u8]) {
        if let Some(cart) = self.bus.cartridge_mut() {
            if cart.battery_backed() {
                cart.restore_ram(data);
            }
        }
    }
}
