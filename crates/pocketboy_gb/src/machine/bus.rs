use crate::cpu::Bus;

use super::apu::Apu;
use super::cartridge::Cartridge;
use super::joypad::{Button, Joypad};
use super::ppu::Ppu;
use super::timer::Timer;

mod dma;
mod mmio;

/// System bus: the single owner of every addressable region and of the
/// bus-side peripherals.
///
/// All subsystems communicate through here; the interrupt-flag register is
/// the rendezvous point (any peripheral ORs request bits in, only the CPU
/// clears them).
pub(crate) struct SystemBus {
    /// Video RAM, bank 0 (the only bank on DMG).
    vram: Vec<u8>,
    /// Work RAM: 8 banks of 4 KiB. Banks 0-1 are the DMG window; the bank
    /// register at 0xFF70 exists for the remaining banks.
    wram: Vec<u8>,
    /// Selected WRAM bank for 0xD000-0xDFFF (1..=7; 0 maps to 1).
    wram_bank: u8,
    /// Object attribute memory, 160 bytes.
    oam: [u8; 0xA0],
    /// High RAM, 127 bytes.
    hram: [u8; 0x7F],
    /// IO register page 0xFF00-0xFF7F. Registers with dedicated owners
    /// (joypad, timer, APU, IF) are routed past this array.
    io: [u8; 0x80],
    pub(crate) if_reg: u8,
    pub(crate) ie_reg: u8,
    cartridge: Option<Cartridge>,
    pub(crate) timer: Timer,
    pub(crate) ppu: Ppu,
    pub(crate) joypad: Joypad,
    apu: Apu,
}

impl SystemBus {
    pub(crate) fn new() -> Self {
        Self {
            vram: vec![0; 0x2000],
            wram: vec![0; 8 * 0x1000],
            wram_bank: 1,
            oam: [0; 0xA0],
            hram: [0; 0x7F],
            io: [0; 0x80],
            if_reg: 0,
            ie_reg: 0,
            cartridge: None,
            timer: Timer::new(),
            ppu: Ppu::new(),
            joypad: Joypad::new(),
            apu: Apu::new(),
        }
    }

    /// Clear all RAM regions and reset every bus-side peripheral. The
    /// cartridge ROM stays loaded; its RAM and bank registers reset.
    pub(crate) fn reset(&mut self) {
        self.vram.fill(0);
        self.wram.fill(0);
        self.wram_bank = 1;
        self.oam.fill(0);
        self.hram.fill(0);
        self.io.fill(0);
        self.if_reg = 0;
        self.ie_reg = 0;
        if let Some(cart) = self.cartridge.as_mut() {
            cart.reset();
        }
        self.timer.reset();
        self.ppu.reset();
        self.joypad.reset();
        self.apu.reset();
    }

    pub(crate) fn insert_cartridge(&mut self, cartridge: Cartridge) {
        self.cartridge = Some(cartridge);
    }

    pub(crate) fn cartridge(&self) -> Option<&Cartridge> {
        self.cartridge.as_ref()
    }

    pub(crate) fn cartridge_mut(&mut self) -> Option<&mut Cartridge> {
        self.cartridge.as_mut()
    }

    /// Advance the bus-side peripherals by a number of CPU T-cycles.
    ///
    /// Called once per executed instruction with that instruction's cost;
    /// the order (timer, PPU, APU) is fixed but unobservable, since requests
    /// only meet the CPU at the next instruction boundary.
    pub(crate) fn tick(&mut self, cycles: u32) {
        self.timer.step(cycles, &mut self.if_reg);
        self.ppu.step(cycles, &mut self.io, &mut self.if_reg);
        self.apu.step(cycles);
    }

    /// Latch a joypad button and raise the joypad interrupt on a
    /// high-to-low transition of a selected line.
    pub(crate) fn set_button(&mut self, button: Button, pressed: bool) {
        if self.joypad.set_button(button, pressed) {
            self.if_reg |= 0x10;
        }
    }
}

impl Bus for SystemBus {
    fn read8(&mut self, addr: u16) -> u8 {
        self.read8_mmio(addr)
    }

    fn write8(&mut self, addr: u16, value: u8) {
        self.write8_mmio(addr, value)
    }
}
