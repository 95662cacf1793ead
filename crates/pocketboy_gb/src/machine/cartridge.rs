mod mbc1;

use mbc1::Mbc1;

/// Failure to accept a ROM image at load time. Everything past this point
/// is absorbed at run time (unmapped reads return 0xFF, writes are dropped).
#[derive(Debug, thiserror::Error, PartialEq, Eq)]
pub enum LoadError {
    #[error("ROM image is empty")]
    Empty,
    #[error("ROM image is {len} bytes, smaller than one 16 KiB bank")]
    Truncated { len: usize },
}

/// Bank controller variant. Each case carries only the controller state;
/// the ROM/RAM bytes live on the [`Cartridge`].
///
/// Adding MBC2/3/5 means adding a case here and arms to the three dispatch
/// points below.
enum Mapper {
    /// Type 0x00: no controller, writes to the ROM area are ignored.
    RomOnly,
    Mbc1(Mbc1),
}

/// A loaded cartridge: the immutable ROM image, the external RAM backing
/// sized from the header, and the bank controller.
pub(crate) struct Cartridge {
    rom: Vec<u8>,
    ram: Vec<u8>,
    mapper: Mapper,
    rom_banks: usize,
    ram_banks: usize,
    cart_type: u8,
}

impl Cartridge {
    /// Parse the header and take ownership of the image.
    ///
    /// Header bytes: 0x147 cartridge type, 0x148 ROM-size code, 0x149
    /// RAM-size code. Images too short to hold a header load as ROM-only
    /// with no external RAM.
    pub(crate) fn from_bytes(image: &[u8]) -> Result<Self, LoadError> {
        if image.is_empty() {
            return Err(LoadError::Empty);
        }
        if image.len() < 0x4000 {
            return Err(LoadError::Truncated { len: image.len() });
        }

        let cart_type = image.get(0x147).copied().unwrap_or(0);
        let rom_code = image.get(0x148).copied().unwrap_or(0);
        let ram_code = image.get(0x149).copied().unwrap_or(0);

        let rom_banks = match rom_code {
            0x00..=0x08 => 2usize << rom_code,
            // Unofficial size codes.
            0x52 => 72,
            0x53 => 80,
            0x54 => 96,
            _ => (image.len() / 0x4000).max(1),
        };

        let ram_banks = match ram_code {
            0x02 => 1,
            0x03 => 4,
            0x04 => 16,
            0x05 => 8,
            _ => 0,
        };

        let mapper = match cart_type {
            0x01..=0x03 => Mapper::Mbc1(Mbc1::new()),
            _ => Mapper::RomOnly,
        };

        log::info!(
            "cartridge loaded: type=0x{:02X} rom_banks={} ram_banks={} ({} bytes)",
            cart_type,
            rom_banks,
            ram_banks,
            image.len()
        );

        Ok(Self {
            rom: image.to_vec(),
            ram: vec![0; ram_banks * 0x2000],
            mapper,
            rom_banks,
            ram_banks,
            cart_type,
        })
    }

    /// Reset the controller registers and clear external RAM.
    pub(crate) fn reset(&mut self) {
        self.ram.fill(0);
        match &mut self.mapper {
            Mapper::RomOnly => {}
            Mapper::Mbc1(mbc) => *mbc = Mbc1::new(),
        }
    }

    /// Read from the ROM area (0x0000-0x7FFF) at the currently mapped bank.
    pub(crate) fn rom_read(&self, addr: u16) -> u8 {
        let bank = if addr < 0x4000 {
            0
        } else {
            self.switchable_rom_bank()
        };
        let offset = bank * 0x4000 + (addr & 0x3FFF) as usize;
        self.rom.get(offset).copied().unwrap_or(0xFF)
    }

    /// Handle a CPU write into the ROM area: bank-controller programming.
    pub(crate) fn rom_write(&mut self, addr: u16, value: u8) {
        match &mut self.mapper {
            Mapper::RomOnly => {}
            Mapper::Mbc1(mbc) => mbc.register_write(addr, value),
        }
    }

    /// Read external RAM (0xA000-0xBFFF); 0xFF when absent or disabled.
    pub(crate) fn ram_read(&self, addr: u16) -> u8 {
        if !self.ram_enabled() || self.ram_banks == 0 {
            return 0xFF;
        }
        let offset = self.ram_bank() * 0x2000 + (addr - 0xA000) as usize;
        self.ram.get(offset).copied().unwrap_or(0xFF)
    }

    /// Write external RAM; dropped when absent or disabled.
    pub(crate) fn ram_write(&mut self, addr: u16, value: u8) {
        if !self.ram_enabled() || self.ram_banks == 0 {
            return;
        }
        let offset = self.ram_bank() * 0x2000 + (addr - 0xA000) as usize;
        if let Some(slot) = self.ram.get_mut(offset) {
            *slot = value;
        }
    }

    /// Effective bank for the switchable ROM window.
    fn switchable_rom_bank(&self) -> usize {
        match &self.mapper {
            // Without a controller the second bank is fixed.
            Mapper::RomOnly => 1,
            Mapper::Mbc1(mbc) => mbc.rom_bank() % self.rom_banks,
        }
    }

    /// Effective external-RAM bank.
    fn ram_bank(&self) -> usize {
        match &self.mapper {
            Mapper::RomOnly => 0,
            Mapper::Mbc1(mbc) => {
                if self.ram_banks == 0 {
                    0
                } else {
                    mbc.ram_bank() % self.ram_banks
                }
            }
        }
    }

    fn ram_enabled(&self) -> bool {
        match &self.mapper {
            // The enable latch lives on the controller; without one there is
            // no way to open the RAM window.
            Mapper::RomOnly => false,
            Mapper::Mbc1(mbc) => mbc.ram_enabled(),
        }
    }

    /// Whether the cartridge type declares battery backing for its RAM.
    pub(crate) fn battery_backed(&self) -> bool {
        // MBC1+RAM+BATTERY is the only battery type in scope.
        self.cart_type == 0x03 && !self.ram.is_empty()
    }

    /// External RAM snapshot for battery-backed hosts.
    pub(crate) fn ram(&self) -> &[u8] {
        &self.ram
    }

    /// Restore a previously snapshotted external RAM image. Length
    /// mismatches are clipped to the backing size.
    pub(crate) fn restore_ram(&mut self, data: &[u8]) {
        let len = data.len().min(self.ram.len());
        self.ram[..len].copy_from_slice(&data[..len]);
    }
}
