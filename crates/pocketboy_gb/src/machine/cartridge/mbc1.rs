/// MBC1 bank-controller state.
///
/// Two bank registers combine into the ROM bank for the switchable window:
/// a 5-bit low register (a written 0 is rewritten to 1) and a 2-bit high
/// register. The mode bit decides whether the high register also selects
/// the external-RAM bank.
pub(super) struct Mbc1 {
    bank_low: u8,
    bank_high: u8,
    /// 0 = simple / ROM banking, 1 = RAM banking.
    mode: u8,
    ram_enabled: bool,
}

impl Mbc1 {
    pub(super) fn new() -> Self {
        Self {
            bank_low: 1,
            bank_high: 0,
            mode: 0,
            ram_enabled: false,
        }
    }

    /// Decode a CPU write into the ROM area into a register update.
    pub(super) fn register_write(&mut self, addr: u16, value: u8) {
        match addr {
            // RAM enable: only the magic low nibble opens the window.
            0x0000..=0x1FFF => {
                self.ram_enabled = value & 0x0F == 0x0A;
            }
            // ROM bank, low 5 bits; 0 selects 1.
            0x2000..=0x3FFF => {
                self.bank_low = value & 0x1F;
                if self.bank_low == 0 {
                    self.bank_low = 1;
                }
                log::debug!("mbc1: rom bank low = {}", self.bank_low);
            }
            // ROM bank high bits / RAM bank, depending on mode.
            0x4000..=0x5FFF => {
                self.bank_high = value & 0x03;
            }
            // Banking mode.
            0x6000..=0x7FFF => {
                self.mode = value & 0x01;
            }
            _ => {}
        }
    }

    /// Raw combined ROM bank for the switchable window, before the modulo
    /// against the image's bank count.
    #[inline]
    pub(super) fn rom_bank(&self) -> usize {
        ((self.bank_high as usize) << 5) | self.bank_low as usize
    }

    /// Raw external-RAM bank: the high register in RAM-banking mode, 0
    /// otherwise.
    #[inline]
    pub(super) fn ram_bank(&self) -> usize {
        if self.mode == 1 {
            self.bank_high as usize
        } else {
            0
        }
    }

    #[inline]
    pub(super) fn ram_enabled(&self) -> bool {
        self.ram_enabled
    }
}
