use super::{Bus, Cpu, Flag};

impl Cpu {
    /// Execute a CB-prefixed instruction (rotates, shifts, SWAP, BIT, RES,
    /// SET) and return its cycle cost.
    ///
    /// The second opcode byte decodes into three fields:
    /// - x = bits 7-6: operation class (shift/rotate, BIT, RES, SET)
    /// - y = bits 5-3: sub-operation or bit index
    /// - z = bits 2-0: operand selector (same encoding as `read_reg8`)
    ///
    /// The table is complete; real ROMs rely on every entry.
    pub(super) fn exec_cb<B: Bus>(&mut self, bus: &mut B) -> u32 {
        let cb = self.fetch8(bus);
        let x = cb >> 6;
        let y = (cb >> 3) & 0x07;
        let z = cb & 0x07;

        match x {
            // Rotates and shifts.
            0 => {
                let value = self.read_reg8(bus, z);
                let result = match y {
                    0 => self.alu_rlc(value),
                    1 => self.alu_rrc(value),
                    2 => self.alu_rl(value),
                    3 => self.alu_rr(value),
                    4 => self.alu_sla(value),
                    5 => self.alu_sra(value),
                    6 => self.alu_swap(value),
                    _ => self.alu_srl(value),
                };
                self.write_reg8(bus, z, result);
                if z == 6 {
                    16
                } else {
                    8
                }
            }

            // BIT y, r: test a bit; C is preserved, H forced, N cleared.
            1 => {
                let value = self.read_reg8(bus, z);
                self.set_flag(Flag::Z, value & (1 << y) == 0);
                self.set_flag(Flag::N, false);
                self.set_flag(Flag::H, true);
                if z == 6 {
                    12
                } else {
                    8
                }
            }

            // RES y, r: clear a bit. No flags.
            2 => {
                let value = self.read_reg8(bus, z) & !(1 << y);
                self.write_reg8(bus, z, value);
                if z == 6 {
                    16
                } else {
                    8
                }
            }

            // SET y, r: set a bit. No flags.
            _ => {
                let value = self.read_reg8(bus, z) | (1 << y);
                self.write_reg8(bus, z, value);
                if z == 6 {
                    16
                } else {
                    8
                }
            }
        }
    }
}
