use super::{Bus, Cpu, Flag};

impl Cpu {
    /// Decode and execute a single opcode and return the number of T-cycles.
    ///
    /// The regular opcode classes (LD r,r', the 8-bit ALU block, INC/DEC r,
    /// LD r,d8) decode through the shared three-bit register selector; the
    /// irregular rows of the table get explicit arms.
    pub(super) fn exec_opcode<B: Bus>(&mut self, bus: &mut B, opcode: u8) -> u32 {
        match opcode {
            // NOP
            0x00 => 4,

            // LD rr, d16
            0x01 => {
                let value = self.fetch16(bus);
                self.regs.set_bc(value);
                12
            }
            0x11 => {
                let value = self.fetch16(bus);
                self.regs.set_de(value);
                12
            }
            0x21 => {
                let value = self.fetch16(bus);
                self.regs.set_hl(value);
                12
            }
            0x31 => {
                self.regs.sp = self.fetch16(bus);
                12
            }

            // LD (BC/DE), A and the HL+/HL- stores
            0x02 => {
                bus.write8(self.regs.bc(), self.regs.a);
                8
            }
            0x12 => {
                bus.write8(self.regs.de(), self.regs.a);
                8
            }
            0x22 => {
                let addr = self.regs.hl();
                bus.write8(addr, self.regs.a);
                self.regs.set_hl(addr.wrapping_add(1));
                8
            }
            0x32 => {
                let addr = self.regs.hl();
                bus.write8(addr, self.regs.a);
                self.regs.set_hl(addr.wrapping_sub(1));
                8
            }

            // LD A, (BC/DE) and the HL+/HL- loads
            0x0A => {
                self.regs.a = bus.read8(self.regs.bc());
                8
            }
            0x1A => {
                self.regs.a = bus.read8(self.regs.de());
                8
            }
            0x2A => {
                let addr = self.regs.hl();
                self.regs.a = bus.read8(addr);
                self.regs.set_hl(addr.wrapping_add(1));
                8
            }
            0x3A => {
                let addr = self.regs.hl();
                self.regs.a = bus.read8(addr);
                self.regs.set_hl(addr.wrapping_sub(1));
                8
            }

            // 16-bit INC/DEC
            0x03 => {
                let value = self.regs.bc().wrapping_add(1);
                self.regs.set_bc(value);
                8
            }
            0x13 => {
                let value = self.regs.de().wrapping_add(1);
                self.regs.set_de(value);
                8
            }
            0x23 => {
                let value = self.regs.hl().wrapping_add(1);
                self.regs.set_hl(value);
                8
            }
            0x33 => {
                self.regs.sp = self.regs.sp.wrapping_add(1);
                8
            }
            0x0B => {
                let value = self.regs.bc().wrapping_sub(1);
                self.regs.set_bc(value);
                8
            }
            0x1B => {
                let value = self.regs.de().wrapping_sub(1);
                self.regs.set_de(value);
                8
            }
            0x2B => {
                let value = self.regs.hl().wrapping_sub(1);
                self.regs.set_hl(value);
                8
            }
            0x3B => {
                self.regs.sp = self.regs.sp.wrapping_sub(1);
                8
            }

            // INC r / INC (HL)
            0x04 | 0x0C | 0x14 | 0x1C | 0x24 | 0x2C | 0x34 | 0x3C => {
                let index = (opcode >> 3) & 0x07;
                let value = self.read_reg8(bus, index);
                let result = self.alu_inc8(value);
                self.write_reg8(bus, index, result);
                if index == 6 {
                    12
                } else {
                    4
                }
            }

            // DEC r / DEC (HL)
            0x05 | 0x0D | 0x15 | 0x1D | 0x25 | 0x2D | 0x35 | 0x3D => {
                let index = (opcode >> 3) & 0x07;
                let value = self.read_reg8(bus, index);
                let result = self.alu_dec8(value);
                self.write_reg8(bus, index, result);
                if index == 6 {
                    12
                } else {
                    4
                }
            }

            // LD r, d8 / LD (HL), d8
            0x06 | 0x0E | 0x16 | 0x1E | 0x26 | 0x2E | 0x36 | 0x3E => {
                let index = (opcode >> 3) & 0x07;
                let value = self.fetch8(bus);
                self.write_reg8(bus, index, value);
                if index == 6 {
                    12
                } else {
                    8
                }
            }

            // Rotates of A. These clear Z, unlike their CB-prefixed twins.
            0x07 => {
                let a = self.regs.a;
                self.regs.a = self.alu_rlc(a);
                self.set_flag(Flag::Z, false);
                4
            }
            0x0F => {
                let a = self.regs.a;
                self.regs.a = self.alu_rrc(a);
                self.set_flag(Flag::Z, false);
                4
            }
            0x17 => {
                let a = self.regs.a;
                self.regs.a = self.alu_rl(a);
                self.set_flag(Flag::Z, false);
                4
            }
            0x1F => {
                let a = self.regs.a;
                self.regs.a = self.alu_rr(a);
                self.set_flag(Flag::Z, false);
                4
            }

            // LD (a16), SP
            0x08 => {
                let addr = self.fetch16(bus);
                bus.write8(addr, self.regs.sp as u8);
                bus.write8(addr.wrapping_add(1), (self.regs.sp >> 8) as u8);
                20
            }

            // ADD HL, rr
            0x09 => {
                let value = self.regs.bc();
                self.alu_add16_hl(value);
                8
            }
            0x19 => {
                let value = self.regs.de();
                self.alu_add16_hl(value);
                8
            }
            0x29 => {
                let value = self.regs.hl();
                self.alu_add16_hl(value);
                8
            }
            0x39 => {
                let value = self.regs.sp;
                self.alu_add16_hl(value);
                8
            }

            // STOP: two-byte instruction; the padding byte is consumed here.
            0x10 => {
                let _padding = self.fetch8(bus);
                self.stopped = true;
                self.halted = false;
                4
            }

            // JR / JR cc
            0x18 => self.jr(bus, true),
            0x20 => {
                let cond = !self.get_flag(Flag::Z);
                self.jr(bus, cond)
            }
            0x28 => {
                let cond = self.get_flag(Flag::Z);
                self.jr(bus, cond)
            }
            0x30 => {
                let cond = !self.get_flag(Flag::C);
                self.jr(bus, cond)
            }
            0x38 => {
                let cond = self.get_flag(Flag::C);
                self.jr(bus, cond)
            }

            // DAA
            0x27 => {
                self.alu_daa();
                4
            }

            // CPL
            0x2F => {
                self.regs.a = !self.regs.a;
                self.set_flag(Flag::N, true);
                self.set_flag(Flag::H, true);
                4
            }

            // SCF
            0x37 => {
                self.set_flag(Flag::N, false);
                self.set_flag(Flag::H, false);
                self.set_flag(Flag::C, true);
                4
            }

            // CCF
            0x3F => {
                let carry = self.get_flag(Flag::C);
                self.set_flag(Flag::N, false);
                self.set_flag(Flag::H, false);
                self.set_flag(Flag::C, !carry);
                4
            }

            // HALT sits in the middle of the LD r,r' block.
            0x76 => {
                self.halted = true;
                4
            }

            // LD r, r' with both operands as three-bit selectors.
            0x40..=0x7F => {
                let dst = (opcode >> 3) & 0x07;
                let src = opcode & 0x07;
                let value = self.read_reg8(bus, src);
                self.write_reg8(bus, dst, value);
                if dst == 6 || src == 6 {
                    8
                } else {
                    4
                }
            }

            // 8-bit ALU block: {ADD,ADC,SUB,SBC,AND,XOR,OR,CP}[(op>>3)&7]
            // applied to the operand selected by op&7.
            0x80..=0xBF => {
                let src = opcode & 0x07;
                let value = self.read_reg8(bus, src);
                self.alu_dispatch((opcode >> 3) & 0x07, value);
                if src == 6 {
                    8
                } else {
                    4
                }
            }

            // RET cc / RET / RETI
            0xC0 => {
                let cond = !self.get_flag(Flag::Z);
                self.ret_cond(bus, cond)
            }
            0xC8 => {
                let cond = self.get_flag(Flag::Z);
                self.ret_cond(bus, cond)
            }
            0xD0 => {
                let cond = !self.get_flag(Flag::C);
                self.ret_cond(bus, cond)
            }
            0xD8 => {
                let cond = self.get_flag(Flag::C);
                self.ret_cond(bus, cond)
            }
            0xC9 => {
                self.regs.pc = self.pop_u16(bus);
                16
            }
            0xD9 => {
                // RETI enables IME immediately, with no EI-style delay.
                self.regs.pc = self.pop_u16(bus);
                self.ime = true;
                16
            }

            // POP rr
            0xC1 => {
                let value = self.pop_u16(bus);
                self.regs.set_bc(value);
                12
            }
            0xD1 => {
                let value = self.pop_u16(bus);
                self.regs.set_de(value);
                12
            }
            0xE1 => {
                let value = self.pop_u16(bus);
                self.regs.set_hl(value);
                12
            }
            0xF1 => {
                let value = self.pop_u16(bus);
                self.regs.set_af(value);
                12
            }

            // PUSH rr
            0xC5 => {
                let value = self.regs.bc();
                self.push_u16(bus, value);
                16
            }
            0xD5 => {
                let value = self.regs.de();
                self.push_u16(bus, value);
                16
            }
            0xE5 => {
                let value = self.regs.hl();
                self.push_u16(bus, value);
                16
            }
            0xF5 => {
                let value = self.regs.af();
                self.push_u16(bus, value);
                16
            }

            // JP / JP cc
            0xC3 => {
                self.regs.pc = self.fetch16(bus);
                16
            }
            0xC2 => {
                let cond = !self.get_flag(Flag::Z);
                self.jp_cond(bus, cond)
            }
            0xCA => {
                let cond = self.get_flag(Flag::Z);
                self.jp_cond(bus, cond)
            }
            0xD2 => {
                let cond = !self.get_flag(Flag::C);
                self.jp_cond(bus, cond)
            }
            0xDA => {
                let cond = self.get_flag(Flag::C);
                self.jp_cond(bus, cond)
            }

            // JP (HL): the target is HL itself, no indirection despite the
            // historical mnemonic.
            0xE9 => {
                self.regs.pc = self.regs.hl();
                4
            }

            // CALL / CALL cc
            0xCD => self.call_cond(bus, true),
            0xC4 => {
                let cond = !self.get_flag(Flag::Z);
                self.call_cond(bus, cond)
            }
            0xCC => {
                let cond = self.get_flag(Flag::Z);
                self.call_cond(bus, cond)
            }
            0xD4 => {
                let cond = !self.get_flag(Flag::C);
                self.call_cond(bus, cond)
            }
            0xDC => {
                let cond = self.get_flag(Flag::C);
                self.call_cond(bus, cond)
            }

            // RST vectors
            0xC7 => self.rst(bus, 0x00),
            0xCF => self.rst(bus, 0x08),
            0xD7 => self.rst(bus, 0x10),
            0xDF => self.rst(bus, 0x18),
            0xE7 => self.rst(bus, 0x20),
            0xEF => self.rst(bus, 0x28),
            0xF7 => self.rst(bus, 0x30),
            0xFF => self.rst(bus, 0x38),

            // ALU with immediate operand; the operation field decodes the
            // same way as the 0x80-0xBF block.
            0xC6 | 0xCE | 0xD6 | 0xDE | 0xE6 | 0xEE | 0xF6 | 0xFE => {
                let value = self.fetch8(bus);
                self.alu_dispatch((opcode >> 3) & 0x07, value);
                8
            }

            // LDH: high-page loads/stores at 0xFF00 + offset.
            0xE0 => {
                let offset = self.fetch8(bus) as u16;
                bus.write8(0xFF00 | offset, self.regs.a);
                12
            }
            0xF0 => {
                let offset = self.fetch8(bus) as u16;
                self.regs.a = bus.read8(0xFF00 | offset);
                12
            }
            0xE2 => {
                bus.write8(0xFF00 | self.regs.c as u16, self.regs.a);
                8
            }
            0xF2 => {
                self.regs.a = bus.read8(0xFF00 | self.regs.c as u16);
                8
            }

            // LD (a16), A / LD A, (a16)
            0xEA => {
                let addr = self.fetch16(bus);
                bus.write8(addr, self.regs.a);
                16
            }
            0xFA => {
                let addr = self.fetch16(bus);
                self.regs.a = bus.read8(addr);
                16
            }

            // ADD SP, e8
            0xE8 => {
                let imm = self.fetch8(bus);
                self.regs.sp = self.alu_add16_signed(self.regs.sp, imm);
                16
            }

            // LD HL, SP+e8
            0xF8 => {
                let imm = self.fetch8(bus);
                let result = self.alu_add16_signed(self.regs.sp, imm);
                self.regs.set_hl(result);
                12
            }

            // LD SP, HL
            0xF9 => {
                self.regs.sp = self.regs.hl();
                8
            }

            // DI takes effect immediately and cancels a pending EI.
            0xF3 => {
                self.ime = false;
                self.ime_enable_pending = false;
                self.ime_enable_delay = false;
                4
            }

            // EI arms the delayed enable; IME is set after the *next*
            // instruction completes.
            0xFB => {
                self.ime_enable_pending = true;
                4
            }

            // CB prefix: bit/rotate/shift table.
            0xCB => self.exec_cb(bus),

            // Opcode holes. Real hardware locks up; this core reports them
            // and continues as a NOP so misbehaving ROMs keep running.
            0xD3 | 0xDB | 0xDD | 0xE3 | 0xE4 | 0xEB | 0xEC | 0xED | 0xF4 | 0xFC | 0xFD => {
                log::warn!(
                    "illegal opcode 0x{:02X} at PC=0x{:04X}; treating as NOP",
                    opcode,
                    self.regs.pc.wrapping_sub(1)
                );
                4
            }
        }
    }

    /// Shared dispatch for the 8-bit ALU operation field.
    #[inline]
    fn alu_dispatch(&mut self, op: u8, value: u8) {
        match op {
            0 => self.alu_add(value, false),
            1 => self.alu_add(value, true),
            2 => self.alu_sub(value, false),
            3 => self.alu_sub(value, true),
            4 => self.alu_and(value),
            5 => self.alu_xor(value),
            6 => self.alu_or(value),
            _ => self.alu_cp(value),
        }
    }
}
