use anyhow::{Context, Result};
use pocketboy_gb::GameBoy;

/// How often (in executed instructions) the run loop logs machine state.
const TRACE_INTERVAL: u64 = 1_000_000;

/// Load a ROM image from disk and run it headless for a bounded number of
/// instructions, logging machine state along the way.
pub fn run(rom_path: &str, max_instructions: u64) -> Result<()> {
    let rom = std::fs::read(rom_path)
        .with_context(|| format!("failed to read ROM file {rom_path}"))?;

    let mut gb = GameBoy::new();
    gb.load(&rom)
        .with_context(|| format!("failed to load ROM image {rom_path}"))?;

    let mut total_cycles: u64 = 0;
    for executed in 0..max_instructions {
        total_cycles += gb.step_instruction() as u64;

        if executed % TRACE_INTERVAL == 0 {
            let regs = &gb.cpu.regs;
            log::info!(
                "instr={} cycles={} pc=0x{:04X} sp=0x{:04X} af=0x{:04X} bc=0x{:04X} de=0x{:04X} hl=0x{:04X} ime={} halted={} LY={} IF=0x{:02X} IE=0x{:02X}",
                executed,
                total_cycles,
                regs.pc,
                regs.sp,
                regs.af(),
                regs.bc(),
                regs.de(),
                regs.hl(),
                gb.cpu.ime,
                gb.cpu.halted,
                gb.read_byte(0xFF44),
                gb.read_byte(0xFF0F),
                gb.read_byte(0xFFFF),
            );
        }
    }

    log::info!(
        "finished: {} instructions, {} cycles, pc=0x{:04X}",
        max_instructions,
        total_cycles,
        gb.cpu.regs.pc
    );
    Ok(())
}
