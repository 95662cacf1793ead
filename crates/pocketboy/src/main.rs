const DEFAULT_INSTRUCTIONS: u64 = 10_000_000;

fn main() {
    env_logger::init();

    let mut args = std::env::args().skip(1);
    let Some(rom_path) = args.next() else {
        eprintln!("usage: pocketboy <rom-path> [instruction-count]");
        std::process::exit(2);
    };
    let max_instructions = args
        .next()
        .and_then(|count| count.parse().ok())
        .unwrap_or(DEFAULT_INSTRUCTIONS);

    if let Err(err) = pocketboy::run(&rom_path, max_instructions) {
        log::error!("{err:#}");
        std::process::exit(1);
    }
}
