//! Main application entry point (native).

#[cfg(feature = "native")]
fn main() {
    use std::io::{BufRead, Write};
    use swatchbook_app::{Shell, ShellStatus, SystemClipboard, TerminalLocation, parse_command};
    use swatchbook_core::{EngineConfig, Host, PaletteEngine, Platform, RandomColorGenerator};

    env_logger::init();
    log::info!("Starting Swatchbook");

    let config = match std::env::var("SWATCHBOOK_CONFIG") {
        Ok(path) => match EngineConfig::load(&path) {
            Ok(config) => config,
            Err(e) => {
                log::error!("Failed to load config from {}: {}", path, e);
                EngineConfig::default()
            }
        },
        Err(_) => EngineConfig::default(),
    };

    let arg = std::env::args().nth(1);
    let host = Host::new(SystemClipboard::new(), TerminalLocation::from_arg(arg.as_deref()));
    let engine = PaletteEngine::new(config, RandomColorGenerator::new(), host);
    let mut shell = Shell::new(engine, Platform::current());

    println!("{}", shell.render());
    println!("type `help` for commands");

    let stdin = std::io::stdin();
    let mut stdout = std::io::stdout();
    loop {
        print!("> ");
        if let Err(e) = stdout.flush() {
            log::error!("Failed to write prompt: {}", e);
            break;
        }

        let mut line = String::new();
        match stdin.lock().read_line(&mut line) {
            Ok(0) => break,
            Ok(_) => {}
            Err(e) => {
                log::error!("Failed to read input: {}", e);
                break;
            }
        }

        match parse_command(&line) {
            Ok(None) => {}
            Ok(Some(command)) => match shell.execute(command) {
                ShellStatus::Continue(text) => println!("{}", text),
                ShellStatus::Quit => break,
            },
            Err(e) => println!("{}", e),
        }
    }
}

#[cfg(not(feature = "native"))]
fn main() {
    panic!("Native feature not enabled. Use `cargo run --features native`");
}
