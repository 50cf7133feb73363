use ncterm::flags::Flags;
use ncterm::terminal::{self, Terminal};
use std::env;

fn main() -> Result<(), ncterm::error::TerminalError> {
    let mut flags = Flags::new();
    let args: Vec<String> = env::args().skip(1).collect();
    flags.parse(&args)?;

    if flags.is_set("help") {
        flags.print_help();
        return Ok(());
    }

    if flags.is_set("version") {
        println!("NatureCode Terminal v{}", env!("CARGO_PKG_VERSION"));
        return Ok(());
    }

    if let Some(line) = flags.get_value("exec") {
        let line = line.clone();
        return terminal::execute_line(&line);
    }

    let mut terminal = Terminal::new(flags)?;
    terminal.run()
}
