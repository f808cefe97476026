mod session;

use std::env;
use std::io::{self, BufRead, Write};
use std::process;

use session::Session;

fn main() -> io::Result<()> {
    let message = parse_message().unwrap_or_else(|err| {
        eprintln!("{err}");
        eprintln!("Usage: wand-emulator [--message <TEXT>]");
        process::exit(2);
    });

    let stdin = io::stdin();
    let mut reader = stdin.lock();
    let stdout = io::stdout();
    let mut writer = stdout.lock();
    let mut session = Session::new(&message).unwrap_or_else(|err| {
        eprintln!("Invalid startup message: {err}");
        process::exit(2);
    });
    let mut line = String::new();

    writeln!(
        writer,
        "POV Wand Emulator ready. Type `help` for commands or `exit` to quit."
    )?;

    loop {
        line.clear();
        write!(writer, "> ")?;
        writer.flush()?;

        let bytes_read = reader.read_line(&mut line)?;
        if bytes_read == 0 {
            writeln!(writer)?;
            break;
        }

        let trimmed = line.trim();
        if trimmed.is_empty() {
            continue;
        }

        if should_terminate(trimmed) {
            writeln!(writer, "Session closed.")?;
            break;
        }

        for response in session.handle_command(trimmed) {
            writeln!(writer, "{response}")?;
        }
    }

    Ok(())
}

fn should_terminate(input: &str) -> bool {
    input.eq_ignore_ascii_case("exit") || input.eq_ignore_ascii_case("quit")
}

fn parse_message() -> Result<String, String> {
    let mut args = env::args().skip(1);
    if let Some(arg) = args.next() {
        if let Some(value) = arg.strip_prefix("--message=") {
            Ok(value.to_string())
        } else if arg == "--message" {
            args.next()
                .ok_or_else(|| "Expected value after --message".to_string())
        } else {
            Err(format!("Unknown argument `{arg}`"))
        }
    } else {
        Ok(session::DEFAULT_MESSAGE.to_string())
    }
}
