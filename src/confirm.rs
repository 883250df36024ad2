use crate::args::ClearMode;
use crate::result::Result;
use std::io::{self, BufRead, IsTerminal, Write};

pub const CLEAR_PROMPT: &str = "An output appears to already exist. Clear it?";

/// Decide whether an existing staging directory gets cleared.
///
/// `ask` is only consulted in `ClearMode::Ask` and only when the directory
/// exists.
pub fn decide_clear<F>(exists: bool, mode: ClearMode, ask: F) -> Result<bool>
where
    F: FnOnce() -> io::Result<bool>,
{
    if !exists {
        return Ok(false);
    }

    Ok(match mode {
        ClearMode::Always => true,
        ClearMode::Never => false,
        ClearMode::Ask => ask()?,
    })
}

/// Read one answer line. Only `y` or `Y` consents; end of input is a "no".
pub fn read_answer<R: BufRead>(mut reader: R) -> io::Result<bool> {
    let mut line = String::new();
    reader.read_line(&mut line)?;
    Ok(line.trim().eq_ignore_ascii_case("y"))
}

/// Ask on the terminal through cliclack, or read a plain line from stdin
/// when it is piped or closed.
pub fn ask_clear() -> io::Result<bool> {
    let stdin = io::stdin();
    if stdin.is_terminal() {
        return cliclack::confirm(CLEAR_PROMPT).initial_value(false).interact();
    }

    print!("{} [y/N]: ", CLEAR_PROMPT);
    io::stdout().flush()?;
    let answer = read_answer(stdin.lock())?;
    println!();
    Ok(answer)
}
