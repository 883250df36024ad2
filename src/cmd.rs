use crate::context::Context;
use crate::error::Error;
use crate::result::Result;
use std::ffi::OsStr;
use std::collections::VecDeque;
use std::io::{BufRead, BufReader};
use std::process::{Command, Stdio};
use std::thread;

/// Trailing stderr lines kept for the failure message.
const STDERR_TAIL_LINES: usize = 20;

fn describe<S: AsRef<OsStr>>(program: &str, args: &[S]) -> String {
    let mut line = program.to_string();
    for arg in args {
        line.push(' ');
        line.push_str(&arg.as_ref().to_string_lossy());
    }
    line
}

/// Run an external tool to completion.
///
/// Output is echoed when verbose mode is enabled. Failure to spawn and a
/// non-zero exit both become `Error::ArchiveFailed`, carrying whatever the
/// tool wrote to stderr.
pub fn execute<S: AsRef<OsStr>>(ctx: &Context, program: &str, args: &[S]) -> Result<()> {
    let command_line = describe(program, args);
    if ctx.verbose {
        println!("Executing: {}", command_line);
    }

    let mut child = Command::new(program)
        .args(args)
        .stdin(Stdio::null())
        .stdout(Stdio::piped())
        .stderr(Stdio::piped())
        .spawn()
        .map_err(|e| Error::ArchiveFailed(format!("unable to run {}: {}", program, e)))?;

    // stderr drains on its own thread so a chatty tool cannot fill the pipe
    // while stdout is still being read.
    let verbose = ctx.verbose;
    let stderr_reader = child.stderr.take().map(|stderr| {
        thread::spawn(move || {
            let mut tail = VecDeque::with_capacity(STDERR_TAIL_LINES);
            let reader = BufReader::new(stderr);
            for line in reader.lines().map_while(|l| l.ok()) {
                if verbose {
                    eprintln!("{}", line);
                }
                if tail.len() == STDERR_TAIL_LINES {
                    tail.pop_front();
                }
                tail.push_back(line);
            }
            tail
        })
    });

    if let Some(stdout) = child.stdout.take() {
        let reader = BufReader::new(stdout);
        for line in reader.lines().map_while(|l| l.ok()) {
            if ctx.verbose {
                println!("{}", line);
            }
        }
    }

    let stderr_lines: Vec<String> = stderr_reader
        .and_then(|handle| handle.join().ok())
        .map(Vec::from)
        .unwrap_or_default();

    let status = child.wait()?;

    if !status.success() {
        let code = status
            .code()
            .map(|c| c.to_string())
            .unwrap_or_else(|| "signal".to_string());
        let mut message = format!("{} failed with exit code: {}", command_line, code);
        if !stderr_lines.is_empty() {
            message.push('\n');
            message.push_str(&stderr_lines.join("\n"));
        }
        return Err(Error::ArchiveFailed(message));
    }

    Ok(())
}
