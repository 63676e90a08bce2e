use std::{
    env,
    fs::read_to_string,
    io::{self, BufRead, Write},
    path::Path,
    process::ExitCode,
    time::Instant,
};

use monkey::{format_error, init_tracing, lexer::lexer::Lexer, parser::parser::parse};
use tracing::debug;

const PROMPT: &str = ">> ";

fn main() -> ExitCode {
    init_tracing();

    let args: Vec<String> = env::args().collect();

    match args.as_slice() {
        [_] => repl(),
        [_, file_path] => parse_file(file_path),
        _ => {
            eprintln!("usage: monkey [file]");
            ExitCode::FAILURE
        }
    }
}

/// Parses a whole file, printing its reconstruction or every error found.
fn parse_file(file_path: &str) -> ExitCode {
    let file_name = Path::new(file_path)
        .file_name()
        .map(|name| name.to_string_lossy().into_owned())
        .unwrap_or_else(|| file_path.to_string());

    let source = match read_to_string(file_path) {
        Ok(source) => source,
        Err(error) => {
            eprintln!("Failed to read {}: {}", file_path, error);
            return ExitCode::FAILURE;
        }
    };

    let start = Instant::now();
    let (program, errors) = parse(Lexer::new(source.as_str(), Some(file_name)));
    debug!(elapsed = ?start.elapsed(), "parsed {}", file_path);

    if !errors.is_empty() {
        for error in &errors {
            eprint!("{}", format_error(error, &source));
        }
        eprintln!("{} error(s) found, not continuing", errors.len());
        return ExitCode::FAILURE;
    }

    println!("{}", program);
    ExitCode::SUCCESS
}

/// Reads one line at a time, printing each line's reconstruction.
fn repl() -> ExitCode {
    let stdin = io::stdin();
    let mut stdout = io::stdout();

    loop {
        print!("{}", PROMPT);
        if stdout.flush().is_err() {
            return ExitCode::FAILURE;
        }

        let mut line = String::new();
        match stdin.lock().read_line(&mut line) {
            Ok(0) => return ExitCode::SUCCESS,
            Ok(_) => {}
            Err(error) => {
                eprintln!("Failed to read input: {}", error);
                return ExitCode::FAILURE;
            }
        }

        let (program, errors) = parse(Lexer::new(line.as_str(), None));

        if errors.is_empty() {
            println!("{}", program);
        } else {
            for error in &errors {
                print!("{}", format_error(error, &line));
            }
        }
    }
}
