use std::env;
use std::fs;
use std::io::{self, Read};
use std::process;

use chicken::{ChickenError, ErrorCode, Interpreter, Syntax};

const USAGE: &str = "\
chicken: Chicken interpreter
Usage: chicken [filename] [-m]
  filename    Program file to interpret; read from standard input when omitted
  -m          Interpret simplified syntax (integer weights) instead of standard Chicken
When the program or the input comes from standard input, terminate it with '@'.
Set the CHICKEN_DEBUG environment variable to trace execution step by step.";

fn print_error(err: &ChickenError) {
    let prefix = match err.code {
        ErrorCode::Usage => "Usage error",
        ErrorCode::Syntax => "Syntax error",
        ErrorCode::Fault => "Runtime error",
    };
    eprintln!("{}: {}", prefix, err.message);
}

/// Read stdin up to the `@` terminator (or EOF). `@` is ASCII, so reading
/// byte-wise never splits a multi-byte character.
fn read_until_marker() -> String {
    let mut buf = Vec::new();
    for byte in io::stdin().bytes() {
        let byte = byte.unwrap_or_else(|err| {
            eprintln!("Failed to read stdin: {}", err);
            process::exit(1);
        });
        if byte == b'@' {
            break;
        }
        buf.push(byte);
    }
    String::from_utf8(buf).unwrap_or_else(|_| {
        eprintln!("stdin was not valid UTF-8");
        process::exit(1);
    })
}

fn trace_enabled() -> bool {
    match env::var("CHICKEN_DEBUG") {
        Ok(val) => !val.is_empty() && val != "0",
        Err(_) => false,
    }
}

fn parse_args(args: &[String]) -> Result<(Option<String>, bool), ChickenError> {
    let mut simplified = false;
    let mut filename: Option<String> = None;
    for arg in args {
        if arg == "-m" {
            if simplified {
                return Err(ChickenError::usage("'-m' given twice"));
            }
            simplified = true;
        } else if filename.is_none() {
            filename = Some(arg.clone());
        } else {
            return Err(ChickenError::usage(format!("unexpected argument '{}'", arg)));
        }
    }
    Ok((filename, simplified))
}

fn main() {
    let args: Vec<String> = env::args().skip(1).collect();
    if args.iter().any(|a| a == "-h" || a == "--help") {
        println!("{}", USAGE);
        return;
    }

    let (filename, simplified) = parse_args(&args).unwrap_or_else(|err| {
        print_error(&err);
        eprintln!("{}", USAGE);
        process::exit(1);
    });

    let program = match &filename {
        Some(path) => fs::read_to_string(path).unwrap_or_else(|err| {
            eprintln!("Failed to read {}: {}", path, err);
            process::exit(1);
        }),
        None => read_until_marker(),
    };
    let input = read_until_marker();

    let mut interpreter = Interpreter::new();
    interpreter.set_syntax(if simplified {
        Syntax::Simplified
    } else {
        Syntax::Standard
    });
    interpreter.set_trace(trace_enabled());

    match interpreter.run(&program, &input) {
        Ok(output) => println!("{}", output),
        Err(err) => {
            print_error(&err);
            process::exit(1);
        }
    }
}
