use std::fs;

use clap::Parser;
use lazuli::ast::pretty;

/// lazuli is a small, statically typed scripting language with lazy
/// variables and first-class functions.
#[derive(Parser, Debug)]
#[command(version, about, long_about = None)]
struct Args {
    /// Tells lazuli to look at a file instead of an inline script.
    #[arg(short, long)]
    file: bool,

    /// Print the parsed program back as canonical source instead of
    /// executing it.
    #[arg(short, long)]
    ast: bool,

    contents: String,
}

fn main() {
    let args = Args::parse();

    let script = if args.file {
        fs::read_to_string(&args.contents).unwrap_or_else(|_| {
            eprintln!("Failed to read the input file '{}'. Perhaps this file does not exist?",
                      &args.contents);
            std::process::exit(1);
        })
    } else {
        args.contents
    };

    if args.ast {
        match lazuli::parse(&script) {
            Ok(program) => print!("{}", pretty::program(&program)),
            Err(e) => {
                eprintln!("{e}");
                std::process::exit(1);
            },
        }
        return;
    }

    match lazuli::run(&script) {
        Ok(execution) => {
            print!("{}", execution.standard_out);
            std::process::exit(execution.exit_code);
        },
        Err(e) => {
            eprintln!("{e}");
            std::process::exit(1);
        },
    }
}
