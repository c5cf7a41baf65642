use std::{
    fs,
    io::{self, Read},
    process::ExitCode,
};

use clap::Parser;
use plume::{
    Options,
    interpreter::{evaluator::core::Context, lexer::tokenize},
};
use tracing_subscriber::{EnvFilter, fmt};

/// plume runs small scripts made of assignments, `print`, `if`, `while` and
/// functions.
#[derive(Parser, Debug)]
#[command(version, about, long_about = None)]
struct Args {
    /// Tells plume to look at a file instead of a script.
    #[arg(short, long)]
    file: bool,

    /// Pipe mode prints the value of a top-level `return` after the script
    /// finishes.
    #[arg(short, long)]
    pipe_mode: bool,

    /// Maximum nesting of function calls before the script is stopped.
    #[arg(long, default_value_t = plume::interpreter::evaluator::core::DEFAULT_MAX_CALL_DEPTH)]
    max_call_depth: usize,

    /// Print the token stream and exit.
    #[arg(long)]
    tokens: bool,

    /// Print the syntax tree and exit.
    #[arg(long, conflicts_with = "tokens")]
    ast: bool,

    /// The script, or a path with `--file`. Read from stdin when omitted.
    contents: Option<String>,
}

fn main() -> ExitCode {
    let args = Args::parse();

    // RUST_LOG controls the level; warnings and above by default.
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn"));
    fmt().with_env_filter(filter)
         .with_writer(io::stderr)
         .with_target(false)
         .init();

    let script = match read_script(&args) {
        Ok(script) => script,
        Err(message) => {
            eprintln!("{message}");
            return ExitCode::FAILURE;
        },
    };

    match execute(&args, &script) {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            eprintln!("{e}");
            ExitCode::FAILURE
        },
    }
}

fn read_script(args: &Args) -> Result<String, String> {
    match (&args.contents, args.file) {
        (Some(path), true) => fs::read_to_string(path).map_err(|_| {
                                  format!("Failed to read the input file '{path}'. Perhaps this \
                                           file does not exist?")
                              }),
        (Some(source), false) => Ok(source.clone()),
        (None, true) => Err("No input file given.".to_string()),
        (None, false) => {
            let mut source = String::new();
            io::stdin().read_to_string(&mut source)
                       .map_err(|e| format!("Failed to read the script from stdin: {e}"))?;
            Ok(source)
        },
    }
}

fn execute(args: &Args, script: &str) -> Result<(), plume::error::Error> {
    if args.tokens {
        for (token, position) in tokenize(script)? {
            println!("{:>7}  {:<11}  {token}",
                     position.to_string(),
                     token.kind().to_string());
        }
        return Ok(());
    }
    if args.ast {
        println!("{:#?}", plume::parse(script)?);
        return Ok(());
    }

    let options = Options { echo:           true,
                            max_call_depth: args.max_call_depth, };
    let execution = Context::with_options(options).run_source(script)?;

    if args.pipe_mode
       && let Some(value) = execution.value
    {
        println!("{value}");
    }
    Ok(())
}
