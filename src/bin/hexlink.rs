//! Command-line front end: reads a field from stdin (or generates one), solves it,
//! and prints each solution separated by a blank line.

use std::io::{self, BufRead};
use std::process::ExitCode;

use clap::Parser;

use hexlink::error::HexlinkError;
use hexlink::generator::generate_field;
use hexlink::instance::Instance;
use hexlink::render::{render_no_solutions, render_solution};
use hexlink::solver::Solver;

/// A zero-slither Numberlink solver and generator for hexagonal boards.
#[derive(Parser)]
#[command(about = "A zero-slither Numberlink solver and generator for hexagonal boards")]
struct Cli {
    /// Print at most this many solutions.
    #[arg(short = 'n', long = "number")]
    number: Option<i64>,

    /// Generate a random solvable instance instead of reading one from stdin.
    #[arg(short = 'g', long = "generate")]
    generate: bool,
}

fn main() -> ExitCode {
    let cli = Cli::parse();

    if let Some(n) = cli.number {
        if n < 0 {
            eprintln!("{}", HexlinkError::ArgError(n));
            return ExitCode::FAILURE;
        }
    }

    let instance = if cli.generate {
        generate_field(None)
    } else {
        let raw = match read_field() {
            Ok(raw) => raw,
            Err(err) => {
                eprintln!("{err}");
                return ExitCode::FAILURE;
            }
        };
        match Instance::parse(Some(&raw)) {
            Ok(instance) => instance,
            Err(err) => {
                eprintln!("{err}");
                return ExitCode::FAILURE;
            }
        }
    };

    let limit = cli.number.map(|n| n as usize);
    let solver = Solver::new(&instance);

    let mut blocks = Vec::new();
    for (i, solution) in solver.solutions().enumerate() {
        if limit.is_some_and(|limit| i >= limit) {
            break;
        }
        blocks.push(render_solution(&instance, &solution));
    }

    if blocks.is_empty() {
        println!("{}", render_no_solutions());
    } else {
        println!("{}", blocks.join("\n\n"));
    }

    ExitCode::SUCCESS
}

/// Read whitespace-separated rows from stdin until a blank line or end of input.
fn read_field() -> io::Result<Vec<Vec<String>>> {
    let stdin = io::stdin();
    let mut rows = Vec::new();
    for line in stdin.lock().lines() {
        let line = line?;
        if line.trim().is_empty() {
            break;
        }
        rows.push(line.split_whitespace().map(str::to_owned).collect());
    }
    Ok(rows)
}
