//! grid-overlay - compute and draw regular grids over images
//!
//! Usage:
//!   grid-overlay lines -c <grid.yaml>              Print grid lines as JSON
//!   grid-overlay lines -c <grid.yaml> -f svg       Print grid lines as an SVG overlay
//!   grid-overlay render -c <grid.yaml> -o out.png  Draw the grid over the image
//!
//! Set `RUST_LOG=debug` to trace the line families being generated.

use std::env;
use std::process;

mod cli;

fn main() {
    env_logger::init();

    let args: Vec<String> = env::args().collect();

    let result = match args.get(1).map(String::as_str) {
        Some("lines") => cli::cmd_lines(&args[2..]),
        Some("render") => cli::cmd_render(&args[2..]),
        Some("help") | Some("-h") | Some("--help") => {
            print_usage();
            Ok(())
        }
        Some(other) => Err(format!("Unknown command: {}. Use 'grid-overlay help'.", other)),
        None => {
            print_usage();
            process::exit(1);
        }
    };

    if let Err(err) = result {
        eprintln!("Error: {}", err);
        process::exit(1);
    }
}

fn print_usage() {
    eprintln!("grid-overlay - Extrapolate regular grid lines over an image");
    eprintln!();
    eprintln!("USAGE:");
    eprintln!("    grid-overlay <COMMAND> [OPTIONS]");
    eprintln!();
    eprintln!("COMMANDS:");
    eprintln!("    lines     Compute grid lines and print them as JSON or SVG");
    eprintln!("    render    Draw grid lines over an image");
    eprintln!("    help      Show this message");
    eprintln!();
    eprintln!("Run 'grid-overlay <COMMAND> --help' for command options.");
}
