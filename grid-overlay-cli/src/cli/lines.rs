//! Lines command implementation.

use std::fs;

use super::common::{grid_to_json, grid_to_svg, load_job, parse_grid_args, OutputFormat};

/// Execute the lines command: compute the grid and print or save it.
pub fn cmd_lines(args: &[String]) -> Result<(), String> {
    let args = parse_grid_args(args)?;
    if args.help {
        print_usage();
        return Ok(());
    }

    let job = load_job(&args)?;
    let grid = job.compute()?;

    eprintln!(
        "Generated {} horizontal and {} vertical lines for {}x{}",
        grid.horizontal.len(),
        grid.vertical.len(),
        job.bounds.width(),
        job.bounds.height()
    );

    let content = match args.format.unwrap_or(OutputFormat::Json) {
        OutputFormat::Json => grid_to_json(&grid, job.bounds)?,
        OutputFormat::Svg => grid_to_svg(&grid, job.bounds, &job.style),
    };

    match &args.output {
        Some(path) => {
            fs::write(path, &content).map_err(|e| format!("Failed to write {}: {}", path, e))?;
            eprintln!("Wrote: {}", path);
        }
        None => print!("{}", content),
    }

    Ok(())
}

/// Print usage information.
pub fn print_usage() {
    eprintln!("grid-overlay lines - Compute grid lines clipped to an image");
    eprintln!();
    eprintln!("USAGE:");
    eprintln!("    grid-overlay lines (-c <grid.yaml> | --annotations <refs.svg>) [OPTIONS]");
    eprintln!();
    eprintln!("OPTIONS:");
    eprintln!("    -c, --config <file>      YAML grid config with reference lines");
    eprintln!("    --annotations <file>     SVG with lines hline-0, hline-1, vline-0, vline-1");
    eprintln!("    -i, --image <file>       Take the image size from this image");
    eprintln!("    --width <px>             Image width");
    eprintln!("    --height <px>            Image height");
    eprintln!("    -f, --format <fmt>       Output format: json (default) or svg");
    eprintln!("    -o, --output <file>      Output file (default: stdout)");
    eprintln!("    --h-color <color>        Horizontal line color for SVG (default: cyan)");
    eprintln!("    --v-color <color>        Vertical line color for SVG (default: magenta)");
    eprintln!("    --stroke-width <px>      Line width for SVG (default: 0.5)");
}
