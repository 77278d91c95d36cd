//! Render command implementation.
//!
//! Draws the grid over the background image the same way everything else is
//! drawn here: build an SVG overlay, let resvg rasterize it into a tiny-skia
//! pixmap, then hand the pixels to the image crate for saving.

use image::{DynamicImage, RgbaImage};
use resvg::usvg;
use tiny_skia::{ColorU8, Pixmap};

use grid_overlay::{Bounds, Grid};

use super::common::{grid_to_svg, load_job, parse_grid_args};
use super::config::ResolvedStyle;

/// Execute the render command: draw the grid over the image and save it.
pub fn cmd_render(args: &[String]) -> Result<(), String> {
    let args = parse_grid_args(args)?;
    if args.help {
        print_usage();
        return Ok(());
    }

    let output_path = args
        .output
        .clone()
        .ok_or_else(|| "Output file required (use -o <file.png>)".to_string())?;

    let job = load_job(&args)?;
    let grid = job.compute()?;

    let background = match &job.image {
        Some(path) => {
            eprintln!("Loading: {}", path.display());
            Some(
                image::open(path)
                    .map_err(|e| format!("Failed to load image {}: {}", path.display(), e))?,
            )
        }
        None => None,
    };

    let rendered = render_overlay(&grid, job.bounds, &job.style, background.as_ref())?;

    // Flatten to RGB so JPEG output works too.
    DynamicImage::ImageRgba8(rendered)
        .to_rgb8()
        .save(&output_path)
        .map_err(|e| format!("Failed to write {}: {}", output_path, e))?;

    eprintln!(
        "Wrote: {} ({}x{}, {} horizontal + {} vertical lines)",
        output_path,
        job.bounds.width(),
        job.bounds.height(),
        grid.horizontal.len(),
        grid.vertical.len()
    );
    Ok(())
}

/// Render grid lines over a background (white when there is none).
pub fn render_overlay(
    grid: &Grid,
    bounds: Bounds,
    style: &ResolvedStyle,
    background: Option<&DynamicImage>,
) -> Result<RgbaImage, String> {
    let svg = grid_to_svg(grid, bounds, style);

    let options = usvg::Options::default();
    let tree = usvg::Tree::from_str(&svg, &options)
        .map_err(|e| format!("Failed to parse overlay SVG: {}", e))?;

    let (width, height) = (bounds.width(), bounds.height());
    let mut pixmap = Pixmap::new(width, height)
        .ok_or_else(|| format!("Failed to create {}x{} pixmap", width, height))?;

    match background {
        Some(image) => paint_background(&mut pixmap, image, style.grayscale)?,
        None => pixmap.fill(tiny_skia::Color::WHITE),
    }

    resvg::render(&tree, tiny_skia::Transform::default(), &mut pixmap.as_mut());

    // The background is opaque, so premultiplied and straight alpha agree.
    RgbaImage::from_raw(width, height, pixmap.take())
        .ok_or_else(|| "Failed to convert rendered pixmap".to_string())
}

/// Copy an image into the pixmap as an opaque background.
fn paint_background(pixmap: &mut Pixmap, image: &DynamicImage, grayscale: bool) -> Result<(), String> {
    if (image.width(), image.height()) != (pixmap.width(), pixmap.height()) {
        return Err(format!(
            "Background is {}x{} but the grid is {}x{}",
            image.width(),
            image.height(),
            pixmap.width(),
            pixmap.height()
        ));
    }

    let rgb = if grayscale {
        DynamicImage::ImageLuma8(image.to_luma8()).to_rgb8()
    } else {
        image.to_rgb8()
    };

    for (dst, src) in pixmap.pixels_mut().iter_mut().zip(rgb.pixels()) {
        let [r, g, b] = src.0;
        *dst = ColorU8::from_rgba(r, g, b, 255).premultiply();
    }
    Ok(())
}

/// Print usage information.
pub fn print_usage() {
    eprintln!("grid-overlay render - Draw grid lines over an image");
    eprintln!();
    eprintln!("USAGE:");
    eprintln!("    grid-overlay render (-c <grid.yaml> | --annotations <refs.svg>) -o <out.png> [OPTIONS]");
    eprintln!();
    eprintln!("OPTIONS:");
    eprintln!("    -c, --config <file>      YAML grid config with reference lines");
    eprintln!("    --annotations <file>     SVG with lines hline-0, hline-1, vline-0, vline-1");
    eprintln!("    -i, --image <file>       Background image (sets the image size)");
    eprintln!("    --width <px>             Image width when there is no background");
    eprintln!("    --height <px>            Image height when there is no background");
    eprintln!("    -o, --output <file>      Output image (PNG or JPEG by extension)");
    eprintln!("    --h-color <color>        Horizontal line color (default: cyan)");
    eprintln!("    --v-color <color>        Vertical line color (default: magenta)");
    eprintln!("    --stroke-width <px>      Line width (default: 0.5)");
    eprintln!("    --grayscale              Draw the background in grayscale");
}
