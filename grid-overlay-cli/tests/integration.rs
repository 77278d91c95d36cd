//! Integration tests for grid-overlay CLI commands.
//!
//! These tests run the actual binary and verify end-to-end behavior.

use std::fs;
use std::path::{Path, PathBuf};
use std::process::{Command, Output};

const GRID_YAML: &str = r#"
width: 100
height: 80
horizontal:
  - [[0, 10], [99, 10]]
  - [[0, 30], [99, 30]]
vertical:
  - [[15, 0], [15, 79]]
  - [[40, 0], [40, 79]]
style:
  stroke_width: 1
"#;

/// Path to the binary under test.
fn binary_path() -> PathBuf {
    PathBuf::from(env!("CARGO_BIN_EXE_grid-overlay"))
}

/// Fresh scratch directory for one test.
fn scratch_dir(name: &str) -> PathBuf {
    let dir = std::env::temp_dir().join(format!("grid-overlay-{}-{}", name, std::process::id()));
    let _ = fs::remove_dir_all(&dir);
    fs::create_dir_all(&dir).expect("Failed to create scratch dir");
    dir
}

fn write_config(dir: &Path, content: &str) -> PathBuf {
    let path = dir.join("grid.yaml");
    fs::write(&path, content).expect("Failed to write config");
    path
}

fn run(args: &[&str]) -> Output {
    Command::new(binary_path())
        .args(args)
        .output()
        .expect("Failed to execute command")
}

fn json_of(output: &Output) -> serde_json::Value {
    let stdout = String::from_utf8_lossy(&output.stdout);
    serde_json::from_str(&stdout).expect("Output should be valid JSON")
}

#[test]
fn help_lists_commands() {
    let output = run(&["help"]);
    assert!(output.status.success());
    let stderr = String::from_utf8_lossy(&output.stderr);
    assert!(stderr.contains("lines"));
    assert!(stderr.contains("render"));
}

#[test]
fn unknown_command_fails() {
    let output = run(&["frobnicate"]);
    assert!(!output.status.success());
    let stderr = String::from_utf8_lossy(&output.stderr);
    assert!(stderr.contains("Unknown command"), "stderr: {}", stderr);
}

#[test]
fn lines_command_produces_json() {
    let dir = scratch_dir("lines-json");
    let config = write_config(&dir, GRID_YAML);

    let output = run(&["lines", "-c", config.to_str().unwrap()]);
    assert!(output.status.success(), "stderr: {}", String::from_utf8_lossy(&output.stderr));

    let json = json_of(&output);
    assert_eq!(json["width"], 100);
    assert_eq!(json["height"], 80);

    let ys: Vec<f64> = json["horizontal"]
        .as_array()
        .unwrap()
        .iter()
        .map(|l| l["y1"].as_f64().unwrap())
        .collect();
    assert_eq!(ys, vec![10.0, 30.0, 50.0, 70.0]);

    let xs: Vec<f64> = json["vertical"]
        .as_array()
        .unwrap()
        .iter()
        .map(|l| l["x1"].as_f64().unwrap())
        .collect();
    assert_eq!(xs, vec![15.0, 40.0, 65.0, 90.0]);

    for line in json["vertical"].as_array().unwrap() {
        assert_eq!(line["y1"], 0.0);
        assert_eq!(line["y2"], 79.0);
    }
}

#[test]
fn lines_command_produces_svg_file() {
    let dir = scratch_dir("lines-svg");
    let config = write_config(&dir, GRID_YAML);
    let out = dir.join("grid.svg");

    let output = run(&[
        "lines",
        "-c",
        config.to_str().unwrap(),
        "-f",
        "svg",
        "--h-color",
        "#ff0000",
        "-o",
        out.to_str().unwrap(),
    ]);
    assert!(output.status.success(), "stderr: {}", String::from_utf8_lossy(&output.stderr));
    assert!(String::from_utf8_lossy(&output.stderr).contains("Wrote:"));

    let svg = fs::read_to_string(&out).unwrap();
    assert!(svg.contains("<?xml"), "Should have XML declaration");
    assert!(svg.contains("viewBox=\"0 0 100 80\""));
    assert!(svg.contains("stroke=\"rgb(255,0,0)\""));
    assert_eq!(svg.matches("<line ").count(), 8);
    assert!(svg.contains("</svg>"));
}

#[test]
fn size_override_changes_line_count() {
    let dir = scratch_dir("size-override");
    let config = write_config(&dir, GRID_YAML);

    let output = run(&[
        "lines",
        "-c",
        config.to_str().unwrap(),
        "--width",
        "200",
        "--height",
        "80",
    ]);
    assert!(output.status.success());

    let json = json_of(&output);
    assert_eq!(json["width"], 200);
    // x = 15, 40, ..., 190
    assert_eq!(json["vertical"].as_array().unwrap().len(), 8);
    assert_eq!(json["horizontal"][0]["x2"], 199.0);
}

#[test]
fn render_command_writes_png() {
    let dir = scratch_dir("render");
    let config = write_config(&dir, GRID_YAML);
    let out = dir.join("overlay.png");

    let output = run(&["render", "-c", config.to_str().unwrap(), "-o", out.to_str().unwrap()]);
    assert!(output.status.success(), "stderr: {}", String::from_utf8_lossy(&output.stderr));

    let img = image::open(&out).expect("Should write a readable PNG").to_rgb8();
    assert_eq!(img.dimensions(), (100, 80));
    assert_eq!(img.get_pixel(5, 5).0, [255, 255, 255]);

    // Horizontal line at y = 10, between vertical lines.
    let [r, g, b] = img.get_pixel(50, 10).0;
    assert!(r < 40 && g > 215 && b > 215, "expected cyan, got {:?}", (r, g, b));

    // Vertical line at x = 40, between horizontal lines.
    let [r, g, b] = img.get_pixel(40, 60).0;
    assert!(r > 215 && g < 40 && b > 215, "expected magenta, got {:?}", (r, g, b));
}

#[test]
fn render_over_background_image() {
    let dir = scratch_dir("render-background");
    let background = dir.join("frame.png");
    image::RgbImage::from_pixel(120, 90, image::Rgb([10, 20, 30]))
        .save(&background)
        .unwrap();

    // No size in the config: it comes from the image, given relative to the config.
    let config = write_config(
        &dir,
        r#"
image: frame.png
horizontal:
  - [[0, 10], [119, 10]]
  - [[0, 30], [119, 30]]
vertical:
  - [[15, 0], [15, 89]]
  - [[40, 0], [40, 89]]
"#,
    );
    let out = dir.join("overlay.png");

    let output = run(&["render", "-c", config.to_str().unwrap(), "-o", out.to_str().unwrap()]);
    assert!(output.status.success(), "stderr: {}", String::from_utf8_lossy(&output.stderr));

    let img = image::open(&out).unwrap().to_rgb8();
    assert_eq!(img.dimensions(), (120, 90));
    assert_eq!(img.get_pixel(5, 5).0, [10, 20, 30]);
    assert_ne!(img.get_pixel(50, 10).0, [10, 20, 30]);
}

#[test]
fn render_requires_output() {
    let dir = scratch_dir("render-no-output");
    let config = write_config(&dir, GRID_YAML);

    let output = run(&["render", "-c", config.to_str().unwrap()]);
    assert!(!output.status.success());
    assert!(String::from_utf8_lossy(&output.stderr).contains("Output file required"));
}

#[test]
fn annotations_input() {
    let dir = scratch_dir("annotations");
    let svg = dir.join("refs.svg");
    fs::write(
        &svg,
        r#"<svg xmlns="http://www.w3.org/2000/svg" width="100" height="80" viewBox="0 0 100 80">
  <g stroke="red">
    <line id="hline-0" x1="0" y1="10" x2="99" y2="10"/>
    <line id="hline-1" x1="0" y1="30" x2="99" y2="30"/>
    <line id="vline-0" x1="15" y1="0" x2="15" y2="79"/>
    <line id="vline-1" x1="40" y1="0" x2="40" y2="79"/>
  </g>
</svg>"#,
    )
    .unwrap();

    let output = run(&["lines", "--annotations", svg.to_str().unwrap()]);
    assert!(output.status.success(), "stderr: {}", String::from_utf8_lossy(&output.stderr));

    let json = json_of(&output);
    assert_eq!(json["width"], 100);
    assert_eq!(json["horizontal"].as_array().unwrap().len(), 4);
    assert_eq!(json["vertical"].as_array().unwrap().len(), 4);
}

#[test]
fn degenerate_reference_reports_error() {
    let dir = scratch_dir("degenerate");
    let config = write_config(
        &dir,
        r#"
width: 50
height: 50
horizontal:
  - [[5, 5], [5, 5]]
  - [[0, 30], [49, 30]]
vertical:
  - [[15, 0], [15, 49]]
  - [[40, 0], [40, 49]]
"#,
    );

    let output = run(&["lines", "-c", config.to_str().unwrap()]);
    assert!(!output.status.success());
    assert!(output.stdout.is_empty());

    let stderr = String::from_utf8_lossy(&output.stderr);
    assert!(stderr.contains("horizontal grid"), "stderr: {}", stderr);
    assert!(stderr.contains("zero length"), "stderr: {}", stderr);
}

#[test]
fn missing_size_reports_error() {
    let dir = scratch_dir("no-size");
    let config = write_config(
        &dir,
        r#"
horizontal:
  - [[0, 10], [99, 10]]
  - [[0, 30], [99, 30]]
vertical:
  - [[15, 0], [15, 79]]
  - [[40, 0], [40, 79]]
"#,
    );

    let output = run(&["lines", "-c", config.to_str().unwrap()]);
    assert!(!output.status.success());
    assert!(String::from_utf8_lossy(&output.stderr).contains("Image size required"));
}
