use std::fs;
use std::path::Path;
use std::process::{Command, Output};
use tempfile::TempDir;

const SQUARE: &str = r##"<svg xmlns="http://www.w3.org/2000/svg" width="100" height="100"><rect width="100" height="100" fill="#0066cc"/></svg>"##;

fn run_command(dir: &Path, args: &[&str]) -> Output {
    Command::new(env!("CARGO_BIN_EXE_deckhand"))
        .current_dir(dir)
        .arg("svg-to-png")
        .args(args)
        .env_remove("DECKHAND_SCALE")
        .env_remove("DECKHAND_CONVERT_TIMEOUT_SECS")
        .output()
        .expect("Failed to execute command")
}

#[test]
fn test_native_conversion() {
    let temp_dir = TempDir::new().expect("Failed to create temp dir");
    fs::write(temp_dir.path().join("post-featured.svg"), SQUARE).expect("Failed to write SVG");
    fs::write(temp_dir.path().join("ignored.svg"), SQUARE).expect("Failed to write SVG");

    let output = run_command(temp_dir.path(), &["--native"]);

    assert!(output.status.success(), "Command failed: {:?}", output);
    let png = temp_dir.path().join("post-featured.png");
    assert!(png.exists(), "PNG file was not created");
    assert!(!temp_dir.path().join("ignored.png").exists());
    assert_eq!(image::image_dimensions(&png).expect("Not a PNG"), (200, 200));

    let stdout = String::from_utf8_lossy(&output.stdout);
    assert!(stdout.contains("Found 1 SVG file(s)"), "Unexpected output: {}", stdout);
    assert!(stdout.contains("Successful: 1"));
}

#[test]
fn test_native_conversion_with_dir_and_scale() {
    let temp_dir = TempDir::new().expect("Failed to create temp dir");
    let art_dir = temp_dir.path().join("art");
    fs::create_dir(&art_dir).expect("Failed to create art directory");
    fs::write(art_dir.join("logo.svg"), SQUARE).expect("Failed to write SVG");

    let output = run_command(
        temp_dir.path(),
        &[
            "1200",
            "630",
            "*.svg",
            "--dir",
            art_dir.to_str().unwrap(),
            "--native",
            "--scale",
            "0.5",
        ],
    );

    assert!(output.status.success(), "Command failed: {:?}", output);
    assert_eq!(
        image::image_dimensions(art_dir.join("logo.png")).expect("Not a PNG"),
        (50, 50)
    );
}

#[test]
fn test_failed_file_sets_exit_code() {
    let temp_dir = TempDir::new().expect("Failed to create temp dir");
    fs::write(temp_dir.path().join("a-featured.svg"), SQUARE).expect("Failed to write SVG");
    fs::write(temp_dir.path().join("b-featured.svg"), "not an svg").expect("Failed to write SVG");

    let output = run_command(temp_dir.path(), &["--native"]);

    assert_eq!(output.status.code(), Some(1));
    assert!(temp_dir.path().join("a-featured.png").exists());
    let stdout = String::from_utf8_lossy(&output.stdout);
    assert!(stdout.contains("Failed: 1"), "Unexpected output: {}", stdout);
    assert!(stdout.contains("b-featured.svg"));
}

#[test]
fn test_no_matching_files() {
    let temp_dir = TempDir::new().expect("Failed to create temp dir");

    let output = run_command(temp_dir.path(), &["--native"]);

    assert_eq!(output.status.code(), Some(1));
    let stdout = String::from_utf8_lossy(&output.stdout);
    assert!(
        stdout.contains("No SVG files matching pattern: *featured*.svg"),
        "Unexpected output: {}",
        stdout
    );
}

#[test]
fn test_scale_requires_native() {
    let temp_dir = TempDir::new().expect("Failed to create temp dir");
    let output = run_command(temp_dir.path(), &["--scale", "2"]);
    assert!(!output.status.success());
}

#[test]
#[ignore = "needs rsvg-convert on PATH"]
fn test_rsvg_conversion_uses_requested_size() {
    let temp_dir = TempDir::new().expect("Failed to create temp dir");
    fs::write(temp_dir.path().join("card-featured.svg"), SQUARE).expect("Failed to write SVG");

    let output = run_command(temp_dir.path(), &[]);

    assert!(output.status.success(), "Command failed: {:?}", output);
    assert_eq!(
        image::image_dimensions(temp_dir.path().join("card-featured.png")).expect("Not a PNG"),
        (1200, 630)
    );
}
