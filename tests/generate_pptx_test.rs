use std::fs;
use std::io::Read;
use std::process::{Command, Output};
use tempfile::TempDir;
use zip::ZipArchive;

const DECK: &str = "# Shipping Rust\nA field report\nAuthor: Sam\n\n## Why Rust\n- Memory safety\n  - No GC\n**Fearless concurrency**\n✅ Fast builds (mostly)\n\n## Example\n```rust\nfn main() {\n    println!(\"hi\");\n}\n```\n\n## Key Takeaways\n- Try it\n\n## Questions?\n";

fn run_command(args: &[&str]) -> Output {
    Command::new(env!("CARGO_BIN_EXE_deckhand"))
        .args(args)
        .env_remove("DECKHAND_FOOTER")
        .env_remove("DECKHAND_DIVIDER_KEYWORDS")
        .output()
        .expect("Failed to execute command")
}

fn read_slide(archive: &mut ZipArchive<fs::File>, n: usize) -> String {
    let mut file = archive
        .by_name(&format!("ppt/slides/slide{}.xml", n))
        .expect("Missing slide");
    let mut xml = String::new();
    file.read_to_string(&mut xml).expect("Failed to read slide");
    xml
}

#[test]
fn test_generate_pptx_command() {
    let temp_dir = TempDir::new().expect("Failed to create temp dir");
    let input_path = temp_dir.path().join("slides.md");
    fs::write(&input_path, DECK).expect("Failed to write markdown");
    let output_path = temp_dir.path().join("out/deck.pptx");

    let output = run_command(&[
        "generate-pptx",
        "-i",
        input_path.to_str().unwrap(),
        "-o",
        output_path.to_str().unwrap(),
        "--footer",
        "RustConf",
    ]);

    assert!(output.status.success(), "Command failed: {:?}", output);
    assert!(output_path.exists(), "PPTX file was not created");
    let stdout = String::from_utf8_lossy(&output.stdout);
    assert!(stdout.contains("Slides: 5"), "Unexpected output: {}", stdout);
    assert!(stdout.contains("Found 5 slides"));
    assert!(stdout.contains("Creating slide 1/5: Shipping Rust"));
    assert!(stdout.contains("Creating slide 3/5: Example"));

    let file = fs::File::open(&output_path).expect("Failed to open PPTX file");
    let mut archive = ZipArchive::new(file).expect("Failed to read PPTX as ZIP");
    let slide_files = archive
        .file_names()
        .filter(|name| name.starts_with("ppt/slides/slide") && name.ends_with(".xml"))
        .count();
    assert_eq!(slide_files, 5);

    let title = read_slide(&mut archive, 1);
    assert!(title.contains("Shipping Rust"));
    assert!(title.contains("A field report"));
    assert!(!title.contains("Slide 1"));

    let content = read_slide(&mut archive, 2);
    assert!(content.contains("Memory safety"));
    assert!(content.contains("Fearless concurrency"));
    assert!(!content.contains("**"));
    assert!(content.contains("RustConf  |  Slide 2"));

    let code = read_slide(&mut archive, 3);
    assert!(code.contains("    println!(&quot;hi&quot;);"));
    assert!(code.contains("RUST"));
    assert!(code.contains("RustConf  |  Slide 3"));

    for n in [4, 5] {
        let divider = read_slide(&mut archive, n);
        assert!(!divider.contains("Slide "), "divider {} has a footer", n);
    }
}

#[test]
fn test_generate_pptx_missing_input() {
    let temp_dir = TempDir::new().expect("Failed to create temp dir");
    let output_path = temp_dir.path().join("deck.pptx");

    let output = run_command(&[
        "generate-pptx",
        "-i",
        temp_dir.path().join("nope.md").to_str().unwrap(),
        "-o",
        output_path.to_str().unwrap(),
    ]);

    assert!(!output.status.success());
    assert!(!output_path.exists());
    let stderr = String::from_utf8_lossy(&output.stderr);
    assert!(stderr.contains("nope.md"), "Unexpected stderr: {}", stderr);
}

#[test]
fn test_generate_pptx_divider_keywords_from_env() {
    let temp_dir = TempDir::new().expect("Failed to create temp dir");
    let input_path = temp_dir.path().join("slides.md");
    fs::write(&input_path, "## Intermission\nstretch\n").expect("Failed to write markdown");
    let output_path = temp_dir.path().join("deck.pptx");

    let output = Command::new(env!("CARGO_BIN_EXE_deckhand"))
        .args([
            "generate-pptx",
            "-i",
            input_path.to_str().unwrap(),
            "-o",
            output_path.to_str().unwrap(),
        ])
        .env("DECKHAND_DIVIDER_KEYWORDS", "Intermission")
        .env_remove("DECKHAND_FOOTER")
        .output()
        .expect("Failed to execute command");
    assert!(output.status.success(), "Command failed: {:?}", output);

    let file = fs::File::open(&output_path).expect("Failed to open PPTX file");
    let mut archive = ZipArchive::new(file).expect("Failed to read PPTX as ZIP");
    let slide = read_slide(&mut archive, 1);
    assert!(slide.contains("Intermission"));
    assert!(!slide.contains("stretch"));
    assert!(!slide.contains("Slide 1"));
}
