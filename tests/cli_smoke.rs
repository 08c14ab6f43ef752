use std::path::PathBuf;
use std::process::Command;

fn exe() -> PathBuf {
    std::env::var_os("CARGO_BIN_EXE_sockybara")
        .map(PathBuf::from)
        .unwrap_or_else(|| {
            let mut p = PathBuf::from("target").join("debug");
            p.push(if cfg!(windows) {
                "sockybara.exe"
            } else {
                "sockybara"
            });
            p
        })
}

const COLORS: &str = "ff0000,00ff00,0000ff,ffff00,,,ff00ff,00ffff,808080";

#[test]
fn cli_svg_writes_file() {
    let dir = tempfile::tempdir().unwrap();
    let out = dir.path().join("nested").join("sock.svg");

    let status = Command::new(exe())
        .args(["svg", "--colors", COLORS, "--display-size", "200", "--out"])
        .arg(&out)
        .status()
        .unwrap();

    assert!(status.success());
    let svg = std::fs::read_to_string(&out).unwrap();
    assert!(svg.starts_with(r#"<svg viewBox="0 0 400 400" width="200" height="200""#));
    assert!(svg.contains(r##"fill="#ff0000""##));
    assert!(svg.contains(r#"fill="black""#));
}

#[test]
fn cli_download_without_share_saves_png() {
    let dir = tempfile::tempdir().unwrap();

    let output = Command::new(exe())
        .args(["download", "--id", "12", "--colors", COLORS, "--no-share", "--out-dir"])
        .arg(dir.path())
        .output()
        .unwrap();

    assert!(output.status.success(), "{output:?}");
    let png = dir.path().join("sockybara-12.png");
    let img = image::open(&png).unwrap();
    assert_eq!((img.width(), img.height()), (400, 400));
    assert!(String::from_utf8_lossy(&output.stderr).contains("wrote"));
}

#[test]
fn cli_download_reads_a_trait_source() {
    let dir = tempfile::tempdir().unwrap();
    let source = dir.path().join("traits.json");
    std::fs::write(
        &source,
        r#"{"3": {"traits": [null, null, null, null, null, null, null, null, "ff8800"]}}"#,
    )
    .unwrap();

    let status = Command::new(exe())
        .args(["download", "--id", "3", "--no-share", "--source"])
        .arg(&source)
        .arg("--out-dir")
        .arg(dir.path())
        .status()
        .unwrap();

    assert!(status.success());
    assert!(dir.path().join("sockybara-3.png").exists());
}

#[test]
fn cli_rejects_out_of_range_ids() {
    let output = Command::new(exe())
        .args(["show", "--id", "248"])
        .output()
        .unwrap();

    assert!(!output.status.success());
    assert!(String::from_utf8_lossy(&output.stderr).contains("between 0 and 247"));
}
