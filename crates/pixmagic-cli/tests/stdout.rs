//! End-to-end runs of the `pixmagic` binary against real files.

use std::path::PathBuf;
use std::process::{Command, Output};

use image::{Rgba, RgbaImage};

const PNG_MAGIC: &[u8] = b"\x89PNG\r\n\x1a\n";

fn fixture(name: &str) -> PathBuf {
    let path = std::env::temp_dir().join(format!("pixmagic_cli_{}_{name}", std::process::id()));
    let pixels = RgbaImage::from_fn(6, 4, |x, _| {
        if x < 3 {
            Rgba([255, 0, 0, 255])
        } else {
            Rgba([0, 0, 255, 255])
        }
    });
    pixels.save_with_format(&path, image::ImageFormat::Png).unwrap();
    path
}

fn pixmagic(args: &[&str]) -> Output {
    Command::new(env!("CARGO_BIN_EXE_pixmagic"))
        .args(args)
        .env("RUST_LOG", "warn")
        .output()
        .unwrap()
}

#[test]
fn cgi_output_writes_header_then_body_and_exits() {
    let input = fixture("cgi.png");
    let out = pixmagic(&[input.to_str().unwrap(), "--flip", "h", "--stdout", "--cgi"]);

    assert!(out.status.success(), "stderr: {}", String::from_utf8_lossy(&out.stderr));
    let header = b"Content-type: image/png\r\n\r\n";
    assert!(out.stdout.starts_with(header));
    let body = &out.stdout[header.len()..];
    assert!(body.starts_with(PNG_MAGIC));

    let decoded = image::load_from_memory(body).unwrap().into_rgba8();
    assert_eq!(decoded.dimensions(), (6, 4));
    assert_eq!(decoded.get_pixel(0, 0), &Rgba([0, 0, 255, 255]));

    std::fs::remove_file(&input).ok();
}

#[test]
fn raw_output_is_body_only() {
    let input = fixture("raw.png");
    let out = pixmagic(&[input.to_str().unwrap(), "--format", "gif", "--stdout"]);

    assert!(out.status.success());
    assert!(out.stdout.starts_with(b"GIF89a"));

    std::fs::remove_file(&input).ok();
}

#[test]
fn missing_input_fails_without_output() {
    let out = pixmagic(&["/nonexistent/pixmagic.png", "--stdout", "--cgi"]);
    assert!(!out.status.success());
    assert!(out.stdout.is_empty());
}

#[test]
fn oversized_resize_fails_cleanly() {
    let input = fixture("huge.png");
    let target = std::env::temp_dir()
        .join(format!("pixmagic_cli_{}_huge_out.png", std::process::id()));
    let out = pixmagic(&[
        input.to_str().unwrap(),
        "--resize",
        "70000x70000",
        "--out",
        target.to_str().unwrap(),
    ]);

    assert_eq!(out.status.code(), Some(1));
    assert!(!target.exists());

    std::fs::remove_file(&input).ok();
}

#[test]
fn cgi_without_stdout_is_rejected() {
    let input = fixture("nocgi.png");
    let target = std::env::temp_dir()
        .join(format!("pixmagic_cli_{}_nocgi_out.png", std::process::id()));
    let out = pixmagic(&[
        input.to_str().unwrap(),
        "--out",
        target.to_str().unwrap(),
        "--cgi",
    ]);

    assert!(!out.status.success());
    assert!(!target.exists());

    std::fs::remove_file(&input).ok();
}
