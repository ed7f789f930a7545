//! End-to-end tests driving the compiled binary.

use std::path::Path;
use std::process::{Command, Output};
use tempfile::TempDir;

struct Workspace {
    tmp: TempDir,
}

impl Workspace {
    /// A gallery with three images, one sidecar, and no config.
    fn new() -> Self {
        let tmp = TempDir::new().unwrap();
        let gallery = tmp.path().join("gallery");
        std::fs::create_dir(&gallery).unwrap();
        for name in ["010-Wood-Fired-Oven.jpg", "020-Terrace.webp", "030.jpg"] {
            std::fs::write(gallery.join(name), b"").unwrap();
        }
        std::fs::write(
            gallery.join("010-Wood-Fired-Oven.txt"),
            "Lit every day at noon.\n",
        )
        .unwrap();
        Self { tmp }
    }

    fn path(&self) -> &Path {
        self.tmp.path()
    }

    fn run(&self, args: &[&str]) -> Output {
        let root = self.path();
        Command::new(env!("CARGO_BIN_EXE_gallery-lightbox"))
            .arg("--source")
            .arg(root.join("gallery"))
            .arg("--output")
            .arg(root.join("dist"))
            .arg("--temp-dir")
            .arg(root.join("temp"))
            .args(args)
            .output()
            .expect("failed to run gallery-lightbox")
    }

    fn run_ok(&self, args: &[&str]) -> String {
        let out = self.run(args);
        assert!(
            out.status.success(),
            "{args:?} failed: {}",
            String::from_utf8_lossy(&out.stderr)
        );
        String::from_utf8(out.stdout).unwrap()
    }

    fn write_script(&self, script: &str) -> String {
        let path = self.path().join("script.txt");
        std::fs::write(&path, script).unwrap();
        path.to_string_lossy().to_string()
    }
}

#[test]
fn scan_writes_manifest_and_lists_items() {
    let ws = Workspace::new();
    let stdout = ws.run_ok(&["scan"]);
    assert!(stdout.contains("(3 images)"));
    assert!(stdout.contains("001 Wood Fired Oven"));
    assert!(stdout.contains("Description: Lit every day at noon."));
    assert!(stdout.contains("003 Gallery Image"));

    let json = std::fs::read_to_string(ws.path().join("temp/manifest.json")).unwrap();
    let manifest: serde_json::Value = serde_json::from_str(&json).unwrap();
    assert_eq!(manifest["items"][1]["image"], "020-Terrace.webp");
}

#[test]
fn page_renders_gallery_grid() {
    let ws = Workspace::new();
    ws.run_ok(&["scan"]);
    ws.run_ok(&["page"]);
    let html = std::fs::read_to_string(ws.path().join("dist/index.html")).unwrap();
    assert!(html.contains("<h4>Wood Fired Oven</h4>"));
    assert!(html.contains(r#"data-index="2""#));
    assert!(html.contains("--lightbox-backdrop"));
    assert!(html.contains(r#"href="2.html""#));
}

#[test]
fn page_writes_one_overlay_page_per_image() {
    let ws = Workspace::new();
    ws.run_ok(&["scan"]);
    let stdout = ws.run_ok(&["page"]);
    assert!(stdout.contains("3.html"));

    let dist = ws.path().join("dist");
    let first = std::fs::read_to_string(dist.join("1.html")).unwrap();
    assert!(first.contains("<h3>Wood Fired Oven</h3>"));
    assert!(first.contains(r#"class="lightbox-prev" href="3.html""#));
    assert!(first.contains(r#"class="lightbox-close" href="index.html""#));

    let last = std::fs::read_to_string(dist.join("3.html")).unwrap();
    assert!(last.contains(r#"class="lightbox-next" href="1.html""#));
    assert!(!dist.join("4.html").exists());
}

#[test]
fn overlay_prints_one_item() {
    let ws = Workspace::new();
    ws.run_ok(&["scan"]);
    let stdout = ws.run_ok(&["overlay", "--index", "1"]);
    assert!(stdout.contains("<h3>Terrace</h3>"));
    assert!(stdout.contains("2 / 3"));
}

#[test]
fn overlay_out_of_range_fails() {
    let ws = Workspace::new();
    ws.run_ok(&["scan"]);
    let out = ws.run(&["overlay", "--index", "3"]);
    assert!(!out.status.success());
}

#[test]
fn replay_walks_and_wraps() {
    let ws = Workspace::new();
    ws.run_ok(&["scan"]);
    let script = ws.write_script("open 2\nnext\nkey ArrowLeft\nkey Escape\nkey ArrowRight\n");
    let stdout = ws.run_ok(&["replay", &script]);
    let lines: Vec<&str> = stdout.lines().collect();
    assert_eq!(lines.len(), 5);
    assert!(lines[0].contains("opened at 2"));
    assert!(lines[1].contains("2 → 0"));
    assert!(lines[2].contains("0 → 2"));
    assert!(lines[3].contains("closed from 2"));
    assert!(lines[4].contains("ignored") && lines[4].ends_with("[idle]"));
}

#[test]
fn replay_json_trace() {
    let ws = Workspace::new();
    ws.run_ok(&["scan"]);
    let script = ws.write_script("open 0\nclick panel\nclick backdrop\n");
    let stdout = ws.run_ok(&["replay", &script, "--json"]);
    let steps: serde_json::Value = serde_json::from_str(&stdout).unwrap();
    assert_eq!(steps[1]["transition"]["kind"], "ignored");
    assert_eq!(steps[2]["transition"]["kind"], "closed");
    assert_eq!(steps[2]["listeners"], 0);
}

#[test]
fn replay_reports_script_errors() {
    let ws = Workspace::new();
    ws.run_ok(&["scan"]);
    let script = ws.write_script("open 0\nzoom in\n");
    let out = ws.run(&["replay", &script]);
    assert!(!out.status.success());
    let stderr = String::from_utf8_lossy(&out.stderr);
    assert!(
        stderr.contains("Error: line 2: unknown command 'zoom'"),
        "{stderr}"
    );
}

#[test]
fn replay_presses_the_hash_key() {
    let ws = Workspace::new();
    ws.run_ok(&["scan"]);
    let script = ws.write_script("open 0\nkey #  # not bound\n");
    let stdout = ws.run_ok(&["replay", &script]);
    let lines: Vec<&str> = stdout.lines().collect();
    assert!(lines[1].contains("key #") && lines[1].contains("ignored"));
}

#[test]
fn invalid_overlay_config_is_reported() {
    let ws = Workspace::new();
    std::fs::write(
        ws.path().join("gallery/config.toml"),
        "[overlay]\nbackdrop = \"red</style>\"\n",
    )
    .unwrap();
    let out = ws.run(&["check"]);
    assert!(!out.status.success());
    let stderr = String::from_utf8_lossy(&out.stderr);
    assert!(stderr.contains("overlay.backdrop must not contain '<'"), "{stderr}");
}

#[test]
fn check_rejects_empty_gallery() {
    let ws = Workspace::new();
    let empty = ws.path().join("empty");
    std::fs::create_dir(&empty).unwrap();
    let out = Command::new(env!("CARGO_BIN_EXE_gallery-lightbox"))
        .arg("--source")
        .arg(&empty)
        .arg("check")
        .output()
        .unwrap();
    assert!(!out.status.success());
}

#[test]
fn check_accepts_gallery() {
    let ws = Workspace::new();
    let stdout = ws.run_ok(&["check"]);
    assert!(stdout.contains("==> Gallery is valid"));
    assert!(!ws.path().join("temp/manifest.json").exists());
}

#[test]
fn gen_config_prints_stock_config() {
    let ws = Workspace::new();
    let stdout = ws.run_ok(&["gen-config"]);
    assert!(stdout.contains("placeholder_title = \"Gallery Image\""));
    assert!(stdout.contains("[keys]"));
}
