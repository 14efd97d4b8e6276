use std::path::PathBuf;

use scrollwork::{Script, TimedEvent, UiEvent};

#[test]
fn cli_run_prints_snapshots() {
    let dir = PathBuf::from("target").join("cli_smoke");
    std::fs::create_dir_all(&dir).unwrap();

    let script_path = dir.join("script.json");
    let script = Script {
        start_path: "/".to_string(),
        config: Default::default(),
        events: vec![
            TimedEvent {
                at: 0.1,
                event: UiEvent::Scroll { y: 100.0 },
            },
            TimedEvent {
                at: 0.5,
                event: UiEvent::Navigate {
                    path: "/about".to_string(),
                },
            },
        ],
    };
    let f = std::fs::File::create(&script_path).unwrap();
    serde_json::to_writer_pretty(f, &script).unwrap();

    let exe = std::env::var_os("CARGO_BIN_EXE_scrollwork")
        .map(PathBuf::from)
        .unwrap_or_else(|| {
            let mut p = PathBuf::from("target").join("debug");
            p.push(if cfg!(windows) {
                "scrollwork.exe"
            } else {
                "scrollwork"
            });
            p
        });

    let script_arg = script_path.to_string_lossy().to_string();
    let output = std::process::Command::new(exe)
        .args(["run", "--in", script_arg.as_str()])
        .output()
        .unwrap();

    assert!(output.status.success());
    let stdout = String::from_utf8(output.stdout).unwrap();
    assert_eq!(stdout.lines().count(), 2);
    assert!(stdout.contains("backdrop_offset"));
}
