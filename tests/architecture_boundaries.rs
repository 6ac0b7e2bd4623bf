use std::fs;
use std::path::{Path, PathBuf};

fn rs_files(root: &Path) -> Vec<PathBuf> {
    let mut out = Vec::new();
    let mut stack = vec![root.to_path_buf()];
    while let Some(dir) = stack.pop() {
        let entries = match fs::read_dir(&dir) {
            Ok(entries) => entries,
            Err(_) => continue,
        };
        for entry in entries.flatten() {
            let path = entry.path();
            if path.is_dir() {
                stack.push(path);
            } else if path.extension().and_then(|s| s.to_str()) == Some("rs") {
                out.push(path);
            }
        }
    }
    out.sort();
    out
}

fn rel(path: &Path) -> String {
    let root = Path::new(env!("CARGO_MANIFEST_DIR"));
    let rel = path
        .strip_prefix(root)
        .unwrap_or(path)
        .to_string_lossy()
        .to_string();
    rel.replace('\\', "/")
}

fn src_dir() -> PathBuf {
    Path::new(env!("CARGO_MANIFEST_DIR")).join("src")
}

#[test]
fn host_crates_are_confined_to_the_source_adapter() {
    let mut violations = Vec::new();

    for file in rs_files(&src_dir()) {
        let rel_path = rel(&file);
        if rel_path == "src/system/source.rs" {
            continue;
        }
        let content = fs::read_to_string(&file).unwrap_or_default();
        for forbidden in ["use sysinfo", "sysinfo::", "use battery", "battery::"] {
            if content.contains(forbidden) {
                violations.push(format!(
                    "{} references host crate via `{}`",
                    rel_path, forbidden
                ));
            }
        }
    }

    assert!(
        violations.is_empty(),
        "Host query layering violations:\n{}",
        violations.join("\n")
    );
}

#[test]
fn ui_module_only_sees_snapshots() {
    let root = src_dir().join("ui");
    let mut violations = Vec::new();

    for file in rs_files(&root) {
        let content = fs::read_to_string(&file).unwrap_or_default();
        for forbidden in [
            "crate::system::source",
            "crate::system::collector",
            "crate::dashboard",
            "crossterm",
            "tokio",
        ] {
            if content.contains(forbidden) {
                violations.push(format!(
                    "{} imports forbidden dependency `{}`",
                    rel(&file),
                    forbidden
                ));
            }
        }
    }

    assert!(
        violations.is_empty(),
        "UI boundary violations:\n{}",
        violations.join("\n")
    );
}

#[test]
fn dashboard_loop_is_terminal_agnostic() {
    let file = src_dir().join("dashboard.rs");
    let content = fs::read_to_string(&file).unwrap_or_default();

    let mut violations = Vec::new();
    for forbidden in ["crossterm", "EventStream", "ratatui::init", "DefaultTerminal"] {
        if content.contains(forbidden) {
            violations.push(format!(
                "{} mentions `{}`; keyboard and terminal setup belong to event.rs and main.rs",
                rel(&file),
                forbidden
            ));
        }
    }

    assert!(
        violations.is_empty(),
        "Dashboard boundary violations:\n{}",
        violations.join("\n")
    );
}

#[test]
fn platform_cfg_is_scoped_to_signals_and_config_paths() {
    let mut violations = Vec::new();

    for file in rs_files(&src_dir()) {
        let content = fs::read_to_string(&file).unwrap_or_default();
        let uses_platform_cfg = ["target_os", "cfg(unix)", "cfg(not(unix))", "cfg!(windows)"]
            .iter()
            .any(|needle| content.contains(needle));
        if !uses_platform_cfg {
            continue;
        }

        let rel_path = rel(&file);
        let allowed = rel_path == "src/event.rs" || rel_path == "src/config.rs";
        if !allowed {
            violations.push(format!(
                "{} contains platform cfg but is outside allowed boundary",
                rel_path
            ));
        }
    }

    assert!(
        violations.is_empty(),
        "Unexpected platform cfg usage:\n{}",
        violations.join("\n")
    );
}

#[test]
fn no_blocking_sleeps_on_the_runtime() {
    let mut violations = Vec::new();

    for file in rs_files(&src_dir()) {
        let content = fs::read_to_string(&file).unwrap_or_default();
        if content.contains("thread::sleep") {
            violations.push(format!(
                "{} blocks the runtime thread; use `tokio::time::sleep`",
                rel(&file)
            ));
        }
    }

    assert!(
        violations.is_empty(),
        "Blocking sleeps:\n{}",
        violations.join("\n")
    );
}
