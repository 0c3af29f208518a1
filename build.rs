use std::{env, process::Command};

const UNKNOWN: &str = "unknown";

fn main() {
    for path in ["build.rs", ".git/HEAD", ".git/refs"] {
        println!("cargo:rerun-if-changed={path}");
    }

    let hash = command_stdout("git", &["rev-parse", "--short", "HEAD"])
        .filter(|hash| !hash.is_empty())
        .unwrap_or_else(|| UNKNOWN.into());
    let status = match command_stdout("git", &["status", "--porcelain"]) {
        Some(changes) if changes.is_empty() => "clean",
        Some(_) => "dirty",
        None => UNKNOWN,
    };
    let rustc = command_stdout("rustc", &["--version"]).unwrap_or_else(|| UNKNOWN.into());
    let timestamp = chrono::Utc::now().to_rfc3339_opts(chrono::SecondsFormat::Secs, true);

    let stamps = [
        ("HASH", hash),
        ("STATUS", status.to_string()),
        ("TIMESTAMP", timestamp),
        ("TARGET", env::var("TARGET").unwrap_or_else(|_| UNKNOWN.into())),
        ("PROFILE", env::var("PROFILE").unwrap_or_else(|_| UNKNOWN.into())),
        ("RUSTC", rustc),
    ];
    for (name, value) in stamps {
        println!("cargo:rustc-env=RUPEEWISE_BUILD_{name}={value}");
    }
}

/// Trimmed stdout of a successful invocation.
fn command_stdout(program: &str, args: &[&str]) -> Option<String> {
    let output = Command::new(program).args(args).output().ok()?;
    if !output.status.success() {
        return None;
    }
    String::from_utf8(output.stdout)
        .ok()
        .map(|text| text.trim().to_string())
}
