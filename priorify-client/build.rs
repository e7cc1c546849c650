//! Stamps the `priorify` binary with where and when it was built.
//!
//! Exposes `PRIORIFY_REVISION` (`git describe` output, `-dirty` suffixed for
//! uncommitted trees), `PRIORIFY_BUILT_AT` and `PRIORIFY_PROFILE` to the
//! crate through `env!`. `SOURCE_DATE_EPOCH` pins the timestamp for
//! reproducible builds.

use std::path::Path;
use std::process::Command;

use chrono::{DateTime, SecondsFormat, Utc};

fn main() {
    emit("PRIORIFY_REVISION", &revision().unwrap_or_else(|| "unknown".into()));
    emit("PRIORIFY_BUILT_AT", &built_at());
    emit("PRIORIFY_PROFILE", &std::env::var("PROFILE").unwrap_or_else(|_| "unknown".into()));

    println!("cargo:rerun-if-env-changed=SOURCE_DATE_EPOCH");
    println!("cargo:rerun-if-changed=build.rs");
    for git_file in ["../.git/HEAD", "../.git/index"] {
        if Path::new(git_file).exists() {
            println!("cargo:rerun-if-changed={}", git_file);
        }
    }
}

fn emit(key: &str, value: &str) {
    println!("cargo:rustc-env={}={}", key, value);
}

fn revision() -> Option<String> {
    let output = Command::new("git")
        .args(["describe", "--always", "--dirty", "--abbrev=8"])
        .output()
        .ok()?;
    if !output.status.success() {
        return None;
    }
    let text = String::from_utf8(output.stdout).ok()?;
    Some(text.trim().to_string()).filter(|s| !s.is_empty())
}

fn built_at() -> String {
    let pinned = std::env::var("SOURCE_DATE_EPOCH")
        .ok()
        .and_then(|secs| secs.trim().parse::<i64>().ok())
        .and_then(|secs| DateTime::<Utc>::from_timestamp(secs, 0));
    pinned
        .unwrap_or_else(Utc::now)
        .to_rfc3339_opts(SecondsFormat::Secs, true)
}
