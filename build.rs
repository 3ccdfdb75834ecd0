use std::env;
use std::process::Command;

fn main() {
    let version = env::var("CARGO_PKG_VERSION").unwrap();
    let profile = env::var("PROFILE").unwrap();

    // Release builds carry the plain package version; debug builds get the commit stamped on
    let stamped = if profile == "release" {
        version
    } else {
        match git(&["rev-parse", "--short=8", "HEAD"]) {
            Some(hash) if worktree_dirty() => format!("{}-dev+{}.dirty", version, hash),
            Some(hash) => format!("{}-dev+{}", version, hash),
            None => format!("{}-dev", version),
        }
    };

    println!("cargo:rustc-env=ARC_VERSION={}", stamped);
    println!("cargo:rerun-if-changed=.git/HEAD");
    println!("cargo:rerun-if-changed=.git/refs/heads/");
}

fn git(args: &[&str]) -> Option<String> {
    let output = Command::new("git").args(args).output().ok()?;
    if !output.status.success() {
        return None;
    }
    Some(String::from_utf8_lossy(&output.stdout).trim().to_string())
}

fn worktree_dirty() -> bool {
    git(&["status", "--porcelain", "--untracked-files=no"])
        .map(|status| !status.is_empty())
        .unwrap_or(false)
}
