// Build script embedding git and target information for `vidlen --version`

use std::process::Command;

fn git_output(args: &[&str]) -> String {
    Command::new("git")
        .args(args)
        .output()
        .ok()
        .filter(|output| output.status.success())
        .and_then(|output| String::from_utf8(output.stdout).ok())
        .map_or_else(|| "unknown".to_string(), |s| s.trim().to_string())
}

fn main() {
    let git_hash = git_output(&["rev-parse", "--short", "HEAD"]);
    let git_date = git_output(&["log", "-1", "--format=%ci"]);
    let target = std::env::var("TARGET").unwrap_or_else(|_| "unknown".to_string());

    println!("cargo:rustc-env=VIDLEN_GIT_HASH={git_hash}");
    println!("cargo:rustc-env=VIDLEN_GIT_DATE={git_date}");
    println!("cargo:rustc-env=VIDLEN_BUILD_TARGET={target}");

    println!("cargo:rerun-if-changed=.git/HEAD");
}
