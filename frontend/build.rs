// When building with desktop on Linux, check for libxdo and give a clear error if missing.

fn main() {
    println!("cargo:rerun-if-env-changed=CARGO_FEATURE_DESKTOP");
    let is_desktop = std::env::var("CARGO_FEATURE_DESKTOP").is_ok();
    let is_linux = std::env::var("CARGO_CFG_TARGET_OS").as_deref() == Ok("linux");
    if is_desktop && is_linux && !libxdo_present() {
        eprintln!();
        eprintln!("  error: the eventapp desktop build on Linux requires libxdo.");
        eprintln!("    Fedora/RHEL:   sudo dnf install libxdo-devel");
        eprintln!("    Debian/Ubuntu: sudo apt install libxdo-dev");
        eprintln!();
        eprintln!("  Then: cargo run -p eventapp-frontend --features desktop");
        eprintln!();
        std::process::exit(1);
    }
}

// libxdo may not ship a .pc file, so fall back to the linker cache.
fn libxdo_present() -> bool {
    let pkg_config = std::process::Command::new("pkg-config")
        .args(["--exists", "libxdo"])
        .status()
        .map(|s| s.success())
        .unwrap_or(false);
    pkg_config
        || std::process::Command::new("ldconfig")
            .arg("-p")
            .output()
            .map(|o| String::from_utf8_lossy(&o.stdout).contains("libxdo"))
            .unwrap_or(false)
}
