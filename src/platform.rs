// ABOUTME: Host platform detection for the deckhand application
// ABOUTME: Identifies the OS family and Linux distribution to pick a package manager

use std::fmt;
use std::fs;
use std::path::Path;

/// Host operating system, at the granularity package installation needs.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum HostOs {
    MacOs,
    /// Windows Subsystem for Linux.
    Wsl,
    Ubuntu,
    Debian,
    /// Fedora, RHEL or CentOS.
    Fedora,
    /// Linux with an unrecognized distribution.
    Linux,
    Windows,
    Unknown,
}

impl fmt::Display for HostOs {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let label = match self {
            HostOs::MacOs => "macOS",
            HostOs::Wsl => "Windows Subsystem for Linux (WSL)",
            HostOs::Ubuntu => "Ubuntu",
            HostOs::Debian => "Debian",
            HostOs::Fedora => "Fedora/RHEL/CentOS",
            HostOs::Linux => "Linux",
            HostOs::Windows => "Windows",
            HostOs::Unknown => "unknown",
        };
        f.write_str(label)
    }
}

/// Detect the OS this process runs on.
pub fn detect_host() -> HostOs {
    match std::env::consts::OS {
        "macos" => HostOs::MacOs,
        "linux" => detect_linux(Path::new("/proc/version"), Path::new("/etc/os-release")),
        "windows" => HostOs::Windows,
        _ => HostOs::Unknown,
    }
}

/// Classify a Linux host from its kernel version string and os-release file.
/// Unreadable files are treated as absent.
pub fn detect_linux(proc_version: &Path, os_release: &Path) -> HostOs {
    if let Ok(version) = fs::read_to_string(proc_version) {
        if version.to_lowercase().contains("microsoft") {
            return HostOs::Wsl;
        }
    }

    fs::read_to_string(os_release)
        .ok()
        .and_then(|contents| distro_from_os_release(&contents))
        .unwrap_or(HostOs::Linux)
}

/// Map the `ID=` entry of an os-release file to a known distribution.
pub fn distro_from_os_release(contents: &str) -> Option<HostOs> {
    let id = contents
        .lines()
        .find_map(|line| line.strip_prefix("ID="))?
        .trim()
        .trim_matches('"');

    match id {
        "ubuntu" => Some(HostOs::Ubuntu),
        "debian" => Some(HostOs::Debian),
        "fedora" | "rhel" | "centos" => Some(HostOs::Fedora),
        _ => None,
    }
}
