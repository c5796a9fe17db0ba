// ABOUTME: rsvg-convert detection and installation for the deckhand application
// ABOUTME: Probes for the tool and installs librsvg through the host package manager

use crate::errors::{DeckError, Result};
use crate::exec::Cmd;
use crate::platform::{detect_host, HostOs};
use log::{info, warn};
use owo_colors::OwoColorize;
use std::time::Duration;

pub const RSVG_CONVERT: &str = "rsvg-convert";

const PROBE_TIMEOUT: Duration = Duration::from_secs(5);
const UPDATE_TIMEOUT: Duration = Duration::from_secs(60);
const INSTALL_TIMEOUT: Duration = Duration::from_secs(300);

pub const MANUAL_INSTRUCTIONS: &str = "\
Please install librsvg manually:
  macOS:          brew install librsvg
  Ubuntu/Debian:  sudo apt-get install librsvg2-bin
  Fedora:         sudo dnf install librsvg2-tools
  Other:          install librsvg from your package manager";

/// One package manager invocation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct InstallStep {
    pub command: Vec<&'static str>,
    pub timeout: Duration,
}

/// How librsvg gets installed on a given host.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct InstallPlan {
    pub package: &'static str,
    pub manager: &'static str,
    /// Program that must already be available, probed with `--version`.
    pub prerequisite: Option<&'static str>,
    pub steps: Vec<InstallStep>,
}

fn step(command: &[&'static str], timeout: Duration) -> InstallStep {
    InstallStep {
        command: command.to_vec(),
        timeout,
    }
}

/// The install plan for `host`, or `None` when there is no automatic route.
pub fn install_plan(host: HostOs) -> Option<InstallPlan> {
    match host {
        HostOs::MacOs => Some(InstallPlan {
            package: "librsvg",
            manager: "Homebrew",
            prerequisite: Some("brew"),
            steps: vec![step(&["brew", "install", "librsvg"], INSTALL_TIMEOUT)],
        }),
        HostOs::Ubuntu | HostOs::Debian | HostOs::Wsl => Some(InstallPlan {
            package: "librsvg2-bin",
            manager: "apt",
            prerequisite: None,
            steps: vec![
                step(&["sudo", "apt-get", "update"], UPDATE_TIMEOUT),
                step(
                    &["sudo", "apt-get", "install", "-y", "librsvg2-bin"],
                    INSTALL_TIMEOUT,
                ),
            ],
        }),
        HostOs::Fedora => Some(InstallPlan {
            package: "librsvg2-tools",
            manager: "dnf",
            prerequisite: None,
            steps: vec![step(
                &["sudo", "dnf", "install", "-y", "librsvg2-tools"],
                INSTALL_TIMEOUT,
            )],
        }),
        HostOs::Linux | HostOs::Windows | HostOs::Unknown => None,
    }
}

/// Run `program --version` and return its first output line.
pub fn probe_version(program: &str) -> Result<String> {
    let stdout = Cmd::new(program)
        .arg("--version")
        .timeout(PROBE_TIMEOUT)
        .read_stdout()?;
    Ok(stdout.lines().next().unwrap_or_default().to_string())
}

/// Install librsvg on `host`. Every step must succeed. Errors carry no
/// manual instructions; callers show `MANUAL_INSTRUCTIONS` themselves.
pub fn install_rsvg_convert(host: HostOs) -> Result<()> {
    println!("Detected: {}", host);
    let plan = install_plan(host).ok_or_else(|| {
        DeckError::InstallError(format!("no automatic installation for {}", host))
    })?;

    if let Some(prerequisite) = plan.prerequisite {
        if probe_version(prerequisite).is_err() {
            return Err(DeckError::InstallError(format!(
                "{} not found. Install {} first (https://brew.sh), then run this command again.",
                prerequisite, plan.manager
            )));
        }
    }

    println!("Installing {} via {}...", plan.package, plan.manager);
    for InstallStep { command, timeout } in &plan.steps {
        info!("Running {:?}", command);
        Cmd::new(command[0])
            .args(&command[1..])
            .timeout(*timeout)
            .inherit_output()
            .run()
            .map_err(|e| {
                DeckError::InstallError(format!("failed to install {}: {}", plan.package, e))
            })?;
    }

    println!("{} {} installed successfully", "✓".green(), plan.package);
    Ok(())
}

/// Make sure `rsvg-convert` is available, installing it if needed.
/// Returns the tool's version line.
pub fn ensure_rsvg_convert() -> Result<String> {
    match probe_version(RSVG_CONVERT) {
        Ok(version) => return Ok(version),
        Err(e) => warn!("{} probe failed: {}", RSVG_CONVERT, e),
    }

    println!();
    println!(
        "{}",
        format!("⚠ {} not found. Installing...", RSVG_CONVERT).yellow()
    );
    println!();
    install_rsvg_convert(detect_host())?;

    probe_version(RSVG_CONVERT).map_err(|_| {
        DeckError::ToolNotFound(format!("{} (still missing after installation)", RSVG_CONVERT))
    })
}
