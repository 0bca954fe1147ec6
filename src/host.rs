use std::env;

use anyhow::Result;
use tokio::process::Command;

const TIMEZONE_SCRIPT_ENV: &str = "SET_TIMEZONE_SCRIPT";
const DEFAULT_TIMEZONE_SCRIPT: &str = "./set_timezone.sh";

/// Run the host's `date` and return its stdout.
pub async fn run_date() -> Result<String> {
    let output = Command::new("date").output().await?;
    Ok(String::from_utf8_lossy(&output.stdout).into_owned())
}

/// Apply a system timezone through the privileged helper script. `zone` must
/// already be validated against the canonical table; the script runs under
/// sudo and owns the actual change.
pub async fn set_timezone(zone: &str) -> Result<()> {
    let script =
        env::var(TIMEZONE_SCRIPT_ENV).unwrap_or_else(|_| DEFAULT_TIMEZONE_SCRIPT.to_string());

    let output = Command::new("sudo").arg(&script).arg(zone).output().await?;
    log::info!(
        "{} {}: {}{}",
        script,
        zone,
        String::from_utf8_lossy(&output.stdout),
        String::from_utf8_lossy(&output.stderr),
    );

    Ok(())
}
