//! CLI argument parsing and scan invocation

use anyhow::Result;
use clap::Parser;
use std::path::PathBuf;
use std::time::Duration;

use crate::models::ScanConfig;
use crate::scanner;

/// Snapscan: Snapchat handle extraction from dating-site profiles
#[derive(Parser, Debug)]
#[command(
    name = "snapscan",
    version,
    about = "Scan dating-site search results for Snapchat handles and archive their snapcodes",
    long_about = "Snapscan logs into the dating site, geocodes the given location, then pages \
                  through nearby search results. Profiles whose status text advertises a \
                  Snapchat handle get their snapcode fetched and saved under \
                  <out>/<country>/<hometown>/<handle>.<ext>. Already-saved snapcodes are \
                  skipped, so an interrupted scan can simply be restarted."
)]
pub struct Cli {
    /// Enable verbose logging (can be repeated for more verbosity)
    #[arg(short, long, action = clap::ArgAction::Count)]
    pub verbose: u8,

    /// Dating-site login username
    #[arg(short, long)]
    pub username: String,

    /// Dating-site login password
    #[arg(short, long)]
    pub password: String,

    /// Location to scan (free text, geocoded at startup; requires GOOGLE_API_KEY)
    #[arg(short, long)]
    pub location: String,

    /// Search radius from the start location, forwarded verbatim to the API
    #[arg(short, long)]
    pub radius: String,

    /// Snapcode format: SVG, PNG or JPG (also selects the file extension)
    #[arg(short, long, default_value = "SVG")]
    pub format: String,

    /// Snapcode size, forwarded verbatim to the derivation service
    #[arg(short, long, default_value = "400")]
    pub size: String,

    /// Minimum profile age
    #[arg(long)]
    pub min_age: u32,

    /// Maximum profile age
    #[arg(long)]
    pub max_age: u32,

    /// Result page to start from
    #[arg(long, default_value = "1")]
    pub page: u32,

    /// Base directory for saved snapcodes
    #[arg(short, long, default_value = "snapcodes")]
    pub out: PathBuf,

    /// Seconds to pause after each snapcode fetch
    #[arg(long, default_value = "2")]
    pub delay: u64,
}

impl Cli {
    /// Execute the scan
    pub fn execute(self) -> Result<()> {
        // Setup logging based on verbosity
        let log_level = match self.verbose {
            0 => "warn",  // Default: only warnings and errors
            1 => "info",  // -v: show info messages
            2 => "debug", // -vv: show debug messages
            _ => "trace", // -vvv: show trace messages
        };
        env_logger::Builder::from_env(env_logger::Env::default().default_filter_or(log_level))
            .init();

        let config = ScanConfig {
            username: self.username,
            password: self.password,
            location: self.location,
            radius: self.radius,
            format: self.format,
            size: self.size,
            min_age: self.min_age,
            max_age: self.max_age,
            start_page: self.page,
            output_dir: self.out,
            delay: Duration::from_secs(self.delay),
        };

        scanner::run(config)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_required_and_defaulted_flags() {
        let cli = Cli::parse_from([
            "snapscan",
            "-u", "user",
            "-p", "pass",
            "-l", "Berlin",
            "-r", "25",
            "--min-age", "18",
            "--max-age", "30",
        ]);
        assert_eq!(cli.format, "SVG");
        assert_eq!(cli.size, "400");
        assert_eq!(cli.page, 1);
        assert_eq!(cli.out, PathBuf::from("snapcodes"));
        assert_eq!(cli.delay, 2);
        assert_eq!(cli.verbose, 0);
    }

    #[test]
    fn test_missing_credentials_rejected() {
        let result = Cli::try_parse_from(["snapscan", "-l", "Berlin"]);
        assert!(result.is_err());
    }
}
