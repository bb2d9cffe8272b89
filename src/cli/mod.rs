// CLASSIFICATION: COMMUNITY
// Filename: mod.rs v0.1
// Date Modified: 2026-10-18
// Author: Lukas Bower

//! CLI module for `pwmctl`. Exports the argument parser and main entry.

pub mod args;

use std::path::PathBuf;
use std::sync::Arc;

use anyhow::{anyhow, Context};
use clap::ArgMatches;

use crate::attr::LogObserver;
use crate::channel::{ChannelOpener, DUTY_MAX};
use crate::cli::args::build_cli;
use crate::config::{load_config, PwmConfig};

/// Parsed `pwmctl` invocation.
#[derive(Debug, Clone, PartialEq)]
pub struct Request {
    pub chip: u32,
    pub channel: u32,
    pub duty: i32,
    pub freq: i64,
    pub config: Option<PathBuf>,
    pub trace: bool,
}

/// Convert a percentage into a duty value out of [`DUTY_MAX`].
pub fn duty_from_percent(percent: f64) -> anyhow::Result<i32> {
    if !(0.0..=100.0).contains(&percent) {
        return Err(anyhow!("duty {percent}% outside [0, 100]"));
    }
    Ok((percent / 100.0 * f64::from(DUTY_MAX)).round() as i32)
}

fn request_from(matches: &ArgMatches) -> anyhow::Result<Request> {
    let duty = match (
        matches.get_one::<f64>("duty"),
        matches.get_one::<i32>("duty-raw"),
    ) {
        (Some(percent), _) => duty_from_percent(*percent)?,
        (None, Some(raw)) => *raw,
        (None, None) => 0,
    };
    Ok(Request {
        chip: matches.get_one::<u32>("chip").copied().unwrap_or(0),
        channel: *matches
            .get_one::<u32>("channel")
            .context("missing --channel")?,
        duty,
        freq: *matches.get_one::<i64>("freq").context("missing --freq")?,
        config: matches.get_one::<PathBuf>("config").cloned(),
        trace: matches.get_flag("trace"),
    })
}

/// Parse a request from an argument list (program name first).
pub fn parse_from<I, T>(argv: I) -> anyhow::Result<Request>
where
    I: IntoIterator<Item = T>,
    T: Into<std::ffi::OsString> + Clone,
{
    let matches = build_cli().try_get_matches_from(argv)?;
    request_from(&matches)
}

/// Open the requested channel, apply the configuration and close it again.
pub fn execute(req: &Request) -> anyhow::Result<()> {
    let config = match &req.config {
        Some(path) => load_config(path)?,
        None => PwmConfig::from_env(),
    };
    let mut opener = ChannelOpener::new(config);
    if req.trace {
        opener = opener.observer(Arc::new(LogObserver));
    }
    let mut channel = opener
        .open(req.chip, req.channel)
        .with_context(|| format!("cannot open pwmchip{}/pwm{}", req.chip, req.channel))?;
    let applied = channel.pwm(req.duty, req.freq);
    let closed = channel.close();
    applied.with_context(|| {
        format!(
            "cannot configure pwmchip{}/pwm{} (duty={} freq={} mHz)",
            req.chip, req.channel, req.duty, req.freq
        )
    })?;
    closed?;
    Ok(())
}

/// Entry point for the CLI. Parses arguments and configures the channel.
pub fn run() -> anyhow::Result<()> {
    let matches = build_cli().get_matches();
    let req = request_from(&matches)?;
    execute(&req)?;
    if req.freq == 0 {
        println!("pwmchip{}/pwm{}: disabled", req.chip, req.channel);
    } else {
        println!(
            "pwmchip{}/pwm{}: duty={}/{} freq={} mHz",
            req.chip, req.channel, req.duty, DUTY_MAX, req.freq
        );
    }
    Ok(())
}
