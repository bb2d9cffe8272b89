// CLASSIFICATION: COMMUNITY
// Filename: error.rs v0.1
// Author: Lukas Bower
// Date Modified: 2026-10-18

//! Error type shared by the attribute, export and channel layers.

use std::io;
use std::num::ParseIntError;
use std::path::PathBuf;

use thiserror::Error;

/// Errors returned by PWM operations.
#[derive(Debug, Error)]
pub enum PwmError {
    /// An attribute file could not be opened.
    #[error("failed to open {}: {source}", .path.display())]
    Open {
        path: PathBuf,
        source: io::Error,
    },
    /// Reading or writing an open attribute failed.
    #[error("I/O error on {}: {source}", .path.display())]
    Io {
        path: PathBuf,
        source: io::Error,
    },
    /// Attribute content is not a decimal integer.
    #[error("{}: invalid integer {content:?}", .path.display())]
    Parse {
        path: PathBuf,
        content: String,
        source: ParseIntError,
    },
    /// Requested channel index is not below the chip's `npwm`.
    #[error("pwmchip{chip}: channel index ({channel}) exceeds number of channels ({npwm})")]
    ChannelOutOfRange { chip: u32, channel: u32, npwm: i64 },
    /// The channel directory did not show up after the export request.
    #[error("pwmchip{chip}: could not export channel {channel} (not present after {attempts} checks)")]
    ExportTimeout { chip: u32, channel: u32, attempts: u32 },
    #[error("duty {0} outside [0, 16777216]")]
    InvalidDuty(i32),
    #[error("negative frequency {0} mHz")]
    InvalidFrequency(i64),
}

/// Result alias used throughout the crate.
pub type Result<T> = std::result::Result<T, PwmError>;
