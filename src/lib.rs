// CLASSIFICATION: COMMUNITY
// Filename: lib.rs v0.1
// Date Modified: 2026-10-18
// Author: Lukas Bower

//! Access to PWM channels made available by the Linux sysfs PWM class.
//!
//! ```no_run
//! use sysfspwm::{Channel, DUTY_MAX};
//!
//! let mut ch = Channel::open(0, 1)?;
//! // 50 Hz, 7.5% duty cycle
//! ch.pwm(DUTY_MAX / 1000 * 75, 50_000)?;
//! ch.close()?;
//! # Ok::<(), sysfspwm::PwmError>(())
//! ```

#![forbid(unsafe_code)]

/// Integer attribute files with a value cache
pub mod attr;

/// Channel controller and duty/period arithmetic
pub mod channel;

/// CLI interface for `pwmctl`
pub mod cli;

/// Sysfs root and export polling configuration
pub mod config;

pub mod error;

/// Channel directory resolution and export
pub mod export;

/// Filesystem backend seam
pub mod sysfs;

#[cfg(test)]
mod testing;

pub use attr::{AttrObserver, DevAttr, LogObserver, NoopObserver};
pub use channel::{Channel, ChannelOpener, DUTY_MAX};
pub use config::{ExportPolicy, PwmConfig};
pub use error::{PwmError, Result};
pub use export::{Delay, ThreadDelay};
pub use sysfs::{AccessMode, HostSysfs, Sysfs};
