// CLASSIFICATION: COMMUNITY
// Filename: export.rs v0.1
// Author: Lukas Bower
// Date Modified: 2026-10-18

//! Locating a channel directory and exporting it when absent.
//!
//! Writing a channel index to `pwmchip<C>/export` asks the kernel to create
//! `pwmchip<C>/pwm<N>`, but the directory shows up asynchronously. The
//! exporter therefore polls for it a bounded number of times.

use std::path::{Path, PathBuf};
use std::thread;
use std::time::Duration;

use log::debug;

use crate::attr::{read_int_file, write_int_file};
use crate::config::ExportPolicy;
use crate::error::{PwmError, Result};
use crate::sysfs::Sysfs;

/// Blocking pause between existence checks.
pub trait Delay {
    fn delay(&mut self, interval: Duration);
}

/// [`Delay`] that puts the calling thread to sleep.
#[derive(Debug, Default, Clone, Copy)]
pub struct ThreadDelay;

impl Delay for ThreadDelay {
    fn delay(&mut self, interval: Duration) {
        thread::sleep(interval);
    }
}

impl<F: FnMut(Duration)> Delay for F {
    fn delay(&mut self, interval: Duration) {
        self(interval)
    }
}

/// Progress of a directory resolution.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ExportState {
    Absent,
    Provisioning,
    Present,
    Error,
}

/// `<root>/pwmchip<chip>`
pub fn chip_dir(root: &Path, chip: u32) -> PathBuf {
    root.join(format!("pwmchip{chip}"))
}

/// `<root>/pwmchip<chip>/pwm<channel>`
pub fn channel_dir(root: &Path, chip: u32, channel: u32) -> PathBuf {
    chip_dir(root, chip).join(format!("pwm{channel}"))
}

/// Resolves channel directories below one sysfs root, exporting on demand.
pub struct Exporter<'a> {
    sysfs: &'a dyn Sysfs,
    root: &'a Path,
    policy: ExportPolicy,
    delay: &'a mut dyn Delay,
    state: ExportState,
}

impl<'a> Exporter<'a> {
    pub fn new(
        sysfs: &'a dyn Sysfs,
        root: &'a Path,
        policy: ExportPolicy,
        delay: &'a mut dyn Delay,
    ) -> Self {
        Self {
            sysfs,
            root,
            policy,
            delay,
            state: ExportState::Absent,
        }
    }

    /// State reached by the last call to [`Exporter::resolve`].
    pub fn state(&self) -> ExportState {
        self.state
    }

    /// Return the directory of `chip`/`channel`, exporting it first if needed.
    pub fn resolve(&mut self, chip: u32, channel: u32) -> Result<PathBuf> {
        self.state = ExportState::Absent;
        let result = self.try_resolve(chip, channel);
        self.state = match result {
            Ok(_) => ExportState::Present,
            Err(_) => ExportState::Error,
        };
        result
    }

    fn try_resolve(&mut self, chip: u32, channel: u32) -> Result<PathBuf> {
        let dir = channel_dir(self.root, chip, channel);
        if self.sysfs.is_dir(&dir) {
            return Ok(dir);
        }

        let chip_dir = chip_dir(self.root, chip);
        let npwm = read_int_file(self.sysfs, &chip_dir, "npwm")?;
        if i64::from(channel) >= npwm {
            return Err(PwmError::ChannelOutOfRange {
                chip,
                channel,
                npwm,
            });
        }

        debug!("pwmchip{chip}: exporting channel {channel}");
        write_int_file(self.sysfs, &chip_dir, "export", i64::from(channel))?;
        self.state = ExportState::Provisioning;

        let interval = self.policy.interval();
        for attempt in 1..=self.policy.attempts {
            self.delay.delay(interval);
            if self.sysfs.is_dir(&dir) {
                debug!("pwmchip{chip}: pwm{channel} present after {attempt} check(s)");
                return Ok(dir);
            }
        }
        Err(PwmError::ExportTimeout {
            chip,
            channel,
            attempts: self.policy.attempts,
        })
    }
}
