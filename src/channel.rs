// CLASSIFICATION: COMMUNITY
// Filename: channel.rs v0.1
// Author: Lukas Bower
// Date Modified: 2026-10-18

//! PWM channel controller.
//!
//! A [`Channel`] owns the `enable`, `period` and `duty_cycle` attributes of
//! one exported channel and turns a `(duty, frequency)` request into writes
//! ordered so that the kernel never sees a duty cycle longer than the period
//! in effect.

use std::fmt;
use std::path::{Path, PathBuf};
use std::sync::Arc;

use log::debug;

use crate::attr::{AttrObserver, DevAttr, NoopObserver};
use crate::config::PwmConfig;
use crate::error::{PwmError, Result};
use crate::export::{Delay, Exporter, ThreadDelay};
use crate::sysfs::{AccessMode, HostSysfs, Sysfs};

/// Duty value corresponding to 100%.
pub const DUTY_MAX: i32 = 1 << 24;

const DUTY_SHIFT: u32 = 24;
const NANOS_PER_KILOSECOND: i64 = 1_000_000_000_000;

/// Period in nanoseconds for a frequency in millihertz, rounded to nearest.
///
/// `freq_mhz` must be positive.
pub fn period_ns(freq_mhz: i64) -> i64 {
    (NANOS_PER_KILOSECOND + freq_mhz / 2) / freq_mhz
}

/// Active time in nanoseconds for `duty` (out of [`DUTY_MAX`]) of `period`.
pub fn duty_cycle_ns(period: i64, duty: i32) -> i64 {
    let ns = (i128::from(period) * i128::from(duty)) >> DUTY_SHIFT;
    // Never exceed the period, whatever rounding did above.
    i64::try_from(ns).map_or(period, |ns| ns.min(period))
}

/// Builder opening channels with a chosen backend, delay and observer.
pub struct ChannelOpener {
    config: PwmConfig,
    sysfs: Box<dyn Sysfs>,
    delay: Box<dyn Delay>,
    observer: Arc<dyn AttrObserver>,
}

impl ChannelOpener {
    /// Opener using the host filesystem and a sleeping delay.
    pub fn new(config: PwmConfig) -> Self {
        Self {
            config,
            sysfs: Box::new(HostSysfs),
            delay: Box::new(ThreadDelay),
            observer: Arc::new(NoopObserver),
        }
    }

    #[must_use]
    pub fn sysfs(mut self, sysfs: impl Sysfs + 'static) -> Self {
        self.sysfs = Box::new(sysfs);
        self
    }

    #[must_use]
    pub fn delay(mut self, delay: impl Delay + 'static) -> Self {
        self.delay = Box::new(delay);
        self
    }

    /// Observer attached to all three attributes of opened channels.
    #[must_use]
    pub fn observer(mut self, observer: Arc<dyn AttrObserver>) -> Self {
        self.observer = observer;
        self
    }

    pub fn config(&self) -> &PwmConfig {
        &self.config
    }

    /// Resolve (exporting if needed) and open `pwmchip<chip>/pwm<channel>`.
    ///
    /// If the channel is found enabled, its duty cycle is reset to zero so a
    /// subsequent shorter period is accepted.
    pub fn open(&mut self, chip: u32, channel: u32) -> Result<Channel> {
        let dir = Exporter::new(
            self.sysfs.as_ref(),
            &self.config.sysfs_root,
            self.config.export,
            self.delay.as_mut(),
        )
        .resolve(chip, channel)?;

        let sysfs = self.sysfs.as_ref();
        let observer = &self.observer;
        let open = |name: &str, mode: AccessMode| {
            DevAttr::open(sysfs, &dir, name, mode).map(|attr| attr.with_observer(observer.clone()))
        };
        // Attributes acquired so far are released when a later open fails.
        let enable = open("enable", AccessMode::ReadWrite)?;
        let duty_cycle = open("duty_cycle", AccessMode::ReadWrite)?;
        let period = open("period", AccessMode::WriteOnly)?;

        let mut ch = Channel {
            chip,
            channel,
            dir,
            enable,
            period,
            duty_cycle,
        };
        if let Err(err) = ch.resync() {
            let _ = ch.close();
            return Err(err);
        }
        debug!("pwmchip{chip}/pwm{channel}: opened, enable={}", ch.enable.cached());
        Ok(ch)
    }
}

/// One open PWM channel.
pub struct Channel {
    chip: u32,
    channel: u32,
    dir: PathBuf,
    enable: DevAttr,
    period: DevAttr,
    duty_cycle: DevAttr,
}

impl Channel {
    /// Open `pwmchip<chip>/pwm<channel>` with the environment's configuration.
    pub fn open(chip: u32, channel: u32) -> Result<Self> {
        ChannelOpener::new(PwmConfig::from_env()).open(chip, channel)
    }

    fn resync(&mut self) -> Result<()> {
        if self.enable.read_int()? != 0 {
            self.duty_cycle.write_zero()?;
        }
        Ok(())
    }

    pub fn chip(&self) -> u32 {
        self.chip
    }

    pub fn channel(&self) -> u32 {
        self.channel
    }

    /// Sysfs directory backing this channel.
    pub fn dir(&self) -> &Path {
        &self.dir
    }

    /// Configure duty cycle and frequency.
    ///
    /// `duty` ranges over `[0, DUTY_MAX]`, `freq` is in millihertz. A zero
    /// frequency disables the channel and ignores `duty`. The first failing
    /// write aborts the sequence; earlier writes are not undone.
    pub fn pwm(&mut self, duty: i32, freq: i64) -> Result<()> {
        if freq < 0 {
            return Err(PwmError::InvalidFrequency(freq));
        }
        if freq == 0 {
            return self.enable.write_zero();
        }
        if !(0..=DUTY_MAX).contains(&duty) {
            return Err(PwmError::InvalidDuty(duty));
        }

        let period = period_ns(freq);
        let duty_cycle = duty_cycle_ns(period, duty);

        if self.duty_cycle.cached() > period {
            self.duty_cycle.write_zero()?;
        }
        self.period.write_int(period)?;
        self.duty_cycle.write_int(duty_cycle)?;
        if self.enable.is_zero() {
            self.enable.write_one()?;
        }
        Ok(())
    }

    /// Disable the output.
    pub fn disable(&mut self) -> Result<()> {
        self.pwm(0, 0)
    }

    /// Close all three attributes, returning the first failure.
    pub fn close(self) -> Result<()> {
        let Channel {
            enable,
            period,
            duty_cycle,
            ..
        } = self;
        let mut result = enable.close();
        for attr in [duty_cycle, period] {
            let closed = attr.close();
            if result.is_ok() {
                result = closed;
            }
        }
        result
    }
}

impl fmt::Debug for Channel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Channel")
            .field("dir", &self.dir)
            .field("enable", &self.enable.cached())
            .field("period", &self.period.cached())
            .field("duty_cycle", &self.duty_cycle.cached())
            .finish()
    }
}
