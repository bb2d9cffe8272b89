// CLASSIFICATION: COMMUNITY
// Filename: attr.rs v0.1
// Author: Lukas Bower
// Date Modified: 2026-10-18

//! Integer-valued sysfs attribute with a write-through value cache.
//!
//! Writes to PWM attributes can reconfigure hardware even when the value does
//! not change, so a [`DevAttr`] remembers the last value it wrote or read and
//! skips writes that would store the same value again. The cache is local to
//! this handle; another process writing the same file makes it stale.

use std::fmt;
use std::path::{Path, PathBuf};
use std::sync::Arc;

use log::trace;

use crate::error::{PwmError, Result};
use crate::sysfs::{AccessMode, AttrFile, Sysfs};

/// Cached value of an attribute that has neither been read nor written.
pub const UNKNOWN: i64 = -1;

/// Receives every value written to an attribute.
pub trait AttrObserver: Send + Sync {
    /// `attr` is `<directory basename>/<attribute name>`, e.g. `pwm0/period`.
    fn written(&self, attr: &str, data: &str);
}

/// Observer that ignores everything.
#[derive(Debug, Default, Clone, Copy)]
pub struct NoopObserver;

impl AttrObserver for NoopObserver {
    fn written(&self, _attr: &str, _data: &str) {}
}

/// Observer forwarding writes to the `log` facade at trace level.
#[derive(Debug, Default, Clone, Copy)]
pub struct LogObserver;

impl AttrObserver for LogObserver {
    fn written(&self, attr: &str, data: &str) {
        trace!("{attr}: {data:?}");
    }
}

/// Handle on one open attribute file.
///
/// Dropping the handle closes the file; [`DevAttr::close`] does the same but
/// reports the outcome.
pub struct DevAttr {
    file: Box<dyn AttrFile>,
    path: PathBuf,
    label: String,
    value: i64,
    observer: Arc<dyn AttrObserver>,
}

impl DevAttr {
    /// Open `dir/name` with `mode`. The cached value starts out [`UNKNOWN`].
    pub fn open(sysfs: &dyn Sysfs, dir: &Path, name: &str, mode: AccessMode) -> Result<Self> {
        let path = dir.join(name);
        let file = sysfs.open(&path, mode).map_err(|source| PwmError::Open {
            path: path.clone(),
            source,
        })?;
        let label = match dir.file_name() {
            Some(base) => format!("{}/{name}", base.to_string_lossy()),
            None => name.to_owned(),
        };
        Ok(Self {
            file,
            path,
            label,
            value: UNKNOWN,
            observer: Arc::new(NoopObserver),
        })
    }

    /// Report all writes of this handle to `observer`.
    #[must_use]
    pub fn with_observer(mut self, observer: Arc<dyn AttrObserver>) -> Self {
        self.observer = observer;
        self
    }

    /// Path of the backing attribute file.
    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Last value written or read by this handle.
    pub fn cached(&self) -> i64 {
        self.value
    }

    pub fn is_zero(&self) -> bool {
        self.value == 0
    }

    /// Parse the attribute as a decimal integer and cache it.
    pub fn read_int(&mut self) -> Result<i64> {
        let text = self.file.read_text().map_err(|source| PwmError::Io {
            path: self.path.clone(),
            source,
        })?;
        let trimmed = text.trim();
        let value = trimmed.parse::<i64>().map_err(|source| PwmError::Parse {
            path: self.path.clone(),
            content: trimmed.to_owned(),
            source,
        })?;
        self.value = value;
        Ok(value)
    }

    /// Store `value` unless it is already the cached value.
    ///
    /// The cache is updated before the write is issued, so a failed write
    /// leaves the new value cached.
    pub fn write_int(&mut self, value: i64) -> Result<()> {
        if self.value == value {
            return Ok(());
        }
        self.value = value;
        self.write(value.to_string().as_bytes())
    }

    /// Store `"0"` unless the cached value is already zero.
    pub fn write_zero(&mut self) -> Result<()> {
        self.write_flag(0, b"0")
    }

    /// Store `"1"` unless the cached value is already one.
    pub fn write_one(&mut self) -> Result<()> {
        self.write_flag(1, b"1")
    }

    fn write_flag(&mut self, value: i64, data: &'static [u8; 1]) -> Result<()> {
        if self.value == value {
            return Ok(());
        }
        self.value = value;
        self.write(data)
    }

    fn write(&mut self, data: &[u8]) -> Result<()> {
        self.observer
            .written(&self.label, &String::from_utf8_lossy(data));
        self.file.write_bytes(data).map_err(|source| PwmError::Io {
            path: self.path.clone(),
            source,
        })
    }

    /// Close the attribute file.
    pub fn close(mut self) -> Result<()> {
        self.file.close().map_err(|source| PwmError::Io {
            path: self.path.clone(),
            source,
        })
    }
}

impl Drop for DevAttr {
    fn drop(&mut self) {
        // No-op when `close` already ran.
        let _ = self.file.close();
    }
}

impl fmt::Debug for DevAttr {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("DevAttr")
            .field("path", &self.path)
            .field("value", &self.value)
            .finish()
    }
}

/// Open `dir/name` read-only, parse one integer and close it again.
pub fn read_int_file(sysfs: &dyn Sysfs, dir: &Path, name: &str) -> Result<i64> {
    let mut attr = DevAttr::open(sysfs, dir, name, AccessMode::ReadOnly)?;
    let value = attr.read_int()?;
    attr.close()?;
    Ok(value)
}

/// Open `dir/name` write-only, store `value` and close it again.
pub fn write_int_file(sysfs: &dyn Sysfs, dir: &Path, name: &str, value: i64) -> Result<()> {
    let mut attr = DevAttr::open(sysfs, dir, name, AccessMode::WriteOnly)?;
    attr.write_int(value)?;
    attr.close()
}
