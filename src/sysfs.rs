// CLASSIFICATION: COMMUNITY
// Filename: sysfs.rs v0.1
// Author: Lukas Bower
// Date Modified: 2026-10-18

//! Filesystem seam between the PWM logic and the kernel's sysfs tree.
//!
//! [`HostSysfs`] talks to the real filesystem through `std::fs`. Anything
//! implementing [`Sysfs`] can stand in for it, which is how the channel and
//! export logic are exercised without hardware.

use std::fs::{File, OpenOptions};
use std::io::{self, Read, Seek, SeekFrom, Write};
use std::path::Path;

/// Access mode requested when opening an attribute file.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AccessMode {
    /// Open for reading only.
    ReadOnly,
    /// Open for writing only.
    WriteOnly,
    /// Open for reading and writing.
    ReadWrite,
}

/// One open sysfs attribute file.
pub trait AttrFile: Send {
    /// Read the complete attribute text from the start of the file.
    fn read_text(&mut self) -> io::Result<String>;

    /// Store `data` with a single write call.
    fn write_bytes(&mut self, data: &[u8]) -> io::Result<()>;

    /// Release the underlying OS resource. Calls after the first are no-ops.
    fn close(&mut self) -> io::Result<()>;
}

/// Directory tree holding PWM attribute files.
pub trait Sysfs {
    /// Open the attribute at `path` with the requested access mode.
    fn open(&self, path: &Path, mode: AccessMode) -> io::Result<Box<dyn AttrFile>>;

    /// Whether `path` currently exists and is a directory.
    fn is_dir(&self, path: &Path) -> bool;
}

/// [`Sysfs`] backed by the host filesystem.
#[derive(Debug, Default, Clone, Copy)]
pub struct HostSysfs;

impl Sysfs for HostSysfs {
    fn open(&self, path: &Path, mode: AccessMode) -> io::Result<Box<dyn AttrFile>> {
        let mut opts = OpenOptions::new();
        match mode {
            AccessMode::ReadOnly => opts.read(true),
            AccessMode::WriteOnly => opts.write(true),
            AccessMode::ReadWrite => opts.read(true).write(true),
        };
        let file = opts.open(path)?;
        Ok(Box::new(HostAttrFile { file: Some(file) }))
    }

    fn is_dir(&self, path: &Path) -> bool {
        path.is_dir()
    }
}

struct HostAttrFile {
    file: Option<File>,
}

impl HostAttrFile {
    fn file(&mut self) -> io::Result<&mut File> {
        self.file
            .as_mut()
            .ok_or_else(|| io::Error::new(io::ErrorKind::Other, "attribute file already closed"))
    }
}

impl AttrFile for HostAttrFile {
    fn read_text(&mut self) -> io::Result<String> {
        let file = self.file()?;
        file.seek(SeekFrom::Start(0))?;
        let mut text = String::new();
        file.read_to_string(&mut text)?;
        Ok(text)
    }

    fn write_bytes(&mut self, data: &[u8]) -> io::Result<()> {
        let file = self.file()?;
        file.seek(SeekFrom::Start(0))?;
        // sysfs stores whatever a single write() delivers; never split it.
        let n = file.write(data)?;
        if n != data.len() {
            return Err(io::Error::new(
                io::ErrorKind::WriteZero,
                format!("short write: {n} of {} bytes", data.len()),
            ));
        }
        Ok(())
    }

    fn close(&mut self) -> io::Result<()> {
        self.file.take();
        Ok(())
    }
}
