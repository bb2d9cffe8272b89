// CLASSIFICATION: COMMUNITY
// Filename: testing.rs v0.1
// Author: Lukas Bower
// Date Modified: 2026-10-18

//! In-memory [`Sysfs`] used by the unit tests. Records every operation so
//! tests can assert on write ordering, close counts and existence checks.

use std::collections::{BTreeMap, BTreeSet};
use std::io;
use std::path::{Path, PathBuf};
use std::sync::{Arc, Mutex, MutexGuard};

use crate::sysfs::{AccessMode, AttrFile, Sysfs};

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Op {
    Open(PathBuf, AccessMode),
    Read(PathBuf),
    Write(PathBuf, String),
    Close(PathBuf),
    IsDir(PathBuf),
}

#[derive(Default)]
struct State {
    files: BTreeMap<PathBuf, String>,
    dirs: BTreeSet<PathBuf>,
    failing_opens: BTreeSet<PathBuf>,
    failing_writes: BTreeSet<PathBuf>,
    appear: Option<(PathBuf, usize)>,
    ops: Vec<Op>,
}

#[derive(Clone, Default)]
pub struct MemSysfs {
    state: Arc<Mutex<State>>,
}

impl MemSysfs {
    pub fn new() -> Self {
        Self::default()
    }

    fn lock(&self) -> MutexGuard<'_, State> {
        self.state.lock().unwrap()
    }

    pub fn add_file(&self, path: impl Into<PathBuf>, content: &str) {
        self.lock().files.insert(path.into(), content.to_owned());
    }

    pub fn add_dir(&self, path: impl Into<PathBuf>) {
        self.lock().dirs.insert(path.into());
    }

    pub fn fail_open(&self, path: impl Into<PathBuf>) {
        self.lock().failing_opens.insert(path.into());
    }

    pub fn fail_writes(&self, path: impl Into<PathBuf>) {
        self.lock().failing_writes.insert(path.into());
    }

    /// Make `path` exist from its `checks`-th `is_dir` probe onwards.
    pub fn appear_after(&self, path: impl Into<PathBuf>, checks: usize) {
        self.lock().appear = Some((path.into(), checks));
    }

    pub fn ops(&self) -> Vec<Op> {
        self.lock().ops.clone()
    }

    pub fn clear_ops(&self) {
        self.lock().ops.clear();
    }

    pub fn writes(&self) -> Vec<(PathBuf, String)> {
        self.lock()
            .ops
            .iter()
            .filter_map(|op| match op {
                Op::Write(path, data) => Some((path.clone(), data.clone())),
                _ => None,
            })
            .collect()
    }

    pub fn content(&self, path: &Path) -> Option<String> {
        self.lock().files.get(path).cloned()
    }

    fn count(&self, wanted: impl Fn(&Op) -> bool) -> usize {
        self.lock().ops.iter().filter(|op| wanted(op)).count()
    }

    pub fn closes(&self, path: &Path) -> usize {
        self.count(|op| matches!(op, Op::Close(p) if p == path))
    }

    pub fn opens(&self, path: &Path) -> usize {
        self.count(|op| matches!(op, Op::Open(p, _) if p == path))
    }

    pub fn reads(&self, path: &Path) -> usize {
        self.count(|op| matches!(op, Op::Read(p) if p == path))
    }

    pub fn dir_checks(&self, path: &Path) -> usize {
        self.count(|op| matches!(op, Op::IsDir(p) if p == path))
    }
}

impl Sysfs for MemSysfs {
    fn open(&self, path: &Path, mode: AccessMode) -> io::Result<Box<dyn AttrFile>> {
        let mut state = self.lock();
        if state.failing_opens.contains(path) {
            return Err(io::Error::from(io::ErrorKind::PermissionDenied));
        }
        if !state.files.contains_key(path) {
            return Err(io::Error::from(io::ErrorKind::NotFound));
        }
        state.ops.push(Op::Open(path.to_owned(), mode));
        Ok(Box::new(MemFile {
            path: path.to_owned(),
            state: self.state.clone(),
            closed: false,
        }))
    }

    fn is_dir(&self, path: &Path) -> bool {
        let mut state = self.lock();
        state.ops.push(Op::IsDir(path.to_owned()));
        let checks = state
            .ops
            .iter()
            .filter(|op| matches!(op, Op::IsDir(p) if p == path))
            .count();
        let appears = matches!(&state.appear, Some((p, n)) if p == path && checks >= *n);
        if appears {
            state.dirs.insert(path.to_owned());
        }
        state.dirs.contains(path)
    }
}

struct MemFile {
    path: PathBuf,
    state: Arc<Mutex<State>>,
    closed: bool,
}

impl AttrFile for MemFile {
    fn read_text(&mut self) -> io::Result<String> {
        let mut state = self.state.lock().unwrap();
        state.ops.push(Op::Read(self.path.clone()));
        state
            .files
            .get(&self.path)
            .cloned()
            .ok_or_else(|| io::Error::from(io::ErrorKind::NotFound))
    }

    fn write_bytes(&mut self, data: &[u8]) -> io::Result<()> {
        let mut state = self.state.lock().unwrap();
        let text = String::from_utf8_lossy(data).into_owned();
        state.ops.push(Op::Write(self.path.clone(), text.clone()));
        if state.failing_writes.contains(&self.path) {
            return Err(io::Error::from(io::ErrorKind::InvalidInput));
        }
        state.files.insert(self.path.clone(), text);
        Ok(())
    }

    fn close(&mut self) -> io::Result<()> {
        if !self.closed {
            self.closed = true;
            self.state.lock().unwrap().ops.push(Op::Close(self.path.clone()));
        }
        Ok(())
    }
}
