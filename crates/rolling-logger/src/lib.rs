//! Rolling file logger
//!
//! One log file per day (`{app}-{YYYY-MM-DD}.log`), old files pruned,
//! plus a bounded ring of recent lines for an in-app log viewer.
//! `log` records are bridged into the same subscriber.

use std::collections::VecDeque;
use std::fs::{self, File, OpenOptions};
use std::io::{self, Write};
use std::path::{Path, PathBuf};
use std::sync::{Arc, Mutex, OnceLock};

/// Daily files kept on disk
pub const KEEP_DAYS: usize = 7;
/// Lines kept in memory
pub const TAIL_CAPACITY: usize = 500;

type Tail = Arc<Mutex<VecDeque<String>>>;

static TAIL: OnceLock<Tail> = OnceLock::new();

/// `io::Write` target that switches files when the date changes
pub struct RollingWriter {
    dir: PathBuf,
    app_name: String,
    date: String,
    file: File,
    tail: Tail,
    /// Text after the last newline, waiting for the rest of its line
    partial: String,
    keep_days: usize,
}

impl RollingWriter {
    pub fn new(dir: impl Into<PathBuf>, app_name: &str) -> io::Result<Self> {
        let dir = dir.into();
        fs::create_dir_all(&dir)?;
        let date = today();
        let file = open_log(&dir, app_name, &date)?;
        let writer = Self {
            dir,
            app_name: app_name.to_string(),
            date,
            file,
            tail: Arc::new(Mutex::new(VecDeque::with_capacity(TAIL_CAPACITY))),
            partial: String::new(),
            keep_days: KEEP_DAYS,
        };
        writer.prune();
        Ok(writer)
    }

    pub fn with_keep_days(mut self, keep_days: usize) -> Self {
        self.keep_days = keep_days.max(1);
        self.prune();
        self
    }

    pub fn current_path(&self) -> PathBuf {
        self.dir.join(file_name(&self.app_name, &self.date))
    }

    /// Most recent lines written through this writer, oldest first
    pub fn recent(&self, n: usize) -> Vec<String> {
        tail_lines(&self.tail, n)
    }

    fn rotate_if_needed(&mut self) -> io::Result<()> {
        let date = today();
        if date != self.date {
            self.file.flush()?;
            self.file = open_log(&self.dir, &self.app_name, &date)?;
            self.date = date;
            self.prune();
        }
        Ok(())
    }

    /// Delete all but the newest `keep_days` files of this app
    fn prune(&self) {
        let prefix = format!("{}-", self.app_name);
        let Ok(entries) = fs::read_dir(&self.dir) else {
            return;
        };
        let mut logs: Vec<PathBuf> = entries
            .filter_map(|entry| entry.ok().map(|e| e.path()))
            .filter(|path| {
                path.file_name()
                    .and_then(|name| name.to_str())
                    .map_or(false, |name| name.starts_with(&prefix) && name.ends_with(".log"))
            })
            .collect();
        if logs.len() <= self.keep_days {
            return;
        }
        // Date in the name sorts lexically
        logs.sort();
        let excess = logs.len() - self.keep_days;
        for path in logs.into_iter().take(excess) {
            if let Err(e) = fs::remove_file(&path) {
                eprintln!("Failed to prune log {}: {}", path.display(), e);
            }
        }
    }
}

impl Write for RollingWriter {
    fn write(&mut self, buf: &[u8]) -> io::Result<usize> {
        self.rotate_if_needed()?;
        let written = self.file.write(buf)?;
        self.partial.push_str(&String::from_utf8_lossy(&buf[..written]));
        if !self.partial.contains('\n') {
            return Ok(written);
        }

        let mut tail = self.tail.lock().unwrap_or_else(|poisoned| poisoned.into_inner());
        while let Some(end) = self.partial.find('\n') {
            let line: String = self.partial.drain(..=end).collect();
            let line = line.trim_end();
            if line.trim().is_empty() {
                continue;
            }
            if tail.len() == TAIL_CAPACITY {
                tail.pop_front();
            }
            tail.push_back(line.to_string());
        }
        Ok(written)
    }

    fn flush(&mut self) -> io::Result<()> {
        self.file.flush()
    }
}

fn today() -> String {
    chrono::Local::now().format("%Y-%m-%d").to_string()
}

fn file_name(app_name: &str, date: &str) -> String {
    format!("{}-{}.log", app_name, date)
}

fn open_log(dir: &Path, app_name: &str, date: &str) -> io::Result<File> {
    OpenOptions::new()
        .create(true)
        .append(true)
        .open(dir.join(file_name(app_name, date)))
}

fn tail_lines(tail: &Tail, n: usize) -> Vec<String> {
    let tail = tail.lock().unwrap_or_else(|poisoned| poisoned.into_inner());
    let skip = tail.len().saturating_sub(n);
    tail.iter().skip(skip).cloned().collect()
}

/// Install the global subscriber writing to `log_dir`
pub fn init_logger(log_dir: PathBuf, app_name: &str) -> Result<(), String> {
    let writer = RollingWriter::new(&log_dir, app_name)
        .map_err(|e| format!("Failed to open log dir {}: {}", log_dir.display(), e))?;
    let tail = writer.tail.clone();

    tracing_subscriber::fmt()
        .with_writer(Mutex::new(writer))
        .with_ansi(false)
        .with_target(true)
        .with_max_level(tracing::Level::DEBUG)
        .try_init()
        .map_err(|e| format!("Failed to install logger: {}", e))?;

    let _ = TAIL.set(tail);
    log::info!("Logger initialized in {}", log_dir.display());
    Ok(())
}

pub fn info(msg: &str) -> Result<(), String> {
    tracing::info!("{}", msg);
    Ok(())
}

pub fn error(msg: &str) -> Result<(), String> {
    tracing::error!("{}", msg);
    Ok(())
}

/// Recent log lines of the installed logger (empty before init)
pub fn recent_lines(n: usize) -> Vec<String> {
    TAIL.get().map(|tail| tail_lines(tail, n)).unwrap_or_default()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_writes_to_dated_file_and_tail() {
        let dir = tempfile::tempdir().unwrap();
        let mut writer = RollingWriter::new(dir.path(), "MenuAdmin").unwrap();
        writer.write_all(b"first line\nsecond line\n").unwrap();
        writer.write_all(b"third line\n").unwrap();
        writer.flush().unwrap();

        let path = writer.current_path();
        assert_eq!(path.file_name().unwrap().to_str().unwrap(), format!("MenuAdmin-{}.log", today()));
        let content = fs::read_to_string(&path).unwrap();
        assert_eq!(content.lines().count(), 3);
        assert_eq!(writer.recent(2), vec!["second line", "third line"]);
        assert_eq!(writer.recent(10).len(), 3);
    }

    #[test]
    fn test_tail_joins_split_writes() {
        let dir = tempfile::tempdir().unwrap();
        let mut writer = RollingWriter::new(dir.path(), "app").unwrap();
        writer.write_all(b"2026-10-17 INFO ").unwrap();
        writer.write_all(b"reorder synced").unwrap();
        assert!(writer.recent(10).is_empty());

        writer.write_all(b"\nnext ").unwrap();
        assert_eq!(writer.recent(10), vec!["2026-10-17 INFO reorder synced"]);

        writer.write_all(b"line\r\n").unwrap();
        assert_eq!(writer.recent(10), vec!["2026-10-17 INFO reorder synced", "next line"]);
    }

    #[test]
    fn test_tail_is_bounded() {
        let dir = tempfile::tempdir().unwrap();
        let mut writer = RollingWriter::new(dir.path(), "app").unwrap();
        for i in 0..TAIL_CAPACITY + 20 {
            writeln!(writer, "line {}", i).unwrap();
        }
        let recent = writer.recent(usize::MAX);
        assert_eq!(recent.len(), TAIL_CAPACITY);
        assert_eq!(recent[0], "line 20");
    }

    #[test]
    fn test_prunes_old_files() {
        let dir = tempfile::tempdir().unwrap();
        for day in 1..=5 {
            File::create(dir.path().join(format!("app-2020-01-0{}.log", day))).unwrap();
        }
        File::create(dir.path().join("other-2020-01-01.log")).unwrap();

        let writer = RollingWriter::new(dir.path(), "app").unwrap().with_keep_days(3);
        let mut names: Vec<String> = fs::read_dir(dir.path())
            .unwrap()
            .map(|e| e.unwrap().file_name().to_string_lossy().into_owned())
            .collect();
        names.sort();
        assert_eq!(
            names,
            vec![
                "app-2020-01-04.log".to_string(),
                "app-2020-01-05.log".to_string(),
                file_name("app", &writer.date),
                "other-2020-01-01.log".to_string(),
            ]
        );
    }
}
