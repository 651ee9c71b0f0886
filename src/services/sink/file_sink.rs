use crate::error::{FuncLogError, Result};
use crate::record::InvocationRecord;
use dashmap::DashMap;
use once_cell::sync::Lazy;
use parking_lot::Mutex;
use std::fs::OpenOptions;
use std::io::Write;
use std::path::{Path, PathBuf};
use std::sync::Arc;
use tracing::{debug, info};

use super::mirror::Mirror;
use super::r#trait::RecordSink;

/// Один мьютекс на путь: несколько логгеров, пишущих в один файл, не перемешивают строки
static FILE_LOCKS: Lazy<DashMap<PathBuf, Arc<Mutex<()>>>> = Lazy::new(DashMap::new);

fn lock_for(path: &Path) -> Arc<Mutex<()>> {
    FILE_LOCKS
        .entry(path.to_path_buf())
        .or_insert_with(|| Arc::new(Mutex::new(())))
        .clone()
}

/// Журнал в файле: только дозапись, файл создаётся при первой записи
#[derive(Debug)]
pub struct FileSink {
    path: PathBuf,
    mirror: Option<Mirror>,
}

impl FileSink {
    pub fn new(path: PathBuf, mirror: Option<Mirror>) -> Self {
        info!("Журнал вызовов: {:?}", path);
        Self { path, mirror }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    fn append_line(&self, line: &str) -> Result<()> {
        let lock = lock_for(&self.path);
        let _guard = lock.lock();

        let mut buf = String::with_capacity(line.len() + 1);
        buf.push_str(line);
        buf.push('\n');

        // create + append: пустой файл появляется при первой записи, существующий не обрезается
        let mut file = OpenOptions::new()
            .create(true)
            .append(true)
            .open(&self.path)
            .map_err(|e| FuncLogError::sink_write(&self.path, e))?;

        file.write_all(buf.as_bytes())
            .and_then(|_| file.flush())
            .map_err(|e| FuncLogError::sink_write(&self.path, e))?;

        Ok(())
    }
}

impl RecordSink for FileSink {
    fn append(&self, record: &InvocationRecord) -> Result<()> {
        self.mirror(record);

        let line = record.to_string();
        self.append_line(&line)?;
        debug!("Запись добавлена в {:?}", self.path);
        Ok(())
    }

    fn mirror(&self, record: &InvocationRecord) {
        if let Some(mirror) = &self.mirror {
            mirror.write_record(record);
        }
    }

    fn report_failure(&self, error: &FuncLogError) {
        if let Some(mirror) = &self.mirror {
            mirror.write_line(&format!("funclog: {}", error));
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::record::{ArgList, Category, FailureInfo, InvocationRecord, Severity, ToValue};
    use crate::services::sink::mirror::test_support::SharedBuffer;

    fn record(n: i64) -> InvocationRecord {
        InvocationRecord::succeeded("add", Category::Function, (n, 1).capture_all(), (n + 1).to_value(), Severity::Log)
    }

    #[test]
    fn test_file_created_on_first_write() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("calls.log");
        let sink = FileSink::new(path.clone(), None);
        assert!(!path.exists());

        sink.append(&record(1)).unwrap();
        let contents = std::fs::read_to_string(&path).unwrap();
        assert_eq!(contents.lines().count(), 1);
        assert!(contents.ends_with('\n'));
    }

    #[test]
    fn test_existing_lines_are_kept() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("calls.log");
        std::fs::write(&path, "previous line\n").unwrap();

        let sink = FileSink::new(path.clone(), None);
        sink.append(&record(1)).unwrap();
        sink.append(&record(2)).unwrap();

        let contents = std::fs::read_to_string(&path).unwrap();
        let lines: Vec<&str> = contents.lines().collect();
        assert_eq!(lines.len(), 3);
        assert_eq!(lines[0], "previous line");
        assert!(lines[1].contains("add(1, 1) => int <2>"));
        assert!(lines[2].contains("add(2, 1) => int <3>"));
    }

    #[test]
    fn test_missing_parent_directory_is_sink_error() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("no").join("such").join("calls.log");
        let sink = FileSink::new(path, None);

        match sink.append(&record(1)) {
            Err(FuncLogError::SinkWrite { .. }) => {}
            other => panic!("ожидалась SinkWrite, получено {:?}", other),
        }
    }

    #[test]
    fn test_mirror_receives_every_record() {
        let dir = tempfile::tempdir().unwrap();
        let buffer = SharedBuffer::default();
        let sink = FileSink::new(dir.path().join("calls.log"), Some(Mirror::from_writer(buffer.clone())));

        sink.append(&record(1)).unwrap();
        let failed = InvocationRecord::failed("boom", Category::Function, ().capture_all(), FailureInfo::new("Error", "x"));
        sink.append(&failed).unwrap();

        let mirrored = buffer.contents();
        assert_eq!(mirrored.lines().count(), 2);
        assert!(mirrored.contains("[ERROR] Function <boom>"));
    }

    #[test]
    fn test_mirror_written_even_if_file_fails() {
        let dir = tempfile::tempdir().unwrap();
        let buffer = SharedBuffer::default();
        let sink = FileSink::new(dir.path().join("missing").join("calls.log"), Some(Mirror::from_writer(buffer.clone())));

        let err = sink.append(&record(1)).unwrap_err();
        sink.report_failure(&err);

        let mirrored = buffer.contents();
        assert!(mirrored.contains("add(1, 1)"));
        assert!(mirrored.contains("funclog: "));
    }

    #[test]
    fn test_concurrent_writers_do_not_interleave() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("calls.log");
        let sink = Arc::new(FileSink::new(path.clone(), None));

        let handles: Vec<_> = (0..8)
            .map(|t| {
                let sink = sink.clone();
                std::thread::spawn(move || {
                    for i in 0..50 {
                        sink.append(&record(t * 1000 + i)).unwrap();
                    }
                })
            })
            .collect();
        for handle in handles {
            handle.join().unwrap();
        }

        let contents = std::fs::read_to_string(&path).unwrap();
        let lines: Vec<&str> = contents.lines().collect();
        assert_eq!(lines.len(), 400);
        assert!(lines.iter().all(|line| line.contains("[LOG] Function <add> called: add(")));
    }
}
