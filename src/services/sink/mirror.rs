use crate::record::InvocationRecord;
use parking_lot::Mutex;
use serde::{Deserialize, Serialize};
use std::io::{self, Write};

/// Куда дублировать записи помимо файла
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum MirrorTarget {
    #[default]
    None,
    Stderr,
    Stdout,
}

/// Дополнительный поток вывода для записей и ошибок записи в журнал
pub struct Mirror {
    out: Mutex<Box<dyn Write + Send>>,
}

impl Mirror {
    pub fn from_target(target: MirrorTarget) -> Option<Self> {
        match target {
            MirrorTarget::None => None,
            MirrorTarget::Stderr => Some(Self::from_writer(io::stderr())),
            MirrorTarget::Stdout => Some(Self::from_writer(io::stdout())),
        }
    }

    pub fn from_writer<W: Write + Send + 'static>(writer: W) -> Self {
        Self {
            out: Mutex::new(Box::new(writer)),
        }
    }

    pub fn write_record(&self, record: &InvocationRecord) {
        self.write_line(&record.to_string());
    }

    /// Ошибки самого зеркала игнорируются: оно не должно влиять на вызов
    pub fn write_line(&self, line: &str) {
        let mut out = self.out.lock();
        if let Err(e) = writeln!(out, "{}", line).and_then(|_| out.flush()) {
            tracing::debug!("Не удалось записать в зеркальный поток: {}", e);
        }
    }
}

impl std::fmt::Debug for Mirror {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Mirror").finish_non_exhaustive()
    }
}

#[cfg(test)]
pub(crate) mod test_support {
    use parking_lot::Mutex;
    use std::io::{self, Write};
    use std::sync::Arc;

    /// Общий буфер, в который можно писать из зеркала и читать из теста
    #[derive(Clone, Default)]
    pub struct SharedBuffer(pub Arc<Mutex<Vec<u8>>>);

    impl SharedBuffer {
        pub fn contents(&self) -> String {
            String::from_utf8_lossy(&self.0.lock()).into_owned()
        }
    }

    impl Write for SharedBuffer {
        fn write(&mut self, buf: &[u8]) -> io::Result<usize> {
            self.0.lock().extend_from_slice(buf);
            Ok(buf.len())
        }

        fn flush(&mut self) -> io::Result<()> {
            Ok(())
        }
    }
}

#[cfg(test)]
mod tests {
    use super::test_support::SharedBuffer;
    use super::*;

    #[test]
    fn test_none_target_has_no_mirror() {
        assert!(Mirror::from_target(MirrorTarget::None).is_none());
        assert!(Mirror::from_target(MirrorTarget::Stderr).is_some());
    }

    #[test]
    fn test_write_line_appends_newline() {
        let buffer = SharedBuffer::default();
        let mirror = Mirror::from_writer(buffer.clone());
        mirror.write_line("first");
        mirror.write_line("second");
        assert_eq!(buffer.contents(), "first\nsecond\n");
    }
}
