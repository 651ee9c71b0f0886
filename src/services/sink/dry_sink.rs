use crate::error::{FuncLogError, Result};
use crate::record::InvocationRecord;
use parking_lot::Mutex;
use tracing::info;

use super::mirror::Mirror;
use super::r#trait::RecordSink;

/// Dry-run: ничего не пишет на диск, строки остаются в памяти и уходят в tracing
#[derive(Debug, Default)]
pub struct DryRunSink {
    mirror: Option<Mirror>,
    lines: Mutex<Vec<String>>,
}

impl DryRunSink {
    pub fn new(mirror: Option<Mirror>) -> Self {
        info!("Dry-run режим - журнал вызовов не пишется на диск");
        Self {
            mirror,
            lines: Mutex::new(Vec::new()),
        }
    }

    /// Все строки, "записанные" за время жизни sink
    pub fn lines(&self) -> Vec<String> {
        self.lines.lock().clone()
    }
}

impl RecordSink for DryRunSink {
    fn append(&self, record: &InvocationRecord) -> Result<()> {
        self.mirror(record);

        let line = record.to_string();
        info!("Dry-run: {}", line);
        self.lines.lock().push(line);
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
