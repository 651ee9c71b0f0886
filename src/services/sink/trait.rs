use crate::config::RecorderConfig;
use crate::error::{FuncLogError, Result};
use crate::record::InvocationRecord;
use std::sync::Arc;

use super::dry_sink::DryRunSink;
use super::file_sink::FileSink;
use super::mirror::Mirror;

/// Trait for record sinks: append-only destinations for finalized invocation records
pub trait RecordSink: Send + Sync {
    /// Persist one record. Errors are reported to the caller of `append`, never to
    /// the caller of the wrapped function.
    fn append(&self, record: &InvocationRecord) -> Result<()>;

    /// Write the record to the mirror stream only, without persisting it
    fn mirror(&self, _record: &InvocationRecord) {}

    /// Surface a failed `append` somewhere visible (mirror stream, if any)
    fn report_failure(&self, _error: &FuncLogError) {}
}

/// Factory function to create an appropriate sink based on the dry_run flag
pub fn create_sink(config: &RecorderConfig, dry_run: bool) -> Arc<dyn RecordSink> {
    let mirror = Mirror::from_target(config.mirror);
    if dry_run {
        Arc::new(DryRunSink::new(mirror))
    } else {
        Arc::new(FileSink::new(config.log_file.clone(), mirror))
    }
}
