//! Sink: append-only destination for rendered invocation records.
//!
//! The file sink opens the target in create+append mode for every record and
//! holds a per-path lock for the whole open/write/close, so concurrent writers
//! never interleave partial lines. The dry-run sink keeps lines in memory.

mod dry_sink;
mod file_sink;
mod mirror;
mod r#trait;

pub use self::dry_sink::DryRunSink;
pub use self::file_sink::FileSink;
pub use self::mirror::{Mirror, MirrorTarget};
#[cfg(test)]
pub(crate) use self::mirror::test_support;
pub use self::r#trait::{create_sink, RecordSink};
