pub mod classifier;
pub mod instrument;
pub mod sink;

pub use classifier::{classify, CallableInfo, Shape};
pub use instrument::{Instrumented, InstrumentedAsync, Logger, Settings};
pub use sink::{create_sink, RecordSink};
