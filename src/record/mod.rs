pub mod args;
pub mod invocation;
pub mod render;
pub mod severity;
pub mod value;

pub use args::{Arg, ArgList, CapturedArgs, DebugArgList, Named};
pub use invocation::{CallOutcome, Category, FailureInfo, InvocationRecord};
pub use render::render;
pub use severity::Severity;
pub use value::{ToValue, Value};
