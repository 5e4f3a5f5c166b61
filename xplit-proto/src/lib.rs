pub mod command;
pub mod monitor;

pub use command::{Request, Response};
pub use monitor::{Discovery, Monitor, Side, SkipReason, SkippedOutput, VirtualMonitor};
