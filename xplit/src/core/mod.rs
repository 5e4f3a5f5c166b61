mod controller;
mod discovery;
mod split;

pub use controller::{check_name, Controller, ListedMonitor};
pub use discovery::discover;
pub use split::{split, SplitRatio};
