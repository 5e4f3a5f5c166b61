use serde::{Deserialize, Serialize};

/// A connected output with resolved geometry, as reported by the display tool.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Monitor {
    pub name: String,
    pub width: u32,
    pub height: u32,
    pub physical_width: u32,
    pub physical_height: u32,
    pub x: u32,
    pub y: u32,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Side {
    Left,
    Right,
}

impl Side {
    fn suffix(self) -> &'static str {
        match self {
            Side::Left => "0",
            Side::Right => "1",
        }
    }

    /// Name of the virtual monitor carved out of `output` on this side.
    pub fn monitor_name(self, output: &str) -> String {
        format!("{}-{}", output, self.suffix())
    }
}

/// One half of a split output.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct VirtualMonitor {
    pub name: String,
    pub side: Side,
    pub width: u32,
    pub height: u32,
    pub physical_width: u32,
    pub physical_height: u32,
    pub x: u32,
    pub y: u32,
    /// Physical output backing this monitor. `None` marks a standalone region.
    pub source: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum SkipReason {
    CommandFailed { message: String },
    NoGeometry,
    InvalidNumber { message: String },
    InvalidName,
    ZeroWidth,
}

impl std::fmt::Display for SkipReason {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            SkipReason::CommandFailed { message } => write!(f, "command failed: {}", message),
            SkipReason::NoGeometry => write!(f, "no resolution, offset or physical size found"),
            SkipReason::InvalidNumber { message } => write!(f, "invalid number: {}", message),
            SkipReason::InvalidName => write!(f, "output name is not a plain identifier"),
            SkipReason::ZeroWidth => write!(f, "output has zero width"),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SkippedOutput {
    pub name: String,
    pub reason: SkipReason,
}

/// Result of one discovery pass. Outputs that could not be resolved are listed
/// in `skipped` instead of failing the whole pass.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Discovery {
    pub monitors: Vec<Monitor>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub skipped: Vec<SkippedOutput>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub query_error: Option<String>,
}

impl Discovery {
    pub fn find(&self, name: &str) -> Option<&Monitor> {
        self.monitors.iter().find(|m| m.name == name)
    }

    pub fn names(&self) -> impl Iterator<Item = &str> {
        self.monitors.iter().map(|m| m.name.as_str())
    }
}
