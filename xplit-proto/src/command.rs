use serde::{Deserialize, Serialize};

use crate::monitor::Discovery;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum Request {
    ListMonitors,
    Split { monitor: String, percent: u8 },
    Reset { monitor: String },
    ResetAll,
}

impl Request {
    /// Whether handling this request changes the display configuration.
    pub fn is_mutating(&self) -> bool {
        !matches!(self, Request::ListMonitors)
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum Response {
    Ok {
        discovery: Discovery,
    },
    Error {
        message: String,
        #[serde(default, skip_serializing_if = "Option::is_none")]
        discovery: Option<Discovery>,
    },
}

impl Response {
    pub fn is_ok(&self) -> bool {
        matches!(self, Response::Ok { .. })
    }

    pub fn discovery(&self) -> Option<&Discovery> {
        match self {
            Response::Ok { discovery } => Some(discovery),
            Response::Error { discovery, .. } => discovery.as_ref(),
        }
    }
}
