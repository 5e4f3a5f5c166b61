use xplit_proto::{Discovery, Request, Response};

use crate::core::{discover, split, Controller, SplitRatio};
use crate::error::{Error, Result};
use crate::runner::Shell;

/// Handles front-end requests. Every request answers with a fresh discovery,
/// including failed mutations, so callers never keep a stale monitor list.
pub struct App<'a> {
    shell: &'a dyn Shell,
    tool: &'a str,
}

impl<'a> App<'a> {
    pub fn new(shell: &'a dyn Shell, tool: &'a str) -> Self {
        Self { shell, tool }
    }

    pub fn handle(&self, request: &Request) -> Response {
        tracing::debug!("Handling request: {:?}", request);

        if !request.is_mutating() {
            return Response::Ok {
                discovery: self.discover(),
            };
        }

        let outcome = self.apply(request);
        let discovery = self.discover();

        match outcome {
            Ok(()) => Response::Ok { discovery },
            Err(e) => {
                tracing::error!("Request failed: {}", e);
                Response::Error {
                    message: e.to_string(),
                    discovery: Some(discovery),
                }
            }
        }
    }

    pub fn discover(&self) -> Discovery {
        discover(self.shell, self.tool)
    }

    pub fn controller(&self) -> Controller<'a> {
        Controller::new(self.shell, self.tool)
    }

    fn apply(&self, request: &Request) -> Result<()> {
        match request {
            Request::ListMonitors => Ok(()),
            Request::Split { monitor, percent } => {
                let ratio = SplitRatio::new(u32::from(*percent))?;
                let current = self.discover();
                let source = current.find(monitor).ok_or_else(|| Error::UnknownMonitor {
                    name: monitor.clone(),
                })?;
                let plan = split(source, ratio);
                self.controller().apply_split(&plan)
            }
            Request::Reset { monitor } => self.controller().reset_one(monitor),
            Request::ResetAll => self.controller().reset_all(),
        }
    }
}
