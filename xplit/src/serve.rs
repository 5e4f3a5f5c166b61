use anyhow::{Context, Result};
use std::io::{BufRead, Write};
use xplit_proto::{Request, Response};

use crate::app::App;

/// Answer one JSON request per input line with one JSON response per line
/// until the input closes.
pub fn serve<R: BufRead, W: Write>(app: &App, input: R, mut output: W) -> Result<()> {
    tracing::info!("Serving requests on stdin");

    for line in input.lines() {
        let line = line.context("Failed to read request")?;
        if line.trim().is_empty() {
            continue;
        }

        let response = match serde_json::from_str::<Request>(&line) {
            Ok(request) => app.handle(&request),
            Err(e) => {
                tracing::warn!("Invalid request {}: {}", line.trim(), e);
                Response::Error {
                    message: format!("invalid request: {}", e),
                    discovery: None,
                }
            }
        };

        serde_json::to_writer(&mut output, &response)?;
        writeln!(output)?;
        output.flush()?;
    }

    tracing::info!("Input closed, exiting");
    Ok(())
}
