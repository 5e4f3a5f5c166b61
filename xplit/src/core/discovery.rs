use std::sync::OnceLock;

use regex::Regex;
use xplit_proto::{Discovery, Monitor, SkipReason, SkippedOutput};

use super::check_name;
use crate::runner::Shell;

// <w>x<h>+<x>+<y>, then anything (rotation, reflection), then <pw>mm x <ph>mm
static GEOMETRY: OnceLock<Regex> = OnceLock::new();

fn geometry_pattern() -> &'static Regex {
    GEOMETRY.get_or_init(|| {
        Regex::new(r"(\d+)x(\d+)\+(\d+)\+(\d+).*?(\d+)mm x (\d+)mm")
            .expect("geometry pattern is valid")
    })
}

/// Query the display tool and resolve every connected output.
///
/// Never fails: a failing query yields an empty result with `query_error`
/// set, and outputs whose geometry cannot be resolved end up in `skipped`.
pub fn discover(shell: &dyn Shell, tool: &str) -> Discovery {
    let query = match shell.run(&format!("{} --query", tool)) {
        Ok(out) => out,
        Err(e) => {
            tracing::warn!("Failed to query monitors: {}", e);
            return Discovery {
                query_error: Some(e.to_string()),
                ..Default::default()
            };
        }
    };

    let mut discovery = Discovery::default();

    for name in connected_outputs(&query) {
        tracing::debug!("Found connected output: {}", name);
        match resolve(shell, tool, name) {
            Ok(monitor) => {
                tracing::info!(
                    "Monitor {}: {}x{}+{}+{} ({}mm x {}mm)",
                    monitor.name,
                    monitor.width,
                    monitor.height,
                    monitor.x,
                    monitor.y,
                    monitor.physical_width,
                    monitor.physical_height
                );
                discovery.monitors.push(monitor);
            }
            Err(reason) => {
                tracing::warn!("Skipping output {}: {}", name, reason);
                discovery.skipped.push(SkippedOutput {
                    name: name.to_string(),
                    reason,
                });
            }
        }
    }

    tracing::info!(
        "Discovered {} monitor(s), skipped {}",
        discovery.monitors.len(),
        discovery.skipped.len()
    );
    discovery
}

/// Names of the outputs reported as connected, in query order.
fn connected_outputs(query: &str) -> Vec<&str> {
    query
        .lines()
        .filter(|line| line.contains(" connected") && !line.contains("disconnected"))
        .filter_map(|line| line.split_whitespace().next())
        .collect()
}

fn resolve(shell: &dyn Shell, tool: &str, name: &str) -> Result<Monitor, SkipReason> {
    check_name(name).map_err(|_| SkipReason::InvalidName)?;
    let line = shell
        .run(&format!("{} | grep -w '{} connected'", tool, name))
        .map_err(|e| SkipReason::CommandFailed {
            message: e.to_string(),
        })?;
    parse_geometry(name, &line)
}

/// Extract resolution, offset and physical size from an output's status line.
fn parse_geometry(name: &str, line: &str) -> Result<Monitor, SkipReason> {
    let caps = geometry_pattern()
        .captures(line)
        .ok_or(SkipReason::NoGeometry)?;

    let mut values = [0u32; 6];
    for (i, value) in values.iter_mut().enumerate() {
        let text = &caps[i + 1];
        *value = text.parse().map_err(|e| SkipReason::InvalidNumber {
            message: format!("{}: {}", text, e),
        })?;
    }
    let [width, height, x, y, physical_width, physical_height] = values;

    if width == 0 {
        return Err(SkipReason::ZeroWidth);
    }
    if x.checked_add(width).is_none() || y.checked_add(height).is_none() {
        return Err(SkipReason::InvalidNumber {
            message: format!("offset {}+{} out of range for {}x{}", x, y, width, height),
        });
    }

    Ok(Monitor {
        name: name.to_string(),
        width,
        height,
        physical_width,
        physical_height,
        x,
        y,
    })
}
