mod app;
mod args;
mod config;
mod core;
mod error;
mod runner;
mod serve;

use std::io::{self, Write};
use std::process::ExitCode;

use anyhow::{Context, Result};
use tracing_subscriber::EnvFilter;
use xplit_proto::{Discovery, Request, Response};

use crate::app::App;
use crate::args::{Args, SubCommand};
use crate::config::Config;
use crate::core::ListedMonitor;
use crate::runner::SystemShell;

fn main() -> Result<ExitCode> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("xplit=info")),
        )
        .with_writer(io::stderr)
        .init();

    let args: Args = argh::from_env();
    let config = Config::load(args.config.as_deref())?;
    let tool = args.tool.clone().unwrap_or_else(|| config.tool.clone());

    tracing::debug!("xplit starting (tool: {})", tool);

    let shell = SystemShell::new();
    let app = App::new(&shell, &tool);

    let request = match args.command {
        SubCommand::List(_) => Request::ListMonitors,
        SubCommand::Split(split) => Request::Split {
            monitor: split.monitor,
            percent: match split.percent {
                Some(p) => p,
                None => u8::try_from(config.default_ratio()?.percent())
                    .context("default_percent out of range")?,
            },
        },
        SubCommand::Reset(reset) => Request::Reset {
            monitor: reset.monitor,
        },
        SubCommand::ResetAll(_) => Request::ResetAll,
        SubCommand::ListMonitors(_) => {
            let listed = app.controller().list_monitors()?;
            print_listed(&listed, args.json)?;
            return Ok(ExitCode::SUCCESS);
        }
        SubCommand::Serve(_) => {
            serve::serve(&app, io::stdin().lock(), io::stdout().lock())?;
            return Ok(ExitCode::SUCCESS);
        }
    };

    let response = app.handle(&request);
    print_response(&response, args.json)?;

    Ok(if response.is_ok() {
        ExitCode::SUCCESS
    } else {
        ExitCode::FAILURE
    })
}

fn print_response(response: &Response, json: bool) -> Result<()> {
    let mut stdout = io::stdout().lock();
    if json {
        serde_json::to_writer(&mut stdout, response)?;
        writeln!(stdout)?;
        return Ok(());
    }

    if let Response::Error { message, .. } = response {
        eprintln!("error: {}", message);
    }
    if let Some(discovery) = response.discovery() {
        write_discovery(&mut stdout, discovery)?;
    }
    Ok(())
}

fn write_discovery(out: &mut impl Write, discovery: &Discovery) -> io::Result<()> {
    if let Some(err) = &discovery.query_error {
        writeln!(out, "query failed: {}", err)?;
    }
    for m in &discovery.monitors {
        writeln!(
            out,
            "{:<12} {}x{}+{}+{}  {}mm x {}mm",
            m.name, m.width, m.height, m.x, m.y, m.physical_width, m.physical_height
        )?;
    }
    for s in &discovery.skipped {
        writeln!(out, "{:<12} skipped: {}", s.name, s.reason)?;
    }
    Ok(())
}

fn print_listed(listed: &[ListedMonitor], json: bool) -> Result<()> {
    let mut stdout = io::stdout().lock();
    if json {
        serde_json::to_writer(&mut stdout, listed)?;
        writeln!(stdout)?;
        return Ok(());
    }
    for m in listed {
        let mut flags = String::new();
        if m.automatic {
            flags.push('+');
        }
        if m.primary {
            flags.push('*');
        }
        writeln!(stdout, "{:>2}: {}{}", m.index, flags, m.name)?;
    }
    Ok(())
}
