use std::path::PathBuf;

use argh::FromArgs;

/// Split a physical X11 output into two virtual monitors.
#[derive(FromArgs, Debug)]
pub struct Args {
    /// config file (default: ~/.config/xplit/config.toml)
    #[argh(option)]
    pub config: Option<PathBuf>,

    /// display tool to invoke instead of the configured one
    #[argh(option)]
    pub tool: Option<String>,

    /// print responses as JSON
    #[argh(switch)]
    pub json: bool,

    #[argh(subcommand)]
    pub command: SubCommand,
}

#[derive(FromArgs, Debug)]
#[argh(subcommand)]
pub enum SubCommand {
    List(ListArgs),
    Split(SplitArgs),
    Reset(ResetArgs),
    ResetAll(ResetAllArgs),
    ListMonitors(ListMonitorsArgs),
    Serve(ServeArgs),
}

/// List connected monitors.
#[derive(FromArgs, Debug)]
#[argh(subcommand, name = "list")]
pub struct ListArgs {}

/// Split a monitor into <name>-0 and <name>-1.
#[derive(FromArgs, Debug)]
#[argh(subcommand, name = "split")]
pub struct SplitArgs {
    /// output to split, e.g. HDMI-1
    #[argh(positional)]
    pub monitor: String,

    /// width of the left half in percent (0-100)
    #[argh(option, short = 'p')]
    pub percent: Option<u8>,
}

/// Remove the split of one monitor.
#[derive(FromArgs, Debug)]
#[argh(subcommand, name = "reset")]
pub struct ResetArgs {
    /// output whose split to remove
    #[argh(positional)]
    pub monitor: String,
}

/// Remove every user-defined virtual monitor.
#[derive(FromArgs, Debug)]
#[argh(subcommand, name = "reset-all")]
pub struct ResetAllArgs {}

/// Show the monitors currently defined on the screen.
#[derive(FromArgs, Debug)]
#[argh(subcommand, name = "listmonitors")]
pub struct ListMonitorsArgs {}

/// Read JSON requests from stdin, one per line.
#[derive(FromArgs, Debug)]
#[argh(subcommand, name = "serve")]
pub struct ServeArgs {}
