use std::sync::OnceLock;

use regex::Regex;
use serde::Serialize;
use xplit_proto::{Side, VirtualMonitor};

use super::split::SplitPlan;
use crate::error::{Error, Result};
use crate::runner::Shell;

static OUTPUT_NAME: OnceLock<Regex> = OnceLock::new();

/// Reject anything that is not a plain output/monitor identifier. Names end up
/// in `sh -c` command lines.
pub fn check_name(name: &str) -> Result<()> {
    let pattern = OUTPUT_NAME.get_or_init(|| {
        Regex::new(r"^[A-Za-z0-9._:-]+$").expect("output name pattern is valid")
    });
    if pattern.is_match(name) {
        Ok(())
    } else {
        Err(Error::InvalidMonitorName {
            name: name.to_string(),
        })
    }
}

/// An entry of `--listmonitors`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ListedMonitor {
    pub index: u32,
    pub name: String,
    /// Created by the server for an output (`+` marker) rather than by `--setmonitor`.
    pub automatic: bool,
    pub primary: bool,
}

/// Issues virtual-monitor commands to the display tool.
pub struct Controller<'a> {
    shell: &'a dyn Shell,
    tool: &'a str,
}

impl<'a> Controller<'a> {
    pub fn new(shell: &'a dyn Shell, tool: &'a str) -> Self {
        Self { shell, tool }
    }

    /// Create both halves of a split. The right half is not attempted when the
    /// left one fails.
    pub fn apply_split(&self, plan: &SplitPlan) -> Result<()> {
        self.set_monitor(&plan.left)?;
        self.set_monitor(&plan.right)?;
        tracing::info!("Split applied: {} | {}", plan.left.name, plan.right.name);
        Ok(())
    }

    /// Delete both halves of `output`. Both deletions are attempted; the first
    /// failure is returned.
    pub fn reset_one(&self, output: &str) -> Result<()> {
        check_name(output)?;
        let mut first_error = None;
        for side in [Side::Left, Side::Right] {
            let name = side.monitor_name(output);
            if let Err(e) = self.del_monitor(&name) {
                tracing::warn!("Failed to delete {}: {}", name, e);
                if first_error.is_none() {
                    first_error = Some(e);
                }
            }
        }
        match first_error {
            Some(e) => Err(e),
            None => Ok(()),
        }
    }

    /// Delete every monitor defined with `--setmonitor`, stopping at the first
    /// failure. Automatic (`+`) entries are never deleted, so a listing with
    /// only automatic monitors returns `Ok` without issuing any delete.
    pub fn reset_all(&self) -> Result<()> {
        let listed = self.list_monitors()?;
        let mut deleted = 0;
        for monitor in listed.iter().filter(|m| !m.automatic) {
            self.del_monitor(&monitor.name)?;
            deleted += 1;
        }
        tracing::info!("Deleted {} virtual monitor(s)", deleted);
        Ok(())
    }

    pub fn list_monitors(&self) -> Result<Vec<ListedMonitor>> {
        let output = self.shell.run(&format!("{} --listmonitors", self.tool))?;
        Ok(parse_listmonitors(&output))
    }

    fn set_monitor(&self, monitor: &VirtualMonitor) -> Result<()> {
        check_name(&monitor.name)?;
        if let Some(source) = &monitor.source {
            check_name(source)?;
        }
        let command = format!(
            "{} --setmonitor {} {} {}",
            self.tool,
            monitor.name,
            geometry_arg(monitor),
            monitor.source.as_deref().unwrap_or("none")
        );
        self.shell.run(&command)?;
        Ok(())
    }

    fn del_monitor(&self, name: &str) -> Result<()> {
        check_name(name)?;
        self.shell.run(&format!("{} --delmonitor {}", self.tool, name))?;
        Ok(())
    }
}

/// `<w>/<mmw>x<h>/<mmh>+<x>+<y>`
fn geometry_arg(monitor: &VirtualMonitor) -> String {
    format!(
        "{}/{}x{}/{}+{}+{}",
        monitor.width,
        monitor.physical_width,
        monitor.height,
        monitor.physical_height,
        monitor.x,
        monitor.y
    )
}

fn parse_listmonitors(output: &str) -> Vec<ListedMonitor> {
    output
        .lines()
        .filter(|line| line.starts_with(' '))
        .filter_map(|line| {
            let mut fields = line.split_whitespace();
            let index = fields.next()?.trim_end_matches(':').parse().ok()?;
            let raw = fields.next()?;

            let automatic = raw.starts_with('+');
            let raw = raw.trim_start_matches('+');
            let primary = raw.starts_with('*');
            let name = raw.trim_start_matches('*');

            if name.is_empty() {
                return None;
            }
            Some(ListedMonitor {
                index,
                name: name.to_string(),
                automatic,
                primary,
            })
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::split::{split, SplitRatio};
    use crate::runner::testing::ScriptedShell;
    use xplit_proto::Monitor;

    fn plan() -> SplitPlan {
        let monitor = Monitor {
            name: "HDMI-1".to_string(),
            width: 1920,
            height: 1080,
            physical_width: 520,
            physical_height: 290,
            x: 0,
            y: 0,
        };
        split(&monitor, SplitRatio::new(50).unwrap())
    }

    const LEFT: &str = "xrandr --setmonitor HDMI-1-0 960/260x1080/290+0+0 HDMI-1";
    const RIGHT: &str = "xrandr --setmonitor HDMI-1-1 960/260x1080/290+960+0 none";

    const LISTING: &str = "\
Monitors: 3
 0: HDMI-1-0 960/260x1080/290+0+0  HDMI-1
 1: HDMI-1-1 960/260x1080/290+960+0
 2: +DP-2 1920/600x1080/340+1920+0  DP-2
";

    #[test]
    fn test_apply_split_issues_left_then_right() {
        let shell = ScriptedShell::new().reply(LEFT, "").reply(RIGHT, "");
        Controller::new(&shell, "xrandr").apply_split(&plan()).unwrap();
        assert_eq!(shell.issued(), vec![LEFT, RIGHT]);
    }

    #[test]
    fn test_apply_split_stops_after_left_failure() {
        let shell = ScriptedShell::new()
            .fail(LEFT, "X Error of failed request: BadValue")
            .reply(RIGHT, "");
        let err = Controller::new(&shell, "xrandr")
            .apply_split(&plan())
            .unwrap_err();
        assert!(err.to_string().contains("BadValue"));
        assert_eq!(shell.issued(), vec![LEFT]);
    }

    #[test]
    fn test_reset_one_attempts_both() {
        let shell = ScriptedShell::new()
            .fail("xrandr --delmonitor HDMI-1-0", "X Error: BadAtom")
            .reply("xrandr --delmonitor HDMI-1-1", "");
        let err = Controller::new(&shell, "xrandr")
            .reset_one("HDMI-1")
            .unwrap_err();
        assert!(err.to_string().contains("BadAtom"));
        assert_eq!(
            shell.issued(),
            vec!["xrandr --delmonitor HDMI-1-0", "xrandr --delmonitor HDMI-1-1"]
        );
    }

    #[test]
    fn test_reset_one_rejects_shell_metacharacters() {
        let shell = ScriptedShell::new();
        let err = Controller::new(&shell, "xrandr")
            .reset_one("X; touch /tmp/xplit_marker; echo")
            .unwrap_err();
        assert!(matches!(err, Error::InvalidMonitorName { .. }));
        assert!(shell.issued().is_empty());
    }

    #[test]
    fn test_reset_one_never_reaches_real_shell() {
        let marker = std::env::temp_dir().join(format!("xplit_marker_{}", std::process::id()));
        let name = format!("X; touch {}; echo", marker.display());
        let shell = crate::runner::SystemShell::new();

        assert!(Controller::new(&shell, "true").reset_one(&name).is_err());
        assert!(!marker.exists());
    }

    #[test]
    fn test_check_name() {
        for ok in ["HDMI-1", "eDP-1-0", "DP-1.2", "VIRTUAL_1", "Xwayland:0"] {
            assert!(check_name(ok).is_ok(), "{ok}");
        }
        for bad in ["", "a b", "a;b", "$(id)", "`id`", "a'b", "a|b", "a&&b"] {
            assert!(check_name(bad).is_err(), "{bad}");
        }
    }

    #[test]
    fn test_apply_split_rejects_bad_source_name() {
        let mut plan = plan();
        plan.left.source = Some("HDMI-1 && reboot".to_string());
        let shell = ScriptedShell::new();
        let err = Controller::new(&shell, "xrandr")
            .apply_split(&plan)
            .unwrap_err();
        assert!(matches!(err, Error::InvalidMonitorName { .. }));
        assert!(shell.issued().is_empty());
    }

    #[test]
    fn test_reset_all_only_automatic_issues_no_delete() {
        let shell = ScriptedShell::new().reply(
            "xrandr --listmonitors",
            "Monitors: 1\n 0: +*eDP-1 1920/344x1080/193+0+0  eDP-1\n",
        );
        Controller::new(&shell, "xrandr").reset_all().unwrap();
        assert_eq!(shell.issued(), vec!["xrandr --listmonitors"]);
    }

    #[test]
    fn test_reset_one_success() {
        let shell = ScriptedShell::new()
            .reply("xrandr --delmonitor DP-2-0", "")
            .reply("xrandr --delmonitor DP-2-1", "");
        assert!(Controller::new(&shell, "xrandr").reset_one("DP-2").is_ok());
    }

    #[test]
    fn test_parse_listmonitors() {
        let listed = parse_listmonitors(LISTING);
        assert_eq!(listed.len(), 3);
        assert_eq!(listed[0].name, "HDMI-1-0");
        assert!(!listed[0].automatic);
        assert_eq!(listed[1].index, 1);
        assert_eq!(listed[2].name, "DP-2");
        assert!(listed[2].automatic);
        assert!(!listed[2].primary);
    }

    #[test]
    fn test_parse_listmonitors_primary_marker() {
        let listed = parse_listmonitors("Monitors: 1\n 0: +*eDP-1 1920/344x1080/193+0+0  eDP-1\n");
        assert_eq!(
            listed,
            vec![ListedMonitor {
                index: 0,
                name: "eDP-1".to_string(),
                automatic: true,
                primary: true,
            }]
        );
    }

    #[test]
    fn test_reset_all_deletes_each_virtual_monitor() {
        let shell = ScriptedShell::new()
            .reply("xrandr --listmonitors", LISTING)
            .reply("xrandr --delmonitor HDMI-1-0", "")
            .reply("xrandr --delmonitor HDMI-1-1", "");
        Controller::new(&shell, "xrandr").reset_all().unwrap();
        assert_eq!(
            shell.issued(),
            vec![
                "xrandr --listmonitors",
                "xrandr --delmonitor HDMI-1-0",
                "xrandr --delmonitor HDMI-1-1",
            ]
        );
    }

    #[test]
    fn test_reset_all_fails_fast() {
        let shell = ScriptedShell::new()
            .reply("xrandr --listmonitors", LISTING)
            .fail("xrandr --delmonitor HDMI-1-0", "BadValue")
            .reply("xrandr --delmonitor HDMI-1-1", "");
        assert!(Controller::new(&shell, "xrandr").reset_all().is_err());
        assert_eq!(
            shell.issued(),
            vec!["xrandr --listmonitors", "xrandr --delmonitor HDMI-1-0"]
        );
    }

    #[test]
    fn test_reset_all_listing_failure() {
        let shell = ScriptedShell::new().fail("xrandr --listmonitors", "Can't open display");
        assert!(Controller::new(&shell, "xrandr").reset_all().is_err());
        assert_eq!(shell.issued(), vec!["xrandr --listmonitors"]);
    }
}
