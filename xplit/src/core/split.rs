use xplit_proto::{Monitor, Side, VirtualMonitor};

use crate::error::{Error, Result};

/// Share of an output's width given to the left half, in percent.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SplitRatio(u32);

impl SplitRatio {
    pub fn new(percent: u32) -> Result<Self> {
        if percent > 100 {
            return Err(Error::InvalidRatio { percent });
        }
        Ok(Self(percent))
    }

    pub fn percent(self) -> u32 {
        self.0
    }
}

impl Default for SplitRatio {
    fn default() -> Self {
        Self(50)
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SplitPlan {
    pub left: VirtualMonitor,
    pub right: VirtualMonitor,
}

/// Divide `monitor` into a left and a right virtual monitor.
///
/// Rounding remainders go to the right half, so both halves always add up to
/// the source width and physical width.
///
/// # Panics
///
/// Panics if `monitor.width` is zero or `x + width` overflows. Discovery never
/// produces such a monitor.
pub fn split(monitor: &Monitor, ratio: SplitRatio) -> SplitPlan {
    assert!(monitor.width > 0, "cannot split zero-width monitor {}", monitor.name);
    assert!(
        monitor.x.checked_add(monitor.width).is_some(),
        "offset of monitor {} out of range",
        monitor.name
    );

    let left_width = (monitor.width as u64 * ratio.percent() as u64 / 100) as u32;
    let right_width = monitor.width - left_width;

    let left_physical =
        (monitor.physical_width as u64 * left_width as u64 / monitor.width as u64) as u32;
    let right_physical = monitor.physical_width - left_physical;

    let left = VirtualMonitor {
        name: Side::Left.monitor_name(&monitor.name),
        side: Side::Left,
        width: left_width,
        height: monitor.height,
        physical_width: left_physical,
        physical_height: monitor.physical_height,
        x: monitor.x,
        y: monitor.y,
        source: Some(monitor.name.clone()),
    };

    let right = VirtualMonitor {
        name: Side::Right.monitor_name(&monitor.name),
        side: Side::Right,
        width: right_width,
        height: monitor.height,
        physical_width: right_physical,
        physical_height: monitor.physical_height,
        x: monitor.x + left_width,
        y: monitor.y,
        source: None,
    };

    SplitPlan { left, right }
}
