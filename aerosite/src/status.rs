//! Site lifecycle.

use std::fmt::{Display, Formatter};

use serde::{Deserialize, Serialize};

use crate::color::Color;

/// Lifecycle stage of a site.
///
/// Stages are ordered: a site moves forward one stage at a time, and can be sent back to any
/// earlier stage for rework. [`SiteStatus::Completed`] is terminal.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SiteStatus {
    /// Site is being set up.
    #[default]
    Draft,
    /// Site survey is done.
    Surveyed,
    /// Flight is planned.
    Planned,
    /// Operation is approved.
    Approved,
    /// Operation at the site is finished.
    Completed,
}

/// All site statuses in lifecycle order.
pub const SITE_STATUS: [SiteStatus; 5] = [
    SiteStatus::Draft,
    SiteStatus::Surveyed,
    SiteStatus::Planned,
    SiteStatus::Approved,
    SiteStatus::Completed,
];

impl SiteStatus {
    /// Display label.
    pub fn label(&self) -> &'static str {
        match self {
            SiteStatus::Draft => "Draft",
            SiteStatus::Surveyed => "Surveyed",
            SiteStatus::Planned => "Planned",
            SiteStatus::Approved => "Approved",
            SiteStatus::Completed => "Completed",
        }
    }

    /// Badge color.
    pub fn color(&self) -> Color {
        match self {
            SiteStatus::Draft => Color::GRAY,
            SiteStatus::Surveyed => Color::BLUE,
            SiteStatus::Planned => Color::AMBER,
            SiteStatus::Approved => Color::GREEN,
            SiteStatus::Completed => Color::PURPLE,
        }
    }

    /// Next stage of the lifecycle, if any.
    pub fn next(&self) -> Option<SiteStatus> {
        let index = SITE_STATUS.iter().position(|s| s == self)?;
        SITE_STATUS.get(index + 1).copied()
    }

    /// Returns true if a site in this status may be moved to `target`.
    pub fn can_transition_to(&self, target: SiteStatus) -> bool {
        if *self == target {
            return true;
        }

        match self {
            SiteStatus::Completed => false,
            _ => target < *self || self.next() == Some(target),
        }
    }
}

impl Display for SiteStatus {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.label())
    }
}
