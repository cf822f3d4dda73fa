//! Current version selection.
//!
//! A specification tab holds one group per published version, for example
//! `"2025-06-18 (Latest)"`, `"2025-03-26"`, `"Draft"`. Exactly one group is
//! selected per run:
//!
//! 1. the first group, in authoring order, whose label contains the current
//!    marker (case-insensitive) or the anchor version token;
//! 2. otherwise the group carrying the greatest `YYYY-MM-DD` token. The date
//!    format sorts chronologically as a string. Ties keep the first group.

use std::sync::LazyLock;

use regex::Regex;

use crate::error::NavigationError;
use crate::model::{Group, PageTreeNode, Tab};

// Not adjacent to other digits, so `2025-06-181` and `20250-06-18` carry no version.
static VERSION_TOKEN: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(?:^|\D)(\d{4}-\d{2}-\d{2})(?:\D|$)").expect("valid version regex")
});

/// Rules for locating the current version group.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct VersionRules {
    /// Label of the tab holding the versions (case-insensitive).
    pub tab: String,
    /// Marker identifying the current group (case-insensitive substring).
    pub current_marker: String,
    /// Version token that identifies the current group on its own.
    pub anchor_version: Option<String>,
}

impl Default for VersionRules {
    fn default() -> Self {
        Self {
            tab: "Specification".to_owned(),
            current_marker: "Latest".to_owned(),
            anchor_version: None,
        }
    }
}

/// How the current group was chosen.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Selection {
    /// Label contains the current marker.
    Marker,
    /// Label contains the anchor version token.
    Anchor,
    /// Greatest version date among all groups.
    LatestDate,
}

impl std::fmt::Display for Selection {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let s = match self {
            Self::Marker => "current marker",
            Self::Anchor => "anchor version",
            Self::LatestDate => "latest date",
        };
        f.write_str(s)
    }
}

/// The group selected for aggregation.
#[derive(Debug, PartialEq, Eq)]
pub struct SelectedVersion<'a> {
    /// Version id (`YYYY-MM-DD`).
    pub version: String,
    /// Label of the selected group.
    pub label: &'a str,
    /// Page tree of the selected group.
    pub pages: &'a [PageTreeNode],
    /// How the group was chosen.
    pub selection: Selection,
    /// Every version token found in the tab, sorted and deduplicated.
    pub considered: Vec<String>,
}

/// Extract the first `YYYY-MM-DD` token from a group label.
#[must_use]
pub fn extract_version(label: &str) -> Option<&str> {
    VERSION_TOKEN
        .captures(label)
        .and_then(|caps| caps.get(1))
        .map(|m| m.as_str())
}

/// Select the current version group.
///
/// # Errors
///
/// Returns [`NavigationError::TabNotFound`] if no tab matches `rules.tab`,
/// [`NavigationError::NoCurrentVersion`] if no group qualifies, and
/// [`NavigationError::MissingVersionToken`] if the marked group carries no
/// version date.
pub fn select_version<'a>(
    tabs: &'a [Tab],
    rules: &VersionRules,
) -> Result<SelectedVersion<'a>, NavigationError> {
    let wanted = rules.tab.to_lowercase();
    let tab = tabs
        .iter()
        .find(|tab| tab.label.to_lowercase() == wanted)
        .ok_or_else(|| NavigationError::TabNotFound(rules.tab.clone()))?;

    let mut considered: Vec<String> = tab
        .groups
        .iter()
        .filter_map(|group| extract_version(&group.label))
        .map(str::to_owned)
        .collect();
    considered.sort();
    considered.dedup();

    let marker = rules.current_marker.to_lowercase();
    let anchor = rules.anchor_version.as_deref();

    let explicit = tab.groups.iter().find_map(|group| {
        if group.label.to_lowercase().contains(&marker) {
            Some((group, Selection::Marker))
        } else if anchor.is_some_and(|anchor| group.label.contains(anchor)) {
            Some((group, Selection::Anchor))
        } else {
            None
        }
    });

    if let Some((group, selection)) = explicit {
        let version = match (extract_version(&group.label), selection) {
            (Some(token), _) => token.to_owned(),
            (None, Selection::Anchor) => anchor.unwrap_or_default().to_owned(),
            (None, _) => return Err(NavigationError::MissingVersionToken(group.label.clone())),
        };
        tracing::debug!(group = %group.label, %selection, "Selected explicitly marked group");
        return Ok(SelectedVersion {
            version,
            label: &group.label,
            pages: &group.pages,
            selection,
            considered,
        });
    }

    let mut latest: Option<(&str, &Group)> = None;
    for group in &tab.groups {
        let Some(token) = extract_version(&group.label) else {
            continue;
        };
        if latest.is_none_or(|(best, _)| token > best) {
            latest = Some((token, group));
        }
    }

    let (token, group) = latest.ok_or_else(|| NavigationError::NoCurrentVersion(tab.label.clone()))?;
    tracing::debug!(group = %group.label, "No group marked current, selected latest date");

    Ok(SelectedVersion {
        version: token.to_owned(),
        label: &group.label,
        pages: &group.pages,
        selection: Selection::LatestDate,
        considered,
    })
}
