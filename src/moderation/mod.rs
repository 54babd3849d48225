//! Quality moderation: guideline verdicts for one app, viewed either by its
//! developer (read-only) or by a moderator (editable).

pub mod board;

use crate::commands::{AppBranding, GuidelineStatus};

pub use board::ReviewBoard;

/// Category that carries the default/fullscreen screenshot toggle.
pub const SCREENSHOTS_CATEGORY: &str = "screenshots";

pub const APP_ICON_CATEGORY: &str = "app-icon";
pub const BRANDING_CATEGORY: &str = "branding";

const DEFAULT_LIGHT_BACKGROUND: &str = "#ffffff";
const DEFAULT_DARK_BACKGROUND: &str = "#2a2e37";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Verdict {
    Unset,
    Rejected,
    Approved,
}

impl From<Option<bool>> for Verdict {
    fn from(passed: Option<bool>) -> Self {
        match passed {
            None => Verdict::Unset,
            Some(false) => Verdict::Rejected,
            Some(true) => Verdict::Approved,
        }
    }
}

impl From<bool> for Verdict {
    fn from(passed: bool) -> Self {
        Verdict::from(Some(passed))
    }
}

impl Verdict {
    pub fn label(&self) -> &'static str {
        match self {
            Verdict::Unset => "Pending",
            Verdict::Rejected => "Not passed",
            Verdict::Approved => "Passed",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ModerationMode {
    Developer,
    Moderator,
}

impl ModerationMode {
    pub fn parse(s: &str) -> Self {
        match s {
            "moderator" => ModerationMode::Moderator,
            _ => ModerationMode::Developer,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            ModerationMode::Developer => "developer",
            ModerationMode::Moderator => "moderator",
        }
    }
}

/// Only moderators edit, and never a read-only guideline.
pub fn is_editable(guideline: &GuidelineStatus, mode: ModerationMode) -> bool {
    mode == ModerationMode::Moderator && !guideline.read_only
}

/// Guidelines grouped by category, categories in order of first appearance.
pub fn group_by_category(guidelines: &[GuidelineStatus]) -> Vec<(String, Vec<GuidelineStatus>)> {
    let mut groups: Vec<(String, Vec<GuidelineStatus>)> = Vec::new();
    for g in guidelines {
        if let Some(group) = groups.iter_mut().find(|(name, _)| *name == g.category) {
            group.1.push(g.clone());
        } else {
            groups.push((g.category.clone(), vec![g.clone()]));
        }
    }
    groups
}

/// Guidelines a "pass all" touches.
pub fn pass_all_targets(guidelines: &[GuidelineStatus]) -> Vec<String> {
    guidelines
        .iter()
        .filter(|g| !g.read_only)
        .map(|g| g.guideline_id.clone())
        .collect()
}

/// How to preview the app icon next to a category's guidelines.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct IconPreview {
    pub icon: Option<String>,
    pub light_background: String,
    pub dark_background: String,
    /// Overlay the icon size grid.
    pub show_grid: bool,
}

/// Only the icon and branding categories get a preview. Branding needs both a
/// light and a dark primary color; the icon category falls back to plain
/// light and dark backgrounds.
pub fn icon_preview(category: &str, branding: Option<&AppBranding>) -> Option<IconPreview> {
    let icon = branding.and_then(|b| b.icon.clone());
    match category {
        APP_ICON_CATEGORY => Some(IconPreview {
            icon,
            light_background: DEFAULT_LIGHT_BACKGROUND.to_string(),
            dark_background: DEFAULT_DARK_BACKGROUND.to_string(),
            show_grid: true,
        }),
        BRANDING_CATEGORY => {
            let branding = branding?;
            Some(IconPreview {
                icon,
                light_background: branding.primary_light.clone()?,
                dark_background: branding.primary_dark.clone()?,
                show_grid: false,
            })
        }
        _ => None,
    }
}

/// Human name for a guideline or category id, e.g. "app-icon-size" -> "App icon size".
pub fn humanize(id: &str) -> String {
    let spaced = id.replace(['-', '_'], " ");
    let mut chars = spaced.chars();
    match chars.next() {
        Some(first) => first.to_uppercase().chain(chars).collect(),
        None => String::new(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn guideline(id: &str, category: &str, read_only: bool) -> GuidelineStatus {
        GuidelineStatus {
            guideline_id: id.to_string(),
            category: category.to_string(),
            url: None,
            read_only,
            passed: None,
        }
    }

    #[test]
    fn test_verdict_from_nullable_flag() {
        assert_eq!(Verdict::from(None), Verdict::Unset);
        assert_eq!(Verdict::from(Some(false)), Verdict::Rejected);
        assert_eq!(Verdict::from(Some(true)), Verdict::Approved);
        assert_eq!(Verdict::from(true), Verdict::Approved);
    }

    #[test]
    fn test_read_only_never_editable() {
        let ro = guideline("app-icon-size", "app-icon", true);
        let rw = guideline("app-icon-contrast", "app-icon", false);

        assert!(!is_editable(&ro, ModerationMode::Moderator));
        assert!(!is_editable(&ro, ModerationMode::Developer));
        assert!(is_editable(&rw, ModerationMode::Moderator));
        assert!(!is_editable(&rw, ModerationMode::Developer));
    }

    #[test]
    fn test_grouping_keeps_first_appearance_order() {
        let list = vec![
            guideline("a", "general", false),
            guideline("b", "app-icon", false),
            guideline("c", "general", false),
            guideline("d", "screenshots", false),
        ];
        let groups = group_by_category(&list);
        let names: Vec<&str> = groups.iter().map(|(n, _)| n.as_str()).collect();
        assert_eq!(names, vec!["general", "app-icon", "screenshots"]);
        assert_eq!(groups[0].1.len(), 2);
        assert_eq!(groups[0].1[1].guideline_id, "c");
    }

    #[test]
    fn test_pass_all_skips_read_only() {
        let list = vec![
            guideline("a", "general", false),
            guideline("b", "general", true),
            guideline("c", "branding", false),
        ];
        assert_eq!(pass_all_targets(&list), vec!["a", "c"]);
    }

    #[test]
    fn test_mode_parse() {
        assert_eq!(ModerationMode::parse("moderator"), ModerationMode::Moderator);
        assert_eq!(ModerationMode::parse("developer"), ModerationMode::Developer);
        assert_eq!(ModerationMode::parse("anything"), ModerationMode::Developer);
    }

    fn branding(light: Option<&str>, dark: Option<&str>) -> AppBranding {
        AppBranding {
            icon: Some("https://example.org/icon.png".to_string()),
            primary_light: light.map(str::to_string),
            primary_dark: dark.map(str::to_string),
        }
    }

    #[test]
    fn test_icon_preview_only_for_icon_and_branding() {
        let b = branding(Some("#faa298"), Some("#7f2c22"));
        assert!(icon_preview("general", Some(&b)).is_none());
        assert!(icon_preview(SCREENSHOTS_CATEGORY, Some(&b)).is_none());
    }

    #[test]
    fn test_app_icon_preview_uses_plain_backgrounds_and_grid() {
        let b = branding(Some("#faa298"), Some("#7f2c22"));
        let preview = icon_preview(APP_ICON_CATEGORY, Some(&b)).unwrap();
        assert!(preview.show_grid);
        assert_eq!(preview.light_background, DEFAULT_LIGHT_BACKGROUND);
        assert_eq!(preview.dark_background, DEFAULT_DARK_BACKGROUND);
        assert_eq!(preview.icon.as_deref(), Some("https://example.org/icon.png"));

        let without_metadata = icon_preview(APP_ICON_CATEGORY, None).unwrap();
        assert_eq!(without_metadata.icon, None);
    }

    #[test]
    fn test_branding_preview_needs_both_primary_colors() {
        let full = branding(Some("#faa298"), Some("#7f2c22"));
        let preview = icon_preview(BRANDING_CATEGORY, Some(&full)).unwrap();
        assert!(!preview.show_grid);
        assert_eq!(preview.light_background, "#faa298");
        assert_eq!(preview.dark_background, "#7f2c22");

        assert!(icon_preview(BRANDING_CATEGORY, Some(&branding(Some("#faa298"), None))).is_none());
        assert!(icon_preview(BRANDING_CATEGORY, Some(&branding(None, Some("#7f2c22")))).is_none());
        assert!(icon_preview(BRANDING_CATEGORY, None).is_none());
    }

    #[test]
    fn test_humanize() {
        assert_eq!(humanize("app-icon-size"), "App icon size");
        assert_eq!(humanize("general"), "General");
        assert_eq!(humanize(""), "");
    }
}
