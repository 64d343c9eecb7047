use serde::{Deserialize, Serialize};
use std::collections::{BTreeMap, BTreeSet};
use tracing::warn;

use crate::format::{typing_image, DEFAULT_ANIMATION_COLOR};
use crate::options::BadgeStyle;
use crate::sections::{self, Section, SectionId};

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct BadgeConfig {
    pub enabled: bool,
    pub style: BadgeStyle,
}

impl Default for BadgeConfig {
    fn default() -> Self {
        Self { enabled: false, style: BadgeStyle::ForTheBadge }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AnimationConfig {
    pub enabled: bool,
    pub color: String,
}

impl Default for AnimationConfig {
    fn default() -> Self {
        Self { enabled: false, color: DEFAULT_ANIMATION_COLOR.into() }
    }
}

/// Pending user edits against the current document, keyed by section id.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct EditChanges {
    removed: BTreeSet<SectionId>,
    centered: BTreeSet<SectionId>,
    text_edits: BTreeMap<SectionId, String>,
    badge_updates: BTreeMap<SectionId, BadgeConfig>,
    animation_updates: BTreeMap<SectionId, AnimationConfig>,
}

impl EditChanges {
    pub fn remove(&mut self, id: SectionId) {
        self.removed.insert(id);
    }

    pub fn restore(&mut self, id: SectionId) {
        self.removed.remove(&id);
    }

    pub fn toggle_center(&mut self, id: SectionId) {
        if !self.centered.remove(&id) {
            self.centered.insert(id);
        }
    }

    pub fn align_left(&mut self, id: SectionId) {
        self.centered.remove(&id);
    }

    pub fn set_text_edit(&mut self, id: SectionId, text: impl Into<String>) {
        self.text_edits.insert(id, text.into());
    }

    pub fn set_badge_config(&mut self, id: SectionId, config: BadgeConfig) {
        self.badge_updates.insert(id, config);
    }

    pub fn set_animation_config(&mut self, id: SectionId, config: AnimationConfig) {
        self.animation_updates.insert(id, config);
    }

    pub fn is_removed(&self, id: SectionId) -> bool {
        self.removed.contains(&id)
    }

    pub fn is_centered(&self, id: SectionId) -> bool {
        self.centered.contains(&id)
    }

    pub fn text_edit(&self, id: SectionId) -> Option<&str> {
        self.text_edits.get(&id).map(String::as_str)
    }

    pub fn badge_config(&self, id: SectionId) -> Option<&BadgeConfig> {
        self.badge_updates.get(&id)
    }

    pub fn animation_config(&self, id: SectionId) -> Option<&AnimationConfig> {
        self.animation_updates.get(&id)
    }

    pub fn is_empty(&self) -> bool {
        self.removed.is_empty()
            && self.centered.is_empty()
            && self.text_edits.is_empty()
            && self.badge_updates.is_empty()
            && self.animation_updates.is_empty()
    }

    pub fn clear(&mut self) {
        *self = Self::default();
    }

    /// Serializes the pending edits into change instructions for the model.
    ///
    /// Buckets appear in a fixed order (removals, centering, text edits,
    /// badges, animations) and are skipped when empty. Titles come from
    /// `sections`; ids that no longer resolve are dropped.
    pub fn to_instructions(&self, sections: &[Section]) -> String {
        let label = |id: &SectionId| -> Option<String> {
            match sections::find(sections, *id) {
                Some(s) => Some(section_label(s, sections)),
                None => {
                    warn!(section = %id, "dropping change for a section missing from the document");
                    None
                }
            }
        };

        let mut out: Vec<String> = Vec::new();

        let removed: Vec<String> = self.removed.iter().filter_map(label).collect();
        if !removed.is_empty() {
            out.push(format!("REMOVE these sections: {}", removed.join(", ")));
        }

        let centered: Vec<String> = self.centered.iter().filter_map(label).collect();
        if !centered.is_empty() {
            out.push(format!(
                "CENTER these sections with <div align=\"center\"> tags: {}",
                centered.join(", ")
            ));
        }

        let edits: Vec<String> = self
            .text_edits
            .iter()
            .filter_map(|(id, text)| {
                label(id).map(|l| format!("- Replace content in \"{l}\" section with: \"{text}\""))
            })
            .collect();
        if !edits.is_empty() {
            out.push(format!("TEXT EDITS:\n{}", edits.join("\n")));
        }

        let badges: Vec<String> = self
            .badge_updates
            .iter()
            .filter(|(_, cfg)| cfg.enabled)
            .filter_map(|(id, cfg)| {
                label(id).map(|l| {
                    format!(
                        "- Add relevant badges to \"{l}\" section using {} style from shields.io. Include tech stack and status badges.",
                        cfg.style
                    )
                })
            })
            .collect();
        if !badges.is_empty() {
            out.push(format!("BADGE UPDATES:\n{}", badges.join("\n")));
        }

        let animations: Vec<String> = self
            .animation_updates
            .iter()
            .filter(|(_, cfg)| cfg.enabled)
            .filter_map(|(id, cfg)| {
                let section = sections::find(sections, *id)?;
                let l = section_label(section, sections);
                Some(format!(
                    "- Add animated typing text to \"{l}\" section header using: {}",
                    typing_image(&section.title, &cfg.color, "Typing SVG")
                ))
            })
            .collect();
        if !animations.is_empty() {
            out.push(format!("ANIMATION UPDATES:\n{}", animations.join("\n")));
        }

        out.join("\n")
    }
}

/// Section title, qualified by its line number when another section in the
/// document shares the same title.
fn section_label(section: &Section, all: &[Section]) -> String {
    let shared = all.iter().filter(|s| s.title == section.title).count() > 1;
    if shared {
        format!("{} (line {})", section.title, section.start_line + 1)
    } else {
        section.title.clone()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::sections::segment;

    const DOC: &str = "# Cool Project\nA thing.\n## Features\n- fast\n## Usage\nrun it";

    fn heading(n: usize) -> SectionId {
        SectionId::Heading(n)
    }

    #[test]
    fn test_remove_then_restore_is_inverse() {
        let mut changes = EditChanges::default();
        changes.remove(heading(1));
        let before = changes.clone();
        changes.remove(heading(2));
        changes.restore(heading(2));
        assert_eq!(changes, before);
    }

    #[test]
    fn test_remove_is_idempotent() {
        let mut once = EditChanges::default();
        once.remove(heading(1));
        let mut twice = once.clone();
        twice.remove(heading(1));
        assert_eq!(once, twice);
    }

    #[test]
    fn test_toggle_center_twice_restores() {
        let mut changes = EditChanges::default();
        changes.toggle_center(heading(0));
        assert!(changes.is_centered(heading(0)));
        changes.toggle_center(heading(0));
        assert!(!changes.is_centered(heading(0)));
        assert!(changes.is_empty());
    }

    #[test]
    fn test_align_left_always_removes() {
        let mut changes = EditChanges::default();
        changes.align_left(heading(0));
        assert!(!changes.is_centered(heading(0)));
        changes.toggle_center(heading(0));
        changes.align_left(heading(0));
        assert!(!changes.is_centered(heading(0)));
        changes.align_left(heading(0));
        assert!(!changes.is_centered(heading(0)));
    }

    #[test]
    fn test_text_edit_last_write_wins() {
        let mut changes = EditChanges::default();
        changes.set_text_edit(heading(1), "first");
        changes.set_text_edit(heading(1), "second");
        assert_eq!(changes.text_edit(heading(1)), Some("second"));
    }

    #[test]
    fn test_badge_and_animation_last_write_wins() {
        let mut changes = EditChanges::default();
        changes.set_badge_config(heading(1), BadgeConfig { enabled: true, style: BadgeStyle::Flat });
        changes.set_badge_config(heading(1), BadgeConfig { enabled: false, style: BadgeStyle::Plastic });
        assert_eq!(
            changes.badge_config(heading(1)),
            Some(&BadgeConfig { enabled: false, style: BadgeStyle::Plastic })
        );
        changes.set_animation_config(heading(0), AnimationConfig { enabled: true, color: "FF0000".into() });
        assert_eq!(changes.animation_config(heading(0)).map(|c| c.color.as_str()), Some("FF0000"));
    }

    #[test]
    fn test_clear_empties_every_bucket() {
        let mut changes = EditChanges::default();
        changes.remove(heading(0));
        changes.toggle_center(heading(1));
        changes.set_text_edit(heading(2), "x");
        changes.set_badge_config(heading(0), BadgeConfig::default());
        changes.set_animation_config(heading(0), AnimationConfig::default());
        assert!(!changes.is_empty());
        changes.clear();
        assert!(changes.is_empty());
    }

    #[test]
    fn test_instructions_empty_when_no_changes() {
        assert_eq!(EditChanges::default().to_instructions(&segment(DOC)), "");
    }

    #[test]
    fn test_instructions_bucket_order() {
        let sections = segment(DOC);
        let mut changes = EditChanges::default();
        changes.set_animation_config(heading(0), AnimationConfig { enabled: true, color: "ABCDEF".into() });
        changes.set_badge_config(heading(1), BadgeConfig { enabled: true, style: BadgeStyle::FlatSquare });
        changes.set_text_edit(heading(2), "just run it");
        changes.toggle_center(heading(0));
        changes.remove(heading(2));
        changes.remove(heading(1));

        let text = changes.to_instructions(&sections);
        let lines: Vec<&str> = text.lines().collect();
        assert_eq!(lines[0], "REMOVE these sections: Features, Usage");
        assert_eq!(lines[1], "CENTER these sections with <div align=\"center\"> tags: Cool Project");
        assert_eq!(lines[2], "TEXT EDITS:");
        assert_eq!(lines[3], "- Replace content in \"Usage\" section with: \"just run it\"");
        assert_eq!(lines[4], "BADGE UPDATES:");
        assert!(lines[5].contains("\"Features\" section using flat-square style"));
        assert_eq!(lines[6], "ANIMATION UPDATES:");
        assert!(lines[7].contains("color=ABCDEF"));
        assert!(lines[7].contains("lines=Cool%2BProject"));
        assert_eq!(lines.len(), 8);
    }

    #[test]
    fn test_disabled_badges_are_not_serialized() {
        let sections = segment(DOC);
        let mut changes = EditChanges::default();
        changes.set_badge_config(heading(1), BadgeConfig::default());
        changes.set_animation_config(heading(1), AnimationConfig::default());
        assert_eq!(changes.to_instructions(&sections), "");
    }

    #[test]
    fn test_unknown_ids_are_dropped() {
        let sections = segment(DOC);
        let mut changes = EditChanges::default();
        changes.remove(heading(9));
        changes.remove(heading(1));
        assert_eq!(changes.to_instructions(&sections), "REMOVE these sections: Features");
    }

    #[test]
    fn test_duplicate_titles_do_not_collide() {
        let sections = segment("# P\n## Usage\na\n## Usage\nb");
        let mut changes = EditChanges::default();
        changes.remove(heading(2));
        changes.set_text_edit(heading(1), "new a");
        assert!(!changes.is_removed(heading(1)));
        let text = changes.to_instructions(&sections);
        assert!(text.contains("REMOVE these sections: Usage (line 4)"));
        assert!(text.contains("\"Usage (line 2)\" section with: \"new a\""));
    }
}
