use clap::ValueEnum;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

#[derive(ValueEnum, Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum BadgeStyle {
    #[default]
    Flat,
    FlatSquare,
    ForTheBadge,
    Plastic,
}

impl BadgeStyle {
    /// The shields.io `style=` query value.
    pub fn as_str(self) -> &'static str {
        match self {
            BadgeStyle::Flat => "flat",
            BadgeStyle::FlatSquare => "flat-square",
            BadgeStyle::ForTheBadge => "for-the-badge",
            BadgeStyle::Plastic => "plastic",
        }
    }
}

impl fmt::Display for BadgeStyle {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for BadgeStyle {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim() {
            "flat" => Ok(BadgeStyle::Flat),
            "flat-square" => Ok(BadgeStyle::FlatSquare),
            "for-the-badge" => Ok(BadgeStyle::ForTheBadge),
            "plastic" => Ok(BadgeStyle::Plastic),
            other => Err(format!(
                "unknown badge style '{other}' (expected flat, flat-square, for-the-badge or plastic)"
            )),
        }
    }
}

#[derive(ValueEnum, Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum EmojiStyle {
    None,
    #[default]
    Subtle,
    Heavy,
}

/// Every toggle that shapes the generation prompt.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct GenerationOptions {
    pub include_badges: bool,
    pub separate_badges: bool,
    pub badge_style: BadgeStyle,
    pub icon_badges: bool,
    pub animated_title: bool,
    pub animation_font: String,
    /// Hex color without the leading `#`.
    pub animation_color: String,
    pub animation_speed: u32,
    pub center_content: bool,
    pub include_table_of_contents: bool,
    pub include_demo: bool,
    pub include_screenshots: bool,
    pub include_api_docs: bool,
    pub include_deployment: bool,
    pub include_contributing: bool,
    pub include_license: bool,
    pub include_acknowledgments: bool,
    pub include_changelog: bool,
    pub emoji_style: EmojiStyle,
}

impl Default for GenerationOptions {
    fn default() -> Self {
        Self {
            include_badges: true,
            separate_badges: false,
            badge_style: BadgeStyle::Flat,
            icon_badges: false,
            animated_title: false,
            animation_font: "Fira Code".into(),
            animation_color: "36BCF7".into(),
            animation_speed: 50,
            center_content: false,
            include_table_of_contents: false,
            include_demo: false,
            include_screenshots: false,
            include_api_docs: false,
            include_deployment: false,
            include_contributing: true,
            include_license: true,
            include_acknowledgments: false,
            include_changelog: false,
            emoji_style: EmojiStyle::Subtle,
        }
    }
}

/// Names accepted by `GenerationOptions::set`.
pub const OPTION_KEYS: &[&str] = &[
    "badges",
    "separate-badges",
    "badge-style",
    "icon-badges",
    "animated-title",
    "animation-font",
    "animation-color",
    "animation-speed",
    "center",
    "toc",
    "demo",
    "screenshots",
    "api-docs",
    "deployment",
    "contributing",
    "license",
    "acknowledgments",
    "changelog",
    "emoji",
];

fn flag(value: &str) -> Result<bool, String> {
    match value.trim().to_lowercase().as_str() {
        "on" | "true" | "yes" | "1" => Ok(true),
        "off" | "false" | "no" | "0" => Ok(false),
        other => Err(format!("expected on or off, got '{other}'")),
    }
}

impl GenerationOptions {
    /// Sets one option by its command-line name.
    pub fn set(&mut self, key: &str, value: &str) -> Result<(), String> {
        let value = value.trim();
        match key {
            "badges" => self.include_badges = flag(value)?,
            "separate-badges" => self.separate_badges = flag(value)?,
            "badge-style" => self.badge_style = value.parse()?,
            "icon-badges" => self.icon_badges = flag(value)?,
            "animated-title" => self.animated_title = flag(value)?,
            "animation-font" if !value.is_empty() => self.animation_font = value.to_string(),
            "animation-color" if !value.is_empty() => {
                self.animation_color = value.trim_start_matches('#').to_string()
            }
            "animation-speed" => {
                self.animation_speed = value
                    .parse()
                    .map_err(|_| format!("expected a number, got '{value}'"))?
            }
            "center" => self.center_content = flag(value)?,
            "toc" => self.include_table_of_contents = flag(value)?,
            "demo" => self.include_demo = flag(value)?,
            "screenshots" => self.include_screenshots = flag(value)?,
            "api-docs" => self.include_api_docs = flag(value)?,
            "deployment" => self.include_deployment = flag(value)?,
            "contributing" => self.include_contributing = flag(value)?,
            "license" => self.include_license = flag(value)?,
            "acknowledgments" => self.include_acknowledgments = flag(value)?,
            "changelog" => self.include_changelog = flag(value)?,
            "emoji" => self.emoji_style = <EmojiStyle as ValueEnum>::from_str(value, true)?,
            "animation-font" | "animation-color" => return Err(format!("{key} needs a value")),
            other => {
                return Err(format!(
                    "unknown option '{other}' (one of: {})",
                    OPTION_KEYS.join(", ")
                ))
            }
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_badge_style_from_str() {
        assert_eq!("flat".parse::<BadgeStyle>(), Ok(BadgeStyle::Flat));
        assert_eq!("for-the-badge".parse::<BadgeStyle>(), Ok(BadgeStyle::ForTheBadge));
        assert_eq!(" plastic ".parse::<BadgeStyle>(), Ok(BadgeStyle::Plastic));
        assert!("Flat".parse::<BadgeStyle>().is_err());
    }

    #[test]
    fn test_badge_style_label_roundtrip() {
        for style in [
            BadgeStyle::Flat,
            BadgeStyle::FlatSquare,
            BadgeStyle::ForTheBadge,
            BadgeStyle::Plastic,
        ] {
            assert_eq!(style.as_str().parse::<BadgeStyle>(), Ok(style));
        }
    }

    #[test]
    fn test_options_partial_toml_keeps_defaults() {
        let opts: GenerationOptions =
            toml::from_str("badge_style = \"for-the-badge\"\nemoji_style = \"heavy\"").unwrap();
        assert_eq!(opts.badge_style, BadgeStyle::ForTheBadge);
        assert_eq!(opts.emoji_style, EmojiStyle::Heavy);
        assert!(opts.include_badges);
        assert!(opts.include_license);
        assert_eq!(opts.animation_font, "Fira Code");
    }

    #[test]
    fn test_set_updates_named_option() {
        let mut opts = GenerationOptions::default();
        opts.set("toc", "on").unwrap();
        opts.set("badges", "off").unwrap();
        opts.set("badge-style", "flat-square").unwrap();
        opts.set("animation-color", "#FF0000").unwrap();
        opts.set("animation-speed", "80").unwrap();
        opts.set("emoji", "none").unwrap();
        assert!(opts.include_table_of_contents);
        assert!(!opts.include_badges);
        assert_eq!(opts.badge_style, BadgeStyle::FlatSquare);
        assert_eq!(opts.animation_color, "FF0000");
        assert_eq!(opts.animation_speed, 80);
        assert_eq!(opts.emoji_style, EmojiStyle::None);
    }

    #[test]
    fn test_set_rejects_bad_input_without_changing_options() {
        let mut opts = GenerationOptions::default();
        assert!(opts.set("toc", "maybe").is_err());
        assert!(opts.set("animation-speed", "fast").is_err());
        assert!(opts.set("animation-font", "").is_err());
        assert!(opts.set("colour", "on").is_err());
        assert_eq!(opts, GenerationOptions::default());
    }

    #[test]
    fn test_every_listed_key_is_accepted() {
        for key in OPTION_KEYS {
            let value = match *key {
                "badge-style" => "plastic",
                "animation-font" | "animation-color" => "x",
                "animation-speed" => "10",
                "emoji" => "heavy",
                _ => "on",
            };
            assert!(GenerationOptions::default().set(key, value).is_ok(), "{key}");
        }
    }
}
