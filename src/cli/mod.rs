use clap::Parser;

use crate::options::{BadgeStyle, EmojiStyle, GenerationOptions};

#[derive(Parser, Debug)]
#[command(name = "readme_gen", version, about = "Generate and edit a README.md from a project plan")]
pub struct Args {
    /// File holding the project plan; `-` reads stdin.
    #[arg(long, conflicts_with = "plan_text")]
    pub plan: Option<String>,

    /// Project plan given inline.
    #[arg(long)]
    pub plan_text: Option<String>,

    /// Write the README here instead of printing it.
    #[arg(long)]
    pub out: Option<String>,

    #[arg(long)]
    pub model: Option<String>,

    #[arg(long)]
    pub config: Option<String>,

    /// Open the section editor after generating.
    #[arg(long, short = 'i', default_value_t = false)]
    pub interactive: bool,

    /// Print the prompt and exit without calling the endpoint.
    #[arg(long, default_value_t = false)]
    pub print_prompt: bool,

    #[arg(long, default_value_t = false)]
    pub debug: bool,

    #[command(flatten)]
    pub options: OptionArgs,
}

/// Overrides for `GenerationOptions`; unset flags keep the configured value.
#[derive(clap::Args, Debug, Default)]
pub struct OptionArgs {
    #[arg(long)]
    pub no_badges: bool,
    #[arg(long)]
    pub separate_badges: bool,
    #[arg(long, value_enum)]
    pub badge_style: Option<BadgeStyle>,
    #[arg(long)]
    pub icon_badges: bool,
    #[arg(long)]
    pub animated_title: bool,
    #[arg(long)]
    pub animation_font: Option<String>,
    #[arg(long)]
    pub animation_color: Option<String>,
    #[arg(long)]
    pub animation_speed: Option<u32>,
    #[arg(long)]
    pub center: bool,
    #[arg(long)]
    pub toc: bool,
    #[arg(long)]
    pub demo: bool,
    #[arg(long)]
    pub screenshots: bool,
    #[arg(long)]
    pub api_docs: bool,
    #[arg(long)]
    pub deployment: bool,
    #[arg(long)]
    pub no_contributing: bool,
    #[arg(long)]
    pub no_license: bool,
    #[arg(long)]
    pub acknowledgments: bool,
    #[arg(long)]
    pub changelog: bool,
    #[arg(long, value_enum)]
    pub emoji: Option<EmojiStyle>,
}

impl OptionArgs {
    pub fn apply_to(&self, opts: &mut GenerationOptions) {
        if self.no_badges {
            opts.include_badges = false;
        }
        if self.separate_badges {
            opts.separate_badges = true;
        }
        if let Some(style) = self.badge_style {
            opts.badge_style = style;
        }
        if self.icon_badges {
            opts.icon_badges = true;
        }
        if self.animated_title {
            opts.animated_title = true;
        }
        if let Some(font) = &self.animation_font {
            opts.animation_font = font.clone();
        }
        if let Some(color) = &self.animation_color {
            opts.animation_color = color.trim_start_matches('#').to_string();
        }
        if let Some(speed) = self.animation_speed {
            opts.animation_speed = speed;
        }
        if self.center {
            opts.center_content = true;
        }
        if self.toc {
            opts.include_table_of_contents = true;
        }
        if self.demo {
            opts.include_demo = true;
        }
        if self.screenshots {
            opts.include_screenshots = true;
        }
        if self.api_docs {
            opts.include_api_docs = true;
        }
        if self.deployment {
            opts.include_deployment = true;
        }
        if self.no_contributing {
            opts.include_contributing = false;
        }
        if self.no_license {
            opts.include_license = false;
        }
        if self.acknowledgments {
            opts.include_acknowledgments = true;
        }
        if self.changelog {
            opts.include_changelog = true;
        }
        if let Some(emoji) = self.emoji {
            opts.emoji_style = emoji;
        }
    }
}
