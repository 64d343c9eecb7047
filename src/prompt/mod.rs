use crate::errors::ReadmeError;
use crate::options::{EmojiStyle, GenerationOptions};

/// Identifies where a clause sits in a prompt.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ClauseKind {
    Intro,
    Title,
    Description,
    Badges,
    Sections,
    Style,
    Plan,
    Document,
    Changes,
    Additional,
    Closing,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Clause {
    pub kind: ClauseKind,
    pub text: String,
}

/// An instruction assembled from clauses in a fixed order.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Prompt {
    clauses: Vec<Clause>,
}

impl Prompt {
    fn new() -> Self {
        Self { clauses: Vec::new() }
    }

    fn push(&mut self, kind: ClauseKind, text: impl Into<String>) {
        self.clauses.push(Clause { kind, text: text.into() });
    }

    pub fn clauses(&self) -> &[Clause] {
        &self.clauses
    }

    pub fn clause(&self, kind: ClauseKind) -> Option<&Clause> {
        self.clauses.iter().find(|c| c.kind == kind)
    }

    pub fn render(&self) -> String {
        self.clauses
            .iter()
            .map(|c| c.text.as_str())
            .collect::<Vec<_>>()
            .join("\n")
    }
}

const BADGE_CATEGORIES: &str =
    "Include badges for: License, Tech stack technologies, Version (1.0.0), Build status (passing).";

const TYPING_SVG: &str = "https://readme-typing-svg.herokuapp.com";

fn badge_source(opts: &GenerationOptions) -> String {
    let style = opts.badge_style.as_str();
    if opts.icon_badges {
        format!(
            "icon badges with tech stack logos from shields.io. Format: \
![Tech Name](https://img.shields.io/badge/Tech_Name-color?style={style}&logo=logoname&logoColor=white). \
Use appropriate logos like 'react', 'typescript', 'javascript', 'nodejs', 'python', 'html5', 'css3', 'mongodb', 'postgresql', etc."
        )
    } else {
        format!("shields.io format with style={style}")
    }
}

fn badge_clause(opts: &GenerationOptions) -> String {
    let source = badge_source(opts);
    if opts.separate_badges {
        format!(
            "- Create a \"Badges\" section with relevant badges using {source}. Put each badge on a separate line. {BADGE_CATEGORIES}"
        )
    } else {
        format!(
            "- Add relevant badges after the description using {source}. Place all badges on the same line. {BADGE_CATEGORIES}"
        )
    }
}

/// Section directives, table of contents first and optional extras after
/// the fixed base list.
fn section_directives(opts: &GenerationOptions) -> Vec<&'static str> {
    let mut sections = Vec::new();
    if opts.include_table_of_contents {
        sections.push("A \"## Table of Contents\" section with links to other sections.");
    }
    sections.extend([
        "A \"## Features\" section with a bulleted list of key features.",
        "An \"## Installation\" section with step-by-step instructions.",
        "A \"## Usage\" section explaining how to use the application.",
        "A \"## Tech Stack\" section listing the technologies used.",
    ]);

    let optional = [
        (opts.include_demo, "A \"## Demo\" section with a placeholder for a live demo link and GIF/video."),
        (opts.include_screenshots, "A \"## Screenshots\" section with placeholder image markdown."),
        (opts.include_api_docs, "An \"## API Documentation\" section with endpoint examples."),
        (opts.include_deployment, "A \"## Deployment\" section with deployment instructions."),
        (opts.include_contributing, "A \"## Contributing\" section with standard guidelines."),
        (opts.include_license, "A \"## License\" section mentioning the license type."),
        (opts.include_acknowledgments, "An \"## Acknowledgments\" section for credits and thanks."),
        (opts.include_changelog, "A \"## Changelog\" section with version history."),
    ];
    sections.extend(optional.iter().filter(|(on, _)| *on).map(|(_, s)| *s));
    sections
}

fn sections_clause(opts: &GenerationOptions) -> String {
    let mut out = String::from("Sections, in this order:");
    for (i, s) in section_directives(opts).iter().enumerate() {
        out.push_str(&format!("\n{}. {}", i + 1, s));
    }
    out
}

/// `<h1>` wrapping a typing-animation image; `[PROJECT_NAME]` is left for
/// the model to fill in.
pub fn animated_title_snippet(font: &str, color: &str, speed: u32) -> String {
    format!(
        "<h1 align=\"center\"><img src=\"{TYPING_SVG}?font={font}&pause=1000&color={color}&center=true&vCenter=true&width=435&speed={speed}&lines=[PROJECT_NAME]\" alt=\"Typing SVG\" /></h1>",
        font = urlencoding::encode(font),
    )
}

fn emoji_directive(style: EmojiStyle) -> &'static str {
    match style {
        EmojiStyle::None => "- Do not use emojis.",
        EmojiStyle::Subtle => "- Add subtle emojis (1-2 per section header, like 🚀 ✨ 📦 🛠️)",
        EmojiStyle::Heavy => "- Add multiple relevant emojis throughout headers and bullet points",
    }
}

fn style_clause(opts: &GenerationOptions) -> String {
    let mut lines = vec!["Style Guidelines:".to_string()];
    if opts.animated_title {
        lines.push(format!(
            "- Use animated text for the main title with this format: {}",
            animated_title_snippet(&opts.animation_font, &opts.animation_color, opts.animation_speed)
        ));
    }
    if opts.center_content {
        lines.push(
            "- Wrap main sections (title, description, badges, key content) in <div align=\"center\"> tags for center alignment. Use <p align=\"center\"> for paragraphs that should be centered."
                .to_string(),
        );
    }
    lines.push(emoji_directive(opts.emoji_style).to_string());
    lines.extend(
        [
            "- Use proper markdown syntax: # for main title, ## for section headers",
            "- Use ![alt](url) for images and badges",
            "- Use `code` for inline code and ```language for code blocks",
            "- Use proper list formatting with - or *",
            "- Make it professional but engaging",
        ]
        .iter()
        .map(|s| s.to_string()),
    );
    lines.join("\n")
}

/// Builds the first-generation prompt for a project plan.
pub fn generation_prompt(plan: &str, opts: &GenerationOptions) -> Result<Prompt, ReadmeError> {
    if plan.trim().is_empty() {
        return Err(ReadmeError::EmptyInput);
    }

    let mut p = Prompt::new();
    p.push(
        ClauseKind::Intro,
        "Based on the following project plan, generate a complete, professional README.md file in Markdown format.\n\nThe README should include:",
    );
    p.push(ClauseKind::Title, "- A main title for the project (use # heading).");
    p.push(ClauseKind::Description, "- A concise, one-sentence description of the project.");
    if opts.include_badges {
        p.push(ClauseKind::Badges, badge_clause(opts));
    }
    p.push(ClauseKind::Sections, sections_clause(opts));
    p.push(ClauseKind::Style, style_clause(opts));
    p.push(ClauseKind::Plan, format!("Here is the project plan:\n---\n{plan}\n---"));
    p.push(
        ClauseKind::Closing,
        "IMPORTANT: Generate ONLY raw markdown content. Do NOT wrap the output in code blocks or markdown fences. Do NOT include ```markdown at the beginning or ``` at the end. Start directly with the # heading.",
    );
    Ok(p)
}

pub const NO_CHANGES: &str = "No specific changes requested - just regenerate with current options";

/// Builds the follow-up prompt that asks for an edited copy of `document`.
///
/// `changes` is the serialized change instruction; blank means a plain
/// regenerate. `extra` carries free-text instructions from the user.
pub fn update_prompt(
    plan: &str,
    document: &str,
    changes: &str,
    extra: Option<&str>,
) -> Result<Prompt, ReadmeError> {
    if plan.trim().is_empty() {
        return Err(ReadmeError::EmptyInput);
    }

    let changes = if changes.trim().is_empty() { NO_CHANGES } else { changes };

    let mut p = Prompt::new();
    p.push(
        ClauseKind::Intro,
        "You previously generated a README for this project. Now I need you to update it with specific changes while keeping everything else the same.",
    );
    p.push(ClauseKind::Plan, format!("\nORIGINAL PROJECT PLAN:\n{plan}"));
    p.push(ClauseKind::Document, format!("\nCURRENT README CONTENT:\n{document}"));
    p.push(ClauseKind::Changes, format!("\nCHANGES TO MAKE:\n{changes}"));
    if let Some(extra) = extra.map(str::trim).filter(|e| !e.is_empty()) {
        p.push(ClauseKind::Additional, format!("\nADDITIONAL INSTRUCTIONS:\n{extra}"));
    }
    p.push(
        ClauseKind::Closing,
        "\nIMPORTANT INSTRUCTIONS:\n\
- Keep all existing content and structure UNLESS specifically mentioned in the changes above\n\
- Apply the changes exactly as requested\n\
- Maintain the same style, badges, and formatting from the original\n\
- Generate ONLY raw markdown content (no code fences)\n\
- Keep the same professional quality and completeness",
    );
    Ok(p)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::options::BadgeStyle;

    const PLAN: &str = "Project Name: CoolProject\nTech Stack: Rust";

    fn kinds(p: &Prompt) -> Vec<ClauseKind> {
        p.clauses().iter().map(|c| c.kind).collect()
    }

    #[test]
    fn test_generation_prompt_is_deterministic() {
        let mut opts = GenerationOptions::default();
        opts.animated_title = true;
        opts.include_changelog = true;
        let a = generation_prompt(PLAN, &opts).unwrap().render();
        let b = generation_prompt(PLAN, &opts).unwrap().render();
        assert_eq!(a, b);
    }

    #[test]
    fn test_generation_prompt_rejects_blank_plan() {
        let opts = GenerationOptions::default();
        assert_eq!(generation_prompt("   \n\t", &opts), Err(ReadmeError::EmptyInput));
        assert_eq!(generation_prompt("", &opts), Err(ReadmeError::EmptyInput));
    }

    #[test]
    fn test_clause_order() {
        let p = generation_prompt(PLAN, &GenerationOptions::default()).unwrap();
        assert_eq!(
            kinds(&p),
            vec![
                ClauseKind::Intro,
                ClauseKind::Title,
                ClauseKind::Description,
                ClauseKind::Badges,
                ClauseKind::Sections,
                ClauseKind::Style,
                ClauseKind::Plan,
                ClauseKind::Closing,
            ]
        );
    }

    #[test]
    fn test_badges_disabled_drops_clause() {
        let mut opts = GenerationOptions::default();
        opts.include_badges = false;
        let p = generation_prompt(PLAN, &opts).unwrap();
        assert!(p.clause(ClauseKind::Badges).is_none());
        assert!(!p.render().contains("shields.io format"));
    }

    #[test]
    fn test_separate_badges_changes_only_badge_clause() {
        let inline = GenerationOptions::default();
        let mut separate = inline.clone();
        separate.separate_badges = true;

        let a = generation_prompt(PLAN, &inline).unwrap();
        let b = generation_prompt(PLAN, &separate).unwrap();

        for (x, y) in a.clauses().iter().zip(b.clauses()) {
            assert_eq!(x.kind, y.kind);
            if x.kind == ClauseKind::Badges {
                assert_ne!(x.text, y.text);
            } else {
                assert_eq!(x.text, y.text);
            }
        }
        let badges = b.clause(ClauseKind::Badges).unwrap();
        assert!(badges.text.contains("\"Badges\" section"));
        assert!(badges.text.contains("separate line"));
        assert!(a.clause(ClauseKind::Badges).unwrap().text.contains("same line"));
    }

    #[test]
    fn test_badge_categories_and_style() {
        let mut opts = GenerationOptions::default();
        opts.badge_style = BadgeStyle::ForTheBadge;
        let p = generation_prompt(PLAN, &opts).unwrap();
        let text = &p.clause(ClauseKind::Badges).unwrap().text;
        assert!(text.contains("style=for-the-badge"));
        assert!(text.contains("License, Tech stack technologies, Version (1.0.0), Build status (passing)"));
    }

    #[test]
    fn test_icon_badges_request_logos() {
        let mut opts = GenerationOptions::default();
        opts.icon_badges = true;
        let p = generation_prompt(PLAN, &opts).unwrap();
        let text = &p.clause(ClauseKind::Badges).unwrap().text;
        assert!(text.contains("&logo=logoname&logoColor=white"));
    }

    #[test]
    fn test_default_section_list() {
        let p = generation_prompt(PLAN, &GenerationOptions::default()).unwrap();
        let text = &p.clause(ClauseKind::Sections).unwrap().text;
        assert_eq!(
            text,
            "Sections, in this order:\n\
1. A \"## Features\" section with a bulleted list of key features.\n\
2. An \"## Installation\" section with step-by-step instructions.\n\
3. A \"## Usage\" section explaining how to use the application.\n\
4. A \"## Tech Stack\" section listing the technologies used.\n\
5. A \"## Contributing\" section with standard guidelines.\n\
6. A \"## License\" section mentioning the license type."
        );
    }

    #[test]
    fn test_table_of_contents_prepended_and_extras_appended() {
        let mut opts = GenerationOptions::default();
        opts.include_table_of_contents = true;
        opts.include_demo = true;
        opts.include_changelog = true;
        opts.include_contributing = false;
        opts.include_license = false;
        let directives = section_directives(&opts);
        assert!(directives[0].contains("Table of Contents"));
        assert!(directives[1].contains("Features"));
        assert!(directives[5].contains("Demo"));
        assert!(directives[6].contains("Changelog"));
        assert_eq!(directives.len(), 7);
    }

    #[test]
    fn test_animated_title_snippet() {
        let snippet = animated_title_snippet("Fira Code", "36BCF7", 50);
        assert!(snippet.contains("font=Fira%20Code"));
        assert!(snippet.contains("color=36BCF7"));
        assert!(snippet.contains("speed=50"));
        assert!(snippet.contains("lines=[PROJECT_NAME]"));
    }

    #[test]
    fn test_style_clause_toggles() {
        let mut opts = GenerationOptions::default();
        let plain = style_clause(&opts);
        assert!(!plain.contains("Typing SVG"));
        assert!(!plain.contains("<div align=\"center\">"));
        assert!(plain.contains("subtle emojis"));

        opts.animated_title = true;
        opts.center_content = true;
        opts.emoji_style = EmojiStyle::None;
        let styled = style_clause(&opts);
        assert!(styled.contains("Typing SVG"));
        assert!(styled.contains("<div align=\"center\">"));
        assert!(styled.contains("Do not use emojis"));
    }

    #[test]
    fn test_plan_is_delimited_literally() {
        let p = generation_prompt(PLAN, &GenerationOptions::default()).unwrap();
        assert_eq!(
            p.clause(ClauseKind::Plan).unwrap().text,
            format!("Here is the project plan:\n---\n{PLAN}\n---")
        );
        assert!(p.render().ends_with("Start directly with the # heading."));
    }

    #[test]
    fn test_update_prompt_without_changes() {
        let p = update_prompt(PLAN, "# Doc", "", None).unwrap();
        assert!(p.clause(ClauseKind::Changes).unwrap().text.contains(NO_CHANGES));
        assert!(p.clause(ClauseKind::Additional).is_none());
        assert!(p.render().contains("CURRENT README CONTENT:\n# Doc"));
    }

    #[test]
    fn test_update_prompt_with_extra_instructions() {
        let p = update_prompt(PLAN, "# Doc", "REMOVE these sections: Usage", Some("  shorter intro ")).unwrap();
        assert_eq!(
            kinds(&p),
            vec![
                ClauseKind::Intro,
                ClauseKind::Plan,
                ClauseKind::Document,
                ClauseKind::Changes,
                ClauseKind::Additional,
                ClauseKind::Closing,
            ]
        );
        assert!(p.render().contains("ADDITIONAL INSTRUCTIONS:\nshorter intro"));
    }

    #[test]
    fn test_update_prompt_rejects_blank_plan() {
        assert_eq!(update_prompt(" ", "# Doc", "", None), Err(ReadmeError::EmptyInput));
    }
}
