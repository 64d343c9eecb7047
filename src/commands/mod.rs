use crate::changes::{AnimationConfig, BadgeConfig};
use crate::format::FormatKind;
use crate::options::BadgeStyle;
use crate::sections::{Section, SectionId};

/// A line typed at the main interactive prompt. Section numbers are the
/// 1-based positions shown by `list`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Command {
    Help,
    List,
    Raw,
    Prompt,
    Status,
    Options,
    Set(String, String),
    Plan(Option<String>),
    Remove(usize),
    Restore(usize),
    Center(usize),
    Left(usize),
    Badges(usize, BadgeConfig),
    Animate(usize, AnimationConfig),
    Edit(usize),
    Changes,
    Discard,
    Apply(Option<String>),
    Generate,
    Copy,
    Save(Option<String>),
    Quit,
}

/// A line typed inside the section editor.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum EditorCommand {
    Help,
    Show,
    Select(usize, usize),
    Find(String),
    Format(FormatKind),
    Replace,
    Save,
    Cancel,
}

pub const HELP: &str = "\
list                      show sections with pending changes
raw                       print the markdown
prompt                    print the generation prompt
status                    show plan, options and document state
options                   list option names and current values
set KEY VALUE             change a generation option (see 'options')
plan [TEXT]               replace the project plan (no TEXT: type a block)
remove N | restore N      mark / unmark section N for removal
center N | left N         toggle centering / align section N left
badges N [STYLE|off]      ask for badges in section N
animate N [COLOR|off]     ask for a typing animation in section N header
edit N                    open the inline editor for section N
changes                   preview the change instructions
discard                   drop all pending changes
apply [INSTRUCTIONS]      send changes (and instructions) for regeneration
generate                  regenerate from scratch with current options
copy                      copy the README to the clipboard
save [PATH]               write the README to disk
quit";

pub const EDITOR_HELP: &str = "\
show                      print the buffer with byte offsets
select S E                select bytes [S, E)
find TEXT                 select the next occurrence of TEXT
bold | italic | center    format the selection
link [URL]                link the selection
badge [STYLE]             turn the selection into a badge
animate [COLOR]           turn the selection into a typing animation
replace                   type a new body, end with a line holding only '.'
save | cancel";

fn split(line: &str) -> (&str, &str) {
    let line = line.trim();
    match line.split_once(char::is_whitespace) {
        Some((head, rest)) => (head, rest.trim()),
        None => (line, ""),
    }
}

fn index(arg: &str) -> Result<usize, String> {
    let (n, _) = split(arg);
    match n.parse::<usize>() {
        Ok(i) if i > 0 => Ok(i),
        _ => Err(format!("expected a section number, got '{n}'")),
    }
}

fn optional(rest: &str) -> Option<String> {
    (!rest.is_empty()).then(|| rest.to_string())
}

pub fn parse_command(line: &str) -> Result<Command, String> {
    let (head, rest) = split(line);
    let cmd = match head {
        "help" | "?" => Command::Help,
        "list" | "ls" => Command::List,
        "raw" => Command::Raw,
        "prompt" => Command::Prompt,
        "status" => Command::Status,
        "options" => Command::Options,
        "set" => match split(rest) {
            (key, value) if !key.is_empty() && !value.is_empty() => {
                Command::Set(key.to_string(), value.to_string())
            }
            _ => return Err("usage: set KEY VALUE".into()),
        },
        "plan" => Command::Plan(optional(rest)),
        "remove" | "rm" => Command::Remove(index(rest)?),
        "restore" => Command::Restore(index(rest)?),
        "center" => Command::Center(index(rest)?),
        "left" => Command::Left(index(rest)?),
        "badges" => {
            let n = index(rest)?;
            let (_, arg) = split(rest);
            let config = match arg {
                "off" => BadgeConfig { enabled: false, ..BadgeConfig::default() },
                "" => BadgeConfig { enabled: true, ..BadgeConfig::default() },
                style => BadgeConfig { enabled: true, style: style.parse::<BadgeStyle>()? },
            };
            Command::Badges(n, config)
        }
        "animate" => {
            let n = index(rest)?;
            let (_, arg) = split(rest);
            let config = match arg {
                "off" => AnimationConfig { enabled: false, ..AnimationConfig::default() },
                "" => AnimationConfig { enabled: true, ..AnimationConfig::default() },
                color => AnimationConfig {
                    enabled: true,
                    color: color.trim_start_matches('#').to_string(),
                },
            };
            Command::Animate(n, config)
        }
        "edit" => Command::Edit(index(rest)?),
        "changes" => Command::Changes,
        "discard" => Command::Discard,
        "apply" => Command::Apply(optional(rest)),
        "generate" | "regen" => Command::Generate,
        "copy" => Command::Copy,
        "save" => Command::Save(optional(rest)),
        "quit" | "exit" | "q" => Command::Quit,
        "" => return Err("empty command".into()),
        other => return Err(format!("unknown command '{other}' (try 'help')")),
    };
    Ok(cmd)
}

pub fn parse_editor_command(line: &str) -> Result<EditorCommand, String> {
    let (head, rest) = split(line);
    let cmd = match head {
        "help" | "?" => EditorCommand::Help,
        "show" => EditorCommand::Show,
        "select" => {
            let mut nums = rest.split_whitespace().map(|n| n.parse::<usize>());
            match (nums.next(), nums.next(), nums.next()) {
                (Some(Ok(s)), Some(Ok(e)), None) => EditorCommand::Select(s, e),
                _ => return Err("usage: select START END".into()),
            }
        }
        "find" if !rest.is_empty() => EditorCommand::Find(rest.to_string()),
        "find" => return Err("usage: find TEXT".into()),
        "bold" => EditorCommand::Format(FormatKind::Bold),
        "italic" => EditorCommand::Format(FormatKind::Italic),
        "center" => EditorCommand::Format(FormatKind::Center),
        "link" => EditorCommand::Format(FormatKind::Link { url: optional(rest) }),
        "badge" => {
            let style = if rest.is_empty() {
                BadgeConfig::default().style
            } else {
                rest.parse::<BadgeStyle>()?
            };
            EditorCommand::Format(FormatKind::Badge { style })
        }
        "animate" => EditorCommand::Format(FormatKind::Animate {
            color: optional(rest.trim_start_matches('#')),
        }),
        "replace" => EditorCommand::Replace,
        "save" => EditorCommand::Save,
        "cancel" => EditorCommand::Cancel,
        "" => return Err("empty command".into()),
        other => return Err(format!("unknown editor command '{other}' (try 'help')")),
    };
    Ok(cmd)
}

/// Maps a 1-based display number to the section's id.
pub fn resolve(n: usize, sections: &[Section]) -> Option<SectionId> {
    n.checked_sub(1).and_then(|i| sections.get(i)).map(|s| s.id)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::sections::segment;

    #[test]
    fn test_parse_simple_commands() {
        assert_eq!(parse_command("list"), Ok(Command::List));
        assert_eq!(parse_command("  remove 2 "), Ok(Command::Remove(2)));
        assert_eq!(parse_command("center 1"), Ok(Command::Center(1)));
        assert_eq!(parse_command("left 1"), Ok(Command::Left(1)));
        assert_eq!(parse_command("quit"), Ok(Command::Quit));
    }

    #[test]
    fn test_parse_session_commands() {
        assert_eq!(parse_command("options"), Ok(Command::Options));
        assert_eq!(
            parse_command("set animation-font Roboto Mono"),
            Ok(Command::Set("animation-font".into(), "Roboto Mono".into()))
        );
        assert!(parse_command("set toc").is_err());
        assert!(parse_command("set").is_err());
        assert_eq!(parse_command("plan"), Ok(Command::Plan(None)));
        assert_eq!(
            parse_command("plan A CLI for notes"),
            Ok(Command::Plan(Some("A CLI for notes".into())))
        );
    }

    #[test]
    fn test_parse_rejects_bad_index() {
        assert!(parse_command("remove").is_err());
        assert!(parse_command("remove 0").is_err());
        assert!(parse_command("remove two").is_err());
    }

    #[test]
    fn test_parse_unknown_command() {
        assert!(parse_command("frobnicate").unwrap_err().contains("unknown command"));
        assert!(parse_command("   ").is_err());
    }

    #[test]
    fn test_parse_badges() {
        assert_eq!(
            parse_command("badges 2"),
            Ok(Command::Badges(2, BadgeConfig { enabled: true, style: BadgeStyle::ForTheBadge }))
        );
        assert_eq!(
            parse_command("badges 2 flat-square"),
            Ok(Command::Badges(2, BadgeConfig { enabled: true, style: BadgeStyle::FlatSquare }))
        );
        assert_eq!(
            parse_command("badges 2 off"),
            Ok(Command::Badges(2, BadgeConfig { enabled: false, style: BadgeStyle::ForTheBadge }))
        );
        assert!(parse_command("badges 2 neon").is_err());
    }

    #[test]
    fn test_parse_animate() {
        assert_eq!(
            parse_command("animate 1 #FF00AA"),
            Ok(Command::Animate(1, AnimationConfig { enabled: true, color: "FF00AA".into() }))
        );
        assert_eq!(
            parse_command("animate 1"),
            Ok(Command::Animate(1, AnimationConfig { enabled: true, ..AnimationConfig::default() }))
        );
    }

    #[test]
    fn test_parse_apply_and_save_arguments() {
        assert_eq!(parse_command("apply"), Ok(Command::Apply(None)));
        assert_eq!(
            parse_command("apply make the intro   shorter"),
            Ok(Command::Apply(Some("make the intro   shorter".into())))
        );
        assert_eq!(parse_command("save docs/README.md"), Ok(Command::Save(Some("docs/README.md".into()))));
        assert_eq!(parse_command("save"), Ok(Command::Save(None)));
    }

    #[test]
    fn test_parse_editor_commands() {
        assert_eq!(parse_editor_command("select 2 5"), Ok(EditorCommand::Select(2, 5)));
        assert!(parse_editor_command("select 2").is_err());
        assert_eq!(parse_editor_command("find cargo run"), Ok(EditorCommand::Find("cargo run".into())));
        assert!(parse_editor_command("find").is_err());
        assert_eq!(parse_editor_command("bold"), Ok(EditorCommand::Format(FormatKind::Bold)));
        assert_eq!(
            parse_editor_command("link https://example.com"),
            Ok(EditorCommand::Format(FormatKind::Link { url: Some("https://example.com".into()) }))
        );
        assert_eq!(
            parse_editor_command("badge"),
            Ok(EditorCommand::Format(FormatKind::Badge { style: BadgeStyle::ForTheBadge }))
        );
        assert_eq!(
            parse_editor_command("animate"),
            Ok(EditorCommand::Format(FormatKind::Animate { color: None }))
        );
        assert_eq!(parse_editor_command("save"), Ok(EditorCommand::Save));
    }

    #[test]
    fn test_resolve_display_number() {
        let sections = segment("intro\n# A\n## B");
        assert_eq!(resolve(1, &sections), Some(SectionId::Intro));
        assert_eq!(resolve(3, &sections), Some(SectionId::Heading(2)));
        assert_eq!(resolve(0, &sections), None);
        assert_eq!(resolve(4, &sections), None);
    }
}
