use anyhow::{bail, Context};
use clap::Parser;
use fs_err as fs;
use std::io::Read;
use std::path::{Path, PathBuf};
use std::time::Instant;
use tracing::{info, Instrument};
use uuid::Uuid;

mod changes;
mod cli;
mod clipboard;
mod commands;
mod config;
mod errors;
mod format;
mod log;
mod normalize;
mod options;
mod output;
mod prompt;
mod provider;
mod sections;
mod session;
mod ux;
mod wire;

use commands::{Command, EditorCommand};
use errors::ReadmeError;
use provider::Provider;
use session::{Action, Session};

const DEFAULT_OUTPUT: &str = "README.md";

fn read_plan(args: &cli::Args) -> anyhow::Result<Option<String>> {
    if let Some(text) = &args.plan_text {
        return Ok(Some(text.clone()));
    }
    match args.plan.as_deref() {
        Some("-") => {
            let mut s = String::new();
            std::io::stdin().read_to_string(&mut s).context("failed to read plan from stdin")?;
            Ok(Some(s))
        }
        Some(path) => Ok(Some(fs::read_to_string(path)?)),
        None => Ok(None),
    }
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let args = cli::Args::parse();
    log::init(args.debug);

    let run_id = Uuid::new_v4();
    run(args).instrument(tracing::info_span!("run", %run_id)).await
}

async fn run(args: cli::Args) -> anyhow::Result<()> {
    let mut cfg = config::Config::load(args.config.as_deref().map(Path::new))?;
    if let Some(model) = &args.model {
        cfg.model = model.clone();
    }
    let mut opts = cfg.options.clone();
    args.options.apply_to(&mut opts);

    let plan = match read_plan(&args)? {
        Some(plan) => plan,
        None if args.interactive => {
            println!("Describe your project (name, tech stack, features, license):");
            ux::read_block()?
        }
        None => bail!("no project plan given (use --plan FILE, --plan - or --plan-text TEXT)"),
    };

    let mut session = Session::new(plan, opts);

    if args.print_prompt {
        println!("{}", session.generation_prompt()?);
        return Ok(());
    }

    // Key is read once at startup; a missing key fails before any request.
    let prov = provider::make_provider(&cfg);
    info!(model = %cfg.model, "starting");

    let out = args.out.clone().or_else(|| cfg.output.clone()).map(PathBuf::from);

    let pb = ux::spinner("Generating README...");
    let generated = session.generate(prov.as_ref()).await;
    pb.finish_and_clear();

    if !args.interactive {
        generated?;
        return finish(&session, out.as_deref());
    }

    if let Err(e) = generated {
        ux::print_error(&e.to_string());
    }
    interactive(&mut session, prov.as_ref(), out.as_deref()).await
}

/// Writes the document to `out`, or prints it.
fn finish(session: &Session, out: Option<&Path>) -> anyhow::Result<()> {
    let doc = session.document().ok_or(ReadmeError::NoDocument)?;
    match out {
        Some(path) => {
            let bytes = output::write_document(path, &doc.markdown)?;
            ux::print_ok(&format!("wrote {} ({} bytes)", path.display(), bytes));
        }
        None => println!("{}", doc.markdown),
    }
    Ok(())
}

async fn interactive(session: &mut Session, prov: &dyn Provider, out: Option<&Path>) -> anyhow::Result<()> {
    if session.document().is_some() {
        ux::show_sections(&session.sections(), session.changes());
    }
    println!("Type 'help' for commands.");

    while let Some(line) = ux::read_line(">")? {
        if line.trim().is_empty() {
            continue;
        }
        let cmd = match commands::parse_command(&line) {
            Ok(cmd) => cmd,
            Err(e) => {
                ux::print_error(&e);
                continue;
            }
        };

        match cmd {
            Command::Quit => {
                if session.changes().is_empty() || ux::confirm("Discard pending changes and quit?") {
                    break;
                }
            }
            Command::Help => println!("{}", commands::HELP),
            Command::List => ux::show_sections(&session.sections(), session.changes()),
            Command::Raw => match session.document() {
                Some(doc) => ux::print_raw(&doc.markdown),
                None => ux::print_error(&ReadmeError::NoDocument.to_string()),
            },
            Command::Prompt => match session.generation_prompt() {
                Ok(p) => println!("{p}"),
                Err(e) => ux::print_error(&e.to_string()),
            },
            Command::Status => ux::print_status(session, Instant::now()),
            Command::Options => ux::print_options(session.options()),
            Command::Set(key, value) => {
                let mut opts = session.options().clone();
                match opts.set(&key, &value) {
                    Ok(()) => {
                        if report(session.dispatch(Action::SetOptions(opts))) {
                            ux::print_ok(&format!("{key} = {value} (run 'generate' to use it)"));
                        }
                    }
                    Err(e) => ux::print_error(&e),
                }
            }
            Command::Plan(text) => {
                let plan = match text {
                    Some(text) => text,
                    None => {
                        println!("Describe your project (name, tech stack, features, license):");
                        ux::read_block()?
                    }
                };
                if plan.trim().is_empty() {
                    ux::print_error(&ReadmeError::EmptyInput.to_string());
                } else if report(session.dispatch(Action::SetPlan(plan))) {
                    ux::print_ok("plan updated (run 'generate' to use it)");
                }
            }
            Command::Changes => ux::print_changes(&session.change_instructions()),
            Command::Discard => {
                report(session.dispatch(Action::DiscardChanges));
            }
            Command::Remove(n) => section_action(session, n, Action::Remove),
            Command::Restore(n) => section_action(session, n, Action::Restore),
            Command::Center(n) => section_action(session, n, Action::ToggleCenter),
            Command::Left(n) => section_action(session, n, Action::AlignLeft),
            Command::Badges(n, config) => section_action(session, n, |id| Action::SetBadges(id, config)),
            Command::Animate(n, config) => section_action(session, n, |id| Action::SetAnimation(id, config)),
            Command::Edit(n) => edit_section(session, n)?,
            Command::Apply(extra) => {
                let pb = ux::spinner("Applying changes...");
                let res = session.apply_changes(prov, extra.as_deref()).await;
                pb.finish_and_clear();
                if report(res) {
                    ux::show_sections(&session.sections(), session.changes());
                }
            }
            Command::Generate => {
                let pb = ux::spinner("Generating README...");
                let res = session.generate(prov).await;
                pb.finish_and_clear();
                if report(res) {
                    ux::show_sections(&session.sections(), session.changes());
                }
            }
            Command::Copy => match session.copy_document(&clipboard::SystemClipboard, Instant::now()) {
                Ok(()) => ux::print_ok("copied to clipboard"),
                Err(e) => ux::print_error(&format!("{e:#}")),
            },
            Command::Save(path) => {
                let path = path
                    .map(PathBuf::from)
                    .or_else(|| out.map(Path::to_path_buf))
                    .unwrap_or_else(|| PathBuf::from(DEFAULT_OUTPUT));
                if let Err(e) = finish(session, Some(&path)) {
                    ux::print_error(&format!("{e:#}"));
                }
            }
        }
    }
    Ok(())
}

/// Prints the outcome of a session call; true on success.
fn report(res: Result<(), ReadmeError>) -> bool {
    match res {
        Ok(()) => true,
        Err(e) => {
            ux::print_error(&e.to_string());
            false
        }
    }
}

fn section_action(session: &mut Session, n: usize, make: impl FnOnce(sections::SectionId) -> Action) {
    match commands::resolve(n, &session.sections()) {
        Some(id) => {
            if report(session.dispatch(make(id))) {
                ux::show_sections(&session.sections(), session.changes());
            }
        }
        None => ux::print_error(&format!("no section {n}")),
    }
}

/// Runs the inline editor over one section and records the result as a
/// text edit on save.
fn edit_section(session: &mut Session, n: usize) -> anyhow::Result<()> {
    let sections = session.sections();
    let Some(section) = commands::resolve(n, &sections).and_then(|id| sections::find(&sections, id)) else {
        ux::print_error(&format!("no section {n}"));
        return Ok(());
    };
    let id = section.id;
    let seed = session
        .changes()
        .text_edit(id)
        .map(str::to_string)
        .unwrap_or_else(|| section.content.clone());
    let mut buf = format::EditBuffer::new(seed);

    println!("Editing \"{}\". Type 'help' for editor commands.", section.title);
    ux::print_buffer(&buf);

    while let Some(line) = ux::read_line("edit>")? {
        if line.trim().is_empty() {
            continue;
        }
        let cmd = match commands::parse_editor_command(&line) {
            Ok(cmd) => cmd,
            Err(e) => {
                ux::print_error(&e);
                continue;
            }
        };
        match cmd {
            EditorCommand::Help => println!("{}", commands::EDITOR_HELP),
            EditorCommand::Show => ux::print_buffer(&buf),
            EditorCommand::Select(start, end) => match buf.select(start, end) {
                Ok(()) => ux::print_buffer(&buf),
                Err(e) => ux::print_error(&e.to_string()),
            },
            EditorCommand::Find(needle) => {
                if buf.find(&needle) {
                    ux::print_buffer(&buf);
                } else {
                    ux::print_error(&format!("'{needle}' not found"));
                }
            }
            EditorCommand::Format(kind) => match buf.apply(&kind) {
                Ok(()) => ux::print_buffer(&buf),
                Err(e) => ux::print_error(&e.to_string()),
            },
            EditorCommand::Replace => {
                buf.set_text(ux::read_block()?);
                ux::print_buffer(&buf);
            }
            EditorCommand::Save => {
                report(session.dispatch(Action::EditText(id, buf.into_text())));
                ux::show_sections(&session.sections(), session.changes());
                return Ok(());
            }
            EditorCommand::Cancel => return Ok(()),
        }
    }
    Ok(())
}
