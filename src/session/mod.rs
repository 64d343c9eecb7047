use chrono::{DateTime, Utc};
use std::time::Instant;
use tracing::{debug, info, warn};

use crate::changes::{AnimationConfig, BadgeConfig, EditChanges};
use crate::clipboard::{Clipboard, CopyState};
use crate::errors::ReadmeError;
use crate::normalize::strip_fences;
use crate::options::GenerationOptions;
use crate::prompt;
use crate::provider::Provider;
use crate::sections::{self, Section, SectionId};

/// The current generated README. Replaced whole on every successful call.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ReadmeDocument {
    pub markdown: String,
    pub revision: u32,
    pub generated_at: DateTime<Utc>,
}

impl ReadmeDocument {
    /// Sections of the live text, recomputed on every call.
    pub fn sections(&self) -> Vec<Section> {
        sections::segment(&self.markdown)
    }
}

/// Every state change the user can make without a network call.
#[derive(Debug, Clone, PartialEq)]
pub enum Action {
    SetPlan(String),
    SetOptions(GenerationOptions),
    Remove(SectionId),
    Restore(SectionId),
    ToggleCenter(SectionId),
    AlignLeft(SectionId),
    EditText(SectionId, String),
    SetBadges(SectionId, BadgeConfig),
    SetAnimation(SectionId, AnimationConfig),
    DiscardChanges,
}

/// Application state owned by a single controller.
#[derive(Debug, Default)]
pub struct Session {
    plan: String,
    options: GenerationOptions,
    document: Option<ReadmeDocument>,
    changes: EditChanges,
    last_error: Option<String>,
    copy_state: CopyState,
}

impl Session {
    pub fn new(plan: impl Into<String>, options: GenerationOptions) -> Self {
        Self {
            plan: plan.into(),
            options,
            ..Self::default()
        }
    }

    pub fn plan(&self) -> &str {
        &self.plan
    }

    pub fn options(&self) -> &GenerationOptions {
        &self.options
    }

    pub fn document(&self) -> Option<&ReadmeDocument> {
        self.document.as_ref()
    }

    pub fn changes(&self) -> &EditChanges {
        &self.changes
    }

    pub fn last_error(&self) -> Option<&str> {
        self.last_error.as_deref()
    }

    pub fn is_copied(&self, now: Instant) -> bool {
        self.copy_state.is_copied(now)
    }

    pub fn sections(&self) -> Vec<Section> {
        self.document.as_ref().map(ReadmeDocument::sections).unwrap_or_default()
    }

    pub fn dispatch(&mut self, action: Action) -> Result<(), ReadmeError> {
        debug!(?action, "dispatch");
        match action {
            Action::SetPlan(plan) => self.plan = plan,
            Action::SetOptions(options) => self.options = options,
            Action::DiscardChanges => self.changes.clear(),
            Action::Remove(id) => {
                self.require_section(id)?;
                self.changes.remove(id);
            }
            Action::Restore(id) => {
                self.require_section(id)?;
                self.changes.restore(id);
            }
            Action::ToggleCenter(id) => {
                self.require_section(id)?;
                self.changes.toggle_center(id);
            }
            Action::AlignLeft(id) => {
                self.require_section(id)?;
                self.changes.align_left(id);
            }
            Action::EditText(id, text) => {
                self.require_section(id)?;
                self.changes.set_text_edit(id, text);
            }
            Action::SetBadges(id, config) => {
                self.require_section(id)?;
                self.changes.set_badge_config(id, config);
            }
            Action::SetAnimation(id, config) => {
                self.require_section(id)?;
                self.changes.set_animation_config(id, config);
            }
        }
        Ok(())
    }

    fn require_section(&self, id: SectionId) -> Result<Section, ReadmeError> {
        let doc = self.document.as_ref().ok_or(ReadmeError::NoDocument)?;
        sections::find(&doc.sections(), id)
            .cloned()
            .ok_or_else(|| ReadmeError::UnknownSection(id.to_string()))
    }

    /// The prompt a `generate` call would send right now.
    pub fn generation_prompt(&self) -> Result<String, ReadmeError> {
        prompt::generation_prompt(&self.plan, &self.options).map(|p| p.render())
    }

    /// Serialized pending changes against the live document.
    pub fn change_instructions(&self) -> String {
        self.changes.to_instructions(&self.sections())
    }

    /// Generates a fresh README from the plan and options.
    ///
    /// On success the document is replaced and pending changes are dropped,
    /// since their section ids referred to the old text. On failure nothing
    /// but `last_error` changes.
    pub async fn generate(&mut self, provider: &dyn Provider) -> Result<(), ReadmeError> {
        let result = self.run_generate(provider).await;
        self.record(result)
    }

    async fn run_generate(&mut self, provider: &dyn Provider) -> Result<(), ReadmeError> {
        provider.ensure_configured()?;
        let prompt = prompt::generation_prompt(&self.plan, &self.options)?.render();
        info!(plan_bytes = self.plan.len(), "generating README");
        let markdown = call(provider, &prompt).await?;
        self.replace_document(markdown);
        Ok(())
    }

    /// Sends the pending changes (plus optional free-text instructions) for a
    /// follow-up generation. Clears the changes only when the call succeeds.
    pub async fn apply_changes(
        &mut self,
        provider: &dyn Provider,
        extra: Option<&str>,
    ) -> Result<(), ReadmeError> {
        let result = self.run_apply(provider, extra).await;
        self.record(result)
    }

    async fn run_apply(&mut self, provider: &dyn Provider, extra: Option<&str>) -> Result<(), ReadmeError> {
        provider.ensure_configured()?;
        let doc = self.document.as_ref().ok_or(ReadmeError::NoDocument)?;
        let instructions = self.changes.to_instructions(&doc.sections());
        let prompt = prompt::update_prompt(&self.plan, &doc.markdown, &instructions, extra)?.render();
        info!(revision = doc.revision, change_bytes = instructions.len(), "applying changes");
        let markdown = call(provider, &prompt).await?;
        self.replace_document(markdown);
        Ok(())
    }

    fn replace_document(&mut self, markdown: String) {
        let revision = self.document.as_ref().map_or(1, |d| d.revision + 1);
        self.document = Some(ReadmeDocument {
            markdown,
            revision,
            generated_at: Utc::now(),
        });
        self.changes.clear();
        info!(revision, "document replaced");
    }

    /// Copies the document to `clipboard` and raises the transient copied flag.
    pub fn copy_document(&mut self, clipboard: &dyn Clipboard, now: Instant) -> anyhow::Result<()> {
        let doc = self.document.as_ref().ok_or(ReadmeError::NoDocument)?;
        match clipboard.write_text(&doc.markdown) {
            Ok(()) => {
                self.copy_state.mark(now);
                Ok(())
            }
            Err(e) => {
                warn!(error = %e, "failed to copy document");
                self.copy_state.clear();
                Err(e)
            }
        }
    }

    fn record(&mut self, result: Result<(), ReadmeError>) -> Result<(), ReadmeError> {
        match &result {
            Ok(()) => self.last_error = None,
            Err(e) => {
                warn!(error = %e, "request failed");
                self.last_error = Some(e.to_string());
            }
        }
        result
    }
}

async fn call(provider: &dyn Provider, prompt: &str) -> Result<String, ReadmeError> {
    debug!(prompt = %prompt, "prompt");
    let raw = provider.generate(prompt).await?;
    debug!(response = %raw, "raw response");
    let markdown = strip_fences(&raw);
    if markdown.is_empty() {
        return Err(ReadmeError::InvalidResponseShape);
    }
    Ok(markdown)
}
