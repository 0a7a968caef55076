//! CLI module for the codenest application
//!
//! This module drives one interactive session: it dispatches shell commands
//! to the store and view model and renders the current view to the terminal.
use std::{
    fs::{read_to_string, OpenOptions},
    io::{stdout, Write},
    path::{Path, PathBuf},
    process::Command,
};

use console::style;
use log::{debug, info, warn};
use shell_words::split;
use tempfile::Builder;
use tokio::io::{stdin, AsyncBufReadExt, BufReader};
use tokio::time::Duration;

use crate::{
    copy_to_clipboard, parse_shell_line, parse_tags, preview_text, render_prose, AddOutcome,
    BlockKey, Clipboard, CodeNestError, Commands, Config, CopiedIndicator, FenceScanner,
    ProseLine, Result, Segment, Tutorial, TutorialDraft, TutorialId, TutorialStore, View,
    ViewModel,
};

/// Whether the session keeps reading commands
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Flow {
    Continue,
    Quit,
}

/// Content source chosen on the add command
#[derive(Debug, Default)]
pub struct ContentSource {
    pub content: Option<String>,
    pub file: Option<PathBuf>,
    pub edit: bool,
}

/// CLI Application handler - owns the session state and renders it
pub struct App<C: Clipboard> {
    /// Tutorials of this session
    store: TutorialStore,

    /// Current view, add form flag and filters
    view: ViewModel,

    /// Splits tutorial content into prose and code
    scanner: FenceScanner,

    /// Which copy button shows "Copied!"
    indicator: CopiedIndicator,

    clipboard: C,

    /// Application configuration
    config: Config,
}

impl<C: Clipboard> App<C> {
    /// Create a new session over the given store
    pub fn new(store: TutorialStore, clipboard: C, config: Config) -> Self {
        Self {
            store,
            view: ViewModel::new(),
            scanner: FenceScanner::new(config.default_language.clone()),
            indicator: CopiedIndicator::new(Duration::from_secs(config.copied_display_secs)),
            clipboard,
            config,
        }
    }

    pub fn store(&self) -> &TutorialStore {
        &self.store
    }

    pub fn view_model(&self) -> &ViewModel {
        &self.view
    }

    pub fn indicator(&self) -> &CopiedIndicator {
        &self.indicator
    }

    /// Reads commands from stdin until `quit` or end of input
    pub async fn run_shell(&mut self) -> Result<()> {
        println!("{}", self.render_current());

        let mut lines = BufReader::new(stdin()).lines();
        loop {
            print!("{} ", style("codenest>").green().bold());
            stdout().flush()?;

            let Some(line) = lines.next_line().await? else {
                println!();
                break;
            };

            let command = match parse_shell_line(&line) {
                Ok(Some(command)) => command,
                Ok(None) => continue,
                Err(e) => {
                    println!("{}", e);
                    continue;
                }
            };

            match self.run(command).await {
                Ok(Flow::Quit) => break,
                Ok(Flow::Continue) => {}
                Err(e) => println!("{} {}", style("Error:").red().bold(), e),
            }
        }

        info!("Session ended with {} tutorials", self.store.len());
        Ok(())
    }

    /// Run one command against the session
    pub async fn run(&mut self, command: Commands) -> Result<Flow> {
        debug!("Running command: {:?}", command);
        match command {
            Commands::Home => {
                self.view.go_home();
                println!("{}", self.render_current());
            }

            Commands::List { json } => {
                self.view.browse_tutorials();
                if json {
                    println!("{}", self.list_json()?);
                } else {
                    println!("{}", self.render_current());
                }
            }

            Commands::Search { terms } => {
                self.view.set_search(terms.join(" "));
                self.view.browse_tutorials();
                println!("{}", self.render_current());
            }

            Commands::Tag { name } => {
                if !self.store.all_tags().contains(&name) {
                    println!("No tutorial is tagged #{}", name);
                    return Ok(Flow::Continue);
                }
                self.view.toggle_tag(&name);
                self.view.browse_tutorials();
                println!("{}", self.render_current());
            }

            Commands::Tags => println!("{}", self.render_tags()),

            Commands::ClearTags => {
                self.view.clear_tags();
                self.view.browse_tutorials();
                println!("{}", self.render_current());
            }

            Commands::Open { id } => {
                if !self.view.open_tutorial(&self.store, id) {
                    return Err(CodeNestError::TutorialNotFound { id });
                }
                println!("{}", self.render_current());
            }

            Commands::Show { json, html } => {
                let tutorial = self.reading()?;
                if json {
                    println!("{}", serde_json::to_string_pretty(tutorial)?);
                } else if html {
                    println!("{}", self.scanner.render(&tutorial.content).to_html());
                } else {
                    println!("{}", self.render_current());
                }
            }

            Commands::Back => {
                if !self.view.back() {
                    println!("Not reading a tutorial.");
                    return Ok(Flow::Continue);
                }
                println!("{}", self.render_current());
            }

            Commands::Blocks => println!("{}", self.render_blocks()?),

            Commands::Copy { index } => {
                self.copy_block(index).await?;
            }

            Commands::CopyPreview { id } => {
                self.copy_preview(id).await?;
            }

            Commands::Add {
                title,
                tags,
                date,
                link,
                summary,
                content,
                file,
                edit,
            } => {
                let source = ContentSource { content, file, edit };
                self.add_tutorial(title, tags, date, link, summary, source)?;
            }

            Commands::Quit => return Ok(Flow::Quit),
        }

        Ok(Flow::Continue)
    }

    /// Fills the add form and submits it.
    /// Returns the new tutorial's id, or `None` when the draft was rejected.
    pub fn add_tutorial(
        &mut self,
        title: String,
        tags: Option<String>,
        date: Option<String>,
        link: Option<String>,
        summary: Option<String>,
        source: ContentSource,
    ) -> Result<Option<TutorialId>> {
        if !self.view.open_add_form() {
            return Err(CodeNestError::InvalidView {
                message: "Go back to the list to add a tutorial".to_string(),
            });
        }

        let mut draft = TutorialDraft::with_title(title);
        for tag in parse_tags(tags) {
            draft.add_tag(&tag);
        }
        if let Some(date) = date {
            draft.date = date;
        }
        draft.project_link = link;
        draft.summary = summary.unwrap_or_default();

        draft.content = match self.read_content(&draft.title, source) {
            Ok(content) => content,
            Err(e) => {
                self.view.close_add_form();
                return Err(e);
            }
        };

        let outcome = self.view.submit_add_form(&mut self.store, draft);
        // a shell command cannot leave the form waiting for corrections
        self.view.close_add_form();

        match outcome {
            Some(AddOutcome::Added(id)) => {
                println!("Tutorial created with ID: {}", id);
                Ok(Some(id))
            }
            Some(AddOutcome::Rejected(reason)) => {
                println!("Tutorial not added: {}", reason);
                Ok(None)
            }
            None => Ok(None),
        }
    }

    fn read_content(&self, title: &str, source: ContentSource) -> Result<String> {
        match source {
            ContentSource {
                content: Some(c), ..
            } => Ok(c),
            ContentSource {
                file: Some(file_path),
                ..
            } => {
                if !file_path.exists() {
                    return Err(CodeNestError::FileNotFound {
                        file_path: file_path.display().to_string(),
                    });
                }
                Ok(read_to_string(file_path)?)
            }
            ContentSource { edit: true, .. } => self.open_editor_for_content(title),
            _ => Ok(String::new()),
        }
    }

    /// Copies a block of the tutorial being read
    pub async fn copy_block(&self, index: usize) -> Result<bool> {
        let tutorial = self.reading()?;
        let blocks = self.scanner.extract_code_blocks(&tutorial.content);
        let block = blocks
            .get(index)
            .ok_or(CodeNestError::CodeBlockNotFound {
                tutorial_id: tutorial.id,
                index,
            })?;

        let copied =
            copy_to_clipboard(&self.clipboard, &self.indicator, &block.code, BlockKey::Block(block.id))
                .await;
        self.report_copy(copied);
        Ok(copied)
    }

    /// Copies the first code block of any tutorial, as the list preview does
    pub async fn copy_preview(&self, id: TutorialId) -> Result<bool> {
        let tutorial = self.store.require(id)?;
        let blocks = self.scanner.extract_code_blocks(&tutorial.content);
        let block = blocks.first().ok_or(CodeNestError::CodeBlockNotFound {
            tutorial_id: id,
            index: 0,
        })?;

        let copied =
            copy_to_clipboard(&self.clipboard, &self.indicator, &block.code, BlockKey::Preview(id))
                .await;
        self.report_copy(copied);
        Ok(copied)
    }

    fn report_copy(&self, copied: bool) {
        if copied {
            println!("{}", style("✓ Copied!").green());
        } else {
            println!("{}", style("Copy failed, see the log for details").yellow());
        }
    }

    fn reading(&self) -> Result<&Tutorial> {
        match self.view.view() {
            View::TutorialDetail(id) => self.store.require(id),
            _ => Err(CodeNestError::InvalidView {
                message: "Open a tutorial first".to_string(),
            }),
        }
    }

    fn open_editor_for_content(&self, title: &str) -> Result<String> {
        // Create a temporary file with .md extension
        let temp_file = Builder::new().suffix(".md").tempfile()?;
        let temp_path = temp_file.path().to_path_buf();

        let editor_cmd = self.config.get_editor_command();
        let mut file = OpenOptions::new().write(true).open(&temp_path)?;
        write_editor_template(&mut file, title)?;
        drop(file);

        info!("Opening editor to write tutorial content. Save and exit when done...");
        self.launch_editor(&editor_cmd, &temp_path)?;

        let content = read_to_string(&temp_path)?;
        Ok(process_editor_content(content))
    }

    fn launch_editor(&self, editor_cmd: &str, file_path: &Path) -> Result<()> {
        let path_str = file_path.to_string_lossy();

        let args = split(editor_cmd).map_err(|e| CodeNestError::EditorError {
            message: format!("Failed to parse editor command: {}", e),
        })?;

        if args.is_empty() {
            return Err(CodeNestError::EditorError {
                message: "Empty editor command".to_string(),
            });
        }

        // First word is the program name, rest are arguments
        let mut command = Command::new(&args[0]);
        command.args(&args[1..]);
        command.arg(path_str.as_ref());

        let status = command.status()?;

        if !status.success() {
            return Err(CodeNestError::EditorError {
                message: "Editor exited with non-zero status".to_string(),
            });
        }

        Ok(())
    }

    /// Renders whichever view is current
    pub fn render_current(&self) -> String {
        match self.view.view() {
            View::Home => self.render_home(),
            View::TutorialsList => self.render_list(),
            View::TutorialDetail(id) => match self.store.get(id) {
                Some(tutorial) => self.render_detail(tutorial),
                None => {
                    warn!("Selected tutorial {} is missing, showing home", id);
                    self.render_home()
                }
            },
        }
    }

    fn render_home(&self) -> String {
        let mut out = String::new();
        out.push_str(&format!(
            "{}\n\n",
            style("Welcome to CodeNest – a cozy place for your code & notes").bold()
        ));
        out.push_str(&format!("{}\n", style("Recent Tutorials").underlined()));

        let recent: Vec<&Tutorial> = self
            .store
            .list_tutorials()
            .iter()
            .take(self.config.recent_count)
            .collect();
        if recent.is_empty() {
            out.push_str("No tutorials yet. Use `add --title ...` to write one.\n");
        }
        for tutorial in recent {
            out.push_str(&format!("[{}] {}\n", tutorial.id, style(&tutorial.title).bold()));
            if !tutorial.tags.is_empty() {
                out.push_str(&format!("    {}\n", style(format_tags(&tutorial.tags)).cyan()));
            }
            if !tutorial.summary.is_empty() {
                out.push_str(&format!("    {}\n", tutorial.summary));
            }
        }
        out.push_str("\n`list` to explore tutorials, `open <id>` to read more.");
        out
    }

    fn render_tags(&self) -> String {
        let tags = self.store.all_tags();
        if tags.is_empty() {
            return "No tags in use.".to_string();
        }
        tags.iter()
            .map(|tag| {
                if self.view.selected_tags().contains(tag) {
                    style(format!("[#{}]", tag)).cyan().bold().to_string()
                } else {
                    format!("#{}", tag)
                }
            })
            .collect::<Vec<_>>()
            .join(" ")
    }

    fn render_list(&self) -> String {
        let mut out = String::new();
        out.push_str(&format!("{}\n", style("📘 Tutorials").bold()));

        if !self.view.search_term().is_empty() {
            out.push_str(&format!("Search: \"{}\"\n", self.view.search_term()));
        }
        out.push_str(&format!("Tags: {}\n", self.render_tags()));

        let visible = self.view.visible_tutorials(&self.store);
        if visible.is_empty() {
            out.push_str("\nNo tutorials found\n");
            return out;
        }

        let term_width = terminal_size::terminal_size()
            .map(|(w, _)| w.0 as usize)
            .unwrap_or(80);

        for tutorial in &visible {
            out.push_str(&format!("{}\n", "-".repeat(term_width.min(50))));
            out.push_str(&self.render_card(tutorial));
        }

        out.push_str(&format!(
            "\nFound {} tutorial{}",
            visible.len(),
            if visible.len() == 1 { "" } else { "s" }
        ));
        out
    }

    fn render_card(&self, tutorial: &Tutorial) -> String {
        let mut out = String::new();
        let star = if tutorial.favorite { " ★" } else { "" };
        out.push_str(&format!(
            "[{}] 🔖 {}{}\n",
            tutorial.id,
            style(&tutorial.title).bold(),
            style(star).yellow()
        ));
        if !tutorial.tags.is_empty() {
            out.push_str(&format!("    🏷️ {}\n", style(format_tags(&tutorial.tags)).cyan()));
        }
        out.push_str(&format!("    📅 {}\n", tutorial.date));
        if let Some(link) = &tutorial.project_link {
            out.push_str(&format!("    📎 {}\n", style(link).blue().underlined()));
        }
        if !tutorial.summary.is_empty() {
            out.push_str(&format!("    📝 {}\n", tutorial.summary));
        }

        let blocks = self.scanner.extract_code_blocks(&tutorial.content);
        if let Some(first) = blocks.first() {
            out.push_str(&format!("    💻 Code Preview ({}):\n", first.language));
            for line in preview_text(&first.code, self.config.preview_chars).lines() {
                out.push_str(&format!("      {}\n", style(line).dim()));
            }
            out.push_str(&format!(
                "    📋 {}\n",
                self.copy_label(BlockKey::Preview(tutorial.id))
            ));
        }
        out
    }

    fn render_detail(&self, tutorial: &Tutorial) -> String {
        let mut out = String::new();
        out.push_str(&format!("🔖 {}\n", style(&tutorial.title).bold().underlined()));
        if !tutorial.tags.is_empty() {
            out.push_str(&format!("🏷️ {}\n", style(format_tags(&tutorial.tags)).cyan()));
        }
        out.push_str(&format!("📅 {}", tutorial.date));
        if let Some(link) = &tutorial.project_link {
            out.push_str(&format!("  📎 {}", style(link).blue().underlined()));
        }
        out.push_str("\n\n");

        for segment in self.scanner.render(&tutorial.content).segments {
            match segment {
                Segment::Prose { text, .. } => {
                    let lines: Vec<String> = render_prose(&text)
                        .into_iter()
                        .map(|line| match line {
                            ProseLine::Heading { level: 1, text } => {
                                style(text).bold().underlined().to_string()
                            }
                            ProseLine::Heading { text, .. } => style(text).bold().to_string(),
                            ProseLine::Text(text) => text,
                        })
                        .collect();
                    out.push_str(&lines.join("\n"));
                }
                Segment::Code { block, .. } => {
                    out.push_str(&format!(
                        "┌─ [{}] {} ─ {}\n",
                        block.id,
                        style(&block.language).bold(),
                        self.copy_label(BlockKey::Block(block.id))
                    ));
                    for line in block.code.lines() {
                        out.push_str(&format!("│ {}\n", line));
                    }
                    out.push('└');
                }
            }
        }
        out.push_str("\n\n`copy <n>` copies block n, `back` returns to the list.");
        out
    }

    fn render_blocks(&self) -> Result<String> {
        let tutorial = self.reading()?;
        let blocks = self.scanner.extract_code_blocks(&tutorial.content);
        if blocks.is_empty() {
            return Ok("This tutorial has no code blocks.".to_string());
        }
        Ok(blocks
            .iter()
            .map(|block| {
                format!(
                    "[{}] {:<12} {}",
                    block.id,
                    block.language,
                    block.code.lines().next().unwrap_or("")
                )
            })
            .collect::<Vec<_>>()
            .join("\n"))
    }

    fn copy_label(&self, key: BlockKey) -> String {
        if self.indicator.is_copied(key) {
            style("Copied!").green().to_string()
        } else {
            "Copy".to_string()
        }
    }

    /// Visible tutorials as JSON
    fn list_json(&self) -> Result<String> {
        let visible = self.view.visible_tutorials(&self.store);
        let simplified: Vec<serde_json::Value> = visible
            .iter()
            .map(|tutorial| {
                serde_json::json!({
                    "id": tutorial.id,
                    "title": tutorial.title,
                    "tags": tutorial.tags,
                    "date": tutorial.date,
                    "summary": tutorial.summary,
                    "project_link": tutorial.project_link,
                    "favorite": tutorial.favorite,
                    "code_blocks": self.scanner.extract_code_blocks(&tutorial.content),
                })
            })
            .collect();
        Ok(serde_json::to_string_pretty(&simplified)?)
    }
}

fn format_tags(tags: &[String]) -> String {
    tags.iter()
        .map(|tag| format!("#{}", tag))
        .collect::<Vec<_>>()
        .join(" ")
}

fn write_editor_template(file: &mut impl Write, title: &str) -> Result<()> {
    writeln!(file, "# {}", title)?;
    writeln!(file)?;
    writeln!(file, "<!-- ")?;
    writeln!(
        file,
        "Write the tutorial below. Fence code with three backticks and an optional language."
    )?;
    writeln!(
        file,
        "Everything inside this comment block is removed when the tutorial is saved."
    )?;
    writeln!(file, "Save and exit the editor when you're done.")?;
    writeln!(file, "-->")?;
    writeln!(file)?;

    Ok(())
}

// Removes every <!-- ... --> span, including ones that cover several lines.
// Lines left blank by the removal are dropped, other blank lines are kept.
fn process_editor_content(content: String) -> String {
    let mut kept: Vec<String> = Vec::new();
    let mut in_comment = false;

    for line in content.lines() {
        let mut touched = in_comment;
        let mut text = String::new();
        let mut rest = line;

        loop {
            if in_comment {
                match rest.find("-->") {
                    Some(end) => {
                        rest = &rest[end + 3..];
                        in_comment = false;
                    }
                    None => break,
                }
            } else {
                match rest.find("<!--") {
                    Some(start) => {
                        text.push_str(&rest[..start]);
                        rest = &rest[start + 4..];
                        in_comment = true;
                        touched = true;
                    }
                    None => {
                        text.push_str(rest);
                        break;
                    }
                }
            }
        }

        if !touched || !text.trim().is_empty() {
            kept.push(text);
        }
    }

    kept.join("\n")
}
