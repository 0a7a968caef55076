use std::{fs, path::{Path, PathBuf}};

use directories::ProjectDirs;
use log::{debug, info};
use serde::{Deserialize, Serialize};
use which::which;

use crate::{CodeNestError, Result, DEFAULT_LANGUAGE};

/// Application configuration settings.
#[derive(Debug, Serialize, Deserialize, Clone, PartialEq)]
#[serde(default)]
pub struct Config {
    /// Language shown for fences without a hint
    pub default_language: String,

    /// How long a copied block stays marked (in seconds)
    pub copied_display_secs: u64,

    /// Number of tutorials shown on the home view
    pub recent_count: usize,

    /// Characters of the first code block shown in the list view
    pub preview_chars: usize,

    /// Whether a new session starts with the sample tutorials
    pub load_samples: bool,

    /// Command receiving copied text on stdin
    pub clipboard_command: Option<String>,

    /// Default editor command for writing tutorial content
    pub editor_command: Option<String>,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            default_language: DEFAULT_LANGUAGE.to_string(),
            copied_display_secs: 2,
            recent_count: 3,
            preview_chars: 100,
            load_samples: true,
            clipboard_command: None,
            editor_command: None,
        }
    }
}

impl Config {
    /// Location of the config file when none is given on the command line
    pub fn default_path() -> Option<PathBuf> {
        ProjectDirs::from("dev", "codenest", "codenest")
            .map(|dirs| dirs.config_dir().join("config.json"))
    }

    /// Loads the config from `path`, or from the default location.
    /// A missing default file yields the defaults; a missing explicit file is an error.
    pub fn load(path: Option<&Path>) -> Result<Self> {
        let path = match path {
            Some(p) => {
                if !p.exists() {
                    return Err(CodeNestError::ConfigFileError {
                        path: p.to_path_buf(),
                    });
                }
                p.to_path_buf()
            }
            None => match Self::default_path() {
                Some(p) if p.exists() => p,
                _ => {
                    debug!("No config file found, using defaults");
                    return Ok(Self::default());
                }
            },
        };

        info!("Loading config from {}", path.display());
        let raw = fs::read_to_string(&path)?;
        let config: Config = serde_json::from_str(&raw)?;
        config.validate()?;
        Ok(config)
    }

    fn validate(&self) -> Result<()> {
        if self.default_language.trim().is_empty() {
            return Err(CodeNestError::ConfigError {
                message: "default_language must not be empty".to_string(),
            });
        }
        Ok(())
    }

    /// Explicit clipboard command override, from the config file or
    /// `CODENEST_CLIPBOARD`. `None` means the native clipboard is used.
    pub fn get_clipboard_command(&self) -> Option<String> {
        if let Some(command) = &self.clipboard_command {
            return Some(command.clone());
        }

        std::env::var("CODENEST_CLIPBOARD")
            .ok()
            .filter(|command| !command.trim().is_empty())
    }

    // This method provides smart fallbacks when no editor is configured
    pub fn get_editor_command(&self) -> String {
        // First try the configured editor
        if let Some(editor) = &self.editor_command {
            return editor.clone();
        }

        // Then try environment variable
        if let Ok(editor) = std::env::var("EDITOR") {
            return editor;
        }

        // Fall back to platform defaults
        if cfg!(windows) {
            "notepad".to_string()
        } else if cfg!(target_os = "macos") {
            "open -t".to_string()
        } else {
            // Try common Linux editors
            for editor in &["nano", "vim", "vi", "emacs"] {
                if which(editor).is_ok() {
                    return editor.to_string();
                }
            }
            "nano".to_string()
        }
    }
}
