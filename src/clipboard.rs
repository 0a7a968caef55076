//! Clipboard access and the copy operation behind every "Copy" button.
use std::{future::Future, process::Stdio};

use log::{debug, error, info};
use shell_words::split;
use tokio::{io::AsyncWriteExt, process::Command};

use crate::{BlockKey, CodeNestError, CopiedIndicator, Result};

/// Write-only access to a clipboard
pub trait Clipboard {
    fn write_text(&self, text: &str) -> impl Future<Output = Result<()>> + Send;
}

/// The platform clipboard, reached through `arboard`, or an external
/// command that reads the text on stdin when one is configured.
#[derive(Debug, Clone)]
pub struct SystemClipboard {
    /// Program followed by its arguments
    command: Option<Vec<String>>,
}

impl SystemClipboard {
    /// Builds a clipboard from an optional shell-like command line.
    /// Without a command the native clipboard is used.
    pub fn new(command_line: Option<String>) -> Result<Self> {
        let command = match command_line {
            Some(line) => {
                let args = split(&line).map_err(|e| CodeNestError::ConfigError {
                    message: format!("Failed to parse clipboard command: {}", e),
                })?;
                if args.is_empty() {
                    return Err(CodeNestError::ConfigError {
                        message: "Empty clipboard command".to_string(),
                    });
                }
                info!("Using clipboard command: {}", line);
                Some(args)
            }
            None => {
                debug!("Using the native clipboard");
                None
            }
        };
        Ok(Self { command })
    }

    /// The external command, if one overrides the native clipboard
    pub fn command(&self) -> Option<&[String]> {
        self.command.as_deref()
    }

    async fn write_native(text: &str) -> Result<()> {
        let text = text.to_string();
        tokio::task::spawn_blocking(move || {
            let mut clipboard = arboard::Clipboard::new()?;
            clipboard.set_text(text)
        })
        .await
        .map_err(|e| CodeNestError::Clipboard {
            message: format!("clipboard task failed: {}", e),
        })?
        .map_err(|e| CodeNestError::Clipboard {
            message: format!("clipboard unavailable: {}", e),
        })
    }

    async fn write_command(args: &[String], text: &str) -> Result<()> {
        let mut child = Command::new(&args[0])
            .args(&args[1..])
            .stdin(Stdio::piped())
            .stdout(Stdio::null())
            .stderr(Stdio::piped())
            .kill_on_drop(true)
            .spawn()
            .map_err(|e| CodeNestError::Clipboard {
                message: format!("failed to start {}: {}", args[0], e),
            })?;

        // stdin is dropped at the end of the block, which lets the command finish
        let written = match child.stdin.take() {
            Some(mut stdin) => stdin.write_all(text.as_bytes()).await,
            None => Ok(()),
        };
        if let Err(e) = written {
            if let Err(kill_error) = child.kill().await {
                debug!("Could not stop {}: {}", args[0], kill_error);
            }
            return Err(CodeNestError::Clipboard {
                message: format!("failed to write to {}: {}", args[0], e),
            });
        }

        let output = child.wait_with_output().await?;
        if !output.status.success() {
            return Err(CodeNestError::Clipboard {
                message: format!(
                    "{} exited with {}: {}",
                    args[0],
                    output.status,
                    String::from_utf8_lossy(&output.stderr).trim()
                ),
            });
        }
        Ok(())
    }
}

impl Clipboard for SystemClipboard {
    async fn write_text(&self, text: &str) -> Result<()> {
        match &self.command {
            Some(args) => Self::write_command(args, text).await?,
            None => Self::write_native(text).await?,
        }

        debug!("Wrote {} bytes to clipboard", text.len());
        Ok(())
    }
}

/// Copies `text` and, on success, shows `key` as copied.
///
/// Failures are logged and leave the indicator untouched.
/// Returns whether the text reached the clipboard.
pub async fn copy_to_clipboard<C: Clipboard>(
    clipboard: &C,
    indicator: &CopiedIndicator,
    text: &str,
    key: BlockKey,
) -> bool {
    match clipboard.write_text(text).await {
        Ok(()) => {
            indicator.mark(key);
            true
        }
        Err(e) => {
            error!("Failed to copy text: {}", e);
            false
        }
    }
}

#[cfg(test)]
mod tests {
    use std::sync::Mutex;

    use tokio::time::Duration;

    use super::*;

    #[derive(Default)]
    struct RecordingClipboard {
        written: Mutex<Vec<String>>,
        fail: bool,
    }

    impl Clipboard for RecordingClipboard {
        async fn write_text(&self, text: &str) -> Result<()> {
            if self.fail {
                return Err(CodeNestError::Clipboard {
                    message: "denied".to_string(),
                });
            }
            self.written.lock().unwrap().push(text.to_string());
            Ok(())
        }
    }

    #[tokio::test(start_paused = true)]
    async fn test_copy_marks_block() {
        let clipboard = RecordingClipboard::default();
        let indicator = CopiedIndicator::new(Duration::from_secs(2));

        assert!(copy_to_clipboard(&clipboard, &indicator, "npm i", BlockKey::Block(0)).await);
        assert_eq!(*clipboard.written.lock().unwrap(), vec!["npm i".to_string()]);
        assert!(indicator.is_copied(BlockKey::Block(0)));
    }

    #[tokio::test(start_paused = true)]
    async fn test_failed_copy_leaves_indicator_alone() {
        let clipboard = RecordingClipboard {
            fail: true,
            ..Default::default()
        };
        let indicator = CopiedIndicator::new(Duration::from_secs(2));
        indicator.mark(BlockKey::Preview(1));

        assert!(!copy_to_clipboard(&clipboard, &indicator, "x", BlockKey::Block(3)).await);
        assert_eq!(indicator.current(), Some(BlockKey::Preview(1)));
    }

    #[test]
    fn test_no_command_uses_native_clipboard() {
        let clipboard = SystemClipboard::new(None).unwrap();
        assert!(clipboard.command().is_none());

        let clipboard = SystemClipboard::new(Some("xclip -selection clipboard".to_string())).unwrap();
        assert_eq!(
            clipboard.command().unwrap(),
            ["xclip", "-selection", "clipboard"]
        );
    }

    #[test]
    fn test_empty_command_is_rejected() {
        assert!(matches!(
            SystemClipboard::new(Some("   ".to_string())),
            Err(CodeNestError::ConfigError { .. })
        ));
    }

    #[cfg(unix)]
    #[tokio::test]
    async fn test_system_clipboard_pipes_to_command() {
        let dir = tempfile::tempdir().unwrap();
        let target = dir.path().join("clip.txt");
        let command = format!("sh -c 'cat > \"{}\"'", target.display());

        let clipboard = SystemClipboard::new(Some(command)).unwrap();
        clipboard.write_text("echo hi").await.unwrap();
        assert_eq!(std::fs::read_to_string(&target).unwrap(), "echo hi");
    }

    #[cfg(unix)]
    #[tokio::test]
    async fn test_command_that_stops_reading_fails_without_hanging() {
        let clipboard = SystemClipboard::new(Some("true".to_string())).unwrap();
        // larger than a pipe buffer, so the write outlives the command
        let text = "x".repeat(1 << 20);

        let result = tokio::time::timeout(Duration::from_secs(10), clipboard.write_text(&text))
            .await
            .expect("write did not finish");
        assert!(matches!(result, Err(CodeNestError::Clipboard { .. })));
    }

    #[cfg(unix)]
    #[tokio::test]
    async fn test_failing_command_reports_status() {
        let clipboard = SystemClipboard::new(Some("sh -c 'cat > /dev/null; exit 3'".to_string())).unwrap();
        assert!(matches!(
            clipboard.write_text("ls").await,
            Err(CodeNestError::Clipboard { .. })
        ));
    }
}
