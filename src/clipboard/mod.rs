use anyhow::{anyhow, Result};
use arboard::Clipboard;
use std::path::{Path, PathBuf};

const MAX_NOTIFICATION_LEN: usize = 256;
const MAX_PATH_LEN: usize = 4096;
const MAX_UNIQUE_ATTEMPTS: u32 = 1000;

pub struct ClipboardManager {
    clipboard: Clipboard,
}

impl ClipboardManager {
    pub fn new() -> Result<Self> {
        let clipboard = Clipboard::new()?;
        Ok(Self { clipboard })
    }

    /// Copies the saved recording's path so it can be pasted straight into
    /// an upload form or chat.
    pub fn copy_file_path<P: AsRef<Path>>(&mut self, path: P) -> Result<()> {
        let path_str = path.as_ref().to_string_lossy().to_string();
        if path_str.len() > MAX_PATH_LEN {
            return Err(anyhow!("Path too long for clipboard"));
        }
        self.clipboard.set_text(path_str)?;
        Ok(())
    }
}

/// Appends `_1`, `_2`, ... before the extension until the path is free, so a
/// re-recorded topic never overwrites the previous take.
pub fn get_unique_filepath(path: &Path) -> PathBuf {
    if !path.exists() {
        return path.to_path_buf();
    }

    let stem = path
        .file_stem()
        .map(|s| s.to_string_lossy().to_string())
        .unwrap_or_else(|| "recording".to_string());
    let extension = path
        .extension()
        .map(|e| e.to_string_lossy().to_string())
        .unwrap_or_default();
    let parent = path.parent().map(Path::to_path_buf).unwrap_or_default();

    for n in 1..=MAX_UNIQUE_ATTEMPTS {
        let candidate = if extension.is_empty() {
            parent.join(format!("{}_{}", stem, n))
        } else {
            parent.join(format!("{}_{}.{}", stem, n, extension))
        };
        if !candidate.exists() {
            return candidate;
        }
    }

    path.to_path_buf()
}

fn sanitize_notification_text(text: &str) -> String {
    text.chars()
        .filter(|c| !c.is_control() || *c == '\n')
        .take(MAX_NOTIFICATION_LEN)
        .collect()
}

pub fn show_notification(title: &str, body: &str) -> Result<()> {
    let safe_title = sanitize_notification_text(title);
    let safe_body = sanitize_notification_text(body);

    #[cfg(not(target_os = "macos"))]
    {
        notify_rust::Notification::new()
            .summary(&safe_title)
            .body(&safe_body)
            .timeout(notify_rust::Timeout::Milliseconds(3000))
            .show()?;
    }

    #[cfg(target_os = "macos")]
    {
        notify_rust::Notification::new()
            .summary(&safe_title)
            .body(&safe_body)
            .show()?;
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn unique_filepath_leaves_free_path_alone() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("space_quiz.gif");
        assert_eq!(get_unique_filepath(&path), path);
    }

    #[test]
    fn unique_filepath_numbers_collisions() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("space_quiz.gif");
        std::fs::write(&path, b"x").unwrap();
        assert_eq!(
            get_unique_filepath(&path),
            dir.path().join("space_quiz_1.gif")
        );

        std::fs::write(dir.path().join("space_quiz_1.gif"), b"x").unwrap();
        assert_eq!(
            get_unique_filepath(&path),
            dir.path().join("space_quiz_2.gif")
        );
    }

    #[test]
    fn notification_text_drops_control_characters() {
        assert_eq!(sanitize_notification_text("a\x07b\nc"), "ab\nc");
    }
}
