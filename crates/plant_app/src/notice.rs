use anyhow::{Context, Result};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NoticeKind {
    Info,
    Error,
}

/// One-shot message shown until the user dismisses it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Notice {
    pub kind: NoticeKind,
    pub message: String,
}

impl Notice {
    pub fn info(message: impl Into<String>) -> Self {
        Self {
            kind: NoticeKind::Info,
            message: message.into(),
        }
    }

    pub fn error(message: impl Into<String>) -> Self {
        Self {
            kind: NoticeKind::Error,
            message: message.into(),
        }
    }

    pub fn title(&self) -> &'static str {
        match self.kind {
            NoticeKind::Info => "Notice",
            NoticeKind::Error => "Something went wrong",
        }
    }
}

/// Platform clipboard adapters implement this trait.
pub trait ClipboardSink {
    fn set_text(&mut self, text: String) -> Result<()>;
}

/// Opens the system clipboard for each write so a missing clipboard only fails that write.
#[derive(Default)]
pub struct SystemClipboard;

impl ClipboardSink for SystemClipboard {
    fn set_text(&mut self, text: String) -> Result<()> {
        let mut clipboard = arboard::Clipboard::new().context("clipboard not available")?;
        clipboard.set_text(text).context("clipboard rejected text")?;
        Ok(())
    }
}
