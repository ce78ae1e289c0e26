//! Implements UrlOpenerPort for a terminal: prints the link as an OSC 8
//! hyperlink so it can be opened with a click.

use crate::domain::DomainError;
use crate::ports::UrlOpenerPort;
use crossterm::ExecutableCommand;
use crossterm::style::{Attribute, Color, Print, ResetColor, SetAttribute, SetForegroundColor};
use std::io::{Write, stdout};
use tracing::info;

#[derive(Debug, Default, Clone, Copy)]
pub struct TerminalLinkOpener;

impl TerminalLinkOpener {
    pub fn new() -> Self {
        Self
    }
}

/// OSC 8 escape sequence wrapping `url`, with the URL itself as the text.
pub fn hyperlink(url: &str) -> String {
    format!("\x1b]8;;{url}\x1b\\{url}\x1b]8;;\x1b\\")
}

#[async_trait::async_trait]
impl UrlOpenerPort for TerminalLinkOpener {
    async fn open(&self, url: &str) -> Result<(), DomainError> {
        info!(url, "opening link");
        let mut out = stdout();
        let io = |e: std::io::Error| DomainError::Delivery(format!("print link: {}", e));
        out.execute(SetForegroundColor(Color::Cyan)).map_err(io)?;
        out.execute(SetAttribute(Attribute::Underlined))
            .map_err(io)?;
        out.execute(Print(format!("\r\n  ↗ {}\r\n", hyperlink(url))))
            .map_err(io)?;
        out.execute(SetAttribute(Attribute::Reset)).map_err(io)?;
        out.execute(ResetColor).map_err(io)?;
        out.flush().map_err(io)?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_hyperlink_wraps_url() {
        let link = hyperlink("https://sheets.test/d/1");
        assert!(link.starts_with("\x1b]8;;https://sheets.test/d/1\x1b\\"));
        assert!(link.ends_with("\x1b]8;;\x1b\\"));
    }
}
