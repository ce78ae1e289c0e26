//! Hands export artifacts to the user: saved files and links.

pub mod downloads;
pub mod terminal_link;

pub use downloads::DownloadsDir;
pub use terminal_link::TerminalLinkOpener;
