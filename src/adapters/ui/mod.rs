pub mod banner;
pub mod map;
pub mod theme;
pub mod tui;

/// Prints the welcome banner. Call once at startup, after tracing init.
/// The prompt theme is applied by the TUI once preferences are loaded.
pub fn init_ui() {
    banner::print_welcome();
}
