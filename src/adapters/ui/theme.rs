//! Prompt themes. The dark-mode preference picks one at startup and on toggle.

use inquire::ui::{Color, RenderConfig, StyleSheet, Styled};

pub fn render_config(dark: bool) -> RenderConfig<'static> {
    let (accent, text, muted) = if dark {
        (Color::LightCyan, Color::White, Color::DarkGrey)
    } else {
        (Color::DarkBlue, Color::Black, Color::Grey)
    };
    RenderConfig::default()
        .with_prompt_prefix(Styled::new("?").with_fg(accent))
        .with_highlighted_option_prefix(Styled::new("➤").with_fg(accent))
        .with_selected_checkbox(Styled::new("[x]").with_fg(accent))
        .with_unselected_checkbox(Styled::new("[ ]").with_fg(muted))
        .with_answer(StyleSheet::new().with_fg(text))
        .with_help_message(StyleSheet::new().with_fg(muted))
}

/// Make `dark` the theme of every following prompt.
pub fn apply(dark: bool) {
    inquire::set_global_render_config(render_config(dark));
}
