//! Prompt styling for every inquire prompt the adapters open.

use inquire::ui::{Color, RenderConfig, Styled};

/// Sets the global inquire render config: magenta prefix, cyan answers.
pub fn apply_theme() {
    let config = RenderConfig::default()
        .with_prompt_prefix(Styled::new("›").with_fg(Color::LightMagenta))
        .with_answered_prompt_prefix(Styled::new("✔").with_fg(Color::LightCyan))
        .with_canceled_prompt_indicator(Styled::new("<cancelled>").with_fg(Color::DarkGrey));
    inquire::set_global_render_config(config);
}
