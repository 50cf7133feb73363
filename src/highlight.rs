use inksac::prelude::*;

use crate::sink::{Chunk, OutputKind};

/// Styles chunks for a color terminal, degrading to plain text when the
/// terminal reports no color support.
#[derive(Debug, Clone, Copy)]
pub struct OutputStyler {
    color_support: ColorSupport,
}

impl Default for OutputStyler {
    fn default() -> Self {
        Self::new()
    }
}

impl OutputStyler {
    pub fn new() -> Self {
        let support = check_color_support().unwrap_or(ColorSupport::NoColor);
        Self {
            color_support: support,
        }
    }

    pub fn render(&self, chunk: &Chunk) -> String {
        if matches!(self.color_support, ColorSupport::NoColor) {
            return chunk.text.clone();
        }

        let style = match chunk.kind {
            OutputKind::Output => return chunk.text.clone(),
            OutputKind::Command => Style::builder().foreground(Color::Cyan).bold().build(),
            OutputKind::Prompt => Style::builder().foreground(Color::Cyan).build(),
            OutputKind::Error => Style::builder().foreground(Color::Red).bold().build(),
            OutputKind::Success | OutputKind::Welcome => {
                Style::builder().foreground(Color::Green).build()
            }
            OutputKind::Info => Style::builder()
                .foreground(Color::RGB(128, 128, 128))
                .build(),
        };

        chunk.text.clone().style(style).to_string()
    }

    /// Live highlighting of the line being edited: command word in cyan,
    /// flags in yellow.
    pub fn highlight_command(&self, input: &str) -> String {
        if matches!(self.color_support, ColorSupport::NoColor) {
            return input.to_string();
        }

        let mut parts: Vec<String> = input.split_whitespace().map(String::from).collect();
        if parts.is_empty() {
            return input.to_string();
        }

        let command_style = Style::builder().foreground(Color::Cyan).bold().build();
        parts[0] = parts[0].clone().style(command_style).to_string();

        for part in parts.iter_mut().skip(1) {
            if part.starts_with('-') {
                let flag_style = Style::builder().foreground(Color::Yellow).build();
                *part = part.clone().style(flag_style).to_string();
            }
        }

        parts.join(" ")
    }

    pub fn highlight_hint(&self, hint: &str) -> String {
        if matches!(self.color_support, ColorSupport::NoColor) {
            return hint.to_string();
        }

        let hint_style = Style::builder()
            .foreground(Color::RGB(128, 128, 128))
            .build();

        hint.style(hint_style).to_string()
    }
}
