use ratatui::style::{Color, Modifier, Style};

type Rgb = (u8, u8, u8);

/// Colour palette for one theme mode.
#[derive(Debug, Clone, Copy)]
pub struct Theme {
    bg: Rgb,
    surface: Rgb,
    text: Rgb,
    muted: Rgb,
    accent: Rgb,
    accent_alt: Rgb,
    success: Rgb,
    error: Rgb,
}

const DARK: Theme = Theme {
    bg: (15, 23, 42),
    surface: (30, 41, 59),
    text: (241, 245, 249),
    muted: (148, 163, 184),
    accent: (147, 112, 219),
    accent_alt: (96, 165, 250),
    success: (74, 222, 128),
    error: (248, 113, 113),
};

const LIGHT: Theme = Theme {
    bg: (248, 250, 252),
    surface: (226, 232, 240),
    text: (15, 23, 42),
    muted: (100, 116, 139),
    accent: (124, 58, 237),
    accent_alt: (37, 99, 235),
    success: (22, 163, 74),
    error: (220, 38, 38),
};

fn rgb((r, g, b): Rgb) -> Color {
    Color::Rgb(r, g, b)
}

/// Linear blend from `a` to `b`; `t` is clamped to `[0, 1]`.
pub fn blend(a: Rgb, b: Rgb, t: f32) -> Color {
    let t = t.clamp(0.0, 1.0);
    let mix = |x: u8, y: u8| (x as f32 + (y as f32 - x as f32) * t).round() as u8;
    Color::Rgb(mix(a.0, b.0), mix(a.1, b.1), mix(a.2, b.2))
}

impl Theme {
    pub fn for_mode(dark: bool) -> Self {
        if dark {
            DARK
        } else {
            LIGHT
        }
    }

    pub fn page(&self) -> Style {
        Style::default().fg(rgb(self.text)).bg(rgb(self.bg))
    }

    pub fn text(&self) -> Style {
        Style::default().fg(rgb(self.text))
    }

    pub fn muted(&self) -> Style {
        Style::default().fg(rgb(self.muted))
    }

    pub fn title(&self) -> Style {
        Style::default()
            .fg(rgb(self.accent))
            .add_modifier(Modifier::BOLD)
    }

    pub fn heading(&self) -> Style {
        Style::default()
            .fg(rgb(self.text))
            .add_modifier(Modifier::BOLD)
    }

    pub fn accent(&self) -> Style {
        Style::default().fg(rgb(self.accent_alt))
    }

    pub fn tag(&self) -> Style {
        Style::default().fg(rgb(self.accent)).bg(rgb(self.surface))
    }

    pub fn card_selected(&self) -> Style {
        Style::default()
            .fg(rgb(self.accent_alt))
            .add_modifier(Modifier::BOLD)
    }

    pub fn button(&self, focused: bool) -> Style {
        if focused {
            Style::default()
                .fg(rgb(self.bg))
                .bg(rgb(self.accent))
                .add_modifier(Modifier::BOLD)
        } else {
            Style::default().fg(rgb(self.text)).bg(rgb(self.surface))
        }
    }

    pub fn input(&self, focused: bool) -> Style {
        let style = Style::default().fg(rgb(self.text)).bg(rgb(self.surface));
        if focused {
            style.add_modifier(Modifier::BOLD)
        } else {
            style
        }
    }

    pub fn placeholder(&self) -> Style {
        Style::default().fg(rgb(self.muted)).bg(rgb(self.surface))
    }

    pub fn caret(&self) -> Style {
        Style::default().fg(rgb(self.bg)).bg(rgb(self.text))
    }

    pub fn field_error(&self) -> Style {
        Style::default().fg(rgb(self.error))
    }

    pub fn success(&self) -> Style {
        Style::default().fg(rgb(self.success))
    }

    pub fn error(&self) -> Style {
        Style::default().fg(rgb(self.error))
    }

    /// Navigation bar background: page colour at the very top, surface colour
    /// once the reader has scrolled through the fade window.
    pub fn navbar(&self, reveal: f32) -> Style {
        Style::default()
            .fg(rgb(self.text))
            .bg(blend(self.bg, self.surface, reveal))
    }

    pub fn status_bar(&self) -> Style {
        Style::default().fg(rgb(self.text)).bg(rgb(self.surface))
    }

    pub fn status_key(&self) -> Style {
        Style::default()
            .fg(rgb(self.accent_alt))
            .bg(rgb(self.surface))
            .add_modifier(Modifier::BOLD)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_blend_endpoints() {
        assert_eq!(blend((0, 0, 0), (200, 100, 50), 0.0), Color::Rgb(0, 0, 0));
        assert_eq!(blend((0, 0, 0), (200, 100, 50), 1.0), Color::Rgb(200, 100, 50));
        assert_eq!(blend((0, 0, 0), (200, 100, 50), 0.5), Color::Rgb(100, 50, 25));
        assert_eq!(blend((0, 0, 0), (200, 100, 50), 7.0), Color::Rgb(200, 100, 50));
    }

    #[test]
    fn test_modes_differ() {
        assert_ne!(Theme::for_mode(true).page(), Theme::for_mode(false).page());
    }
}
