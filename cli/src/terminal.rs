//! A [`Host`] that paints statuslines on an ANSI terminal.

use std::collections::HashMap;
use std::io;
use std::io::Write;

use crossterm::queue;
use crossterm::style::Attribute as CAttribute;
use crossterm::style::Color as CColor;
use crossterm::style::Print;
use crossterm::style::ResetColor;
use crossterm::style::SetAttribute;
use crossterm::style::SetBackgroundColor;
use crossterm::style::SetForegroundColor;
use linebar_core::Highlight;
use linebar_core::Host;
use linebar_core::WindowInfo;
use linebar_core::highlight::ACTIVE_DEFAULT;
use linebar_core::highlight::INACTIVE_DEFAULT;
use linebar_core::markers;
use linebar_core::markers::Token;
use ratatui::style::Color;
use ratatui::style::Modifier;
use ratatui::style::Style;
use ratatui::text::Line;
use ratatui::text::Span;

const ATTRIBUTES: &[(Modifier, CAttribute)] = &[
    (Modifier::BOLD, CAttribute::Bold),
    (Modifier::DIM, CAttribute::Dim),
    (Modifier::ITALIC, CAttribute::Italic),
    (Modifier::UNDERLINED, CAttribute::Underlined),
    (Modifier::SLOW_BLINK, CAttribute::SlowBlink),
    (Modifier::RAPID_BLINK, CAttribute::RapidBlink),
    (Modifier::REVERSED, CAttribute::Reverse),
    (Modifier::HIDDEN, CAttribute::Hidden),
    (Modifier::CROSSED_OUT, CAttribute::CrossedOut),
];

#[derive(Debug)]
pub struct TerminalHost {
    window: WindowInfo,
    styles: HashMap<String, Style>,
}

impl TerminalHost {
    pub fn new(window: WindowInfo) -> Self {
        Self {
            window,
            styles: HashMap::new(),
        }
    }

    /// Style registered under `name`. Names the terminal never saw paint
    /// with `fallback`.
    fn style_or(&self, name: &str, fallback: Style) -> Style {
        self.styles.get(name).copied().unwrap_or(fallback)
    }

    /// Interpret a marker string as a styled line exactly `window.width`
    /// cells wide when it fits. Alignment markers become padding; any slack
    /// the even split leaves goes to the last gap.
    pub fn to_line(&self, rendered: &str, window_is_active: bool) -> Line<'static> {
        let base_name = if window_is_active {
            ACTIVE_DEFAULT
        } else {
            INACTIVE_DEFAULT
        };
        let base = self.style_or(base_name, Style::default());

        let mut sections: Vec<Vec<Span<'static>>> = vec![Vec::new()];
        let mut current = base;
        for token in markers::tokenize(rendered) {
            match token {
                Token::Text(text) => {
                    if let Some(section) = sections.last_mut() {
                        section.push(Span::styled(text.to_string(), current));
                    }
                }
                Token::Switch(name) => current = self.style_or(name, base),
                Token::Reset => current = base,
                Token::Align => {
                    sections.push(Vec::new());
                    current = base;
                }
            }
        }

        let used: usize = sections.iter().flatten().map(Span::width).sum();
        let free = self.window.width.saturating_sub(used);
        let gaps = sections.len() - 1;

        let mut spans = Vec::new();
        if gaps == 0 {
            spans.extend(sections.into_iter().flatten());
            if free > 0 {
                spans.push(Span::styled(" ".repeat(free), base));
            }
            return Line::from(spans);
        }

        let share = free / gaps;
        let slack = free % gaps;
        for (i, section) in sections.into_iter().enumerate() {
            if i > 0 {
                let pad = if i == gaps { share + slack } else { share };
                if pad > 0 {
                    spans.push(Span::styled(" ".repeat(pad), base));
                }
            }
            spans.extend(section);
        }
        Line::from(spans)
    }

    pub fn write_ansi<W: Write>(&self, out: &mut W, line: &Line<'_>) -> io::Result<()> {
        for span in &line.spans {
            if let Some(fg) = span.style.fg {
                queue!(out, SetForegroundColor(to_crossterm(fg)))?;
            }
            if let Some(bg) = span.style.bg {
                queue!(out, SetBackgroundColor(to_crossterm(bg)))?;
            }
            for (modifier, attribute) in ATTRIBUTES {
                if span.style.add_modifier.contains(*modifier) {
                    queue!(out, SetAttribute(*attribute))?;
                }
            }
            queue!(
                out,
                Print(span.content.as_ref()),
                SetAttribute(CAttribute::Reset),
                ResetColor
            )?;
        }
        out.flush()
    }
}

impl Host for TerminalHost {
    fn define_highlight(&mut self, name: &str, highlight: &Highlight) {
        let style = Style::default()
            .fg(highlight.fg)
            .bg(highlight.bg)
            .add_modifier(highlight.style);
        self.styles.insert(name.to_string(), style);
    }

    fn window(&self) -> &WindowInfo {
        &self.window
    }
}

fn to_crossterm(color: Color) -> CColor {
    match color {
        Color::Reset => CColor::Reset,
        Color::Black => CColor::Black,
        Color::Red => CColor::DarkRed,
        Color::Green => CColor::DarkGreen,
        Color::Yellow => CColor::DarkYellow,
        Color::Blue => CColor::DarkBlue,
        Color::Magenta => CColor::DarkMagenta,
        Color::Cyan => CColor::DarkCyan,
        Color::Gray => CColor::Grey,
        Color::DarkGray => CColor::DarkGrey,
        Color::LightRed => CColor::Red,
        Color::LightGreen => CColor::Green,
        Color::LightYellow => CColor::Yellow,
        Color::LightBlue => CColor::Blue,
        Color::LightMagenta => CColor::Magenta,
        Color::LightCyan => CColor::Cyan,
        Color::White => CColor::White,
        Color::Rgb(r, g, b) => CColor::Rgb { r, g, b },
        Color::Indexed(index) => CColor::AnsiValue(index),
    }
}
