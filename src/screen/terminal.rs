//! Terminal renderers for the clock screen.

use anyhow::{Context, Result};
use crossterm::{
    cursor::{Hide, MoveTo, Show},
    execute, queue,
    style::{Attribute, Print, ResetColor, SetAttribute, SetBackgroundColor, SetForegroundColor},
    terminal::{
        self, Clear, ClearType, EnterAlternateScreen, LeaveAlternateScreen, disable_raw_mode,
        enable_raw_mode,
    },
};
use std::io::Write;

use super::{ScreenModel, Theme};

/// Anything that can present a [`ScreenModel`].
pub trait Renderer {
    fn render(&mut self, model: &ScreenModel) -> Result<()>;
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LineStyle {
    Normal,
    Accent,
    Emphasis,
    Dim,
    Panel,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FrameLine {
    pub text: String,
    pub style: LineStyle,
}

impl FrameLine {
    fn new(text: impl Into<String>, style: LineStyle) -> Self {
        Self {
            text: text.into(),
            style,
        }
    }
}

/// Lay the model out top to bottom: quote, greeting, time, location, toggle,
/// and the expanded panel when open.
pub fn frame_lines(model: &ScreenModel) -> Vec<FrameLine> {
    let mut lines = Vec::new();

    for (index, line) in model.quote_lines().into_iter().enumerate() {
        let style = if index == 0 {
            LineStyle::Normal
        } else {
            LineStyle::Emphasis
        };
        lines.push(FrameLine::new(line, style));
    }
    lines.push(FrameLine::new("[r] refresh quote", LineStyle::Dim));
    lines.push(FrameLine::new("", LineStyle::Normal));

    lines.push(FrameLine::new(
        format!("{} {}", model.mode.symbol(), model.greeting.display_text().to_uppercase()),
        LineStyle::Accent,
    ));
    lines.push(FrameLine::new(
        format!(
            "{} {} {}",
            model.reading,
            model.meridiem(),
            model.zone_abbreviation
        ),
        LineStyle::Emphasis,
    ));
    lines.push(FrameLine::new(
        format!("IN {}", model.location.to_uppercase()),
        LineStyle::Normal,
    ));
    lines.push(FrameLine::new("", LineStyle::Normal));
    lines.push(FrameLine::new(
        format!("[m] {}", model.toggle_label()),
        LineStyle::Dim,
    ));

    let rows = model.panel_rows();
    if !rows.is_empty() {
        lines.push(FrameLine::new("", LineStyle::Normal));
        for (label, value) in rows {
            lines.push(FrameLine::new(format!("{label:<18}{value}"), LineStyle::Panel));
        }
    }

    lines
}

/// Writes frames as plain text, one frame after another.
pub struct PlainRenderer<W: Write> {
    out: W,
}

impl<W: Write> PlainRenderer<W> {
    pub fn new(out: W) -> Self {
        Self { out }
    }

    pub fn into_inner(self) -> W {
        self.out
    }
}

impl<W: Write> Renderer for PlainRenderer<W> {
    fn render(&mut self, model: &ScreenModel) -> Result<()> {
        for line in frame_lines(model) {
            writeln!(self.out, "{}", line.text)?;
        }
        self.out.flush()?;
        Ok(())
    }
}

/// Full-screen renderer. Owns the terminal while alive: alternate screen,
/// raw mode and hidden cursor are restored on drop.
pub struct TerminalRenderer {
    stdout: std::io::Stdout,
}

impl TerminalRenderer {
    pub fn enter() -> Result<Self> {
        let mut stdout = std::io::stdout();
        enable_raw_mode().context("Failed to enable raw terminal mode")?;
        execute!(stdout, EnterAlternateScreen, Hide)
            .context("Failed to switch to the alternate screen")?;
        Ok(Self { stdout })
    }

    fn draw_line(&mut self, row: u16, line: &FrameLine, theme: &Theme) -> Result<()> {
        queue!(self.stdout, MoveTo(2, row))?;
        match line.style {
            LineStyle::Normal => {}
            LineStyle::Accent => queue!(self.stdout, SetForegroundColor(theme.terminal_accent))?,
            LineStyle::Emphasis => queue!(self.stdout, SetAttribute(Attribute::Bold))?,
            LineStyle::Dim => queue!(self.stdout, SetAttribute(Attribute::Dim))?,
            LineStyle::Panel => queue!(
                self.stdout,
                SetBackgroundColor(theme.terminal_panel_bg),
                SetForegroundColor(theme.terminal_panel_fg)
            )?,
        }
        queue!(
            self.stdout,
            Print(&line.text),
            SetAttribute(Attribute::Reset),
            ResetColor
        )?;
        Ok(())
    }
}

impl Renderer for TerminalRenderer {
    fn render(&mut self, model: &ScreenModel) -> Result<()> {
        let theme = model.theme();
        let lines = frame_lines(model);
        let (_, height) = terminal::size().unwrap_or((80, 24));
        let top = height.saturating_sub(lines.len() as u16) / 2;

        queue!(self.stdout, Clear(ClearType::All))?;
        for (offset, line) in lines.iter().enumerate() {
            self.draw_line(top + offset as u16, line, theme)?;
        }
        self.stdout.flush()?;
        Ok(())
    }
}

impl Drop for TerminalRenderer {
    fn drop(&mut self) {
        let _ = execute!(self.stdout, Show, LeaveAlternateScreen);
        let _ = disable_raw_mode();
    }
}
