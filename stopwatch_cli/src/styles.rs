use anstyle::{AnsiColor, Color, Style};
use clap::builder::Styles;

pub fn get_styles() -> Styles {
    let fg = |color: AnsiColor| Style::new().fg_color(Some(Color::Ansi(color)));

    Styles::styled()
        .header(fg(AnsiColor::Green).bold())
        .usage(fg(AnsiColor::Green).bold())
        .literal(fg(AnsiColor::Cyan).bold())
        .placeholder(fg(AnsiColor::Cyan))
        .error(fg(AnsiColor::Red).bold())
        .valid(fg(AnsiColor::Cyan).bold())
        .invalid(fg(AnsiColor::Yellow).bold())
}
