use std::{
    fmt::Display,
    io::{self, IsTerminal, Write},
};

use anstream::AutoStream;
use anstyle::{AnsiColor, Effects, Reset, Style};
use clap::ValueEnum;

use crate::Env;

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum Color {
    Never,
    Auto,
    Always,
}

impl Color {
    /// Whether output written to `stream` is colored.
    pub fn use_colors(&self, stream: &impl IsTerminal) -> bool {
        match self {
            Self::Never => false,
            Self::Auto => stream.is_terminal(),
            Self::Always => true,
        }
    }
}

/// Prints a right-aligned, highlighted status word followed by `message`.
pub fn print_status(
    env: &Env,
    status: &dyn Display,
    message: Option<&dyn Display>,
) -> io::Result<()> {
    const HEADER: Style = AnsiColor::Green.on_default().effects(Effects::BOLD);

    let style = HEADER.render();
    let reset = Reset.render();

    let mut stream = match env.color {
        Color::Never => AutoStream::never(io::stdout()),
        Color::Auto => AutoStream::auto(io::stdout()),
        Color::Always => AutoStream::always(io::stdout()),
    };
    write!(&mut stream, "{style}{status:>12}{reset}")?;
    match message {
        Some(message) => writeln!(&mut stream, " {message}"),
        None => writeln!(&mut stream),
    }
}

#[cfg(test)]
mod tests {
    use std::fs::File;

    use super::*;

    #[test]
    #[cfg(unix)]
    fn colors_follow_the_stream() {
        let null = File::create("/dev/null").unwrap();

        assert!(!Color::Never.use_colors(&null));
        assert!(!Color::Auto.use_colors(&null));
        assert!(Color::Always.use_colors(&null));
    }
}
