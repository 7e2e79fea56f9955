//! Terminal styling for jbridge output
//!
//! Output is painted by tone rather than by colour, so every command shows
//! an action, a warning or a hint the same way. Whether colour is emitted is
//! left to `owo-colors`, which checks the target stream and honours
//! `NO_COLOR` and `CLICOLOR_FORCE`.
//!
//! Everything targets stdout unless moved with [`Painted::on_stderr`].

use indicatif::ProgressStyle;
use owo_colors::{OwoColorize, Stream, Style};
use std::fmt::{self, Display};

/// Spinner frames, the last one shown when finished
const SPINNER_TICKS: &str = "⣾⣽⣻⢿⡿⣟⣯⣷ ";

#[derive(Debug, Clone, Copy)]
enum Tone {
    Accent,
    Success,
    Warn,
    Failure,
    Muted,
    Emphasis,
}

impl Tone {
    const fn style(self) -> Style {
        match self {
            Self::Accent => Style::new().cyan(),
            Self::Success => Style::new().green(),
            Self::Warn => Style::new().yellow(),
            Self::Failure => Style::new().red(),
            Self::Muted => Style::new().dimmed(),
            Self::Emphasis => Style::new().bold(),
        }
    }
}

/// A value painted in one tone
#[derive(Debug, Clone)]
pub struct Painted<T> {
    value: T,
    tone: Tone,
    stream: Stream,
}

impl<T> Painted<T> {
    const fn new(value: T, tone: Tone) -> Self {
        Self {
            value,
            tone,
            stream: Stream::Stdout,
        }
    }

    /// Decide colour support for stderr instead of stdout
    #[must_use]
    pub const fn on_stderr(mut self) -> Self {
        self.stream = Stream::Stderr;
        self
    }
}

impl<T: Display> Display for Painted<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let style = self.tone.style();
        write!(
            f,
            "{}",
            self.value.if_supports_color(self.stream, |v| v.style(style))
        )
    }
}

/// Tones for anything printable
pub trait Stylize: Display {
    /// Action names, ids, versions
    fn accent(&self) -> Painted<&Self> {
        Painted::new(self, Tone::Accent)
    }

    /// Completed work
    fn success(&self) -> Painted<&Self> {
        Painted::new(self, Tone::Success)
    }

    /// Disabled actions and things the user should look at
    fn warn(&self) -> Painted<&Self> {
        Painted::new(self, Tone::Warn)
    }

    /// Hints and secondary details
    fn muted(&self) -> Painted<&Self> {
        Painted::new(self, Tone::Muted)
    }

    /// Headings
    fn emphasis(&self) -> Painted<&Self> {
        Painted::new(self, Tone::Emphasis)
    }
}

impl<T: Display + ?Sized> Stylize for T {}

/// Green tick
pub const fn check() -> Painted<&'static str> {
    Painted::new("✓", Tone::Success)
}

/// Red cross
pub const fn cross() -> Painted<&'static str> {
    Painted::new("✗", Tone::Failure)
}

/// Cyan arrow in front of an action
pub const fn arrow() -> Painted<&'static str> {
    Painted::new("→", Tone::Accent)
}

/// Dim list bullet
pub const fn bullet() -> Painted<&'static str> {
    Painted::new("○", Tone::Muted)
}

/// `url` as an OSC 8 link on stdout when the terminal supports it
pub fn hyperlink(url: &str) -> String {
    if supports_hyperlinks::on(supports_hyperlinks::Stream::Stdout) {
        terminal_link::Link::new(url, url).to_string()
    } else {
        url.to_string()
    }
}

/// Spinner shown while a payload is on its way
pub fn spinner_style() -> ProgressStyle {
    ProgressStyle::with_template("{spinner:.cyan} {msg}")
        .unwrap_or_else(|_| ProgressStyle::default_spinner())
        .tick_chars(SPINNER_TICKS)
}
