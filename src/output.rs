use serde::{Deserialize, Serialize};

/// How the frontend should paint a line. Serialized lower-case so the
/// values double as the CSS class names of the terminal log.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Style {
    Plain,
    Info,
    Success,
    Warning,
    Error,
    Folder,
    File,
    Prompt,
    Heading,
}

/// One rendered line of terminal output. `text` is plain text, never markup.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct OutputLine {
    pub text: String,
    pub style: Style,
}

impl OutputLine {
    pub fn new(text: impl Into<String>, style: Style) -> Self {
        Self {
            text: text.into(),
            style,
        }
    }

    pub fn plain(text: impl Into<String>) -> Self {
        Self::new(text, Style::Plain)
    }

    pub fn info(text: impl Into<String>) -> Self {
        Self::new(text, Style::Info)
    }

    pub fn success(text: impl Into<String>) -> Self {
        Self::new(text, Style::Success)
    }

    pub fn warning(text: impl Into<String>) -> Self {
        Self::new(text, Style::Warning)
    }

    pub fn error(text: impl Into<String>) -> Self {
        Self::new(text, Style::Error)
    }

    pub fn heading(text: impl Into<String>) -> Self {
        Self::new(text, Style::Heading)
    }

    pub fn blank() -> Self {
        Self::plain("")
    }

    /// The echoed `user@host:path$ input` line.
    pub fn prompt_echo(prompt: &str, input: &str) -> Self {
        Self::new(format!("{} {}", prompt, input), Style::Prompt)
    }
}

/// Lines produced once a deferred command settles. `delayed` lines are
/// rendered `after_ms` milliseconds after `lines` (the joke punchline).
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct DeferredOutput {
    pub lines: Vec<OutputLine>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub delayed: Option<DelayedLines>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DelayedLines {
    pub after_ms: u32,
    pub lines: Vec<OutputLine>,
}

impl DeferredOutput {
    pub fn lines(lines: Vec<OutputLine>) -> Self {
        Self {
            lines,
            delayed: None,
        }
    }

    pub fn then_after(mut self, after_ms: u32, lines: Vec<OutputLine>) -> Self {
        self.delayed = Some(DelayedLines { after_ms, lines });
        self
    }

    /// Every line in render order, delayed ones last.
    pub fn all_lines(&self) -> impl Iterator<Item = &OutputLine> {
        self.lines
            .iter()
            .chain(self.delayed.iter().flat_map(|d| d.lines.iter()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_style_serializes_as_css_class() {
        let json = serde_json::to_string(&OutputLine::new("x", Style::Folder)).unwrap();
        assert_eq!(json, r#"{"text":"x","style":"folder"}"#);
    }

    #[test]
    fn test_deferred_all_lines_keeps_order() {
        let out = DeferredOutput::lines(vec![OutputLine::plain("setup")])
            .then_after(1000, vec![OutputLine::info("punchline")]);
        let texts: Vec<&str> = out.all_lines().map(|l| l.text.as_str()).collect();
        assert_eq!(texts, vec!["setup", "punchline"]);
    }
}
