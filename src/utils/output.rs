use crate::core::data::{ClassifiedFrame, Frame, FrameKind, TraceSummary};
use colored::*;

pub struct OutputStyle;

impl OutputStyle {
    pub fn application(text: &str) -> ColoredString {
        text.bright_green()
    }

    pub fn framework(text: &str) -> ColoredString {
        text.dimmed()
    }

    pub fn title(text: &str) -> ColoredString {
        text.bright_blue().bold()
    }

    pub fn label(text: &str) -> ColoredString {
        text.cyan()
    }

    pub fn success(text: &str) -> ColoredString {
        text.green()
    }

    pub fn error(text: &str) -> ColoredString {
        text.red()
    }

    pub fn warning(text: &str) -> ColoredString {
        text.yellow()
    }

    pub fn muted(text: &str) -> ColoredString {
        text.dimmed()
    }

    pub fn header_separator() -> String {
        "═".repeat(50)
    }

    pub fn print_header(title: &str) {
        println!("{}", Self::title(title));
        println!("{}", Self::header_separator());
    }

    pub fn print_field(label: &str, value: &str) {
        println!("{:>16}: {}", Self::label(label), value);
    }

    pub fn frame_kind(frame: &str, kind: FrameKind) -> ColoredString {
        match kind {
            FrameKind::Application => Self::application(frame),
            FrameKind::Framework => Self::framework(frame),
        }
    }
}

/// Plain frame list, one per line
pub fn render_frames(frames: &[Frame]) -> String {
    frames
        .iter()
        .map(|frame| format!("{}\n", frame))
        .collect()
}

/// Every frame prefixed with its kind, application frames highlighted
pub fn render_classified(frames: &[ClassifiedFrame]) -> String {
    frames
        .iter()
        .map(|f| {
            let tag = format!("[{:<9}]", f.kind.label());
            format!(
                "{} {}\n",
                OutputStyle::muted(&tag),
                OutputStyle::frame_kind(f.frame.as_str(), f.kind)
            )
        })
        .collect()
}

pub fn render_summary(summary: &TraceSummary) -> String {
    let boundary = summary
        .boundary
        .map(|i| format!(", first framework frame at #{}", i))
        .unwrap_or_default();

    format!(
        "{} frames: {} application, {} framework{}",
        summary.total, summary.application, summary.framework, boundary
    )
}
