//! Core data structures for backtrace processing
//!
//! Frames are kept as the free text the runtime produced. Structure is only
//! recovered on demand, for display.

use once_cell::sync::Lazy;
use regex::Regex;
use serde::{Deserialize, Serialize};
use std::fmt;

static LOCATION_PATTERN: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"^(?P<file>[^:]+(?::[\\/][^:]*)?):(?P<line>\d+)(?::in [`'](?P<method>.+)')?")
        .expect("Failed to compile frame location regex")
});

/// A single stack entry, e.g. ``app/models/user.rb:10:in `save'``
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Frame(String);

/// File, line and method pulled out of a conventionally formatted frame
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct FrameLocation {
    pub file: String,
    pub line: u32,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub method: Option<String>,
}

/// An ordered sequence of frames, innermost first
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Trace {
    frames: Vec<Frame>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum FrameKind {
    Application,
    Framework,
}

/// A cleaned frame tagged with its classification
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ClassifiedFrame {
    /// Position in the cleaned trace
    pub index: usize,
    pub frame: Frame,
    pub kind: FrameKind,
}

/// Frame counts for a cleaned trace
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct TraceSummary {
    pub total: usize,
    pub application: usize,
    pub framework: usize,
    /// Index of the first framework frame, if there is one
    pub boundary: Option<usize>,
}

impl Frame {
    pub fn new(text: impl Into<String>) -> Self {
        Self(text.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    pub fn into_string(self) -> String {
        self.0
    }

    /// Parse the `path:line[:in `method']` layout, if the frame follows it
    pub fn location(&self) -> Option<FrameLocation> {
        let caps = LOCATION_PATTERN.captures(&self.0)?;
        let line = caps.name("line")?.as_str().parse().ok()?;

        Some(FrameLocation {
            file: caps["file"].to_string(),
            line,
            method: caps.name("method").map(|m| m.as_str().to_string()),
        })
    }
}

impl fmt::Display for Frame {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl AsRef<str> for Frame {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

impl From<String> for Frame {
    fn from(text: String) -> Self {
        Self(text)
    }
}

impl From<&str> for Frame {
    fn from(text: &str) -> Self {
        Self(text.to_string())
    }
}

impl Trace {
    pub fn new(frames: Vec<Frame>) -> Self {
        Self { frames }
    }

    /// Build a trace from captured text, one frame per non-blank line.
    ///
    /// Interpreters print outer frames as `from path:line`; the marker is
    /// dropped so every frame has the same shape.
    pub fn parse(text: &str) -> Self {
        text.lines()
            .map(str::trim)
            .filter(|line| !line.is_empty())
            .map(|line| line.strip_prefix("from ").map(str::trim_start).unwrap_or(line))
            .map(Frame::from)
            .collect()
    }

    pub fn frames(&self) -> &[Frame] {
        &self.frames
    }

    pub fn into_frames(self) -> Vec<Frame> {
        self.frames
    }

    pub fn len(&self) -> usize {
        self.frames.len()
    }

    pub fn is_empty(&self) -> bool {
        self.frames.is_empty()
    }

    pub fn iter(&self) -> std::slice::Iter<'_, Frame> {
        self.frames.iter()
    }

    /// Frame text only, in order
    pub fn lines(&self) -> Vec<&str> {
        self.frames.iter().map(Frame::as_str).collect()
    }
}

impl<F: Into<Frame>> FromIterator<F> for Trace {
    fn from_iter<I: IntoIterator<Item = F>>(iter: I) -> Self {
        Self {
            frames: iter.into_iter().map(Into::into).collect(),
        }
    }
}

impl IntoIterator for Trace {
    type Item = Frame;
    type IntoIter = std::vec::IntoIter<Frame>;

    fn into_iter(self) -> Self::IntoIter {
        self.frames.into_iter()
    }
}

impl<'a> IntoIterator for &'a Trace {
    type Item = &'a Frame;
    type IntoIter = std::slice::Iter<'a, Frame>;

    fn into_iter(self) -> Self::IntoIter {
        self.frames.iter()
    }
}

impl FrameKind {
    pub fn label(&self) -> &'static str {
        match self {
            FrameKind::Application => "app",
            FrameKind::Framework => "framework",
        }
    }
}

impl TraceSummary {
    pub fn from_classified(frames: &[ClassifiedFrame]) -> Self {
        let framework = frames
            .iter()
            .filter(|f| f.kind == FrameKind::Framework)
            .count();

        Self {
            total: frames.len(),
            application: frames.len() - framework,
            framework,
            boundary: frames
                .iter()
                .find(|f| f.kind == FrameKind::Framework)
                .map(|f| f.index),
        }
    }
}
