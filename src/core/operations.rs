//! Backtrace cleaning and classification
//!
//! `BacktraceCleaner` owns the substitution rules and the framework matcher.
//! Rules are registered while the cleaner is being set up; afterwards every
//! operation takes `&self`, so one cleaner can be shared freely.

use crate::core::{
    data::{ClassifiedFrame, Frame, FrameKind, Trace, TraceSummary},
    matcher::RegexMatcher,
    path,
    traits::FrameMatcher,
};
use crate::utils::error::AppResult;
use regex::Regex;
use std::fmt;
use tracing::{debug, trace};

/// A rewrite applied to every frame before path cleanup
#[derive(Debug, Clone)]
pub struct SubstitutionRule {
    pattern: Regex,
    replacement: String,
}

impl SubstitutionRule {
    /// Compile `pattern`. `replacement` may refer to capture groups (`$1`, `${name}`).
    pub fn new(pattern: &str, replacement: impl Into<String>) -> AppResult<Self> {
        Ok(Self {
            pattern: Regex::new(pattern)?,
            replacement: replacement.into(),
        })
    }

    pub fn from_regex(pattern: Regex, replacement: impl Into<String>) -> Self {
        Self {
            pattern,
            replacement: replacement.into(),
        }
    }

    pub fn pattern(&self) -> &str {
        self.pattern.as_str()
    }

    pub fn replacement(&self) -> &str {
        &self.replacement
    }

    fn apply(&self, text: &str) -> String {
        self.pattern
            .replace_all(text, self.replacement.as_str())
            .into_owned()
    }
}

/// Cleans traces and separates application frames from framework frames
pub struct BacktraceCleaner {
    rules: Vec<SubstitutionRule>,
    matcher: Box<dyn FrameMatcher>,
}

impl BacktraceCleaner {
    /// Create a cleaner with no substitution rules
    pub fn new(matcher: impl FrameMatcher + 'static) -> Self {
        Self {
            rules: Vec::new(),
            matcher: Box::new(matcher),
        }
    }

    /// Append a rule. Rules run in registration order.
    pub fn register_substitution(&mut self, pattern: Regex, replacement: impl Into<String>) {
        self.push_rule(SubstitutionRule::from_regex(pattern, replacement));
    }

    pub fn push_rule(&mut self, rule: SubstitutionRule) {
        debug!(
            pattern = rule.pattern(),
            replacement = rule.replacement(),
            position = self.rules.len(),
            "registered substitution rule"
        );
        self.rules.push(rule);
    }

    /// Builder form of [`push_rule`](Self::push_rule)
    pub fn with_rule(mut self, rule: SubstitutionRule) -> Self {
        self.push_rule(rule);
        self
    }

    pub fn rules(&self) -> &[SubstitutionRule] {
        &self.rules
    }

    pub fn matcher(&self) -> &dyn FrameMatcher {
        self.matcher.as_ref()
    }

    /// Rewrite every frame with the substitution rules, then clean its paths.
    ///
    /// Rules see already cleaned paths, so a rule written against the
    /// canonical form also matches `./` or `//` variants of it. Length and
    /// order are preserved, and cleaning a cleaned trace changes nothing.
    pub fn clean(&self, trace: &Trace) -> Trace {
        trace.iter().map(|frame| self.clean_frame(frame)).collect()
    }

    pub fn clean_frame(&self, frame: &Frame) -> Frame {
        let substituted = self
            .rules
            .iter()
            .fold(path::clean_within(frame.as_str()), |text, rule| rule.apply(&text));
        let cleaned = path::clean_within(&substituted);

        if cleaned != frame.as_str() {
            trace!(raw = frame.as_str(), cleaned = cleaned.as_str(), "rewrote frame");
        }
        Frame::from(cleaned)
    }

    pub fn is_framework(&self, frame: &Frame) -> bool {
        self.matcher.matches(frame.as_str())
    }

    /// Cleaned application frames.
    ///
    /// Application frames are always kept, including ones that appear again
    /// deeper in the stack after framework code. Framework frames are dropped
    /// from the first one onwards. A trace made only of framework frames
    /// yields an empty trace.
    pub fn application_frames(&self, trace: &Trace) -> Trace {
        let mut before_framework = true;
        let mut kept = Vec::new();

        for (index, frame) in self.clean(trace).into_iter().enumerate() {
            if self.is_framework(&frame) {
                if before_framework {
                    debug!(boundary = index, "first framework frame");
                    before_framework = false;
                }
                continue;
            }
            kept.push(frame);
        }

        Trace::new(kept)
    }

    /// Cleaned framework frames, in order
    pub fn framework_frames(&self, trace: &Trace) -> Trace {
        self.clean(trace)
            .into_iter()
            .filter(|frame| self.is_framework(frame))
            .collect()
    }

    /// Cleaned trace with every frame tagged
    pub fn classify(&self, trace: &Trace) -> Vec<ClassifiedFrame> {
        self.clean(trace)
            .into_iter()
            .enumerate()
            .map(|(index, frame)| {
                let kind = if self.is_framework(&frame) {
                    FrameKind::Framework
                } else {
                    FrameKind::Application
                };
                ClassifiedFrame { index, frame, kind }
            })
            .collect()
    }

    pub fn summarize(&self, trace: &Trace) -> TraceSummary {
        TraceSummary::from_classified(&self.classify(trace))
    }
}

impl Default for BacktraceCleaner {
    fn default() -> Self {
        Self::new(RegexMatcher::default())
    }
}

impl fmt::Debug for BacktraceCleaner {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("BacktraceCleaner")
            .field("rules", &self.rules)
            .field("matcher", &self.matcher.describe())
            .finish()
    }
}
