//! Framework frame matchers
//!
//! Two strategies: a regular expression searched anywhere in the frame, or a
//! plain keyword list.

use crate::core::traits::FrameMatcher;
use crate::utils::error::AppResult;
use regex::{Regex, RegexBuilder};

/// Framework markers used when nothing else is configured
pub const DEFAULT_FRAMEWORK_PATTERN: &str = r"generated|vendor|dispatch|ruby|script/\w+";

/// Unanchored regular expression search
#[derive(Debug, Clone)]
pub struct RegexMatcher {
    regex: Regex,
}

/// Matches when any keyword occurs in the frame
#[derive(Debug, Clone)]
pub struct SubstringMatcher {
    keywords: Vec<String>,
    case_sensitive: bool,
}

impl RegexMatcher {
    pub fn new(pattern: &str) -> AppResult<Self> {
        Ok(Self {
            regex: Regex::new(pattern)?,
        })
    }

    pub fn with_case(pattern: &str, case_sensitive: bool) -> AppResult<Self> {
        let regex = RegexBuilder::new(pattern)
            .case_insensitive(!case_sensitive)
            .build()?;
        Ok(Self { regex })
    }

    pub fn from_regex(regex: Regex) -> Self {
        Self { regex }
    }

    pub fn as_str(&self) -> &str {
        self.regex.as_str()
    }
}

impl Default for RegexMatcher {
    fn default() -> Self {
        Self::new(DEFAULT_FRAMEWORK_PATTERN).expect("default framework pattern is valid")
    }
}

impl FrameMatcher for RegexMatcher {
    fn matches(&self, frame: &str) -> bool {
        self.regex.is_match(frame)
    }

    fn describe(&self) -> String {
        format!("regex /{}/", self.regex.as_str())
    }
}

impl SubstringMatcher {
    pub fn new<I, S>(keywords: I, case_sensitive: bool) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let keywords = keywords
            .into_iter()
            .map(Into::into)
            .filter(|k: &String| !k.is_empty())
            .map(|k| if case_sensitive { k } else { k.to_lowercase() })
            .collect();

        Self {
            keywords,
            case_sensitive,
        }
    }

    pub fn keywords(&self) -> &[String] {
        &self.keywords
    }
}

impl FrameMatcher for SubstringMatcher {
    fn matches(&self, frame: &str) -> bool {
        if self.case_sensitive {
            self.keywords.iter().any(|k| frame.contains(k.as_str()))
        } else {
            let frame = frame.to_lowercase();
            self.keywords.iter().any(|k| frame.contains(k.as_str()))
        }
    }

    fn describe(&self) -> String {
        let case = if self.case_sensitive { "" } else { " (ignore case)" };
        format!("keywords [{}]{}", self.keywords.join(", "), case)
    }
}
