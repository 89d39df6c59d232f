//! Property-based tests for trace cleaning and classification

use proptest::prelude::*;
use tracesift::{BacktraceCleaner, RegexMatcher, SubstitutionRule, Trace};

fn cleaner() -> BacktraceCleaner {
    BacktraceCleaner::new(RegexMatcher::default())
        .with_rule(SubstitutionRule::new("/Users/dev/project/", "").unwrap())
}

/// Frame-ish strings: path segments, dots, separators, line numbers, methods
fn frame_strategy() -> impl Strategy<Value = String> {
    let segment = prop_oneof![
        Just("app".to_string()),
        Just("vendor".to_string()),
        Just("rails".to_string()),
        Just("lib".to_string()),
        Just(".".to_string()),
        Just("..".to_string()),
        Just("".to_string()),
        "[a-z_]{1,6}(\\.rb)?",
    ];
    (
        prop::option::of(prop_oneof![
            Just("/"),
            Just("/Users/dev/project/"),
            Just("/Users/dev/./project/"),
            Just("/Users//dev/project/../project/"),
            Just("\\"),
        ]),
        prop::collection::vec(segment, 1..6),
        prop_oneof![Just("/"), Just("\\"), Just("//")],
        0u32..500,
        prop::option::of("[a-z_]{1,8}"),
    )
        .prop_map(|(root, segments, sep, line, method)| {
            let mut frame = root.unwrap_or_default().to_string();
            frame.push_str(&segments.join(sep));
            frame.push_str(&format!(":{}", line));
            if let Some(method) = method {
                frame.push_str(&format!(":in `{}'", method));
            }
            frame
        })
}

fn trace_strategy() -> impl Strategy<Value = Vec<String>> {
    prop::collection::vec(
        prop_oneof![4 => frame_strategy(), 1 => "[ -~]{0,30}"],
        0..12,
    )
}

proptest! {
    #[test]
    fn clean_preserves_length(lines in trace_strategy()) {
        let trace: Trace = lines.iter().map(String::as_str).collect();
        prop_assert_eq!(cleaner().clean(&trace).len(), trace.len());
    }

    #[test]
    fn clean_is_idempotent(lines in trace_strategy()) {
        let cleaner = cleaner();
        let trace: Trace = lines.iter().map(String::as_str).collect();

        let once = cleaner.clean(&trace);
        let twice = cleaner.clean(&once);
        prop_assert_eq!(twice, once);
    }

    #[test]
    fn clean_preserves_order(lines in trace_strategy()) {
        let cleaner = cleaner();
        let trace: Trace = lines.iter().map(String::as_str).collect();
        let cleaned = cleaner.clean(&trace);

        for (raw, clean) in trace.iter().zip(cleaned.iter()) {
            prop_assert_eq!(&cleaner.clean_frame(raw), clean);
        }
    }

    #[test]
    fn framework_frames_are_the_matching_subsequence(lines in trace_strategy()) {
        let cleaner = cleaner();
        let trace: Trace = lines.iter().map(String::as_str).collect();

        let expected: Trace = cleaner
            .clean(&trace)
            .into_iter()
            .filter(|f| cleaner.matcher().matches(f.as_str()))
            .collect();
        prop_assert_eq!(cleaner.framework_frames(&trace), expected);
    }

    #[test]
    fn application_and_framework_frames_partition_clean(lines in trace_strategy()) {
        let cleaner = cleaner();
        let trace: Trace = lines.iter().map(String::as_str).collect();

        let cleaned = cleaner.clean(&trace);
        let mut app = cleaner.application_frames(&trace).into_iter().peekable();
        let mut framework = cleaner.framework_frames(&trace).into_iter().peekable();

        // Walking the cleaned trace consumes both views in order, with nothing left over
        for frame in cleaned {
            if app.peek() == Some(&frame) && !cleaner.is_framework(&frame) {
                app.next();
            } else {
                let next = framework.next();
                prop_assert_eq!(next.as_ref(), Some(&frame));
            }
        }
        prop_assert!(app.next().is_none());
        prop_assert!(framework.next().is_none());
    }
}
