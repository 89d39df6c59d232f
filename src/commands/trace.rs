use crate::cli::{TraceArgs, View};
use crate::config::{Config, OutputFormat, SubstitutionConfig};
use crate::core::data::{ClassifiedFrame, FrameKind, Trace, TraceSummary};
use crate::core::operations::BacktraceCleaner;
use crate::utils::format::TraceReport;
use crate::utils::input::read_trace;
use crate::utils::output::{render_classified, render_frames, render_summary};
use crate::utils::{FlowResult, handle_flow};
use anyhow::{Context, Result};
use std::io::Write;

pub fn handle_trace_command(config: &Config, args: &TraceArgs, view: View) -> Result<()> {
    if args.no_color || !config.general.color {
        colored::control::set_override(false);
    }

    let extra = args
        .substitutions
        .iter()
        .map(|arg| SubstitutionConfig::parse_arg(arg))
        .collect::<Result<Vec<_>, _>>()?;
    let cleaner = config.build_cleaner(&extra)?;
    tracing::debug!(?cleaner, view = view.name(), "built cleaner");

    let trace = read_trace(args.file.as_deref())?;
    let format = args.format.unwrap_or(config.general.format);
    let (output, is_empty) = render_view(&cleaner, &trace, view, format)?;

    let mut stdout = std::io::stdout().lock();
    stdout
        .write_all(output.as_bytes())
        .context("Failed to write output")?;

    if is_empty && format == OutputFormat::Text && !trace.is_empty() {
        handle_flow(FlowResult::EmptyTrace {
            view: view.name().to_string(),
        });
    }

    Ok(())
}

/// Render one view of `trace`. The flag tells whether the view came out empty.
pub fn render_view(
    cleaner: &BacktraceCleaner,
    trace: &Trace,
    view: View,
    format: OutputFormat,
) -> Result<(String, bool)> {
    let classified = cleaner.classify(trace);
    let summary = TraceSummary::from_classified(&classified);

    // Filtering the classified frames keeps each frame's index in the cleaned trace
    let selected: Vec<ClassifiedFrame> = match view {
        View::Clean | View::Classify => classified,
        View::Application => only(classified, FrameKind::Application),
        View::Framework => only(classified, FrameKind::Framework),
    };
    let is_empty = selected.is_empty();

    let output = match format {
        OutputFormat::Json => {
            let mut json = TraceReport::new(view.name(), &summary, &selected)
                .to_json()
                .context("Failed to serialize report")?;
            json.push('\n');
            json
        }
        OutputFormat::Text => match view {
            View::Classify => {
                let mut text = render_classified(&selected);
                text.push_str(&render_summary(&summary));
                text.push('\n');
                text
            }
            _ => {
                let frames: Vec<_> = selected.into_iter().map(|f| f.frame).collect();
                render_frames(&frames)
            }
        },
    };

    Ok((output, is_empty))
}

fn only(frames: Vec<ClassifiedFrame>, kind: FrameKind) -> Vec<ClassifiedFrame> {
    frames.into_iter().filter(|f| f.kind == kind).collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample() -> Trace {
        Trace::parse(
            "/Users/dev/project/app/a.rb:1:in `index'\n\
             \tfrom /Users/dev/project/vendor/rails/lib/x.rb:2\n\
             \tfrom /Users/dev/project/app/b.rb:3\n",
        )
    }

    fn cleaner() -> BacktraceCleaner {
        let config = Config::default();
        let extra = vec![SubstitutionConfig::parse_arg("/Users/dev/project/=").unwrap()];
        config.build_cleaner(&extra).unwrap()
    }

    #[test]
    fn test_application_view_text() {
        let (out, empty) =
            render_view(&cleaner(), &sample(), View::Application, OutputFormat::Text).unwrap();

        assert_eq!(out, "app/a.rb:1:in `index'\napp/b.rb:3\n");
        assert!(!empty);
    }

    #[test]
    fn test_framework_view_text() {
        let (out, _) =
            render_view(&cleaner(), &sample(), View::Framework, OutputFormat::Text).unwrap();

        assert_eq!(out, "vendor/rails/lib/x.rb:2\n");
    }

    #[test]
    fn test_application_view_matches_application_frames() {
        let cleaner = cleaner();
        let (out, _) =
            render_view(&cleaner, &sample(), View::Application, OutputFormat::Text).unwrap();

        let expected: String = cleaner
            .application_frames(&sample())
            .iter()
            .map(|f| format!("{}\n", f))
            .collect();
        assert_eq!(out, expected);
    }

    #[test]
    fn test_json_indices_point_into_cleaned_trace() {
        let (out, _) =
            render_view(&cleaner(), &sample(), View::Application, OutputFormat::Json).unwrap();
        let value: serde_json::Value = serde_json::from_str(&out).unwrap();

        assert_eq!(value["summary"]["boundary"], 1);
        assert_eq!(value["frames"][0]["index"], 0);
        assert_eq!(value["frames"][1]["index"], 2);

        let (out, _) =
            render_view(&cleaner(), &sample(), View::Framework, OutputFormat::Json).unwrap();
        let value: serde_json::Value = serde_json::from_str(&out).unwrap();
        assert_eq!(value["frames"][0]["index"], value["summary"]["boundary"]);
    }

    #[test]
    fn test_clean_view_keeps_everything() {
        let (out, _) = render_view(&cleaner(), &sample(), View::Clean, OutputFormat::Text).unwrap();

        assert_eq!(out.lines().count(), 3);
    }

    #[test]
    fn test_application_view_empty_for_framework_only_trace() {
        let trace = Trace::parse("vendor/rails/lib/a.rb:1\nvendor/rails/lib/b.rb:2\n");
        let (out, empty) =
            render_view(&cleaner(), &trace, View::Application, OutputFormat::Text).unwrap();

        assert!(out.is_empty());
        assert!(empty);
    }

    #[test]
    fn test_classify_view_json() {
        let (out, _) =
            render_view(&cleaner(), &sample(), View::Classify, OutputFormat::Json).unwrap();
        let value: serde_json::Value = serde_json::from_str(&out).unwrap();

        assert_eq!(value["view"], "classify");
        assert_eq!(value["frames"].as_array().unwrap().len(), 3);
        assert_eq!(value["frames"][1]["kind"], "framework");
        assert_eq!(value["summary"]["application"], 2);
    }
}
