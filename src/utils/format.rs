use crate::core::data::{ClassifiedFrame, FrameKind, FrameLocation, TraceSummary};
use chrono::{DateTime, Utc};
use serde::{Serialize, Serializer};

const FORMAT: &str = "%Y-%m-%d %H:%M:%S";

/// JSON document printed by `--format json`
#[derive(Debug, Serialize)]
pub struct TraceReport<'a> {
    #[serde(serialize_with = "serialize")]
    pub generated_at: DateTime<Utc>,
    pub view: &'a str,
    pub summary: &'a TraceSummary,
    pub frames: Vec<ReportFrame<'a>>,
}

#[derive(Debug, Serialize)]
pub struct ReportFrame<'a> {
    pub index: usize,
    pub frame: &'a str,
    pub kind: FrameKind,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub location: Option<FrameLocation>,
}

impl<'a> TraceReport<'a> {
    /// `frames` is the selected view; indices refer to positions in the cleaned trace
    pub fn new(view: &'a str, summary: &'a TraceSummary, frames: &'a [ClassifiedFrame]) -> Self {
        Self {
            generated_at: Utc::now(),
            view,
            summary,
            frames: frames
                .iter()
                .map(|f| ReportFrame {
                    index: f.index,
                    frame: f.frame.as_str(),
                    kind: f.kind,
                    location: f.frame.location(),
                })
                .collect(),
        }
    }

    pub fn to_json(&self) -> serde_json::Result<String> {
        serde_json::to_string_pretty(self)
    }
}

pub fn serialize<S>(date: &DateTime<Utc>, serializer: S) -> Result<S::Ok, S::Error>
where
    S: Serializer,
{
    serializer.serialize_str(&format_datetime(date))
}

pub fn format_datetime(dt: &DateTime<Utc>) -> String {
    dt.format(FORMAT).to_string()
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    #[test]
    fn test_format_datetime() {
        let dt = Utc.with_ymd_and_hms(2024, 3, 9, 14, 5, 0).unwrap();
        assert_eq!(format_datetime(&dt), "2024-03-09 14:05:00");
    }

    #[test]
    fn test_report_json_shape() {
        let frames = vec![
            ClassifiedFrame {
                index: 0,
                frame: "app/a.rb:1:in `run'".into(),
                kind: FrameKind::Application,
            },
            ClassifiedFrame { index: 1, frame: "<internal:kernel>".into(), kind: FrameKind::Framework },
        ];
        let summary = TraceSummary::from_classified(&frames);
        let report = TraceReport::new("classify", &summary, &frames);

        let value: serde_json::Value = serde_json::from_str(&report.to_json().unwrap()).unwrap();
        assert_eq!(value["view"], "classify");
        assert_eq!(value["summary"]["total"], 2);
        assert_eq!(value["summary"]["boundary"], 1);
        assert_eq!(value["frames"][0]["kind"], "application");
        assert_eq!(value["frames"][0]["location"]["file"], "app/a.rb");
        assert_eq!(value["frames"][0]["location"]["method"], "run");
        assert_eq!(value["frames"][1]["kind"], "framework");
        assert!(value["frames"][1].get("location").is_none());
    }
}
