use crate::core::data::Trace;
use crate::utils::error::{AppError, AppResult};
use std::io::Read;
use std::path::Path;

/// Read a trace from `path`, or from stdin when `path` is `None` or `-`
pub fn read_trace(path: Option<&Path>) -> AppResult<Trace> {
    let text = match path {
        Some(p) if p != Path::new("-") => std::fs::read_to_string(p)
            .map_err(|e| AppError::Io(format!("Failed to read {}: {}", p.display(), e)))?,
        _ => {
            let mut buffer = String::new();
            std::io::stdin()
                .read_to_string(&mut buffer)
                .map_err(|e| AppError::Io(format!("Failed to read stdin: {}", e)))?;
            buffer
        }
    };

    let trace = Trace::parse(&text);
    tracing::debug!(frames = trace.len(), "read trace");
    Ok(trace)
}
