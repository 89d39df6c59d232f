use crate::utils::output::OutputStyle;
use thiserror::Error;

#[derive(Error, Debug, Clone)]
pub enum AppError {
    #[error("Config error: {0}")]
    Config(String),

    #[error("Invalid pattern: {0}")]
    Pattern(String),

    #[error("System error: {0}")]
    System(String),

    #[error("IO error: {0}")]
    Io(String),
}

/// Result type alias for consistent error handling across the application
pub type AppResult<T> = Result<T, AppError>;

impl From<std::io::Error> for AppError {
    fn from(err: std::io::Error) -> Self {
        AppError::Io(err.to_string())
    }
}

impl From<regex::Error> for AppError {
    fn from(err: regex::Error) -> Self {
        AppError::Pattern(err.to_string())
    }
}

pub enum FlowResult {
    EmptyTrace { view: String },
    Success(String),
}

pub fn report_error(err: &anyhow::Error) {
    match err.downcast_ref::<AppError>() {
        Some(AppError::Config(msg)) => {
            eprintln!("⚙️  {}", OutputStyle::error(&format!("Config: {}", msg)));
        }
        Some(AppError::Pattern(msg)) => {
            eprintln!("⚠️  {}", OutputStyle::warning(&format!("Pattern: {}", msg)));
        }
        Some(AppError::Io(msg)) | Some(AppError::System(msg)) => {
            eprintln!("❌ {}", OutputStyle::error(msg));
        }
        None => {
            eprintln!("❌ {}", OutputStyle::error(&format!("{:#}", err)));
        }
    }
}

pub fn handle_flow(flow: FlowResult) {
    match flow {
        FlowResult::EmptyTrace { view } => {
            let msg = format!("No {} frames found", view);
            eprintln!("{}", OutputStyle::muted(&msg));
        }
        FlowResult::Success(msg) => {
            println!("✅ {}", OutputStyle::success(&msg));
        }
    }
}
