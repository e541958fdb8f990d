use colored::*;
use hashkit_core::error::{IoErrorKind, ValidationError};
use hashkit_core::{Converter, HashAlgorithm};
use std::fmt;

/// CLI-specific error type with semantic exit codes
#[derive(Debug)]
pub struct CliError {
    /// The main error message
    message: String,

    /// Error category for exit code determination
    category: ErrorCategory,

    /// Messages of the underlying causes, outermost first
    causes: Vec<String>,

    /// Suggestions for recovery
    pub suggestions: Vec<String>,
}

/// Error categories that map to exit codes
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum ErrorCategory {
    General,
    Misuse,
    Filesystem,
}

/// Semantic exit codes for the CLI
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[repr(i32)]
pub enum ExitCode {
    Success = 0,
    GeneralError = 1,
    Misuse = 2,
    FilesystemError = 4,
}

impl CliError {
    fn new(message: &str, category: ErrorCategory) -> Self {
        Self {
            message: message.to_string(),
            category,
            causes: Vec::new(),
            suggestions: Vec::new(),
        }
    }

    /// Create a general error
    pub fn general(message: &str) -> Self {
        Self::new(message, ErrorCategory::General)
    }

    /// Create a command misuse error
    pub fn misuse(message: &str) -> Self {
        let mut error = Self::new(message, ErrorCategory::Misuse);
        error
            .suggestions
            .push("Run 'hashkit --help' for usage information".to_string());
        error
    }

    /// Create a filesystem error
    pub fn filesystem(message: &str) -> Self {
        let mut error = Self::new(message, ErrorCategory::Filesystem);

        if message.contains("not found") {
            error
                .suggestions
                .push("Check that the path exists and is spelled correctly".to_string());
        } else if message.contains("Not a regular file") {
            error
                .suggestions
                .push("Only regular files can be hashed; pass a file, not a directory".to_string());
        } else if message.to_lowercase().contains("permission") {
            error.suggestions.push("Check file permissions".to_string());
        }

        error
    }

    /// Classify a library error
    pub fn from_core(error: &hashkit_core::Error) -> Self {
        use hashkit_core::Error;

        let message = error.to_string();
        match error {
            Error::Io(io_err) => match io_err.kind {
                IoErrorKind::FileNotFound
                | IoErrorKind::NotAFile
                | IoErrorKind::PermissionDenied => Self::filesystem(&message),
                IoErrorKind::Other => Self::general(&message),
            },
            Error::Validation(ValidationError::UnsupportedAlgorithm { name }) => {
                let mut cli_error = Self::misuse(&message);
                if let Some(known) = closest_name(name) {
                    cli_error
                        .suggestions
                        .insert(0, format!("Did you mean '{known}'?"));
                }
                cli_error
                    .suggestions
                    .push("Run 'hashkit algorithms' to list what is available".to_string());
                cli_error
            }
            Error::Validation(ValidationError::InvalidChunkSize { .. }) => Self::misuse(&message),
            Error::Validation(ValidationError::OperationInProgress) => Self::general(&message),
            Error::Conversion(_) => Self::misuse(&message),
            Error::Cancelled | Error::Internal(_) => Self::general(&message),
        }
    }

    /// Get the exit code for this error
    pub fn exit_code(&self) -> ExitCode {
        match self.category {
            ErrorCategory::General => ExitCode::GeneralError,
            ErrorCategory::Misuse => ExitCode::Misuse,
            ErrorCategory::Filesystem => ExitCode::FilesystemError,
        }
    }

    /// Format the error for user display
    pub fn format_for_user(&self, debug: bool) -> String {
        let mut output = String::new();

        let prefix = match self.category {
            ErrorCategory::General => "Error".red(),
            ErrorCategory::Misuse => "Usage Error".yellow(),
            ErrorCategory::Filesystem => "File Error".red(),
        };

        output.push_str(&format!("{}: {}\n", prefix, self.message));

        // Context is always useful; the full chain only in debug mode
        let shown = if debug {
            self.causes.len()
        } else {
            self.causes.len().min(1)
        };
        if shown > 0 {
            output.push_str("\nCaused by:\n");
            for (level, cause) in self.causes.iter().take(shown).enumerate() {
                output.push_str(&format!("  {}: {cause}\n", level + 1));
            }
        }

        if !self.suggestions.is_empty() {
            output.push_str("\nSuggestions:\n");
            for suggestion in &self.suggestions {
                output.push_str(&format!("  • {suggestion}\n"));
            }
        }

        output
    }
}

impl fmt::Display for CliError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{}: {}",
            match self.category {
                ErrorCategory::General => "Error",
                ErrorCategory::Misuse => "Usage Error",
                ErrorCategory::Filesystem => "File Error",
            },
            self.message
        )
    }
}

impl std::error::Error for CliError {}

/// Convert anyhow errors to CLI errors
///
/// The first library error found in the chain decides the category; the
/// outer context message becomes the headline.
impl From<anyhow::Error> for CliError {
    fn from(error: anyhow::Error) -> Self {
        let core_error = error
            .chain()
            .find_map(|cause| cause.downcast_ref::<hashkit_core::Error>());

        let mut cli_error = match core_error {
            Some(core) => Self::from_core(core),
            None => Self::general(&error.to_string()),
        };

        let headline = error.to_string();
        if headline != cli_error.message {
            let detail = std::mem::replace(&mut cli_error.message, headline);
            cli_error.causes.push(detail);
        }
        for cause in error.chain().skip(1).map(|cause| cause.to_string()) {
            if !cli_error.causes.contains(&cause) {
                cli_error.causes.push(cause);
            }
        }
        cli_error
    }
}

/// Closest known algorithm or converter name, if any is a plausible typo
fn closest_name(name: &str) -> Option<String> {
    let wanted = name.to_lowercase();
    HashAlgorithm::ALL
        .iter()
        .map(|algorithm| algorithm.to_string())
        .chain(Converter::ALL.iter().map(|converter| converter.to_string()))
        .map(|known| (levenshtein_distance(&wanted, &known), known))
        .filter(|(distance, _)| *distance <= 2)
        .min_by_key(|(distance, _)| *distance)
        .map(|(_, known)| known)
}

/// Simple Levenshtein distance for name suggestions
fn levenshtein_distance(s1: &str, s2: &str) -> usize {
    let s1_chars: Vec<char> = s1.chars().collect();
    let s2_chars: Vec<char> = s2.chars().collect();
    let len1 = s1_chars.len();
    let len2 = s2_chars.len();
    let mut matrix = vec![vec![0; len2 + 1]; len1 + 1];

    for (i, row) in matrix.iter_mut().enumerate().take(len1 + 1) {
        row[0] = i;
    }
    for (j, cell) in matrix[0].iter_mut().enumerate().take(len2 + 1) {
        *cell = j;
    }

    for (i, c1) in s1_chars.iter().enumerate() {
        let i1 = i + 1;
        for (j, c2) in s2_chars.iter().enumerate() {
            let j1 = j + 1;
            let cost = if c1 == c2 { 0 } else { 1 };
            matrix[i1][j1] = std::cmp::min(
                std::cmp::min(matrix[i][j1] + 1, matrix[i1][j] + 1),
                matrix[i][j] + cost,
            );
        }
    }

    matrix[len1][len2]
}
