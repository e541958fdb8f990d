//! Terminal detection and capability utilities

use is_terminal::IsTerminal;
use std::env;
use std::io::{stderr, stdout};

/// Check if stdout is connected to an interactive terminal
pub fn is_interactive() -> bool {
    if !stdout().is_terminal() {
        return false;
    }

    // CI runners sometimes allocate a TTY
    if is_ci_environment() {
        return false;
    }

    env::var("DEBIAN_FRONTEND").unwrap_or_default() != "noninteractive"
}

/// Check if the terminal supports ANSI escape codes for colors and progress bars
pub fn supports_ansi() -> bool {
    if !is_interactive() {
        return false;
    }

    let term = env::var("TERM").unwrap_or_default();
    #[cfg(windows)]
    {
        // Modern Windows consoles leave TERM unset
        term != "dumb"
    }

    #[cfg(not(windows))]
    {
        !term.is_empty() && term != "dumb"
    }
}

/// Check if stderr is connected to a terminal (for progress display)
pub fn stderr_is_terminal() -> bool {
    stderr().is_terminal()
}

/// Detect if running in a CI environment
fn is_ci_environment() -> bool {
    let ci_vars = [
        "CI",
        "CONTINUOUS_INTEGRATION",
        "JENKINS_URL",
        "GITHUB_ACTIONS",
        "GITLAB_CI",
        "TRAVIS",
        "CIRCLECI",
        "BUILDKITE",
        "DRONE",
        "TEAMCITY_VERSION",
        "TF_BUILD", // Azure DevOps
    ];

    ci_vars.iter().any(|var| env::var(var).is_ok())
}

/// Determine if progress bars should be shown by default
///
/// Progress goes to stderr, so both streams must be terminals that
/// understand ANSI codes.
pub fn should_show_progress_by_default() -> bool {
    is_interactive() && stderr_is_terminal() && supports_ansi()
}

/// Whether colored output should be used
///
/// `NO_COLOR` (any value) always wins over the configuration.
pub fn colors_enabled(configured: bool) -> bool {
    configured && env::var_os("NO_COLOR").is_none() && supports_ansi()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_terminal_detection() {
        // Results depend on how the tests are run; they must not panic
        let _ = is_interactive();
        let _ = supports_ansi();
        let _ = stderr_is_terminal();
        let _ = should_show_progress_by_default();
        let _ = is_ci_environment();
    }

    #[test]
    fn test_colors_disabled_by_configuration() {
        assert!(!colors_enabled(false));
    }
}
