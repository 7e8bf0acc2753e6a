//! Credentials, environment configuration and the interactive prompt.

use std::env;
use std::io::{self, BufRead, Write};

use crate::error::TrafficError;

/// Root of the GitHub REST API.
pub const DEFAULT_API_BASE: &str = "https://api.github.com";

/// Application configuration from environment variables.
#[derive(Debug, Clone)]
pub struct Config {
    /// API root the report is fetched from.
    pub api_base: String,
}

impl Config {
    /// Creates Config from environment variables with defaults.
    pub fn from_env() -> Self {
        Self {
            api_base: env::var("GITHUB_API_URL").unwrap_or_else(|_| DEFAULT_API_BASE.into()),
        }
    }
}

/// Token and repository coordinates for one report.
#[derive(Clone)]
pub struct Credentials {
    pub token: String,
    pub owner: String,
    pub repo: String,
}

impl Credentials {
    pub fn new(
        token: impl Into<String>,
        owner: impl Into<String>,
        repo: impl Into<String>,
    ) -> Self {
        Self {
            token: token.into().trim().to_string(),
            owner: owner.into().trim().to_string(),
            repo: repo.into().trim().to_string(),
        }
    }

    /// Fails on the first empty field.
    pub fn validate(&self) -> Result<(), TrafficError> {
        if self.token.is_empty() {
            return Err(TrafficError::MissingCredentials("token"));
        }
        if self.owner.is_empty() {
            return Err(TrafficError::MissingCredentials("owner"));
        }
        if self.repo.is_empty() {
            return Err(TrafficError::MissingCredentials("repo"));
        }
        Ok(())
    }
}

// Keeps the token out of debug logs.
impl std::fmt::Debug for Credentials {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Credentials")
            .field("token", &"***")
            .field("owner", &self.owner)
            .field("repo", &self.repo)
            .finish()
    }
}

/// Asks for token, owner and repository on `output`, reading answers from `input`.
///
/// End of input counts as an empty answer; call [`Credentials::validate`] on
/// the result before using it.
pub fn prompt_credentials<R: BufRead, W: Write>(
    mut input: R,
    mut output: W,
) -> io::Result<Credentials> {
    writeln!(output, "GitHub Traffic Analyzer - Manual Mode")?;
    writeln!(output, "Enter your GitHub credentials:")?;

    let mut ask = |label: &str| -> io::Result<String> {
        write!(output, "{label}: ")?;
        output.flush()?;
        let mut line = String::new();
        input.read_line(&mut line)?;
        Ok(line)
    };

    let token = ask("GitHub Token")?;
    let owner = ask("Repository Owner")?;
    let repo = ask("Repository Name")?;
    Ok(Credentials::new(token, owner, repo))
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Cursor;

    #[test]
    fn prompt_reads_three_trimmed_answers() {
        let input = Cursor::new("ghp_abc  \noctocat\nHello-World\n");
        let mut output = Vec::new();

        let creds = prompt_credentials(input, &mut output).unwrap();

        assert_eq!(creds.token, "ghp_abc");
        assert_eq!(creds.owner, "octocat");
        assert_eq!(creds.repo, "Hello-World");
        assert!(creds.validate().is_ok());

        let shown = String::from_utf8(output).unwrap();
        assert!(shown.contains("GitHub Token: "));
        assert!(shown.contains("Repository Name: "));
    }

    #[test]
    fn prompt_with_truncated_input_fails_validation() {
        let input = Cursor::new("ghp_abc\n");
        let creds = prompt_credentials(input, io::sink()).unwrap();

        let err = creds.validate().unwrap_err();
        assert!(matches!(err, TrafficError::MissingCredentials("owner")));
    }

    #[test]
    fn blank_token_is_missing() {
        let creds = Credentials::new("   ", "octocat", "Hello-World");
        assert!(matches!(
            creds.validate(),
            Err(TrafficError::MissingCredentials("token"))
        ));
    }

    #[test]
    fn debug_output_hides_token() {
        let creds = Credentials::new("ghp_secret", "octocat", "Hello-World");
        let shown = format!("{creds:?}");
        assert!(!shown.contains("ghp_secret"));
        assert!(shown.contains("octocat"));
    }
}
