use std::fmt;

/// Raised when the command line does not describe a usable search
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct InvalidArgument(pub String);

impl fmt::Display for InvalidArgument {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "invalid argument: {}", self.0)
    }
}

impl std::error::Error for InvalidArgument {}

/// User-friendly error wrapper
#[derive(Debug)]
pub struct UserError {
    message: String,
    details: Option<String>,
    suggestion: Option<String>,
}

impl UserError {
    /// Create a new user error
    pub fn new(message: impl Into<String>) -> Self {
        UserError {
            message: message.into(),
            details: None,
            suggestion: None,
        }
    }

    /// Add details about the error
    pub fn with_details(mut self, details: impl Into<String>) -> Self {
        self.details = Some(details.into());
        self
    }

    /// Add a suggestion for how to fix the error
    pub fn with_suggestion(mut self, suggestion: impl Into<String>) -> Self {
        self.suggestion = Some(suggestion.into());
        self
    }

    pub fn message(&self) -> &str {
        &self.message
    }

    pub fn suggestion(&self) -> Option<&str> {
        self.suggestion.as_deref()
    }

    /// Format the error for display on stderr
    pub fn display(&self) {
        eprintln!("\nError: {}", self.message);

        if let Some(ref details) = self.details {
            eprintln!("\n   {}", details);
        }

        if let Some(ref suggestion) = self.suggestion {
            eprintln!("\nHint: {}", suggestion);
        }
    }
}

impl fmt::Display for UserError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.message)?;
        if let Some(ref details) = self.details {
            write!(f, ": {}", details)?;
        }
        Ok(())
    }
}

impl std::error::Error for UserError {}

/// Convert common errors to user-friendly messages
pub fn user_friendly_error(error: &anyhow::Error) -> UserError {
    // Include the whole context chain, the root cause carries the status code
    let error_str = format!("{:#}", error);

    if let Some(invalid) = error.downcast_ref::<InvalidArgument>() {
        return UserError::new("Missing date range")
            .with_details(invalid.0.clone())
            .with_suggestion("Pass --from_date/-fd and/or --to_date/-td as YYYY-MM-DD");
    }

    if error_str.contains("Failed to read credentials") {
        return UserError::new("GitHub credentials not found")
            .with_details(error_str)
            .with_suggestion(
                "Create an INI file with a [github] section and a 'token' key, \
                 or point --config at an existing one",
            );
    }

    if error_str.contains("(401") {
        return UserError::new("GitHub rejected the token")
            .with_details(error_str)
            .with_suggestion("Check the personal access token in the credentials file");
    }

    if error_str.contains("rate limit") {
        return UserError::new("GitHub API rate limit exceeded")
            .with_details(error_str)
            .with_suggestion("Wait for the rate limit window to reset and rerun");
    }

    if error_str.contains("(422") {
        return UserError::new("GitHub could not process the search query")
            .with_details(error_str)
            .with_suggestion("Check the --repo value and the date range");
    }

    if error_str.contains("error sending request") || error_str.contains("connection") {
        return UserError::new("Network connection failed")
            .with_details(error_str)
            .with_suggestion("Check your internet connection and the API URL, then try again");
    }

    UserError::new("An unexpected error occurred").with_details(error_str)
}

/// Wrap a result with user-friendly error handling
pub trait UserFriendly<T> {
    fn user_friendly(self) -> Result<T, UserError>;
}

impl<T> UserFriendly<T> for anyhow::Result<T> {
    fn user_friendly(self) -> Result<T, UserError> {
        self.map_err(|e| user_friendly_error(&e))
    }
}
