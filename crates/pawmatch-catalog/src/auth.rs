use pawmatch_client::{ApiError, DogsClient};
use pawmatch_core::{FieldError, LoginForm};

/// Result of submitting the login form.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum LoginOutcome {
    /// Validation failed locally; no request was sent.
    Invalid(Vec<FieldError>),
    /// The service refused the credentials.
    Rejected,
    LoggedIn,
}

/// Validates `form` and, if it passes, logs in and records the result on the
/// client's session.
///
/// # Errors
///
/// Returns [`ApiError`] on network failure or a server-side error status.
/// The session is left unchanged in that case.
pub async fn submit_login(client: &DogsClient, form: &LoginForm) -> Result<LoginOutcome, ApiError> {
    let credentials = match form.validate() {
        Ok(credentials) => credentials,
        Err(errors) => {
            tracing::debug!(count = errors.len(), "login form rejected locally");
            return Ok(LoginOutcome::Invalid(errors));
        }
    };

    let accepted = client.login(&credentials).await?;
    client.session().set_authenticated(accepted);
    Ok(if accepted {
        LoginOutcome::LoggedIn
    } else {
        LoginOutcome::Rejected
    })
}
