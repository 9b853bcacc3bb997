//! API token provisioning.
//!
//! `login` reuses a stored token when GitHub still accepts it. Otherwise it
//! asks for the account's username and password and creates a new
//! repo-scoped authorization, answering two-factor challenges and note
//! collisions interactively until GitHub hands back a token.

use crate::cli::InteractiveConsole;
use crate::config::AUTHORIZATION_SCOPES;
use crate::credential::CredentialStore;
use crate::error::{ApiError, CliError, Result};
use crate::github::{AuthorizationApi, BasicLogin, NewAuthorization};

const USER_PROMPT: &str = "GitHub User: ";
const PASSWORD_PROMPT: &str = "GitHub Password: ";
const OTP_PROMPT: &str = "GitHub 2FA: ";
const NOTE_PROMPT: &str = "OAuth token note: ";

/// How `login` finished
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ProvisionOutcome {
    /// The stored token still works; nothing was asked or changed
    AlreadyValid,
    /// A new authorization was created and its token stored
    Created {
        /// Note of the new authorization
        note: String,
    },
}

/// Ways out of a note collision
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ConflictResolution {
    /// Delete the existing authorization and reuse its note
    Regenerate,
    /// Pick a different note
    Rename,
}

impl ConflictResolution {
    /// Menu order
    pub const ALL: [ConflictResolution; 2] = [Self::Regenerate, Self::Rename];

    /// Menu label
    pub fn label(self) -> &'static str {
        match self {
            Self::Regenerate => "regenerate token (will delete old one)",
            Self::Rename => "generate token with new name",
        }
    }
}

/// Drives the login flow against an API, a console and a credential store
pub struct TokenProvisioner<'a, A, C, S> {
    api: &'a A,
    console: &'a C,
    store: &'a S,
    default_note: String,
}

impl<'a, A, C, S> TokenProvisioner<'a, A, C, S>
where
    A: AuthorizationApi,
    C: InteractiveConsole,
    S: CredentialStore,
{
    /// Create a provisioner whose first attempt uses `default_note`
    pub fn new(api: &'a A, console: &'a C, store: &'a S, default_note: impl Into<String>) -> Self {
        Self {
            api,
            console,
            store,
            default_note: default_note.into(),
        }
    }

    /// Make sure a working token is stored, prompting only when needed
    pub async fn ensure_credential(&self) -> Result<ProvisionOutcome> {
        if self.store.exists() {
            match self.store.read() {
                Ok(token) => match self.api.verify_token(&token).await {
                    Ok(()) => {
                        log::info!("Stored token is still valid");
                        return Ok(ProvisionOutcome::AlreadyValid);
                    }
                    Err(e) => log::warn!("Stored token was rejected: {e}"),
                },
                Err(e) => log::warn!("Stored token is unusable: {e}"),
            }
        }

        let login = self.ask_login()?;
        let (note, token) = self.create_token(&login).await?;
        self.store.write(&token)?;

        Ok(ProvisionOutcome::Created { note })
    }

    fn ask_login(&self) -> Result<BasicLogin> {
        let username = self.console.ask_line(USER_PROMPT, None)?;
        let password = self.console.ask_secret(PASSWORD_PROMPT)?;
        Ok(BasicLogin { username, password })
    }

    fn ask_otp(&self) -> Result<String> {
        self.console.ask_line(OTP_PROMPT, None)
    }

    /// Create an authorization, looping over OTP challenges and note conflicts
    ///
    /// Returns the note that was finally used and the new token.
    async fn create_token(&self, login: &BasicLogin) -> Result<(String, String)> {
        let mut note = self.default_note.clone();
        let mut otp: Option<String> = None;

        loop {
            let request = NewAuthorization::new(note.clone(), AUTHORIZATION_SCOPES);
            match self
                .api
                .create_authorization(login, &request, otp.as_deref())
                .await
            {
                Ok(record) if record.token.is_empty() => {
                    return Err(ApiError::Remote {
                        status: 200,
                        message: "authorization response carried no token".to_string(),
                    }
                    .into());
                }
                Ok(record) => {
                    log::info!("Created authorization {} ('{}')", record.id, note);
                    return Ok((note, record.token));
                }
                Err(ApiError::OtpRequired) => {
                    log::debug!("Authorization creation needs a two-factor code");
                    otp = Some(self.ask_otp()?);
                }
                Err(ApiError::NameConflict { .. }) => {
                    log::debug!("Authorization note '{note}' is taken");
                    note = self.resolve_conflict(login, note).await?;
                    // a code is single-use; the next attempt asks again if needed
                    otp = None;
                }
                Err(e) => return Err(e.into()),
            }
        }
    }

    /// Ask how to get past a taken note; returns the note to retry with
    async fn resolve_conflict(&self, login: &BasicLogin, note: String) -> Result<String> {
        let prompt = format!("Token '{note}' already exists: ");
        let labels = ConflictResolution::ALL.map(ConflictResolution::label);
        let index = self.console.ask_choice(&prompt, &labels)?;
        let choice = ConflictResolution::ALL
            .get(index)
            .copied()
            .ok_or_else(|| CliError::InvalidArguments {
                reason: format!("menu choice {} out of range", index + 1),
            })?;

        match choice {
            ConflictResolution::Regenerate => {
                self.regenerate(login, &note).await?;
                Ok(note)
            }
            ConflictResolution::Rename => self.console.ask_line(NOTE_PROMPT, Some(note.as_str())),
        }
    }

    /// Delete the authorization named `note`
    async fn regenerate(&self, login: &BasicLogin, note: &str) -> Result<()> {
        let api = self.api;

        let authorizations = self
            .with_otp(move |otp| async move { api.list_authorizations(login, otp.as_deref()).await })
            .await?;

        let id = authorizations
            .iter()
            .find(|a| a.note.as_deref() == Some(note))
            .map(|a| a.id)
            .ok_or_else(|| CliError::AuthorizationNotFound {
                note: note.to_string(),
            })?;

        self.with_otp(move |otp| async move {
            api.delete_authorization(login, id, otp.as_deref()).await
        })
        .await?;

        log::info!("Deleted authorization {id} ('{note}')");
        Ok(())
    }

    /// Run `operation`, prompting for a fresh code each time GitHub asks for one
    async fn with_otp<T, F, Fut>(&self, mut operation: F) -> Result<T>
    where
        F: FnMut(Option<String>) -> Fut,
        Fut: Future<Output = std::result::Result<T, ApiError>>,
    {
        let mut otp = None;
        loop {
            match operation(otp.take()).await {
                Ok(value) => return Ok(value),
                Err(ApiError::OtpRequired) => otp = Some(self.ask_otp()?),
                Err(e) => return Err(e.into()),
            }
        }
    }
}
