use tracing::{debug, warn};

use super::store::SessionStore;
use crate::api::{ApiGateway, AuthResponse, NewSociety, Role, User};
use crate::utils::ApiError;

/// Lifecycle phase of the session.
///
/// `Initializing` holds only until startup restoration resolves; nothing
/// transitions back into it afterwards.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SessionPhase {
    Initializing,
    Unauthenticated,
    Authenticated,
}

/// Owns the authenticated-identity lifecycle: login, registration-as-login,
/// logout, and one-shot restoration of a persisted session. Sole writer of
/// the identity half of the persisted record; the token half belongs to the
/// gateway.
pub struct SessionManager {
    gateway: ApiGateway,
    store: SessionStore,
    user: Option<User>,
    phase: SessionPhase,
}

impl SessionManager {
    pub fn new(gateway: ApiGateway, store: SessionStore) -> Self {
        Self {
            gateway,
            store,
            user: None,
            phase: SessionPhase::Initializing,
        }
    }

    /// The gateway this session drives. Domain calls go through here so
    /// they share the session's credential.
    pub fn gateway(&self) -> &ApiGateway {
        &self.gateway
    }

    /// Current identity, if one is held.
    pub fn user(&self) -> Option<&User> {
        self.user.as_ref()
    }

    pub fn phase(&self) -> SessionPhase {
        self.phase
    }

    pub fn is_authenticated(&self) -> bool {
        self.phase == SessionPhase::Authenticated
    }

    /// Session state is unresolved until restoration has run; callers must
    /// not make authorization decisions while this is true.
    pub fn is_initializing(&self) -> bool {
        self.phase == SessionPhase::Initializing
    }

    /// Restore a previously persisted session. Runs once per process; later
    /// calls are no-ops. A missing record resolves to `Unauthenticated`
    /// without touching the network. A present record is validated with a
    /// single role-appropriate probe; if the backend rejects it for any
    /// reason, the record is discarded and the failure is not surfaced.
    pub async fn restore(&mut self) {
        if self.phase != SessionPhase::Initializing {
            return;
        }

        let token = self.gateway.credential();
        let identity = self.store.identity();
        let (Some(_), Some(raw)) = (token, identity) else {
            self.phase = SessionPhase::Unauthenticated;
            return;
        };

        let user: User = match serde_json::from_str(&raw) {
            Ok(user) => user,
            Err(err) => {
                debug!("discarding unreadable persisted identity: {}", err);
                self.discard();
                return;
            }
        };

        match self.gateway.validate(user.role).await {
            Ok(()) => {
                self.user = Some(user);
                self.phase = SessionPhase::Authenticated;
            }
            Err(err) => {
                debug!("persisted credential rejected, logging out: {}", err);
                self.discard();
            }
        }
    }

    /// Authenticate against the login endpoint for `role`. On success the
    /// credential and identity are established together; on failure nothing
    /// is mutated and the gateway error reaches the caller unchanged.
    pub async fn login(
        &mut self,
        email: &str,
        password: &str,
        role: Role,
    ) -> Result<User, ApiError> {
        let auth = match role {
            Role::Admin => self.gateway.admin_login(email, password).await?,
            Role::Society => self.gateway.society_login(email, password).await?,
        };
        Ok(self.establish(auth))
    }

    /// Register a new society account. Success doubles as a society login;
    /// failure mutates nothing.
    pub async fn register(&mut self, data: &NewSociety) -> Result<User, ApiError> {
        let auth = self.gateway.society_register(data).await?;
        Ok(self.establish(auth))
    }

    /// Clear the session from memory and storage. Purely local; always
    /// succeeds and may be called repeatedly.
    pub fn logout(&mut self) {
        self.discard();
    }

    // Credential and identity always move together. There is no await point
    // between the two writes, so no reader can observe one without the
    // other.
    fn establish(&mut self, auth: AuthResponse) -> User {
        self.gateway.set_credential(&auth.token);
        match serde_json::to_string(&auth.user) {
            Ok(raw) => {
                if let Err(err) = self.store.set_identity(&raw) {
                    warn!("failed to persist identity: {}", err);
                }
            }
            Err(err) => warn!("failed to serialize identity: {}", err),
        }
        self.user = Some(auth.user.clone());
        self.phase = SessionPhase::Authenticated;
        auth.user
    }

    fn discard(&mut self) {
        self.gateway.clear_credential();
        if let Err(err) = self.store.clear_identity() {
            warn!("failed to clear persisted identity: {}", err);
        }
        self.user = None;
        self.phase = SessionPhase::Unauthenticated;
    }
}
