use chrono::{DateTime, Duration, Utc};
use std::collections::HashMap;
use std::sync::Arc;
use thiserror::Error;
use tokio::sync::{broadcast, RwLock};
use uuid::Uuid;

use crate::backend::{BackendError, HostedBackend};
use crate::metrics::AUTH_EVENTS_TOTAL;
use crate::middlewares::auth::{AuthError, JwtClaims, JwtService};
use crate::models::user::{
    AuthResponse, AuthUser, CurrentUserResponse, LoginRequest, NewUserProfile, SignupRequest,
    UpstreamSession, UserProfile, UserRole,
};

const AUTH_EVENT_BUFFER: usize = 32;

#[derive(Debug, Error)]
pub enum AuthGateError {
    #[error(transparent)]
    Backend(#[from] BackendError),

    #[error(transparent)]
    Token(#[from] AuthError),

    #[error("Session not found")]
    UnknownSession,
}

/// Auth state change notification.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum AuthEvent {
    SignedIn { user_id: String, session_id: String },
    SignedOut { user_id: String, session_id: String },
}

#[derive(Debug, Clone)]
struct GateSession {
    user: AuthUser,
    profile: Option<UserProfile>,
    upstream_token: Option<String>,
    expires_at: DateTime<Utc>,
}

/// Process-wide signed-in state. Each issued JWT names a gate session; dropping the
/// session revokes the token.
pub struct AuthGate {
    backend: Arc<dyn HostedBackend>,
    jwt: JwtService,
    ttl_seconds: i64,
    sessions: RwLock<HashMap<String, GateSession>>,
    events: broadcast::Sender<AuthEvent>,
}

impl AuthGate {
    pub fn new(backend: Arc<dyn HostedBackend>, jwt_secret: &str, ttl_seconds: i64) -> Self {
        let (events, _) = broadcast::channel(AUTH_EVENT_BUFFER);
        Self {
            backend,
            jwt: JwtService::new(jwt_secret),
            ttl_seconds,
            sessions: RwLock::new(HashMap::new()),
            events,
        }
    }

    pub fn subscribe(&self) -> broadcast::Receiver<AuthEvent> {
        self.events.subscribe()
    }

    pub async fn login(&self, req: &LoginRequest) -> Result<AuthResponse, AuthGateError> {
        let upstream = self.backend.sign_in(&req.email, &req.password).await?;
        let user_id = upstream.user.id.clone();

        let profile = match self.backend.get_profile(&user_id).await {
            Ok(profile) => profile,
            Err(e) => {
                tracing::warn!("Failed to load profile for {}: {}", user_id, e);
                None
            }
        };

        if let Err(e) = self.backend.touch_last_login(&user_id, Utc::now()).await {
            tracing::warn!("Failed to update last_login for {}: {}", user_id, e);
        }

        tracing::info!("User signed in: {}", user_id);
        self.open_session(upstream, profile).await
    }

    pub async fn signup(&self, req: &SignupRequest) -> Result<AuthResponse, AuthGateError> {
        let upstream = self.backend.sign_up(&req.email, &req.password).await?;

        let profile = self
            .backend
            .insert_profile(&NewUserProfile {
                id: upstream.user.id.clone(),
                email: req.email.trim().to_lowercase(),
                name: req.name.clone(),
                role: req.role,
                usage_time: 0,
            })
            .await?;

        tracing::info!(
            "User signed up: {} (role: {})",
            profile.id,
            profile.role.as_str()
        );
        self.open_session(upstream, Some(profile)).await
    }

    /// Drops the gate session, then forwards sign-out upstream.
    pub async fn logout(&self, claims: &JwtClaims) -> Result<(), AuthGateError> {
        let session = self
            .sessions
            .write()
            .await
            .remove(&claims.sid)
            .ok_or(AuthGateError::UnknownSession)?;

        self.emit(AuthEvent::SignedOut {
            user_id: claims.sub.clone(),
            session_id: claims.sid.clone(),
        });
        tracing::info!("User signed out: {}", claims.sub);

        self.backend
            .sign_out(session.upstream_token.as_deref())
            .await?;
        Ok(())
    }

    pub async fn current(&self, claims: &JwtClaims) -> Result<CurrentUserResponse, AuthGateError> {
        let sessions = self.sessions.read().await;
        let session = sessions
            .get(&claims.sid)
            .ok_or(AuthGateError::UnknownSession)?;
        Ok(CurrentUserResponse {
            user: session.user.clone(),
            profile: session.profile.clone(),
        })
    }

    /// Signature and expiry check plus a live gate session for the token's `sid`.
    pub async fn verify(&self, token: &str) -> Result<JwtClaims, AuthError> {
        let claims = self.jwt.validate_token(token)?;
        let sessions = self.sessions.read().await;
        match sessions.get(&claims.sid) {
            Some(session) if session.user.id == claims.sub && session.expires_at > Utc::now() => {
                Ok(claims)
            }
            _ => Err(AuthError::RevokedSession),
        }
    }

    pub async fn session_count(&self) -> usize {
        self.sessions.read().await.len()
    }

    async fn open_session(
        &self,
        upstream: UpstreamSession,
        profile: Option<UserProfile>,
    ) -> Result<AuthResponse, AuthGateError> {
        let mut user = upstream.user;
        if user.name.is_none() {
            user.name = profile.as_ref().map(|p| p.name.clone());
        }
        let role: UserRole = profile.as_ref().map(|p| p.role).unwrap_or_default();

        let now = Utc::now();
        let expires_at = now + Duration::seconds(self.ttl_seconds);
        let session_id = Uuid::new_v4().to_string();
        let claims = JwtClaims {
            sub: user.id.clone(),
            sid: session_id.clone(),
            role,
            email: user.email.clone(),
            exp: expires_at.timestamp() as usize,
            iat: now.timestamp() as usize,
        };
        let access_token = self.jwt.generate_token(&claims)?;

        {
            let mut sessions = self.sessions.write().await;
            sessions.retain(|_, s| s.expires_at > now);
            sessions.insert(
                session_id.clone(),
                GateSession {
                    user: user.clone(),
                    profile: profile.clone(),
                    upstream_token: upstream.access_token,
                    expires_at,
                },
            );
        }

        self.emit(AuthEvent::SignedIn {
            user_id: user.id.clone(),
            session_id,
        });

        Ok(AuthResponse {
            access_token,
            token_type: "Bearer",
            expires_in: self.ttl_seconds,
            user,
            profile,
            mode: self.backend.mode().as_str(),
        })
    }

    fn emit(&self, event: AuthEvent) {
        let label = match event {
            AuthEvent::SignedIn { .. } => "signed_in",
            AuthEvent::SignedOut { .. } => "signed_out",
        };
        AUTH_EVENTS_TOTAL.with_label_values(&[label]).inc();
        // No subscribers is fine.
        let _ = self.events.send(event);
    }
}
