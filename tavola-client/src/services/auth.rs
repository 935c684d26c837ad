//! Google sign-in and session lifecycle

use shared::ValidationError;
use shared::client::{AuthSession, GoogleLoginRequest, UserInfo};

use crate::ClientResult;
use crate::client::HttpClient;
use crate::query::{QueryKey, keys};

service!(
    /// Auth API (`/auth/*`)
    AuthService
);

impl<C: HttpClient> AuthService<C> {
    /// Exchange a Google ID token for a backend session.
    ///
    /// The token is attached to every later request and persisted by the
    /// auth store. Cached queries from a previous user are dropped.
    pub async fn login_with_google(&self, credential: &str) -> ClientResult<AuthSession> {
        let credential = credential.trim();
        if credential.is_empty() {
            return Err(ValidationError::required("credential").into());
        }

        let request = GoogleLoginRequest {
            credential: credential.to_string(),
        };
        let session: AuthSession = self.ctx.http.post("/auth/google", &request).await?;

        // Persist first: a session that cannot be saved leaves the client
        // signed out rather than holding an unsaved token
        self.ctx.auth.set_session(&session)?;
        self.ctx.http.set_token(Some(session.token.clone()));
        self.ctx.cache.clear();
        self.ctx.cart.clear();

        tracing::info!(user_id = session.user.id, role = %session.user.role, "Signed in");
        Ok(session)
    }

    /// Current user according to the backend
    pub async fn me(&self) -> ClientResult<UserInfo> {
        let key = QueryKey::new(keys::AUTH).with("me");
        let user: UserInfo = self
            .ctx
            .cache
            .fetch(&key, || self.ctx.http.get::<UserInfo>("/auth/me"))
            .await?;
        self.ctx.auth.set_user(user.clone())?;
        Ok(user)
    }

    /// Drop the token, the saved session, the cart snapshot and every
    /// cached query. Purely local; the backend keeps no session state.
    pub fn logout(&self) -> ClientResult<()> {
        self.ctx.http.set_token(None);
        self.ctx.cache.clear();
        self.ctx.cart.clear();
        self.ctx.auth.clear()?;
        tracing::info!("Signed out");
        Ok(())
    }

    pub fn current_user(&self) -> Option<UserInfo> {
        self.ctx.auth.user()
    }

    pub fn is_authenticated(&self) -> bool {
        self.ctx.http.token().is_some()
    }

    pub fn is_admin(&self) -> bool {
        self.ctx.auth.is_admin()
    }
}
