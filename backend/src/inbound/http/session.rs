//! Session helpers to keep HTTP handlers free of framework-specific logic.
//!
//! The cookie session carries a [`SessionIdentity`] (account id and role).
//! Handlers call [`SessionContext::require_identity`] for member endpoints
//! and [`SessionContext::require_admin`] for administration.

use actix_session::Session;
use actix_web::{FromRequest, HttpRequest, dev::Payload};
use futures_util::future::LocalBoxFuture;
use tracing::warn;

use crate::domain::{Error, SessionIdentity};

pub(crate) const IDENTITY_KEY: &str = "identity";

/// Newtype wrapper that exposes higher-level session operations.
#[derive(Clone)]
pub struct SessionContext(Session);

impl SessionContext {
    pub fn new(session: Session) -> Self {
        Self(session)
    }

    /// Store the logged-in identity, replacing any previous one.
    pub fn persist_identity(&self, identity: &SessionIdentity) -> Result<(), Error> {
        self.0.renew();
        self.0
            .insert(IDENTITY_KEY, identity)
            .map_err(|error| Error::internal(format!("failed to persist session: {error}")))
    }

    /// The stored identity, if any. A cookie that no longer decodes counts
    /// as logged out.
    pub fn identity(&self) -> Option<SessionIdentity> {
        match self.0.get::<SessionIdentity>(IDENTITY_KEY) {
            Ok(identity) => identity,
            Err(error) => {
                warn!(%error, "discarding unreadable session identity");
                None
            }
        }
    }

    /// Require a logged-in account or return `401 Unauthorized`.
    pub fn require_identity(&self) -> Result<SessionIdentity, Error> {
        self.identity()
            .ok_or_else(|| Error::unauthorized("login required"))
    }

    /// Require an administrator: `401` when logged out, `403` for members.
    pub fn require_admin(&self) -> Result<SessionIdentity, Error> {
        let identity = self.require_identity()?;
        if !identity.role.is_admin() {
            return Err(Error::forbidden("admin role required"));
        }
        Ok(identity)
    }

    /// Drop every session value and expire the cookie.
    pub fn clear(&self) {
        self.0.purge();
    }
}

impl FromRequest for SessionContext {
    type Error = actix_web::Error;
    type Future = LocalBoxFuture<'static, Result<Self, Self::Error>>;

    fn from_request(req: &HttpRequest, payload: &mut Payload) -> Self::Future {
        let fut = Session::from_request(req, payload);
        Box::pin(async move { fut.await.map(SessionContext::new) })
    }
}
