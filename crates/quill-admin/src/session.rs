//! Admin session: store, gateway and login state.

use std::sync::{Arc, Mutex, MutexGuard, PoisonError};

use quill_editor::{EditError, replace_page};
use quill_gateway::ContentGateway;
use quill_model::{IdGenerator, Page, PageCollection};
use quill_store::{PageStore, Update};
use tracing::{error, info};

use crate::error::AdminError;
use crate::token::TokenSlot;

/// Result of an operation that may be skipped.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum Outcome<T> {
    /// The change was applied (and persisted).
    Applied(T),
    /// Nothing happened: blank input or a declined confirmation.
    Skipped,
}

impl<T> Outcome<T> {
    #[must_use]
    pub fn is_applied(&self) -> bool {
        matches!(self, Self::Applied(_))
    }

    /// The applied value, if any.
    pub fn applied(self) -> Option<T> {
        match self {
            Self::Applied(value) => Some(value),
            Self::Skipped => None,
        }
    }
}

/// Authenticated administration over one page store.
pub struct AdminSession<G> {
    pub(crate) store: Arc<PageStore>,
    pub(crate) gateway: G,
    ids: Mutex<IdGenerator>,
    tokens: TokenSlot,
}

impl<G: ContentGateway> AdminSession<G> {
    /// Create a session, restoring any token kept in `tokens`.
    pub fn new(store: Arc<PageStore>, gateway: G, tokens: TokenSlot) -> Self {
        Self::with_ids(store, gateway, tokens, IdGenerator::clock())
    }

    /// Create a session with a specific id generator.
    pub fn with_ids(store: Arc<PageStore>, gateway: G, tokens: TokenSlot, ids: IdGenerator) -> Self {
        gateway.set_token(tokens.load());
        Self {
            store,
            gateway,
            ids: Mutex::new(ids),
            tokens,
        }
    }

    /// The page store edits are applied to.
    #[must_use]
    pub fn store(&self) -> &Arc<PageStore> {
        &self.store
    }

    /// The remote content gateway.
    #[must_use]
    pub fn gateway(&self) -> &G {
        &self.gateway
    }

    /// Log in against the gateway and keep the token.
    pub fn login(&self, name: &str, password: &str) -> Result<(), AdminError> {
        let token = self.gateway.login(name, password).map_err(|e| {
            error!(user = name, error = %e, "Login failed");
            e
        })?;
        self.tokens.store(&token)?;
        self.gateway.set_token(Some(token));
        info!(user = name, "Logged in");
        Ok(())
    }

    /// Forget the login token.
    pub fn logout(&self) -> Result<(), AdminError> {
        self.tokens.clear()?;
        self.gateway.set_token(None);
        info!("Logged out");
        Ok(())
    }

    /// Returns `true` while a login token is held.
    #[must_use]
    pub fn is_logged_in(&self) -> bool {
        self.tokens.load().is_some()
    }

    /// Fail with [`AdminError::NotAuthenticated`] unless logged in.
    pub(crate) fn require_login(&self) -> Result<(), AdminError> {
        if self.is_logged_in() {
            Ok(())
        } else {
            Err(AdminError::NotAuthenticated)
        }
    }

    pub(crate) fn ids(&self) -> MutexGuard<'_, IdGenerator> {
        self.ids.lock().unwrap_or_else(PoisonError::into_inner)
    }

    /// Current state of one page, read without taking the store's write lock.
    pub(crate) fn load_page(&self, page_id: &str) -> Result<Page, AdminError> {
        self.store
            .load()
            .get(page_id)
            .cloned()
            .ok_or_else(|| EditError::PageNotFound(page_id.to_owned()).into())
    }

    /// Apply `edit` to one page and persist the result.
    ///
    /// `edit` returns `None` to skip. Any error leaves the store untouched.
    pub(crate) fn update_page<F>(&self, page_id: &str, edit: F) -> Result<Outcome<Page>, AdminError>
    where
        F: FnOnce(&Page) -> Result<Option<Page>, AdminError>,
    {
        self.update_pages(|pages| {
            let page = pages
                .get(page_id)
                .ok_or_else(|| EditError::PageNotFound(page_id.to_owned()))?;
            match edit(page)? {
                Some(next) => Ok(Some((replace_page(pages, next.clone())?, next))),
                None => Ok(None),
            }
        })
    }

    /// Apply `edit` to the whole collection and persist the result.
    pub(crate) fn update_pages<T, F>(&self, edit: F) -> Result<Outcome<T>, AdminError>
    where
        F: FnOnce(&PageCollection) -> Result<Option<(PageCollection, T)>, AdminError>,
    {
        self.store.update(|pages| {
            Ok(match edit(pages)? {
                Some((next, value)) => Update::Write(next, Outcome::Applied(value)),
                None => Update::Skip(Outcome::Skipped),
            })
        })
    }
}
