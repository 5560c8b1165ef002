//! Bridge - routes would-be network operations into the local store.
//!
//! `Bridge<S, C, A, R>` owns the option store, an auth check, the page
//! target settings and a random source. For anonymous viewers it answers
//! the requests listed in [`ROUTES`](super::route::ROUTES) locally and
//! writes the rendered fragment into the page; everything else, and every
//! request from a signed-in viewer, passes through to the network.
//!
//! ## Example
//!
//! ```ignore
//! let bridge = Bridge::new(OptionStore::new(LocalStorageBackend, BrowserClock), || !signed_in());
//!
//! let request = InterceptedRequest::new("POST", "/api/random")
//!     .target("#result")
//!     .form(FormData::new().with("hours", "1"));
//! if bridge.intercept(&request, &mut page) == Interception::Handled {
//!     // cancel the network request
//! }
//! ```

use std::sync::Mutex;

use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use tracing::{debug, error, info, warn};

use super::action::UiAction;
use super::document::Document;
use super::form::{parse_tags, parse_time_constraint, FormData};
use super::migration::{sync_requested, MigrationError, MigrationOutcome, MigrationTransport, ResponseInfo};
use super::route::{resolve, InterceptedRequest, RouteAction};
use super::session::AuthCheck;
use crate::clock::Clock;
use crate::config::BridgeConfig;
use crate::option::{OptionInput, DEFAULT_WEIGHT};
use crate::render;
use crate::selector::select_random_with;
use crate::storage::KeyValueStore;
use crate::store::OptionStore;

/// What the caller should do with the intercepted request.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Interception {
    /// Served locally; cancel the network request.
    Handled,
    /// Not ours; let it go to the server.
    PassThrough,
}

/// Local stand-in for the server while the viewer is anonymous.
pub struct Bridge<S, C, A, R = StdRng> {
    store: OptionStore<S, C>,
    auth: A,
    config: BridgeConfig,
    rng: Mutex<R>,
}

impl<S, C, A> Bridge<S, C, A, StdRng>
where
    S: KeyValueStore,
    C: Clock,
    A: AuthCheck,
{
    /// Create a bridge with default page targets and an entropy-seeded RNG.
    pub fn new(store: OptionStore<S, C>, auth: A) -> Self {
        Self::with_config(store, auth, BridgeConfig::default())
    }

    pub fn with_config(store: OptionStore<S, C>, auth: A, config: BridgeConfig) -> Self {
        Self {
            store,
            auth,
            config,
            rng: Mutex::new(StdRng::from_entropy()),
        }
    }
}

impl<S, C, A, R> Bridge<S, C, A, R>
where
    S: KeyValueStore,
    C: Clock,
    A: AuthCheck,
    R: Rng,
{
    /// Replace the random source, e.g. with a seeded one in tests.
    pub fn with_rng<R2: Rng>(self, rng: R2) -> Bridge<S, C, A, R2> {
        Bridge {
            store: self.store,
            auth: self.auth,
            config: self.config,
            rng: Mutex::new(rng),
        }
    }

    pub fn store(&self) -> &OptionStore<S, C> {
        &self.store
    }

    pub fn config(&self) -> &BridgeConfig {
        &self.config
    }

    /// Serve `request` locally if the viewer is anonymous and the route is ours.
    ///
    /// A handled request never reaches the network, even if the local
    /// operation fails; failures are logged and leave the page unchanged.
    pub fn intercept(&self, request: &InterceptedRequest, doc: &mut dyn Document) -> Interception {
        if self.auth.is_authenticated() {
            return Interception::PassThrough;
        }

        let Some(route) = resolve(&request.verb, &request.path) else {
            debug!(verb = %request.verb, path = %request.path, "request not intercepted");
            return Interception::PassThrough;
        };

        debug!(verb = %request.verb, path = %request.path, action = ?route.action, "intercepted request");
        match route.action {
            RouteAction::SelectRandom => self.select_random(request, doc),
            RouteAction::ShowManage => self.show_manage(doc),
            RouteAction::AddOption => {
                self.add_from_form(&request.form, request.source.as_deref(), doc)
            }
            RouteAction::DeleteOption => {
                if let Some(id) = route.param.as_deref() {
                    self.delete_option(id, doc);
                }
            }
            RouteAction::CloseModal => self.close_modal(doc),
        }
        Interception::Handled
    }

    /// Handle a click or submit on locally rendered markup.
    pub fn handle_action(&self, action: &UiAction, doc: &mut dyn Document) {
        match action {
            UiAction::DeleteOption { id } => self.delete_option(id, doc),
            UiAction::ExpandOption { id } => debug!(id = %id, "expand is presentation-only"),
            UiAction::DismissResult => self.dismiss_result(doc),
            UiAction::CloseModal => self.close_modal(doc),
            UiAction::AddOption { form, source } => {
                self.add_from_form(form, source.as_deref(), doc)
            }
        }
    }

    /// Run a migration if `response` succeeded and asks for one.
    ///
    /// Returns None when no migration was requested.
    pub async fn after_request<T: MigrationTransport>(
        &self,
        response: &ResponseInfo,
        transport: &T,
    ) -> Option<MigrationOutcome> {
        if !response.successful {
            return None;
        }
        let trigger = response.trigger.as_deref()?;
        if !sync_requested(trigger, &self.config.sync_trigger) {
            return None;
        }
        Some(self.migrate(transport).await)
    }

    /// Send the whole local collection to the server and clear it on success.
    ///
    /// Not guarded against concurrent calls: two overlapping migrations can
    /// both submit the same collection.
    pub async fn migrate<T: MigrationTransport>(&self, transport: &T) -> MigrationOutcome {
        let options = self.store.get_all();
        if options.is_empty() {
            debug!("no local options to migrate");
            return MigrationOutcome::Skipped;
        }

        let body = match serde_json::to_string(&options) {
            Ok(body) => body,
            Err(e) => {
                let e = MigrationError::from(e);
                error!(error = %e, "failed to encode local options");
                return MigrationOutcome::Failed(e);
            }
        };

        match transport.submit(&self.config.migration_endpoint, body).await {
            Ok(status) if (200..300).contains(&status) => {
                if let Err(e) = self.store.clear() {
                    error!(error = %e, "migrated local options but failed to clear them");
                }
                info!(count = options.len(), "local options synced to server");
                MigrationOutcome::Synced {
                    count: options.len(),
                }
            }
            Ok(status) => {
                error!(status, "server rejected local options");
                MigrationOutcome::Rejected { status }
            }
            Err(e) => {
                error!(error = %e, "failed to sync local options");
                MigrationOutcome::Failed(e)
            }
        }
    }

    fn select_random(&self, request: &InterceptedRequest, doc: &mut dyn Document) {
        let ceiling = parse_time_constraint(&request.form);
        let tags = parse_tags(&request.form);
        let options = self.store.get_all();

        let selected = {
            let mut rng = self.rng.lock().unwrap_or_else(|poisoned| poisoned.into_inner());
            select_random_with(&options, ceiling, tags.as_slice(), &mut *rng)
        };

        let html = match &selected {
            Some(option) => render::result_card(option, &options),
            None => render::no_options(ceiling),
        };

        let Some(target) = request.target.as_deref() else {
            error!(path = %request.path, "no target declared for selection result");
            return;
        };
        let target = target.strip_prefix('#').unwrap_or(target);
        if !doc.set_inner_html(target, &html) {
            error!(element = target, "target element not found");
        }
    }

    fn show_manage(&self, doc: &mut dyn Document) {
        let html = render::manage_modal(&self.store.get_all(), &self.config.options_list_target);
        if !doc.set_inner_html(&self.config.modal_target, &html) {
            warn!(element = %self.config.modal_target, "modal target not found");
        }
    }

    fn add_from_form(&self, form: &FormData, source: Option<&str>, doc: &mut dyn Document) {
        let text = form.get("text").map(str::trim).unwrap_or("");
        if text.is_empty() {
            return;
        }

        let input = OptionInput::new(text)
            .weight(i64::from(DEFAULT_WEIGHT))
            .duration(None)
            .tags(parse_tags(form));
        if let Err(e) = self.store.add(input) {
            warn!(error = %e, "failed to add option");
            return;
        }

        self.refresh_list(doc);
        if let Some(form_id) = source {
            doc.reset_form(form_id);
        }
    }

    fn delete_option(&self, id: &str, doc: &mut dyn Document) {
        if let Err(e) = self.store.delete(id) {
            warn!(id, error = %e, "failed to delete option");
            return;
        }
        self.refresh_list(doc);
    }

    fn close_modal(&self, doc: &mut dyn Document) {
        doc.set_inner_html(&self.config.modal_target, "");
    }

    fn dismiss_result(&self, doc: &mut dyn Document) {
        doc.remove_element(&self.config.result_card_id);
    }

    fn refresh_list(&self, doc: &mut dyn Document) {
        let html = render::options_list(&self.store.get_all());
        doc.set_inner_html(&self.config.options_list_target, &html);
    }
}
