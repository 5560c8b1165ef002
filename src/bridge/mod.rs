//! The request-interception bridge.
//!
//! Sits between the page and the network. While the viewer is anonymous it
//! serves a fixed set of routes from the local [`OptionStore`](crate::OptionStore)
//! and renders the results into the page; after sign-in it migrates the
//! local collection to the server when asked to.
//!
//! ## Routes
//!
//! | verb | path | local action |
//! |---|---|---|
//! | POST | `/api/random` | weighted draw, result card into the declared target |
//! | GET | `/manage/options` | management modal into the modal target |
//! | POST | `/api/options` | add option, re-render list, reset form |
//! | DELETE | `/api/options/{id}` | delete option, re-render list |
//! | GET | `/close-modal` | clear the modal target |

mod action;
mod document;
mod form;
mod migration;
mod route;
mod service;
mod session;

pub use action::{UiAction, MARKERS};
pub use document::{Document, InMemoryDocument};
pub use form::{parse_tags, parse_time_constraint, FormData};
#[cfg(feature = "http")]
pub use migration::HttpMigrationClient;
pub use migration::{
    sync_requested, MigrationError, MigrationOutcome, MigrationTransport, ResponseInfo,
    TRIGGER_HEADER,
};
pub use route::{resolve, InterceptedRequest, PathPattern, Route, RouteAction, RouteMatch, Verb, ROUTES};
pub use service::{Bridge, Interception};
pub use session::{AuthCheck, AuthFlag, Session, USER_EMAIL};
