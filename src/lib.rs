pub mod bridge;
mod clock;
mod config;
mod error;
mod option;
pub mod render;
pub mod selector;
mod storage;
mod store;

pub use bridge::{
    AuthCheck, AuthFlag, Bridge, Document, FormData, InMemoryDocument, Interception,
    InterceptedRequest, MigrationError, MigrationOutcome, MigrationTransport, ResponseInfo,
    Session, UiAction, Verb,
};
#[cfg(feature = "browser")]
pub use clock::BrowserClock;
pub use clock::{Clock, ManualClock, SystemClock};
pub use config::{BridgeConfig, StoreConfig, DEFAULT_TTL_MS};
pub use error::{OptionError, StorageError};
pub use option::{
    clamp_duration, clamp_weight, generate_id, normalize, normalize_tags, OptionInput,
    WheelOption, MAX_DURATION_MINUTES, MAX_TAGS, MAX_WEIGHT, MIN_WEIGHT,
};
pub use selector::{filter_by_duration, filter_by_tags, select_random, select_random_with};
#[cfg(feature = "browser")]
pub use storage::LocalStorageBackend;
pub use storage::{InMemoryKeyValueStore, KeyValueStore};
pub use store::{total_weight, OptionStore};
