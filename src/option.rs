//! The option record and its normalization rules.
//!
//! Every option that reaches storage has passed through [`normalize`]:
//! text trimmed and non-empty, weight clamped to `1..=10`, duration either
//! absent or clamped to `0..=1440` minutes, at most five lowercase tags.

use rand::Rng;
use serde::{Deserialize, Deserializer, Serialize};

use crate::error::OptionError;

pub const MIN_WEIGHT: u8 = 1;
pub const MAX_WEIGHT: u8 = 10;
pub const DEFAULT_WEIGHT: u8 = 1;
pub const MAX_DURATION_MINUTES: u16 = 1440;
pub const MAX_TAGS: usize = 5;

/// Prefix for client-generated ids, keeps them apart from server-issued ones.
pub const LOCAL_ID_PREFIX: &str = "local-";

/// A weighted, optionally tagged and time-bounded choice.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct WheelOption {
    pub id: String,
    pub text: String,
    pub weight: u8,
    /// Minutes the option takes. `None` fits any time constraint.
    pub duration: Option<u16>,
    #[serde(default)]
    pub tags: Vec<String>,
}

impl WheelOption {
    /// True if every tag in `required` is present (case-insensitive).
    pub fn has_all_tags<S: AsRef<str>>(&self, required: &[S]) -> bool {
        required.iter().all(|tag| {
            let wanted = tag.as_ref().trim().to_lowercase();
            self.tags.iter().any(|t| *t == wanted)
        })
    }

    /// True if the option can be done within `ceiling` minutes.
    pub fn fits_within(&self, ceiling: u16) -> bool {
        self.duration.map_or(true, |d| d <= ceiling)
    }
}

/// Unvalidated, possibly partial option fields.
///
/// Used both for `add` (missing fields take defaults) and for `update`
/// (missing fields keep the stored value). `duration: Some(None)` clears a
/// stored duration; `duration: None` leaves it alone.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct OptionInput {
    #[serde(default)]
    pub id: Option<String>,
    #[serde(default)]
    pub text: Option<String>,
    #[serde(default)]
    pub weight: Option<i64>,
    #[serde(default, deserialize_with = "present")]
    pub duration: Option<Option<i64>>,
    #[serde(default)]
    pub tags: Option<Vec<String>>,
}

fn present<'de, D, T>(deserializer: D) -> Result<Option<T>, D::Error>
where
    D: Deserializer<'de>,
    T: Deserialize<'de>,
{
    T::deserialize(deserializer).map(Some)
}

impl OptionInput {
    pub fn new(text: impl Into<String>) -> Self {
        Self {
            text: Some(text.into()),
            ..Self::default()
        }
    }

    pub fn id(mut self, id: impl Into<String>) -> Self {
        self.id = Some(id.into());
        self
    }

    pub fn weight(mut self, weight: i64) -> Self {
        self.weight = Some(weight);
        self
    }

    pub fn duration(mut self, minutes: Option<i64>) -> Self {
        self.duration = Some(minutes);
        self
    }

    pub fn tags<I, S>(mut self, tags: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.tags = Some(tags.into_iter().map(Into::into).collect());
        self
    }

    /// Overlay these fields on an existing option. The existing id always wins.
    pub fn merged_over(self, existing: &WheelOption) -> OptionInput {
        OptionInput {
            id: Some(existing.id.clone()),
            text: self.text.or_else(|| Some(existing.text.clone())),
            weight: self.weight.or(Some(i64::from(existing.weight))),
            duration: self
                .duration
                .or(Some(existing.duration.map(i64::from))),
            tags: self.tags.or_else(|| Some(existing.tags.clone())),
        }
    }
}

impl From<&WheelOption> for OptionInput {
    fn from(option: &WheelOption) -> Self {
        OptionInput {
            id: Some(option.id.clone()),
            text: Some(option.text.clone()),
            weight: Some(i64::from(option.weight)),
            duration: Some(option.duration.map(i64::from)),
            tags: Some(option.tags.clone()),
        }
    }
}

pub fn clamp_weight(weight: Option<i64>) -> u8 {
    match weight {
        // zero is treated like a missing weight
        None | Some(0) => DEFAULT_WEIGHT,
        Some(w) => w.clamp(i64::from(MIN_WEIGHT), i64::from(MAX_WEIGHT)) as u8,
    }
}

pub fn clamp_duration(duration: Option<i64>) -> Option<u16> {
    duration.map(|d| d.clamp(0, i64::from(MAX_DURATION_MINUTES)) as u16)
}

/// Trim, lowercase, drop blanks and duplicates, keep the first five.
pub fn normalize_tags<S: AsRef<str>>(tags: &[S]) -> Vec<String> {
    let mut out: Vec<String> = Vec::with_capacity(MAX_TAGS);
    for tag in tags {
        let tag = tag.as_ref().trim().to_lowercase();
        if tag.is_empty() || out.contains(&tag) {
            continue;
        }
        out.push(tag);
        if out.len() == MAX_TAGS {
            break;
        }
    }
    out
}

/// Validate and clamp `input` into a storable option with the given id.
pub fn normalize(input: OptionInput, id: String) -> Result<WheelOption, OptionError> {
    let text = input.text.as_deref().unwrap_or("").trim().to_string();
    if text.is_empty() {
        return Err(OptionError::Validation("option text is required".into()));
    }

    Ok(WheelOption {
        id,
        text,
        weight: clamp_weight(input.weight),
        duration: clamp_duration(input.duration.flatten()),
        tags: normalize_tags(input.tags.as_deref().unwrap_or(&[])),
    })
}

/// Client-side id: `local-{epoch_ms}-{0..10000}`.
pub fn generate_id<R: Rng + ?Sized>(now_millis: u64, rng: &mut R) -> String {
    format!("{}{}-{}", LOCAL_ID_PREFIX, now_millis, rng.gen_range(0..10_000))
}
