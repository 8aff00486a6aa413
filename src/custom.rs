//! Request-time custom sections.
//!
//! A [`CustomSection`] pairs a registered name with a producer closure.
//! Producers run once per request; a failing producer only loses its own
//! section.
use serde::Serialize;
use std::fmt;
use std::panic::{self, AssertUnwindSafe};
use std::sync::Arc;

/// Display data returned by a producer.
pub type PayloadMap = serde_json::Map<String, serde_json::Value>;

type Producer = dyn Fn() -> anyhow::Result<serde_json::Value> + Send + Sync;

/// A registered producer of one dashboard section.
#[derive(Clone)]
pub struct CustomSection {
    name: String,
    producer: Arc<Producer>,
}

impl CustomSection {
    /// Register `producer` under `name`.
    ///
    /// `name` becomes the section id whenever the payload carries none.
    pub fn new<F>(name: impl Into<String>, producer: F) -> Self
    where
        F: Fn() -> anyhow::Result<serde_json::Value> + Send + Sync + 'static,
    {
        Self {
            name: name.into(),
            producer: Arc::new(producer),
        }
    }

    /// A section whose payload never changes.
    #[must_use]
    pub fn fixed(name: impl Into<String>, payload: PayloadMap) -> Self {
        let payload = serde_json::Value::Object(payload);
        Self::new(name, move || Ok(payload.clone()))
    }

    /// The registered name.
    #[must_use]
    pub fn name(&self) -> &str {
        &self.name
    }
}

impl fmt::Debug for CustomSection {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("CustomSection")
            .field("name", &self.name)
            .finish_non_exhaustive()
    }
}

/// A produced section: its identifier plus the producer's display data.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SectionPayload {
    /// Section identifier used for ordering.
    ///
    /// `None` when the producer supplied an `id` that is not a string; that
    /// value stays in `data` and the section gets no default-order slot.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub id: Option<String>,
    /// Everything else the producer returned.
    #[serde(flatten)]
    pub data: PayloadMap,
}

impl SectionPayload {
    /// Build a payload, taking a string `id` out of `data`.
    ///
    /// `fallback_id` is used only when `data` has no `id` key at all.
    #[must_use]
    pub fn from_data(mut data: PayloadMap, fallback_id: &str) -> Self {
        let id = match data.remove("id") {
            None => Some(fallback_id.to_string()),
            Some(serde_json::Value::String(id)) => Some(id),
            Some(other) => {
                data.insert("id".to_string(), other);
                None
            }
        };
        Self { id, data }
    }

    /// The identifier this section is ordered by, if it has a usable one.
    #[must_use]
    pub fn order_id(&self) -> Option<&str> {
        self.id.as_deref().filter(|id| !id.is_empty())
    }
}

/// Run one producer, turning errors and panics into a message.
fn invoke(section: &CustomSection) -> Result<SectionPayload, String> {
    let outcome = panic::catch_unwind(AssertUnwindSafe(|| (section.producer)()))
        .map_err(|cause| panic_message(cause.as_ref()))?;
    match outcome.map_err(|e| format!("{e:#}"))? {
        serde_json::Value::Object(data) => Ok(SectionPayload::from_data(data, &section.name)),
        other => Err(format!("expected an object payload, got {other}")),
    }
}

fn panic_message(cause: &(dyn std::any::Any + Send)) -> String {
    cause
        .downcast_ref::<&str>()
        .map(|s| (*s).to_string())
        .or_else(|| cause.downcast_ref::<String>().cloned())
        .unwrap_or_else(|| "producer panicked".to_string())
}

/// Invoke every producer in order and keep the payloads that succeeded.
///
/// Failures are logged and the section is dropped; they never affect the
/// other sections.
#[must_use]
pub fn collect_custom_sections(sections: &[CustomSection]) -> Vec<SectionPayload> {
    sections
        .iter()
        .filter_map(|section| match invoke(section) {
            Ok(payload) => {
                tracing::debug!(
                    "custom section '{}' produced id {:?}",
                    section.name,
                    payload.id
                );
                Some(payload)
            }
            Err(reason) => {
                tracing::error!(
                    "Error executing custom section function '{}': {reason}",
                    section.name
                );
                None
            }
        })
        .collect()
}
