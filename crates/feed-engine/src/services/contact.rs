//! Contact service
//!
//! Composes the outgoing message and deep link for contacting a seller, and
//! opens the external channel. The engagement write is best-effort: losing a
//! metric is less harmful than failing to connect a buyer and seller, so the
//! channel-open proceeds even when the write fails.

use chrono::{DateTime, Utc};
use tracing::{instrument, warn};

use feed_core::entities::ContactMethod;
use feed_core::error::DomainError;
use feed_core::value_objects::FeedId;

use super::context::EngineContext;
use super::engagement::EngagementTracker;
use super::error::{EngineError, EngineResult};

/// Strip everything but digits from a raw phone number
pub fn normalize_phone(raw: &str) -> Result<String, DomainError> {
    let digits: String = raw.chars().filter(char::is_ascii_digit).collect();
    if digits.is_empty() {
        return Err(DomainError::InvalidPhoneNumber(raw.to_string()));
    }
    Ok(digits)
}

/// Compose the outgoing message text for an item
pub fn compose_message(title: &str) -> String {
    format!("Hi! I saw \"{title}\" on the campus feed. Is it still available?")
}

/// Build the deep link for a contact method
fn compose_link(method: ContactMethod, raw_phone: &str, title: &str) -> Result<String, DomainError> {
    let digits = normalize_phone(raw_phone)?;
    let message = compose_message(title);

    Ok(match method {
        ContactMethod::Sms => {
            let query = url::form_urlencoded::Serializer::new(String::new())
                .append_pair("body", &message)
                .finish();
            format!("sms:{digits}?{query}")
        }
        ContactMethod::WhatsApp => {
            let query = url::form_urlencoded::Serializer::new(String::new())
                .append_pair("text", &message)
                .finish();
            format!("https://wa.me/{digits}?{query}")
        }
        ContactMethod::Call => format!("tel:{digits}"),
    })
}

/// Contact service
#[derive(Clone)]
pub struct ContactService {
    ctx: EngineContext,
    tracker: EngagementTracker,
}

impl ContactService {
    /// Create a new ContactService
    pub fn new(ctx: EngineContext, tracker: EngagementTracker) -> Self {
        Self { ctx, tracker }
    }

    /// Contact the seller of an item
    ///
    /// Records the contact event (best-effort), then opens the external
    /// channel. Returns the composed deep link.
    #[instrument(skip(self))]
    pub async fn contact_seller(
        &self,
        item_id: FeedId,
        method: ContactMethod,
        now: DateTime<Utc>,
    ) -> EngineResult<String> {
        let item = self
            .ctx
            .store()
            .item_by_id(item_id)
            .ok_or_else(|| EngineError::not_found("Item", item_id.to_string()))?;

        let phone = item
            .contact_phone
            .as_deref()
            .ok_or(DomainError::MissingContactPhone(item_id))?;
        let link = compose_link(method, phone, &item.title)?;

        // Telemetry must never gate the buyer-seller connection.
        if let Err(e) = self.tracker.record_contact(item_id, method, now).await {
            warn!(item_id = %item_id, error = %e, "Contact event write failed");
        }

        self.ctx.contact_channel().open(&link)?;
        Ok(link)
    }
}
