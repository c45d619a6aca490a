//! FeedItem entity <-> record mapper

use feed_core::entities::FeedItem;
use feed_core::error::DomainError;
use feed_core::value_objects::FeedId;

use crate::models::ItemRecord;

/// Convert ItemRecord to FeedItem entity
///
/// Fails only on an unrecognized media kind, which indicates a newer backend
/// schema than this client understands.
impl TryFrom<ItemRecord> for FeedItem {
    type Error = DomainError;

    fn try_from(record: ItemRecord) -> Result<Self, Self::Error> {
        let media_kind = record
            .media_kind
            .parse()
            .map_err(DomainError::ValidationError)?;

        Ok(FeedItem {
            id: FeedId::from_uuid(record.id),
            owner_id: FeedId::from_uuid(record.owner_id),
            title: record.title,
            description: record.description,
            media_url: record.media_url,
            media_kind,
            text_color: record.text_color,
            is_text_only: record.is_text_only,
            price: record.price,
            location: record.location,
            category: record.category,
            contact_phone: record.contact_phone,
            created_at: record.created_at,
            expires_at: record.expires_at,
            view_count: record.view_count,
            contact_count: record.contact_count,
            reaction_count: record.reaction_count,
            comment_count: record.comment_count,
        })
    }
}

/// Convert FeedItem entity reference to a wire record
impl From<&FeedItem> for ItemRecord {
    fn from(item: &FeedItem) -> Self {
        ItemRecord {
            id: item.id.into_inner(),
            owner_id: item.owner_id.into_inner(),
            title: item.title.clone(),
            description: item.description.clone(),
            media_url: item.media_url.clone(),
            media_kind: item.media_kind.to_string(),
            text_color: item.text_color.clone(),
            is_text_only: item.is_text_only,
            price: item.price,
            location: item.location.clone(),
            category: item.category.clone(),
            contact_phone: item.contact_phone.clone(),
            created_at: item.created_at,
            expires_at: item.expires_at,
            view_count: item.view_count,
            contact_count: item.contact_count,
            reaction_count: item.reaction_count,
            comment_count: item.comment_count,
        }
    }
}
