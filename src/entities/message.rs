//! Private messages between profiles

use crate::core::specification::Specification;
use uuid::Uuid;

crate::impl_entity!(
    Message,
    "message",
    "messages",
    {
        sender_id: Uuid,
        recipient_id: Uuid,
        subject: String,
        body: String,
        read: bool,
    }
);

/// Unread messages addressed to `recipient_id`
pub fn unread_for(recipient_id: Uuid) -> Specification<Message> {
    Specification::named("unread message for recipient", move |m: &Message| {
        m.recipient_id == recipient_id && !m.read
    })
}

/// Messages exchanged between two profiles, in either direction
pub fn between(a: Uuid, b: Uuid) -> Specification<Message> {
    Specification::named("message between profiles", move |m: &Message| {
        (m.sender_id == a && m.recipient_id == b) || (m.sender_id == b && m.recipient_id == a)
    })
}

pub fn subject_contains(text: impl Into<String>) -> Specification<Message> {
    let text = text.into();
    Specification::named(format!("message subject contains {:?}", text), move |m: &Message| {
        m.subject.contains(text.as_str())
    })
}
