//! Extraction of a slot's confirmed result.

use crate::renderer::{Message, MessageId, Renderer, SharedRenderer, WeakRenderer, PART_RESULT};
use std::rc::Weak;
use tracing::debug;

/// Take the renderer's confirmed text, forward it to `parent` and clear it.
///
/// The parent receives the text before the result part is cleared and before
/// the caller raises any notification with the returned value. An empty or
/// missing result part leaves everything untouched and returns `None`, so
/// repeated calls without new input forward nothing.
pub fn extract_and_forward(
    renderer: &mut dyn Renderer,
    parent: Option<&WeakRenderer>,
    id: MessageId,
) -> Option<String> {
    let text = renderer.part_text(PART_RESULT).filter(|t| !t.is_empty())?;
    debug!(result = %text, "confirmed result");

    if let Some(parent) = parent.and_then(Weak::upgrade) {
        forward(&parent, id, &text);
    }

    renderer.set_part_text(PART_RESULT, "");
    Some(text)
}

fn forward(parent: &SharedRenderer, id: MessageId, text: &str) {
    parent
        .borrow_mut()
        .send_message(id, Message::String(text.to_string()));
}
