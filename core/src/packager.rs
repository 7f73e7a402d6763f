//! Forwarding of recognizer candidates to a slot renderer.

use crate::candidate::CandidateBatch;
use crate::canvas::Canvas;
use crate::renderer::{MessageId, Renderer};
use tracing::trace;

/// Package the canvas's current candidates and send them to `renderer`.
///
/// Sends the text row and the code point row under the same `id`, text
/// first. Returns the number of real candidates sent, or `None` when the
/// canvas had nothing to offer and no message went out.
pub fn package_and_send(
    canvas: &dyn Canvas,
    renderer: &mut dyn Renderer,
    id: MessageId,
) -> Option<usize> {
    let batch = CandidateBatch::pack(&canvas.candidates())?;
    let count = batch.len();

    for (text, cp) in batch.texts().iter().zip(batch.code_points()).take(count) {
        trace!(candidate = %text, code_point = cp, "packaged candidate");
    }

    let (texts, code_points) = batch.into_messages();
    renderer.send_message(id, texts);
    renderer.send_message(id, code_points);
    Some(count)
}
