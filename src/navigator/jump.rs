//! Jump-to-floor: validate a user-entered floor number, then navigate.

use std::fmt::Debug;
use std::hash::Hash;
use std::time::Instant;

use super::focus::Navigator;
use super::surface::RenderSurface;
use crate::error::{NavigatorError, Result};
use crate::models::Message;
use crate::notify::Notifier;

/// Parse a floor number typed by the user.
///
/// Rejects empty, non-numeric, negative and out-of-range input with a
/// [`NavigatorError::Validation`] whose message is suitable for display.
pub fn parse_floor(input: &str, transcript_len: usize) -> Result<usize> {
    let trimmed = input.trim();
    if trimmed.is_empty() {
        return Err(NavigatorError::Validation("Please enter a floor number".to_string()));
    }

    let floor: i64 = trimmed.parse().map_err(|_| {
        NavigatorError::Validation(format!("'{}' is not a valid floor number", trimmed))
    })?;

    if transcript_len == 0 {
        return Err(NavigatorError::Validation("The chat has no messages".to_string()));
    }
    if floor < 0 || floor as u64 >= transcript_len as u64 {
        return Err(NavigatorError::Validation(format!(
            "Floor {} is out of range (0-{})",
            floor,
            transcript_len - 1
        )));
    }

    Ok(floor as usize)
}

/// Validate `input` and jump to that floor. Validation failures are reported
/// through `notifier` and never reach the navigator.
pub fn jump_to_floor<E, S, N>(
    navigator: &mut Navigator<E>,
    transcript: &[Message],
    surface: &mut S,
    notifier: &mut N,
    input: &str,
    now: Instant,
) -> bool
where
    E: Clone + Eq + Hash + Debug,
    S: RenderSurface<Element = E> + ?Sized,
    N: Notifier + ?Sized,
{
    match parse_floor(input, transcript.len()) {
        Ok(floor) => navigator.jump_to_message(transcript, surface, notifier, floor, now),
        Err(e) => {
            notifier.notify_error(&e.to_string());
            false
        }
    }
}
