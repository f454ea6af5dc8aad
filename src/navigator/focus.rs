//! Resolve a message index to a rendered element, scroll to it, and manage the
//! transient highlight.
//!
//! # Highlight tokens
//!
//! Every focus issues a fresh token from a monotonic counter and schedules a
//! removal carrying that token. Removals are never cancelled, but when one
//! fires it only clears the highlight if its token is still the element's
//! latest. Focusing the same element repeatedly therefore extends the
//! highlight instead of letting an older timer cut a newer one short.

use std::collections::HashMap;
use std::fmt::Debug;
use std::hash::Hash;
use std::time::{Duration, Instant};

use super::surface::{RenderSurface, ScrollAlign};
use crate::models::{Message, NavigationOutcome, NotFoundReason};
use crate::notify::Notifier;

pub const DEFAULT_HIGHLIGHT_DURATION: Duration = Duration::from_millis(2000);

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct NavigatorConfig {
    /// Apply a transient highlight to the element after jumping
    pub highlight: bool,
    pub highlight_duration: Duration,
    /// Scroll the element to the viewport centre
    pub auto_scroll: bool,
}

impl Default for NavigatorConfig {
    fn default() -> Self {
        Self { highlight: true, highlight_duration: DEFAULT_HIGHLIGHT_DURATION, auto_scroll: true }
    }
}

#[derive(Debug, Clone)]
struct ScheduledRemoval<E> {
    element: E,
    token: u64,
    due: Instant,
}

pub struct Navigator<E> {
    config: NavigatorConfig,
    last_token: u64,
    /// Latest token per highlighted element
    active: HashMap<E, u64>,
    scheduled: Vec<ScheduledRemoval<E>>,
}

impl<E> Navigator<E>
where
    E: Clone + Eq + Hash + Debug,
{
    pub fn new(config: NavigatorConfig) -> Self {
        Self { config, last_token: 0, active: HashMap::new(), scheduled: Vec::new() }
    }

    pub fn config(&self) -> &NavigatorConfig {
        &self.config
    }

    pub fn set_config(&mut self, config: NavigatorConfig) {
        self.config = config;
    }

    /// Locate the rendered element for `index`, scroll it to centre and highlight it.
    ///
    /// Out-of-range indices are rejected before the surface is consulted.
    pub fn resolve_and_focus<S>(
        &mut self,
        transcript: &[Message],
        surface: &mut S,
        index: usize,
        now: Instant,
    ) -> NavigationOutcome<E>
    where
        S: RenderSurface<Element = E> + ?Sized,
    {
        if index >= transcript.len() {
            tracing::debug!(index, len = transcript.len(), "Navigation target out of range");
            return NavigationOutcome::NotFound(NotFoundReason::OutOfRange);
        }

        let Some(element) = surface.lookup_rendered_element(index) else {
            tracing::debug!(index, "Navigation target not rendered");
            return NavigationOutcome::NotFound(NotFoundReason::NotRendered);
        };

        if self.config.auto_scroll {
            surface.scroll_into_view(&element, ScrollAlign::Center);
        }
        if self.config.highlight {
            self.highlight(surface, element.clone(), now);
        }

        tracing::debug!(index, "Focused message");
        NavigationOutcome::Found(element)
    }

    /// [`Self::resolve_and_focus`], reporting failures through `notifier`.
    /// Returns whether the jump succeeded.
    pub fn jump_to_message<S, N>(
        &mut self,
        transcript: &[Message],
        surface: &mut S,
        notifier: &mut N,
        index: usize,
        now: Instant,
    ) -> bool
    where
        S: RenderSurface<Element = E> + ?Sized,
        N: Notifier + ?Sized,
    {
        match self.resolve_and_focus(transcript, surface, index, now) {
            NavigationOutcome::Found(_) => true,
            NavigationOutcome::NotFound(reason) => {
                notifier.notify_error(reason.user_message());
                false
            }
        }
    }

    fn highlight<S>(&mut self, surface: &mut S, element: E, now: Instant)
    where
        S: RenderSurface<Element = E> + ?Sized,
    {
        self.last_token += 1;
        let token = self.last_token;

        surface.set_highlight_state(&element, true);
        self.active.insert(element.clone(), token);
        self.scheduled.push(ScheduledRemoval {
            element,
            token,
            due: now + self.config.highlight_duration,
        });
    }

    /// Fire every removal due at `now`. Returns how many highlights were cleared.
    pub fn tick<S>(&mut self, surface: &mut S, now: Instant) -> usize
    where
        S: RenderSurface<Element = E> + ?Sized,
    {
        let (due, pending): (Vec<_>, Vec<_>) =
            std::mem::take(&mut self.scheduled).into_iter().partition(|r| now >= r.due);
        self.scheduled = pending;

        let mut cleared = 0;
        for removal in due {
            if self.active.get(&removal.element) != Some(&removal.token) {
                continue;
            }
            self.active.remove(&removal.element);
            surface.set_highlight_state(&removal.element, false);
            cleared += 1;
        }
        cleared
    }

    /// Earliest pending removal deadline
    pub fn next_deadline(&self) -> Option<Instant> {
        self.scheduled.iter().map(|r| r.due).min()
    }

    pub fn is_highlighted(&self, element: &E) -> bool {
        self.active.contains_key(element)
    }

    /// Latest highlight token for `element`, if it is highlighted
    pub fn active_token(&self, element: &E) -> Option<u64> {
        self.active.get(element).copied()
    }

    /// Scheduled removals that will actually clear a highlight when they fire
    pub fn effective_removals(&self) -> usize {
        self.scheduled.iter().filter(|r| self.active.get(&r.element) == Some(&r.token)).count()
    }

    pub fn pending_removals(&self) -> usize {
        self.scheduled.len()
    }

    /// Clear every highlight and forget all timers (panel teardown)
    pub fn reset<S>(&mut self, surface: &mut S)
    where
        S: RenderSurface<Element = E> + ?Sized,
    {
        for element in self.active.keys() {
            surface.set_highlight_state(element, false);
        }
        self.active.clear();
        self.scheduled.clear();
    }
}

impl<E> Default for Navigator<E>
where
    E: Clone + Eq + Hash + Debug,
{
    fn default() -> Self {
        Self::new(NavigatorConfig::default())
    }
}
