//! The terminal's rendering of the chat transcript.
//!
//! Like a chat frontend that only materializes recent history, only the newest
//! `render_window` messages are rendered at first; older ones appear as the
//! user loads more. Navigation goes through the [`RenderSurface`] impl.

use std::collections::HashSet;
use std::ops::Range;

use crate::navigator::{RenderSurface, ScrollAlign};

pub const DEFAULT_RENDER_WINDOW: usize = 50;

#[derive(Debug, Clone)]
pub struct TranscriptView {
    len: usize,
    /// First rendered message index
    loaded_from: usize,
    load_step: usize,
    /// First visible message index
    scroll_top: usize,
    /// How many messages fit in the viewport
    viewport: usize,
    highlighted: HashSet<usize>,
}

impl TranscriptView {
    pub fn new(len: usize, render_window: usize) -> Self {
        let load_step = render_window.max(1);
        let mut view = Self {
            len,
            loaded_from: len.saturating_sub(load_step),
            load_step,
            scroll_top: 0,
            viewport: 1,
            highlighted: HashSet::new(),
        };
        view.scroll_to_bottom();
        view
    }

    pub fn len(&self) -> usize {
        self.len
    }

    pub fn is_empty(&self) -> bool {
        self.len == 0
    }

    pub fn loaded_from(&self) -> usize {
        self.loaded_from
    }

    pub fn is_rendered(&self, index: usize) -> bool {
        (self.loaded_from..self.len).contains(&index)
    }

    pub fn is_highlighted(&self, index: usize) -> bool {
        self.highlighted.contains(&index)
    }

    pub fn set_viewport(&mut self, messages: usize) {
        self.viewport = messages.max(1);
        self.scroll_top = self.clamp_top(self.scroll_top);
    }

    /// Render the next batch of older messages. Returns how many were added.
    pub fn load_more(&mut self) -> usize {
        let before = self.loaded_from;
        self.loaded_from = self.loaded_from.saturating_sub(self.load_step);
        before - self.loaded_from
    }

    /// Adopt a new transcript length after the host reloaded the chat.
    ///
    /// The same number of trailing messages stays rendered; highlights are
    /// dropped because indices may now point at different messages.
    pub fn sync_len(&mut self, len: usize) {
        let rendered = self.len - self.loaded_from;
        self.len = len;
        self.loaded_from = len.saturating_sub(rendered.max(self.load_step));
        self.highlighted.clear();
        self.scroll_to_bottom();
    }

    pub fn scroll_by(&mut self, delta: isize) {
        let target = self.scroll_top.saturating_add_signed(delta);
        self.scroll_top = self.clamp_top(target);
    }

    pub fn scroll_to_bottom(&mut self) {
        self.scroll_top = self.clamp_top(usize::MAX);
    }

    /// Indices of the messages currently on screen
    pub fn visible_range(&self) -> Range<usize> {
        self.scroll_top..(self.scroll_top + self.viewport).min(self.len)
    }

    fn clamp_top(&self, top: usize) -> usize {
        let max_top = self.len.saturating_sub(self.viewport).max(self.loaded_from);
        top.clamp(self.loaded_from, max_top.max(self.loaded_from))
    }
}

impl RenderSurface for TranscriptView {
    type Element = usize;

    fn lookup_rendered_element(&self, index: usize) -> Option<usize> {
        self.is_rendered(index).then_some(index)
    }

    fn scroll_into_view(&mut self, element: &usize, align: ScrollAlign) {
        let target = match align {
            ScrollAlign::Start => *element,
            ScrollAlign::Center => element.saturating_sub(self.viewport / 2),
            ScrollAlign::End => (element + 1).saturating_sub(self.viewport),
        };
        self.scroll_top = self.clamp_top(target);
    }

    fn set_highlight_state(&mut self, element: &usize, highlighted: bool) {
        if highlighted {
            self.highlighted.insert(*element);
        } else {
            self.highlighted.remove(element);
        }
    }
}
