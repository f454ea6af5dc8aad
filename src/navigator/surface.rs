/// Vertical alignment for scrolling an element into view
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ScrollAlign {
    Start,
    Center,
    End,
}

/// The host's rendered view of the transcript.
///
/// A message can exist in the transcript without being rendered (lazy or
/// virtualized history). [`RenderSurface::lookup_rendered_element`] is the only
/// way the navigator learns whether a message is currently materialized.
pub trait RenderSurface {
    /// Handle to a rendered message
    type Element;

    fn lookup_rendered_element(&self, index: usize) -> Option<Self::Element>;

    fn scroll_into_view(&mut self, element: &Self::Element, align: ScrollAlign);

    fn set_highlight_state(&mut self, element: &Self::Element, highlighted: bool);
}
