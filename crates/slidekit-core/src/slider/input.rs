use crate::scheduler::AutoplayToken;

/// Keys a slider reacts to when keyboard navigation is enabled
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NavKey {
    Left,
    Right,
}

/// Input events a slider controller accepts
#[derive(Debug, Clone, PartialEq)]
pub enum SliderInput {
    /// Next button
    Next,
    /// Previous button
    Prev,
    /// Pagination dot
    GoToPage(usize),
    /// Mouse down / touch start at x (px)
    PointerDown(f64),
    /// Mouse move / touch move at x (px)
    PointerMove(f64),
    /// Mouse up / touch end
    PointerUp,
    /// Touch cancelled; treated like a regular end
    PointerCancel,
    /// Pointer entered the slider container
    PointerEnter,
    /// Pointer left the slider container
    PointerLeave,
    /// Viewport was resized
    Resize,
    /// Category selector changed
    CategoryChanged(String),
    Key(NavKey),
    AutoplayTick(AutoplayToken),
}
