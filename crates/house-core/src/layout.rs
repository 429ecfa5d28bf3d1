use crate::constants::MINI_MIN_VIEWPORT_WIDTH;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Display {
    None,
    Block,
}

impl Display {
    pub fn as_css(self) -> &'static str {
        match self {
            Display::None => "none",
            Display::Block => "block",
        }
    }
}

/// The mini widget stays out of the way on narrow screens.
#[inline]
pub fn mini_widget_display(viewport_width: f64) -> Display {
    if viewport_width < MINI_MIN_VIEWPORT_WIDTH {
        Display::None
    } else {
        Display::Block
    }
}

/// Whether a section whose bounding rect spans `top..bottom` (client
/// coordinates) overlaps a viewport of the given height.
#[inline]
pub fn section_in_view(top: f64, bottom: f64, viewport_height: f64) -> bool {
    top < viewport_height && bottom > 0.0
}

/// What the render loop should do after a scroll-driven visibility check.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum LoopAction {
    Pause,
    Resume,
    Keep,
}

#[inline]
pub fn loop_action(visible: bool, running: bool) -> LoopAction {
    match (visible, running) {
        (false, true) => LoopAction::Pause,
        (true, false) => LoopAction::Resume,
        _ => LoopAction::Keep,
    }
}
