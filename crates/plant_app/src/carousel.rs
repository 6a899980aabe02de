pub const CARD_WIDTH: f32 = 160.0;
pub const CARD_HEIGHT: f32 = 72.0;
pub const CARD_GAP: f32 = 12.0;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Direction {
    Previous,
    Next,
}

/// Scroll bookkeeping for the horizontal card strip.
#[derive(Debug, Clone, PartialEq)]
pub struct Carousel {
    offset: f32,
    max_offset: f32,
    card_width: f32,
    pending: Option<f32>,
}

impl Default for Carousel {
    fn default() -> Self {
        Self {
            offset: 0.0,
            max_offset: 0.0,
            card_width: CARD_WIDTH,
            pending: None,
        }
    }
}

impl Carousel {
    /// Distance moved by one arrow press: one rendered card plus the gap after it.
    pub fn stride(&self) -> f32 {
        self.card_width + CARD_GAP
    }

    pub fn scroll(&mut self, direction: Direction) {
        let delta = match direction {
            Direction::Previous => -self.stride(),
            Direction::Next => self.stride(),
        };
        let target = (self.offset + delta).clamp(0.0, self.max_offset);
        self.pending = Some(target);
        self.offset = target;
    }

    /// Offset to apply on the next frame, if an arrow was pressed.
    pub fn take_pending(&mut self) -> Option<f32> {
        self.pending.take()
    }

    /// Feeds back what the scroll area actually rendered.
    pub fn observe(&mut self, offset: f32, content_width: f32, viewport_width: f32, card_width: Option<f32>) {
        self.offset = offset;
        self.max_offset = (content_width - viewport_width).max(0.0);
        if let Some(width) = card_width.filter(|w| *w > 0.0) {
            self.card_width = width;
        }
    }

    pub fn offset(&self) -> f32 {
        self.offset
    }
}
