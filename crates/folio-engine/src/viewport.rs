//! Viewport measurement and scroll adapter
//!
//! The engine never touches the DOM. Hosts implement [`ScrollSurface`] as a
//! thin adapter over the window (or any scroll container) and the engine
//! reads/writes plain numbers through it.

/// Scroll position access for one scroll container
pub trait ScrollSurface {
    /// Current vertical scroll offset in pixels
    fn scroll_y(&self) -> f32;

    /// Jump to a vertical scroll offset (no smooth behavior)
    fn scroll_to(&mut self, y: f32);

    /// Visible height of the container in pixels
    fn viewport_height(&self) -> f32;
}

/// In-memory scroll surface for tests and headless hosts
///
/// Records every write so tests can assert on the exact frame sequence.
#[derive(Clone, Debug, Default)]
pub struct MemoryViewport {
    scroll_y: f32,
    height: f32,
    writes: Vec<f32>,
}

impl MemoryViewport {
    /// Create a viewport of the given height scrolled to the top
    pub fn new(height: f32) -> Self {
        Self {
            scroll_y: 0.0,
            height,
            writes: Vec::new(),
        }
    }

    /// Simulate a user scroll (not recorded as an engine write)
    pub fn user_scroll(&mut self, y: f32) {
        self.scroll_y = y.max(0.0);
    }

    /// Simulate a window resize
    pub fn resize(&mut self, height: f32) {
        self.height = height;
    }

    /// Every offset written through [`ScrollSurface::scroll_to`]
    pub fn writes(&self) -> &[f32] {
        &self.writes
    }

    /// Forget recorded writes
    pub fn clear_writes(&mut self) {
        self.writes.clear();
    }
}

impl ScrollSurface for MemoryViewport {
    fn scroll_y(&self) -> f32 {
        self.scroll_y
    }

    fn scroll_to(&mut self, y: f32) {
        let y = y.max(0.0);
        self.scroll_y = y;
        self.writes.push(y);
    }

    fn viewport_height(&self) -> f32 {
        self.height
    }
}
