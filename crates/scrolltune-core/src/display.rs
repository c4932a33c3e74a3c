//! Display geometry collaborator.
//!
//! The resolver needs the pixel size of the display under the pointer to scale
//! the default acceleration curve. Querying the real display arrangement is the
//! host's job; it plugs in through [`DisplayGeometry`].

/// Pixel dimensions of a display
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct DisplaySize {
    pub width: u32,
    pub height: u32,
}

impl DisplaySize {
    pub const fn new(width: u32, height: u32) -> Self {
        Self { width, height }
    }
}

/// Where the scroll event happened
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct DisplayContext {
    /// Pointer location in global screen coordinates, if known
    pub pointer: Option<(f64, f64)>,
}

impl DisplayContext {
    pub fn at(x: f64, y: f64) -> Self {
        Self {
            pointer: Some((x, y)),
        }
    }
}

/// Answers which display is under the pointer
pub trait DisplayGeometry: Send + Sync {
    /// Size of the display under the pointer, or `None` if it cannot be determined
    fn display_size(&self, context: &DisplayContext) -> Option<DisplaySize>;
}

/// Single display of a fixed size
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FixedDisplay(pub DisplaySize);

impl DisplayGeometry for FixedDisplay {
    fn display_size(&self, _context: &DisplayContext) -> Option<DisplaySize> {
        Some(self.0)
    }
}

/// Displays laid out side by side in global coordinates
#[derive(Debug, Clone, Default, PartialEq)]
pub struct DisplayArrangement {
    /// `(origin_x, origin_y, size)` per display; the first one is the main display
    displays: Vec<(f64, f64, DisplaySize)>,
}

impl DisplayArrangement {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_display(mut self, origin_x: f64, origin_y: f64, size: DisplaySize) -> Self {
        self.displays.push((origin_x, origin_y, size));
        self
    }
}

impl DisplayGeometry for DisplayArrangement {
    fn display_size(&self, context: &DisplayContext) -> Option<DisplaySize> {
        let Some((px, py)) = context.pointer else {
            return self.displays.first().map(|(_, _, size)| *size);
        };
        self.displays
            .iter()
            .find(|(x, y, size)| {
                px >= *x && px < x + size.width as f64 && py >= *y && py < y + size.height as f64
            })
            .map(|(_, _, size)| *size)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_fixed_display() {
        let display = FixedDisplay(DisplaySize::new(2560, 1440));
        assert_eq!(
            display.display_size(&DisplayContext::default()),
            Some(DisplaySize::new(2560, 1440))
        );
    }

    #[test]
    fn test_arrangement_picks_display_under_pointer() {
        let layout = DisplayArrangement::new()
            .with_display(0.0, 0.0, DisplaySize::new(1920, 1080))
            .with_display(1920.0, 0.0, DisplaySize::new(3840, 2160));

        assert_eq!(
            layout.display_size(&DisplayContext::at(100.0, 100.0)),
            Some(DisplaySize::new(1920, 1080))
        );
        assert_eq!(
            layout.display_size(&DisplayContext::at(2000.0, 1500.0)),
            Some(DisplaySize::new(3840, 2160))
        );
        assert_eq!(layout.display_size(&DisplayContext::at(-5.0, 0.0)), None);
        assert_eq!(
            layout.display_size(&DisplayContext::default()),
            Some(DisplaySize::new(1920, 1080))
        );
    }
}
