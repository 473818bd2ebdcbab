//! Manual rect comparison standing in for an intersection observer.

/// Visible window of the scroll container, in document coordinates.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Viewport {
    pub scroll_top: f64,
    pub height: f64,
    /// Grows the viewport on both ends so loading starts before the
    /// sentinel is actually on screen.
    pub root_margin: f64,
}

/// Marker element placed after the last photo.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Sentinel {
    pub offset_top: f64,
    pub height: f64,
}

impl Viewport {
    pub fn new(scroll_top: f64, height: f64) -> Self {
        Self {
            scroll_top,
            height,
            root_margin: 0.0,
        }
    }

    pub fn with_root_margin(mut self, margin: f64) -> Self {
        self.root_margin = margin;
        self
    }

    pub fn reveals(&self, sentinel: &Sentinel) -> bool {
        let top = self.scroll_top - self.root_margin;
        let bottom = self.scroll_top + self.height + self.root_margin;

        let sentinel_bottom = sentinel.offset_top + sentinel.height.max(0.0);

        // a zero-height sentinel still counts when it sits inside the window
        sentinel.offset_top <= bottom && sentinel_bottom >= top
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn sentinel_below_fold() {
        let viewport = Viewport::new(0.0, 800.0);
        let sentinel = Sentinel {
            offset_top: 2000.0,
            height: 1.0,
        };

        assert!(!viewport.reveals(&sentinel));
        assert!(Viewport::new(1300.0, 800.0).reveals(&sentinel));
    }

    #[test]
    fn root_margin_reveals_early() {
        let sentinel = Sentinel {
            offset_top: 1000.0,
            height: 0.0,
        };

        assert!(!Viewport::new(0.0, 800.0).reveals(&sentinel));
        assert!(Viewport::new(0.0, 800.0)
            .with_root_margin(200.0)
            .reveals(&sentinel));
    }

    #[test]
    fn scrolled_past() {
        let sentinel = Sentinel {
            offset_top: 100.0,
            height: 10.0,
        };

        assert!(!Viewport::new(500.0, 800.0).reveals(&sentinel));
    }
}
