//! Page navigation for the level display.
//!
//! Press `Y` to toggle between pages.
//!
//! # Pages
//!
//! - [`Page::Level`]: Bar gauges and bullseye (or the gate screen while sensor
//!   access is pending)
//! - [`Page::Debug`]: Frame timing, sensor statistics and debug log terminal

/// Available pages in the level application.
#[derive(Clone, Copy, PartialEq, Eq, Default, Debug)]
pub enum Page {
    /// Main level view with two bars and the bullseye.
    #[default]
    Level,

    /// Debug/profiling page.
    Debug,
}

impl Page {
    /// Toggle to the next page (cycles between Level and Debug).
    #[inline]
    pub const fn toggle(self) -> Self {
        match self {
            Self::Level => Self::Debug,
            Self::Debug => Self::Level,
        }
    }

    pub const fn label(self) -> &'static str {
        match self {
            Self::Level => "Page: Level",
            Self::Debug => "Page: Debug",
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_page_default() {
        assert_eq!(Page::default(), Page::Level);
    }

    #[test]
    fn test_page_toggle() {
        assert_eq!(Page::Level.toggle(), Page::Debug);
        assert_eq!(Page::Debug.toggle(), Page::Level);
    }

    #[test]
    fn test_page_toggle_cycle() {
        let page = Page::Level;
        let page = page.toggle(); // -> Debug
        let page = page.toggle(); // -> Level
        assert_eq!(page, Page::Level);
    }
}
