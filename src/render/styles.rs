//! Output palette for the text renderer.
//!
//! The palette is installed once per process with [`register`]; later calls leave
//! it untouched. Until something registers, [`palette`] is plain text.

use std::sync::OnceLock;

/// Escape sequences wrapped around styled spans. Empty strings mean no styling.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Palette {
    pub heading: &'static str,
    pub dim: &'static str,
    pub link: &'static str,
    pub reset: &'static str,
}

impl Palette {
    pub const fn plain() -> Self {
        Self {
            heading: "",
            dim: "",
            link: "",
            reset: "",
        }
    }

    /// Bold headings, dimmed metadata, underlined links.
    pub const fn ansi() -> Self {
        Self {
            heading: "\x1b[1m",
            dim: "\x1b[2m",
            link: "\x1b[4m",
            reset: "\x1b[0m",
        }
    }
}

static PALETTE: OnceLock<Palette> = OnceLock::new();

/// Installs `palette`. Returns `false` if one was already installed.
pub fn register(palette: Palette) -> bool {
    PALETTE.set(palette).is_ok()
}

/// The installed palette, or [`Palette::plain`] if none was registered.
pub fn palette() -> &'static Palette {
    PALETTE.get_or_init(Palette::plain)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_register_is_idempotent() {
        // Another test may already have read the palette; either way the second
        // registration must be refused and the palette must stay plain.
        let _ = register(Palette::plain());
        assert!(!register(Palette::ansi()));
        assert_eq!(palette(), &Palette::plain());
    }
}
