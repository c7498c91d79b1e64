//! Text styling with attributes and colors.
//!
//! - [`TextAttributes`]: Bitflags for bold, italic and underline
//! - [`Style`]: Foreground, background fill, attributes and underline color
//!
//! # Examples
//!
//! ```
//! use piecetext::{Rgba, Style, TextAttributes};
//!
//! let comment = Style::fg(Rgba::rgb(106, 115, 125)).with_italic();
//! assert!(comment.attributes.contains(TextAttributes::ITALIC));
//!
//! let error = Style::default().with_underline(Rgba::RED);
//! assert!(error.is_underlined());
//! ```

use crate::color::Rgba;
use bitflags::bitflags;

bitflags! {
    /// Text rendering attributes.
    #[derive(Clone, Copy, Debug, Default, Eq, PartialEq, Hash)]
    pub struct TextAttributes: u8 {
        /// Bold weight.
        const BOLD      = 0x01;
        /// Italic slant.
        const ITALIC    = 0x02;
        /// Underlined; color comes from [`Style::underline_color`].
        const UNDERLINE = 0x04;
    }
}

/// Complete style for a run of text.
///
/// A transparent `bg` means "no fill" and a transparent `underline_color`
/// means "use the foreground color".
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct Style {
    /// Foreground (glyph) color.
    pub fg: Rgba,
    /// Background fill.
    pub bg: Rgba,
    /// Rendering attributes.
    pub attributes: TextAttributes,
    /// Underline color when [`TextAttributes::UNDERLINE`] is set.
    pub underline_color: Rgba,
}

impl Style {
    /// Foreground used when nothing else applies.
    pub const DEFAULT_FG: Rgba = Rgba::rgb(220, 220, 220);

    /// Plain default text.
    pub const DEFAULT: Self = Self {
        fg: Self::DEFAULT_FG,
        bg: Rgba::TRANSPARENT,
        attributes: TextAttributes::empty(),
        underline_color: Rgba::TRANSPARENT,
    };

    /// Default style with the given foreground.
    #[must_use]
    pub const fn fg(color: Rgba) -> Self {
        Self {
            fg: color,
            ..Self::DEFAULT
        }
    }

    /// Return a copy with a background fill.
    #[must_use]
    pub const fn with_bg(self, color: Rgba) -> Self {
        Self { bg: color, ..self }
    }

    /// Return a copy with bold set.
    #[must_use]
    pub fn with_bold(mut self) -> Self {
        self.attributes |= TextAttributes::BOLD;
        self
    }

    /// Return a copy with italic set.
    #[must_use]
    pub fn with_italic(mut self) -> Self {
        self.attributes |= TextAttributes::ITALIC;
        self
    }

    /// Return a copy underlined in `color`.
    #[must_use]
    pub fn with_underline(mut self, color: Rgba) -> Self {
        self.attributes |= TextAttributes::UNDERLINE;
        self.underline_color = color;
        self
    }

    /// True when the style paints a background.
    #[must_use]
    pub const fn has_bg(&self) -> bool {
        !self.bg.is_transparent()
    }

    /// True when the underline attribute is set.
    #[must_use]
    pub fn is_underlined(&self) -> bool {
        self.attributes.contains(TextAttributes::UNDERLINE)
    }

    /// True when the bold attribute is set.
    #[must_use]
    pub fn is_bold(&self) -> bool {
        self.attributes.contains(TextAttributes::BOLD)
    }

    /// True when the italic attribute is set.
    #[must_use]
    pub fn is_italic(&self) -> bool {
        self.attributes.contains(TextAttributes::ITALIC)
    }
}

impl Default for Style {
    fn default() -> Self {
        Self::DEFAULT
    }
}
