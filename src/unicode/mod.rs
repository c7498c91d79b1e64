//! Column conversions for callers that address lines by codepoint,
//! grapheme cluster or display cell instead of by byte.
//!
//! The engine itself only accepts byte columns; these helpers translate
//! before calling it.

mod grapheme;
mod width;

pub use grapheme::{
    byte_to_char, byte_to_grapheme, char_count, char_to_byte, grapheme_count, grapheme_to_byte,
    graphemes,
};
pub use width::{
    WidthMethod, display_column, display_width, display_width_char_with_method,
    display_width_with_method,
};
