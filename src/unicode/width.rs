//! Display width of line text.

use unicode_width::{UnicodeWidthChar, UnicodeWidthStr};

/// Width calculation method for ambiguous-width characters.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum WidthMethod {
    /// POSIX-like wcwidth: ambiguous width = 1.
    #[default]
    WcWidth,
    /// Unicode East Asian Width: ambiguous width = 2.
    Unicode,
}

/// Display width of `s` in cells (wcwidth rules).
#[must_use]
pub fn display_width(s: &str) -> usize {
    display_width_with_method(s, WidthMethod::WcWidth)
}

/// Display width of `s` in cells using a specific method.
#[must_use]
pub fn display_width_with_method(s: &str, method: WidthMethod) -> usize {
    match method {
        WidthMethod::WcWidth => UnicodeWidthStr::width(s),
        WidthMethod::Unicode => UnicodeWidthStr::width_cjk(s),
    }
}

/// Display width of `c` in cells using a specific method.
#[must_use]
pub fn display_width_char_with_method(c: char, method: WidthMethod) -> usize {
    match method {
        WidthMethod::WcWidth => UnicodeWidthChar::width(c).unwrap_or(0),
        WidthMethod::Unicode => UnicodeWidthChar::width_cjk(c).unwrap_or(0),
    }
}

/// Visual column of byte offset `byte` in `line`, expanding tabs to the
/// next multiple of `tab_width`.
#[must_use]
pub fn display_column(line: &str, byte: usize, tab_width: usize, method: WidthMethod) -> usize {
    let tab_width = tab_width.max(1);
    let mut col = 0;
    for (i, c) in line.char_indices() {
        if i >= byte {
            break;
        }
        col += if c == '\t' {
            tab_width - col % tab_width
        } else {
            display_width_char_with_method(c, method)
        };
    }
    col
}
