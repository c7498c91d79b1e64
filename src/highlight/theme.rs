//! Token-kind to style mapping.

use crate::color::Rgba;
use crate::highlight::token::TokenKind;
use crate::style::Style;

/// Maps every [`TokenKind`] to a [`Style`].
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct SyntaxTheme {
    name: String,
    styles: [Style; TokenKind::COUNT],
}

impl Default for SyntaxTheme {
    fn default() -> Self {
        Self::dark()
    }
}

impl SyntaxTheme {
    /// Theme where every kind uses `base`.
    #[must_use]
    pub fn new(name: impl Into<String>, base: Style) -> Self {
        Self {
            name: name.into(),
            styles: [base; TokenKind::COUNT],
        }
    }

    #[must_use]
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Style for a token kind.
    #[must_use]
    pub fn style_for(&self, kind: TokenKind) -> Style {
        self.styles[kind.as_usize()]
    }

    /// Style for untokenized text.
    #[must_use]
    pub fn plain(&self) -> Style {
        self.style_for(TokenKind::Plain)
    }

    pub fn set_style(&mut self, kind: TokenKind, style: Style) -> &mut Self {
        self.styles[kind.as_usize()] = style;
        self
    }

    #[must_use]
    pub fn with_style(mut self, kind: TokenKind, style: Style) -> Self {
        self.set_style(kind, style);
        self
    }

    /// Default dark palette.
    #[must_use]
    pub fn dark() -> Self {
        let string = Style::fg(Rgba::rgb(152, 195, 121));
        Self::new("Dark", Style::fg(Rgba::rgb(220, 220, 220)))
            .with_style(TokenKind::Keyword, Style::fg(Rgba::rgb(198, 120, 221)))
            .with_style(TokenKind::Type, Style::fg(Rgba::rgb(86, 182, 194)))
            .with_style(TokenKind::StringLiteral, string)
            .with_style(TokenKind::CharLiteral, string)
            .with_style(TokenKind::Number, Style::fg(Rgba::rgb(209, 154, 102)))
            .with_style(TokenKind::Comment, Style::fg(Rgba::rgb(106, 115, 125)))
            .with_style(TokenKind::Preprocessor, Style::fg(Rgba::rgb(224, 108, 117)))
    }

    /// Palette for light backgrounds.
    #[must_use]
    pub fn light() -> Self {
        let string = Style::fg(Rgba::rgb(3, 47, 98));
        Self::new("Light", Style::fg(Rgba::rgb(36, 41, 46)))
            .with_style(TokenKind::Keyword, Style::fg(Rgba::rgb(215, 58, 73)))
            .with_style(TokenKind::Type, Style::fg(Rgba::rgb(0, 92, 197)))
            .with_style(TokenKind::StringLiteral, string)
            .with_style(TokenKind::CharLiteral, string)
            .with_style(TokenKind::Number, Style::fg(Rgba::rgb(111, 66, 193)))
            .with_style(
                TokenKind::Comment,
                Style::fg(Rgba::rgb(106, 115, 125)).with_italic(),
            )
            .with_style(TokenKind::Preprocessor, Style::fg(Rgba::rgb(34, 134, 58)))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn theme_fallback_and_override() {
        let theme = SyntaxTheme::new("Test", Style::DEFAULT);
        assert_eq!(theme.style_for(TokenKind::Keyword), Style::DEFAULT);

        let custom = Style::fg(Rgba::RED).with_bold();
        let themed = theme.with_style(TokenKind::Keyword, custom);
        assert_eq!(themed.style_for(TokenKind::Keyword), custom);
        assert_eq!(themed.style_for(TokenKind::Number), Style::DEFAULT);
    }

    #[test]
    fn dark_palette() {
        let theme = SyntaxTheme::default();
        assert_eq!(theme.name(), "Dark");
        assert_eq!(theme.plain().fg, Style::DEFAULT_FG);
        assert_eq!(theme.style_for(TokenKind::Comment).fg.r, 106);
        assert_eq!(theme.style_for(TokenKind::Type).fg.r, 86);
        assert_eq!(
            theme.style_for(TokenKind::StringLiteral),
            theme.style_for(TokenKind::CharLiteral)
        );
    }

    #[test]
    fn light_palette_distinguishes_kinds() {
        let theme = SyntaxTheme::light();
        for kind in TokenKind::ALL.into_iter().skip(1) {
            assert_ne!(theme.style_for(kind).fg, theme.plain().fg, "{kind:?}");
        }
        assert!(theme.style_for(TokenKind::Comment).is_italic());
    }
}
