//! Styles applied to highlighted chunks, and the theme mapping capture
//! names to them.

use std::collections::HashMap;

/// The colour palette available to the theme. `Reset` doubles as the
/// inherit sentinel: merging a style whose colour is `Reset` leaves the
/// base colour alone.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum Palette {
    #[default]
    Reset,
    Mute,
    Rose,
    Love,
    Gold,
    Tree,
    Iris,
    Foam,
    Pine,
    Text,
}

/// Tri-state attribute. `Unset` means "do not override an inherited
/// value", which is distinct from explicitly switching the attribute off.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum Tri {
    #[default]
    Unset,
    False,
    True,
}

/// The resolved attributes applied when rendering one chunk of text.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Style {
    pub color: Palette,
    pub bold: Tri,
    pub italic: Tri,
}

impl Style {
    pub const fn new(color: Palette, bold: Tri, italic: Tri) -> Style {
        Style {
            color,
            bold,
            italic,
        }
    }

    /// Combine an incoming style into this one, returning the result.
    /// Models cumulative grammar rule application: a later, more specific
    /// capture refines the attributes it sets and inherits the rest.
    pub fn merge(self, incoming: Style) -> Style {
        Style {
            color: if incoming.color == Palette::Reset {
                self.color
            } else {
                incoming.color
            },
            bold: if incoming.bold == Tri::Unset {
                self.bold
            } else {
                incoming.bold
            },
            italic: if incoming.italic == Tri::Unset {
                self.italic
            } else {
                incoming.italic
            },
        }
    }

    /// The ANSI escape sequence selecting this style: colour code first,
    /// then bold, then italic. Unset attributes contribute no code.
    pub fn render(&self) -> String {
        let mut codes: Vec<&str> = Vec::new();

        match self.color {
            Palette::Reset => codes.push("0"),
            Palette::Mute => codes.push("2"),
            Palette::Rose => codes.push("35"),
            Palette::Love => codes.push("31"),
            Palette::Gold => codes.push("33"),
            Palette::Tree => codes.push("32"),
            Palette::Iris => codes.push("34"),
            Palette::Foam => codes.extend(["36", "2"]),
            Palette::Pine => codes.push("36"),
            Palette::Text => codes.push("39"),
        }

        match self.bold {
            Tri::True => codes.push("1"),
            Tri::False => codes.push("22"),
            Tri::Unset => {}
        }

        match self.italic {
            Tri::True => codes.push("3"),
            Tri::False => codes.push("23"),
            Tri::Unset => {}
        }

        format!("\x1b[{}m", codes.join(";"))
    }

    /// Embellish text with this style's escape sequence, resetting all
    /// attributes afterwards so chunks never bleed into each other.
    pub fn wrap(&self, text: &str) -> String {
        format!("{}{}\x1b[0m", self.render(), text)
    }
}

/// Immutable capture-name → style mapping, constructed once at startup
/// and passed into the resolver. Capture names without an entry resolve
/// to the default inherit-everything style.
pub struct Theme {
    styles: HashMap<&'static str, Style>,
}

impl Theme {
    pub fn style(&self, capture: &str) -> Style {
        self.styles
            .get(capture)
            .copied()
            .unwrap_or_default()
    }

    /// The standard theme, tuned against the Go highlight query.
    pub fn standard() -> Theme {
        use Palette::*;
        use Tri::{True, Unset};

        let styles = HashMap::from([
            ("type", Style::new(Foam, Unset, Unset)),
            ("type.definition", Style::new(Foam, Unset, Unset)),
            ("property", Style::new(Foam, Unset, True)),
            ("variable", Style::new(Text, Unset, True)),
            ("module", Style::new(Text, Unset, Unset)),
            ("variable.parameter", Style::new(Iris, Unset, True)),
            ("label", Style::new(Foam, Unset, Unset)),
            ("constant", Style::new(Gold, Unset, Unset)),
            ("function.call", Style::new(Rose, Unset, Unset)),
            ("function.method.call", Style::new(Iris, Unset, Unset)),
            ("function", Style::new(Rose, Unset, Unset)),
            ("function.method", Style::new(Rose, Unset, Unset)),
            ("constructor", Style::new(Foam, Unset, Unset)),
            ("operator", Style::new(Mute, Unset, Unset)),
            ("keyword", Style::new(Pine, Unset, Unset)),
            ("keyword.type", Style::new(Pine, Unset, Unset)),
            ("keyword.function", Style::new(Pine, Unset, Unset)),
            ("keyword.return", Style::new(Pine, Unset, Unset)),
            ("keyword.coroutine", Style::new(Pine, Unset, Unset)),
            ("keyword.repeat", Style::new(Pine, Unset, Unset)),
            ("keyword.import", Style::new(Pine, Unset, Unset)),
            ("keyword.conditional", Style::new(Pine, Unset, Unset)),
            ("type.builtin", Style::new(Foam, True, Unset)),
            ("function.builtin", Style::new(Rose, True, Unset)),
            ("punctuation.delimiter", Style::new(Mute, Unset, Unset)),
            ("punctuation.bracket", Style::new(Mute, Unset, Unset)),
            ("string", Style::new(Gold, Unset, Unset)),
            ("string.escape", Style::new(Pine, Unset, Unset)),
            ("number", Style::new(Gold, Unset, Unset)),
            ("number.float", Style::new(Gold, Unset, Unset)),
            ("boolean", Style::new(Rose, Unset, Unset)),
            ("constant.builtin", Style::new(Gold, True, Unset)),
            ("variable.member", Style::new(Foam, Unset, Unset)),
            ("spell", Style::new(Reset, Unset, Unset)),
            ("comment.documentation", Style::new(Mute, Unset, True)),
            ("comment", Style::new(Mute, Unset, True)),
            ("string.regexp", Style::new(Iris, Unset, Unset)),
        ]);

        Theme { styles }
    }
}

#[cfg(test)]
mod check {
    use super::*;

    #[test]
    fn merging_all_unset_changes_nothing() {
        let base = Style::new(Palette::Gold, Tri::True, Tri::False);

        let merged = base.merge(Style::default());
        assert_eq!(merged, base);
    }

    #[test]
    fn merging_replaces_set_attributes_only() {
        let base = Style::new(Palette::Gold, Tri::Unset, Tri::True);
        let incoming = Style::new(Palette::Reset, Tri::True, Tri::Unset);

        let merged = base.merge(incoming);
        assert_eq!(merged.color, Palette::Gold);
        assert_eq!(merged.bold, Tri::True);
        assert_eq!(merged.italic, Tri::True);
    }

    #[test]
    fn merging_applies_in_stream_order() {
        let a = Style::new(Palette::Foam, Tri::Unset, Tri::Unset);
        let b = Style::new(Palette::Rose, Tri::True, Tri::Unset);
        let c = Style::new(Palette::Reset, Tri::Unset, Tri::True);

        let merged = Style::default()
            .merge(a)
            .merge(b)
            .merge(c);
        assert_eq!(merged, Style::new(Palette::Rose, Tri::True, Tri::True));
    }

    #[test]
    fn rendering_orders_codes() {
        let style = Style::new(Palette::Gold, Tri::True, Tri::False);
        assert_eq!(style.render(), "\x1b[33;1;23m");

        let style = Style::new(Palette::Foam, Tri::Unset, Tri::Unset);
        assert_eq!(style.render(), "\x1b[36;2m");

        let style = Style::default();
        assert_eq!(style.render(), "\x1b[0m");
    }

    #[test]
    fn wrapping_resets_afterwards() {
        let style = Style::new(Palette::Pine, Tri::Unset, Tri::Unset);
        assert_eq!(style.wrap("func"), "\x1b[36mfunc\x1b[0m");
    }

    #[test]
    fn unknown_capture_inherits_everything() {
        let theme = Theme::standard();
        assert_eq!(theme.style("nonsense"), Style::default());
        assert_eq!(theme.style("keyword").color, Palette::Pine);
    }
}
