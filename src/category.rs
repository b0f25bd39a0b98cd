//! Task categories

use std::fmt::{Display, Formatter};
use std::str::FromStr;

use csscolorparser::Color;
use once_cell::sync::Lazy;

use crate::error::DecodeError;

/// The closed set of categories a task can belong to
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Category {
    Perso,
    Boulot,
    Famille,
}

struct CategoryInfo {
    identifier: &'static str,
    label: &'static str,
    css_color: &'static str,
}

/// Indexed by `Category as usize`
static INFOS: [CategoryInfo; 3] = [
    CategoryInfo { identifier: "PERSO",   label: "Perso",   css_color: "green"   },
    CategoryInfo { identifier: "BOULOT",  label: "Boulot",  css_color: "blue"    },
    CategoryInfo { identifier: "FAMILLE", label: "Famille", css_color: "magenta" },
];

static COLORS: Lazy<Vec<Color>> = Lazy::new(|| {
    INFOS.iter()
        .map(|info| csscolorparser::parse(info.css_color).unwrap(/* the table only contains valid CSS color names */))
        .collect()
});

impl Category {
    pub const ALL: [Category; 3] = [Category::Perso, Category::Boulot, Category::Famille];

    fn info(&self) -> &'static CategoryInfo {
        &INFOS[*self as usize]
    }

    /// The identifier used in persisted records (`PERSO`, `BOULOT` or `FAMILLE`)
    pub fn identifier(&self) -> &'static str { self.info().identifier }

    /// A human-readable name
    pub fn label(&self) -> &'static str { self.info().label }

    /// The color this category is displayed with
    pub fn color(&self) -> &'static Color {
        &COLORS[*self as usize]
    }

    /// A 24-bit ANSI escape sequence that sets the terminal foreground to [`Self::color`]
    pub fn ansi_escape(&self) -> String {
        let c = self.color();
        let channel = |v: f64| (v.max(0.0).min(1.0) * 255.0).round() as u8;
        format!("\u{1b}[38;2;{};{};{}m", channel(c.r), channel(c.g), channel(c.b))
    }
}

impl FromStr for Category {
    type Err = DecodeError;

    /// Resolve a persisted identifier. This is case-sensitive.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Category::ALL.iter()
            .find(|cat| cat.identifier() == s)
            .copied()
            .ok_or_else(|| DecodeError::UnknownCategory(s.to_string()))
    }
}

impl Display for Category {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.label())
    }
}


#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn identifiers_resolve_back() {
        for cat in Category::ALL.iter() {
            assert_eq!(cat.identifier().parse::<Category>().unwrap(), *cat);
        }
        assert_eq!("BOULOT".parse::<Category>().unwrap(), Category::Boulot);
    }

    #[test]
    fn unknown_identifiers_are_rejected() {
        assert_eq!("boulot".parse::<Category>(), Err(DecodeError::UnknownCategory("boulot".to_string())));
        assert!("LOISIRS".parse::<Category>().is_err());
        assert!("".parse::<Category>().is_err());
    }

    #[test]
    fn display_metadata() {
        assert_eq!(Category::Famille.label(), "Famille");
        assert_eq!(Category::Perso.to_string(), "Perso");
        assert_eq!(Category::Boulot.ansi_escape(), "\u{1b}[38;2;0;0;255m");
        assert_eq!(Category::Famille.ansi_escape(), "\u{1b}[38;2;255;0;255m");
    }
}
