//! Fixed colour scheme for the 3x3 bivariate legend.

use crate::bivariate::BivariateClass;

/// Combined class label -> fill colour. The x class sets the pink-to-teal hue,
/// the y class the light-to-dark value.
pub const BIVARIATE_COLORS: [(&str, &str); 9] = [
    ("0-2", "#f73593"),
    ("0-1", "#f78fb6"),
    ("0-0", "#f7fcf5"),
    ("1-2", "#a53593"),
    ("1-1", "#a58fb6"),
    ("1-0", "#a5e8cd"),
    ("2-2", "#403593"),
    ("2-1", "#408fa7"),
    ("2-0", "#40dba7"),
];

/// Look up the fill colour of a combined label such as `"1-2"`.
pub fn color_for_label(label: &str) -> Option<&'static str> {
    BIVARIATE_COLORS.iter()
        .find(|(key, _)| *key == label)
        .map(|&(_, color)| color)
}

impl BivariateClass {
    /// Fill colour of this class pair, if both classes are tertiles.
    pub fn color(&self) -> Option<&'static str> {
        color_for_label(&self.label())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn lookup_is_total_over_tertile_pairs() {
        for x in 0..3 {
            for y in 0..3 {
                assert!(BivariateClass::new(x, y).color().is_some(), "missing colour for {x}-{y}");
            }
        }
        assert_eq!(BivariateClass::new(3, 0).color(), None);
    }

    #[test]
    fn fixed_colours() {
        assert_eq!(BivariateClass::new(1, 2).color(), Some("#a53593"));
        assert_eq!(color_for_label("0-0"), Some("#f7fcf5"));
        assert_eq!(color_for_label("2-0"), Some("#40dba7"));
        assert_eq!(color_for_label("1_2"), None);
    }
}
