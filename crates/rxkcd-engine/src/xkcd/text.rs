// Imports
use crate::scene::Font;

/// Replace the font family. Sizes below the size of the replacement are raised to it.
pub(super) fn restyle_font(font: &mut Font, replacement: &Font) {
    font.family.clone_from(&replacement.family);
    font.size = font.size.max(replacement.size);
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn small_fonts_grow() {
        let replacement = Font::new("Humor Sans", 14.0);

        let mut small = Font::new("Helvetica", 10.0);
        restyle_font(&mut small, &replacement);
        assert_eq!(small, replacement);

        let mut large = Font::new("Helvetica", 20.0);
        restyle_font(&mut large, &replacement);
        assert_eq!(large, Font::new("Humor Sans", 20.0));
    }
}
