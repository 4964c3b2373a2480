use console::Style;
use once_cell::sync::Lazy;
use versebook::model::Theme;

/// Styles for the reading view. The highlighted verse needs a different
/// colour on dark and light terminals to stay legible.
pub struct Palette {
    pub title: Style,
    pub verse_number: Style,
    pub highlight: Style,
    pub section: Style,
    pub muted: Style,
}

static LIGHT: Lazy<Palette> = Lazy::new(|| Palette {
    title: Style::new().bold(),
    verse_number: Style::new().blue(),
    highlight: Style::new().black().on_yellow(),
    section: Style::new().bold().underlined(),
    muted: Style::new().color256(244),
});

static DARK: Lazy<Palette> = Lazy::new(|| Palette {
    title: Style::new().bold(),
    verse_number: Style::new().cyan(),
    highlight: Style::new().yellow().bold(),
    section: Style::new().bold().underlined(),
    muted: Style::new().color256(246),
});

pub fn palette(theme: Theme) -> &'static Palette {
    match theme {
        Theme::Light => &LIGHT,
        Theme::Dark => &DARK,
    }
}
