//! Interface strings in the two supported languages.

use crate::model::Locale;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Text {
    AppTitle,
    Studies,
    Chapters,
    Verses,
    Commentary,
    VerseInsight,
    NoStudies,
    ClickToStart,
    NoteSaved,
    ConfirmDelete,
    ChapterNotFound,
    VerseNotFound,
}

pub fn t(text: Text, locale: Locale) -> &'static str {
    match locale {
        Locale::En => en(text),
        Locale::Pt => pt(text),
    }
}

fn en(text: Text) -> &'static str {
    match text {
        Text::AppTitle => "Bible Study",
        Text::Studies => "Studies",
        Text::Chapters => "Chapters",
        Text::Verses => "Verses",
        Text::Commentary => "Commentary",
        Text::VerseInsight => "Verse Insight",
        Text::NoStudies => "No studies yet.",
        Text::ClickToStart => "Create a topic with `versebook study add folder <name>` to start.",
        Text::NoteSaved => "Note saved!",
        Text::ConfirmDelete => "Are you sure you want to delete this item?",
        Text::ChapterNotFound => "Chapter not found",
        Text::VerseNotFound => "Verse not found",
    }
}

fn pt(text: Text) -> &'static str {
    match text {
        Text::AppTitle => "Estudo Bíblico",
        Text::Studies => "Estudos",
        Text::Chapters => "Capítulos",
        Text::Verses => "Versículos",
        Text::Commentary => "Comentário",
        Text::VerseInsight => "Insight do Versículo",
        Text::NoStudies => "Nenhum estudo ainda.",
        Text::ClickToStart => "Crie um tópico com `versebook study add folder <nome>` para começar.",
        Text::NoteSaved => "Nota salva!",
        Text::ConfirmDelete => "Tem certeza de que deseja excluir este item?",
        Text::ChapterNotFound => "Capítulo não encontrado",
        Text::VerseNotFound => "Versículo não encontrado",
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn every_text_differs_by_locale() {
        let all = [
            Text::AppTitle,
            Text::Studies,
            Text::Chapters,
            Text::Verses,
            Text::Commentary,
            Text::VerseInsight,
            Text::NoStudies,
            Text::ClickToStart,
            Text::NoteSaved,
            Text::ConfirmDelete,
            Text::ChapterNotFound,
            Text::VerseNotFound,
        ];
        for text in all {
            assert_ne!(t(text, Locale::En), t(text, Locale::Pt), "{:?}", text);
        }
    }
}
