use crate::commands::{CmdResult, CorpusListing};
use crate::corpus::{CommentaryRepository, ScriptureRepository};
use crate::error::Result;
use crate::preferences::AppPreferences;

pub fn versions(scripture: &ScriptureRepository, prefs: &AppPreferences) -> Result<CmdResult> {
    Ok(CmdResult::default()
        .with_locale(prefs.locale)
        .with_corpora(CorpusListing {
            items: scripture.infos(),
            current: Some(prefs.version_id.clone()),
        }))
}

pub fn commentaries(
    commentaries: &CommentaryRepository,
    prefs: &AppPreferences,
) -> Result<CmdResult> {
    Ok(CmdResult::default()
        .with_locale(prefs.locale)
        .with_corpora(CorpusListing {
            items: commentaries.infos(),
            current: prefs.commentary_id.clone(),
        }))
}
