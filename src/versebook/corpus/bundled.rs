//! Corpora compiled into the binary, in registration order. The first
//! version is the default one.

use super::normalize::{normalize_version, Fallback};
use super::{Commentary, CorpusError, Version};

const VERSIONS: [(&str, &str); 2] = [
    ("pt_aa", include_str!("../../../data/versions/pt_aa.json")),
    ("en_kjv", include_str!("../../../data/versions/en_kjv.json")),
];

const COMMENTARIES: [(&str, &str); 2] = [
    ("pt_tske", include_str!("../../../data/commentaries/pt_tske.json")),
    ("en_mh", include_str!("../../../data/commentaries/en_mh.json")),
];

pub fn versions() -> Result<Vec<Version>, CorpusError> {
    VERSIONS
        .iter()
        .map(|(id, raw)| {
            normalize_version(raw, &format!("bundled:{}", id), Fallback { id, name: id })
        })
        .collect()
}

pub fn commentaries() -> Result<Vec<Commentary>, CorpusError> {
    COMMENTARIES
        .iter()
        .map(|(id, raw)| {
            serde_json::from_str(raw).map_err(|source| CorpusError::Json {
                origin: format!("bundled:{}", id),
                source,
            })
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::Locale;

    #[test]
    fn bundled_corpora_parse() {
        let versions = versions().unwrap();
        let ids: Vec<_> = versions.iter().map(|v| v.id.as_str()).collect();
        assert_eq!(ids, vec!["pt_aa", "en_kjv"]);
        assert_eq!(versions[0].language, Locale::Pt);

        let commentaries = commentaries().unwrap();
        assert_eq!(commentaries.len(), 2);
        assert_eq!(commentaries[1].id, "en_mh");
    }
}
