use std::collections::HashMap;
use std::fs;
use std::path::Path;

use rust_embed::Embed;
use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::engine::range::Range;

#[derive(Embed)]
#[folder = "assets/corpus/"]
struct CorpusAssets;

const BUNDLED_CORPUS: &str = "hyakunin_isshu.json";

/// Phrases forming the upper verse (kami no ku); the rest is the lower verse.
const UPPER_VERSE_PHRASES: usize = 3;

#[derive(Debug, Error)]
pub enum CorpusError {
    #[error("bundled corpus {0} is missing")]
    MissingAsset(&'static str),
    #[error("could not read corpus: {0}")]
    Io(#[from] std::io::Error),
    #[error("could not parse corpus: {0}")]
    Parse(#[from] serde_json::Error),
    #[error("corpus has no poems")]
    Empty,
    #[error("duplicate poem id {0:?}")]
    DuplicateId(String),
    #[error("poem {0:?} has no phrases")]
    NoPhrases(String),
}

#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct Poem {
    pub id: String,
    pub phrases: Vec<String>,
    pub reading: String,
    pub kimariji: String,
    pub author: String,
    pub translation: String,
}

impl Poem {
    pub fn upper_verse(&self) -> String {
        let split = UPPER_VERSE_PHRASES.min(self.phrases.len());
        self.phrases[..split].join(" ")
    }

    pub fn lower_verse(&self) -> String {
        let split = UPPER_VERSE_PHRASES.min(self.phrases.len());
        self.phrases[split..].join(" ")
    }
}

pub struct Corpus {
    poems: Vec<Poem>,
    index: HashMap<String, usize>,
}

impl Corpus {
    pub fn bundled() -> Result<Self, CorpusError> {
        let file = CorpusAssets::get(BUNDLED_CORPUS)
            .ok_or(CorpusError::MissingAsset(BUNDLED_CORPUS))?;
        let content = String::from_utf8_lossy(file.data.as_ref());
        Self::from_json(&content)
    }

    /// Loads `path` when given, the bundled corpus otherwise.
    pub fn load(path: Option<&Path>) -> Result<Self, CorpusError> {
        match path {
            Some(path) => {
                let content = fs::read_to_string(path)?;
                Self::from_json(&content)
            }
            None => Self::bundled(),
        }
    }

    pub fn from_json(json: &str) -> Result<Self, CorpusError> {
        let poems: Vec<Poem> = serde_json::from_str(json)?;
        Self::from_poems(poems)
    }

    pub fn from_poems(poems: Vec<Poem>) -> Result<Self, CorpusError> {
        if poems.is_empty() {
            return Err(CorpusError::Empty);
        }
        let mut index = HashMap::with_capacity(poems.len());
        for (i, poem) in poems.iter().enumerate() {
            if poem.phrases.is_empty() {
                return Err(CorpusError::NoPhrases(poem.id.clone()));
            }
            if index.insert(poem.id.clone(), i).is_some() {
                return Err(CorpusError::DuplicateId(poem.id.clone()));
            }
        }
        Ok(Self { poems, index })
    }

    pub fn len(&self) -> usize {
        self.poems.len()
    }

    pub fn is_empty(&self) -> bool {
        self.poems.is_empty()
    }

    pub fn poems(&self) -> &[Poem] {
        &self.poems
    }

    pub fn get(&self, id: &str) -> Option<&Poem> {
        self.index.get(id).map(|&i| &self.poems[i])
    }

    /// 1-indexed position of the poem in corpus order.
    pub fn position(&self, id: &str) -> Option<usize> {
        self.index.get(id).map(|&i| i + 1)
    }

    pub fn range_poems(&self, range: &Range) -> &[Poem] {
        let start = (range.start - 1).min(self.poems.len());
        let end = range.end.min(self.poems.len());
        &self.poems[start..end]
    }

    pub fn range_ids(&self, range: &Range) -> Vec<String> {
        self.range_poems(range).iter().map(|p| p.id.clone()).collect()
    }
}

#[cfg(test)]
pub(crate) fn test_poem(id: &str) -> Poem {
    Poem {
        id: id.to_string(),
        phrases: ["a", "b", "c", "d", "e"]
            .iter()
            .map(|p| format!("{p}{id}"))
            .collect(),
        reading: format!("reading {id}"),
        kimariji: format!("k{id}"),
        author: format!("author {id}"),
        translation: format!("translation {id}"),
    }
}
