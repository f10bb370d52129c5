use crate::corpus::Poem;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum DrillMode {
    /// Decisive prefix on the front, the whole poem on the back.
    Kimariji,
    /// Upper verse on the front, lower verse on the back.
    Verse,
    /// Original text on the front, paraphrase on the back.
    Meaning,
}

pub const ALL_MODES: [DrillMode; 3] = [DrillMode::Kimariji, DrillMode::Verse, DrillMode::Meaning];

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct CardFace {
    pub title: &'static str,
    pub lines: Vec<String>,
    /// Rendered larger/bolder than the rest of the face.
    pub emphasis: Option<String>,
}

impl DrillMode {
    pub fn as_str(self) -> &'static str {
        match self {
            DrillMode::Kimariji => "kimariji",
            DrillMode::Verse => "verse",
            DrillMode::Meaning => "meaning",
        }
    }

    pub fn from_name(name: &str) -> Option<Self> {
        ALL_MODES.into_iter().find(|m| m.as_str() == name)
    }

    pub fn label(self) -> &'static str {
        match self {
            DrillMode::Kimariji => "Kimariji",
            DrillMode::Verse => "Upper / Lower",
            DrillMode::Meaning => "Meaning",
        }
    }

    pub fn next(self) -> Self {
        match self {
            DrillMode::Kimariji => DrillMode::Verse,
            DrillMode::Verse => DrillMode::Meaning,
            DrillMode::Meaning => DrillMode::Kimariji,
        }
    }

    pub fn prev(self) -> Self {
        match self {
            DrillMode::Kimariji => DrillMode::Meaning,
            DrillMode::Verse => DrillMode::Kimariji,
            DrillMode::Meaning => DrillMode::Verse,
        }
    }

    pub fn front(self, poem: &Poem) -> CardFace {
        match self {
            DrillMode::Kimariji => CardFace {
                title: "Kimariji",
                lines: Vec::new(),
                emphasis: Some(poem.kimariji.clone()),
            },
            DrillMode::Verse => CardFace {
                title: "Upper verse",
                lines: vec![poem.upper_verse()],
                emphasis: None,
            },
            DrillMode::Meaning => CardFace {
                title: "Poem",
                lines: poem.phrases.clone(),
                emphasis: None,
            },
        }
    }

    pub fn back(self, poem: &Poem) -> CardFace {
        match self {
            DrillMode::Kimariji => {
                let mut lines = poem.phrases.clone();
                lines.push(String::new());
                lines.push(poem.reading.clone());
                lines.push(String::new());
                lines.push(poem.author.clone());
                CardFace {
                    title: "Poem",
                    lines,
                    emphasis: Some(poem.kimariji.clone()),
                }
            }
            DrillMode::Verse => CardFace {
                title: "Lower verse",
                lines: vec![String::new(), poem.author.clone()],
                emphasis: Some(poem.lower_verse()),
            },
            DrillMode::Meaning => CardFace {
                title: "Meaning",
                lines: vec![
                    poem.translation.clone(),
                    String::new(),
                    poem.author.clone(),
                ],
                emphasis: None,
            },
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::corpus::test_poem;

    #[test]
    fn test_name_roundtrip() {
        for mode in ALL_MODES {
            assert_eq!(DrillMode::from_name(mode.as_str()), Some(mode));
        }
        assert_eq!(DrillMode::from_name("typing"), None);
    }

    #[test]
    fn test_cycle_visits_every_mode() {
        let mut mode = DrillMode::Kimariji;
        for _ in 0..3 {
            assert_eq!(mode.next().prev(), mode);
            mode = mode.next();
        }
        assert_eq!(mode, DrillMode::Kimariji);
    }

    #[test]
    fn test_kimariji_front_hides_the_poem() {
        let poem = test_poem("9");
        let front = DrillMode::Kimariji.front(&poem);
        assert_eq!(front.emphasis.as_deref(), Some("k9"));
        assert!(front.lines.iter().all(|l| !l.contains("a9")));

        let back = DrillMode::Kimariji.back(&poem);
        assert!(back.lines.contains(&"a9".to_string()));
        assert!(back.lines.contains(&poem.reading));
        assert!(back.lines.contains(&poem.author));
    }

    #[test]
    fn test_verse_mode_splits_the_poem() {
        let poem = test_poem("9");
        let front = DrillMode::Verse.front(&poem);
        assert_eq!(front.lines, vec!["a9 b9 c9".to_string()]);
        let back = DrillMode::Verse.back(&poem);
        assert_eq!(back.emphasis.as_deref(), Some("d9 e9"));
    }

    #[test]
    fn test_meaning_mode_shows_translation_on_back() {
        let poem = test_poem("9");
        assert_eq!(DrillMode::Meaning.front(&poem).lines.len(), 5);
        let back = DrillMode::Meaning.back(&poem);
        assert_eq!(back.lines[0], poem.translation);
    }
}
