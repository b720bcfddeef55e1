//! Word valence lexicon used by the polarity scorer.
//!
//! Valences use the VADER scale of `[-4, 4]`. A lexicon is built once at
//! startup and only read afterwards.

use std::collections::HashMap;
use std::path::Path;

use anyhow::{bail, Context};

#[derive(Debug, Clone)]
pub struct Lexicon {
    words: HashMap<String, f64>,
}

impl Lexicon {
    pub fn new() -> Self {
        Self {
            words: HashMap::new(),
        }
    }

    /// Insert a word, clamping its valence to `[-4, 4]`.
    pub fn insert(&mut self, word: &str, valence: f64) {
        self.words
            .insert(word.to_lowercase(), valence.clamp(-4.0, 4.0));
    }

    pub fn valence(&self, word: &str) -> Option<f64> {
        self.words.get(word).copied()
    }

    pub fn len(&self) -> usize {
        self.words.len()
    }

    pub fn is_empty(&self) -> bool {
        self.words.is_empty()
    }

    /// Load a VADER-format lexicon file: `token<TAB>mean<TAB>...` per line.
    pub fn from_path(path: &Path) -> anyhow::Result<Self> {
        let contents = std::fs::read_to_string(path)
            .with_context(|| format!("failed to read lexicon {}", path.display()))?;
        Self::parse(&contents).with_context(|| format!("invalid lexicon {}", path.display()))
    }

    pub fn parse(contents: &str) -> anyhow::Result<Self> {
        let mut lexicon = Self::new();

        for (index, line) in contents.lines().enumerate() {
            let line = line.trim_end_matches('\r');
            if line.trim().is_empty() {
                continue;
            }

            let mut fields = line.split('\t');
            let token = fields.next().unwrap_or_default().trim();
            let Some(raw_valence) = fields.next() else {
                bail!("line {}: expected token and valence separated by a tab", index + 1);
            };
            if token.is_empty() {
                bail!("line {}: empty token", index + 1);
            }

            let valence: f64 = raw_valence
                .trim()
                .parse()
                .with_context(|| format!("line {}: bad valence {raw_valence:?}", index + 1))?;
            if !valence.is_finite() {
                bail!("line {}: valence must be finite", index + 1);
            }
            lexicon.insert(token, valence);
        }

        if lexicon.is_empty() {
            bail!("lexicon has no entries");
        }

        Ok(lexicon)
    }
}

impl Default for Lexicon {
    /// Built-in vocabulary tuned for product reviews.
    fn default() -> Self {
        let mut lexicon = Self::new();

        for (word, valence) in [
            ("love", 3.2),
            ("loved", 2.9),
            ("loves", 2.7),
            ("amazing", 2.8),
            ("awesome", 3.1),
            ("excellent", 2.7),
            ("fantastic", 2.6),
            ("wonderful", 2.7),
            ("outstanding", 3.0),
            ("perfect", 2.7),
            ("superb", 3.1),
            ("best", 3.2),
            ("great", 3.1),
            ("happy", 2.7),
            ("delighted", 2.8),
            ("impressed", 2.2),
            ("impressive", 2.3),
            ("recommend", 1.5),
            ("recommended", 1.6),
            ("good", 1.9),
            ("nice", 1.8),
            ("comfortable", 1.5),
            ("beautiful", 2.9),
            ("pleased", 1.9),
            ("satisfied", 1.8),
            ("easy", 1.9),
            ("helpful", 1.8),
            ("reliable", 1.6),
            ("sturdy", 1.2),
            ("durable", 1.1),
            ("worth", 0.9),
            ("value", 1.4),
            ("like", 1.5),
            ("liked", 1.8),
            ("enjoy", 2.2),
            ("enjoyed", 2.3),
            ("fine", 0.8),
            ("okay", 0.9),
            ("ok", 1.2),
            ("decent", 1.1),
            ("fast", 0.6),
            ("quality", 1.0),
            ("well", 1.1),
            ("works", 0.8),
            ("thanks", 1.9),
            ("bad", -2.5),
            ("terrible", -2.1),
            ("awful", -2.0),
            ("horrible", -2.5),
            ("worst", -3.1),
            ("hate", -2.7),
            ("hated", -3.2),
            ("poor", -2.1),
            ("poorly", -1.8),
            ("disappointed", -1.9),
            ("disappointing", -2.2),
            ("disappointment", -2.3),
            ("broken", -2.1),
            ("broke", -1.8),
            ("cheap", -0.5),
            ("flimsy", -1.3),
            ("useless", -1.8),
            ("waste", -1.8),
            ("wasted", -2.2),
            ("defective", -1.9),
            ("faulty", -1.7),
            ("problem", -1.7),
            ("problems", -1.7),
            ("issue", -0.6),
            ("issues", -0.8),
            ("annoying", -1.7),
            ("uncomfortable", -1.6),
            ("difficult", -1.5),
            ("slow", -1.0),
            ("expensive", -0.9),
            ("overpriced", -1.5),
            ("unhappy", -1.8),
            ("return", -0.4),
            ("returned", -0.8),
            ("refund", -0.6),
            ("fail", -2.5),
            ("failed", -2.3),
            ("fails", -1.9),
            ("mediocre", -1.0),
            ("meh", -0.3),
            ("wrong", -2.1),
            ("damaged", -2.2),
            ("frustrating", -1.9),
            ("regret", -1.9),
            ("unreliable", -1.9),
        ] {
            lexicon.insert(word, valence);
        }

        lexicon
    }
}
