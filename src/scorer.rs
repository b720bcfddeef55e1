use crate::lexicon::Lexicon;

const BOOSTER_INCREMENT: f64 = 0.293;
const CAPS_INCREMENT: f64 = 0.733;
const NEGATION_SCALAR: f64 = -0.74;
const NORMALIZATION_ALPHA: f64 = 15.0;
const LOOKBACK: usize = 3;

const NEGATIONS: &[&str] = &[
    "not", "no", "never", "nothing", "nowhere", "none", "neither", "nor", "cannot", "without",
    "hardly", "rarely", "seldom", "dont", "doesnt", "didnt", "isnt", "wasnt", "wont", "cant",
    "aint", "shouldnt", "wouldnt", "couldnt",
];

const BOOSTERS: &[&str] = &[
    "absolutely", "amazingly", "completely", "deeply", "especially", "extremely", "highly",
    "incredibly", "really", "so", "super", "totally", "truly", "very", "most", "more",
];

const DAMPENERS: &[&str] = &[
    "barely", "slightly", "somewhat", "marginally", "little", "less", "partly", "kinda", "sorta",
];

/// Maps review text to a compound polarity score in `[-1, 1]`.
///
/// Implementations must be total: every input, including the empty string,
/// yields a score.
pub trait PolarityScorer: Send + Sync {
    fn score(&self, text: &str) -> f64;
}

/// Rule-based scorer in the style of VADER: lexicon valences adjusted for
/// boosters, negation, capitalization, contrastive "but" and punctuation,
/// then squashed into `[-1, 1]`.
#[derive(Debug, Clone)]
pub struct LexiconScorer {
    lexicon: Lexicon,
}

struct Token<'a> {
    raw: &'a str,
    lower: String,
}

impl LexiconScorer {
    pub fn new(lexicon: Lexicon) -> Self {
        Self { lexicon }
    }

    fn valences(&self, tokens: &[Token<'_>]) -> Vec<f64> {
        let shouting = tokens.iter().filter(|t| is_shouting(t.raw)).count();
        let mixed_case = shouting > 0 && shouting < tokens.len();

        let mut valences = vec![0.0; tokens.len()];
        for (index, token) in tokens.iter().enumerate() {
            let base = match self.lexicon.valence(&token.lower) {
                Some(valence) if valence != 0.0 => valence,
                _ => continue,
            };

            let mut valence = base;
            if mixed_case && is_shouting(token.raw) {
                valence += CAPS_INCREMENT * valence.signum();
            }

            for distance in 1..=LOOKBACK.min(index) {
                let previous = &tokens[index - distance];
                let decay = 1.0 - 0.05 * (distance - 1) as f64;
                let mut boost = booster_increment(&previous.lower);
                if boost != 0.0 && mixed_case && is_shouting(previous.raw) {
                    boost += CAPS_INCREMENT * boost.signum();
                }
                valence += boost * decay * valence.signum();

                if is_negation(&previous.lower) {
                    valence *= NEGATION_SCALAR;
                }
            }

            valences[index] = valence;
        }

        if let Some(pivot) = tokens.iter().position(|t| t.lower == "but") {
            for (index, valence) in valences.iter_mut().enumerate() {
                if index < pivot {
                    *valence *= 0.5;
                } else if index > pivot {
                    *valence *= 1.5;
                }
            }
        }

        valences
    }
}

impl Default for LexiconScorer {
    fn default() -> Self {
        Self::new(Lexicon::default())
    }
}

impl PolarityScorer for LexiconScorer {
    fn score(&self, text: &str) -> f64 {
        let tokens = tokenize(text);
        if tokens.is_empty() {
            return 0.0;
        }

        let mut sum: f64 = self.valences(&tokens).iter().sum();
        let emphasis = punctuation_emphasis(text);
        if sum > 0.0 {
            sum += emphasis;
        } else if sum < 0.0 {
            sum -= emphasis;
        }

        normalize(sum)
    }
}

fn tokenize(text: &str) -> Vec<Token<'_>> {
    text.split_whitespace()
        .map(|word| word.trim_matches(|c: char| !c.is_alphanumeric()))
        .filter(|word| !word.is_empty())
        .map(|raw| Token {
            raw,
            lower: raw.to_lowercase(),
        })
        .collect()
}

fn is_shouting(word: &str) -> bool {
    let letters: Vec<char> = word.chars().filter(|c| c.is_alphabetic()).collect();
    letters.len() > 1 && letters.iter().all(|c| c.is_uppercase())
}

fn is_negation(word: &str) -> bool {
    word.ends_with("n't") || NEGATIONS.contains(&word)
}

fn booster_increment(word: &str) -> f64 {
    if BOOSTERS.contains(&word) {
        BOOSTER_INCREMENT
    } else if DAMPENERS.contains(&word) {
        -BOOSTER_INCREMENT
    } else {
        0.0
    }
}

fn punctuation_emphasis(text: &str) -> f64 {
    let exclamations = text.matches('!').count().min(4) as f64 * 0.292;
    let questions = match text.matches('?').count() {
        0 | 1 => 0.0,
        n @ 2..=3 => n as f64 * 0.18,
        _ => 0.96,
    };
    exclamations + questions
}

fn normalize(sum: f64) -> f64 {
    let compound = (sum / (sum * sum + NORMALIZATION_ALPHA).sqrt()).clamp(-1.0, 1.0);
    (compound * 10_000.0).round() / 10_000.0
}
