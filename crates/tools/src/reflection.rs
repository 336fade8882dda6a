//! Reflections blended from five personality levels.

use crate::with_args;
use llm::{LLM, Tool};
use runtime::Runtime;
use schemars::JsonSchema;
use serde::Deserialize;
use std::fmt;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Personality {
    Joy,
    Sadness,
    Anger,
    Fear,
    Disgust,
}

impl Personality {
    pub const ALL: [Personality; 5] = [
        Self::Joy,
        Self::Sadness,
        Self::Anger,
        Self::Fear,
        Self::Disgust,
    ];

    /// The perspective this personality brings.
    pub fn template(self) -> &'static str {
        match self {
            Self::Joy => {
                "You are a joyful, optimistic AI that sees the bright side of things. \
                 Your reflections should focus on positive aspects and opportunities."
            }
            Self::Sadness => {
                "You are a melancholic, thoughtful AI that considers the deeper meaning of things. \
                 Your reflections should be introspective and note what might be lost or missed."
            }
            Self::Anger => {
                "You are a passionate, determined AI that identifies injustice and problems. \
                 Your reflections should be direct and highlight things that need to change."
            }
            Self::Fear => {
                "You are a cautious, careful AI that anticipates risks. \
                 Your reflections should consider what could go wrong and how to prepare."
            }
            Self::Disgust => {
                "You are a discerning, critical AI that upholds standards. \
                 Your reflections should identify what's problematic and how to maintain integrity."
            }
        }
    }
}

impl fmt::Display for Personality {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Self::Joy => "joy",
            Self::Sadness => "sadness",
            Self::Anger => "anger",
            Self::Fear => "fear",
            Self::Disgust => "disgust",
        })
    }
}

/// Raw personality levels, in [`Personality::ALL`] order.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Blend(pub [f64; 5]);

impl Default for Blend {
    fn default() -> Self {
        Self([0.8, 0.1, 0.05, 0.02, 0.03])
    }
}

impl Blend {
    /// Levels divided by their sum. Negative levels count as zero; an
    /// all-zero blend is uniform.
    pub fn normalized(&self) -> [(Personality, f64); 5] {
        let levels = self.0.map(|l| l.max(0.0));
        let total: f64 = levels.iter().sum();
        let mut out = [(Personality::Joy, 0.0); 5];
        for (i, personality) in Personality::ALL.into_iter().enumerate() {
            let level = if total > 0.0 { levels[i] / total } else { 0.2 };
            out[i] = (personality, level);
        }
        out
    }

    /// The strongest personality; the later one wins a tie.
    pub fn dominant(&self) -> Personality {
        self.normalized()
            .into_iter()
            .reduce(|prev, cur| if prev.1 > cur.1 { prev } else { cur })
            .map(|(p, _)| p)
            .unwrap_or(Personality::Joy)
    }
}

/// Frame `input` as a reflection through the given blend.
pub fn reflect(blend: &Blend, input: &str) -> String {
    let levels = blend.normalized();
    let dominant = blend.dominant();

    let perspectives = levels
        .iter()
        .filter(|(_, level)| *level > 0.2)
        .map(|(p, level)| format!("{}% {p}: {}", (level * 100.0).round(), p.template()))
        .collect::<Vec<_>>()
        .join("\n");
    let elements = levels
        .iter()
        .filter(|(_, level)| *level > 0.1)
        .map(|(p, _)| p.to_string())
        .collect::<Vec<_>>()
        .join(", ");

    format!(
        "\nReflection (dominant personality: {dominant}):\n\n\
         I've considered this prompt through multiple perspectives:\n\n\
         {perspectives}\n\n\
         Based on these considerations, here's my reflection:\n\
         {input}\n\n\
         This reflection combines elements of {elements}, with a primary emphasis on {dominant}.\n"
    )
}

#[derive(Deserialize, JsonSchema)]
struct ReflectionArgs {
    /// The thought or idea to reflect on
    input: String,
}

/// Register `generate_reflection` with a fixed blend.
pub fn register<P: LLM>(runtime: &mut Runtime<P>, blend: Blend) {
    runtime.register(
        Tool::new::<ReflectionArgs>(
            "generate_reflection",
            "Generate a reflection based on a prompt with different personality aspects",
        ),
        move |args| async move { with_args(&args, |a: ReflectionArgs| reflect(&blend, &a.input)) },
    );
}
