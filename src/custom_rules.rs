//! Respuestas fijas por palabra y por pares de palabra con "you".

use crate::sentence_generators::title_case;

/// palabra, respuestas si aparece, respuestas extra si también aparece "you"
const WORD_RULES: [(&str, &[&str], &[&str]); 8] = [
    ("hello", &["Hello!"], &[]),
    ("good", &["Good!"], &["Good for you!"]),
    ("help", &["Help me!"], &["Can you help?"]),
    ("love", &["Love!"], &["I love you!"]),
    ("stop", &["Stop!", "Please stop!"], &[]),
    ("okay", &["Okay!", "That's okay!"], &[]),
    ("call", &["Call me!"], &["I will call you!"]),
    ("bye", &["Bye!", "Goodbye!"], &[]),
];

const NUMBER_WORDS: [&str; 5] = ["one", "two", "three", "four", "five"];

/// `lowered` es `words` en minúsculas
pub fn custom_sentences<S: AsRef<str>>(words: &[S], lowered: &[String]) -> Vec<String> {
    let has = |w: &str| lowered.iter().any(|x| x == w);
    let mut out = Vec::new();

    for (word, replies, with_you) in WORD_RULES {
        if !has(word) {
            continue;
        }
        out.extend(replies.iter().map(|s| s.to_string()));
        if has("you") {
            out.extend(with_you.iter().map(|s| s.to_string()));
        }
    }

    if let Some(number) = lowered.iter().find(|w| NUMBER_WORDS.contains(&w.as_str())) {
        out.push(format!("I need {number}!"));
        out.push(format!("Give me {number}!"));
    }

    if words.len() > 1 {
        let phrase: Vec<&str> = words.iter().map(|w| w.as_ref()).collect();
        out.push(format!("{}!", title_case(&phrase.join(" "))));
    }

    out
}
