//! # Tokenizador e Segmentador de Sentenças para o Espanhol
//!
//! Divide o texto bruto em sentenças e tokens, preservando os offsets de
//! byte no texto original. A segmentação de palavras segue as fronteiras
//! UAX-29 (crate `unicode-segmentation`), com três ajustes para o espanhol:
//!
//! - Abreviações conhecidas mantêm o ponto final colado (ex: `"Sr."`).
//! - Números com separadores permanecem inteiros (ex: `"1.234,56"`).
//! - Palavras hifenizadas permanecem inteiras (ex: `"teórico-práctico"`);
//!   quem decide desmembrá-las é o gerador de candidatos, não o tokenizador.
//!
//! Pontuação vira token próprio (`"¿"`, `","`, `"»"`, ...). Uma sentença
//! termina após `.` `!` `?` `…`, absorvendo aspas/parênteses de fechamento.

use serde::{Deserialize, Serialize};
use unicode_segmentation::UnicodeSegmentation;

/// Um token extraído do texto original.
///
/// Unidade atômica do pipeline: carrega a posição exata no texto de origem
/// (`start`/`end` em bytes) para que a saída possa ser realinhada ao texto
/// sem perder a formatação original.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Token {
    /// O texto do token (ex: "casa", ",", "Sr.").
    pub text: String,
    /// Índice de byte inicial no texto original (inclusive).
    pub start: usize,
    /// Índice de byte final no texto original (exclusivo).
    pub end: usize,
    /// Índice sequencial do token dentro da sentença (0, 1, 2...).
    pub index: usize,
}

impl Token {
    /// Um token é "palavra" se contém ao menos um caractere alfanumérico.
    /// Tokens de pontuação pura retornam `false`.
    pub fn is_word(&self) -> bool {
        self.text.chars().any(char::is_alphanumeric)
    }
}

/// Abreviações comuns em espanhol cujo ponto final não encerra a sentença.
const ABBREVIATIONS: &[&str] = &[
    "Sr", "Sra", "Srta", "D", "Dña", "Dr", "Dra", "Prof", "Profa", "Lic",
    "Ud", "Uds", "Vd", "Vds", "EE", "UU", "etc", "pág", "págs", "núm",
    "tel", "av", "avda", "c", "art", "cap", "vol", "ej", "aprox", "dpto",
];

/// Pontuação que encerra uma sentença.
const SENTENCE_END: &[&str] = &[".", "!", "?", "…"];

/// Pontuação de fechamento absorvida pela sentença que termina.
const CLOSERS: &[&str] = &["\"", "'", "»", ")", "]", "”", "’"];

/// Segmenta o texto em sentenças, cada uma como lista ordenada de tokens.
///
/// Este é o ponto de entrada usado pela fachada ([`crate::tagger`]): o motor
/// de desambiguação sempre trabalha sentença a sentença.
pub fn segment(text: &str) -> Vec<Vec<Token>> {
    let tokens = tokenize(text);
    let mut sentences: Vec<Vec<Token>> = Vec::new();
    let mut current: Vec<Token> = Vec::new();
    let mut closing = false;

    for token in tokens {
        if closing && !CLOSERS.contains(&token.text.as_str()) {
            // A pontuação de fechamento acabou: fecha a sentença pendente.
            sentences.push(reindex(std::mem::take(&mut current)));
            closing = false;
        }
        let ends = SENTENCE_END.contains(&token.text.as_str());
        current.push(token);
        if ends {
            closing = true;
        }
    }
    if !current.is_empty() {
        sentences.push(reindex(current));
    }
    sentences
}

/// Tokeniza um texto completo: fronteiras UAX-29 + abreviações + hífens.
pub fn tokenize(text: &str) -> Vec<Token> {
    let raw = raw_tokens(text);
    let merged = merge_hyphenated(text, merge_abbreviations(text, raw));
    reindex(merged)
}

/// Tokenização "crua" de uma única forma, sem religar hífens nem abreviações.
///
/// Usada pelo gerador de candidatos para desmembrar um token em pontuação
/// colada + miolo (ex: `"«casa"` → `"«"`, `"casa"`; `"re-abrir"` → `"re"`,
/// `"-"`, `"abrir"`).
pub fn resegment(form: &str) -> Vec<Token> {
    reindex(raw_tokens(form))
}

/// Passa UAX-29 sobre o texto, descartando segmentos de espaço em branco.
fn raw_tokens(text: &str) -> Vec<Token> {
    text.split_word_bound_indices()
        .filter(|(_, seg)| !seg.chars().all(char::is_whitespace))
        .map(|(start, seg)| Token {
            text: seg.to_string(),
            start,
            end: start + seg.len(),
            index: 0,
        })
        .collect()
}

/// Religa `"Sr"` + `"."` em `"Sr."` quando a abreviação é conhecida e o
/// ponto está colado.
fn merge_abbreviations(text: &str, tokens: Vec<Token>) -> Vec<Token> {
    let mut merged: Vec<Token> = Vec::with_capacity(tokens.len());
    let mut i = 0;
    while i < tokens.len() {
        let is_abbrev = ABBREVIATIONS.contains(&tokens[i].text.as_str());
        let dot_attached = tokens
            .get(i + 1)
            .map(|next| next.text == "." && next.start == tokens[i].end)
            .unwrap_or(false);
        if is_abbrev && dot_attached {
            let start = tokens[i].start;
            let end = tokens[i + 1].end;
            merged.push(Token {
                text: text[start..end].to_string(),
                start,
                end,
                index: 0,
            });
            i += 2;
        } else {
            merged.push(tokens[i].clone());
            i += 1;
        }
    }
    merged
}

/// Religa sequências `palavra - palavra` coladas (sem espaços) em um único
/// token hifenizado, estendendo enquanto o padrão continuar (`a-b-c`).
fn merge_hyphenated(text: &str, tokens: Vec<Token>) -> Vec<Token> {
    let mut merged: Vec<Token> = Vec::with_capacity(tokens.len());
    let mut i = 0;
    while i < tokens.len() {
        if !tokens[i].is_word() {
            merged.push(tokens[i].clone());
            i += 1;
            continue;
        }
        let start = tokens[i].start;
        let mut end = tokens[i].end;
        let mut j = i;
        while j + 2 < tokens.len()
            && tokens[j + 1].text == "-"
            && tokens[j + 1].start == tokens[j].end
            && tokens[j + 2].start == tokens[j + 1].end
            && tokens[j + 2].is_word()
        {
            j += 2;
            end = tokens[j].end;
        }
        merged.push(Token {
            text: text[start..end].to_string(),
            start,
            end,
            index: 0,
        });
        i = j + 1;
    }
    merged
}

/// Reatribui os índices sequenciais após qualquer fusão/divisão.
fn reindex(mut tokens: Vec<Token>) -> Vec<Token> {
    for (i, token) in tokens.iter_mut().enumerate() {
        token.index = i;
    }
    tokens
}

#[cfg(test)]
mod tests {
    use super::*;

    fn texts(tokens: &[Token]) -> Vec<&str> {
        tokens.iter().map(|t| t.text.as_str()).collect()
    }

    #[test]
    fn test_tokenize_basic() {
        let tokens = tokenize("La casa es blanca.");
        assert_eq!(texts(&tokens), vec!["La", "casa", "es", "blanca", "."]);
        assert_eq!(tokens[1].start, 3);
        assert_eq!(tokens[1].end, 7);
    }

    #[test]
    fn test_tokenize_inverted_punctuation() {
        let tokens = tokenize("¿Quién vive?");
        assert_eq!(texts(&tokens), vec!["¿", "Quién", "vive", "?"]);
    }

    #[test]
    fn test_tokenize_abbreviation_keeps_dot() {
        let tokens = tokenize("El Sr. García llegó.");
        assert_eq!(texts(&tokens), vec!["El", "Sr.", "García", "llegó", "."]);
    }

    #[test]
    fn test_tokenize_grouped_number_stays_whole() {
        let tokens = tokenize("Costó 1.234 euros");
        assert!(texts(&tokens).contains(&"1.234"));
    }

    #[test]
    fn test_tokenize_hyphenated_word_stays_whole() {
        let tokens = tokenize("un análisis teórico-práctico");
        assert!(texts(&tokens).contains(&"teórico-práctico"));
    }

    #[test]
    fn test_resegment_splits_hyphen_and_punctuation() {
        assert_eq!(texts(&resegment("re-abrir")), vec!["re", "-", "abrir"]);
        assert_eq!(texts(&resegment("«casa")), vec!["«", "casa"]);
    }

    #[test]
    fn test_segment_splits_sentences() {
        let sentences = segment("La casa es blanca. El perro come.");
        assert_eq!(sentences.len(), 2);
        assert_eq!(texts(&sentences[0]), vec!["La", "casa", "es", "blanca", "."]);
        assert_eq!(texts(&sentences[1]), vec!["El", "perro", "come", "."]);
        // Índices reiniciam por sentença
        assert_eq!(sentences[1][0].index, 0);
    }

    #[test]
    fn test_segment_absorbs_closing_quote() {
        let sentences = segment("Dijo: «hola.» Luego salió.");
        assert_eq!(sentences.len(), 2);
        assert_eq!(sentences[0].last().unwrap().text, "»");
    }

    #[test]
    fn test_segment_abbreviation_does_not_split() {
        let sentences = segment("El Sr. García vive en Madrid.");
        assert_eq!(sentences.len(), 1);
    }

    #[test]
    fn test_segment_empty() {
        assert!(segment("").is_empty());
        assert!(segment("   ").is_empty());
    }

    #[test]
    fn test_token_is_word() {
        let tokens = tokenize("casa , 2024");
        assert!(tokens[0].is_word());
        assert!(!tokens[1].is_word());
        assert!(tokens[2].is_word());
    }
}
