//! # Classificador de Palavras Desconhecidas (OOV)
//!
//! Última linha de defesa do gerador de candidatos: todo token que escapou
//! do léxico, da retokenização e do desmembramento de prefixos recebe aqui
//! **exatamente um** candidato, garantindo que o motor de busca nunca veja
//! um token sem tags.
//!
//! Ordem estrita das heurísticas (a primeira que casa decide):
//!
//! 1. Inicial maiúscula ou apóstrofo interno → nome próprio, com gênero
//!    adivinhado pela letra final (`a` → feminino, `o` → masculino, senão
//!    comum) e número pelo `s` final.
//! 2. Contém dígito → numeral (`Z`).
//! 3. Tem alguma minúscula → substantivo comum genérico invariável (`NC00`).
//! 4. Resto (siglas, pontuação órfã) → desconhecido (`X`).

use crate::lexicon::Candidate;
use crate::tag::{Tag, TagAlphabet};

/// Código do candidato numeral.
pub const TAG_NUMBER: &str = "Z";
/// Código do substantivo comum genérico (traços invariáveis).
pub const TAG_COMMON_GENERIC: &str = "NC00";
/// Código residual para tokens inclassificáveis.
pub const TAG_UNKNOWN: &str = "X";

/// Peso atribuído a todo candidato heurístico.
const FALLBACK_WEIGHT: f64 = 1.0;

/// Todos os códigos que o classificador pode emitir. O construtor do modelo
/// interna estes códigos no alfabeto antes de congelá-lo.
pub fn fallback_tag_codes() -> Vec<&'static str> {
    vec![
        "NPFS", "NPFP", "NPMS", "NPMP", "NPCS", "NPCP",
        TAG_NUMBER, TAG_COMMON_GENERIC, TAG_UNKNOWN,
    ]
}

/// Classificador heurístico com as tags de fallback já resolvidas.
#[derive(Debug, Clone)]
pub struct UnknownWordClassifier {
    /// Nomes próprios indexados por \[gênero: F/M/C\]\[número: S/P\].
    proper: [[Tag; 2]; 3],
    number: Tag,
    common: Tag,
    unknown: Tag,
}

impl UnknownWordClassifier {
    /// Resolve os códigos de fallback no alfabeto congelado do modelo.
    ///
    /// Invariante de construção: o alfabeto foi criado incluindo
    /// [`fallback_tag_codes`]; um código ausente é um erro de programação.
    pub fn new(alphabet: &TagAlphabet) -> Self {
        let must = |code: &str| {
            alphabet
                .tag(code)
                .expect("alfabeto congelado sem os códigos de fallback")
        };
        Self {
            proper: [
                [must("NPFS"), must("NPFP")],
                [must("NPMS"), must("NPMP")],
                [must("NPCS"), must("NPCP")],
            ],
            number: must(TAG_NUMBER),
            common: must(TAG_COMMON_GENERIC),
            unknown: must(TAG_UNKNOWN),
        }
    }

    /// Classifica um token fora do vocabulário. Sempre devolve exatamente um
    /// candidato, com peso fixo [`FALLBACK_WEIGHT`].
    ///
    /// `proper_nouns_are_lemmas = true` mantém o próprio token como lema dos
    /// nomes próprios; `false` remove o `s` de plural antes de lematizar.
    pub fn classify(&self, token: &str, proper_nouns_are_lemmas: bool) -> (Tag, Candidate) {
        // === 1. Nome próprio ===
        if starts_uppercase(token) || has_internal_apostrophe(token) {
            let final_letter = token
                .chars()
                .last()
                .and_then(|c| c.to_lowercase().next());
            let gender = match final_letter {
                Some('a') => 0,
                Some('o') => 1,
                _ => 2,
            };
            let plural = matches!(final_letter, Some('s'));
            let lemma = if plural && !proper_nouns_are_lemmas {
                strip_final_s(token)
            } else {
                token.to_string()
            };
            let tag = self.proper[gender][usize::from(plural)];
            return (tag, candidate(lemma));
        }

        // === 2. Numeral ===
        if token.chars().any(char::is_numeric) {
            return (self.number, candidate(token.to_string()));
        }

        // === 3. Substantivo comum genérico ===
        if token.chars().any(char::is_lowercase) {
            return (self.common, candidate(strip_final_s(token)));
        }

        // === 4. Desconhecido ===
        (self.unknown, candidate(token.to_string()))
    }
}

fn candidate(lemma: String) -> Candidate {
    Candidate {
        weight: FALLBACK_WEIGHT,
        lemma,
    }
}

fn starts_uppercase(token: &str) -> bool {
    token.chars().next().map(char::is_uppercase).unwrap_or(false)
}

/// Apóstrofo (reto ou tipográfico) em posição interna, como em "d'Orsay".
fn has_internal_apostrophe(token: &str) -> bool {
    let count = token.chars().count();
    token
        .chars()
        .enumerate()
        .any(|(i, c)| matches!(c, '\'' | '\u{2019}') && i > 0 && i + 1 < count)
}

fn strip_final_s(token: &str) -> String {
    token
        .strip_suffix('s')
        .or_else(|| token.strip_suffix('S'))
        .unwrap_or(token)
        .to_string()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn classifier() -> (UnknownWordClassifier, TagAlphabet) {
        let alphabet = TagAlphabet::from_codes(fallback_tag_codes());
        (UnknownWordClassifier::new(&alphabet), alphabet)
    }

    #[test]
    fn test_proper_noun_masculine() {
        let (c, alpha) = classifier();
        let (tag, cand) = c.classify("Zzyxxo", true);
        assert_eq!(alpha.code(tag), "NPMS");
        assert_eq!(cand.lemma, "Zzyxxo");
    }

    #[test]
    fn test_proper_noun_feminine_and_common_gender() {
        let (c, alpha) = classifier();
        let (tag, _) = c.classify("Lucía", true);
        assert_eq!(alpha.code(tag), "NPFS");
        let (tag, _) = c.classify("Madrid", true);
        assert_eq!(alpha.code(tag), "NPCS");
    }

    #[test]
    fn test_proper_noun_plural_lemma_flag() {
        let (c, alpha) = classifier();
        let (tag, cand) = c.classify("Burgos", true);
        assert_eq!(alpha.code(tag), "NPCP");
        assert_eq!(cand.lemma, "Burgos");
        let (_, cand) = c.classify("Burgos", false);
        assert_eq!(cand.lemma, "Burgo");
    }

    #[test]
    fn test_internal_apostrophe_is_proper_noun() {
        let (c, alpha) = classifier();
        let (tag, _) = c.classify("d'Orsay", true);
        assert!(alpha.code(tag).starts_with("NP"));
    }

    #[test]
    fn test_digits_are_number() {
        let (c, alpha) = classifier();
        let (tag, cand) = c.classify("2024", true);
        assert_eq!(alpha.code(tag), TAG_NUMBER);
        assert_eq!(cand.lemma, "2024");
    }

    #[test]
    fn test_lowercase_is_generic_common_noun() {
        let (c, alpha) = classifier();
        let (tag, cand) = c.classify("zorritos", true);
        assert_eq!(alpha.code(tag), TAG_COMMON_GENERIC);
        assert_eq!(cand.lemma, "zorrito");
    }

    #[test]
    fn test_residue_is_unknown() {
        let (c, alpha) = classifier();
        let (tag, _) = c.classify("--", true);
        assert_eq!(alpha.code(tag), TAG_UNKNOWN);
    }

    #[test]
    fn test_priority_uppercase_before_digit() {
        let (c, alpha) = classifier();
        // Inicial maiúscula vence o dígito interno
        let (tag, _) = c.classify("A320", true);
        assert!(alpha.code(tag).starts_with("NP"));
    }
}
