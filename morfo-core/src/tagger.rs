//! # Fachada do Etiquetador — Texto → Sentenças Etiquetadas
//!
//! Orquestra todos os módulos: segmentação ([`crate::tokenizer`]), geração
//! de candidatos por token (léxico → retokenização → prefixos →
//! classificador) e desambiguação por sentença ([`crate::sentence`]).
//!
//! ## Heurística de início de sentença
//!
//! O primeiro token não-pontuação de cada sentença costuma vir capitalizado
//! só por posição ("La casa..."). Ele é analisado em minúsculas quando:
//!
//! 1. tem capitalização apenas inicial (`"Casa"`, não `"CASA"`);
//! 2. o token seguinte, se houver, não é capitalizado (bloqueia nomes
//!    próprios compostos como "La Habana");
//! 3. a forma minúscula ocorre no corpus com frequência ao menos o dobro da
//!    forma original (e ocorre de fato).
//!
//! A forma emitida na saída é **sempre** o texto original do token; o
//! rebaixamento vale apenas para a análise.
//!
//! ## Concorrência
//!
//! Sentenças são independentes entre si e o modelo é somente-leitura, então
//! as sentenças de uma chamada são etiquetadas em paralelo (`rayon`).

use rayon::prelude::*;
use regex::Regex;
use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::lexicon::TokenCandidates;
use crate::model::TaggerModel;
use crate::sentence::SentenceTagger;
use crate::tag::Tag;
use crate::tokenizer::{self, Token};

/// Uma palavra etiquetada: forma original, tag escolhida (id e código) e o
/// lema associado à tag no momento da geração de candidatos.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TaggedWord {
    /// Texto original do token, como apareceu na entrada.
    pub form: String,
    /// Id da tag no alfabeto do modelo.
    pub tag: Tag,
    /// Código textual da tag (ex: "NCFS").
    pub code: String,
    /// Lema escolhido junto com a tag — a busca nunca troca o lema.
    pub lemma: String,
}

/// Resultado de uma sentença: um [`TaggedWord`] por token, na ordem.
pub type SentenceResult = Vec<TaggedWord>;

/// A fachada do etiquetador morfossintático.
///
/// Construída uma vez sobre um [`TaggerModel`] imutável; todas as chamadas
/// são funções puras do texto de entrada.
pub struct Tagger {
    model: TaggerModel,
    /// Forma com capitalização apenas inicial ("Casa", "García").
    cap_initial: Regex,
}

impl Tagger {
    pub fn new(model: TaggerModel) -> Self {
        let cap_initial = Regex::new(r"^\p{Lu}\p{Ll}+$").expect("regex estática válida");
        Self { model, cap_initial }
    }

    /// Etiquetador pronto com o modelo de demonstração embutido.
    pub fn demo() -> Self {
        Self::new(TaggerModel::demo())
    }

    pub fn model(&self) -> &TaggerModel {
        &self.model
    }

    /// Descrição legível da tag (via o conversor de códigos do modelo).
    pub fn describe(&self, tag: Tag) -> String {
        self.model
            .describer()
            .describe(self.model.alphabet().code(tag))
    }

    /// Etiqueta um texto completo: uma lista de sentenças etiquetadas.
    ///
    /// Texto vazio devolve lista vazia. Chamadas repetidas com o mesmo texto
    /// e o mesmo modelo devolvem resultados idênticos.
    pub fn tag_text(&self, text: &str) -> Vec<SentenceResult> {
        let sentences = tokenizer::segment(text);
        debug!(sentences = sentences.len(), "texto segmentado");
        sentences
            .par_iter()
            .map(|tokens| self.tag_sentence(tokens))
            .collect()
    }

    /// Etiqueta uma sentença já tokenizada.
    pub fn tag_sentence(&self, tokens: &[Token]) -> SentenceResult {
        if tokens.is_empty() {
            return Vec::new();
        }

        // === 1. Heurística de rebaixamento do primeiro token ===
        let lowered_first = self.lowered_first_form(tokens);

        // === 2. Candidatos por token (imutáveis durante a busca) ===
        let candidates: Vec<TokenCandidates> = tokens
            .iter()
            .enumerate()
            .map(|(position, token)| {
                let form = match &lowered_first {
                    Some((idx, lowered)) if *idx == position => lowered.as_str(),
                    _ => token.text.as_str(),
                };
                self.get_possible_tags(form)
            })
            .collect();

        // === 3. Melhor sequência de tags para a sentença inteira ===
        let engine = SentenceTagger::new(self.model.table());
        let (sequence, weight) = engine.best_sequence(&candidates);
        debug!(tokens = tokens.len(), weight, "sentença etiquetada");

        // === 4. Leitura posicional dos lemas escolhidos ===
        tokens
            .iter()
            .zip(sequence)
            .zip(&candidates)
            .map(|((token, tag), token_candidates)| {
                let candidate = &token_candidates[&tag];
                TaggedWord {
                    form: token.text.clone(),
                    tag,
                    code: self.model.alphabet().code(tag).to_string(),
                    lemma: candidate.lemma.clone(),
                }
            })
            .collect()
    }

    /// Candidatos de um token, com lemas de nomes próprios preservados
    /// (equivale a `get_possible_tags_with(token, true)`).
    pub fn get_possible_tags(&self, token: &str) -> TokenCandidates {
        self.get_possible_tags_with(token, true)
    }

    /// Candidatos de um token. Nunca devolve mapa vazio: o classificador de
    /// desconhecidos garante ao menos um candidato.
    ///
    /// Ordem de resolução:
    /// 1. forma exata no léxico;
    /// 2. forma em minúsculas;
    /// 3. retokenização (pontuação/hífens colados), reaplicando o material
    ///    removido ao lema;
    /// 4. desmembramento de prefixos (o lema fica sendo o do radical, sem
    ///    reanexar o prefixo);
    /// 5. classificador heurístico de desconhecidos.
    pub fn get_possible_tags_with(
        &self,
        token: &str,
        proper_nouns_are_lemmas: bool,
    ) -> TokenCandidates {
        let lexicon = self.model.lexicon();

        if let Some(candidates) = lexicon.lookup(token) {
            return candidates.clone();
        }

        let lowered = token.to_lowercase();
        if lowered != token {
            if let Some(candidates) = lexicon.lookup(&lowered) {
                return candidates.clone();
            }
        }

        if let Some(candidates) = self.retokenized_candidates(token) {
            return candidates;
        }

        let stripped = self
            .model
            .stripper()
            .get_unprefixed_form(lexicon, &lowered);
        if stripped != lowered {
            if let Some(candidates) = lexicon.lookup(&stripped) {
                return candidates.clone();
            }
        }

        let (tag, candidate) = self
            .model
            .classifier()
            .classify(token, proper_nouns_are_lemmas);
        TokenCandidates::from([(tag, candidate)])
    }

    /// Retokeniza um token com pontuação/hífens colados e tenta o léxico
    /// sobre a última parte, lembrando o material removido para reaplicá-lo
    /// ao lema (`"«casa"` → lema `"«casa"`... a pontuação pertence à forma).
    fn retokenized_candidates(&self, token: &str) -> Option<TokenCandidates> {
        let parts = tokenizer::resegment(token);
        if parts.len() < 2 {
            return None;
        }
        // A última parte-palavra é o miolo; o que vem antes dela é o
        // material removido. Partes finais de pontuação são descartadas.
        let core = parts.iter().rev().find(|part| part.is_word())?;
        let prefix = &token[..core.start];

        let lexicon = self.model.lexicon();
        let mut found = lexicon.lookup(&core.text).cloned();
        if found.is_none() {
            let lowered = core.text.to_lowercase();
            if lowered != core.text {
                found = lexicon.lookup(&lowered).cloned();
            }
        }

        let mut candidates = found?;
        if !prefix.is_empty() {
            for candidate in candidates.values_mut() {
                candidate.lemma = format!("{}{}", prefix, candidate.lemma);
            }
        }
        Some(candidates)
    }

    /// Decide o rebaixamento do primeiro token não-pontuação da sentença.
    /// Devolve o índice do token e a forma minúscula a analisar.
    fn lowered_first_form(&self, tokens: &[Token]) -> Option<(usize, String)> {
        let position = tokens.iter().position(|t| t.is_word())?;
        let first = &tokens[position];
        if !self.cap_initial.is_match(&first.text) {
            return None;
        }
        if let Some(next) = tokens.get(position + 1) {
            let next_capitalized = next
                .text
                .chars()
                .next()
                .map(char::is_uppercase)
                .unwrap_or(false);
            if next_capitalized {
                return None;
            }
        }
        let lowered = first.text.to_lowercase();
        let lowered_freq = self.model.frequency(&lowered);
        let original_freq = self.model.frequency(&first.text);
        if lowered_freq > 0 && lowered_freq >= 2 * original_freq {
            Some((position, lowered))
        } else {
            None
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::resources::demo_texts;

    fn tagger() -> Tagger {
        Tagger::demo()
    }

    #[test]
    fn test_single_word_sentence_casa() {
        let t = tagger();
        let result = t.tag_text("casa");
        assert_eq!(result.len(), 1);
        assert_eq!(result[0].len(), 1);
        let word = &result[0][0];
        assert_eq!(word.form, "casa");
        assert_eq!(word.code, "NCFS");
        assert_eq!(word.lemma, "casa");
    }

    #[test]
    fn test_unknown_capitalized_is_proper_noun() {
        let t = tagger();
        let result = t.tag_text("Zzyxx");
        let word = &result[0][0];
        assert!(word.code.starts_with("NP"));
        assert_eq!(word.lemma, "Zzyxx");
    }

    #[test]
    fn test_number_token() {
        let t = tagger();
        let result = t.tag_text("2024");
        assert_eq!(result[0][0].code, "Z");
    }

    #[test]
    fn test_prefix_stripping_reabrir() {
        let t = tagger();
        // "reabrir" não está no léxico, mas "abrir" sim
        let candidates = t.get_possible_tags("reabrir");
        let codes: Vec<&str> = candidates
            .keys()
            .map(|&tag| t.model().alphabet().code(tag))
            .collect();
        assert_eq!(codes, vec!["VMN"]);
        // O lema é o do radical, sem reanexar o prefixo
        assert_eq!(candidates.values().next().unwrap().lemma, "abrir");
    }

    #[test]
    fn test_retokenization_reapplies_stripped_prefix() {
        let t = tagger();
        let candidates = t.get_possible_tags("«casa");
        assert!(!candidates.is_empty());
        assert!(candidates.values().all(|c| c.lemma.starts_with('«')));
    }

    #[test]
    fn test_chosen_tag_is_a_candidate_and_lemma_is_stable() {
        let t = tagger();
        for text in demo_texts() {
            for sentence in t.tag_text(text) {
                for word in sentence {
                    let candidates = t.get_possible_tags(&word.form);
                    // Candidatos da forma analisada: o rebaixamento pode ter
                    // trocado a forma, então tenta também a minúscula.
                    let lowered = word.form.to_lowercase();
                    let candidates = if candidates.contains_key(&word.tag) {
                        candidates
                    } else {
                        t.get_possible_tags(&lowered)
                    };
                    let candidate = candidates
                        .get(&word.tag)
                        .expect("tag escolhida deve ser candidata do token");
                    assert_eq!(candidate.lemma, word.lemma);
                }
            }
        }
    }

    #[test]
    fn test_article_noun_disambiguation() {
        let t = tagger();
        let result = t.tag_text("La casa es blanca.");
        let codes: Vec<&str> = result[0].iter().map(|w| w.code.as_str()).collect();
        assert_eq!(codes, vec!["DA0FS", "NCFS", "VSIP3S", "AQ0FS", "Fp"]);
        // A forma emitida preserva a capitalização original
        assert_eq!(result[0][0].form, "La");
        assert_eq!(result[0][1].lemma, "casa");
    }

    #[test]
    fn test_lowering_applies_to_sentence_initial_word() {
        let t = tagger();
        // "Sol" existe no léxico como nome próprio, mas "sol" (substantivo)
        // é duas vezes mais frequente → analisa em minúsculas
        let result = t.tag_text("Sol come.");
        assert_eq!(result[0][0].code, "NCMS");
        assert_eq!(result[0][0].form, "Sol");
    }

    #[test]
    fn test_lowering_blocked_by_following_capitalized_token() {
        let t = tagger();
        let result = t.tag_text("Sol García come.");
        assert_eq!(result[0][0].code, "NPMS");
    }

    #[test]
    fn test_empty_text() {
        let t = tagger();
        assert!(t.tag_text("").is_empty());
        assert!(t.tag_text("   \n  ").is_empty());
    }

    #[test]
    fn test_tag_text_is_idempotent() {
        let t = tagger();
        let text = "El perro come en la casa. ¿Vive el niño?";
        let first = t.tag_text(text);
        for _ in 0..3 {
            assert_eq!(t.tag_text(text), first);
        }
    }

    #[test]
    fn test_describe_known_tag() {
        let t = tagger();
        let tag = t.model().alphabet().tag("NCFS").unwrap();
        assert_eq!(t.describe(tag), "substantivo comum feminino singular");
    }
}
