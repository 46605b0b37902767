//! # Léxico — Forma Superficial → Candidatos (tag, peso, lema)
//!
//! O léxico é a tabela pré-computada que mapeia cada forma superficial ao
//! conjunto de análises possíveis. Os pesos vêm prontos do recurso carregado
//! (contagens de corpus já suavizadas); o motor nunca os reestima.
//!
//! ## Regra de fusão
//!
//! Quando lemas distintos produzem a **mesma tag** para uma forma (ex:
//! `"fue"` ← _ser_ e _ir_ com tags idênticas), os pesos são somados e o lema
//! retido é o de maior peso individual; em empate, o lema mais curto e, por
//! fim, o lexicograficamente menor. A fusão acontece uma única vez, na
//! construção — depois disso o léxico é somente-leitura.

use std::collections::{BTreeMap, HashMap};

use serde::{Deserialize, Serialize};

use crate::tag::Tag;

/// Uma análise candidata para um token: peso (> 0) e lema associado.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Candidate {
    pub weight: f64,
    pub lemma: String,
}

/// Mapa imutável tag → candidato de um token.
///
/// `BTreeMap` de propósito: a iteração em ordem de [`Tag`] (= ordem
/// lexicográfica dos códigos) torna reproduzível a enumeração de combinações
/// no motor de busca.
pub type TokenCandidates = BTreeMap<Tag, Candidate>;

/// Célula intermediária da fusão: acumula o peso total e lembra qual lema
/// teve o maior peso individual.
struct MergeCell {
    total: f64,
    lemma: String,
    best_individual: f64,
}

/// O léxico compilado: forma → candidatos.
#[derive(Debug, Clone, Default)]
pub struct Lexicon {
    entries: HashMap<String, TokenCandidates>,
}

impl Lexicon {
    /// Compila o léxico a partir das análises cruas `(forma, lema, tag, peso)`.
    ///
    /// Pré-condição: pesos estritamente positivos (validados na carga do
    /// modelo, [`crate::model`]).
    pub fn from_analyses<I>(analyses: I) -> Self
    where
        I: IntoIterator<Item = (String, String, Tag, f64)>,
    {
        let mut merging: HashMap<String, BTreeMap<Tag, MergeCell>> = HashMap::new();

        for (form, lemma, tag, weight) in analyses {
            let cell = merging.entry(form).or_default().entry(tag);
            match cell {
                std::collections::btree_map::Entry::Vacant(slot) => {
                    slot.insert(MergeCell {
                        total: weight,
                        lemma,
                        best_individual: weight,
                    });
                }
                std::collections::btree_map::Entry::Occupied(mut slot) => {
                    let cell = slot.get_mut();
                    cell.total += weight;
                    if prefer_lemma(weight, &lemma, cell.best_individual, &cell.lemma) {
                        cell.best_individual = weight;
                        cell.lemma = lemma;
                    }
                }
            }
        }

        let entries = merging
            .into_iter()
            .map(|(form, cells)| {
                let candidates = cells
                    .into_iter()
                    .map(|(tag, cell)| {
                        (
                            tag,
                            Candidate {
                                weight: cell.total,
                                lemma: cell.lemma,
                            },
                        )
                    })
                    .collect();
                (form, candidates)
            })
            .collect();

        Self { entries }
    }

    /// Busca exata pela forma superficial.
    pub fn lookup(&self, form: &str) -> Option<&TokenCandidates> {
        self.entries.get(form)
    }

    /// Indica se a forma tem entrada no léxico.
    pub fn contains(&self, form: &str) -> bool {
        self.entries.contains_key(form)
    }

    /// Quantidade de formas distintas.
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

/// Decide se `(new_weight, new_lemma)` substitui o lema retido.
///
/// Maior peso individual vence; empata em peso → lema mais curto; empata em
/// comprimento → lexicograficamente menor.
fn prefer_lemma(new_weight: f64, new_lemma: &str, best_weight: f64, best_lemma: &str) -> bool {
    if new_weight != best_weight {
        return new_weight > best_weight;
    }
    if new_lemma.chars().count() != best_lemma.chars().count() {
        return new_lemma.chars().count() < best_lemma.chars().count();
    }
    new_lemma < best_lemma
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::tag::TagAlphabet;

    fn alphabet() -> TagAlphabet {
        TagAlphabet::from_codes(["NCFS", "VMIP3S"])
    }

    #[test]
    fn test_lookup_basic() {
        let alpha = alphabet();
        let ncfs = alpha.tag("NCFS").unwrap();
        let lexicon = Lexicon::from_analyses([(
            "casa".to_string(),
            "casa".to_string(),
            ncfs,
            10.0,
        )]);
        let candidates = lexicon.lookup("casa").unwrap();
        assert_eq!(candidates[&ncfs].weight, 10.0);
        assert_eq!(candidates[&ncfs].lemma, "casa");
        assert!(lexicon.lookup("perro").is_none());
    }

    #[test]
    fn test_merge_sums_weights_and_keeps_heavier_lemma() {
        let alpha = alphabet();
        let v = alpha.tag("VMIP3S").unwrap();
        // "fue": ser (30) e ir (20) com a mesma tag → peso 50, lema "ser"
        let lexicon = Lexicon::from_analyses([
            ("fue".to_string(), "ir".to_string(), v, 20.0),
            ("fue".to_string(), "ser".to_string(), v, 30.0),
        ]);
        let candidate = &lexicon.lookup("fue").unwrap()[&v];
        assert_eq!(candidate.weight, 50.0);
        assert_eq!(candidate.lemma, "ser");
    }

    #[test]
    fn test_merge_tie_prefers_shorter_lemma() {
        let alpha = alphabet();
        let v = alpha.tag("VMIP3S").unwrap();
        let lexicon = Lexicon::from_analyses([
            ("x".to_string(), "abcd".to_string(), v, 5.0),
            ("x".to_string(), "abc".to_string(), v, 5.0),
        ]);
        assert_eq!(lexicon.lookup("x").unwrap()[&v].lemma, "abc");
    }

    #[test]
    fn test_distinct_tags_stay_separate() {
        let alpha = alphabet();
        let ncfs = alpha.tag("NCFS").unwrap();
        let v = alpha.tag("VMIP3S").unwrap();
        let lexicon = Lexicon::from_analyses([
            ("casa".to_string(), "casa".to_string(), ncfs, 10.0),
            ("casa".to_string(), "casar".to_string(), v, 2.0),
        ]);
        let candidates = lexicon.lookup("casa").unwrap();
        assert_eq!(candidates.len(), 2);
        assert_eq!(candidates[&v].lemma, "casar");
    }
}
