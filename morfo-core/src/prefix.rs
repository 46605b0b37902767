//! # Desmembramento de Prefixos — Trie + Regra Fonotática do "r"
//!
//! Formas fora do léxico frequentemente são composições transparentes de
//! prefixo + radical conhecido (`"reabrir"` = `re` + `abrir`). Este módulo
//! percorre uma trie de prefixos conhecidos e devolve a forma desprefixada
//! mais longa que exista no léxico.
//!
//! ## Regra do "r" dobrado
//!
//! Na ortografia espanhola o `r` inicial de radical dobra depois de prefixo
//! terminado em vogal (`anti` + `robo` → `"antirrobo"`). Na direção inversa:
//!
//! - radical começando em `"rr"` colapsa para `"r"` antes da consulta ao
//!   léxico (`"rrobo"` → `"robo"`);
//! - radical começando em `"r"` simples só é plausível se o caractere
//!   imediatamente anterior na forma original for `-`, `r`, `l`, `n` ou `s`
//!   (`"enriquecer"`, `"sub-rayar"`); caso contrário o corte é descartado.

use std::collections::{HashMap, HashSet, VecDeque};

use crate::lexicon::Lexicon;

/// Radicais com menos de 4 caracteres não são considerados.
const MIN_STEM_CHARS: usize = 4;

/// Nó da trie: filhos por caractere + marca de fim de prefixo.
#[derive(Debug, Clone, Default)]
struct TrieNode {
    children: HashMap<char, usize>,
    terminal: bool,
}

/// Trie de prefixos, em arena (índices em vez de ponteiros).
/// Somente-leitura após a construção.
#[derive(Debug, Clone)]
pub struct PrefixTrie {
    nodes: Vec<TrieNode>,
}

impl PrefixTrie {
    pub fn new() -> Self {
        Self {
            nodes: vec![TrieNode::default()],
        }
    }

    pub fn from_prefixes<I, S>(prefixes: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let mut trie = Self::new();
        for prefix in prefixes {
            trie.insert(prefix.as_ref());
        }
        trie
    }

    fn insert(&mut self, prefix: &str) {
        let mut node = 0;
        for ch in prefix.chars() {
            node = match self.nodes[node].children.get(&ch) {
                Some(&next) => next,
                None => {
                    let next = self.nodes.len();
                    self.nodes.push(TrieNode::default());
                    self.nodes[node].children.insert(ch, next);
                    next
                }
            };
        }
        self.nodes[node].terminal = true;
    }

    /// Offsets de byte em `form` onde termina algum prefixo conhecido,
    /// do mais curto ao mais longo.
    pub fn prefix_ends(&self, form: &str) -> Vec<usize> {
        let mut ends = Vec::new();
        let mut node = 0;
        for (pos, ch) in form.char_indices() {
            node = match self.nodes[node].children.get(&ch) {
                Some(&next) => next,
                None => break,
            };
            if self.nodes[node].terminal {
                ends.push(pos + ch.len_utf8());
            }
        }
        ends
    }

    /// Quantidade de nós (inclui a raiz).
    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.nodes.len() <= 1
    }
}

impl Default for PrefixTrie {
    fn default() -> Self {
        Self::new()
    }
}

/// Desmembrador de prefixos: trie + busca em largura sobre o léxico.
#[derive(Debug, Clone)]
pub struct PrefixStripper {
    trie: PrefixTrie,
}

impl PrefixStripper {
    pub fn new(trie: PrefixTrie) -> Self {
        Self { trie }
    }

    /// Devolve a forma desprefixada mais longa presente no léxico, ou a
    /// própria forma se nenhum corte for válido.
    ///
    /// Só atua sobre formas compostas de letras do alfabeto espanhol e
    /// hífens. Cada radical válido volta para a fila: prefixos podem ser
    /// removidos em cadeia enquanto o radical mantiver ao menos
    /// [`MIN_STEM_CHARS`] caracteres. Empate em comprimento resolve-se pelo
    /// radical lexicograficamente menor.
    pub fn get_unprefixed_form(&self, lexicon: &Lexicon, form: &str) -> String {
        if !is_strippable(form) {
            return form.to_string();
        }

        let mut queue: VecDeque<String> = VecDeque::new();
        let mut seen: HashSet<String> = HashSet::new();
        let mut valid: Vec<String> = Vec::new();

        queue.push_back(form.to_string());
        seen.insert(form.to_string());

        while let Some(current) = queue.pop_front() {
            for end in self.trie.prefix_ends(&current) {
                if end == 0 || end >= current.len() {
                    continue;
                }
                let mut rest = &current[end..];
                let mut preceding = current[..end]
                    .chars()
                    .last()
                    .expect("prefixo não-vazio");
                // Hífen separando prefixo e radical é consumido e passa a
                // contar como o caractere anterior.
                if let Some(after_dash) = rest.strip_prefix('-') {
                    rest = after_dash;
                    preceding = '-';
                }
                let stem = match apply_r_rule(rest, preceding) {
                    Some(stem) => stem,
                    None => continue,
                };
                if stem.chars().count() < MIN_STEM_CHARS {
                    continue;
                }
                if lexicon.contains(&stem) && seen.insert(stem.clone()) {
                    valid.push(stem.clone());
                    queue.push_back(stem);
                }
            }
        }

        valid
            .into_iter()
            .max_by(|a, b| {
                a.chars()
                    .count()
                    .cmp(&b.chars().count())
                    .then_with(|| b.cmp(a))
            })
            .unwrap_or_else(|| form.to_string())
    }
}

/// Regra fonotática do "r" inicial de radical (ver doc do módulo).
fn apply_r_rule(rest: &str, preceding: char) -> Option<String> {
    if let Some(after_rr) = rest.strip_prefix("rr") {
        return Some(format!("r{}", after_rr));
    }
    if rest.starts_with('r') && !matches!(preceding, '-' | 'r' | 'l' | 'n' | 's') {
        return None;
    }
    Some(rest.to_string())
}

/// Somente letras do alfabeto espanhol e hífens são desmembráveis.
fn is_strippable(form: &str) -> bool {
    !form.is_empty()
        && form.chars().all(|c| {
            c.is_ascii_alphabetic() || c == '-' || "áéíóúüñÁÉÍÓÚÜÑ".contains(c)
        })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::tag::TagAlphabet;

    fn lexicon_with(forms: &[&str]) -> (Lexicon, TagAlphabet) {
        let alpha = TagAlphabet::from_codes(["NCMS"]);
        let tag = alpha.tag("NCMS").unwrap();
        let lexicon = Lexicon::from_analyses(
            forms
                .iter()
                .map(|f| (f.to_string(), f.to_string(), tag, 1.0)),
        );
        (lexicon, alpha)
    }

    fn stripper(prefixes: &[&str]) -> PrefixStripper {
        PrefixStripper::new(PrefixTrie::from_prefixes(prefixes))
    }

    #[test]
    fn test_strips_simple_prefix() {
        let (lexicon, _) = lexicon_with(&["abrir"]);
        let s = stripper(&["re", "des"]);
        assert_eq!(s.get_unprefixed_form(&lexicon, "reabrir"), "abrir");
    }

    #[test]
    fn test_unknown_stem_returns_original() {
        let (lexicon, _) = lexicon_with(&["abrir"]);
        let s = stripper(&["re"]);
        assert_eq!(s.get_unprefixed_form(&lexicon, "rezzz"), "rezzz");
    }

    #[test]
    fn test_rr_collapses_after_prefix() {
        let (lexicon, _) = lexicon_with(&["robo"]);
        let s = stripper(&["anti"]);
        assert_eq!(s.get_unprefixed_form(&lexicon, "antirrobo"), "robo");
    }

    #[test]
    fn test_single_r_requires_licensing_consonant() {
        let (lexicon, _) = lexicon_with(&["rayar"]);
        // "sub" termina em "b": corte em "rayar" é foneticamente implausível
        let s = stripper(&["sub"]);
        assert_eq!(s.get_unprefixed_form(&lexicon, "subrayar"), "subrayar");
        // Com hífen explícito o corte é permitido
        assert_eq!(s.get_unprefixed_form(&lexicon, "sub-rayar"), "rayar");
    }

    #[test]
    fn test_single_r_allowed_after_n() {
        let (lexicon, _) = lexicon_with(&["riquecer"]);
        let s = stripper(&["en"]);
        assert_eq!(s.get_unprefixed_form(&lexicon, "enriquecer"), "riquecer");
    }

    #[test]
    fn test_chained_prefixes() {
        let (lexicon, _) = lexicon_with(&["montar", "desmontar"]);
        let s = stripper(&["re", "des"]);
        // "desmontar" é válido e mais longo que "montar" → vence
        assert_eq!(s.get_unprefixed_form(&lexicon, "redesmontar"), "desmontar");
    }

    #[test]
    fn test_short_stem_rejected() {
        let (lexicon, _) = lexicon_with(&["ver"]);
        let s = stripper(&["re"]);
        // radical "ver" tem 3 caracteres < 4
        assert_eq!(s.get_unprefixed_form(&lexicon, "rever"), "rever");
    }

    #[test]
    fn test_non_alphabetic_form_untouched() {
        let (lexicon, _) = lexicon_with(&["abrir"]);
        let s = stripper(&["re"]);
        assert_eq!(s.get_unprefixed_form(&lexicon, "re2abrir"), "re2abrir");
    }

    #[test]
    fn test_prefix_ends_walk() {
        let trie = PrefixTrie::from_prefixes(["re", "redes"]);
        assert_eq!(trie.prefix_ends("redescubrir"), vec![2, 5]);
        assert!(trie.prefix_ends("xyz").is_empty());
    }
}
