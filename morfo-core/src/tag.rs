//! # Tags Morfossintáticas — Interning e Descrição
//!
//! Uma tag é um código categórico compacto que reúne classe gramatical e
//! traços morfológicos (ex: `NCFS` = substantivo comum feminino singular,
//! `VMIP3S` = verbo principal indicativo presente 3ª singular).
//!
//! O motor nunca manipula as tags como strings: todos os códigos conhecidos
//! pelo modelo são **internados** em um [`TagAlphabet`] na construção, e o
//! resto do sistema trabalha apenas com o id compacto [`Tag`].
//!
//! ## Determinismo
//!
//! O alfabeto é congelado com os códigos em **ordem lexicográfica**, então a
//! ordem derivada de `Tag` (comparação do id `u16`) coincide com a ordem
//! lexicográfica dos códigos. É essa propriedade que torna determinístico o
//! desempate do motor de busca ([`crate::sentence`]): comparar sequências de
//! `Tag` equivale a comparar as sequências de códigos.

use std::collections::{BTreeSet, HashMap};

use serde::{Deserialize, Serialize};

/// Id compacto de uma tag morfossintática, válido apenas junto ao
/// [`TagAlphabet`] que o produziu.
///
/// O id 0 é reservado para [`Tag::NONE`], a sentinela "sem tag" usada para
/// preencher janelas de contexto nas bordas da sentença.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct Tag(u16);

impl Tag {
    /// Sentinela "sem tag": código vazio, sempre o id 0.
    pub const NONE: Tag = Tag(0);

    /// Indica se esta é a sentinela de borda.
    pub fn is_none(&self) -> bool {
        *self == Tag::NONE
    }

    /// O id numérico bruto (útil para depuração e serialização).
    pub fn index(&self) -> usize {
        self.0 as usize
    }
}

/// Alfabeto de tags do modelo: mapeamento bidirecional código ↔ [`Tag`].
///
/// Construído uma única vez com **todos** os códigos que o modelo pode
/// produzir (léxico, tabela sintática, classificador de desconhecidos e a
/// sentinela). Depois de construído é somente-leitura: nenhuma tag nova pode
/// surgir durante a etiquetagem.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TagAlphabet {
    /// Códigos em ordem lexicográfica; a posição é o id da tag.
    /// A posição 0 é sempre o código vazio (sentinela).
    codes: Vec<String>,
    /// Índice reverso código → id.
    index: HashMap<String, Tag>,
}

impl TagAlphabet {
    /// Congela um alfabeto a partir do conjunto de códigos conhecidos.
    ///
    /// Os códigos são ordenados lexicograficamente e deduplicados; a
    /// sentinela (código vazio) é inserida sempre, ocupando o id 0 por
    /// ordenar antes de qualquer código não-vazio.
    pub fn from_codes<I, S>(codes: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let mut sorted: BTreeSet<String> = codes.into_iter().map(Into::into).collect();
        sorted.insert(String::new());

        let codes: Vec<String> = sorted.into_iter().collect();
        let index = codes
            .iter()
            .enumerate()
            .map(|(i, c)| (c.clone(), Tag(i as u16)))
            .collect();

        Self { codes, index }
    }

    /// Resolve um código textual para seu id, se conhecido.
    pub fn tag(&self, code: &str) -> Option<Tag> {
        self.index.get(code).copied()
    }

    /// O código textual de uma tag. A sentinela devolve a string vazia.
    pub fn code(&self, tag: Tag) -> &str {
        &self.codes[tag.index()]
    }

    /// Quantidade de tags internadas (inclui a sentinela).
    pub fn len(&self) -> usize {
        self.codes.len()
    }

    /// Verdadeiro se só existe a sentinela.
    pub fn is_empty(&self) -> bool {
        self.codes.len() <= 1
    }

    /// Itera todas as tags reais (exclui a sentinela), em ordem de código.
    pub fn iter(&self) -> impl Iterator<Item = Tag> + '_ {
        (1..self.codes.len()).map(|i| Tag(i as u16))
    }
}

/// Conversor de códigos de tag para descrições legíveis.
///
/// Corresponde à tabela de descrição carregada junto ao modelo. Para códigos
/// sem entrada exata, sintetiza uma descrição genérica a partir da letra
/// inicial (a classe gramatical no esquema de códigos).
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct TagDescriber {
    descriptions: HashMap<String, String>,
}

impl TagDescriber {
    pub fn new(descriptions: HashMap<String, String>) -> Self {
        Self { descriptions }
    }

    /// Descreve um código de tag.
    ///
    /// Ordem de resolução: entrada exata na tabela; senão, a classe
    /// gramatical deduzida da letra inicial do código.
    pub fn describe(&self, code: &str) -> String {
        if let Some(desc) = self.descriptions.get(code) {
            return desc.clone();
        }
        let class = match code.chars().next() {
            Some('N') => "substantivo",
            Some('V') => "verbo",
            Some('A') => "adjetivo",
            Some('D') => "determinante",
            Some('P') => "pronome",
            Some('R') => "advérbio",
            Some('S') => "preposição",
            Some('C') => "conjunção",
            Some('F') => "pontuação",
            Some('Z') => "numeral",
            Some('I') => "interjeição",
            _ => "categoria desconhecida",
        };
        format!("{} ({})", class, code)
    }
}
