//! # Tabela Sintática — Janela de Contexto → Log-Peso
//!
//! A tabela sintática guarda os pesos pré-computados de coocorrência de tags
//! dentro de uma janela fixa ao redor de cada token. É ela que transforma o
//! problema de etiquetagem token a token em desambiguação **contextual**.
//!
//! A janela tem aridade fixa: tag alvo primeiro, depois o contexto esquerdo
//! do mais próximo ao mais distante, depois o direito. Posições fora da
//! sentença usam a sentinela [`Tag::NONE`]. Consulta ausente devolve o
//! log-peso de fallback carregado junto com o modelo (valor de configuração,
//! nunca recalculado).

use std::collections::HashMap;

use crate::tag::Tag;

/// Tokens de contexto à esquerda do alvo.
pub const LEFT_CONTEXT: usize = 2;
/// Tokens de contexto à direita do alvo.
pub const RIGHT_CONTEXT: usize = 1;
/// Aridade da janela: alvo + esquerda + direita.
pub const WINDOW_SIZE: usize = 1 + LEFT_CONTEXT + RIGHT_CONTEXT;

/// Janela de contexto: `[alvo, esq1, esq2, dir1]`.
pub type ContextWindow = [Tag; WINDOW_SIZE];

/// A tabela de log-pesos sintáticos, somente-leitura após a construção.
#[derive(Debug, Clone)]
pub struct SyntacticTable {
    weights: HashMap<ContextWindow, f64>,
    fallback: f64,
}

impl SyntacticTable {
    pub fn new(weights: HashMap<ContextWindow, f64>, fallback: f64) -> Self {
        Self { weights, fallback }
    }

    /// Log-peso da combinação; ausência devolve o fallback fixo.
    pub fn score(&self, window: &ContextWindow) -> f64 {
        self.weights.get(window).copied().unwrap_or(self.fallback)
    }

    /// O log-peso devolvido em consultas ausentes.
    pub fn fallback(&self) -> f64 {
        self.fallback
    }

    /// Quantidade de janelas com peso explícito.
    pub fn len(&self) -> usize {
        self.weights.len()
    }

    pub fn is_empty(&self) -> bool {
        self.weights.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::tag::TagAlphabet;

    #[test]
    fn test_score_hit_and_miss() {
        let alpha = TagAlphabet::from_codes(["DA0FS", "NCFS"]);
        let da = alpha.tag("DA0FS").unwrap();
        let nc = alpha.tag("NCFS").unwrap();

        let mut weights = HashMap::new();
        // substantivo precedido de artigo, sem mais contexto
        weights.insert([nc, da, Tag::NONE, Tag::NONE], 2.5);
        let table = SyntacticTable::new(weights, -10.0);

        assert_eq!(table.score(&[nc, da, Tag::NONE, Tag::NONE]), 2.5);
        assert_eq!(table.score(&[da, nc, Tag::NONE, Tag::NONE]), -10.0);
        assert_eq!(table.fallback(), -10.0);
    }
}
