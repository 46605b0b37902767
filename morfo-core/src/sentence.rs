//! # Motor de Busca por Fragmentos — Melhor Sequência de Tags
//!
//! Encontra a sequência de tags de peso máximo para uma sentença inteira.
//! O espaço de busca é o produto cartesiano dos candidatos de cada token
//! (exponencial), mas o peso total tem a propriedade de Markov: a
//! contribuição de um token depende só do peso do próprio candidato e das
//! tags dentro da sua janela (2 à esquerda, 1 à direita). Isso permite uma
//! decomposição em **fragmentos** que reproduz exatamente a resposta da
//! busca exaustiva.
//!
//! ## Algoritmo
//!
//! ```text
//! 1. Particiona a sentença em fragmentos contíguos de comprimento 2
//!    (o último pode ter 1).
//! 2. Processa da direita para a esquerda. Para cada fragmento enumera:
//!    - combinações do fragmento (produto dos candidatos dos seus tokens);
//!    - combinações de contexto (tokens vizinhos que caem em alguma janela:
//!      os 2 à esquerda do fragmento e o 1 à direita).
//! 3. Peso próprio = Σ por posição [ln(peso do candidato) + tabela(janela)].
//! 4. Fusão com a tabela do fragmento à direita casando as tags de
//!    fronteira, retendo só a melhor concatenação por chave (máximo, nunca
//!    soma).
//! 5. No fragmento mais à esquerda, o melhor lançamento restante é a
//!    resposta global.
//! ```
//!
//! ## Desempate determinístico
//!
//! Pesos empatados retêm a sequência de tags lexicograficamente menor
//! (ordem dos códigos; ver [`crate::tag`]). Sem essa regra o resultado
//! dependeria da ordem de iteração dos mapas.

use std::collections::HashMap;

use crate::context::{ContextWindow, SyntacticTable, LEFT_CONTEXT, RIGHT_CONTEXT};
use crate::lexicon::TokenCandidates;
use crate::tag::Tag;

/// Comprimento do fragmento: `max(esquerda, direita)` da janela.
pub const FRAGMENT_LEN: usize = if LEFT_CONTEXT > RIGHT_CONTEXT {
    LEFT_CONTEXT
} else {
    RIGHT_CONTEXT
};

/// Uma célula retida na programação dinâmica: o peso acumulado do sufixo e
/// a sequência de tags que o produziu (o fragmento corrente em diante).
#[derive(Debug, Clone)]
struct Cell {
    weight: f64,
    seq: Vec<Tag>,
}

impl Cell {
    /// `self` vence `other`? Peso maior; empate → sequência menor.
    fn beats(&self, other: &Cell) -> bool {
        self.weight > other.weight || (self.weight == other.weight && self.seq < other.seq)
    }
}

/// Chave do índice de fusão entre fragmentos vizinhos: as tags do fragmento
/// à esquerda (o contexto esquerdo do fragmento indexado) e a primeira tag
/// do fragmento indexado (o contexto direito do fragmento à esquerda).
type MergeKey = ([Tag; LEFT_CONTEXT], Tag);

/// O motor de desambiguação de uma sentença.
///
/// Não guarda estado entre chamadas: recebe a tabela sintática compartilhada
/// e os candidatos imutáveis de cada token.
pub struct SentenceTagger<'a> {
    table: &'a SyntacticTable,
}

impl<'a> SentenceTagger<'a> {
    pub fn new(table: &'a SyntacticTable) -> Self {
        Self { table }
    }

    /// Devolve a sequência de tags de peso máximo e o peso total.
    ///
    /// Nunca falha: todo token tem ao menos um candidato (garantia do
    /// gerador de candidatos), então o espaço de busca é finito e não-vazio.
    pub fn best_sequence(&self, candidates: &[TokenCandidates]) -> (Vec<Tag>, f64) {
        let n = candidates.len();
        if n == 0 {
            return (Vec::new(), 0.0);
        }

        let starts: Vec<usize> = (0..n).step_by(FRAGMENT_LEN).collect();
        // Índice de fusão produzido pelo fragmento à direita do corrente.
        let mut right_index: Option<HashMap<MergeKey, Cell>> = None;
        let mut global_best: Option<Cell> = None;

        for &s in starts.iter().rev() {
            let e = (s + FRAGMENT_LEN).min(n);
            let frag_combos = cartesian(&candidates[s..e]);
            let left2_opts = context_tags(candidates, s as isize - 2);
            let left1_opts = context_tags(candidates, s as isize - 1);
            let right_opts = context_tags(candidates, e as isize);
            let leftmost = s == 0;

            let mut next_index: HashMap<MergeKey, Cell> = HashMap::new();

            for &left2 in &left2_opts {
                for &left1 in &left1_opts {
                    for &right in &right_opts {
                        for frag in &frag_combos {
                            let own = self.fragment_weight(
                                candidates, s, e, frag, left2, left1, right,
                            );
                            let cell = match &right_index {
                                // Fragmento mais à direita: o sufixo é ele mesmo.
                                None => Cell {
                                    weight: own,
                                    seq: frag.clone(),
                                },
                                Some(index) => {
                                    let key = ([frag[0], frag[1]], right);
                                    let suffix = &index[&key];
                                    let mut seq =
                                        Vec::with_capacity(frag.len() + suffix.seq.len());
                                    seq.extend_from_slice(frag);
                                    seq.extend_from_slice(&suffix.seq);
                                    Cell {
                                        weight: own + suffix.weight,
                                        seq,
                                    }
                                }
                            };

                            if leftmost {
                                retain_best(&mut global_best, cell);
                            } else {
                                let key = ([left2, left1], frag[0]);
                                match next_index.get_mut(&key) {
                                    Some(kept) => {
                                        if cell.beats(kept) {
                                            *kept = cell;
                                        }
                                    }
                                    None => {
                                        next_index.insert(key, cell);
                                    }
                                }
                            }
                        }
                    }
                }
            }

            if !leftmost {
                right_index = Some(next_index);
            }
        }

        let best = global_best.expect("sentença não-vazia sempre produz uma célula");
        (best.seq, best.weight)
    }

    /// Peso próprio de uma combinação do fragmento `[s, e)` sob um contexto:
    /// Σ por posição de `ln(peso do candidato) + tabela(janela da posição)`.
    fn fragment_weight(
        &self,
        candidates: &[TokenCandidates],
        s: usize,
        e: usize,
        frag: &[Tag],
        left2: Tag,
        left1: Tag,
        right: Tag,
    ) -> f64 {
        let n = candidates.len() as isize;
        let tag_at = |q: isize| -> Tag {
            if q < 0 || q >= n {
                return Tag::NONE;
            }
            let q = q as usize;
            if (s..e).contains(&q) {
                frag[q - s]
            } else if q + 1 == s {
                left1
            } else if q + 2 == s {
                left2
            } else if q == e {
                right
            } else {
                unreachable!("posição fora de qualquer janela do fragmento")
            }
        };

        let mut weight = 0.0;
        for (k, &target) in frag.iter().enumerate() {
            let p = (s + k) as isize;
            let window: ContextWindow = [target, tag_at(p - 1), tag_at(p - 2), tag_at(p + 1)];
            weight += candidates[s + k][&target].weight.ln() + self.table.score(&window);
        }
        weight
    }
}

/// Tags possíveis de uma posição de contexto: os candidatos do token, ou só
/// a sentinela quando a posição cai fora da sentença.
fn context_tags(candidates: &[TokenCandidates], pos: isize) -> Vec<Tag> {
    if pos < 0 || pos as usize >= candidates.len() {
        vec![Tag::NONE]
    } else {
        candidates[pos as usize].keys().copied().collect()
    }
}

/// Produto cartesiano dos conjuntos de tags dos tokens de um fragmento, em
/// ordem lexicográfica (os candidatos iteram em ordem de código).
fn cartesian(candidates: &[TokenCandidates]) -> Vec<Vec<Tag>> {
    let mut combos: Vec<Vec<Tag>> = vec![Vec::new()];
    for token in candidates {
        let mut next = Vec::with_capacity(combos.len() * token.len());
        for prefix in &combos {
            for &tag in token.keys() {
                let mut combo = Vec::with_capacity(prefix.len() + 1);
                combo.extend_from_slice(prefix);
                combo.push(tag);
                next.push(combo);
            }
        }
        combos = next;
    }
    combos
}

fn retain_best(best: &mut Option<Cell>, cell: Cell) {
    match best {
        Some(kept) => {
            if cell.beats(kept) {
                *kept = cell;
            }
        }
        None => *best = Some(cell),
    }
}
