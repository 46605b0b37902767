//! # morfo-core — Desambiguação Morfossintática do Espanhol
//!
//! Este crate implementa um etiquetador morfossintático (POS tagger) para o
//! espanhol: dado um texto, escolhe para cada sentença a sequência de tags
//! que maximiza um escore ponderado por contexto, e reporta os lemas
//! associados. Foi projetado para ser didático, modular e determinístico.
//!
//! ## Arquitetura do Sistema
//!
//! O sistema segue uma arquitetura de pipeline, onde o dado flui e é
//! transformado passo a passo:
//!
//! 1.  **Entrada**: Texto bruto (String).
//! 2.  **Segmentação** ([`tokenizer`]): O texto é dividido em sentenças e
//!     tokens, preservando offsets originais.
//! 3.  **Geração de candidatos** (por token, independente):
//!     *   **Léxico** ([`lexicon`]): forma → conjunto de (tag, peso, lema).
//!     *   **Prefixos** ([`prefix`]): formas desconhecidas desmembradas em
//!         prefixo + radical conhecido.
//!     *   **Desconhecidos** ([`unknown`]): heurísticas de fallback — todo
//!         token sempre recebe ao menos um candidato.
//! 4.  **Desambiguação** ([`sentence`]): busca por fragmentos que encontra a
//!     sequência de tags de peso máximo da sentença inteira, usando a tabela
//!     sintática ([`context`]).
//! 5.  **Saída**: lista de sentenças, cada uma com (forma, tag, lema) por
//!     token ([`tagger::TaggedWord`]).
//!
//! ## Exemplo de Uso
//!
//! ```rust
//! use morfo_core::Tagger;
//!
//! // 1. Instancia o etiquetador (modelo de demonstração embutido)
//! let tagger = Tagger::demo();
//!
//! // 2. Etiqueta o texto
//! let sentences = tagger.tag_text("La casa es blanca.");
//! assert_eq!(sentences.len(), 1);
//!
//! // 3. Exibe as palavras etiquetadas
//! for word in &sentences[0] {
//!     println!("{} → {} [{}]", word.form, word.code, word.lemma);
//! }
//! ```
//!
//! Modelos reais são carregados de um diretório de recursos JSON com
//! [`model::TaggerModel::from_dir`]; o modelo é um valor imutável e
//! independente — vários modelos (inclusive sintéticos, para teste) podem
//! coexistir no mesmo processo.
//!
//! ## Módulos Principais
//!
//! - [`tagger`]: fachada que conecta todos os estágios.
//! - [`sentence`]: o motor de busca por fragmentos (o coração do crate).
//! - [`model`]: carga, validação e compilação dos recursos.
//! - [`resources`]: recursos embutidos de demonstração.

pub mod context;
pub mod lexicon;
pub mod model;
pub mod prefix;
pub mod resources;
pub mod sentence;
pub mod tag;
pub mod tagger;
pub mod tokenizer;
pub mod unknown;

pub use model::{ModelData, ModelError, TaggerModel};
pub use tag::{Tag, TagAlphabet};
pub use tagger::{SentenceResult, TaggedWord, Tagger};
pub use tokenizer::Token;
