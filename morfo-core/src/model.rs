//! # Modelo do Etiquetador — Carga e Compilação dos Recursos
//!
//! O modelo reúne, em um único valor imutável, todos os recursos que o motor
//! consulta durante a etiquetagem:
//!
//! - **Léxico** ponderado (forma → análises);
//! - **Tabela sintática** (janela de tags → log-peso);
//! - **Trie de prefixos** para formas desconhecidas;
//! - **Tabela de frequências** de formas (heurística de início de sentença);
//! - **Conversor de códigos de tag** (descrições legíveis).
//!
//! Os recursos persistidos são documentos JSON (`serde_json`) com tags como
//! strings; a compilação interna os códigos em um [`TagAlphabet`] congelado
//! e converte tudo para as estruturas tipadas dos demais módulos. Qualquer
//! recurso ausente, corrompido ou inválido aborta a construção com
//! [`ModelError`] — nunca existe modelo parcial.
//!
//! Construído uma vez, o modelo é somente-leitura: várias sentenças (ou
//! threads) podem consultá-lo simultaneamente por referência compartilhada.

use std::collections::HashMap;
use std::fs::File;
use std::io::BufReader;
use std::path::Path;

use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};
use thiserror::Error;
use tracing::{debug, info};

use crate::context::{ContextWindow, SyntacticTable, WINDOW_SIZE};
use crate::lexicon::Lexicon;
use crate::prefix::{PrefixStripper, PrefixTrie};
use crate::resources;
use crate::tag::{Tag, TagAlphabet, TagDescriber};
use crate::unknown::{fallback_tag_codes, UnknownWordClassifier};

/// Log-peso devolvido pela tabela sintática em consultas ausentes, quando o
/// recurso não fixa outro valor.
pub const DEFAULT_FALLBACK_WEIGHT: f64 = -10.0;

/// Erros possíveis na construção do modelo. Todos são fatais: ou o modelo
/// inteiro é construído, ou nada é.
#[derive(Debug, Error)]
pub enum ModelError {
    #[error("falha de E/S ao carregar o recurso '{resource}'")]
    Io {
        resource: String,
        #[source]
        source: std::io::Error,
    },
    #[error("falha ao desserializar o recurso '{resource}'")]
    Parse {
        resource: String,
        #[source]
        source: serde_json::Error,
    },
    #[error("recurso inválido: {0}")]
    Invalid(String),
}

// =====================================================================
// Documentos crus (formato persistido)
// =====================================================================

/// Uma análise do léxico: lema, código de tag e peso (> 0).
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AnalysisData {
    pub lemma: String,
    pub tag: String,
    pub weight: f64,
}

/// Entrada do léxico: forma superficial e suas análises.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LexiconEntryData {
    pub form: String,
    pub analyses: Vec<AnalysisData>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct LexiconData {
    pub entries: Vec<LexiconEntryData>,
}

/// Janela da tabela sintática: códigos na ordem `[alvo, esq1, esq2, dir1]`;
/// a string vazia representa a sentinela de borda.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ContextEntryData {
    pub tags: Vec<String>,
    pub weight: f64,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ContextData {
    /// Log-peso para janelas sem entrada explícita.
    pub fallback: f64,
    pub entries: Vec<ContextEntryData>,
}

impl Default for ContextData {
    fn default() -> Self {
        Self {
            fallback: DEFAULT_FALLBACK_WEIGHT,
            entries: Vec::new(),
        }
    }
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct PrefixData {
    pub prefixes: Vec<String>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct FrequencyData {
    pub counts: HashMap<String, u64>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct TagsetData {
    pub descriptions: HashMap<String, String>,
}

/// O conjunto completo de recursos crus de um modelo.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ModelData {
    pub lexicon: LexiconData,
    pub context: ContextData,
    pub prefixes: PrefixData,
    pub frequencies: FrequencyData,
    pub tagset: TagsetData,
}

// =====================================================================
// Modelo compilado
// =====================================================================

/// O modelo compilado e congelado do etiquetador.
pub struct TaggerModel {
    alphabet: TagAlphabet,
    lexicon: Lexicon,
    table: SyntacticTable,
    stripper: PrefixStripper,
    classifier: UnknownWordClassifier,
    frequencies: HashMap<String, u64>,
    describer: TagDescriber,
}

impl TaggerModel {
    /// Compila um modelo a partir dos recursos crus (em memória).
    ///
    /// É o construtor usado pelos testes com tabelas sintéticas: modelos são
    /// valores independentes, nunca estado global de processo.
    pub fn from_data(data: ModelData) -> Result<Self, ModelError> {
        validate(&data)?;

        // === 1. Alfabeto: todos os códigos que o modelo pode produzir ===
        let mut codes: Vec<String> = Vec::new();
        for entry in &data.lexicon.entries {
            for analysis in &entry.analyses {
                codes.push(analysis.tag.clone());
            }
        }
        for entry in &data.context.entries {
            for code in &entry.tags {
                if !code.is_empty() {
                    codes.push(code.clone());
                }
            }
        }
        codes.extend(fallback_tag_codes().into_iter().map(String::from));
        let alphabet = TagAlphabet::from_codes(codes);

        // === 2. Léxico compilado ===
        let analyses = data.lexicon.entries.iter().flat_map(|entry| {
            entry.analyses.iter().map(|a| {
                let tag = alphabet
                    .tag(&a.tag)
                    .expect("código do léxico internado no passo 1");
                (entry.form.clone(), a.lemma.clone(), tag, a.weight)
            })
        });
        let lexicon = Lexicon::from_analyses(analyses);

        // === 3. Tabela sintática com chave de aridade fixa ===
        let mut weights: HashMap<ContextWindow, f64> =
            HashMap::with_capacity(data.context.entries.len());
        for entry in &data.context.entries {
            let mut window: ContextWindow = [Tag::NONE; WINDOW_SIZE];
            for (slot, code) in window.iter_mut().zip(&entry.tags) {
                *slot = if code.is_empty() {
                    Tag::NONE
                } else {
                    alphabet
                        .tag(code)
                        .expect("código da tabela internado no passo 1")
                };
            }
            weights.insert(window, entry.weight);
        }
        let table = SyntacticTable::new(weights, data.context.fallback);

        // === 4. Demais recursos ===
        let stripper = PrefixStripper::new(PrefixTrie::from_prefixes(&data.prefixes.prefixes));
        let classifier = UnknownWordClassifier::new(&alphabet);
        let describer = TagDescriber::new(data.tagset.descriptions);

        debug!(
            forms = lexicon.len(),
            tags = alphabet.len(),
            windows = table.len(),
            prefixes = data.prefixes.prefixes.len(),
            "modelo compilado"
        );

        Ok(Self {
            alphabet,
            lexicon,
            table,
            stripper,
            classifier,
            frequencies: data.frequencies.counts,
            describer,
        })
    }

    /// Carrega os cinco recursos JSON de um diretório e compila o modelo.
    ///
    /// Arquivos esperados: `lexicon.json`, `context.json`, `prefixes.json`,
    /// `frequencies.json`, `tagset.json`. Qualquer ausência é fatal.
    pub fn from_dir(dir: impl AsRef<Path>) -> Result<Self, ModelError> {
        let dir = dir.as_ref();
        info!(dir = %dir.display(), "carregando recursos do modelo");
        let data = ModelData {
            lexicon: load_resource(dir, "lexicon.json")?,
            context: load_resource(dir, "context.json")?,
            prefixes: load_resource(dir, "prefixes.json")?,
            frequencies: load_resource(dir, "frequencies.json")?,
            tagset: load_resource(dir, "tagset.json")?,
        };
        Self::from_data(data)
    }

    /// Constrói o modelo de demonstração com os recursos embutidos
    /// ([`crate::resources`]), sem tocar o sistema de arquivos.
    pub fn demo() -> Self {
        Self::from_data(resources::demo_model_data())
            .expect("recursos embutidos de demonstração são válidos")
    }

    pub fn alphabet(&self) -> &TagAlphabet {
        &self.alphabet
    }

    pub fn lexicon(&self) -> &Lexicon {
        &self.lexicon
    }

    pub fn table(&self) -> &SyntacticTable {
        &self.table
    }

    pub fn stripper(&self) -> &PrefixStripper {
        &self.stripper
    }

    pub fn classifier(&self) -> &UnknownWordClassifier {
        &self.classifier
    }

    pub fn describer(&self) -> &TagDescriber {
        &self.describer
    }

    /// Frequência de corpus de uma forma (0 para formas nunca vistas).
    pub fn frequency(&self, form: &str) -> u64 {
        self.frequencies.get(form).copied().unwrap_or(0)
    }
}

/// Validação estrutural dos recursos crus, antes de qualquer compilação.
fn validate(data: &ModelData) -> Result<(), ModelError> {
    for entry in &data.lexicon.entries {
        if entry.form.is_empty() {
            return Err(ModelError::Invalid("léxico com forma vazia".to_string()));
        }
        for analysis in &entry.analyses {
            if analysis.tag.is_empty() {
                return Err(ModelError::Invalid(format!(
                    "análise da forma '{}' com código de tag vazio",
                    entry.form
                )));
            }
            if !(analysis.weight > 0.0) || !analysis.weight.is_finite() {
                return Err(ModelError::Invalid(format!(
                    "análise da forma '{}' com peso não-positivo ({})",
                    entry.form, analysis.weight
                )));
            }
        }
    }
    for entry in &data.context.entries {
        if entry.tags.len() != WINDOW_SIZE {
            return Err(ModelError::Invalid(format!(
                "janela sintática com aridade {} (esperada {})",
                entry.tags.len(),
                WINDOW_SIZE
            )));
        }
        if entry.tags[0].is_empty() {
            return Err(ModelError::Invalid(
                "janela sintática com tag alvo vazia".to_string(),
            ));
        }
    }
    Ok(())
}

fn load_resource<T: DeserializeOwned>(dir: &Path, name: &str) -> Result<T, ModelError> {
    let path = dir.join(name);
    let file = File::open(&path).map_err(|source| ModelError::Io {
        resource: name.to_string(),
        source,
    })?;
    serde_json::from_reader(BufReader::new(file)).map_err(|source| ModelError::Parse {
        resource: name.to_string(),
        source,
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    fn tiny_data() -> ModelData {
        ModelData {
            lexicon: LexiconData {
                entries: vec![LexiconEntryData {
                    form: "casa".to_string(),
                    analyses: vec![AnalysisData {
                        lemma: "casa".to_string(),
                        tag: "NCFS".to_string(),
                        weight: 10.0,
                    }],
                }],
            },
            context: ContextData {
                fallback: -5.0,
                entries: vec![ContextEntryData {
                    tags: vec![
                        "NCFS".to_string(),
                        "DA0FS".to_string(),
                        String::new(),
                        String::new(),
                    ],
                    weight: 2.0,
                }],
            },
            prefixes: PrefixData {
                prefixes: vec!["re".to_string()],
            },
            frequencies: FrequencyData::default(),
            tagset: TagsetData::default(),
        }
    }

    #[test]
    fn test_from_data_compiles() {
        let model = TaggerModel::from_data(tiny_data()).unwrap();
        assert!(model.lexicon().contains("casa"));
        let ncfs = model.alphabet().tag("NCFS").unwrap();
        let da = model.alphabet().tag("DA0FS").unwrap();
        assert_eq!(model.table().score(&[ncfs, da, Tag::NONE, Tag::NONE]), 2.0);
        assert_eq!(model.table().fallback(), -5.0);
        // Códigos de fallback do classificador sempre presentes
        assert!(model.alphabet().tag("Z").is_some());
    }

    #[test]
    fn test_non_positive_weight_rejected() {
        let mut data = tiny_data();
        data.lexicon.entries[0].analyses[0].weight = 0.0;
        assert!(matches!(
            TaggerModel::from_data(data),
            Err(ModelError::Invalid(_))
        ));
    }

    #[test]
    fn test_bad_window_arity_rejected() {
        let mut data = tiny_data();
        data.context.entries[0].tags.pop();
        assert!(matches!(
            TaggerModel::from_data(data),
            Err(ModelError::Invalid(_))
        ));
    }

    #[test]
    fn test_from_dir_roundtrip() {
        let dir = std::env::temp_dir().join(format!("morfo-model-{}", std::process::id()));
        std::fs::create_dir_all(&dir).unwrap();
        let data = tiny_data();
        let files = [
            ("lexicon.json", serde_json::to_string(&data.lexicon).unwrap()),
            ("context.json", serde_json::to_string(&data.context).unwrap()),
            ("prefixes.json", serde_json::to_string(&data.prefixes).unwrap()),
            ("frequencies.json", serde_json::to_string(&data.frequencies).unwrap()),
            ("tagset.json", serde_json::to_string(&data.tagset).unwrap()),
        ];
        for (name, contents) in &files {
            std::fs::write(dir.join(name), contents).unwrap();
        }

        let model = TaggerModel::from_dir(&dir).unwrap();
        assert!(model.lexicon().contains("casa"));

        std::fs::remove_dir_all(&dir).ok();
    }

    #[test]
    fn test_from_dir_missing_resource_is_fatal() {
        let dir = std::env::temp_dir().join(format!("morfo-missing-{}", std::process::id()));
        std::fs::create_dir_all(&dir).unwrap();
        // Nenhum arquivo presente → primeiro recurso já falha
        assert!(matches!(
            TaggerModel::from_dir(&dir),
            Err(ModelError::Io { .. })
        ));
        std::fs::remove_dir_all(&dir).ok();
    }

    #[test]
    fn test_demo_model_builds() {
        let model = TaggerModel::demo();
        assert!(!model.lexicon().is_empty());
        assert!(model.frequency("casa") > 0);
    }
}
