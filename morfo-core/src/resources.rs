//! # Recursos Embutidos de Demonstração — Espanhol
//!
//! Um recorte pequeno, mas realista, dos recursos de um etiquetador do
//! espanhol: léxico ponderado com ambiguidades clássicas (`"casa"`
//! substantivo × verbo, `"la"` artigo × pronome, `"que"` relativo ×
//! conjunção), tabela sintática com janelas frequentes, prefixos produtivos,
//! frequências de forma e descrições de tags.
//!
//! Os pesos imitam contagens de corpus já suavizadas; num modelo real eles
//! chegariam prontos pelos arquivos JSON (ver [`crate::model`]). O esquema
//! de códigos segue o estilo EAGLES reduzido usado nos recursos do espanhol
//! (`NCFS` = substantivo comum feminino singular, `DA0FS` = artigo definido
//! feminino singular, `VMIP3S` = verbo indicativo presente 3ª singular...).

use std::collections::HashMap;

use crate::model::{
    AnalysisData, ContextData, ContextEntryData, FrequencyData, LexiconData, LexiconEntryData,
    ModelData, PrefixData, TagsetData,
};

/// Textos de demonstração usados em testes e exemplos de uso.
pub fn demo_texts() -> Vec<&'static str> {
    vec![
        "La casa es blanca.",
        "El perro come en la casa.",
        "El niño compra dos libros. La vida es grande.",
        "¿Vive el Sr. García en Madrid?",
        "No es un robo: es una compra.",
    ]
}

fn entry(form: &str, analyses: &[(&str, &str, f64)]) -> LexiconEntryData {
    LexiconEntryData {
        form: form.to_string(),
        analyses: analyses
            .iter()
            .map(|&(lemma, tag, weight)| AnalysisData {
                lemma: lemma.to_string(),
                tag: tag.to_string(),
                weight,
            })
            .collect(),
    }
}

fn window(tags: [&str; 4], weight: f64) -> ContextEntryData {
    ContextEntryData {
        tags: tags.iter().map(|t| t.to_string()).collect(),
        weight,
    }
}

/// O conjunto completo de recursos crus do modelo de demonstração.
pub fn demo_model_data() -> ModelData {
    let lexicon = LexiconData {
        entries: vec![
            // ===== Determinantes =====
            entry("el", &[("el", "DA0MS", 979.0)]),
            entry("la", &[("el", "DA0FS", 800.0), ("él", "PP3FSA", 120.0)]),
            entry("los", &[("el", "DA0MP", 400.0), ("él", "PP3MPA", 60.0)]),
            entry("las", &[("el", "DA0FP", 300.0), ("él", "PP3FPA", 45.0)]),
            entry("un", &[("uno", "DI0MS", 300.0)]),
            entry("una", &[("uno", "DI0FS", 250.0)]),
            // ===== Substantivos =====
            entry("casa", &[("casa", "NCFS", 100.0), ("casar", "VMIP3S", 5.0)]),
            entry("casas", &[("casa", "NCFP", 30.0), ("casar", "VMIP2S", 2.0)]),
            entry("perro", &[("perro", "NCMS", 60.0)]),
            entry("gato", &[("gato", "NCMS", 40.0)]),
            entry("coche", &[("coche", "NCMS", 50.0)]),
            entry("libro", &[("libro", "NCMS", 45.0), ("librar", "VMIP1S", 3.0)]),
            entry("libros", &[("libro", "NCMP", 20.0)]),
            entry("niño", &[("niño", "NCMS", 35.0)]),
            entry("vida", &[("vida", "NCFS", 70.0)]),
            entry("tiempo", &[("tiempo", "NCMS", 80.0)]),
            entry("mundo", &[("mundo", "NCMS", 65.0)]),
            entry("año", &[("año", "NCMS", 90.0)]),
            entry("día", &[("día", "NCMS", 85.0)]),
            entry("robo", &[("robo", "NCMS", 18.0), ("robar", "VMIP1S", 4.0)]),
            entry("compra", &[("comprar", "VMIP3S", 20.0), ("compra", "NCFS", 15.0)]),
            entry("sol", &[("sol", "NCMS", 50.0)]),
            entry("Sol", &[("Sol", "NPMS", 20.0)]),
            // ===== Adjetivos =====
            entry("blanca", &[("blanco", "AQ0FS", 25.0)]),
            entry("grande", &[("grande", "AQ0CS", 40.0)]),
            entry("pequeño", &[("pequeño", "AQ0MS", 20.0)]),
            entry("rojo", &[("rojo", "AQ0MS", 15.0)]),
            // ===== Verbos =====
            entry("es", &[("ser", "VSIP3S", 500.0)]),
            entry("son", &[("ser", "VSIP3P", 200.0)]),
            entry("está", &[("estar", "VMIP3S", 180.0)]),
            entry("tiene", &[("tener", "VMIP3S", 150.0)]),
            entry("come", &[("comer", "VMIP3S", 30.0)]),
            entry("vive", &[("vivir", "VMIP3S", 40.0)]),
            entry("canta", &[("cantar", "VMIP3S", 25.0)]),
            entry("abrir", &[("abrir", "VMN", 22.0)]),
            entry("montar", &[("montar", "VMN", 12.0)]),
            entry("hacer", &[("hacer", "VMN", 60.0)]),
            entry("rayar", &[("rayar", "VMN", 6.0)]),
            // ===== Palavras funcionais =====
            entry("de", &[("de", "SPS", 1000.0)]),
            entry("en", &[("en", "SPS", 700.0)]),
            entry("con", &[("con", "SPS", 400.0)]),
            entry("por", &[("por", "SPS", 380.0)]),
            entry("para", &[("para", "SPS", 360.0), ("parar", "VMIP3S", 20.0)]),
            entry("a", &[("a", "SPS", 900.0)]),
            entry("que", &[("que", "CS", 600.0), ("que", "PR", 500.0)]),
            entry("y", &[("y", "CC", 800.0)]),
            entry("o", &[("o", "CC", 200.0)]),
            entry("no", &[("no", "RN", 600.0)]),
            entry("muy", &[("muy", "RG", 250.0)]),
            entry("bien", &[("bien", "RG", 150.0), ("bien", "NCMS", 10.0)]),
            entry("se", &[("se", "P00", 550.0)]),
            entry("dos", &[("dos", "DN0P", 120.0)]),
            // ===== Pontuação =====
            entry(",", &[(",", "Fc", 6000.0)]),
            entry(".", &[(".", "Fp", 5000.0)]),
            entry(";", &[(";", "Fx", 200.0)]),
            entry(":", &[(":", "Fd", 300.0)]),
            entry("¿", &[("¿", "Fia", 150.0)]),
            entry("?", &[("?", "Fit", 150.0)]),
            entry("¡", &[("¡", "Faa", 80.0)]),
            entry("!", &[("!", "Fat", 80.0)]),
            entry("«", &[("«", "Fra", 60.0)]),
            entry("»", &[("»", "Frc", 60.0)]),
            entry("(", &[("(", "Fpa", 90.0)]),
            entry(")", &[(")", "Fpt", 90.0)]),
            entry("-", &[("-", "Fg", 100.0)]),
        ],
    };

    let context = ContextData {
        fallback: -10.0,
        entries: vec![
            // Artigo em início de sentença projetando o substantivo
            window(["DA0FS", "", "", "NCFS"], 1.2),
            window(["DA0MS", "", "", "NCMS"], 1.2),
            // Substantivo após artigo concordante, antes do verbo
            window(["NCFS", "DA0FS", "", "VSIP3S"], 2.0),
            window(["NCFS", "DA0FS", "", "VMIP3S"], 2.0),
            window(["NCMS", "DA0MS", "", "VSIP3S"], 2.0),
            window(["NCMS", "DA0MS", "", "VMIP3S"], 2.0),
            window(["NCMP", "DN0P", "VMIP3S", "Fp"], 1.6),
            // Verbo depois de sujeito nominal
            window(["VSIP3S", "NCFS", "DA0FS", "AQ0FS"], 1.5),
            window(["VSIP3S", "NCFS", "DA0FS", "AQ0CS"], 1.5),
            window(["VMIP3S", "NCMS", "DA0MS", "SPS"], 1.5),
            window(["VMIP3S", "NCMS", "DA0MS", "DN0P"], 1.4),
            // Predicativo adjetival fechando a sentença
            window(["AQ0FS", "VSIP3S", "NCFS", "Fp"], 1.8),
            window(["AQ0CS", "VSIP3S", "NCFS", "Fp"], 1.8),
            // Complemento preposicionado: "come en la casa"
            window(["SPS", "VMIP3S", "NCMS", "DA0FS"], 0.8),
            window(["DA0FS", "SPS", "VMIP3S", "NCFS"], 1.2),
            window(["NCFS", "DA0FS", "SPS", "Fp"], 2.0),
            // "la" pronominal imediatamente antes de verbo
            window(["PP3FSA", "", "", "VMIP3S"], 1.8),
            window(["PP3FSA", "NCFS", "VMIP3S", "VMIP3S"], 1.4),
            // "que" conjuntivo depois de verbo, relativo depois de nome
            window(["CS", "VMIP3S", "NCFS", ""], 1.0),
            window(["PR", "NCFS", "DA0FS", ""], 1.0),
            window(["PR", "NCMS", "DA0MS", ""], 1.0),
        ],
    };

    let prefixes = PrefixData {
        prefixes: [
            "re", "des", "in", "im", "anti", "pre", "sub", "sobre", "super",
            "contra", "semi", "ex", "vice", "inter", "auto",
        ]
        .iter()
        .map(|p| p.to_string())
        .collect(),
    };

    let frequencies = FrequencyData {
        counts: [
            ("el", 1000u64),
            ("El", 50),
            ("la", 900),
            ("La", 40),
            ("casa", 120),
            ("Casa", 8),
            ("no", 610),
            ("No", 90),
            ("perro", 60),
            ("vida", 70),
            ("sol", 50),
            ("Sol", 20),
        ]
        .iter()
        .map(|&(form, count)| (form.to_string(), count))
        .collect(),
    };

    let tagset = TagsetData {
        descriptions: describe_tags(),
    };

    ModelData {
        lexicon,
        context,
        prefixes,
        frequencies,
        tagset,
    }
}

fn describe_tags() -> HashMap<String, String> {
    [
        ("DA0MS", "artigo definido masculino singular"),
        ("DA0FS", "artigo definido feminino singular"),
        ("DA0MP", "artigo definido masculino plural"),
        ("DA0FP", "artigo definido feminino plural"),
        ("DI0MS", "artigo indefinido masculino singular"),
        ("DI0FS", "artigo indefinido feminino singular"),
        ("DN0P", "determinante numeral plural"),
        ("NCFS", "substantivo comum feminino singular"),
        ("NCMS", "substantivo comum masculino singular"),
        ("NCFP", "substantivo comum feminino plural"),
        ("NCMP", "substantivo comum masculino plural"),
        ("NC00", "substantivo comum invariável"),
        ("NPFS", "nome próprio feminino singular"),
        ("NPMS", "nome próprio masculino singular"),
        ("NPCS", "nome próprio de gênero comum singular"),
        ("NPFP", "nome próprio feminino plural"),
        ("NPMP", "nome próprio masculino plural"),
        ("NPCP", "nome próprio de gênero comum plural"),
        ("VSIP3S", "verbo ser indicativo presente 3ª singular"),
        ("VSIP3P", "verbo ser indicativo presente 3ª plural"),
        ("VMIP1S", "verbo indicativo presente 1ª singular"),
        ("VMIP2S", "verbo indicativo presente 2ª singular"),
        ("VMIP3S", "verbo indicativo presente 3ª singular"),
        ("VMN", "verbo no infinitivo"),
        ("AQ0FS", "adjetivo qualificativo feminino singular"),
        ("AQ0MS", "adjetivo qualificativo masculino singular"),
        ("AQ0CS", "adjetivo qualificativo de gênero comum singular"),
        ("PP3FSA", "pronome pessoal átono 3ª feminino singular"),
        ("PP3MPA", "pronome pessoal átono 3ª masculino plural"),
        ("PP3FPA", "pronome pessoal átono 3ª feminino plural"),
        ("P00", "pronome clítico"),
        ("PR", "pronome relativo"),
        ("CS", "conjunção subordinativa"),
        ("CC", "conjunção coordenativa"),
        ("SPS", "preposição simples"),
        ("RN", "advérbio de negação"),
        ("RG", "advérbio geral"),
        ("Z", "numeral"),
        ("X", "desconhecido"),
        ("Fc", "vírgula"),
        ("Fp", "ponto final"),
        ("Fx", "ponto e vírgula"),
        ("Fd", "dois pontos"),
        ("Fia", "interrogação de abertura"),
        ("Fit", "interrogação de fechamento"),
        ("Faa", "exclamação de abertura"),
        ("Fat", "exclamação de fechamento"),
        ("Fra", "aspas angulares de abertura"),
        ("Frc", "aspas angulares de fechamento"),
        ("Fpa", "parêntese de abertura"),
        ("Fpt", "parêntese de fechamento"),
        ("Fg", "hífen"),
    ]
    .iter()
    .map(|&(code, desc)| (code.to_string(), desc.to_string()))
    .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::context::WINDOW_SIZE;

    #[test]
    fn test_demo_data_is_structurally_valid() {
        let data = demo_model_data();
        assert!(!data.lexicon.entries.is_empty());
        for entry in &data.lexicon.entries {
            for analysis in &entry.analyses {
                assert!(analysis.weight > 0.0, "peso inválido em '{}'", entry.form);
                assert!(!analysis.tag.is_empty());
            }
        }
        for entry in &data.context.entries {
            assert_eq!(entry.tags.len(), WINDOW_SIZE);
            assert!(!entry.tags[0].is_empty());
        }
    }

    #[test]
    fn test_demo_texts_not_empty() {
        assert!(!demo_texts().is_empty());
    }
}
