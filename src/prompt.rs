//! Analysis prompt templates, one per document type.
//!
//! Centralising every prompt here serves two purposes:
//!
//! 1. **Single source of truth**: each document type maps to exactly one
//!    template; adjusting an analysis rubric means editing one constant.
//!
//! 2. **Testability**: unit tests can inspect and fill templates without
//!    calling a real model.
//!
//! Templates are static content with a single `{texto}` substitution slot.
//! They are not user-editable at runtime.

use crate::models::{DocumentType, ImageAttachment};

/// Substitution slot shared by every template.
const SLOT: &str = "{texto}";

/// Substituted for real text when a design analysis arrives as an image and
/// the upstream endpoint cannot accept image input.
pub const IMAGE_PLACEHOLDER: &str = "[imagem de design enviada para análise visual]";

const TEMPLATE_TCC: &str = r#"
Você é um professor orientador experiente avaliando um trabalho de conclusão de curso (TCC). Forneça um parecer detalhado com os seguintes pontos:

# PARECER ACADÊMICO

## 1. RESUMO E OBJETIVOS
- Clareza do problema de pesquisa
- Adequação dos objetivos gerais e específicos

## 2. REFERENCIAL TEÓRICO (x/5)
✅ Pontos fortes
✖️ Problemas
💡 Sugestões

## 3. METODOLOGIA (x/5)
✅ Pontos fortes
✖️ Problemas
💡 Sugestões

## 4. RESULTADOS E CONCLUSÃO (x/5)
✅ Pontos fortes
✖️ Problemas
💡 Sugestões

## 5. RECOMENDAÇÕES FINAIS
1. Correção Prioritária
2. Segunda Prioridade
3. Terceira Recomendação

Texto: {texto}
"#;

const TEMPLATE_RESUME: &str = r#"
Você é um recrutador experiente analisando um currículo profissional. Forneça um relatório detalhado com os seguintes pontos:

# ANÁLISE DE CURRÍCULO

## 1. PERFIL PROFISSIONAL
- Resumo do candidato
- Objetivo declarado

## 2. AVALIAÇÃO POR CRITÉRIOS

### Experiência Profissional (x/5)
✅ Pontos fortes
✖️ Problemas
💡 Sugestões

### Formação Acadêmica (x/5)
✅ Pontos fortes
✖️ Problemas
💡 Sugestões

### Clareza e Organização (x/5)
✅ Pontos fortes
✖️ Problemas
💡 Sugestões

## 3. RECOMENDAÇÕES
1. Ajuste Prioritário
2. Segunda Prioridade
3. Terceira Recomendação

Texto: {texto}
"#;

const TEMPLATE_FINANCIAL: &str = r#"
Você é um analista financeiro experiente avaliando um demonstrativo ou relatório financeiro. Forneça um relatório detalhado com os seguintes pontos:

# ANÁLISE FINANCEIRA

## 1. VISÃO GERAL
- Natureza do documento (balanço patrimonial, fluxo de caixa, demonstrativo de resultados)
- Período coberto

## 2. AVALIAÇÃO POR CRITÉRIOS

### Liquidez e Solvência (x/5)
✅ Pontos fortes
✖️ Problemas
💡 Sugestões

### Estrutura de Ativos e Passivos (x/5)
✅ Pontos fortes
✖️ Problemas
💡 Sugestões

### Consistência e Transparência (x/5)
✅ Pontos fortes
✖️ Problemas
💡 Sugestões

## 3. RISCOS IDENTIFICADOS

## 4. RECOMENDAÇÕES
1. Ação Urgente
2. Segunda Prioridade
3. Terceira Recomendação

Texto: {texto}
"#;

const TEMPLATE_DESIGN: &str = r#"
Você é um especialista em UX/UI avaliando material de design (telas, wireframes, fluxos de navegação). Forneça um relatório detalhado com os seguintes pontos:

# ANÁLISE DE DESIGN

## 1. CONTEXTUALIZAÇÃO
- Tipo de material (tela, wireframe, fluxo)
- Público-alvo aparente

## 2. AVALIAÇÃO POR CRITÉRIOS

### Usabilidade (x/5)
✅ Pontos fortes
✖️ Problemas
💡 Sugestões

### Hierarquia Visual e Layout (x/5)
✅ Pontos fortes
✖️ Problemas
💡 Sugestões

### Consistência (x/5)
✅ Pontos fortes
✖️ Problemas
💡 Sugestões

### Acessibilidade (x/5)
✅ Pontos fortes
✖️ Problemas
💡 Sugestões

## 3. RECOMENDAÇÕES
1. Ajuste Prioritário
2. Segunda Prioridade
3. Terceira Recomendação

Material: {texto}
"#;

// Kept verbatim from the original scope-analysis rubric, with the slot renamed.
const TEMPLATE_SCOPE: &str = r#"
Você é um engenheiro experiente analisando documentos técnicos com profundidade. Forneça um relatório detalhado com os seguintes pontos:

# ANÁLISE TÉCNICA DETALHADA

## 1. CONTEXTUALIZAÇÃO
- Visão Geral do Escopo
- Objetivos-chave
- Partes Interessadas

## 2. AVALIAÇÃO POR CRITÉRIOS

### Clareza (x/5)
✅ Pontos fortes
✖️ Problemas
💡 Sugestões

### Viabilidade (x/5)
✅ Pontos fortes
✖️ Problemas
💡 Sugestões

### Organização e Coerência (x/5)
✅ Pontos fortes
✖️ Problemas
💡 Sugestões

### Impacto Ambiental e Societal (x/5)
✅ Pontos fortes
✖️ Problemas
💡 Sugestões

### Riscos e Desafios (x/5)
✅ Pontos fortes
✖️ Problemas
💡 Sugestões

## 3. RECOMENDAÇÕES

1. Ação Urgente
2. Segunda Prioridade
3. Terceira Recomendação

## 4. CONCLUSÃO FINAL
- Resumo Geral
- Impacto Geral
- Próximos Passos

Texto: {texto}
"#;

const TEMPLATE_GENERAL: &str = r#"
Você é um analista experiente avaliando um documento de natureza geral. Forneça um relatório objetivo com os seguintes pontos:

# ANÁLISE DO DOCUMENTO

## 1. RESUMO
- Assunto principal
- Objetivo aparente do documento

## 2. PONTOS FORTES

## 3. PROBLEMAS E LACUNAS

## 4. RECOMENDAÇÕES
1. Ação Urgente
2. Segunda Prioridade
3. Terceira Recomendação

Texto: {texto}
"#;

/// Prompt used by the model-backed classifier. The model must answer with a
/// single lower-case word; the caller trims and lower-cases the reply before
/// matching it against the known labels.
const CLASSIFY_TEMPLATE: &str = r#"
Classifique o documento abaixo em exatamente uma das categorias: tcc, resume, financial, design, scope ou general.
Responda com uma única palavra, em minúsculas, sem pontuação e sem explicações.

Documento:
{texto}
"#;

/// The template table: every document type maps to exactly one template.
pub const TEMPLATES: &[(DocumentType, &str)] = &[
    (DocumentType::Tcc, TEMPLATE_TCC),
    (DocumentType::Resume, TEMPLATE_RESUME),
    (DocumentType::Financial, TEMPLATE_FINANCIAL),
    (DocumentType::Design, TEMPLATE_DESIGN),
    (DocumentType::Scope, TEMPLATE_SCOPE),
    (DocumentType::General, TEMPLATE_GENERAL),
];

/// A prompt ready to send upstream: filled text plus an optional image.
#[derive(Debug, Clone)]
pub struct FilledPrompt {
    pub text: String,
    pub image: Option<ImageAttachment>,
}

/// Returns the template for a document type.
pub fn template_for(document_type: DocumentType) -> &'static str {
    match document_type {
        DocumentType::Tcc => TEMPLATE_TCC,
        DocumentType::Resume => TEMPLATE_RESUME,
        DocumentType::Financial => TEMPLATE_FINANCIAL,
        DocumentType::Design => TEMPLATE_DESIGN,
        DocumentType::Scope => TEMPLATE_SCOPE,
        DocumentType::General => TEMPLATE_GENERAL,
    }
}

/// Fills the document type's template with the source text.
///
/// `source_text` is required non-empty upstream; no validation happens here.
pub fn build(document_type: DocumentType, source_text: &str) -> FilledPrompt {
    FilledPrompt {
        text: template_for(document_type).replace(SLOT, source_text),
        image: None,
    }
}

/// Builds a multimodal prompt for image input: the template is filled with the
/// fixed placeholder and the image travels alongside the text.
pub fn build_with_image(document_type: DocumentType, image: ImageAttachment) -> FilledPrompt {
    FilledPrompt {
        text: template_for(document_type).replace(SLOT, IMAGE_PLACEHOLDER),
        image: Some(image),
    }
}

/// Builds the one-word classification prompt for the model-backed classifier.
pub fn classification_prompt(source_text: &str) -> FilledPrompt {
    FilledPrompt {
        text: CLASSIFY_TEMPLATE.replace(SLOT, source_text),
        image: None,
    }
}
