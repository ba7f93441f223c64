//! Model presentation metadata derived deterministically from model ids.
//!
//! Everything here is a pure function of the id string: display name from a
//! lookup table, organization from substring matching with an `Unknown`
//! bucket, and a per-organization color and logo. No hidden state, so the
//! same id always renders the same way.

use serde::Serialize;

/// Organizations models are attributed to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, derive_more::Display)]
pub enum Company {
    #[display("OpenAI")]
    #[serde(rename = "OpenAI")]
    OpenAi,
    Anthropic,
    Google,
    #[display("xAI")]
    #[serde(rename = "xAI")]
    Xai,
    Meta,
    Mistral,
    Alibaba,
    DeepSeek,
    Reka,
    Cohere,
    Microsoft,
    Unknown,
}

/// Display names for the models seen in current benchmarks. Unlisted ids
/// fall back to the raw id.
const NICE_NAMES: &[(&str, &str)] = &[
    // Anthropic
    ("claude-3-5-sonnet-20241022", "Sonnet 3.5"),
    ("claude-3-7-sonnet-20250219", "Sonnet 3.7"),
    ("claude-opus-4-1-20250805", "Opus 4.1"),
    ("claude-opus-4-20250514", "Opus 4"),
    ("claude-sonnet-4-20250514", "Sonnet 4"),
    // DeepSeek
    ("deepseek-chat", "DeepSeek chat"),
    ("deepseek-reasoner", "DeepSeek reasoner"),
    // Google
    ("gemini-2.5-flash", "Gemini 2.5 flash"),
    ("gemini-2.5-pro", "Gemini 2.5 pro"),
    // OpenAI
    ("gpt-4.1", "GPT-4.1"),
    ("gpt-4o", "GPT-4o"),
    ("gpt-5", "GPT-5"),
    ("gpt-5-mini", "GPT-5 mini"),
    ("gpt-5-nano", "GPT-5 nano"),
    ("o3", "o3"),
    ("o4-mini", "o4 mini"),
    // xAI
    ("grok-3", "Grok 3"),
    ("grok-3-mini", "Grok 3 Mini"),
    ("grok-4-0709", "Grok 4"),
];

/// Presentation bundle for one model id.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ModelPresentation {
    pub nice_model: String,
    pub company: Company,
    pub color: &'static str,
    pub logo_src: Option<&'static str>,
}

/// Derive the full presentation bundle for a model id.
#[must_use]
pub fn presentation(model: &str) -> ModelPresentation {
    let company = infer_company(model);
    ModelPresentation {
        nice_model: nice_model_name(model),
        company,
        color: company_color(company),
        logo_src: company_logo(company),
    }
}

/// Human-friendly display name for a model id.
#[must_use]
pub fn nice_model_name(model: &str) -> String {
    let key = model.trim();
    NICE_NAMES
        .iter()
        .find(|(id, _)| id.eq_ignore_ascii_case(key))
        .map_or_else(|| model.to_owned(), |(_, nice)| (*nice).to_owned())
}

/// Infer the organization behind a model id from well-known substrings.
///
/// Ids that match nothing land in [`Company::Unknown`].
#[must_use]
pub fn infer_company(model: &str) -> Company {
    let m = model.to_lowercase();
    let o_series = {
        let mut chars = m.chars();
        chars.next() == Some('o') && chars.next().is_some_and(|c| c.is_ascii_digit())
    };
    if m.contains("gpt") || m.contains("openai") || o_series {
        Company::OpenAi
    } else if m.contains("claude") || m.contains("anthropic") {
        Company::Anthropic
    } else if m.contains("gemini") || m.contains("palm") || m.contains("bison") || m.contains("google") {
        Company::Google
    } else if m.contains("grok") || m.contains("xai") {
        Company::Xai
    } else if m.contains("llama") || m.contains("meta") {
        Company::Meta
    } else if m.contains("mistral") || m.contains("mixtral") {
        Company::Mistral
    } else if m.contains("qwen") || m.contains("ali") {
        Company::Alibaba
    } else if m.contains("deepseek") {
        Company::DeepSeek
    } else if m.contains("reka") {
        Company::Reka
    } else if m.contains("cohere") || m.contains("command") {
        Company::Cohere
    } else if m.contains("phi") {
        Company::Microsoft
    } else {
        Company::Unknown
    }
}

/// Brand color per organization; `Unknown` gets a neutral gray.
#[must_use]
pub fn company_color(company: Company) -> &'static str {
    match company {
        Company::OpenAi => "#10A37F",
        Company::Anthropic => "#E39981",
        Company::Google => "#4285F4",
        Company::Xai => "#000000",
        Company::Meta => "#0866FF",
        Company::Mistral => "#FF6B00",
        Company::Alibaba => "#FF6A00",
        Company::DeepSeek => "#6A5ACD",
        Company::Reka => "#6C63FF",
        Company::Cohere => "#FF6F3D",
        Company::Microsoft => "#737373",
        Company::Unknown => "#888888",
    }
}

/// Icon reference per organization, where one exists.
#[must_use]
pub fn company_logo(company: Company) -> Option<&'static str> {
    match company {
        Company::OpenAi => Some(
            "https://upload.wikimedia.org/wikipedia/commons/6/66/OpenAI_logo_2025_%28symbol%29.svg",
        ),
        Company::Anthropic => {
            Some("https://upload.wikimedia.org/wikipedia/commons/5/58/Claude-ai-icon.svg")
        }
        Company::Google => {
            Some("https://upload.wikimedia.org/wikipedia/commons/8/8f/Google-gemini-icon.svg")
        }
        Company::Xai => Some("https://upload.wikimedia.org/wikipedia/commons/2/25/XAI.svg"),
        Company::Meta => {
            Some("https://upload.wikimedia.org/wikipedia/commons/d/d0/Meta_Platforms_logo.svg")
        }
        Company::Mistral => {
            Some("https://upload.wikimedia.org/wikipedia/commons/1/1b/Mistral_AI_logo.svg")
        }
        Company::Alibaba => {
            Some("https://upload.wikimedia.org/wikipedia/commons/5/5b/Alibaba_Group_logo.svg")
        }
        Company::DeepSeek => {
            Some("https://upload.wikimedia.org/wikipedia/commons/9/95/DeepSeek-icon.svg")
        }
        Company::Cohere => {
            Some("https://upload.wikimedia.org/wikipedia/commons/4/44/Cohere_AI_logo.svg")
        }
        Company::Microsoft => {
            Some("https://upload.wikimedia.org/wikipedia/commons/4/44/Microsoft_logo.svg")
        }
        Company::Reka | Company::Unknown => None,
    }
}
