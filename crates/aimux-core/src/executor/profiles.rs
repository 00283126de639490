use aimux_transform::Format;

/// How a provider expects its credential presented.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AuthStyle {
    Bearer,
    XApiKey,
    XGoogApiKey,
}

/// Static description of one upstream provider: the wire format its payloads
/// use, where requests go, and how the credential is attached.
///
/// `{model}` and `{action}` in the endpoint are substituted per request;
/// `{action}` becomes `generateContent` / `streamGenerateContent` on the
/// Gemini-family surfaces.
#[derive(Debug, Clone, Copy)]
pub struct ProviderProfile {
    pub key: &'static str,
    pub target_format: Format,
    pub endpoint: &'static str,
    pub auth_style: AuthStyle,
}

pub const PROFILES: &[ProviderProfile] = &[
    ProviderProfile {
        key: "openai",
        target_format: Format::OpenAI,
        endpoint: "https://api.openai.com/v1/chat/completions",
        auth_style: AuthStyle::Bearer,
    },
    ProviderProfile {
        key: "openrouter",
        target_format: Format::OpenAI,
        endpoint: "https://openrouter.ai/api/v1/chat/completions",
        auth_style: AuthStyle::Bearer,
    },
    ProviderProfile {
        key: "qwen",
        target_format: Format::OpenAI,
        endpoint: "https://dashscope.aliyuncs.com/compatible-mode/v1/chat/completions",
        auth_style: AuthStyle::Bearer,
    },
    ProviderProfile {
        key: "kilo",
        target_format: Format::OpenAI,
        endpoint: "https://api.kilocode.ai/api/openrouter/chat/completions",
        auth_style: AuthStyle::Bearer,
    },
    ProviderProfile {
        key: "kimi",
        target_format: Format::Kimi,
        endpoint: "https://api.moonshot.cn/v1/chat/completions",
        auth_style: AuthStyle::Bearer,
    },
    ProviderProfile {
        key: "iflow",
        target_format: Format::IFlow,
        endpoint: "https://apis.iflow.cn/v1/chat/completions",
        auth_style: AuthStyle::Bearer,
    },
    ProviderProfile {
        key: "codex",
        target_format: Format::Codex,
        endpoint: "https://chatgpt.com/backend-api/codex/responses",
        auth_style: AuthStyle::Bearer,
    },
    ProviderProfile {
        key: "github-copilot",
        target_format: Format::Codex,
        endpoint: "https://api.githubcopilot.com/responses",
        auth_style: AuthStyle::Bearer,
    },
    ProviderProfile {
        key: "kiro",
        target_format: Format::Codex,
        endpoint: "https://codewhisperer.us-east-1.amazonaws.com/responses",
        auth_style: AuthStyle::Bearer,
    },
    ProviderProfile {
        key: "claude",
        target_format: Format::Claude,
        endpoint: "https://api.anthropic.com/v1/messages",
        auth_style: AuthStyle::XApiKey,
    },
    ProviderProfile {
        key: "gemini",
        target_format: Format::Gemini,
        endpoint: "https://generativelanguage.googleapis.com/v1beta/models/{model}:{action}",
        auth_style: AuthStyle::XGoogApiKey,
    },
    ProviderProfile {
        key: "aistudio",
        target_format: Format::Gemini,
        endpoint: "https://generativelanguage.googleapis.com/v1beta/models/{model}:{action}",
        auth_style: AuthStyle::XGoogApiKey,
    },
    ProviderProfile {
        key: "vertex",
        target_format: Format::Gemini,
        endpoint: "https://aiplatform.googleapis.com/v1/publishers/google/models/{model}:{action}",
        auth_style: AuthStyle::Bearer,
    },
    ProviderProfile {
        key: "gemini-cli",
        target_format: Format::GeminiCli,
        endpoint: "https://cloudcode-pa.googleapis.com/v1internal:{action}",
        auth_style: AuthStyle::Bearer,
    },
    ProviderProfile {
        key: "antigravity",
        target_format: Format::Antigravity,
        endpoint: "https://cloudcode-pa.googleapis.com/v1internal:{action}",
        auth_style: AuthStyle::Bearer,
    },
];

pub fn profile(key: &str) -> Option<&'static ProviderProfile> {
    PROFILES.iter().find(|profile| profile.key == key)
}
