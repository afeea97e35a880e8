use autonome_core::trade::entity::ModelInfo;

/// 参赛模型的静态展示信息
pub const MODEL_INFO: &[ModelInfo] = &[
    ModelInfo {
        id: "grok_4",
        logo: "https://nof1.ai/logos_white/Grok_logo.webp",
        color: "#000000",
        label: "Grok 4",
    },
    ModelInfo {
        id: "gpt_5",
        logo: "https://nof1.ai/logos_white/GPT_logo.png",
        color: "#39B295",
        label: "GPT 5",
    },
    ModelInfo {
        id: "deepseek_chat_v3_1",
        logo: "https://nof1.ai/logos_white/deepseek_logo.png",
        color: "#4D6BFE",
        label: "DeepSeek V3.1",
    },
    ModelInfo {
        id: "claude_sonnet_4_5",
        logo: "https://nof1.ai/logos_white/Claude_logo.png",
        color: "#FF6B35",
        label: "Claude Sonnet 4.5",
    },
    ModelInfo {
        id: "gemini_2_5_pro",
        logo: "https://nof1.ai/logos_white/Gemini_logo.webp",
        color: "#4285F4",
        label: "Gemini 2.5 Pro",
    },
    ModelInfo {
        id: "qwen3_max",
        logo: "https://nof1.ai/logos_white/qwen_logo.png",
        color: "#8B5CF6",
        label: "Qwen3 Max",
    },
];

/// 按模型标识查找展示信息，未知模型返回 `None`
pub fn model_info(id: &str) -> Option<&'static ModelInfo> {
    MODEL_INFO.iter().find(|m| m.id == id)
}

/// 模型显示名，未知模型回退为原始标识
pub fn model_label(id: &str) -> &str {
    model_info(id).map(|m| m.label).unwrap_or(id)
}
