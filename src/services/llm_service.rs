//! LLM 服务 - 业务能力层
//!
//! 只负责"调用模型拿到一段回答"能力，不关心流程
//!
//! ## 技术栈
//! - 使用 `async-openai` crate 进行 API 调用
//! - 走 Azure OpenAI 部署（AzureConfig：端点 + 部署名 + api-version）
//! - 模型调用入口抽象成 [`ChatModel`] trait，测试时可以换成桩实现

use anyhow::Result;
use async_openai::{
    config::AzureConfig,
    types::chat::{
        ChatCompletionRequestMessage, ChatCompletionRequestSystemMessageArgs,
        ChatCompletionRequestUserMessageArgs, CreateChatCompletionRequestArgs,
    },
    Client,
};
use async_trait::async_trait;
use tracing::{debug, warn};

use crate::config::Config;
use crate::error::{AppError, LlmError};

/// 模型调用能力
///
/// 批处理只依赖这个 trait：给定 system / user 两段提示词，
/// 同步等待一段原始回答文本。生产实现是 [`LlmService`]，
/// 测试里用确定性的桩实现。
#[async_trait]
pub trait ChatModel: Send + Sync {
    /// 发送一轮对话并返回模型的原始回答
    async fn complete(&self, system_prompt: &str, user_prompt: &str) -> Result<String>;
}

/// LLM 服务
///
/// 职责：
/// - 调用 Azure OpenAI 部署完成一轮对话
/// - 只处理单条笔记的请求
/// - 不出现 Vec<PatientNote>
/// - 不出现 pat_id / note_id
/// - 不关心流程顺序
pub struct LlmService {
    client: Client<AzureConfig>,
    model_name: String,
    temperature: f32,
}

impl LlmService {
    /// 创建新的 LLM 服务
    ///
    /// 部署名、模型名、temperature 都来自 [`Config`]，默认是
    /// 空占位符，调用前必须由使用方填好。
    pub fn new(config: &Config) -> Self {
        let azure_config = AzureConfig::new()
            .with_api_base(&config.llm_api_base_url)
            .with_api_key(&config.llm_api_key)
            .with_api_version(&config.llm_api_version)
            .with_deployment_id(&config.llm_deployment_name);

        let client = Client::with_config(azure_config);

        Self {
            client,
            model_name: config.llm_model_name.clone(),
            temperature: config.llm_temperature,
        }
    }
}

#[async_trait]
impl ChatModel for LlmService {
    async fn complete(&self, system_prompt: &str, user_prompt: &str) -> Result<String> {
        debug!("调用 LLM API，模型: {}", self.model_name);
        debug!("用户消息长度: {} 字符", user_prompt.len());

        // 构建消息列表（system + user 两段）
        let system_msg = ChatCompletionRequestSystemMessageArgs::default()
            .content(system_prompt)
            .build()?;
        let user_msg = ChatCompletionRequestUserMessageArgs::default()
            .content(user_prompt)
            .build()?;
        let messages = vec![
            ChatCompletionRequestMessage::System(system_msg),
            ChatCompletionRequestMessage::User(user_msg),
        ];

        // 构建请求
        let request = CreateChatCompletionRequestArgs::default()
            .model(&self.model_name)
            .messages(messages)
            .temperature(self.temperature)
            .build()?;

        // 调用 API
        let response = self.client.chat().create(request).await.map_err(|e| {
            warn!("LLM API 调用失败: {}", e);
            AppError::llm_api_failed(&self.model_name, e)
        })?;

        debug!("LLM API 调用成功");

        // 提取响应内容
        let choice = response.choices.first().ok_or_else(|| {
            AppError::Llm(LlmError::EmptyResponse {
                model: self.model_name.clone(),
            })
        })?;
        let content = choice.message.content.clone().ok_or_else(|| {
            AppError::Llm(LlmError::EmptyContent {
                model: self.model_name.clone(),
            })
        })?;

        Ok(content.trim().to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::prompt;

    /// 创建测试用的 LlmService
    fn create_test_service() -> LlmService {
        let config = Config {
            llm_api_key: std::env::var("LLM_API_KEY").unwrap_or_default(),
            llm_api_base_url: "https://example-resource.openai.azure.com".to_string(),
            llm_deployment_name: "gpt-4-32k".to_string(),
            llm_model_name: "gpt-4-32k".to_string(),
            ..Config::default()
        };
        LlmService::new(&config)
    }

    #[test]
    fn test_service_carries_configured_model() {
        let service = create_test_service();
        assert_eq!(service.model_name, "gpt-4-32k");
        assert_eq!(service.temperature, 0.0);
    }

    /// 测试真实部署连通性
    ///
    /// 运行方式：
    /// ```bash
    /// cargo test test_live_annotation_call -- --ignored --nocapture
    /// ```
    #[tokio::test]
    #[ignore] // 默认忽略，需要配好 Azure 部署后手动运行
    async fn test_live_annotation_call() {
        crate::utils::logging::init();

        let config = Config::from_env().expect("加载配置失败");
        let service = LlmService::new(&config);

        let note = "Patient reports sleeping in his car for the past month after being evicted.";
        let user_prompt = prompt::build_user_prompt(note);

        let result = service.complete(prompt::SYSTEM_PROMPT, &user_prompt).await;

        match result {
            Ok(response) => {
                println!("\n========== LLM 响应 ==========");
                println!("{}", response);
                println!("==============================\n");
                assert!(!response.is_empty());
            }
            Err(e) => {
                println!("❌ LLM 调用失败: {}", e);
                panic!("测试失败: {}", e);
            }
        }
    }
}
