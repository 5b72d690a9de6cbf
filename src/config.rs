use crate::error::{AppResult, ConfigError};

/// 程序配置文件
///
/// Azure 部署名、模型名和 temperature 默认留空，由使用方在
/// 调用前通过环境变量或直接赋值填入。
#[derive(Clone, Debug)]
pub struct Config {
    // --- LLM 配置 ---
    pub llm_api_key: String,
    pub llm_api_base_url: String,
    pub llm_api_version: String,
    /// Azure 部署名（Model Studio 中的 Deployment Name）
    pub llm_deployment_name: String,
    /// 模型名称
    pub llm_model_name: String,
    /// 采样温度
    pub llm_temperature: f32,
    // --- 运行配置 ---
    /// 是否显示详细日志
    pub verbose_logging: bool,
    /// 诊断输出文件
    pub diagnostics_file: String,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            llm_api_key: String::new(),
            llm_api_base_url: String::new(),
            llm_api_version: "2023-05-15".to_string(),
            llm_deployment_name: String::new(),
            llm_model_name: String::new(),
            llm_temperature: 0.0,
            verbose_logging: false,
            diagnostics_file: "diagnostics.txt".to_string(),
        }
    }
}

impl Config {
    /// 从环境变量加载配置
    ///
    /// 未设置的变量保持默认值；数值/布尔变量格式非法时直接报错，
    /// 不做静默回退。
    pub fn from_env() -> AppResult<Self> {
        let default = Self::default();
        Ok(Self {
            llm_api_key: std::env::var("LLM_API_KEY").unwrap_or(default.llm_api_key),
            llm_api_base_url: std::env::var("LLM_API_BASE_URL").unwrap_or(default.llm_api_base_url),
            llm_api_version: std::env::var("LLM_API_VERSION").unwrap_or(default.llm_api_version),
            llm_deployment_name: std::env::var("LLM_DEPLOYMENT_NAME")
                .unwrap_or(default.llm_deployment_name),
            llm_model_name: std::env::var("LLM_MODEL_NAME").unwrap_or(default.llm_model_name),
            llm_temperature: parse_env_var("LLM_TEMPERATURE", default.llm_temperature, "f32")?,
            verbose_logging: parse_env_var("VERBOSE_LOGGING", default.verbose_logging, "bool")?,
            diagnostics_file: std::env::var("DIAGNOSTICS_FILE").unwrap_or(default.diagnostics_file),
        })
    }
}

/// 解析单个环境变量，变量不存在时返回默认值
fn parse_env_var<T: std::str::FromStr>(
    var_name: &str,
    default: T,
    expected_type: &str,
) -> AppResult<T> {
    match std::env::var(var_name) {
        Ok(value) => value.parse().map_err(|_| {
            ConfigError::EnvVarParseFailed {
                var_name: var_name.to_string(),
                value,
                expected_type: expected_type.to_string(),
            }
            .into()
        }),
        Err(_) => Ok(default),
    }
}
