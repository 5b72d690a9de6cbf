use std::fmt;

/// 应用程序错误类型
#[derive(Debug)]
pub enum AppError {
    /// LLM 服务错误
    Llm(LlmError),
    /// 模型输出解析错误
    Parse(ParseError),
    /// 配置错误
    Config(ConfigError),
    /// 文件操作错误
    File(FileError),
    /// 其他错误（用于包装第三方库错误）
    Other(String),
}

impl fmt::Display for AppError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            AppError::Llm(e) => write!(f, "LLM错误: {}", e),
            AppError::Parse(e) => write!(f, "解析错误: {}", e),
            AppError::Config(e) => write!(f, "配置错误: {}", e),
            AppError::File(e) => write!(f, "文件错误: {}", e),
            AppError::Other(msg) => write!(f, "错误: {}", msg),
        }
    }
}

impl std::error::Error for AppError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            AppError::Llm(e) => Some(e),
            AppError::Parse(e) => Some(e),
            AppError::Config(e) => Some(e),
            AppError::File(e) => Some(e),
            AppError::Other(_) => None,
        }
    }
}

/// LLM 服务错误
#[derive(Debug)]
pub enum LlmError {
    /// API 调用失败
    ApiCallFailed {
        model: String,
        source: Box<dyn std::error::Error + Send + Sync>,
    },
    /// 返回结果为空
    EmptyResponse {
        model: String,
    },
    /// 返回内容为空
    EmptyContent {
        model: String,
    },
}

impl fmt::Display for LlmError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            LlmError::ApiCallFailed { model, source } => {
                write!(f, "LLM API调用失败 (模型: {}): {}", model, source)
            }
            LlmError::EmptyResponse { model } => {
                write!(f, "LLM返回结果为空 (模型: {})", model)
            }
            LlmError::EmptyContent { model } => {
                write!(f, "LLM返回内容为空 (模型: {})", model)
            }
        }
    }
}

impl std::error::Error for LlmError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            LlmError::ApiCallFailed { source, .. } => {
                Some(source.as_ref() as &(dyn std::error::Error + 'static))
            }
            _ => None,
        }
    }
}

/// 模型输出解析错误
#[derive(Debug)]
pub enum ParseError {
    /// 响应中找不到 JSON 数据块
    JsonBlockNotFound {
        response: String,
    },
    /// JSON 反序列化失败
    JsonInvalid {
        source: Box<dyn std::error::Error + Send + Sync>,
    },
    /// 字段校验失败
    Validation(ValidationError),
}

impl fmt::Display for ParseError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ParseError::JsonBlockNotFound { response } => {
                write!(f, "响应中找不到JSON数据块: {}", response)
            }
            ParseError::JsonInvalid { source } => {
                write!(f, "JSON解析失败: {}", source)
            }
            ParseError::Validation(e) => write!(f, "{}", e),
        }
    }
}

impl std::error::Error for ParseError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            ParseError::JsonInvalid { source } => {
                Some(source.as_ref() as &(dyn std::error::Error + 'static))
            }
            ParseError::Validation(e) => Some(e),
            _ => None,
        }
    }
}

/// 字段校验错误
///
/// 枚举字段的取值超出允许的字面值集合。错误信息中带上字段名和
/// "Output not Y/N" / "Output not Y/N/Unknown" 字样，下游按该文案
/// 区分校验失败和其他解析失败。
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ValidationError {
    /// 字段取值不是 "Y" 或 "N"
    NotYesNo {
        field: &'static str,
    },
    /// 字段取值不是 "Y"、"N" 或 "Unknown"
    NotYesNoUnknown {
        field: &'static str,
    },
}

impl ValidationError {
    /// 出错的字段名
    pub fn field(&self) -> &'static str {
        match self {
            ValidationError::NotYesNo { field } => field,
            ValidationError::NotYesNoUnknown { field } => field,
        }
    }
}

impl fmt::Display for ValidationError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ValidationError::NotYesNo { field } => {
                write!(f, "字段 {} 校验失败: Output not Y/N", field)
            }
            ValidationError::NotYesNoUnknown { field } => {
                write!(f, "字段 {} 校验失败: Output not Y/N/Unknown", field)
            }
        }
    }
}

impl std::error::Error for ValidationError {}

/// 配置错误
#[derive(Debug)]
pub enum ConfigError {
    /// 环境变量解析失败
    EnvVarParseFailed {
        var_name: String,
        value: String,
        expected_type: String,
    },
}

impl fmt::Display for ConfigError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ConfigError::EnvVarParseFailed {
                var_name,
                value,
                expected_type,
            } => {
                write!(
                    f,
                    "环境变量 {} 解析失败: 值 '{}' 无法转换为 {}",
                    var_name, value, expected_type
                )
            }
        }
    }
}

impl std::error::Error for ConfigError {}

/// 文件操作错误
#[derive(Debug)]
pub enum FileError {
    /// 写入文件失败
    WriteFailed {
        path: String,
        source: Box<dyn std::error::Error + Send + Sync>,
    },
}

impl fmt::Display for FileError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            FileError::WriteFailed { path, source } => {
                write!(f, "写入文件失败 ({}): {}", path, source)
            }
        }
    }
}

impl std::error::Error for FileError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            FileError::WriteFailed { source, .. } => {
                Some(source.as_ref() as &(dyn std::error::Error + 'static))
            }
        }
    }
}

// ========== 从常见错误类型转换 ==========
// 注意：不需要手动实现 From<AppError> for anyhow::Error，
// 因为 anyhow 已经为所有实现了 std::error::Error 的类型提供了自动实现

impl From<serde_json::Error> for ParseError {
    fn from(err: serde_json::Error) -> Self {
        ParseError::JsonInvalid {
            source: Box::new(err),
        }
    }
}

impl From<ValidationError> for ParseError {
    fn from(err: ValidationError) -> Self {
        ParseError::Validation(err)
    }
}

impl From<LlmError> for AppError {
    fn from(err: LlmError) -> Self {
        AppError::Llm(err)
    }
}

impl From<ParseError> for AppError {
    fn from(err: ParseError) -> Self {
        AppError::Parse(err)
    }
}

impl From<ConfigError> for AppError {
    fn from(err: ConfigError) -> Self {
        AppError::Config(err)
    }
}

impl From<FileError> for AppError {
    fn from(err: FileError) -> Self {
        AppError::File(err)
    }
}

// ========== 便捷构造函数 ==========

impl AppError {
    /// 创建LLM API调用错误
    pub fn llm_api_failed(model: impl Into<String>, source: impl std::error::Error + Send + Sync + 'static) -> Self {
        AppError::Llm(LlmError::ApiCallFailed {
            model: model.into(),
            source: Box::new(source),
        })
    }

    /// 创建文件写入错误
    pub fn file_write_failed(path: impl Into<String>, source: impl std::error::Error + Send + Sync + 'static) -> Self {
        AppError::File(FileError::WriteFailed {
            path: path.into(),
            source: Box::new(source),
        })
    }
}

// ========== Result 类型别名 ==========

/// 应用程序结果类型
pub type AppResult<T> = Result<T, AppError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_validation_error_message_names_field() {
        let err = ValidationError::NotYesNo {
            field: "HousingNoted",
        };
        let msg = err.to_string();
        assert!(msg.contains("HousingNoted"));
        assert!(msg.contains("Output not Y/N"));
    }

    #[test]
    fn test_validation_error_three_valued_message() {
        let err = ValidationError::NotYesNoUnknown {
            field: "HousingStability_Current",
        };
        let msg = err.to_string();
        assert!(msg.contains("HousingStability_Current"));
        assert!(msg.contains("Output not Y/N/Unknown"));
    }

    #[test]
    fn test_parse_error_wraps_validation() {
        let err: ParseError = ValidationError::NotYesNo {
            field: "HousingInstability_Current",
        }
        .into();
        // 校验错误的文案原样透传
        assert!(err.to_string().contains("Output not Y/N"));
    }
}
