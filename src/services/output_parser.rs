//! 模型输出解析 - 业务能力层
//!
//! 只负责"把一段回答变成校验过的标注"能力，不关心流程
//!
//! 模型的回答可能是裸 JSON，也可能包在 Markdown 代码块里
//! （``` 或 ```json），两种都要能解析。

use regex::Regex;

use crate::error::ParseError;
use crate::models::annotation::{HousingAnnotation, RawAnnotation};
use crate::utils::logging::truncate_text;

/// 解析模型回答为校验过的标注结果
///
/// # 参数
/// - `reply`: 模型的原始回答文本
///
/// # 返回
/// 解析并校验通过的 [`HousingAnnotation`]；找不到 JSON、反序列化
/// 失败、枚举字段越界分别对应 [`ParseError`] 的三个变体
pub fn parse_annotation(reply: &str) -> Result<HousingAnnotation, ParseError> {
    let payload = extract_json_payload(reply)?;
    let raw: RawAnnotation = serde_json::from_str(payload)?;
    Ok(raw.validate()?)
}

/// 从回答中定位 JSON 数据块
///
/// 优先找 Markdown 代码块；没有代码块时退回到最外层花括号的
/// 包围范围。两种都找不到就报错，错误里带上截断后的回答原文。
fn extract_json_payload(reply: &str) -> Result<&str, ParseError> {
    if let Ok(re) = Regex::new(r"```(?:json)?\s*([\s\S]+?)\s*```") {
        if let Some(caps) = re.captures(reply) {
            if let Some(m) = caps.get(1) {
                return Ok(m.as_str());
            }
        }
    }

    match (reply.find('{'), reply.rfind('}')) {
        (Some(start), Some(end)) if start < end => Ok(&reply[start..=end]),
        _ => Err(ParseError::JsonBlockNotFound {
            response: truncate_text(reply, 200),
        }),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::ValidationError;
    use crate::models::annotation::{StabilityStatus, YesNo};

    const VALID_REPLY: &str = r#"{
        "Evidence": "--\npatient has been homeless for the past two months",
        "HousingNoted": "Y",
        "HousingInstability_Current": "Y",
        "HousingStability_Current": "N",
        "HousingInstability_History": "N",
        "Justification": "The note explicitly states current homelessness."
    }"#;

    #[test]
    fn test_parse_bare_json() {
        let annotation = parse_annotation(VALID_REPLY).unwrap();
        assert_eq!(annotation.housing_noted, YesNo::Y);
        assert_eq!(annotation.housing_stability_current, StabilityStatus::N);
    }

    #[test]
    fn test_parse_fenced_json() {
        let reply = format!("```json\n{}\n```", VALID_REPLY);
        let annotation = parse_annotation(&reply).unwrap();
        assert_eq!(annotation.housing_instability_current, YesNo::Y);
    }

    #[test]
    fn test_parse_fenced_json_without_language_tag() {
        let reply = format!("```\n{}\n```", VALID_REPLY);
        assert!(parse_annotation(&reply).is_ok());
    }

    #[test]
    fn test_parse_json_with_surrounding_prose() {
        let reply = format!("Here is my assessment:\n{}\nLet me know.", VALID_REPLY);
        assert!(parse_annotation(&reply).is_ok());
    }

    #[test]
    fn test_parse_rejects_out_of_set_enum() {
        let reply = VALID_REPLY.replace(r#""HousingStability_Current": "N""#, r#""HousingStability_Current": "Maybe""#);
        let err = parse_annotation(&reply).unwrap_err();
        match err {
            ParseError::Validation(ValidationError::NotYesNoUnknown { field }) => {
                assert_eq!(field, "HousingStability_Current");
            }
            other => panic!("期望校验错误，得到: {:?}", other),
        }
    }

    #[test]
    fn test_parse_missing_field_is_json_error() {
        // 字段缺失属于反序列化失败，不是枚举校验失败
        let reply = r#"{"Evidence": "N/A", "HousingNoted": "N"}"#;
        let err = parse_annotation(reply).unwrap_err();
        assert!(matches!(err, ParseError::JsonInvalid { .. }));
    }

    #[test]
    fn test_parse_no_json_at_all() {
        let err = parse_annotation("I cannot answer that.").unwrap_err();
        match err {
            ParseError::JsonBlockNotFound { response } => {
                assert!(response.contains("I cannot answer"));
            }
            other => panic!("期望找不到JSON的错误，得到: {:?}", other),
        }
    }

    #[test]
    fn test_evidence_text_survives_verbatim() {
        let annotation = parse_annotation(VALID_REPLY).unwrap();
        assert_eq!(
            annotation.evidence,
            "--\npatient has been homeless for the past two months"
        );
    }
}
