//! 标注结果数据结构
//!
//! 模型的回答先反序列化为 [`RawAnnotation`]（全字符串字段），
//! 逐字段校验通过后升级为 [`HousingAnnotation`]（枚举字段已定型，
//! 非法取值在类型上不可表示）。

use serde::{Deserialize, Serialize};

use crate::error::ValidationError;

/// 二值字段（"Y" / "N"）
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum YesNo {
    Y,
    N,
}

impl YesNo {
    pub fn as_str(&self) -> &'static str {
        match self {
            YesNo::Y => "Y",
            YesNo::N => "N",
        }
    }
}

impl std::fmt::Display for YesNo {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// 三值字段（"Y" / "N" / "Unknown"）
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum StabilityStatus {
    Y,
    N,
    Unknown,
}

impl StabilityStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            StabilityStatus::Y => "Y",
            StabilityStatus::N => "N",
            StabilityStatus::Unknown => "Unknown",
        }
    }
}

impl std::fmt::Display for StabilityStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// 模型回答的原始形态
///
/// 六个字段都按字符串接收，字段缺失即反序列化失败。
#[derive(Debug, Clone, Deserialize)]
pub struct RawAnnotation {
    #[serde(rename = "Evidence")]
    pub evidence: String,

    #[serde(rename = "HousingNoted")]
    pub housing_noted: String,

    #[serde(rename = "HousingInstability_Current")]
    pub housing_instability_current: String,

    #[serde(rename = "HousingStability_Current")]
    pub housing_stability_current: String,

    #[serde(rename = "HousingInstability_History")]
    pub housing_instability_history: String,

    #[serde(rename = "Justification")]
    pub justification: String,
}

impl RawAnnotation {
    /// 逐字段校验，按字段声明顺序快速失败
    pub fn validate(self) -> Result<HousingAnnotation, ValidationError> {
        let housing_noted = yes_or_no("HousingNoted", &self.housing_noted)?;
        let housing_instability_current =
            yes_or_no("HousingInstability_Current", &self.housing_instability_current)?;
        let housing_stability_current =
            yes_no_or_unknown("HousingStability_Current", &self.housing_stability_current)?;
        let housing_instability_history =
            yes_or_no("HousingInstability_History", &self.housing_instability_history)?;

        Ok(HousingAnnotation {
            evidence: self.evidence,
            housing_noted,
            housing_instability_current,
            housing_stability_current,
            housing_instability_history,
            justification: self.justification,
        })
    }
}

/// 校验二值字段
fn yes_or_no(field: &'static str, value: &str) -> Result<YesNo, ValidationError> {
    match value {
        "Y" => Ok(YesNo::Y),
        "N" => Ok(YesNo::N),
        _ => Err(ValidationError::NotYesNo { field }),
    }
}

/// 校验三值字段
fn yes_no_or_unknown(field: &'static str, value: &str) -> Result<StabilityStatus, ValidationError> {
    match value {
        "Y" => Ok(StabilityStatus::Y),
        "N" => Ok(StabilityStatus::N),
        "Unknown" => Ok(StabilityStatus::Unknown),
        _ => Err(ValidationError::NotYesNoUnknown { field }),
    }
}

/// 校验通过的标注结果
///
/// 构造后不再修改。注意 `housing_instability_history` 与
/// `housing_instability_current` 互相独立，不做联动推导。
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct HousingAnnotation {
    #[serde(rename = "Evidence")]
    pub evidence: String,

    #[serde(rename = "HousingNoted")]
    pub housing_noted: YesNo,

    #[serde(rename = "HousingInstability_Current")]
    pub housing_instability_current: YesNo,

    #[serde(rename = "HousingStability_Current")]
    pub housing_stability_current: StabilityStatus,

    #[serde(rename = "HousingInstability_History")]
    pub housing_instability_history: YesNo,

    #[serde(rename = "Justification")]
    pub justification: String,
}

/// 输出表中的一行：标注结果加上患者/笔记标识
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AnnotatedNote {
    #[serde(flatten)]
    pub annotation: HousingAnnotation,

    pub pat_id: String,

    pub note_id: String,
}

#[cfg(test)]
mod tests {
    use super::*;

    fn raw(stability: &str, noted: &str) -> RawAnnotation {
        RawAnnotation {
            evidence: "-- patient has been homeless for the past two months".to_string(),
            housing_noted: noted.to_string(),
            housing_instability_current: "Y".to_string(),
            housing_stability_current: stability.to_string(),
            housing_instability_history: "N".to_string(),
            justification: "The note explicitly mentions current homelessness.".to_string(),
        }
    }

    #[test]
    fn test_validate_accepts_literal_values() {
        let annotation = raw("N", "Y").validate().unwrap();
        assert_eq!(annotation.housing_noted, YesNo::Y);
        assert_eq!(annotation.housing_instability_current, YesNo::Y);
        assert_eq!(annotation.housing_stability_current, StabilityStatus::N);
        assert_eq!(annotation.housing_instability_history, YesNo::N);
        // 自由文本字段原样保留
        assert!(annotation.evidence.starts_with("--"));
    }

    #[test]
    fn test_validate_accepts_unknown_stability() {
        let annotation = raw("Unknown", "N").validate().unwrap();
        assert_eq!(
            annotation.housing_stability_current,
            StabilityStatus::Unknown
        );
    }

    #[test]
    fn test_validate_rejects_out_of_set_yes_no() {
        let err = raw("N", "Maybe").validate().unwrap_err();
        assert_eq!(err.field(), "HousingNoted");
        assert!(err.to_string().contains("Output not Y/N"));
    }

    #[test]
    fn test_validate_rejects_out_of_set_stability() {
        let err = raw("Maybe", "Y").validate().unwrap_err();
        assert_eq!(err.field(), "HousingStability_Current");
        assert!(err.to_string().contains("Output not Y/N/Unknown"));
    }

    #[test]
    fn test_validate_rejects_lowercase() {
        // 校验是精确匹配，"y" 不等于 "Y"
        let mut candidate = raw("N", "Y");
        candidate.housing_instability_current = "y".to_string();
        let err = candidate.validate().unwrap_err();
        assert_eq!(err.field(), "HousingInstability_Current");
    }

    #[test]
    fn test_annotated_note_serializes_original_column_names() {
        let annotation = raw("N", "Y").validate().unwrap();
        let record = AnnotatedNote {
            annotation,
            pat_id: "P001".to_string(),
            note_id: "N001".to_string(),
        };
        let value = serde_json::to_value(&record).unwrap();
        for column in [
            "Evidence",
            "HousingNoted",
            "HousingInstability_Current",
            "HousingStability_Current",
            "HousingInstability_History",
            "Justification",
            "pat_id",
            "note_id",
        ] {
            assert!(value.get(column).is_some(), "缺少列: {}", column);
        }
        assert_eq!(value["HousingStability_Current"], "N");
        assert_eq!(value["pat_id"], "P001");
    }

    #[test]
    fn test_annotation_round_trips_field_values() {
        let annotation = raw("Unknown", "N").validate().unwrap();
        let json = serde_json::to_string(&annotation).unwrap();
        let back: HousingAnnotation = serde_json::from_str(&json).unwrap();
        assert_eq!(back, annotation);
    }
}
