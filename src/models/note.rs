use serde::{Deserialize, Serialize};

/// 单条病历笔记
///
/// 对应输入表中的一行。`note` 映射源表的 `full_text` 列，
/// 允许为空（空行会被批处理静默跳过）。
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PatientNote {
    #[serde(rename = "full_text")]
    pub note: Option<String>,

    pub pat_id: String,

    pub note_id: String,
}

impl PatientNote {
    /// 创建新的病历笔记
    pub fn new(
        note: Option<String>,
        pat_id: impl Into<String>,
        note_id: impl Into<String>,
    ) -> Self {
        Self {
            note,
            pat_id: pat_id.into(),
            note_id: note_id.into(),
        }
    }
}

impl std::fmt::Display for PatientNote {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        // 截断笔记内容以便显示（最多80个字符）
        let preview = match self.note.as_deref() {
            Some(text) => crate::utils::logging::truncate_text(text, 80),
            None => "<空>".to_string(),
        };
        write!(
            f,
            "[患者 {} 笔记 {}] {}",
            self.pat_id, self.note_id, preview
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_deserialize_from_table_row() {
        let row = r#"{"full_text": "Patient lives with dad.", "pat_id": "P001", "note_id": "N001"}"#;
        let note: PatientNote = serde_json::from_str(row).unwrap();
        assert_eq!(note.note.as_deref(), Some("Patient lives with dad."));
        assert_eq!(note.pat_id, "P001");
        assert_eq!(note.note_id, "N001");
    }

    #[test]
    fn test_deserialize_null_full_text() {
        let row = r#"{"full_text": null, "pat_id": "P002", "note_id": "N002"}"#;
        let note: PatientNote = serde_json::from_str(row).unwrap();
        assert!(note.note.is_none());
    }

    #[test]
    fn test_display_truncates_long_note() {
        let long_text = "x".repeat(200);
        let note = PatientNote::new(Some(long_text), "P003", "N003");
        let shown = note.to_string();
        assert!(shown.contains("..."));
        assert!(shown.len() < 200);
    }
}
