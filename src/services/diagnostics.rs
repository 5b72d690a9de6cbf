//! 诊断写入服务 - 业务能力层
//!
//! 只负责"写诊断文件"能力，不关心流程
//!
//! 诊断行是给运维看的纯文本，固定形如
//! `Error message: <错误>, Index: <行号>`，不做结构化。

use anyhow::Result;
use std::fs::OpenOptions;
use std::io::Write;
use tracing::debug;

use crate::error::AppError;

/// 诊断写入服务
///
/// 职责：
/// - 把单行处理失败的信息追加到诊断文件
/// - 只处理单条失败记录
/// - 不出现 Vec<PatientNote>
/// - 不关心流程顺序
pub struct DiagnosticsWriter {
    file_path: String,
}

impl DiagnosticsWriter {
    /// 创建新的诊断写入服务
    pub fn new() -> Self {
        Self {
            file_path: "diagnostics.txt".to_string(),
        }
    }

    /// 使用自定义文件路径创建
    pub fn with_path(path: impl Into<String>) -> Self {
        Self {
            file_path: path.into(),
        }
    }

    /// 写入一条诊断信息
    ///
    /// # 参数
    /// - `index`: 出错行在输入表中的下标（从 0 开始）
    /// - `message`: 错误信息
    ///
    /// # 返回
    /// 返回是否成功写入
    pub async fn write(&self, index: usize, message: &str) -> Result<()> {
        debug!("写入诊断: 行 {} | 信息长度: {}", index, message.len());

        let mut file = OpenOptions::new()
            .create(true)
            .append(true)
            .open(&self.file_path)
            .map_err(|e| AppError::file_write_failed(&self.file_path, e))?;

        let line = format!("Error message: {}, Index: {}\n", message, index);

        file.write_all(line.as_bytes())
            .map_err(|e| AppError::file_write_failed(&self.file_path, e))?;

        Ok(())
    }
}

impl Default for DiagnosticsWriter {
    fn default() -> Self {
        Self::new()
    }
}
