//! 单条笔记标注流程 - 流程层
//!
//! 核心职责：定义"一条笔记"的完整处理流程
//!
//! 流程顺序：
//! 1. 构造提示词（系统提示 + 笔记正文 + 格式说明）
//! 2. 调用模型
//! 3. 解析并校验回答
//! 4. 合并 pat_id / note_id 得到输出行

use anyhow::Result;
use tracing::{error, info, warn};

use crate::config::Config;
use crate::models::annotation::AnnotatedNote;
use crate::prompt;
use crate::services::{ChatModel, DiagnosticsWriter, LlmService};
use crate::utils::logging::truncate_text;
use crate::workflow::note_ctx::NoteCtx;

/// 笔记标注流程
///
/// - 编排单条笔记的标注流程
/// - 持有模型调用能力和诊断写入能力
/// - 不出现 Vec<PatientNote>
/// - 不决定哪些行要处理（那是编排层的事）
pub struct AnnotateFlow<M> {
    model: M,
    diagnostics: DiagnosticsWriter,
    verbose_logging: bool,
}

impl AnnotateFlow<LlmService> {
    /// 创建新的标注流程（生产模型实现）
    pub fn new(config: &Config) -> Self {
        Self::with_model(LlmService::new(config), config)
    }
}

impl<M: ChatModel> AnnotateFlow<M> {
    /// 使用自定义模型实现创建（测试时传入桩实现）
    pub fn with_model(model: M, config: &Config) -> Self {
        Self {
            model,
            diagnostics: DiagnosticsWriter::with_path(config.diagnostics_file.clone()),
            verbose_logging: config.verbose_logging,
        }
    }

    /// 处理一条笔记
    ///
    /// # 参数
    /// - `note_text`: 笔记正文（调用方保证非空）
    /// - `ctx`: 笔记上下文
    ///
    /// # 返回
    /// 标注成功返回输出行；模型调用失败、解析失败、校验失败
    /// 都作为错误返回，由编排层决定如何收容
    pub async fn run(&self, note_text: &str, ctx: &NoteCtx) -> Result<AnnotatedNote> {
        if self.verbose_logging {
            self.log_note_preview(ctx, note_text);
        }

        // 构造提示词
        let user_prompt = prompt::build_user_prompt(note_text);

        // 调用模型（阻塞等待本条完成）
        let reply = self.model.complete(prompt::SYSTEM_PROMPT, &user_prompt).await?;

        // 解析并校验
        let annotation = crate::services::parse_annotation(&reply)?;

        info!(
            "{} ✓ 标注完成: HousingNoted={} Current={} Stability={} History={}",
            ctx,
            annotation.housing_noted,
            annotation.housing_instability_current,
            annotation.housing_stability_current,
            annotation.housing_instability_history
        );

        // 合并标识得到输出行
        Ok(AnnotatedNote {
            annotation,
            pat_id: ctx.pat_id.clone(),
            note_id: ctx.note_id.clone(),
        })
    }

    /// 上报一条处理失败
    ///
    /// 按固定文案写诊断文件并镜像到日志。诊断文件写不进去只
    /// 告警，不打断批处理。
    pub async fn report_failure(&self, index: usize, message: &str) {
        error!("Error message: {}, Index: {}", message, index);

        if let Err(e) = self.diagnostics.write(index, message).await {
            warn!("⚠️ 诊断文件写入失败: {}", e);
        }
    }

    // ========== 日志辅助方法 ==========

    /// 显示笔记正文预览
    fn log_note_preview(&self, ctx: &NoteCtx, note_text: &str) {
        info!("{} 笔记正文: {}", ctx, truncate_text(note_text, 80));
    }
}
