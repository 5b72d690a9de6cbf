//! 批量笔记处理器 - 编排层
//!
//! ## 职责
//!
//! 本模块是整个库的入口，负责批量笔记的处理和结果汇总。
//!
//! ## 核心功能
//!
//! 1. **顺序遍历**：按输入表下标 0..N-1 逐行处理
//! 2. **静默跳过**：`note` 为空的行不产生输出、不产生诊断、不调模型
//! 3. **失败收容**：单行失败记入 [`RowFailure`]，批处理继续
//! 4. **进度反馈**：每行输出一条进度日志
//! 5. **全局统计**：汇总标注/跳过/失败数量
//!
//! ## 设计特点
//!
//! - **严格串行**：不做并发、不做重试、不做限流，上一条调用
//!   结束（成功或失败）之后才开始下一条
//! - **永不中断**：单行的任何错误都不会让 `run_batch` 返回错误

use tracing::{debug, info};

use crate::models::annotation::AnnotatedNote;
use crate::models::note::PatientNote;
use crate::services::ChatModel;
use crate::workflow::{AnnotateFlow, NoteCtx};

/// 批处理输出
///
/// `records` 按输入顺序存放标注成功的行（失败/跳过的行直接
/// 缺席，不补空行）；`failures` 按输入顺序存放被收容的单行失败。
#[derive(Debug, Clone, Default, PartialEq)]
pub struct BatchOutput {
    /// 输出表：每条标注成功的笔记一行
    pub records: Vec<AnnotatedNote>,
    /// 被收容的单行失败
    pub failures: Vec<RowFailure>,
}

/// 单行失败记录
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RowFailure {
    /// 行在输入表中的下标（从 0 开始）
    pub index: usize,
    /// 错误信息
    pub message: String,
}

/// 处理统计
#[derive(Debug, Default)]
struct BatchStats {
    annotated: usize,
    skipped: usize,
    failed: usize,
    total: usize,
}

/// 批量处理笔记
///
/// # 参数
/// - `flow`: 标注流程（由调用方用 Config 构造，内含模型和诊断能力）
/// - `notes`: 输入表，每行一条笔记
///
/// # 返回
/// 返回累积的 [`BatchOutput`]。单行失败全部被收容，本函数本身
/// 不会失败
pub async fn run_batch<M: ChatModel>(
    flow: &AnnotateFlow<M>,
    notes: &[PatientNote],
) -> BatchOutput {
    let total = notes.len();
    let mut stats = BatchStats {
        total,
        ..Default::default()
    };
    let mut output = BatchOutput::default();

    log_batch_start(total);

    // ========== 顺序遍历所有笔记（Vec<PatientNote>） ==========
    for (index, patient_note) in notes.iter().enumerate() {
        log_note_start(index, total);

        // 缺正文的行静默跳过：无输出行、无失败记录、无诊断、不调模型
        let note_text = match patient_note.note.as_deref() {
            Some(text) => text,
            None => {
                debug!("[行 {}] 笔记正文为空，跳过", index);
                stats.skipped += 1;
                continue;
            }
        };

        let ctx = NoteCtx::new(
            index,
            patient_note.pat_id.clone(),
            patient_note.note_id.clone(),
        );

        // 执行流程（委托给 AnnotateFlow），单行失败就地收容
        match flow.run(note_text, &ctx).await {
            Ok(record) => {
                stats.annotated += 1;
                output.records.push(record);
            }
            Err(e) => {
                let message = e.to_string();
                flow.report_failure(index, &message).await;
                stats.failed += 1;
                output.failures.push(RowFailure { index, message });
            }
        }
    }

    log_batch_complete(&stats);

    output
}

// ========== 日志辅助函数 ==========

fn log_batch_start(total: usize) {
    info!("{}", "=".repeat(60));
    info!("🚀 开始批量标注 - 串行处理模式");
    info!("📄 待处理笔记: {} 条", total);
    info!("{}", "=".repeat(60));
}

fn log_note_start(index: usize, total: usize) {
    info!("\n[行 {}] {}", index, "─".repeat(30));
    info!("[行 {}] 处理第 {}/{} 条笔记", index, index + 1, total);
}

fn log_batch_complete(stats: &BatchStats) {
    info!("\n{}", "=".repeat(60));
    info!("📊 全部处理完成统计");
    info!(
        "完成时间: {}",
        chrono::Local::now().format("%Y-%m-%d %H:%M:%S")
    );
    info!("{}", "=".repeat(60));
    info!("✅ 标注成功: {}/{}", stats.annotated, stats.total);
    info!("⏭️ 跳过(无正文): {}", stats.skipped);
    info!("❌ 失败: {}", stats.failed);
    info!("{}", "=".repeat(60));
}
