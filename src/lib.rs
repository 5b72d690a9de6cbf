//! # Housing Annotator
//!
//! 一个从病历自由文本里标注住房不稳定状况的 Rust 库
//!
//! ## 架构设计
//!
//! 本系统采用严格的三层架构：
//!
//! ### ① 业务能力层（Services）
//! - `services/` - 描述"我能做什么"，只处理单条笔记
//! - `LlmService` - 模型调用能力（Azure OpenAI 部署）
//! - `output_parser` - 回答解析 + 字段校验能力
//! - `DiagnosticsWriter` - 写诊断文件能力
//!
//! ### ② 流程层（Workflow）
//! - `workflow/` - 定义"一条笔记"的完整处理流程
//! - `NoteCtx` - 上下文封装（行号 + pat_id + note_id）
//! - `AnnotateFlow` - 流程编排（提示词 → 模型 → 解析 → 合并标识）
//!
//! ### ③ 编排层（Orchestration）
//! - `orchestrator/batch_processor` - 批量笔记处理器，串行遍历
//!   输入表，收容单行失败，产出输出表
//!
//! ## 使用方式
//!
//! 没有 CLI：调用方构造 [`Config`] 和 [`AnnotateFlow`]，
//! 把输入表交给 [`run_batch`]，拿回 [`BatchOutput`]。
//!
//! ```no_run
//! use housing_annotator::{run_batch, AnnotateFlow, Config, PatientNote};
//!
//! # async fn example() -> anyhow::Result<()> {
//! let mut config = Config::from_env()?;
//! config.llm_deployment_name = "gpt-4-32k".to_string();
//! config.llm_model_name = "gpt-4-32k".to_string();
//!
//! let flow = AnnotateFlow::new(&config);
//! let notes = vec![PatientNote::new(
//!     Some("Patient has been homeless for the past two months.".to_string()),
//!     "P001",
//!     "N001",
//! )];
//!
//! let output = run_batch(&flow, &notes).await;
//! println!("标注成功 {} 条", output.records.len());
//! # Ok(())
//! # }
//! ```

pub mod config;
pub mod error;
pub mod models;
pub mod orchestrator;
pub mod prompt;
pub mod services;
pub mod utils;
pub mod workflow;

// 重新导出常用类型
pub use config::Config;
pub use error::{AppError, AppResult, LlmError, ParseError, ValidationError};
pub use models::{AnnotatedNote, HousingAnnotation, PatientNote, StabilityStatus, YesNo};
pub use orchestrator::{run_batch, BatchOutput, RowFailure};
pub use services::{ChatModel, DiagnosticsWriter, LlmService};
pub use workflow::{AnnotateFlow, NoteCtx};
