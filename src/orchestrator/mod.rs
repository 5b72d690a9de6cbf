//! 编排层（Orchestration Layer）
//!
//! ## 职责
//!
//! 本层负责批量处理和流程调度。
//!
//! ## 模块划分
//!
//! ### `batch_processor` - 批量笔记处理器
//! - 按输入表顺序逐行处理（Vec<PatientNote>）
//! - 缺正文的行静默跳过
//! - 单行失败收容为失败记录，不打断整批
//! - 输出全局统计信息
//!
//! ## 层次关系
//!
//! ```text
//! batch_processor (处理 Vec<PatientNote>)
//!     ↓
//! workflow::AnnotateFlow (处理单条 PatientNote)
//!     ↓
//! services (能力层：llm / parser / diagnostics)
//! ```
//!
//! ## 设计原则
//!
//! 1. **严格串行**：上一条模型调用结束前不开始下一条
//! 2. **失败收容**：单行错误只产生诊断，不向调用方传播
//! 3. **向下依赖**：编排层 → workflow → services
//! 4. **无业务逻辑**：只做调度和统计，不做具体标注判断

pub mod batch_processor;

// 重新导出主要类型
pub use batch_processor::{run_batch, BatchOutput, RowFailure};
