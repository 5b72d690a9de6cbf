//! 笔记处理上下文
//!
//! 封装"我正在处理输入表第几行、哪个患者的哪条笔记"这一信息

use std::fmt::Display;

/// 笔记处理上下文
///
/// 包含处理单条笔记所需的所有上下文信息
#[derive(Debug, Clone)]
pub struct NoteCtx {
    /// 行在输入表中的下标（从 0 开始，诊断信息引用它）
    pub row_index: usize,

    /// 患者标识
    pub pat_id: String,

    /// 笔记标识
    pub note_id: String,
}

impl NoteCtx {
    /// 创建新的笔记上下文
    pub fn new(row_index: usize, pat_id: String, note_id: String) -> Self {
        Self {
            row_index,
            pat_id,
            note_id,
        }
    }
}

impl Display for NoteCtx {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "[行 {} 患者#{} 笔记#{}]",
            self.row_index, self.pat_id, self.note_id
        )
    }
}
