//! Chapter Sequencer - 计算下一章节编号

/// 返回下一章节编号：无章节时为 1，否则为最大编号加 1
///
/// 必须与构建上下文使用同一份章节快照，并在故事锁内调用
pub fn next_chapter_number(existing: &[u32]) -> u32 {
    existing.iter().copied().max().map_or(1, |max| max + 1)
}
