//! Context Assembler - 为文本生成构建有界上下文
//!
//! 规则:
//! 1. 头部标明故事标题与类型
//! 2. 只取最近 3 章，按时间顺序（旧的在前）输出
//! 3. 每章优先使用摘要，否则取正文前 200 个字符并加省略标记

use super::story::{Chapter, Genre, Title};

/// 上下文窗口包含的最大章节数
pub const CONTEXT_WINDOW_CHAPTERS: usize = 3;

/// 无摘要时正文预览的最大字符数
pub const PREVIEW_CHARS: usize = 200;

const ELLIPSIS: &str = "...";

/// 构建上下文文本
///
/// `history` 可以是任意顺序、任意长度
pub fn assemble_context(title: &Title, genre: &Genre, history: &[Chapter]) -> String {
    let mut context = format!("Story: {}\nGenre: {}", title, genre);

    let mut window: Vec<&Chapter> = history.iter().collect();
    window.sort_by_key(|chapter| chapter.number());
    let skip = window.len().saturating_sub(CONTEXT_WINDOW_CHAPTERS);
    let window = &window[skip..];

    if window.is_empty() {
        return context;
    }

    context.push_str("\n\nPrevious chapters:");
    for chapter in window {
        context.push_str(&format!(
            "\nChapter {}: {}",
            chapter.number(),
            chapter_digest(chapter)
        ));
    }

    context
}

fn chapter_digest(chapter: &Chapter) -> String {
    match chapter.summary() {
        Some(summary) if !summary.trim().is_empty() => summary.trim().to_string(),
        _ => {
            let preview: String = chapter.content().chars().take(PREVIEW_CHARS).collect();
            format!("{}{}", preview, ELLIPSIS)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::story::StoryId;

    fn chapter(story_id: StoryId, number: u32, summary: Option<&str>) -> Chapter {
        Chapter::new(
            story_id,
            number,
            None,
            format!("Content of chapter {}", number),
            summary.map(str::to_string),
        )
        .unwrap()
    }

    fn header() -> (Title, Genre) {
        (Title::new("Salt Road").unwrap(), Genre::new("western").unwrap())
    }

    #[test]
    fn test_empty_history_is_header_only() {
        let (title, genre) = header();
        let context = assemble_context(&title, &genre, &[]);
        assert_eq!(context, "Story: Salt Road\nGenre: western");
    }

    #[test]
    fn test_only_last_three_in_chronological_order() {
        let (title, genre) = header();
        let story_id = StoryId::new();
        // 按降序提供，模拟数据库的获取顺序
        let history: Vec<Chapter> = (1..=5)
            .rev()
            .map(|n| chapter(story_id, n, Some(&format!("summary {}", n))))
            .collect();

        let context = assemble_context(&title, &genre, &history);

        assert!(!context.contains("Chapter 1:"));
        assert!(!context.contains("Chapter 2:"));
        let third = context.find("Chapter 3: summary 3").unwrap();
        let fourth = context.find("Chapter 4: summary 4").unwrap();
        let fifth = context.find("Chapter 5: summary 5").unwrap();
        assert!(third < fourth && fourth < fifth);
    }

    #[test]
    fn test_summary_preferred_over_content() {
        let (title, genre) = header();
        let story_id = StoryId::new();
        let history = vec![chapter(story_id, 1, Some("They met at dawn."))];

        let context = assemble_context(&title, &genre, &history);
        assert!(context.contains("Chapter 1: They met at dawn."));
        assert!(!context.contains("Content of chapter 1"));
    }

    #[test]
    fn test_content_preview_truncated_with_ellipsis() {
        let (title, genre) = header();
        let story_id = StoryId::new();
        let long = "é".repeat(250);
        let history = vec![Chapter::new(story_id, 1, None, long, None).unwrap()];

        let context = assemble_context(&title, &genre, &history);
        let expected = format!("Chapter 1: {}...", "é".repeat(PREVIEW_CHARS));
        assert!(context.ends_with(&expected));
    }

    #[test]
    fn test_short_content_still_gets_marker() {
        let (title, genre) = header();
        let story_id = StoryId::new();
        let history = vec![chapter(story_id, 2, None)];

        let context = assemble_context(&title, &genre, &history);
        assert!(context.ends_with("Chapter 2: Content of chapter 2..."));
    }
}
