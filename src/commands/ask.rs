use docqa_core::Session;

pub async fn run(session: &Session, question: &str, show_sources: bool) -> anyhow::Result<()> {
    let progress = super::spinner("Processing your query...")?;
    let result = session.ask(question).await;
    progress.finish_and_clear();

    let answer = result?;
    println!("{}", answer.text);

    if show_sources {
        println!();
        println!("Sources:");
        for source in &answer.sources {
            println!(
                "  page {:>3}  (score: {:.3})  {}",
                source.chunk.page_number,
                source.score,
                preview(&source.chunk.text, 60)
            );
        }
    }

    Ok(())
}

/// First line of a chunk, cut to `max_chars`
fn preview(text: &str, max_chars: usize) -> String {
    let line = text.lines().next().unwrap_or_default().trim();
    if line.chars().count() <= max_chars {
        line.to_string()
    } else {
        let cut: String = line.chars().take(max_chars).collect();
        format!("{}...", cut)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_preview() {
        assert_eq!(preview("short line\nsecond", 60), "short line");
        assert_eq!(preview("abcdef", 3), "abc...");
        assert_eq!(preview("ééééé", 2), "éé...");
        assert_eq!(preview("", 10), "");
    }
}
