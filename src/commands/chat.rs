use docqa_core::Session;
use tokio::io::{AsyncBufReadExt, AsyncWriteExt, BufReader};

const TITLE: &str = "RAG Application built on Gemini Model";
const PROMPT: &str = "Say something: ";

/// Read questions from stdin until EOF, answering each in turn
pub async fn run(session: &Session) -> anyhow::Result<()> {
    println!("{}", TITLE);
    println!("{}", "=".repeat(TITLE.len()));
    println!();

    let mut lines = BufReader::new(tokio::io::stdin()).lines();
    let mut stdout = tokio::io::stdout();

    loop {
        stdout.write_all(PROMPT.as_bytes()).await?;
        stdout.flush().await?;

        let Some(line) = lines.next_line().await? else {
            println!();
            break;
        };

        let question = line.trim();
        if question.is_empty() {
            continue;
        }

        let progress = super::spinner("Processing your query...")?;
        let result = session.ask(question).await;
        progress.finish_and_clear();

        match result {
            Ok(answer) => println!("{}\n", answer.text),
            Err(e) => {
                eprintln!("Error processing query: {}", e);
                eprintln!("Please try again or check your internet connection.");
                eprintln!();
            }
        }
    }

    Ok(())
}
