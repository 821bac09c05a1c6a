//! The `quizforge init` command.

use std::path::Path;

use anyhow::{Context, Result};

pub fn execute() -> Result<()> {
    write_if_absent(Path::new("quizforge.toml"), SAMPLE_CONFIG)?;
    write_if_absent(Path::new("sample-response.txt"), SAMPLE_RESPONSE)?;

    println!("\nNext steps:");
    println!("  1. Export GEMINI_API_KEY (or QUIZFORGE_GEMINI_KEY) with your API key");
    println!("  2. Try the parser offline: quizforge parse --input sample-response.txt");
    println!("  3. Generate questions: quizforge generate --topic \"photosynthesis\" --count 5");

    Ok(())
}

fn write_if_absent(path: &Path, content: &str) -> Result<()> {
    if path.exists() {
        println!("{} already exists, skipping.", path.display());
    } else {
        std::fs::write(path, content)
            .with_context(|| format!("failed to write {}", path.display()))?;
        println!("Created {}", path.display());
    }
    Ok(())
}

const SAMPLE_CONFIG: &str = r#"# quizforge configuration

default_provider = "gemini"
default_model = "gemini-1.5-flash-latest"
default_temperature = 0.7
default_question_count = 30
max_tokens = 8192
tests_dir = "./quizforge-tests"
classes = ["ClassA", "ClassB", "ClassC", "ClassD"]
default_total_time_minutes = 30

[providers.gemini]
type = "gemini"
api_key = "${GEMINI_API_KEY}"

[providers.openai]
type = "openai"
api_key = "${OPENAI_API_KEY}"

[providers.ollama]
type = "ollama"
base_url = "http://localhost:11434"
"#;

const SAMPLE_RESPONSE: &str = "What is 2+2?_1_2_3_4_C
broken line without delimiters
Capital of France?_London_Paris_Berlin_Madrid_B
";
