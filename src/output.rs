// src/output.rs
// =============================================================================
// Reports a CrawlResult: as JSON (to a file or stdout) or as a table.
//
// Logs go to stderr, so stdout only ever carries the result and can be piped
// straight into another tool.
// =============================================================================

use crate::crawl::CrawlResult;
use anyhow::{Context, Result};
use std::io::Write;
use std::path::Path;

// Where and how to write the result
pub enum Report<'a> {
    Table,
    Json,
    JsonFile(&'a Path),
}

pub fn write_result(result: &CrawlResult, report: Report<'_>) -> Result<()> {
    match report {
        Report::Table => {
            let stdout = std::io::stdout();
            write_table(result, &mut stdout.lock())?;
        }
        Report::Json => {
            let stdout = std::io::stdout();
            let mut out = stdout.lock();
            write_json(result, &mut out)?;
        }
        Report::JsonFile(path) => {
            let file = std::fs::File::create(path)
                .with_context(|| format!("failed to create result file {}", path.display()))?;
            let mut out = std::io::BufWriter::new(file);
            write_json(result, &mut out)?;
            out.flush()?;
            tracing::info!(path = %path.display(), "wrote crawl result");
        }
    }
    Ok(())
}

fn write_json<W: Write>(result: &CrawlResult, out: &mut W) -> Result<()> {
    serde_json::to_writer_pretty(&mut *out, result)?;
    writeln!(out)?;
    Ok(())
}

fn write_table<W: Write>(result: &CrawlResult, out: &mut W) -> Result<()> {
    writeln!(out, "{:<40} {:>10}", "WORD", "COUNT")?;
    writeln!(out, "{}", "=".repeat(51))?;

    for (word, count) in &result.word_counts {
        // Truncate long words so the columns stay aligned
        let word_display = if word.chars().count() > 37 {
            format!("{}...", word.chars().take(37).collect::<String>())
        } else {
            word.clone()
        };
        writeln!(out, "{:<40} {:>10}", word_display, count)?;
    }

    writeln!(out)?;
    writeln!(out, "📊 Summary:")?;
    writeln!(out, "   🌐 Pages visited: {}", result.urls_visited)?;
    writeln!(out, "   📋 Words shown: {}", result.word_counts.len())?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample() -> CrawlResult {
        CrawlResult {
            word_counts: vec![("rust".to_string(), 12), ("crab".to_string(), 7)],
            urls_visited: 3,
        }
    }

    #[test]
    fn test_table_lists_words_in_order() {
        let mut out = Vec::new();
        write_table(&sample(), &mut out).unwrap();
        let text = String::from_utf8(out).unwrap();

        let rust = text.find("rust").unwrap();
        let crab = text.find("crab").unwrap();
        assert!(rust < crab);
        assert!(text.contains("Pages visited: 3"));
    }

    #[test]
    fn test_json_file_round_trips_through_serde_json() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("result.json");
        write_result(&sample(), Report::JsonFile(&path)).unwrap();

        let value: serde_json::Value =
            serde_json::from_str(&std::fs::read_to_string(&path).unwrap()).unwrap();
        assert_eq!(value["urlsVisited"], 3);
        assert_eq!(value["wordCounts"]["rust"], 12);
    }

    #[test]
    fn test_json_file_in_missing_dir_fails() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("missing").join("result.json");
        assert!(write_result(&sample(), Report::JsonFile(&path)).is_err());
    }
}
