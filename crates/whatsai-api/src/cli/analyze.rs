//! `whatsai analyze <file|->` - one-shot style analysis of a writing sample.
//!
//! Prints the profile the backend derives. Nothing is applied; a running
//! server is unaffected.

use anyhow::{Context, Result};
use console::style;
use tokio::io::AsyncReadExt;
use whatsai_core::generation::{GenerationClient, GenerationSettings};
use whatsai_core::training::check_sample;
use whatsai_infra::llm::create_provider;
use whatsai_infra::secret::resolve_api_key;
use whatsai_types::config::GlobalConfig;
use whatsai_types::personality::{AnalysisResult, Personality};

pub async fn analyze_sample(config: &GlobalConfig, input: &str, json: bool) -> Result<()> {
    let sample = read_sample(input).await?;
    check_sample(&sample)?;

    let api_key = resolve_api_key()?;
    let provider = create_provider(&config.llm, api_key)?;
    let generator = GenerationClient::new(provider, GenerationSettings::from(&config.llm));

    if !json {
        println!();
        println!(
            "  {} Analyzing {} characters with {}...",
            style("~").bold(),
            sample.trim().chars().count(),
            style(generator.model()).cyan()
        );
    }

    let analysis = generator.analyze_style(&sample).await?;

    if json {
        let out = serde_json::json!({
            "analysis": analysis,
            "personality": Personality::from_analysis(&analysis),
        });
        println!("{}", serde_json::to_string_pretty(&out)?);
        return Ok(());
    }

    print_analysis(&analysis);
    Ok(())
}

async fn read_sample(input: &str) -> Result<String> {
    if input == "-" {
        let mut buf = String::new();
        tokio::io::stdin()
            .read_to_string(&mut buf)
            .await
            .context("failed to read sample from stdin")?;
        return Ok(buf);
    }
    tokio::fs::read_to_string(input)
        .await
        .with_context(|| format!("failed to read sample from '{input}'"))
}

fn print_analysis(analysis: &AnalysisResult) {
    println!();
    println!("  {}", style("── Style profile ──").dim());
    println!("  Tone:     {}", style(&analysis.tone).bold());
    if analysis.frequently_used_phrases.is_empty() {
        println!("  Phrases:  {}", style("none").dim());
    } else {
        println!(
            "  Phrases:  {}",
            analysis
                .frequently_used_phrases
                .iter()
                .map(|p| format!("\"{p}\""))
                .collect::<Vec<_>>()
                .join(", ")
        );
    }
    println!();
    println!("  {}", style("── Directive ──").dim());
    println!("  {}", analysis.system_instruction);
    println!();
}
