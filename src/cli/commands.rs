//! CLI command implementations.

use std::path::Path;

use crate::config::RecommenderConfig;
use crate::engine::{FuzzyResolver, NeighborSelector, Recommender};
use crate::format::{read_popular_file, MmapReader, ModelReader, ModelSource, ModelWriter};
use crate::types::{RecError, RecResult, RecommendOutcome, Resolution};

/// Recommend books similar to a free-text title. Returns `false` when the
/// input matched nothing.
pub fn cmd_recommend(config: &RecommenderConfig, input: &str, json: bool) -> RecResult<bool> {
    let recommender = Recommender::load(config)?;
    let outcome = recommender.recommend(input)?;

    if json {
        println!(
            "{}",
            serde_json::to_string_pretty(&outcome.to_json()?).unwrap_or_default()
        );
        return Ok(!outcome.is_no_match());
    }

    match &outcome {
        RecommendOutcome::NoMatch { .. } => {
            if let Some(message) = outcome.message() {
                println!("{}", message);
            }
            Ok(false)
        }
        RecommendOutcome::Recommendations {
            search_term,
            score,
            items,
        } => {
            println!("Showing results for: {} (match {}%)", search_term, score);
            if items.is_empty() {
                println!("  (no similar books in the catalog)");
            }
            for (rank, item) in items.iter().enumerate() {
                println!("{}. {}", rank + 1, item.title);
                println!("   Author: {}", item.author.as_deref().unwrap_or("-"));
                println!("   Similarity: {:.3}", item.score);
                if let Some(image) = &item.image_url {
                    println!("   Cover: {}", image);
                }
                println!("   Buy: {}", item.purchase_link);
                println!("   Free ebook: {}", item.free_ebook_link);
            }
            Ok(true)
        }
    }
}

/// Show which catalog title a free-text input resolves to.
pub fn cmd_resolve(config: &RecommenderConfig, input: &str, json: bool) -> RecResult<bool> {
    let model = load_model(&config.artifacts.model)?;
    let resolver = FuzzyResolver::new(config.threshold()?)?;
    let resolution = resolver.resolve(input, model.titles());

    if json {
        println!(
            "{}",
            serde_json::to_string_pretty(&resolution).unwrap_or_default()
        );
    } else {
        match &resolution {
            Resolution::Resolved(r) => {
                println!("{:?} -> {:?} (score {})", input, r.title, r.score)
            }
            Resolution::NoMatch { input } => println!(
                "No title scored above {} for {:?}",
                resolver.threshold(),
                input
            ),
        }
    }
    Ok(resolution.resolved().is_some())
}

/// List the ranked neighbors of an exact catalog title.
pub fn cmd_neighbors(path: &Path, title: &str, top_k: usize, json: bool) -> RecResult<()> {
    let model = load_model(path)?;
    let neighbors = NeighborSelector::new(top_k).select(&model, title)?;

    if json {
        let rows: Vec<serde_json::Value> = neighbors
            .iter()
            .map(|n| {
                serde_json::json!({
                    "position": n.position,
                    "title": model.titles().title(n.position),
                    "score": n.score,
                })
            })
            .collect();
        println!(
            "{}",
            serde_json::to_string_pretty(&rows).unwrap_or_default()
        );
    } else {
        println!("Neighbors of {:?}:", title);
        for n in &neighbors {
            println!(
                "  [{}] {:.4}  {}",
                n.position,
                n.score,
                model.titles().title(n.position).unwrap_or("?")
            );
        }
    }
    Ok(())
}

/// Show the most-rated books listing.
pub fn cmd_popular(path: &Path, limit: Option<usize>, json: bool) -> RecResult<()> {
    let books = read_popular_file(path).map_err(|e| e.loading("popular", path))?;
    let n = limit.unwrap_or(books.len()).min(books.len());
    let books = &books[..n];

    if json {
        println!(
            "{}",
            serde_json::to_string_pretty(books).unwrap_or_default()
        );
    } else {
        for (rank, book) in books.iter().enumerate() {
            println!(
                "{:>3}. {} by {} ({} ratings, avg {:.2})",
                rank + 1,
                book.title,
                book.author.as_deref().unwrap_or("unknown"),
                book.num_ratings,
                book.avg_rating
            );
        }
    }
    Ok(())
}

/// Display information about a .bsim file without loading the matrix.
pub fn cmd_info(path: &Path, json: bool) -> RecResult<()> {
    let reader = MmapReader::open(path)?;
    let header = reader.header();

    if json {
        let info = serde_json::json!({
            "file": path.display().to_string(),
            "version": header.version,
            "titles": header.title_count,
            "created_at": header.created_at,
            "title_block_bytes": header.title_block_length,
            "matrix_bytes": header.matrix_length,
            "file_size": reader.file_size(),
        });
        println!(
            "{}",
            serde_json::to_string_pretty(&info).unwrap_or_default()
        );
    } else {
        println!("File: {}", path.display());
        println!("Version: {}", header.version);
        println!("Titles: {}", header.title_count);
        println!("Created: {}", format_timestamp(header.created_at));
        println!(
            "Title block: {}",
            format_size(header.title_block_length)
        );
        println!("Matrix: {}", format_size(header.matrix_length));
        println!("File size: {}", format_size(reader.file_size() as u64));
    }
    Ok(())
}

/// Pack a JSON titles + scores export into a .bsim file.
pub fn cmd_pack(source: &Path, out: &Path, json: bool) -> RecResult<()> {
    let model = ModelSource::read_from_file(source)?.into_model()?;
    ModelWriter::new().write_to_file(&model, out)?;

    if json {
        println!(
            "{}",
            serde_json::json!({"file": out.display().to_string(), "titles": model.len()})
        );
    } else {
        println!("Packed {} titles into {}", model.len(), out.display());
    }
    Ok(())
}

/// Write a config file with default values.
pub fn cmd_init_config(path: &Path) -> RecResult<()> {
    if let Some(parent) = path.parent() {
        if !parent.as_os_str().is_empty() {
            std::fs::create_dir_all(parent)?;
        }
    }
    RecommenderConfig::default().save(path)?;
    println!("Wrote default config to {}", path.display());
    Ok(())
}

fn load_model(path: &Path) -> RecResult<crate::index::Model> {
    ModelReader::read_from_file(path).map_err(|e: RecError| e.loading("model", path))
}

fn format_size(bytes: u64) -> String {
    if bytes < 1024 {
        format!("{} B", bytes)
    } else if bytes < 1024 * 1024 {
        format!("{:.1} KB", bytes as f64 / 1024.0)
    } else if bytes < 1024 * 1024 * 1024 {
        format!("{:.1} MB", bytes as f64 / (1024.0 * 1024.0))
    } else {
        format!("{:.1} GB", bytes as f64 / (1024.0 * 1024.0 * 1024.0))
    }
}

fn format_timestamp(micros: u64) -> String {
    let secs = (micros / 1_000_000) as i64;
    let dt = chrono::DateTime::from_timestamp(secs, 0);
    match dt {
        Some(dt) => dt.format("%Y-%m-%d %H:%M:%S UTC").to_string(),
        None => format!("{} us", micros),
    }
}
