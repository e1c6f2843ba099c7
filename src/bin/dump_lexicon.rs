//! Debug tool to inspect a lexicon file and its matches.
//!
//! Usage:
//!   `cargo run --bin dump_lexicon -- <lexicon.txt>`
//!   `cargo run --bin dump_lexicon -- <lexicon.txt> <song.txt>`
//!
//! Lists every label and pattern; with a text file, also prints how often
//! each label matches the normalized text.

// Development/debug binary - allow expect/unwrap for simpler error handling
#![allow(clippy::expect_used, clippy::unwrap_used)]

use std::env;
use std::path::Path;

use lyricscope::corpus::read_lossy;
use lyricscope::lexicon::{Lexicon, LexiconSet};
use lyricscope::matcher::PatternMatcher;
use lyricscope::text::clean::normalize_lyrics;
use lyricscope::text::tokenize;

fn main() {
    let args: Vec<String> = env::args().collect();

    if args.len() < 2 {
        eprintln!("Usage: {} <lexicon.txt> [song.txt]", args[0]);
        std::process::exit(1);
    }

    let path = Path::new(&args[1]);
    let name = path
        .file_stem()
        .map_or_else(|| "lexicon".to_string(), |s| s.to_string_lossy().to_string());
    let lexicon = Lexicon::load(name, path).unwrap_or_else(|e| {
        eprintln!("Failed to load {}: {e}", path.display());
        std::process::exit(1);
    });

    dump_lexicon(&lexicon);

    if let Some(text_path) = args.get(2) {
        dump_matches(lexicon, Path::new(text_path));
    }
}

fn dump_lexicon(lexicon: &Lexicon) {
    println!("╔══════════════════════════════════════════════════════════════════╗");
    println!("║ Lexicon: {} ({} entries)", lexicon.name, lexicon.len());
    println!("╚══════════════════════════════════════════════════════════════════╝");
    println!();

    for (i, entry) in lexicon.entries().iter().enumerate() {
        let prefix = if i == lexicon.len() - 1 { "└" } else { "├" };
        println!("{prefix}─ {:<20} {}", entry.label, entry.pattern.as_str());
    }
    println!();
}

fn dump_matches(lexicon: Lexicon, path: &Path) {
    let decoded = read_lossy(path).unwrap_or_else(|e| {
        eprintln!("Failed to read {}: {e}", path.display());
        std::process::exit(1);
    });
    let text = normalize_lyrics(&decoded.text);
    let set = LexiconSet::new(vec![lexicon]).unwrap();
    let matcher = PatternMatcher::new(&set);

    println!("🎤 MATCHES in {} ({} tokens)", path.display(), tokenize(&text).len());
    if decoded.replaced {
        println!("   (invalid UTF-8 replaced)");
    }

    let counts = matcher.label_counts(&text);
    let total: u64 = counts.iter().map(|(_, _, c)| c).sum();
    for (i, (_, label, count)) in counts.iter().enumerate() {
        let prefix = if i == counts.len() - 1 { "└" } else { "├" };
        println!("{prefix}─ {label:<20} {count}");
    }
    println!();
    println!("Total: {total}");
}
