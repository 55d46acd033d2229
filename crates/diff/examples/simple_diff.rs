use anyhow::Result;
use buffer_diff::{DiffConfig, DiffGranularity, TextDiff};

fn main() -> Result<()> {
    // Two sample texts to compare
    let text1 = "This is the first line.\nHere is the second line.\nAnd the third line.";
    let text2 = "This is the first line.\nThis is a completely different second line.\nAnd the third line.\nPlus a new fourth line.";

    // Generate a unified diff
    println!("Unified diff:");
    let config = DiffConfig::default();
    println!("{}", TextDiff::unified_diff(&config, text1, text2, 1)?);

    // Generate a diff object
    let diff = TextDiff::diff(text1, text2)?;
    let snapshot = diff.snapshot();

    // Print diff statistics
    println!("\nDiff statistics:");
    println!("  Total fragments: {}", snapshot.fragment_count());
    println!("  Changed fragments: {}", snapshot.changed_fragments());
    println!("  Inserted chars: {}", snapshot.inserted_chars());
    println!("  Deleted chars: {}", snapshot.deleted_chars());

    // Print fragments with their status
    println!("\nFragments:");
    for (i, fragment) in snapshot.fragments().iter().enumerate() {
        println!(
            "  {}: {} old {} new {}",
            i, fragment.status, fragment.old_range, fragment.new_range
        );
    }

    // The same comparison word by word
    let words = DiffConfig::default()
        .granularity(DiffGranularity::Word)
        .diff(text1, text2)?;
    println!("\nWord fragments:");
    for fragment in words.fragments().iter().filter(|f| f.has_changes()) {
        let old = words.old_text().slice(fragment.old_range.to_range());
        let new = words.new_text().slice(fragment.new_range.to_range());
        println!("  \x1b[31m{:?}\x1b[0m -> \x1b[32m{:?}\x1b[0m", old.to_string(), new.to_string());
    }

    Ok(())
}
