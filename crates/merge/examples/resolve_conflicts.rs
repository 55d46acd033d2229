use anyhow::{bail, Result};
use buffer_diff::TextDiff;
use incremental_merge::{MergeConfig, MergeEvent, MergeList, Side, TextRange, Version};

fn print_changes(merge: &MergeList) {
    for side in Side::BOTH {
        println!("  {} changes:", side);
        for change in merge.iter_changes(side) {
            println!(
                "    {} {}{} base {:?} -> {:?}",
                change.id(),
                change.kind(),
                if change.is_applied() { " (applied)" } else { "" },
                change.text(Version::Base).unwrap_or_default(),
                change.text(side.into()).unwrap_or_default(),
            );
        }
    }
    let counter = merge.counter();
    println!(
        "  pending: {} changes, {} conflicts",
        counter.changes, counter.conflicts
    );
}

fn main() -> Result<()> {
    env_logger::init();

    let base = "fn main() {\n    let x = 1;\n    let y = 2;\n    println!(\"{}\", x + y);\n}\n";
    let left = "fn main() {\n    let x = 10;\n    let y = 2;\n    println!(\"{}\", x + y);\n}\n";
    let right = "fn main() {\n    let x = 100;\n    let y = 2;\n    println!(\"sum: {}\", x + y);\n}\n";

    let config = MergeConfig::default();
    let mut merge = MergeList::from_texts(left, base, right, &config);
    if let Some(message) = merge.error_message() {
        bail!("merge refused: {message}");
    }

    println!("Initial state:");
    print_changes(&merge);

    // Take every change that does not need a decision
    let applied = merge.apply_non_conflicting()?;
    println!("\nApplied {} non-conflicting changes", applied);

    // Resolve the remaining conflicts in favour of the left side
    let conflicts: Vec<_> = merge
        .iter_changes(Side::Left)
        .filter(|change| change.is_conflict() && !change.is_applied())
        .map(|change| change.id())
        .collect();
    for id in conflicts {
        merge.apply(id)?;
    }

    println!("\nAfter resolving:");
    print_changes(&merge);

    // Typing across a resolved range drops it from the lists
    let line_end = merge.result_text().find('\n').unwrap_or(0);
    merge.edit(Version::Base, TextRange::new(line_end, line_end + 5), "")?;
    for event in merge.take_events() {
        if let MergeEvent::Removed { change, side, reason } = event {
            println!("  {} left the {} list ({})", change, side, reason);
        }
    }

    println!("\nMerged result against the base:");
    println!("{}", TextDiff::unified_diff(&config.diff, base, &merge.result_text(), 1)?);

    Ok(())
}
