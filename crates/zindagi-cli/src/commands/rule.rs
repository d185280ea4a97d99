//! `zindagi rule`: show how a rule string is understood.

use anyhow::Result;

use zindagi_automaton::RuleSet;

/// Execute the `zindagi rule` command.
pub fn execute(rule: &str) -> Result<()> {
    let rules = RuleSet::parse(rule);

    println!("{}", rules);
    println!("  born with:    {}", describe(rules.births().iter()));
    println!("  survive with: {}", describe(rules.survivals().iter()));
    for (key, counts) in rules.extra() {
        println!("  ignored {}:    {}", key, describe(counts.iter()));
    }
    Ok(())
}

fn describe<'a>(counts: impl Iterator<Item = &'a u8>) -> String {
    let counts: Vec<String> = counts.map(|n| n.to_string()).collect();
    if counts.is_empty() {
        "(none)".to_string()
    } else {
        counts.join(", ")
    }
}
