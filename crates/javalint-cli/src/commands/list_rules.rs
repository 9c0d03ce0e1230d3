//! List rules command implementation.

use javalint_rules::all_rules;

/// Runs the list-rules command.
pub fn run() {
    println!("Available rules:\n");
    println!("{:<8} {:<20} Description", "Code", "Name");
    println!("{}", "-".repeat(80));

    for rule in all_rules() {
        println!(
            "{:<8} {:<20} {}",
            rule.code(),
            rule.name(),
            rule.description()
        );
    }

    println!("\nSuppress a rule on a class and everything nested in it with:");
    println!("  @SuppressWarnings(\"ExtendsAutoValue\")");
    println!("  // javalint: allow(ExtendsAutoValue)");

    println!("\nUse --rules to filter specific rules, e.g.:");
    println!("  javalint check --rules ExtendsAutoValue");
    println!("  javalint check --rules JL001");
}
