// File: ./src/cli.rs
//! Shared command-line interface logic, like printing help.

pub fn print_help(binary_name: &str) {
    println!(
        "TaskFlow v{} - Fast terminal client for the TaskFlow task manager",
        env!("CARGO_PKG_VERSION")
    );
    println!();
    println!("USAGE:");
    println!("    {} [--root <path>]", binary_name);
    println!("    {} --help", binary_name);
    println!();
    println!("OPTIONS:");
    println!("    -r, --root <path>     Use a different directory for config and data.");
    println!("    -h, --help            Show this help message.");
    println!();
    println!("KEYBINDINGS:");
    println!("    Press '?' inside the app for full interactive help");
    println!();
    println!("QUICK ADD:");
    println!("    The quick-add input ('a' on the dashboard) understands plain English:");
    println!();
    println!("    urgent / asap / critical / important    High priority");
    println!("    medium / normal / standard              Medium priority");
    println!("    low / whenever / someday / backlog      Low priority");
    println!("    today / tonight / this evening          Due today");
    println!("    tomorrow                                Due tomorrow");
    println!("    next week / next monday                 Due in a week");
    println!("    next month                              Due next month");
    println!("    3/15  or  march 15                      Due on that date");
    println!();
    println!("EXAMPLES:");
    println!("    Meet Amy tomorrow urgent");
    println!("    Clean up backlog whenever");
    println!("    Ship quarterly report march 31 important");
    println!();
    println!("CONFIGURATION:");
    println!("    config.toml in the platform config directory sets the API URL");
    println!("    (api_url), the startup view (default_view) and more. Deleting it");
    println!("    re-runs the first-start setup.");
}
