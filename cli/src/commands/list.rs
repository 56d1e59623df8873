use std::path::Path;

use monoguard_core::api::{discover_backends, discover_frontends, discover_packages};

use super::cli::ListArgs;

/// Prints discovered targets, one per line, grouped by category. No flag
/// means every category.
pub fn run(args: &ListArgs, root: &Path) -> i32 {
    let show_all = !args.backends && !args.frontends && !args.packages;

    if show_all {
        println!("Available targets:\n");
    }

    if show_all || args.backends {
        print_group("Backend services", &discover_backends(root));
    }
    if show_all || args.frontends {
        print_group("Frontend services", &discover_frontends(root));
    }
    if show_all || args.packages {
        print_group("Packages", &discover_packages(root));
    }

    0
}

fn print_group(label: &str, names: &[String]) {
    if names.is_empty() {
        return;
    }
    println!("{label}:");
    for name in names {
        println!("  - {name}");
    }
    println!();
}
