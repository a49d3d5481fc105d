pub mod crawl;
pub mod report;

use colored::Colorize;

pub fn print_banner() {
    println!(
        "{} {} {}",
        "coma".bright_cyan().bold(),
        env!("CARGO_PKG_VERSION").bright_white(),
        "- comments, text and links from a single domain".bright_black()
    );
    println!();
}
