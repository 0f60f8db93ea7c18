use colored::Colorize;

pub mod crawl;
pub mod graph;
pub mod report;

pub fn print_banner() {
    println!(
        "{} {}",
        "sitemapper".bright_cyan().bold(),
        env!("CARGO_PKG_VERSION").bright_black()
    );
    println!("{}", "depth-bounded link graph crawler".bright_black());
    println!();
}
