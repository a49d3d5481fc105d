#[path = "commands.rs"]
pub mod commands;
#[path = "handlers.rs"]
pub mod handlers;

// Re-export commonly used handler functions for convenience
pub use handlers::{
    collect_directories, crawl_options_from_matches, load_directories_from_file,
    output_format_from_matches,
};

// Re-export crawl functionality from coma-core
pub use coma_core::crawl::{CrawlOptions, FetcherKind, execute_crawl};
pub use coma_scanner::ExtractionMode;
