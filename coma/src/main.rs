use coma::commands::command_argument_builder;
use coma::handlers::handle_crawl;

#[tokio::main]
async fn main() {
    let matches = command_argument_builder().get_matches();
    handle_crawl(&matches).await;
}
