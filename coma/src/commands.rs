use clap::arg;

pub const CLAP_STYLING: clap::builder::styling::Styles = clap::builder::styling::Styles::styled()
    .header(clap_cargo::style::HEADER)
    .usage(clap_cargo::style::USAGE)
    .literal(clap_cargo::style::LITERAL)
    .placeholder(clap_cargo::style::PLACEHOLDER)
    .error(clap_cargo::style::ERROR)
    .valid(clap_cargo::style::VALID)
    .invalid(clap_cargo::style::INVALID);

pub fn command_argument_builder() -> clap::Command {
    clap::Command::new("coma")
        .version(env!("CARGO_PKG_VERSION"))
        .bin_name("coma")
        .about("Crawl a single domain and pull comments, visible text or same-domain links")
        .styles(CLAP_STYLING)
        .arg(
            arg!(<url>)
                .required(true)
                .help("The seed URL; its host and port bound the crawl"),
        )
        .arg(
            arg!([directories] ...)
                .required(false)
                .help("Sub-paths resolved against the seed and visited as extra seeds"),
        )
        .arg(
            arg!(-e --"extract" <MODE>)
                .required(true)
                .help("What to pull from each page; links also grows the crawl")
                .value_parser(["comments", "text", "links"]),
        )
        .arg(
            arg!(--"fetcher" <FETCHER>)
                .required(false)
                .help("How pages are retrieved: a headless browser or plain HTTP")
                .value_parser(["browser", "http"])
                .default_value("browser"),
        )
        .arg(
            arg!(--"timeout" <SECONDS>)
                .required(false)
                .help("Per-page fetch timeout")
                .value_parser(clap::value_parser!(u64).range(1..))
                .default_value("30"),
        )
        .arg(
            arg!(-w --"wordlist" <PATH>)
                .required(false)
                .help("Newline-delimited file of additional sub-paths")
                .value_parser(clap::value_parser!(std::path::PathBuf)),
        )
        .arg(
            arg!(-d --"depth" <N>)
                .required(false)
                .help("In links mode, how many hops to follow from the seeds (default: unlimited)")
                .value_parser(clap::value_parser!(usize)),
        )
        .arg(
            arg!(--"bound" <SUBSTRING>)
                .required(false)
                .help("In links mode, only follow URLs containing this substring"),
        )
        .arg(
            arg!(-f --"format" <FORMAT>)
                .required(false)
                .help("Report format: text, json")
                .value_parser(["text", "json"])
                .default_value("text"),
        )
        .arg(arg!(-q --"quiet" "Suppress banner and summary").required(false))
        .arg(arg!(-v --"verbose" "Log crawl decisions to stderr").required(false))
}
