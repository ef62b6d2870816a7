use anyhow::{Context, Result, anyhow};
use std::{env, fs, path::PathBuf, process};
use word_snap_config::Config;
use word_snap_engine::tree::markdown;
use word_snap_engine::{Affinity, DocumentOrder, Range, SimpleSelection, TextSelection};

struct Args {
    markdown_path: PathBuf,
    start: usize,
    end: usize,
    config_path: Option<PathBuf>,
}

impl Args {
    fn parse(args: &[String]) -> Result<Self> {
        let (markdown_path, start, end, config_path) = match args {
            [_, path, start, end] => (path, start, end, None),
            [_, path, start, end, config] => (path, start, end, Some(PathBuf::from(config))),
            _ => {
                let given = args.len().saturating_sub(1);
                return Err(anyhow!("expected 3 or 4 arguments, got {given}"));
            }
        };
        Ok(Self {
            markdown_path: PathBuf::from(markdown_path),
            start: start
                .parse()
                .with_context(|| format!("invalid start offset '{start}'"))?,
            end: end
                .parse()
                .with_context(|| format!("invalid end offset '{end}'"))?,
            config_path,
        })
    }
}

/// Selection before and after snapping, as character offsets into the
/// rendered text.
#[derive(Debug, PartialEq)]
struct Report {
    original: (usize, usize, String),
    adjusted: (usize, usize, String),
}

fn snap_selection(
    markdown_source: &str,
    start: usize,
    end: usize,
    config: &Config,
) -> Result<Report> {
    let tree = markdown::render(markdown_source)?;
    let container = tree.root();
    let order = DocumentOrder::capture(&tree, container)?;

    let total = order.text_len_total();
    let past_end =
        |offset: usize| anyhow!("offset {offset} is past the end of the text ({total} characters)");
    let start_point = order
        .point_at_text_offset(start, Affinity::Start)
        .ok_or_else(|| past_end(start))?;
    let end_point = order
        .point_at_text_offset(end, Affinity::End)
        .ok_or_else(|| past_end(end))?;

    let mut selection = SimpleSelection::from_range(Range::new(start_point, end_point));
    let mut adjuster = TextSelection::with_delimiters(
        Some(&selection),
        &tree,
        container,
        config.delimiters.clone(),
    )?;
    let original_text = adjuster.selected_text();

    adjuster.adjust_start();
    adjuster.adjust_end();
    adjuster.restore_selection(&mut selection);

    let adjusted = adjuster.range();
    let adjusted_start = order.text_offset_of(adjusted.start).unwrap_or(start);
    let adjusted_end = order.text_offset_of(adjusted.end).unwrap_or(end);
    log::debug!("host selection now holds {:?}", selection.ranges());

    Ok(Report {
        original: (start, end, original_text),
        adjusted: (adjusted_start, adjusted_end, adjuster.selected_text()),
    })
}

fn main() -> Result<()> {
    env_logger::Builder::from_default_env()
        .filter_level(log::LevelFilter::Info)
        .parse_default_env()
        .init();

    let args: Vec<String> = env::args().collect();
    let args = match Args::parse(&args) {
        Ok(args) => args,
        Err(e) => {
            eprintln!("Error: {e}");
            eprintln!(
                "Usage: {} <markdown-file> <start> <end> [config-path]",
                args.first().map_or("word-snap-cli", String::as_str)
            );
            process::exit(1);
        }
    };

    let config = Config::load_or_default(args.config_path.as_deref())?;
    log::info!("Using delimiters {:?}", config.delimiters);

    let source = fs::read_to_string(&args.markdown_path)
        .with_context(|| format!("failed to read {}", args.markdown_path.display()))?;

    let report = snap_selection(&source, args.start, args.end, &config)?;
    let (start, end, text) = &report.original;
    println!("original: [{start}, {end}) {text:?}");
    let (start, end, text) = &report.adjusted;
    println!("adjusted: [{start}, {end}) {text:?}");
    Ok(())
}
