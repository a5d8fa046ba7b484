use anyhow::{Context, Result, bail};
use notionrooms_config::Config;
use notionrooms_engine::rendering::html::escape;
use notionrooms_engine::{RenderOptions, RenderedPage, render_page_or_error};
use std::io::{self, Read, Write};
use std::path::{Path, PathBuf};
use std::{env, process};

const USAGE: &str = "Usage: notionrooms [--json | --document] [--out <file>] <entries.json | ->";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Format {
    /// Bare HTML fragment.
    Fragment,
    /// `{metadata, html}` envelope.
    Json,
    /// Standalone HTML page with head, title and favicon.
    Document,
}

#[derive(Debug, PartialEq)]
struct Args {
    input: Input,
    out: Option<PathBuf>,
    format: Format,
}

#[derive(Debug, PartialEq)]
enum Input {
    Stdin,
    File(PathBuf),
}

impl Args {
    fn parse(args: impl IntoIterator<Item = String>) -> Result<Self> {
        let mut input = None;
        let mut out = None;
        let mut format = Format::Fragment;

        let mut args = args.into_iter();
        while let Some(arg) = args.next() {
            match arg.as_str() {
                "--json" => format = Format::Json,
                "--document" => format = Format::Document,
                "--out" | "-o" => {
                    let path = args.next().context("--out needs a file path")?;
                    out = Some(PathBuf::from(path));
                }
                "-" => input = Some(Input::Stdin),
                flag if flag.starts_with("--") => bail!("Unknown option {flag}"),
                path => {
                    if input.is_some() {
                        bail!("Only one input may be given");
                    }
                    input = Some(Input::File(PathBuf::from(path)));
                }
            }
        }

        Ok(Self {
            input: input.context("No input given")?,
            out,
            format,
        })
    }
}

fn render_options(config: &Config) -> RenderOptions {
    RenderOptions {
        service_url: config.service_url.clone(),
        max_depth: config.max_depth,
        column_divider_px: config.column_divider_px,
    }
}

/// Wraps the fragment in a full page that pulls the stylesheet and client
/// script from the service.
fn standalone_document(page: &RenderedPage, options: &RenderOptions) -> String {
    let base = options.service_url.trim_end_matches('/');
    let favicon = page
        .metadata
        .favicon
        .as_deref()
        .map(|href| format!("<link rel=\"icon\" href=\"{}\">", escape(href)))
        .unwrap_or_default();
    format!(
        "<!DOCTYPE html>\n<html lang=\"en\">\n<head>\n<meta charset=\"utf-8\">\n\
         <meta name=\"viewport\" content=\"width=device-width, initial-scale=1\">\n\
         <title>{title}</title>\n{favicon}\n\
         <link rel=\"stylesheet\" href=\"{base}/static/notionrooms.css\">\n\
         <script defer src=\"{base}/static/notionrooms.js\"></script>\n\
         </head>\n<body>\n<main class=\"page\">{html}</main>\n</body>\n</html>\n",
        title = escape(&page.metadata.title),
        html = page.html,
    )
}

/// Explicit `--out` wins; otherwise a file input lands in the configured
/// output directory; otherwise stdout.
fn output_path(args: &Args, config: &Config) -> Option<PathBuf> {
    if let Some(out) = &args.out {
        return Some(out.clone());
    }
    let dir = config.output_dir.as_ref()?;
    let Input::File(input) = &args.input else {
        return None;
    };
    let extension = match args.format {
        Format::Json => "json",
        Format::Fragment | Format::Document => "html",
    };
    let stem = input.file_stem()?;
    Some(dir.join(stem).with_extension(extension))
}

fn read_input(input: &Input) -> Result<String> {
    match input {
        Input::Stdin => {
            let mut buffer = String::new();
            io::stdin()
                .read_to_string(&mut buffer)
                .context("Failed to read entries from stdin")?;
            Ok(buffer)
        }
        Input::File(path) => std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read entries from {}", path.display())),
    }
}

fn write_output(path: Option<&Path>, content: &str) -> Result<()> {
    match path {
        Some(path) => {
            if let Some(parent) = path.parent() {
                std::fs::create_dir_all(parent)?;
            }
            std::fs::write(path, content)
                .with_context(|| format!("Failed to write {}", path.display()))?;
            log::info!("Wrote {}", path.display());
        }
        None => io::stdout().write_all(content.as_bytes())?,
    }
    Ok(())
}

fn run(args: Args, config: Config) -> Result<()> {
    let options = render_options(&config);
    let json = read_input(&args.input)?;
    let page = render_page_or_error(&json, &options);
    log::info!("Rendered '{}' ({} bytes)", page.metadata.title, page.html.len());

    let content = match args.format {
        Format::Fragment => page.html.clone(),
        Format::Json => serde_json::to_string_pretty(&page)?,
        Format::Document => standalone_document(&page, &options),
    };
    write_output(output_path(&args, &config).as_deref(), &content)
}

fn main() -> Result<()> {
    // Info by default; RUST_LOG overrides
    env_logger::Builder::new()
        .filter_level(log::LevelFilter::Info)
        .parse_default_env()
        .init();

    let args = match Args::parse(env::args().skip(1)) {
        Ok(args) => args,
        Err(e) => {
            eprintln!("Error: {e}");
            eprintln!("{USAGE}");
            process::exit(1);
        }
    };

    let config_path = Config::config_path();
    let config = match Config::load() {
        Ok(Some(config)) => {
            log::info!("Loaded config from {}", config_path.display());
            config
        }
        Ok(None) => Config::default(),
        Err(e) => {
            eprintln!("Error: Failed to load config file: {e}");
            process::exit(1);
        }
    };

    run(args, config)
}
