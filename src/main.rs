//! chroma - render Markdown to the terminal

use std::fs::File;
use std::io::{self, BufRead, BufReader, BufWriter, Write};
use std::path::PathBuf;
use std::process;

use clap::Parser;
use log::debug;

use chroma::config::{PluginSetting, Settings};
use chroma::plugin::{register_builtins, PluginStatus, Registry};
use chroma::terminal::Terminal;
use chroma::theme::TomlTheme;
use chroma::{ChromaError, RenderContext, Renderer, Result};

/// Render Markdown to the terminal
#[derive(Parser, Debug)]
#[command(name = "chroma", version, about)]
struct Cli {
    /// Markdown file to render; stdin when omitted
    file: Option<PathBuf>,

    /// Blank lines above and spaces left of the output
    #[arg(short, long)]
    margin: Option<usize>,

    /// Content width in columns (default: terminal width)
    #[arg(short, long)]
    width: Option<usize>,

    /// Do not emit color escapes
    #[arg(long)]
    no_color: bool,

    /// TOML theme file
    #[arg(long, value_name = "PATH")]
    theme: Option<PathBuf>,

    /// Do not load the built-in plugins
    #[arg(long)]
    no_plugins: bool,

    /// Override a plugin option, e.g. `-s highlight.indent=4`
    #[arg(short = 's', long = "set", value_name = "PLUGIN.KEY=VALUE")]
    set: Vec<String>,

    /// List registered plugins and exit
    #[arg(long)]
    list_plugins: bool,

    /// List plugin options and exit
    #[arg(long)]
    list_config: bool,
}

fn main() {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("warn")).init();

    let cli = Cli::parse();
    match run(cli) {
        Ok(()) => {}
        Err(e) if e.is_broken_pipe() => debug!("output closed early"),
        Err(e) => {
            eprintln!("Error: {}", e);
            process::exit(1);
        }
    }
}

fn run(cli: Cli) -> Result<()> {
    let settings = Settings::load();

    let mut registry = Registry::new();
    if !cli.no_plugins {
        register_builtins(&mut registry);
    }
    settings.apply_plugin_settings(registry.config_mut());
    for spec in &cli.set {
        let setting = PluginSetting::parse(spec)?;
        registry
            .config_mut()
            .set(&setting.plugin, &setting.key, &setting.value);
    }
    registry.init_plugins();

    let stdout = io::stdout();
    let mut out = BufWriter::new(stdout.lock());

    if cli.list_plugins {
        list_plugins(&registry, &mut out)?;
        return Ok(out.flush()?);
    }
    if cli.list_config {
        list_config(&registry, &mut out)?;
        return Ok(out.flush()?);
    }

    let mut options = settings.render_options();
    if let Some(margin) = cli.margin {
        options.margin = margin;
    }
    if cli.width.is_some() {
        options.width = cli.width;
    }
    if cli.no_color {
        options.color_enabled = false;
    }
    let context = RenderContext::resolve(&options, Terminal::probe().cols());
    debug!("rendering with {context:?}");

    let theme = match cli.theme.or(settings.theme) {
        Some(path) => Some(TomlTheme::load(&path)?),
        None => None,
    };
    let mut renderer = Renderer::new(&registry, context);
    if let Some(theme) = &theme {
        renderer = renderer.with_theme(theme);
    }

    let input: Box<dyn BufRead> = match &cli.file {
        Some(path) => {
            let file = File::open(path).map_err(|source| ChromaError::Read {
                path: path.display().to_string(),
                source,
            })?;
            Box::new(BufReader::new(file))
        }
        None => Box::new(io::stdin().lock()),
    };
    renderer.render(input, out)
}

fn list_plugins(registry: &Registry, out: &mut impl Write) -> Result<()> {
    for plugin in registry.plugins() {
        let status = match plugin.status {
            PluginStatus::Pending => "pending",
            PluginStatus::Ready => "ready",
            PluginStatus::Failed => "failed",
        };
        let hooks: Vec<&str> = plugin.hooks.iter().map(|h| h.name()).collect();
        writeln!(out, "{:<12} {:<8} {}", plugin.name, status, hooks.join(", "))?;
    }
    Ok(())
}

fn list_config(registry: &Registry, out: &mut impl Write) -> Result<()> {
    for entry in registry.config().entries() {
        let name = format!("{}.{}", entry.plugin, entry.key);
        if entry.description.is_empty() {
            writeln!(out, "{name} = {}", entry.effective())?;
        } else {
            writeln!(out, "{name} = {}  # {}", entry.effective(), entry.description)?;
        }
    }
    Ok(())
}
