//! `atomcss` - atomize a stylesheet from the command line.
//!
//! ```text
//! atomcss styles.css --uglify --output atomic.css --class-map classes.json
//! cat styles.css | atomcss --json
//! ```
//!
//! Diagnostics are printed to stderr as they are reported unless `--quiet` is
//! given. Progress logging goes through `env_logger` (`RUST_LOG=atomcss=debug`).

use std::fs;
use std::io::{self, Read, Write};
use std::path::{Path, PathBuf};

use anyhow::{bail, Context, Result};
use atomcss::{atomize, AtomizeOutput, Config, Options};
use clap::Parser;
use console::style;

/// Rewrite a stylesheet into single-declaration atomic classes.
#[derive(Debug, Parser)]
#[command(name = "atomcss", version)]
struct Cli {
    /// CSS file to atomize. Reads stdin when absent or `-`.
    input: Option<PathBuf>,

    /// Replace generated class names with short tokens (.rp__0, .rp__1, ...)
    #[arg(short, long)]
    uglify: bool,

    /// Do not print diagnostics
    #[arg(short, long)]
    quiet: bool,

    /// YAML config file with `uglify` and `verbose` keys
    #[arg(short, long, value_name = "FILE")]
    config: Option<PathBuf>,

    /// Write the atomized CSS here instead of stdout
    #[arg(short, long, value_name = "FILE")]
    output: Option<PathBuf>,

    /// Write the class map as JSON to this file
    #[arg(long, value_name = "FILE")]
    class_map: Option<PathBuf>,

    /// Print the full result (class map, CSS, diagnostics) as JSON
    #[arg(long)]
    json: bool,
}

fn main() -> Result<()> {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("warn")).init();
    run(&Cli::parse())
}

fn run(cli: &Cli) -> Result<()> {
    let css = read_input(cli.input.as_deref())?;
    let options = build_options(cli, css)?;
    let output = atomize(options);
    log::debug!(
        "{} selectors mapped, {} diagnostics",
        output.class_map.len(),
        output.style_errors.len()
    );

    if cli.json {
        write_text(None, &serde_json::to_string_pretty(&output)?)?;
    }
    if output.is_failure() {
        bail!("could not atomize {}", input_label(cli.input.as_deref()));
    }
    if !cli.json {
        write_output(cli, &output)?;
    }
    Ok(())
}

fn is_stdin(path: Option<&Path>) -> bool {
    path.map_or(true, |path| path == Path::new("-"))
}

fn input_label(path: Option<&Path>) -> String {
    match path {
        Some(path) if !is_stdin(Some(path)) => path.display().to_string(),
        _ => "stdin".to_string(),
    }
}

fn read_input(path: Option<&Path>) -> Result<String> {
    match path {
        Some(path) if !is_stdin(Some(path)) => fs::read_to_string(path)
            .with_context(|| format!("failed to read {}", path.display())),
        _ => {
            let mut buffer = String::new();
            io::stdin()
                .read_to_string(&mut buffer)
                .context("failed to read stdin")?;
            Ok(buffer)
        }
    }
}

/// Layers defaults, the config file and command-line flags, in that order.
fn build_options(cli: &Cli, css: String) -> Result<Options> {
    let mut options = Options::new().input(css);
    if let Some(path) = &cli.config {
        let config = Config::from_file(path)
            .with_context(|| format!("failed to load config {}", path.display()))?;
        options = config.apply(options);
    }
    if cli.uglify {
        options = options.uglify(true);
    }
    if cli.quiet {
        options = options.verbose(false);
    }
    Ok(options.custom_logger(print_diagnostic))
}

fn print_diagnostic(message: &str, detail: Option<&str>) {
    eprintln!("{} {}", style("atomcss:").yellow().bold(), message);
    if let Some(detail) = detail {
        eprintln!("    {}", style(detail).dim());
    }
}

fn write_output(cli: &Cli, output: &AtomizeOutput) -> Result<()> {
    write_text(cli.output.as_deref(), &output.atomized_css)?;
    if let Some(path) = &cli.class_map {
        let json = serde_json::to_string_pretty(&output.class_map)?;
        write_text(Some(path), &json)?;
    }
    Ok(())
}

fn write_text(path: Option<&Path>, text: &str) -> Result<()> {
    let text = if text.is_empty() {
        String::new()
    } else {
        format!("{}\n", text)
    };
    match path {
        Some(path) => {
            fs::write(path, text).with_context(|| format!("failed to write {}", path.display()))
        }
        None => {
            io::stdout()
                .lock()
                .write_all(text.as_bytes())
                .context("failed to write stdout")?;
            Ok(())
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::CommandFactory;

    fn parse(args: &[&str]) -> Cli {
        Cli::try_parse_from(std::iter::once("atomcss").chain(args.iter().copied())).unwrap()
    }

    #[test]
    fn test_cli_definition() {
        Cli::command().debug_assert();
    }

    #[test]
    fn test_parse_flags() {
        let cli = parse(&[
            "styles.css",
            "--uglify",
            "-q",
            "--output",
            "out.css",
            "--class-map",
            "map.json",
        ]);
        assert_eq!(cli.input, Some(PathBuf::from("styles.css")));
        assert!(cli.uglify);
        assert!(cli.quiet);
        assert_eq!(cli.output, Some(PathBuf::from("out.css")));
        assert_eq!(cli.class_map, Some(PathBuf::from("map.json")));
        assert!(!cli.json);
    }

    #[test]
    fn test_stdin_detection() {
        assert!(is_stdin(None));
        assert!(is_stdin(Some(Path::new("-"))));
        assert!(!is_stdin(Some(Path::new("a.css"))));
        assert_eq!(input_label(Some(Path::new("-"))), "stdin");
        assert_eq!(input_label(Some(Path::new("a.css"))), "a.css");
    }

    #[test]
    fn test_flags_override_config() {
        let mut config = tempfile::NamedTempFile::new().unwrap();
        writeln!(config, "uglify: false\nverbose: true").unwrap();
        let path = config.path().to_str().unwrap().to_string();

        let cli = parse(&["--config", &path, "--uglify", "--quiet"]);
        let options = build_options(&cli, ".a { top: 0; }".to_string()).unwrap();
        assert!(options.is_uglify());
        assert!(!options.is_verbose());
        assert_eq!(options.input_text(), Some(".a { top: 0; }"));
    }

    #[test]
    fn test_config_applies_without_flags() {
        let mut config = tempfile::NamedTempFile::new().unwrap();
        writeln!(config, "uglify: true").unwrap();
        let path = config.path().to_str().unwrap().to_string();

        let cli = parse(&["--config", &path]);
        let options = build_options(&cli, String::new()).unwrap();
        assert!(options.is_uglify());
        assert!(options.is_verbose());
    }

    #[test]
    fn test_missing_config_is_an_error() {
        let cli = parse(&["--config", "/nonexistent/atomcss.yaml"]);
        let err = build_options(&cli, String::new()).unwrap_err();
        assert!(err.to_string().contains("failed to load config"));
    }

    #[test]
    fn test_run_writes_css_and_class_map() {
        let dir = tempfile::tempdir().unwrap();
        let input = dir.path().join("in.css");
        let css_out = dir.path().join("out.css");
        let map_out = dir.path().join("map.json");
        fs::write(&input, ".example { padding: 10px; margin: 10px; }").unwrap();

        let cli = parse(&[
            input.to_str().unwrap(),
            "--uglify",
            "--quiet",
            "--output",
            css_out.to_str().unwrap(),
            "--class-map",
            map_out.to_str().unwrap(),
        ]);
        run(&cli).unwrap();

        assert_eq!(
            fs::read_to_string(&css_out).unwrap(),
            ".rp__0 {\n  padding: 10px;\n}\n.rp__1 {\n  margin: 10px;\n}\n"
        );
        let map: serde_json::Value =
            serde_json::from_str(&fs::read_to_string(&map_out).unwrap()).unwrap();
        assert_eq!(map, serde_json::json!({ ".example": [".rp__0", ".rp__1"] }));
    }

    #[test]
    fn test_run_fails_on_broken_css() {
        let dir = tempfile::tempdir().unwrap();
        let input = dir.path().join("broken.css");
        let css_out = dir.path().join("out.css");
        fs::write(&input, ".dog { .cow { background: 13px ]").unwrap();

        let cli = parse(&[
            input.to_str().unwrap(),
            "--quiet",
            "--output",
            css_out.to_str().unwrap(),
        ]);
        let err = run(&cli).unwrap_err();
        assert!(err.to_string().starts_with("could not atomize"));
        assert!(!css_out.exists());
    }
}
