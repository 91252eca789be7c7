//! Sitegen - view generated project files with syntax highlighting.
//!
//! Usage: sitegen <PROJECT_JSON> [FILE] [--theme dark|light] [--fragment] [--list] [--history]
//!
//! `PROJECT_JSON` is a generator response (`{"files": [...]}`), optionally
//! wrapped in a markdown code fence.

use anyhow::{bail, Context, Result};
use sitegen_core::{parse_generation_response, Theme, ViewTab, Workspace};
use std::env;
use std::fs;
use std::process::ExitCode;

const USAGE: &str =
    "Usage: sitegen <PROJECT_JSON> [FILE] [--theme dark|light] [--fragment] [--list] [--history]";

/// What to print.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Mode {
    /// Standalone HTML page with the theme stylesheet.
    Page,
    /// Only the highlighted `<pre>` block.
    Fragment,
    /// Files in the project.
    List,
    /// Saved versions of the selected file.
    History,
}

#[derive(Debug)]
struct Options {
    project_path: String,
    file: Option<String>,
    theme: Theme,
    mode: Mode,
}

fn parse_args(args: &[String]) -> Result<Options> {
    let mut positional = Vec::new();
    let mut theme = Theme::default();
    let mut mode = Mode::Page;

    let mut iter = args.iter();
    while let Some(arg) = iter.next() {
        match arg.as_str() {
            "--theme" => {
                let name = iter.next().context("--theme needs a value")?;
                theme = Theme::by_name(name).with_context(|| format!("unknown theme '{}'", name))?;
            }
            "--fragment" => mode = Mode::Fragment,
            "--list" => mode = Mode::List,
            "--history" => mode = Mode::History,
            flag if flag.starts_with("--") => bail!("unknown option '{}'", flag),
            _ => positional.push(arg.clone()),
        }
    }

    let mut positional = positional.into_iter();
    let project_path = positional.next().context(USAGE)?;
    let file = positional.next();
    if positional.next().is_some() {
        bail!("too many arguments\n{}", USAGE);
    }

    Ok(Options {
        project_path,
        file,
        theme,
        mode,
    })
}

fn load_workspace(path: &str) -> Result<Workspace> {
    let text = fs::read_to_string(path).with_context(|| format!("failed to read '{}'", path))?;
    let files = parse_generation_response(&text)
        .with_context(|| format!("failed to parse project '{}'", path))?;

    let mut workspace = Workspace::new();
    workspace.finish_generation(files, None)?;
    Ok(workspace)
}

fn select(workspace: &mut Workspace, file: &str) -> Result<()> {
    if let Err(e) = workspace.try_select_file(file) {
        let known: Vec<&str> = workspace.project().filenames().collect();
        bail!("{} (project has: {})", e, known.join(", "));
    }
    Ok(())
}

fn render_page(workspace: &mut Workspace, theme: &Theme, fragment: bool) -> Result<String> {
    let title = workspace
        .selected_filename()
        .map(str::to_string)
        .context("project has no files")?;
    let body = workspace.highlighted_view().unwrap_or_default();
    let block = format!("<pre class=\"code\"><code>{}</code></pre>", body);
    if fragment {
        return Ok(block);
    }

    Ok(format!(
        "<!DOCTYPE html>\n<html>\n<head>\n<meta charset=\"utf-8\">\n<title>{}</title>\n<style>\n{}</style>\n</head>\n<body>\n{}\n</body>\n</html>\n",
        sitegen_core::syntax::escape_html(&title),
        theme.stylesheet(),
        block
    ))
}

fn run(options: Options) -> Result<()> {
    let mut workspace = load_workspace(&options.project_path)?;
    log::info!("Loaded {} files from {}", workspace.project().len(), options.project_path);

    if let Some(file) = &options.file {
        select(&mut workspace, file)?;
    } else {
        workspace.try_switch_tab(ViewTab::Code);
    }

    match options.mode {
        Mode::List => {
            for file in workspace.project().files() {
                println!(
                    "{}\t{}\t{} bytes",
                    file.filename(),
                    file.language().tag(),
                    file.content().len()
                );
            }
        }
        Mode::History => {
            let file = workspace.selected_file().context("project has no files")?;
            if file.history().is_empty() {
                println!("{}: no saved versions", file.filename());
            }
            for version in file.history() {
                println!("{}\t{}\t{}", version.id, version.timestamp.to_rfc3339(), version.label);
            }
        }
        Mode::Page | Mode::Fragment => {
            let page = render_page(&mut workspace, &options.theme, options.mode == Mode::Fragment)?;
            print!("{}", page);
        }
    }
    Ok(())
}

fn main() -> ExitCode {
    // Initialize logging
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    let args: Vec<String> = env::args().skip(1).collect();
    let options = match parse_args(&args) {
        Ok(options) => options,
        Err(e) => {
            log::error!("{:#}", e);
            return ExitCode::from(2);
        }
    };

    match run(options) {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            log::error!("{:#}", e);
            ExitCode::FAILURE
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use sitegen_core::{Language, ProjectFile};

    fn args(list: &[&str]) -> Vec<String> {
        list.iter().map(|s| s.to_string()).collect()
    }

    #[test]
    fn test_parse_args() {
        let options = parse_args(&args(&["project.json", "script.js", "--theme", "light", "--fragment"])).unwrap();
        assert_eq!(options.project_path, "project.json");
        assert_eq!(options.file.as_deref(), Some("script.js"));
        assert_eq!(options.theme.name, "Light");
        assert_eq!(options.mode, Mode::Fragment);
    }

    #[test]
    fn test_parse_args_errors() {
        assert!(parse_args(&[]).is_err());
        assert!(parse_args(&args(&["p.json", "--theme"])).is_err());
        assert!(parse_args(&args(&["p.json", "--theme", "neon"])).is_err());
        assert!(parse_args(&args(&["p.json", "--verbose"])).is_err());
        assert!(parse_args(&args(&["a", "b", "c"])).is_err());
    }

    #[test]
    fn test_render_page() {
        let mut workspace = Workspace::new();
        workspace
            .finish_generation(vec![ProjectFile::new("index.html", Language::Html, "<b>x</b>")], None)
            .unwrap();

        let fragment = render_page(&mut workspace, &Theme::dark(), true).unwrap();
        assert!(fragment.starts_with("<pre class=\"code\"><code>&lt;<span class=\"token-tag\">b</span>"));

        let page = render_page(&mut workspace, &Theme::dark(), false).unwrap();
        assert!(page.contains("<title>index.html</title>"));
        assert!(page.contains(".token-tag"));
    }

    #[test]
    fn test_select_unknown_file_lists_project() {
        let mut workspace = Workspace::new();
        workspace
            .finish_generation(
                vec![
                    ProjectFile::new("index.html", Language::Html, ""),
                    ProjectFile::new("app.js", Language::JavaScript, ""),
                ],
                None,
            )
            .unwrap();

        let err = select(&mut workspace, "missing.css").unwrap_err().to_string();
        assert!(err.contains("missing.css"));
        assert!(err.ends_with("(project has: index.html, app.js)"));

        select(&mut workspace, "app.js").unwrap();
        assert_eq!(workspace.selected_filename(), Some("app.js"));
    }

    #[test]
    fn test_render_empty_project() {
        let mut workspace = Workspace::new();
        assert!(render_page(&mut workspace, &Theme::dark(), true).is_err());
    }
}
