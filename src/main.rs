use clap::{Parser, Subcommand};
use mdsite::{config, generate, output, render, scan, serve, tree};
use std::path::PathBuf;

fn version_string() -> &'static str {
    let on_tag = env!("ON_RELEASE_TAG");
    if on_tag == "true" {
        env!("CARGO_PKG_VERSION")
    } else {
        let hash = env!("GIT_HASH");
        if hash.is_empty() {
            "dev@unknown"
        } else {
            // Leaked once at startup — trivial, called exactly once
            Box::leak(format!("dev@{hash}").into_boxed_str())
        }
    }
}

#[derive(Parser)]
#[command(name = "mdsite")]
#[command(about = "Static site generator for Markdown documentation trees")]
#[command(long_about = "\
Static site generator for Markdown documentation trees

Your filesystem is the site structure. Directories become sections,
index.md files are section landing pages, and every other .md file is a
page under its directory's index.

Content structure:

  docs/
  ├── site.toml                    # Site config (optional)
  ├── index.md                     # Site root
  ├── about.md                     # Child of index.md
  ├── layouts/                     # Tera templates (default.html, ...)
  ├── stylesheets/
  │   ├── main.scss                # Compiled to stylesheets/main.css
  │   └── _mixins.scss             # Underscore prefix = not built directly
  ├── images/logo.png              # Copied verbatim
  └── guide/
      ├── index.md                 # Section page; may declare children: [b, a]
      └── setup.md                 # Child of guide/index.md

Navigation is computed globally: every page gets parent, children,
ancestors, and previous/next links over one depth-first reading order.
Front matter 'children' lists reorder or subset a section; naming a page
that does not exist fails the build.")]
#[command(version = version_string())]
struct Cli {
    /// Source directory
    #[arg(long, default_value = "docs", global = true)]
    source: PathBuf,

    /// Output directory
    #[arg(long, default_value = "_site", global = true)]
    output: PathBuf,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// Build the site: scan, link the tree, render everything
    Build,
    /// Validate the source tree and print the computed site structure
    Check,
    /// Serve a previously built output directory
    Serve {
        /// Bind address (overrides site.toml)
        #[arg(long)]
        host: Option<String>,
        /// Port (overrides site.toml)
        #[arg(long)]
        port: Option<u16>,
    },
}

fn main() -> Result<(), Box<dyn std::error::Error>> {
    let cli = Cli::parse();

    match cli.command {
        Command::Build => {
            let site_config = config::load_config(&cli.source)?;

            println!("==> Scanning {}", cli.source.display());
            let scan::ScanResult {
                pages,
                stylesheets,
                assets,
            } = scan::scan(&cli.source, &site_config)?;

            let site = tree::link(pages)?;

            println!("==> Generating {} pages \u{2192} {}", site.len(), cli.output.display());
            let renderer = render::Renderer::from_dir(&cli.source.join(&site_config.layouts))?;
            let summary = generate::generate(
                &cli.source,
                &cli.output,
                &site,
                &renderer,
                &stylesheets,
                &assets,
            )?;
            output::print_build_output(&site, &summary);

            println!("==> Build complete: {}", cli.output.display());
        }
        Command::Check => {
            let site_config = config::load_config(&cli.source)?;
            println!("==> Checking {}", cli.source.display());
            let scanned = scan::scan(&cli.source, &site_config)?;
            let site = tree::link(scanned.pages)?;
            output::print_site_tree(&site);
            println!("==> Site structure is valid");
        }
        Command::Serve { host, port } => {
            let site_config = config::load_config(&cli.source)?;
            let host = host.unwrap_or(site_config.serve.host);
            let port = port.unwrap_or(site_config.serve.port);
            println!(
                "Serving {} at http://{}:{}",
                cli.output.display(),
                host,
                port
            );
            let runtime = tokio::runtime::Runtime::new()?;
            runtime.block_on(serve::serve(cli.output, &host, port))?;
        }
    }

    Ok(())
}
