use clap::{Parser, Subcommand};
use log::{error, info};
use std::path::PathBuf;
use std::time::Instant;

use folio::client::{Backend, HttpBackend};
use folio::code_copy::add_copy_buttons;
use folio::comments::form_request;
use folio::likes::{LikeButton, LikeOutcome};
use folio::models::comment::CommentDraft;
use folio::models::describe_field_errors;
use folio::outline::{OutlineNode, TableOfContents};
use folio::projects::Gallery;
use folio::toast::Toaster;
use folio::{FolioError, PageConfig};

#[derive(Parser)]
#[command(name = "folio")]
#[command(about = "Talk to a blog/portfolio site the way its pages do", version)]
struct Cli {
    /// Page configuration (TOML)
    #[arg(short, long, global = true, value_name = "FILE")]
    config: Option<PathBuf>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Build the table of contents of a post body
    Toc {
        file: PathBuf,

        /// Also print the body with heading ids and code copy buttons filled in
        #[arg(long)]
        html: bool,
    },

    /// List projects, optionally filtered
    Projects {
        #[arg(short, long, default_value = "all")]
        filter: String,

        #[arg(short, long)]
        search: Option<String>,
    },

    /// Toggle the like on a post
    Like {
        /// Post slug; defaults to the configured one
        slug: Option<String>,
    },

    /// Post a comment, or a reply with --parent
    Comment {
        #[arg(short = 'm', long)]
        content: String,

        #[arg(short, long)]
        parent: Option<i64>,

        #[arg(long, default_value = "")]
        name: String,

        #[arg(long, default_value = "")]
        email: String,
    },
}

fn load_config(path: Option<&PathBuf>) -> Result<PageConfig, FolioError> {
    match path {
        Some(p) => PageConfig::load(p),
        None => Ok(PageConfig::default()),
    }
}

fn print_outline(nodes: &[OutlineNode], depth: usize) {
    for node in nodes {
        println!("{}- {} (#{})", "  ".repeat(depth), node.text.trim(), node.id);
        print_outline(&node.children, depth + 1);
    }
}

fn run(cli: Cli) -> Result<(), FolioError> {
    let mut config = load_config(cli.config.as_ref())?;

    match cli.command {
        Commands::Toc { file, html } => {
            let body = std::fs::read_to_string(&file)?;
            match TableOfContents::generate(&body) {
                Some(toc) => {
                    print_outline(&toc.outline().forest(), 0);
                    if html {
                        let (body, blocks) = add_copy_buttons(toc.content());
                        info!("{} code block(s) got a copy button", blocks.len());
                        println!();
                        println!("{}", body);
                    }
                }
                None => println!("No headings (h2-h4) found."),
            }
        }

        Commands::Projects { filter, search } => {
            let backend = HttpBackend::new(&config)?;
            let mut gallery = Gallery::new();
            gallery.load(&backend);
            gallery.set_filter(&filter);
            if let Some(s) = search {
                gallery.set_search(&s);
            }
            if let folio::projects::LoadState::Failed(ref msg) = *gallery.state() {
                return Err(FolioError::Transport(msg.clone()));
            }
            let visible = gallery.visible();
            if visible.is_empty() {
                println!("No projects found");
            }
            for p in visible {
                println!("{:>4}  {:<12}  {}  [{}]", p.id, p.category, p.title, p.technologies.join(", "));
            }
        }

        Commands::Like { slug } => {
            if let Some(s) = slug {
                config.post_slug = Some(s);
            }
            let path = config
                .like_path()
                .ok_or_else(|| FolioError::Config("no post slug given".into()))?;
            let backend = HttpBackend::new(&config)?;
            let mut toaster = Toaster::new();
            // the CLI acts for whoever owns the session cookie
            let mut button = LikeButton::new(path, true, 0, false);
            let outcome = button.click(&backend, config.csrf().as_deref(), &mut toaster, Instant::now());
            if let Some(t) = toaster.last() {
                println!("{}", t.message);
            }
            if let LikeOutcome::Toggled { liked, count } = outcome {
                info!("liked={} count={}", liked, count);
                println!("{} like(s)", count);
            }
        }

        Commands::Comment { content, parent, name, email } => {
            let action = config
                .comment_action()
                .ok_or_else(|| FolioError::Config("no comment action or post slug given".into()))?;
            let backend = HttpBackend::new(&config)?;
            let csrf = config.csrf();
            let request = form_request(
                action,
                csrf.as_deref(),
                &config.session,
                config.post_id,
                CommentDraft { content, name, email },
                parent,
            );
            let resp = backend.post_comment(&request)?;
            match (resp.success, resp.comment, resp.errors) {
                (true, Some(c), _) => println!("Posted comment #{} by {}", c.id, c.author),
                (_, _, Some(errors)) => println!("Error: {}", describe_field_errors(&errors)),
                _ => println!("Failed to post comment. Please try again."),
            }
        }
    }
    Ok(())
}

fn main() {
    env_logger::init();

    let cli = Cli::parse();
    if let Err(e) = run(cli) {
        error!("{}", e);
        eprintln!("error: {}", e);
        std::process::exit(1);
    }
}
