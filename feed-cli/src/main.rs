use std::fmt::Write as _;
use std::path::PathBuf;
use std::process;

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use feed_client::session::{FileSessionStorage, Identity, SessionContext};
use feed_client::{AuthResponse, FeedClient, FeedClientError, Post};

const DEFAULT_SERVER: &str = "http://127.0.0.1:4000";
const DEFAULT_SESSION_FILE: &str = ".feed_session";

#[derive(Debug, Parser)]
#[command(name = "feed-cli", version, about = "Terminal client for feed-server")]
struct Cli {
    /// Server address.
    #[arg(long, global = true, env = "FEED_API_URL", default_value = DEFAULT_SERVER)]
    server: String,

    /// File that keeps the signed-in user between runs.
    #[arg(long, global = true, default_value = DEFAULT_SESSION_FILE)]
    session_file: PathBuf,

    #[command(subcommand)]
    command: Command,
}

#[derive(Debug, Subcommand)]
enum Command {
    /// Create an account and sign in.
    Signup {
        #[arg(long)]
        username: String,
        #[arg(long)]
        email: String,
        #[arg(long)]
        password: String,
    },
    /// Sign in.
    Login {
        #[arg(long)]
        email: String,
        #[arg(long)]
        password: String,
    },
    /// Forget the saved session.
    Logout,
    /// Show who is signed in.
    Whoami,
    /// List posts, newest first.
    Feed,
    /// Publish a post with text, an image URL, or both.
    Post {
        #[arg(long)]
        text: Option<String>,
        #[arg(long)]
        image_url: Option<String>,
    },
    /// Like a post, or take the like back.
    Like {
        #[arg(long)]
        id: i64,
    },
    /// Comment on a post.
    Comment {
        #[arg(long)]
        id: i64,
        #[arg(long)]
        text: String,
    },
    /// Delete one of your posts.
    Delete {
        #[arg(long)]
        id: i64,
    },
}

#[tokio::main]
async fn main() {
    dotenvy::dotenv().ok();

    if let Err(err) = run(Cli::parse()).await {
        eprintln!("{err:#}");
        process::exit(1);
    }
}

async fn run(cli: Cli) -> Result<()> {
    let mut client = FeedClient::new(normalize_server(cli.server))
        .map_err(failed("create HTTP client"))?;
    let mut session = SessionContext::restore(FileSessionStorage::new(cli.session_file))
        .map_err(failed("read session"))?;

    if let Some(token) = session.token() {
        client.set_token(token);
    }
    let viewer = session.identity().map(|identity| identity.id);

    match cli.command {
        Command::Signup {
            username,
            email,
            password,
        } => {
            let auth = client
                .signup(&username, &email, &password)
                .await
                .map_err(failed("sign up"))?;
            remember(&mut session, &auth)?;
            print_auth(&auth);
        }
        Command::Login { email, password } => {
            let auth = client
                .login(&email, &password)
                .await
                .map_err(failed("log in"))?;
            remember(&mut session, &auth)?;
            print_auth(&auth);
        }
        Command::Logout => {
            session.logout().map_err(failed("log out"))?;
            println!("Logged out");
        }
        Command::Whoami => match session.identity() {
            Some(identity) => println!("{} (id={})", identity.username, identity.id),
            None => println!("Not logged in"),
        },
        Command::Feed => {
            let posts = client.list_posts().await.map_err(failed("load posts"))?;
            if posts.is_empty() {
                println!("No posts yet");
            }
            for post in &posts {
                println!("{}", format_post(post, viewer));
            }
        }
        Command::Post { text, image_url } => {
            let post = client
                .create_post(text.as_deref(), image_url.as_deref())
                .await
                .map_err(failed("create post"))?;
            println!("{}", format_post(&post, viewer));
        }
        Command::Like { id } => {
            let post = client.toggle_like(id).await.map_err(failed("like post"))?;
            println!("{}", format_post(&post, viewer));
        }
        Command::Comment { id, text } => {
            let post = client
                .add_comment(id, &text)
                .await
                .map_err(failed("add comment"))?;
            println!("{}", format_post(&post, viewer));
        }
        Command::Delete { id } => {
            let message = client
                .delete_post(id)
                .await
                .map_err(failed("delete post"))?;
            println!("{message}");
        }
    }

    Ok(())
}

fn normalize_server(server: String) -> String {
    if server.starts_with("http://") || server.starts_with("https://") {
        return server;
    }

    format!("http://{server}")
}

fn remember(session: &mut SessionContext<FileSessionStorage>, auth: &AuthResponse) -> Result<()> {
    session
        .login(Identity::from(auth.clone()))
        .map_err(failed("save session"))
}

fn failed(action: &'static str) -> impl FnOnce(FeedClientError) -> anyhow::Error {
    move |err| describe(err).context(format!("Failed to {action}"))
}

fn describe(err: FeedClientError) -> anyhow::Error {
    let message = match err {
        FeedClientError::Unauthorized => {
            "not logged in: run `feed-cli login ...` or `feed-cli signup ...`".to_string()
        }
        FeedClientError::NotFound => "post not found".to_string(),
        FeedClientError::Forbidden(message) | FeedClientError::InvalidRequest(message) => message,
        FeedClientError::Http(err) => format!("server unreachable: {err}"),
        FeedClientError::Session(err) => format!("session file: {err}"),
    };
    anyhow::anyhow!(message)
}

fn print_auth(auth: &AuthResponse) {
    println!("{}", auth.message);
    println!("user: {} (id={})", auth.user.username, auth.user.id);
}

fn format_post(post: &Post, viewer: Option<i64>) -> String {
    let mut out = format!(
        "[{}] {} at {}",
        post.id,
        post.author_name,
        post.created_at.format("%Y-%m-%d %H:%M")
    );
    if let Some(text) = &post.text {
        let _ = write!(out, "\n  {text}");
    }
    if let Some(image_url) = &post.image_url {
        let _ = write!(out, "\n  image: {image_url}");
    }

    let liked = viewer.is_some_and(|id| post.is_liked_by(id));
    let _ = write!(
        out,
        "\n  likes: {}{}",
        post.likes.len(),
        if liked { " (you like this)" } else { "" }
    );
    for comment in &post.comments {
        let _ = write!(out, "\n  > {}: {}", comment.username, comment.text);
    }
    out
}
