use std::{path::PathBuf, sync::Arc};

use anyhow::{bail, Context, Result};
use clap::{Parser, Subcommand};
use client_core::{
    config::DEFAULT_CONFIG_FILE, load_settings, ContactPage, HttpTransport, PageSnapshot,
    ViewEvent,
};
use shared::domain::Field;
use tokio::sync::mpsc;
use tracing_subscriber::EnvFilter;

#[derive(Parser, Debug)]
struct Args {
    /// Overrides the API base URL from config and environment.
    #[arg(long)]
    api_base_url: Option<String>,
    #[arg(long, default_value = DEFAULT_CONFIG_FILE)]
    config: PathBuf,
    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Load the first page of posts and print them.
    Posts,
    /// Fill in the contact form, submit it and print the resulting page state.
    Submit {
        #[arg(long, default_value = "")]
        name: String,
        #[arg(long, default_value = "")]
        email: String,
        #[arg(long, default_value = "")]
        message: String,
    },
}

#[tokio::main]
async fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .init();
    let args = Args::parse();

    let mut settings = load_settings(&args.config);
    if let Some(url) = args.api_base_url {
        settings = settings.with_api_base_url(url);
    }
    tracing::debug!(api_base_url = %settings.api_base_url, "settings loaded");

    let transport = Arc::new(HttpTransport::new(settings.api_base_url.clone()));
    let mut page = ContactPage::new(transport, &settings);

    match args.command {
        Command::Posts => {
            page.settle().await;
            let snapshot = page.snapshot();
            ensure_loaded(&snapshot)?;
            for post in &snapshot.posts {
                println!("#{} {}", post.id.0, post.title);
            }
        }
        Command::Submit {
            name,
            email,
            message,
        } => {
            let (tx, rx) = mpsc::channel(8);
            for (field, value) in [
                (Field::Name, name),
                (Field::Email, email),
                (Field::Message, message),
            ] {
                tx.send(ViewEvent::FieldChanged { field, value })
                    .await
                    .context("page stopped accepting events")?;
                tx.send(ViewEvent::FieldTouched { field })
                    .await
                    .context("page stopped accepting events")?;
            }
            tx.send(ViewEvent::SubmitClicked)
                .await
                .context("page stopped accepting events")?;
            drop(tx);

            let snapshot = page.run(rx).await;
            println!("{}", serde_json::to_string_pretty(&snapshot)?);
            ensure_submitted(&snapshot)?;
        }
    }

    Ok(())
}

fn ensure_loaded(snapshot: &PageSnapshot) -> Result<()> {
    if let Some(err) = &snapshot.load_error {
        bail!("{err}");
    }
    Ok(())
}

fn ensure_submitted(snapshot: &PageSnapshot) -> Result<()> {
    if !snapshot.submit_success {
        match &snapshot.submit_error {
            Some(err) => bail!("contact form was not submitted: {err}"),
            None => bail!("contact form was not submitted"),
        }
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn snapshot() -> PageSnapshot {
        PageSnapshot {
            submitted: false,
            submit_success: false,
            fields: Vec::new(),
            loading: false,
            posts: Vec::new(),
            load_error: None,
            submit_error: None,
        }
    }

    #[test]
    fn load_error_fails_posts_command() {
        assert!(ensure_loaded(&snapshot()).is_ok());

        let failed = PageSnapshot {
            load_error: Some("Failed to load posts.".into()),
            ..snapshot()
        };
        let err = ensure_loaded(&failed).expect_err("must fail");
        assert_eq!(err.to_string(), "Failed to load posts.");
    }

    #[test]
    fn submit_command_fails_unless_submission_succeeded() {
        let invalid = PageSnapshot {
            submitted: true,
            ..snapshot()
        };
        assert_eq!(
            ensure_submitted(&invalid).expect_err("must fail").to_string(),
            "contact form was not submitted"
        );

        let rejected = PageSnapshot {
            submit_error: Some("Submission failed. Please try again.".into()),
            ..snapshot()
        };
        assert!(ensure_submitted(&rejected)
            .expect_err("must fail")
            .to_string()
            .contains("Submission failed"));

        let accepted = PageSnapshot {
            submit_success: true,
            ..snapshot()
        };
        assert!(ensure_submitted(&accepted).is_ok());
    }

    #[test]
    fn submit_command_accepts_field_flags() {
        let args = Args::try_parse_from([
            "contact_cli",
            "--api-base-url",
            "http://127.0.0.1:9",
            "submit",
            "--name",
            "Alice",
            "--email",
            "a@b.com",
        ])
        .expect("parse");
        assert_eq!(args.api_base_url.as_deref(), Some("http://127.0.0.1:9"));
        assert_eq!(args.config, PathBuf::from(DEFAULT_CONFIG_FILE));
        match args.command {
            Command::Submit {
                name,
                email,
                message,
            } => {
                assert_eq!(name, "Alice");
                assert_eq!(email, "a@b.com");
                assert!(message.is_empty());
            }
            Command::Posts => panic!("expected submit"),
        }
    }
}
