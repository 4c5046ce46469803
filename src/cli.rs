use anyhow::{Context, Result};
use clap::Parser;
use log::{info, warn};
use std::path::PathBuf;

use crate::auth::Token;
use crate::config::Config;
use crate::output::{self, RenderOptions};
use crate::providers::{EnrichOptions, GitLabProvider};

#[derive(Parser, Debug)]
#[command(name = "my-mr")]
#[command(
    author,
    version,
    about = "Lists your open merge requests along with review status and links",
    long_about = "Lists all open merge requests authored by you, along with their review \
                  status and links. With --all, merged (green) and closed (red) merge \
                  requests are listed too."
)]
pub struct Cli {
    /// GitLab token with scope "read_api"
    #[arg(short, long, env = "GITLAB_RO_TOKEN", hide_env_values = true)]
    token: Option<String>,

    /// Also list merged (green) and closed (red) merge requests
    #[arg(short, long, default_value_t = false)]
    all: bool,

    /// GitLab instance base URL [default: https://gitlab.com]
    #[arg(short, long, env = "GITLAB_URL")]
    url: Option<String>,

    /// Path to a configuration file (TOML, JSON or YAML)
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// Maximum number of review-note requests in flight
    #[arg(short = 'j', long, value_parser = clap::value_parser!(u16).range(1..))]
    max_concurrency: Option<u16>,

    /// Show "?" instead of "✘" when the review status could not be fetched
    #[arg(long, default_value_t = false)]
    mark_unknown: bool,
}

/// Effective settings after merging flags, environment and config file.
#[derive(Debug)]
struct Settings {
    base_url: String,
    token: Option<Token>,
    enrich: EnrichOptions,
    render: RenderOptions,
}

impl Cli {
    fn resolve(&self, config: Config) -> Settings {
        let token = self
            .token
            .as_deref()
            .and_then(Token::non_empty)
            .or_else(|| config.gitlab.token.as_deref().and_then(Token::non_empty));

        Settings {
            base_url: self.url.clone().unwrap_or(config.gitlab.base_url),
            token,
            enrich: EnrichOptions {
                all_states: self.all,
                max_concurrency: self
                    .max_concurrency
                    .map(usize::from)
                    .or(config.gitlab.max_concurrency),
            },
            render: RenderOptions {
                mark_unknown: self.mark_unknown || config.output.mark_unknown,
            },
        }
    }

    pub async fn execute(&self) -> Result<()> {
        let config = Config::load(self.config.as_deref())?;
        let settings = self.resolve(config);

        if settings.token.is_none() {
            warn!("No GitLab token provided; set GITLAB_RO_TOKEN or pass --token");
        }

        info!("Listing merge requests from {}", settings.base_url);

        let provider = GitLabProvider::new(&settings.base_url, settings.token.clone())?;
        let report = build_report(&provider, &settings).await?;

        print!("{report}");

        Ok(())
    }
}

async fn build_report(provider: &GitLabProvider, settings: &Settings) -> Result<String> {
    let merge_requests = provider
        .collect_merge_requests(settings.enrich)
        .await
        .context("Failed to get merge requests")?;

    Ok(output::render(merge_requests, settings.render))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::GitLabConfig;
    use mockito::Matcher;

    fn settings(base_url: &str, all_states: bool) -> Settings {
        Settings {
            base_url: base_url.to_string(),
            token: Some(Token::from("glpat-e2e")),
            enrich: EnrichOptions {
                all_states,
                max_concurrency: None,
            },
            render: RenderOptions::default(),
        }
    }

    #[test]
    fn test_cli_flags() {
        let cli = Cli::try_parse_from(["my-mr", "-a", "-t", "glpat-flag", "-j", "4"]).unwrap();
        assert!(cli.all);
        assert_eq!(cli.token.as_deref(), Some("glpat-flag"));
        assert_eq!(cli.max_concurrency, Some(4));
    }

    #[test]
    fn test_cli_rejects_positional_arguments() {
        assert!(Cli::try_parse_from(["my-mr", "extra"]).is_err());
    }

    #[test]
    fn test_cli_rejects_zero_concurrency() {
        assert!(Cli::try_parse_from(["my-mr", "-j", "0"]).is_err());
    }

    #[test]
    fn test_help_is_reported_as_display_help() {
        let err = Cli::try_parse_from(["my-mr", "-h"]).unwrap_err();
        assert_eq!(err.kind(), clap::error::ErrorKind::DisplayHelp);
    }

    #[test]
    fn test_flags_override_config_file() {
        let cli = Cli::try_parse_from([
            "my-mr",
            "--token",
            "glpat-flag",
            "--url",
            "https://flag.example.com",
        ])
        .unwrap();
        let config = Config {
            gitlab: GitLabConfig {
                token: Some("glpat-file".to_string()),
                base_url: "https://file.example.com".to_string(),
                max_concurrency: Some(3),
            },
            ..Config::default()
        };

        let settings = cli.resolve(config);

        assert_eq!(settings.token, Some(Token::from("glpat-flag")));
        assert_eq!(settings.base_url, "https://flag.example.com");
        assert_eq!(settings.enrich.max_concurrency, Some(3));
        assert!(!settings.enrich.all_states);
    }

    #[test]
    fn test_blank_token_falls_back_to_config() {
        let cli = Cli::try_parse_from(["my-mr", "--token", ""]).unwrap();
        let mut config = Config::default();
        config.gitlab.token = Some("glpat-file".to_string());

        let settings = cli.resolve(config);

        assert_eq!(settings.token, Some(Token::from("glpat-file")));
    }

    #[tokio::test]
    async fn test_report_end_to_end() {
        let mut server = mockito::Server::new_async().await;
        let list = server
            .mock("GET", "/api/v4/merge_requests")
            .match_query(Matcher::UrlEncoded("state".into(), "opened".into()))
            .match_header("authorization", "Bearer glpat-e2e")
            .with_status(200)
            .with_body(
                r#"[
                    {"iid": 2, "project_id": 10, "title": "Older change", "state": "opened",
                     "created_at": "2024-01-01T08:00:00.000Z",
                     "web_url": "https://gitlab.com/acme/app/-/merge_requests/2"},
                    {"iid": 1, "project_id": 10, "title": "Newer change", "state": "opened",
                     "created_at": "2024-01-02T08:00:00.000Z",
                     "web_url": "https://gitlab.com/acme/app/-/merge_requests/1"}
                ]"#,
            )
            .create_async()
            .await;
        server
            .mock("GET", "/api/v4/projects/10/merge_requests/1/notes")
            .with_status(200)
            .with_body(r#"[{"body": "Alex approved this merge request"}]"#)
            .create_async()
            .await;
        server
            .mock("GET", "/api/v4/projects/10/merge_requests/2/notes")
            .with_status(200)
            .with_body("[]")
            .create_async()
            .await;

        let settings = settings(&server.url(), false);
        let provider = GitLabProvider::new(&settings.base_url, settings.token.clone()).unwrap();

        let report = build_report(&provider, &settings).await.unwrap();
        list.assert_async().await;

        let lines: Vec<&str> = report.lines().collect();
        assert_eq!(lines.len(), 5);
        assert_eq!(lines[0], "Your merge requests:");
        assert_eq!(lines[1], "=====");
        assert!(lines[2].starts_with("1: Newer change [ review: "));
        assert!(lines[2].contains('✔'));
        assert!(lines[3].starts_with("2: Older change [ review: "));
        assert!(lines[3].contains('✘'));
        assert_eq!(lines[4], "=====");
    }

    #[tokio::test]
    async fn test_report_survives_single_notes_failure() {
        let mut server = mockito::Server::new_async().await;
        server
            .mock("GET", "/api/v4/merge_requests")
            .with_status(200)
            .with_body(
                r#"[
                    {"iid": 1, "project_id": 5, "title": "A", "state": "merged",
                     "created_at": "2024-05-01T00:00:00.000Z", "web_url": "https://x/1"},
                    {"iid": 2, "project_id": 5, "title": "B", "state": "opened",
                     "created_at": "2024-04-01T00:00:00.000Z", "web_url": "https://x/2"}
                ]"#,
            )
            .create_async()
            .await;
        server
            .mock("GET", "/api/v4/projects/5/merge_requests/1/notes")
            .with_status(404)
            .create_async()
            .await;
        server
            .mock("GET", "/api/v4/projects/5/merge_requests/2/notes")
            .with_status(200)
            .with_body(r#"[{"body": "Kim approved this merge request"}]"#)
            .create_async()
            .await;

        let settings = settings(&server.url(), true);
        let provider = GitLabProvider::new(&settings.base_url, settings.token.clone()).unwrap();

        let report = build_report(&provider, &settings).await.unwrap();

        let lines: Vec<&str> = report.lines().collect();
        assert_eq!(lines.len(), 5);
        assert!(lines[2].contains('✘'));
        assert!(lines[3].contains('✔'));
    }

    #[tokio::test]
    async fn test_report_fails_without_partial_output_when_list_fails() {
        let mut server = mockito::Server::new_async().await;
        server
            .mock("GET", "/api/v4/merge_requests")
            .match_query(Matcher::Any)
            .with_status(401)
            .create_async()
            .await;

        let settings = settings(&server.url(), false);
        let provider = GitLabProvider::new(&settings.base_url, settings.token.clone()).unwrap();

        let err = build_report(&provider, &settings).await.unwrap_err();
        assert!(err.to_string().contains("Failed to get merge requests"));
    }
}
