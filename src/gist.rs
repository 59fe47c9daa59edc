use std::collections::BTreeMap;

use reqwest::blocking::Client;
use reqwest::header::ACCEPT;
use serde::{Deserialize, Serialize};

use crate::error::{Error, Result};

/// Substring embedded in every description this tool writes; prune only
/// touches gists whose description contains it.
pub const MARKER: &str = "[gistup]";

const GITHUB_API: &str = "https://api.github.com";
const GITHUB_ACCEPT: &str = "application/vnd.github+json";

/// Blocking client for the gists API. Holds the bearer token so no request
/// method reads the environment.
pub struct GistClient {
    client: Client,
    base_url: String,
    token: String,
}

#[derive(Serialize)]
struct CreatePayload<'a> {
    public: bool,
    description: &'a str,
    files: BTreeMap<&'a str, FilePayload<'a>>,
}

#[derive(Serialize)]
struct FilePayload<'a> {
    content: &'a str,
}

#[derive(Debug, Deserialize)]
pub struct Gist {
    pub html_url: String,
    pub files: BTreeMap<String, GistFile>,
}

#[derive(Debug, Deserialize)]
pub struct GistFile {
    pub raw_url: String,
}

/// One entry from the list endpoint. The API reports null descriptions for
/// gists created without one.
#[derive(Debug, Deserialize)]
pub struct GistSummary {
    pub id: String,
    pub description: Option<String>,
}

#[derive(Debug, Default)]
pub struct PruneOutcome {
    pub deleted: Vec<String>,
    pub failed: Vec<String>,
}

impl GistClient {
    /// Builds a client for the public GitHub API, taking the bearer token
    /// from `GITHUB_TOKEN`.
    pub fn from_env() -> Result<Self> {
        let token = std::env::var("GITHUB_TOKEN")
            .ok()
            .filter(|token| !token.is_empty())
            .ok_or(Error::MissingToken)?;
        Self::new(token, GITHUB_API)
    }

    pub fn new(token: impl Into<String>, base_url: impl Into<String>) -> Result<Self> {
        let client = Client::builder()
            .user_agent(concat!("gistup/", env!("CARGO_PKG_VERSION")))
            .build()?;
        Ok(GistClient {
            client,
            base_url: base_url.into(),
            token: token.into(),
        })
    }

    /// Creates one private multi-file gist and returns its URLs.
    pub fn create(&self, description: &str, files: &BTreeMap<String, String>) -> Result<Gist> {
        let payload = CreatePayload {
            public: false,
            description,
            files: files
                .iter()
                .map(|(path, content)| (path.as_str(), FilePayload { content }))
                .collect(),
        };

        let res = self
            .client
            .post(format!("{}/gists", self.base_url))
            .bearer_auth(&self.token)
            .header(ACCEPT, GITHUB_ACCEPT)
            .json(&payload)
            .send()?;
        if !res.status().is_success() {
            return Err(Error::Remote {
                status: res.status(),
                body: res.text().unwrap_or_default(),
            });
        }
        Ok(res.json()?)
    }

    /// Fetches every gist owned by the authenticated user (first page only).
    pub fn list(&self) -> Result<Vec<GistSummary>> {
        let res = self
            .client
            .get(format!("{}/gists", self.base_url))
            .bearer_auth(&self.token)
            .header(ACCEPT, GITHUB_ACCEPT)
            .send()?;
        if !res.status().is_success() {
            return Err(Error::Remote {
                status: res.status(),
                body: res.text().unwrap_or_default(),
            });
        }
        Ok(res.json()?)
    }

    pub fn delete(&self, id: &str) -> Result<()> {
        let res = self
            .client
            .delete(format!("{}/gists/{id}", self.base_url))
            .bearer_auth(&self.token)
            .header(ACCEPT, GITHUB_ACCEPT)
            .send()?;
        if !res.status().is_success() {
            return Err(Error::Remote {
                status: res.status(),
                body: res.text().unwrap_or_default(),
            });
        }
        Ok(())
    }

    /// Deletes every gist whose description carries [`MARKER`], continuing
    /// past individual failures.
    pub fn prune(&self) -> Result<PruneOutcome> {
        let mut outcome = PruneOutcome::default();
        for gist in self.list()? {
            if !gist
                .description
                .as_deref()
                .map_or(false, |description| description.contains(MARKER))
            {
                continue;
            }
            match self.delete(&gist.id) {
                Ok(()) => outcome.deleted.push(gist.id),
                Err(err) => {
                    println!("❌ Failed to delete gist {}: {err}", gist.id);
                    outcome.failed.push(gist.id);
                }
            }
        }
        Ok(outcome)
    }
}
