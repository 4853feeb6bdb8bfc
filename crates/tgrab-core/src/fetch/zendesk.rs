//! Zendesk REST implementation of [`TicketSource`].
//!
//! Thin wrapper over three endpoints: `tickets/show_many` for explicit ids,
//! `search` for an agent's open tickets, and `tickets/<id>/audits` for
//! comment events. Attachment bodies are streamed straight to the caller's
//! writer.

use std::io::Write;

use serde::Deserialize;

use crate::error::FetchError;

use super::Attachment;
use super::CommentEvent;
use super::TicketSource;

/// Blocking Zendesk API client authenticated with email + password or
/// email + API token.
#[derive(Debug)]
pub struct ZendeskClient {
    http: reqwest::blocking::Client,
    base_url: String,
    username: String,
    secret: String,
}

impl ZendeskClient {
    /// Creates a client for the given Zendesk instance.
    ///
    /// `url` is the instance root (e.g. `https://example.zendesk.com`).
    /// When `token_auth` is set, `secret` is an API token and the basic-auth
    /// username becomes `<email>/token` per the Zendesk convention.
    ///
    /// # Errors
    ///
    /// Returns [`FetchError::InvalidUrl`] for an unusable URL and
    /// [`FetchError::Http`] if the HTTP client cannot be constructed.
    pub fn new(url: &str, email: &str, secret: &str, token_auth: bool) -> Result<Self, FetchError> {
        let base_url = url.trim_end_matches('/').to_string();
        if !base_url.starts_with("http://") && !base_url.starts_with("https://") {
            return Err(FetchError::InvalidUrl {
                url: url.to_string(),
                reason: "expected an http(s) URL".to_string(),
            });
        }

        let http = reqwest::blocking::Client::builder()
            .user_agent(concat!("tgrab/", env!("CARGO_PKG_VERSION")))
            .build()?;

        let username = if token_auth {
            format!("{email}/token")
        } else {
            email.to_string()
        };

        Ok(Self {
            http,
            base_url,
            username,
            secret: secret.to_string(),
        })
    }

    /// GETs an API path with query parameters and deserializes the JSON
    /// response.
    fn get_json<T: serde::de::DeserializeOwned>(
        &self,
        path: &str,
        query: &[(&str, &str)],
    ) -> Result<T, FetchError> {
        let url = format!("{}/api/v2/{path}", self.base_url);
        let response = self
            .http
            .get(&url)
            .basic_auth(&self.username, Some(&self.secret))
            .query(query)
            .send()?;

        let status = response.status();
        if !status.is_success() {
            return Err(FetchError::Api {
                url,
                status: status.as_u16(),
            });
        }

        Ok(response.json()?)
    }
}

impl TicketSource for ZendeskClient {
    fn tickets(&self, selection: &super::TicketSelection) -> Result<Vec<u64>, FetchError> {
        match selection {
            super::TicketSelection::Ids(ids) => {
                let joined = ids
                    .iter()
                    .map(ToString::to_string)
                    .collect::<Vec<_>>()
                    .join(",");
                let response: ShowManyResponse =
                    self.get_json("tickets/show_many.json", &[("ids", joined.as_str())])?;
                Ok(response.tickets.into_iter().map(|t| t.id).collect())
            }
            super::TicketSelection::AssignedOpen { agent } => {
                let query = format!("status<solved assignee:{agent}");
                let response: SearchResponse =
                    self.get_json("search.json", &[("query", query.as_str())])?;
                Ok(response
                    .results
                    .into_iter()
                    .filter(|r| r.result_type == "ticket")
                    .map(|r| r.id)
                    .collect())
            }
        }
    }

    fn comment_events(&self, ticket_id: u64) -> Result<Vec<CommentEvent>, FetchError> {
        let response: AuditsResponse =
            self.get_json(&format!("tickets/{ticket_id}/audits.json"), &[])?;
        Ok(comment_events_from(response))
    }

    fn download(&self, content_url: &str, dest: &mut dyn Write) -> Result<u64, FetchError> {
        let mut response = self
            .http
            .get(content_url)
            .basic_auth(&self.username, Some(&self.secret))
            .send()?;

        let status = response.status();
        if !status.is_success() {
            return Err(FetchError::Api {
                url: content_url.to_string(),
                status: status.as_u16(),
            });
        }

        Ok(response.copy_to(dest)?)
    }
}

/// Flattens an audit listing into ordered comment events.
///
/// Audits hold mixed event types; only `Comment` events count toward the
/// comment numbering used for the on-disk layout.
fn comment_events_from(response: AuditsResponse) -> Vec<CommentEvent> {
    let mut events = Vec::new();
    for audit in response.audits {
        for event in audit.events {
            if event.kind != "Comment" {
                continue;
            }
            events.push(CommentEvent {
                attachments: event
                    .attachments
                    .into_iter()
                    .map(|a| Attachment {
                        file_name: a.file_name,
                        content_url: a.content_url,
                    })
                    .collect(),
            });
        }
    }
    events
}

#[derive(Debug, Deserialize)]
struct ShowManyResponse {
    tickets: Vec<TicketRef>,
}

#[derive(Debug, Deserialize)]
struct TicketRef {
    id: u64,
}

#[derive(Debug, Deserialize)]
struct SearchResponse {
    results: Vec<SearchResult>,
}

#[derive(Debug, Deserialize)]
struct SearchResult {
    id: u64,
    result_type: String,
}

#[derive(Debug, Deserialize)]
struct AuditsResponse {
    audits: Vec<Audit>,
}

#[derive(Debug, Deserialize)]
struct Audit {
    events: Vec<AuditEvent>,
}

#[derive(Debug, Deserialize)]
struct AuditEvent {
    #[serde(rename = "type")]
    kind: String,
    #[serde(default)]
    attachments: Vec<AttachmentRef>,
}

#[derive(Debug, Deserialize)]
struct AttachmentRef {
    file_name: String,
    content_url: String,
}
