// Copyright (C) 2026  Caprica Software Limited
//
// This program is free software: you can redistribute it and/or modify
// it under the terms of the GNU General Public License as published by
// the Free Software Foundation, either version 3 of the License, or
// (at your option) any later version.
//
// This program is distributed in the hope that it will be useful,
// but WITHOUT ANY WARRANTY; without even the implied warranty of
// MERCHANTABILITY or FITNESS FOR A PARTICULAR PURPOSE.  See the
// GNU General Public License for more details.
//
// You should have received a copy of the GNU General Public License
// along with this program.  If not, see <https://www.gnu.org/licenses/>.

//! WebDAV client for the remote music collection.
//!
//! This is the only module that performs network I/O. It exposes three
//! operations—directory listing, document read, document write—over a shared
//! blocking HTTP agent. Failures are reported as typed [`RemoteError`]s;
//! degrading them to empty results is a policy decision that belongs to the
//! callers, not to this layer.

use std::time::Duration;

use base64::Engine;
use quick_xml::Reader;
use quick_xml::events::Event;
use thiserror::Error;
use tracing::debug;

use crate::{
    model::Resource,
    remote::paths::{self, PathCodec},
};

const CONNECT_TIMEOUT: Duration = Duration::from_secs(5);
const IO_TIMEOUT: Duration = Duration::from_secs(10);

const PLAYLIST_CONTENT_TYPE: &str = "audio/x-mpegurl; charset=utf-8";

#[derive(Debug, Error)]
pub(crate) enum RemoteError {
    #[error("transport failure: {0}")]
    Transport(String),

    #[error("unexpected HTTP status {code}")]
    Status { code: u16 },

    #[error("malformed server response: {0}")]
    Malformed(String),

    /// The document's version validator no longer matched on a conditional
    /// write (HTTP 412).
    #[error("remote document changed concurrently")]
    Conflict,
}

/// A remote document with its version validator, when the server provides
/// one. A missing document reads as an empty one.
#[derive(Debug, Clone, Default)]
pub(crate) struct Document {
    pub(crate) text: String,
    pub(crate) etag: Option<String>,
}

/// Client for the file-listing/read/write subset of WebDAV.
///
/// Cloning is cheap and shares the underlying connection pool, so worker
/// threads can each hold a handle.
#[derive(Clone)]
pub(crate) struct RemoteStore {
    agent: ureq::Agent,
    codec: PathCodec,
    auth_header: Option<String>,
}

impl RemoteStore {
    pub(crate) fn new(server_url: &str, username: &str, password: &str) -> Self {
        let agent = ureq::AgentBuilder::new()
            .timeout_connect(CONNECT_TIMEOUT)
            .timeout_read(IO_TIMEOUT)
            .timeout_write(IO_TIMEOUT)
            .build();

        let auth_header = (!username.is_empty()).then(|| {
            let credentials = format!("{username}:{password}");
            format!(
                "Basic {}",
                base64::engine::general_purpose::STANDARD.encode(credentials)
            )
        });

        Self {
            agent,
            codec: PathCodec::new(server_url, username, password),
            auth_header,
        }
    }

    /// Issues a depth-1 listing request and parses the multistatus response.
    ///
    /// The queried collection itself and dot-prefixed names are excluded;
    /// the result is sorted directories-first, then case-insensitively by
    /// name.
    pub(crate) fn list_directory(&self, path: &str) -> Result<Vec<Resource>, RemoteError> {
        let response = self
            .request("PROPFIND", path)
            .set("Depth", "1")
            .call()
            .map_err(classify)?;

        if response.status() != 207 {
            return Err(RemoteError::Status {
                code: response.status(),
            });
        }

        let body = response
            .into_string()
            .map_err(|e| RemoteError::Transport(e.to_string()))?;

        let mut entries = parse_multistatus(&body, path)?;
        entries.sort_by_key(|r| (!r.is_directory, r.display_name().to_lowercase()));
        debug!(path, count = entries.len(), "listed remote directory");
        Ok(entries)
    }

    /// Reads a document in full. A 404 yields an empty [`Document`]; every
    /// other failure is an error.
    pub(crate) fn read_document(&self, path: &str) -> Result<Document, RemoteError> {
        match self.request("GET", path).call() {
            Ok(response) if response.status() == 200 => {
                let etag = response.header("ETag").map(str::to_string);
                let text = response
                    .into_string()
                    .map_err(|e| RemoteError::Transport(e.to_string()))?;
                Ok(Document { text, etag })
            }
            Ok(response) => Err(RemoteError::Status {
                code: response.status(),
            }),
            Err(ureq::Error::Status(404, _)) => Ok(Document::default()),
            Err(err) => Err(classify(err)),
        }
    }

    /// Replaces a document in full. Success only on a server-confirmed 2xx.
    pub(crate) fn write_document(&self, path: &str, text: &str) -> Result<(), RemoteError> {
        self.put(path, text, None)
    }

    /// Conditional full replace: the write is applied only if the remote
    /// version still matches `etag`, otherwise [`RemoteError::Conflict`].
    pub(crate) fn write_document_if(
        &self,
        path: &str,
        text: &str,
        etag: Option<&str>,
    ) -> Result<(), RemoteError> {
        self.put(path, text, etag)
    }

    fn put(&self, path: &str, text: &str, etag: Option<&str>) -> Result<(), RemoteError> {
        let mut request = self
            .request("PUT", path)
            .set("Content-Type", PLAYLIST_CONTENT_TYPE);
        if let Some(tag) = etag {
            request = request.set("If-Match", tag);
        }

        match request.send_string(text) {
            Ok(response) if (200..300).contains(&response.status()) => Ok(()),
            Ok(response) => Err(RemoteError::Status {
                code: response.status(),
            }),
            Err(ureq::Error::Status(412, _)) => Err(RemoteError::Conflict),
            Err(err) => Err(classify(err)),
        }
    }

    fn request(&self, method: &str, path: &str) -> ureq::Request {
        let mut request = self.agent.request(method, &self.codec.request_uri(path));
        if let Some(auth) = &self.auth_header {
            request = request.set("Authorization", auth);
        }
        request
    }
}

fn classify(err: ureq::Error) -> RemoteError {
    match err {
        ureq::Error::Status(code, _) => RemoteError::Status { code },
        ureq::Error::Transport(transport) => RemoteError::Transport(transport.to_string()),
    }
}

/// Parses a PROPFIND multistatus body into listing entries.
///
/// Servers disagree on namespace prefixes (`D:`, `d:`, none at all), so
/// elements are matched by local name only. The queried collection's own
/// entry and hidden (dot-prefixed) names are dropped here; sorting is left
/// to the caller.
fn parse_multistatus(body: &str, queried_path: &str) -> Result<Vec<Resource>, RemoteError> {
    let mut reader = Reader::from_str(body);
    reader.config_mut().trim_text(true);

    let queried = paths::normalize_for_persistence(queried_path);
    let queried = queried.trim_end_matches('/');

    let mut entries = Vec::new();

    let mut in_response = false;
    let mut in_href = false;
    let mut in_resourcetype = false;
    let mut href: Option<String> = None;
    let mut is_directory = false;

    loop {
        match reader.read_event() {
            Ok(Event::Start(e)) => match e.local_name().as_ref() {
                b"response" => {
                    in_response = true;
                    href = None;
                    is_directory = false;
                }
                b"href" if in_response => in_href = true,
                b"resourcetype" if in_response => in_resourcetype = true,
                b"collection" if in_resourcetype => is_directory = true,
                _ => {}
            },
            Ok(Event::Empty(e)) => {
                if in_resourcetype && e.local_name().as_ref() == b"collection" {
                    is_directory = true;
                }
            }
            Ok(Event::Text(t)) if in_href => {
                let text = t
                    .xml_content()
                    .map_err(|e| RemoteError::Malformed(e.to_string()))?;
                href = Some(text.trim().to_string());
            }
            Ok(Event::End(e)) => match e.local_name().as_ref() {
                b"response" => {
                    if let Some(raw_path) = href.take() {
                        if let Some(entry) = entry_from_href(&raw_path, queried, is_directory) {
                            entries.push(entry);
                        }
                    }
                    in_response = false;
                }
                b"href" => in_href = false,
                b"resourcetype" => in_resourcetype = false,
                _ => {}
            },
            Ok(Event::Eof) => break,
            Ok(_) => {}
            Err(err) => return Err(RemoteError::Malformed(err.to_string())),
        }
    }

    Ok(entries)
}

fn entry_from_href(raw_path: &str, queried: &str, is_directory: bool) -> Option<Resource> {
    // Compare in normalized form: hrefs may be absolute paths or full URIs.
    let normalized = paths::normalize_for_persistence(raw_path);
    let normalized = normalized.trim_end_matches('/');
    if normalized == queried {
        return None;
    }

    let raw_name = raw_path
        .trim_end_matches('/')
        .rsplit('/')
        .next()
        .unwrap_or("")
        .to_string();
    let decoded_name = paths::percent_decode(&raw_name);
    if decoded_name.is_empty() || decoded_name.starts_with('.') {
        return None;
    }

    Some(Resource {
        raw_name,
        raw_path: raw_path.to_string(),
        is_directory,
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    const PREFIXED: &str = r#"<?xml version="1.0" encoding="utf-8"?>
<D:multistatus xmlns:D="DAV:">
  <D:response>
    <D:href>/music/</D:href>
    <D:propstat>
      <D:prop><D:resourcetype><D:collection/></D:resourcetype></D:prop>
      <D:status>HTTP/1.1 200 OK</D:status>
    </D:propstat>
  </D:response>
  <D:response>
    <D:href>/music/b.mp3</D:href>
    <D:propstat>
      <D:prop><D:resourcetype/></D:prop>
      <D:status>HTTP/1.1 200 OK</D:status>
    </D:propstat>
  </D:response>
  <D:response>
    <D:href>/music/A/</D:href>
    <D:propstat>
      <D:prop><D:resourcetype><D:collection/></D:resourcetype></D:prop>
      <D:status>HTTP/1.1 200 OK</D:status>
    </D:propstat>
  </D:response>
  <D:response>
    <D:href>/music/a.mp3</D:href>
    <D:propstat>
      <D:prop><D:resourcetype/></D:prop>
      <D:status>HTTP/1.1 200 OK</D:status>
    </D:propstat>
  </D:response>
  <D:response>
    <D:href>/music/.hidden.mp3</D:href>
    <D:propstat>
      <D:prop><D:resourcetype/></D:prop>
      <D:status>HTTP/1.1 200 OK</D:status>
    </D:propstat>
  </D:response>
</D:multistatus>"#;

    fn sorted_names(body: &str, path: &str) -> Vec<String> {
        let mut entries = parse_multistatus(body, path).unwrap();
        entries.sort_by_key(|r| (!r.is_directory, r.display_name().to_lowercase()));
        entries.iter().map(|r| r.display_name()).collect()
    }

    #[test]
    fn listing_excludes_self_and_hidden_and_sorts_dirs_first() {
        assert_eq!(sorted_names(PREFIXED, "/music/"), ["A", "a.mp3", "b.mp3"]);
    }

    #[test]
    fn listing_is_namespace_prefix_agnostic() {
        // Same document with unprefixed DAV elements.
        let unprefixed = PREFIXED.replace("D:", "");
        assert_eq!(sorted_names(&unprefixed, "/music/"), ["A", "a.mp3", "b.mp3"]);
    }

    #[test]
    fn listing_handles_full_uri_hrefs() {
        let body = r#"<multistatus xmlns="DAV:">
          <response>
            <href>http://nas.local/music/</href>
            <propstat><prop><resourcetype><collection/></resourcetype></prop></propstat>
          </response>
          <response>
            <href>http://nas.local/music/One%20Song.mp3</href>
            <propstat><prop><resourcetype/></prop></propstat>
          </response>
        </multistatus>"#;
        let names = sorted_names(body, "/music");
        assert_eq!(names, ["One Song.mp3"]);
    }

    #[test]
    fn malformed_body_is_an_error() {
        assert!(matches!(
            parse_multistatus("<multistatus><respon", "/music"),
            Err(RemoteError::Malformed(_))
        ));
    }
}
