//! Blocking HTTP implementation of [`JobServer`].
//!
//! Talks the Jenkins-style REST surface: nested `job/<seg>` URLs,
//! `createItem` for folders and jobs, `config.xml` reconfiguration,
//! `doDelete`, a recursive `api/json?tree=` listing, and the
//! `pipeline-model-converter/validate` endpoint. Authentication is HTTP
//! basic with an API token, so no CSRF crumb is required.

use std::time::Duration;

use base64::{engine::general_purpose::STANDARD, Engine as _};
use serde::Deserialize;
use serde_json::Value;

use pipesync_core::JobPath;

use crate::error::RemoteError;
use crate::server::{Credentials, JobServer};
use crate::tree::{NodeKind, RemoteNode, RemoteTree};

/// Server-side class name marking an entry as a folder.
pub const FOLDER_CLASS: &str = "com.cloudbees.hudson.plugins.folder.Folder";

/// Nesting depth requested from the listing endpoint. Ten levels of folders
/// is far deeper than any tracked tree in practice.
const LIST_DEPTH: usize = 10;

const REQUEST_TIMEOUT: Duration = Duration::from_secs(30);

/// Identity reported by the server on connect.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ServerInfo {
    pub user: String,
    pub version: String,
}

/// A connected session against a remote job server.
pub struct HttpJobServer {
    agent: ureq::Agent,
    base: String,
    auth: Option<String>,
    info: ServerInfo,
}

impl HttpJobServer {
    /// Establish a session, verifying credentials with a `me/api/json`
    /// round-trip before any mutating call is made.
    pub fn connect(url: &str, credentials: Option<&Credentials>) -> Result<Self, RemoteError> {
        let agent = ureq::AgentBuilder::new().timeout(REQUEST_TIMEOUT).build();
        let base = url.trim_end_matches('/').to_string();
        let auth = credentials
            .map(|c| format!("Basic {}", STANDARD.encode(format!("{}:{}", c.user, c.token))));

        let endpoint = format!("{base}/me/api/json");
        let req = match &auth {
            Some(header) => agent.get(&endpoint).set("Authorization", header),
            None => agent.get(&endpoint),
        };
        let resp = match req.call() {
            Ok(resp) => resp,
            Err(ureq::Error::Status(status @ (401 | 403), _)) => {
                return Err(RemoteError::Auth { url: base, status })
            }
            Err(ureq::Error::Status(status, _)) => {
                return Err(RemoteError::Api {
                    op: "connect",
                    path: "/me".to_string(),
                    status,
                })
            }
            Err(err) => return Err(transport("connect", err)),
        };

        let version = resp.header("X-Jenkins").unwrap_or("unknown").to_string();
        let who: WhoAmI = resp.into_json().map_err(|e| decode("connect", e))?;
        tracing::info!("connected as {} to server {version}", who.full_name);

        Ok(Self {
            agent,
            base,
            auth,
            info: ServerInfo {
                user: who.full_name,
                version,
            },
        })
    }

    /// Identity and version reported by the server at connect time.
    pub fn info(&self) -> &ServerInfo {
        &self.info
    }

    /// `<base>/job/<seg>/job/<seg>...` for a namespace path.
    fn job_url(&self, path: &JobPath) -> String {
        let mut url = self.base.clone();
        for seg in path.segments() {
            url.push_str("/job/");
            url.push_str(seg);
        }
        url
    }

    fn request(&self, method: &str, url: &str) -> ureq::Request {
        let req = self.agent.request(method, url);
        match &self.auth {
            Some(header) => req.set("Authorization", header),
            None => req,
        }
    }
}

impl JobServer for HttpJobServer {
    fn list_tree(&mut self) -> Result<RemoteTree, RemoteError> {
        let url = format!("{}/api/json", self.base);
        let resp = self
            .request("GET", &url)
            .query("tree", &tree_query(LIST_DEPTH))
            .call()
            .map_err(|e| api_err("list-tree", "/", e))?;
        let listing: TreeListing = resp.into_json().map_err(|e| decode("list-tree", e))?;
        Ok(tree_from_listing(listing))
    }

    fn create_folder(&mut self, path: &JobPath) -> Result<(), RemoteError> {
        let Some((name, parent)) = path.split_last() else {
            return Ok(());
        };
        let parent_url = match parent {
            Some(folder) => self.job_url(&folder),
            None => self.base.clone(),
        };
        let url = format!("{parent_url}/createItem");
        match self.request("POST", &url).send_form(&[
            ("name", name),
            ("mode", FOLDER_CLASS),
            ("from", ""),
            ("Submit", "OK"),
        ]) {
            Ok(_) => Ok(()),
            // The server answers 400 when an item of that name exists.
            Err(ureq::Error::Status(400, _)) => Err(RemoteError::AlreadyExists {
                path: path.clone(),
            }),
            Err(err) => Err(api_err("create-folder", &path.to_string(), err)),
        }
    }

    fn upsert_job(&mut self, path: &JobPath, config_xml: &str) -> Result<(), RemoteError> {
        let job_url = self.job_url(path);
        let exists = match self
            .request("GET", &format!("{job_url}/api/json"))
            .query("tree", "name")
            .call()
        {
            Ok(_) => true,
            Err(ureq::Error::Status(404, _)) => false,
            Err(err) => return Err(api_err("job-exists", &path.to_string(), err)),
        };

        if exists {
            self.request("POST", &format!("{job_url}/config.xml"))
                .set("Content-Type", "text/xml")
                .send_string(config_xml)
                .map_err(|e| api_err("reconfigure-job", &path.to_string(), e))?;
            return Ok(());
        }

        let Some((name, parent)) = path.split_last() else {
            return Err(RemoteError::NotFound { path: path.clone() });
        };
        let parent_url = match parent {
            Some(folder) => self.job_url(&folder),
            None => self.base.clone(),
        };
        self.request("POST", &format!("{parent_url}/createItem"))
            .query("name", name)
            .set("Content-Type", "text/xml")
            .send_string(config_xml)
            .map_err(|e| api_err("create-job", &path.to_string(), e))?;
        Ok(())
    }

    fn delete_job(&mut self, path: &JobPath) -> Result<(), RemoteError> {
        let url = format!("{}/doDelete", self.job_url(path));
        match self.request("POST", &url).send_string("") {
            Ok(_) => Ok(()),
            Err(ureq::Error::Status(404, _)) => {
                Err(RemoteError::NotFound { path: path.clone() })
            }
            Err(err) => Err(api_err("delete", &path.to_string(), err)),
        }
    }

    fn validate_syntax(&mut self, content: &str) -> Result<Vec<String>, RemoteError> {
        let url = format!("{}/pipeline-model-converter/validate", self.base);
        let resp = self
            .request("POST", &url)
            .send_form(&[("jenkinsfile", content)])
            .map_err(|e| api_err("validate", "/", e))?;
        let payload: Value = resp.into_json().map_err(|e| decode("validate", e))?;
        Ok(validation_messages(&payload))
    }
}

fn transport(op: &'static str, err: ureq::Error) -> RemoteError {
    RemoteError::Transport {
        op,
        source: Box::new(err),
    }
}

fn api_err(op: &'static str, path: &str, err: ureq::Error) -> RemoteError {
    match err {
        ureq::Error::Status(status, _) => RemoteError::Api {
            op,
            path: path.to_string(),
            status,
        },
        other => transport(op, other),
    }
}

fn decode(op: &'static str, source: std::io::Error) -> RemoteError {
    RemoteError::Decode { op, source }
}

// ---------------------------------------------------------------------------
// Listing payload
// ---------------------------------------------------------------------------

#[derive(Debug, Deserialize)]
struct WhoAmI {
    #[serde(rename = "fullName", default)]
    full_name: String,
}

#[derive(Debug, Deserialize)]
pub(crate) struct TreeListing {
    #[serde(default)]
    jobs: Vec<JobListing>,
}

#[derive(Debug, Deserialize)]
pub(crate) struct JobListing {
    #[serde(rename = "_class", default)]
    class: String,
    name: String,
    #[serde(default)]
    jobs: Vec<JobListing>,
}

/// Nested `tree=` query selecting name and class down to `depth` levels.
fn tree_query(depth: usize) -> String {
    let mut q = String::from("jobs[name,_class]");
    for _ in 1..depth {
        q = format!("jobs[name,_class,{q}]");
    }
    q
}

/// Tag every listed entry with its [`NodeKind`]; this is the only place the
/// server's class names are inspected.
pub(crate) fn tree_from_listing(listing: TreeListing) -> RemoteTree {
    let mut tree = RemoteTree::default();
    for job in listing.jobs {
        let (name, node) = node_from_listing(job);
        tree.roots.insert(name, node);
    }
    tree
}

fn node_from_listing(job: JobListing) -> (String, RemoteNode) {
    let kind = if job.class == FOLDER_CLASS {
        NodeKind::Folder
    } else {
        NodeKind::Job
    };
    let mut node = RemoteNode::new(kind);
    for child in job.jobs {
        let (name, child_node) = node_from_listing(child);
        node.children.insert(name, child_node);
    }
    (job.name, node)
}

/// Flatten the validate endpoint's payload into plain messages. Entries carry
/// their text either as a single string or as a list.
pub(crate) fn validation_messages(payload: &Value) -> Vec<String> {
    let mut messages = Vec::new();
    let Some(errors) = payload.pointer("/data/errors").and_then(Value::as_array) else {
        return messages;
    };
    for entry in errors {
        match entry.get("error") {
            Some(Value::String(message)) => messages.push(message.clone()),
            Some(Value::Array(items)) => messages.extend(
                items
                    .iter()
                    .filter_map(Value::as_str)
                    .map(str::to_string),
            ),
            _ => {}
        }
    }
    messages
}
