use std::fmt::Display;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Method {
    Get,
    Post,
    Put,
    Patch,
    Delete,
}

impl Display for Method {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let value = match self {
            Method::Get => "GET",
            Method::Post => "POST",
            Method::Put => "PUT",
            Method::Patch => "PATCH",
            Method::Delete => "DELETE",
        };

        write!(f, "{value}")
    }
}

impl From<Method> for reqwest::Method {
    fn from(value: Method) -> Self {
        match value {
            Method::Get => reqwest::Method::GET,
            Method::Post => reqwest::Method::POST,
            Method::Put => reqwest::Method::PUT,
            Method::Patch => reqwest::Method::PATCH,
            Method::Delete => reqwest::Method::DELETE,
        }
    }
}

#[derive(thiserror::Error, Debug, Clone, PartialEq, Eq)]
pub struct RequestError {
    pub kind: RequestErrorKind,
    pub url: Option<String>,
    pub message: String,
}

impl Display for RequestError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match &self.url {
            Some(url) => write!(f, "[{:?}] {url}: {}", self.kind, self.message),
            None => write!(f, "[{:?}] {}", self.kind, self.message),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RequestErrorKind {
    Request,
    Redirect,
    Status(u16),
    Body,
    Timeout,
    Unknown,
}

impl RequestError {
    pub fn status(code: u16, url: &str) -> Self {
        RequestError {
            kind: RequestErrorKind::Status(code),
            url: Some(url.to_string()),
            message: format!("store responded with status {code}"),
        }
    }
}

impl From<reqwest::Error> for RequestError {
    fn from(error: reqwest::Error) -> Self {
        let url = error.url().map(|u| u.as_str().to_string());
        let message = error.to_string();

        let kind = if error.is_timeout() {
            RequestErrorKind::Timeout
        } else if error.is_decode() || error.is_body() {
            RequestErrorKind::Body
        } else if error.is_redirect() {
            RequestErrorKind::Redirect
        } else if error.is_request() || error.is_connect() {
            RequestErrorKind::Request
        } else if error.is_status() {
            RequestErrorKind::Status(error.status().map(|s| s.as_u16()).unwrap_or_default())
        } else {
            RequestErrorKind::Unknown
        };

        RequestError { kind, url, message }
    }
}
