//! HTTP/1.1 GET request text
//!
//! The bridge sends a single request per session and streams whatever comes
//! back, headers included. Lines end in a bare `\n`.

use core::fmt::Write;

use heapless::String;

/// Largest request the bridge will build
pub const MAX_REQUEST_LEN: usize = 256;

/// Port implied by an `http://` URL
pub const HTTP_PORT: u16 = 80;

/// Errors building a request
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum RequestError {
    /// Host name is empty
    EmptyHost,
    /// Path does not start with '/'
    InvalidPath,
    /// Request does not fit in `MAX_REQUEST_LEN`
    TooLong,
}

/// A GET request for one document
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct HttpGet<'a> {
    pub host: &'a str,
    pub port: u16,
    pub path: &'a str,
    pub user_agent: &'a str,
}

impl<'a> HttpGet<'a> {
    pub fn new(host: &'a str, port: u16, path: &'a str, user_agent: &'a str) -> Self {
        Self {
            host,
            port,
            path,
            user_agent,
        }
    }

    /// Render the request text
    ///
    /// Uses the absolute-URI request line form followed by `Host` and
    /// `User-Agent` headers and an empty line. A port other than 80 is
    /// written as `host:port` in both the URI and `Host`.
    pub fn render(&self) -> Result<String<MAX_REQUEST_LEN>, RequestError> {
        if self.host.is_empty() {
            return Err(RequestError::EmptyHost);
        }
        if !self.path.starts_with('/') {
            return Err(RequestError::InvalidPath);
        }

        let mut authority: String<MAX_REQUEST_LEN> = String::new();
        authority
            .push_str(self.host)
            .map_err(|_| RequestError::TooLong)?;
        if self.port != HTTP_PORT {
            write!(authority, ":{}", self.port).map_err(|_| RequestError::TooLong)?;
        }

        let mut out = String::new();
        write!(
            out,
            "GET http://{}{} HTTP/1.1\nHost: {}\nUser-Agent: {}\n\n",
            authority, self.path, authority, self.user_agent
        )
        .map_err(|_| RequestError::TooLong)?;

        Ok(out)
    }
}
