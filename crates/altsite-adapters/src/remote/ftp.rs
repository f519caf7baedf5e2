//! FTP implementation of the remote store port, over `suppaftp`.
//!
//! The session is plain FTP on port 21 unless the host carries an explicit
//! `host:port`. Login failures surface as `ConnectionFailed`; everything
//! after login maps to per-path `Remote` errors, which the publisher treats
//! as recoverable.

use std::io::Cursor;

use altsite_core::{
    application::{ApplicationError, ports::RemoteStore},
    error::{AltsiteError, AltsiteResult},
};
use suppaftp::FtpStream;
use tracing::debug;

/// Production remote store speaking FTP.
#[derive(Default)]
pub struct FtpRemote {
    stream: Option<FtpStream>,
}

impl FtpRemote {
    pub fn new() -> Self {
        Self::default()
    }

    fn stream(&mut self) -> AltsiteResult<&mut FtpStream> {
        self.stream.as_mut().ok_or_else(|| AltsiteError::Internal {
            message: "remote operation before login".into(),
        })
    }
}

fn remote_error(path: &str, e: suppaftp::FtpError) -> AltsiteError {
    ApplicationError::Remote {
        path: path.to_string(),
        reason: e.to_string(),
    }
    .into()
}

impl RemoteStore for FtpRemote {
    fn login(&mut self, host: &str, user: &str, secret: &str) -> AltsiteResult<()> {
        let address = if host.contains(':') {
            host.to_string()
        } else {
            format!("{host}:21")
        };
        let connection_failed = |reason: String| {
            AltsiteError::from(ApplicationError::ConnectionFailed {
                host: host.to_string(),
                reason,
            })
        };

        debug!(%address, "connecting");
        let mut stream =
            FtpStream::connect(&address).map_err(|e| connection_failed(e.to_string()))?;
        stream
            .login(user, secret)
            .map_err(|e| connection_failed(e.to_string()))?;
        self.stream = Some(stream);
        Ok(())
    }

    fn change_directory(&mut self, path: &str) -> AltsiteResult<()> {
        self.stream()?.cwd(path).map_err(|e| remote_error(path, e))
    }

    fn create_directory(&mut self, name: &str) -> AltsiteResult<()> {
        self.stream()?
            .mkdir(name)
            .map_err(|e| remote_error(name, e))
    }

    fn store_file(&mut self, filename: &str, bytes: &[u8]) -> AltsiteResult<()> {
        self.stream()?
            .put_file(filename, &mut Cursor::new(bytes))
            .map(|_| ())
            .map_err(|e| remote_error(filename, e))
    }

    fn delete_file(&mut self, path: &str) -> AltsiteResult<()> {
        self.stream()?.rm(path).map_err(|e| remote_error(path, e))
    }

    fn close(&mut self) -> AltsiteResult<()> {
        if let Some(mut stream) = self.stream.take() {
            stream.quit().map_err(|e| remote_error("<quit>", e))?;
        }
        Ok(())
    }
}
