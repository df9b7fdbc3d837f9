use crate::types::errors::FetchError;
use std::fs::File;
use std::io;
use std::net::ToSocketAddrs;
use std::time::Duration;
use suppaftp::types::FileType;
use suppaftp::FtpStream;
use url::Url;

const ANONYMOUS_USER: &str = "anonymous";
const ANONYMOUS_PASSWORD: &str = "anonymous@";

/// Anonymous (or URI-credentialed) binary RETR in passive mode.
pub(super) fn retrieve(
    source: &Url,
    file: &mut File,
    timeout: Option<Duration>,
) -> Result<u64, FetchError> {
    let uri = source.to_string();
    let invalid = |reason: String| FetchError::InvalidSource {
        uri: uri.clone(),
        reason,
    };
    let ftp_err = |error| FetchError::Ftp {
        uri: uri.clone(),
        error,
    };
    let read_err = |error| FetchError::Read {
        uri: uri.clone(),
        error,
    };

    let host = source
        .host_str()
        .ok_or_else(|| invalid("missing host".to_string()))?;
    let port = source.port_or_known_default().unwrap_or(21);
    let remote_path = urlencoding::decode(source.path())
        .map_err(|e| invalid(format!("path is not valid UTF-8: {e}")))?;
    if remote_path.is_empty() || remote_path.ends_with('/') {
        return Err(invalid("path does not name a file".to_string()));
    }

    let (user, password) = match source.username() {
        "" => (ANONYMOUS_USER.to_string(), ANONYMOUS_PASSWORD.to_string()),
        name => (
            urlencoding::decode(name)
                .map_err(|e| invalid(format!("user is not valid UTF-8: {e}")))?
                .into_owned(),
            urlencoding::decode(source.password().unwrap_or(""))
                .map_err(|e| invalid(format!("password is not valid UTF-8: {e}")))?
                .into_owned(),
        ),
    };

    let mut ftp = match timeout {
        Some(timeout) => {
            let addr = (host, port)
                .to_socket_addrs()
                .map_err(read_err)?
                .next()
                .ok_or_else(|| invalid(format!("{host} did not resolve")))?;
            let ftp = FtpStream::connect_timeout(addr, timeout).map_err(ftp_err)?;
            ftp.get_ref()
                .set_read_timeout(Some(timeout))
                .map_err(read_err)?;
            ftp
        }
        None => FtpStream::connect((host, port)).map_err(ftp_err)?,
    };
    log::debug!("Connected to {host}:{port}, logging in as {user}");

    ftp.login(&user, &password).map_err(ftp_err)?;
    ftp.transfer_type(FileType::Binary).map_err(ftp_err)?;

    let mut stream = ftp.retr_as_stream(remote_path.as_ref()).map_err(ftp_err)?;
    // The passive data connection is a separate socket from the control one.
    stream
        .get_ref()
        .set_read_timeout(timeout)
        .map_err(read_err)?;
    let bytes = io::copy(&mut stream, file).map_err(read_err)?;
    // The server reports truncated transfers on the control channel.
    ftp.finalize_retr_stream(stream).map_err(ftp_err)?;

    if let Err(e) = ftp.quit() {
        log::debug!("FTP QUIT for {uri} failed: {e}");
    }

    Ok(bytes)
}
