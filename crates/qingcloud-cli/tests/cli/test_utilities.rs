use std::io::{BufRead, BufReader, Write};
use std::net::TcpListener;
use std::path::PathBuf;
use std::thread::{self, JoinHandle};

use qingcloud_cli::Config;
use tempfile::TempDir;

pub fn test_config(zone: &str) -> Config {
    Config {
        access_key_id: "QYACCESSKEYIDEXAMPLE".to_string(),
        secret_access_key: "SECRETACCESSKEY".to_string(),
        zone: zone.to_string(),
    }
}

/// A port nothing listens on once this returns.
pub fn find_closed_port() -> Result<u16, Box<dyn std::error::Error>> {
    let listener = TcpListener::bind("127.0.0.1:0")?;
    Ok(listener.local_addr()?.port())
}

/// Answers exactly one request with `status` and `body`, then stops.
pub struct OneShotServer {
    pub endpoint: String,
    handle: JoinHandle<String>,
}

impl OneShotServer {
    pub fn start(status: u16, body: &str) -> Result<Self, Box<dyn std::error::Error>> {
        let listener = TcpListener::bind("127.0.0.1:0")?;
        let endpoint = format!("http://{}/iaas/?", listener.local_addr()?);
        let body = body.to_string();

        let handle = thread::spawn(move || {
            let (stream, _) = listener.accept().expect("accept request");
            let mut reader = BufReader::new(stream.try_clone().expect("clone stream"));

            let mut request_line = String::new();
            reader.read_line(&mut request_line).expect("read request line");
            loop {
                let mut header = String::new();
                let read = reader.read_line(&mut header).expect("read header");
                if read == 0 || header == "\r\n" {
                    break;
                }
            }

            let mut stream = stream;
            let response = format!(
                "HTTP/1.1 {status} Test\r\nContent-Type: application/json\r\nContent-Length: {}\r\nConnection: close\r\n\r\n{body}",
                body.len()
            );
            stream.write_all(response.as_bytes()).expect("write response");
            stream.flush().expect("flush response");
            request_line.trim_end().to_string()
        });

        Ok(OneShotServer { endpoint, handle })
    }

    /// Request line of the single request served, e.g. `GET /iaas/?... HTTP/1.1`.
    pub fn request_line(self) -> String {
        self.handle.join().expect("server thread")
    }
}

/// Temporary home directory holding a config file with the given body.
pub struct TempConfig {
    pub dir: TempDir,
    pub path: PathBuf,
}

impl TempConfig {
    pub fn write(name: &str, content: &str) -> Result<Self, Box<dyn std::error::Error>> {
        let dir = tempfile::tempdir()?;
        let path = dir.path().join(name);
        std::fs::write(&path, content)?;
        Ok(TempConfig { dir, path })
    }
}
