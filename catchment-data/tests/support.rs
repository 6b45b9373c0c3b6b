//! Canned HTTP responders for exercising the geocoder over real sockets.

use std::io::{BufRead, BufReader, Write};
use std::net::{SocketAddr, TcpListener, TcpStream};
use std::thread::{self, JoinHandle};
use std::time::Duration;

/// How the responder treats the single connection it accepts.
#[derive(Debug, Clone)]
pub enum Reply {
    /// Answer with the given status line suffix and body.
    Respond { status: &'static str, body: String },
    /// Read the request, then hold the socket open without answering.
    Stall(Duration),
}

/// A one-shot HTTP server bound to an ephemeral loopback port.
pub struct CannedServer {
    address: SocketAddr,
    handle: Option<JoinHandle<String>>,
}

impl CannedServer {
    /// Serve `reply` to the first connection.
    pub fn start(reply: Reply) -> Self {
        let listener = TcpListener::bind("127.0.0.1:0").expect("bind loopback listener");
        let address = listener.local_addr().expect("listener address");
        let handle = thread::spawn(move || {
            let (stream, _) = listener.accept().expect("accept connection");
            serve(stream, &reply)
        });
        Self {
            address,
            handle: Some(handle),
        }
    }

    /// Base URL to configure the geocoder with.
    pub fn base_url(&self) -> String {
        format!("http://{}", self.address)
    }

    /// The request line received, e.g. `GET /search?... HTTP/1.1`.
    pub fn request_line(&mut self) -> String {
        self.handle
            .take()
            .expect("request line already taken")
            .join()
            .expect("server thread panicked")
    }
}

/// A loopback URL nothing is listening on.
pub fn closed_base_url() -> String {
    let listener = TcpListener::bind("127.0.0.1:0").expect("bind loopback listener");
    let address = listener.local_addr().expect("listener address");
    drop(listener);
    format!("http://{address}")
}

/// A JSON search body containing one match per `(lat, lon, name)`.
pub fn search_body(matches: &[(&str, &str, &str)]) -> String {
    let entries: Vec<String> = matches
        .iter()
        .map(|(lat, lon, name)| {
            format!(r#"{{"lat":"{lat}","lon":"{lon}","display_name":"{name}"}}"#)
        })
        .collect();
    format!("[{}]", entries.join(","))
}

fn serve(stream: TcpStream, reply: &Reply) -> String {
    let mut reader = BufReader::new(stream.try_clone().expect("clone stream"));
    let mut request_line = String::new();
    reader
        .read_line(&mut request_line)
        .expect("read request line");
    let mut header = String::new();
    while reader.read_line(&mut header).expect("read header") > 2 {
        header.clear();
    }

    match reply {
        Reply::Respond { status, body } => {
            let mut writer = stream;
            let response = format!(
                "HTTP/1.1 {status}\r\ncontent-type: application/json\r\ncontent-length: {}\r\nconnection: close\r\n\r\n{body}",
                body.len()
            );
            writer
                .write_all(response.as_bytes())
                .expect("write response");
            writer.flush().expect("flush response");
        }
        Reply::Stall(duration) => thread::sleep(*duration),
    }
    request_line.trim_end().to_owned()
}
