// SPDX-License-Identifier: Apache-2.0

use std::io::ErrorKind;
use std::net::TcpListener as Tcp;
use std::os::unix::io::{FromRawFd, RawFd};
use std::os::unix::net::UnixListener as Unix;

/// Where the registry accepts connections.
///
/// Parsed from a single argument: an inherited file descriptor number, an
/// absolute Unix socket path, or anything else as a TCP socket address.
#[derive(Debug)]
pub enum Listener {
    Unix(Unix),
    Tcp(Tcp),
}

impl std::str::FromStr for Listener {
    type Err = std::io::Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        use nix::sys::socket::{getsockname, SockAddr};

        if let Ok(fd) = RawFd::from_str(s) {
            return match getsockname(fd).map_err(|_| ErrorKind::InvalidInput)? {
                SockAddr::Unix(..) => Ok(Listener::Unix(unsafe { Unix::from_raw_fd(fd) })),
                SockAddr::Inet(..) => Ok(Listener::Tcp(unsafe { Tcp::from_raw_fd(fd) })),
                _ => Err(ErrorKind::InvalidInput.into()),
            };
        }

        Ok(match s.chars().next() {
            Some('/') => Listener::Unix(Unix::bind(s)?),
            _ => Listener::Tcp(Tcp::bind(s)?),
        })
    }
}

impl Listener {
    /// Describes the bound address for log output.
    pub fn describe(&self) -> String {
        match self {
            Listener::Tcp(socket) => match socket.local_addr() {
                Ok(addr) => format!("tcp://{}", addr),
                Err(_) => "tcp://?".into(),
            },
            Listener::Unix(socket) => match socket.local_addr() {
                Ok(addr) => match addr.as_pathname() {
                    Some(path) => format!("unix://{}", path.display()),
                    None => "unix://(unnamed)".into(),
                },
                Err(_) => "unix://?".into(),
            },
        }
    }
}
