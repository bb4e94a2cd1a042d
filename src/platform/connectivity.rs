//! Connectivity detection
//!
//! On Windows the system's own connection state is asked first. Everywhere
//! else, and when Windows has no answer, a short TCP connect to the
//! configured probe address decides.

use std::cell::Cell;
use std::net::{SocketAddr, TcpStream};
use std::rc::Rc;
use std::time::Duration;

use crate::platform::ConnectivityOracle;

/// Connectivity as reported by the operating system
///
/// Outside Windows [`is_connected`](ConnectivityOracle::is_connected) blocks
/// the calling thread for up to `timeout` while the TCP connect runs. Keep
/// the timeout short; it runs on every resume and retry.
#[derive(Debug, Clone)]
pub struct SystemConnectivity {
    probe: SocketAddr,
    timeout: Duration,
}

impl SystemConnectivity {
    pub fn new(probe: SocketAddr, timeout: Duration) -> Self {
        Self { probe, timeout }
    }

    fn probe_reachable(&self) -> bool {
        match TcpStream::connect_timeout(&self.probe, self.timeout) {
            Ok(_) => true,
            Err(err) => {
                tracing::debug!(probe = %self.probe, error = %err, "connectivity probe failed");
                false
            }
        }
    }
}

impl ConnectivityOracle for SystemConnectivity {
    fn is_connected(&self) -> bool {
        system_reports_connection().unwrap_or_else(|| self.probe_reachable())
    }
}

#[cfg(windows)]
fn system_reports_connection() -> Option<bool> {
    use windows::Win32::Networking::WinInet::{INTERNET_CONNECTION, InternetGetConnectedState};

    let mut flags = INTERNET_CONNECTION::default();
    let connected = unsafe { InternetGetConnectedState(&mut flags, 0) }.is_ok();
    // Offline answers from WinInet are unreliable behind some proxies
    connected.then_some(true)
}

#[cfg(not(windows))]
fn system_reports_connection() -> Option<bool> {
    None
}

/// Wraps another oracle and lets the host force an answer
///
/// The console host uses this for its `offline` / `online` commands.
#[derive(Debug)]
pub struct OverrideConnectivity<C> {
    inner: C,
    forced: Rc<Cell<Option<bool>>>,
}

impl<C: ConnectivityOracle> OverrideConnectivity<C> {
    pub fn new(inner: C) -> Self {
        Self {
            inner,
            forced: Rc::new(Cell::new(None)),
        }
    }

    /// Reuses an existing switch, e.g. across a simulated restart
    pub fn with_switch(inner: C, forced: Rc<Cell<Option<bool>>>) -> Self {
        Self { inner, forced }
    }

    /// Shared switch; `Some(v)` forces `v`, `None` defers to the inner oracle
    pub fn switch(&self) -> Rc<Cell<Option<bool>>> {
        Rc::clone(&self.forced)
    }
}

impl<C: ConnectivityOracle> ConnectivityOracle for OverrideConnectivity<C> {
    fn is_connected(&self) -> bool {
        match self.forced.get() {
            Some(forced) => forced,
            None => self.inner.is_connected(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::net::TcpListener;

    struct Never;

    impl ConnectivityOracle for Never {
        fn is_connected(&self) -> bool {
            false
        }
    }

    #[test]
    fn override_takes_precedence() {
        let oracle = OverrideConnectivity::new(Never);
        let switch = oracle.switch();

        assert!(!oracle.is_connected());
        switch.set(Some(true));
        assert!(oracle.is_connected());
        switch.set(None);
        assert!(!oracle.is_connected());
    }

    #[cfg(not(windows))]
    #[test]
    fn probe_succeeds_against_listening_socket() {
        let listener = TcpListener::bind("127.0.0.1:0").unwrap();
        let addr = listener.local_addr().unwrap();
        let oracle = SystemConnectivity::new(addr, Duration::from_millis(500));

        assert!(oracle.is_connected());
    }

    #[cfg(not(windows))]
    #[test]
    fn probe_fails_against_closed_port() {
        let listener = TcpListener::bind("127.0.0.1:0").unwrap();
        let addr = listener.local_addr().unwrap();
        drop(listener);
        let oracle = SystemConnectivity::new(addr, Duration::from_millis(200));

        assert!(!oracle.is_connected());
    }
}
