//! End-to-end checks of the discovery engine against real loopback sockets.

#[cfg(test)]
mod discovery;
#[cfg(test)]
mod utils;
