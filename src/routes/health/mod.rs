mod handler;

pub use handler::{PingResponse, ping};
