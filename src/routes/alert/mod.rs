mod handler;
mod model;

pub use handler::{SENT_MESSAGE, submit_alert};
pub use model::{AlertRequest, AlertResponse, Coordinates};
