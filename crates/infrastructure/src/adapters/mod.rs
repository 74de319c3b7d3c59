//! Port adapters backed by the host system.

mod console_navigator;
mod reqwest_transport;
mod system_clock;

pub use console_navigator::ConsoleNavigator;
pub use reqwest_transport::ReqwestTransport;
pub use system_clock::SystemClock;
