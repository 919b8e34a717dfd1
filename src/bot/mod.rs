// Chat bot module.
// Command parsing, dispatch, reply formatting, and the Discord event handler.

pub mod command;
pub mod dispatcher;
pub mod handler;
pub mod reply;

pub use dispatcher::Dispatcher;
pub use handler::Handler;
