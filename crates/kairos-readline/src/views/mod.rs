pub mod chat;
pub mod crash;
pub mod layout;
pub mod pages;

pub use chat::ChatView;
