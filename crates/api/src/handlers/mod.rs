pub mod assets;
pub mod chat;
pub mod contact;
pub mod content;
pub mod export;
pub mod import;
pub mod settings;
