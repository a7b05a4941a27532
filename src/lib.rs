pub mod bus;
pub mod cli;
pub mod contact;
pub mod content;
pub mod i18n;
pub mod prefs;
pub mod services;
pub mod session;
pub mod theme;
pub mod ui;
pub mod widgets;
