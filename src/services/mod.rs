pub mod mailer;
pub mod verify;
