pub mod mail_handler;
