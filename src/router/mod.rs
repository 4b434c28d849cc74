pub mod mail_router;
