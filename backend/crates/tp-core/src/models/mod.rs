pub mod chat_id;
pub mod destination_link;
pub mod send_key;
pub mod user;
