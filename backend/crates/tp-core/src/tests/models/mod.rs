mod send_key;
mod user;
