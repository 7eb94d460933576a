mod error;
mod send;
