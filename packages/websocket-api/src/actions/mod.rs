pub mod connect;
pub mod disconnect;
pub mod send_message;
