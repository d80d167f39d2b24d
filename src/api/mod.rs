pub mod handlers;
pub mod response;
pub mod router;
