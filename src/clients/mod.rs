pub mod http_page;
pub mod page;
