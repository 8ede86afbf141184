pub mod http_stub;
