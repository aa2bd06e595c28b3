mod getheader;
mod manager;
mod manager_middleware;
mod method;

pub use getheader::get_header;
pub use manager::*;
pub use manager_middleware::*;
