//! Archive adapters: where the boilerplate comes from and how it is unpacked.

mod extract;
mod file;
mod http;

pub use extract::ZipMaterializer;
pub use file::FileArchiveSource;
pub use http::HttpArchiveSource;
