//! Application ports (traits) for external dependencies.
//!
//! In hexagonal architecture, ports define interfaces that the application
//! needs from the outside world. Adapters in `plugkit-adapters` implement these.
//!
//! ## Port Types
//!
//! - **Driven (Output) Ports**: Called by application, implemented by infrastructure
//!   - `Filesystem`: File operations on the generated tree
//!   - `ArchiveSource`: Boilerplate retrieval
//!   - `TreeMaterializer`: Archive unpacking
//!   - `ProgressObserver`: Optional progress sink
//!
//! - **Driving (Input) Ports**: Called by external world, implemented by application
//!   - (Defined in CLI layer, implemented by services)

pub mod output;

pub use output::{
    ArchiveSource, Filesystem, NoProgress, ProgressEvent, ProgressObserver, TreeMaterializer,
};

#[cfg(test)]
pub use output::MockFilesystem;
