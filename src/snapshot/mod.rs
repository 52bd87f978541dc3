pub mod error;
pub mod index;
pub mod loader;
pub mod stream;

pub use error::LoaderError;
pub use index::{DuplicatePolicy, IndexEntry, TextureIndex, INDEX_VERSION};
pub use loader::{LoaderState, TextureLoader};
pub use stream::{SeekableStream, StdioStream};
