mod decode;
mod lookups;

pub use decode::decode_lenient;
pub use lookups::{StoreError, VocabStore};
