/// Conversion services: document assembly and output naming
pub mod document_assembler;
pub mod filename;

pub use document_assembler::{AssembledDocument, DocumentAssembler};
pub use filename::derive_csaf_filename;
